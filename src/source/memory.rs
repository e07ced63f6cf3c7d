//! In-memory Things source
//!
//! Holds a flat list of areas and tasks wired together by their owner
//! references (`area`, `project`, `heading`), and materializes children on
//! every query the same way the SQLite source does. Query results keep
//! insertion order, so callers can observe how the outline reorders them.

use serde::{Deserialize, Serialize};

use super::{Membership, SourceError, TaskQuery, ThingsSource};
use crate::domain::{Record, RecordKind};

/// JSON snapshot layout: `{"areas": [...], "tasks": [...]}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct Snapshot {
    areas: Vec<Record>,
    tasks: Vec<Record>,
}

/// A [`ThingsSource`] backed by plain records
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    areas: Vec<Record>,
    tasks: Vec<Record>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a JSON snapshot
    pub fn from_json(json: &str) -> Result<Self, SourceError> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        let mut source = Self::new();
        for area in snapshot.areas {
            source.add_area(area);
        }
        for task in snapshot.tasks {
            source.add_task(task);
        }
        Ok(source)
    }

    /// Serializes the stored records as a JSON snapshot
    pub fn to_json(&self) -> Result<String, SourceError> {
        let snapshot = Snapshot {
            areas: self.areas.clone(),
            tasks: self.tasks.clone(),
        };
        Ok(serde_json::to_string_pretty(&snapshot)?)
    }

    /// Adds an area; its `items` are ignored, children come from task owners
    pub fn add_area(&mut self, mut area: Record) {
        area.kind = Some(RecordKind::Area);
        area.items.clear();
        self.areas.push(area);
    }

    /// Adds a to-do, project or heading
    pub fn add_task(&mut self, mut task: Record) {
        task.items.clear();
        if let Some(area_uuid) = task.area.as_deref() {
            if task.area_title.is_none() {
                task.area_title = self
                    .areas
                    .iter()
                    .find(|a| a.uuid == area_uuid)
                    .map(|a| a.title.clone());
            }
        }
        self.tasks.push(task);
    }

    pub fn with_area(mut self, area: Record) -> Self {
        self.add_area(area);
        self
    }

    pub fn with_task(mut self, task: Record) -> Self {
        self.add_task(task);
        self
    }

    fn children(&self, query: TaskQuery) -> Vec<Record> {
        self.tasks
            .iter()
            .filter(|t| query.matches(t))
            .map(|t| self.materialize(t))
            .collect()
    }

    fn materialize(&self, record: &Record) -> Record {
        let mut record = record.clone();
        let owner = Membership::Within(record.uuid.clone());
        record.items = match record.kind {
            Some(RecordKind::Project) => self.children(TaskQuery::default().project(owner)),
            Some(RecordKind::Heading) => {
                self.children(TaskQuery::of_kind(RecordKind::ToDo).heading(owner))
            }
            Some(RecordKind::Area) => self.children(TaskQuery::default().area(owner)),
            _ => Vec::new(),
        };
        record
    }
}

impl ThingsSource for MemorySource {
    fn task(&self, uuid: &str, kind: Option<RecordKind>) -> Result<Option<Record>, SourceError> {
        Ok(self
            .tasks
            .iter()
            .find(|t| t.uuid == uuid && kind.map_or(true, |k| t.is_kind(k)))
            .map(|t| self.materialize(t)))
    }

    fn area(&self, uuid: &str) -> Result<Option<Record>, SourceError> {
        Ok(self
            .areas
            .iter()
            .find(|a| a.uuid == uuid)
            .map(|a| self.materialize(a)))
    }

    fn tasks(&self, query: &TaskQuery) -> Result<Vec<Record>, SourceError> {
        Ok(self.children(query.clone()))
    }

    fn areas(&self) -> Result<Vec<Record>, SourceError> {
        Ok(self.areas.iter().map(|a| self.materialize(a)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MemorySource {
        MemorySource::new()
            .with_area(Record::area("A1", "Work"))
            .with_task(Record::project("P1", "Launch").with_index(0).with_area("A1", "Work"))
            .with_task(Record::heading("H1", "Later").with_index(1).with_project("P1"))
            .with_task(Record::todo("T1", "Ship").with_index(0).with_project("P1"))
            .with_task(Record::todo("T2", "Celebrate").with_index(0).with_heading("H1"))
    }

    #[test]
    fn project_materializes_headings_and_todos() {
        let source = sample();
        let project = source.task("P1", Some(RecordKind::Project)).unwrap().unwrap();

        let uuids: Vec<_> = project.items.iter().map(|r| r.uuid.as_str()).collect();
        assert_eq!(uuids, vec!["H1", "T1"]);
        assert_eq!(project.items[0].items[0].uuid, "T2");
    }

    #[test]
    fn kind_mismatch_is_none() {
        let source = sample();
        assert!(source.task("P1", Some(RecordKind::ToDo)).unwrap().is_none());
        assert!(source.task("P1", None).unwrap().is_some());
    }

    #[test]
    fn area_items_and_title_fill() {
        let source = sample();
        let area = source.area("A1").unwrap().unwrap();
        assert!(area.is_area());
        assert_eq!(area.items.len(), 1);
        assert_eq!(area.items[0].area_title.as_deref(), Some("Work"));
    }

    #[test]
    fn json_snapshot_roundtrip() {
        let source = sample();
        let json = source.to_json().unwrap();
        let reloaded = MemorySource::from_json(&json).unwrap();
        assert_eq!(reloaded.areas().unwrap(), source.areas().unwrap());
    }
}
