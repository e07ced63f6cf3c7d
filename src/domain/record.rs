//! Record domain model
//!
//! A record is a read-only snapshot of one Things item (to-do, project,
//! heading or area) together with its materialized children.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
#[error("Unknown record type: '{0}'")]
pub struct KindError(pub String);

/// Kind of a Things record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    #[serde(rename = "to-do")]
    ToDo,
    #[serde(rename = "project")]
    Project,
    #[serde(rename = "heading")]
    Heading,
    #[serde(rename = "area")]
    Area,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::ToDo => "to-do",
            RecordKind::Project => "project",
            RecordKind::Heading => "heading",
            RecordKind::Area => "area",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = KindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "to-do" | "todo" => Ok(RecordKind::ToDo),
            "project" => Ok(RecordKind::Project),
            "heading" => Ok(RecordKind::Heading),
            "area" => Ok(RecordKind::Area),
            other => Err(KindError(other.to_string())),
        }
    }
}

/// One entry of a to-do's checklist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub title: String,
}

impl ChecklistItem {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

/// A Things item as returned by a [`crate::source::ThingsSource`]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Record {
    pub uuid: String,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<RecordKind>,

    pub title: String,

    /// Position among siblings; absent for areas
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Start bucket label ("Inbox", "Anytime", "Someday")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,

    /// Owning area uuid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,

    /// Owning area title, when `area` is set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub checklist: Vec<ChecklistItem>,

    /// Children, present when the query materialized them
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<Record>,
}

impl Record {
    /// Creates a record of the given kind with only uuid and title set
    pub fn new(kind: RecordKind, uuid: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            kind: Some(kind),
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn todo(uuid: impl Into<String>, title: impl Into<String>) -> Self {
        Self::new(RecordKind::ToDo, uuid, title)
    }

    pub fn project(uuid: impl Into<String>, title: impl Into<String>) -> Self {
        Self::new(RecordKind::Project, uuid, title)
    }

    pub fn heading(uuid: impl Into<String>, title: impl Into<String>) -> Self {
        Self::new(RecordKind::Heading, uuid, title)
    }

    pub fn area(uuid: impl Into<String>, title: impl Into<String>) -> Self {
        Self::new(RecordKind::Area, uuid, title)
    }

    pub fn with_index(mut self, index: i64) -> Self {
        self.index = Some(index);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_start(mut self, start: impl Into<String>) -> Self {
        self.start = Some(start.into());
        self
    }

    pub fn with_area(mut self, uuid: impl Into<String>, title: impl Into<String>) -> Self {
        self.area = Some(uuid.into());
        self.area_title = Some(title.into());
        self
    }

    pub fn with_project(mut self, uuid: impl Into<String>) -> Self {
        self.project = Some(uuid.into());
        self
    }

    pub fn with_heading(mut self, uuid: impl Into<String>) -> Self {
        self.heading = Some(uuid.into());
        self
    }

    pub fn with_checklist<I, S>(mut self, titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.checklist = titles.into_iter().map(ChecklistItem::new).collect();
        self
    }

    pub fn with_items(mut self, items: Vec<Record>) -> Self {
        self.items = items;
        self
    }

    pub fn is_kind(&self, kind: RecordKind) -> bool {
        self.kind == Some(kind)
    }

    pub fn is_todo(&self) -> bool {
        self.is_kind(RecordKind::ToDo)
    }

    pub fn is_project(&self) -> bool {
        self.is_kind(RecordKind::Project)
    }

    pub fn is_heading(&self) -> bool {
        self.is_kind(RecordKind::Heading)
    }

    pub fn is_area(&self) -> bool {
        self.is_kind(RecordKind::Area)
    }

    /// Returns the note, if there is a non-empty one
    pub fn note(&self) -> Option<&str> {
        self.notes.as_deref().filter(|n| !n.is_empty())
    }

    /// Sort key used for sibling ordering; missing indexes sort first
    pub fn sort_index(&self) -> i64 {
        self.index.unwrap_or(i64::MIN)
    }

    /// Returns true if the record belongs to the given area
    pub fn in_area(&self, area_uuid: &str) -> bool {
        self.area.as_deref() == Some(area_uuid)
    }

    /// Returns true if no area, project or heading owns this record
    pub fn is_unowned(&self) -> bool {
        is_blank(&self.area) && is_blank(&self.project) && is_blank(&self.heading)
    }
}

pub(crate) fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

/// Extracts the uuids of a list of records, keeping order and duplicates
pub fn list_to_uuids(records: &[Record]) -> Vec<String> {
    records.iter().map(|r| r.uuid.clone()).collect()
}

/// Joins uuids one per line, comma separated
pub fn format_uuids<I, S>(uuids: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    uuids
        .into_iter()
        .map(|u| u.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(",\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_labels_roundtrip() {
        for kind in [
            RecordKind::ToDo,
            RecordKind::Project,
            RecordKind::Heading,
            RecordKind::Area,
        ] {
            assert_eq!(kind.as_str().parse::<RecordKind>().unwrap(), kind);
        }
        assert!("checklist".parse::<RecordKind>().is_err());
    }

    #[test]
    fn deserialize_things_shaped_json() {
        let json = r#"{
            "uuid": "P1",
            "type": "project",
            "title": "Launch",
            "index": 3,
            "tags": ["work"],
            "items": [
                {"uuid": "T1", "type": "to-do", "title": "Ship", "index": 0,
                 "checklist": [{"title": "Box it"}]}
            ]
        }"#;

        let record: Record = serde_json::from_str(json).unwrap();
        assert!(record.is_project());
        assert_eq!(record.index, Some(3));
        assert_eq!(record.items.len(), 1);
        assert!(record.items[0].is_todo());
        assert_eq!(record.items[0].checklist[0].title, "Box it");
    }

    #[test]
    fn area_without_type_key_has_no_kind() {
        let record: Record = serde_json::from_str(r#"{"uuid": "A1", "title": "Home"}"#).unwrap();
        assert_eq!(record.kind, None);
        assert_eq!(record.index, None);
    }

    #[test]
    fn empty_note_is_no_note() {
        let todo = Record::todo("T1", "Ship").with_notes("");
        assert_eq!(todo.note(), None);
    }

    #[test]
    fn unowned_ignores_empty_strings() {
        let mut todo = Record::todo("T1", "Loose");
        todo.project = Some(String::new());
        assert!(todo.is_unowned());

        let todo = todo.with_heading("H1");
        assert!(!todo.is_unowned());
    }

    #[test]
    fn uuids_keep_order() {
        let records = vec![Record::todo("b", "B"), Record::todo("a", "A")];
        let uuids = list_to_uuids(&records);
        assert_eq!(uuids, vec!["b", "a"]);
        assert_eq!(format_uuids(&uuids), "b,\na");
    }
}
