//! Child ordering
//!
//! Things flattens headings into the project model: a to-do under a
//! heading is a child of the heading, not of the project. These queries
//! unwind that and return children in the order the Things UI shows them.

use super::{Outline, Result};
use crate::domain::{ItemRef, Record, RecordKind};
use crate::source::{Membership, TaskQuery};

fn sorted_by_index(mut records: Vec<Record>) -> Vec<Record> {
    records.sort_by_key(Record::sort_index);
    records
}

impl Outline<'_> {
    /// All to-dos of a project, headings hoisted, in display order
    ///
    /// Direct to-dos come first, then each heading's to-dos with headings
    /// taken by index. Direct to-dos keep source order unless
    /// `sort_direct_todos` is set.
    pub fn todos_for_project(&self, project: ItemRef<'_>) -> Result<Vec<Record>> {
        let project = self.resolve(project, Some(RecordKind::Project))?;

        let mut todos: Vec<Record> = project
            .items
            .iter()
            .filter(|item| item.is_todo())
            .cloned()
            .collect();
        if self.options.sort_direct_todos {
            todos.sort_by_key(Record::sort_index);
        }

        let headings = sorted_by_index(
            project
                .items
                .iter()
                .filter(|item| item.is_heading())
                .cloned()
                .collect(),
        );

        for heading in headings {
            todos.extend(sorted_by_index(
                heading.items.into_iter().filter(Record::is_todo).collect(),
            ));
        }

        Ok(todos)
    }

    /// Projects directly in an area, by index
    pub fn projects_for_area(&self, area: ItemRef<'_>) -> Result<Vec<Record>> {
        let area = self.resolve(area, Some(RecordKind::Area))?;
        Ok(sorted_by_index(
            area.items
                .iter()
                .filter(|item| item.is_project() && item.in_area(&area.uuid))
                .cloned()
                .collect(),
        ))
    }

    /// To-dos at the top level of an area, by index
    pub fn todos_for_area(&self, area: ItemRef<'_>) -> Result<Vec<Record>> {
        let area = self.resolve(area, Some(RecordKind::Area))?;
        Ok(sorted_by_index(
            area.items
                .iter()
                .filter(|item| item.is_todo() && item.in_area(&area.uuid))
                .cloned()
                .collect(),
        ))
    }

    /// Projects outside any area, by index
    pub fn projects_with_no_area(&self) -> Result<Vec<Record>> {
        let query = TaskQuery::of_kind(RecordKind::Project).area(Membership::Without);
        let projects = self.source.tasks(&query)?;
        Ok(sorted_by_index(
            projects
                .into_iter()
                .filter(|p| p.is_project() && crate::domain::is_blank(&p.area))
                .collect(),
        ))
    }

    /// To-dos with no area, project or heading, by index
    pub fn todos_with_no_area(&self) -> Result<Vec<Record>> {
        let query = TaskQuery::of_kind(RecordKind::ToDo)
            .area(Membership::Without)
            .project(Membership::Without)
            .heading(Membership::Without);
        let todos = self.source.tasks(&query)?;
        Ok(sorted_by_index(
            todos.into_iter().filter(Record::is_unowned).collect(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::super::OutlineOptions;
    use super::*;
    use crate::source::MemorySource;

    fn titles(records: &[Record]) -> Vec<&str> {
        records.iter().map(|r| r.title.as_str()).collect()
    }

    fn project_with_headings() -> MemorySource {
        MemorySource::new()
            .with_task(Record::project("P1", "Launch").with_index(0))
            .with_task(Record::heading("H2", "Second").with_index(2).with_project("P1"))
            .with_task(Record::todo("D2", "Direct b").with_index(5).with_project("P1"))
            .with_task(Record::heading("H1", "First").with_index(1).with_project("P1"))
            .with_task(Record::todo("D1", "Direct a").with_index(3).with_project("P1"))
            .with_task(Record::todo("X2", "Under second").with_index(0).with_heading("H2"))
            .with_task(Record::todo("X1b", "Under first b").with_index(9).with_heading("H1"))
            .with_task(Record::todo("X1a", "Under first a").with_index(4).with_heading("H1"))
    }

    #[test]
    fn empty_project_has_no_todos() {
        let source = MemorySource::new().with_task(Record::project("P1", "Empty"));
        let outline = Outline::new(&source);
        assert!(outline.todos_for_project("P1".into()).unwrap().is_empty());
    }

    #[test]
    fn headings_flattened_after_direct_todos() {
        let source = project_with_headings();
        let outline = Outline::new(&source);

        let todos = outline.todos_for_project("P1".into()).unwrap();
        assert_eq!(
            titles(&todos),
            vec!["Direct b", "Direct a", "Under first a", "Under first b", "Under second"]
        );
    }

    #[test]
    fn direct_todos_sorted_when_asked() {
        let source = project_with_headings();
        let outline = Outline::with_options(
            &source,
            OutlineOptions {
                sort_direct_todos: true,
            },
        );

        let todos = outline.todos_for_project("P1".into()).unwrap();
        assert_eq!(&titles(&todos)[..2], &["Direct a", "Direct b"]);
    }

    #[test]
    fn project_lookup_propagates_failure() {
        let source = project_with_headings();
        let outline = Outline::new(&source);

        let err = outline.todos_for_project("D1".into()).unwrap_err();
        assert!(err.is_unresolved());
    }

    #[test]
    fn area_children_split_and_sorted() {
        let source = MemorySource::new()
            .with_area(Record::area("A1", "Work"))
            .with_task(Record::project("P2", "Beta").with_index(2).with_area("A1", "Work"))
            .with_task(Record::project("P1", "Alpha").with_index(1).with_area("A1", "Work"))
            .with_task(Record::todo("T2", "Later").with_index(8).with_area("A1", "Work"))
            .with_task(Record::todo("T1", "Sooner").with_index(7).with_area("A1", "Work"));
        let outline = Outline::new(&source);

        let projects = outline.projects_for_area("A1".into()).unwrap();
        assert_eq!(titles(&projects), vec!["Alpha", "Beta"]);

        let todos = outline.todos_for_area("A1".into()).unwrap();
        assert_eq!(titles(&todos), vec!["Sooner", "Later"]);
    }

    #[test]
    fn unowned_projects_and_todos() {
        let source = MemorySource::new()
            .with_area(Record::area("A1", "Work"))
            .with_task(Record::project("P1", "In area").with_index(0).with_area("A1", "Work"))
            .with_task(Record::project("P3", "Loose b").with_index(3))
            .with_task(Record::project("P2", "Loose a").with_index(1))
            .with_task(Record::todo("T1", "Owned").with_index(0).with_project("P2"))
            .with_task(Record::todo("T3", "Inbox b").with_index(6))
            .with_task(Record::todo("T2", "Inbox a").with_index(2));
        let outline = Outline::new(&source);

        let projects = outline.projects_with_no_area().unwrap();
        assert_eq!(titles(&projects), vec!["Loose a", "Loose b"]);

        let todos = outline.todos_with_no_area().unwrap();
        assert_eq!(titles(&todos), vec!["Inbox a", "Inbox b"]);
    }
}
