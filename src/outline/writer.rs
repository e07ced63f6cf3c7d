//! TaskPaper writer
//!
//! Every write method appends to a caller-owned buffer at an explicit depth.

use super::attributes::omnifocus_parameters;
use super::{Outline, Result};
use crate::domain::{ItemRef, Record, RecordKind};

/// One level of indentation
pub const INDENT: &str = "\t";

fn indent(depth: usize) -> String {
    INDENT.repeat(depth)
}

/// Writes a note, every line indented to `depth`
fn write_note_if_any(record: &Record, out: &mut String, depth: usize) {
    if let Some(note) = record.note() {
        let prefix = indent(depth);
        for line in note.lines() {
            out.push_str(&prefix);
            out.push_str(line);
            out.push('\n');
        }
    }
}

/// Writes checklist entries as leaf lines at `depth`
fn write_checklist_if_any(todo: &Record, out: &mut String, depth: usize) {
    let prefix = indent(depth);
    for entry in &todo.checklist {
        out.push_str(&format!("{prefix}- {}\n", entry.title));
    }
}

impl Outline<'_> {
    /// Writes one to-do, followed by its note and checklist one level deeper
    ///
    /// `area_name` adds an `area-<name>` tag; pass it only for to-dos at the
    /// top level of an area.
    pub fn write_todo(
        &self,
        todo: ItemRef<'_>,
        out: &mut String,
        depth: usize,
        area_name: Option<&str>,
    ) -> Result<()> {
        let todo = self.resolve(todo, Some(RecordKind::ToDo))?;

        out.push_str(&format!(
            "{}- {}{}\n",
            indent(depth),
            todo.title,
            omnifocus_parameters(&todo, area_name)
        ));
        write_note_if_any(&todo, out, depth + 1);
        write_checklist_if_any(&todo, out, depth + 1);
        Ok(())
    }

    /// Writes several to-dos at the same depth
    pub fn write_todos<'r, I, R>(
        &self,
        todos: I,
        out: &mut String,
        depth: usize,
        area_name: Option<&str>,
    ) -> Result<()>
    where
        I: IntoIterator<Item = R>,
        R: Into<ItemRef<'r>>,
    {
        for todo in todos {
            self.write_todo(todo.into(), out, depth, area_name)?;
        }
        Ok(())
    }

    /// Writes a project line, its note, and all its to-dos one level deeper
    ///
    /// The project line is tagged with its owning area, if any. Its to-dos are
    /// not: they already have a definite project.
    pub fn write_project(&self, project: ItemRef<'_>, out: &mut String, depth: usize) -> Result<()> {
        let project = self.resolve(project, Some(RecordKind::Project))?;

        out.push_str(&format!(
            "{}{}:{}\n",
            indent(depth),
            project.title,
            omnifocus_parameters(&project, project.area_title.as_deref())
        ));
        write_note_if_any(&project, out, depth + 1);

        let todos = self.todos_for_project(ItemRef::Record(&*project))?;
        self.write_todos(&todos, out, depth + 1, None)
    }

    /// Writes several projects at the same depth
    pub fn write_projects<'r, I, R>(&self, projects: I, out: &mut String, depth: usize) -> Result<()>
    where
        I: IntoIterator<Item = R>,
        R: Into<ItemRef<'r>>,
    {
        for project in projects {
            self.write_project(project.into(), out, depth)?;
        }
        Ok(())
    }

    /// Writes everything inside an area, but not the area itself
    ///
    /// OmniFocus creates no projects at all when the import contains an area
    /// container, so the area stays invisible: its projects come first, then
    /// its top-level to-dos tagged with the area name.
    pub fn write_all_items_in_area(&self, area: ItemRef<'_>, out: &mut String, depth: usize) -> Result<()> {
        let area = self.resolve(area, Some(RecordKind::Area))?;
        let area_ref = ItemRef::Record(&*area);

        self.write_projects(&self.projects_for_area(area_ref)?, out, depth)?;
        self.write_todos(
            &self.todos_for_area(area_ref)?,
            out,
            depth,
            Some(area.title.as_str()),
        )
    }
}
