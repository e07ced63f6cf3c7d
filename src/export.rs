//! Export orchestration
//!
//! Builds a complete TaskPaper document, either for the whole database or
//! for an explicit list of uuids. The document is assembled in memory and
//! handed back in one piece; delivering it is the caller's job.

use std::fmt;

use crate::domain::{ItemRef, RecordKind};
use crate::outline::{Outline, OutlineError, Result};

/// A per-uuid problem that was skipped during a selective export
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportWarning {
    /// The uuid did not resolve to any item
    NotFound { uuid: String },
    /// The uuid resolved to something that isn't a to-do, project or area
    Unclassifiable { uuid: String },
}

impl ExportWarning {
    pub fn uuid(&self) -> &str {
        match self {
            ExportWarning::NotFound { uuid } | ExportWarning::Unclassifiable { uuid } => uuid,
        }
    }
}

impl fmt::Display for ExportWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportWarning::NotFound { uuid } => {
                write!(f, "Warning: UUID '{uuid}' was not found in the database")
            }
            ExportWarning::Unclassifiable { uuid } => write!(
                f,
                "Warning: the item with UUID '{uuid}' was not a 'to-do', 'project', or 'area'"
            ),
        }
    }
}

/// The result of one export run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Export {
    pub document: String,
    pub warnings: Vec<ExportWarning>,
}

/// Drives an [`Outline`] over the whole database or a uuid list
pub struct Exporter<'o, 's> {
    outline: &'o Outline<'s>,
}

impl<'o, 's> Exporter<'o, 's> {
    pub fn new(outline: &'o Outline<'s>) -> Self {
        Self { outline }
    }

    /// Exports everything when `uuids` is empty, otherwise exactly those items
    pub fn export(&self, uuids: &[String]) -> Result<Export> {
        let mut export = Export::default();
        if uuids.is_empty() {
            self.export_all(&mut export.document)?;
        } else {
            export.warnings = self.export_selected(uuids, &mut export.document)?;
        }
        Ok(export)
    }

    /// Writes every area's contents (areas by title), then projects and
    /// to-dos that have no area
    pub fn export_all(&self, out: &mut String) -> Result<()> {
        let mut areas = self.outline.source().areas()?;
        // Areas carry no index; title order keeps the output deterministic
        areas.sort_by(|a, b| a.title.cmp(&b.title));

        for area in &areas {
            self.outline.write_all_items_in_area(area.into(), out, 0)?;
        }
        self.outline
            .write_projects(&self.outline.projects_with_no_area()?, out, 0)?;
        self.outline
            .write_todos(&self.outline.todos_with_no_area()?, out, 0, None)
    }

    /// Writes each uuid's item in the order given
    ///
    /// A uuid that doesn't resolve, or resolves to something other than a
    /// to-do, project or area, is skipped with a warning. Source failures
    /// still abort the run.
    pub fn export_selected(&self, uuids: &[String], out: &mut String) -> Result<Vec<ExportWarning>> {
        let mut warnings = Vec::new();

        for uuid in uuids {
            let item = match self.outline.uuid_to_item(uuid, None) {
                Ok(item) => item,
                Err(OutlineError::UuidDoesNotResolve { .. }) => {
                    warnings.push(ExportWarning::NotFound { uuid: uuid.clone() });
                    continue;
                }
                Err(e) => return Err(e),
            };

            let item_ref = ItemRef::Record(&item);
            match item.kind {
                Some(RecordKind::ToDo) => self.outline.write_todo(item_ref, out, 0, None)?,
                Some(RecordKind::Project) => self.outline.write_project(item_ref, out, 0)?,
                Some(RecordKind::Area) => self.outline.write_all_items_in_area(item_ref, out, 0)?,
                Some(RecordKind::Heading) | None => {
                    warnings.push(ExportWarning::Unclassifiable { uuid: uuid.clone() });
                }
            }
        }

        Ok(warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Record;
    use crate::source::MemorySource;

    fn database() -> MemorySource {
        MemorySource::new()
            .with_area(Record::area("A2", "Work"))
            .with_area(Record::area("A1", "Home"))
            .with_task(Record::project("P1", "Launch").with_index(0).with_area("A2", "Work"))
            .with_task(Record::todo("T1", "Ship").with_index(0).with_project("P1"))
            .with_task(Record::todo("T2", "Mow").with_index(0).with_area("A1", "Home"))
            .with_task(Record::project("P2", "Side").with_index(0))
            .with_task(Record::heading("H1", "Someday").with_index(0).with_project("P2"))
            .with_task(Record::todo("T3", "Inbox item").with_index(0))
    }

    #[test]
    fn whole_database_order() {
        let source = database();
        let outline = Outline::new(&source);

        let export = Exporter::new(&outline).export(&[]).unwrap();
        assert!(export.warnings.is_empty());
        assert_eq!(
            export.document,
            "- Mow @tags(area-Home)\n\
             Launch: @tags(area-Work)\n\
             \t- Ship @tags()\n\
             Side: @tags()\n\
             - Inbox item @tags()\n"
        );
    }

    #[test]
    fn single_area_project() {
        let source = MemorySource::new()
            .with_area(Record::area("A1", "Work"))
            .with_task(Record::project("P1", "Launch").with_index(0).with_area("A1", "Work"))
            .with_task(Record::todo("T1", "Ship").with_index(0).with_project("P1"));
        let outline = Outline::new(&source);

        let export = Exporter::new(&outline).export(&[]).unwrap();
        assert_eq!(export.document, "Launch: @tags(area-Work)\n\t- Ship @tags()\n");
    }

    #[test]
    fn selective_skips_missing_uuid() {
        let source = database();
        let outline = Outline::new(&source);
        let uuids = vec!["T3".to_string(), "missing".to_string(), "P2".to_string()];

        let export = Exporter::new(&outline).export(&uuids).unwrap();
        assert_eq!(export.document, "- Inbox item @tags()\nSide: @tags()\n");
        assert_eq!(
            export.warnings,
            vec![ExportWarning::NotFound {
                uuid: "missing".into()
            }]
        );
        assert_eq!(
            export.warnings[0].to_string(),
            "Warning: UUID 'missing' was not found in the database"
        );
    }

    #[test]
    fn selective_dispatches_area_and_rejects_heading() {
        let mut source = database();
        // A row whose type Things doesn't report
        source.add_task(Record {
            uuid: "X1".into(),
            title: "Odd".into(),
            ..Record::default()
        });
        let outline = Outline::new(&source);
        let uuids = vec!["A1".to_string(), "H1".to_string(), "X1".to_string()];

        let export = Exporter::new(&outline).export(&uuids).unwrap();
        assert_eq!(export.document, "- Mow @tags(area-Home)\n");
        let warned: Vec<_> = export.warnings.iter().map(|w| w.uuid()).collect();
        assert_eq!(warned, vec!["H1", "X1"]);
        assert!(export
            .warnings
            .iter()
            .all(|w| matches!(w, ExportWarning::Unclassifiable { .. })));
        assert!(export.warnings[1].to_string().contains("was not a 'to-do'"));
    }

    #[test]
    fn selective_keeps_given_order() {
        let source = database();
        let outline = Outline::new(&source);
        let uuids = vec!["T3".to_string(), "T2".to_string(), "T3".to_string()];

        let export = Exporter::new(&outline).export(&uuids).unwrap();
        assert_eq!(
            export.document,
            "- Inbox item @tags()\n- Mow @tags()\n- Inbox item @tags()\n"
        );
    }
}
