//! # Outline
//!
//! Renders Things records as a TaskPaper outline that OmniFocus imports.
//!
//! ## Layout
//!
//! ```text
//! Launch: @tags(area-Work)          <- project (container, colon suffix)
//! 	project note
//! 	- Ship @due(2024-12-31) @tags()  <- to-do (leaf, dash prefix)
//! 		to-do note
//! 		- checklist entry
//! - Paint @tags(area-Home)          <- top-level area to-do
//! ```
//!
//! Areas and headings never get a line of their own. Heading children are
//! hoisted under the project, after its direct to-dos. Area contents are
//! written at the area's depth, and top-level area to-dos carry an
//! `area-<name>` tag instead.
//!
//! ## Key Types
//!
//! - [`Outline`] - resolves, orders and writes records from a source
//! - [`OutlineOptions`] - ordering knobs
//! - [`OutlineError`] - resolution and source failures

mod attributes;
mod hierarchy;
mod writer;

use std::borrow::Cow;

use thiserror::Error;

use crate::domain::{ItemRef, Record, RecordKind};
use crate::source::{SourceError, ThingsSource};

pub use attributes::{area_tag, omnifocus_parameters, AREA_TAG_PREFIX};
pub use writer::INDENT;

#[derive(Debug, Error)]
pub enum OutlineError {
    #[error("The UUID {uuid} is not in the database{}", kind_suffix(.kind))]
    UuidDoesNotResolve {
        uuid: String,
        kind: Option<RecordKind>,
    },

    #[error(transparent)]
    Source(#[from] SourceError),
}

fn kind_suffix(kind: &Option<RecordKind>) -> String {
    match kind {
        Some(kind) => format!(", or else is not of type '{kind}'"),
        None => String::new(),
    }
}

impl OutlineError {
    /// Returns true for a uuid that did not resolve, as opposed to a source failure
    pub fn is_unresolved(&self) -> bool {
        matches!(self, OutlineError::UuidDoesNotResolve { .. })
    }
}

pub type Result<T> = std::result::Result<T, OutlineError>;

/// Ordering options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutlineOptions {
    /// Sort a project's direct to-dos by index instead of keeping source order
    pub sort_direct_todos: bool,
}

/// Reads records from a [`ThingsSource`] and writes them as an outline
pub struct Outline<'s> {
    source: &'s dyn ThingsSource,
    options: OutlineOptions,
}

impl<'s> Outline<'s> {
    pub fn new(source: &'s dyn ThingsSource) -> Self {
        Self::with_options(source, OutlineOptions::default())
    }

    pub fn with_options(source: &'s dyn ThingsSource, options: OutlineOptions) -> Self {
        Self { source, options }
    }

    pub fn source(&self) -> &'s dyn ThingsSource {
        self.source
    }

    pub fn options(&self) -> OutlineOptions {
        self.options
    }

    /// Looks up the record with the given uuid, with its children
    ///
    /// Areas aren't a task type in the source, so an area kind (or a typed
    /// lookup that finds nothing) falls back to the area store. A record of
    /// a different kind than requested counts as not resolving.
    pub fn uuid_to_item(&self, uuid: &str, kind: Option<RecordKind>) -> Result<Record> {
        let mut item = None;
        if kind != Some(RecordKind::Area) {
            item = self.source.task(uuid, kind)?;
        }
        if item.is_none() {
            item = self.source.area(uuid)?.map(|mut area| {
                area.kind.get_or_insert(RecordKind::Area);
                area
            });
        }

        match item {
            Some(record) if kind.map_or(true, |k| record.is_kind(k)) => Ok(record),
            _ => Err(OutlineError::UuidDoesNotResolve {
                uuid: uuid.to_string(),
                kind,
            }),
        }
    }

    /// Resolves a reference; a record the caller already holds is trusted as-is
    pub fn resolve<'a>(&self, item: ItemRef<'a>, kind: Option<RecordKind>) -> Result<Cow<'a, Record>> {
        match item {
            ItemRef::Record(record) => Ok(Cow::Borrowed(record)),
            ItemRef::Uuid(uuid) => self.uuid_to_item(uuid, kind).map(Cow::Owned),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;

    fn source() -> MemorySource {
        MemorySource::new()
            .with_area(Record::area("A1", "Work"))
            .with_task(Record::project("P1", "Launch").with_index(0).with_area("A1", "Work"))
            .with_task(Record::todo("T1", "Ship").with_index(0).with_project("P1"))
    }

    #[test]
    fn resolves_each_kind() {
        let source = source();
        let outline = Outline::new(&source);

        assert!(outline.uuid_to_item("T1", Some(RecordKind::ToDo)).unwrap().is_todo());
        assert!(outline.uuid_to_item("P1", None).unwrap().is_project());
        assert!(outline.uuid_to_item("A1", None).unwrap().is_area());
        assert!(outline.uuid_to_item("A1", Some(RecordKind::Area)).unwrap().is_area());
    }

    #[test]
    fn missing_uuid_fails() {
        let source = source();
        let outline = Outline::new(&source);

        let err = outline.uuid_to_item("nope", None).unwrap_err();
        assert!(err.is_unresolved());
        assert_eq!(err.to_string(), "The UUID nope is not in the database");
    }

    #[test]
    fn wrong_kind_fails_with_kind_in_message() {
        let source = source();
        let outline = Outline::new(&source);

        let err = outline.uuid_to_item("P1", Some(RecordKind::ToDo)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "The UUID P1 is not in the database, or else is not of type 'to-do'"
        );

        // An area uuid doesn't satisfy a project lookup either
        assert!(outline.uuid_to_item("A1", Some(RecordKind::Project)).is_err());
        assert!(outline.uuid_to_item("T1", Some(RecordKind::Area)).is_err());
    }

    #[test]
    fn resolved_record_is_returned_unchanged() {
        let source = MemorySource::new();
        let outline = Outline::new(&source);
        let record = Record::heading("H1", "Not checked");

        let resolved = outline
            .resolve(ItemRef::from(&record), Some(RecordKind::Project))
            .unwrap();
        assert!(matches!(resolved, Cow::Borrowed(_)));
        assert_eq!(*resolved, record);
    }
}
