//! # Source Accessor
//!
//! Read-only access to a Things database.
//!
//! ## Implementations
//!
//! | Type | Backing store | Used by |
//! |------|---------------|---------|
//! | [`ThingsDatabase`] | Things 3 `main.sqlite` | the CLI |
//! | [`MemorySource`] | `Record` trees / JSON snapshot | tests, fixtures |
//!
//! Every query materializes children: a project comes back with its to-dos
//! and headings, a heading with its to-dos, an area with its projects and
//! top-level to-dos, and a to-do with its checklist. A single lookup
//! therefore yields the whole subtree needed to render an item.

mod memory;
mod sqlite;

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::{Record, RecordKind};

pub use memory::MemorySource;
pub use sqlite::{default_database_path, ThingsDatabase};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Things database not found at {0}")]
    NotFound(PathBuf),

    #[error("Could not locate the Things database; pass --database")]
    NoDefaultDatabase,

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Invalid JSON snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid date value: {0}")]
    InvalidDate(String),
}

/// Filter on an owner reference (area, project or heading)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Membership {
    /// No constraint
    #[default]
    Any,
    /// Owner reference must be empty
    Without,
    /// Owner reference must equal the given uuid
    Within(String),
}

impl Membership {
    /// Returns true if the owner reference satisfies this filter
    pub fn matches(&self, owner: Option<&str>) -> bool {
        let owner = owner.filter(|o| !o.is_empty());
        match self {
            Membership::Any => true,
            Membership::Without => owner.is_none(),
            Membership::Within(uuid) => owner == Some(uuid.as_str()),
        }
    }
}

/// Query over to-dos, projects and headings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskQuery {
    pub kind: Option<RecordKind>,
    pub area: Membership,
    pub project: Membership,
    pub heading: Membership,
}

impl TaskQuery {
    pub fn of_kind(kind: RecordKind) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }

    pub fn area(mut self, area: Membership) -> Self {
        self.area = area;
        self
    }

    pub fn project(mut self, project: Membership) -> Self {
        self.project = project;
        self
    }

    pub fn heading(mut self, heading: Membership) -> Self {
        self.heading = heading;
        self
    }

    /// Returns true if the record satisfies every filter of this query
    pub fn matches(&self, record: &Record) -> bool {
        self.kind.map_or(true, |k| record.is_kind(k))
            && self.area.matches(record.area.as_deref())
            && self.project.matches(record.project.as_deref())
            && self.heading.matches(record.heading.as_deref())
    }
}

/// The database accessor every outline operation reads through
pub trait ThingsSource {
    /// Looks up a to-do, project or heading by uuid, optionally of a given kind
    fn task(&self, uuid: &str, kind: Option<RecordKind>) -> Result<Option<Record>, SourceError>;

    /// Looks up an area by uuid
    fn area(&self, uuid: &str) -> Result<Option<Record>, SourceError>;

    /// Returns all to-dos, projects and headings matching the query
    fn tasks(&self, query: &TaskQuery) -> Result<Vec<Record>, SourceError>;

    /// Returns all areas
    fn areas(&self) -> Result<Vec<Record>, SourceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_filters() {
        assert!(Membership::Any.matches(None));
        assert!(Membership::Any.matches(Some("A1")));
        assert!(Membership::Without.matches(None));
        assert!(Membership::Without.matches(Some("")));
        assert!(!Membership::Without.matches(Some("A1")));
        assert!(Membership::Within("A1".into()).matches(Some("A1")));
        assert!(!Membership::Within("A1".into()).matches(Some("A2")));
        assert!(!Membership::Within("A1".into()).matches(None));
    }

    #[test]
    fn query_combines_filters() {
        let query = TaskQuery::of_kind(RecordKind::ToDo)
            .area(Membership::Without)
            .project(Membership::Without)
            .heading(Membership::Without);

        assert!(query.matches(&Record::todo("T1", "Loose")));
        assert!(!query.matches(&Record::todo("T2", "Owned").with_project("P1")));
        assert!(!query.matches(&Record::project("P1", "Launch")));
    }
}
