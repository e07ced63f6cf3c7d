//! Things to TaskPaper - export a Things 3 database for OmniFocus
//!
//! Reads areas, projects, headings and to-dos from Things and writes them
//! as a TaskPaper outline that OmniFocus can import from the clipboard.
//! Headings are flattened into their projects, areas are left out of the
//! outline, and start/due dates, tags and the Things start bucket become
//! OmniFocus `@defer`, `@due` and `@tags` annotations.

pub mod domain;
pub mod source;
pub mod outline;
pub mod export;
pub mod config;
pub mod cli;

pub use domain::{ItemRef, Record, RecordKind};
pub use export::{Export, ExportWarning, Exporter};
pub use outline::{Outline, OutlineError, OutlineOptions};
pub use source::{MemorySource, ThingsDatabase, ThingsSource};
