//! Domain models for the Things exporter
//!
//! Contains the record snapshots and references without any I/O concerns.

mod item_ref;
mod record;

pub use item_ref::ItemRef;
pub use record::{format_uuids, list_to_uuids, ChecklistItem, KindError, Record, RecordKind};
pub(crate) use record::is_blank;
