//! Identifier-or-record references
//!
//! Every outline operation accepts either a raw Things uuid or a record the
//! caller already holds. The reference is resolved once, at the top of the
//! operation, by [`crate::outline::Outline::resolve`].

use std::fmt;

use super::record::Record;

/// A uuid still to be looked up, or an already resolved record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemRef<'a> {
    Uuid(&'a str),
    Record(&'a Record),
}

impl<'a> ItemRef<'a> {
    /// Returns the uuid this reference points at
    pub fn uuid(&self) -> &'a str {
        match self {
            ItemRef::Uuid(uuid) => uuid,
            ItemRef::Record(record) => &record.uuid,
        }
    }

    /// Returns the record if it's already resolved
    pub fn as_record(&self) -> Option<&'a Record> {
        match self {
            ItemRef::Uuid(_) => None,
            ItemRef::Record(record) => Some(record),
        }
    }
}

impl<'a> From<&'a str> for ItemRef<'a> {
    fn from(uuid: &'a str) -> Self {
        ItemRef::Uuid(uuid)
    }
}

impl<'a> From<&'a String> for ItemRef<'a> {
    fn from(uuid: &'a String) -> Self {
        ItemRef::Uuid(uuid)
    }
}

impl<'a> From<&'a Record> for ItemRef<'a> {
    fn from(record: &'a Record) -> Self {
        ItemRef::Record(record)
    }
}

impl fmt::Display for ItemRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.uuid())
    }
}
