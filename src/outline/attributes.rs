//! OmniFocus annotation tokens
//!
//! Builds the ` @defer(..) @due(..) @tags(..)` suffix appended to project
//! and to-do lines. Each token carries its own leading space, so the
//! suffix is appended directly after the title (or the project colon).

use std::collections::BTreeSet;

use crate::domain::Record;

/// Tag prefix for items sitting at the top level of an area
pub const AREA_TAG_PREFIX: &str = "area-";

/// Returns the tag that marks an item as coming from the named area
pub fn area_tag(area_name: &str) -> String {
    format!("{AREA_TAG_PREFIX}{}", area_name.replace(' ', "-"))
}

/// Returns the annotation suffix for a project or to-do
///
/// `@tags(..)` is always present, even when empty. Repeating items are not
/// detected; they come out like any other item.
pub fn omnifocus_parameters(record: &Record, area_name: Option<&str>) -> String {
    let mut result = String::new();

    if let Some(when) = record.start_date.as_deref().filter(|d| !d.is_empty()) {
        result.push_str(&format!(" @defer({when})"));
    }
    if let Some(when) = record.deadline.as_deref().filter(|d| !d.is_empty()) {
        result.push_str(&format!(" @due({when})"));
    }

    let mut tags: BTreeSet<String> = record.tags.iter().cloned().collect();
    if let Some(start) = record.start.as_deref().filter(|s| !s.is_empty()) {
        tags.insert(start.to_string());
    }
    if let Some(name) = area_name.filter(|n| !n.is_empty()) {
        tags.insert(area_tag(name));
    }

    let tags: Vec<&str> = tags.iter().map(String::as_str).collect();
    result.push_str(&format!(" @tags({})", tags.join(", ")));
    result
}
