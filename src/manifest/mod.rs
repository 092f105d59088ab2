//! Package manifest model and the transforms applied to it.
//!
//! Analysis reads the `<types>` structure of the manifest. Filtering and
//! annotation work on raw lines so regions they do not touch keep their
//! original formatting byte for byte.

mod analyze;
mod annotate;
mod filter;
mod scan;

pub use analyze::{analyze, totals};
pub use annotate::annotate;
pub use filter::filter;

use serde::Serialize;

/// Per-type statistics derived from one manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeSummary {
    pub name: String,
    pub member_count: usize,
    pub members: Vec<String>,
    pub first_member: String,
    pub last_member: String,
}

impl TypeSummary {
    pub fn new(name: impl Into<String>, members: Vec<String>) -> Self {
        let first_member = members.first().cloned().unwrap_or_default();
        let last_member = members.last().cloned().unwrap_or_default();
        Self {
            name: name.into(),
            member_count: members.len(),
            members,
            first_member,
            last_member,
        }
    }

    /// First and last member, only when both are present.
    pub fn member_range(&self) -> Option<(&str, &str)> {
        if self.first_member.is_empty() || self.last_member.is_empty() {
            return None;
        }
        Some((self.first_member.as_str(), self.last_member.as_str()))
    }
}
