//! Review checklist written on every run and read back on the next one.
//!
//! Checklist files are named `<YYYYMMDD-HHmm>_<manifest stem>_report.md` and
//! live flat in the output directory, so the greatest file name is also the
//! most recent checklist.

mod read;
mod render;

pub use read::{find_latest, parse_checks, CheckedType};
pub use render::{render, ReportInput};

use chrono::NaiveDateTime;
use std::path::Path;

/// `chrono` format of the sortable file name prefix.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M";

pub const REPORT_SUFFIX: &str = "_report.md";

/// Checklist file name for a manifest written at `now`.
pub fn report_file_name(now: NaiveDateTime, manifest_file_name: &str) -> String {
    let base = Path::new(manifest_file_name)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(manifest_file_name);
    let stem = base.strip_suffix(".xml").unwrap_or(base);
    format!("{}_{stem}{REPORT_SUFFIX}", now.format(TIMESTAMP_FORMAT))
}
