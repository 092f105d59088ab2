use regex::Regex;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static REPORT_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{8}-\d{4}_.+_report\.md$").expect("report file regex"));

// | [x] | 1 | ApexClass | 142 |
static CHECK_ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\|\s*\[([ xX]?)\]\s*\|\s*\d+\s*\|\s*(\S+)\s*\|").expect("check row regex")
});

/// One reviewed checklist row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckedType {
    pub name: String,
    pub checked: bool,
}

impl CheckedType {
    pub fn new(name: impl Into<String>, checked: bool) -> Self {
        Self {
            name: name.into(),
            checked,
        }
    }
}

/// Most recent checklist in `dir`, or `None` when the directory is missing
/// or holds no checklist files.
pub fn find_latest(dir: &Path) -> Option<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::debug!(dir = %dir.display(), %err, "no checklist directory");
            return None;
        }
    };
    let latest = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_ok_and(|kind| kind.is_file()))
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| REPORT_FILE.is_match(name))
        .max()?;
    Some(dir.join(latest))
}

/// Checkbox decisions from the checklist at `path`, in row order.
///
/// An unreadable file reads as a checklist without rows.
pub fn parse_checks(path: &Path) -> Vec<CheckedType> {
    match fs::read_to_string(path) {
        Ok(content) => parse_checks_str(&content),
        Err(err) => {
            tracing::debug!(path = %path.display(), %err, "checklist unreadable");
            Vec::new()
        }
    }
}

pub fn parse_checks_str(content: &str) -> Vec<CheckedType> {
    content
        .lines()
        .filter_map(|line| CHECK_ROW.captures(line))
        .map(|caps| {
            let mark = caps.get(1).map_or("", |m| m.as_str());
            let name = caps.get(2).map_or("", |m| m.as_str());
            CheckedType::new(name, mark.eq_ignore_ascii_case("x"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_directory_has_no_latest() {
        let temp = TempDir::new().expect("temp dir");
        assert!(find_latest(&temp.path().join("nonexistent")).is_none());
    }

    #[test]
    fn empty_directory_has_no_latest() {
        let temp = TempDir::new().expect("temp dir");
        assert!(find_latest(temp.path()).is_none());
    }

    #[test]
    fn picks_greatest_timestamp() {
        let temp = TempDir::new().expect("temp dir");
        for (name, body) in [
            ("20260201-0900_full_report.md", "old"),
            ("20260205-1430_full_report.md", "new"),
            ("20260203-1200_full_report.md", "mid"),
        ] {
            fs::write(temp.path().join(name), body).expect("write report");
        }
        assert_eq!(
            find_latest(temp.path()),
            Some(temp.path().join("20260205-1430_full_report.md"))
        );
    }

    #[test]
    fn ignores_files_outside_naming_convention() {
        let temp = TempDir::new().expect("temp dir");
        fs::write(temp.path().join("20260201-0900_full_report.md"), "").expect("write");
        fs::write(temp.path().join("zzz_report.md"), "").expect("write");
        fs::write(temp.path().join("20260301-0900_full_report.txt"), "").expect("write");
        fs::write(temp.path().join("fullManifest.xml"), "").expect("write");
        fs::create_dir(temp.path().join("20260401-0900_dir_report.md")).expect("mkdir");
        assert_eq!(
            find_latest(temp.path()),
            Some(temp.path().join("20260201-0900_full_report.md"))
        );
    }

    #[test]
    fn parses_checked_and_unchecked_rows() {
        let content = [
            "# Manifest Analysis Report",
            "",
            "| Include | # | Metadata Type | Members Count |",
            "|---------|--:|---------------|-------------:|",
            "| [x] | 1 | ApexClass | 10 |",
            "| [ ] | 2 | CustomObject | 5 |",
            "| [X] | 3 | ApexTrigger | 3 |",
            "| [] | 4 | Layout | 2 |",
            "| | | **Total: 4 types** | **20** |",
        ]
        .join("\n");
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join("test_report.md");
        fs::write(&path, content).expect("write report");

        assert_eq!(
            parse_checks(&path),
            vec![
                CheckedType::new("ApexClass", true),
                CheckedType::new("CustomObject", false),
                CheckedType::new("ApexTrigger", true),
                CheckedType::new("Layout", false),
            ]
        );
    }

    #[test]
    fn report_without_rows_parses_empty() {
        assert!(parse_checks_str("# Empty Report\n").is_empty());
    }

    #[test]
    fn unreadable_file_parses_empty() {
        let temp = TempDir::new().expect("temp dir");
        assert!(parse_checks(&temp.path().join("missing_report.md")).is_empty());
    }
}
