//! One review run over a package manifest.
//!
//! The previous checklist in the output directory decides whether the
//! manifest is filtered first. The (possibly filtered) manifest is then
//! analyzed, annotated, and written next to a fresh checklist.
use crate::checklist::{self, CheckedType, ReportInput};
use crate::config::Settings;
use crate::manifest::{self, TypeSummary};
use crate::staging::Staging;
use anyhow::{anyhow, Result};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Source of the timestamp in checklist file names.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Local wall-clock time.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

/// Why a run keeps the full manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    NoChecklist,
    NoRows,
    AllChecked,
    NoneChecked,
}

/// Whether the next run filters the manifest, and to which types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "detail", rename_all = "snake_case")]
pub enum FilterDecision {
    Skip(SkipReason),
    Apply(BTreeSet<String>),
}

impl FilterDecision {
    /// Filtering applies only when the reviewer left at least one row checked
    /// and at least one unchecked.
    pub fn from_checks(checks: &[CheckedType]) -> Self {
        if checks.is_empty() {
            return Self::Skip(SkipReason::NoRows);
        }
        let allowed: BTreeSet<String> = checks
            .iter()
            .filter(|check| check.checked)
            .map(|check| check.name.clone())
            .collect();
        let any_unchecked = checks.iter().any(|check| !check.checked);
        match (allowed.is_empty(), any_unchecked) {
            (true, _) => Self::Skip(SkipReason::NoneChecked),
            (false, false) => Self::Skip(SkipReason::AllChecked),
            (false, true) => Self::Apply(allowed),
        }
    }

    pub fn allowed(&self) -> Option<&BTreeSet<String>> {
        match self {
            Self::Apply(allowed) => Some(allowed),
            Self::Skip(_) => None,
        }
    }
}

/// The latest checklist in a directory and what it asks for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriorReview {
    pub checklist: Option<PathBuf>,
    pub checks: Vec<CheckedType>,
    pub decision: FilterDecision,
}

pub fn prior_review(dir: &Path) -> PriorReview {
    let Some(checklist) = checklist::find_latest(dir) else {
        return PriorReview {
            checklist: None,
            checks: Vec::new(),
            decision: FilterDecision::Skip(SkipReason::NoChecklist),
        };
    };
    let checks = checklist::parse_checks(&checklist);
    let decision = FilterDecision::from_checks(&checks);
    PriorReview {
        checklist: Some(checklist),
        checks,
        decision,
    }
}

/// Annotated manifest plus the statistics it was annotated with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedManifest {
    pub manifest: String,
    pub summaries: Vec<TypeSummary>,
    pub total_types: usize,
    pub total_members: usize,
}

/// Filter (when `decision` asks for it), analyze, and annotate `document`.
pub fn build_manifest(document: &str, decision: &FilterDecision) -> AnnotatedManifest {
    let filtered;
    let source = match decision.allowed() {
        Some(allowed) => {
            filtered = manifest::filter(document, allowed);
            filtered.as_str()
        }
        None => document,
    };
    let summaries = manifest::analyze(source);
    let (total_types, total_members) = manifest::totals(&summaries);
    let annotated = manifest::annotate(source, &summaries);
    AnnotatedManifest {
        manifest: annotated,
        summaries,
        total_types,
        total_members,
    }
}

/// Result of `mfr generate`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub manifest_path: PathBuf,
    pub report_path: PathBuf,
    pub total_types: usize,
    pub total_members: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filtered_by: Option<PathBuf>,
    pub types: Vec<TypeSummary>,
}

/// Run the full review cycle and publish both artifacts into the output
/// directory.
pub fn run_generate(
    document: &str,
    source_label: &str,
    settings: &Settings,
    clock: &dyn Clock,
) -> Result<RunSummary> {
    let prior = prior_review(&settings.output_dir);
    match &prior.decision {
        FilterDecision::Apply(allowed) => tracing::info!(
            checklist = %prior.checklist.as_deref().unwrap_or(Path::new("")).display(),
            kept_types = allowed.len(),
            "filtering manifest by previous checklist"
        ),
        FilterDecision::Skip(reason) => {
            tracing::info!(?reason, "keeping full manifest")
        }
    }

    let built = build_manifest(document, &prior.decision);
    if built.summaries.is_empty() {
        return Err(anyhow!("no metadata components found in {source_label}"));
    }

    let report = checklist::render(&ReportInput {
        org_label: &settings.org_label,
        file_name: &settings.file_name,
        summaries: &built.summaries,
        total_types: built.total_types,
        total_members: built.total_members,
    });
    let report_name = checklist::report_file_name(clock.now(), &settings.file_name);

    let staging = Staging::new(&settings.output_dir)?;
    staging.write_text(&settings.file_name, &built.manifest)?;
    staging.write_text(&report_name, &report)?;
    staging.publish()?;

    tracing::info!(
        total_types = built.total_types,
        total_members = built.total_members,
        "review run complete"
    );

    let filtered_by = match prior.decision {
        FilterDecision::Apply(_) => prior.checklist,
        FilterDecision::Skip(_) => None,
    };
    Ok(RunSummary {
        manifest_path: settings.output_dir.join(&settings.file_name),
        report_path: settings.output_dir.join(report_name),
        total_types: built.total_types,
        total_members: built.total_members,
        filtered_by,
        types: built.summaries,
    })
}

#[cfg(test)]
#[path = "workflow_tests.rs"]
mod tests;
