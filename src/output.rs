//! Printing command results as text or JSON.
use crate::manifest::TypeSummary;
use crate::util::display_path;
use crate::workflow::{FilterDecision, PriorReview, RunSummary, SkipReason};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("serialize output JSON")?;
    println!("{text}");
    Ok(())
}

fn shown(path: &Path) -> String {
    let cwd = std::env::current_dir().ok();
    display_path(path, cwd.as_deref())
}

pub fn print_run_summary(summary: &RunSummary, json: bool) -> Result<()> {
    if json {
        return print_json(summary);
    }
    if let Some(checklist) = &summary.filtered_by {
        println!("Filtered by checklist: {}", shown(checklist));
    }
    println!("Manifest written: {}", shown(&summary.manifest_path));
    println!("Report written: {}", shown(&summary.report_path));
    println!();
    println!(
        "Found {} metadata types with {} members.",
        summary.total_types, summary.total_members
    );
    Ok(())
}

pub fn print_summaries(summaries: &[TypeSummary], json: bool) -> Result<()> {
    if json {
        return print_json(&summaries);
    }
    for summary in summaries {
        match summary.member_range() {
            Some((first, last)) => println!(
                "{}\t{}\t{first} ~ {last}",
                summary.name, summary.member_count
            ),
            None => println!("{}\t{}", summary.name, summary.member_count),
        }
    }
    Ok(())
}

pub fn print_prior_review(review: &PriorReview, json: bool) -> Result<()> {
    if json {
        return print_json(review);
    }
    let Some(checklist) = &review.checklist else {
        println!("No checklist found.");
        return Ok(());
    };
    println!("Checklist: {}", shown(checklist));
    for check in &review.checks {
        let mark = if check.checked { "x" } else { " " };
        println!("[{mark}] {}", check.name);
    }
    println!();
    println!("{}", decision_line(&review.decision));
    Ok(())
}

fn decision_line(decision: &FilterDecision) -> String {
    match decision {
        FilterDecision::Apply(allowed) => format!(
            "Next run keeps {} types: {}",
            allowed.len(),
            allowed.iter().cloned().collect::<Vec<_>>().join(", ")
        ),
        FilterDecision::Skip(SkipReason::NoChecklist) => {
            "Next run keeps the full manifest (no checklist).".to_string()
        }
        FilterDecision::Skip(SkipReason::NoRows) => {
            "Next run keeps the full manifest (checklist has no rows).".to_string()
        }
        FilterDecision::Skip(SkipReason::AllChecked) => {
            "Next run keeps the full manifest (every row checked).".to_string()
        }
        FilterDecision::Skip(SkipReason::NoneChecked) => {
            "Next run keeps the full manifest (no row checked).".to_string()
        }
    }
}
