use std::collections::HashSet;
use std::error::Error;

use serde::Serialize;

use super::model::{CodeDuplication, DuplicationGroup, DuplicationSet, Severity};
use crate::report_helpers;

/// Summary metrics for one converted report.
#[derive(Serialize)]
pub struct DuplicationMetrics {
    pub issues: usize,
    pub duplicate_groups: usize,
    pub files_with_duplicates: usize,
    pub duplicated_lines: usize,
    pub largest_block: usize,
}

impl DuplicationMetrics {
    pub fn collect(set: &DuplicationSet) -> Self {
        let views = group_views(set);
        let duplicated_lines = views.iter().map(GroupView::duplicated_lines).sum();
        let largest_block = views.iter().map(|v| v.line_count).max().unwrap_or(0);
        let files: HashSet<&str> = set.issues().iter().map(CodeDuplication::file_name).collect();

        Self {
            issues: set.len(),
            duplicate_groups: set.groups().len(),
            files_with_duplicates: files.len(),
            duplicated_lines,
            largest_block,
        }
    }
}

/// One group resolved for display: its issues, shared severity, and the
/// widest occurrence span.
struct GroupView<'a> {
    group: &'a DuplicationGroup,
    issues: Vec<&'a CodeDuplication>,
    severity: Severity,
    line_count: usize,
}

impl GroupView<'_> {
    /// Lines duplicated beyond the first occurrence.
    fn duplicated_lines(&self) -> usize {
        self.line_count * (self.issues.len().saturating_sub(1))
    }
}

/// Resolve every group of the set against its occurrences. Severity is
/// shared by all occurrences of a group, so the first one speaks for it.
fn group_views(set: &DuplicationSet) -> Vec<GroupView<'_>> {
    set.groups()
        .iter()
        .map(|group| {
            let issues: Vec<&CodeDuplication> = group
                .duplications()
                .into_iter()
                .map(|id| set.issue(id))
                .collect();
            let severity = issues
                .first()
                .map(|issue| issue.severity())
                .unwrap_or(Severity::Low);
            let line_count = issues
                .iter()
                .map(|issue| issue.line_count())
                .max()
                .unwrap_or(0);
            GroupView {
                group,
                issues,
                severity,
                line_count,
            }
        })
        .collect()
}

/// Per-severity group counts, computed in a single pass.
#[derive(Default)]
struct SeverityBreakdown {
    high: usize,
    normal: usize,
    low: usize,
}

fn severity_breakdown(views: &[GroupView<'_>]) -> SeverityBreakdown {
    views
        .iter()
        .fold(SeverityBreakdown::default(), |mut acc, view| {
            match view.severity {
                Severity::High => acc.high += 1,
                Severity::Normal => acc.normal += 1,
                Severity::Low => acc.low += 1,
            }
            acc
        })
}

/// Print a summary of the converted report.
pub fn print_summary(metrics: &DuplicationMetrics, set: &DuplicationSet, tool: &str) {
    let separator = report_helpers::separator(68);
    let views = group_views(set);
    let breakdown = severity_breakdown(&views);

    println!("{separator}");
    println!(" Duplication Report ({tool})");
    println!();
    println!(" Issues:               {:>42}", metrics.issues);
    println!(" Duplicate groups:     {:>42}", metrics.duplicate_groups);
    println!(
        " Files with duplicates:{:>42}",
        metrics.files_with_duplicates
    );
    println!(" Duplicated lines:     {:>42}", metrics.duplicated_lines);
    if metrics.largest_block > 0 {
        println!(" Largest duplicate:    {:>37} lines", metrics.largest_block);
    }

    if metrics.duplicate_groups > 0 {
        println!();
        println!(" Severity:");
        println!("   HIGH:   {:>5} groups", breakdown.high);
        println!("   NORMAL: {:>5} groups", breakdown.normal);
        println!("   LOW:    {:>5} groups", breakdown.low);
    }

    println!("{separator}");
}

/// Maximum duplicate groups shown by default (use `--show-all` to override).
pub const DEFAULT_GROUP_LIMIT: usize = 20;

/// Compute how many duplicate groups to display based on the `--show-all` flag.
pub fn display_limit(total: usize, show_all: bool) -> usize {
    if show_all {
        total
    } else {
        DEFAULT_GROUP_LIMIT.min(total)
    }
}

/// Fragment lines shown per group in the detailed listing.
const SAMPLE_LINES: usize = 5;

/// Print the summary followed by a listing of each duplicate group with
/// severity, locations, and a fragment sample when one was captured.
pub fn print_detailed(
    metrics: &DuplicationMetrics,
    set: &DuplicationSet,
    tool: &str,
    show_all: bool,
) {
    print_summary(metrics, set, tool);

    let mut views = group_views(set);
    if views.is_empty() {
        return;
    }

    // Display order only; the set itself keeps conversion order.
    views.sort_by(|a, b| match a.severity.cmp(&b.severity) {
        std::cmp::Ordering::Equal => b.duplicated_lines().cmp(&a.duplicated_lines()),
        other => other,
    });
    let total = views.len();
    views.truncate(display_limit(total, show_all));

    let separator = report_helpers::separator(68);

    println!();
    println!(" Duplicate Groups (sorted by severity, then duplicated lines)");

    for (i, view) in views.iter().enumerate() {
        println!();
        println!("{separator}");
        println!(
            " [{}] {}: {} lines, {} occurrences ({} duplicated lines)",
            i + 1,
            view.severity.label(),
            view.line_count,
            view.issues.len(),
            view.duplicated_lines()
        );
        println!();
        for issue in &view.issues {
            println!(
                "   {}:{}-{}",
                issue.file_name(),
                issue.line_start(),
                issue.line_end()
            );
        }
        let fragment = view.group.code_fragment();
        if !fragment.is_empty() {
            println!();
            println!(" Fragment:");
            for line in fragment.lines().take(SAMPLE_LINES) {
                println!("   {line}");
            }
            if fragment.lines().count() > SAMPLE_LINES {
                println!("   ...");
            }
        }
    }

    println!("{separator}");

    if views.len() < total {
        println!();
        println!(" Showing top {} of {} duplicate groups.", views.len(), total);
        println!(" Use --show-all to see all groups.");
    }
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    metrics: &'a DuplicationMetrics,
    issues: &'a [CodeDuplication],
    groups: &'a [DuplicationGroup],
}

fn json_output<'a>(metrics: &'a DuplicationMetrics, set: &'a DuplicationSet) -> JsonOutput<'a> {
    JsonOutput {
        metrics,
        issues: set.issues(),
        groups: set.groups(),
    }
}

/// Serialize the metrics and the full converted set to pretty JSON.
pub fn format_json(
    metrics: &DuplicationMetrics,
    set: &DuplicationSet,
) -> Result<String, Box<dyn Error>> {
    Ok(serde_json::to_string_pretty(&json_output(metrics, set))?)
}

/// Print the metrics and the converted set as pretty JSON to stdout.
pub fn print_json(metrics: &DuplicationMetrics, set: &DuplicationSet) -> Result<(), Box<dyn Error>> {
    report_helpers::print_json_stdout(&json_output(metrics, set))
}

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;
