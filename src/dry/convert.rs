use serde::Deserialize;

use super::model::{DuplicationGroup, DuplicationSet, Severity};

/// Minimum duplicate-line counts for HIGH and NORMAL severity.
///
/// A count below `normal` is LOW. `high` is expected to be >= `normal`
/// but this is not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Thresholds {
    pub high: i64,
    pub normal: i64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            high: 50,
            normal: 25,
        }
    }
}

impl Thresholds {
    /// Maps a duplicate line (or cost) count to a severity. Total over
    /// all integers; zero and negative counts resolve to LOW.
    pub fn classify(&self, lines: i64) -> Severity {
        if lines >= self.high {
            Severity::High
        } else if lines >= self.normal {
            Severity::Normal
        } else {
            Severity::Low
        }
    }
}

/// One location where a duplicated fragment appears, as extracted by a
/// format decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawOccurrence {
    pub file_name: String,
    pub line_start: usize,
    pub line_end: usize,
    /// Fragment text carried per occurrence (DupFinder style); folded
    /// into the shared group, first non-blank value wins.
    pub fragment: Option<String>,
}

/// One detected duplication spanning one or more occurrences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDuplication {
    /// Duplicate line count (CPD, Simian) or cost (DupFinder); drives
    /// the severity of every occurrence of the record.
    pub lines: i64,
    /// Fragment text carried once per record (CPD style).
    pub fragment: Option<String>,
    pub occurrences: Vec<RawOccurrence>,
}

/// The conversion shared by every format: one group per record, one
/// issue per occurrence, each issue linked into its group.
///
/// Severity is computed once per record from its line count. Output
/// preserves record order, then occurrence order within each record.
/// A record without occurrences contributes nothing; its group is
/// discarded rather than kept as an orphan.
pub fn convert(records: Vec<RawDuplication>, thresholds: Thresholds, tool: &str) -> DuplicationSet {
    let mut set = DuplicationSet::new();

    for record in records {
        if record.occurrences.is_empty() {
            continue;
        }

        let group = match &record.fragment {
            Some(fragment) => set.add_group(DuplicationGroup::with_fragment(fragment)),
            None => set.add_group(DuplicationGroup::new()),
        };
        let severity = thresholds.classify(record.lines);

        for occurrence in &record.occurrences {
            if let Some(fragment) = &occurrence.fragment {
                set.set_code_fragment(group, fragment);
            }
            set.add_issue(
                &occurrence.file_name,
                occurrence.line_start,
                occurrence.line_end,
                severity,
                tool,
                group,
            );
        }
    }

    set
}

#[cfg(test)]
#[path = "convert_test.rs"]
mod tests;
