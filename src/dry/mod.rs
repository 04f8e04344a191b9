mod convert;
mod cpd;
mod decode;
mod dupfinder;
mod model;
mod report;
mod simian;

use std::error::Error;
use std::fs;
use std::path::Path;

pub use convert::{RawDuplication, RawOccurrence, Thresholds, convert};
pub use decode::{DecodeError, Tool};
pub use model::{
    CATEGORY, CodeDuplication, DuplicationGroup, DuplicationSet, GroupId, IssueId, Severity,
};
pub use report::DuplicationMetrics;

/// Read a report file, decode it with the given tool's format, convert
/// the records into a linked duplication set, and render the result.
pub fn run(
    path: &Path,
    tool: Tool,
    thresholds: Thresholds,
    detailed: bool,
    show_all: bool,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let xml = fs::read_to_string(path)?;
    let records = tool.decode(&xml)?;
    let set = convert(records, thresholds, tool.tag());
    let metrics = DuplicationMetrics::collect(&set);

    if json {
        report::print_json(&metrics, &set)?;
    } else if detailed {
        report::print_detailed(&metrics, &set, tool.tag(), show_all);
    } else {
        report::print_summary(&metrics, &set, tool.tag());
    }

    Ok(())
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
