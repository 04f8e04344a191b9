use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Category assigned to every converted duplication issue.
pub const CATEGORY: &str = "Code Duplication";

/// Three-level severity derived from the duplicate line count of a record.
/// Ordering puts `High` first so sorted listings lead with the worst groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    High,
    Normal,
    Low,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Severity::High => "HIGH",
            Severity::Normal => "NORMAL",
            Severity::Low => "LOW",
        }
    }
}

/// Identifies a group within the `DuplicationSet` that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupId(usize);

/// Identifies an issue within the `DuplicationSet` that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IssueId(usize);

/// Links all occurrences of one duplicated code fragment.
///
/// The fragment is write-once-effective: the first non-blank value sticks
/// and later assignments are silently ignored. Two groups compare equal
/// when their fragments are equal; the occurrence list is not part of
/// equality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicationGroup {
    code_fragment: String,
    occurrences: Vec<IssueId>,
}

impl DuplicationGroup {
    /// Creates a group with no fragment yet; it is usually filled in
    /// later, occurrence by occurrence.
    pub fn new() -> Self {
        Self::with_fragment("")
    }

    /// Creates a group seeded with the given fragment. A blank fragment
    /// leaves the group empty, same as `new`.
    pub fn with_fragment(fragment: &str) -> Self {
        let mut group = Self {
            code_fragment: String::new(),
            occurrences: Vec::new(),
        };
        group.set_code_fragment(fragment);
        group
    }

    /// Sets the fragment unless a non-blank value is already present.
    pub fn set_code_fragment(&mut self, fragment: &str) {
        if self.code_fragment.trim().is_empty() {
            self.code_fragment = fragment.to_string();
        }
    }

    pub fn code_fragment(&self) -> &str {
        &self.code_fragment
    }

    /// Appends an occurrence. No deduplication and no check that the
    /// occurrence points back at this group; `DuplicationSet::add_issue`
    /// is the only caller that establishes that link.
    pub(crate) fn add(&mut self, issue: IssueId) {
        self.occurrences.push(issue);
    }

    /// All occurrences in insertion order, as an independent copy.
    pub fn duplications(&self) -> Vec<IssueId> {
        self.occurrences.clone()
    }
}

impl Default for DuplicationGroup {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for DuplicationGroup {
    fn eq(&self, other: &Self) -> bool {
        self.code_fragment == other.code_fragment
    }
}

impl Eq for DuplicationGroup {}

impl Hash for DuplicationGroup {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code_fragment.hash(state);
    }
}

/// One occurrence of a duplication: the generic issue fields plus a
/// reference to the shared group of the duplicated fragment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeDuplication {
    id: IssueId,
    file_name: String,
    line_start: usize,
    line_end: usize,
    severity: Severity,
    category: String,
    tool: String,
    group: GroupId,
}

impl CodeDuplication {
    pub fn id(&self) -> IssueId {
        self.id
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn line_start(&self) -> usize {
        self.line_start
    }

    pub fn line_end(&self) -> usize {
        self.line_end
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// Tag of the detector that reported this duplication ("CPD",
    /// "DupFinder", "Simian").
    pub fn tool(&self) -> &str {
        &self.tool
    }

    pub fn group(&self) -> GroupId {
        self.group
    }

    /// Number of lines this occurrence spans.
    pub fn line_count(&self) -> usize {
        if self.line_end >= self.line_start {
            self.line_end - self.line_start + 1
        } else {
            0
        }
    }

    fn fields_eq(&self, other: &Self) -> bool {
        self.file_name == other.file_name
            && self.line_start == other.line_start
            && self.line_end == other.line_end
            && self.severity == other.severity
            && self.category == other.category
            && self.tool == other.tool
    }
}

/// The flat, order-preserving output of one conversion: all issues plus
/// the groups they reference.
///
/// Groups live in an arena owned by the set and issues hold a `GroupId`
/// into it, so there is no cyclic ownership between a group and its
/// occurrences. Ids are only meaningful within the set that issued them.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DuplicationSet {
    issues: Vec<CodeDuplication>,
    groups: Vec<DuplicationGroup>,
}

impl DuplicationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves a group into the set and returns its id.
    pub fn add_group(&mut self, group: DuplicationGroup) -> GroupId {
        self.groups.push(group);
        GroupId(self.groups.len() - 1)
    }

    /// Returns the group for an id issued by this set.
    ///
    /// Panics if the id comes from another set; that is a bug in the
    /// caller, not bad input.
    pub fn group(&self, id: GroupId) -> &DuplicationGroup {
        &self.groups[id.0]
    }

    /// Forwards to the group's first-write-wins fragment setter.
    pub fn set_code_fragment(&mut self, id: GroupId, fragment: &str) {
        self.groups[id.0].set_code_fragment(fragment);
    }

    /// Creates an issue and links it into its group as a side effect.
    ///
    /// Panics if `group` was not created by this set.
    pub fn add_issue(
        &mut self,
        file_name: &str,
        line_start: usize,
        line_end: usize,
        severity: Severity,
        tool: &str,
        group: GroupId,
    ) -> IssueId {
        assert!(
            group.0 < self.groups.len(),
            "group id {} does not belong to this set",
            group.0
        );
        let id = IssueId(self.issues.len());
        self.issues.push(CodeDuplication {
            id,
            file_name: file_name.to_string(),
            line_start,
            line_end,
            severity,
            category: CATEGORY.to_string(),
            tool: tool.to_string(),
            group,
        });
        self.groups[group.0].add(id);
        id
    }

    pub fn issue(&self, id: IssueId) -> &CodeDuplication {
        &self.issues[id.0]
    }

    /// All issues in conversion order (record order, then occurrence
    /// order within each record).
    pub fn issues(&self) -> &[CodeDuplication] {
        &self.issues
    }

    pub fn groups(&self) -> &[DuplicationGroup] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// The other occurrences of the same fragment, excluding the issue
    /// itself. Exclusion is by identity (the per-set issue id), so two
    /// occurrences with identical fields never shadow each other.
    pub fn duplications_of(&self, id: IssueId) -> Vec<IssueId> {
        self.group(self.issue(id).group)
            .duplications()
            .into_iter()
            .filter(|other| *other != id)
            .collect()
    }

    /// Rendered description of an issue: the shared fragment as
    /// preformatted text, or empty when no fragment was captured.
    pub fn description(&self, id: IssueId) -> String {
        let fragment = self.group(self.issue(id).group).code_fragment();
        if fragment.is_empty() {
            String::new()
        } else {
            format!("<pre>{fragment}</pre>")
        }
    }

    /// Issue equality: the generic fields must match and the two groups
    /// must carry the same fragment text. Two issues pointing at
    /// different groups with coincidentally equal fragments therefore
    /// compare equal; downstream consumers rely on this.
    pub fn issues_equal(&self, a: IssueId, b: IssueId) -> bool {
        let (left, right) = (self.issue(a), self.issue(b));
        left.fields_eq(right)
            && self.group(left.group).code_fragment() == self.group(right.group).code_fragment()
    }
}

#[cfg(test)]
#[path = "model_test.rs"]
mod tests;
