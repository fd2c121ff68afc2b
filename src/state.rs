//! Repository state derived from collected query results.
//!
//! [`RepoState::from_results`] is a pure function of a [`QueryResults`]
//! record. It runs in two phases: reference identity (hash, branch, tag,
//! upstream and the flags derived from them), then local working-tree counters.
//! Malformed or missing output never fails; the affected field stays at its
//! zero value.

use serde::Serialize;

use crate::git::QueryResults;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RepoState {
    // Ref data
    /// On a branch, a tag, or tracking an upstream
    pub attached: bool,
    pub hash: String,
    /// HEAD is a symbolic ref (a named branch)
    pub named: bool,
    pub branch: String,
    pub ref_name: String,
    pub tag: String,
    pub tagged: bool,
    pub upstream_name: String,
    /// An upstream tracking ref is configured
    pub upstream: bool,

    // Local state data
    pub added: usize,
    pub ahead: usize,
    pub behind: usize,
    pub deleted: usize,
    pub renamed: usize,
    /// Modified entries not also modified in the working tree
    pub staged: usize,
    pub stashed: usize,
    /// Non-empty porcelain status lines
    pub total: usize,
    pub unstaged: usize,
    pub untracked: usize,
}

impl RepoState {
    pub fn from_results(results: &QueryResults) -> Self {
        let mut state = Self::default();
        state.apply_refs(results);
        state.apply_local(results);
        state
    }

    /// Reference phase: identity fields and the flags derived from them.
    pub fn apply_refs(&mut self, results: &QueryResults) {
        self.hash = results.hash.clone();
        self.branch = results.branch.clone();
        self.ref_name = results.ref_name.clone();
        self.tag = results.tag.clone();
        self.upstream_name = results.upstream.clone();

        self.upstream = !results.upstream.is_empty();
        self.named = !results.branch.is_empty();
        self.tagged = !results.tag.is_empty();
        self.attached = self.upstream || self.named || self.tagged;
    }

    /// Local phase: position, stash, diff and status counters.
    pub fn apply_local(&mut self, results: &QueryResults) {
        let position = parse_position(&results.position);
        self.ahead = position.ahead;
        self.behind = position.behind;

        self.stashed = count_lines(&results.stash);
        self.unstaged = count_lines(&results.diff);

        let status = parse_status(&results.status);
        self.total = status.total;
        self.added = status.added;
        self.deleted = status.deleted;
        self.renamed = status.renamed;
        self.untracked = status.untracked;
        // A file modified in both the index and the working tree counts as
        // unstaged only.
        self.staged = status.modified.saturating_sub(self.unstaged);
    }

    /// True when HEAD's hash is unknown, i.e. the summary is built only from
    /// fallbacks (not a repository, no commits yet, or git unavailable).
    pub fn degraded(&self) -> bool {
        self.hash.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AheadBehind {
    pub ahead: usize,
    pub behind: usize,
}

/// Parse `rev-list --left-right --count` output: `<ahead>\t<behind>`.
///
/// Missing or non-numeric fields are zero.
pub fn parse_position(raw: &str) -> AheadBehind {
    if raw.is_empty() {
        return AheadBehind::default();
    }
    let mut fields = raw.split('\t').map(|f| f.trim().parse().unwrap_or(0));
    AheadBehind {
        ahead: fields.next().unwrap_or(0),
        behind: fields.next().unwrap_or(0),
    }
}

/// Count non-empty lines.
pub fn count_lines(raw: &str) -> usize {
    raw.lines().filter(|line| !line.is_empty()).count()
}

/// Codes found in the two status columns of one porcelain line.
///
/// The columns are order-insensitive and independent: one line may set
/// several flags, e.g. `AD` is both added and deleted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineClass {
    pub added: bool,
    pub deleted: bool,
    pub renamed: bool,
    pub modified: bool,
    pub untracked: bool,
}

impl LineClass {
    /// Classify one porcelain line. `None` for an empty line.
    ///
    /// A line shorter than two characters treats the missing column as blank.
    pub fn of(line: &str) -> Option<Self> {
        let mut chars = line.chars();
        let x = chars.next()?;
        let y = chars.next().unwrap_or(' ');
        let has = |code: char| x == code || y == code;
        Some(Self {
            added: has('A'),
            deleted: has('D'),
            renamed: has('R'),
            modified: has('M'),
            untracked: has('?'),
        })
    }
}

/// Per-category counts from a porcelain status listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub total: usize,
    pub added: usize,
    pub deleted: usize,
    pub renamed: usize,
    pub modified: usize,
    pub untracked: usize,
}

pub fn parse_status(raw: &str) -> StatusCounts {
    let mut counts = StatusCounts::default();
    for class in raw.lines().filter_map(LineClass::of) {
        counts.total += 1;
        counts.added += usize::from(class.added);
        counts.deleted += usize::from(class.deleted);
        counts.renamed += usize::from(class.renamed);
        counts.modified += usize::from(class.modified);
        counts.untracked += usize::from(class.untracked);
    }
    counts
}
