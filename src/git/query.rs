//! Query definitions and the typed record their results land in.

use serde::Serialize;

/// A named git query.
///
/// The kebab-case name is the key used in logs and in the verbose dump.
/// [`Query::Position`] is the dependent query: its arguments are derived from
/// the `hash` and `upstream` results, so it never appears in an initial batch.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    strum::Display,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Query {
    /// Abbreviated ref name of HEAD (`HEAD` when detached)
    Abbrev,
    /// Short symbolic branch name (fails when detached)
    Branch,
    /// Full commit hash of HEAD
    Hash,
    /// Symbolic full ref name of HEAD
    Ref,
    /// Tag pointing exactly at HEAD
    Tag,
    /// Upstream tracking ref of the current branch
    Upstream,
    /// Working-tree files with unstaged changes
    Diff,
    /// Stash entries
    Stash,
    /// Porcelain status listing
    Status,
    /// Ahead/behind counts between HEAD and its upstream
    Position,
}

impl Query {
    /// Every independent query, in the order they are spawned.
    pub const INITIAL: [Query; 9] = [
        Query::Abbrev,
        Query::Branch,
        Query::Hash,
        Query::Ref,
        Query::Tag,
        Query::Upstream,
        Query::Diff,
        Query::Stash,
        Query::Status,
    ];

    pub fn key(self) -> &'static str {
        self.into()
    }

    /// Arguments for an independent query; `None` for the dependent one.
    pub fn args(self) -> Option<Vec<String>> {
        let args: &[&str] = match self {
            Query::Abbrev => &["rev-parse", "--abbrev-ref", "HEAD"],
            Query::Branch => &["symbolic-ref", "--short", "HEAD"],
            Query::Hash => &["rev-parse", "HEAD"],
            Query::Ref => &["rev-parse", "--symbolic-full-name", "HEAD"],
            Query::Tag => &["describe", "--exact-match", "--tags", "HEAD"],
            Query::Upstream => &["rev-parse", "--abbrev-ref", "--symbolic-full-name", "@{u}"],
            Query::Diff => &["diff", "--name-only"],
            Query::Stash => &["stash", "list"],
            Query::Status => &["status", "--porcelain"],
            Query::Position => return None,
        };
        Some(args.iter().map(|s| s.to_string()).collect())
    }

    /// Arguments for the position query.
    ///
    /// The local commit is the left side of the symmetric range so counts come
    /// back as `<ahead>\t<behind>`. Without an upstream, HEAD is compared with
    /// itself, which yields `0\t0`.
    pub fn position_args(hash: &str, upstream: &str) -> Vec<String> {
        let cmp_ref = if upstream.is_empty() { "HEAD" } else { upstream };
        vec![
            "rev-list".to_string(),
            "--left-right".to_string(),
            "--count".to_string(),
            format!("{hash}...{cmp_ref}"),
        ]
    }
}

/// Raw trimmed output of every query, one field per query.
///
/// A field is empty when its query failed or never ran.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryResults {
    pub abbrev: String,
    pub branch: String,
    pub hash: String,
    #[serde(rename = "ref")]
    pub ref_name: String,
    pub tag: String,
    pub upstream: String,
    pub diff: String,
    pub stash: String,
    pub status: String,
    pub position: String,
}

impl QueryResults {
    pub fn get(&self, query: Query) -> &str {
        match query {
            Query::Abbrev => &self.abbrev,
            Query::Branch => &self.branch,
            Query::Hash => &self.hash,
            Query::Ref => &self.ref_name,
            Query::Tag => &self.tag,
            Query::Upstream => &self.upstream,
            Query::Diff => &self.diff,
            Query::Stash => &self.stash,
            Query::Status => &self.status,
            Query::Position => &self.position,
        }
    }

    pub fn set(&mut self, query: Query, value: String) {
        let slot = match query {
            Query::Abbrev => &mut self.abbrev,
            Query::Branch => &mut self.branch,
            Query::Hash => &mut self.hash,
            Query::Ref => &mut self.ref_name,
            Query::Tag => &mut self.tag,
            Query::Upstream => &mut self.upstream,
            Query::Diff => &mut self.diff,
            Query::Stash => &mut self.stash,
            Query::Status => &mut self.status,
            Query::Position => &mut self.position,
        };
        *slot = value;
    }
}
