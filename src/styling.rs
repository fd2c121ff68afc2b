//! Summary line rendering.
//!
//! Shape: `<origin>: <position><status>`, e.g. `origin: main …2 ↑1 ✎3`.
//!
//! - origin: `tag`, `detached`, `local` or `origin` (first match wins)
//! - position: branch name, short hash, or `master`; prefixed by the tag name
//!   when HEAD is tagged
//! - status: one ` <glyph><count>` token per non-zero counter, in
//!   [`StatusCategory`] order

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::state::RepoState;

/// Hash characters shown when HEAD has no branch name.
pub const SHORT_HASH_LEN: usize = 10;

/// Position label used when nothing better is known.
pub const FALLBACK_POSITION: &str = "master";

/// Status counters in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumIter, strum::IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum StatusCategory {
    Untracked,
    Stashed,
    Behind,
    Ahead,
    Deleted,
    Added,
    Renamed,
    Staged,
    Unstaged,
}

impl StatusCategory {
    pub fn count(self, state: &RepoState) -> usize {
        match self {
            StatusCategory::Untracked => state.untracked,
            StatusCategory::Stashed => state.stashed,
            StatusCategory::Behind => state.behind,
            StatusCategory::Ahead => state.ahead,
            StatusCategory::Deleted => state.deleted,
            StatusCategory::Added => state.added,
            StatusCategory::Renamed => state.renamed,
            StatusCategory::Staged => state.staged,
            StatusCategory::Unstaged => state.unstaged,
        }
    }

    pub fn symbol(self, symbols: &Symbols) -> &str {
        match self {
            StatusCategory::Untracked => &symbols.untracked,
            StatusCategory::Stashed => &symbols.stashed,
            StatusCategory::Behind => &symbols.behind,
            StatusCategory::Ahead => &symbols.ahead,
            StatusCategory::Deleted => &symbols.deleted,
            StatusCategory::Added => &symbols.added,
            StatusCategory::Renamed => &symbols.renamed,
            StatusCategory::Staged => &symbols.staged,
            StatusCategory::Unstaged => &symbols.unstaged,
        }
    }
}

/// Glyph per status category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Symbols {
    pub untracked: String,
    pub stashed: String,
    pub behind: String,
    pub ahead: String,
    pub deleted: String,
    pub added: String,
    pub renamed: String,
    pub staged: String,
    pub unstaged: String,
}

impl Default for Symbols {
    fn default() -> Self {
        Self {
            untracked: "…".to_string(),
            stashed: "＊".to_string(),
            behind: "↓".to_string(),
            ahead: "↑".to_string(),
            deleted: "✖".to_string(),
            added: "✚".to_string(),
            renamed: "↪".to_string(),
            staged: "✔".to_string(),
            unstaged: "✎".to_string(),
        }
    }
}

pub fn origin_label(state: &RepoState) -> &'static str {
    if state.tagged {
        "tag"
    } else if !state.attached {
        "detached"
    } else if !state.upstream {
        "local"
    } else {
        "origin"
    }
}

pub fn position_label(state: &RepoState) -> String {
    let position = if state.named {
        state.branch.clone()
    } else if !state.hash.is_empty() {
        state.hash.chars().take(SHORT_HASH_LEN).collect()
    } else {
        FALLBACK_POSITION.to_string()
    };

    if state.tagged {
        format!("{} ({})", state.tag, position)
    } else {
        position
    }
}

/// Space-prefixed tokens for every non-zero counter; empty when all are zero.
pub fn status_suffix(state: &RepoState, symbols: &Symbols) -> String {
    StatusCategory::iter()
        .filter_map(|category| {
            let count = category.count(state);
            (count > 0).then(|| format!(" {}{}", category.symbol(symbols), count))
        })
        .collect()
}

pub fn format_summary(state: &RepoState, symbols: &Symbols) -> String {
    format!(
        "{}: {}{}",
        origin_label(state),
        position_label(state),
        status_suffix(state, symbols)
    )
}
