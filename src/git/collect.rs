//! Concurrent query collection.
//!
//! Each query in a batch runs on its own scoped thread. Workers never touch the
//! result record: they send `(Query, output)` over a channel and the
//! coordinating thread, the only writer, folds completions in as they arrive.
//!
//! The position query depends on two other results. The `hash` and `upstream`
//! workers both publish into a [`PairLatch`]; whichever arrives second is handed
//! both values and spawns the position worker into the same scope, with a clone
//! of its own sender. The coordinator's receive loop therefore cannot end until
//! the position result has been delivered too.
//!
//! ```text
//! coordinator ──spawn──▶ abbrev, branch, hash, ref, tag, upstream, diff, stash, status
//!      ▲                              │hash      │upstream
//!      │                              └─▶ latch ◀┘
//!      │                                    │ second arrival
//!      │                                    ▼
//!      └──────────── channel ◀──────── position
//! ```

use crossbeam_channel as chan;

use super::{GitRunner, Query, QueryResults};
use crate::sync::{PairLatch, Slot};

/// Outcome of one collection run.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    pub results: QueryResults,
    /// Number of worker completions the coordinator received.
    pub completions: usize,
    /// Whether the dependent position query was issued.
    pub position_issued: bool,
}

/// Characters stripped from both ends of every query output.
const TRIM_CHARS: &[char] = &['\t', '\n', '\r', '\'', ' '];

/// Trim surrounding whitespace and quote characters from raw git output.
pub fn trim_output(raw: &str) -> &str {
    raw.trim_matches(TRIM_CHARS)
}

fn prerequisite_slot(query: Query) -> Option<Slot> {
    match query {
        Query::Hash => Some(Slot::Left),
        Query::Upstream => Some(Slot::Right),
        _ => None,
    }
}

/// Run one query, degrading any failure to an empty result.
fn run_query<R: GitRunner + ?Sized>(runner: &R, query: Query, args: &[String]) -> String {
    match runner.run(query, args) {
        Ok(raw) => trim_output(&raw).to_string(),
        Err(e) => {
            log::debug!("{} query failed: {:#}", query, e);
            String::new()
        }
    }
}

/// Run `queries` concurrently and block until every one of them, plus the
/// dependent position query, has completed.
///
/// The position query is issued exactly once, as soon as both `hash` and
/// `upstream` have completed, and only when both are part of the batch.
/// Returns after `queries.len() + 1` completions in that case, or
/// `queries.len()` otherwise. [`Query::Position`] entries in `queries` are
/// ignored since their arguments aren't known up front.
pub fn collect<R: GitRunner + ?Sized>(runner: &R, queries: &[Query]) -> Collection {
    let (tx, rx) = chan::unbounded::<(Query, String)>();
    let latch: PairLatch<String> = PairLatch::new();
    let mut results = QueryResults::default();
    let mut completions = 0;

    std::thread::scope(|s| {
        for &query in queries {
            let Some(args) = query.args() else {
                log::debug!("Skipping {} in initial batch", query);
                continue;
            };
            let tx = tx.clone();
            let latch = &latch;

            s.spawn(move || {
                let output = run_query(runner, query, &args);

                if let Some(slot) = prerequisite_slot(query)
                    && let Some((hash, upstream)) = latch.arrive(slot, output.clone())
                {
                    let args = Query::position_args(hash, upstream);
                    let tx = tx.clone();
                    s.spawn(move || {
                        let output = run_query(runner, Query::Position, &args);
                        let _ = tx.send((Query::Position, output));
                    });
                }

                let _ = tx.send((query, output));
            });
        }

        // Workers (and the position worker, through its cloned sender) hold the
        // remaining senders; the loop ends once the last of them finishes.
        drop(tx);
        for (query, output) in rx.iter() {
            completions += 1;
            results.set(query, output);
        }
    });

    Collection {
        results,
        completions,
        position_issued: latch.is_released(),
    }
}
