//! Git queries and the subprocess seam they run through.
//!
//! [`GitRunner`] is the boundary to the `git` binary. [`Repository`] is the
//! production implementation; tests substitute fakes with controllable timing.
//! [`collect`] fans a batch of [`Query`]s out over a runner and folds the
//! outputs into a [`QueryResults`] record.

mod collect;
mod query;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, bail};

use crate::shell_exec::Cmd;

pub use collect::{Collection, collect, trim_output};
pub use query::{Query, QueryResults};

/// Executes one git invocation and returns its raw standard output.
///
/// Implementations return `Err` for spawn failures, non-zero exits and
/// timeouts. The collector turns every error into an empty result.
pub trait GitRunner: Sync {
    fn run(&self, query: Query, args: &[String]) -> anyhow::Result<String>;
}

/// Repository context for git operations.
///
/// ```no_run
/// use gitstate::git::{self, Query, Repository};
///
/// let repo = Repository::current();
/// let collection = git::collect(&repo, &Query::INITIAL);
/// println!("{}", collection.results.hash);
/// ```
#[derive(Debug, Clone)]
pub struct Repository {
    path: PathBuf,
    program: String,
    timeout: Option<Duration>,
}

impl Repository {
    /// Create a repository context at the specified path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            program: "git".to_string(),
            timeout: None,
        }
    }

    /// Create a repository context for the current directory.
    pub fn current() -> Self {
        Self::at(".")
    }

    /// Use a different git executable.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Kill any git invocation that runs longer than `timeout`.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl GitRunner for Repository {
    fn run(&self, query: Query, args: &[String]) -> anyhow::Result<String> {
        let mut cmd = Cmd::new(&self.program)
            .args(args.iter().cloned())
            .current_dir(&self.path)
            .context(query.key());
        if let Some(timeout) = self.timeout {
            cmd = cmd.timeout(timeout);
        }
        let cmd_str = cmd.command_line();

        let output = cmd
            .run()
            .with_context(|| format!("failed to execute `{cmd_str}`"))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!("`{cmd_str}` exited with {}: {}", output.status, stderr.trim());
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
