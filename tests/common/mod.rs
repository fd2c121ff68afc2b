use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Symbols written to the test config so assertions stay readable.
pub const ASCII_SYMBOLS: &str = r#"
[symbols]
untracked = "?"
stashed = "$"
behind = "<"
ahead = ">"
deleted = "-"
added = "+"
renamed = "~"
staged = "S"
unstaged = "U"
"#;

/// Apply an isolated git environment to a command.
fn isolate(cmd: &mut Command, ceiling: &Path) {
    cmd.env("GIT_CONFIG_GLOBAL", null_device())
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .env("GIT_CEILING_DIRECTORIES", ceiling)
        .env("GIT_AUTHOR_DATE", "2025-01-01T00:00:00Z")
        .env("GIT_COMMITTER_DATE", "2025-01-01T00:00:00Z")
        .env("LC_ALL", "C")
        .env("LANG", "C")
        .env_remove("RUST_LOG");
}

fn null_device() -> &'static str {
    if cfg!(windows) { "NUL" } else { "/dev/null" }
}

pub struct TestRepo {
    temp_dir: TempDir,
    root: PathBuf,
    config_path: PathBuf,
}

impl TestRepo {
    /// Create a new repository on `main` with an isolated git environment and
    /// a gitstate config using [`ASCII_SYMBOLS`].
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().join("main");
        std::fs::create_dir(&root).expect("Failed to create main repo directory");
        // Canonicalize to resolve symlinks (important on macOS where /var is symlink to /private/var)
        let root = root
            .canonicalize()
            .expect("Failed to canonicalize temp path");

        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, ASCII_SYMBOLS).expect("Failed to write config");

        let repo = Self {
            temp_dir,
            root,
            config_path,
        };
        repo.git(&["init", "-q", "-b", "main"]);
        repo.git(&["config", "user.name", "Test User"]);
        repo.git(&["config", "user.email", "test@example.com"]);
        repo.git(&["config", "commit.gpgsign", "false"]);
        repo
    }

    pub fn root_path(&self) -> &Path {
        &self.root
    }

    /// Directory holding the repository (and any sibling remotes).
    pub fn temp_path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Run git in `dir`, panicking on failure. Returns trimmed stdout.
    pub fn git_in(&self, dir: &Path, args: &[&str]) -> String {
        let mut cmd = Command::new("git");
        cmd.args(args).current_dir(dir);
        isolate(&mut cmd, self.temp_path());
        let output = cmd.output().expect("Failed to execute git");
        if !output.status.success() {
            panic!(
                "git {} failed:\nstdout: {}\nstderr: {}",
                args.join(" "),
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    pub fn git(&self, args: &[&str]) -> String {
        self.git_in(&self.root, args)
    }

    pub fn write(&self, name: &str, content: &str) {
        std::fs::write(self.root.join(name), content).expect("Failed to write file");
    }

    /// Create a commit with the given message, touching `file.txt`.
    pub fn commit(&self, message: &str) {
        self.write("file.txt", message);
        self.git(&["add", "."]);
        self.git(&["commit", "-q", "-m", message]);
    }

    pub fn head_sha(&self) -> String {
        self.git(&["rev-parse", "HEAD"])
    }

    /// Create a bare `origin` next to the repository and push `branch` to it
    /// with upstream tracking.
    pub fn setup_remote(&self, branch: &str) {
        let remote = self.temp_path().join("origin.git");
        let remote_str = remote.to_str().expect("non-UTF-8 temp path");
        self.git_in(self.temp_path(), &["init", "-q", "--bare", remote_str]);
        self.git(&["remote", "add", "origin", remote_str]);
        self.git(&["push", "-q", "-u", "origin", branch]);
    }

    /// A `gitstate` command running in `dir` with this repo's isolated environment.
    pub fn gitstate_command_in(&self, dir: &Path) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_gitstate"));
        cmd.current_dir(dir)
            .env("GITSTATE_CONFIG_PATH", &self.config_path);
        isolate(&mut cmd, self.temp_path());
        cmd
    }

    pub fn gitstate_command(&self) -> Command {
        self.gitstate_command_in(&self.root)
    }

    pub fn run_gitstate(&self, args: &[&str]) -> Output {
        self.gitstate_command()
            .args(args)
            .output()
            .expect("Failed to run gitstate")
    }

    /// The summary line printed with no arguments.
    pub fn summary(&self) -> String {
        let output = self.run_gitstate(&[]);
        assert!(
            output.status.success(),
            "gitstate failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).into_owned()
    }
}

/// A repository with one commit on `main`.
#[rstest::fixture]
pub fn repo() -> TestRepo {
    let repo = TestRepo::new();
    repo.commit("Initial commit");
    repo
}
