//! User config file and environment overrides.

use crate::common::{TestRepo, repo};
use gitstate::styling::Symbols;
use rstest::rstest;

#[rstest]
fn test_missing_config_uses_default_glyphs(repo: TestRepo) {
    repo.write("new.txt", "untracked\n");
    repo.write("file.txt", "edited\n");
    let output = repo
        .gitstate_command()
        .env("GITSTATE_CONFIG_PATH", repo.temp_path().join("absent.toml"))
        .output()
        .unwrap();

    let symbols = Symbols::default();
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        format!("local: main {}1 {}1", symbols.untracked, symbols.unstaged)
    );
}

#[rstest]
fn test_partial_symbol_override(repo: TestRepo) {
    std::fs::write(repo.config_path(), "[symbols]\nuntracked = \"new:\"\n").unwrap();
    repo.write("a.txt", "a\n");
    repo.write("b.txt", "b\n");
    assert_eq!(repo.summary(), "local: main new:2");
}

#[rstest]
fn test_malformed_config_warns_and_uses_defaults(repo: TestRepo) {
    std::fs::write(repo.config_path(), "[symbols\nnot toml").unwrap();
    repo.write("new.txt", "untracked\n");
    let output = repo.run_gitstate(&[]);

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        format!("local: main {}1", Symbols::default().untracked)
    );
    assert!(String::from_utf8_lossy(&output.stderr).contains("Ignoring invalid config"));
}

#[rstest]
fn test_environment_overrides_file(repo: TestRepo) {
    std::fs::write(repo.config_path(), "git = \"gitstate-no-such-git\"\n").unwrap();
    assert_eq!(repo.summary(), "detached: master");

    let output = repo
        .gitstate_command()
        .env("GITSTATE_GIT", "git")
        .output()
        .unwrap();
    assert_eq!(String::from_utf8_lossy(&output.stdout), "local: main");
}

/// A git wrapper that stalls before delegating to the real git.
#[cfg(unix)]
fn slow_git(repo: &TestRepo) -> std::path::PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let script = repo.temp_path().join("slow-git");
    std::fs::write(&script, "#!/bin/sh\nsleep 2 >/dev/null 2>&1\nexec git \"$@\"\n").unwrap();
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
    script
}

#[cfg(unix)]
#[rstest]
fn test_slow_git_within_default_timeout(repo: TestRepo) {
    let output = repo
        .gitstate_command()
        .env("GITSTATE_GIT", slow_git(&repo))
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "local: main");
}

#[cfg(unix)]
#[rstest]
fn test_timeout_from_environment(repo: TestRepo) {
    let output = repo
        .gitstate_command()
        .env("GITSTATE_GIT", slow_git(&repo))
        .env("GITSTATE_COMMAND_TIMEOUT_MS", "1")
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "detached: master");
}
