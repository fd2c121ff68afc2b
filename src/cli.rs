use clap::Parser;

/// Single-line git status summary for shell prompts.
#[derive(Parser, Debug, Default, Clone, PartialEq, Eq)]
#[command(name = "gitstate", version)]
#[command(about = "Single-line git status summary for shell prompts", long_about = None)]
#[command(after_long_help = r#"## Output

`<origin>: <position><status>`

- origin: `tag`, `detached`, `local` (no upstream) or `origin`
- position: branch name, first 10 characters of the commit hash, or `master`
- status: `…` untracked, `＊` stashed, `↓` behind, `↑` ahead, `✖` deleted,
  `✚` added, `↪` renamed, `✔` staged, `✎` unstaged; zero counts are omitted

## Configuration

Glyphs, the git executable and the per-command timeout can be set in
`~/.config/gitstate/config.toml` (or the file named by `GITSTATE_CONFIG_PATH`).
"#)]
pub struct Cli {
    /// Dump collected state as JSON and log git commands to stderr
    #[arg(short, long)]
    pub verbose: bool,
}
