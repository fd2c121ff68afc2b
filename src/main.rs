use std::io::Write;

use clap::Parser;
use clap::error::ErrorKind;
use serde::Serialize;

use gitstate::cli::Cli;
use gitstate::config::UserConfig;
use gitstate::git::{self, Collection, Query, QueryResults, Repository};
use gitstate::state::RepoState;
use gitstate::styling;

/// Everything `-v` prints before the summary line.
#[derive(Serialize)]
struct VerboseDump<'a> {
    data: &'a QueryResults,
    state: &'a RepoState,
    completions: usize,
    position_issued: bool,
    degraded: bool,
}

fn main() {
    let cli = parse_cli();
    init_logging(cli.verbose);

    let config = UserConfig::load();
    let repo = Repository::current()
        .with_program(config.git.clone())
        .with_timeout(config.command_timeout());

    let collection = git::collect(&repo, &Query::INITIAL);
    let state = RepoState::from_results(&collection.results);
    if state.degraded() {
        log::debug!("HEAD hash unknown; summary uses fallbacks");
    }

    let mut stdout = std::io::stdout().lock();
    if cli.verbose {
        print_verbose(&mut stdout, &collection, &state);
    }

    // Write errors (closed pipe) are ignored; the exit code stays 0.
    let summary = styling::format_summary(&state, &config.symbols);
    let _ = write!(stdout, "{summary}");
    let _ = stdout.flush();
}

/// Parse arguments without ever exiting non-zero.
///
/// Help and version exit normally. Any other usage error is reported on stderr
/// and the summary is still printed with default options.
fn parse_cli() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                std::process::exit(0);
            }
            Cli::default()
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "gitstate=debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .format_target(false)
        .target(env_logger::Target::Stderr)
        .init();
}

fn print_verbose(out: &mut impl Write, collection: &Collection, state: &RepoState) {
    let dump = VerboseDump {
        data: &collection.results,
        state,
        completions: collection.completions,
        position_issued: collection.position_issued,
        degraded: state.degraded(),
    };
    match serde_json::to_string_pretty(&dump) {
        Ok(json) => {
            if let Err(e) = writeln!(out, "{json}") {
                log::debug!("Failed to write state dump: {}", e);
            }
        }
        Err(e) => log::warn!("Failed to serialize state: {}", e),
    }
}
