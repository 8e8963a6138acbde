//! warden - game server mod maintenance
//!
//! Operator CLI that enables and disables a game server's add-on mods
//! while keeping the mod set dependency-consistent, and that survives
//! being killed mid-operation: every mutating run is recorded in a
//! durable lock, and a leftover lock is settled interactively at the
//! next start before anything else runs.

use clap::Parser;

mod cli;
mod commands;
mod config;
mod error;
mod lock;
mod manifest;
mod prompt;
mod recovery;
mod registry;
mod report;
mod resolver;

use cli::{Cli, Commands};
use commands::toggle::{ToggleMode, ToggleOptions};
use config::ServerPaths;
use error::{Result, WardenError};
use lock::LockManager;
use recovery::PendingAction;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // completions never touch a server directory
    if let Commands::Completions(args) = &cli.command {
        return commands::completions::run(cli::CompletionsArgs { shell: args.shell });
    }

    let paths = ServerPaths::resolve(cli.server_dir.clone())?;
    let manager = LockManager::new(&paths);

    match recovery::check_pending(&manager)? {
        PendingAction::Proceed => {
            let args: Vec<String> = std::env::args().skip(1).collect();
            dispatch(cli, &paths, &args, false)
        }
        PendingAction::Resume(tokens) => run_resumed(&manager, &tokens),
        PendingAction::Abort => {
            eprintln!("Aborted; the operation lock was left in place.");
            std::process::exit(1);
        }
    }
}

/// Re-dispatch the recorded command line of an interrupted run
///
/// The leftover marker is settled here, not in the individual commands:
/// the guard is taken before anything else can fail, so a resumed run
/// that errors out, fails to reparse, or finds nothing left to do still
/// ends with the lock released. The commands themselves skip their own
/// lock acquisition when `resumed` is set.
fn run_resumed(manager: &LockManager, tokens: &[String]) -> Result<()> {
    println!("Resuming: warden {}", tokens.join(" "));
    let guard = manager.reacquire(tokens)?;

    let argv = std::iter::once("warden".to_string()).chain(tokens.iter().cloned());
    let resumed = Cli::try_parse_from(argv).map_err(|e| WardenError::ResumeParseFailed {
        command: tokens.join(" "),
        reason: e.to_string(),
    })?;
    let paths = ServerPaths::resolve(resumed.server_dir.clone())?;
    dispatch(resumed, &paths, tokens, true)?;
    guard.release()
}

fn dispatch(cli: Cli, paths: &ServerPaths, recorded_args: &[String], resumed: bool) -> Result<()> {
    match cli.command {
        Commands::List(args) => commands::list::run(paths, args),
        Commands::Toggle(args) => commands::toggle::run(
            paths,
            &args.names,
            ToggleMode::Toggle,
            ToggleOptions {
                cascade: args.cascade,
                force: args.force,
                yes: cli.yes,
            },
            recorded_args,
            resumed,
        ),
        Commands::Enable(args) => commands::toggle::run(
            paths,
            &args.names,
            ToggleMode::Enable,
            ToggleOptions {
                yes: cli.yes,
                ..ToggleOptions::default()
            },
            recorded_args,
            resumed,
        ),
        Commands::Disable(args) => commands::toggle::run(
            paths,
            &args.names,
            ToggleMode::Disable,
            ToggleOptions {
                cascade: args.cascade,
                force: args.force,
                yes: cli.yes,
            },
            recorded_args,
            resumed,
        ),
        Commands::Completions(args) => commands::completions::run(args),
    }
}
