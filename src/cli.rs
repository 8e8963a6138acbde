//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// warden - game server mod maintenance
#[derive(Parser, Debug)]
#[command(
    name = "warden",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Safely enable and disable a game server's mods",
    long_about = "Warden toggles the add-on mods of a game server while keeping the \
                  mod set dependency-consistent. Every mutating run is recorded in a \
                  durable operation lock; if a run is killed mid-way, the next start \
                  offers to resume, discard, or abort.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  warden list\n    \
                  warden toggle\n    \
                  warden disable WorldEdit --cascade\n    \
                  warden enable Towny Vault\n\n\
                  \x1b[1m\x1b[32mRecovery:\x1b[0m\n    \
                  A leftover lock from an interrupted run is detected at startup and\n    \
                  must be resumed, discarded, or left in place before anything else."
)]
pub struct Cli {
    /// Server root directory (defaults to current directory)
    #[arg(long, short = 's', global = true)]
    pub server_dir: Option<PathBuf>,

    /// Answer yes to soft-dependency confirmations
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List installed mods and their states
    List(ListArgs),

    /// Flip the state of the named mods (interactive when no names given)
    Toggle(ToggleArgs),

    /// Enable the named mods
    Enable(EnableArgs),

    /// Disable the named mods, respecting dependencies
    Disable(DisableArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the list command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  List all mods:\n    warden list\n\n\
                  List mods of a specific server:\n    warden list -s /srv/game")]
pub struct ListArgs {}

/// Arguments for the toggle command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Pick mods interactively:\n    warden toggle\n\n\
                  Toggle specific mods:\n    warden toggle WorldEdit Towny\n\n\
                  Toggle and cascade any hard-dependency chains:\n    warden toggle WorldEdit --cascade")]
pub struct ToggleArgs {
    /// Mod names to toggle; empty opens an interactive selection
    pub names: Vec<String>,

    /// Cascade-disable whole hard-dependency chains without asking
    #[arg(long)]
    pub cascade: bool,

    /// Force-disable despite hard dependents (explicit consent)
    #[arg(long, conflicts_with = "cascade")]
    pub force: bool,
}

/// Arguments for the enable command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Enable one mod:\n    warden enable WorldEdit\n\n\
                  Enable several:\n    warden enable Towny Vault Citizens")]
pub struct EnableArgs {
    /// Mod names to enable
    #[arg(required = true)]
    pub names: Vec<String>,
}

/// Arguments for the disable command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Disable one mod:\n    warden disable WorldEdit\n\n\
                  Disable the whole chain that depends on it:\n    warden disable WorldEdit --cascade\n\n\
                  Disable without soft-dependency prompts:\n    warden disable WorldEdit -y")]
pub struct DisableArgs {
    /// Mod names to disable
    #[arg(required = true)]
    pub names: Vec<String>,

    /// Cascade-disable whole hard-dependency chains without asking
    #[arg(long)]
    pub cascade: bool,

    /// Force-disable despite hard dependents (explicit consent)
    #[arg(long, conflicts_with = "cascade")]
    pub force: bool,
}

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    warden completions --shell bash > ~/.bash_completion.d/warden\n\n\
                  Generate zsh completions:\n    warden completions --shell zsh > ~/.zfunc/_warden")]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(long, value_enum)]
    pub shell: clap_complete::Shell,
}
