//! Shell completions command

use clap::CommandFactory;

use crate::cli::{Cli, CompletionsArgs};
use crate::error::Result;

/// Write completions for the selected shell to stdout
///
/// Shell validation happens at parse time; `--shell` is a value enum, so
/// an unsupported shell never reaches this function.
pub fn run(args: CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(args.shell, &mut cmd, "warden", &mut std::io::stdout().lock());
    Ok(())
}
