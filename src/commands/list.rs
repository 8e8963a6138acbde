//! List command implementation
//!
//! Shows every installed mod, enabled or disabled, in stable scan order.
//! Non-mutating: takes no lock.

use console::Style;

use crate::cli::ListArgs;
use crate::config::ServerPaths;
use crate::error::Result;
use crate::registry::{ModRegistry, ModState};

/// Run list command
pub fn run(paths: &ServerPaths, _args: ListArgs) -> Result<()> {
    let registry = ModRegistry::scan(paths)?;

    if registry.is_empty() {
        println!("No mods installed.");
        return Ok(());
    }

    println!("Installed mods ({}):", registry.len());
    println!();

    let mut enabled = 0;
    for entry in registry.entries() {
        let state = match entry.state {
            ModState::Enabled => {
                enabled += 1;
                Style::new().green().apply_to("enabled ")
            }
            ModState::Disabled => Style::new().dim().apply_to("disabled"),
        };
        let version = entry
            .version
            .as_deref()
            .map(|v| format!(" {v}"))
            .unwrap_or_default();
        println!(
            "  [{state}] {}{}",
            Style::new().bold().apply_to(&entry.identity),
            Style::new().dim().apply_to(version)
        );
    }

    println!();
    println!("{enabled} enabled, {} disabled.", registry.len() - enabled);

    let duplicates = registry.duplicate_identities();
    if !duplicates.is_empty() {
        eprintln!(
            "{} duplicate identities: {}",
            Style::new().yellow().apply_to("Warning:"),
            duplicates.join(", ")
        );
    }

    Ok(())
}
