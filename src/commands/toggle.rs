//! Toggle, enable, and disable commands
//!
//! One driver for all three: resolve names to registry indices, partition
//! into enable- and disable-requests, then run the batch under the
//! operation lock. The lock is acquired after the selection (nothing has
//! mutated yet) and released on every exit path through the guard.

use std::fmt;

use console::Style;
use inquire::{InquireError, MultiSelect};

use crate::config::ServerPaths;
use crate::error::{Result, WardenError};
use crate::lock::LockManager;
use crate::prompt::CliPrompt;
use crate::registry::{ModRegistry, ModState};
use crate::resolver::{self, ToggleRequest};

/// Which of the three command verbs is driving the batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleMode {
    Toggle,
    Enable,
    Disable,
}

/// Flag-driven prompt pre-answers
#[derive(Debug, Default, Clone, Copy)]
pub struct ToggleOptions {
    pub cascade: bool,
    pub force: bool,
    pub yes: bool,
}

/// Run a toggle batch
///
/// `recorded_args` is the argument vector written into the operation lock.
/// A resumed run takes no lock here at all: startup recovery already
/// re-acquired the leftover marker, and that guard settles it on every
/// exit, including batches with nothing left to do.
pub fn run(
    paths: &ServerPaths,
    names: &[String],
    mode: ToggleMode,
    options: ToggleOptions,
    recorded_args: &[String],
    resumed: bool,
) -> Result<()> {
    let mut registry = ModRegistry::scan(paths)?;

    let indices = if names.is_empty() {
        select_interactively(&registry)?
    } else {
        resolve_names(&registry, names)
    };

    let request = build_request(&registry, &indices, mode);
    if request.is_empty() {
        println!("Nothing to do.");
        return Ok(());
    }

    let manager = LockManager::new(paths);
    let guard = if resumed {
        None
    } else {
        Some(manager.acquire(recorded_args)?)
    };

    let mut prompt = CliPrompt {
        cascade: options.cascade,
        force: options.force,
        yes: options.yes,
    };
    let summary = resolver::apply(&mut registry, &request, &mut prompt)?;
    summary.print();

    match guard {
        Some(guard) => guard.release(),
        None => Ok(()),
    }
}

/// Map names to registry indices; unknown names are reported, not fatal
fn resolve_names(registry: &ModRegistry, names: &[String]) -> Vec<usize> {
    let mut indices = Vec::new();
    for name in names {
        match registry.find(name) {
            Some(index) => indices.push(index),
            None => eprintln!(
                "{} {}",
                Style::new().red().apply_to("Error:"),
                WardenError::ModNotFound { name: name.clone() }
            ),
        }
    }
    indices
}

/// Selection item carrying its registry index through the prompt
struct SelectItem {
    index: usize,
    label: String,
}

impl fmt::Display for SelectItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

fn select_interactively(registry: &ModRegistry) -> Result<Vec<usize>> {
    if registry.is_empty() {
        println!("No mods installed.");
        return Ok(vec![]);
    }

    let items: Vec<SelectItem> = registry
        .entries()
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let state = match entry.state {
                ModState::Enabled => "enabled",
                ModState::Disabled => "disabled",
            };
            SelectItem {
                index,
                label: format!("{} ({state})", entry.identity),
            }
        })
        .collect();

    println!();

    let selection = match MultiSelect::new("Select mods to toggle", items)
        .with_page_size(10)
        .with_help_message("  ↑↓ navigate  space select  enter confirm  q/esc cancel")
        .prompt_skippable()
    {
        Ok(Some(selected)) => selected,
        Ok(None) | Err(InquireError::OperationCanceled) => return Ok(vec![]),
        Err(e) => return Err(e.into()),
    };

    Ok(selection.into_iter().map(|item| item.index).collect())
}

fn build_request(registry: &ModRegistry, indices: &[usize], mode: ToggleMode) -> ToggleRequest {
    match mode {
        ToggleMode::Toggle => ToggleRequest::toggles(registry, indices),
        ToggleMode::Enable => {
            let mut request = ToggleRequest::default();
            for &index in indices {
                match registry.entry(index).state {
                    ModState::Disabled => request.enable.push(index),
                    ModState::Enabled => {
                        println!("{} is already enabled", registry.entry(index).identity);
                    }
                }
            }
            request
        }
        ToggleMode::Disable => {
            let mut request = ToggleRequest::default();
            for &index in indices {
                match registry.entry(index).state {
                    ModState::Enabled => request.disable.push(index),
                    ModState::Disabled => {
                        println!("{} is already disabled", registry.entry(index).identity);
                    }
                }
            }
            request
        }
    }
}
