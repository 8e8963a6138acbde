//! Operator confirmation prompts
//!
//! The resolver never talks to the terminal directly; every decision goes
//! through the [`Prompt`] trait so the dependency policy can be exercised
//! in tests without a TTY, and so `--cascade`, `--force`, and `--yes` can
//! pre-answer prompts for scripted use.

use console::Style;
use inquire::{Confirm, InquireError, Select};

use crate::error::Result;

/// Operator decision when a disable target has hard dependents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HardChoice {
    /// Leave the target enabled; disable its dependents first
    Cancel,

    /// Disable the target anyway, leaving dependents unsatisfied
    Force,

    /// Disable the whole hard-dependency chain
    Cascade,
}

/// Decision source for the dependency policy
pub trait Prompt {
    /// Three-way choice when hard dependents exist
    fn choose_hard_dependents(&mut self, target: &str, dependents: &[String])
    -> Result<HardChoice>;

    /// Second, explicit confirmation before a force-disable
    fn confirm_force(&mut self, target: &str) -> Result<bool>;

    /// Single Y/N when only soft dependents exist
    fn confirm_soft(&mut self, target: &str, dependents: &[String]) -> Result<bool>;
}

/// Terminal-backed prompt, pre-answered by CLI flags where given
///
/// `--cascade` and `--force` answer the hard-dependent choice; `--force`
/// also covers its own second confirmation (the flag is the explicit
/// consent). `--yes` answers soft confirmations only; it deliberately does
/// not answer the hard-dependent choice, which is too destructive to
/// default.
#[derive(Debug, Default)]
pub struct CliPrompt {
    pub cascade: bool,
    pub force: bool,
    pub yes: bool,
}

const HARD_CANCEL: &str = "Cancel: leave it enabled, disable the dependents first";
const HARD_FORCE: &str = "Force-disable it anyway (may break the running server)";
const HARD_CASCADE: &str = "Cascade: disable the whole dependency chain";

impl Prompt for CliPrompt {
    fn choose_hard_dependents(
        &mut self,
        target: &str,
        dependents: &[String],
    ) -> Result<HardChoice> {
        if self.cascade {
            return Ok(HardChoice::Cascade);
        }
        if self.force {
            return Ok(HardChoice::Force);
        }

        println!(
            "{} '{}' is required by: {}",
            Style::new().yellow().bold().apply_to("Hard dependents:"),
            target,
            dependents.join(", ")
        );

        let options = vec![HARD_CANCEL, HARD_FORCE, HARD_CASCADE];
        match Select::new(&format!("How should '{target}' be disabled?"), options).prompt() {
            Ok(HARD_FORCE) => Ok(HardChoice::Force),
            Ok(HARD_CASCADE) => Ok(HardChoice::Cascade),
            Ok(_) => Ok(HardChoice::Cancel),
            Err(InquireError::OperationCanceled) => Ok(HardChoice::Cancel),
            Err(e) => Err(e.into()),
        }
    }

    fn confirm_force(&mut self, target: &str) -> Result<bool> {
        if self.force {
            return Ok(true);
        }
        match Confirm::new(&format!(
            "Really force-disable '{target}' with hard dependents still enabled?"
        ))
        .with_default(false)
        .with_help_message("This can break the running server")
        .prompt()
        {
            Ok(answer) => Ok(answer),
            Err(InquireError::OperationCanceled) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn confirm_soft(&mut self, target: &str, dependents: &[String]) -> Result<bool> {
        if self.yes {
            return Ok(true);
        }
        println!(
            "{} disabling '{}' degrades: {}",
            Style::new().yellow().apply_to("Soft dependents:"),
            target,
            dependents.join(", ")
        );
        match Confirm::new(&format!("Disable '{target}' anyway?"))
            .with_default(true)
            .prompt()
        {
            Ok(answer) => Ok(answer),
            Err(InquireError::OperationCanceled) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
