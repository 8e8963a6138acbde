//! Operator-facing output for toggle batches
//!
//! Every state change, skip, and failure is echoed individually as it
//! happens; the summary at the end groups what changed, what the operator
//! skipped, and what failed with a reason. Nothing is silent.

use console::Style;

use crate::registry::ModState;

/// Outcome collector for one toggle batch
#[derive(Debug, Default)]
pub struct ToggleSummary {
    /// Mods whose state actually changed, with the new state
    pub changed: Vec<(String, ModState)>,

    /// Mods left alone by operator choice, with the reason shown
    pub skipped: Vec<(String, String)>,

    /// Mods whose rename failed, with the error text
    pub failed: Vec<(String, String)>,

    /// Soft dependents of disabled mods; enabled, but degraded
    pub soft_affected: Vec<String>,
}

impl ToggleSummary {
    pub fn record_changed(&mut self, identity: &str, state: ModState) {
        let verb = match state {
            ModState::Enabled => "Enabled",
            ModState::Disabled => "Disabled",
        };
        let style = match state {
            ModState::Enabled => Style::new().green(),
            ModState::Disabled => Style::new().yellow(),
        };
        println!("{} {identity}", style.apply_to(verb));
        self.changed.push((identity.to_string(), state));
    }

    pub fn record_skipped(&mut self, identity: &str, reason: &str) {
        println!(
            "{} {identity} ({reason})",
            Style::new().dim().apply_to("Skipped")
        );
        self.skipped.push((identity.to_string(), reason.to_string()));
    }

    pub fn record_failed(&mut self, identity: &str, error: &str) {
        eprintln!("{} {identity}: {error}", Style::new().red().apply_to("Failed"));
        self.failed.push((identity.to_string(), error.to_string()));
    }

    pub fn record_soft_affected(&mut self, identity: &str) {
        if !self.soft_affected.iter().any(|s| s == identity) {
            self.soft_affected.push(identity.to_string());
        }
    }

    /// Count of mods newly disabled in this batch
    #[allow(dead_code)]
    pub fn newly_disabled(&self) -> usize {
        self.changed
            .iter()
            .filter(|(_, s)| *s == ModState::Disabled)
            .count()
    }

    /// Print the end-of-batch summary
    pub fn print(&self) {
        println!();
        println!(
            "{} {} changed, {} skipped, {} failed.",
            Style::new().bold().apply_to("Summary:"),
            self.changed.len(),
            self.skipped.len(),
            self.failed.len()
        );
        for (name, reason) in &self.skipped {
            println!("  {} {name}: {reason}", Style::new().dim().apply_to("skipped"));
        }
        for (name, error) in &self.failed {
            println!("  {} {name}: {error}", Style::new().red().apply_to("failed"));
        }
        if !self.soft_affected.is_empty() {
            println!(
                "{} {}",
                Style::new()
                    .magenta()
                    .apply_to("Functionality may degrade for:"),
                self.soft_affected.join(", ")
            );
        }
    }
}
