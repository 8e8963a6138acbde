//! Pending-operation recovery
//!
//! Runs once at process start, before any command dispatch. A present lock
//! means the previous invocation died before releasing it; the operator
//! must settle it explicitly before anything else happens:
//!
//! - Resume: re-dispatch the recorded command line. The lock is not
//!   released here; the caller re-acquires the marker under a fresh guard
//!   before re-dispatching, keeping it true from the crashed run through
//!   the resumed one and settling it on every exit of the resumed run.
//! - Discard: release the lock and carry on with the invocation as typed.
//! - Abort: leave the lock untouched and exit, so the operator can inspect
//!   the workspace first.
//!
//! A present-but-malformed lock is warned about and removed: leaving it
//! would block every future operation, and a marker we cannot read cannot
//! be resumed anyway.

use chrono::Local;
use console::Style;
use inquire::Select;

use crate::error::Result;
use crate::lock::{LockManager, OperationLock};

/// What the rest of the invocation should do after recovery
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    /// No pending operation (or it was discarded); dispatch as typed
    Proceed,

    /// Re-dispatch the recorded argument tokens instead of the typed ones
    Resume(Vec<String>),

    /// Exit immediately, lock left in place
    Abort,
}

/// Operator decision at the recovery prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryChoice {
    Resume,
    Discard,
    Abort,
}

const CHOICE_RESUME: &str = "Resume the interrupted operation";
const CHOICE_DISCARD: &str = "Discard it and continue with this invocation";
const CHOICE_ABORT: &str = "Abort and leave everything untouched";

/// Check for and settle a pending interrupted operation
pub fn check_pending(manager: &LockManager) -> Result<PendingAction> {
    if !manager.exists() {
        return Ok(PendingAction::Proceed);
    }

    let Some(lock) = manager.inspect() else {
        // inspect already warned; a marker we cannot read would otherwise
        // block every operation forever
        eprintln!("Removing the unreadable lock and continuing.");
        manager.release()?;
        return Ok(PendingAction::Proceed);
    };

    print_pending_banner(&lock);
    let choice = prompt_choice();
    apply_choice(manager, &lock, choice)
}

/// Carry out an operator decision; separated from the prompt for testing
pub fn apply_choice(
    manager: &LockManager,
    lock: &OperationLock,
    choice: RecoveryChoice,
) -> Result<PendingAction> {
    match choice {
        RecoveryChoice::Resume => Ok(PendingAction::Resume(lock.command_line.clone())),
        RecoveryChoice::Discard => {
            manager.release()?;
            println!("Discarded the pending operation.");
            Ok(PendingAction::Proceed)
        }
        RecoveryChoice::Abort => Ok(PendingAction::Abort),
    }
}

fn print_pending_banner(lock: &OperationLock) {
    let bold = Style::new().bold();
    println!(
        "{}",
        Style::new()
            .yellow()
            .bold()
            .apply_to("A previous operation did not complete.")
    );
    println!(
        "  {} warden {}",
        bold.apply_to("Command: "),
        lock.command_line.join(" ")
    );
    match lock.created_at {
        Some(created) => {
            let elapsed = Local::now().signed_duration_since(created);
            println!(
                "  {} {} ({})",
                bold.apply_to("Started: "),
                created.format("%Y-%m-%d %H:%M:%S"),
                humanize(elapsed)
            );
        }
        None => println!("  {} unknown", bold.apply_to("Started: ")),
    }
    println!("  {} {}", bold.apply_to("PID:     "), lock.pid);
    println!();
}

fn prompt_choice() -> RecoveryChoice {
    let options = vec![CHOICE_RESUME, CHOICE_DISCARD, CHOICE_ABORT];
    match Select::new("How should the pending operation be handled?", options)
        .with_help_message("↑↓ navigate  enter confirm")
        .prompt()
    {
        Ok(CHOICE_RESUME) => RecoveryChoice::Resume,
        Ok(CHOICE_DISCARD) => RecoveryChoice::Discard,
        Ok(_) => RecoveryChoice::Abort,
        Err(e) => {
            // No usable terminal (or the prompt was interrupted). The only
            // safe default is the one that changes nothing.
            eprintln!("Cannot prompt for a recovery decision ({e}); aborting.");
            RecoveryChoice::Abort
        }
    }
}

fn humanize(elapsed: chrono::Duration) -> String {
    let seconds = elapsed.num_seconds().max(0);
    if seconds < 60 {
        format!("{seconds} seconds ago")
    } else if seconds < 3600 {
        format!("{} minutes ago", seconds / 60)
    } else if seconds < 86_400 {
        format!("{} hours ago", seconds / 3600)
    } else {
        format!("{} days ago", seconds / 86_400)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::ServerPaths;
    use tempfile::TempDir;

    fn manager_with_lock(tokens: &[&str]) -> (TempDir, LockManager, OperationLock) {
        let temp = TempDir::new().unwrap();
        let paths = ServerPaths::new(temp.path());
        let manager = LockManager::new(&paths);
        let args: Vec<String> = tokens.iter().map(|s| (*s).to_string()).collect();
        let guard = manager.acquire(&args).unwrap();
        // simulate a crash: the guard never runs its release
        std::mem::forget(guard);
        let lock = manager.inspect().unwrap();
        (temp, manager, lock)
    }

    #[test]
    fn no_lock_means_proceed() {
        let temp = TempDir::new().unwrap();
        let manager = LockManager::new(&ServerPaths::new(temp.path()));
        assert_eq!(check_pending(&manager).unwrap(), PendingAction::Proceed);
    }

    #[test]
    fn resume_keeps_the_lock_and_returns_the_recorded_tokens() {
        let (_temp, manager, lock) = manager_with_lock(&["disable", "WorldEdit", "--cascade"]);
        let action = apply_choice(&manager, &lock, RecoveryChoice::Resume).unwrap();
        assert_eq!(
            action,
            PendingAction::Resume(vec![
                "disable".to_string(),
                "WorldEdit".to_string(),
                "--cascade".to_string()
            ])
        );
        assert!(manager.exists());
    }

    #[test]
    fn discard_releases_the_lock_and_proceeds() {
        let (_temp, manager, lock) = manager_with_lock(&["toggle", "A"]);
        let action = apply_choice(&manager, &lock, RecoveryChoice::Discard).unwrap();
        assert_eq!(action, PendingAction::Proceed);
        assert!(!manager.exists());
    }

    #[test]
    fn abort_leaves_the_lock_untouched() {
        let (_temp, manager, lock) = manager_with_lock(&["enable", "B"]);
        let action = apply_choice(&manager, &lock, RecoveryChoice::Abort).unwrap();
        assert_eq!(action, PendingAction::Abort);
        assert!(manager.exists());
    }

    #[test]
    fn malformed_lock_is_removed_and_treated_as_no_pending() {
        let temp = TempDir::new().unwrap();
        let manager = LockManager::new(&ServerPaths::new(temp.path()));
        std::fs::write(manager.path(), "garbage with no keys\n").unwrap();

        assert_eq!(check_pending(&manager).unwrap(), PendingAction::Proceed);
        assert!(!manager.exists());
    }

    #[test]
    fn humanize_scales_units() {
        assert_eq!(humanize(chrono::Duration::seconds(42)), "42 seconds ago");
        assert_eq!(humanize(chrono::Duration::seconds(180)), "3 minutes ago");
        assert_eq!(humanize(chrono::Duration::hours(5)), "5 hours ago");
        assert_eq!(humanize(chrono::Duration::days(2)), "2 days ago");
    }
}
