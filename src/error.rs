//! Error types for warden
//!
//! Uses `thiserror` for error definitions and `miette` for diagnostic
//! codes and help text.
//!
//! Propagation policy: lock errors abort the whole mutating operation,
//! registry rename errors are reported per mod and never abort the batch,
//! and manifest errors are absorbed at the read site into "no dependencies
//! known". An operator declining a confirmation is not an error at all.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for warden operations
#[derive(Error, Diagnostic, Debug)]
pub enum WardenError {
    #[error("Server directory not found: {path}")]
    #[diagnostic(
        code(warden::server::not_found),
        help("Pass the server root with --server-dir or run warden from inside it")
    )]
    ServerDirNotFound { path: String },

    #[error("Mods directory not found: {path}")]
    #[diagnostic(
        code(warden::server::no_mods_dir),
        help("Expected a mods/ directory under the server root")
    )]
    ModsDirNotFound { path: String },

    // Lock errors: fatal to the current operation
    #[error("Another operation is already in progress (lock at {path})")]
    #[diagnostic(
        code(warden::lock::held),
        help("Run warden again and settle the pending operation at the recovery prompt")
    )]
    LockHeld { path: String },

    #[error("Lock file error at {path}: {reason}")]
    #[diagnostic(code(warden::lock::io))]
    LockIo { path: String, reason: String },

    // Registry errors: reported per mod, batch continues
    #[error("Failed to rename '{name}': {reason}")]
    #[diagnostic(code(warden::registry::rename_failed))]
    RenameFailed { name: String, reason: String },

    #[error("Cannot rename '{name}': '{target}' already exists")]
    #[diagnostic(
        code(warden::registry::rename_collision),
        help("Remove or rename the conflicting entry in the mods directory")
    )]
    RenameCollision { name: String, target: String },

    #[error("Mod '{name}' not found")]
    #[diagnostic(
        code(warden::registry::not_found),
        help("Run 'warden list' to see the installed mods")
    )]
    ModNotFound { name: String },

    #[error("Cannot resume recorded command '{command}': {reason}")]
    #[diagnostic(
        code(warden::recovery::resume_failed),
        help("The lock was likely written by a different warden version; rerun the command by hand")
    )]
    ResumeParseFailed { command: String, reason: String },

    #[error("Prompt failed: {reason}")]
    #[diagnostic(code(warden::prompt::failed))]
    PromptFailed { reason: String },

    #[error("{message}")]
    #[diagnostic(code(warden::io))]
    IoError { message: String },
}

impl From<inquire::InquireError> for WardenError {
    fn from(e: inquire::InquireError) -> Self {
        WardenError::PromptFailed {
            reason: e.to_string(),
        }
    }
}

/// Result type alias for warden operations
pub type Result<T> = std::result::Result<T, WardenError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn lock_held_mentions_path() {
        let err = WardenError::LockHeld {
            path: "/srv/.warden.lock".to_string(),
        };
        assert!(err.to_string().contains("/srv/.warden.lock"));
    }

    #[test]
    fn inquire_error_converts_to_prompt_failed() {
        let err: WardenError = inquire::InquireError::OperationInterrupted.into();
        assert!(matches!(err, WardenError::PromptFailed { .. }));
    }
}
