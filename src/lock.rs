//! Operation lock
//!
//! A single durable marker file records the in-flight mutating operation:
//! its command line, start time, and owning process. The program is
//! single-threaded, so the lock is not about mutual exclusion within one
//! run; its presence after a crash is the evidence recovery needs that the
//! previous invocation never completed.
//!
//! The on-disk format is human-readable `Key: value` lines and is parsed
//! leniently, line by line, so a lock written by an older or newer warden
//! stays readable.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};

use crate::config::ServerPaths;
use crate::error::{Result, WardenError};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Record of the operation that held (or holds) the lock
#[derive(Debug, Clone)]
pub struct OperationLock {
    /// Argument tokens of the invocation, without the binary name
    pub command_line: Vec<String>,

    /// Local start time; `None` when the recorded value was unparseable
    pub created_at: Option<DateTime<Local>>,

    pub pid: u32,
}

impl OperationLock {
    fn render(&self) -> String {
        let timestamp = self
            .created_at
            .map(|t| t.format(TIMESTAMP_FORMAT).to_string())
            .unwrap_or_default();
        format!(
            "Command: {}\nTimestamp: {}\nPID: {}\n",
            self.command_line.join(" "),
            timestamp,
            self.pid
        )
    }

    /// Lenient line-oriented parse; unknown lines are ignored
    ///
    /// Returns `None` when no recognized key is present at all, which is
    /// the malformed-marker case recovery warns about.
    fn parse(content: &str) -> Option<Self> {
        let mut command_line = None;
        let mut created_at = None;
        let mut pid = None;

        for line in content.lines() {
            if let Some(rest) = line.strip_prefix("Command:") {
                command_line =
                    Some(rest.split_whitespace().map(str::to_owned).collect::<Vec<_>>());
            } else if let Some(rest) = line.strip_prefix("Timestamp:") {
                created_at = NaiveDateTime::parse_from_str(rest.trim(), TIMESTAMP_FORMAT)
                    .ok()
                    .and_then(|naive| Local.from_local_datetime(&naive).single());
            } else if let Some(rest) = line.strip_prefix("PID:") {
                pid = rest.trim().parse::<u32>().ok();
            }
        }

        if command_line.is_none() && created_at.is_none() && pid.is_none() {
            return None;
        }

        Some(Self {
            command_line: command_line.unwrap_or_default(),
            created_at,
            pid: pid.unwrap_or(0),
        })
    }
}

/// Owns the lock file location and all access to it
#[derive(Debug, Clone)]
pub struct LockManager {
    lock_path: PathBuf,
}

impl LockManager {
    pub fn new(paths: &ServerPaths) -> Self {
        Self {
            lock_path: paths.lock_path.clone(),
        }
    }

    #[allow(dead_code)]
    pub fn path(&self) -> &Path {
        &self.lock_path
    }

    pub fn exists(&self) -> bool {
        self.lock_path.exists()
    }

    /// Write the lock record, failing if a lock already exists
    ///
    /// Callers must have gone through recovery first; an existing lock here
    /// means a second invocation raced us or recovery was skipped. Returns
    /// a guard that deletes the lock when dropped, on every exit path.
    pub fn acquire(&self, command_line: &[String]) -> Result<OperationGuard<'_>> {
        let record = OperationLock {
            command_line: command_line.to_vec(),
            created_at: Some(Local::now()),
            pid: std::process::id(),
        };

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.lock_path)
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::AlreadyExists {
                    WardenError::LockHeld {
                        path: self.lock_path.display().to_string(),
                    }
                } else {
                    WardenError::LockIo {
                        path: self.lock_path.display().to_string(),
                        reason: e.to_string(),
                    }
                }
            })?;

        file.write_all(record.render().as_bytes())
            .map_err(|e| WardenError::LockIo {
                path: self.lock_path.display().to_string(),
                reason: e.to_string(),
            })?;

        Ok(OperationGuard {
            manager: self,
            armed: true,
        })
    }

    /// Rewrite the lock in place when resuming an interrupted operation
    ///
    /// Recovery does not release the marker before a resume; it is
    /// overwritten here so a lock exists continuously from the crashed
    /// run through the resumed one.
    pub fn reacquire(&self, command_line: &[String]) -> Result<OperationGuard<'_>> {
        let record = OperationLock {
            command_line: command_line.to_vec(),
            created_at: Some(Local::now()),
            pid: std::process::id(),
        };

        std::fs::write(&self.lock_path, record.render()).map_err(|e| WardenError::LockIo {
            path: self.lock_path.display().to_string(),
            reason: e.to_string(),
        })?;

        Ok(OperationGuard {
            manager: self,
            armed: true,
        })
    }

    /// Delete the lock; deleting an absent lock is not an error
    pub fn release(&self) -> Result<()> {
        match std::fs::remove_file(&self.lock_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(WardenError::LockIo {
                path: self.lock_path.display().to_string(),
                reason: e.to_string(),
            }),
        }
    }

    /// Non-mutating read of the lock record
    ///
    /// `None` means the lock is absent, unreadable, or carries no
    /// recognized keys; the unreadable cases warn on stderr.
    pub fn inspect(&self) -> Option<OperationLock> {
        if !self.exists() {
            return None;
        }
        let content = match std::fs::read_to_string(&self.lock_path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!(
                    "Warning: operation lock at {} is unreadable: {e}",
                    self.lock_path.display()
                );
                return None;
            }
        };
        let parsed = OperationLock::parse(&content);
        if parsed.is_none() {
            eprintln!(
                "Warning: operation lock at {} is malformed",
                self.lock_path.display()
            );
        }
        parsed
    }
}

/// Scoped lock acquisition
///
/// Dropping the guard releases the lock, so every exit path of a mutating
/// operation (success, reported failure, prompt interrupt) ends with the
/// lock absent. A crash skips the drop and leaves the marker behind, which
/// is exactly the evidence recovery runs on.
#[derive(Debug)]
pub struct OperationGuard<'a> {
    manager: &'a LockManager,
    armed: bool,
}

impl OperationGuard<'_> {
    /// Release the lock now and report any failure to do so
    pub fn release(mut self) -> Result<()> {
        self.armed = false;
        self.manager.release()
    }
}

impl Drop for OperationGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            if let Err(e) = self.manager.release() {
                eprintln!("Warning: failed to release operation lock: {e}");
            }
        }
    }
}
