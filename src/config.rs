//! Server path configuration
//!
//! All components take their file locations from an explicit [`ServerPaths`]
//! built once in `main`, so tests can point everything at a temp directory.

use std::path::{Path, PathBuf};

use crate::error::{Result, WardenError};

/// Mods subdirectory under the server root
pub const MODS_DIR: &str = "mods";

/// Operation lock filename under the server root
pub const LOCK_FILE: &str = ".warden.lock";

/// Resolved file locations for one server installation
#[derive(Debug, Clone)]
pub struct ServerPaths {
    /// Server root directory
    pub root: PathBuf,

    /// Directory holding mod artifacts (enabled and disabled)
    pub mods_dir: PathBuf,

    /// Operation lock file
    pub lock_path: PathBuf,
}

impl ServerPaths {
    /// Build paths for a server root without checking the filesystem
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            mods_dir: root.join(MODS_DIR),
            lock_path: root.join(LOCK_FILE),
        }
    }

    /// Resolve the server root from the CLI argument or current directory
    pub fn resolve(root: Option<PathBuf>) -> Result<Self> {
        let root = match root {
            Some(path) => path,
            None => std::env::current_dir().map_err(|e| WardenError::IoError {
                message: format!("Failed to get current directory: {e}"),
            })?,
        };

        if !root.is_dir() {
            return Err(WardenError::ServerDirNotFound {
                path: root.display().to_string(),
            });
        }

        Ok(Self::new(&root))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn resolve_rejects_missing_root() {
        let result = ServerPaths::resolve(Some(PathBuf::from("/nonexistent/server")));
        assert!(matches!(
            result.unwrap_err(),
            WardenError::ServerDirNotFound { .. }
        ));
    }

    #[test]
    fn paths_hang_off_the_root() {
        let temp = TempDir::new().unwrap();
        let paths = ServerPaths::resolve(Some(temp.path().to_path_buf())).unwrap();
        assert_eq!(paths.mods_dir, temp.path().join("mods"));
        assert_eq!(paths.lock_path, temp.path().join(".warden.lock"));
    }
}
