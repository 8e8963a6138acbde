//! Common test utilities for warden integration tests

use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

/// A throwaway server installation for integration tests
#[allow(dead_code)]
pub struct TestServer {
    /// Temporary directory
    pub temp: TempDir,
    /// Server root
    pub path: PathBuf,
}

#[allow(dead_code)]
impl TestServer {
    /// Create a server root with an empty mods directory
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        std::fs::create_dir_all(path.join("mods")).expect("Failed to create mods directory");
        Self { temp, path }
    }

    /// Create a mod directory with the given descriptor content
    pub fn add_mod(&self, dir_name: &str, manifest: &str) {
        let dir = self.path.join("mods").join(dir_name);
        std::fs::create_dir_all(&dir).expect("Failed to create mod directory");
        if !manifest.is_empty() {
            std::fs::write(dir.join("mod.yml"), manifest).expect("Failed to write mod.yml");
        }
    }

    /// Whether a mod directory with this exact name exists
    pub fn has_dir(&self, dir_name: &str) -> bool {
        self.path.join("mods").join(dir_name).is_dir()
    }

    pub fn lock_path(&self) -> PathBuf {
        self.path.join(".warden.lock")
    }

    pub fn lock_exists(&self) -> bool {
        self.lock_path().exists()
    }

    /// Plant a lock file, simulating a crashed previous invocation
    pub fn plant_lock(&self, content: &str) {
        std::fs::write(self.lock_path(), content).expect("Failed to write lock file");
    }

    /// A warden command rooted at this server
    pub fn warden(&self) -> Command {
        let mut cmd = Command::cargo_bin("warden").expect("warden binary");
        cmd.current_dir(&self.path);
        cmd
    }
}
