//! Mod registry
//!
//! Enumerates the mod directories under `<server>/mods/` and exposes them
//! as an owned collection addressed by index. A mod's enabled/disabled
//! state is derived purely from the reserved `.disabled` suffix on its
//! directory name; toggling is a single rename adding or removing that
//! suffix. Identity comes from the descriptor's `name`, falling back to
//! the directory stem, and is deliberately not required to be unique:
//! the registry maps artifacts to identities, never the reverse.

use std::path::{Path, PathBuf};

use crate::config::ServerPaths;
use crate::error::{Result, WardenError};
use crate::manifest::ModManifest;

/// Reserved suffix marking a disabled mod directory
pub const DISABLED_SUFFIX: &str = ".disabled";

/// Enabled/disabled state of a mod, derived from its directory name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModState {
    Enabled,
    Disabled,
}

/// Hard and soft dependency identities declared by one mod
#[derive(Debug, Clone, Default)]
pub struct Dependencies {
    pub hard: Vec<String>,
    pub soft: Vec<String>,
}

/// One installed mod
#[derive(Debug, Clone)]
pub struct ModEntry {
    /// Resolved identity (declared name or directory stem)
    pub identity: String,

    /// Declared version, informational only
    pub version: Option<String>,

    pub state: ModState,

    /// Artifact directory; updated when the state changes
    pub path: PathBuf,
}

impl ModEntry {
    /// Directory name without the disabled suffix
    fn stem(&self) -> String {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        name.strip_suffix(DISABLED_SUFFIX)
            .map_or(name.clone(), str::to_owned)
    }
}

/// The collection of installed mods, in stable scan order
#[derive(Debug)]
pub struct ModRegistry {
    entries: Vec<ModEntry>,
}

impl ModRegistry {
    /// Scan the mods directory for enabled and disabled artifacts
    ///
    /// Order is sorted by directory name so repeated scans display
    /// identically. Hidden entries and plain files are skipped.
    pub fn scan(paths: &ServerPaths) -> Result<Self> {
        let read_dir =
            std::fs::read_dir(&paths.mods_dir).map_err(|_| WardenError::ModsDirNotFound {
                path: paths.mods_dir.display().to_string(),
            })?;

        let mut dirs: Vec<PathBuf> = read_dir
            .filter_map(std::result::Result::ok)
            .map(|e| e.path())
            .filter(|p| p.is_dir())
            .filter(|p| {
                p.file_name()
                    .map(|n| !n.to_string_lossy().starts_with('.'))
                    .unwrap_or(false)
            })
            .collect();
        dirs.sort();

        let entries = dirs.into_iter().map(|path| Self::entry_for(&path)).collect();

        Ok(Self { entries })
    }

    fn entry_for(path: &Path) -> ModEntry {
        let dir_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let (stem, state) = match dir_name.strip_suffix(DISABLED_SUFFIX) {
            Some(stem) => (stem.to_string(), ModState::Disabled),
            None => (dir_name.clone(), ModState::Enabled),
        };

        let manifest = ModManifest::load(path).unwrap_or_default();

        ModEntry {
            identity: manifest.name.unwrap_or(stem),
            version: manifest.version,
            state,
            path: path.to_path_buf(),
        }
    }

    pub fn entries(&self) -> &[ModEntry] {
        &self.entries
    }

    pub fn entry(&self, index: usize) -> &ModEntry {
        &self.entries[index]
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// First entry whose identity matches, in scan order
    ///
    /// Duplicate identities are possible; first match wins, which mirrors
    /// how dependency matching over-matches on duplicates.
    pub fn find(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.identity == name)
    }

    /// Indices of all currently-enabled mods
    pub fn enabled_indices(&self) -> Vec<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.state == ModState::Enabled)
            .map(|(i, _)| i)
            .collect()
    }

    /// Identities that appear on more than one artifact
    pub fn duplicate_identities(&self) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        let mut dupes = Vec::new();
        for entry in &self.entries {
            if !seen.insert(entry.identity.as_str()) && !dupes.contains(&entry.identity) {
                dupes.push(entry.identity.clone());
            }
        }
        dupes
    }

    /// Rename the artifact to change its state
    ///
    /// Atomic from the caller's perspective: on any failure the artifact
    /// keeps its old name and the entry is left untouched. Renaming to the
    /// current state is a no-op.
    pub fn set_state(&mut self, index: usize, new_state: ModState) -> Result<()> {
        let entry = &self.entries[index];
        if entry.state == new_state {
            return Ok(());
        }

        let stem = entry.stem();
        let target_name = match new_state {
            ModState::Enabled => stem,
            ModState::Disabled => format!("{stem}{DISABLED_SUFFIX}"),
        };
        let target = entry
            .path
            .parent()
            .map(|p| p.join(&target_name))
            .ok_or_else(|| WardenError::RenameFailed {
                name: entry.identity.clone(),
                reason: "artifact has no parent directory".to_string(),
            })?;

        if target.exists() {
            return Err(WardenError::RenameCollision {
                name: entry.identity.clone(),
                target: target_name,
            });
        }

        std::fs::rename(&entry.path, &target).map_err(|e| WardenError::RenameFailed {
            name: entry.identity.clone(),
            reason: e.to_string(),
        })?;

        let entry = &mut self.entries[index];
        entry.path = target;
        entry.state = new_state;
        Ok(())
    }

    /// Declared dependencies of a mod, read fresh from its descriptor
    ///
    /// A missing or malformed descriptor yields empty sets; a mod with
    /// unreadable metadata never blocks an operation. Malformed (as
    /// opposed to absent) descriptors get a one-line warning.
    pub fn read_dependencies(&self, index: usize) -> Dependencies {
        let entry = &self.entries[index];
        match ModManifest::load(&entry.path) {
            Ok(manifest) => Dependencies {
                hard: manifest.depend.as_vec(),
                soft: manifest.softdepend.as_vec(),
            },
            Err(reason) => {
                if entry.path.join(crate::manifest::MANIFEST_FILE).exists() {
                    eprintln!(
                        "Warning: unreadable descriptor for '{}' ({reason}); assuming no dependencies",
                        entry.identity
                    );
                }
                Dependencies::default()
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn server_with_mods(mods: &[(&str, &str)]) -> (TempDir, ServerPaths) {
        let temp = TempDir::new().unwrap();
        let paths = ServerPaths::new(temp.path());
        std::fs::create_dir_all(&paths.mods_dir).unwrap();
        for (dir_name, manifest) in mods {
            let dir = paths.mods_dir.join(dir_name);
            std::fs::create_dir_all(&dir).unwrap();
            if !manifest.is_empty() {
                std::fs::write(dir.join("mod.yml"), manifest).unwrap();
            }
        }
        (temp, paths)
    }

    #[test]
    fn scan_derives_state_from_suffix() {
        let (_temp, paths) = server_with_mods(&[
            ("Alpha", "name: Alpha\n"),
            ("Beta.disabled", "name: Beta\n"),
        ]);
        let registry = ModRegistry::scan(&paths).unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.entry(0).identity, "Alpha");
        assert_eq!(registry.entry(0).state, ModState::Enabled);
        assert_eq!(registry.entry(1).identity, "Beta");
        assert_eq!(registry.entry(1).state, ModState::Disabled);
    }

    #[test]
    fn identity_falls_back_to_directory_stem() {
        let (_temp, paths) = server_with_mods(&[("NoManifest", ""), ("Unnamed.disabled", "version: \"1.0\"\n")]);
        let registry = ModRegistry::scan(&paths).unwrap();

        assert_eq!(registry.entry(0).identity, "NoManifest");
        assert_eq!(registry.entry(1).identity, "Unnamed");
    }

    #[test]
    fn scan_order_is_stable_by_name() {
        let (_temp, paths) =
            server_with_mods(&[("Zeta", ""), ("Alpha", ""), ("Mid.disabled", "")]);
        let registry = ModRegistry::scan(&paths).unwrap();
        let names: Vec<_> = registry.entries().iter().map(|e| e.identity.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Mid", "Zeta"]);
    }

    #[test]
    fn missing_mods_dir_is_an_error() {
        let temp = TempDir::new().unwrap();
        let paths = ServerPaths::new(temp.path());
        assert!(matches!(
            ModRegistry::scan(&paths).unwrap_err(),
            WardenError::ModsDirNotFound { .. }
        ));
    }

    #[test]
    fn set_state_renames_the_artifact() {
        let (_temp, paths) = server_with_mods(&[("Alpha", "name: Alpha\n")]);
        let mut registry = ModRegistry::scan(&paths).unwrap();

        registry.set_state(0, ModState::Disabled).unwrap();
        assert_eq!(registry.entry(0).state, ModState::Disabled);
        assert!(paths.mods_dir.join("Alpha.disabled").is_dir());
        assert!(!paths.mods_dir.join("Alpha").exists());

        registry.set_state(0, ModState::Enabled).unwrap();
        assert!(paths.mods_dir.join("Alpha").is_dir());
    }

    #[test]
    fn set_state_same_state_is_a_noop() {
        let (_temp, paths) = server_with_mods(&[("Alpha", "")]);
        let mut registry = ModRegistry::scan(&paths).unwrap();
        registry.set_state(0, ModState::Enabled).unwrap();
        assert!(paths.mods_dir.join("Alpha").is_dir());
    }

    #[test]
    fn collision_leaves_state_unchanged() {
        let (_temp, paths) =
            server_with_mods(&[("Alpha", ""), ("Alpha.disabled", "")]);
        let mut registry = ModRegistry::scan(&paths).unwrap();
        let alpha = registry.find("Alpha").unwrap();

        let result = registry.set_state(alpha, ModState::Disabled);
        assert!(matches!(
            result.unwrap_err(),
            WardenError::RenameCollision { .. }
        ));
        assert_eq!(registry.entry(alpha).state, ModState::Enabled);
        assert!(paths.mods_dir.join("Alpha").is_dir());
    }

    #[test]
    fn unreadable_descriptor_yields_empty_dependencies() {
        let (_temp, paths) = server_with_mods(&[("Broken", "depend: [unclosed\n")]);
        let registry = ModRegistry::scan(&paths).unwrap();
        let deps = registry.read_dependencies(0);
        assert!(deps.hard.is_empty());
        assert!(deps.soft.is_empty());
    }

    #[test]
    fn dependencies_come_from_the_descriptor() {
        let (_temp, paths) = server_with_mods(&[(
            "Towny",
            "name: Towny\ndepend: [Vault]\nsoftdepend: Map\n",
        )]);
        let registry = ModRegistry::scan(&paths).unwrap();
        let deps = registry.read_dependencies(0);
        assert_eq!(deps.hard, vec!["Vault"]);
        assert_eq!(deps.soft, vec!["Map"]);
    }

    #[test]
    fn duplicate_identities_are_reported_not_fatal() {
        let (_temp, paths) = server_with_mods(&[
            ("CopyA", "name: Same\n"),
            ("CopyB", "name: Same\n"),
        ]);
        let registry = ModRegistry::scan(&paths).unwrap();
        assert_eq!(registry.duplicate_identities(), vec!["Same"]);
        // find returns the first in scan order
        assert_eq!(registry.find("Same"), Some(0));
    }
}
