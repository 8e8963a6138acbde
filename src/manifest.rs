//! Mod descriptor parsing
//!
//! Each mod directory carries a `mod.yml` descriptor with its declared
//! name, version, and dependency lists. `depend` and `softdepend` accept
//! either a single string or a list of strings. Absent keys default to
//! empty. Callers treat any read or parse failure as "no metadata known";
//! a broken descriptor never blocks an operation.

use std::path::Path;

use serde::Deserialize;

/// Descriptor filename inside a mod directory
pub const MANIFEST_FILE: &str = "mod.yml";

/// A string-or-list-of-strings YAML value
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StringList {
    One(String),
    Many(Vec<String>),
}

impl Default for StringList {
    fn default() -> Self {
        StringList::Many(Vec::new())
    }
}

impl StringList {
    /// View as a flat list; a bare string is a single-element list
    pub fn as_vec(&self) -> Vec<String> {
        match self {
            StringList::One(s) => vec![s.clone()],
            StringList::Many(v) => v.clone(),
        }
    }

    #[allow(dead_code)]
    pub fn contains(&self, name: &str) -> bool {
        match self {
            StringList::One(s) => s == name,
            StringList::Many(v) => v.iter().any(|s| s == name),
        }
    }
}

/// Parsed `mod.yml` descriptor
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ModManifest {
    /// Declared identity; falls back to the directory stem when absent
    pub name: Option<String>,

    /// Informational only, never compared
    pub version: Option<String>,

    /// Hard dependencies: the mod cannot function without these
    pub depend: StringList,

    /// Soft dependencies: functionality degrades without these
    pub softdepend: StringList,
}

impl ModManifest {
    /// Parse the descriptor inside a mod directory
    ///
    /// Returns an error message for the caller to downgrade to a warning;
    /// there is deliberately no `WardenError` variant for this.
    pub fn load(mod_dir: &Path) -> std::result::Result<Self, String> {
        let path = mod_dir.join(MANIFEST_FILE);
        let content = std::fs::read_to_string(&path).map_err(|e| e.to_string())?;
        serde_yaml::from_str(&content).map_err(|e| e.to_string())
    }
}
