use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::crypto::password::DEFAULT_SPECIAL_CHARACTERS;
use crate::errors::{CofferError, Result};
use crate::fs::DEFAULT_ITERATIONS;

/// Project-level configuration, loaded from `.coffer.toml`.
///
/// Every field has a sensible default so Coffer works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Vault file used when `--vault` is not given (relative to the
    /// directory the config was loaded from).
    #[serde(default = "default_vault_file")]
    pub vault_file: String,

    /// Overwrite passes when securely erasing plaintext files.
    #[serde(default = "default_erase_iterations")]
    pub erase_iterations: u32,

    /// Length of generated passwords.
    #[serde(default = "default_password_length")]
    pub password_length: usize,

    /// Extra characters generated passwords may contain.
    #[serde(default = "default_special_characters")]
    pub special_characters: String,

    /// Where attachments are mapped; the system temp dir when unset.
    #[serde(default)]
    pub map_dir: Option<PathBuf>,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_vault_file() -> String {
    "vault.coffer".to_string()
}

fn default_erase_iterations() -> u32 {
    DEFAULT_ITERATIONS
}

fn default_password_length() -> usize {
    20
}

fn default_special_characters() -> String {
    DEFAULT_SPECIAL_CHARACTERS.to_string()
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            vault_file: default_vault_file(),
            erase_iterations: default_erase_iterations(),
            password_length: default_password_length(),
            special_characters: default_special_characters(),
            map_dir: None,
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the project root.
    const FILE_NAME: &'static str = ".coffer.toml";

    /// Load settings from `<project_dir>/.coffer.toml`.
    ///
    /// If the file does not exist, defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            CofferError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Full path to the default vault file.
    pub fn vault_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.vault_file)
    }

    /// Directory attachments get mapped into.
    pub fn map_dir(&self) -> PathBuf {
        self.map_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

// ── Tests ────────────────────────────────────────────────────────────
