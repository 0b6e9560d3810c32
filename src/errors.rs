use std::path::PathBuf;
use thiserror::Error;

use crate::vault::RecordKind;

/// All errors that can occur in Coffer.
#[derive(Debug, Error)]
pub enum CofferError {
    // --- Core errors ---
    #[error("File access failed for {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Deliberately carries no detail: a wrong password and a damaged
    /// file must look the same to the caller.
    #[error("Corrupted input: wrong password or damaged vault")]
    CorruptedInput,

    #[error("Invalid lookup: {0}")]
    InvalidLookup(#[from] LookupError),

    #[error("No unused uid after {0} attempts; the random source is repeating itself")]
    UidExhausted(u32),

    // --- Vault file errors ---
    #[error("Vault not found at {0}")]
    VaultNotFound(PathBuf),

    #[error("Vault already exists at {0}")]
    VaultAlreadyExists(PathBuf),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    Serialization(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

/// What an `InvalidLookup` was looking for.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("unknown record kind '{0}' (expected credential, note, attachment or contact)")]
    UnknownKind(String),

    #[error("no {kind} with uid '{uid}'")]
    UnknownUid { kind: RecordKind, uid: String },
}

impl CofferError {
    /// Wrap an I/O error together with the path it happened on.
    pub fn file_access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileAccess {
            path: path.into(),
            source,
        }
    }

    /// Shorthand for a failed uid lookup.
    pub fn unknown_uid(kind: RecordKind, uid: &str) -> Self {
        Self::InvalidLookup(LookupError::UnknownUid {
            kind,
            uid: uid.to_string(),
        })
    }
}

/// Convenience type alias for Coffer results.
pub type Result<T> = std::result::Result<T, CofferError>;
