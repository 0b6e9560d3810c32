//! Vault module: the encrypted record store.
//!
//! This module provides:
//! - The four record kinds and the `Record` trait (`record`)
//! - The plaintext JSON document schema (`document`)
//! - Mapping attachments to temporary plaintext files (`attachment`)
//! - `Container`, which loads, saves and edits a vault (`container`)

pub mod attachment;
pub mod container;
pub mod document;
pub mod record;

// Re-export the most commonly used items.
pub use container::Container;
pub use document::Document;
pub use record::{Attachment, Contact, Credential, Note, Record, RecordKind};
