//! The plaintext document inside a vault file.
//!
//! ```text
//! {
//!   "logins":   [ {uid, title, category, username, password, url, last_change}, ... ],
//!   "notes":    [ {uid, title, category, content}, ... ],
//!   "files":    [ {uid, title, category, content /* base64 */}, ... ],
//!   "contacts": [ {uid, category, first_name, last_name, email, phone,
//!                  street, zip, city, country, comment}, ... ]
//! }
//! ```
//!
//! All four arrays and every field are required.  There is no magic
//! number or version: the only way to tell a vault from noise is to
//! decrypt it and see whether this schema parses.

use serde::{Deserialize, Serialize};

use super::record::{Attachment, Contact, Credential, Note};
use crate::errors::{CofferError, Result};

/// The four record collections, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub(crate) logins: Vec<Credential>,
    pub(crate) notes: Vec<Note>,
    pub(crate) files: Vec<Attachment>,
    pub(crate) contacts: Vec<Contact>,
}

impl Document {
    /// Parse decrypted bytes.
    ///
    /// Any failure (invalid UTF-8 or JSON, a missing array or field, bad
    /// base64) is reported as `CorruptedInput` with no further detail.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| {
            tracing::debug!(line = e.line(), column = e.column(), "document did not parse");
            CofferError::CorruptedInput
        })
    }

    /// Serialize to the JSON bytes that get encrypted.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| CofferError::Serialization(format!("document: {e}")))
    }

    pub fn credentials(&self) -> &[Credential] {
        &self.logins
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn attachments(&self) -> &[Attachment] {
        &self.files
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    /// Total number of records across all kinds.
    pub fn len(&self) -> usize {
        self.logins.len() + self.notes.len() + self.files.len() + self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ---------------------------------------------------------------------------
// Serde helpers for base64-encoded Vec<u8> fields
// ---------------------------------------------------------------------------

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

pub(crate) fn base64_encode<S>(data: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    let encoded = BASE64.encode(data);
    serializer.serialize_str(&encoded)
}

pub(crate) fn base64_decode<'de, D>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    BASE64.decode(&s).map_err(serde::de::Error::custom)
}
