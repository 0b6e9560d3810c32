//! The four record kinds stored in a vault.
//!
//! Every record carries a `uid` that only the owning [`Container`] may
//! assign, so the field is private: a record built by a caller always
//! starts with an empty uid, and the only way to obtain a non-empty one
//! is to read the record back out of a container.
//!
//! [`Container`]: super::Container

use std::borrow::Cow;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::document::{base64_decode, base64_encode, Document};
use crate::crypto::password::generate_password;
use crate::errors::{CofferError, LookupError};

// ---------------------------------------------------------------------------
// RecordKind
// ---------------------------------------------------------------------------

/// The kinds of record a vault holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordKind {
    Credential,
    Note,
    Attachment,
    Contact,
}

impl RecordKind {
    /// All kinds, in document order.
    pub const ALL: [RecordKind; 4] = [
        RecordKind::Credential,
        RecordKind::Note,
        RecordKind::Attachment,
        RecordKind::Contact,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RecordKind::Credential => "credential",
            RecordKind::Note => "note",
            RecordKind::Attachment => "attachment",
            RecordKind::Contact => "contact",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = CofferError;

    /// Accepts both the record names and the document's array names
    /// (`login`, `file`, plural forms), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "credential" | "credentials" | "login" | "logins" => Ok(RecordKind::Credential),
            "note" | "notes" => Ok(RecordKind::Note),
            "attachment" | "attachments" | "file" | "files" => Ok(RecordKind::Attachment),
            "contact" | "contacts" => Ok(RecordKind::Contact),
            _ => Err(LookupError::UnknownKind(s.to_string()).into()),
        }
    }
}

// ---------------------------------------------------------------------------
// Record trait
// ---------------------------------------------------------------------------

/// Behaviour shared by every record kind.
///
/// Sealed: the container relies on the four kinds mapping one-to-one onto
/// the document's four arrays.
pub trait Record: Clone + private::Stored {
    const KIND: RecordKind;

    /// Identifier assigned by the container; empty for new records.
    fn uid(&self) -> &str;

    /// Grouping label; empty means the root group.
    fn category(&self) -> &str;

    /// Text shown when listing records of this kind.
    fn display_title(&self) -> Cow<'_, str>;
}

pub(crate) mod private {
    use super::Document;

    pub trait Stored: Sized {
        fn set_uid(&mut self, uid: String);
        fn collection(doc: &Document) -> &Vec<Self>;
        fn collection_mut(doc: &mut Document) -> &mut Vec<Self>;

        /// Called when the container is about to drop this record.
        fn on_discard(&self) {}

        /// Called when `upsert` overwrites this record with `replacement`.
        /// An error aborts the replacement.
        fn on_replace(&self, _replacement: &mut Self) -> crate::errors::Result<()> {
            self.on_discard();
            Ok(())
        }
    }
}

macro_rules! stored_in {
    ($ty:ty, $field:ident) => {
        impl private::Stored for $ty {
            fn set_uid(&mut self, uid: String) {
                self.uid = uid;
            }

            fn collection(doc: &Document) -> &Vec<Self> {
                &doc.$field
            }

            fn collection_mut(doc: &mut Document) -> &mut Vec<Self> {
                &mut doc.$field
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Credential
// ---------------------------------------------------------------------------

/// Login credentials for some site or service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    uid: String,
    pub title: String,
    pub category: String,
    pub username: String,
    #[serde(rename = "password")]
    pub secret: String,
    pub url: String,
    /// When `secret` was last changed; tracks password age.
    pub last_change: DateTime<Utc>,
}

impl Credential {
    pub fn new(
        title: impl Into<String>,
        category: impl Into<String>,
        username: impl Into<String>,
        secret: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            uid: String::new(),
            title: title.into(),
            category: category.into(),
            username: username.into(),
            secret: secret.into(),
            url: url.into(),
            last_change: Utc::now(),
        }
    }

    /// Replace `secret` with a freshly generated password and stamp
    /// `last_change` with the current time.
    pub fn generate_secret(&mut self, length: usize, special_characters: &str) {
        self.secret = generate_password(length, special_characters);
        self.last_change = Utc::now();
    }
}

impl Record for Credential {
    const KIND: RecordKind = RecordKind::Credential;

    fn uid(&self) -> &str {
        &self.uid
    }

    fn category(&self) -> &str {
        &self.category
    }

    fn display_title(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.title)
    }
}

stored_in!(Credential, logins);

// ---------------------------------------------------------------------------
// Note
// ---------------------------------------------------------------------------

/// Free-form text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    uid: String,
    pub title: String,
    pub category: String,
    pub content: String,
}

impl Note {
    pub fn new(
        title: impl Into<String>,
        category: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            uid: String::new(),
            title: title.into(),
            category: category.into(),
            content: content.into(),
        }
    }
}

impl Record for Note {
    const KIND: RecordKind = RecordKind::Note;

    fn uid(&self) -> &str {
        &self.uid
    }

    fn category(&self) -> &str {
        &self.category
    }

    fn display_title(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.title)
    }
}

stored_in!(Note, notes);

// ---------------------------------------------------------------------------
// Attachment
// ---------------------------------------------------------------------------

/// Arbitrary binary data, e.g. a key file or a scanned document.
///
/// `content` is base64 in the serialized document.  While the attachment
/// is mapped to a plaintext file (see `map`), the file's path is kept in
/// memory only; it is never written to the vault.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Attachment {
    uid: String,
    pub title: String,
    pub category: String,
    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    pub content: Vec<u8>,
    #[serde(skip)]
    pub(crate) mapped_path: Option<PathBuf>,
}

impl Attachment {
    /// An empty attachment; fill it with `upload` or by setting `content`.
    pub fn new(title: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            category: category.into(),
            ..Self::default()
        }
    }

    pub fn from_bytes(
        title: impl Into<String>,
        category: impl Into<String>,
        content: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            content: content.into(),
            ..Self::new(title, category)
        }
    }
}

/// The mapped path is transient state, not part of the record.
impl PartialEq for Attachment {
    fn eq(&self, other: &Self) -> bool {
        self.uid == other.uid
            && self.title == other.title
            && self.category == other.category
            && self.content == other.content
    }
}

impl Eq for Attachment {}

impl Record for Attachment {
    const KIND: RecordKind = RecordKind::Attachment;

    fn uid(&self) -> &str {
        &self.uid
    }

    fn category(&self) -> &str {
        &self.category
    }

    fn display_title(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.title)
    }
}

impl private::Stored for Attachment {
    fn set_uid(&mut self, uid: String) {
        self.uid = uid;
    }

    fn collection(doc: &Document) -> &Vec<Self> {
        &doc.files
    }

    fn collection_mut(doc: &mut Document) -> &mut Vec<Self> {
        &mut doc.files
    }

    /// The mapping moves to the replacement, and the mapped file is
    /// rewritten when the content changed.  A replacement mapped to a
    /// different file of its own leaves ours behind.
    fn on_replace(&self, replacement: &mut Self) -> crate::errors::Result<()> {
        let Some(path) = &self.mapped_path else {
            return Ok(());
        };

        if let Some(other) = &replacement.mapped_path {
            if other != path {
                self.on_discard();
                return Ok(());
            }
        }

        if replacement.content != self.content {
            crate::fs::write_file(path, &replacement.content)?;
            tracing::debug!(
                uid = %self.uid,
                bytes = replacement.content.len(),
                "rewrote mapped file for replaced attachment"
            );
        }
        replacement.mapped_path = Some(path.clone());
        Ok(())
    }

    fn on_discard(&self) {
        if let Some(path) = &self.mapped_path {
            tracing::warn!(
                uid = %self.uid,
                path = %path.display(),
                "dropping attachment that is still mapped; plaintext file left on disk"
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Contact
// ---------------------------------------------------------------------------

/// An address book entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    uid: String,
    pub category: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub street: String,
    pub zip: String,
    pub city: String,
    pub country: String,
    pub comment: String,
}

impl Contact {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            category: category.into(),
            ..Self::default()
        }
    }

    /// `"last, first"`, used wherever contacts are listed.
    pub fn title(&self) -> String {
        format!("{}, {}", self.last_name, self.first_name)
    }
}

impl Record for Contact {
    const KIND: RecordKind = RecordKind::Contact;

    fn uid(&self) -> &str {
        &self.uid
    }

    fn category(&self) -> &str {
        &self.category
    }

    fn display_title(&self) -> Cow<'_, str> {
        Cow::Owned(self.title())
    }
}

stored_in!(Contact, contacts);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_title_is_last_comma_first() {
        let contact = Contact::new("Jane", "Doe", "");
        assert_eq!(contact.title(), "Doe, Jane");
        assert_eq!(contact.display_title(), "Doe, Jane");
    }

    #[test]
    fn new_records_have_empty_uid() {
        assert_eq!(Credential::new("t", "c", "u", "p", "").uid(), "");
        assert_eq!(Note::new("t", "c", "body").uid(), "");
        assert_eq!(Attachment::new("t", "c").uid(), "");
        assert_eq!(Contact::new("a", "b", "c").uid(), "");
    }

    #[test]
    fn kind_parses_aliases() {
        assert_eq!("login".parse::<RecordKind>().unwrap(), RecordKind::Credential);
        assert_eq!("Files".parse::<RecordKind>().unwrap(), RecordKind::Attachment);
        assert_eq!("note".parse::<RecordKind>().unwrap(), RecordKind::Note);
        assert_eq!("contacts".parse::<RecordKind>().unwrap(), RecordKind::Contact);
    }

    #[test]
    fn unknown_kind_is_invalid_lookup() {
        let err = "recipe".parse::<RecordKind>().unwrap_err();
        assert!(matches!(
            err,
            CofferError::InvalidLookup(LookupError::UnknownKind(ref k)) if k == "recipe"
        ));
    }

    #[test]
    fn kind_display_round_trips() {
        for kind in RecordKind::ALL {
            assert_eq!(kind.to_string().parse::<RecordKind>().unwrap(), kind);
        }
    }

    #[test]
    fn generate_secret_refreshes_last_change() {
        let mut login = Credential::new("mail", "", "me", "old", "");
        login.last_change = DateTime::<Utc>::UNIX_EPOCH;

        login.generate_secret(16, "");
        assert_eq!(login.secret.chars().count(), 16);
        assert_ne!(login.secret, "old");
        assert!(login.last_change > DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn attachment_equality_ignores_mapping() {
        let a = Attachment::from_bytes("key", "", vec![1, 2, 3]);
        let mut b = a.clone();
        b.mapped_path = Some(PathBuf::from("/tmp/somewhere"));
        assert_eq!(a, b);
    }

    #[test]
    fn credential_serializes_secret_as_password() {
        let login = Credential::new("t", "", "u", "s3cret", "https://x");
        let json = serde_json::to_value(&login).unwrap();
        assert_eq!(json["password"], "s3cret");
        assert!(json.get("secret").is_none());
    }
}
