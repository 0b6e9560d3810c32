//! The in-memory vault.
//!
//! `Container` owns the decrypted document and is the only place record
//! uids are handed out.  Loading and saving go through a [`VaultCipher`]
//! keyed by [`derive_key`]; uids come from the container's own CSPRNG so
//! tests can make them deterministic.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use rand::rngs::ThreadRng;
use rand::{CryptoRng, RngCore};
use tracing::debug;
use uuid::Builder;
use zeroize::Zeroize;

use super::document::Document;
use super::record::private::Stored;
use super::record::{Attachment, Record, RecordKind};
use crate::crypto::encryption::{AesCbcCts, VaultCipher};
use crate::crypto::kdf::derive_key;
use crate::errors::{CofferError, Result};
use crate::fs::{self, Eraser};

/// Fresh uids drawn before `upsert` gives up.
const MAX_UID_ATTEMPTS: u32 = 16;

/// A password store holding credentials, notes, attachments and contacts.
///
/// Not safe for concurrent mutation; callers sharing one across threads
/// must serialize access themselves.
pub struct Container<C = AesCbcCts, R = ThreadRng> {
    cipher: C,
    rng: R,
    document: Document,
}

impl Container {
    /// An empty container using AES-256-CBC-CTS and the thread-local RNG.
    pub fn new() -> Self {
        Self::with_parts(AesCbcCts, rand::rng())
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: VaultCipher, R: RngCore + CryptoRng> Container<C, R> {
    /// An empty container with an explicit cipher and uid source.
    pub fn with_parts(cipher: C, rng: R) -> Self {
        Self {
            cipher,
            rng,
            document: Document::default(),
        }
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Decrypt `input` and replace the container's contents with it.
    ///
    /// The document is parsed in full before anything is replaced: on
    /// error the container is exactly as it was before the call.  A wrong
    /// password and a damaged file both yield `CorruptedInput`.
    pub fn load(&mut self, password: &str, input: &[u8]) -> Result<()> {
        let key = derive_key(password);
        let mut plaintext = self.cipher.decrypt(&key, input)?;
        let parsed = Document::from_json(&plaintext);
        plaintext.zeroize();

        let document = parsed?;
        debug!(
            logins = document.logins.len(),
            notes = document.notes.len(),
            files = document.files.len(),
            contacts = document.contacts.len(),
            "loaded vault document"
        );

        self.discard_all();
        self.document = document;
        Ok(())
    }

    /// Read a vault file and [`load`](Self::load) it.
    pub fn load_from_file(&mut self, password: &str, path: &Path) -> Result<()> {
        let input = fs::read_file(path)?;
        self.load(password, &input)
    }

    /// Serialize and encrypt the contents.  The container is unchanged.
    pub fn save(&self, password: &str) -> Result<Vec<u8>> {
        let key = derive_key(password);
        let mut plaintext = self.document.to_json()?;
        let ciphertext = self.cipher.encrypt(&key, &plaintext);
        plaintext.zeroize();

        let ciphertext = ciphertext?;
        debug!(bytes = ciphertext.len(), "saved vault document");
        Ok(ciphertext)
    }

    /// [`save`](Self::save) and write the result to `path`, replacing any
    /// existing file.  The write is not atomic.
    pub fn save_to_file(&self, password: &str, path: &Path) -> Result<()> {
        let output = self.save(password)?;
        fs::write_file(path, &output)
    }

    /// Remove every record.  Unsaved changes are lost.
    pub fn clear(&mut self) {
        self.discard_all();
        self.document = Document::default();
    }

    // ------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------

    /// Distinct categories used by records of `kind`.
    pub fn categories(&self, kind: RecordKind) -> BTreeSet<String> {
        fn collect<T: Record>(records: &[T]) -> BTreeSet<String> {
            records.iter().map(|r| r.category().to_string()).collect()
        }

        let doc = &self.document;
        match kind {
            RecordKind::Credential => collect(&doc.logins),
            RecordKind::Note => collect(&doc.notes),
            RecordKind::Attachment => collect(&doc.files),
            RecordKind::Contact => collect(&doc.contacts),
        }
    }

    /// uid → display title for every record of `kind` in exactly
    /// `category`.
    pub fn elements_by_category(&self, kind: RecordKind, category: &str) -> BTreeMap<String, String> {
        fn collect<T: Record>(records: &[T], category: &str) -> BTreeMap<String, String> {
            records
                .iter()
                .filter(|r| r.category() == category)
                .map(|r| (r.uid().to_string(), r.display_title().into_owned()))
                .collect()
        }

        let doc = &self.document;
        match kind {
            RecordKind::Credential => collect(&doc.logins, category),
            RecordKind::Note => collect(&doc.notes, category),
            RecordKind::Attachment => collect(&doc.files, category),
            RecordKind::Contact => collect(&doc.contacts, category),
        }
    }

    /// The record of type `T` with the given uid.
    pub fn get<T: Record>(&self, uid: &str) -> Result<&T> {
        T::collection(&self.document)
            .iter()
            .find(|r| r.uid() == uid)
            .ok_or_else(|| CofferError::unknown_uid(T::KIND, uid))
    }

    /// All records of type `T`, in insertion order.
    pub fn records<T: Record>(&self) -> &[T] {
        T::collection(&self.document)
    }

    /// Number of records of `kind`.
    pub fn count(&self, kind: RecordKind) -> usize {
        let doc = &self.document;
        match kind {
            RecordKind::Credential => doc.logins.len(),
            RecordKind::Note => doc.notes.len(),
            RecordKind::Attachment => doc.files.len(),
            RecordKind::Contact => doc.contacts.len(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    /// Add or replace a record, returning its uid.
    ///
    /// A record with an empty uid is appended under a freshly generated
    /// one, or fails with `UidExhausted` if the random source keeps
    /// repeating.  A record with a non-empty uid replaces the stored record
    /// with that uid; if there is none, the call fails with `InvalidLookup`
    /// and nothing changes.
    pub fn upsert<T: Record>(&mut self, mut record: T) -> Result<String> {
        if record.uid().is_empty() {
            let uid = self.fresh_uid::<T>()?;
            record.set_uid(uid.clone());
            T::collection_mut(&mut self.document).push(record);
            debug!(kind = T::KIND.as_str(), %uid, "added record");
            return Ok(uid);
        }

        let uid = record.uid().to_string();
        let slot = T::collection_mut(&mut self.document)
            .iter_mut()
            .find(|r| r.uid() == uid)
            .ok_or_else(|| CofferError::unknown_uid(T::KIND, &uid))?;

        slot.on_replace(&mut record)?;
        *slot = record;
        debug!(kind = T::KIND.as_str(), %uid, "replaced record");
        Ok(uid)
    }

    /// Mutable access to one attachment, for mapping and unmapping.
    pub fn attachment_mut(&mut self, uid: &str) -> Result<&mut Attachment> {
        self.document
            .files
            .iter_mut()
            .find(|a| a.uid() == uid)
            .ok_or_else(|| CofferError::unknown_uid(RecordKind::Attachment, uid))
    }

    /// Unmap every mapped attachment.  Returns how many were unmapped.
    ///
    /// Stops at the first failure; attachments not yet reached stay
    /// mapped.
    pub fn unmap_all(&mut self, eraser: &mut dyn Eraser) -> Result<usize> {
        let mut count = 0;
        for attachment in self.document.files.iter_mut().filter(|a| a.is_mapped()) {
            attachment.unmap(eraser)?;
            count += 1;
        }
        Ok(count)
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// A random v4 uuid not yet used by any record of type `T`.
    ///
    /// Gives up after `MAX_UID_ATTEMPTS` collisions.
    fn fresh_uid<T: Record>(&mut self) -> Result<String> {
        for _ in 0..MAX_UID_ATTEMPTS {
            let mut bytes = [0u8; 16];
            self.rng.fill_bytes(&mut bytes);
            let uid = Builder::from_random_bytes(bytes).into_uuid().to_string();

            if !T::collection(&self.document).iter().any(|r| r.uid() == uid) {
                return Ok(uid);
            }
            debug!(kind = T::KIND.as_str(), "generated uid collides, retrying");
        }
        Err(CofferError::UidExhausted(MAX_UID_ATTEMPTS))
    }

    fn discard_all(&self) {
        let doc = &self.document;
        doc.logins.iter().for_each(Stored::on_discard);
        doc.notes.iter().for_each(Stored::on_discard);
        doc.files.iter().for_each(Stored::on_discard);
        doc.contacts.iter().for_each(Stored::on_discard);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::{Contact, Credential, Note};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn is_well_formed_uid(uid: &str) -> bool {
        uuid::Uuid::parse_str(uid).is_ok()
    }

    fn seeded() -> Container<AesCbcCts, StdRng> {
        Container::with_parts(AesCbcCts, StdRng::seed_from_u64(42))
    }

    #[test]
    fn empty_container_has_no_categories() {
        let c = Container::new();
        assert!(c.categories(RecordKind::Credential).is_empty());
        assert!(c.elements_by_category(RecordKind::Note, "").is_empty());
    }

    #[test]
    fn upsert_assigns_well_formed_uid() {
        let mut c = seeded();
        let uid = c.upsert(Note::new("todo", "", "milk")).unwrap();
        assert!(is_well_formed_uid(&uid));
        assert_eq!(c.get::<Note>(&uid).unwrap().uid(), uid);
    }

    #[test]
    fn seeded_rng_gives_reproducible_uids() {
        let mut a = seeded();
        let mut b = seeded();
        assert_eq!(
            a.upsert(Note::new("x", "", "")).unwrap(),
            b.upsert(Note::new("x", "", "")).unwrap()
        );
    }

    #[test]
    fn uids_are_per_kind() {
        let mut c = seeded();
        let note_uid = c.upsert(Note::new("n", "", "")).unwrap();
        assert!(c.get::<Credential>(&note_uid).is_err());
        assert!(c.get::<Contact>(&note_uid).is_err());
    }

    #[test]
    fn replace_keeps_position_and_uid() {
        let mut c = seeded();
        let first = c.upsert(Note::new("a", "", "1")).unwrap();
        c.upsert(Note::new("b", "", "2")).unwrap();

        let mut edited = c.get::<Note>(&first).unwrap().clone();
        edited.content = "changed".into();
        assert_eq!(c.upsert(edited).unwrap(), first);

        assert_eq!(c.records::<Note>()[0].content, "changed");
        assert_eq!(c.count(RecordKind::Note), 2);
    }

    #[test]
    fn clear_is_idempotent() {
        let mut c = seeded();
        c.upsert(Contact::new("Jane", "Doe", "")).unwrap();
        c.clear();
        c.clear();
        assert!(c.document().is_empty());
    }

    /// Yields the same bytes forever.
    struct StuckRng;

    impl RngCore for StuckRng {
        fn next_u32(&mut self) -> u32 {
            7
        }

        fn next_u64(&mut self) -> u64 {
            7
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            dst.fill(7);
        }
    }

    impl CryptoRng for StuckRng {}

    #[test]
    fn repeating_rng_fails_instead_of_spinning() {
        let mut c = Container::with_parts(AesCbcCts, StuckRng);
        let first = c.upsert(Note::new("a", "", "")).unwrap();

        let err = c.upsert(Note::new("b", "", "")).unwrap_err();
        assert!(matches!(err, CofferError::UidExhausted(MAX_UID_ATTEMPTS)));
        assert_eq!(c.count(RecordKind::Note), 1);

        // Another kind has its own uid space.
        assert_eq!(c.upsert(Contact::new("Jane", "Doe", "")).unwrap(), first);
    }

    #[test]
    fn attachment_mut_unknown_uid() {
        let mut c = seeded();
        assert!(matches!(
            c.attachment_mut("nope"),
            Err(CofferError::InvalidLookup(_))
        ));
    }
}
