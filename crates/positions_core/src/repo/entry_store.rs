//! Authoritative entry collection and its persisted document.
//!
//! # Responsibility
//! - Load the collection at startup, reseeding when absent or when the
//!   document has no `entries` array.
//! - Keep every decodable persisted item; skip and count the rest.
//! - Persist the whole collection after every accepted mutation.
//!
//! # Invariants
//! - Memory and storage agree after every successful call; a failed write
//!   leaves the in-memory collection unchanged.
//! - `append` and `replace_all` refuse input that breaks uniqueness.
//! - There is no update or delete path for a committed entry.

use crate::index::Indices;
use crate::model::entry::{
    check_unique, seed_entries, ConflictError, Entry, EntryCollection, MAX_NUMBER, MIN_NUMBER,
};
use crate::repo::document_repo::{DocumentRepository, RepoError};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage key of the persisted entries document.
pub const STORE_KEY: &str = "positionsTracker.v1";

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
pub enum StoreError {
    Repo(RepoError),
    Conflict(ConflictError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::Conflict(err) => write!(f, "store conflict: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Conflict(err) => Some(err),
        }
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<ConflictError> for StoreError {
    fn from(value: ConflictError) -> Self {
        Self::Conflict(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Repo(RepoError::Serialization(value))
    }
}

/// Reason a persisted document was discarded. Recovered by reseeding and
/// only ever logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    NotJson,
    MissingEntries,
}

impl Display for LoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotJson => write!(f, "persisted document is not JSON"),
            Self::MissingEntries => write!(f, "persisted document has no entries array"),
        }
    }
}

impl Error for LoadError {}

#[derive(Serialize)]
struct PersistedRef<'a> {
    entries: &'a [Entry],
}

/// Decoded persisted document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedEntries {
    pub entries: EntryCollection,
    /// Positions of items that could not be decoded as an [`Entry`].
    pub skipped: Vec<usize>,
}

/// Decodes the persisted `{ "entries": [...] }` shape.
///
/// Items without a valid date or an in-range number are skipped, not fatal.
/// Uniqueness is not checked here; index builds flag any violation.
pub fn decode_persisted(body: &str) -> Result<PersistedEntries, LoadError> {
    let value: Value = serde_json::from_str(body).map_err(|_| LoadError::NotJson)?;
    let items = value
        .get("entries")
        .and_then(Value::as_array)
        .ok_or(LoadError::MissingEntries)?;

    let mut decoded = PersistedEntries {
        entries: Vec::with_capacity(items.len()),
        skipped: Vec::new(),
    };
    for (index, item) in items.iter().enumerate() {
        match Entry::deserialize(item)
            .ok()
            .filter(|entry| (MIN_NUMBER..=MAX_NUMBER).contains(&entry.number))
        {
            Some(entry) => decoded.entries.push(entry),
            None => decoded.skipped.push(index),
        }
    }
    Ok(decoded)
}

/// Entry collection bound to a document repository.
pub struct EntryStore<R: DocumentRepository> {
    repo: R,
    entries: EntryCollection,
    skipped: usize,
}

impl<R: DocumentRepository> EntryStore<R> {
    /// Creates a store and runs [`EntryStore::load`].
    pub fn open(repo: R) -> StoreResult<Self> {
        let mut store = Self {
            repo,
            entries: Vec::new(),
            skipped: 0,
        };
        store.load()?;
        Ok(store)
    }

    /// Re-reads the persisted document, replacing the in-memory collection.
    ///
    /// Absent documents, and documents without an `entries` array, are
    /// replaced by the seed set, which is persisted immediately. Malformed
    /// items inside a valid array are skipped and counted in
    /// [`EntryStore::skipped_items`].
    pub fn load(&mut self) -> StoreResult<&[Entry]> {
        let loaded = match self.repo.read_document(STORE_KEY)? {
            None => {
                info!("event=store_load module=store status=seeded reason=absent");
                None
            }
            Some(body) => match decode_persisted(&body) {
                Ok(decoded) => {
                    if !decoded.skipped.is_empty() {
                        warn!(
                            "event=store_load module=store status=anomaly skipped_items={}",
                            decoded.skipped.len()
                        );
                    }
                    Some(decoded)
                }
                Err(err) => {
                    warn!("event=store_load module=store status=reseeded reason=\"{err}\"");
                    None
                }
            },
        };

        match loaded {
            Some(decoded) => {
                info!(
                    "event=store_load module=store status=ok entries={}",
                    decoded.entries.len()
                );
                self.entries = decoded.entries;
                self.skipped = decoded.skipped.len();
            }
            None => {
                let seed = seed_entries();
                self.persist(&seed)?;
                self.entries = seed;
                self.skipped = 0;
            }
        }
        Ok(&self.entries)
    }

    /// Persists the current collection.
    pub fn save(&self) -> StoreResult<()> {
        self.persist(&self.entries)
    }

    /// Appends one entry and persists.
    ///
    /// # Errors
    /// - `Conflict` when the number or date is already present; nothing is
    ///   written in that case.
    pub fn append(&mut self, entry: Entry) -> StoreResult<()> {
        let indices = Indices::build(&self.entries);
        let conflict = if let Some(date) = indices.date_for(entry.number) {
            Some(ConflictError::DuplicateNumber {
                number: entry.number,
                date,
            })
        } else {
            indices
                .number_for(entry.date)
                .map(|number| ConflictError::DuplicateDate {
                    date: entry.date,
                    number,
                })
        };
        if let Some(conflict) = conflict {
            error!("event=store_append module=store status=conflict kind={}", conflict.kind());
            return Err(conflict.into());
        }

        self.entries.push(entry);
        if let Err(err) = self.save() {
            self.entries.pop();
            return Err(err);
        }
        info!(
            "event=store_append module=store status=ok entries={}",
            self.entries.len()
        );
        Ok(())
    }

    /// Replaces the whole collection and persists. Used by import and reset.
    pub fn replace_all(&mut self, entries: EntryCollection) -> StoreResult<()> {
        if let Err(conflict) = check_unique(&entries) {
            error!("event=store_replace module=store status=conflict kind={}", conflict.kind());
            return Err(conflict.into());
        }
        self.persist(&entries)?;
        info!(
            "event=store_replace module=store status=ok entries={}",
            entries.len()
        );
        self.entries = entries;
        Ok(())
    }

    /// Installs an empty collection.
    pub fn reset(&mut self) -> StoreResult<()> {
        self.replace_all(Vec::new())
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Persisted items dropped by the last [`EntryStore::load`].
    pub fn skipped_items(&self) -> usize {
        self.skipped
    }

    pub fn indices(&self) -> Indices {
        Indices::build(&self.entries)
    }

    fn persist(&self, entries: &[Entry]) -> StoreResult<()> {
        let body = serde_json::to_string(&PersistedRef { entries })?;
        self.repo.write_document(STORE_KEY, &body)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{decode_persisted, LoadError};

    #[test]
    fn decode_accepts_entries_array_and_ignores_extra_fields() {
        let decoded =
            decode_persisted(r#"{"entries":[{"date":"2025-01-01","number":4}],"extra":true}"#)
                .unwrap();
        assert_eq!(decoded.entries.len(), 1);
        assert_eq!(decoded.entries[0].number, 4);
        assert!(decoded.skipped.is_empty());
    }

    #[test]
    fn decode_classifies_corruption() {
        assert_eq!(decode_persisted("not json"), Err(LoadError::NotJson));
        assert_eq!(
            decode_persisted(r#"{"entries":"nope"}"#),
            Err(LoadError::MissingEntries)
        );
    }

    #[test]
    fn decode_skips_malformed_items_and_keeps_the_rest() {
        let decoded = decode_persisted(
            r#"{"entries":[{"date":"2025-01-01","number":0},{"date":"2025-01-02","number":4},{"date":7},{"date":"2025-01-03","number":"5"}]}"#,
        )
        .unwrap();
        assert_eq!(decoded.entries.len(), 1);
        assert_eq!(decoded.entries[0].number, 4);
        assert_eq!(decoded.skipped, vec![0, 2, 3]);
    }
}
