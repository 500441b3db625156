//! Persisted library of learning sets.
//!
//! All sets live as one JSON array under [`SETS_KEY`]; the selected set's id
//! lives under [`ACTIVE_SET_KEY`]. Every operation reads the full list and,
//! for mutations, writes it back. Storage faults are logged and reported as
//! `None`/`false`, except from [`CollectionStore::find`].

use chrono::Utc;
use memory_core::{LearningSet, Pair, SetUpdate};
use uuid::Uuid;

use crate::db::{Clock, KeyValueStore, StorageError, SystemClock};

/// Storage key holding the serialized list of sets.
pub const SETS_KEY: &str = "advanced-memory-sets";

/// Storage key holding the id of the currently selected set.
pub const ACTIVE_SET_KEY: &str = "advanced-memory-active-set";

/// CRUD and active-set selection over the key-value store.
pub struct CollectionStore {
    storage: Box<dyn KeyValueStore>,
    clock: Box<dyn Clock>,
}

impl CollectionStore {
    pub fn new(storage: Box<dyn KeyValueStore>) -> Self {
        Self::with_clock(storage, Box::new(SystemClock))
    }

    pub fn with_clock(storage: Box<dyn KeyValueStore>, clock: Box<dyn Clock>) -> Self {
        Self { storage, clock }
    }

    /// All sets in stored order. Missing or corrupt data reads as empty.
    pub fn list(&self) -> Vec<LearningSet> {
        match self.load_sets() {
            Ok(sets) => sets,
            Err(e) => {
                tracing::error!("Failed to load sets: {}", e);
                Vec::new()
            }
        }
    }

    /// Store a new set and return it, or `None` if it could not be saved.
    ///
    /// Does not check the pair count; see [`memory_core::SetDraft::validate`].
    pub fn create(&self, name: &str, description: &str, pairs: Vec<Pair>) -> Option<LearningSet> {
        let set = LearningSet {
            id: generate_id(),
            name: name.trim().to_string(),
            description: description.trim().to_string(),
            pairs,
            created_at: self.clock.today(),
            last_played: None,
        };

        let mut sets = self.load_for_write()?;
        sets.push(set.clone());
        if !self.save_sets(&sets) {
            return None;
        }

        tracing::info!("Created set {} ({} pairs)", set.id, set.pairs.len());
        Some(set)
    }

    /// Merge `update` into the set with `id`.
    pub fn update(&self, id: &str, update: SetUpdate) -> Option<LearningSet> {
        let mut sets = self.load_for_write()?;
        let Some(set) = sets.iter_mut().find(|set| set.id == id) else {
            tracing::warn!("Set not found: {}", id);
            return None;
        };

        set.apply(update);
        let updated = set.clone();

        self.save_sets(&sets).then_some(updated)
    }

    /// Remove the set with `id`. Returns whether a set was removed.
    pub fn delete(&self, id: &str) -> bool {
        let Some(mut sets) = self.load_for_write() else {
            return false;
        };
        let before = sets.len();
        sets.retain(|set| set.id != id);

        if sets.len() == before {
            return false;
        }

        self.save_sets(&sets)
    }

    pub fn get_by_id(&self, id: &str) -> Option<LearningSet> {
        self.list().into_iter().find(|set| set.id == id)
    }

    /// Like [`get_by_id`](Self::get_by_id), but a failing store is returned
    /// as an error instead of reading as a missing set.
    pub fn find(&self, id: &str) -> Result<Option<LearningSet>, StorageError> {
        let sets = self.load_or_discard()?;
        Ok(sets.into_iter().find(|set| set.id == id))
    }

    /// Stamp `lastPlayed` with today's date.
    pub fn mark_played(&self, id: &str) -> Option<LearningSet> {
        self.update(
            id,
            SetUpdate {
                last_played: Some(self.clock.today()),
                ..Default::default()
            },
        )
    }

    /// Append a pair to a stored set. Blank input is ignored.
    pub fn add_pair(&self, id: &str, question: &str, answer: &str) -> Option<LearningSet> {
        let pair = Pair::new(question, answer)?;
        let mut pairs = self.get_by_id(id)?.pairs;
        pairs.push(pair);
        self.update(
            id,
            SetUpdate {
                pairs: Some(pairs),
                ..Default::default()
            },
        )
    }

    /// Remove the pair at `index`. An out-of-range index changes nothing.
    pub fn remove_pair(&self, id: &str, index: usize) -> Option<LearningSet> {
        let mut pairs = self.get_by_id(id)?.pairs;
        if index < pairs.len() {
            pairs.remove(index);
        }
        self.update(
            id,
            SetUpdate {
                pairs: Some(pairs),
                ..Default::default()
            },
        )
    }

    pub fn set_active(&self, id: &str) -> bool {
        match self.storage.set(ACTIVE_SET_KEY, id) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("Failed to set active set: {}", e);
                false
            }
        }
    }

    /// The selected set, or `None` if unset or the set no longer exists.
    pub fn get_active(&self) -> Option<LearningSet> {
        let id = match self.storage.get(ACTIVE_SET_KEY) {
            Ok(id) => id?,
            Err(e) => {
                tracing::error!("Failed to load active set: {}", e);
                return None;
            }
        };

        self.get_by_id(&id)
    }

    pub fn clear_active(&self) -> bool {
        match self.storage.remove(ACTIVE_SET_KEY) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("Failed to clear active set: {}", e);
                false
            }
        }
    }

    /// Create the built-in English/German starter set.
    pub fn seed_demo(&self) -> Option<LearningSet> {
        let pairs = [("Hello", "Hallo"), ("Cat", "Katze"), ("Dog", "Hund")]
            .iter()
            .filter_map(|(q, a)| Pair::new(q, a))
            .collect();

        self.create(
            "Demo Englisch Vokabeln",
            "Grundwortschatz zum Testen",
            pairs,
        )
    }

    /// Drop every stored set and the active selection.
    pub fn reset_all(&self) -> bool {
        let result = self
            .storage
            .remove(SETS_KEY)
            .and_then(|_| self.storage.remove(ACTIVE_SET_KEY));

        match result {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("Failed to reset sets: {}", e);
                false
            }
        }
    }

    fn load_sets(&self) -> Result<Vec<LearningSet>, StorageError> {
        match self.storage.get(SETS_KEY)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    /// An unreadable payload reads as empty; store faults are returned.
    fn load_or_discard(&self) -> Result<Vec<LearningSet>, StorageError> {
        match self.load_sets() {
            Err(StorageError::Serialization(e)) => {
                tracing::warn!("Discarding unreadable sets payload: {}", e);
                Ok(Vec::new())
            }
            result => result,
        }
    }

    /// Sets to modify and write back. A failing store aborts the write.
    fn load_for_write(&self) -> Option<Vec<LearningSet>> {
        match self.load_or_discard() {
            Ok(sets) => Some(sets),
            Err(e) => {
                tracing::error!("Failed to load sets: {}", e);
                None
            }
        }
    }

    fn save_sets(&self, sets: &[LearningSet]) -> bool {
        let result = serde_json::to_string(sets)
            .map_err(StorageError::from)
            .and_then(|raw| self.storage.set(SETS_KEY, &raw));

        match result {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("Failed to save sets: {}", e);
                false
            }
        }
    }
}

/// Millisecond timestamp followed by a random suffix.
fn generate_id() -> String {
    let random = Uuid::new_v4().simple().to_string();
    format!("{:x}{}", Utc::now().timestamp_millis(), &random[..10])
}
