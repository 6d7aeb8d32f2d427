//! Quiz progress storage
//!
//! All records live in one JSON object under a single namespace key:
//! ```text
//! belajar-seru-progress-v1
//! {
//!   "quiz:2/matematika/bab-1:set-1": { "bestScore": 5, ... },
//!   ...
//! }
//! ```
//! Reads fail open: a missing, unreadable or non-object blob is an empty
//! store, and a malformed entry reads as absent without disturbing its
//! neighbours. Failed writes are logged and otherwise ignored.

use std::collections::BTreeMap;

use chrono::Utc;
use serde_json::Value;

use super::models::{quiz_key, QuizProgress};
use crate::storage::KeyValueStore;

/// Namespace key the progress blob is persisted under
pub const PROGRESS_NAMESPACE: &str = "belajar-seru-progress-v1";

/// Raw blob contents; entries stay untyped so one bad record cannot take
/// the others down with it
type RawMap = BTreeMap<String, Value>;

/// Progress tracking over an injected key-value store
pub struct ProgressStore<S> {
    store: S,
}

impl<S: KeyValueStore> ProgressStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Stored progress for a quiz set, `None` if never attempted
    pub fn get(&self, topic_key: &str, set_id: &str) -> Option<QuizProgress> {
        if topic_key.is_empty() || set_id.is_empty() {
            return None;
        }
        let key = quiz_key(topic_key, set_id);
        let value = self.read_raw().remove(&key)?;
        parse_entry(&key, value)
    }

    /// Record a finished attempt and return the updated entry
    pub fn record(
        &mut self,
        topic_key: &str,
        set_id: &str,
        score: usize,
        total: usize,
    ) -> Option<QuizProgress> {
        if topic_key.is_empty() || set_id.is_empty() {
            return None;
        }

        let mut raw = self.read_raw();
        let key = quiz_key(topic_key, set_id);
        let previous = raw
            .get(&key)
            .cloned()
            .and_then(|value| parse_entry(&key, value));
        let entry = QuizProgress::next_attempt(previous.as_ref(), score, total, Utc::now());

        match serde_json::to_value(&entry) {
            Ok(value) => {
                raw.insert(key.clone(), value);
                self.write_raw(&raw);
            }
            Err(e) => log::warn!("Failed to serialize progress for {}: {}", key, e),
        }

        log::info!(
            "Recorded {} attempt {}: {}/{} (best {})",
            key,
            entry.attempts,
            score,
            total,
            entry.best_score
        );
        Some(entry)
    }

    /// Every readable record keyed by `quiz:<topic>:<set>`, sorted by key
    pub fn all(&self) -> BTreeMap<String, QuizProgress> {
        self.read_raw()
            .into_iter()
            .filter_map(|(key, value)| parse_entry(&key, value).map(|entry| (key, entry)))
            .collect()
    }

    fn read_raw(&self) -> RawMap {
        let raw = match self.store.read(PROGRESS_NAMESPACE) {
            Ok(Some(raw)) => raw,
            Ok(None) => return RawMap::new(),
            Err(e) => {
                log::warn!("Failed to read progress store: {}", e);
                return RawMap::new();
            }
        };

        match serde_json::from_str::<RawMap>(&raw) {
            Ok(map) => map,
            Err(e) => {
                log::warn!("Progress store is corrupt, starting empty: {}", e);
                RawMap::new()
            }
        }
    }

    fn write_raw(&mut self, map: &RawMap) {
        let json = match serde_json::to_string(map) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Failed to serialize progress store: {}", e);
                return;
            }
        };

        if let Err(e) = self.store.write(PROGRESS_NAMESPACE, &json) {
            log::warn!("Failed to write progress store: {}", e);
        }
    }
}

/// Malformed entries are skipped but left in the blob untouched
fn parse_entry(key: &str, value: Value) -> Option<QuizProgress> {
    match serde_json::from_value(value) {
        Ok(entry) => Some(entry),
        Err(e) => {
            log::warn!("Skipping malformed progress entry {}: {}", key, e);
            None
        }
    }
}
