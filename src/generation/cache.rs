//! In-memory TTL cache for generation results
//!
//! An explicit component constructed at startup and handed to the gateway,
//! not a process-wide singleton. Entries are immutable once written and
//! keyed by content, so concurrent reads need no extra synchronization.
//! Entries are not persisted; a restart empties the cache.

use std::hash::{DefaultHasher, Hash, Hasher};
use std::time::{Duration, Instant};

use dashmap::DashMap;

/// Default time-to-live: 24 hours
const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

struct CacheEntry {
    content: String,
    inserted_at: Instant,
}

pub struct GenerationCache {
    entries: DashMap<String, CacheEntry>,
    ttl: Duration,
}

impl GenerationCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    pub fn with_default_ttl() -> Self {
        Self::new(DEFAULT_TTL)
    }

    /// Cache key for agenda generation: the exact topic string.
    pub fn agenda_key(topics: &str) -> String {
        format!("agenda:{topics}")
    }

    /// Cache key for summary generation: notes may be long, so a fast
    /// non-cryptographic hash stands in for the content.
    pub fn summary_key(notes: &str) -> String {
        let mut hasher = DefaultHasher::new();
        notes.hash(&mut hasher);
        format!("summary:{}", hasher.finish())
    }

    /// Look up a fresh entry; expired entries are evicted on the way out.
    pub fn get(&self, key: &str) -> Option<String> {
        let expired = match self.entries.get(key) {
            Some(entry) if entry.inserted_at.elapsed() < self.ttl => {
                return Some(entry.content.clone());
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            self.entries.remove(key);
        }
        None
    }

    pub fn insert(&self, key: String, content: String) {
        self.entries.insert(
            key,
            CacheEntry {
                content,
                inserted_at: Instant::now(),
            },
        );
    }
}
