//! Page-local cache of fully loaded characters.
//!
//! Owned by one detail screen instance and dropped with it. Entries are
//! never evicted or expired while the screen lives.

use std::collections::HashMap;

use serde::Serialize;

use crate::types::{Character, Episode};

/// Key under which a character's details are cached, e.g. `character:1`.
pub fn cache_key(id: u32) -> String {
    format!("character:{id}")
}

/// A character together with its episodes, as shown by the detail screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CachedCharacter {
    pub character: Character,
    pub episodes: Vec<Episode>,
}

#[derive(Debug, Default)]
pub struct DetailCache {
    entries: HashMap<String, CachedCharacter>,
}

impl DetailCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&CachedCharacter> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Store an entry; a second write to the same key replaces the first.
    pub fn insert(&mut self, key: String, entry: CachedCharacter) {
        self.entries.insert(key, entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
