//! Per-photo like/dislike state and the counters shown beside it.
//!
//! Both maps are persisted as JSON blobs under `<namespace>Likes` and
//! `<namespace>Counts`. Writes that fail are logged and dropped; the
//! in-memory state stays authoritative for the session.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::data::{Photo, Reaction, ReactionCounts, Vote};
use super::storage::KeyValueStore;

pub struct ReactionStore {
    store: Box<dyn KeyValueStore>,
    likes_key: String,
    counts_key: String,
    reactions: HashMap<String, Reaction>,
    counts: HashMap<String, ReactionCounts>,
}

impl ReactionStore {
    /// Load reactions and counts for `namespace`. Missing or corrupt blobs
    /// start out empty.
    pub fn new(store: Box<dyn KeyValueStore>, namespace: &str) -> Self {
        let likes_key = format!("{namespace}Likes");
        let counts_key = format!("{namespace}Counts");
        let reactions = load_map(&*store, &likes_key);
        let counts = load_map(&*store, &counts_key);

        Self {
            store,
            likes_key,
            counts_key,
            reactions,
            counts,
        }
    }

    pub fn reaction(&self, photo_id: &str) -> Reaction {
        self.reactions.get(photo_id).copied().unwrap_or_default()
    }

    pub fn counts(&self, photo_id: &str) -> ReactionCounts {
        self.counts.get(photo_id).copied().unwrap_or_default()
    }

    /// Apply a vote and return the resulting reaction.
    ///
    /// Voting the current reaction again clears it. Switching undoes the
    /// previous counter before bumping the new one. Counters floor at 0.
    pub fn toggle(&mut self, photo_id: &str, vote: Vote) -> Reaction {
        let current = self.reaction(photo_id);
        let wanted = Reaction::from(vote);
        let mut counts = self.counts(photo_id);

        let next = if current == wanted {
            let counter = counts.counter_mut(vote);
            *counter = counter.saturating_sub(1);
            Reaction::None
        } else {
            if let Some(previous) = vote_of(current) {
                let counter = counts.counter_mut(previous);
                *counter = counter.saturating_sub(1);
            }
            let counter = counts.counter_mut(vote);
            *counter = counter.saturating_add(1);
            wanted
        };

        tracing::debug!(photo_id, ?current, ?next, "reaction toggled");

        self.reactions.insert(photo_id.to_string(), next);
        self.counts.insert(photo_id.to_string(), counts);
        self.save_reactions();
        self.save_counts();
        next
    }

    /// Give every photo without counts a zeroed entry. Existing entries are
    /// left alone.
    pub fn ensure_counts(&mut self, photos: &[Photo]) {
        for photo in photos {
            self.counts.entry(photo.id.clone()).or_default();
        }
        self.save_counts();
    }

    fn save_reactions(&mut self) {
        persist(&mut *self.store, &self.likes_key, &self.reactions);
    }

    fn save_counts(&mut self) {
        persist(&mut *self.store, &self.counts_key, &self.counts);
    }
}

fn vote_of(reaction: Reaction) -> Option<Vote> {
    match reaction {
        Reaction::None => None,
        Reaction::Liked => Some(Vote::Like),
        Reaction::Disliked => Some(Vote::Dislike),
    }
}

fn load_map<V: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> HashMap<String, V> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return HashMap::new(),
        Err(e) => {
            tracing::warn!(key, error = %e, "reaction storage unreadable, starting empty");
            return HashMap::new();
        }
    };

    // `null` was written by older builds for an empty store
    match serde_json::from_str::<Option<HashMap<String, V>>>(&raw) {
        Ok(map) => map.unwrap_or_default(),
        Err(e) => {
            tracing::warn!(key, error = %e, "corrupt reaction blob, starting empty");
            HashMap::new()
        }
    }
}

fn persist<V: Serialize>(store: &mut dyn KeyValueStore, key: &str, map: &HashMap<String, V>) {
    let json = match serde_json::to_string(map) {
        Ok(json) => json,
        Err(e) => {
            tracing::warn!(key, error = %e, "could not serialize reactions");
            return;
        }
    };
    if let Err(e) = store.set(key, &json) {
        tracing::warn!(key, error = %e, "reaction storage unavailable, change kept in memory only");
    }
}

impl std::fmt::Debug for ReactionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReactionStore")
            .field("likes_key", &self.likes_key)
            .field("counts_key", &self.counts_key)
            .field("reactions", &self.reactions.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{GalleryError, Result};
    use crate::source::generator::Generator;
    use crate::state::storage::MemoryStore;

    fn store() -> (MemoryStore, ReactionStore) {
        let handle = MemoryStore::new();
        let reactions = ReactionStore::new(Box::new(handle.clone()), "chef");
        (handle, reactions)
    }

    #[test]
    fn test_like_twice_restores_state() {
        let (_, mut reactions) = store();
        let before = reactions.counts("g-1000");

        assert_eq!(reactions.toggle("g-1000", Vote::Like), Reaction::Liked);
        assert_eq!(reactions.counts("g-1000").hearts, before.hearts + 1);

        assert_eq!(reactions.toggle("g-1000", Vote::Like), Reaction::None);
        assert_eq!(reactions.reaction("g-1000"), Reaction::None);
        assert_eq!(reactions.counts("g-1000"), before);
    }

    #[test]
    fn test_switching_vote_moves_the_count() {
        let (_, mut reactions) = store();
        reactions.toggle("g-1000", Vote::Like);
        reactions.toggle("g-1000", Vote::Dislike);

        assert_eq!(reactions.reaction("g-1000"), Reaction::Disliked);
        assert_eq!(reactions.counts("g-1000"), ReactionCounts { hearts: 0, dislikes: 1 });
    }

    #[test]
    fn test_counters_never_go_negative() {
        let handle = MemoryStore::new();
        let mut writer = handle.clone();
        // A stored reaction whose counter was never bumped
        writer.set("chefLikes", r#"{"g-1":1,"g-2":-1}"#).unwrap();
        let mut reactions = ReactionStore::new(Box::new(handle), "chef");

        assert_eq!(reactions.toggle("g-1", Vote::Like), Reaction::None);
        assert_eq!(reactions.counts("g-1"), ReactionCounts::default());

        assert_eq!(reactions.toggle("g-2", Vote::Like), Reaction::Liked);
        assert_eq!(reactions.counts("g-2"), ReactionCounts { hearts: 1, dislikes: 0 });

        for _ in 0..5 {
            reactions.toggle("g-3", Vote::Dislike);
        }
        assert_eq!(reactions.counts("g-3").dislikes, 1);
    }

    #[test]
    fn test_counters_saturate_at_max() {
        let handle = MemoryStore::new();
        let mut writer = handle.clone();
        writer
            .set("chefCounts", r#"{"g-1":{"heart":4294967295,"vomit":4294967295}}"#)
            .unwrap();
        let mut reactions = ReactionStore::new(Box::new(handle), "chef");

        assert_eq!(reactions.toggle("g-1", Vote::Like), Reaction::Liked);
        assert_eq!(reactions.counts("g-1").hearts, u32::MAX);

        // Switching undoes the heart and bumps the already-full dislike counter
        assert_eq!(reactions.toggle("g-1", Vote::Dislike), Reaction::Disliked);
        assert_eq!(
            reactions.counts("g-1"),
            ReactionCounts { hearts: u32::MAX - 1, dislikes: u32::MAX }
        );
    }

    #[test]
    fn test_state_survives_reload() {
        let (handle, mut reactions) = store();
        reactions.toggle("g-1000", Vote::Dislike);
        drop(reactions);

        let reloaded = ReactionStore::new(Box::new(handle.clone()), "chef");
        assert_eq!(reloaded.reaction("g-1000"), Reaction::Disliked);
        assert_eq!(reloaded.counts("g-1000").dislikes, 1);

        assert_eq!(handle.get("chefLikes").unwrap().as_deref(), Some(r#"{"g-1000":-1}"#));
    }

    #[test]
    fn test_ensure_counts_keeps_existing_entries() {
        let (handle, mut reactions) = store();
        reactions.toggle("g-1000", Vote::Like);

        let photos = Generator::new(1000).batch(3);
        reactions.ensure_counts(&photos);

        assert_eq!(reactions.counts("g-1000").hearts, 1);
        assert_eq!(reactions.counts("g-1002"), ReactionCounts::default());

        let saved: HashMap<String, ReactionCounts> =
            serde_json::from_str(&handle.get("chefCounts").unwrap().unwrap()).unwrap();
        assert_eq!(saved.len(), 3);
    }

    #[test]
    fn test_corrupt_blob_reads_as_empty() {
        let handle = MemoryStore::new();
        let mut writer = handle.clone();
        writer.set("chefLikes", "{not json").unwrap();
        writer.set("chefCounts", "null").unwrap();

        let reactions = ReactionStore::new(Box::new(handle), "chef");
        assert_eq!(reactions.reaction("anything"), Reaction::None);
        assert_eq!(reactions.counts("anything"), ReactionCounts::default());
    }

    struct UnavailableStore;

    impl KeyValueStore for UnavailableStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(GalleryError::InvalidConfig("storage disabled".into()))
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(GalleryError::InvalidConfig("storage disabled".into()))
        }
    }

    #[test]
    fn test_unavailable_storage_is_sunk() {
        let mut reactions = ReactionStore::new(Box::new(UnavailableStore), "chef");
        assert_eq!(reactions.toggle("g-1000", Vote::Like), Reaction::Liked);
        assert_eq!(reactions.counts("g-1000").hearts, 1);
    }
}
