//! Decoded bitmap cache keyed by image id.
//!
//! The render pass checks here before asking for a decode, and `begin_decode`
//! guards against asking twice for the same id while a decode is in flight.
//! An entry lives exactly as long as its image is in the scene.

#[cfg(test)]
#[path = "cache_test.rs"]
mod cache_test;

use std::collections::{HashMap, HashSet};

use crate::scene::ImageId;

/// Per-id bitmap store with in-flight and failure tracking.
#[derive(Debug)]
pub struct ImageCache<B> {
    decoded: HashMap<ImageId, B>,
    in_flight: HashSet<ImageId>,
    failed: HashSet<ImageId>,
}

impl<B> Default for ImageCache<B> {
    fn default() -> Self {
        Self { decoded: HashMap::new(), in_flight: HashSet::new(), failed: HashSet::new() }
    }
}

impl<B: Clone> ImageCache<B> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, id: &ImageId) -> Option<&B> {
        self.decoded.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &ImageId) -> bool {
        self.decoded.contains_key(id)
    }

    /// Store a decoded bitmap. The first bitmap stored for an id wins.
    ///
    /// Returns `false` if the id already had one.
    pub fn put(&mut self, id: ImageId, bitmap: B) -> bool {
        self.in_flight.remove(&id);
        self.failed.remove(&id);
        if self.decoded.contains_key(&id) {
            return false;
        }
        self.decoded.insert(id, bitmap);
        true
    }

    /// Drop everything known about `id`.
    pub fn evict(&mut self, id: &ImageId) -> Option<B> {
        self.in_flight.remove(id);
        self.failed.remove(id);
        self.decoded.remove(id)
    }

    /// Mark a decode as started.
    ///
    /// Returns `false` when the id is already decoded, already in flight, or
    /// has failed before, in which case no new request should be issued.
    pub fn begin_decode(&mut self, id: ImageId) -> bool {
        if self.decoded.contains_key(&id) || self.failed.contains(&id) {
            return false;
        }
        self.in_flight.insert(id)
    }

    /// Record a failed decode so later passes stop retrying it.
    pub fn fail(&mut self, id: ImageId) {
        self.in_flight.remove(&id);
        self.failed.insert(id);
    }

    #[must_use]
    pub fn is_in_flight(&self, id: &ImageId) -> bool {
        self.in_flight.contains(id)
    }

    #[must_use]
    pub fn has_failed(&self, id: &ImageId) -> bool {
        self.failed.contains(id)
    }

    /// Number of decodes still outstanding.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.in_flight.len()
    }

    /// Reuse `from`'s bitmap for `to`, as a duplicate shares its source.
    pub fn share(&mut self, from: &ImageId, to: ImageId) -> bool {
        match self.decoded.get(from).cloned() {
            Some(bitmap) => self.put(to, bitmap),
            None => false,
        }
    }

    /// Number of decoded entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.decoded.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.decoded.is_empty()
    }
}
