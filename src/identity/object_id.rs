//! Per-track object identity.
//!
//! SAPIENT requires the same physical object to carry the same `object_id`
//! across detection reports. Track numbers from the radar are stable for the
//! life of a track, so each track number is mapped to a ULID on first sight
//! and the mapping kept for the process lifetime. There is no eviction: the
//! track source exposes no end-of-track signal to key one on (see DESIGN.md).

use super::ulid;
use parking_lot::Mutex;
use std::collections::HashMap;

#[derive(Default)]
pub struct ObjectIdTable {
    map: Mutex<HashMap<u32, String>>,
}

impl ObjectIdTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Object id for a track, minting one on first use.
    pub fn id_for(&self, track_id: u32) -> String {
        let mut map = self.map.lock();
        map.entry(track_id).or_insert_with(ulid::generate).clone()
    }

    /// Number of tracks seen so far; lets integrators watch growth.
    pub fn len(&self) -> usize {
        self.map.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.lock().is_empty()
    }
}
