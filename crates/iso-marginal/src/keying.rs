use std::hash::Hasher;

use siphasher::sip::SipHasher13;

use crate::arena::{ConfArena, ConfId};

const EMPTY: usize = usize::MAX;

/// Hashes a configuration by value with SipHash-1-3 under fixed zero keys.
pub fn hash_conf(conf: &[u32]) -> u64 {
    let mut hasher = SipHasher13::new_with_keys(0, 0);
    for &count in conf {
        hasher.write_u32(count);
    }
    hasher.finish()
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    id: ConfId,
    hash: u64,
    next: usize,
}

/// Set of arena-resident configurations, keyed by their counts rather than
/// by their handles.
///
/// Buckets hold the head of a chain threaded through `slots`; the table
/// doubles once it holds as many entries as buckets.
#[derive(Debug, Clone)]
pub struct VisitedSet {
    buckets: Vec<usize>,
    slots: Vec<Slot>,
}

impl VisitedSet {
    /// Creates an empty set sized for roughly `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        let buckets = capacity.max(16).next_power_of_two();
        Self {
            buckets: vec![EMPTY; buckets],
            slots: Vec::with_capacity(capacity),
        }
    }

    /// Number of distinct configurations stored.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns whether a configuration equal to `conf` is present.
    ///
    /// `conf` does not need to live in the arena.
    pub fn contains(&self, arena: &ConfArena, conf: &[u32]) -> bool {
        self.find(arena, conf, hash_conf(conf)).is_some()
    }

    /// Inserts the configuration behind `id`.
    ///
    /// Returns `false` when an equal configuration, under any handle, was
    /// already present.
    pub fn insert(&mut self, arena: &ConfArena, id: ConfId) -> bool {
        let conf = arena.get(id);
        let hash = hash_conf(conf);
        if self.find(arena, conf, hash).is_some() {
            return false;
        }
        if self.slots.len() >= self.buckets.len() {
            self.grow();
        }
        let bucket = self.bucket(hash);
        self.slots.push(Slot {
            id,
            hash,
            next: self.buckets[bucket],
        });
        self.buckets[bucket] = self.slots.len() - 1;
        true
    }

    fn bucket(&self, hash: u64) -> usize {
        (hash as usize) & (self.buckets.len() - 1)
    }

    fn find(&self, arena: &ConfArena, conf: &[u32], hash: u64) -> Option<ConfId> {
        let mut cursor = self.buckets[self.bucket(hash)];
        while cursor != EMPTY {
            let slot = &self.slots[cursor];
            if slot.hash == hash && arena.get(slot.id) == conf {
                return Some(slot.id);
            }
            cursor = slot.next;
        }
        None
    }

    fn grow(&mut self) {
        let size = self.buckets.len() * 2;
        self.buckets = vec![EMPTY; size];
        for (index, slot) in self.slots.iter_mut().enumerate() {
            let bucket = (slot.hash as usize) & (size - 1);
            slot.next = self.buckets[bucket];
            self.buckets[bucket] = index;
        }
    }
}
