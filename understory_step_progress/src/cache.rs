// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dense per-position storage for bound holders.

use alloc::vec::Vec;

/// Identifier of one binding pass (a layout pass, a rebuild, or a restyle).
///
/// A holder bound during a pass is not bound again by the same pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PassId(u64);

impl PassId {
    pub(crate) const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

#[derive(Debug)]
pub(crate) struct Entry<H> {
    pub(crate) holder: H,
    pub(crate) bound_in: Option<PassId>,
}

impl<H> Entry<H> {
    pub(crate) const fn new(holder: H) -> Self {
        Self {
            holder,
            bound_in: None,
        }
    }
}

/// Holders indexed by slot position.
///
/// This is a dense array sized to the slot count of the current sequence, not
/// an LRU: positions are only meaningful for one sequence, so replacing the
/// sequence resets the whole cache.
#[derive(Debug)]
pub struct HolderCache<H> {
    slots: Vec<Option<Entry<H>>>,
}

impl<H> Default for HolderCache<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> HolderCache<H> {
    /// Creates an empty cache with no slots.
    #[must_use]
    pub const fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Number of addressable positions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if the cache has no addressable positions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of positions that currently hold a holder.
    #[must_use]
    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Returns the holder at `position`, if any.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&H> {
        self.slots.get(position)?.as_ref().map(|e| &e.holder)
    }

    /// Returns the holder at `position` mutably, if any.
    pub fn get_mut(&mut self, position: usize) -> Option<&mut H> {
        self.slots.get_mut(position)?.as_mut().map(|e| &mut e.holder)
    }

    /// Stores `holder` at `position`, returning the holder it replaces.
    ///
    /// The new holder counts as unbound. Positions past the end grow the cache.
    pub fn put(&mut self, position: usize, holder: H) -> Option<H> {
        self.slot_mut(position)
            .replace(Entry::new(holder))
            .map(|e| e.holder)
    }

    /// Evicts every holder, keeping the number of positions.
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|s| *s = None);
    }

    /// Evicts every holder and resizes to `len` empty positions.
    pub fn reset(&mut self, len: usize) {
        self.slots.clear();
        self.slots.resize_with(len, || None);
    }

    /// Iterates over occupied positions in order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &H)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|e| (i, &e.holder)))
    }

    pub(crate) fn slot_mut(&mut self, position: usize) -> &mut Option<Entry<H>> {
        if position >= self.slots.len() {
            self.slots.resize_with(position + 1, || None);
        }
        &mut self.slots[position]
    }

    pub(crate) fn entries_mut(&mut self) -> impl Iterator<Item = (usize, &mut Entry<H>)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(i, s)| s.as_mut().map(|e| (i, e)))
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::{HolderCache, PassId};

    #[test]
    fn put_overwrites_and_returns_previous() {
        let mut cache = HolderCache::new();
        cache.reset(3);
        assert_eq!(cache.put(1, 'a'), None);
        assert_eq!(cache.put(1, 'b'), Some('a'));
        assert_eq!(cache.get(1), Some(&'b'));
        assert_eq!(cache.get(0), None);
        assert_eq!(cache.occupied(), 1);
    }

    #[test]
    fn clear_keeps_positions_and_reset_resizes() {
        let mut cache = HolderCache::new();
        cache.reset(5);
        cache.put(0, 0_u32);
        cache.put(4, 4_u32);
        cache.clear();
        assert_eq!(cache.len(), 5);
        assert_eq!(cache.occupied(), 0);

        cache.put(2, 2_u32);
        cache.reset(3);
        assert_eq!(cache.len(), 3);
        assert_eq!(cache.get(2), None);
    }

    #[test]
    fn put_past_end_grows() {
        let mut cache = HolderCache::new();
        cache.put(4, "x");
        assert_eq!(cache.len(), 5);
        let occupied: Vec<_> = cache.iter().collect();
        assert_eq!(occupied, [(4, &"x")]);
    }

    #[test]
    fn replacing_a_holder_forgets_its_binding() {
        let mut cache = HolderCache::new();
        let pass = PassId::default().next();
        cache.put(0, 1_u8);
        if let Some(entry) = cache.slot_mut(0) {
            entry.bound_in = Some(pass);
        }
        cache.put(0, 2_u8);
        assert!(cache.slot_mut(0).as_ref().is_some_and(|e| e.bound_in.is_none()));
    }
}
