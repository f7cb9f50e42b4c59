// Copyright 2026 the MonoMap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use monomap_inventory::RackId;
use smallvec::SmallVec;

/// The racks matching the current search, plus a revision counter.
///
/// Ids are kept in the order the search returned them, without duplicates.
/// The set is only ever replaced wholesale or cleared; there is no incremental
/// merge.
#[derive(Clone, Debug, Default)]
pub struct HighlightSet {
    racks: SmallVec<[RackId; 8]>,
    revision: u64,
}

impl HighlightSet {
    /// An empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if no rack is highlighted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.racks.is_empty()
    }

    /// Number of highlighted racks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.racks.len()
    }

    /// Highlighted racks, in result order.
    #[must_use]
    pub fn racks(&self) -> &[RackId] {
        &self.racks
    }

    /// Iterates the highlighted racks.
    pub fn iter(&self) -> core::slice::Iter<'_, RackId> {
        self.racks.iter()
    }

    /// Returns `true` if `rack` is highlighted.
    #[must_use]
    pub fn contains(&self, rack: RackId) -> bool {
        self.racks.contains(&rack)
    }

    /// Counter bumped whenever the contents change.
    ///
    /// Replacing the set with identical contents leaves it unchanged, so a
    /// renderer can skip repainting the overlay.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replaces the contents with `racks`, ignoring duplicates.
    ///
    /// Returns whether the contents changed.
    pub fn replace_with<I>(&mut self, racks: I) -> bool
    where
        I: IntoIterator<Item = RackId>,
    {
        let mut next: SmallVec<[RackId; 8]> = SmallVec::new();
        for rack in racks {
            if !next.contains(&rack) {
                next.push(rack);
            }
        }
        if next == self.racks {
            return false;
        }
        self.racks = next;
        self.bump_revision();
        true
    }

    /// Empties the set. Returns whether anything was highlighted.
    pub fn clear(&mut self) -> bool {
        if self.racks.is_empty() {
            return false;
        }
        self.racks.clear();
        self.bump_revision();
        true
    }

    fn bump_revision(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

impl<'a> IntoIterator for &'a HighlightSet {
    type Item = &'a RackId;
    type IntoIter = core::slice::Iter<'a, RackId>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
