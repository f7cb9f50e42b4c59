// Copyright 2026 the MonoMap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;
use monomap_inventory::{Error, Inventory, NewRack, Rack, RackId, RackPatch};
use tracing::{debug, warn};

use crate::CanvasBounds;

/// Prefix of the positional name given to racks added without one.
pub const DEFAULT_NAME_PREFIX: &str = "棚";

/// The racks on the floor plan, in the order the backend delivered them.
///
/// Every mutation that reaches the backend happens first and is mirrored
/// locally only once it succeeded; a failed call leaves the store unchanged.
#[derive(Clone, Debug, Default)]
pub struct RackLayoutStore {
    racks: Vec<Rack>,
    selected: Option<RackId>,
    bounds: CanvasBounds,
}

impl RackLayoutStore {
    /// An empty store for a canvas of `bounds`.
    #[must_use]
    pub fn new(bounds: CanvasBounds) -> Self {
        Self {
            racks: Vec::new(),
            selected: None,
            bounds,
        }
    }

    /// Canvas geometry rules for this store.
    #[must_use]
    pub fn bounds(&self) -> CanvasBounds {
        self.bounds
    }

    /// Current racks.
    #[must_use]
    pub fn list(&self) -> &[Rack] {
        &self.racks
    }

    /// Looks up one rack.
    #[must_use]
    pub fn get(&self, id: RackId) -> Option<&Rack> {
        self.racks.iter().find(|r| r.id == id)
    }

    /// Number of racks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.racks.len()
    }

    /// Returns `true` if there are no racks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.racks.is_empty()
    }

    /// Replaces the collection with the backend's racks.
    ///
    /// A selection pointing at a rack that no longer exists is cleared.
    pub async fn load(&mut self, inventory: &impl Inventory) -> Result<(), Error> {
        let racks = inventory.list_racks().await.inspect_err(|err| {
            warn!(%err, "loading racks failed");
        })?;
        debug!(count = racks.len(), "racks loaded");
        self.racks = racks;
        if let Some(id) = self.selected
            && self.get(id).is_none()
        {
            self.selected = None;
        }
        Ok(())
    }

    /// Name used when the caller supplies none: the prefix and the next position.
    #[must_use]
    pub fn default_name(&self) -> String {
        format!("{DEFAULT_NAME_PREFIX}{}", self.racks.len() + 1)
    }

    /// Creates a rack at [`NewRack::DEFAULT_FRAME`] and appends it.
    ///
    /// `name` is trimmed; a blank name falls back to [`RackLayoutStore::default_name`].
    pub async fn add(&mut self, inventory: &impl Inventory, name: &str) -> Result<&Rack, Error> {
        let name = match name.trim() {
            "" => self.default_name(),
            trimmed => trimmed.to_owned(),
        };
        let rack = inventory
            .create_rack(&NewRack::new(name))
            .await
            .inspect_err(|err| warn!(%err, "adding rack failed"))?;
        debug!(id = %rack.id, name = %rack.name, "rack added");
        self.racks.push(rack);
        Ok(&self.racks[self.racks.len() - 1])
    }

    /// Writes a new origin into the in-memory copy only.
    ///
    /// Used for live drag feedback; `origin` must already be clamped to
    /// [`CanvasBounds`]. Returns `false` if the rack does not exist.
    pub fn set_origin_local(&mut self, id: RackId, origin: Point) -> bool {
        debug_assert!(
            self.bounds.origin_in_bounds(origin),
            "unclamped origin {origin:?} for rack {id}"
        );
        self.write_origin(id, origin)
    }

    /// Puts a rack back at an origin the backend still holds for it.
    ///
    /// Used after a failed [`RackLayoutStore::move_rack`] to undo the live drag
    /// writes. Returns `false` if the rack does not exist.
    pub fn restore_origin(&mut self, id: RackId, origin: Point) -> bool {
        debug!(%id, x = origin.x, y = origin.y, "rack position restored");
        self.write_origin(id, origin)
    }

    fn write_origin(&mut self, id: RackId, origin: Point) -> bool {
        match self.racks.iter_mut().find(|r| r.id == id) {
            Some(rack) => {
                rack.x = origin.x;
                rack.y = origin.y;
                true
            }
            None => false,
        }
    }

    /// Persists a position change and mirrors it locally.
    ///
    /// Only `x`/`y` are sent and updated; size is untouched. Repeating the same
    /// move reaches the backend again and leaves the same end state.
    pub async fn move_rack(
        &mut self,
        inventory: &impl Inventory,
        id: RackId,
        origin: Point,
    ) -> Result<(), Error> {
        inventory
            .update_rack(id, &RackPatch::position(origin.x, origin.y))
            .await
            .inspect_err(|err| warn!(%err, %id, "saving rack position failed"))?;
        debug!(%id, x = origin.x, y = origin.y, "rack position saved");
        self.write_origin(id, origin);
        Ok(())
    }

    /// Deletes a rack, then drops it locally.
    ///
    /// The backend removes the rack's cases and items along with it. If the
    /// rack was selected, the selection is cleared.
    pub async fn remove(&mut self, inventory: &impl Inventory, id: RackId) -> Result<(), Error> {
        inventory
            .delete_rack(id)
            .await
            .inspect_err(|err| warn!(%err, %id, "deleting rack failed"))?;
        debug!(%id, "rack deleted");
        self.racks.retain(|r| r.id != id);
        if self.selected == Some(id) {
            self.selected = None;
        }
        Ok(())
    }

    /// Selects `id` if it exists; returns whether the selection is now `id`.
    pub fn select(&mut self, id: RackId) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        self.selected = Some(id);
        true
    }

    /// The selected rack id.
    #[must_use]
    pub fn selected(&self) -> Option<RackId> {
        self.selected
    }

    /// The selected rack.
    #[must_use]
    pub fn selected_rack(&self) -> Option<&Rack> {
        self.selected.and_then(|id| self.get(id))
    }

    /// Clears the selection.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }
}
