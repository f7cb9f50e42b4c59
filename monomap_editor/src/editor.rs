// Copyright 2026 the MonoMap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;
use monomap_cases::CaseExpansionTree;
use monomap_event_state::drag::{RackDrag, RackMove};
use monomap_inventory::{Confirm, Error, Inventory, Rack, RackId};
use monomap_layout::{CanvasBounds, RackLayoutStore};
use monomap_search::SearchHighlight;
use monomap_view2d::{CanvasSurface, PointerButtons, PointerEvent, to_canvas};
use tracing::debug;

/// Prompt shown before a rack and everything in it is deleted.
pub const DELETE_RACK_PROMPT: &str = "この棚とそのケース・備品をすべて削除しますか？";

/// What the canvas draws for one rack.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RackView<'a> {
    /// The rack, at its live position.
    pub rack: &'a Rack,
    /// The rack matched the current search.
    pub highlighted: bool,
    /// The rack is the selected one.
    pub selected: bool,
}

/// The floor-plan editor.
///
/// Owns the rack layout, the drag gesture, the search overlay and the case
/// panel of the selected rack. Each piece only changes through its own
/// operations; the render model merges them without feeding back.
#[derive(Clone, Debug, Default)]
pub struct MapEditor {
    store: RackLayoutStore,
    drag: RackDrag,
    search: SearchHighlight,
    panel: Option<CaseExpansionTree>,
    new_rack_name: String,
}

impl MapEditor {
    /// An empty editor over a canvas of `bounds`.
    #[must_use]
    pub fn new(bounds: CanvasBounds) -> Self {
        Self {
            store: RackLayoutStore::new(bounds),
            ..Self::default()
        }
    }

    /// The rack layout.
    #[must_use]
    pub fn store(&self) -> &RackLayoutStore {
        &self.store
    }

    /// The drag gesture.
    #[must_use]
    pub fn drag(&self) -> &RackDrag {
        &self.drag
    }

    /// The search overlay.
    #[must_use]
    pub fn search(&self) -> &SearchHighlight {
        &self.search
    }

    /// The case panel, open after clicking a rack.
    #[must_use]
    pub fn panel(&self) -> Option<&CaseExpansionTree> {
        self.panel.as_ref()
    }

    /// Mutable access to the case panel, for case and item operations.
    pub fn panel_mut(&mut self) -> Option<&mut CaseExpansionTree> {
        self.panel.as_mut()
    }

    /// Text of the "new rack name" field.
    #[must_use]
    pub fn new_rack_name(&self) -> &str {
        &self.new_rack_name
    }

    /// Replaces the text of the "new rack name" field.
    pub fn set_new_rack_name(&mut self, name: impl Into<String>) {
        self.new_rack_name = name.into();
    }

    /// Loads the racks from the backend.
    pub async fn load(&mut self, inventory: &impl Inventory) -> Result<(), Error> {
        self.store.load(inventory).await
    }

    /// Adds a rack named after the "new rack name" field, or a numbered
    /// default if it is blank. The field is cleared on success.
    pub async fn add_rack(&mut self, inventory: &impl Inventory) -> Result<RackId, Error> {
        let id = self.store.add(inventory, &self.new_rack_name).await?.id;
        self.new_rack_name.clear();
        Ok(id)
    }

    /// Deletes a rack after the user confirms.
    ///
    /// Closes the case panel if it belongs to that rack. Returns `Ok(false)`
    /// if the user declined.
    pub async fn delete_rack(
        &mut self,
        inventory: &impl Inventory,
        confirm: &mut impl Confirm,
        id: RackId,
    ) -> Result<bool, Error> {
        if !confirm.confirm(DELETE_RACK_PROMPT) {
            return Ok(false);
        }
        self.store.remove(inventory, id).await?;
        if self.panel.as_ref().is_some_and(|p| p.rack() == Some(id)) {
            self.panel = None;
        }
        Ok(true)
    }

    /// The topmost rack containing canvas point `point`.
    ///
    /// Racks later in the list are drawn above earlier ones.
    #[must_use]
    pub fn rack_at(&self, point: Point) -> Option<RackId> {
        self.store
            .list()
            .iter()
            .rev()
            .find(|r| r.rect().contains(point))
            .map(|r| r.id)
    }

    /// Handles a pointer press; starts a drag if it lands on a rack.
    ///
    /// Ignored while `surface` is not mounted. Returns whether a drag started.
    pub fn pointer_down(&mut self, surface: &impl CanvasSurface, event: &PointerEvent) -> bool {
        let Some(point) = to_canvas(surface, event.position) else {
            return false;
        };
        let Some(rack) = self.rack_at(point).and_then(|id| self.store.get(id)) else {
            return false;
        };
        self.drag.press(rack, event.button, point)
    }

    /// Handles a pointer move.
    ///
    /// While dragging, the rack follows the pointer within the canvas. A move
    /// that arrives with the primary button no longer held ends the gesture
    /// like a release. Returns the rack's new origin, if it moved.
    pub async fn pointer_move(
        &mut self,
        inventory: &impl Inventory,
        surface: &impl CanvasSurface,
        event: &PointerEvent,
    ) -> Result<Option<Point>, Error> {
        if !self.drag.is_dragging() {
            return Ok(None);
        }
        if !event.buttons.contains(PointerButtons::PRIMARY) {
            debug!("primary button lifted outside the canvas");
            self.pointer_up(inventory).await?;
            return Ok(None);
        }
        let Some(point) = to_canvas(surface, event.position) else {
            return Ok(None);
        };
        Ok(self.drag.drag_to(&mut self.store, point))
    }

    /// Handles a pointer release; persists the dragged rack's position once.
    ///
    /// If the position cannot be saved, the rack goes back to where the
    /// gesture started and the error is returned.
    pub async fn pointer_up(&mut self, inventory: &impl Inventory) -> Result<Option<RackMove>, Error> {
        let done = self.drag.release(&self.store);
        self.persist(inventory, done).await
    }

    /// Handles the pointer leaving the canvas; persists like a release.
    pub async fn pointer_leave(&mut self, inventory: &impl Inventory) -> Result<Option<RackMove>, Error> {
        let done = self.drag.pointer_left(&self.store);
        self.persist(inventory, done).await
    }

    async fn persist(
        &mut self,
        inventory: &impl Inventory,
        done: Option<RackMove>,
    ) -> Result<Option<RackMove>, Error> {
        let Some(done) = done else {
            return Ok(None);
        };
        if let Err(err) = self.store.move_rack(inventory, done.rack, done.origin).await {
            self.store.restore_origin(done.rack, done.start);
            return Err(err);
        }
        Ok(Some(done))
    }

    /// Selects a rack and opens its case panel.
    ///
    /// The panel always starts fresh with the rack's current cases. If they
    /// cannot be loaded, neither the selection nor the panel changes.
    pub async fn click_rack(&mut self, inventory: &impl Inventory, id: RackId) -> Result<bool, Error> {
        if self.store.get(id).is_none() {
            return Ok(false);
        }
        let mut panel = CaseExpansionTree::new();
        panel.open_rack(inventory, id).await?;
        self.store.select(id);
        self.panel = Some(panel);
        Ok(true)
    }

    /// Closes the case panel and clears the selection.
    pub fn close_panel(&mut self) {
        self.panel = None;
        self.store.clear_selection();
    }

    /// Runs a search and replaces the overlay with its result.
    pub async fn search_racks(&mut self, inventory: &impl Inventory, query: &str) -> Result<(), Error> {
        self.search.search(inventory, query).await
    }

    /// Clears the search overlay.
    pub fn clear_search(&mut self) {
        self.search.clear();
    }

    /// The render model, in drawing order.
    #[must_use]
    pub fn racks_view(&self) -> Vec<RackView<'_>> {
        let selected = self.store.selected();
        self.store
            .list()
            .iter()
            .map(|rack| RackView {
                rack,
                highlighted: self.search.is_highlighted(rack.id),
                selected: selected == Some(rack.id),
            })
            .collect()
    }
}
