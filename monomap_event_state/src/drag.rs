// Copyright 2026 the MonoMap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rack drag state machine: press records the grab offset, moves clamp and
//! write locally, release produces the single position to persist.
//!
//! ## Usage
//!
//! 1) On a pointer press over a rack, call [`RackDrag::press`] with the
//!    pointer's canvas position. Only the primary button starts a drag.
//! 2) On each pointer move, call [`RackDrag::drag_to`]; the rack's clamped
//!    origin is written into the store immediately.
//! 3) On release call [`RackDrag::release`], and when the pointer leaves the
//!    canvas call [`RackDrag::pointer_left`]. Both end the gesture and return
//!    the [`RackMove`] to persist, if the rack still exists.
//! 4) If persisting fails, put the rack back at [`RackMove::start`] with
//!    `RackLayoutStore::restore_origin` so the store matches the backend.
//!
//! ```
//! use monomap_event_state::drag::{DragPhase, RackDrag};
//!
//! let drag = RackDrag::default();
//! assert_eq!(drag.phase(), DragPhase::Idle);
//! assert!(!drag.is_dragging());
//! ```

use kurbo::{Point, Vec2};
use monomap_inventory::{Rack, RackId};
use monomap_layout::RackLayoutStore;
use monomap_view2d::PointerButton;

/// Where a drag gesture stands.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DragPhase {
    /// No gesture in progress.
    #[default]
    Idle,
    /// A rack is being moved.
    Dragging {
        /// The rack under the pointer at press time.
        rack: RackId,
        /// Pointer position minus rack origin at press time.
        offset: Vec2,
        /// Rack origin at press time.
        start: Point,
    },
}

/// The position to persist when a gesture ends.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RackMove {
    /// The moved rack.
    pub rack: RackId,
    /// Its clamped origin after the last processed move.
    pub origin: Point,
    /// Its origin when the gesture started; restore this if persisting fails.
    pub start: Point,
}

/// Tracks one rack drag at a time.
#[derive(Clone, Copy, Debug, Default)]
pub struct RackDrag {
    phase: DragPhase,
}

impl RackDrag {
    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    /// Returns `true` while a gesture is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging { .. })
    }

    /// The rack being dragged, if any.
    #[must_use]
    pub fn dragged_rack(&self) -> Option<RackId> {
        match self.phase {
            DragPhase::Dragging { rack, .. } => Some(rack),
            DragPhase::Idle => None,
        }
    }

    /// Starts dragging `rack` from canvas position `pointer`.
    ///
    /// Records the offset between the pointer and the rack's origin so the
    /// rack keeps its grip point instead of jumping under the cursor. Ignored
    /// for non-primary buttons or while another gesture is in progress;
    /// returns whether a drag started.
    pub fn press(&mut self, rack: &Rack, button: PointerButton, pointer: Point) -> bool {
        if button != PointerButton::Primary || self.is_dragging() {
            return false;
        }
        self.phase = DragPhase::Dragging {
            rack: rack.id,
            offset: pointer - rack.origin(),
            start: rack.origin(),
        };
        true
    }

    /// Moves the dragged rack so its grip point follows `pointer`.
    ///
    /// The candidate origin is clamped to the store's [`CanvasBounds`] before
    /// it is written, so the rack never leaves the canvas, even for one frame.
    /// Returns the written origin, or `None` when idle or the rack is gone.
    ///
    /// [`CanvasBounds`]: monomap_layout::CanvasBounds
    pub fn drag_to(&mut self, store: &mut RackLayoutStore, pointer: Point) -> Option<Point> {
        let DragPhase::Dragging { rack, offset, .. } = self.phase else {
            return None;
        };
        let origin = store.bounds().clamp_origin(pointer - offset);
        store.set_origin_local(rack, origin).then_some(origin)
    }

    /// Ends the gesture on pointer release.
    ///
    /// Reads the rack's current origin from the store, so the result always
    /// reflects the last processed move. Returns `None` if idle or if the rack
    /// was removed mid-drag.
    pub fn release(&mut self, store: &RackLayoutStore) -> Option<RackMove> {
        let DragPhase::Dragging { rack, start, .. } = core::mem::take(&mut self.phase) else {
            return None;
        };
        store.get(rack).map(|r| RackMove {
            rack,
            origin: r.origin(),
            start,
        })
    }

    /// Ends the gesture because the pointer left the canvas.
    ///
    /// Behaves exactly like [`RackDrag::release`] so a gesture can never stay
    /// stuck and its final position is still persisted.
    pub fn pointer_left(&mut self, store: &RackLayoutStore) -> Option<RackMove> {
        self.release(store)
    }
}
