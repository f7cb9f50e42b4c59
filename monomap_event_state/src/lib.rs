// Copyright 2026 the MonoMap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! MonoMap Event State: pointer gestures on the floor plan.
//!
//! [`drag::RackDrag`] turns a press → move… → release sequence on a rack into
//! live, clamped position updates in the [`RackLayoutStore`] plus exactly one
//! position to persist when the gesture ends.
//!
//! The state machine is kept apart from persistence:
//!
//! - Moves fire at pointer frequency. Each one is clamped and written into the
//!   store's in-memory copy synchronously; nothing reaches the backend.
//! - Release (or the pointer leaving the canvas) ends the gesture and yields a
//!   single [`drag::RackMove`] read from the store's current value, which the
//!   caller persists with [`RackLayoutStore::move_rack`].
//!
//! All positions handed to this crate are in canvas space; use
//! `monomap_view2d::to_canvas` to convert pointer events first.
//!
//! ## Drag example
//!
//! ```rust
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! use kurbo::{Point, Vec2};
//! use monomap_event_state::drag::RackDrag;
//! use monomap_inventory::NewRack;
//! use monomap_inventory::memory::MemoryInventory;
//! use monomap_layout::{CanvasBounds, RackLayoutStore};
//! use monomap_view2d::PointerButton;
//!
//! let backend = MemoryInventory::new();
//! let rack = backend.seed_rack(NewRack::new("A"));
//! let mut store = RackLayoutStore::new(CanvasBounds::default());
//! store.load(&backend).await.unwrap();
//! let mut drag = RackDrag::default();
//!
//! // Grab the rack 10 units right of its origin.
//! drag.press(&rack, PointerButton::Primary, rack.origin() + Vec2::new(10.0, 0.0));
//!
//! // Moving far off the canvas pins the rack to the top-left corner.
//! drag.drag_to(&mut store, Point::new(-500.0, -500.0));
//!
//! // Releasing yields the one write to persist.
//! let commit = drag.release(&store).unwrap();
//! assert_eq!(commit.origin, Point::ORIGIN);
//! assert_eq!(commit.start, Point::new(20.0, 20.0));
//! store.move_rack(&backend, commit.rack, commit.origin).await.unwrap();
//! # });
//! ```
//!
//! [`RackLayoutStore`]: monomap_layout::RackLayoutStore
//! [`RackLayoutStore::move_rack`]: monomap_layout::RackLayoutStore::move_rack

pub mod drag;
