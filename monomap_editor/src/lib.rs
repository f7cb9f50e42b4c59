// Copyright 2026 the MonoMap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! MonoMap Editor: the floor-plan screen.
//!
//! [`MapEditor`] wires the other crates together the way the floor-plan
//! screen uses them:
//!
//! - Pointer events arrive in screen coordinates and are converted through the
//!   host's [`CanvasSurface`](monomap_view2d::CanvasSurface) before anything
//!   else sees them.
//! - A press on a rack starts a drag; moves update the rack live; release or
//!   the pointer leaving the canvas persists the final position exactly once.
//! - Clicking a rack selects it and opens a fresh case panel for it.
//! - Searching updates an overlay that is merged into [`RackView`]s only when
//!   rendering.
//!
//! ```rust
//! use kurbo::{Affine, Point};
//! use monomap_editor::MapEditor;
//! use monomap_layout::CanvasBounds;
//! use monomap_view2d::PointerEvent;
//!
//! let mut editor = MapEditor::new(CanvasBounds::default());
//! let surface = Affine::translate((0.0, 64.0));
//!
//! // Nothing to grab on an empty floor.
//! assert!(!editor.pointer_down(&surface, &PointerEvent::primary_down(Point::new(30.0, 90.0))));
//! assert!(editor.racks_view().is_empty());
//! ```

mod editor;

pub use editor::{DELETE_RACK_PROMPT, MapEditor, RackView};
