// Copyright 2026 the MonoMap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! MonoMap View 2D: pointer positions in floor-plan canvas space.
//!
//! Pointer events arrive in screen (client) coordinates, but racks live in
//! the canvas's own coordinate system. The canvas element may be scrolled,
//! offset by the surrounding layout, or zoomed, so the mapping between the two
//! is whatever transform the host currently applies to the canvas.
//!
//! This crate models that mapping as a capability rather than a global:
//! - [`CanvasSurface`] reports the current canvas → screen transform, or
//!   `None` while the surface is not mounted.
//! - [`to_canvas`] inverts it for one pointer position. It keeps no state
//!   between calls.
//! - [`CanvasViewport`] is a ready-made surface for hosts that scroll and zoom
//!   the canvas themselves: on-screen origin, pan, uniform zoom with limits,
//!   zoom about an anchor, and fitting the canvas into a host rectangle.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use monomap_view2d::{CanvasViewport, to_canvas};
//!
//! let mut view = CanvasViewport::new(Size::new(900.0, 600.0));
//! // The host laid the canvas out at (100, 50) on screen and zoomed it 2x.
//! view.set_screen_origin(Some(Point::new(100.0, 50.0)));
//! view.set_zoom(2.0);
//!
//! let canvas_pt = to_canvas(&view, Point::new(140.0, 90.0)).unwrap();
//! assert_eq!(canvas_pt, Point::new(20.0, 20.0));
//! ```
//!
//! ## Design notes
//!
//! - Transforms are axis-aligned with a **uniform** zoom factor; arbitrary
//!   affine surfaces are still supported through [`CanvasSurface`].
//! - Panning is expressed in screen units, zoom as a scalar.
//!
//! This crate is `no_std`.

#![no_std]

mod surface;
mod viewport;

pub use surface::{CanvasSurface, PointerButton, PointerButtons, PointerEvent, to_canvas};
pub use viewport::{CanvasViewport, FitMode};
