// Copyright 2026 the MonoMap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! MonoMap Layout: the racks placed on the floor plan.
//!
//! [`RackLayoutStore`] is the single owner of the rack collection shown on the
//! canvas. It loads racks from the [`Inventory`], adds and removes them
//! through it, persists position changes, and tracks which rack is selected.
//!
//! [`CanvasBounds`] defines the geometry rules every rack obeys:
//!
//! - `0 <= x` and `0 <= y`;
//! - `x <= width - min_size` and `y <= height - min_size`;
//! - racks are at least `min_size` wide and high.
//!
//! ## Coupling with the drag controller
//!
//! The store does not re-validate positions. Interactive moves reach it through
//! [`RackLayoutStore::set_origin_local`] only after the drag controller has run
//! them through [`CanvasBounds::clamp_origin`]; that controller is the sole
//! mutator of rack positions.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use monomap_layout::CanvasBounds;
//!
//! let bounds = CanvasBounds::default();
//! assert_eq!(bounds.clamp_origin(Point::new(-50.0, 9000.0)), Point::new(0.0, 560.0));
//! ```
//!
//! [`Inventory`]: monomap_inventory::Inventory

mod bounds;
mod store;

pub use bounds::CanvasBounds;
pub use store::{DEFAULT_NAME_PREFIX, RackLayoutStore};
