// Copyright 2026 the MonoMap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! MonoMap Inventory: records and collaborator interfaces for the floor-plan editor.
//!
//! The editor state machines in the other `monomap_*` crates never talk to a
//! network or a dialog directly. Instead they are handed implementations of
//! the small traits defined here:
//!
//! - [`Inventory`]: CRUD for racks, cases and items plus the item search that
//!   resolves a query to rack ids.
//! - [`LabelDetector`]: the AI classifier that suggests an item label from a photo.
//! - [`Confirm`]: the blocking yes/no confirmation used before destructive actions.
//!
//! The records mirror the backend's JSON:
//!
//! - [`Rack`]: a placeable unit with a top-left origin and a size in canvas units.
//! - [`Case`]: a container under one rack, carrying an opaque scan code.
//! - [`Item`]: the smallest unit, under one case, optionally labeled and photographed.
//!
//! ## Minimal example
//!
//! ```rust
//! use monomap_inventory::{NewRack, RackPatch};
//!
//! let request = NewRack::new("Shelf A");
//! assert_eq!((request.x, request.y, request.width, request.height), (20.0, 20.0, 120.0, 80.0));
//!
//! // Position-only patches omit every other field on the wire.
//! let patch = RackPatch::position(0.0, 15.0);
//! assert!(patch.name.is_none() && patch.width.is_none());
//! ```
//!
//! ## Futures
//!
//! Collaborator methods return futures without a `Send` bound: the editor runs
//! on a single cooperative event loop and owns all of its state exclusively.
//!
//! ## Features
//!
//! - `memory`: enables [`memory::MemoryInventory`], an in-process backend with
//!   the same observable behavior as the REST service (id assignment, cascading
//!   deletes, substring search) plus request recording and failure injection.

mod error;
mod model;
mod service;

#[cfg(feature = "memory")]
pub mod memory;

pub use error::Error;
pub use model::{
    Case, CaseId, Detection, ImageUpload, Item, ItemId, ItemQuery, NewCase, NewItem, NewRack, Rack,
    RackHits, RackId, RackPatch,
};
pub use service::{Confirm, Inventory, LabelDetector};

/// Result alias for collaborator calls.
pub type Result<T, E = Error> = core::result::Result<T, E>;
