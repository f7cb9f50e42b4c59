// Copyright 2026 the MonoMap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! MonoMap Cases: browse one rack's cases and the items inside them.
//!
//! [`CaseExpansionTree`] is the panel shown after clicking a rack. It holds
//! the rack's case list, expands at most one case at a time (accordion), and
//! caches each case's items the first time it is expanded. The cache lives as
//! long as the rack stays open; opening a rack always re-fetches its cases and
//! starts with an empty cache.
//!
//! ## Loading items
//!
//! The simple path is [`CaseExpansionTree::toggle`], which expands or
//! collapses and fetches items if needed. Hosts that keep processing events
//! while a fetch is outstanding use the split form instead:
//!
//! ```rust
//! use monomap_cases::{CaseExpansionTree, Toggle};
//! use monomap_inventory::{Case, CaseId, RackId};
//!
//! let mut tree = CaseExpansionTree::new();
//! tree.show_cases(RackId(1), vec![Case { id: CaseId(7), rack_id: RackId(1), qr_code: "c7".into() }]);
//!
//! let Toggle::Fetch(ticket) = tree.begin_toggle(CaseId(7)) else { unreachable!() };
//! assert!(tree.loading());
//!
//! // Re-toggling while the fetch is outstanding never issues a second one.
//! assert_eq!(tree.begin_toggle(CaseId(7)), Toggle::Collapsed);
//! assert_eq!(tree.begin_toggle(CaseId(7)), Toggle::Expanded);
//!
//! assert!(tree.complete_items(ticket, Ok(Vec::new())));
//! assert!(!tree.loading());
//! assert_eq!(tree.items(CaseId(7)), Some(&[][..]));
//! ```
//!
//! ## Failures
//!
//! A failed fetch or mutation leaves the tree as it was (apart from the
//! loading indicator, which always clears) and is returned to the caller.
//! Nothing is retried.

mod tree;

pub use tree::{CaseExpansionTree, DELETE_CASE_PROMPT, ItemsTicket, Toggle};
