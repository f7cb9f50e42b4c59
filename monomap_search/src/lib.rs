// Copyright 2026 the MonoMap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! MonoMap Search: rack search as a highlight overlay.
//!
//! A free-text query is resolved by the backend into the ids of racks holding
//! a matching item. [`SearchHighlight`] keeps that answer as a
//! [`HighlightSet`] which the floor plan renders on top of the rack layout.
//! The overlay never mutates the layout, the selection or a drag in progress.
//!
//! - A blank query clears the overlay locally; the backend is not asked.
//! - While a search is outstanding, the previous overlay stays visible.
//! - Each answer replaces the overlay wholesale.
//! - Answers arriving for a query that has since been superseded (or
//!   cleared) are dropped, so a slow response can never overwrite a newer one.
//!
//! ## Out-of-order answers
//!
//! ```rust
//! use monomap_inventory::{RackHits, RackId};
//! use monomap_search::{SearchHighlight, Submission};
//!
//! let mut search = SearchHighlight::new();
//! let Submission::Pending(slow) = search.submit("dri") else { unreachable!() };
//! let Submission::Pending(fast) = search.submit("drill") else { unreachable!() };
//!
//! assert!(search.resolve(fast, Ok(RackHits { rack_ids: vec![RackId(2)] })));
//! assert!(!search.resolve(slow, Ok(RackHits { rack_ids: vec![RackId(1), RackId(2)] })));
//!
//! assert_eq!(search.highlight().racks(), &[RackId(2)]);
//! assert_eq!(search.result_count(), Some(1));
//! ```

mod bridge;
mod highlight;

pub use bridge::{SearchHighlight, SearchTicket, Submission};
pub use highlight::HighlightSet;
