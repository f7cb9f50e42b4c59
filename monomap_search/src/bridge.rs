// Copyright 2026 the MonoMap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use monomap_inventory::{Error, Inventory, RackHits, RackId};
use tracing::{debug, warn};

use crate::HighlightSet;

/// Identifies one submitted search.
///
/// Tickets are numbered in submission order; only the most recently issued
/// one can still change the highlight.
#[must_use = "the search result must be passed to `SearchHighlight::resolve`"]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchTicket {
    seq: u64,
    query: String,
}

impl SearchTicket {
    /// The trimmed query to send to the backend.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }
}

/// Outcome of [`SearchHighlight::submit`].
#[derive(Debug, PartialEq, Eq)]
pub enum Submission {
    /// The query was blank; the highlight was cleared locally.
    Cleared,
    /// The query must be resolved by the backend.
    Pending(SearchTicket),
}

/// Turns search queries into the set of highlighted racks.
///
/// The highlight is independent of selection and drag state; the canvas reads
/// it alongside the rack list and merges the two only when rendering.
#[derive(Clone, Debug, Default)]
pub struct SearchHighlight {
    highlight: HighlightSet,
    query: String,
    result_count: Option<usize>,
    issued: u64,
    outstanding: bool,
}

impl SearchHighlight {
    /// No query, nothing highlighted.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current highlight.
    #[must_use]
    pub fn highlight(&self) -> &HighlightSet {
        &self.highlight
    }

    /// Returns `true` if `rack` matched the last resolved search.
    #[must_use]
    pub fn is_highlighted(&self, rack: RackId) -> bool {
        self.highlight.contains(rack)
    }

    /// The last submitted query, trimmed; empty after clearing.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Number of matching racks of the last resolved search; `None` after
    /// clearing or before any search resolved.
    #[must_use]
    pub fn result_count(&self) -> Option<usize> {
        self.result_count
    }

    /// Returns `true` while the latest submission is unresolved.
    #[must_use]
    pub fn searching(&self) -> bool {
        self.outstanding
    }

    /// Starts a search for `query`.
    ///
    /// A blank query clears the highlight without a backend round-trip.
    /// Otherwise the previous highlight stays visible until the returned
    /// ticket is resolved, and every ticket issued earlier goes stale.
    pub fn submit(&mut self, query: &str) -> Submission {
        let query = query.trim();
        if query.is_empty() {
            self.clear();
            return Submission::Cleared;
        }
        self.issued = self.issued.wrapping_add(1);
        self.outstanding = true;
        query.clone_into(&mut self.query);
        debug!(seq = self.issued, query, "search submitted");
        Submission::Pending(SearchTicket {
            seq: self.issued,
            query: self.query.clone(),
        })
    }

    /// Delivers the backend's answer for `ticket`.
    ///
    /// Answers for stale tickets are dropped. A failed search leaves the
    /// highlight and the result count as they were. Returns whether the
    /// answer was applied.
    pub fn resolve(&mut self, ticket: SearchTicket, result: Result<RackHits, Error>) -> bool {
        if ticket.seq != self.issued {
            debug!(seq = ticket.seq, latest = self.issued, "dropping stale search result");
            return false;
        }
        self.outstanding = false;
        match result {
            Ok(hits) => {
                self.highlight.replace_with(hits.rack_ids);
                self.result_count = Some(self.highlight.len());
                debug!(query = ticket.query(), count = self.highlight.len(), "search resolved");
                true
            }
            Err(err) => {
                warn!(%err, query = ticket.query(), "search failed");
                false
            }
        }
    }

    /// Runs a search to completion.
    pub async fn search(&mut self, inventory: &impl Inventory, query: &str) -> Result<(), Error> {
        let Submission::Pending(ticket) = self.submit(query) else {
            return Ok(());
        };
        match inventory.search_racks(ticket.query()).await {
            Ok(hits) => {
                self.resolve(ticket, Ok(hits));
                Ok(())
            }
            Err(err) => {
                warn!(%err, query = ticket.query(), "search failed");
                if ticket.seq == self.issued {
                    self.outstanding = false;
                }
                Err(err)
            }
        }
    }

    /// Clears the query, the highlight and the result count.
    ///
    /// Any outstanding search goes stale.
    pub fn clear(&mut self) {
        self.issued = self.issued.wrapping_add(1);
        self.outstanding = false;
        self.query.clear();
        self.result_count = None;
        self.highlight.clear();
    }
}
