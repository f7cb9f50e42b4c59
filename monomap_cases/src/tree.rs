// Copyright 2026 the MonoMap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use hashbrown::{HashMap, HashSet};
use monomap_inventory::{
    Case, CaseId, Confirm, Error, Inventory, Item, ItemId, ItemQuery, NewCase, RackId,
};
use tracing::{debug, warn};

/// Prompt shown before a case and its items are deleted.
pub const DELETE_CASE_PROMPT: &str = "このケースとその備品を削除しますか？";

/// Outcome of [`CaseExpansionTree::begin_toggle`].
#[derive(Debug, PartialEq, Eq)]
pub enum Toggle {
    /// The case was expanded and is now collapsed.
    Collapsed,
    /// The case is now expanded; its items are cached or already being fetched.
    Expanded,
    /// The case is now expanded and its items must be fetched; hand the
    /// result to [`CaseExpansionTree::complete_items`].
    Fetch(ItemsTicket),
    /// The case is not listed under the open rack; nothing changed.
    Unknown,
}

/// Identifies one outstanding item fetch.
#[must_use = "the fetch result must be passed to `complete_items`"]
#[derive(Debug, PartialEq, Eq)]
pub struct ItemsTicket {
    session: u64,
    case: CaseId,
}

impl ItemsTicket {
    /// The case whose items are being fetched.
    #[must_use]
    pub fn case(&self) -> CaseId {
        self.case
    }
}

/// The case panel of one rack.
///
/// Each [`CaseExpansionTree::show_cases`] (and so each
/// [`CaseExpansionTree::open_rack`]) starts a new browsing session: the
/// expansion, the item cache and the revealed scan code are reset, and item
/// fetches begun in an earlier session are ignored when they complete.
#[derive(Clone, Debug, Default)]
pub struct CaseExpansionTree {
    rack: Option<RackId>,
    session: u64,
    cases: Vec<Case>,
    expanded: Option<CaseId>,
    items: HashMap<CaseId, Vec<Item>>,
    pending: HashSet<CaseId>,
    qr_revealed: Option<CaseId>,
}

impl CaseExpansionTree {
    /// An empty panel with no rack open.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The open rack.
    #[must_use]
    pub fn rack(&self) -> Option<RackId> {
        self.rack
    }

    /// Cases of the open rack, in backend order.
    #[must_use]
    pub fn cases(&self) -> &[Case] {
        &self.cases
    }

    /// The expanded case, if any.
    #[must_use]
    pub fn expanded(&self) -> Option<CaseId> {
        self.expanded
    }

    /// Returns `true` if `case` is the expanded one.
    #[must_use]
    pub fn is_expanded(&self, case: CaseId) -> bool {
        self.expanded == Some(case)
    }

    /// Cached items of `case`; `None` until they have been loaded.
    #[must_use]
    pub fn items(&self, case: CaseId) -> Option<&[Item]> {
        self.items.get(&case).map(Vec::as_slice)
    }

    /// Returns `true` while any item fetch of this session is outstanding.
    #[must_use]
    pub fn loading(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Returns `true` while the items of `case` are being fetched.
    #[must_use]
    pub fn is_pending(&self, case: CaseId) -> bool {
        self.pending.contains(&case)
    }

    /// Fetches the cases of `rack` and starts a new session with them.
    ///
    /// Always fetches, even if `rack` is already open. On failure the panel
    /// keeps showing what it showed before.
    pub async fn open_rack(&mut self, inventory: &impl Inventory, rack: RackId) -> Result<(), Error> {
        let cases = inventory
            .list_cases(rack)
            .await
            .inspect_err(|err| warn!(%err, %rack, "loading cases failed"))?;
        self.show_cases(rack, cases);
        Ok(())
    }

    /// Starts a new session for `rack` with an already fetched case list.
    pub fn show_cases(&mut self, rack: RackId, cases: Vec<Case>) {
        debug!(%rack, count = cases.len(), "case panel opened");
        self.rack = Some(rack);
        self.session = self.session.wrapping_add(1);
        self.cases = cases;
        self.expanded = None;
        self.items.clear();
        self.pending.clear();
        self.qr_revealed = None;
    }

    /// Expands or collapses `case` without waiting for its items.
    ///
    /// Expanding a case collapses whichever case was expanded before. A fetch
    /// is requested only if the case has no cached items and no fetch for it
    /// is already outstanding.
    pub fn begin_toggle(&mut self, case: CaseId) -> Toggle {
        if self.expanded == Some(case) {
            self.expanded = None;
            return Toggle::Collapsed;
        }
        if !self.cases.iter().any(|c| c.id == case) {
            return Toggle::Unknown;
        }
        self.expanded = Some(case);
        if self.items.contains_key(&case) || !self.pending.insert(case) {
            return Toggle::Expanded;
        }
        Toggle::Fetch(ItemsTicket {
            session: self.session,
            case,
        })
    }

    /// Delivers the result of the fetch identified by `ticket`.
    ///
    /// The first completed fetch for a case fills the cache; results from an
    /// earlier session, for a deleted case, or for an already filled cache are
    /// dropped. Returns whether the cache was filled.
    pub fn complete_items(&mut self, ticket: ItemsTicket, result: Result<Vec<Item>, Error>) -> bool {
        if ticket.session != self.session {
            debug!(case = %ticket.case, "dropping items from a previous rack");
            return false;
        }
        let items = match result {
            Ok(items) => items,
            Err(err) => {
                warn!(%err, case = %ticket.case, "loading items failed");
                self.abandon(ticket);
                return false;
            }
        };
        self.pending.remove(&ticket.case);
        if !self.cases.iter().any(|c| c.id == ticket.case) || self.items.contains_key(&ticket.case) {
            return false;
        }
        debug!(case = %ticket.case, count = items.len(), "items cached");
        self.items.insert(ticket.case, items);
        true
    }

    /// Expands or collapses `case`, fetching its items once if needed.
    pub async fn toggle(&mut self, inventory: &impl Inventory, case: CaseId) -> Result<(), Error> {
        let Toggle::Fetch(ticket) = self.begin_toggle(case) else {
            return Ok(());
        };
        match inventory.list_items(&ItemQuery::in_case(case)).await {
            Ok(items) => {
                self.complete_items(ticket, Ok(items));
                Ok(())
            }
            Err(err) => {
                warn!(%err, %case, "loading items failed");
                self.abandon(ticket);
                Err(err)
            }
        }
    }

    fn abandon(&mut self, ticket: ItemsTicket) {
        if ticket.session == self.session {
            self.pending.remove(&ticket.case);
        }
    }

    /// Creates a case under `rack`.
    ///
    /// The new case is appended to the list if `rack` is the open rack.
    pub async fn add_case(&mut self, inventory: &impl Inventory, rack: RackId) -> Result<Case, Error> {
        let case = inventory
            .create_case(&NewCase { rack_id: rack })
            .await
            .inspect_err(|err| warn!(%err, %rack, "adding case failed"))?;
        debug!(case = %case.id, %rack, "case added");
        if self.rack == Some(rack) {
            self.cases.push(case.clone());
        }
        Ok(case)
    }

    /// Deletes `case` and its items after the user confirms.
    ///
    /// Returns `Ok(false)` without touching anything if the user declines.
    pub async fn delete_case(
        &mut self,
        inventory: &impl Inventory,
        confirm: &mut impl Confirm,
        case: CaseId,
    ) -> Result<bool, Error> {
        if !confirm.confirm(DELETE_CASE_PROMPT) {
            return Ok(false);
        }
        inventory
            .delete_case(case)
            .await
            .inspect_err(|err| warn!(%err, %case, "deleting case failed"))?;
        debug!(%case, "case deleted");
        self.cases.retain(|c| c.id != case);
        self.items.remove(&case);
        self.pending.remove(&case);
        if self.expanded == Some(case) {
            self.expanded = None;
        }
        if self.qr_revealed == Some(case) {
            self.qr_revealed = None;
        }
        Ok(true)
    }

    /// Deletes one item and drops it from its case's cached list.
    pub async fn delete_item(
        &mut self,
        inventory: &impl Inventory,
        case: CaseId,
        item: ItemId,
    ) -> Result<(), Error> {
        inventory
            .delete_item(item)
            .await
            .inspect_err(|err| warn!(%err, %item, "deleting item failed"))?;
        if let Some(items) = self.items.get_mut(&case) {
            items.retain(|i| i.id != item);
        }
        Ok(())
    }

    /// Shows the scan code of `case`, or hides it if it is already shown.
    ///
    /// At most one scan code is shown; showing another hides the previous
    /// one. Independent of expansion. Returns whether `case` is now shown.
    pub fn toggle_qr_reveal(&mut self, case: CaseId) -> bool {
        if self.qr_revealed == Some(case) {
            self.qr_revealed = None;
            false
        } else {
            self.qr_revealed = Some(case);
            true
        }
    }

    /// The case whose scan code is shown.
    #[must_use]
    pub fn qr_revealed(&self) -> Option<CaseId> {
        self.qr_revealed
    }

    /// Fetches the image of the shown scan code, if one is shown.
    pub async fn qr_image(
        &self,
        inventory: &impl Inventory,
    ) -> Result<Option<Vec<u8>>, Error> {
        let Some(case) = self.qr_revealed else {
            return Ok(None);
        };
        inventory.case_qr_image(case).await.map(Some)
    }
}
