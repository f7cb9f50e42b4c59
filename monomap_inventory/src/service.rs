// Copyright 2026 the MonoMap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::future::Future;

use crate::{
    Case, CaseId, Detection, Error, ImageUpload, Item, ItemId, ItemQuery, NewCase, NewItem,
    NewRack, Rack, RackHits, RackId, RackPatch,
};

/// The inventory backend.
///
/// Deleting a rack removes its cases and their items; deleting a case removes
/// its items. Implementations are responsible for those cascades, the editor
/// only mirrors them in its local state after the parent deletion succeeded.
pub trait Inventory {
    /// All racks, in the backend's order.
    fn list_racks(&self) -> impl Future<Output = Result<Vec<Rack>, Error>>;

    /// Creates a rack and returns the stored record.
    fn create_rack(&self, rack: &NewRack) -> impl Future<Output = Result<Rack, Error>>;

    /// Applies a partial update and returns the stored record.
    fn update_rack(
        &self,
        id: RackId,
        patch: &RackPatch,
    ) -> impl Future<Output = Result<Rack, Error>>;

    /// Deletes a rack together with its cases and items.
    fn delete_rack(&self, id: RackId) -> impl Future<Output = Result<(), Error>>;

    /// Cases under `rack`.
    fn list_cases(&self, rack: RackId) -> impl Future<Output = Result<Vec<Case>, Error>>;

    /// Creates a case; the backend generates its scan code.
    fn create_case(&self, case: &NewCase) -> impl Future<Output = Result<Case, Error>>;

    /// Deletes a case together with its items.
    fn delete_case(&self, id: CaseId) -> impl Future<Output = Result<(), Error>>;

    /// PNG rendering of the case's scan code.
    fn case_qr_image(&self, id: CaseId) -> impl Future<Output = Result<Vec<u8>, Error>>;

    /// Items matching `query`.
    fn list_items(&self, query: &ItemQuery) -> impl Future<Output = Result<Vec<Item>, Error>>;

    /// Creates an item, uploading its photo if present.
    fn create_item(&self, item: NewItem) -> impl Future<Output = Result<Item, Error>>;

    /// Deletes one item.
    fn delete_item(&self, id: ItemId) -> impl Future<Output = Result<(), Error>>;

    /// Racks holding items whose name or label contains `query`.
    fn search_racks(&self, query: &str) -> impl Future<Output = Result<RackHits, Error>>;
}

/// The photo classifier.
pub trait LabelDetector {
    /// Suggests a label for `image`.
    ///
    /// `Ok(None)` means the classifier ran but has nothing to suggest.
    fn detect(
        &self,
        image: &ImageUpload,
    ) -> impl Future<Output = Result<Option<Detection>, Error>>;
}

/// A blocking yes/no confirmation shown before destructive actions.
pub trait Confirm {
    /// Asks the user; `true` means proceed.
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}
