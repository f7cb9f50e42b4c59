// Copyright 2026 the MonoMap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-process inventory backend.
//!
//! [`MemoryInventory`] answers every [`Inventory`] and [`LabelDetector`] call
//! from local tables, the way the REST service would: ids are assigned
//! sequentially, deletes cascade, the rack search matches item names and
//! labels case-insensitively. It also records every call it receives and can
//! be told to fail specific operations, which is what the editor's tests need
//! to check request counts and payloads.
//!
//! ```rust
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! use monomap_inventory::memory::{MemoryInventory, Op};
//! use monomap_inventory::{Inventory, NewRack};
//!
//! let backend = MemoryInventory::new();
//! let rack = backend.create_rack(&NewRack::new("A")).await.unwrap();
//! assert_eq!(backend.list_racks().await.unwrap(), vec![rack]);
//! assert_eq!(backend.count(Op::CreateRack), 1);
//! # });
//! ```

use core::cell::RefCell;

use crate::{
    Case, CaseId, Confirm, Detection, Error, ImageUpload, Inventory, Item, ItemId, ItemQuery,
    LabelDetector, NewCase, NewItem, NewRack, Rack, RackHits, RackId, RackPatch,
};

/// Kind of a recorded call, for counting and failure injection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Op {
    /// [`Inventory::list_racks`]
    ListRacks,
    /// [`Inventory::create_rack`]
    CreateRack,
    /// [`Inventory::update_rack`]
    UpdateRack,
    /// [`Inventory::delete_rack`]
    DeleteRack,
    /// [`Inventory::list_cases`]
    ListCases,
    /// [`Inventory::create_case`]
    CreateCase,
    /// [`Inventory::delete_case`]
    DeleteCase,
    /// [`Inventory::case_qr_image`]
    CaseQrImage,
    /// [`Inventory::list_items`]
    ListItems,
    /// [`Inventory::create_item`]
    CreateItem,
    /// [`Inventory::delete_item`]
    DeleteItem,
    /// [`Inventory::search_racks`]
    SearchRacks,
    /// [`LabelDetector::detect`]
    Detect,
}

/// A recorded call with its payload.
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    /// List racks.
    ListRacks,
    /// Create a rack.
    CreateRack(NewRack),
    /// Patch a rack.
    UpdateRack(RackId, RackPatch),
    /// Delete a rack.
    DeleteRack(RackId),
    /// List the cases of a rack.
    ListCases(RackId),
    /// Create a case.
    CreateCase(NewCase),
    /// Delete a case.
    DeleteCase(CaseId),
    /// Fetch a scan-code image.
    CaseQrImage(CaseId),
    /// List items.
    ListItems(ItemQuery),
    /// Create an item.
    CreateItem(NewItem),
    /// Delete an item.
    DeleteItem(ItemId),
    /// Search racks by item text.
    SearchRacks(String),
    /// Classify a photo.
    Detect(String),
}

impl Call {
    /// The kind of this call.
    #[must_use]
    pub fn op(&self) -> Op {
        match self {
            Self::ListRacks => Op::ListRacks,
            Self::CreateRack(_) => Op::CreateRack,
            Self::UpdateRack(..) => Op::UpdateRack,
            Self::DeleteRack(_) => Op::DeleteRack,
            Self::ListCases(_) => Op::ListCases,
            Self::CreateCase(_) => Op::CreateCase,
            Self::DeleteCase(_) => Op::DeleteCase,
            Self::CaseQrImage(_) => Op::CaseQrImage,
            Self::ListItems(_) => Op::ListItems,
            Self::CreateItem(_) => Op::CreateItem,
            Self::DeleteItem(_) => Op::DeleteItem,
            Self::SearchRacks(_) => Op::SearchRacks,
            Self::Detect(_) => Op::Detect,
        }
    }
}

#[derive(Debug, Default)]
struct Tables {
    racks: Vec<Rack>,
    cases: Vec<Case>,
    items: Vec<Item>,
    next_id: i64,
    calls: Vec<Call>,
    fail_next: Vec<Op>,
    fail_always: Vec<Op>,
    detection: Option<Detection>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn insert_rack(&mut self, rack: &NewRack) -> Rack {
        let rack = Rack {
            id: RackId(self.next_id()),
            name: rack.name.clone(),
            x: rack.x,
            y: rack.y,
            width: rack.width,
            height: rack.height,
        };
        self.racks.push(rack.clone());
        rack
    }

    fn insert_case(&mut self, rack_id: RackId) -> Result<Case, Error> {
        if !self.racks.iter().any(|r| r.id == rack_id) {
            return Err(not_found(RackId::KIND, rack_id.0));
        }
        let id = self.next_id();
        // Same shape as the service: a fixed prefix, the id and 8 hex chars.
        let token = (id as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15) >> 32;
        let case = Case {
            id: CaseId(id),
            rack_id,
            qr_code: format!("monomap:case:{id}:{token:08x}"),
        };
        self.cases.push(case.clone());
        Ok(case)
    }

    fn insert_item(
        &mut self,
        name: String,
        case_id: CaseId,
        ai_label: Option<String>,
        image: Option<&ImageUpload>,
    ) -> Result<Item, Error> {
        if !self.cases.iter().any(|c| c.id == case_id) {
            return Err(not_found(CaseId::KIND, case_id.0));
        }
        let id = self.next_id();
        let image_path = image.map(|image| {
            let ext = image
                .file_name
                .rsplit_once('.')
                .map(|(_, ext)| ext)
                .unwrap_or("jpg");
            format!("/uploads/{id:032x}.{ext}")
        });
        let item = Item {
            id: ItemId(id),
            name,
            case_id,
            ai_label,
            image_path,
        };
        self.items.push(item.clone());
        Ok(item)
    }

    fn remove_case(&mut self, id: CaseId) {
        self.cases.retain(|c| c.id != id);
        self.items.retain(|i| i.case_id != id);
    }
}

fn not_found(kind: &'static str, id: i64) -> Error {
    Error::NotFound { kind, id }
}

fn matches_text(item: &Item, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    item.name.to_lowercase().contains(&needle)
        || item
            .ai_label
            .as_deref()
            .is_some_and(|label| label.to_lowercase().contains(&needle))
}

/// In-process backend; see the [module docs](self).
#[derive(Debug, Default)]
pub struct MemoryInventory {
    tables: RefCell<Tables>,
}

impl MemoryInventory {
    /// An empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a rack directly, without recording a call.
    pub fn seed_rack(&self, rack: NewRack) -> Rack {
        self.tables.borrow_mut().insert_rack(&rack)
    }

    /// Inserts a case directly, without recording a call.
    ///
    /// # Panics
    ///
    /// Panics if `rack` does not exist.
    pub fn seed_case(&self, rack: RackId) -> Case {
        self.tables
            .borrow_mut()
            .insert_case(rack)
            .expect("seeded case needs an existing rack")
    }

    /// Inserts an item directly, without recording a call.
    ///
    /// # Panics
    ///
    /// Panics if `case` does not exist.
    pub fn seed_item(&self, case: CaseId, name: &str, ai_label: Option<&str>) -> Item {
        self.tables
            .borrow_mut()
            .insert_item(name.to_owned(), case, ai_label.map(str::to_owned), None)
            .expect("seeded item needs an existing case")
    }

    /// Sets what [`LabelDetector::detect`] answers.
    pub fn set_detection(&self, detection: Option<Detection>) {
        self.tables.borrow_mut().detection = detection;
    }

    /// Makes the next call of kind `op` fail with a transport error.
    pub fn fail_next(&self, op: Op) {
        self.tables.borrow_mut().fail_next.push(op);
    }

    /// Makes every call of kind `op` fail until [`MemoryInventory::recover`].
    pub fn fail_always(&self, op: Op) {
        self.tables.borrow_mut().fail_always.push(op);
    }

    /// Stops injecting failures for `op`.
    pub fn recover(&self, op: Op) {
        let mut tables = self.tables.borrow_mut();
        tables.fail_next.retain(|o| *o != op);
        tables.fail_always.retain(|o| *o != op);
    }

    /// Every call received so far, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        self.tables.borrow().calls.clone()
    }

    /// Number of calls of kind `op` received so far.
    #[must_use]
    pub fn count(&self, op: Op) -> usize {
        self.tables
            .borrow()
            .calls
            .iter()
            .filter(|c| c.op() == op)
            .count()
    }

    /// Forgets the recorded calls.
    pub fn clear_calls(&self) {
        self.tables.borrow_mut().calls.clear();
    }

    /// Current racks.
    #[must_use]
    pub fn racks(&self) -> Vec<Rack> {
        self.tables.borrow().racks.clone()
    }

    /// Current cases of `rack`.
    #[must_use]
    pub fn cases_of(&self, rack: RackId) -> Vec<Case> {
        let tables = self.tables.borrow();
        tables
            .cases
            .iter()
            .filter(|c| c.rack_id == rack)
            .cloned()
            .collect()
    }

    /// Current items of `case`.
    #[must_use]
    pub fn items_of(&self, case: CaseId) -> Vec<Item> {
        let tables = self.tables.borrow();
        tables
            .items
            .iter()
            .filter(|i| i.case_id == case)
            .cloned()
            .collect()
    }

    fn record(&self, call: Call) -> Result<(), Error> {
        let mut tables = self.tables.borrow_mut();
        let op = call.op();
        tables.calls.push(call);
        if let Some(pos) = tables.fail_next.iter().position(|o| *o == op) {
            tables.fail_next.remove(pos);
            return Err(Error::Transport(format!("injected failure for {op:?}")));
        }
        if tables.fail_always.contains(&op) {
            return Err(Error::Transport(format!("injected failure for {op:?}")));
        }
        Ok(())
    }
}

impl Inventory for MemoryInventory {
    async fn list_racks(&self) -> Result<Vec<Rack>, Error> {
        self.record(Call::ListRacks)?;
        Ok(self.racks())
    }

    async fn create_rack(&self, rack: &NewRack) -> Result<Rack, Error> {
        self.record(Call::CreateRack(rack.clone()))?;
        Ok(self.tables.borrow_mut().insert_rack(rack))
    }

    async fn update_rack(&self, id: RackId, patch: &RackPatch) -> Result<Rack, Error> {
        self.record(Call::UpdateRack(id, patch.clone()))?;
        let mut tables = self.tables.borrow_mut();
        let rack = tables
            .racks
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| not_found(RackId::KIND, id.0))?;
        if let Some(name) = &patch.name {
            rack.name.clone_from(name);
        }
        rack.x = patch.x.unwrap_or(rack.x);
        rack.y = patch.y.unwrap_or(rack.y);
        rack.width = patch.width.unwrap_or(rack.width);
        rack.height = patch.height.unwrap_or(rack.height);
        Ok(rack.clone())
    }

    async fn delete_rack(&self, id: RackId) -> Result<(), Error> {
        self.record(Call::DeleteRack(id))?;
        let mut tables = self.tables.borrow_mut();
        if !tables.racks.iter().any(|r| r.id == id) {
            return Err(not_found(RackId::KIND, id.0));
        }
        tables.racks.retain(|r| r.id != id);
        let doomed: Vec<CaseId> = tables
            .cases
            .iter()
            .filter(|c| c.rack_id == id)
            .map(|c| c.id)
            .collect();
        for case in doomed {
            tables.remove_case(case);
        }
        Ok(())
    }

    async fn list_cases(&self, rack: RackId) -> Result<Vec<Case>, Error> {
        self.record(Call::ListCases(rack))?;
        Ok(self.cases_of(rack))
    }

    async fn create_case(&self, case: &NewCase) -> Result<Case, Error> {
        self.record(Call::CreateCase(*case))?;
        self.tables.borrow_mut().insert_case(case.rack_id)
    }

    async fn delete_case(&self, id: CaseId) -> Result<(), Error> {
        self.record(Call::DeleteCase(id))?;
        let mut tables = self.tables.borrow_mut();
        if !tables.cases.iter().any(|c| c.id == id) {
            return Err(not_found(CaseId::KIND, id.0));
        }
        tables.remove_case(id);
        Ok(())
    }

    async fn case_qr_image(&self, id: CaseId) -> Result<Vec<u8>, Error> {
        self.record(Call::CaseQrImage(id))?;
        let tables = self.tables.borrow();
        let case = tables
            .cases
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| not_found(CaseId::KIND, id.0))?;
        // A PNG signature followed by the encoded value stands in for the rendering.
        let mut png = b"\x89PNG\r\n\x1a\n".to_vec();
        png.extend_from_slice(case.qr_code.as_bytes());
        Ok(png)
    }

    async fn list_items(&self, query: &ItemQuery) -> Result<Vec<Item>, Error> {
        self.record(Call::ListItems(query.clone()))?;
        let tables = self.tables.borrow();
        Ok(tables
            .items
            .iter()
            .filter(|i| query.case_id.is_none_or(|case| i.case_id == case))
            .filter(|i| {
                query
                    .q
                    .as_deref()
                    .is_none_or(|q| q.is_empty() || matches_text(i, q))
            })
            .cloned()
            .collect())
    }

    async fn create_item(&self, item: NewItem) -> Result<Item, Error> {
        self.record(Call::CreateItem(item.clone()))?;
        let NewItem {
            name,
            case_id,
            ai_label,
            image,
        } = item;
        self.tables
            .borrow_mut()
            .insert_item(name, case_id, ai_label, image.as_ref())
    }

    async fn delete_item(&self, id: ItemId) -> Result<(), Error> {
        self.record(Call::DeleteItem(id))?;
        let mut tables = self.tables.borrow_mut();
        if !tables.items.iter().any(|i| i.id == id) {
            return Err(not_found(ItemId::KIND, id.0));
        }
        tables.items.retain(|i| i.id != id);
        Ok(())
    }

    async fn search_racks(&self, query: &str) -> Result<RackHits, Error> {
        self.record(Call::SearchRacks(query.to_owned()))?;
        let tables = self.tables.borrow();
        let mut rack_ids: Vec<RackId> = Vec::new();
        for item in tables.items.iter().filter(|i| matches_text(i, query)) {
            let Some(case) = tables.cases.iter().find(|c| c.id == item.case_id) else {
                continue;
            };
            if !rack_ids.contains(&case.rack_id) {
                rack_ids.push(case.rack_id);
            }
        }
        Ok(RackHits { rack_ids })
    }
}

impl LabelDetector for MemoryInventory {
    async fn detect(&self, image: &ImageUpload) -> Result<Option<Detection>, Error> {
        self.record(Call::Detect(image.file_name.clone()))?;
        Ok(self.tables.borrow().detection.clone())
    }
}

/// A [`Confirm`] that answers the same way every time and counts how often it was asked.
#[derive(Clone, Debug)]
pub struct ScriptedConfirm {
    answer: bool,
    asked: Vec<String>,
}

impl ScriptedConfirm {
    /// Always answers `yes`.
    #[must_use]
    pub fn accepting() -> Self {
        Self {
            answer: true,
            asked: Vec::new(),
        }
    }

    /// Always answers `no`.
    #[must_use]
    pub fn declining() -> Self {
        Self {
            answer: false,
            asked: Vec::new(),
        }
    }

    /// Prompts shown so far.
    #[must_use]
    pub fn prompts(&self) -> &[String] {
        &self.asked
    }
}

impl Confirm for ScriptedConfirm {
    fn confirm(&mut self, prompt: &str) -> bool {
        self.asked.push(prompt.to_owned());
        self.answer
    }
}
