// Copyright 2026 the MonoMap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Case panel behavior against the in-process backend.

use monomap_cases::{CaseExpansionTree, DELETE_CASE_PROMPT, Toggle};
use monomap_inventory::memory::{Call, MemoryInventory, Op, ScriptedConfirm};
use monomap_inventory::{CaseId, ItemQuery, NewRack, RackId};

/// One rack with cases `[1, 2]`; case 1 holds two items.
fn seeded() -> (MemoryInventory, RackId, CaseId, CaseId) {
    let backend = MemoryInventory::new();
    let rack = backend.seed_rack(NewRack::new("棚1")).id;
    let first = backend.seed_case(rack).id;
    let second = backend.seed_case(rack).id;
    backend.seed_item(first, "ドライバー", None);
    backend.seed_item(first, "ペンチ", Some("pliers"));
    (backend, rack, first, second)
}

#[tokio::test]
async fn expanding_twice_fetches_items_once() {
    let (backend, rack, first, _) = seeded();
    let mut tree = CaseExpansionTree::new();
    tree.open_rack(&backend, rack).await.unwrap();
    backend.clear_calls();

    tree.toggle(&backend, first).await.unwrap();
    tree.toggle(&backend, first).await.unwrap();
    tree.toggle(&backend, first).await.unwrap();

    assert!(tree.is_expanded(first));
    assert_eq!(
        backend.calls(),
        vec![Call::ListItems(ItemQuery::in_case(first))]
    );
    assert_eq!(tree.items(first).map(<[_]>::len), Some(2));
}

#[tokio::test]
async fn reopening_a_rack_refetches_everything() {
    let (backend, rack, first, _) = seeded();
    let mut tree = CaseExpansionTree::new();
    tree.open_rack(&backend, rack).await.unwrap();
    tree.toggle(&backend, first).await.unwrap();

    tree.open_rack(&backend, rack).await.unwrap();
    assert_eq!(tree.expanded(), None);
    assert_eq!(tree.items(first), None);

    tree.toggle(&backend, first).await.unwrap();
    assert_eq!(backend.count(Op::ListCases), 2);
    assert_eq!(backend.count(Op::ListItems), 2);
}

#[tokio::test]
async fn accordion_keeps_one_case_open() {
    let (backend, rack, first, second) = seeded();
    let mut tree = CaseExpansionTree::new();
    tree.open_rack(&backend, rack).await.unwrap();

    tree.toggle(&backend, first).await.unwrap();
    tree.toggle(&backend, second).await.unwrap();
    assert_eq!(tree.expanded(), Some(second));

    // Back to the first case: cached, so no third fetch.
    tree.toggle(&backend, first).await.unwrap();
    assert_eq!(tree.expanded(), Some(first));
    assert_eq!(backend.count(Op::ListItems), 2);
}

#[tokio::test]
async fn failed_open_leaves_panel_unchanged() {
    let (backend, rack, first, _) = seeded();
    let mut tree = CaseExpansionTree::new();
    tree.open_rack(&backend, rack).await.unwrap();
    tree.toggle(&backend, first).await.unwrap();

    backend.fail_next(Op::ListCases);
    assert!(tree.open_rack(&backend, rack).await.is_err());

    assert!(!tree.loading());
    assert_eq!(tree.cases().len(), 2);
    assert!(tree.is_expanded(first));
    assert!(tree.items(first).is_some());
}

#[tokio::test]
async fn failed_item_fetch_clears_loading() {
    let (backend, rack, first, _) = seeded();
    let mut tree = CaseExpansionTree::new();
    tree.open_rack(&backend, rack).await.unwrap();

    backend.fail_next(Op::ListItems);
    assert!(tree.toggle(&backend, first).await.is_err());
    assert!(!tree.loading());
    assert!(!tree.is_pending(first));
    assert_eq!(tree.items(first), None);
}

#[tokio::test]
async fn added_case_appears_under_open_rack_only() {
    let (backend, rack, _, _) = seeded();
    let other = backend.seed_rack(NewRack::new("棚2")).id;
    let mut tree = CaseExpansionTree::new();
    tree.open_rack(&backend, rack).await.unwrap();

    let added = tree.add_case(&backend, rack).await.unwrap();
    assert_eq!(tree.cases().last().map(|c| c.id), Some(added.id));
    assert_eq!(added.rack_id, rack);

    tree.add_case(&backend, other).await.unwrap();
    assert_eq!(tree.cases().len(), 3);
    assert_eq!(backend.cases_of(other).len(), 1);
}

#[tokio::test]
async fn declined_case_delete_touches_nothing() {
    let (backend, rack, first, _) = seeded();
    let mut tree = CaseExpansionTree::new();
    tree.open_rack(&backend, rack).await.unwrap();
    let mut confirm = ScriptedConfirm::declining();

    assert!(!tree.delete_case(&backend, &mut confirm, first).await.unwrap());
    assert_eq!(confirm.prompts(), [DELETE_CASE_PROMPT]);
    assert_eq!(backend.count(Op::DeleteCase), 0);
    assert_eq!(tree.cases().len(), 2);
}

#[tokio::test]
async fn deleting_expanded_case_drops_its_cache() {
    let (backend, rack, first, second) = seeded();
    let mut tree = CaseExpansionTree::new();
    tree.open_rack(&backend, rack).await.unwrap();
    tree.toggle(&backend, first).await.unwrap();
    tree.toggle_qr_reveal(first);

    let mut confirm = ScriptedConfirm::accepting();
    assert!(tree.delete_case(&backend, &mut confirm, first).await.unwrap());

    assert_eq!(tree.expanded(), None);
    assert_eq!(tree.qr_revealed(), None);
    assert_eq!(tree.items(first), None);
    assert_eq!(
        tree.cases().iter().map(|c| c.id).collect::<Vec<_>>(),
        vec![second]
    );
    assert!(backend.items_of(first).is_empty());
    assert_eq!(tree.begin_toggle(first), Toggle::Unknown);
}

#[tokio::test]
async fn failed_case_delete_keeps_the_case() {
    let (backend, rack, first, _) = seeded();
    let mut tree = CaseExpansionTree::new();
    tree.open_rack(&backend, rack).await.unwrap();
    backend.fail_next(Op::DeleteCase);

    let mut confirm = ScriptedConfirm::accepting();
    assert!(tree.delete_case(&backend, &mut confirm, first).await.is_err());
    assert_eq!(tree.cases().len(), 2);
}

#[tokio::test]
async fn deleting_an_item_updates_the_cached_list() {
    let (backend, rack, first, _) = seeded();
    let mut tree = CaseExpansionTree::new();
    tree.open_rack(&backend, rack).await.unwrap();
    tree.toggle(&backend, first).await.unwrap();
    let doomed = tree.items(first).unwrap()[0].id;

    tree.delete_item(&backend, first, doomed).await.unwrap();

    let names: Vec<_> = tree
        .items(first)
        .unwrap()
        .iter()
        .map(|i| i.name.as_str())
        .collect();
    assert_eq!(names, ["ペンチ"]);
    assert_eq!(backend.items_of(first).len(), 1);
}

#[tokio::test]
async fn revealed_scan_code_image_is_fetched_on_demand() {
    let (backend, rack, first, _) = seeded();
    let mut tree = CaseExpansionTree::new();
    tree.open_rack(&backend, rack).await.unwrap();

    assert_eq!(tree.qr_image(&backend).await.unwrap(), None);
    assert_eq!(backend.count(Op::CaseQrImage), 0);

    tree.toggle_qr_reveal(first);
    let png = tree.qr_image(&backend).await.unwrap().unwrap();
    assert!(png.starts_with(b"\x89PNG"));
    assert_eq!(backend.calls().last(), Some(&Call::CaseQrImage(first)));
}
