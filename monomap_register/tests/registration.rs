// Copyright 2026 the MonoMap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The registration form against the in-process backend and classifier.

use monomap_inventory::memory::{Call, MemoryInventory, Op};
use monomap_inventory::{Detection, ImageUpload, LabelDetector, NewItem, NewRack, RackId};
use monomap_register::Registration;

fn backend_with_rack() -> (MemoryInventory, RackId) {
    let backend = MemoryInventory::new();
    let rack = backend.seed_rack(NewRack::new("棚1")).id;
    backend.seed_case(rack);
    (backend, rack)
}

fn photo() -> ImageUpload {
    ImageUpload::jpeg("photo.jpg", vec![0xFF, 0xD8, 0xFF, 0xD9])
}

fn suggest(backend: &MemoryInventory, label: &str) {
    backend.set_detection(Some(Detection {
        label: label.into(),
        confidence: 0.9,
    }));
}

#[tokio::test]
async fn selecting_a_rack_loads_its_cases_and_clears_case() {
    let (backend, rack) = backend_with_rack();
    let mut form = Registration::new();

    form.select_rack(&backend, rack).await.unwrap();
    let case = form.cases()[0].id;
    assert!(form.select_case(case));

    form.select_rack(&backend, rack).await.unwrap();
    assert_eq!(form.rack(), Some(rack));
    assert_eq!(form.case(), None);
    assert_eq!(backend.count(Op::ListCases), 2);
}

#[tokio::test]
async fn add_case_requires_a_rack_and_selects_the_new_case() {
    let (backend, rack) = backend_with_rack();
    let mut form = Registration::new();

    assert_eq!(form.add_case(&backend).await.unwrap(), None);
    assert_eq!(backend.count(Op::CreateCase), 0);

    form.select_rack(&backend, rack).await.unwrap();
    let added = form.add_case(&backend).await.unwrap();
    assert!(added.is_some());
    assert_eq!(form.case(), added);
    assert_eq!(form.cases().len(), 2);
}

#[tokio::test]
async fn suggestion_fills_empty_name() {
    let (backend, _) = backend_with_rack();
    suggest(&backend, "screwdriver");
    let mut form = Registration::new();

    form.attach_image(&backend, photo()).await;

    assert_eq!(form.ai_label(), Some("screwdriver"));
    assert_eq!(form.name(), "screwdriver");
    assert!(form.image().is_some());
    assert!(!form.detecting());
}

#[tokio::test]
async fn suggestion_never_overwrites_a_typed_name() {
    let (backend, _) = backend_with_rack();
    suggest(&backend, "screwdriver");
    let mut form = Registration::new();
    form.set_name("精密ドライバー");

    form.attach_image(&backend, photo()).await;

    assert_eq!(form.ai_label(), Some("screwdriver"));
    assert_eq!(form.name(), "精密ドライバー");
}

#[tokio::test]
async fn detection_failure_does_not_block_submit() {
    let (backend, rack) = backend_with_rack();
    backend.fail_always(Op::Detect);
    let mut form = Registration::new();
    form.select_rack(&backend, rack).await.unwrap();
    let case = form.cases()[0].id;
    form.select_case(case);

    form.attach_image(&backend, photo()).await;
    assert_eq!(form.ai_label(), None);
    assert!(form.image().is_some());
    assert!(!form.detecting());

    form.set_name("cable");
    let item = form.submit(&backend).await.unwrap().unwrap();
    assert_eq!(item.ai_label, None);
    assert!(item.image_path.is_some());
}

#[tokio::test]
async fn submit_trims_name_and_resets_the_form() {
    let (backend, rack) = backend_with_rack();
    suggest(&backend, "pliers");
    let mut form = Registration::new();
    form.select_rack(&backend, rack).await.unwrap();
    let case = form.cases()[0].id;
    form.select_case(case);
    form.set_name("  ペンチ  ");
    form.attach_image(&backend, photo()).await;
    backend.clear_calls();

    let item = form.submit(&backend).await.unwrap().unwrap();

    assert_eq!(
        backend.calls(),
        vec![Call::CreateItem(NewItem {
            name: "ペンチ".into(),
            case_id: case,
            ai_label: Some("pliers".into()),
            image: Some(photo()),
        })]
    );
    assert_eq!(item.case_id, case);
    assert!(form.saved());
    assert_eq!(form.name(), "");
    assert_eq!(form.ai_label(), None);
    assert!(form.image().is_none());
    // Rack and case stay chosen for the next item.
    assert_eq!(form.case(), Some(case));

    form.set_name("next");
    assert!(!form.saved());
}

#[tokio::test]
async fn dismissed_label_is_not_sent() {
    let (backend, rack) = backend_with_rack();
    suggest(&backend, "pliers");
    let mut form = Registration::new();
    form.select_rack(&backend, rack).await.unwrap();
    let case = form.cases()[0].id;
    form.select_case(case);
    form.attach_image(&backend, photo()).await;

    form.dismiss_label();
    let item = form.submit(&backend).await.unwrap().unwrap();

    assert_eq!(item.name, "pliers");
    assert_eq!(item.ai_label, None);
}

#[tokio::test]
async fn incomplete_form_is_not_submitted() {
    let (backend, rack) = backend_with_rack();
    let mut form = Registration::new();
    form.set_name("cable");

    assert_eq!(form.submit(&backend).await.unwrap(), None);

    form.select_rack(&backend, rack).await.unwrap();
    assert_eq!(form.submit(&backend).await.unwrap(), None);
    assert_eq!(backend.count(Op::CreateItem), 0);
}

#[tokio::test]
async fn failed_submit_keeps_everything() {
    let (backend, rack) = backend_with_rack();
    let mut form = Registration::new();
    form.select_rack(&backend, rack).await.unwrap();
    let case = form.cases()[0].id;
    form.select_case(case);
    form.set_name("cable");
    backend.fail_next(Op::CreateItem);

    assert!(form.submit(&backend).await.is_err());
    assert_eq!(form.name(), "cable");
    assert!(!form.saved());
    assert!(backend.items_of(case).is_empty());
}

#[tokio::test]
async fn split_detection_reports_progress() {
    let (backend, _) = backend_with_rack();
    suggest(&backend, "tape");
    let mut form = Registration::new();

    let ticket = form.begin_detection(photo());
    assert!(form.detecting());
    let answer = backend.detect(form.image().unwrap()).await;
    assert!(form.finish_detection(ticket, answer));

    assert!(!form.detecting());
    assert_eq!(form.ai_label(), Some("tape"));
    assert_eq!(backend.count(Op::Detect), 1);
}
