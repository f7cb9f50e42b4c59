// Copyright 2026 the MonoMap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Requests and responses of `HttpInventory` against a local mock backend.

use monomap_http::HttpInventory;
use monomap_inventory::{
    CaseId, Detection, Error, ImageUpload, Inventory, ItemQuery, LabelDetector, NewItem, RackId,
    RackPatch,
};
use reqwest::Client;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

async fn backend() -> (MockServer, HttpInventory) {
    let server = MockServer::start().await;
    let inventory = HttpInventory::with_client(Client::new(), &format!("{}/api", server.uri()));
    (server, inventory)
}

fn photo() -> ImageUpload {
    ImageUpload::jpeg("photo.jpg", vec![0xFF, 0xD8, 0xFF, 0xD9])
}

async fn only_request(server: &MockServer) -> Request {
    let mut requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1, "expected exactly one request");
    requests.remove(0)
}

#[tokio::test]
async fn position_patch_sends_only_coordinates() {
    let (server, inventory) = backend().await;
    Mock::given(method("PATCH"))
        .and(path("/api/racks/3"))
        .and(body_json(json!({ "x": 0.0, "y": 15.0 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 3, "name": "棚1", "x": 0.0, "y": 15.0, "width": 120.0, "height": 80.0
        })))
        .expect(1)
        .mount(&server)
        .await;

    let rack = inventory
        .update_rack(RackId(3), &RackPatch::position(0.0, 15.0))
        .await
        .unwrap();

    assert_eq!(rack.id, RackId(3));
    assert_eq!((rack.x, rack.y), (0.0, 15.0));
}

#[tokio::test]
async fn cases_are_listed_by_rack_query() {
    let (server, inventory) = backend().await;
    Mock::given(method("GET"))
        .and(path("/api/cases/"))
        .and(query_param("rack_id", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 5, "rack_id": 2, "qr_code": "monomap:case:5:0badf00d" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let cases = inventory.list_cases(RackId(2)).await.unwrap();

    assert_eq!(cases.len(), 1);
    assert_eq!(cases[0].id, CaseId(5));
    assert_eq!(cases[0].rack_id, RackId(2));
}

#[tokio::test]
async fn items_of_a_case_skip_the_empty_text_filter() {
    let (server, inventory) = backend().await;
    Mock::given(method("GET"))
        .and(path("/api/items/"))
        .and(query_param("case_id", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 9, "name": "cable", "case_id": 5 }
        ])))
        .mount(&server)
        .await;

    let items = inventory
        .list_items(&ItemQuery {
            case_id: Some(CaseId(5)),
            q: Some(String::new()),
        })
        .await
        .unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].ai_label, None);
    let request = only_request(&server).await;
    assert_eq!(request.url.query(), Some("case_id=5"));
}

#[tokio::test]
async fn item_creation_is_multipart_with_every_field() {
    let (server, inventory) = backend().await;
    Mock::given(method("POST"))
        .and(path("/api/items/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 11, "name": "pliers", "case_id": 5,
            "ai_label": "pliers", "image_path": "/uploads/0b.jpg"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let item = inventory
        .create_item(NewItem {
            name: "pliers".into(),
            case_id: CaseId(5),
            ai_label: Some("pliers".into()),
            image: Some(photo()),
        })
        .await
        .unwrap();
    assert_eq!(item.image_path.as_deref(), Some("/uploads/0b.jpg"));

    let request = only_request(&server).await;
    let content_type = request
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(
        content_type.starts_with("multipart/form-data"),
        "unexpected content type {content_type}"
    );
    let body = String::from_utf8_lossy(&request.body);
    for field in [
        r#"name="name""#,
        r#"name="case_id""#,
        r#"name="ai_label""#,
        r#"name="image"; filename="photo.jpg""#,
        "image/jpeg",
    ] {
        assert!(body.contains(field), "multipart body lacks {field}");
    }
}

#[tokio::test]
async fn item_without_label_or_photo_omits_those_parts() {
    let (server, inventory) = backend().await;
    Mock::given(method("POST"))
        .and(path("/api/items/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 12, "name": "tape", "case_id": 5
        })))
        .mount(&server)
        .await;

    inventory
        .create_item(NewItem {
            name: "tape".into(),
            case_id: CaseId(5),
            ai_label: None,
            image: None,
        })
        .await
        .unwrap();

    let request = only_request(&server).await;
    let body = String::from_utf8_lossy(&request.body);
    assert!(body.contains(r#"name="name""#), "name part is always sent");
    assert!(!body.contains(r#"name="ai_label""#), "absent label must not be sent");
    assert!(!body.contains(r#"name="image""#), "absent photo must not be sent");
}

#[tokio::test]
async fn error_status_carries_code_and_body() {
    let (server, inventory) = backend().await;
    Mock::given(method("GET"))
        .and(path("/api/racks/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database is locked"))
        .mount(&server)
        .await;

    let err = inventory.list_racks().await.unwrap_err();

    assert!(
        matches!(&err, Error::Status { status: 500, message } if message == "database is locked"),
        "unexpected error {err:?}"
    );
    assert!(!err.is_not_found());
}

#[tokio::test]
async fn empty_error_body_falls_back_to_reason_phrase() {
    let (server, inventory) = backend().await;
    Mock::given(method("DELETE"))
        .and(path("/api/cases/8"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = inventory.delete_case(CaseId(8)).await.unwrap_err();

    assert!(
        matches!(&err, Error::Status { status: 404, message } if message == "Not Found"),
        "unexpected error {err:?}"
    );
    assert!(err.is_not_found());
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let (server, inventory) = backend().await;
    Mock::given(method("GET"))
        .and(path("/api/items/search-racks"))
        .and(query_param("q", "drill"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let err = inventory.search_racks("drill").await.unwrap_err();

    assert!(matches!(err, Error::Decode(_)), "unexpected error {err:?}");
}

#[tokio::test]
async fn search_returns_rack_ids() {
    let (server, inventory) = backend().await;
    Mock::given(method("GET"))
        .and(path("/api/items/search-racks"))
        .and(query_param("q", "drill"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "rack_ids": [1, 3] })))
        .expect(1)
        .mount(&server)
        .await;

    let hits = inventory.search_racks("drill").await.unwrap();

    assert_eq!(hits.rack_ids, [RackId(1), RackId(3)]);
}

#[tokio::test]
async fn delete_accepts_empty_success() {
    let (server, inventory) = backend().await;
    Mock::given(method("DELETE"))
        .and(path("/api/racks/7"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    inventory.delete_rack(RackId(7)).await.unwrap();
}

#[tokio::test]
async fn detection_suggests_a_label() {
    let (server, inventory) = backend().await;
    Mock::given(method("POST"))
        .and(path("/api/ai/detect"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "label": "screwdriver", "confidence": 0.82 })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let detection = inventory.detect(&photo()).await.unwrap();

    assert_eq!(
        detection,
        Some(Detection {
            label: "screwdriver".into(),
            confidence: 0.82,
        })
    );
    let request = only_request(&server).await;
    let body = String::from_utf8_lossy(&request.body);
    assert!(
        body.contains(r#"name="image"; filename="photo.jpg""#),
        "photo part missing"
    );
}

#[tokio::test]
async fn nothing_detected_is_no_suggestion() {
    let (server, inventory) = backend().await;
    Mock::given(method("POST"))
        .and(path("/api/ai/detect"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({ "detail": "no objects" })))
        .mount(&server)
        .await;

    assert_eq!(inventory.detect(&photo()).await.unwrap(), None);
}

#[tokio::test]
async fn classifier_failure_status_is_no_suggestion() {
    let (server, inventory) = backend().await;
    Mock::given(method("POST"))
        .and(path("/api/ai/detect"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    assert_eq!(inventory.detect(&photo()).await.unwrap(), None);
}
