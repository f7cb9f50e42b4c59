// Copyright 2026 the MonoMap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! MonoMap HTTP: the REST implementation of the inventory collaborators.
//!
//! [`HttpInventory`] implements [`Inventory`] and [`LabelDetector`] against
//! the backend's `/api` routes:
//!
//! | Call | Request |
//! |---|---|
//! | racks | `GET/POST /racks/`, `PATCH/DELETE /racks/{id}` |
//! | cases | `GET /cases/?rack_id=`, `POST /cases/`, `DELETE /cases/{id}`, `GET /cases/{id}/qr-image` |
//! | items | `GET /items/?case_id=&q=`, `POST /items/` (multipart), `DELETE /items/{id}` |
//! | search | `GET /items/search-racks?q=` |
//! | classifier | `POST /ai/detect` (multipart) |
//!
//! A non-success answer from `/ai/detect` is not an error: the classifier
//! reports "nothing detected" with `422`, so every non-success status maps to
//! `Ok(None)`.
//!
//! ## Configuration
//!
//! ```rust
//! use monomap_http::{ApiConfig, HttpInventory};
//!
//! let config = ApiConfig {
//!     base_url: "http://192.168.1.20:8000/api".into(),
//!     ..ApiConfig::default()
//! };
//! let inventory = HttpInventory::new(&config).unwrap();
//! assert_eq!(
//!     inventory.qr_image_url(monomap_inventory::CaseId(3)),
//!     "http://192.168.1.20:8000/api/cases/3/qr-image"
//! );
//! ```

use std::time::Duration;

use monomap_inventory::{
    Case, CaseId, Detection, Error, ImageUpload, Inventory, Item, ItemId, ItemQuery,
    LabelDetector, NewCase, NewItem, NewRack, Rack, RackHits, RackId, RackPatch,
};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Where the backend lives and how long to wait for it.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL including the `/api` prefix, without a trailing slash.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000/api".to_owned(),
            timeout_secs: 30,
        }
    }
}

/// REST client for the inventory backend.
#[derive(Clone, Debug)]
pub struct HttpInventory {
    client: Client,
    base_url: String,
}

impl HttpInventory {
    /// Builds a client for `config`.
    pub fn new(config: &ApiConfig) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Transport(e.to_string()))?;
        Ok(Self::with_client(client, &config.base_url))
    }

    /// Uses an existing `reqwest` client.
    #[must_use]
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// URL of a case's scan-code image, for hosts that let the renderer fetch it.
    #[must_use]
    pub fn qr_image_url(&self, id: CaseId) -> String {
        self.url(&format!("/cases/{id}/qr-image"))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

async fn send(request: RequestBuilder) -> Result<Response, Error> {
    let response = request
        .send()
        .await
        .map_err(|e| Error::Transport(e.to_string()))?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = match response.text().await {
        Ok(body) if !body.is_empty() => body,
        _ => status.canonical_reason().unwrap_or_default().to_owned(),
    };
    Err(Error::Status {
        status: status.as_u16(),
        message,
    })
}

async fn fetch_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, Error> {
    send(request)
        .await?
        .json()
        .await
        .map_err(|e| Error::Decode(e.to_string()))
}

fn image_part(image: ImageUpload) -> Result<Part, Error> {
    Part::bytes(image.bytes)
        .file_name(image.file_name)
        .mime_str(&image.content_type)
        .map_err(|e| Error::Transport(e.to_string()))
}

fn item_query_pairs(query: &ItemQuery) -> Vec<(&'static str, String)> {
    let mut pairs = Vec::new();
    if let Some(case_id) = query.case_id {
        pairs.push(("case_id", case_id.to_string()));
    }
    if let Some(q) = query.q.as_deref().filter(|q| !q.is_empty()) {
        pairs.push(("q", q.to_owned()));
    }
    pairs
}

impl Inventory for HttpInventory {
    async fn list_racks(&self) -> Result<Vec<Rack>, Error> {
        let url = self.url("/racks/");
        debug!(%url, "listing racks");
        fetch_json(self.client.get(url)).await
    }

    async fn create_rack(&self, rack: &NewRack) -> Result<Rack, Error> {
        let url = self.url("/racks/");
        debug!(%url, name = %rack.name, "creating rack");
        fetch_json(self.client.post(url).json(rack)).await
    }

    async fn update_rack(&self, id: RackId, patch: &RackPatch) -> Result<Rack, Error> {
        let url = self.url(&format!("/racks/{id}"));
        debug!(%url, ?patch, "updating rack");
        fetch_json(self.client.patch(url).json(patch)).await
    }

    async fn delete_rack(&self, id: RackId) -> Result<(), Error> {
        let url = self.url(&format!("/racks/{id}"));
        debug!(%url, "deleting rack");
        send(self.client.delete(url)).await.map(drop)
    }

    async fn list_cases(&self, rack: RackId) -> Result<Vec<Case>, Error> {
        let url = self.url("/cases/");
        debug!(%url, %rack, "listing cases");
        fetch_json(self.client.get(url).query(&[("rack_id", rack.0)])).await
    }

    async fn create_case(&self, case: &NewCase) -> Result<Case, Error> {
        let url = self.url("/cases/");
        debug!(%url, rack = %case.rack_id, "creating case");
        fetch_json(self.client.post(url).json(case)).await
    }

    async fn delete_case(&self, id: CaseId) -> Result<(), Error> {
        let url = self.url(&format!("/cases/{id}"));
        debug!(%url, "deleting case");
        send(self.client.delete(url)).await.map(drop)
    }

    async fn case_qr_image(&self, id: CaseId) -> Result<Vec<u8>, Error> {
        let url = self.qr_image_url(id);
        debug!(%url, "fetching scan code image");
        let bytes = send(self.client.get(url))
            .await?
            .bytes()
            .await
            .map_err(|e| Error::Decode(e.to_string()))?;
        Ok(bytes.to_vec())
    }

    async fn list_items(&self, query: &ItemQuery) -> Result<Vec<Item>, Error> {
        let url = self.url("/items/");
        debug!(%url, ?query, "listing items");
        fetch_json(self.client.get(url).query(&item_query_pairs(query))).await
    }

    async fn create_item(&self, item: NewItem) -> Result<Item, Error> {
        let url = self.url("/items/");
        debug!(%url, name = %item.name, case = %item.case_id, "creating item");
        let mut form = Form::new()
            .text("name", item.name)
            .text("case_id", item.case_id.to_string());
        if let Some(label) = item.ai_label {
            form = form.text("ai_label", label);
        }
        if let Some(image) = item.image {
            form = form.part("image", image_part(image)?);
        }
        fetch_json(self.client.post(url).multipart(form)).await
    }

    async fn delete_item(&self, id: ItemId) -> Result<(), Error> {
        let url = self.url(&format!("/items/{id}"));
        debug!(%url, "deleting item");
        send(self.client.delete(url)).await.map(drop)
    }

    async fn search_racks(&self, query: &str) -> Result<RackHits, Error> {
        let url = self.url("/items/search-racks");
        debug!(%url, query, "searching racks");
        fetch_json(self.client.get(url).query(&[("q", query)])).await
    }
}

impl LabelDetector for HttpInventory {
    async fn detect(&self, image: &ImageUpload) -> Result<Option<Detection>, Error> {
        let url = self.url("/ai/detect");
        debug!(%url, file = %image.file_name, "classifying photo");
        let form = Form::new().part("image", image_part(image.clone())?);
        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            warn!(%status, "classifier returned no suggestion");
            return Ok(None);
        }
        response
            .json()
            .await
            .map(Some)
            .map_err(|e| Error::Decode(e.to_string()))
    }
}
