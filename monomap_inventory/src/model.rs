// Copyright 2026 the MonoMap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Record kind used in error messages.
            pub const KIND: &'static str = $kind;
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

record_id!(
    /// Backend-assigned identity of a [`Rack`].
    RackId,
    "rack"
);
record_id!(
    /// Backend-assigned identity of a [`Case`].
    CaseId,
    "case"
);
record_id!(
    /// Backend-assigned identity of an [`Item`].
    ItemId,
    "item"
);

/// A storage rack placed on the floor-plan canvas.
///
/// `x`/`y` is the top-left corner in canvas units.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rack {
    /// Identity assigned at creation.
    pub id: RackId,
    /// Free-text display name.
    pub name: String,
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl Rack {
    /// Top-left corner.
    #[must_use]
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Width and height.
    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// The occupied canvas rectangle.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.origin(), self.size())
    }
}

/// A container listed under a rack.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Case {
    /// Identity assigned at creation.
    pub id: CaseId,
    /// Owning rack.
    pub rack_id: RackId,
    /// Opaque value encoded in the case's printed scan code.
    pub qr_code: String,
}

/// An inventory item stored in a case.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Identity assigned at creation.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Owning case.
    pub case_id: CaseId,
    /// Label suggested by the classifier when the item was registered.
    #[serde(default)]
    pub ai_label: Option<String>,
    /// Server path of the uploaded photo.
    #[serde(default)]
    pub image_path: Option<String>,
}

/// Body of a rack creation request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewRack {
    /// Display name.
    pub name: String,
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl NewRack {
    /// Geometry every freshly added rack starts with.
    pub const DEFAULT_FRAME: Rect = Rect::new(20.0, 20.0, 140.0, 100.0);

    /// A request for `name` placed at [`NewRack::DEFAULT_FRAME`].
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_frame(name, Self::DEFAULT_FRAME)
    }

    /// A request for `name` occupying `frame`.
    #[must_use]
    pub fn with_frame(name: impl Into<String>, frame: Rect) -> Self {
        Self {
            name: name.into(),
            x: frame.x0,
            y: frame.y0,
            width: frame.width(),
            height: frame.height(),
        }
    }
}

/// Partial rack update; absent fields are left untouched by the backend.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RackPatch {
    /// New display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New left edge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    /// New top edge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// New width.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// New height.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl RackPatch {
    /// A patch that moves the rack's origin and changes nothing else.
    #[must_use]
    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }
}

/// Body of a case creation request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCase {
    /// Rack the new case goes under.
    pub rack_id: RackId,
}

/// An image attached to an upload.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// File name sent with the multipart part; its extension is kept by the backend.
    pub file_name: String,
    /// MIME type of `bytes`.
    pub content_type: String,
    /// Encoded image.
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// A JPEG image, as produced by a camera capture.
    #[must_use]
    pub fn jpeg(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: "image/jpeg".to_owned(),
            bytes,
        }
    }
}

impl fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// Fields of an item creation request (sent as multipart form data).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewItem {
    /// Display name.
    pub name: String,
    /// Case the item goes into.
    pub case_id: CaseId,
    /// Label suggested by the classifier, if the user kept it.
    pub ai_label: Option<String>,
    /// Photo of the item.
    pub image: Option<ImageUpload>,
}

/// Filters for listing items.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemQuery {
    /// Only items in this case.
    pub case_id: Option<CaseId>,
    /// Only items whose name or label contains this text (case-insensitive).
    pub q: Option<String>,
}

impl ItemQuery {
    /// All items of one case.
    #[must_use]
    pub fn in_case(case_id: CaseId) -> Self {
        Self {
            case_id: Some(case_id),
            q: None,
        }
    }
}

/// Response of the rack search: racks holding at least one matching item.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RackHits {
    /// Distinct rack ids.
    pub rack_ids: Vec<RackId>,
}

/// The classifier's top suggestion for a photo.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Suggested label.
    pub label: String,
    /// Confidence in `[0, 1]`.
    #[serde(default)]
    pub confidence: f64,
}
