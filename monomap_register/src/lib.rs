// Copyright 2026 the MonoMap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! MonoMap Register: putting new items into cases.
//!
//! [`Registration`] is the form behind the "register an item" screen: pick a
//! rack, pick (or create) one of its cases, attach a photo, accept or dismiss
//! the label the classifier suggests for it, and submit.
//!
//! Photos come from a file or from the camera. [`CameraSession`] wraps the
//! platform's [`MediaCapture`] capability and owns at most one open stream,
//! which it always releases: after a successful capture, on
//! [`CameraSession::stop`], or when the session is dropped.
//!
//! ```rust
//! use monomap_register::Registration;
//!
//! let mut form = Registration::new();
//! form.set_name("USB cable");
//! // No case chosen yet.
//! assert!(!form.can_submit());
//! ```
//!
//! The classifier is advisory. When it fails or has nothing to say the form
//! simply proceeds without a label.

mod camera;
mod form;

pub use camera::{
    CAPTURE_FILE_NAME, CAPTURE_JPEG_QUALITY, CameraSession, CaptureError, CaptureStream, Facing,
    MediaCapture,
};
pub use form::{DetectionTicket, Registration};
