// Copyright 2026 the MonoMap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;
use core::future::Future;

use monomap_inventory::ImageUpload;
use tracing::{debug, warn};

/// JPEG quality used for captured frames.
pub const CAPTURE_JPEG_QUALITY: f32 = 0.85;

/// File name given to captured frames.
pub const CAPTURE_FILE_NAME: &str = "capture.jpg";

/// Failure of the camera.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    /// The user or the platform refused access to the camera.
    #[error("camera access denied")]
    Denied,
    /// No camera could be opened.
    #[error("camera unavailable: {0}")]
    Unavailable(String),
    /// The stream was open but no frame could be encoded.
    #[error("frame capture failed: {0}")]
    Frame(String),
    /// The session has no open stream.
    #[error("camera is not running")]
    Inactive,
}

/// Which camera to open.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Facing {
    /// The rear camera, pointed away from the user.
    #[default]
    Environment,
    /// The front camera.
    User,
}

/// An open camera stream.
pub trait CaptureStream {
    /// Encodes the current frame as JPEG with `quality` in `[0, 1]`.
    fn grab_jpeg(&mut self, quality: f32) -> impl Future<Output = Result<Vec<u8>, CaptureError>>;

    /// Stops every track of the stream. Called exactly once per stream.
    fn stop(&mut self);
}

/// The platform's media capture capability.
pub trait MediaCapture {
    /// Stream type handed out by [`MediaCapture::open`].
    type Stream: CaptureStream;

    /// Opens a camera stream.
    fn open(&mut self, facing: Facing) -> impl Future<Output = Result<Self::Stream, CaptureError>>;
}

/// Scoped ownership of one camera stream.
///
/// The session is active exactly while it holds a stream. The stream is
/// stopped on [`CameraSession::stop`], after a successful
/// [`CameraSession::capture`], or when the session is dropped.
pub struct CameraSession<M: MediaCapture> {
    media: M,
    stream: Option<M::Stream>,
}

impl<M: MediaCapture> CameraSession<M> {
    /// An inactive session over `media`.
    pub fn new(media: M) -> Self {
        Self {
            media,
            stream: None,
        }
    }

    /// Returns `true` while a stream is open.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.stream.is_some()
    }

    /// Opens the rear camera. Does nothing if a stream is already open.
    ///
    /// On failure the session stays inactive.
    pub async fn start(&mut self) -> Result<(), CaptureError> {
        if self.stream.is_some() {
            return Ok(());
        }
        let stream = self
            .media
            .open(Facing::Environment)
            .await
            .inspect_err(|err| warn!(%err, "opening camera failed"))?;
        debug!("camera started");
        self.stream = Some(stream);
        Ok(())
    }

    /// Grabs one frame and stops the camera.
    ///
    /// If the frame cannot be encoded the camera keeps running so the user
    /// can try again or cancel.
    pub async fn capture(&mut self, quality: f32) -> Result<ImageUpload, CaptureError> {
        let stream = self.stream.as_mut().ok_or(CaptureError::Inactive)?;
        let bytes = stream
            .grab_jpeg(quality)
            .await
            .inspect_err(|err| warn!(%err, "capturing frame failed"))?;
        debug!(bytes = bytes.len(), "frame captured");
        self.stop();
        Ok(ImageUpload::jpeg(CAPTURE_FILE_NAME, bytes))
    }

    /// Stops the camera if it is running.
    pub fn stop(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.stop();
            debug!("camera stopped");
        }
    }
}

impl<M: MediaCapture> fmt::Debug for CameraSession<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CameraSession")
            .field("active", &self.is_active())
            .finish_non_exhaustive()
    }
}

impl<M: MediaCapture> Drop for CameraSession<M> {
    fn drop(&mut self) {
        self.stop();
    }
}
