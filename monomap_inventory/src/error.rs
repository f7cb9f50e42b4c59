// Copyright 2026 the MonoMap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Failure of a collaborator call.
///
/// The editor never retries; callers log the error, leave local state as it was
/// before the call and surface the failure however they see fit.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request never produced a response (connection refused, timeout, ...).
    #[error("request failed: {0}")]
    Transport(String),
    /// The backend answered with a non-success status.
    #[error("backend responded with status {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body or reason phrase.
        message: String,
    },
    /// The response body did not have the expected shape.
    #[error("malformed response: {0}")]
    Decode(String),
    /// The addressed record does not exist (any more).
    #[error("{kind} {id} not found")]
    NotFound {
        /// Record kind, e.g. `"rack"`.
        kind: &'static str,
        /// Raw id of the missing record.
        id: i64,
    },
}

impl Error {
    /// Returns `true` if the error means the record is gone rather than the call failing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::Status { status: 404, .. })
    }
}
