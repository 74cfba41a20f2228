// SPDX-License-Identifier: GPL-3.0-or-later

use std::{borrow::Cow, io};
use thiserror::Error;

/// Enumeration of different error types raised by this crate.
#[derive(Debug, Error)]
pub enum LabelError {
    /// Non-2xx response from the org. The body text is carried verbatim so
    /// callers can surface the server's own message (incl. a 412 from a
    /// failed `If-Match` precondition).
    #[error("HTTP {status}: {body}")]
    Http {
        #[doc(hidden)]
        status: u16,
        #[doc(hidden)]
        body: String,
    },

    /// Transport-level failure (connect, TLS, timeout, body read).
    #[error("Network error: {0}")]
    Network(
        #[doc(hidden)]
        #[from]
        reqwest::Error,
    ),

    /// Malformed form or metadata XML.
    #[error("XML parse error: {0}")]
    Parse(
        #[doc(hidden)]
        #[from]
        roxmltree::Error,
    ),

    /// JSON serialization / deserialization error.
    #[error("JSON error: {0}")]
    Json(
        #[doc(hidden)]
        #[from]
        serde_json::Error,
    ),

    /// Caller-supplied input rejected before any network call was made.
    #[error("Invalid input: {0}")]
    InvalidInput(#[doc(hidden)] Cow<'static, str>),

    /// A resource the caller named does not exist on the org.
    #[error("Not found: {0}")]
    NotFound(#[doc(hidden)] Cow<'static, str>),

    /// A required field was absent from an otherwise successful response.
    #[error("Missing field: {0}")]
    MissingField(#[doc(hidden)] Cow<'static, str>),

    /// Unexpected runtime error.
    #[error("{0}")]
    Runtime(#[doc(hidden)] Cow<'static, str>),

    /// I/O error.
    #[error("I/O error: {0}")]
    IO(
        #[doc(hidden)]
        #[from]
        io::Error,
    ),
}

impl LabelError {
    /// TRUE when this error is an HTTP 412, i.e. the optimistic-concurrency
    /// precondition of a strict PATCH failed b/c the resource changed under
    /// our feet.
    pub fn is_concurrency_conflict(&self) -> bool {
        matches!(self, LabelError::Http { status: 412, .. })
    }
}
