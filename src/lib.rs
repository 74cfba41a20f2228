// SPDX-License-Identifier: GPL-3.0-or-later

#![warn(missing_docs)]

//!
//! A toolkit for viewing and editing multi-language labels on a Dataverse
//! (Dynamics 365) org: form tab/section/control labels, entity attribute
//! display names and global option set labels, plus a read-only
//! change-history reader.
//!
//! It consists of four main modules that roughly map to (a) a data layer
//! defining the typed model (LCIDs, labels, the form structure tree,
//! option sets, audit records), (b) an api layer of gateways over the
//! org's Web API (OData) and legacy SOAP endpoints, (c) a form layer --
//! the core -- parsing, merging and re-serializing the per-language form
//! documents, and (d) a svc layer orchestrating the whole-form workflows.
//!
//! The platform quirk everything revolves around: the form-document
//! endpoint shapes its response by the *acting user's current UI
//! language*, not by a language parameter. Reading or writing all
//! languages therefore means repeatedly rewriting the user's language
//! setting, doing the language-specific work, and restoring the original
//! setting on every exit path -- see
//! [for_each_language][crate::svc::for_each_language].
//!
//! # Third-party crates
//!
//! This project depends on few best-of-breed crates:
//!
//! 1. Deserialization and Serialization:
//!     * [serde][1]: for the basic serialization + deserialization capabilities.
//!     * [serde_json][2]: for the JSON format bindings.
//!     * [serde_with][3]: for custom helpers.
//!
//! 2. HTTP:
//!     * [reqwest][4]: for the cookie-authenticated Web API client.
//!     * [etag][5]: for parsing + rendering `ETag` validators used in
//!       optimistic-concurrency PATCHes.
//!
//! 3. XML:
//!     * [roxmltree][6]: for read-side form/metadata document parsing.
//!     * [quick-xml][7]: for write-side escaping and SOAP envelopes.
//!
//! 4. UUID[^1]:
//!     * [uuid][8]: for handling, generating, parsing and formatting UUIDs.
//!
//! 5. Date and Time:
//!     * [chrono][9]: for timezone-aware audit timestamps.
//!
//! [1]: https://crates.io/crates/serde
//! [2]: https://crates.io/crates/serde_json
//! [3]: https://crates.io/crates/serde_with
//! [4]: https://crates.io/crates/reqwest
//! [5]: https://crates.io/crates/etag
//! [6]: https://crates.io/crates/roxmltree
//! [7]: https://crates.io/crates/quick-xml
//! [8]: https://crates.io/crates/uuid
//! [9]: https://crates.io/crates/chrono
//!
//! [^1]: UUID: Universally Unique Identifier --see
//! <https://en.wikipedia.org/wiki/Universally_unique_identifier>.
//!

pub mod api;
mod config;
pub mod data;
mod error;
pub mod form;
pub mod svc;

pub use config::{Config, config};
pub use error::LabelError;

/// Generate a message (in the style of `format!` macro), log it at level
/// _error_ and raise a [runtime error][crate::LabelError#variant.Runtime].
#[macro_export]
macro_rules! runtime_error {
    ( $( $arg: tt )* ) => {
        {
            let msg = std::fmt::format(core::format_args!($($arg)*));
            tracing::error!("{}", msg);
            return Err($crate::LabelError::Runtime(msg.into()));
        }
    }
}

/// Generate a message (in the style of `format!` macro), log it at level
/// _error_ and raise an [invalid input
/// error][crate::LabelError#variant.InvalidInput].
#[macro_export]
macro_rules! invalid_input_error {
    ( $( $arg: tt )* ) => {
        {
            let msg = std::fmt::format(core::format_args!($($arg)*));
            tracing::error!("{}", msg);
            return Err($crate::LabelError::InvalidInput(msg.into()));
        }
    }
}

/// Log `$err` at level _error_ before returning it.
#[macro_export]
macro_rules! emit_error {
    ( $err: expr ) => {{
        tracing::error!("{}", $err);
        return Err($err);
    }};
}
