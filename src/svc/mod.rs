// SPDX-License-Identifier: GPL-3.0-or-later

#![warn(missing_docs)]

//! Orchestration workflows tying the gateways and the form core together:
//! the language-context switcher, whole-form load/save, option set
//! load/save and the audit-history reader.

mod audit_service;
mod form_service;
mod language_switcher;
mod option_set_service;

pub use audit_service::*;
pub use form_service::*;
pub use language_switcher::*;
pub use option_set_service::*;
