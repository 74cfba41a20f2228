// SPDX-License-Identifier: GPL-3.0-or-later

#![warn(missing_docs)]

//! Typed model of everything this crate reads from and writes to an org:
//! LCIDs and the known-language table, per-language labels, the form
//! structure tree, global option sets, audit history records, plus the
//! small naming helpers the Web API layer needs.

mod audit;
mod control_class;
mod form;
mod label;
mod lcid;
mod option_set;
mod pluralize;

pub use audit::*;
pub use control_class::*;
pub use form::*;
pub use label::*;
pub use lcid::*;
pub use option_set::*;
pub use pluralize::*;
