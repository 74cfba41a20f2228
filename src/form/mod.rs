// SPDX-License-Identifier: GPL-3.0-or-later

#![warn(missing_docs)]

//! The core of this crate: parsing a form document into a typed tree,
//! merging per-language parses into one structure, and splicing edited
//! labels back into the raw document.

mod merger;
mod parser;
mod writer;

pub use merger::merge_form_structures;
pub use parser::parse_form_xml;
pub use writer::update_labels_in_xml;
