// SPDX-License-Identifier: GPL-3.0-or-later

use crate::data::Label;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use uuid::Uuid;

/// One numeric option of a global option set, w/ its own label set
/// independent of any form structure.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionValue {
    /// The option's numeric value.
    pub value: i64,
    /// Per-language labels of the option.
    pub labels: Vec<Label>,
}

/// A global option set and its numeric-keyed option values.
#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionSetMetadata {
    /// Platform metadata id, when known.
    pub metadata_id: Option<Uuid>,
    /// The option set's unique name.
    pub name: String,
    /// Per-language display names of the set itself.
    pub display_name: Vec<Label>,
    /// The options, in platform order.
    pub options: Vec<OptionValue>,
}
