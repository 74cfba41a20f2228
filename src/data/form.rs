// SPDX-License-Identifier: GPL-3.0-or-later

use crate::data::{Label, Lcid};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use std::collections::BTreeMap;

/// One control cell w/in a section, header or footer.
#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormControl {
    /// The control's own `id` attribute.
    pub id: String,
    /// The enclosing cell's `id` -- the addressable identifier used to
    /// target a specific UI cell for deep-linking.
    pub cell_id: Option<String>,
    /// Control name, when declared.
    pub name: Option<String>,
    /// Widget class id; decides label editability (see
    /// [is_label_editable][crate::data::is_label_editable]).
    pub class_id: Option<String>,
    /// Bound attribute logical name, for data-bound controls.
    pub datafieldname: Option<String>,
    /// `disabled` attribute, parsed permissively.
    pub disabled: Option<bool>,
    /// `visible` attribute, parsed permissively.
    pub visible: Option<bool>,
    /// Per-language labels of the enclosing cell.
    pub labels: Vec<Label>,
}

/// A section w/in a column.
#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSection {
    /// Section `id` attribute.
    pub id: String,
    /// Section name, when declared.
    pub name: Option<String>,
    /// `visible` attribute, parsed permissively.
    pub visible: Option<bool>,
    /// `showlabel` attribute, parsed permissively.
    pub showlabel: Option<bool>,
    /// Per-language section labels.
    pub labels: Vec<Label>,
    /// Controls in document order.
    pub controls: Vec<FormControl>,
}

/// A column w/in a tab.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormColumn {
    /// Column `width` attribute, verbatim (e.g. `"50%"`).
    pub width: String,
    /// Sections in document order.
    pub sections: Vec<FormSection>,
}

/// A top-level tab.
#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormTab {
    /// Tab `id` attribute.
    pub id: String,
    /// Tab name, when declared.
    pub name: Option<String>,
    /// `visible` attribute, parsed permissively.
    pub visible: Option<bool>,
    /// `showlabel` attribute, parsed permissively.
    pub showlabel: Option<bool>,
    /// Per-language tab labels.
    pub labels: Vec<Label>,
    /// Columns in document order.
    pub columns: Vec<FormColumn>,
}

/// Header or footer region -- present only when the form defines one.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormHeaderFooter {
    /// Controls in document order.
    pub controls: Vec<FormControl>,
}

/// Root aggregate of a parsed (or merged) form definition.
///
/// Positional order of tabs/columns/sections/controls is stable and
/// identical across all per-language parses of the same form. The merge
/// step aligns by array index, not by id: the underlying document structure
/// (element count and order) is identical for every language variant --
/// only label text differs.
#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormStructure {
    /// Header region, when the form defines one.
    pub header: Option<FormHeaderFooter>,
    /// Tabs in document order.
    pub tabs: Vec<FormTab>,
    /// Footer region, when the form defines one.
    pub footer: Option<FormHeaderFooter>,
    /// The raw document this structure was parsed from (the first/base
    /// language variant for merged structures).
    pub raw_xml: String,
    /// Raw document per LCID, for merged structures.
    pub raw_xml_by_lcid: Option<BTreeMap<Lcid, String>>,
}

impl FormStructure {
    /// An empty structure -- what merging zero inputs yields.
    pub fn empty() -> Self {
        FormStructure::default()
    }
}
