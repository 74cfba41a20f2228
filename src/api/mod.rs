// SPDX-License-Identifier: GPL-3.0-or-later

#![warn(missing_docs)]

//! Gateways to the org: the Web API (OData) endpoints, the legacy SOAP
//! `Execute` endpoint and the transport seam they all run over.

pub mod audit;
pub mod form_xml;
pub mod identity;
pub mod languages;
pub mod metadata;
pub mod mock;
pub mod option_sets;
pub mod publish;
mod transport;

pub use transport::*;

use crate::data::{Label, Lcid};
use serde_json::Value;

/// Extract a `LocalizedLabels` collection from a Web API label payload
/// (`{"LocalizedLabels": [{"Label": ..., "LanguageCode": ...}, ...]}`).
/// Entries lacking either field are skipped.
pub(crate) fn localized_labels(v: &Value) -> Vec<Label> {
    v["LocalizedLabels"]
        .as_array()
        .map(|xs| {
            xs.iter()
                .filter_map(|x| {
                    Some(Label::new(
                        x["LanguageCode"].as_u64()? as Lcid,
                        x["Label"].as_str()?,
                    ))
                })
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_localized_labels() {
        let v = json!({
            "LocalizedLabels": [
                { "Label": "Name", "LanguageCode": 1033 },
                { "Label": "Nom", "LanguageCode": 1036 },
                { "Label": "missing code" },
            ]
        });
        let labels = localized_labels(&v);
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[1], Label::new(1036, "Nom"));

        assert!(localized_labels(&json!({})).is_empty());
    }
}
