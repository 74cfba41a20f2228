// SPDX-License-Identifier: GPL-3.0-or-later

use crate::{
    LabelError,
    api::{Transport, localized_labels},
    config::config,
    data::{Label, OptionSetMetadata, OptionValue},
};
use serde_json::json;
use uuid::Uuid;

/// Fetch a global option set and its per-value label sets.
pub async fn global_option_set<T: Transport>(
    t: &T,
    base_url: &str,
    name: &str,
) -> Result<OptionSetMetadata, LabelError> {
    let url = format!(
        "{}/GlobalOptionSetDefinitions(Name='{}')",
        config().api_root(base_url),
        name
    );
    let json = t.get_json(&url).await?;

    let metadata_id = json["MetadataId"]
        .as_str()
        .and_then(|x| Uuid::parse_str(x).ok());
    let options = json["Options"]
        .as_array()
        .map(|xs| {
            xs.iter()
                .filter_map(|x| {
                    Some(OptionValue {
                        value: x["Value"].as_i64()?,
                        labels: localized_labels(&x["Label"]),
                    })
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(OptionSetMetadata {
        metadata_id,
        name: json["Name"].as_str().unwrap_or(name).to_string(),
        display_name: localized_labels(&json["DisplayName"]),
        options,
    })
}

/// Update the labels of one option value through the `UpdateOptionValue`
/// action, merging w/ the languages already on the org.
pub async fn update_option_value<T: Transport>(
    t: &T,
    base_url: &str,
    option_set_name: &str,
    value: i64,
    labels: &[Label],
) -> Result<(), LabelError> {
    let url = format!("{}/UpdateOptionValue", config().api_root(base_url));
    let localized: Vec<_> = labels
        .iter()
        .map(|x| json!({ "Label": x.label, "LanguageCode": x.language_code }))
        .collect();
    let body = json!({
        "OptionSetName": option_set_name,
        "Value": value,
        "Label": { "LocalizedLabels": localized },
        "MergeLabels": true,
    });
    t.post_json(&url, &body).await?;
    Ok(())
}
