// SPDX-License-Identifier: GPL-3.0-or-later

use crate::{LabelError, api::Transport, config::config};
use quick_xml::escape::escape;
use serde_json::json;
use tracing::debug;

/// Republish one entity's customizations. Required after any label change
/// for it to become visible to end users.
pub async fn publish_entity<T: Transport>(
    t: &T,
    base_url: &str,
    entity_logical_name: &str,
) -> Result<(), LabelError> {
    let url = format!("{}/PublishXml", config().api_root(base_url));
    let parameter_xml = format!(
        "<importexportxml><entities><entity>{}</entity></entities></importexportxml>",
        escape(entity_logical_name)
    );
    debug!("Publishing entity {}", entity_logical_name);
    t.post_json(&url, &json!({ "ParameterXml": parameter_xml })).await?;
    Ok(())
}

/// Republish one global option set.
pub async fn publish_option_set<T: Transport>(
    t: &T,
    base_url: &str,
    option_set_name: &str,
) -> Result<(), LabelError> {
    let url = format!("{}/PublishXml", config().api_root(base_url));
    let parameter_xml = format!(
        "<importexportxml><optionsets><optionset>{}</optionset></optionsets></importexportxml>",
        escape(option_set_name)
    );
    debug!("Publishing option set {}", option_set_name);
    t.post_json(&url, &json!({ "ParameterXml": parameter_xml })).await?;
    Ok(())
}
