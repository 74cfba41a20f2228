// SPDX-License-Identifier: GPL-3.0-or-later

//! Global option set label workflows. Option set labels are independent of
//! any form structure and of the UI-language session: the metadata
//! endpoints expose every language at once, so no language iteration is
//! needed here.

use crate::{
    LabelError,
    api::{
        Transport,
        option_sets::{global_option_set, update_option_value},
        publish::publish_option_set,
    },
    data::OptionSetMetadata,
    invalid_input_error,
};
use tracing::{debug, info};

/// Load a global option set and its per-value label sets.
pub async fn load_option_set<T: Transport>(
    t: &T,
    base_url: &str,
    name: &str,
) -> Result<OptionSetMetadata, LabelError> {
    if name.trim().is_empty() {
        invalid_input_error!("option set name must not be empty");
    }
    global_option_set(t, base_url, name).await
}

/// Write an edited option set's labels back, value by value, then
/// republish the set. `MergeLabels` semantics apply: languages absent from
/// an option's edited label list are left alone on the org.
///
/// A failure mid-way aborts the remaining values; already-written values
/// are not rolled back.
pub async fn save_option_set<T: Transport>(
    t: &T,
    base_url: &str,
    metadata: &OptionSetMetadata,
) -> Result<(), LabelError> {
    if metadata.name.trim().is_empty() {
        invalid_input_error!("option set name must not be empty");
    }

    info!(
        "Saving option set '{}' ({} value(s))",
        metadata.name,
        metadata.options.len()
    );
    for option in &metadata.options {
        if option.labels.is_empty() {
            continue;
        }
        debug!("Updating option {} of '{}'", option.value, metadata.name);
        update_option_value(t, base_url, &metadata.name, option.value, &option.labels).await?;
    }

    publish_option_set(t, base_url, &metadata.name).await
}
