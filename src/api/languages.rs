// SPDX-License-Identifier: GPL-3.0-or-later

use crate::{LabelError, api::Transport, config::config, data::Lcid};
use std::{
    collections::HashMap,
    sync::{Mutex, OnceLock},
};
use tracing::debug;

static MEMO: OnceLock<Mutex<HashMap<String, Vec<Lcid>>>> = OnceLock::new();

fn memo() -> &'static Mutex<HashMap<String, Vec<Lcid>>> {
    MEMO.get_or_init(|| Mutex::new(HashMap::new()))
}

/// Fetch the set of LCIDs provisioned on the org at `base_url`.
///
/// The result is memoized per base URL for the lifetime of the process --
/// the list only changes when an administrator provisions a language pack,
/// and the language-iteration pipeline would otherwise hit the endpoint
/// once per workflow. Network/HTTP failures propagate unmodified and are
/// never cached; callers treat an empty or failed result by falling back
/// to a single-language path.
pub async fn provisioned_languages<T: Transport>(
    t: &T,
    base_url: &str,
) -> Result<Vec<Lcid>, LabelError> {
    let key = base_url.trim_end_matches('/').to_string();
    if let Some(hit) = memo().lock().expect("language memo poisoned").get(&key) {
        debug!("Provisioned languages for {} served from memo", key);
        return Ok(hit.clone());
    }

    let url = format!("{}/RetrieveProvisionedLanguages()", config().api_root(&key));
    let json = t.get_json(&url).await?;
    // current orgs answer w/ `value`; very old ones w/ `Values`...
    let raw = json["value"].as_array().or(json["Values"].as_array());
    let result: Vec<Lcid> = raw
        .map(|xs| xs.iter().filter_map(|x| x.as_u64()).map(|x| x as Lcid).collect())
        .unwrap_or_default();

    memo()
        .lock()
        .expect("language memo poisoned")
        .insert(key, result.clone());
    Ok(result)
}
