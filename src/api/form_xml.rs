// SPDX-License-Identifier: GPL-3.0-or-later

use crate::{LabelError, api::Transport, config::config};
use etag::EntityTag;
use serde_json::json;
use std::time::Duration;
use tokio::time::{Instant, sleep};
use tracing::{debug, warn};
use uuid::Uuid;

/// A form document plus the validator needed to write it back safely.
#[derive(Clone, Debug)]
pub struct FormXmlWithEtag {
    /// The raw `formxml` document.
    pub xml: String,
    /// The response's `ETag`, or `None` when the server omitted it (the
    /// subsequent PATCH then runs unconditionally).
    pub etag: Option<EntityTag>,
}

fn form_url(base_url: &str, form_id: &Uuid) -> String {
    format!(
        "{}/systemforms({})?$select=formxml",
        config().api_root(base_url),
        form_id
    )
}

fn extract_form_xml(json: &serde_json::Value) -> Result<String, LabelError> {
    match json["formxml"].as_str() {
        Some(x) if !x.trim().is_empty() => Ok(x.to_string()),
        _ => Err(LabelError::NotFound(
            "systemform response carries no formxml".into(),
        )),
    }
}

/// GET the form definition. The content reflects the acting user's
/// *current* UI language session.
pub async fn form_xml<T: Transport>(
    t: &T,
    base_url: &str,
    form_id: &Uuid,
) -> Result<String, LabelError> {
    let json = t.get_json(&form_url(base_url, form_id)).await?;
    extract_form_xml(&json)
}

/// Same as [form_xml], also capturing the `ETag` validator for a later
/// optimistic-concurrency PATCH.
pub async fn form_xml_with_etag<T: Transport>(
    t: &T,
    base_url: &str,
    form_id: &Uuid,
) -> Result<FormXmlWithEtag, LabelError> {
    let (json, etag) = t.get_json_with_etag(&form_url(base_url, form_id)).await?;
    Ok(FormXmlWithEtag {
        xml: extract_form_xml(&json)?,
        etag,
    })
}

/// PATCH the form definition. When `etag` is supplied the write carries an
/// `If-Match` precondition; a concurrent change then surfaces as an HTTP
/// 412 error to the caller -- there is no internal retry.
pub async fn patch_form_xml_strict<T: Transport>(
    t: &T,
    base_url: &str,
    form_id: &Uuid,
    xml: &str,
    etag: Option<&EntityTag>,
) -> Result<(), LabelError> {
    let url = format!("{}/systemforms({})", config().api_root(base_url), form_id);
    t.patch_json(&url, &json!({ "formxml": xml }), etag).await
}

/// Poll the form-document endpoint until it returns non-empty content or
/// `timeout` elapses. Transient fetch errors are swallowed and retried.
///
/// This is a best-effort settle delay after a language switch, not a
/// correctness guarantee: the check is only "is the response non-empty",
/// so a subsequent fetch may still reflect stale language context. It
/// never fails -- on timeout it simply returns.
pub async fn wait_for_language_to_apply<T: Transport>(
    t: &T,
    base_url: &str,
    form_id: &Uuid,
    timeout: Duration,
    interval: Duration,
) {
    let deadline = Instant::now() + timeout;
    loop {
        match form_xml(t, base_url, form_id).await {
            Ok(_) => return,
            Err(x) => debug!("Settle probe not ready yet: {}", x),
        }
        if Instant::now() >= deadline {
            warn!(
                "Form {} still empty after {:?}; proceeding anyway",
                form_id, timeout
            );
            return;
        }
        sleep(interval).await;
    }
}

/// [wait_for_language_to_apply] w/ the configured default timeout and
/// interval (5 s / 400 ms unless overridden through the environment).
pub async fn wait_for_language_to_apply_default<T: Transport>(
    t: &T,
    base_url: &str,
    form_id: &Uuid,
) {
    wait_for_language_to_apply(
        t,
        base_url,
        form_id,
        config().settle_timeout,
        config().settle_interval,
    )
    .await
}
