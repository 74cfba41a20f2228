// SPDX-License-Identifier: GPL-3.0-or-later

//! Whole-form load and save workflows.

use crate::{
    LabelError,
    api::{
        Transport,
        form_xml::{
            form_xml, form_xml_with_etag, patch_form_xml_strict, wait_for_language_to_apply_default,
        },
        languages::provisioned_languages,
    },
    data::{BASE_LCID, FormStructure, Lcid},
    form::{merge_form_structures, parse_form_xml, update_labels_in_xml},
    invalid_input_error,
    svc::for_each_language,
};
use std::{collections::BTreeMap, sync::Arc};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Callback invoked after each per-language save step: `(lcid, done,
/// total)`.
pub type ProgressFn = Arc<dyn Fn(Lcid, usize, usize) + Send + Sync>;

/// Iteration order for the language pipeline: the base language first
/// (guaranteed present even when the resolver omitted it), the rest
/// ascending.
fn language_order(provisioned: &[Lcid]) -> Vec<Lcid> {
    let mut rest: Vec<Lcid> = provisioned
        .iter()
        .copied()
        .filter(|x| *x != BASE_LCID)
        .collect();
    rest.sort_unstable();
    rest.dedup();

    let mut order = vec![BASE_LCID];
    order.extend(rest);
    order
}

/// Load a form's full multi-language structure: one fetch + parse per
/// provisioned language (each under that language's UI session), merged
/// into a single tree holding all labels.
///
/// When the language resolver fails or reports nothing, the load degrades
/// to a single-language path: one fetch under the current session, parsed
/// as the base language.
pub async fn load_form_structure<T: Transport>(
    t: &T,
    base_url: &str,
    form_id: &Uuid,
) -> Result<FormStructure, LabelError> {
    if base_url.trim().is_empty() {
        invalid_input_error!("base URL must not be empty");
    }

    let provisioned = match provisioned_languages(t, base_url).await {
        Ok(x) if !x.is_empty() => x,
        Ok(_) => {
            warn!("Org reports no provisioned languages; single-language load");
            return load_single_language(t, base_url, form_id).await;
        }
        Err(x) => {
            warn!("Failed resolving provisioned languages ({}); single-language load", x);
            return load_single_language(t, base_url, form_id).await;
        }
    };

    let order = language_order(&provisioned);
    info!("Loading form {} across {} language(s)", form_id, order.len());

    let per_language = for_each_language(t, base_url, &order, async |lcid| {
        wait_for_language_to_apply_default(t, base_url, form_id).await;
        let xml = form_xml(t, base_url, form_id).await?;
        let structure = parse_form_xml(&xml, Some(lcid))?;
        debug!("Parsed form {} under LCID {}", form_id, lcid);
        Ok((lcid, structure, xml))
    })
    .await?;

    let raw_xml_by_lcid: BTreeMap<Lcid, String> = per_language
        .iter()
        .map(|(lcid, _, xml)| (*lcid, xml.clone()))
        .collect();
    let parses: Vec<(Lcid, FormStructure)> = per_language
        .into_iter()
        .map(|(lcid, structure, _)| (lcid, structure))
        .collect();

    Ok(merge_form_structures(&parses, raw_xml_by_lcid))
}

async fn load_single_language<T: Transport>(
    t: &T,
    base_url: &str,
    form_id: &Uuid,
) -> Result<FormStructure, LabelError> {
    let xml = form_xml(t, base_url, form_id).await?;
    let structure = parse_form_xml(&xml, Some(BASE_LCID))?;
    let raw = BTreeMap::from([(BASE_LCID, xml)]);
    Ok(merge_form_structures(&[(BASE_LCID, structure)], raw))
}

/// Write an edited structure back: for each provisioned language (under
/// that language's UI session) fetch the live document and its ETag,
/// splice the edited label text for that language in, and PATCH it back
/// strictly.
///
/// A failure at any per-language step aborts the remaining languages;
/// already-saved languages are not rolled back. The caller must publish
/// the entity afterwards.
pub async fn save_form_structure<T: Transport>(
    t: &T,
    base_url: &str,
    form_id: &Uuid,
    structure: &FormStructure,
    on_progress: Option<ProgressFn>,
) -> Result<(), LabelError> {
    if base_url.trim().is_empty() {
        invalid_input_error!("base URL must not be empty");
    }

    let provisioned = provisioned_languages(t, base_url).await?;
    let order = if provisioned.is_empty() {
        warn!("Org reports no provisioned languages; saving base language only");
        vec![BASE_LCID]
    } else {
        language_order(&provisioned)
    };

    let total = order.len();
    info!("Saving form {} across {} language(s)", form_id, total);

    let mut done = 0usize;
    for_each_language(t, base_url, &order, async |lcid| {
        wait_for_language_to_apply_default(t, base_url, form_id).await;
        let live = form_xml_with_etag(t, base_url, form_id).await?;
        let updated = update_labels_in_xml(&live.xml, structure, lcid)?;
        patch_form_xml_strict(t, base_url, form_id, &updated, live.etag.as_ref()).await?;
        done += 1;
        debug!("Saved form {} under LCID {} ({}/{})", form_id, lcid, done, total);
        if let Some(cb) = on_progress.as_ref() {
            cb(lcid, done, total);
        }
        Ok(())
    })
    .await?;
    Ok(())
}
