// SPDX-License-Identifier: GPL-3.0-or-later

//! Read-only audit-history workflow: fetch a page of change history and
//! resolve the side data (acting-user display names) that makes it
//! readable.

use crate::{
    LabelError,
    api::{
        Transport,
        audit::{record_change_history, user_display_names},
    },
    data::{AuditHistoryPage, pluralize_entity_name},
    invalid_input_error,
};
use tracing::debug;
use uuid::Uuid;

/// Fetch one page of a record's change history w/ user names resolved.
///
/// `entity_logical_name` is pluralized into the Web API collection name.
/// User-name resolution is deliberately degraded: a failed lookup leaves
/// the raw id in place rather than failing the page.
pub async fn load_change_history<T>(
    t: &T,
    base_url: &str,
    entity_logical_name: &str,
    record_id: &Uuid,
    page_number: u32,
    paging_cookie: Option<&str>,
) -> Result<AuditHistoryPage, LabelError>
where
    T: Transport + Clone + 'static,
{
    if entity_logical_name.trim().is_empty() {
        invalid_input_error!("entity logical name must not be empty");
    }

    let entity_set = pluralize_entity_name(entity_logical_name);
    let mut page =
        record_change_history(t, base_url, &entity_set, record_id, page_number, paging_cookie)
            .await?;

    // the platform annotates most records w/ a formatted user name already;
    // only look up the ones it left bare...
    let unresolved: Vec<Uuid> = page
        .records
        .iter()
        .filter(|x| x.user_name.is_none())
        .filter_map(|x| x.user_id)
        .collect();
    if !unresolved.is_empty() {
        debug!("Resolving {} user name(s)", unresolved.len());
        let names = user_display_names(t, base_url, &unresolved).await;
        for record in page.records.iter_mut() {
            if record.user_name.is_none()
                && let Some(id) = record.user_id
            {
                record.user_name = names.get(&id).cloned();
            }
        }
    }

    Ok(page)
}
