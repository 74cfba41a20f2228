// SPDX-License-Identifier: GPL-3.0-or-later

//! Read-only record change history (audit) access.

use crate::{
    LabelError,
    api::Transport,
    config::config,
    data::{AttributeChange, AuditDetail, AuditHistoryPage, AuditRecord},
};
use chrono::{DateTime, Utc};
use reqwest::Url;
use serde_json::Value;
use std::collections::HashMap;
use tokio::task::JoinSet;
use tracing::warn;
use uuid::Uuid;

const ATTRIBUTE_DETAIL: &str = "#Microsoft.Dynamics.CRM.AttributeAuditDetail";
const RELATIONSHIP_DETAIL: &str = "#Microsoft.Dynamics.CRM.RelationshipAuditDetail";
const SHARE_DETAIL: &str = "#Microsoft.Dynamics.CRM.ShareAuditDetail";

/// Fetch one page of a record's change history.
///
/// `entity_set` is the Web API collection name (see
/// [pluralize_entity_name][crate::data::pluralize_entity_name]); paging is
/// cookie-based, so pass the previous page's cookie to advance.
pub async fn record_change_history<T: Transport>(
    t: &T,
    base_url: &str,
    entity_set: &str,
    record_id: &Uuid,
    page_number: u32,
    paging_cookie: Option<&str>,
) -> Result<AuditHistoryPage, LabelError> {
    let target = serde_json::to_string(&serde_json::json!({
        "@odata.id": format!("{entity_set}({record_id})"),
    }))?;
    let paging_info = serde_json::to_string(&serde_json::json!({
        "PageNumber": page_number,
        "Count": 10,
        "PagingCookie": paging_cookie,
    }))?;

    let bare = format!(
        "{}/RetrieveRecordChangeHistory(Target=@target,PagingInfo=@paginginfo)",
        config().api_root(base_url)
    );
    let url = Url::parse_with_params(&bare, &[("@target", target), ("@paginginfo", paging_info)])
        .map_err(|x| LabelError::Runtime(format!("Malformed audit URL: {x}").into()))?;

    let json = t.get_json(url.as_str()).await?;
    let collection = &json["AuditDetailCollection"];

    let mut records = vec![];
    if let Some(details) = collection["AuditDetails"].as_array() {
        for detail in details {
            records.push(parse_audit_detail(detail)?);
        }
    }

    Ok(AuditHistoryPage {
        records,
        more_records: collection["MoreRecords"].as_bool().unwrap_or(false),
        paging_cookie: collection["PagingCookie"].as_str().map(String::from),
    })
}

fn parse_audit_detail(detail: &Value) -> Result<AuditRecord, LabelError> {
    let odata_type = detail["@odata.type"].as_str().ok_or(LabelError::MissingField(
        "audit detail lacks @odata.type".into(),
    ))?;

    let record = &detail["AuditRecord"];
    let action = record["action"].as_i64().unwrap_or(0) as i32;
    let action_name = record["action@OData.Community.Display.V1.FormattedValue"]
        .as_str()
        .map(String::from);
    let timestamp = record["createdon"]
        .as_str()
        .and_then(|x| x.parse::<DateTime<Utc>>().ok());
    let user_id = record["_userid_value"]
        .as_str()
        .and_then(|x| Uuid::parse_str(x).ok());
    let user_name = record["_userid_value@OData.Community.Display.V1.FormattedValue"]
        .as_str()
        .map(String::from);

    let detail = match odata_type {
        ATTRIBUTE_DETAIL => AuditDetail::Attribute {
            changes: attribute_changes(&detail["OldValue"], &detail["NewValue"]),
        },
        RELATIONSHIP_DETAIL => AuditDetail::Relationship {
            relationship_name: detail["RelationshipName"].as_str().unwrap_or("").to_string(),
            targets: detail["TargetRecords"]
                .as_array()
                .map(|xs| xs.iter().map(record_reference).collect())
                .unwrap_or_default(),
        },
        SHARE_DETAIL => AuditDetail::Share {
            principal: record_reference(&detail["Principal"]),
            old_privileges: detail["OldPrivileges"].as_str().map(String::from),
            new_privileges: detail["NewPrivileges"].as_str().map(String::from),
        },
        x => AuditDetail::Other {
            odata_type: x.to_string(),
        },
    };

    Ok(AuditRecord {
        action,
        action_name,
        timestamp,
        user_id,
        user_name,
        detail,
    })
}

/// Union the attribute keys of the old and new snapshots into one change
/// list, preferring the platform's formatted value when it sent one.
fn attribute_changes(old: &Value, new: &Value) -> Vec<AttributeChange> {
    let mut names: Vec<String> = vec![];
    for snapshot in [old, new] {
        if let Some(map) = snapshot.as_object() {
            for key in map.keys() {
                // skip OData annotations and the embedded record type...
                if key.contains('@') || key == "auditid" {
                    continue;
                }
                if !names.contains(key) {
                    names.push(key.clone());
                }
            }
        }
    }

    names
        .into_iter()
        .map(|logical_name| AttributeChange {
            old_value: rendered_value(old, &logical_name),
            new_value: rendered_value(new, &logical_name),
            display_name: logical_name.clone(),
            logical_name,
        })
        .collect()
}

fn rendered_value(snapshot: &Value, key: &str) -> Option<String> {
    let formatted = format!("{key}@OData.Community.Display.V1.FormattedValue");
    if let Some(x) = snapshot[formatted.as_str()].as_str() {
        return Some(x.to_string());
    }
    match &snapshot[key] {
        Value::Null => None,
        Value::String(x) => Some(x.clone()),
        x => Some(x.to_string()),
    }
}

fn record_reference(v: &Value) -> String {
    for key in ["fullname", "name", "@odata.id"] {
        if let Some(x) = v[key].as_str() {
            return x.to_string();
        }
    }
    v.to_string()
}

/// Resolve user display names for a set of ids, `lookup_batch_len` at a
/// time. These are independent, idempotent, read-only lookups w/ no shared
/// mutable precondition, so bounded parallelism is safe here -- a
/// deliberate contrast to the strictly serialized language-sensitive
/// operations. A failed per-item fetch degrades to the raw id rather than
/// failing the batch.
pub async fn user_display_names<T>(t: &T, base_url: &str, ids: &[Uuid]) -> HashMap<Uuid, String>
where
    T: Transport + Clone + 'static,
{
    let mut result = HashMap::new();
    for chunk in ids.chunks(config().lookup_batch_len) {
        let mut tasks = JoinSet::new();
        for id in chunk {
            let t = t.clone();
            let base = base_url.to_string();
            let id = *id;
            tasks.spawn(async move {
                let url = format!(
                    "{}/systemusers({})?$select=fullname",
                    config().api_root(&base),
                    id
                );
                let name = match t.get_json(&url).await {
                    Ok(json) => json["fullname"].as_str().map(String::from),
                    Err(x) => {
                        warn!("Failed fetching name of user {}. Degrading: {}", id, x);
                        None
                    }
                };
                (id, name.unwrap_or_else(|| id.to_string()))
            });
        }
        while let Some(joined) = tasks.join_next().await {
            if let Ok((id, name)) = joined {
                result.insert(id, name);
            }
        }
    }
    result
}
