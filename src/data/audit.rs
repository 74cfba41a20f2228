// SPDX-License-Identifier: GPL-3.0-or-later

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use uuid::Uuid;

/// One attribute-level change w/in an audit record.
#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeChange {
    /// Logical (schema) name of the changed attribute.
    pub logical_name: String,
    /// Display name when the side-lookup succeeded; falls back to the
    /// logical name otherwise.
    pub display_name: String,
    /// Value before the change, when recorded.
    pub old_value: Option<String>,
    /// Value after the change, when recorded.
    pub new_value: Option<String>,
}

/// Detail payload of an audit record, distinguished by the response's
/// `@odata.type` discriminator.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum AuditDetail {
    /// `AttributeAuditDetail` -- per-attribute old/new values.
    Attribute {
        /// Changed attributes, in response order.
        changes: Vec<AttributeChange>,
    },
    /// `RelationshipAuditDetail` -- records associated or disassociated.
    Relationship {
        /// Relationship schema name.
        relationship_name: String,
        /// Display names (or raw ids) of the affected records.
        targets: Vec<String>,
    },
    /// `ShareAuditDetail` -- access granted/modified/revoked for a principal.
    Share {
        /// Display name (or raw id) of the principal.
        principal: String,
        /// Access mask before the change, verbatim.
        old_privileges: Option<String>,
        /// Access mask after the change, verbatim.
        new_privileges: Option<String>,
    },
    /// Any detail type this crate does not model further.
    Other {
        /// The raw `@odata.type` value.
        odata_type: String,
    },
}

/// One entry of a record's change history.
#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditRecord {
    /// Numeric audit action code (1 = Create, 2 = Update, ...).
    pub action: i32,
    /// Action name as sent by the platform, when present.
    pub action_name: Option<String>,
    /// When the change was recorded.
    pub timestamp: Option<DateTime<Utc>>,
    /// Acting user's id.
    pub user_id: Option<Uuid>,
    /// Acting user's display name; falls back to the raw id when the
    /// side-lookup degraded.
    pub user_name: Option<String>,
    /// The typed detail payload.
    pub detail: AuditDetail,
}

/// A page of change history plus the paging cookie needed for the next one.
#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditHistoryPage {
    /// Records in platform order (most recent first).
    pub records: Vec<AuditRecord>,
    /// TRUE when more pages exist.
    pub more_records: bool,
    /// Opaque paging cookie to pass back for the next page.
    pub paging_cookie: Option<String>,
}
