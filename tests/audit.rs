// SPDX-License-Identifier: GPL-3.0-or-later

//! Change-history workflow over canned audit responses.

mod utils;

use dataverse_labels::{
    LabelError,
    api::mock::MockOrg,
    data::AuditDetail,
    svc::load_change_history,
};
use serde_json::json;
use utils::BASE;
use uuid::Uuid;

fn canned_history(user_a: &Uuid, user_b: &Uuid) -> serde_json::Value {
    json!({
        "AuditDetailCollection": {
            "MoreRecords": true,
            "PagingCookie": "<cookie page=\"1\" />",
            "AuditDetails": [
                {
                    "@odata.type": "#Microsoft.Dynamics.CRM.AttributeAuditDetail",
                    "AuditRecord": {
                        "action": 2,
                        "action@OData.Community.Display.V1.FormattedValue": "Update",
                        "createdon": "2026-08-20T10:15:00Z",
                        "_userid_value": user_a.to_string(),
                        "_userid_value@OData.Community.Display.V1.FormattedValue": "Ada Lovelace",
                    },
                    "OldValue": {
                        "name": "Contoso",
                        "revenue": 1000,
                        "revenue@OData.Community.Display.V1.FormattedValue": "$1,000.00",
                    },
                    "NewValue": {
                        "name": "Contoso Ltd",
                        "telephone1": "555-0100",
                    },
                },
                {
                    "@odata.type": "#Microsoft.Dynamics.CRM.RelationshipAuditDetail",
                    "AuditRecord": {
                        "action": 33,
                        "createdon": "2026-08-19T09:00:00Z",
                        "_userid_value": user_b.to_string(),
                    },
                    "RelationshipName": "account_contacts",
                    "TargetRecords": [
                        { "fullname": "Grace Hopper" },
                        { "@odata.id": "contacts(9f8e0000-0000-0000-0000-000000000001)" },
                    ],
                },
                {
                    "@odata.type": "#Microsoft.Dynamics.CRM.ShareAuditDetail",
                    "AuditRecord": {
                        "action": 48,
                        "_userid_value": user_b.to_string(),
                    },
                    "Principal": { "fullname": "Sales Team" },
                    "OldPrivileges": "ReadAccess",
                    "NewPrivileges": "ReadAccess, WriteAccess",
                },
                {
                    "@odata.type": "#Microsoft.Dynamics.CRM.UserAccessAuditDetail",
                    "AuditRecord": { "action": 64 },
                },
            ],
        },
    })
}

#[tokio::test]
async fn test_history_page_parses_all_detail_kinds() {
    let org = MockOrg::new(&[1033]);
    let annotated = Uuid::new_v4();
    let looked_up = Uuid::new_v4();
    org.add_user_name(looked_up, "Grace Hopper");
    org.set_canned(
        "RetrieveRecordChangeHistory",
        canned_history(&annotated, &looked_up),
    );

    let page = load_change_history(&org, BASE, "account", &Uuid::new_v4(), 1, None)
        .await
        .unwrap();

    assert!(page.more_records);
    assert_eq!(page.paging_cookie.as_deref(), Some("<cookie page=\"1\" />"));
    assert_eq!(page.records.len(), 4);

    let update = &page.records[0];
    assert_eq!(update.action, 2);
    assert_eq!(update.action_name.as_deref(), Some("Update"));
    // the formatted name from the response wins; no lookup needed...
    assert_eq!(update.user_name.as_deref(), Some("Ada Lovelace"));
    match &update.detail {
        AuditDetail::Attribute { changes } => {
            let names: Vec<&str> = changes.iter().map(|x| x.logical_name.as_str()).collect();
            assert_eq!(names, vec!["name", "revenue", "telephone1"]);
            assert_eq!(changes[0].old_value.as_deref(), Some("Contoso"));
            assert_eq!(changes[0].new_value.as_deref(), Some("Contoso Ltd"));
            // formatted value preferred over the raw number...
            assert_eq!(changes[1].old_value.as_deref(), Some("$1,000.00"));
            assert_eq!(changes[1].new_value, None);
            assert_eq!(changes[2].old_value, None);
            assert_eq!(changes[2].new_value.as_deref(), Some("555-0100"));
        }
        x => panic!("expected an attribute detail, got {x:?}"),
    }

    let associate = &page.records[1];
    // bare user id in the response, resolved through the systemusers lookup...
    assert_eq!(associate.user_name.as_deref(), Some("Grace Hopper"));
    match &associate.detail {
        AuditDetail::Relationship {
            relationship_name,
            targets,
        } => {
            assert_eq!(relationship_name, "account_contacts");
            assert_eq!(
                targets,
                &vec![
                    "Grace Hopper".to_string(),
                    "contacts(9f8e0000-0000-0000-0000-000000000001)".to_string()
                ]
            );
        }
        x => panic!("expected a relationship detail, got {x:?}"),
    }

    match &page.records[2].detail {
        AuditDetail::Share {
            principal,
            old_privileges,
            new_privileges,
        } => {
            assert_eq!(principal, "Sales Team");
            assert_eq!(old_privileges.as_deref(), Some("ReadAccess"));
            assert_eq!(new_privileges.as_deref(), Some("ReadAccess, WriteAccess"));
        }
        x => panic!("expected a share detail, got {x:?}"),
    }

    match &page.records[3].detail {
        AuditDetail::Other { odata_type } => {
            assert_eq!(odata_type, "#Microsoft.Dynamics.CRM.UserAccessAuditDetail");
        }
        x => panic!("expected an unmodelled detail, got {x:?}"),
    }
}

#[tokio::test]
async fn test_unknown_user_degrades_to_raw_id() {
    let org = MockOrg::new(&[1033]);
    let ghost = Uuid::new_v4();
    // no add_user_name: the systemusers lookup will 404...
    org.set_canned(
        "RetrieveRecordChangeHistory",
        json!({
            "AuditDetailCollection": {
                "MoreRecords": false,
                "AuditDetails": [{
                    "@odata.type": "#Microsoft.Dynamics.CRM.AttributeAuditDetail",
                    "AuditRecord": {
                        "action": 1,
                        "_userid_value": ghost.to_string(),
                    },
                    "OldValue": {},
                    "NewValue": { "name": "Contoso" },
                }],
            },
        }),
    );

    let page = load_change_history(&org, BASE, "account", &Uuid::new_v4(), 1, None)
        .await
        .unwrap();
    assert_eq!(page.records[0].user_name.as_deref(), Some(ghost.to_string().as_str()));
    assert!(!page.more_records);
    assert_eq!(page.paging_cookie, None);
}

#[tokio::test]
async fn test_detail_without_type_discriminator_fails() {
    let org = MockOrg::new(&[1033]);
    org.set_canned(
        "RetrieveRecordChangeHistory",
        json!({
            "AuditDetailCollection": {
                "AuditDetails": [{ "AuditRecord": { "action": 2 } }],
            },
        }),
    );

    let result = load_change_history(&org, BASE, "account", &Uuid::new_v4(), 1, None).await;
    assert!(matches!(result, Err(LabelError::MissingField(_))));
}

#[tokio::test]
async fn test_empty_entity_name_rejected() {
    let org = MockOrg::new(&[1033]);
    let result = load_change_history(&org, BASE, "  ", &Uuid::new_v4(), 1, None).await;
    assert!(matches!(result, Err(LabelError::InvalidInput(_))));
}
