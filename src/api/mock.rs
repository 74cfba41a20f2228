// SPDX-License-Identifier: GPL-3.0-or-later

//! An in-memory mock org to use in unit and integration tests.
//!
//! [MockOrg] simulates the slice of an org this crate talks to: the acting
//! user's language settings, a form document whose content depends on the
//! *current* UI language, ETag revisions, the provisioned-language list and
//! a handful of canned metadata/audit responses. Requests are dispatched on
//! URL shape, the way the real endpoints are addressed.

use crate::{LabelError, api::Transport, data::Lcid};
use etag::EntityTag;
use serde_json::{Value, json};
use std::{
    collections::HashMap,
    str::FromStr,
    sync::{Arc, Mutex},
};
use uuid::Uuid;

#[derive(Debug, Default)]
struct MockState {
    user_id: Uuid,
    ui_lcid: Lcid,
    help_lcid: Lcid,
    locale_id: Lcid,
    provisioned: Vec<Lcid>,
    /// Form document served per UI language currently in effect.
    form_xml: HashMap<Lcid, String>,
    /// Bumped on every accepted form PATCH; source of the served ETag.
    etag_rev: u64,
    /// Every accepted form PATCH, tagged w/ the UI language in effect.
    patched_forms: Vec<(Lcid, String)>,
    /// Every `uilanguageid` accepted through the settings endpoint.
    settings_writes: Vec<Lcid>,
    /// Serve an empty document for this many fetches (settle-poll tests).
    empty_fetches: u32,
    /// Fail the Nth (0-based) settings write w/ HTTP 500, once.
    fail_settings_write_at: Option<usize>,
    /// Reject all form PATCHes w/ HTTP 412.
    reject_form_patches: bool,
    user_names: HashMap<Uuid, String>,
    canned: HashMap<&'static str, Value>,
    soap_requests: Vec<String>,
    json_posts: Vec<(String, Value)>,
}

/// The mock org proper. Cloning shares the underlying state, so a test can
/// keep a handle for assertions while the workflow under test drives
/// another.
#[derive(Clone, Debug)]
pub struct MockOrg(Arc<Mutex<MockState>>);

impl MockOrg {
    /// Construct an org w/ the given provisioned languages, the first of
    /// which is the acting user's current UI language.
    pub fn new(provisioned: &[Lcid]) -> Self {
        let ui = provisioned.first().copied().unwrap_or(1033);
        MockOrg(Arc::new(Mutex::new(MockState {
            user_id: Uuid::new_v4(),
            ui_lcid: ui,
            help_lcid: ui,
            locale_id: ui,
            provisioned: provisioned.to_vec(),
            ..Default::default()
        })))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.0.lock().expect("MockOrg state poisoned")
    }

    /// Set the form document served while `lcid` is the current UI language.
    pub fn set_form_xml(&self, lcid: Lcid, xml: impl Into<String>) {
        self.lock().form_xml.insert(lcid, xml.into());
    }

    /// Serve an empty document for the next `n` form fetches.
    pub fn serve_empty_fetches(&self, n: u32) {
        self.lock().empty_fetches = n;
    }

    /// Fail the `n`-th (0-based) settings write w/ HTTP 500.
    pub fn fail_settings_write_at(&self, n: usize) {
        self.lock().fail_settings_write_at = Some(n);
    }

    /// Reject all form PATCHes w/ HTTP 412 (stale `If-Match`).
    pub fn reject_form_patches(&self) {
        self.lock().reject_form_patches = true;
    }

    /// Register a user display name for the `systemusers` lookup.
    pub fn add_user_name(&self, id: Uuid, name: impl Into<String>) {
        self.lock().user_names.insert(id, name.into());
    }

    /// Install a canned JSON response for a URL fragment: one of
    /// `"GlobalOptionSetDefinitions"`, `"RetrieveRecordChangeHistory"` or
    /// `"EntityDefinitions"`.
    pub fn set_canned(&self, fragment: &'static str, value: Value) {
        self.lock().canned.insert(fragment, value);
    }

    /// The acting user's id.
    pub fn user_id(&self) -> Uuid {
        self.lock().user_id
    }

    /// The UI language currently in effect.
    pub fn ui_lcid(&self) -> Lcid {
        self.lock().ui_lcid
    }

    /// Every `uilanguageid` accepted through the settings endpoint, in
    /// order.
    pub fn settings_writes(&self) -> Vec<Lcid> {
        self.lock().settings_writes.clone()
    }

    /// Every accepted form PATCH, tagged w/ the UI language in effect at
    /// the time of the write.
    pub fn patched_forms(&self) -> Vec<(Lcid, String)> {
        self.lock().patched_forms.clone()
    }

    /// SOAP envelopes received on the Organization service endpoint.
    pub fn soap_requests(&self) -> Vec<String> {
        self.lock().soap_requests.clone()
    }

    /// Every JSON POST received (`PublishXml`, `UpdateOptionValue`, ...),
    /// as `(url, body)` pairs.
    pub fn json_posts(&self) -> Vec<(String, Value)> {
        self.lock().json_posts.clone()
    }

    fn current_etag(&self) -> EntityTag {
        let rev = self.lock().etag_rev;
        EntityTag::from_str(&format!("W/\"{rev}\"")).expect("mock etag")
    }
}

fn http(status: u16, body: &str) -> LabelError {
    LabelError::Http {
        status,
        body: body.to_string(),
    }
}

impl MockOrg {
    fn serve_get(&self, url: &str) -> Result<Value, LabelError> {
        let mut s = self.lock();
        if url.contains("RetrieveProvisionedLanguages") {
            return Ok(json!({ "value": s.provisioned }));
        }
        if url.contains("WhoAmI") {
            return Ok(json!({ "UserId": s.user_id.to_string() }));
        }
        if url.contains("usersettingscollection(") {
            return Ok(json!({
                "uilanguageid": s.ui_lcid,
                "helplanguageid": s.help_lcid,
                "localeid": s.locale_id,
            }));
        }
        if url.contains("systemforms(") {
            if s.empty_fetches > 0 {
                s.empty_fetches -= 1;
                return Ok(json!({ "formxml": "" }));
            }
            let xml = s.form_xml.get(&s.ui_lcid).cloned().unwrap_or_default();
            return Ok(json!({ "formxml": xml }));
        }
        if url.contains("systemusers(") {
            for (id, name) in s.user_names.iter() {
                if url.contains(&id.to_string()) {
                    return Ok(json!({ "fullname": name }));
                }
            }
            return Err(http(404, "systemuser does not exist"));
        }
        for (fragment, value) in s.canned.iter() {
            if url.contains(fragment) {
                return Ok(value.clone());
            }
        }
        Err(http(404, "no mock route matches"))
    }
}

impl Transport for MockOrg {
    async fn get_json(&self, url: &str) -> Result<Value, LabelError> {
        self.serve_get(url)
    }

    async fn get_json_with_etag(&self, url: &str) -> Result<(Value, Option<EntityTag>), LabelError> {
        let value = self.serve_get(url)?;
        let etag = if url.contains("systemforms(") {
            Some(self.current_etag())
        } else {
            None
        };
        Ok((value, etag))
    }

    async fn patch_json(
        &self,
        url: &str,
        body: &Value,
        if_match: Option<&EntityTag>,
    ) -> Result<(), LabelError> {
        if url.contains("usersettingscollection(") {
            let lcid = body["uilanguageid"]
                .as_u64()
                .ok_or(LabelError::MissingField("uilanguageid".into()))? as Lcid;
            let mut s = self.lock();
            if s.fail_settings_write_at == Some(s.settings_writes.len()) {
                s.fail_settings_write_at = None;
                return Err(http(500, "simulated settings failure"));
            }
            s.settings_writes.push(lcid);
            s.ui_lcid = lcid;
            return Ok(());
        }
        if url.contains("systemforms(") {
            if self.lock().reject_form_patches {
                return Err(http(412, "precondition failed"));
            }
            if let Some(x) = if_match
                && !x.weak_eq(&self.current_etag())
            {
                return Err(http(412, "precondition failed"));
            }
            let xml = body["formxml"]
                .as_str()
                .ok_or(LabelError::MissingField("formxml".into()))?
                .to_string();
            let mut s = self.lock();
            let lcid = s.ui_lcid;
            s.form_xml.insert(lcid, xml.clone());
            s.patched_forms.push((lcid, xml));
            s.etag_rev += 1;
            return Ok(());
        }
        Err(http(404, "no mock route matches"))
    }

    async fn post_json(&self, url: &str, body: &Value) -> Result<Value, LabelError> {
        if url.contains("PublishXml") || url.contains("UpdateOptionValue") {
            self.lock().json_posts.push((url.to_string(), body.clone()));
            return Ok(Value::Null);
        }
        Err(http(404, "no mock route matches"))
    }

    async fn post_soap(&self, _url: &str, _action: &str, envelope: &str) -> Result<String, LabelError> {
        self.lock().soap_requests.push(envelope.to_string());
        Ok("<s:Envelope><s:Body><ExecuteResponse/></s:Body></s:Envelope>".to_string())
    }
}
