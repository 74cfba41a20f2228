// SPDX-License-Identifier: GPL-3.0-or-later

use crate::{LabelError, api::Transport, config::config, data::Lcid};
use serde_json::json;
use uuid::Uuid;

/// The acting user's language settings -- the restoration point the
/// language-iteration workflow captures before touching anything.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct UserLanguageSettings {
    /// `uilanguageid` -- the one property the workflow rewrites.
    pub ui_language_id: Lcid,
    /// `helplanguageid`, captured for diagnostics only.
    pub help_language_id: Option<Lcid>,
    /// `localeid`, captured for diagnostics only.
    pub locale_id: Option<Lcid>,
}

/// Resolve the acting user's id.
pub async fn who_am_i<T: Transport>(t: &T, base_url: &str) -> Result<Uuid, LabelError> {
    let url = format!("{}/WhoAmI()", config().api_root(base_url));
    let json = t.get_json(&url).await?;
    let raw = json["UserId"]
        .as_str()
        .ok_or(LabelError::MissingField("WhoAmI response lacks UserId".into()))?;
    Uuid::parse_str(raw)
        .map_err(|x| LabelError::Runtime(format!("Malformed UserId '{raw}': {x}").into()))
}

/// Fetch the user's current language settings.
pub async fn user_language_settings<T: Transport>(
    t: &T,
    base_url: &str,
    user_id: &Uuid,
) -> Result<UserLanguageSettings, LabelError> {
    let url = format!(
        "{}/usersettingscollection({})?$select=uilanguageid,helplanguageid,localeid",
        config().api_root(base_url),
        user_id
    );
    let json = t.get_json(&url).await?;
    let ui_language_id = json["uilanguageid"].as_u64().ok_or(LabelError::MissingField(
        "user settings lack uilanguageid".into(),
    ))? as Lcid;
    Ok(UserLanguageSettings {
        ui_language_id,
        help_language_id: json["helplanguageid"].as_u64().map(|x| x as Lcid),
        locale_id: json["localeid"].as_u64().map(|x| x as Lcid),
    })
}

/// Switch the user's UI language. The form-document endpoint shapes its
/// response by this server-side session property; there is no way to ask
/// for a specific language directly.
pub async fn set_ui_language<T: Transport>(
    t: &T,
    base_url: &str,
    user_id: &Uuid,
    lcid: Lcid,
) -> Result<(), LabelError> {
    let url = format!(
        "{}/usersettingscollection({})",
        config().api_root(base_url),
        user_id
    );
    t.patch_json(&url, &json!({ "uilanguageid": lcid }), None).await
}
