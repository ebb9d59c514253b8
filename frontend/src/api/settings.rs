use std::collections::HashMap;

use log::debug;
use serde_json::Value;
use shared::dto::common::PublicSettingsResponse;
use shared::models::settings::PROFILE_SETTING_KEYS;
use shared::{Result, SharedError};

use crate::api::api_url;
use crate::api::utils::{authenticated_get, fetch_json};

/// Fetches the public settings the profile screen depends on.
pub async fn get_profile_settings() -> Result<HashMap<String, Value>> {
    let query = serde_json::to_string(&serde_json::json!({ "_id": { "$in": PROFILE_SETTING_KEYS } }))?;
    let url = format!(
        "{}?query={}",
        api_url("/api/v1/settings.public"),
        js_sys::encode_uri_component(&query)
    );

    let request = authenticated_get(&url)
        .build()
        .map_err(|e| SharedError::Internal(e.to_string()))?;
    let settings: PublicSettingsResponse = fetch_json(request, "settings").await?;

    debug!("Loaded {} settings", settings.settings.len());
    Ok(settings
        .settings
        .into_iter()
        .map(|s| (s.id, s.value))
        .collect())
}
