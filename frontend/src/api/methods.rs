use log::debug;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use shared::dto::avatar::{suggestions_from_map, AvatarSuggestionDto, AvatarSuggestionMap};
use shared::dto::method::{decode_reply, BridgeEnvelope, MethodCall};
use shared::dto::profile::SaveUserProfileRequest;
use shared::{Result, SharedError};

use crate::api::api_url;
use crate::api::utils::{authenticated_post, fetch_json};

/// Invokes a remote method through the REST bridge.
pub async fn call_method<T: DeserializeOwned>(method: &str, params: Vec<Value>) -> Result<T> {
    debug!("Calling method {}", method);

    let body = MethodCall::new(method, params).to_body()?;
    let request = authenticated_post(&api_url(&format!("/api/v1/method.call/{}", method)))
        .json(&body)
        .map_err(|e| SharedError::Conversion(format!("Failed to serialize {} call: {}", method, e)))?;

    let envelope: BridgeEnvelope = fetch_json(request, &format!("{} reply", method)).await?;

    decode_reply(method, &envelope)
}

pub async fn check_username_availability(username: &str) -> Result<bool> {
    call_method("checkUsernameAvailability", vec![json!(username)]).await
}

pub async fn get_avatar_suggestions() -> Result<Vec<AvatarSuggestionDto>> {
    let map: Option<AvatarSuggestionMap> = call_method("getAvatarSuggestion", vec![]).await?;
    Ok(map.map(suggestions_from_map).unwrap_or_default())
}

pub async fn save_user_profile(request: &SaveUserProfileRequest) -> Result<()> {
    let settings = serde_json::to_value(request)?;
    // Second parameter carries custom fields, which this screen does not edit
    let _: Value = call_method("saveUserProfile", vec![settings, json!({})]).await?;
    Ok(())
}

pub async fn set_avatar_from_service(blob: &str, content_type: &str, service: &str) -> Result<()> {
    let _: Value = call_method(
        "setAvatarFromService",
        vec![json!(blob), json!(content_type), json!(service)],
    )
    .await?;
    Ok(())
}
