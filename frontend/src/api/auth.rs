use crate::api::api_url;
use crate::api::utils::{authenticated_get, fetch_json};
use log::debug;
use shared::{Result, SharedError, UserDto};

/// Fetches the authenticated user's persisted record.
pub async fn get_current_user() -> Result<UserDto> {
    debug!("Fetching current user");

    let request = authenticated_get(&api_url("/api/v1/me"))
        .build()
        .map_err(|e| SharedError::Internal(e.to_string()))?;
    let user: UserDto = fetch_json(request, "user response").await?;

    debug!("Successfully fetched current user: {}", user.id);
    Ok(user)
}
