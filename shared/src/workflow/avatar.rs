use log::{debug, info};

use crate::api::AccountApi;
use crate::error::Result;
use crate::models::profile::AvatarChange;

/// Applies one pending avatar change through the matching remote call.
///
/// Returns `Ok(true)` when a change was applied, so the caller knows to
/// clear the pending change, and `Ok(false)` when there was nothing to
/// apply.
pub async fn update_avatar<A>(api: &A, change: Option<&AvatarChange>, user_id: &str) -> Result<bool>
where
    A: AccountApi + ?Sized,
{
    let Some(change) = change else {
        return Ok(false);
    };

    match change {
        AvatarChange::Reset => {
            debug!("Resetting avatar for user {}", user_id);
            api.reset_avatar(user_id).await?;
        }
        AvatarChange::Url(url) if url.trim().is_empty() => {
            debug!("Ignoring avatar change with an empty URL");
            return Ok(false);
        }
        AvatarChange::Url(url) => {
            debug!("Setting avatar for user {} from {}", user_id, url);
            api.set_avatar_url(user_id, url).await?;
        }
        AvatarChange::Service {
            blob,
            content_type,
            service,
        } => {
            debug!("Setting avatar from service {}", service);
            api.set_avatar_from_service(blob, content_type, service).await?;
        }
        AvatarChange::Upload(upload) => {
            debug!(
                "Uploading avatar {} ({} bytes) for user {}",
                upload.file_name,
                upload.bytes.len(),
                user_id
            );
            api.upload_avatar(user_id, upload).await?;
        }
    }

    info!("Avatar changed for user {}", user_id);
    Ok(true)
}
