use async_trait::async_trait;

use crate::dto::avatar::AvatarSuggestionDto;
use crate::dto::profile::SaveUserProfileRequest;
use crate::error::Result;
use crate::models::profile::AvatarUpload;

/// Remote operations the profile screen consumes.
///
/// Method calls (`check_username_availability`, `get_avatar_suggestions`,
/// `save_user_profile`, `set_avatar_from_service`) go through the method
/// bridge; the avatar URL/reset/upload operations are REST endpoints.
/// Futures are not `Send`: the browser event loop is single threaded.
#[async_trait(?Send)]
pub trait AccountApi {
    async fn check_username_availability(&self, username: &str) -> Result<bool>;

    async fn get_avatar_suggestions(&self) -> Result<Vec<AvatarSuggestionDto>>;

    async fn save_user_profile(&self, request: &SaveUserProfileRequest) -> Result<()>;

    async fn set_avatar_from_service(
        &self,
        blob: &str,
        content_type: &str,
        service: &str,
    ) -> Result<()>;

    async fn set_avatar_url(&self, user_id: &str, avatar_url: &str) -> Result<()>;

    async fn reset_avatar(&self, user_id: &str) -> Result<()>;

    async fn upload_avatar(&self, user_id: &str, upload: &AvatarUpload) -> Result<()>;
}
