use async_trait::async_trait;
use shared::dto::avatar::AvatarSuggestionDto;
use shared::dto::profile::SaveUserProfileRequest;
use shared::{AccountApi, AvatarUpload, Result};

use crate::api::{methods, users};

/// [`AccountApi`] backed by the real HTTP endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RemoteAccountApi;

#[async_trait(?Send)]
impl AccountApi for RemoteAccountApi {
    async fn check_username_availability(&self, username: &str) -> Result<bool> {
        methods::check_username_availability(username).await
    }

    async fn get_avatar_suggestions(&self) -> Result<Vec<AvatarSuggestionDto>> {
        methods::get_avatar_suggestions().await
    }

    async fn save_user_profile(&self, request: &SaveUserProfileRequest) -> Result<()> {
        methods::save_user_profile(request).await
    }

    async fn set_avatar_from_service(
        &self,
        blob: &str,
        content_type: &str,
        service: &str,
    ) -> Result<()> {
        methods::set_avatar_from_service(blob, content_type, service).await
    }

    async fn set_avatar_url(&self, user_id: &str, avatar_url: &str) -> Result<()> {
        users::set_avatar_url(user_id, avatar_url).await
    }

    async fn reset_avatar(&self, user_id: &str) -> Result<()> {
        users::reset_avatar(user_id).await
    }

    async fn upload_avatar(&self, user_id: &str, upload: &AvatarUpload) -> Result<()> {
        users::upload_avatar(user_id, upload).await
    }
}
