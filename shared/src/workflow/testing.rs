//! Recording test double for [`AccountApi`].

use std::cell::RefCell;
use std::collections::HashSet;

use async_trait::async_trait;

use crate::api::AccountApi;
use crate::dto::avatar::AvatarSuggestionDto;
use crate::dto::profile::SaveUserProfileRequest;
use crate::error::{Result, SharedError};
use crate::models::profile::AvatarUpload;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    CheckUsername(String),
    GetAvatarSuggestions,
    SaveUserProfile(SaveUserProfileRequest),
    SetAvatarFromService {
        blob: String,
        content_type: String,
        service: String,
    },
    SetAvatarUrl(String, String),
    ResetAvatar(String),
    UploadAvatar(String, String),
}

#[derive(Default)]
pub struct RecordingApi {
    pub calls: RefCell<Vec<ApiCall>>,
    pub taken_usernames: HashSet<String>,
    /// Usernames whose availability answer arrives late
    pub slow_usernames: HashSet<String>,
    pub avatar_failure: Option<SharedError>,
    pub save_failure: Option<SharedError>,
    pub suggestions: Vec<AvatarSuggestionDto>,
}

impl RecordingApi {
    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: ApiCall) {
        self.calls.borrow_mut().push(call);
    }

    fn avatar_result(&self) -> Result<()> {
        match &self.avatar_failure {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait(?Send)]
impl AccountApi for RecordingApi {
    async fn check_username_availability(&self, username: &str) -> Result<bool> {
        self.record(ApiCall::CheckUsername(username.to_string()));
        if self.slow_usernames.contains(username) {
            for _ in 0..5 {
                tokio::task::yield_now().await;
            }
        }
        Ok(!self.taken_usernames.contains(username))
    }

    async fn get_avatar_suggestions(&self) -> Result<Vec<AvatarSuggestionDto>> {
        self.record(ApiCall::GetAvatarSuggestions);
        Ok(self.suggestions.clone())
    }

    async fn save_user_profile(&self, request: &SaveUserProfileRequest) -> Result<()> {
        self.record(ApiCall::SaveUserProfile(request.clone()));
        match &self.save_failure {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }

    async fn set_avatar_from_service(
        &self,
        blob: &str,
        content_type: &str,
        service: &str,
    ) -> Result<()> {
        self.record(ApiCall::SetAvatarFromService {
            blob: blob.to_string(),
            content_type: content_type.to_string(),
            service: service.to_string(),
        });
        self.avatar_result()
    }

    async fn set_avatar_url(&self, user_id: &str, avatar_url: &str) -> Result<()> {
        self.record(ApiCall::SetAvatarUrl(user_id.to_string(), avatar_url.to_string()));
        self.avatar_result()
    }

    async fn reset_avatar(&self, user_id: &str) -> Result<()> {
        self.record(ApiCall::ResetAvatar(user_id.to_string()));
        self.avatar_result()
    }

    async fn upload_avatar(&self, user_id: &str, upload: &AvatarUpload) -> Result<()> {
        self.record(ApiCall::UploadAvatar(user_id.to_string(), upload.file_name.clone()));
        self.avatar_result()
    }
}
