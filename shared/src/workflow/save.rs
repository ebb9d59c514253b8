use log::{debug, error, info};
use sha2::{Digest, Sha256};

use crate::api::AccountApi;
use crate::dto::profile::SaveUserProfileRequest;
use crate::dto::user::UserDto;
use crate::error::{Result, SharedError};
use crate::models::profile::ProfileValues;
use crate::models::settings::AccountSettings;
use crate::workflow::avatar::update_avatar;

/// Re-authentication is needed for email or password changes, and only
/// for accounts that actually have a password.
pub fn requires_password_confirmation(values: &ProfileValues, user: &UserDto) -> bool {
    let email_changed = values.email != user.primary_email().unwrap_or_default();
    let password_set = !values.password.is_empty();
    (email_changed || password_set) && user.has_password_credential()
}

/// Lowercase hex SHA-256 of the typed password, the form the server
/// compares against.
pub fn hash_password(typed_password: &str) -> String {
    hex::encode(Sha256::digest(typed_password.as_bytes()))
}

/// Selects the fields the user may change; everything else is left out of
/// the request.
pub fn build_save_request(
    values: &ProfileValues,
    user: &UserDto,
    settings: &AccountSettings,
    typed_password: Option<&str>,
) -> SaveUserProfileRequest {
    let allowed = |flag: bool, value: &str| flag.then(|| value.to_string());

    let email_changed = values.email != user.primary_email().unwrap_or_default();

    SaveUserProfileRequest {
        realname: allowed(settings.allow_real_name_change, &values.realname),
        email: allowed(settings.allow_email_change && email_changed, &values.email),
        new_password: allowed(
            settings.allow_password_change && !values.password.is_empty(),
            &values.password,
        ),
        username: allowed(settings.can_change_username, &values.username),
        status_text: allowed(settings.allow_user_status_message_change, &values.status_text),
        typed_password: typed_password
            .filter(|p| !p.is_empty())
            .map(hash_password),
        bio: values.bio.clone(),
    }
}

/// What happened to the pending avatar change during a save.
#[derive(Debug, Clone, PartialEq)]
pub enum AvatarOutcome {
    NoChange,
    Applied,
    Failed(SharedError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SaveReport {
    pub avatar: AvatarOutcome,
    pub profile: Result<()>,
}

impl SaveReport {
    pub fn avatar_applied(&self) -> bool {
        self.avatar == AvatarOutcome::Applied
    }

    pub fn is_success(&self) -> bool {
        self.profile.is_ok() && !matches!(self.avatar, AvatarOutcome::Failed(_))
    }
}

/// Runs the save: the avatar update first, then the profile fields.
///
/// An avatar failure does not stop the profile submission; both outcomes
/// are reported so the caller can keep whatever was not saved.
pub async fn save_profile<A>(
    api: &A,
    values: &ProfileValues,
    user: &UserDto,
    settings: &AccountSettings,
    typed_password: Option<&str>,
) -> SaveReport
where
    A: AccountApi + ?Sized,
{
    let avatar = match update_avatar(api, values.avatar.as_ref(), &user.id).await {
        Ok(true) => AvatarOutcome::Applied,
        Ok(false) => AvatarOutcome::NoChange,
        Err(e) => {
            error!("Failed to update avatar: {}", e);
            AvatarOutcome::Failed(e)
        }
    };

    let request = build_save_request(values, user, settings, typed_password);
    debug!(
        "Saving profile for user {} (confirmed password: {})",
        user.id,
        request.typed_password.is_some()
    );

    let profile = api.save_user_profile(&request).await;
    match &profile {
        Ok(()) => info!("Profile saved for user {}", user.id),
        Err(e) => error!("Failed to save profile: {}", e),
    }

    SaveReport { avatar, profile }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::dto::user::{EmailDto, PasswordServiceDto, UserServicesDto};
    use crate::models::profile::AvatarChange;
    use crate::models::settings::compile_names_regex;
    use crate::workflow::testing::{ApiCall, RecordingApi};
    use pretty_assertions::assert_eq;
    use test_log::test;

    fn user(with_password: bool) -> UserDto {
        UserDto {
            id: "u1".to_string(),
            name: Some("Ada".to_string()),
            username: Some("ada".to_string()),
            emails: vec![EmailDto {
                address: "ada@example.com".to_string(),
                verified: true,
            }],
            bio: Some("old bio".to_string()),
            services: with_password.then(|| UserServicesDto {
                password: Some(PasswordServiceDto {
                    bcrypt: Some("$2b$10$hash".to_string()),
                }),
            }),
            ..Default::default()
        }
    }

    fn all_allowed() -> AccountSettings {
        AccountSettings {
            allow_real_name_change: true,
            allow_user_status_message_change: true,
            allow_email_change: true,
            allow_password_change: true,
            allow_user_avatar_change: true,
            allow_delete_own_account: true,
            can_change_username: true,
            require_name: true,
            names_regex: compile_names_regex("[a-z]+"),
        }
    }

    fn values_for(user: &UserDto) -> ProfileValues {
        ProfileValues::from_user(user)
    }

    #[test]
    fn test_hash_password_is_sha256_hex() {
        assert_eq!(
            hash_password("password"),
            "5e884898da28047151d0e56f8dc6292773603d0d6aabbdd62a11ef721d1542d8"
        );
    }

    #[test]
    fn test_confirmation_required_for_email_change() {
        let user = user(true);
        let mut values = values_for(&user);
        assert!(!requires_password_confirmation(&values, &user));
        values.email = "new@example.com".to_string();
        assert!(requires_password_confirmation(&values, &user));
    }

    #[test]
    fn test_confirmation_required_for_new_password() {
        let user = user(true);
        let mut values = values_for(&user);
        values.password = "n3w".to_string();
        assert!(requires_password_confirmation(&values, &user));
    }

    #[test]
    fn test_no_confirmation_without_password_credential() {
        let user = user(false);
        let mut values = values_for(&user);
        values.email = "new@example.com".to_string();
        values.password = "n3w".to_string();
        assert!(!requires_password_confirmation(&values, &user));
    }

    #[test]
    fn test_other_edits_need_no_confirmation() {
        let user = user(true);
        let mut values = values_for(&user);
        values.bio = "new bio".to_string();
        values.realname = "Ada L".to_string();
        assert!(!requires_password_confirmation(&values, &user));
    }

    #[test]
    fn test_locked_real_name_is_omitted() {
        let user = user(true);
        let settings = AccountSettings {
            allow_real_name_change: false,
            ..all_allowed()
        };
        let mut values = values_for(&user);
        values.realname = "Edited".to_string();
        let request = build_save_request(&values, &user, &settings, None);
        assert_eq!(request.realname, None);
    }

    #[test]
    fn test_unchanged_email_is_omitted() {
        let user = user(true);
        let values = values_for(&user);
        let request = build_save_request(&values, &user, &all_allowed(), None);
        assert_eq!(request.email, None);
    }

    #[test]
    fn test_changed_email_is_sent() {
        let user = user(true);
        let mut values = values_for(&user);
        values.email = "new@example.com".to_string();
        let request = build_save_request(&values, &user, &all_allowed(), Some("current"));
        assert_eq!(request.email.as_deref(), Some("new@example.com"));
        assert_eq!(request.typed_password, Some(hash_password("current")));
    }

    #[test]
    fn test_nothing_allowed_sends_only_bio() {
        let user = user(true);
        let mut values = values_for(&user);
        values.realname = "X".to_string();
        values.email = "x@example.com".to_string();
        values.username = "x".to_string();
        values.password = "p".to_string();
        values.status_text = "s".to_string();
        values.bio = "new bio".to_string();
        let request = build_save_request(&values, &user, &AccountSettings::default(), None);
        assert_eq!(
            request,
            SaveUserProfileRequest {
                bio: "new bio".to_string(),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_empty_password_not_sent() {
        let user = user(true);
        let values = values_for(&user);
        let request = build_save_request(&values, &user, &all_allowed(), Some(""));
        assert_eq!(request.new_password, None);
        assert_eq!(request.typed_password, None);
    }

    #[tokio::test]
    async fn test_avatar_is_applied_before_profile() {
        let api = RecordingApi::default();
        let user = user(true);
        let mut values = values_for(&user);
        values.avatar = Some(AvatarChange::Reset);

        let report = save_profile(&api, &values, &user, &all_allowed(), None).await;

        assert!(report.avatar_applied());
        assert!(report.is_success());
        let calls = api.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], ApiCall::ResetAvatar("u1".to_string()));
        assert!(matches!(calls[1], ApiCall::SaveUserProfile(_)));
    }

    #[tokio::test]
    async fn test_avatar_failure_still_submits_profile() {
        let api = RecordingApi {
            avatar_failure: Some(SharedError::Network("offline".to_string())),
            ..Default::default()
        };
        let user = user(true);
        let mut values = values_for(&user);
        values.avatar = Some(AvatarChange::Url("https://example.com/a.png".to_string()));

        let report = save_profile(&api, &values, &user, &all_allowed(), None).await;

        assert_eq!(
            report.avatar,
            AvatarOutcome::Failed(SharedError::Network("offline".to_string()))
        );
        assert!(report.profile.is_ok());
        assert!(!report.is_success());
        assert_eq!(api.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_profile_failure_is_reported() {
        let api = RecordingApi {
            save_failure: Some(SharedError::Timeout(15_000)),
            ..Default::default()
        };
        let user = user(true);
        let values = values_for(&user);

        let report = save_profile(&api, &values, &user, &all_allowed(), None).await;

        assert_eq!(report.avatar, AvatarOutcome::NoChange);
        assert_eq!(report.profile, Err(SharedError::Timeout(15_000)));
        assert!(!report.is_success());
    }
}
