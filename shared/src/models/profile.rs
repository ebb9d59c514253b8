use serde::{Deserialize, Serialize};
use crate::dto::user::UserDto;

/// Raw image picked from the user's disk, waiting to be uploaded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AvatarUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// A pending, unsaved avatar edit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum AvatarChange {
    /// Back to the server-generated default avatar
    Reset,
    /// Fetch the image from an external URL
    Url(String),
    /// Image offered by an external service
    Service {
        blob: String,
        content_type: String,
        service: String,
    },
    /// Image file uploaded by the user
    Upload(AvatarUpload),
}

/// Editable draft of the user's profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProfileValues {
    pub realname: String,
    pub email: String,
    pub username: String,
    pub password: String,
    pub confirmation_password: String,
    pub avatar: Option<AvatarChange>,
    pub status_text: String,
    pub bio: String,
}

impl ProfileValues {
    /// Seeds the draft from the persisted record; missing optional fields
    /// become empty strings.
    pub fn from_user(user: &UserDto) -> Self {
        Self {
            realname: user.name.clone().unwrap_or_default(),
            email: user.primary_email().unwrap_or_default().to_string(),
            username: user.username.clone().unwrap_or_default(),
            password: String::new(),
            confirmation_password: String::new(),
            avatar: None,
            status_text: user.status_text.clone().unwrap_or_default(),
            bio: user.bio.clone().unwrap_or_default(),
        }
    }

    /// Sets one text field. Emptying the password also empties its
    /// confirmation.
    pub fn set(&mut self, field: ProfileField, value: String) {
        match field {
            ProfileField::Realname => self.realname = value,
            ProfileField::Email => self.email = value,
            ProfileField::Username => self.username = value,
            ProfileField::Password => {
                if value.is_empty() {
                    self.confirmation_password.clear();
                }
                self.password = value;
            }
            ProfileField::ConfirmationPassword => self.confirmation_password = value,
            ProfileField::StatusText => self.status_text = value,
            ProfileField::Bio => self.bio = value,
        }
    }
}

/// Text fields of [`ProfileValues`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileField {
    Realname,
    Email,
    Username,
    Password,
    ConfirmationPassword,
    StatusText,
    Bio,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::user::EmailDto;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_user_defaults_missing_fields() {
        let user = UserDto {
            id: "u1".to_string(),
            username: Some("ada".to_string()),
            ..Default::default()
        };
        let values = ProfileValues::from_user(&user);
        assert_eq!(values.username, "ada");
        assert_eq!(values.realname, "");
        assert_eq!(values.email, "");
        assert_eq!(values.bio, "");
        assert_eq!(values.avatar, None);
    }

    #[test]
    fn test_from_user_takes_first_email() {
        let user = UserDto {
            id: "u1".to_string(),
            emails: vec![
                EmailDto { address: "first@example.com".to_string(), verified: false },
                EmailDto { address: "second@example.com".to_string(), verified: true },
            ],
            ..Default::default()
        };
        assert_eq!(ProfileValues::from_user(&user).email, "first@example.com");
    }

    #[test]
    fn test_clearing_password_clears_confirmation() {
        let mut values = ProfileValues::default();
        values.set(ProfileField::Password, "secret".to_string());
        values.set(ProfileField::ConfirmationPassword, "secret".to_string());
        values.set(ProfileField::Password, String::new());
        assert_eq!(values.password, "");
        assert_eq!(values.confirmation_password, "");
    }

    #[test]
    fn test_changing_password_keeps_confirmation() {
        let mut values = ProfileValues::default();
        values.set(ProfileField::ConfirmationPassword, "secret".to_string());
        values.set(ProfileField::Password, "secre".to_string());
        assert_eq!(values.confirmation_password, "secret");
    }

    #[test]
    fn test_set_writes_only_the_named_field() {
        let mut values = ProfileValues::default();
        values.set(ProfileField::StatusText, "away".to_string());
        assert_eq!(values.status_text, "away");
        assert_eq!(values.bio, "");
    }
}
