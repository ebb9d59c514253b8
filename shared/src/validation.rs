//! Field-level validation for the profile form.
//!
//! Each rule is computed independently so every inline error stays visible
//! at once. A rule only reports an error for a field the settings allow the
//! user to edit.

use validator::validate_email;

use crate::dto::user::UserDto;
use crate::models::profile::ProfileValues;
use crate::models::settings::AccountSettings;

pub const STATUS_TEXT_MAX_LENGTH: usize = 120;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    PasswordsDoNotMatch,
    InvalidEmail,
    InvalidUsername,
    UsernameTaken,
    FieldRequired,
    MaxLength(usize),
}

impl FieldError {
    /// Translation key of the message shown next to the field
    pub fn translation_key(&self) -> &'static str {
        match self {
            FieldError::PasswordsDoNotMatch => "Passwords_do_not_match",
            FieldError::InvalidEmail => "Invalid_email",
            FieldError::InvalidUsername => "error-invalid-username",
            FieldError::UsernameTaken => "Username_already_exist",
            FieldError::FieldRequired => "Field_required",
            FieldError::MaxLength(_) => "Max_length_is",
        }
    }

    /// Interpolation argument for the message, if any
    pub fn argument(&self) -> Option<String> {
        match self {
            FieldError::MaxLength(max) => Some(max.to_string()),
            _ => None,
        }
    }
}

pub fn password_error(values: &ProfileValues, settings: &AccountSettings) -> Option<FieldError> {
    if !settings.allow_password_change {
        return None;
    }
    let both_set = !values.password.is_empty() && !values.confirmation_password.is_empty();
    (both_set && values.password != values.confirmation_password)
        .then_some(FieldError::PasswordsDoNotMatch)
}

pub fn email_error(values: &ProfileValues, settings: &AccountSettings) -> Option<FieldError> {
    if !settings.allow_email_change {
        return None;
    }
    (!is_email(&values.email)).then_some(FieldError::InvalidEmail)
}

/// Email shape check: non-empty local part and domain around a single `@`.
pub fn is_email(email: &str) -> bool {
    validate_email(email)
}

pub fn name_error(
    values: &ProfileValues,
    user: &UserDto,
    settings: &AccountSettings,
) -> Option<FieldError> {
    if !settings.allow_real_name_change {
        return None;
    }
    let persisted = user.name.as_deref().unwrap_or_default();
    if values.realname == persisted {
        return None;
    }
    (values.realname.is_empty() && settings.require_name).then_some(FieldError::FieldRequired)
}

/// Length is counted in characters, not bytes.
pub fn status_text_error(values: &ProfileValues, settings: &AccountSettings) -> Option<FieldError> {
    if !settings.allow_user_status_message_change {
        return None;
    }
    (values.status_text.chars().count() > STATUS_TEXT_MAX_LENGTH)
        .then_some(FieldError::MaxLength(STATUS_TEXT_MAX_LENGTH))
}

/// Local part of the username rule, decided without the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsernamePrecheck {
    /// Same as the persisted username (or not editable): no error, no remote call
    Unchanged,
    /// Rejected by the names pattern
    Invalid,
    /// Must be checked for availability remotely
    NeedsAvailabilityCheck,
}

pub fn precheck_username(
    username: &str,
    user: &UserDto,
    settings: &AccountSettings,
) -> UsernamePrecheck {
    if !settings.can_change_username || user.username.as_deref() == Some(username) {
        return UsernamePrecheck::Unchanged;
    }
    if !settings.names_regex.is_match(username) {
        return UsernamePrecheck::Invalid;
    }
    UsernamePrecheck::NeedsAvailabilityCheck
}

/// Current error of every validated field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationState {
    pub password: Option<FieldError>,
    pub email: Option<FieldError>,
    pub username: Option<FieldError>,
    pub name: Option<FieldError>,
    pub status_text: Option<FieldError>,
}

impl ValidationState {
    /// Recomputes the synchronous rules; the username error comes from the
    /// asynchronous availability check and is passed in as-is.
    pub fn compute(
        values: &ProfileValues,
        user: &UserDto,
        settings: &AccountSettings,
        username: Option<FieldError>,
    ) -> Self {
        Self {
            password: password_error(values, settings),
            email: email_error(values, settings),
            username,
            name: name_error(values, user, settings),
            status_text: status_text_error(values, settings),
        }
    }

    pub fn has_errors(&self) -> bool {
        [
            &self.password,
            &self.email,
            &self.username,
            &self.name,
            &self.status_text,
        ]
        .iter()
        .any(|e| e.is_some())
    }

    pub fn can_save(&self) -> bool {
        !self.has_errors()
    }
}
