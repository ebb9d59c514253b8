use serde::{Deserialize, Serialize};

/// A registered email address of a user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmailDto {
    pub address: String,
    #[serde(default)]
    pub verified: bool,
}

/// Password credential metadata. Only the presence of the hash matters to
/// the client.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PasswordServiceDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bcrypt: Option<String>,
}

/// Authentication methods attached to an account
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserServicesDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<PasswordServiceDto>,
}

/// The authenticated user's persisted record, as returned by `/api/v1/me`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    /// User ID (serialized as "_id" in JSON)
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub emails: Vec<EmailDto>,
    #[serde(default)]
    pub status_text: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// Read from the server but never written back out, so a cached copy
    /// of the record holds no credential material.
    #[serde(default, skip_serializing)]
    pub services: Option<UserServicesDto>,
}

impl UserDto {
    pub fn primary_email(&self) -> Option<&str> {
        self.emails.first().map(|e| e.address.as_str())
    }

    pub fn is_email_verified(&self) -> bool {
        self.emails.first().map(|e| e.verified).unwrap_or(false)
    }

    /// Whether the account can re-authenticate with a password. Accounts
    /// linked only to external identity providers have no bcrypt hash.
    pub fn has_password_credential(&self) -> bool {
        self.services
            .as_ref()
            .and_then(|s| s.password.as_ref())
            .and_then(|p| p.bcrypt.as_ref())
            .map(|hash| !hash.is_empty())
            .unwrap_or(false)
    }
}
