use serde::{Deserialize, Serialize};

/// Partial profile update sent to `saveUserProfile`.
///
/// Every field except `bio` is optional and omitted from the wire form
/// when unset: the server must never receive a field the caller is not
/// allowed to change.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SaveUserProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub realname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "newPassword", skip_serializing_if = "Option::is_none")]
    pub new_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_text: Option<String>,
    /// SHA-256 hex digest of the current password, present only after
    /// the user confirmed it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub typed_password: Option<String>,
    pub bio: String,
}

/// Body of `POST users.setAvatar` when the avatar comes from a URL
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SetAvatarUrlRequest {
    pub user_id: String,
    pub avatar_url: String,
}

/// Body of `POST users.resetAvatar`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResetAvatarRequest {
    pub user_id: String,
}

/// Generic `{ success: bool }` endpoint reply
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EndpointResponse {
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_unset_fields_are_omitted() {
        let request = SaveUserProfileRequest {
            bio: "hello".to_string(),
            ..Default::default()
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value, json!({ "bio": "hello" }));
    }

    #[test]
    fn test_wire_names() {
        let request = SaveUserProfileRequest {
            realname: Some("Ada".to_string()),
            new_password: Some("s3cret".to_string()),
            status_text: Some("busy".to_string()),
            typed_password: Some("abc".to_string()),
            bio: String::new(),
            ..Default::default()
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "realname": "Ada",
                "newPassword": "s3cret",
                "statusText": "busy",
                "typedPassword": "abc",
                "bio": ""
            })
        );
    }

    #[test]
    fn test_set_avatar_url_body() {
        let body = SetAvatarUrlRequest {
            user_id: "u1".to_string(),
            avatar_url: "https://example.com/a.png".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({ "userId": "u1", "avatarUrl": "https://example.com/a.png" })
        );
    }
}
