use serde::{Deserialize, Serialize};

/// Error body returned by REST endpoints on failure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub success: Option<bool>,
    /// Error message
    pub error: String,
}

/// One entry of `settings.public`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SettingDto {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub value: serde_json::Value,
}

/// Reply of `GET /api/v1/settings.public`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PublicSettingsResponse {
    #[serde(default)]
    pub settings: Vec<SettingDto>,
}
