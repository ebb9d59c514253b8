use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};

/// One avatar offered by an external service (gravatar, a linked OAuth
/// provider, ...), as returned by `getAvatarSuggestion`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AvatarSuggestionDto {
    pub service: String,
    /// Image payload, usually a `data:` URL
    pub blob: String,
    pub content_type: String,
    #[serde(default)]
    pub url: Option<String>,
}

/// `getAvatarSuggestion` answers with an object keyed by service name.
pub type AvatarSuggestionMap = BTreeMap<String, AvatarSuggestionDto>;

/// Flattens the keyed reply into a list ordered by service name.
pub fn suggestions_from_map(map: AvatarSuggestionMap) -> Vec<AvatarSuggestionDto> {
    map.into_values().collect()
}
