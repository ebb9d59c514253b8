use std::collections::HashMap;
use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

pub const ALLOW_REAL_NAME_CHANGE: &str = "Accounts_AllowRealNameChange";
pub const ALLOW_USER_STATUS_MESSAGE_CHANGE: &str = "Accounts_AllowUserStatusMessageChange";
pub const ALLOW_USERNAME_CHANGE: &str = "Accounts_AllowUsernameChange";
pub const ALLOW_EMAIL_CHANGE: &str = "Accounts_AllowEmailChange";
pub const ALLOW_PASSWORD_CHANGE: &str = "Accounts_AllowPasswordChange";
pub const ALLOW_USER_AVATAR_CHANGE: &str = "Accounts_AllowUserAvatarChange";
pub const ALLOW_DELETE_OWN_ACCOUNT: &str = "Accounts_AllowDeleteOwnAccount";
pub const LDAP_ENABLE: &str = "LDAP_Enable";
pub const REQUIRE_NAME_FOR_SIGN_UP: &str = "Accounts_RequireNameForSignUp";
pub const NAMES_VALIDATION: &str = "UTF8_Names_Validation";

/// Every settings key the profile screen reads.
pub const PROFILE_SETTING_KEYS: [&str; 10] = [
    ALLOW_REAL_NAME_CHANGE,
    ALLOW_USER_STATUS_MESSAGE_CHANGE,
    ALLOW_USERNAME_CHANGE,
    ALLOW_EMAIL_CHANGE,
    ALLOW_PASSWORD_CHANGE,
    ALLOW_USER_AVATAR_CHANGE,
    ALLOW_DELETE_OWN_ACCOUNT,
    LDAP_ENABLE,
    REQUIRE_NAME_FOR_SIGN_UP,
    NAMES_VALIDATION,
];

pub const DEFAULT_NAMES_PATTERN: &str = "[0-9a-zA-Z-_.]+";

static DEFAULT_NAMES_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("^(?:{})$", DEFAULT_NAMES_PATTERN)).unwrap());

/// Read-only snapshot of the account policy flags that govern which
/// profile fields are editable.
#[derive(Debug, Clone)]
pub struct AccountSettings {
    pub allow_real_name_change: bool,
    pub allow_user_status_message_change: bool,
    pub allow_email_change: bool,
    pub allow_password_change: bool,
    pub allow_user_avatar_change: bool,
    pub allow_delete_own_account: bool,
    /// Username changes are allowed and the account is not LDAP managed
    pub can_change_username: bool,
    pub require_name: bool,
    /// Whole-string anchored username pattern
    pub names_regex: Regex,
}

impl PartialEq for AccountSettings {
    fn eq(&self, other: &Self) -> bool {
        self.allow_real_name_change == other.allow_real_name_change
            && self.allow_user_status_message_change == other.allow_user_status_message_change
            && self.allow_email_change == other.allow_email_change
            && self.allow_password_change == other.allow_password_change
            && self.allow_user_avatar_change == other.allow_user_avatar_change
            && self.allow_delete_own_account == other.allow_delete_own_account
            && self.can_change_username == other.can_change_username
            && self.require_name == other.require_name
            && self.names_regex.as_str() == other.names_regex.as_str()
    }
}

impl Default for AccountSettings {
    fn default() -> Self {
        Self {
            allow_real_name_change: false,
            allow_user_status_message_change: false,
            allow_email_change: false,
            allow_password_change: false,
            allow_user_avatar_change: false,
            allow_delete_own_account: false,
            can_change_username: false,
            require_name: false,
            names_regex: DEFAULT_NAMES_REGEX.clone(),
        }
    }
}

impl AccountSettings {
    /// Builds the snapshot from raw setting values. Missing or non-boolean
    /// flags read as `false`.
    pub fn from_values(values: &HashMap<String, Value>) -> Self {
        let flag = |key: &str| values.get(key).and_then(Value::as_bool).unwrap_or(false);

        let pattern = values
            .get(NAMES_VALIDATION)
            .and_then(Value::as_str)
            .filter(|p| !p.is_empty())
            .unwrap_or(DEFAULT_NAMES_PATTERN);

        Self {
            allow_real_name_change: flag(ALLOW_REAL_NAME_CHANGE),
            allow_user_status_message_change: flag(ALLOW_USER_STATUS_MESSAGE_CHANGE),
            allow_email_change: flag(ALLOW_EMAIL_CHANGE),
            allow_password_change: flag(ALLOW_PASSWORD_CHANGE),
            allow_user_avatar_change: flag(ALLOW_USER_AVATAR_CHANGE),
            allow_delete_own_account: flag(ALLOW_DELETE_OWN_ACCOUNT),
            can_change_username: flag(ALLOW_USERNAME_CHANGE) && !flag(LDAP_ENABLE),
            require_name: flag(REQUIRE_NAME_FOR_SIGN_UP),
            names_regex: compile_names_regex(pattern),
        }
    }
}

/// Anchors the server pattern so it must match the whole username.
/// Falls back to the default pattern when the server pattern does not
/// compile.
pub fn compile_names_regex(pattern: &str) -> Regex {
    match Regex::new(&format!("^(?:{})$", pattern)) {
        Ok(regex) => regex,
        Err(e) => {
            warn!("Invalid {} pattern {:?}: {}", NAMES_VALIDATION, pattern, e);
            DEFAULT_NAMES_REGEX.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    fn values(pairs: &[(&str, Value)]) -> HashMap<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_missing_flags_default_to_false() {
        let settings = AccountSettings::from_values(&HashMap::new());
        assert!(!settings.allow_real_name_change);
        assert!(!settings.allow_email_change);
        assert!(!settings.can_change_username);
        assert!(settings.names_regex.is_match("john.doe"));
    }

    #[test_case(true, false => true ; "allowed without ldap")]
    #[test_case(true, true => false ; "ldap locks username")]
    #[test_case(false, false => false ; "not allowed")]
    fn test_can_change_username(allow: bool, ldap: bool) -> bool {
        let settings = AccountSettings::from_values(&values(&[
            (ALLOW_USERNAME_CHANGE, json!(allow)),
            (LDAP_ENABLE, json!(ldap)),
        ]));
        settings.can_change_username
    }

    #[test]
    fn test_names_regex_is_anchored() {
        let settings = AccountSettings::from_values(&values(&[(NAMES_VALIDATION, json!("[a-z]+"))]));
        assert!(settings.names_regex.is_match("ada"));
        assert!(!settings.names_regex.is_match("ada lovelace"));
        assert!(!settings.names_regex.is_match("Ada"));
    }

    #[test]
    fn test_anchoring_covers_alternation() {
        let regex = compile_names_regex("a|b");
        assert!(regex.is_match("a"));
        assert!(!regex.is_match("ab"));
    }

    #[test]
    fn test_invalid_pattern_falls_back() {
        let regex = compile_names_regex("[unclosed");
        assert_eq!(regex.as_str(), format!("^(?:{})$", DEFAULT_NAMES_PATTERN));
    }

    #[test]
    fn test_settings_equality_compares_pattern() {
        let a = AccountSettings::from_values(&values(&[(NAMES_VALIDATION, json!("[a-z]+"))]));
        let b = AccountSettings::from_values(&values(&[(NAMES_VALIDATION, json!("[a-z]+"))]));
        let c = AccountSettings::from_values(&values(&[(NAMES_VALIDATION, json!("[0-9]+"))]));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
