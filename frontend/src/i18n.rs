use std::collections::HashMap;
use std::rc::Rc;

use shared::FieldError;
use yew::prelude::*;

const ENGLISH: &[(&str, &str)] = &[
    ("Profile", "Profile"),
    ("Save_changes", "Save changes"),
    ("Name", "Name"),
    ("Username", "Username"),
    ("StatusMessage", "Status message"),
    ("Bio", "Bio"),
    ("Email", "Email"),
    ("Email_verified", "Email verified"),
    ("Email_not_verified", "Email not verified"),
    ("Password", "Password"),
    ("Confirm_password", "Confirm your password"),
    ("Avatar", "Avatar"),
    ("Use_url_for_avatar", "Use URL for avatar"),
    ("Upload_file", "Upload file"),
    ("Reset_to_default", "Reset to default"),
    ("Suggestions", "Suggestions"),
    ("Set", "Set"),
    ("Cancel", "Cancel"),
    ("Continue", "Continue"),
    ("Please_enter_your_password", "Please enter your password"),
    (
        "For_your_security_you_must_enter_your_current_password_to_continue",
        "For your security, you must enter your current password to continue",
    ),
    ("Passwords_do_not_match", "Passwords do not match"),
    ("Invalid_email", "Invalid email address"),
    ("error-invalid-username", "Invalid username"),
    ("Username_already_exist", "Username already exists"),
    ("Field_required", "Field required"),
    ("Max_length_is", "Max length is %s"),
    ("Avatar_changed_successfully", "Avatar changed successfully"),
    ("Profile_saved_successfully", "Profile saved successfully"),
    ("Avatar_change_failed", "Could not change the avatar: %s"),
    ("Profile_save_failed", "Could not save the profile: %s"),
    ("Request_timed_out", "The server took too long to answer. Your changes were kept, try again."),
    ("Not_authenticated", "You need to be logged in to edit your profile"),
    ("Loading", "Loading..."),
    ("User_load_failed", "Could not load your account: %s"),
];

/// Localized strings keyed by message id.
#[derive(Clone, Debug, PartialEq)]
pub struct Translations {
    entries: Rc<HashMap<String, String>>,
}

impl Default for Translations {
    fn default() -> Self {
        Self::english()
    }
}

impl Translations {
    pub fn english() -> Self {
        Self::from_pairs(ENGLISH.iter().map(|(k, v)| (k.to_string(), v.to_string())))
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            entries: Rc::new(pairs.into_iter().collect()),
        }
    }

    /// Looks up `key`; unknown keys come back unchanged.
    pub fn t(&self, key: &str) -> String {
        self.entries
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    /// Looks up `key` and substitutes `%s` with `arg`.
    pub fn t_with(&self, key: &str, arg: &str) -> String {
        self.t(key).replacen("%s", arg, 1)
    }

    pub fn field_error(&self, error: &FieldError) -> String {
        match error.argument() {
            Some(arg) => self.t_with(error.translation_key(), &arg),
            None => self.t(error.translation_key()),
        }
    }
}

#[derive(Properties, Clone, PartialEq)]
pub struct TranslationProviderProps {
    #[prop_or_default]
    pub translations: Translations,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(TranslationProvider)]
pub fn translation_provider(props: &TranslationProviderProps) -> Html {
    html! {
        <ContextProvider<Translations> context={props.translations.clone()}>
            {props.children.clone()}
        </ContextProvider<Translations>>
    }
}

#[hook]
pub fn use_translation() -> Translations {
    use_context::<Translations>().unwrap_or_default()
}
