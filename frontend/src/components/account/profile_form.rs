use std::rc::Rc;

use log::{debug, error};
use shared::workflow::username::RequestSequence;
use shared::{
    AccountApi, AccountSettings, AvatarChange, AvatarSuggestionDto, FieldError, ProfileField,
    ProfileValues, UserDto, ValidationState,
};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::api::remote::RemoteAccountApi;
use crate::components::account::avatar_editor::UserAvatarEditor;
use crate::hooks::use_username_check;
use crate::i18n::{use_translation, Translations};

const INPUT_CLASSES: &str = "w-full px-3 py-2 border rounded-md focus:outline-none focus:ring-2 focus:ring-blue-500 disabled:bg-gray-100 disabled:text-gray-500";

#[derive(Properties, Clone, PartialEq)]
pub struct ProfileFormProps {
    pub values: ProfileValues,
    pub user: UserDto,
    pub settings: Rc<AccountSettings>,
    pub on_field_change: Callback<(ProfileField, String)>,
    pub on_avatar_change: Callback<Option<AvatarChange>>,
    /// Called with `true` when every field is valid.
    pub on_validity_change: Callback<bool>,
}

#[derive(Properties, Clone, PartialEq)]
struct TextFieldProps {
    label: String,
    value: String,
    #[prop_or("text")]
    input_type: &'static str,
    #[prop_or_default]
    disabled: bool,
    #[prop_or_default]
    error: Option<String>,
    #[prop_or_default]
    addon: Option<Html>,
    on_input: Callback<String>,
}

#[function_component(TextField)]
fn text_field(props: &TextFieldProps) -> Html {
    let on_input = {
        let on_input = props.on_input.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_input.emit(input.value());
        })
    };

    let border = if props.error.is_some() { "border-red-500" } else { "border-gray-300" };

    html! {
        <div class="flex-1">
            <label class="block text-sm font-medium text-gray-600 mb-2">{&props.label}</label>
            <div class="flex items-center gap-2">
                <input
                    type={props.input_type}
                    value={props.value.clone()}
                    disabled={props.disabled}
                    oninput={on_input}
                    class={classes!(INPUT_CLASSES, border)}
                />
                {props.addon.clone().unwrap_or_default()}
            </div>
            if let Some(error) = &props.error {
                <p class="mt-1 text-sm text-red-600">{error}</p>
            }
        </div>
    }
}

fn message(t: &Translations, error: &Option<FieldError>) -> Option<String> {
    error.as_ref().map(|e| t.field_error(e))
}

#[function_component(ProfileForm)]
pub fn profile_form(props: &ProfileFormProps) -> Html {
    let t = use_translation();
    let suggestions = use_state(Vec::<AvatarSuggestionDto>::new);
    let settings = props.settings.clone();
    let values = &props.values;

    let username_error = use_username_check(&values.username, &props.user, settings.clone());
    let validation = ValidationState::compute(values, &props.user, &settings, username_error);

    // Suggestions are optional; a failed fetch leaves the list empty
    {
        let suggestions = suggestions.clone();
        use_effect_with((), move |_| {
            let sequence = RequestSequence::new();
            let ticket = sequence.begin();
            let guard = sequence.clone();
            spawn_local(async move {
                match RemoteAccountApi.get_avatar_suggestions().await {
                    Ok(list) if guard.is_current(ticket) => {
                        debug!("Loaded {} avatar suggestions", list.len());
                        suggestions.set(list);
                    }
                    Ok(_) => debug!("Dropping avatar suggestions for unmounted form"),
                    Err(e) => error!("Failed to load avatar suggestions: {}", e),
                }
            });
            move || sequence.invalidate()
        });
    }

    {
        let on_validity_change = props.on_validity_change.clone();
        use_effect_with(validation.can_save(), move |can_save| {
            on_validity_change.emit(*can_save);
            || ()
        });
    }

    let on_field = |field: ProfileField| {
        props
            .on_field_change
            .reform(move |value: String| (field, value))
    };

    let on_bio = {
        let on_field_change = props.on_field_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            on_field_change.emit((ProfileField::Bio, input.value()));
        })
    };

    let verified = props.user.is_email_verified();
    let email_badge = html! {
        <span
            title={t.t(if verified { "Email_verified" } else { "Email_not_verified" })}
            class={if verified { "text-green-600" } else { "text-gray-400" }}
        >
            {if verified { "✓" } else { "✉" }}
        </span>
    };

    html! {
        <form class="space-y-6" onsubmit={Callback::from(|e: SubmitEvent| e.prevent_default())}>
            <UserAvatarEditor
                username={values.username.clone()}
                current_url={props.user.avatar_url.clone()}
                pending={values.avatar.clone()}
                suggestions={(*suggestions).clone()}
                disabled={!settings.allow_user_avatar_change}
                on_change={props.on_avatar_change.clone()}
            />
            <div class="flex flex-col md:flex-row gap-4">
                <TextField
                    label={t.t("Name")}
                    value={values.realname.clone()}
                    disabled={!settings.allow_real_name_change}
                    error={message(&t, &validation.name)}
                    on_input={on_field(ProfileField::Realname)}
                />
                <TextField
                    label={t.t("Username")}
                    value={values.username.clone()}
                    disabled={!settings.can_change_username}
                    error={message(&t, &validation.username)}
                    addon={html! { <span class="text-gray-400">{"@"}</span> }}
                    on_input={on_field(ProfileField::Username)}
                />
            </div>
            <TextField
                label={t.t("StatusMessage")}
                value={values.status_text.clone()}
                disabled={!settings.allow_user_status_message_change}
                error={message(&t, &validation.status_text)}
                on_input={on_field(ProfileField::StatusText)}
            />
            <div>
                <label class="block text-sm font-medium text-gray-600 mb-2">{t.t("Bio")}</label>
                <textarea
                    rows="3"
                    value={values.bio.clone()}
                    oninput={on_bio}
                    class={classes!(INPUT_CLASSES, "border-gray-300")}
                />
            </div>
            <div class="flex flex-col md:flex-row gap-4 items-start">
                <TextField
                    label={t.t("Email")}
                    value={values.email.clone()}
                    input_type="email"
                    disabled={!settings.allow_email_change}
                    error={message(&t, &validation.email)}
                    addon={email_badge}
                    on_input={on_field(ProfileField::Email)}
                />
                <div class="flex-1 w-full space-y-4">
                    <TextField
                        label={t.t("Password")}
                        value={values.password.clone()}
                        input_type="password"
                        disabled={!settings.allow_password_change}
                        on_input={on_field(ProfileField::Password)}
                    />
                    if !values.password.is_empty() {
                        <TextField
                            label={t.t("Confirm_password")}
                            value={values.confirmation_password.clone()}
                            input_type="password"
                            error={message(&t, &validation.password)}
                            on_input={on_field(ProfileField::ConfirmationPassword)}
                        />
                    }
                </div>
            </div>
        </form>
    }
}
