use std::rc::Rc;

use log::{debug, error, info};
use shared::workflow::save::{requires_password_confirmation, save_profile, AvatarOutcome};
use shared::workflow::username::RequestSequence;
use shared::{AccountSettings, AvatarChange, ProfileField, ProfileValues, SharedError, UserDto};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api::remote::RemoteAccountApi;
use crate::auth::AuthContext;
use crate::components::account::password_confirm_modal::PasswordConfirmModal;
use crate::components::account::profile_form::ProfileForm;
use crate::components::common_toast::{use_toast, Toast};
use crate::hooks::{use_profile_form, ProfileFormAction};
use crate::i18n::{use_translation, Translations};
use crate::settings::SettingsContext;

/// User-facing text for a failed remote call. Timeouts get their own
/// message since the change may still have reached the server.
pub fn failure_message(t: &Translations, key: &str, error: &SharedError) -> String {
    if error.is_timeout() {
        t.t("Request_timed_out")
    } else {
        t.t_with(key, &error.to_string())
    }
}

#[function_component(ProfilePage)]
pub fn profile_page() -> Html {
    let t = use_translation();
    let auth = use_context::<AuthContext>();
    let settings = use_context::<SettingsContext>();

    let (Some(auth), Some(settings)) = (auth, settings) else {
        error!("ProfilePage rendered outside AuthProvider/SettingsProvider");
        return html! {};
    };

    // Save gating needs the server's record, not the cached copy
    let Some(user) = auth.state.editable_user().cloned() else {
        if auth.state.user.is_none() && !auth.state.loading {
            return html! { <div class="p-6 text-red-500">{t.t("Not_authenticated")}</div> };
        }
        if let (false, Some(error)) = (auth.state.loading, &auth.state.error) {
            return html! { <div class="p-6 text-red-500">{t.t_with("User_load_failed", error)}</div> };
        }
        return html! { <div class="p-6 text-gray-500">{t.t("Loading")}</div> };
    };

    if !settings.loaded {
        return html! { <div class="p-6 text-gray-500">{t.t("Loading")}</div> };
    }

    html! {
        <ProfileSession
            key={user.id.clone()}
            user={user.clone()}
            settings={settings.settings.clone()}
            on_saved={auth.refresh.clone()}
        />
    }
}

#[derive(Properties, Clone, PartialEq)]
struct ProfileSessionProps {
    user: UserDto,
    settings: Rc<AccountSettings>,
    /// Asks for the persisted record to be reloaded.
    on_saved: Callback<()>,
}

/// One editing session for one user record.
#[function_component(ProfileSession)]
fn profile_session(props: &ProfileSessionProps) -> Html {
    let t = use_translation();
    let toast = use_toast();
    let form = use_profile_form(ProfileValues::from_user(&props.user));
    let can_save = use_state_eq(|| false);
    let modal_open = use_state_eq(|| false);
    let saving = use_state_eq(|| false);
    let sequence = use_memo((), |_| RequestSequence::new());

    // A refreshed record re-seeds the draft if nothing is being edited
    {
        let form = form.clone();
        use_effect_with(props.user.clone(), move |user| {
            form.dispatch(ProfileFormAction::Seed(ProfileValues::from_user(user)));
            || ()
        });
    }

    {
        let sequence = (*sequence).clone();
        use_effect_with((), move |_| move || sequence.invalidate());
    }

    let run_save = {
        let form = form.clone();
        let saving = saving.clone();
        let sequence = (*sequence).clone();
        let user = props.user.clone();
        let settings = props.settings.clone();
        let on_saved = props.on_saved.clone();
        let toast = toast.clone();
        let t = t.clone();
        Callback::from(move |typed_password: Option<String>| {
            if *saving {
                return;
            }
            saving.set(true);

            let submitted = form.values.clone();
            let ticket = sequence.begin();
            let form = form.clone();
            let saving = saving.clone();
            let sequence = sequence.clone();
            let user = user.clone();
            let settings = settings.clone();
            let on_saved = on_saved.clone();
            let toast = toast.clone();
            let t = t.clone();
            spawn_local(async move {
                let report = save_profile(
                    &RemoteAccountApi,
                    &submitted,
                    &user,
                    &settings,
                    typed_password.as_deref(),
                )
                .await;

                if !sequence.is_current(ticket) {
                    debug!("Discarding save result for a closed profile session");
                    return;
                }
                saving.set(false);

                match &report.avatar {
                    AvatarOutcome::Applied => {
                        if let Some(applied) = submitted.avatar.clone() {
                            form.dispatch(ProfileFormAction::AvatarApplied(applied));
                        }
                        toast.emit(Toast::success(t.t("Avatar_changed_successfully")));
                    }
                    AvatarOutcome::Failed(e) => {
                        toast.emit(Toast::error(failure_message(&t, "Avatar_change_failed", e)));
                    }
                    AvatarOutcome::NoChange => {}
                }

                match &report.profile {
                    Ok(()) => {
                        info!("Profile saved");
                        form.dispatch(ProfileFormAction::Commit(submitted));
                        toast.emit(Toast::success(t.t("Profile_saved_successfully")));
                        on_saved.emit(());
                    }
                    Err(e) => {
                        toast.emit(Toast::error(failure_message(&t, "Profile_save_failed", e)));
                    }
                }
            });
        })
    };

    let on_save = {
        let form = form.clone();
        let modal_open = modal_open.clone();
        let run_save = run_save.clone();
        let user = props.user.clone();
        Callback::from(move |_: MouseEvent| {
            if !requires_password_confirmation(&form.values, &user) {
                run_save.emit(None);
                return;
            }
            // Only one confirmation dialog at a time
            if *modal_open {
                return;
            }
            modal_open.set(true);
        })
    };

    let on_confirm = {
        let modal_open = modal_open.clone();
        let run_save = run_save.clone();
        Callback::from(move |typed_password: String| {
            modal_open.set(false);
            run_save.emit(Some(typed_password));
        })
    };

    let on_cancel = {
        let modal_open = modal_open.clone();
        Callback::from(move |_: ()| modal_open.set(false))
    };

    let on_field_change = {
        let form = form.clone();
        Callback::from(move |(field, value): (ProfileField, String)| {
            form.dispatch(ProfileFormAction::SetField(field, value));
        })
    };

    let on_avatar_change = {
        let form = form.clone();
        Callback::from(move |avatar: Option<AvatarChange>| {
            form.dispatch(ProfileFormAction::SetAvatar(avatar));
        })
    };

    let on_validity_change = {
        let can_save = can_save.clone();
        Callback::from(move |valid: bool| can_save.set(valid))
    };

    let save_enabled = form.has_unsaved_changes() && *can_save && !*saving;

    html! {
        <div class="max-w-3xl mx-auto p-6">
            <div class="bg-white shadow rounded-lg p-6">
                <div class="flex items-center justify-between mb-6">
                    <h2 class="text-2xl font-bold text-gray-900">{t.t("Profile")}</h2>
                    <button
                        onclick={on_save}
                        disabled={!save_enabled}
                        class="px-4 py-2 bg-blue-600 text-white rounded hover:bg-blue-700 disabled:opacity-50 transition-colors"
                    >
                        {t.t("Save_changes")}
                    </button>
                </div>
                <ProfileForm
                    values={form.values.clone()}
                    user={props.user.clone()}
                    settings={props.settings.clone()}
                    on_field_change={on_field_change}
                    on_avatar_change={on_avatar_change}
                    on_validity_change={on_validity_change}
                />
            </div>
            if *modal_open {
                <PasswordConfirmModal on_confirm={on_confirm} on_cancel={on_cancel} />
            }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_timeout_has_its_own_message() {
        let t = Translations::english();
        let message = failure_message(&t, "Profile_save_failed", &SharedError::Timeout(15_000));
        assert_eq!(message, t.t("Request_timed_out"));
    }

    #[test]
    fn test_other_failures_carry_the_error() {
        let t = Translations::english();
        let error = SharedError::Network("offline".to_string());
        let message = failure_message(&t, "Profile_save_failed", &error);
        assert!(message.starts_with("Could not save the profile: "));
        assert!(message.contains("offline"));
    }
}
