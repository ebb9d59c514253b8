#[cfg(test)]
mod component_tests {
    use std::rc::Rc;

    use frontend::components::account::avatar_editor::{default_avatar_url, preview_src};
    use frontend::hooks::{ProfileFormAction, ProfileFormState};
    use frontend::i18n::Translations;
    use frontend::pages::account_profile::failure_message;
    use pretty_assertions::assert_eq;
    use shared::validation::STATUS_TEXT_MAX_LENGTH;
    use shared::{
        AccountSettings, AvatarChange, EmailDto, FieldError, ProfileField, ProfileValues,
        SharedError, UserDto, ValidationState,
    };
    use yew::functional::Reducible;

    fn user() -> UserDto {
        UserDto {
            id: "u1".to_string(),
            name: Some("Ada".to_string()),
            username: Some("ada".to_string()),
            emails: vec![EmailDto {
                address: "ada@example.com".to_string(),
                verified: true,
            }],
            ..Default::default()
        }
    }

    fn open_settings() -> AccountSettings {
        AccountSettings {
            allow_real_name_change: true,
            allow_user_status_message_change: true,
            allow_email_change: true,
            allow_password_change: true,
            allow_user_avatar_change: true,
            can_change_username: true,
            require_name: true,
            ..Default::default()
        }
    }

    fn edit(state: Rc<ProfileFormState>, field: ProfileField, value: &str) -> Rc<ProfileFormState> {
        state.reduce(ProfileFormAction::SetField(field, value.to_string()))
    }

    #[test]
    fn test_form_errors_render_as_translated_text() {
        let user = user();
        let settings = open_settings();
        let state = Rc::new(ProfileFormState::new(ProfileValues::from_user(&user)));
        let state = edit(state, ProfileField::Password, "one");
        let state = edit(state, ProfileField::ConfirmationPassword, "two");
        let state = edit(state, ProfileField::StatusText, &"x".repeat(STATUS_TEXT_MAX_LENGTH + 1));

        let validation = ValidationState::compute(&state.values, &user, &settings, None);
        let t = Translations::english();

        assert!(!validation.can_save());
        assert_eq!(
            validation.password.as_ref().map(|e| t.field_error(e)).as_deref(),
            Some("Passwords do not match")
        );
        assert_eq!(
            validation.status_text.as_ref().map(|e| t.field_error(e)).as_deref(),
            Some("Max length is 120")
        );
        assert_eq!(validation.email, None);
    }

    #[test]
    fn test_clearing_password_restores_validity() {
        let user = user();
        let settings = open_settings();
        let state = Rc::new(ProfileFormState::new(ProfileValues::from_user(&user)));
        let state = edit(state, ProfileField::Password, "one");
        let state = edit(state, ProfileField::ConfirmationPassword, "two");
        let state = edit(state, ProfileField::Password, "");

        assert_eq!(state.values.confirmation_password, "");
        assert!(!state.has_unsaved_changes());
        assert!(ValidationState::compute(&state.values, &user, &settings, None).can_save());
    }

    #[test]
    fn test_async_username_error_blocks_save() {
        let user = user();
        let values = ProfileValues::from_user(&user);
        let validation = ValidationState::compute(
            &values,
            &user,
            &open_settings(),
            Some(FieldError::UsernameTaken),
        );
        assert!(validation.has_errors());
        assert!(!validation.can_save());
    }

    #[test]
    fn test_pending_avatar_counts_as_unsaved() {
        let state = Rc::new(ProfileFormState::new(ProfileValues::from_user(&user())))
            .reduce(ProfileFormAction::SetAvatar(Some(AvatarChange::Reset)));
        assert!(state.has_unsaved_changes());
        assert_eq!(
            preview_src(state.values.avatar.as_ref(), Some("/custom.png"), "ada"),
            default_avatar_url("ada")
        );
    }

    #[test]
    fn test_save_failure_messages() {
        let t = Translations::english();
        let server = SharedError::Server {
            status: 500,
            message: "boom".to_string(),
        };
        assert!(failure_message(&t, "Avatar_change_failed", &server).contains("boom"));
        assert_eq!(
            failure_message(&t, "Avatar_change_failed", &SharedError::Timeout(10)),
            t.t("Request_timed_out")
        );
    }
}
