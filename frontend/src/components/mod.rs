pub mod account {
    pub mod avatar_editor;
    pub mod password_confirm_modal;
    pub mod profile_form;
}
pub mod common_modal;
pub mod common_toast;
