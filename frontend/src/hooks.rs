pub mod use_profile_form;
pub mod use_username_check;

pub use use_profile_form::{use_profile_form, ProfileFormAction, ProfileFormState};
pub use use_username_check::use_username_check;
