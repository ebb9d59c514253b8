pub mod models {
    pub mod profile;
    pub mod settings;
}

pub mod dto {
    pub mod avatar;
    pub mod common;
    pub mod method;
    pub mod profile;
    pub mod user;
}

pub mod workflow {
    pub mod avatar;
    pub mod save;
    pub mod username;

    #[cfg(all(test, not(target_arch = "wasm32")))]
    pub(crate) mod testing;
}

pub mod api;
pub mod error;
pub mod validation;

// Re-export commonly used items
pub use error::{SharedError, Result};
pub use api::AccountApi;

// Re-export models
pub use models::{
    profile::{AvatarChange, AvatarUpload, ProfileField, ProfileValues},
    settings::AccountSettings,
};

// Re-export DTOs
pub use dto::{
    avatar::AvatarSuggestionDto,
    common::ErrorResponse,
    profile::SaveUserProfileRequest,
    user::{EmailDto, UserDto},
};

pub use validation::{FieldError, ValidationState};
