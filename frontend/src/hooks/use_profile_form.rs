use std::rc::Rc;

use shared::{AvatarChange, ProfileField, ProfileValues};
use yew::prelude::*;

/// Draft of the profile plus the baseline it is compared against.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProfileFormState {
    pub initial: ProfileValues,
    pub values: ProfileValues,
}

impl ProfileFormState {
    pub fn new(values: ProfileValues) -> Self {
        Self {
            initial: values.clone(),
            values,
        }
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.values != self.initial
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ProfileFormAction {
    /// New persisted record; ignored while the user has pending edits.
    Seed(ProfileValues),
    SetField(ProfileField, String),
    SetAvatar(Option<AvatarChange>),
    /// The given avatar change was applied; drop it unless the user has
    /// picked another one since.
    AvatarApplied(AvatarChange),
    /// The submitted draft was saved and becomes the new baseline. Password
    /// fields are emptied; an avatar change still pending stays unsaved.
    Commit(ProfileValues),
}

impl Reducible for ProfileFormState {
    type Action = ProfileFormAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            ProfileFormAction::Seed(values) => {
                if self.has_unsaved_changes() {
                    return self;
                }
                Rc::new(Self::new(values))
            }
            ProfileFormAction::SetField(field, value) => {
                let mut values = self.values.clone();
                values.set(field, value);
                Rc::new(Self {
                    values,
                    ..(*self).clone()
                })
            }
            ProfileFormAction::SetAvatar(avatar) => {
                let mut values = self.values.clone();
                values.avatar = avatar;
                Rc::new(Self {
                    values,
                    ..(*self).clone()
                })
            }
            ProfileFormAction::AvatarApplied(applied) => {
                if self.values.avatar.as_ref() != Some(&applied) {
                    return self;
                }
                let mut values = self.values.clone();
                values.avatar = None;
                Rc::new(Self {
                    values,
                    ..(*self).clone()
                })
            }
            ProfileFormAction::Commit(submitted) => {
                let mut initial = submitted;
                initial.password.clear();
                initial.confirmation_password.clear();
                initial.avatar = None;

                let mut values = self.values.clone();
                values.password.clear();
                values.confirmation_password.clear();
                Rc::new(Self { initial, values })
            }
        }
    }
}

#[hook]
pub fn use_profile_form(initial: ProfileValues) -> UseReducerHandle<ProfileFormState> {
    use_reducer_eq(move || ProfileFormState::new(initial))
}
