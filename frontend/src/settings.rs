use std::rc::Rc;

use log::{debug, error};
use shared::AccountSettings;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api::settings::get_profile_settings;

/// Settings snapshot shared with the account screens. `loaded` stays
/// false until the first fetch finishes.
#[derive(Clone, Debug, PartialEq)]
pub struct SettingsContext {
    pub settings: Rc<AccountSettings>,
    pub loaded: bool,
}

#[derive(Properties, Clone, PartialEq)]
pub struct SettingsProviderProps {
    #[prop_or_default]
    pub children: Children,
}

#[function_component(SettingsProvider)]
pub fn settings_provider(props: &SettingsProviderProps) -> Html {
    let context = use_state(|| SettingsContext {
        settings: Rc::new(AccountSettings::default()),
        loaded: false,
    });

    {
        let context = context.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match get_profile_settings().await {
                    Ok(values) => {
                        debug!("Account settings loaded");
                        context.set(SettingsContext {
                            settings: Rc::new(AccountSettings::from_values(&values)),
                            loaded: true,
                        });
                    }
                    Err(e) => {
                        // Locked-down defaults keep every field read-only
                        error!("Failed to load account settings: {}", e);
                        context.set(SettingsContext {
                            settings: Rc::new(AccountSettings::default()),
                            loaded: true,
                        });
                    }
                }
            });
            || ()
        });
    }

    html! {
        <ContextProvider<SettingsContext> context={(*context).clone()}>
            {props.children.clone()}
        </ContextProvider<SettingsContext>>
    }
}
