use yew::prelude::*;
use yew_router::prelude::*;
use log::{info, debug};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsValue;
use crate::auth::AuthProvider;
use crate::components::common_toast::ToastProvider;
use crate::i18n::TranslationProvider;
use crate::settings::SettingsProvider;

pub mod api;
pub mod auth;
pub mod components;
pub mod config;
pub mod debounce;
pub mod hooks;
pub mod i18n;
pub mod settings;
pub mod pages {
    pub mod account;
    pub mod account_profile;
    pub mod not_found;
}

use pages::{account::AccountRoute, not_found::NotFound};

#[derive(Clone, Routable, PartialEq, Debug)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/account/:group")]
    Account { group: String },
    #[not_found]
    #[at("/404")]
    NotFound,
}

#[function_component(App)]
fn app() -> Html {
    debug!("App component rendering");
    html! {
        <TranslationProvider>
            <ToastProvider>
                <AuthProvider>
                    <SettingsProvider>
                        <BrowserRouter>
                            <main class="flex-1">
                                <Switch<Route> render={switch} />
                            </main>
                        </BrowserRouter>
                    </SettingsProvider>
                </AuthProvider>
            </ToastProvider>
        </TranslationProvider>
    }
}

fn switch(routes: Route) -> Html {
    debug!("Route switch: {:?}", routes);
    match routes {
        Route::Home => html! {
            <Redirect<Route> to={Route::Account { group: "profile".to_string() }} />
        },
        Route::Account { group } => html! { <AccountRoute group={group} /> },
        Route::NotFound => html! { <NotFound /> },
    }
}

#[wasm_bindgen]
pub async fn run_app() -> Result<(), JsValue> {
    wasm_logger::init(wasm_logger::Config::new(log::Level::Debug));
    console_error_panic_hook::set_once();

    info!("Mounting application to #app");
    yew::Renderer::<App>::new().render();
    Ok(())
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    wasm_bindgen_futures::spawn_local(async {
        if let Err(e) = run_app().await {
            log::error!("Failed to run app: {:?}", e);
        }
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_account_route_paths() {
        assert_eq!(
            Route::recognize("/account/profile"),
            Some(Route::Account { group: "profile".to_string() })
        );
        assert_eq!(Route::recognize("/"), Some(Route::Home));
        assert_eq!(
            Route::Account { group: "profile".to_string() }.to_path(),
            "/account/profile"
        );
    }
}
