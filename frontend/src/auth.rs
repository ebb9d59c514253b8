use shared::UserDto;
use log::{debug, error};
use yew::prelude::*;
use yew::functional::use_reducer_eq;
use gloo_storage::{LocalStorage, Storage};
use wasm_bindgen_futures::spawn_local;
use crate::api::auth;
use std::rc::Rc;

const USER_KEY: &str = "user";

#[derive(Clone, Debug, PartialEq, Default)]
pub struct AuthState {
    pub user: Option<UserDto>,
    /// Set once `user` came from the server in this session rather than
    /// from the localStorage cache.
    pub fresh: bool,
    pub loading: bool,
    pub error: Option<String>,
}

impl AuthState {
    /// The user record, once it is complete enough to gate a save. The
    /// cached copy lacks the credential services.
    pub fn editable_user(&self) -> Option<&UserDto> {
        self.user.as_ref().filter(|_| self.fresh)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum AuthAction {
    Refresh,
    RefreshSuccess(UserDto),
    RefreshError(String),
    SessionExpired,
}

impl Reducible for AuthState {
    type Action = AuthAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            AuthAction::Refresh => Rc::new(Self {
                loading: true,
                ..(*self).clone()
            }),
            AuthAction::RefreshSuccess(user) => Rc::new(Self {
                user: Some(user),
                fresh: true,
                loading: false,
                error: None,
            }),
            // Keep the last known record
            AuthAction::RefreshError(error) => Rc::new(Self {
                loading: false,
                error: Some(error),
                ..(*self).clone()
            }),
            AuthAction::SessionExpired => Rc::new(Self {
                user: None,
                fresh: false,
                loading: false,
                error: Some("Session expired. Please log in again.".to_string()),
            }),
        }
    }
}

#[derive(Properties, Clone, PartialEq)]
pub struct AuthProviderProps {
    #[prop_or_default]
    pub children: Children,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AuthContext {
    pub state: AuthState,
    /// Re-reads the persisted user record from the server.
    pub refresh: Callback<()>,
}

fn refresh_user(auth: UseReducerHandle<AuthState>) {
    spawn_local(async move {
        auth.dispatch(AuthAction::Refresh);
        match auth::get_current_user().await {
            Ok(user) => {
                debug!("Refreshed user {}", user.id);
                if let Err(e) = LocalStorage::set(USER_KEY, &user) {
                    error!("Failed to store user in local storage: {}", e);
                }
                auth.dispatch(AuthAction::RefreshSuccess(user));
            }
            Err(shared::SharedError::Unauthorized(message)) => {
                error!("Session rejected: {}", message);
                LocalStorage::delete(USER_KEY);
                auth.dispatch(AuthAction::SessionExpired);
            }
            Err(e) => {
                error!("Failed to refresh user data: {}", e);
                auth.dispatch(AuthAction::RefreshError(e.to_string()));
            }
        }
    });
}

#[function_component(AuthProvider)]
pub fn auth_provider(props: &AuthProviderProps) -> Html {
    let user = LocalStorage::get::<UserDto>(USER_KEY).ok();
    let auth = use_reducer_eq(move || AuthState {
        user,
        ..Default::default()
    });

    // Cached record is only a starting point until the server answers
    {
        let auth = auth.clone();
        use_effect_with((), move |_| {
            refresh_user(auth);
            || ()
        });
    }

    let refresh = {
        let auth = auth.clone();
        Callback::from(move |_: ()| refresh_user(auth.clone()))
    };

    let context = AuthContext {
        state: (*auth).clone(),
        refresh,
    };

    html! {
        <ContextProvider<AuthContext> context={context}>
            {props.children.clone()}
        </ContextProvider<AuthContext>>
    }
}
