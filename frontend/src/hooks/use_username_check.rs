use std::rc::Rc;

use log::{debug, error};
use shared::validation::{precheck_username, UsernamePrecheck};
use shared::workflow::username::{check_username_latest, RequestSequence};
use shared::{AccountSettings, FieldError, UserDto};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api::remote::RemoteAccountApi;
use crate::config::Config;
use crate::debounce::{DelayedTask, Debouncer};

/// Reacts to a new username value: drops whatever was pending for the
/// previous value, applies the local rules at once and parks `lookup`
/// behind the debounce delay when the server has to be asked.
pub fn restart_username_check<D, S, L>(
    timer: &mut D,
    sequence: &RequestSequence,
    username: &str,
    user: &UserDto,
    settings: &AccountSettings,
    set_error: S,
    lookup: L,
) where
    D: DelayedTask + ?Sized,
    S: Fn(Option<FieldError>),
    L: FnOnce() + 'static,
{
    sequence.invalidate();
    timer.cancel();

    match precheck_username(username, user, settings) {
        UsernamePrecheck::Unchanged => set_error(None),
        UsernamePrecheck::Invalid => set_error(Some(FieldError::InvalidUsername)),
        UsernamePrecheck::NeedsAvailabilityCheck => {
            set_error(None);
            timer.schedule(Config::username_check_delay_ms(), Box::new(lookup));
        }
    }
}

/// Username error for the current draft value.
///
/// Local rules apply immediately. The availability lookup waits for a quiet
/// period, and only the newest lookup may write its result.
#[hook]
pub fn use_username_check(
    username: &str,
    user: &UserDto,
    settings: Rc<AccountSettings>,
) -> Option<FieldError> {
    let username_error = use_state_eq(|| None::<FieldError>);
    let debouncer = use_mut_ref(Debouncer::new);
    let sequence = use_memo((), |_| RequestSequence::new());

    {
        let username_error = username_error.clone();
        let debouncer = debouncer.clone();
        let sequence = (*sequence).clone();
        use_effect_with(
            (username.to_string(), user.clone(), settings),
            move |(username, user, settings)| {
                let lookup = {
                    let username_error = username_error.clone();
                    let sequence = sequence.clone();
                    let username = username.clone();
                    let user = user.clone();
                    let settings = settings.clone();
                    move || {
                        spawn_local(async move {
                            debug!("Checking availability of {:?}", username);
                            let outcome = check_username_latest(
                                &RemoteAccountApi,
                                &sequence,
                                &username,
                                &user,
                                &settings,
                            )
                            .await;
                            match outcome {
                                Some(Ok(result)) => username_error.set(result),
                                Some(Err(e)) => {
                                    error!("Username availability check failed: {}", e);
                                    username_error.set(None);
                                }
                                None => {}
                            }
                        });
                    }
                };

                restart_username_check(
                    &mut *debouncer.borrow_mut(),
                    &sequence,
                    username,
                    user,
                    settings,
                    |error| username_error.set(error),
                    lookup,
                );
                || ()
            },
        );
    }

    {
        let debouncer = debouncer.clone();
        let sequence = (*sequence).clone();
        use_effect_with((), move |_| {
            move || {
                sequence.invalidate();
                debouncer.borrow_mut().cancel();
            }
        });
    }

    (*username_error).clone()
}
