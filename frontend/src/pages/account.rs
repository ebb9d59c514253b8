use log::debug;
use yew::prelude::*;

use crate::pages::account_profile::ProfilePage;
use crate::pages::not_found::NotFound;

#[derive(Properties, Clone, PartialEq)]
pub struct AccountRouteProps {
    pub group: String,
}

/// Picks the account page for the `:group` path segment.
#[function_component(AccountRoute)]
pub fn account_route(props: &AccountRouteProps) -> Html {
    debug!("Account group: {}", props.group);
    match props.group.as_str() {
        "profile" => html! { <ProfilePage /> },
        _ => html! { <NotFound /> },
    }
}
