use std::future::Future;

use futures::future::{select, Either};
use futures::pin_mut;
use gloo_net::http::{Request, RequestBuilder, Response};
use gloo_storage::Storage;
use gloo_timers::future::TimeoutFuture;
use log::debug;
use serde::de::DeserializeOwned;
use shared::dto::common::ErrorResponse;
use shared::{Result, SharedError};

use crate::config::Config;

pub const USER_ID_KEY: &str = "user_id";
pub const AUTH_TOKEN_KEY: &str = "auth_token";

/// Creates a request carrying the session headers from localStorage
pub fn authenticated_request(method: &str, url: &str) -> RequestBuilder {
    let mut req = match method.to_uppercase().as_str() {
        "GET" => Request::get(url),
        "POST" => Request::post(url),
        "PUT" => Request::put(url),
        "DELETE" => Request::delete(url),
        _ => Request::get(url),
    };

    let user_id = gloo_storage::LocalStorage::get::<String>(USER_ID_KEY).ok();
    let token = gloo_storage::LocalStorage::get::<String>(AUTH_TOKEN_KEY).ok();
    if let (Some(user_id), Some(token)) = (user_id, token) {
        req = req.header("X-User-Id", &user_id).header("X-Auth-Token", &token);
    }

    req
}

/// Creates a GET request with authentication
pub fn authenticated_get(url: &str) -> RequestBuilder {
    authenticated_request("GET", url)
}

/// Creates a POST request with authentication
pub fn authenticated_post(url: &str) -> RequestBuilder {
    authenticated_request("POST", url)
}

/// Races `future` against the configured request timeout.
pub async fn with_timeout<F, T>(future: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    with_timeout_ms(Config::request_timeout_ms(), future).await
}

pub async fn with_timeout_ms<F, T>(timeout_ms: u32, future: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    let timer = TimeoutFuture::new(timeout_ms);
    pin_mut!(future);
    pin_mut!(timer);

    match select(future, timer).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => {
            debug!("Request exceeded {} ms", timeout_ms);
            Err(SharedError::Timeout(timeout_ms))
        }
    }
}

/// Sends a prepared request and hands the successful response to `read`.
/// One timeout covers the round trip and the body read, since fetch
/// resolves as soon as the headers arrive.
pub async fn fetch_with<T, R, Fut>(request: Request, read: R) -> Result<T>
where
    R: FnOnce(Response) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    with_timeout(exchange(send(request), read)).await
}

/// Sends a prepared request and decodes its JSON body. `what` names the
/// payload in conversion errors.
pub async fn fetch_json<T: DeserializeOwned>(request: Request, what: &str) -> Result<T> {
    fetch_with(request, |response| read_json(response, what)).await
}

pub async fn read_json<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
    response
        .json::<T>()
        .await
        .map_err(|e| SharedError::Conversion(format!("Failed to parse {}: {}", what, e)))
}

async fn exchange<S, P, R, Fut, T>(send: S, read: R) -> Result<T>
where
    S: Future<Output = Result<P>>,
    R: FnOnce(P) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let response = send.await?;
    read(response).await
}

/// Maps transport failures and non-2xx statuses to [`SharedError`].
async fn send(request: Request) -> Result<Response> {
    let response = request
        .send()
        .await
        .map_err(|e| SharedError::Network(e.to_string()))?;

    if response.ok() {
        return Ok(response);
    }
    Err(error_from_response(response).await)
}

async fn error_from_response(response: Response) -> SharedError {
    let status = response.status();
    let message = response
        .json::<ErrorResponse>()
        .await
        .map(|e| e.error)
        .unwrap_or_else(|_| format!("HTTP {}", status));

    match status {
        401 | 403 => SharedError::Unauthorized(message),
        409 => SharedError::Conflict(message),
        _ => SharedError::Server { status, message },
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use futures::future::pending;
    use std::cell::Cell;
    use std::rc::Rc;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    async fn test_stalled_body_read_times_out() {
        let headers = async { Ok(()) };
        let result: Result<String> =
            with_timeout_ms(20, exchange(headers, |_| pending::<Result<String>>())).await;
        assert_eq!(result, Err(SharedError::Timeout(20)));
    }

    #[wasm_bindgen_test]
    async fn test_prompt_exchange_returns_body() {
        let headers = async { Ok(21) };
        let result = with_timeout_ms(1_000, exchange(headers, |n: i32| async move { Ok(n * 2) })).await;
        assert_eq!(result, Ok(42));
    }

    #[wasm_bindgen_test]
    async fn test_failed_send_skips_body_read() {
        let read = Rc::new(Cell::new(false));
        let headers = async { Err::<(), _>(SharedError::Network("offline".to_string())) };
        let flag = read.clone();
        let result: Result<()> = with_timeout_ms(
            1_000,
            exchange(headers, move |_| async move {
                flag.set(true);
                Ok(())
            }),
        )
        .await;
        assert_eq!(result, Err(SharedError::Network("offline".to_string())));
        assert!(!read.get());
    }
}
