use anyhow::{anyhow, Context};
use backoffice_shared::{
    account::{LoginResponse, UserProfile},
    const_config::{
        client::CLIENT_DEFAULT_SERVER_URL,
        path::{PathSpec, PATH_AUTH_LOGIN},
    },
    req_args::api::auth::LoginReqArgs,
};
use closure_traits::{ChannelCallBack, ChannelCallBackOutput};
use futures::channel::oneshot;
use reqwest::{Method, StatusCode};
use secrecy::ExposeSecret as _;
use std::fmt::Debug;
use std::sync::{Arc, Mutex};
use tracing::info;

pub mod api;
mod session;

pub use session::Session;

pub const DUMMY_ARGUMENT: &[(&str, &str)] = &[("", "")];

/// Substituted when an error response body is empty or not JSON
const FALLBACK_ERROR_DETAIL: &str = "An error occurred";

/// One wrapper around HTTP for the whole app
///
/// Stateless per call except for the session (bearer token + last profile)
/// which is written by login/logout only and read on every request
#[derive(Debug, Clone)]
pub struct Client {
    api_client: reqwest::Client,
    inner: Arc<Mutex<ClientInner>>,
}

#[derive(Debug)]
struct ClientInner {
    server_address: String,
    session: Option<Session>,
}

impl ClientInner {
    fn new(server_address: String) -> Self {
        Self {
            server_address,
            session: None,
        }
    }
}

impl Client {
    #[tracing::instrument(name = "NEW CLIENT-CORE")]
    pub fn new(server_address: String) -> Self {
        // Strip trailing slashes once so the path join below always produces
        // exactly one slash at the boundary
        let server_address = server_address.trim_end_matches('/').to_string();
        Self {
            api_client: reqwest::Client::new(),
            inner: Arc::new(Mutex::new(ClientInner::new(server_address))),
        }
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new(CLIENT_DEFAULT_SERVER_URL.to_string())
    }
}

impl Client {

    /// Hits the JSON login endpoint and on success stores the returned
    /// session before handing the profile back to the caller
    #[tracing::instrument(skip(ui_notify))]
    pub fn login<F: UiCallBack>(
        &self,
        args: LoginReqArgs,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<UserProfile>> {
        let (tx, rx) = oneshot::channel();
        let body = serde_json::json!({
            "email": args.email,
            "password": args.password.expose_secret(),
        });
        let client = self.clone();
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async {
            let msg = process_login(resp, client).await;
            tx.send(msg).expect("failed to send oneshot msg");
            ui_notify();
        };

        self.initiate_request(PATH_AUTH_LOGIN.method, PATH_AUTH_LOGIN.path, &body, on_done);
        rx
    }

    /// Clears the session, both fields together
    ///
    /// Purely local: the bearer token is the whole server-side session so
    /// there is no endpoint to call
    #[tracing::instrument]
    pub fn logout(&self) {
        self.inner.lock().expect("mutex poisoned").session = None;
    }

    #[tracing::instrument(skip(args, on_done))]
    // WARNING: Must skip args as it may contain sensitive info and "safe" versions
    // would usually already be logged by the caller
    fn initiate_request<T, F, O>(&self, method: Method, path: &str, args: &T, on_done: F)
    where
        T: serde::Serialize + Debug,
        F: ChannelCallBack<O>,
        O: ChannelCallBackOutput,
    {
        let is_get_method = method == Method::GET;
        let mut request = self.api_client.request(method, self.path_to_url(path));
        request = if is_get_method {
            request.query(&args)
        } else {
            request.json(&args)
        };
        if let Some(token) = self.bearer_token() {
            request = request.bearer_auth(token);
        }
        reqwest_cross::fetch(request, on_done)
    }

    fn send_request_expect_json<F, T, U>(
        &self,
        path_spec: PathSpec,
        args: &T,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<U>>
    where
        T: serde::Serialize + std::fmt::Debug,
        F: UiCallBack,
        U: Send + std::fmt::Debug + serde::de::DeserializeOwned + 'static,
    {
        self.send_request_expect_json_at(path_spec.method, path_spec.path, args, ui_notify)
    }

    /// Same as [`Self::send_request_expect_json`] but for paths built at
    /// runtime (the per-item product endpoints carry the id in the path)
    fn send_request_expect_json_at<F, T, U>(
        &self,
        method: Method,
        path: &str,
        args: &T,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<U>>
    where
        T: serde::Serialize + std::fmt::Debug,
        F: UiCallBack,
        U: Send + std::fmt::Debug + serde::de::DeserializeOwned + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async {
            let msg = process_json_body(resp, FALLBACK_ERROR_DETAIL).await;
            tx.send(msg).expect("failed to send oneshot msg");
            ui_notify();
        };
        self.initiate_request(method, path, args, on_done);
        rx
    }

    #[tracing::instrument(ret)]
    fn path_to_url(&self, path: &str) -> String {
        let base = self
            .inner
            .lock()
            .expect("failed to unlock client mutex")
            .server_address
            .clone();
        if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        }
    }

    /// Token to attach to requests, None when logged out
    ///
    /// An empty stored token also yields None so the Authorization header is
    /// omitted rather than sent empty
    fn bearer_token(&self) -> Option<String> {
        self.inner
            .lock()
            .expect("mutex poisoned")
            .session
            .as_ref()
            .map(|session| session.token.clone())
            .filter(|token| !token.is_empty())
    }

    /// Last profile returned by the server, if logged in
    pub fn session_user(&self) -> Option<UserProfile> {
        self.inner
            .lock()
            .expect("mutex poisoned")
            .session
            .as_ref()
            .map(|session| session.user.clone())
    }

    pub fn is_logged_in(&self) -> bool {
        self.inner
            .lock()
            .expect("mutex poisoned")
            .session
            .is_some()
    }

    /// Copy of the session for persisting across restarts
    pub fn session_snapshot(&self) -> Option<Session> {
        self.inner.lock().expect("mutex poisoned").session.clone()
    }

    /// Restores a previously persisted session (both fields together)
    pub fn restore_session(&self, session: Session) {
        self.inner.lock().expect("mutex poisoned").session = Some(session);
    }
}

#[tracing::instrument(ret, err(Debug))]
async fn process_json_body<T>(
    response: reqwest::Result<reqwest::Response>,
    fallback_detail: &str,
) -> anyhow::Result<T>
where
    T: Debug + serde::de::DeserializeOwned,
{
    let (response, status) = extract_response(response)?;
    if status.is_success() {
        response
            .json()
            .await
            .context("failed to parse result as json")
    } else {
        Err(handle_error(response, status, fallback_detail).await)
    }
}

#[tracing::instrument(ret, err(Debug))]
async fn process_login(
    response: reqwest::Result<reqwest::Response>,
    client: Client,
) -> anyhow::Result<UserProfile> {
    let (response, status) = extract_response(response)?;
    if !status.is_success() {
        return Err(handle_error(response, status, FALLBACK_ERROR_DETAIL).await);
    }
    let login_response: LoginResponse = response
        .json()
        .await
        .context("failed to parse result as json")?;
    let user = login_response.user.clone();
    client.inner.lock().expect("mutex poisoned").session = Some(Session {
        token: login_response.access_token,
        user: login_response.user,
    });
    Ok(user)
}

/// Normalizes a non-2xx response into the single uniform error shape
#[tracing::instrument(ret)]
async fn handle_error(
    response: reqwest::Response,
    status: StatusCode,
    fallback_detail: &str,
) -> anyhow::Error {
    debug_assert!(
        !status.is_success(),
        "this is supposed to be an error, right? Status code is: {status}"
    );
    // Parsing never raises, a non-JSON or empty body degrades to the fallback
    let body: serde_json::Value = response
        .json()
        .await
        .unwrap_or_else(|_| serde_json::json!({ "detail": fallback_detail }));
    error_from_body(status, &body)
}

fn error_from_body(status: StatusCode, body: &serde_json::Value) -> anyhow::Error {
    match body.get("detail").and_then(serde_json::Value::as_str) {
        Some(detail) if !detail.is_empty() => anyhow!("{detail}"),
        _ => anyhow!("HTTP error: {status}"),
    }
}

/// Provides a way to standardize the error message
#[tracing::instrument(ret, err(Debug))]
fn extract_response(
    response: reqwest::Result<reqwest::Response>,
) -> anyhow::Result<(reqwest::Response, StatusCode)> {
    if response.is_err() {
        info!("Response is err: {:#?}", response);
    }
    let response = response.context("failed to send request")?;
    let status = response.status();
    Ok((response, status))
}

pub trait UiCallBack: 'static + Send + FnOnce() {}
impl<T> UiCallBack for T where T: 'static + Send + FnOnce() {}

#[cfg(not(target_arch = "wasm32"))]
pub mod closure_traits {
    pub trait ChannelCallBack<O>:
        'static + Send + FnOnce(reqwest::Result<reqwest::Response>) -> O
    {
    }
    impl<T, O> ChannelCallBack<O> for T where
        T: 'static + Send + FnOnce(reqwest::Result<reqwest::Response>) -> O
    {
    }
    pub trait ChannelCallBackOutput: futures::Future<Output = ()> + Send {}
    impl<T> ChannelCallBackOutput for T where T: futures::Future<Output = ()> + Send {}
}

#[cfg(target_arch = "wasm32")]
pub mod closure_traits {
    pub trait ChannelCallBack<O>:
        'static + FnOnce(reqwest::Result<reqwest::Response>) -> O
    {
    }
    impl<T, O> ChannelCallBack<O> for T where
        T: 'static + FnOnce(reqwest::Result<reqwest::Response>) -> O
    {
    }
    pub trait ChannelCallBackOutput: futures::Future<Output = ()> {}
    impl<T> ChannelCallBackOutput for T where T: futures::Future<Output = ()> {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slashes_are_stripped() {
        let client = Client::new("http://localhost:8001///".to_string());
        assert_eq!(
            client.path_to_url("/api/v1/products"),
            "http://localhost:8001/api/v1/products"
        );
    }

    #[test]
    fn missing_leading_slash_is_added() {
        let client = Client::new("http://localhost:8001".to_string());
        assert_eq!(
            client.path_to_url("api/v1/products"),
            "http://localhost:8001/api/v1/products"
        );
    }

    #[test]
    fn error_prefers_server_detail() {
        let body = serde_json::json!({ "detail": "Email not found" });
        let err = error_from_body(StatusCode::NOT_FOUND, &body);
        assert_eq!(err.to_string(), "Email not found");
    }

    #[test]
    fn error_without_detail_reports_status_line() {
        let body = serde_json::json!({ "unexpected": true });
        let err = error_from_body(StatusCode::BAD_GATEWAY, &body);
        assert_eq!(err.to_string(), "HTTP error: 502 Bad Gateway");
    }

    #[test]
    fn no_token_stored_means_no_header_value() {
        let client = Client::new("http://localhost:8001".to_string());
        assert_eq!(client.bearer_token(), None);

        // An empty persisted token must also omit the header
        let user = serde_json::from_value(serde_json::json!({
            "id": 7,
            "email": "admin@example.com",
            "name": "Admin",
            "role": "admin",
            "status": "active",
        }))
        .unwrap();
        client.restore_session(Session {
            token: String::new(),
            user,
        });
        assert_eq!(client.bearer_token(), None);
    }
}
