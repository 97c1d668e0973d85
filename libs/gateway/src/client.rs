//! HTTP client for the remote backend service
//!
//! `BackendClient` wraps a `reqwest::Client` together with the backend
//! configuration and the current session token. It is constructed once and
//! passed into `Gateway` explicitly, so tests can point it at a mock server.

use std::sync::{Arc, RwLock};

use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use common::config::BackendConfig;
use common::error::BackendError;

/// Client for the backend REST API
///
/// Cloning is cheap; clones share the same session token.
#[derive(Clone)]
pub struct BackendClient {
    http: Client,
    config: Arc<BackendConfig>,
    session_token: Arc<RwLock<Option<String>>>,
}

impl BackendClient {
    /// Create a new client from backend configuration
    pub fn new(config: BackendConfig) -> Self {
        BackendClient {
            http: Client::new(),
            config: Arc::new(config),
            session_token: Arc::new(RwLock::new(None)),
        }
    }

    /// Backend configuration this client was built with
    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// True once a session token has been stored by a successful sign-in
    pub fn has_session(&self) -> bool {
        self.session_token
            .read()
            .expect("session token lock poisoned")
            .is_some()
    }

    /// Store or clear the session token attached to subsequent requests
    pub(crate) fn set_session_token(&self, token: Option<String>) {
        *self
            .session_token
            .write()
            .expect("session token lock poisoned") = token;
    }

    /// Build an absolute URL for a path below the configured endpoint
    pub(crate) fn url(&self, path: &str) -> Result<Url, BackendError> {
        let absolute = format!(
            "{}/{}",
            self.config.endpoint.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Url::parse(&absolute).map_err(|e| BackendError::InvalidEndpoint(e.to_string()))
    }

    /// Start a request with the project, platform, and session headers set
    pub(crate) fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let mut request = self
            .http
            .request(method, url)
            .header("X-Project-Id", &self.config.project_id)
            .header("X-Platform-Id", &self.config.platform_id);

        let token = self
            .session_token
            .read()
            .expect("session token lock poisoned");
        if let Some(token) = token.as_ref() {
            request = request.header("X-Session-Token", token);
        }

        request
    }

    /// Send a request and decode the JSON response body
    pub(crate) async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, BackendError> {
        let response = check_status(request.send().await?).await?;
        Ok(response.json::<T>().await?)
    }

    /// Send a request and discard the response body
    pub(crate) async fn send_empty(&self, request: RequestBuilder) -> Result<(), BackendError> {
        check_status(request.send().await?).await?;
        Ok(())
    }
}

/// Error payload the backend attaches to non-success responses
#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Map a non-success response into `BackendError::Api`
async fn check_status(response: Response) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.message,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
    };

    Err(BackendError::Api {
        status: status.as_u16(),
        message,
    })
}
