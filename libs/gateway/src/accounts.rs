//! Account and session operations against the backend

use reqwest::Method;
use serde_json::json;
use tracing::info;

use common::error::BackendError;

use crate::client::BackendClient;
use crate::models::{Account, Session};

/// Wrapper around the backend's account and session endpoints
#[derive(Clone)]
pub struct Accounts {
    client: BackendClient,
}

impl Accounts {
    /// Create a new accounts wrapper
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    /// Create a backend account
    pub async fn create(
        &self,
        account_id: &str,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<Account, BackendError> {
        let url = self.client.url("account")?;
        let body = json!({
            "account_id": account_id,
            "email": email,
            "password": password,
            "name": name,
        });

        self.client
            .send(self.client.request(Method::POST, url).json(&body))
            .await
    }

    /// Create an email/password session and store its token on the client
    pub async fn create_session(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, BackendError> {
        let url = self.client.url("account/sessions")?;
        let body = json!({ "email": email, "password": password });

        let session: Session = self
            .client
            .send(self.client.request(Method::POST, url).json(&body))
            .await?;

        self.client.set_session_token(Some(session.token.clone()));
        Ok(session)
    }

    /// Fetch the account behind the active session
    pub async fn get(&self) -> Result<Account, BackendError> {
        let url = self.client.url("account")?;
        self.client.send(self.client.request(Method::GET, url)).await
    }

    /// Delete the current session and drop the stored token
    ///
    /// A 401 means the session is already gone; that counts as success so
    /// sign-out stays idempotent from the caller's perspective.
    pub async fn delete_session(&self) -> Result<(), BackendError> {
        let url = self.client.url("account/sessions/current")?;

        match self
            .client
            .send_empty(self.client.request(Method::DELETE, url))
            .await
        {
            Ok(()) => {}
            Err(err) if err.is_unauthorized() => {
                info!("no active session to delete");
            }
            Err(err) => return Err(err),
        }

        self.client.set_session_token(None);
        Ok(())
    }
}
