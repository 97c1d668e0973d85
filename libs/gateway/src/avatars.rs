//! Avatar URL derivation
//!
//! The backend renders an initials avatar on the fly; the client only
//! constructs the URL.

use reqwest::Url;

use common::error::BackendError;

use crate::client::BackendClient;

/// Wrapper around the backend's avatar endpoints
#[derive(Clone)]
pub struct Avatars {
    client: BackendClient,
}

impl Avatars {
    /// Create a new avatars wrapper
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    /// URL of an avatar showing the initials of the given name
    pub fn initials_url(&self, name: &str) -> Result<Url, BackendError> {
        let mut url = self.client.url("avatars/initials")?;
        url.query_pairs_mut()
            .append_pair("name", name)
            .append_pair("project", &self.client.config().project_id);
        Ok(url)
    }
}
