//! Document database operations against the backend

use reqwest::{Method, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;

use common::error::BackendError;

use crate::client::BackendClient;
use crate::models::DocumentList;
use crate::query::DocumentQuery;

/// Wrapper around the backend's document database endpoints
#[derive(Clone)]
pub struct Databases {
    client: BackendClient,
}

impl Databases {
    /// Create a new databases wrapper
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    fn documents_url(&self, database_id: &str, collection_id: &str) -> Result<Url, BackendError> {
        self.client.url(&format!(
            "databases/{}/collections/{}/documents",
            database_id, collection_id
        ))
    }

    /// Create a document and return it as decoded by the backend
    pub async fn create_document<T, D>(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
        data: &D,
    ) -> Result<T, BackendError>
    where
        T: DeserializeOwned,
        D: Serialize,
    {
        let url = self.documents_url(database_id, collection_id)?;
        let body = json!({ "document_id": document_id, "data": data });

        self.client
            .send(self.client.request(Method::POST, url).json(&body))
            .await
    }

    /// List documents matching the given query predicates
    pub async fn list_documents<T>(
        &self,
        database_id: &str,
        collection_id: &str,
        queries: &[DocumentQuery],
    ) -> Result<DocumentList<T>, BackendError>
    where
        T: DeserializeOwned,
    {
        let mut url = self.documents_url(database_id, collection_id)?;
        {
            let mut pairs = url.query_pairs_mut();
            for query in queries {
                pairs.append_pair("queries[]", &query.to_param());
            }
        }

        self.client.send(self.client.request(Method::GET, url)).await
    }
}
