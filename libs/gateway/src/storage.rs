//! File storage operations against the backend
//!
//! Uploads go through the configured bucket; view and preview URLs are
//! derived locally from the file id, no request is issued for them.

use reqwest::multipart::{Form, Part};
use reqwest::{Method, Url};

use common::error::BackendError;

use crate::client::BackendClient;
use crate::models::{StoredFile, UploadedAsset};

/// Sizing and cropping applied to an image preview URL
#[derive(Debug, Clone, Copy)]
pub struct PreviewOptions {
    pub width: u32,
    pub height: u32,
    pub gravity: &'static str,
    pub quality: u8,
}

/// Wrapper around the backend's storage endpoints
#[derive(Clone)]
pub struct Storage {
    client: BackendClient,
}

impl Storage {
    /// Create a new storage wrapper
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    fn bucket_id(&self) -> &str {
        &self.client.config().storage_bucket_id
    }

    /// Upload an asset into the configured bucket under the given file id
    pub async fn create_file(
        &self,
        file_id: &str,
        asset: &UploadedAsset,
    ) -> Result<StoredFile, BackendError> {
        let url = self
            .client
            .url(&format!("storage/buckets/{}/files", self.bucket_id()))?;

        let bytes = tokio::fs::read(&asset.path)
            .await
            .map_err(|source| BackendError::FileRead {
                path: asset.path.display().to_string(),
                source,
            })?;

        let part = Part::bytes(bytes)
            .file_name(asset.name.clone())
            .mime_str(&asset.mime_type)?;
        let form = Form::new()
            .text("file_id", file_id.to_string())
            .part("file", part);

        self.client
            .send(self.client.request(Method::POST, url).multipart(form))
            .await
    }

    /// Direct view URL for a stored file
    pub fn file_view_url(&self, file_id: &str) -> Result<Url, BackendError> {
        let mut url = self.client.url(&format!(
            "storage/buckets/{}/files/{}/view",
            self.bucket_id(),
            file_id
        ))?;
        url.query_pairs_mut()
            .append_pair("project", &self.client.config().project_id);
        Ok(url)
    }

    /// Sized and cropped preview URL for a stored image
    pub fn file_preview_url(
        &self,
        file_id: &str,
        options: PreviewOptions,
    ) -> Result<Url, BackendError> {
        let mut url = self.client.url(&format!(
            "storage/buckets/{}/files/{}/preview",
            self.bucket_id(),
            file_id
        ))?;
        url.query_pairs_mut()
            .append_pair("width", &options.width.to_string())
            .append_pair("height", &options.height.to_string())
            .append_pair("gravity", options.gravity)
            .append_pair("quality", &options.quality.to_string())
            .append_pair("project", &self.client.config().project_id);
        Ok(url)
    }
}
