//! Backend configuration for the Reelshare application
//!
//! The backend is addressed through a fixed set of identifiers (endpoint,
//! platform id, project id, database id, two collection ids, storage bucket
//! id) supplied as static configuration.

use std::env;

/// Configuration for the remote backend service
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL of the backend REST API (e.g. "http://localhost:4280/v1")
    pub endpoint: String,
    /// Platform identifier sent with every request
    pub platform_id: String,
    /// Project identifier sent with every request
    pub project_id: String,
    /// Database holding the user and video collections
    pub database_id: String,
    /// Collection of user profile documents
    pub user_collection_id: String,
    /// Collection of video post documents
    pub video_collection_id: String,
    /// Storage bucket for uploaded media files
    pub storage_bucket_id: String,
}

impl BackendConfig {
    /// Create a new BackendConfig from environment variables
    ///
    /// # Environment Variables
    /// - `REELSHARE_ENDPOINT`: backend base URL (default: "http://localhost:4280/v1")
    /// - `REELSHARE_PLATFORM_ID`: platform identifier (default: "com.reelshare.app")
    /// - `REELSHARE_PROJECT_ID`: project identifier (default: "reelshare-dev")
    /// - `REELSHARE_DATABASE_ID`: database identifier (default: "reelshare")
    /// - `REELSHARE_USER_COLLECTION_ID`: user collection (default: "users")
    /// - `REELSHARE_VIDEO_COLLECTION_ID`: video collection (default: "videos")
    /// - `REELSHARE_STORAGE_BUCKET_ID`: storage bucket (default: "media")
    pub fn from_env() -> Self {
        let endpoint = env::var("REELSHARE_ENDPOINT")
            .unwrap_or_else(|_| "http://localhost:4280/v1".to_string());
        let platform_id = env::var("REELSHARE_PLATFORM_ID")
            .unwrap_or_else(|_| "com.reelshare.app".to_string());
        let project_id =
            env::var("REELSHARE_PROJECT_ID").unwrap_or_else(|_| "reelshare-dev".to_string());
        let database_id =
            env::var("REELSHARE_DATABASE_ID").unwrap_or_else(|_| "reelshare".to_string());
        let user_collection_id =
            env::var("REELSHARE_USER_COLLECTION_ID").unwrap_or_else(|_| "users".to_string());
        let video_collection_id =
            env::var("REELSHARE_VIDEO_COLLECTION_ID").unwrap_or_else(|_| "videos".to_string());
        let storage_bucket_id =
            env::var("REELSHARE_STORAGE_BUCKET_ID").unwrap_or_else(|_| "media".to_string());

        BackendConfig {
            endpoint,
            platform_id,
            project_id,
            database_id,
            user_collection_id,
            video_collection_id,
            storage_bucket_id,
        }
    }
}
