//! Domain models exchanged with the backend service

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use common::error::GatewayError;

/// Backend authentication account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub email: String,
    pub name: String,
}

/// Backend-issued credential representing an authenticated user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub user_id: String,
    /// Opaque token attached to subsequent requests
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// User profile document, created at registration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub account_id: String,
    pub email: String,
    pub username: String,
    pub avatar_url: String,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a profile document
#[derive(Debug, Clone, Serialize)]
pub struct NewUserProfile {
    pub account_id: String,
    pub email: String,
    pub username: String,
    pub avatar_url: String,
}

/// Video post document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub thumbnail_url: String,
    pub video_url: String,
    pub prompt: String,
    pub creator_id: String,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a post document
#[derive(Debug, Clone, Serialize)]
pub struct NewPost {
    pub title: String,
    pub thumbnail_url: String,
    pub video_url: String,
    pub prompt: String,
    pub creator_id: String,
}

/// Transient reference to a local file selected for upload
#[derive(Debug, Clone)]
pub struct UploadedAsset {
    pub name: String,
    pub mime_type: String,
    pub size: u64,
    pub path: PathBuf,
}

/// Form data for publishing a new video
#[derive(Debug, Clone)]
pub struct VideoForm {
    pub title: String,
    pub prompt: String,
    pub creator_id: String,
    pub thumbnail: UploadedAsset,
    pub video: UploadedAsset,
}

/// Record returned by the storage service after an upload
#[derive(Debug, Clone, Deserialize)]
pub struct StoredFile {
    pub id: String,
    pub bucket_id: String,
    pub name: String,
    pub mime_type: String,
    pub size: u64,
}

/// One page of documents returned by a list call
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentList<T> {
    pub total: u64,
    pub documents: Vec<T>,
}

/// Kind of media file, deciding which URL the storage service derives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Image,
    Video,
}

impl FromStr for FileKind {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image" => Ok(FileKind::Image),
            "video" => Ok(FileKind::Video),
            other => Err(GatewayError::InvalidFileKind(other.to_string())),
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileKind::Image => write!(f, "image"),
            FileKind::Video => write!(f, "video"),
        }
    }
}
