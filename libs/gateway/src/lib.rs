//! Typed async client for the Reelshare backend service
//!
//! This crate maps user-facing intents (register, sign in, list posts,
//! upload media, publish a video) onto calls against the remote backend's
//! REST API, normalizing failures into a single error shape. It owns no
//! persistence or protocol of its own; every hard problem is delegated to
//! the backend.

pub mod accounts;
pub mod avatars;
pub mod client;
pub mod databases;
pub mod gateway;
pub mod models;
pub mod query;
pub mod storage;
pub mod validation;

pub use client::BackendClient;
pub use common::config::BackendConfig;
pub use common::error::{BackendError, GatewayError, GatewayResult};
pub use gateway::Gateway;
pub use models::{
    Account, FileKind, Post, Session, UploadedAsset, UserProfile, VideoForm,
};
pub use query::DocumentQuery;
