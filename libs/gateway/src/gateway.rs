//! Gateway operations mapping user-facing intents onto backend calls
//!
//! Each operation issues one or more calls against the backend and reports
//! failures as a `GatewayError` naming the operation. There are no retries
//! and no partial-failure recovery; the first failure aborts the operation.

use reqwest::Url;
use tracing::{info, warn};
use uuid::Uuid;

use common::config::BackendConfig;
use common::error::{GatewayError, GatewayResult};

use crate::accounts::Accounts;
use crate::avatars::Avatars;
use crate::client::BackendClient;
use crate::databases::Databases;
use crate::models::{
    Account, DocumentList, FileKind, NewPost, NewUserProfile, Post, Session, UploadedAsset,
    UserProfile, VideoForm,
};
use crate::query::DocumentQuery;
use crate::storage::{PreviewOptions, Storage};
use crate::validation;

/// Preview geometry applied to image uploads
const IMAGE_PREVIEW: PreviewOptions = PreviewOptions {
    width: 2000,
    height: 2000,
    gravity: "top",
    quality: 100,
};

/// Number of posts returned by `get_latest_posts`
const LATEST_POSTS_LIMIT: u32 = 7;

/// Gateway to the backend service
///
/// Stateless apart from the session token held by the injected client;
/// cloning shares that client.
#[derive(Clone)]
pub struct Gateway {
    accounts: Accounts,
    avatars: Avatars,
    databases: Databases,
    storage: Storage,
    client: BackendClient,
}

impl Gateway {
    /// Create a new gateway over an explicitly constructed client
    pub fn new(client: BackendClient) -> Self {
        Gateway {
            accounts: Accounts::new(client.clone()),
            avatars: Avatars::new(client.clone()),
            databases: Databases::new(client.clone()),
            storage: Storage::new(client.clone()),
            client,
        }
    }

    fn config(&self) -> &BackendConfig {
        self.client.config()
    }

    /// Register a new user
    ///
    /// Sequential pipeline: create the account, derive an initials avatar,
    /// sign in with the same credentials, create the profile document
    /// linking `account_id`. If a later step fails the created account is
    /// kept (no rollback); a warning is logged and the wrapped error is
    /// returned. Side effect on success: the caller is left signed in.
    pub async fn create_user(
        &self,
        email: &str,
        password: &str,
        username: &str,
    ) -> GatewayResult<UserProfile> {
        validation::validate_username(username).map_err(GatewayError::InvalidInput)?;
        validation::validate_email(email).map_err(GatewayError::InvalidInput)?;
        validation::validate_password(password).map_err(GatewayError::InvalidInput)?;

        let account = self
            .accounts
            .create(&unique_id(), email, password, username)
            .await
            .map_err(|err| GatewayError::backend("create user", err))?;

        if account.id.is_empty() {
            return Err(GatewayError::EmptyResult {
                operation: "create user",
            });
        }

        let avatar_url = self
            .avatars
            .initials_url(username)
            .map_err(|err| GatewayError::backend("create user", err))?;

        if let Err(err) = self.sign_in(email, password).await {
            warn!(account_id = %account.id, "sign-in after registration failed; account kept without profile");
            return Err(GatewayError::backend("create user", err));
        }

        let profile: UserProfile = self
            .databases
            .create_document(
                &self.config().database_id,
                &self.config().user_collection_id,
                &unique_id(),
                &NewUserProfile {
                    account_id: account.id.clone(),
                    email: email.to_string(),
                    username: username.to_string(),
                    avatar_url: avatar_url.to_string(),
                },
            )
            .await
            .map_err(|err| {
                warn!(account_id = %account.id, "profile creation failed; account kept without profile");
                GatewayError::backend("create user", err)
            })?;

        info!(profile_id = %profile.id, username, "registered new user");
        Ok(profile)
    }

    /// Sign in with email and password
    pub async fn sign_in(&self, email: &str, password: &str) -> GatewayResult<Session> {
        let session = self
            .accounts
            .create_session(email, password)
            .await
            .map_err(|err| GatewayError::backend("sign in", err))?;

        info!(user_id = %session.user_id, "signed in");
        Ok(session)
    }

    /// Fetch the account behind the active session
    pub async fn get_account(&self) -> GatewayResult<Account> {
        self.accounts
            .get()
            .await
            .map_err(|err| GatewayError::backend("get account", err))
    }

    /// Fetch the profile of the signed-in user
    ///
    /// "No active session" and "no matching profile document" are valid,
    /// non-exceptional outcomes and yield `Ok(None)`; transport and server
    /// failures are errors.
    pub async fn get_current_user(&self) -> GatewayResult<Option<UserProfile>> {
        let account = match self.accounts.get().await {
            Ok(account) => account,
            Err(err) if err.is_unauthorized() => return Ok(None),
            Err(err) => return Err(GatewayError::backend("get current user", err)),
        };

        let profiles: DocumentList<UserProfile> = self
            .databases
            .list_documents(
                &self.config().database_id,
                &self.config().user_collection_id,
                &[DocumentQuery::equal("account_id", account.id.as_str())],
            )
            .await
            .map_err(|err| GatewayError::backend("get current user", err))?;

        Ok(profiles.documents.into_iter().next())
    }

    /// All posts, newest first
    pub async fn get_all_posts(&self) -> GatewayResult<Vec<Post>> {
        self.list_posts("get all posts", &[DocumentQuery::order_desc("created_at")])
            .await
    }

    /// The most recent posts
    pub async fn get_latest_posts(&self) -> GatewayResult<Vec<Post>> {
        self.list_posts(
            "get latest posts",
            &[
                DocumentQuery::order_desc("created_at"),
                DocumentQuery::limit(LATEST_POSTS_LIMIT),
            ],
        )
        .await
    }

    /// Posts whose title matches the query; match semantics are the
    /// backend's
    pub async fn search_posts(&self, query: &str) -> GatewayResult<Vec<Post>> {
        self.list_posts("search posts", &[DocumentQuery::search("title", query)])
            .await
    }

    /// Posts authored by the given user, newest first
    pub async fn get_user_posts(&self, user_id: &str) -> GatewayResult<Vec<Post>> {
        self.list_posts(
            "get user posts",
            &[
                DocumentQuery::equal("creator_id", user_id),
                DocumentQuery::order_desc("created_at"),
            ],
        )
        .await
    }

    async fn list_posts(
        &self,
        operation: &'static str,
        queries: &[DocumentQuery],
    ) -> GatewayResult<Vec<Post>> {
        let posts: DocumentList<Post> = self
            .databases
            .list_documents(
                &self.config().database_id,
                &self.config().video_collection_id,
                queries,
            )
            .await
            .map_err(|err| GatewayError::backend(operation, err))?;

        Ok(posts.documents)
    }

    /// Delete the active session
    pub async fn sign_out(&self) -> GatewayResult<()> {
        self.accounts
            .delete_session()
            .await
            .map_err(|err| GatewayError::backend("sign out", err))?;

        info!("signed out");
        Ok(())
    }

    /// URL under which a stored file can be displayed
    ///
    /// Videos get the direct view URL; images get a 2000x2000 top-cropped
    /// preview at full quality. No request is issued.
    pub fn file_preview_url(&self, file_id: &str, kind: FileKind) -> GatewayResult<Url> {
        let url = match kind {
            FileKind::Video => self.storage.file_view_url(file_id),
            FileKind::Image => self.storage.file_preview_url(file_id, IMAGE_PREVIEW),
        }
        .map_err(|err| GatewayError::backend("get file preview", err))?;

        Ok(url)
    }

    /// Store an asset and return its display URL
    ///
    /// Absent input is not an error: `None` resolves to `Ok(None)` without
    /// touching the network.
    pub async fn upload_file(
        &self,
        file: Option<&UploadedAsset>,
        kind: FileKind,
    ) -> GatewayResult<Option<Url>> {
        let Some(asset) = file else {
            return Ok(None);
        };

        let stored = self
            .storage
            .create_file(&unique_id(), asset)
            .await
            .map_err(|err| GatewayError::backend("upload file", err))?;

        if stored.id.is_empty() {
            return Err(GatewayError::EmptyResult {
                operation: "upload file",
            });
        }

        info!(file_id = %stored.id, name = %asset.name, "uploaded file");
        Ok(Some(self.file_preview_url(&stored.id, kind)?))
    }

    /// Publish a new video post
    ///
    /// Thumbnail and video are uploaded concurrently; the join is
    /// all-or-nothing, so no post document is created if either upload
    /// fails.
    pub async fn create_video(&self, form: &VideoForm) -> GatewayResult<Post> {
        let (thumbnail_url, video_url) = tokio::try_join!(
            self.upload_file(Some(&form.thumbnail), FileKind::Image),
            self.upload_file(Some(&form.video), FileKind::Video),
        )
        .map_err(|err| GatewayError::backend("create video", err))?;

        // Both inputs were present, so both URLs are too.
        let (thumbnail_url, video_url) = match (thumbnail_url, video_url) {
            (Some(thumbnail_url), Some(video_url)) => (thumbnail_url, video_url),
            _ => {
                return Err(GatewayError::EmptyResult {
                    operation: "create video",
                });
            }
        };

        let post: Post = self
            .databases
            .create_document(
                &self.config().database_id,
                &self.config().video_collection_id,
                &unique_id(),
                &NewPost {
                    title: form.title.clone(),
                    thumbnail_url: thumbnail_url.to_string(),
                    video_url: video_url.to_string(),
                    prompt: form.prompt.clone(),
                    creator_id: form.creator_id.clone(),
                },
            )
            .await
            .map_err(|err| GatewayError::backend("create video", err))?;

        info!(post_id = %post.id, title = %post.title, "created video post");
        Ok(post)
    }
}

/// Freshly generated unique identifier for new documents and files
fn unique_id() -> String {
    Uuid::new_v4().to_string()
}
