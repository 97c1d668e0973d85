//! Profile screen view-model
//!
//! Consumes the gateway through the `ProfileSource` seam so tests can
//! substitute a double. Holds the signed-in user and their posts, guards
//! pull-to-refresh with a busy flag, and renders a plain-text view.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use common::error::GatewayResult;
use gateway::models::{Post, UserProfile};
use gateway::Gateway;

/// Follower count shown in the header; not tracked by the backend yet
const FOLLOWER_COUNT: &str = "1.2k";

/// What the profile screen needs from the gateway
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileSource: Send + Sync {
    async fn current_user(&self) -> GatewayResult<Option<UserProfile>>;
    async fn user_posts(&self, user_id: &str) -> GatewayResult<Vec<Post>>;
    async fn sign_out(&self) -> GatewayResult<()>;
}

#[async_trait]
impl ProfileSource for Gateway {
    async fn current_user(&self) -> GatewayResult<Option<UserProfile>> {
        self.get_current_user().await
    }

    async fn user_posts(&self, user_id: &str) -> GatewayResult<Vec<Post>> {
        self.get_user_posts(user_id).await
    }

    async fn sign_out(&self) -> GatewayResult<()> {
        Gateway::sign_out(self).await
    }
}

/// Snapshot of what the screen currently shows
#[derive(Debug, Clone, Default)]
pub struct ScreenState {
    pub user: Option<UserProfile>,
    pub posts: Vec<Post>,
}

/// Profile screen over any `ProfileSource`
pub struct ProfileScreen<S> {
    source: S,
    state: Mutex<ScreenState>,
    refreshing: AtomicBool,
}

impl<S: ProfileSource> ProfileScreen<S> {
    /// Create a screen with empty state
    pub fn new(source: S) -> Self {
        ProfileScreen {
            source,
            state: Mutex::new(ScreenState::default()),
            refreshing: AtomicBool::new(false),
        }
    }

    /// Fetch the current user and their posts
    pub async fn load(&self) -> GatewayResult<()> {
        let user = self.source.current_user().await?;
        let posts = match &user {
            Some(user) => self.source.user_posts(&user.id).await?,
            None => Vec::new(),
        };

        let mut state = self.state.lock().expect("screen state lock poisoned");
        state.user = user;
        state.posts = posts;
        Ok(())
    }

    /// Re-fetch the post list
    ///
    /// Returns `Ok(false)` without fetching when a refresh is already in
    /// flight.
    pub async fn refresh(&self) -> GatewayResult<bool> {
        if self
            .refreshing
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Ok(false);
        }

        let result = self.reload_posts().await;
        self.refreshing.store(false, Ordering::SeqCst);
        result.map(|_| true)
    }

    async fn reload_posts(&self) -> GatewayResult<()> {
        let user_id = {
            let state = self.state.lock().expect("screen state lock poisoned");
            state.user.as_ref().map(|user| user.id.clone())
        };

        if let Some(user_id) = user_id {
            let posts = self.source.user_posts(&user_id).await?;
            self.state
                .lock()
                .expect("screen state lock poisoned")
                .posts = posts;
        }

        Ok(())
    }

    /// Sign out and clear the local user and post state
    pub async fn logout(&self) -> GatewayResult<()> {
        self.source.sign_out().await?;

        let mut state = self.state.lock().expect("screen state lock poisoned");
        state.user = None;
        state.posts.clear();
        Ok(())
    }

    /// Copy of the current screen state
    pub fn snapshot(&self) -> ScreenState {
        self.state
            .lock()
            .expect("screen state lock poisoned")
            .clone()
    }
}

/// Render the screen state as plain text
pub fn render(state: &ScreenState) -> String {
    let Some(user) = &state.user else {
        return "No user is signed in.".to_string();
    };

    let mut lines = vec![
        "[logout]".to_string(),
        format!("avatar: {}", user.avatar_url),
        format!("@{}", user.username),
        format!(
            "{} Posts   {} Followers",
            state.posts.len(),
            FOLLOWER_COUNT
        ),
        String::new(),
    ];

    if state.posts.is_empty() {
        lines.push("No Videos Found".to_string());
        lines.push("No videos found for this search query".to_string());
    } else {
        for post in &state.posts {
            lines.push(format!("{} ({})", post.title, post.video_url));
        }
    }

    lines.join("\n")
}
