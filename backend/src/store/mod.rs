//! Persistence for forum posts, comments and the saved weather city
//!
//! Handlers only see `Arc<dyn Store>`; the backend is picked at startup.

use async_trait::async_trait;
use shared::{Comment, ForumPost, Reaction, SavedCity};
use uuid::Uuid;

use crate::error::AppResult;

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Document store operations used by the services
#[async_trait]
pub trait Store: Send + Sync {
    /// Short backend name reported by the health endpoint
    fn kind(&self) -> &'static str;

    /// Check the backend is reachable
    async fn ping(&self) -> AppResult<()>;

    /// All posts, newest first
    async fn list_posts(&self) -> AppResult<Vec<ForumPost>>;

    async fn create_post(&self, username: &str, content: &str) -> AppResult<ForumPost>;

    /// Atomically add one to the reaction counter.
    ///
    /// Returns `None` when the post does not exist; nothing is created.
    async fn increment_reaction(&self, post_id: Uuid, reaction: Reaction)
        -> AppResult<Option<ForumPost>>;

    async fn post_exists(&self, post_id: Uuid) -> AppResult<bool>;

    /// Comments of a post, newest first
    async fn list_comments(&self, post_id: Uuid) -> AppResult<Vec<Comment>>;

    /// Returns `None` when the parent post does not exist
    async fn add_comment(
        &self,
        post_id: Uuid,
        username: &str,
        comment: &str,
    ) -> AppResult<Option<Comment>>;

    async fn last_city(&self) -> AppResult<Option<SavedCity>>;

    /// Overwrite the single saved-city record
    async fn save_city(&self, city: &str) -> AppResult<SavedCity>;
}
