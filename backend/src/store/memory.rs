//! In-memory store used when no database is configured, and in tests

use async_trait::async_trait;
use chrono::Utc;
use shared::{Comment, ForumPost, Reaction, SavedCity};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::Store;
use crate::error::AppResult;

#[derive(Default)]
struct Inner {
    /// Insertion order
    posts: Vec<ForumPost>,
    comments: HashMap<Uuid, Vec<Comment>>,
    saved_city: Option<SavedCity>,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Newest first; among equal timestamps the later insert wins
fn newest_first<T: Clone>(items: &[T], created_at: impl Fn(&T) -> chrono::DateTime<Utc>) -> Vec<T> {
    let mut out: Vec<T> = items.iter().rev().cloned().collect();
    out.sort_by(|a, b| created_at(b).cmp(&created_at(a)));
    out
}

#[async_trait]
impl Store for MemoryStore {
    fn kind(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }

    async fn list_posts(&self) -> AppResult<Vec<ForumPost>> {
        let inner = self.inner.read().await;
        Ok(newest_first(&inner.posts, |p| p.created_at))
    }

    async fn create_post(&self, username: &str, content: &str) -> AppResult<ForumPost> {
        let post = ForumPost {
            id: Uuid::new_v4(),
            username: username.to_string(),
            content: content.to_string(),
            created_at: Utc::now(),
            likes: 0,
            dislikes: 0,
        };
        self.inner.write().await.posts.push(post.clone());
        Ok(post)
    }

    async fn increment_reaction(
        &self,
        post_id: Uuid,
        reaction: Reaction,
    ) -> AppResult<Option<ForumPost>> {
        let mut inner = self.inner.write().await;
        let Some(post) = inner.posts.iter_mut().find(|p| p.id == post_id) else {
            return Ok(None);
        };
        match reaction {
            Reaction::Like => post.likes += 1,
            Reaction::Dislike => post.dislikes += 1,
        }
        Ok(Some(post.clone()))
    }

    async fn post_exists(&self, post_id: Uuid) -> AppResult<bool> {
        let inner = self.inner.read().await;
        Ok(inner.posts.iter().any(|p| p.id == post_id))
    }

    async fn list_comments(&self, post_id: Uuid) -> AppResult<Vec<Comment>> {
        let inner = self.inner.read().await;
        Ok(inner
            .comments
            .get(&post_id)
            .map(|c| newest_first(c, |c| c.created_at))
            .unwrap_or_default())
    }

    async fn add_comment(
        &self,
        post_id: Uuid,
        username: &str,
        comment: &str,
    ) -> AppResult<Option<Comment>> {
        let mut inner = self.inner.write().await;
        if !inner.posts.iter().any(|p| p.id == post_id) {
            return Ok(None);
        }
        let comment = Comment {
            id: Uuid::new_v4(),
            post_id,
            username: username.to_string(),
            comment: comment.to_string(),
            created_at: Utc::now(),
        };
        inner
            .comments
            .entry(post_id)
            .or_default()
            .push(comment.clone());
        Ok(Some(comment))
    }

    async fn last_city(&self) -> AppResult<Option<SavedCity>> {
        Ok(self.inner.read().await.saved_city.clone())
    }

    async fn save_city(&self, city: &str) -> AppResult<SavedCity> {
        let saved = SavedCity {
            last_city: city.to_string(),
            updated_at: Utc::now(),
        };
        self.inner.write().await.saved_city = Some(saved.clone());
        Ok(saved)
    }
}
