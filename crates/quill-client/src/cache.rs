//! Client-side post cache.

use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{Actor, Post, PostFilter};
use quill_core::services::authorization::can_view;

/// Ordered collection of the posts the client currently knows about.
///
/// Each operation takes the lock once, so readers never observe a half-applied
/// mutation. Entries are only ever written with server-confirmed snapshots.
pub struct ClientPostCache {
    posts: RwLock<Vec<Post>>,
}

impl ClientPostCache {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(Vec::new()),
        }
    }

    /// Substitute the entire collection.
    pub async fn replace_all(&self, posts: Vec<Post>) {
        let mut store = self.posts.write().await;
        *store = posts;
        tracing::debug!(count = store.len(), "Post cache replaced");
    }

    pub async fn get(&self, id: Uuid) -> Option<Post> {
        let store = self.posts.read().await;
        store.iter().find(|p| p.id == id).cloned()
    }

    /// Replace the entry with the same id in place, or append.
    pub async fn upsert_one(&self, post: Post) {
        let mut store = self.posts.write().await;
        match store.iter_mut().find(|p| p.id == post.id) {
            Some(existing) => *existing = post,
            None => store.push(post),
        }
    }

    /// Drop the entry if present; returns it.
    pub async fn remove_one(&self, id: Uuid) -> Option<Post> {
        let mut store = self.posts.write().await;
        let index = store.iter().position(|p| p.id == id)?;
        Some(store.remove(index))
    }

    /// Entries matching `filter`, in cache order.
    pub async fn list(&self, filter: &PostFilter) -> Vec<Post> {
        let store = self.posts.read().await;
        store.iter().filter(|p| filter.matches(p)).cloned().collect()
    }

    /// Like [`list`](Self::list), minus drafts the actor may not see.
    pub async fn list_visible(&self, actor: Option<&Actor>, filter: &PostFilter) -> Vec<Post> {
        let store = self.posts.read().await;
        store
            .iter()
            .filter(|p| can_view(actor, p) && filter.matches(p))
            .cloned()
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.posts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.posts.read().await.is_empty()
    }

    pub async fn snapshot(&self) -> Vec<Post> {
        self.posts.read().await.clone()
    }
}

impl Default for ClientPostCache {
    fn default() -> Self {
        Self::new()
    }
}
