//! In-memory post store - used when no database is configured.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::Post;
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, PostRepository};

/// Post store backed by a vector in insertion order.
///
/// Every call takes the lock once, so each write is atomic relative to reads and
/// concurrent writers to the same post resolve as last-write-wins.
/// Note: Data is lost on process restart.
pub struct InMemoryPostRepository {
    posts: RwLock<Vec<Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|p| p.id == id).cloned())
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let mut posts = self.posts.write().await;
        if posts.iter().any(|p| p.id == post.id) {
            return Err(RepoError::Constraint(format!("post {} already exists", post.id)));
        }
        posts.push(post.clone());
        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut posts = self.posts.write().await;
        let slot = posts
            .iter_mut()
            .find(|p| p.id == post.id)
            .ok_or(RepoError::NotFound)?;
        *slot = post.clone();
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut posts = self.posts.write().await;
        let index = posts
            .iter()
            .position(|p| p.id == id)
            .ok_or(RepoError::NotFound)?;
        posts.remove(index);
        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().rev().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use quill_core::domain::{AuthorSnapshot, Category, PostStatus};

    use super::*;

    fn post(title: &str) -> Post {
        Post {
            id: Uuid::new_v4(),
            title: title.to_string(),
            content: "body".to_string(),
            excerpt: "body...".to_string(),
            featured_image: None,
            tags: vec![],
            category: Category::Business,
            status: PostStatus::Draft,
            author_id: Uuid::new_v4(),
            author: AuthorSnapshot {
                name: "n".to_string(),
                avatar: "a".to_string(),
            },
            reading_time: 1,
            published_date: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_find_all_newest_insert_first() {
        let repo = InMemoryPostRepository::new();
        let first = repo.insert(post("first")).await.unwrap();
        let second = repo.insert(post("second")).await.unwrap();

        let all = repo.find_all().await.unwrap();
        assert_eq!(all[0].id, second.id);
        assert_eq!(all[1].id, first.id);
    }

    #[tokio::test]
    async fn test_update_missing_post() {
        let repo = InMemoryPostRepository::new();
        let result = repo.update(post("ghost")).await;
        assert!(matches!(result, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let repo = InMemoryPostRepository::new();
        let saved = repo.insert(post("doomed")).await.unwrap();

        repo.delete(saved.id).await.unwrap();
        assert!(repo.find_by_id(saved.id).await.unwrap().is_none());
        assert!(matches!(repo.delete(saved.id).await, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_duplicate_insert_rejected() {
        let repo = InMemoryPostRepository::new();
        let saved = repo.insert(post("once")).await.unwrap();
        let result = repo.insert(saved).await;
        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }
}
