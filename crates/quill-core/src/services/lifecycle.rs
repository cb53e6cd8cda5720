//! Post lifecycle - create, update, delete and list against the document store.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use super::authorization::{self, PostAction};
use super::derive::{compute_excerpt, compute_reading_time, normalize_tags};
use crate::domain::{Actor, NewPost, Post, PostChanges, PostFilter};
use crate::error::{DomainError, RepoError};
use crate::ports::PostRepository;

/// Server-side owner of the post lifecycle.
///
/// Every check (identity, validation, existence, ownership) runs before the first
/// mutating store call, so a rejected request never leaves partial writes behind.
/// Writes are last-write-wins; no version token is exchanged.
#[derive(Clone)]
pub struct PostLifecycleManager {
    posts: Arc<dyn PostRepository>,
}

impl PostLifecycleManager {
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }

    /// Create a post owned by `actor`.
    pub async fn create(&self, input: NewPost, actor: Option<&Actor>) -> Result<Post, DomainError> {
        let actor = authorization::authorize_create(actor)?;

        let title = required_text("title", &input.title)?;
        let content = required_text("content", &input.content)?;
        let category = input
            .category
            .ok_or_else(|| DomainError::Validation("category is required".to_string()))?;

        let post = Post {
            id: Uuid::new_v4(),
            excerpt: compute_excerpt(&content),
            reading_time: compute_reading_time(&content),
            title,
            content,
            featured_image: optional_text(input.featured_image),
            tags: normalize_tags(&input.tags),
            category,
            status: input.status.unwrap_or_default(),
            author_id: actor.id,
            author: actor.author_snapshot(),
            published_date: Utc::now(),
        };

        let saved = self.posts.insert(post).await?;
        tracing::info!(
            post_id = %saved.id,
            actor_id = %actor.id,
            status = %saved.status,
            "Post created"
        );
        Ok(saved)
    }

    /// Replace the mutable fields carried by `changes`.
    pub async fn update(
        &self,
        id: Uuid,
        changes: PostChanges,
        actor: Option<&Actor>,
    ) -> Result<Post, DomainError> {
        authorization::authenticated(actor)?;

        let mut post = self.find(id).await?;
        let action = match changes.status {
            Some(status) if status != post.status => PostAction::Publish,
            _ => PostAction::Edit,
        };
        let actor = authorization::authorize(actor, action, &post)?;
        validate_changes(&changes)?;

        let previous_status = post.status;
        apply_changes(&mut post, changes);

        let saved = self.posts.update(post).await.map_err(|e| match e {
            RepoError::NotFound => DomainError::post_not_found(id),
            other => other.into(),
        })?;

        if saved.status != previous_status {
            tracing::info!(
                post_id = %id,
                actor_id = %actor.id,
                from = %previous_status,
                to = %saved.status,
                "Post status changed"
            );
        }
        tracing::info!(post_id = %id, actor_id = %actor.id, "Post updated");
        Ok(saved)
    }

    /// Hard-delete a post.
    pub async fn delete(&self, id: Uuid, actor: Option<&Actor>) -> Result<(), DomainError> {
        authorization::authenticated(actor)?;

        let post = self.find(id).await?;
        let actor = authorization::authorize(actor, PostAction::Delete, &post)?;

        self.posts.delete(id).await.map_err(|e| match e {
            RepoError::NotFound => DomainError::post_not_found(id),
            other => other.into(),
        })?;

        tracing::info!(post_id = %id, actor_id = %actor.id, "Post deleted");
        Ok(())
    }

    /// Look up a single post.
    pub async fn get(&self, id: Uuid) -> Result<Post, DomainError> {
        self.find(id).await
    }

    /// All posts matching `filter`, newest first.
    pub async fn list(&self, filter: &PostFilter) -> Result<Vec<Post>, DomainError> {
        let mut posts = self.posts.find_all().await?;
        posts.retain(|p| filter.matches(p));
        // Stable: equal dates keep the store's order.
        posts.sort_by(|a, b| b.published_date.cmp(&a.published_date));
        Ok(posts)
    }

    /// Like [`get`](Self::get), but another user's draft reads as absent.
    pub async fn get_visible(&self, id: Uuid, actor: Option<&Actor>) -> Result<Post, DomainError> {
        let post = self.find(id).await?;
        if authorization::can_view(actor, &post) {
            Ok(post)
        } else {
            Err(DomainError::post_not_found(id))
        }
    }

    /// Like [`list`](Self::list), minus drafts `actor` may not see.
    pub async fn list_visible(
        &self,
        actor: Option<&Actor>,
        filter: &PostFilter,
    ) -> Result<Vec<Post>, DomainError> {
        let mut posts = self.list(filter).await?;
        posts.retain(|p| authorization::can_view(actor, p));
        Ok(posts)
    }

    async fn find(&self, id: Uuid) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))
    }
}

fn required_text(field: &str, value: &str) -> Result<String, DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation(format!("{field} is required")));
    }
    Ok(value.to_string())
}

fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn validate_changes(changes: &PostChanges) -> Result<(), DomainError> {
    if let Some(title) = &changes.title {
        required_text("title", title)?;
    }
    if let Some(content) = &changes.content {
        required_text("content", content)?;
    }
    Ok(())
}

fn apply_changes(post: &mut Post, changes: PostChanges) {
    if let Some(title) = changes.title {
        post.title = title;
    }
    if let Some(content) = changes.content {
        post.excerpt = compute_excerpt(&content);
        post.reading_time = compute_reading_time(&content);
        post.content = content;
    }
    if changes.featured_image.is_some() {
        post.featured_image = optional_text(changes.featured_image);
    }
    if let Some(tags) = changes.tags {
        post.tags = normalize_tags(&tags);
    }
    if let Some(category) = changes.category {
        post.category = category;
    }
    if let Some(status) = changes.status {
        post.status = status;
    }
}
