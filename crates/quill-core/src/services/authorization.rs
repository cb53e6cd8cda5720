//! Authorization gate - the single place that decides who may touch a post.
//!
//! Decisions are pure functions of the acting identity and the post. They are
//! evaluated on every attempt; identities and admin flags may change between calls.

use std::fmt;

use crate::domain::{Actor, Post};
use crate::error::DomainError;

/// Kinds of post mutation the gate rules on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostAction {
    Edit,
    Delete,
    /// Changing the publication status; same rule as [`PostAction::Edit`].
    Publish,
}

impl fmt::Display for PostAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PostAction::Edit => "edit",
            PostAction::Delete => "delete",
            PostAction::Publish => "publish",
        };
        f.write_str(name)
    }
}

/// Any authenticated identity may create a post.
pub fn can_create(actor: Option<&Actor>) -> bool {
    actor.is_some()
}

/// Owners and admins may edit, publish or delete a post.
pub fn can_mutate(actor: Option<&Actor>, post: &Post) -> bool {
    actor.is_some_and(|a| a.is_admin || a.id == post.author_id)
}

/// Published posts are public; drafts are visible to their owner and admins only.
pub fn can_view(actor: Option<&Actor>, post: &Post) -> bool {
    post.is_published() || can_mutate(actor, post)
}

/// Require an authenticated identity.
pub fn authenticated(actor: Option<&Actor>) -> Result<&Actor, DomainError> {
    actor.ok_or(DomainError::Unauthorized)
}

/// Rule on creating a post, mapping a refusal to an error.
pub fn authorize_create(actor: Option<&Actor>) -> Result<&Actor, DomainError> {
    match actor {
        Some(actor) if can_create(Some(actor)) => Ok(actor),
        _ => Err(DomainError::Unauthorized),
    }
}

/// Rule on `action` against an existing post, mapping a refusal to an error.
pub fn authorize<'a>(
    actor: Option<&'a Actor>,
    action: PostAction,
    post: &Post,
) -> Result<&'a Actor, DomainError> {
    let actor = authenticated(actor)?;
    // Publish follows the edit rule.
    if can_mutate(Some(actor), post) {
        Ok(actor)
    } else {
        tracing::warn!(
            actor_id = %actor.id,
            post_id = %post.id,
            %action,
            "Post mutation refused"
        );
        Err(DomainError::Forbidden)
    }
}
