use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::post::AuthorSnapshot;

/// Avatar used when the identity provider supplies none.
pub const DEFAULT_AVATAR: &str = "https://avatar.iran.liara.run/public";

/// Author name used when the identity carries a blank username.
pub const ANONYMOUS_AUTHOR: &str = "Anonymous";

/// The authenticated identity acting on a request, as vouched for by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    pub id: Uuid,
    pub username: String,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl Actor {
    pub fn new(id: Uuid, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            is_admin: false,
            avatar: None,
        }
    }

    /// Grant the admin override.
    pub fn admin(mut self) -> Self {
        self.is_admin = true;
        self
    }

    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    /// Snapshot of the display details stored on posts this actor creates.
    pub fn author_snapshot(&self) -> AuthorSnapshot {
        let name = match self.username.trim() {
            "" => ANONYMOUS_AUTHOR.to_string(),
            name => name.to_string(),
        };
        let avatar = self
            .avatar
            .as_deref()
            .filter(|a| !a.trim().is_empty())
            .unwrap_or(DEFAULT_AVATAR)
            .to_string();

        AuthorSnapshot { name, avatar }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_falls_back_to_defaults() {
        let snapshot = Actor::new(Uuid::new_v4(), "  ").author_snapshot();
        assert_eq!(snapshot.name, ANONYMOUS_AUTHOR);
        assert_eq!(snapshot.avatar, DEFAULT_AVATAR);
    }

    #[test]
    fn test_snapshot_uses_identity_details() {
        let snapshot = Actor::new(Uuid::new_v4(), "ada")
            .with_avatar("https://cdn.example.com/ada.png")
            .author_snapshot();
        assert_eq!(snapshot.name, "ada");
        assert_eq!(snapshot.avatar, "https://cdn.example.com/ada.png");
    }
}
