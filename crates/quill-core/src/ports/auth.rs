//! Identity provider port.

use uuid::Uuid;

use crate::domain::Actor;

/// Claims carried by a bearer token.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    pub user_id: Uuid,
    pub username: String,
    pub is_admin: bool,
    pub avatar: Option<String>,
}

impl From<TokenClaims> for Actor {
    fn from(claims: TokenClaims) -> Self {
        Self {
            id: claims.user_id,
            username: claims.username,
            is_admin: claims.is_admin,
            avatar: claims.avatar,
        }
    }
}

/// Token service trait. Validation is what the post core consumes; issuance exists so
/// the identity provider and tests can mint tokens for an [`Actor`].
pub trait TokenService: Send + Sync {
    /// Generate an access token for an identity.
    fn generate_token(&self, actor: &Actor) -> Result<String, AuthError>;

    /// Validate and decode a token.
    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Missing authorization header")]
    MissingAuth,

    #[error("Token encoding failed: {0}")]
    Encoding(String),
}
