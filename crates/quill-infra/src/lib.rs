//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`: the post document
//! stores and the JWT identity provider.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external services, in-memory store only
//! - `postgres` - PostgreSQL post store via SeaORM
//! - `auth` - JWT bearer tokens

pub mod database;

#[cfg(feature = "auth")]
pub mod auth;

pub use database::InMemoryPostRepository;

#[cfg(feature = "postgres")]
pub use database::{DatabaseConfig, PostgresPostRepository};

#[cfg(feature = "auth")]
pub use auth::{JwtConfig, JwtTokenService};
