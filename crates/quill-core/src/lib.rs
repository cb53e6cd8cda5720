//! # Quill Core
//!
//! The domain layer of Quill: posts, the acting identity, the authorization gate and
//! the post lifecycle rules. No infrastructure dependencies live here; storage and
//! identity are reached through the traits in [`ports`].

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::{DomainError, RepoError};
pub use services::PostLifecycleManager;
