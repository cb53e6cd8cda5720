//! # Quill Client
//!
//! The client half of post reconciliation: a [`ClientPostCache`] holding the locally
//! known posts and a [`PostsClient`] that performs each round trip against the API and
//! applies the confirmed result to the cache.
//!
//! Nothing is applied optimistically. A failed round trip leaves the cache exactly as
//! it was; a successful `fetch_all` replaces it wholesale.

mod cache;
mod client;
mod config;
mod error;

pub use cache::ClientPostCache;
pub use client::PostsClient;
pub use config::ClientConfig;
pub use error::ClientError;
