//! # Quill Shared
//!
//! Request/response types spoken over HTTP by the API server and the client crate.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorResponse};
