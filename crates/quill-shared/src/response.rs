//! Response envelopes: a success wrapper for endpoints without an entity to return, and
//! RFC 7807 problem documents for failures.

use serde::{Deserialize, Serialize};

/// Success envelope, e.g. the acknowledgement of a delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.into()),
        }
    }
}

/// Problem document (https://datatracker.ietf.org/doc/html/rfc7807).
///
/// Clients read [`status`](Self::status) to classify the failure and
/// [`message`](Self::message) to show it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(rename = "type", default = "blank_type")]
    pub error_type: String,
    pub title: String,
    pub status: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

fn blank_type() -> String {
    "about:blank".to_string()
}

impl ErrorResponse {
    pub fn new(status: u16, title: impl Into<String>) -> Self {
        Self {
            error_type: blank_type(),
            title: title.into(),
            status,
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Detail if present, otherwise the title.
    pub fn message(&self) -> &str {
        self.detail.as_deref().unwrap_or(&self.title)
    }

    /// A required field is missing or a value cannot be decoded.
    pub fn validation(detail: impl Into<String>) -> Self {
        Self::new(400, "Validation Failed").with_detail(detail)
    }

    pub fn authentication_required() -> Self {
        Self::new(401, "Authentication Required")
            .with_detail("Provide a valid Bearer token in the Authorization header.")
    }

    /// Authenticated, but neither the author nor an admin.
    pub fn not_permitted() -> Self {
        Self::new(403, "Not Permitted")
            .with_detail("Only the author or an admin may change this post.")
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(404, "Not Found").with_detail(detail)
    }

    /// Store and other server-side failures; the cause is only logged.
    pub fn internal_error() -> Self {
        Self::new(500, "Internal Server Error")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_problem_wire_shape() {
        let json = serde_json::to_value(ErrorResponse::internal_error()).unwrap();
        assert_eq!(json["type"], "about:blank");
        assert_eq!(json["status"], 500);
        assert!(json.get("detail").is_none());
    }

    #[test]
    fn test_message_prefers_detail() {
        assert_eq!(ErrorResponse::internal_error().message(), "Internal Server Error");
        assert_eq!(ErrorResponse::validation("title is required").message(), "title is required");
    }

    #[test]
    fn test_type_defaults_when_absent() {
        let problem: ErrorResponse =
            serde_json::from_str(r#"{"title":"Forbidden","status":403}"#).unwrap();
        assert_eq!(problem.error_type, "about:blank");
        assert_eq!(problem.message(), "Forbidden");
    }
}
