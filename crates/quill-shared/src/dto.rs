//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

use quill_core::domain::{Category, NewPost, PostChanges, PostFilter, PostStatus};

/// Category value the listing UI sends for "no category filter".
pub const ALL_CATEGORIES: &str = "All";

/// Body of `POST /api/posts`.
///
/// Ownership fields (`id`, `authorId`, `author`) are not part of the request; any sent
/// by a client are ignored during decoding.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PostStatus>,
}

impl From<CreatePostRequest> for NewPost {
    fn from(req: CreatePostRequest) -> Self {
        Self {
            title: req.title,
            content: req.content,
            featured_image: req.featured_image,
            tags: req.tags,
            category: req.category,
            status: req.status,
        }
    }
}

/// Body of `PUT /api/posts/{id}`. Present fields replace stored values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PostStatus>,
}

impl From<UpdatePostRequest> for PostChanges {
    fn from(req: UpdatePostRequest) -> Self {
        Self {
            title: req.title,
            content: req.content,
            featured_image: req.featured_image,
            tags: req.tags,
            category: req.category,
            status: req.status,
        }
    }
}

/// Query string of `GET /api/posts`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListPostsQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl ListPostsQuery {
    /// Resolve into a domain filter. `"All"` or an empty category means no category filter.
    pub fn into_filter(self) -> Result<PostFilter, String> {
        let category = match self.category.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(c) if c.eq_ignore_ascii_case(ALL_CATEGORIES) => None,
            Some(c) => Some(c.parse::<Category>().map_err(|e| e.to_string())?),
        };

        Ok(PostFilter {
            category,
            search: self.search.filter(|s| !s.trim().is_empty()),
        })
    }
}
