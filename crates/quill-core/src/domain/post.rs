use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Post entity - a short-form article owned by its author.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub category: Category,
    pub status: PostStatus,
    pub author_id: Uuid,
    pub author: AuthorSnapshot,
    pub reading_time: u32,
    /// Set once at creation, whatever the initial status.
    pub published_date: DateTime<Utc>,
}

impl Post {
    pub fn is_published(&self) -> bool {
        self.status == PostStatus::Published
    }
}

/// Display details of the author, frozen when the post is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorSnapshot {
    pub name: String,
    pub avatar: String,
}

/// Fixed set of post categories. Parsing, from the wire or a query string, ignores case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Category {
    Technology,
    Programming,
    Design,
    Business,
    Lifestyle,
    Other,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Technology,
        Category::Programming,
        Category::Design,
        Category::Business,
        Category::Lifestyle,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Technology => "Technology",
            Category::Programming => "Programming",
            Category::Design => "Design",
            Category::Business => "Business",
            Category::Lifestyle => "Lifestyle",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

/// Publication state. Either state may move to the other; there is no terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "draft" => Ok(PostStatus::Draft),
            "published" => Ok(PostStatus::Published),
            _ => Err(UnknownVariant(s.to_string())),
        }
    }
}

impl TryFrom<String> for PostStatus {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<String> for Category {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown value: {0}")]
pub struct UnknownVariant(pub String);

/// Caller-supplied fields for a new post.
///
/// `category` is optional here so that a missing value surfaces as a validation
/// failure rather than a decoding failure.
#[derive(Debug, Clone, Default)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub featured_image: Option<String>,
    pub tags: Vec<String>,
    pub category: Option<Category>,
    pub status: Option<PostStatus>,
}

/// Replacement values for the mutable fields of a post.
///
/// Every field that is present replaces the stored value wholesale (tags included);
/// absent fields keep their stored value. An empty `featured_image` clears it.
#[derive(Debug, Clone, Default)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub featured_image: Option<String>,
    pub tags: Option<Vec<String>>,
    pub category: Option<Category>,
    pub status: Option<PostStatus>,
}

/// Status-only change, the publish/unpublish toggle.
impl From<PostStatus> for PostChanges {
    fn from(status: PostStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

/// Listing filter shared by the server listing and the client cache.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub category: Option<Category>,
    /// Case-insensitive substring matched against title, content and tags.
    pub search: Option<String>,
}

impl PostFilter {
    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn matches(&self, post: &Post) -> bool {
        if let Some(category) = self.category {
            if post.category != category {
                return false;
            }
        }

        match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => {
                let needle = term.to_lowercase();
                post.title.to_lowercase().contains(&needle)
                    || post.content.to_lowercase().contains(&needle)
                    || post
                        .tags
                        .iter()
                        .any(|tag| tag.to_lowercase().contains(&needle))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Post {
        Post {
            id: Uuid::new_v4(),
            title: "Async Rust in Practice".to_string(),
            content: "Pinning and wakers explained".to_string(),
            excerpt: "Pinning and wakers explained...".to_string(),
            featured_image: None,
            tags: vec!["Tokio".to_string(), "futures".to_string()],
            category: Category::Programming,
            status: PostStatus::Draft,
            author_id: Uuid::new_v4(),
            author: AuthorSnapshot {
                name: "ferris".to_string(),
                avatar: "https://example.com/a.png".to_string(),
            },
            reading_time: 1,
            published_date: Utc::now(),
        }
    }

    #[test]
    fn test_filter_matches_search_case_insensitively() {
        let post = sample();
        assert!(PostFilter::default().search("ASYNC").matches(&post));
        assert!(PostFilter::default().search("wakers").matches(&post));
        assert!(PostFilter::default().search("tokio").matches(&post));
        assert!(!PostFilter::default().search("python").matches(&post));
    }

    #[test]
    fn test_filter_by_category() {
        let post = sample();
        assert!(PostFilter::default().category(Category::Programming).matches(&post));
        assert!(!PostFilter::default().category(Category::Design).matches(&post));
    }

    #[test]
    fn test_blank_search_matches_everything() {
        assert!(PostFilter::default().search("   ").matches(&sample()));
    }

    #[test]
    fn test_wire_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["status"], "draft");
        assert_eq!(json["category"], "Programming");
        assert!(json.get("authorId").is_some());
        assert!(json.get("readingTime").is_some());
        assert!(json.get("featuredImage").is_none());
    }

    #[test]
    fn test_wire_values_ignore_case() {
        let category: Category = serde_json::from_str(r#""design""#).unwrap();
        assert_eq!(category, Category::Design);
        let status: PostStatus = serde_json::from_str(r#""Published""#).unwrap();
        assert_eq!(status, PostStatus::Published);
        assert!(serde_json::from_str::<Category>(r#""Cooking""#).is_err());
    }

    #[test]
    fn test_parse_category_and_status() {
        assert_eq!("lifestyle".parse::<Category>().unwrap(), Category::Lifestyle);
        assert!("Cooking".parse::<Category>().is_err());
        assert_eq!("Published".parse::<PostStatus>().unwrap(), PostStatus::Published);
        assert!("archived".parse::<PostStatus>().is_err());
    }
}
