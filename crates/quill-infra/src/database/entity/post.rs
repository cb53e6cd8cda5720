//! Post entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use quill_core::domain::{AuthorSnapshot, Category, Post, PostStatus};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    #[sea_orm(column_type = "Text")]
    pub excerpt: String,
    pub featured_image: Option<String>,
    /// JSON array of strings, in display order.
    #[sea_orm(column_type = "JsonBinary")]
    pub tags: Json,
    pub category: String,
    pub status: String,
    pub author_id: Uuid,
    pub author_name: String,
    pub author_avatar: String,
    pub reading_time: i32,
    pub published_date: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Post.
///
/// Rows written outside this crate may carry values the domain does not know; those
/// fall back to `Other`/`draft` rather than failing the whole listing.
impl From<Model> for Post {
    fn from(model: Model) -> Self {
        let category = model.category.parse().unwrap_or_else(|_| {
            tracing::warn!(post_id = %model.id, category = %model.category, "Unknown category in store");
            Category::Other
        });
        let status = model.status.parse().unwrap_or_else(|_| {
            tracing::warn!(post_id = %model.id, status = %model.status, "Unknown status in store");
            PostStatus::Draft
        });
        let tags = serde_json::from_value(model.tags).unwrap_or_default();

        Self {
            id: model.id,
            title: model.title,
            content: model.content,
            excerpt: model.excerpt,
            featured_image: model.featured_image,
            tags,
            category,
            status,
            author_id: model.author_id,
            author: AuthorSnapshot {
                name: model.author_name,
                avatar: model.author_avatar,
            },
            reading_time: u32::try_from(model.reading_time).unwrap_or(1),
            published_date: model.published_date.into(),
        }
    }
}

/// Conversion from Domain Post to SeaORM ActiveModel.
impl From<Post> for ActiveModel {
    fn from(post: Post) -> Self {
        Self {
            id: Set(post.id),
            title: Set(post.title),
            content: Set(post.content),
            excerpt: Set(post.excerpt),
            featured_image: Set(post.featured_image),
            tags: Set(Json::from(post.tags)),
            category: Set(post.category.to_string()),
            status: Set(post.status.to_string()),
            author_id: Set(post.author_id),
            author_name: Set(post.author.name),
            author_avatar: Set(post.author.avatar),
            reading_time: Set(i32::try_from(post.reading_time).unwrap_or(i32::MAX)),
            published_date: Set(post.published_date.into()),
        }
    }
}
