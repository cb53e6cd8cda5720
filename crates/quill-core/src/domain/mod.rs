//! Domain entities - the core business objects.

mod actor;

mod post;

pub use actor::{ANONYMOUS_AUTHOR, Actor, DEFAULT_AVATAR};
pub use post::{
    AuthorSnapshot, Category, NewPost, Post, PostChanges, PostFilter, PostStatus, UnknownVariant,
};
