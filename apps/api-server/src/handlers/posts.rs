//! Post handlers. Every mutation passes the caller's identity, possibly absent, to the
//! lifecycle manager, which consults the authorization gate before touching the store.
//!
//! Mutation bodies arrive as raw bytes and are decoded only once the caller is known to
//! be authenticated, so an anonymous request is answered 401 whatever its body holds.

use actix_web::{HttpResponse, web};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use quill_core::services::authorization;
use quill_shared::ApiResponse;
use quill_shared::dto::{CreatePostRequest, ListPostsQuery, UpdatePostRequest};

use crate::middleware::auth::OptionalIdentity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/posts?category=&search=
///
/// Drafts are included only for their owner and admins.
pub async fn list_posts(
    identity: OptionalIdentity,
    state: web::Data<AppState>,
    query: web::Query<ListPostsQuery>,
) -> AppResult<HttpResponse> {
    let filter = query.into_inner().into_filter().map_err(AppError::BadRequest)?;
    let posts = state.posts.list_visible(identity.actor(), &filter).await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// GET /api/posts/{id}
pub async fn get_post(
    identity: OptionalIdentity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .get_visible(path.into_inner(), identity.actor())
        .await?;
    Ok(HttpResponse::Ok().json(post))
}

/// POST /api/posts
pub async fn create_post(
    identity: OptionalIdentity,
    state: web::Data<AppState>,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    authorization::authorize_create(identity.actor())?;
    let input: CreatePostRequest = decode_body(&body)?;
    let post = state.posts.create(input.into(), identity.actor()).await?;
    Ok(HttpResponse::Created().json(post))
}

/// PUT /api/posts/{id}
pub async fn update_post(
    identity: OptionalIdentity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    authorization::authenticated(identity.actor())?;
    let input: UpdatePostRequest = decode_body(&body)?;
    let post = state
        .posts
        .update(path.into_inner(), input.into(), identity.actor())
        .await?;
    Ok(HttpResponse::Ok().json(post))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    identity: OptionalIdentity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    state.posts.delete(id, identity.actor()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(id, "Post deleted")))
}

fn decode_body<T: DeserializeOwned>(body: &[u8]) -> AppResult<T> {
    serde_json::from_slice(body).map_err(|e| AppError::BadRequest(e.to_string()))
}
