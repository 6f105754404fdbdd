// handlers/posts/create.rs - POST /api/v1/blog handler

use axum::{extract::rejection::JsonRejection, http::StatusCode, Extension, Json};
use serde_json::{json, Value};

use super::parse_body;
use crate::database::{NewPost, StoreClient};
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::validation::CreatePostInput;

/// POST / - Create a post owned by the caller.
///
/// `authorId` always comes from the verified token; anything the client sends
/// under that name is dropped by the schema.
pub async fn create_post(
    Extension(store): Extension<StoreClient>,
    Extension(user): Extension<AuthUser>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let input: CreatePostInput = parse_body(body)?;

    let post = store
        .posts()
        .create(NewPost {
            title: input.title,
            content: input.content,
            author_id: user.id,
        })
        .await?;

    tracing::info!("Created post {} for author {}", post.id, post.author_id);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "post created successfully",
            "post": post
        })),
    ))
}
