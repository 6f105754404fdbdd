// handlers/posts/update.rs - PUT /api/v1/blog handler

use axum::{extract::rejection::JsonRejection, Extension, Json};
use serde_json::{json, Value};

use super::parse_body;
use crate::database::{PostChanges, StoreClient, UpdateOutcome};
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::validation::UpdatePostInput;

/// PUT / - Update title and content of a post the caller owns.
///
/// Absent ids answer 404; posts owned by someone else answer 403 and are left untouched.
pub async fn update_post(
    Extension(store): Extension<StoreClient>,
    Extension(user): Extension<AuthUser>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let input: UpdatePostInput = parse_body(body)?;

    let changes = PostChanges {
        title: input.title,
        content: input.content,
    };

    match store.posts().update_owned(&input.id, &user.id, changes).await? {
        UpdateOutcome::Updated(post) => {
            tracing::info!("Updated post {} for author {}", post.id, post.author_id);
            Ok(Json(json!({
                "success": true,
                "message": "Post updated successfully",
                "post": post
            })))
        }
        UpdateOutcome::NotFound => {
            tracing::debug!("Update of unknown post {} by {}", input.id, user.id);
            Err(ApiError::not_found("Post not found"))
        }
        UpdateOutcome::NotOwned => {
            tracing::warn!("User {} attempted to update post {} owned by another author", user.id, input.id);
            Err(ApiError::forbidden("Post is owned by another author"))
        }
    }
}
