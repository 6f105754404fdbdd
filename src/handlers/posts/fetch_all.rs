// handlers/posts/fetch_all.rs - GET /api/v1/blog/bulk handler

use axum::{Extension, Json};
use serde_json::{json, Value};

use crate::database::StoreClient;
use crate::error::ApiError;

/// GET /bulk - Every post, oldest first, unpaginated
pub async fn fetch_all_posts(
    Extension(store): Extension<StoreClient>,
) -> Result<Json<Value>, ApiError> {
    let books = store.posts().find_many().await?;

    tracing::debug!("Listing {} posts", books.len());

    Ok(Json(json!({
        "success": true,
        "books": books
    })))
}
