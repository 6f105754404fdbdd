// handlers/posts/fetch_one.rs - GET /api/v1/blog/blog/:id handler

use axum::{extract::Path, Extension, Json};
use serde_json::{json, Value};

use crate::database::StoreClient;
use crate::error::ApiError;

/// GET /blog/:id - Any authenticated caller may read any post. A missing id is
/// not an error: `post` is null.
pub async fn fetch_post(
    Extension(store): Extension<StoreClient>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let post = store.posts().find_first(&id).await?;

    Ok(Json(json!({
        "success": true,
        "post": post
    })))
}
