// handlers/posts/mod.rs - Post handlers (JWT authentication required)
//
// Mounted under /api/v1/blog behind the store provisioning and JWT middleware.
// Each handler reads its StoreClient and AuthUser from request extensions.

pub mod create;
pub mod fetch_all;
pub mod fetch_one;
pub mod update;

pub use create::create_post;
pub use fetch_all::fetch_all_posts;
pub use fetch_one::fetch_post;
pub use update::update_post;

use axum::{extract::rejection::JsonRejection, Json};
use serde_json::Value;

use crate::error::ApiError;
use crate::validation::{SafeParse, ValidationResult};

pub(crate) const INPUT_NOT_VALID: &str = "Input not valid";

/// Decode the JSON body and run it through the schema
pub(crate) fn parse_body<T: SafeParse>(
    body: Result<Json<Value>, JsonRejection>,
) -> Result<T, ApiError> {
    let Json(body) = body.map_err(|e| {
        tracing::debug!("Unreadable request body: {}", e);
        ApiError::invalid_json(INPUT_NOT_VALID)
    })?;

    match T::safe_parse(&body) {
        ValidationResult::Accepted(input) => Ok(input),
        ValidationResult::Rejected(field_errors) => {
            tracing::debug!("Request body rejected: {:?}", field_errors);
            Err(ApiError::validation_error(INPUT_NOT_VALID, Some(field_errors)))
        }
    }
}
