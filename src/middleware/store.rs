use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::app::AppState;
use crate::error::ApiError;

/// Provisions a store client from the configured datasource locator and injects it
/// into the request. Construction failures are not retried.
pub async fn provision_store_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let client = state
        .provider
        .provision(&state.config.database.url)
        .await
        .map_err(ApiError::from)?;

    tracing::trace!("Store client provisioned for {} {}", request.method(), request.uri().path());

    request.extensions_mut().insert(client);

    Ok(next.run(request).await)
}
