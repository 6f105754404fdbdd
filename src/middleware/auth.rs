use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::app::AppState;
use crate::auth::{extract_bearer_token, verify_jwt, Claims};
use crate::error::ApiError;

/// Authenticated caller extracted from the token's `id` claim
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub id: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self { id: claims.id }
    }
}

/// JWT authentication middleware that validates tokens and extracts user context.
///
/// Every failure (missing header, no second segment, bad signature, missing claim)
/// maps to the same 401 response.
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| {
            tracing::debug!("Rejected request without Authorization header");
            ApiError::unauthorized()
        })?
        .to_str()
        .map_err(|_| {
            tracing::debug!("Rejected non-ASCII Authorization header");
            ApiError::unauthorized()
        })?;

    // A header with no second segment verifies as an empty token, which fails
    let token = extract_bearer_token(header).unwrap_or_default();

    let claims = verify_jwt(token, &state.config.security.jwt_secret).map_err(|e| {
        tracing::debug!("Rejected bearer token: {}", e);
        ApiError::unauthorized()
    })?;

    let auth_user = AuthUser::from(claims);
    tracing::debug!("Authenticated request for user {}", auth_user.id);
    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}
