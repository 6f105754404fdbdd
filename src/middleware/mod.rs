// Request pipeline for the blog surface. Layers run in this order:
// 1. provision_store_middleware: attaches a StoreClient for the request
// 2. jwt_auth_middleware: verifies the bearer token and attaches AuthUser
// A stage that returns Err short-circuits with that error's response.
pub mod auth;
pub mod store;

pub use auth::{jwt_auth_middleware, AuthUser};
pub use store::provision_store_middleware;
