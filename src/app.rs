// app.rs - Router construction
//
// Configuration and the store provider are injected here once at startup;
// handlers never read the environment.

use axum::{
    extract::DefaultBodyLimit,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{AppConfig, Environment};
use crate::database::StoreProvider;
use crate::handlers::{health, posts};
use crate::middleware::{jwt_auth_middleware, provision_store_middleware};

/// Mount path of the blog router
pub const BLOG_MOUNT_PATH: &str = "/api/v1/blog";

/// Process-wide, read-only state shared by the middleware stages
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub provider: Arc<dyn StoreProvider>,
}

impl AppState {
    pub fn new(config: AppConfig, provider: Arc<dyn StoreProvider>) -> Self {
        Self {
            config: Arc::new(config),
            provider,
        }
    }
}

pub fn app(state: AppState) -> Router {
    let config = state.config.clone();

    let router = Router::new()
        // Public
        .route("/health", get(health::health))
        // Protected
        .nest(BLOG_MOUNT_PATH, blog_routes(state))
        // Global middleware
        .layer(
            ServiceBuilder::new()
                .layer(cors_layer(&config))
                .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes)),
        );

    if config.api.enable_request_logging {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

fn blog_routes(state: AppState) -> Router {
    Router::new()
        .route("/", post(posts::create_post).put(posts::update_post))
        .route("/blog/:id", get(posts::fetch_post))
        .route("/bulk", get(posts::fetch_all_posts))
        // Layers run outermost-first: the store is provisioned before auth
        .layer(middleware::from_fn_with_state(state.clone(), jwt_auth_middleware))
        .layer(middleware::from_fn_with_state(state, provision_store_middleware))
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    if config.environment == Environment::Development {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
}
