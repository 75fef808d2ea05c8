/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use hearth_api::{app::AppState, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config);
/// let app = hearth_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, middleware::security::SecurityHeadersLayer, uploads::ImageIntake};
use axum::{
    extract::{DefaultBodyLimit, Request, State},
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::get,
    Router,
};
use hearth_shared::auth::middleware::identity_from_headers;
use hearth_shared::models::property::MAX_IMAGES;
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,

    /// Image intake rooted at the configured upload directory
    pub intake: Arc<ImageIntake>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        let intake = Arc::new(ImageIntake::new(config.uploads.dir.clone()));
        Self {
            db,
            config: Arc::new(config),
            intake,
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /api/health               # Health check (public)
/// ├── /api/properties           # Listing CRUD
/// │   ├── GET    /              # List (optional ?userId= filter)
/// │   ├── POST   /              # Create (multipart)
/// │   ├── GET    /:id           # Get one
/// │   ├── PUT    /:id           # Update (multipart)
/// │   └── DELETE /:id           # Delete
/// └── /uploads/*                # Stored images (static files)
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
/// 3. Security headers
/// 4. Identity injection on the listing routes (when a secret is configured)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Health check (public, no identity)
    let health_routes = Router::new().route("/api/health", get(routes::health::health_check));

    // Listing CRUD; the identity layer validates bearer tokens when offered
    let properties_routes = Router::new()
        .route(
            "/",
            get(routes::properties::list_properties).post(routes::properties::create_property),
        )
        .route(
            "/:id",
            get(routes::properties::get_property)
                .put(routes::properties::update_property)
                .delete(routes::properties::delete_property),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            identity_layer,
        ));

    // Configure CORS based on environment
    let cors = if state.config.api.cors_origins.contains(&"*".to_string()) {
        // Development mode: permissive CORS
        CorsLayer::permissive()
    } else {
        // Production mode: configure allowed origins
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    // Room for a full image batch plus the text fields
    let body_limit = state.config.uploads.max_file_bytes * (MAX_IMAGES + 1);

    // Combine all routes with middleware stack
    Router::new()
        .merge(health_routes)
        .nest("/api/properties", properties_routes)
        .nest_service("/uploads", ServeDir::new(&state.config.uploads.dir))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .layer(SecurityHeadersLayer::new(state.config.api.production))
        .with_state(state)
}

/// Identity injection middleware
///
/// When a signing secret is configured and the request carries an
/// Authorization header, the bearer token is validated and the verified
/// [`hearth_shared::auth::middleware::Identity`] is inserted into request
/// extensions, where handlers treat it as authoritative over client-supplied
/// owner fields. An invalid offered token fails the request; a request
/// without credentials passes through, since token enforcement is the
/// deployment's concern, not this service's.
async fn identity_layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, crate::error::ApiError> {
    if let Some(secret) = state.config.jwt_secret.as_deref() {
        if req.headers().contains_key(header::AUTHORIZATION) {
            let identity = identity_from_headers(req.headers(), secret)?;
            req.extensions_mut().insert(identity);
        }
    }

    Ok(next.run(req).await)
}
