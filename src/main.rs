//! EPIC Site Gateway
//!
//! Serves the public pages and the admin portal of the EPIC research site in
//! front of the content backend.

mod api;
mod auth;
mod backend;
mod config;
mod errors;
mod forms;
mod imaging;
mod maps;
mod models;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use auth::SessionIssuer;
use backend::BackendClient;
use config::Config;
use forms::ImageSettings;

/// Largest admin form accepted, photos included.
const MAX_UPLOAD_BYTES: usize = 64 * 1024 * 1024;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<BackendClient>,
    pub sessions: Arc<SessionIssuer>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, errors::AppError> {
        let backend = BackendClient::new(&config.backend_url, config.backend_timeout)?;
        let sessions = SessionIssuer::new(config.session_secret.as_deref(), config.session_ttl);

        Ok(Self {
            backend: Arc::new(backend),
            sessions: Arc::new(sessions),
            config: Arc::new(config),
        })
    }

    /// Compression settings for images in admin forms.
    pub fn image_settings(&self) -> ImageSettings {
        ImageSettings {
            default_quality: self.config.default_image_quality,
            policy: self.config.resize_policy,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting EPIC Site Gateway");
    tracing::info!("Backend URL: {}", config.backend_url);
    tracing::info!("Bind address: {}", config.bind_addr);
    tracing::info!(
        "Default image quality: {}, max dimension: {:?}",
        config.default_image_quality.get(),
        config.resize_policy.max_dimension
    );

    let bind_addr = config.bind_addr;
    let state = AppState::new(config)?;

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!("Server listening on {}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Public pages
    let page_routes = Router::new()
        .route("/pages/home", get(api::home_page))
        .route("/case-studies", get(api::list_case_studies))
        .route("/case-studies/{id}", get(api::get_case_study))
        .route("/events", get(api::list_events))
        .route("/events/{id}", get(api::get_event))
        .route("/resources", get(api::list_resources))
        .route("/resources/{id}", get(api::get_resource))
        .route("/gallery", get(api::list_albums))
        .route("/gallery/{id}", get(api::get_album))
        .route("/team", get(api::team_page))
        .route("/team/{id}", get(api::get_partner))
        // Maps
        .route("/maps/{widget}", get(api::get_map))
        .route("/maps/{widget}/markers/{marker}", get(api::click_marker));

    // Admin portal; handlers require an AdminSession
    let admin_routes = Router::new()
        // Session
        .route("/session", get(api::session_view))
        .route("/login", post(api::login))
        .route("/logout", post(api::logout))
        // Case studies
        .route(
            "/case-studies",
            get(api::admin_list_case_studies).post(api::create_case_study),
        )
        .route(
            "/case-studies/{id}",
            put(api::update_case_study).delete(api::delete_case_study),
        )
        // Events
        .route("/events", get(api::admin_list_events).post(api::create_event))
        .route("/events/{id}", put(api::update_event).delete(api::delete_event))
        // Resources
        .route(
            "/resources",
            get(api::admin_list_resources).post(api::create_resource),
        )
        .route(
            "/resources/{id}",
            put(api::update_resource).delete(api::delete_resource),
        )
        // Gallery
        .route("/gallery", get(api::admin_list_albums).post(api::create_album))
        .route("/gallery/{id}", put(api::update_album).delete(api::delete_album))
        // Team
        .route("/partners", get(api::admin_list_partners))
        .route("/partners/{id}", put(api::update_partner))
        .route("/partners/{id}/members", post(api::add_member))
        .route(
            "/partners/{id}/members/{member}",
            put(api::update_member).delete(api::delete_member),
        )
        // Images
        .route("/images/compress", post(api::compress_preview))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES));

    // Health check
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", page_routes.nest("/admin", admin_routes))
        .merge(health_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
