//! Portfolio Config API - library for app logic and testing.
//!
//! Serves the public site configuration document and the admin endpoints
//! that mutate it. Handlers are stateless: everything is reconstructed per
//! request from the injected config and media stores.

pub mod config;
pub mod error;
pub mod logging;
pub mod routes;
pub mod session;
pub mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, limit::RequestBodyLimitLayer,
    services::ServeDir, trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::session::{CookieSession, SessionValidator};
use crate::store::{fs::FsMediaStore, pg::PgConfigStore, ConfigStore, MediaStore};

/// Uploads carry video files; cap request bodies well above them.
const MAX_BODY_BYTES: usize = 100 * 1024 * 1024;

/// Per-request dependencies. A `None` store slot means the binding is not
/// configured and mutating handlers fail with a 500.
pub struct AppState {
    pub config: Option<Arc<dyn ConfigStore>>,
    pub media: Option<Arc<dyn MediaStore>>,
    pub sessions: Arc<dyn SessionValidator>,
    pub public_base: Option<String>,
    pub admin_username: String,
    pub admin_password: String,
}

/// Configure CORS from environment variables.
/// Uses ALLOWED_ORIGINS (comma-separated) or FRONTEND_ORIGIN, falling back
/// to localhost dev origins.
pub fn configure_cors() -> CorsLayer {
    let allowed_origins = std::env::var("ALLOWED_ORIGINS")
        .ok()
        .and_then(|s| {
            let origins: Vec<HeaderValue> = s
                .split(',')
                .filter_map(|origin| origin.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                None
            } else {
                Some(origins)
            }
        })
        .or_else(|| {
            std::env::var("FRONTEND_ORIGIN")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(|origin| vec![origin])
        })
        .unwrap_or_else(|| {
            vec![
                "http://localhost:3000".parse().unwrap(),
                "http://127.0.0.1:3000".parse().unwrap(),
            ]
        });

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([axum::http::header::CONTENT_TYPE])
        .allow_credentials(true)
}

/// Create and configure the application router.
pub fn create_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/config", get(routes::config::get_config))
        .route("/api/login", post(routes::auth::login))
        .route("/api/admin/me", get(routes::auth::me))
        .route("/api/admin/hero", put(routes::settings::update_hero))
        .route("/api/admin/contact", put(routes::settings::update_contact))
        .route("/api/admin/social", put(routes::settings::update_social))
        .route("/api/admin/seo", put(routes::settings::update_seo))
        .route(
            "/api/admin/tools",
            get(routes::tools::list_tools).post(routes::tools::create_tool),
        )
        .route(
            "/api/admin/upload/hero-image",
            post(routes::upload::upload_hero_image),
        )
        .route(
            "/api/admin/upload/branding",
            post(routes::upload::upload_branding),
        )
        .route(
            "/api/admin/upload/showreel",
            post(routes::upload::upload_showreel),
        )
        .route("/api/admin/upload/reel", post(routes::upload::upload_reel))
        .route("/api/admin/upload/photo", post(routes::upload::upload_photo))
        .route("/health", get(routes::health::health_ping))
        .route("/health/detailed", get(routes::health::health_detailed))
        .layer(logging::middleware::propagate_request_id_layer())
        .layer(middleware::from_fn(logging::middleware::log_request))
        .layer(logging::middleware::request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(configure_cors())
        .with_state(state)
}

/// Run the server (used by main).
pub async fn run() {
    dotenvy::dotenv().ok();

    // Guards must be held for the programme's lifetime; dropping them early
    // shuts down the background log writers.
    let _log_guards = logging::init();

    let cfg = AppConfig::from_env();

    // The fallback admin credentials exist for local use only. Keep them
    // (changing the default silently would lock existing deploys out), but
    // refuse to stay quiet about it in production.
    if cfg.environment == "production" && cfg.uses_default_credentials() {
        tracing::warn!(
            "SECURITY: ADMIN_PASSWORD is not set; the fallback 'admin'/'admin' \
             credentials are active. Set ADMIN_USERNAME and ADMIN_PASSWORD."
        );
    }

    let config_store: Option<Arc<dyn ConfigStore>> = match &cfg.database_url {
        Some(url) => match PgConfigStore::connect(url).await {
            Ok(store) => Some(Arc::new(store)),
            Err(err) => {
                tracing::warn!(%err, "config store unavailable; admin writes will fail");
                None
            }
        },
        None => {
            tracing::info!("DATABASE_URL not set; serving defaults, admin writes will fail");
            None
        }
    };

    let media_store: Option<Arc<dyn MediaStore>> = match std::fs::create_dir_all(&cfg.media_root)
    {
        Ok(()) => Some(Arc::new(FsMediaStore::new(&cfg.media_root))),
        Err(err) => {
            tracing::warn!(%err, root = %cfg.media_root, "media root unavailable; uploads will fail");
            None
        }
    };

    let state = Arc::new(AppState {
        config: config_store,
        media: media_store,
        sessions: Arc::new(CookieSession),
        public_base: cfg.public_base_url.clone(),
        admin_username: cfg.admin_username.clone(),
        admin_password: cfg.admin_password.clone(),
    });

    // Locally stored media is served under /media, which is also the path
    // marker used to recover blob keys from stored URLs.
    let app = create_app(state).nest_service("/media", ServeDir::new(&cfg.media_root));

    let addr: SocketAddr = format!("{}:{}", cfg.host, cfg.port)
        .parse()
        .expect("Invalid HOST/PORT configuration");
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app).await.expect("Server error");
}
