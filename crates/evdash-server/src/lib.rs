//! evdash Web Server
//!
//! Axum-based REST API for the evdash dashboard. The server is a thin
//! boundary around the insight proxy: exactly one endpoint accepts the
//! insight wire contract, plus a liveness endpoint with no side effects.
//! Aggregation itself happens wherever the records live (the CLI, or the
//! browser-side dashboard this server can host as static files); the
//! server's job is relaying assembled aggregates to the generation service
//! and mapping its failures to typed, non-fatal responses.

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::{error, info, warn};

use evdash_core::{InsightBackend, InsightClient, InsightTracker};

mod handlers;

/// Server configuration
#[derive(Clone, Default)]
pub struct ServerConfig {
    /// Allowed CORS origins; empty allows any origin (the dashboard is a
    /// public read-only surface)
    pub allowed_origins: Vec<String>,
}

/// Shared application state
pub struct AppState {
    /// Generation backend for insight requests
    pub ai: InsightClient,
    /// Identity tracker so superseded insight responses never overwrite
    /// newer ones
    pub tracker: InsightTracker,
}

/// Create the application router
pub fn create_router(
    ai: InsightClient,
    static_dir: Option<&str>,
    config: ServerConfig,
) -> Router {
    let state = Arc::new(AppState {
        ai,
        tracker: InsightTracker::new(),
    });

    let api_routes = Router::new()
        .route("/generate-insights", post(handlers::generate_insights))
        .route("/health", get(handlers::health));

    // Build CORS layer
    let cors = if config.allowed_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(tower_http::cors::Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    };

    let mut app = Router::new()
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Serve the dashboard frontend if a build directory is provided
    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app
}

/// Start the server
pub async fn serve(
    host: &str,
    port: u16,
    static_dir: Option<&str>,
    config: ServerConfig,
) -> anyhow::Result<()> {
    let ai = InsightClient::from_env();
    check_ai_connection(&ai).await;

    let app = create_router(ai, static_dir, config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Check and log generation backend connection status
async fn check_ai_connection(ai: &InsightClient) {
    if ai.health_check().await {
        info!(
            "✅ Generation backend connected: {} (model: {})",
            ai.host(),
            ai.model()
        );
    } else {
        warn!(
            "⚠️  Generation backend not responding: {} (model: {}) - insight requests will fail until it is reachable",
            ai.host(),
            ai.model()
        );
    }
}

// ============================================================================
// Error Handling
// ============================================================================

/// Insight endpoint error carrying the user-facing fallback text
///
/// The wire contract promises `{ insight, error }` on failure so the
/// dashboard always has something to display; the precise cause goes to the
/// `error` field and the log.
pub struct InsightError(evdash_core::Error);

impl InsightError {
    fn status(&self) -> StatusCode {
        match self.0 {
            evdash_core::Error::InvalidInput(_) | evdash_core::Error::InvalidPayload(_) => {
                StatusCode::BAD_REQUEST
            }
            evdash_core::Error::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            evdash_core::Error::ServiceError(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for InsightError {
    fn into_response(self) -> Response {
        error!(error = %self.0, "Insight request failed");

        let body = Json(serde_json::json!({
            "insight": self.0.fallback_message(),
            "error": self.0.to_string(),
        }));

        (self.status(), body).into_response()
    }
}

impl From<evdash_core::Error> for InsightError {
    fn from(err: evdash_core::Error) -> Self {
        Self(err)
    }
}
