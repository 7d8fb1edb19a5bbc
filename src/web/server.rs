//! Portal HTTP Server
//!
//! Axum router with embedded templates and static files, plus graceful shutdown.

use axum::{
    body::Body,
    extract::Path,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::sync::Arc;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::web::config::ServerConfig;
use crate::web::render::StaticAssets;
use crate::web::state::AppState;
use crate::web::{handlers, health};

/// Build the portal router
///
/// Routes:
/// - GET / - landing page
/// - GET /authenticate/ - authenticate and show the token
/// - GET /devices/ - device table
/// - GET, POST /interfaces/ - lookup form and interface table
/// - GET /logs/ - recent audit events
/// - GET /api/health - health check
/// - GET /static/{path} - embedded assets
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/authenticate/", get(handlers::authenticate))
        .route("/devices/", get(handlers::list_devices))
        .route(
            "/interfaces/",
            get(handlers::interfaces_form).post(handlers::device_interfaces),
        )
        .route("/logs/", get(handlers::view_logs))
        .route("/api/health", get(health::health_check))
        .route("/static/{*path}", get(static_handler))
        .with_state(state)
}

/// Portal server
pub struct PortalServer {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl PortalServer {
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self {
            config,
            state: Arc::new(state),
        }
    }

    fn build_router(&self) -> Router {
        let router = router(self.state.clone());

        if self.config.log_requests {
            router.layer(TraceLayer::new_for_http())
        } else {
            router
        }
    }

    /// Start the server and run until shutdown signal
    pub async fn run(self) -> anyhow::Result<()> {
        let addr = self.config.socket_addr();
        let router = self.build_router();

        info!("Starting portal on {}", addr);

        if !self.config.is_localhost() {
            warn!("Portal bound to {} - it has no login of its own", addr);
        }

        if !self.state.audit.is_available() {
            warn!("Audit store unavailable - operations will not be recorded");
        }

        info!("Portal available at {}", self.config.base_url());

        let listener = tokio::net::TcpListener::bind(addr).await?;

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Portal shut down gracefully");
        Ok(())
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

/// Serve static files from embedded assets
async fn static_handler(Path(path): Path<String>) -> Response {
    let path = path.trim_start_matches('/');

    if path.contains("..") {
        return StatusCode::BAD_REQUEST.into_response();
    }

    match StaticAssets::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream().to_string();

            (
                [
                    (header::CONTENT_TYPE, mime),
                    (header::CACHE_CONTROL, "public, max-age=3600".to_string()),
                ],
                Body::from(content.data.into_owned()),
            )
                .into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::AuditLog;
    use crate::config::ControllerConfig;
    use axum::body::to_bytes;
    use axum::http::Request;
    use tower::ServiceExt;

    fn test_app() -> Router {
        let controller = Arc::new(ControllerConfig::new("127.0.0.1", 9, "u", "p"));
        let state = AppState::from_config(controller, AuditLog::disabled()).unwrap();
        PortalServer::new(ServerConfig::default(), state).build_router()
    }

    async fn send_get(app: Router, uri: &str) -> Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_index_returns_html() {
        let response = send_get(test_app(), "/").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8_lossy(&body);
        assert!(html.contains("<!DOCTYPE html>"));
        assert!(html.contains("DNA Center Portal"));
    }

    #[tokio::test]
    async fn test_health_reports_disabled_sink() {
        let response = send_get(test_app(), "/api/health").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["audit_sink"], "disabled");
        assert!(json["uptime_secs"].is_number());
    }

    #[tokio::test]
    async fn test_stylesheet_served() {
        let response = send_get(test_app(), "/static/style.css").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response
            .headers()
            .get(header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap()
            .contains("text/css"));
    }

    #[tokio::test]
    async fn test_path_traversal_blocked() {
        let response = send_get(test_app(), "/static/..%2F..%2Fetc/passwd").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_file_returns_404() {
        let response = send_get(test_app(), "/static/missing.js").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_logs_with_disabled_sink() {
        let response = send_get(test_app(), "/logs/").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&body).contains("No log entries"));
    }
}
