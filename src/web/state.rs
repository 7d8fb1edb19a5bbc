//! Shared application state

use std::sync::Arc;
use std::time::Instant;

use crate::audit::AuditLog;
use crate::config::ControllerConfig;
use crate::controller::ControllerSession;
use crate::web::render::Renderer;

/// State shared across handlers
///
/// Holds no tokens: every request builds its own `ControllerSession`.
#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<ControllerConfig>,
    pub http: reqwest::Client,
    pub audit: AuditLog,
    pub renderer: Arc<Renderer>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(controller: Arc<ControllerConfig>, http: reqwest::Client, audit: AuditLog) -> Self {
        Self {
            controller,
            http,
            audit,
            renderer: Arc::new(Renderer::new()),
            start_time: Instant::now(),
        }
    }

    /// Build state with an HTTP client configured from the controller settings
    pub fn from_config(controller: Arc<ControllerConfig>, audit: AuditLog) -> anyhow::Result<Self> {
        let http = controller.http_client()?;
        Ok(Self::new(controller, http, audit))
    }

    /// Fresh, unauthenticated session for one request
    pub fn session(&self) -> ControllerSession {
        ControllerSession::new(self.http.clone(), self.controller.clone(), self.audit.clone())
    }

    /// Get uptime in seconds
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
