//! Configuration management

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::web::ServerConfig;

/// Default per-call timeout for controller requests
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default audit table name
pub const DEFAULT_AUDIT_TABLE: &str = "logs";

/// DNA Center connection settings
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Controller host name or address
    pub host: String,

    /// Controller port
    pub port: u16,

    /// Basic-auth username
    pub username: String,

    /// Basic-auth password
    pub password: String,

    /// URL scheme (https unless overridden for a local controller)
    pub scheme: String,

    /// Verify the controller's TLS certificate
    pub verify_tls: bool,

    /// Per-call timeout
    pub timeout: Duration,
}

impl ControllerConfig {
    /// Settings with defaults for everything but the credentials
    pub fn new(host: impl Into<String>, port: u16, username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port,
            username: username.into(),
            password: password.into(),
            scheme: "https".to_string(),
            verify_tls: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Load controller settings from environment variables
    pub fn from_env() -> Result<Self> {
        let host = std::env::var("DNAC_HOST").unwrap_or_else(|_| "sandboxdnac.cisco.com".to_string());

        let port = match std::env::var("DNAC_PORT") {
            Ok(v) => v.parse().with_context(|| format!("DNAC_PORT is not a port number: {}", v))?,
            Err(_) => 443,
        };

        let username = std::env::var("DNAC_USERNAME").context("DNAC_USERNAME not set")?;
        let password = std::env::var("DNAC_PASSWORD").context("DNAC_PASSWORD not set")?;

        let scheme = match std::env::var("DNAC_SCHEME") {
            Ok(s) if s == "http" || s == "https" => s,
            Ok(s) => anyhow::bail!("DNAC_SCHEME must be http or https, got {}", s),
            Err(_) => "https".to_string(),
        };

        let verify_tls = std::env::var("DNAC_VERIFY_TLS")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        let timeout_secs = std::env::var("DNAC_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(Self {
            host,
            port,
            username,
            password,
            scheme,
            verify_tls,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Base URL, e.g. `https://sandboxdnac.cisco.com:443`
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}", self.scheme, self.host, self.port)
    }

    /// Build the shared HTTP client used by every session
    pub fn http_client(&self) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .danger_accept_invalid_certs(!self.verify_tls)
            .build()
            .context("Failed to build HTTP client")
    }
}

/// Audit store settings
#[derive(Debug, Clone)]
pub struct AuditConfig {
    /// SQLite database path
    pub db_path: PathBuf,

    /// Table holding the audit events
    pub table: String,
}

impl AuditConfig {
    /// Load audit settings from environment variables
    pub fn from_env() -> Self {
        let db_path = std::env::var("AUDIT_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                dirs::data_local_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("dnac-portal")
                    .join("audit.db")
            });

        let table = std::env::var("AUDIT_TABLE").unwrap_or_else(|_| DEFAULT_AUDIT_TABLE.to_string());

        Self { db_path, table }
    }
}

/// Full application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub controller: Arc<ControllerConfig>,
    pub audit: AuditConfig,
    pub server: ServerConfig,
    /// Emit logs as JSON
    pub log_json: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let log_json = std::env::var("PORTAL_LOG_JSON")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        Ok(Self {
            controller: Arc::new(ControllerConfig::from_env()?),
            audit: AuditConfig::from_env(),
            server: ServerConfig::from_env(),
            log_json,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url() {
        let config = ControllerConfig::new("sandboxdnac.cisco.com", 443, "devnetuser", "secret");
        assert_eq!(config.base_url(), "https://sandboxdnac.cisco.com:443");

        let local = ControllerConfig {
            scheme: "http".to_string(),
            ..ControllerConfig::new("127.0.0.1", 9000, "u", "p")
        };
        assert_eq!(local.base_url(), "http://127.0.0.1:9000");
    }

    #[test]
    fn test_defaults() {
        let config = ControllerConfig::new("host", 443, "u", "p");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert!(!config.verify_tls);
        assert!(config.http_client().is_ok());
    }
}
