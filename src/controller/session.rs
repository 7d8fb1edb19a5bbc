//! DNA Center Session
//!
//! One bearer token per session. Every operation writes exactly one audit
//! event for its outcome; the not-authenticated precondition is checked
//! before any network traffic and is not audited.

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::types::{DeviceRecord, InterfaceRecord, ListResponse, TokenResponse};
use crate::audit::{AuditAction, AuditEvent, AuditLog};
use crate::config::ControllerConfig;

const AUTH_PATH: &str = "/dna/system/api/v1/auth/token";
const DEVICES_PATH: &str = "/api/v1/network-device";
const INTERFACES_PATH: &str = "/api/v1/interface";
const TOKEN_HEADER: &str = "X-Auth-Token";

/// Controller session errors
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Please authenticate first")]
    NotAuthenticated,

    #[error("Device {0} not found!")]
    DeviceNotFound(String),

    #[error("Controller request failed: {0}")]
    Upstream(String),
}

impl From<reqwest::Error> for ControllerError {
    fn from(e: reqwest::Error) -> Self {
        Self::Upstream(e.to_string())
    }
}

/// Authenticated conversation with one DNA Center instance
pub struct ControllerSession {
    http: Client,
    config: Arc<ControllerConfig>,
    audit: AuditLog,
    token: Option<String>,
}

impl ControllerSession {
    pub fn new(http: Client, config: Arc<ControllerConfig>, audit: AuditLog) -> Self {
        Self {
            http,
            config,
            audit,
            token: None,
        }
    }

    /// Current bearer token, if authenticated
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url(), path)
    }

    fn require_token(&self) -> Result<&str, ControllerError> {
        match self.token.as_deref() {
            Some(token) => Ok(token),
            None => {
                warn!("Controller query attempted before authentication");
                Err(ControllerError::NotAuthenticated)
            }
        }
    }

    /// Obtain a token with basic-auth credentials
    ///
    /// A failed attempt leaves any previously stored token untouched.
    pub async fn authenticate(&mut self) -> Result<(), ControllerError> {
        match self.request_token().await {
            Ok(token) => {
                self.token = Some(token);
                self.audit.record(AuditEvent::success(
                    AuditAction::Authentication,
                    "Token obtained successfully",
                ));
                info!("Authenticated to {}", self.config.host);
                Ok(())
            }
            Err(e) => {
                self.audit.record(AuditEvent::failure(AuditAction::Authentication, e.clone()));
                warn!("Authentication failed: {}", e);
                Err(ControllerError::Auth(e))
            }
        }
    }

    async fn request_token(&self) -> Result<String, String> {
        let url = self.url(AUTH_PATH);
        debug!("Requesting token: {}", url);

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.config.username, Some(&self.config.password))
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| e.to_string())?;

        let body: TokenResponse = response.json().await.map_err(|e| e.to_string())?;
        body.token.ok_or_else(|| "response has no Token field".to_string())
    }

    /// List every device known to the controller, in controller order
    pub async fn list_devices(&self) -> Result<Vec<DeviceRecord>, ControllerError> {
        let token = self.require_token()?;

        let request = self.http.get(self.url(DEVICES_PATH)).header(TOKEN_HEADER, token);
        match fetch_list::<DeviceRecord>(request).await {
            Ok(devices) => {
                self.audit.record(AuditEvent::success(
                    AuditAction::GetNetworkDevices,
                    "Devices retrieved successfully",
                ));
                debug!("Retrieved {} devices", devices.len());
                Ok(devices)
            }
            Err(e) => {
                self.audit
                    .record(AuditEvent::failure(AuditAction::GetNetworkDevices, e.to_string()));
                warn!("Failed to get devices: {}", e);
                Err(e)
            }
        }
    }

    /// Interfaces of the device whose management IP is `ip`
    ///
    /// Resolves the device through `list_devices`, which audits its own call.
    pub async fn get_device_interfaces(&self, ip: &str) -> Result<Vec<InterfaceRecord>, ControllerError> {
        let token = self.require_token()?;

        match self.lookup_interfaces(token, ip).await {
            Ok(interfaces) => {
                self.audit.record(
                    AuditEvent::success(
                        AuditAction::GetDeviceInterfaces,
                        format!("Interfaces retrieved for device {}", ip),
                    )
                    .with_ip(ip),
                );
                debug!("Retrieved {} interfaces for {}", interfaces.len(), ip);
                Ok(interfaces)
            }
            Err(e) => {
                self.audit.record(
                    AuditEvent::failure(AuditAction::GetDeviceInterfaces, e.to_string()).with_ip(ip),
                );
                warn!("Failed to get interfaces for {}: {}", ip, e);
                Err(e)
            }
        }
    }

    async fn lookup_interfaces(&self, token: &str, ip: &str) -> Result<Vec<InterfaceRecord>, ControllerError> {
        let devices = self.list_devices().await?;

        let device = devices
            .iter()
            .find(|d| d.has_management_ip(ip))
            .ok_or_else(|| ControllerError::DeviceNotFound(ip.to_string()))?;

        let device_id = device
            .id
            .as_deref()
            .ok_or_else(|| ControllerError::Upstream(format!("device {} has no id", ip)))?;

        let request = self
            .http
            .get(self.url(INTERFACES_PATH))
            .header(TOKEN_HEADER, token)
            .query(&[("deviceId", device_id)]);

        fetch_list(request).await
    }
}

async fn fetch_list<T: DeserializeOwned>(request: RequestBuilder) -> Result<Vec<T>, ControllerError> {
    let response = request.send().await?.error_for_status()?;
    let body: ListResponse<T> = response.json().await?;
    Ok(body.response)
}
