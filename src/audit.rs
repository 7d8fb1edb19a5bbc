//! Audit Trail
//!
//! Append-only record of controller operations, stored in SQLite.
//! The sink is opened once at startup; if that fails the log stays disabled
//! for the life of the process and every write is skipped.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Number of events shown on the logs page
pub const DEFAULT_RECENT_LIMIT: usize = 50;

/// Audit sink errors
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Audit sink unavailable")]
    Unavailable,

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid table name: {0}")]
    InvalidTable(String),

    #[error("Audit store lock poisoned")]
    Poisoned,
}

/// Operation being audited
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Authentication,
    GetNetworkDevices,
    GetDeviceInterfaces,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Authentication => "authentication",
            Self::GetNetworkDevices => "get_network_devices",
            Self::GetDeviceInterfaces => "get_device_interfaces",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "authentication" => Some(Self::Authentication),
            "get_network_devices" => Some(Self::GetNetworkDevices),
            "get_device_interfaces" => Some(Self::GetDeviceInterfaces),
            _ => None,
        }
    }
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of an audited operation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AuditResult {
    Success,
    Failure,
}

impl AuditResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "success" => Some(Self::Success),
            "failure" => Some(Self::Failure),
            _ => None,
        }
    }
}

impl std::fmt::Display for AuditResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One audited operation outcome
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuditEvent {
    pub timestamp: DateTime<Utc>,
    pub action: AuditAction,
    pub result: AuditResult,
    pub details: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
}

impl AuditEvent {
    /// Create an event stamped with the current time
    pub fn new(action: AuditAction, result: AuditResult, details: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            action,
            result,
            details: details.into(),
            ip_address: None,
        }
    }

    pub fn success(action: AuditAction, details: impl Into<String>) -> Self {
        Self::new(action, AuditResult::Success, details)
    }

    pub fn failure(action: AuditAction, details: impl Into<String>) -> Self {
        Self::new(action, AuditResult::Failure, details)
    }

    /// Attach the device IP the operation targeted
    pub fn with_ip(mut self, ip: impl Into<String>) -> Self {
        self.ip_address = Some(ip.into());
        self
    }

    pub fn is_success(&self) -> bool {
        self.result == AuditResult::Success
    }
}

/// Persistent destination for audit events
pub trait AuditSink: Send + Sync {
    /// Append one event
    fn record(&self, event: &AuditEvent) -> Result<(), AuditError>;

    /// Up to `limit` events, newest first
    fn recent(&self, limit: usize) -> Result<Vec<AuditEvent>, AuditError>;
}

/// SQLite-backed audit sink
pub struct SqliteAuditSink {
    conn: Mutex<Connection>,
    table: String,
}

impl SqliteAuditSink {
    /// Open or create the audit database
    pub fn open(path: &Path, table: &str) -> Result<Self, AuditError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        let sink = Self::with_connection(conn, table)?;

        info!("Audit store opened: {} (table {})", path.display(), table);
        Ok(sink)
    }

    /// In-memory database, gone when dropped
    pub fn open_in_memory(table: &str) -> Result<Self, AuditError> {
        Self::with_connection(Connection::open_in_memory()?, table)
    }

    fn with_connection(conn: Connection, table: &str) -> Result<Self, AuditError> {
        if !is_valid_identifier(table) {
            return Err(AuditError::InvalidTable(table.to_string()));
        }

        let sink = Self {
            conn: Mutex::new(conn),
            table: table.to_string(),
        };
        sink.init_schema()?;
        Ok(sink)
    }

    fn init_schema(&self) -> Result<(), AuditError> {
        let conn = self.conn.lock().map_err(|_| AuditError::Poisoned)?;
        conn.execute_batch(&format!(
            r#"
            CREATE TABLE IF NOT EXISTS {table} (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                timestamp INTEGER NOT NULL,
                action TEXT NOT NULL,
                result TEXT NOT NULL,
                details TEXT NOT NULL DEFAULT '',
                ip_address TEXT
            );

            CREATE INDEX IF NOT EXISTS idx_{table}_timestamp ON {table}(timestamp DESC, id DESC);
            "#,
            table = self.table
        ))?;
        Ok(())
    }

    /// Total number of stored events
    pub fn count(&self) -> Result<usize, AuditError> {
        let conn = self.conn.lock().map_err(|_| AuditError::Poisoned)?;
        let total: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {}", self.table), [], |row| row.get(0))?;
        Ok(total as usize)
    }
}

impl AuditSink for SqliteAuditSink {
    fn record(&self, event: &AuditEvent) -> Result<(), AuditError> {
        let conn = self.conn.lock().map_err(|_| AuditError::Poisoned)?;
        conn.execute(
            &format!(
                "INSERT INTO {} (timestamp, action, result, details, ip_address) VALUES (?1, ?2, ?3, ?4, ?5)",
                self.table
            ),
            params![
                event.timestamp.timestamp_micros(),
                event.action.as_str(),
                event.result.as_str(),
                event.details,
                event.ip_address,
            ],
        )?;

        debug!("Audit: {} {}", event.action, event.result);
        Ok(())
    }

    fn recent(&self, limit: usize) -> Result<Vec<AuditEvent>, AuditError> {
        let conn = self.conn.lock().map_err(|_| AuditError::Poisoned)?;
        let mut stmt = conn.prepare(&format!(
            r#"
            SELECT timestamp, action, result, details, ip_address
            FROM {}
            ORDER BY timestamp DESC, id DESC
            LIMIT ?1
            "#,
            self.table
        ))?;

        let rows: Vec<(i64, String, String, String, Option<String>)> = stmt
            .query_map(params![i64::try_from(limit).unwrap_or(i64::MAX)], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?))
            })?
            .filter_map(|r| r.ok())
            .collect();

        let events = rows
            .into_iter()
            .filter_map(|(micros, action, result, details, ip_address)| {
                let event = AuditEvent {
                    timestamp: DateTime::<Utc>::from_timestamp_micros(micros)?,
                    action: AuditAction::from_str(&action)?,
                    result: AuditResult::from_str(&result)?,
                    details,
                    ip_address,
                };
                Some(event)
            })
            .collect();

        Ok(events)
    }
}

fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Process-wide audit handle
///
/// Cheap to clone. Writes never fail from the caller's point of view.
#[derive(Clone, Default)]
pub struct AuditLog {
    sink: Option<Arc<dyn AuditSink>>,
}

impl AuditLog {
    /// Wrap an opened sink
    pub fn new(sink: Arc<dyn AuditSink>) -> Self {
        Self { sink: Some(sink) }
    }

    /// A log that drops every event
    pub fn disabled() -> Self {
        Self { sink: None }
    }

    /// Open the SQLite sink, falling back to a disabled log on failure
    pub fn open(path: &Path, table: &str) -> Self {
        match SqliteAuditSink::open(path, table) {
            Ok(sink) => Self::new(Arc::new(sink)),
            Err(e) => {
                warn!("Failed to open audit store {}: {} - audit logging disabled", path.display(), e);
                Self::disabled()
            }
        }
    }

    pub fn is_available(&self) -> bool {
        self.sink.is_some()
    }

    /// Write an event, reporting failures
    pub fn try_record(&self, event: &AuditEvent) -> Result<(), AuditError> {
        match &self.sink {
            Some(sink) => sink.record(event),
            None => Err(AuditError::Unavailable),
        }
    }

    /// Write an event, swallowing failures
    pub fn record(&self, event: AuditEvent) {
        match self.try_record(&event) {
            Ok(()) => {}
            Err(AuditError::Unavailable) => {
                debug!("Audit sink unavailable, skipped {} {}", event.action, event.result);
            }
            Err(e) => {
                warn!("Failed to write audit event {} {}: {}", event.action, event.result, e);
            }
        }
    }

    /// Up to `limit` events, newest first; empty when unavailable
    pub fn recent_events(&self, limit: usize) -> Vec<AuditEvent> {
        let Some(sink) = &self.sink else {
            return Vec::new();
        };

        match sink.recent(limit) {
            Ok(events) => events,
            Err(e) => {
                warn!("Failed to read audit events: {}", e);
                Vec::new()
            }
        }
    }
}
