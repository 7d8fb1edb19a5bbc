//! DNA Center Portal
//!
//! Web front-end for Cisco DNA Center: token authentication, device listing
//! and per-device interface lookup, with every controller call recorded in an
//! audit trail.
//!
//! # Architecture
//!
//! ```text
//! Browser ──► Portal (axum) ──► ControllerSession ──► DNA Center REST API
//!                │                     │
//!                │                     └── AuditLog ──► SQLite
//!                └── /logs/ ◄──────────────────┘
//! ```

pub mod audit;
pub mod config;
pub mod controller;
pub mod report;
pub mod web;

pub use audit::{AuditAction, AuditError, AuditEvent, AuditLog, AuditResult, AuditSink, SqliteAuditSink};
pub use config::{AuditConfig, Config, ControllerConfig};
pub use controller::{ControllerError, ControllerSession, DeviceRecord, InterfaceRecord};
pub use web::{AppState, PortalServer, ServerConfig};
