//! Cisco DNA Center client
//!
//! Token authentication, device listing and interface lookup against the
//! controller's REST API.

pub mod session;
pub mod types;

pub use session::{ControllerError, ControllerSession};
pub use types::{DeviceRecord, InterfaceRecord, NOT_AVAILABLE};
