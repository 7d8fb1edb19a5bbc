//! Web Portal
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │               Portal Server                  │
//! ├──────────────────────────────────────────────┤
//! │  GET  /               → Landing page         │
//! │  GET  /authenticate/  → Token                │
//! │  GET  /devices/       → Device table         │
//! │  GET  /interfaces/    → Lookup form          │
//! │  POST /interfaces/    → Interface table      │
//! │  GET  /logs/          → Audit trail          │
//! │  GET  /api/health     → Health check         │
//! └──────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod handlers;
pub mod health;
pub mod render;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use render::Renderer;
pub use server::{router, PortalServer};
pub use state::AppState;
