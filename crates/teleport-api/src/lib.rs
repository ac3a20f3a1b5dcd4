//! teleport-api: HTTP API layer for the teleport bridge
//!
//! Provides a RESTful API for the frontend to drive the bridge: wallet
//! sessions, the staged selection, transfers, fee top-ups, and deposit
//! tracking.

pub mod dto;
pub mod routes;
pub mod server;
pub mod state;

pub use server::*;
pub use state::{AppState, EthSession, ProtonSession, SessionError};
