//! SheetMap API Server module
//!
//! Provides the HTTP REST API for column resolution, export and import.
//! Run with `sheetmap-server`.

pub mod handlers;
pub mod server;

pub use server::{router, run_api_server, ApiConfig};
