//! staticd - Static File HTTP/1.1 Server
//!
//! Core library for request framing, file resolution and the
//! per-connection state machine.

pub mod config;
pub mod http;
pub mod server;
pub mod static_files;
