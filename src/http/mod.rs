//! HTTP protocol implementation.
//!
//! This module implements the GET-only HTTP/1.1 subset the server speaks,
//! with support for pipelined requests on one connection.
//!
//! # Architecture
//!
//! The HTTP layer is organized into several submodules:
//!
//! - **`connection`**: The per-connection state machine driving reads, responses and closing
//! - **`parser`**: Frames and validates request heads from a byte buffer
//! - **`request`**: HTTP request representation and header canonicalization
//! - **`response`**: HTTP response representation with builder pattern
//! - **`writer`**: Serializes a response head (sorted headers) and streams the body file
//! - **`mime`**: MIME type detection based on file extensions
//!
//! # Connection State Machine
//!
//! Each client connection goes through a state machine:
//!
//! ```text
//!        ┌──────────────────┐
//!        │ AwaitingRequest  │ ← Read under a fresh idle deadline
//!        └──────┬───────────┘
//!               ├─ clean EOF / idle timeout → Closed (silently)
//!               ├─ bad, truncated or timed-out request → Writing(400) → Closed
//!               │ Request received
//!               ▼
//!        ┌──────────────────┐
//!        │    Serving       │ ← Resolve the file, build 200 or 404
//!        └──────┬───────────┘
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               ├─ no close → AwaitingRequest (same connection)
//!               └─ Connection: close → Closed
//! ```
//!
//! # Example
//!
//! ```ignore
//! use staticd::http::connection::Connection;
//! use staticd::server::ServerContext;
//! use std::{sync::Arc, time::Duration};
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let ctx = Arc::new(ServerContext::new("htdocs", Duration::from_secs(5)));
//!     let listener = TcpListener::bind("127.0.0.1:8080").await?;
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let ctx = ctx.clone();
//!         tokio::spawn(async move {
//!             let mut conn = Connection::new(socket, ctx);
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod request;
pub mod response;
pub mod parser;
pub mod connection;
pub mod writer;
pub mod mime;
