//! Network Module
//!
//! Client-side TCP handling.
//!
//! ## Architecture
//! - `LineTransport`: CRLF line I/O, optional raw tracing
//! - `Connection`: host fallback, banner, command/response exchange
//! - Strictly synchronous: one connection, one outstanding command

mod connection;
mod transport;

pub use connection::Connection;
pub use transport::LineTransport;
