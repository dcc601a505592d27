//! # dictlink
//!
//! A client-side implementation of the DICT protocol (RFC 2229):
//! - Host-list fallback on connect
//! - Banner parsing (capabilities, message id)
//! - DEFINE, MATCH, SHOW, STATUS, HELP, CLIENT, AUTH, QUIT
//! - Content-driven decoding of multi-line bodies
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Command Operations                        │
//! │        (define, match_word, show_*, status, auth ...)        │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      Connection                              │
//! │           (host fallback, banner, exec + context)            │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │    Line     │          │    Body     │
//!   │  Transport  │          │   Parsers   │
//!   └─────────────┘          └─────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use dictlink::{Connection, ALL_DATABASES, DEFAULT_PORT};
//!
//! # fn main() -> dictlink::Result<()> {
//! let mut conn = Connection::connect(&["dict.org"], DEFAULT_PORT, false, false)?;
//! conn.client("dictlink example")?;
//! if let Some(definitions) = conn.define(ALL_DATABASES, "ruby")? {
//!     for d in &definitions {
//!         println!("From {} [{}]:\n\n{}", d.description, d.database, d.text());
//!     }
//! }
//! conn.disconnect()?;
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod model;
pub mod protocol;
pub mod network;
pub mod client;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{DictError, Result};
pub use config::ClientConfig;
pub use model::{Definition, MatchResult};
pub use network::Connection;
pub use protocol::{Body, ALL_DATABASES, DEFAULT_PORT, DEFAULT_STRATEGY, FIRST_DATABASE};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of dictlink
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
