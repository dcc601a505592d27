//! Error types for dictlink
//!
//! Provides a unified error type for all operations.
//!
//! ## Fatal vs. non-fatal
//! Every variant here is fatal to the caller's current task. A command whose
//! immediate status is in the 4xx/5xx class is *not* an error: the operation
//! returns `Ok(None)` and the caller decides what to do next. A caller that
//! wants to treat such a failure as fatal escalates it with
//! [`DictError::protocol_from`].

use std::fmt;

use thiserror::Error;

use crate::network::Connection;

/// Result type alias using DictError
pub type Result<T> = std::result::Result<T, DictError>;

/// Exit status for failures that fit no other category
pub const EXIT_GENERIC: i32 = 1;

/// Exit status for connect-time failures
pub const EXIT_CONNECT: i32 = 2;

/// Exit status for escalated protocol failures
pub const EXIT_PROTOCOL: i32 = 3;

/// One failed connect attempt, kept for diagnostics
#[derive(Debug)]
pub struct HostFailure {
    pub host: String,
    pub port: u16,
    pub error: std::io::Error,
}

impl fmt::Display for HostFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.host, self.port, self.error)
    }
}

/// Unified error type for dictlink operations
#[derive(Debug, Error)]
pub enum DictError {
    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Connection closed by server")]
    ConnectionClosed,

    // -------------------------------------------------------------------------
    // Connect Errors
    // -------------------------------------------------------------------------
    #[error("Unable to connect to host{}", format_failures(.failures))]
    NoReachableHost { failures: Vec<HostFailure> },

    #[error("{0}")]
    Banner(String),

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    #[error("{code} {message}")]
    Protocol { code: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl DictError {
    /// Escalate the connection's most recent status into a ProtocolError
    pub fn protocol_from(conn: &Connection) -> Self {
        DictError::Protocol {
            code: conn.code().map(|c| c.value()).unwrap_or(0),
            message: conn.message().to_string(),
        }
    }

    /// True for failures that happen while establishing a connection
    pub fn is_connect_error(&self) -> bool {
        matches!(
            self,
            DictError::NoReachableHost { .. } | DictError::Banner(_)
        )
    }

    /// Process exit status for this failure category
    ///
    /// - 2: connect failure (no host reachable, or error banner)
    /// - 3: protocol failure escalated by a caller
    /// - 1: anything else
    pub fn exit_code(&self) -> i32 {
        match self {
            DictError::NoReachableHost { .. } | DictError::Banner(_) => EXIT_CONNECT,
            DictError::Protocol { .. } => EXIT_PROTOCOL,
            _ => EXIT_GENERIC,
        }
    }
}

fn format_failures(failures: &[HostFailure]) -> String {
    if failures.is_empty() {
        return String::new();
    }
    let parts: Vec<String> = failures.iter().map(|f| f.to_string()).collect();
    format!(" ({})", parts.join("; "))
}
