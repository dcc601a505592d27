//! Protocol Module
//!
//! Wire-level pieces of the DICT protocol (RFC 2229). Nothing here touches
//! a socket; the network module drives these types line by line.
//!
//! ## Exchange Shape
//! ```text
//! C: MATCH wn re "^a\w*$"
//! S: 152 3 matches found
//! S: wn "aa"
//! S: wn "aah"
//! S: wn "abaca"
//! S: .
//! S: 250 ok
//! ```
//!
//! ### Status Classes
//! - 1xx: body follows
//! - 2xx: success
//! - 3xx: more input required
//! - 4xx/5xx: failure
//!
//! ### Reserved Identifiers
//! - `*`: all databases
//! - `!`: first database with a match
//! - `.`: server default match strategy

mod body;
mod codec;
mod command;
mod status;

pub use body::{Body, BodyParser, DefinitionParser, PairMode, Progress};
pub use codec::{
    is_terminator, parse_banner, parse_definition_header, parse_pair, parse_status_line,
    read_line, starts_with_error, starts_with_status, undot, write_line, MAX_LINE_LENGTH,
    TERMINATOR,
};
pub use command::{quote, Command, CommandType};
pub use status::{StatusClass, StatusCode, StatusLine};

/// Default DICT server port
pub const DEFAULT_PORT: u16 = 2628;

/// Search every database
pub const ALL_DATABASES: &str = "*";

/// Stop at the first database with a hit
pub const FIRST_DATABASE: &str = "!";

/// Server-chosen default match strategy
pub const DEFAULT_STRATEGY: &str = ".";
