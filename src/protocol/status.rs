//! Status definitions
//!
//! Every DICT reply starts with a three digit status code. The first digit
//! says what happens next: a body follows (1xx), the exchange is complete
//! (2xx), more input is needed (3xx), or the command failed (4xx/5xx).

use std::fmt;

/// Coarse classification of a status code, taken from its first digit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// 1xx: text follows
    Preliminary,
    /// 2xx: command completed
    Completion,
    /// 3xx: send more input
    Intermediate,
    /// 4xx: temporary failure
    TransientFailure,
    /// 5xx: permanent failure
    PermanentFailure,
    /// Anything a conforming server should never send
    Unknown,
}

/// A three digit DICT status code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StatusCode(u16);

impl StatusCode {
    pub const DATABASES_PRESENT: StatusCode = StatusCode(110);
    pub const STRATEGIES_AVAILABLE: StatusCode = StatusCode(111);
    pub const DATABASE_INFORMATION: StatusCode = StatusCode(112);
    pub const HELP_TEXT: StatusCode = StatusCode(113);
    pub const SERVER_INFORMATION: StatusCode = StatusCode(114);
    pub const CHALLENGE_FOLLOWS: StatusCode = StatusCode(130);
    pub const DEFINITIONS_RETRIEVED: StatusCode = StatusCode(150);
    pub const WORD_DEFINITION: StatusCode = StatusCode(151);
    pub const MATCHES_PRESENT: StatusCode = StatusCode(152);
    pub const STATUS_RESPONSE: StatusCode = StatusCode(210);
    pub const CONNECTION_ESTABLISHED: StatusCode = StatusCode(220);
    pub const CLOSING_CONNECTION: StatusCode = StatusCode(221);
    pub const AUTHENTICATION_SUCCESSFUL: StatusCode = StatusCode(230);
    pub const OK: StatusCode = StatusCode(250);
    pub const SEND_RESPONSE: StatusCode = StatusCode(330);
    pub const TEMPORARILY_UNAVAILABLE: StatusCode = StatusCode(420);
    pub const SHUTTING_DOWN: StatusCode = StatusCode(421);
    pub const UNRECOGNISED_COMMAND: StatusCode = StatusCode(500);
    pub const ILLEGAL_PARAMETERS: StatusCode = StatusCode(501);
    pub const COMMAND_NOT_IMPLEMENTED: StatusCode = StatusCode(502);
    pub const PARAMETER_NOT_IMPLEMENTED: StatusCode = StatusCode(503);
    pub const ACCESS_DENIED: StatusCode = StatusCode(530);
    pub const AUTH_DENIED: StatusCode = StatusCode(531);
    pub const UNKNOWN_MECHANISM: StatusCode = StatusCode(532);
    pub const INVALID_DATABASE: StatusCode = StatusCode(550);
    pub const INVALID_STRATEGY: StatusCode = StatusCode(551);
    pub const NO_MATCH: StatusCode = StatusCode(552);
    pub const NO_DATABASES_PRESENT: StatusCode = StatusCode(554);
    pub const NO_STRATEGIES_AVAILABLE: StatusCode = StatusCode(555);

    /// Create a status code; `None` unless the value has exactly three digits
    pub fn new(value: u16) -> Option<Self> {
        (100..=999).contains(&value).then_some(StatusCode(value))
    }

    /// The numeric value
    pub fn value(self) -> u16 {
        self.0
    }

    /// Classify by first digit
    pub fn class(self) -> StatusClass {
        match self.0 / 100 {
            1 => StatusClass::Preliminary,
            2 => StatusClass::Completion,
            3 => StatusClass::Intermediate,
            4 => StatusClass::TransientFailure,
            5 => StatusClass::PermanentFailure,
            _ => StatusClass::Unknown,
        }
    }

    /// True for 4xx and 5xx codes
    pub fn is_error(self) -> bool {
        matches!(
            self.class(),
            StatusClass::TransientFailure | StatusClass::PermanentFailure
        )
    }

    /// True when a multi-line body follows this status line
    pub fn has_body(self) -> bool {
        self.class() == StatusClass::Preliminary
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}", self.0)
    }
}

/// A parsed `ddd message` reply line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub code: StatusCode,
    pub message: String,
}

impl StatusLine {
    pub fn new(code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.code.is_error()
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code, self.message)
    }
}
