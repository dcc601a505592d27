//! Command definitions
//!
//! Represents the command lines a client sends.

use std::fmt;

/// Command types
///
/// Remembered by the connection after each exchange so that body parsing
/// can apply command-specific accumulation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    Define,
    Match,
    Show,
    Status,
    Help,
    Client,
    Auth,
    Quit,
    Other,
}

impl CommandType {
    /// Classify a raw command line by its leading keyword
    pub fn from_line(line: &str) -> Self {
        let keyword = line.split_whitespace().next().unwrap_or("");
        match keyword.to_ascii_uppercase().as_str() {
            "DEFINE" => CommandType::Define,
            "MATCH" => CommandType::Match,
            "SHOW" => CommandType::Show,
            "STATUS" => CommandType::Status,
            "HELP" => CommandType::Help,
            "CLIENT" => CommandType::Client,
            "AUTH" => CommandType::Auth,
            "QUIT" => CommandType::Quit,
            _ => CommandType::Other,
        }
    }
}

/// A client command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `DEFINE <database> "<word>"`
    Define { database: String, word: String },

    /// `MATCH <database> <strategy> "<word>"`
    Match {
        database: String,
        strategy: String,
        word: String,
    },

    /// `SHOW DB`
    ShowDatabases,

    /// `SHOW STRAT`
    ShowStrategies,

    /// `SHOW INFO <database>`
    ShowInfo { database: String },

    /// `SHOW SERVER`
    ShowServer,

    /// `STATUS`
    Status,

    /// `HELP`
    Help,

    /// `CLIENT <info>`
    Client { info: String },

    /// `AUTH <user> <digest>`
    Auth { user: String, digest: String },

    /// `QUIT`
    Quit,
}

impl Command {
    /// Get the command type
    pub fn command_type(&self) -> CommandType {
        match self {
            Command::Define { .. } => CommandType::Define,
            Command::Match { .. } => CommandType::Match,
            Command::ShowDatabases
            | Command::ShowStrategies
            | Command::ShowInfo { .. }
            | Command::ShowServer => CommandType::Show,
            Command::Status => CommandType::Status,
            Command::Help => CommandType::Help,
            Command::Client { .. } => CommandType::Client,
            Command::Auth { .. } => CommandType::Auth,
            Command::Quit => CommandType::Quit,
        }
    }

    /// Render the command line, without the CRLF
    pub fn to_line(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Define { database, word } => {
                write!(f, "DEFINE {} {}", database, quote(word))
            }
            Command::Match {
                database,
                strategy,
                word,
            } => write!(f, "MATCH {} {} {}", database, strategy, quote(word)),
            Command::ShowDatabases => f.write_str("SHOW DB"),
            Command::ShowStrategies => f.write_str("SHOW STRAT"),
            Command::ShowInfo { database } => write!(f, "SHOW INFO {}", database),
            Command::ShowServer => f.write_str("SHOW SERVER"),
            Command::Status => f.write_str("STATUS"),
            Command::Help => f.write_str("HELP"),
            Command::Client { info } => write!(f, "CLIENT {}", info),
            Command::Auth { user, digest } => write!(f, "AUTH {} {}", user, digest),
            Command::Quit => f.write_str("QUIT"),
        }
    }
}

/// Wrap a word in double quotes, escaping `"` and `\` (RFC 2229 section 2.2)
///
/// dictd unescapes quoted strings before matching, so the pattern `^a\w*$`
/// goes out as `"^a\\w*$"` and reaches the regex engine unchanged.
pub fn quote(word: &str) -> String {
    let mut quoted = String::with_capacity(word.len() + 2);
    quoted.push('"');
    for c in word.chars() {
        if c == '"' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}
