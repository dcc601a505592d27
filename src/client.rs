//! Command Operations
//!
//! The DICT commands, each built on [`Connection::exec`] and, where the
//! command yields a body, the body parsers.
//!
//! ## Failure indicator
//! Lookups return `Ok(None)` when the server answers the command with a
//! 4xx/5xx status ("no match", "invalid database", ...). The status stays
//! available through [`Connection::code`] and [`Connection::message`].
//! `Err` is reserved for transport and parse failures.

use md5::{Digest, Md5};

use crate::error::{DictError, Result};
use crate::model::{Definition, MatchResult};
use crate::network::Connection;
use crate::protocol::{Body, Command, DefinitionParser, Progress, StatusCode, StatusLine};

impl Connection {
    /// DEFINE a word
    ///
    /// Returns every definition in server order. An OK reply without
    /// definitions is `Some(vec![])`, distinct from the `None` failure.
    pub fn define(&mut self, database: &str, word: &str) -> Result<Option<Vec<Definition>>> {
        let status = self.exec(&Command::Define {
            database: database.to_string(),
            word: word.to_string(),
        })?;

        if status.is_error() {
            return Ok(None);
        }
        if status.code != StatusCode::DEFINITIONS_RETRIEVED {
            return Ok(Some(Vec::new()));
        }

        let mut parser = DefinitionParser::new(word);
        loop {
            let line = self.recv_line()?;
            if let Progress::Complete { value, .. } = parser.feed(&line)? {
                tracing::debug!("DEFINE {} {:?}: {} definitions", database, word, value.len());
                return Ok(Some(value));
            }
        }
    }

    /// MATCH a word
    ///
    /// Repeated databases in the reply accumulate their words in order.
    pub fn match_word(
        &mut self,
        database: &str,
        strategy: &str,
        word: &str,
    ) -> Result<Option<MatchResult>> {
        self.exec(&Command::Match {
            database: database.to_string(),
            strategy: strategy.to_string(),
            word: word.to_string(),
        })?;

        match self.read_body()? {
            None => Ok(None),
            Some(Body::Pairs(pairs)) => Ok(Some(MatchResult::from(pairs))),
            Some(body) if body.is_empty() => Ok(Some(MatchResult::new())),
            Some(Body::Text(text)) => Err(DictError::Parse(format!(
                "MATCH reply is not a list of `database \"word\"` lines: {:?}",
                text.lines().next().unwrap_or("")
            ))),
        }
    }

    /// SHOW DB: database name → description
    pub fn show_db(&mut self) -> Result<Option<Body>> {
        self.exec(&Command::ShowDatabases)?;
        self.read_body()
    }

    /// SHOW STRAT: strategy name → description
    pub fn show_strat(&mut self) -> Result<Option<Body>> {
        self.exec(&Command::ShowStrategies)?;
        self.read_body()
    }

    /// SHOW INFO: free-text description of one database
    pub fn show_info(&mut self, database: &str) -> Result<Option<Body>> {
        self.exec(&Command::ShowInfo {
            database: database.to_string(),
        })?;
        self.read_body()
    }

    /// SHOW SERVER: free-text server information
    pub fn show_server(&mut self) -> Result<Option<Body>> {
        self.exec(&Command::ShowServer)?;
        self.read_body()
    }

    /// HELP: free-text list of server commands
    pub fn help(&mut self) -> Result<Option<Body>> {
        self.exec(&Command::Help)?;
        self.read_body()
    }

    /// STATUS: the one-line status message
    pub fn status(&mut self) -> Result<String> {
        Ok(self.exec(&Command::Status)?.message)
    }

    /// CLIENT: identify this client to the server
    pub fn client(&mut self, info: &str) -> Result<StatusLine> {
        self.exec(&Command::Client {
            info: info.to_string(),
        })
    }

    /// AUTH: authenticate without sending the secret
    ///
    /// The server checks `md5(msgid + secret)`; see [`auth_digest`].
    pub fn auth(&mut self, user: &str, secret: &str) -> Result<StatusLine> {
        let digest = auth_digest(self.msgid(), secret);
        self.exec(&Command::Auth {
            user: user.to_string(),
            digest,
        })
    }
}

/// Lowercase hex MD5 of the message id followed by the secret
pub fn auth_digest(msgid: &str, secret: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(msgid.as_bytes());
    hasher.update(secret.as_bytes());
    hex::encode(hasher.finalize())
}
