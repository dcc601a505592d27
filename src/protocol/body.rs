//! Multi-line body decoding
//!
//! ## Body Parser
//!
//! The shape of a body is decided by its first line, never by the command
//! that produced it:
//!
//! ```text
//!            first line is `token "text"`
//!   DETECT ───────────────────────────────▶ PAIRS ─┐
//!     │                                            │ `.`
//!     │      anything else                         ▼
//!     └───────────────────────────────────▶ TEXT ──▶ CLOSED ── status line ──▶ DONE
//! ```
//!
//! A status line seen in DETECT ends the exchange with an empty body.
//! Inside an open body every line is content, even one that begins with
//! digits; only after the `.` terminator is a status line expected.
//!
//! ## Definition Parser
//!
//! DEFINE replies interleave `151` headers with text bodies and end on `250`:
//!
//! ```text
//! 151 "word" db "Database description"
//! body line
//! .
//! 151 "word" other "Other description"
//! body line
//! .
//! 250 ok
//! ```

use indexmap::IndexMap;

use crate::error::{DictError, Result};
use crate::model::Definition;

use super::codec::{
    is_terminator, parse_definition_header, parse_pair, parse_status_line, starts_with_status,
    undot,
};
use super::{StatusCode, StatusLine};

// =============================================================================
// Body
// =============================================================================

/// A decoded multi-line body
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum Body {
    /// Key → values, in server order
    Pairs(IndexMap<String, Vec<String>>),

    /// Free text, one `\n`-terminated line per body line
    Text(String),
}

impl Body {
    /// An empty text body
    pub fn empty() -> Self {
        Body::Text(String::new())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Body::Pairs(pairs) => pairs.is_empty(),
            Body::Text(text) => text.is_empty(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Body::Text(text) => Some(text),
            Body::Pairs(_) => None,
        }
    }

    pub fn as_pairs(&self) -> Option<&IndexMap<String, Vec<String>>> {
        match self {
            Body::Pairs(pairs) => Some(pairs),
            Body::Text(_) => None,
        }
    }

    pub fn into_pairs(self) -> Option<IndexMap<String, Vec<String>>> {
        match self {
            Body::Pairs(pairs) => Some(pairs),
            Body::Text(_) => None,
        }
    }

    /// Single-valued view of a pair body (last value wins)
    pub fn to_single_pairs(&self) -> Option<IndexMap<String, String>> {
        self.as_pairs().map(|pairs| {
            pairs
                .iter()
                .filter_map(|(k, v)| v.last().map(|last| (k.clone(), last.clone())))
                .collect()
        })
    }
}

/// How repeated keys in a pair body are stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairMode {
    /// Append every value under its key (MATCH)
    Accumulate,
    /// Keep only the latest value for a key
    Overwrite,
}

/// Outcome of feeding one line to a parser
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress<T> {
    NeedMore,
    Complete { value: T, status: StatusLine },
}

// =============================================================================
// Body Parser
// =============================================================================

#[derive(Debug)]
enum State {
    Detect,
    Text(String),
    Pairs(IndexMap<String, Vec<String>>),
    Done,
}

/// Content-driven body decoder
///
/// Feed lines (CRLF already stripped) until it reports `Complete`.
#[derive(Debug)]
pub struct BodyParser {
    mode: PairMode,
    state: State,
    closed: bool,
}

impl BodyParser {
    pub fn new(mode: PairMode) -> Self {
        Self {
            mode,
            state: State::Detect,
            closed: false,
        }
    }

    /// Consume one line
    pub fn feed(&mut self, line: &str) -> Result<Progress<Body>> {
        if let State::Detect = self.state {
            if starts_with_status(line) {
                return self.complete(Body::empty(), line);
            }
            self.state = if parse_pair(line).is_some() {
                State::Pairs(IndexMap::new())
            } else {
                State::Text(String::new())
            };
        }

        if self.closed {
            let body = match std::mem::replace(&mut self.state, State::Done) {
                State::Text(text) => Body::Text(text),
                State::Pairs(pairs) => Body::Pairs(pairs),
                State::Detect | State::Done => {
                    return Err(DictError::Parse("body parser fed after completion".into()))
                }
            };
            return self.complete(body, line);
        }

        if is_terminator(line) {
            self.closed = true;
            return Ok(Progress::NeedMore);
        }

        let line = undot(line);
        match &mut self.state {
            State::Text(text) => {
                text.push_str(line);
                text.push('\n');
            }
            State::Pairs(pairs) => {
                let (name, desc) = parse_pair(line).ok_or_else(|| {
                    DictError::Parse(format!("expected `name \"description\"`, got {:?}", line))
                })?;
                match self.mode {
                    PairMode::Accumulate => {
                        pairs
                            .entry(name.to_string())
                            .or_default()
                            .push(desc.to_string());
                    }
                    PairMode::Overwrite => {
                        pairs.insert(name.to_string(), vec![desc.to_string()]);
                    }
                }
            }
            State::Detect | State::Done => {
                return Err(DictError::Parse("body parser fed after completion".into()))
            }
        }

        Ok(Progress::NeedMore)
    }

    fn complete(&mut self, body: Body, line: &str) -> Result<Progress<Body>> {
        let status = parse_status_line(line).map_err(|_| {
            DictError::Parse(format!("expected status line after body, got {:?}", line))
        })?;
        self.state = State::Done;
        Ok(Progress::Complete {
            value: body,
            status,
        })
    }
}

// =============================================================================
// Definition Parser
// =============================================================================

/// Accumulates the definitions of one DEFINE reply
///
/// Every definition is filed under the word that was requested; the
/// headword in each `151` header is only validated.
#[derive(Debug)]
pub struct DefinitionParser {
    word: String,
    current: Option<Definition>,
    definitions: Vec<Definition>,
}

impl DefinitionParser {
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            current: None,
            definitions: Vec::new(),
        }
    }

    /// Consume one line
    pub fn feed(&mut self, line: &str) -> Result<Progress<Vec<Definition>>> {
        if self.current.is_some() {
            if is_terminator(line) {
                if let Some(done) = self.current.take() {
                    self.definitions.push(done);
                }
            } else if let Some(current) = self.current.as_mut() {
                current.lines.push(undot(line).to_string());
            }
            return Ok(Progress::NeedMore);
        }

        let status = parse_status_line(line).map_err(|_| {
            DictError::Parse(format!("expected definition header, got {:?}", line))
        })?;

        match status.code {
            StatusCode::WORD_DEFINITION => {
                let (_, database, description) = parse_definition_header(line)?;
                self.current = Some(Definition {
                    word: self.word.clone(),
                    database,
                    description,
                    lines: Vec::new(),
                });
                Ok(Progress::NeedMore)
            }
            StatusCode::OK => Ok(Progress::Complete {
                value: std::mem::take(&mut self.definitions),
                status,
            }),
            _ => Err(DictError::Parse(format!(
                "unexpected status inside DEFINE reply: {}",
                status
            ))),
        }
    }
}
