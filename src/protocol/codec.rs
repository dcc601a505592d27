//! Protocol codec
//!
//! Line shapes and line-level stream I/O for the wire protocol.
//!
//! ## Wire Format
//!
//! Every line is ASCII text terminated by CRLF. Lines handed to the
//! functions in this module have already had the CRLF removed.
//!
//! ### Status line
//! ```text
//! ddd message text
//! ```
//!
//! ### Body lines
//! ```text
//! token "quoted text"      (pair shape)
//! anything else            (free text)
//! .                        (terminator)
//! ```
//!
//! A body line that begins with `.` is sent with the dot doubled.

use std::io::{BufRead, Write};

use crate::error::{DictError, Result};
use crate::model::Banner;

use super::{StatusCode, StatusLine};

/// Body terminator line
pub const TERMINATOR: &str = ".";

/// Longest line a server is expected to send, CRLF included
pub const MAX_LINE_LENGTH: usize = 1024;

// =============================================================================
// Line Predicates
// =============================================================================

/// True for the lone-dot line that ends a multi-line body
pub fn is_terminator(line: &str) -> bool {
    line == TERMINATOR
}

/// True when the line begins with three ASCII digits
pub fn starts_with_status(line: &str) -> bool {
    let bytes = line.as_bytes();
    bytes.len() >= 3 && bytes[..3].iter().all(u8::is_ascii_digit)
}

/// True when the line begins with a 4xx/5xx code
pub fn starts_with_error(line: &str) -> bool {
    starts_with_status(line) && matches!(line.as_bytes()[0], b'4' | b'5')
}

/// Reverse dot-stuffing: a leading `..` becomes `.`
pub fn undot(line: &str) -> &str {
    if line.starts_with("..") {
        &line[1..]
    } else {
        line
    }
}

// =============================================================================
// Line Parsers
// =============================================================================

/// Parse a `ddd message` status line
///
/// A bare code with no message is accepted and yields an empty message.
pub fn parse_status_line(line: &str) -> Result<StatusLine> {
    if !starts_with_status(line) {
        return Err(DictError::Parse(format!("not a status line: {:?}", line)));
    }

    let (digits, rest) = line.split_at(3);
    let message = match rest.chars().next() {
        None => "",
        Some(c) if c.is_whitespace() => &rest[c.len_utf8()..],
        Some(_) => {
            return Err(DictError::Parse(format!(
                "status code not followed by a space: {:?}",
                line
            )))
        }
    };

    let value: u16 = digits
        .parse()
        .map_err(|_| DictError::Parse(format!("bad status code: {:?}", digits)))?;
    let code = StatusCode::new(value)
        .ok_or_else(|| DictError::Parse(format!("status code out of range: {}", digits)))?;

    Ok(StatusLine::new(code, message))
}

/// Match the pair shape `token "quoted text"`
///
/// The token is everything up to the first whitespace, followed by exactly
/// one whitespace character and a double-quoted, non-empty remainder.
/// Returns `(token, text)` with the outer quotes removed.
pub fn parse_pair(line: &str) -> Option<(&str, &str)> {
    let split = line.find(char::is_whitespace)?;
    if split == 0 {
        return None;
    }
    let (token, rest) = line.split_at(split);
    let sep = rest.chars().next()?;
    let quoted = &rest[sep.len_utf8()..];

    if quoted.len() < 3 || !quoted.starts_with('"') || !quoted.ends_with('"') {
        return None;
    }
    Some((token, &quoted[1..quoted.len() - 1]))
}

/// Parse the connect banner
///
/// The banner carries an optional bracketed capability list followed by a
/// mandatory bracketed message id:
/// ```text
/// 220 dict.example.org dictd 1.12 <auth.mime> <12345.67@dict.example.org>
/// ```
/// The message id keeps its angle brackets, since AUTH digests it verbatim.
pub fn parse_banner(line: &str) -> Result<Banner> {
    let open = line.find('<');
    let close = line.rfind('>');
    let (open, close) = match (open, close) {
        (Some(o), Some(c)) if c > o => (o, c),
        _ => {
            return Err(DictError::Parse(format!(
                "banner carries no message id: {:?}",
                line
            )))
        }
    };

    // Shortest `<caps>` that is followed by whitespace and a second
    // bracketed token; without one, everything from `<` is the message id.
    let bytes = line.as_bytes();
    let mut capabilities = Vec::new();
    let mut msgid_start = open;
    let mut pos = open + 2;
    while let Some(offset) = line.get(pos..).and_then(|s| s.find('>')) {
        let gt = pos + offset;
        let followed_by_msgid = bytes.get(gt + 1).is_some_and(u8::is_ascii_whitespace)
            && bytes.get(gt + 2) == Some(&b'<')
            && close > gt + 2;
        if followed_by_msgid {
            capabilities = line[open + 1..gt]
                .split('.')
                .filter(|cap| !cap.is_empty())
                .map(str::to_string)
                .collect();
            msgid_start = gt + 2;
            break;
        }
        pos = gt + 1;
    }

    Ok(Banner {
        capabilities,
        msgid: line[msgid_start..=close].to_string(),
    })
}

/// Parse a `151 "word" database "description"` header
///
/// Returns `(word, database, description)`.
pub fn parse_definition_header(line: &str) -> Result<(String, String, String)> {
    let malformed = || DictError::Parse(format!("malformed definition header: {:?}", line));

    let status = parse_status_line(line)?;
    let rest = status.message.as_str();
    if !rest.starts_with('"') {
        return Err(malformed());
    }

    // The word is the shortest quoted prefix after which the rest still fits.
    let mut search = 2;
    while let Some(offset) = rest.get(search..).and_then(|s| s.find('"')) {
        let quote = search + offset;
        if let Some((database, description)) = split_database_description(&rest[quote + 1..]) {
            return Ok((
                rest[1..quote].to_string(),
                database.to_string(),
                description.to_string(),
            ));
        }
        search = quote + 1;
    }

    Err(malformed())
}

/// Match ` database "description"` after the closing quote of the word
fn split_database_description(tail: &str) -> Option<(&str, &str)> {
    let sep = tail.chars().next().filter(|c| c.is_whitespace())?;
    parse_pair(&tail[sep.len_utf8()..])
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Read one line from a stream, stripping the CRLF
///
/// A bare LF terminator is tolerated. Bytes that are not valid UTF-8 are
/// replaced rather than rejected. End of stream is
/// [`DictError::ConnectionClosed`].
pub fn read_line<R: BufRead>(reader: &mut R) -> Result<String> {
    let mut buf = Vec::with_capacity(128);
    let n = reader.read_until(b'\n', &mut buf)?;
    if n == 0 {
        return Err(DictError::ConnectionClosed);
    }
    if n > MAX_LINE_LENGTH {
        tracing::warn!("Received {} byte line (limit {})", n, MAX_LINE_LENGTH);
    }

    if buf.last() == Some(&b'\n') {
        buf.pop();
    }
    if buf.last() == Some(&b'\r') {
        buf.pop();
    }

    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Write one line to a stream, appending CRLF
pub fn write_line<W: Write>(writer: &mut W, line: &str) -> Result<()> {
    if line.contains(['\r', '\n']) {
        return Err(DictError::Parse(format!(
            "command line contains a line break: {:?}",
            line
        )));
    }
    writer.write_all(line.as_bytes())?;
    writer.write_all(b"\r\n")?;
    writer.flush()?;
    Ok(())
}
