//! Result types handed back to callers.

use indexmap::IndexMap;
use serde::Serialize;

/// Capabilities and message id announced in the connect banner
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Banner {
    pub capabilities: Vec<String>,
    pub msgid: String,
}

/// One sense of a word, as returned by DEFINE
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Definition {
    /// The word that was requested, whatever spelling the server echoed
    pub word: String,

    /// Database identifier, e.g. `wn`
    pub database: String,

    /// Human-readable database name
    pub description: String,

    /// Body lines, dot-unstuffed, without the terminator
    pub lines: Vec<String>,
}

impl Definition {
    /// The body joined with newlines
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Words found by MATCH, grouped by database in server order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MatchResult(IndexMap<String, Vec<String>>);

impl MatchResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one match, appending to the database's list
    pub fn push(&mut self, database: impl Into<String>, word: impl Into<String>) {
        self.0.entry(database.into()).or_default().push(word.into());
    }

    /// Matches from one database
    pub fn get(&self, database: &str) -> Option<&[String]> {
        self.0.get(database).map(Vec::as_slice)
    }

    /// Database identifiers, in the order they first appeared
    pub fn databases(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Every matched word, database by database
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.0.values().flatten().map(String::as_str)
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Vec<String>> {
        self.0.iter()
    }

    /// Number of databases with at least one match
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> IndexMap<String, Vec<String>> {
        self.0
    }
}

impl From<IndexMap<String, Vec<String>>> for MatchResult {
    fn from(map: IndexMap<String, Vec<String>>) -> Self {
        MatchResult(map)
    }
}

impl<'a> IntoIterator for &'a MatchResult {
    type Item = (&'a String, &'a Vec<String>);
    type IntoIter = indexmap::map::Iter<'a, String, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
