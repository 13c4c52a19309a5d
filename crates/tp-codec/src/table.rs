//! Ordered pattern → sentinel table shared by the encoder and decoder.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Reference table entries, in application order.
///
/// Tuned on full-day AAPL trade files: the ticker is NASDAQ listed (tape 3),
/// every nanosecond epoch since 2001 begins with `1`, and `12,37` is the most
/// common condition pair.
const AAPL_NASDAQ: &[(&str, u8)] = &[
    (r#","z":3}"#, 128),
    (r#"{"x":"#, 129),
    (r#","c":["#, 130),
    (r#","t":1"#, 131),
    (r#","y":1"#, 132),
    (r#","f":1"#, 133),
    (r#","p":"#, 144),
    (r#","i":"#, 145),
    (r#","r":12"#, 146),
    (r#","r":10"#, 147),
    // must stay ahead of `,"s":`, which it contains
    (r#"],"s":"#, 148),
    (r#","s":"#, 149),
    (r#","q":"#, 150),
    ("12,37", 151),
];

pub const AAPL_NASDAQ_ID: &str = "aapl-nasdaq-v1";

/// One table entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substitution {
    pub pattern: String,
    pub sentinel: u8,
}

impl Substitution {
    pub fn new(pattern: impl Into<String>, sentinel: u8) -> Self {
        Self { pattern: pattern.into(), sentinel }
    }

    pub fn pattern_bytes(&self) -> &[u8] {
        self.pattern.as_bytes()
    }
}

/// Ordered substitution table. Entries are applied in `Vec` order when
/// encoding; a pattern that is a substring of another must come after it.
///
/// Nothing is validated on construction. See [`PatternTable::audit`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternTable {
    id: String,
    entries: Vec<Substitution>,
}

/// Problem found by [`PatternTable::audit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableIssue {
    EmptyPattern { index: usize },
    /// Sentinel is printable ASCII and will collide with JSON text.
    AsciiSentinel { index: usize, sentinel: u8 },
    DuplicateSentinel { first: usize, second: usize, sentinel: u8 },
    /// A pattern contains a byte that the table also uses as a sentinel.
    PatternContainsSentinel { index: usize, sentinel: u8 },
    /// The earlier pattern is a substring of the later one, so the later one
    /// can only match where the earlier one did not.
    Shadowed { earlier: usize, later: usize },
}

impl PatternTable {
    pub fn new(id: impl Into<String>, entries: Vec<Substitution>) -> Self {
        Self { id: id.into(), entries }
    }

    pub fn from_pairs(id: impl Into<String>, pairs: &[(&str, u8)]) -> Self {
        let entries = pairs.iter().map(|(p, s)| Substitution::new(*p, *s)).collect();
        Self::new(id, entries)
    }

    /// The table tuned for AAPL full-day trade files.
    pub fn aapl_nasdaq() -> Self {
        Self::from_pairs(AAPL_NASDAQ_ID, AAPL_NASDAQ)
    }

    /// Load a table from its JSON form: `{"id": "...", "entries": [{"pattern": "...", "sentinel": 128}]}`.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn entries(&self) -> &[Substitution] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Substitution> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pattern for a sentinel; the first entry wins if sentinels repeat.
    pub fn pattern_for(&self, sentinel: u8) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|e| e.sentinel == sentinel)
            .map(Substitution::pattern_bytes)
    }

    pub fn is_sentinel(&self, byte: u8) -> bool {
        self.entries.iter().any(|e| e.sentinel == byte)
    }

    /// Offline consistency check. Encoding and decoding never call this.
    pub fn audit(&self) -> Vec<TableIssue> {
        let mut issues = Vec::new();
        for (i, entry) in self.entries.iter().enumerate() {
            if entry.pattern.is_empty() {
                issues.push(TableIssue::EmptyPattern { index: i });
            }
            if entry.sentinel.is_ascii() {
                issues.push(TableIssue::AsciiSentinel { index: i, sentinel: entry.sentinel });
            }
            if let Some(&b) = entry.pattern_bytes().iter().find(|b| self.is_sentinel(**b)) {
                issues.push(TableIssue::PatternContainsSentinel { index: i, sentinel: b });
            }
            for (j, later) in self.entries.iter().enumerate().skip(i + 1) {
                if later.sentinel == entry.sentinel {
                    issues.push(TableIssue::DuplicateSentinel {
                        first: i,
                        second: j,
                        sentinel: entry.sentinel,
                    });
                }
                if !entry.pattern.is_empty() && later.pattern.contains(entry.pattern.as_str()) {
                    issues.push(TableIssue::Shadowed { earlier: i, later: j });
                }
            }
        }
        issues
    }
}

impl Default for PatternTable {
    fn default() -> Self {
        Self::aapl_nasdaq()
    }
}

impl<'a> IntoIterator for &'a PatternTable {
    type Item = &'a Substitution;
    type IntoIter = std::slice::Iter<'a, Substitution>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
