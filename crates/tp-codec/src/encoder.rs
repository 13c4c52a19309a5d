//! Forward transform: pattern occurrences → sentinel bytes.

use memchr::memmem;
use tracing::trace;

use crate::table::PatternTable;

/// Replace every occurrence of each table pattern with its sentinel byte.
///
/// Entries are applied in table order. Within one entry matches are found
/// left to right and never overlap; scanning resumes after each match, so a
/// sentinel is never part of a later match. Empty patterns are skipped.
/// The output is never longer than the input.
pub fn encode(input: &[u8], table: &PatternTable) -> Vec<u8> {
    let mut buf = input.to_vec();
    for entry in table {
        let pattern = entry.pattern_bytes();
        if pattern.is_empty() {
            continue;
        }
        let (next, hits) = replace_all(&buf, pattern, entry.sentinel);
        trace!(sentinel = entry.sentinel, hits, "pattern applied");
        if hits > 0 {
            buf = next;
        }
    }
    buf
}

/// Non-overlapping replace of `needle` with a single byte. Returns the new
/// buffer and the number of replacements; the buffer is empty when nothing
/// matched.
fn replace_all(haystack: &[u8], needle: &[u8], sentinel: u8) -> (Vec<u8>, usize) {
    let finder = memmem::Finder::new(needle);
    let mut matches = finder.find_iter(haystack).peekable();
    if matches.peek().is_none() {
        return (Vec::new(), 0);
    }

    let mut out = Vec::with_capacity(haystack.len());
    let mut last = 0;
    let mut hits = 0;
    for pos in matches {
        out.extend_from_slice(&haystack[last..pos]);
        out.push(sentinel);
        last = pos + needle.len();
        hits += 1;
    }
    out.extend_from_slice(&haystack[last..]);
    (out, hits)
}
