//! Reverse transform: sentinel bytes → pattern text.

use crate::table::PatternTable;

/// Expand every sentinel byte back into its pattern.
///
/// Sentinels are distinct single bytes, so one pass with a byte lookup gives
/// the same result as replacing entry by entry in any order. Bytes that are
/// not sentinels are copied through. Input from a different table decodes to
/// garbage without error.
pub fn decode(input: &[u8], table: &PatternTable) -> Vec<u8> {
    let expansions = expansion_lookup(table);
    let mut out = Vec::with_capacity(input.len() + input.len() / 2);
    for &b in input {
        match expansions[b as usize] {
            Some(pattern) => out.extend_from_slice(pattern),
            None => out.push(b),
        }
    }
    out
}

/// Byte-indexed pattern lookup; on repeated sentinels the first entry wins.
fn expansion_lookup(table: &PatternTable) -> [Option<&[u8]>; 256] {
    let mut lookup: [Option<&[u8]>; 256] = [None; 256];
    for entry in table {
        let slot = &mut lookup[entry.sentinel as usize];
        if slot.is_none() {
            *slot = Some(entry.pattern_bytes());
        }
    }
    lookup
}
