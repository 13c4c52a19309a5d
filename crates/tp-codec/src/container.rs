//! Persisted artifact framing.
//!
//! Legacy artifacts are the bare encoded bytes. Tagged artifacts prefix them
//! with a small header naming the table that produced them:
//!
//! ```text
//! "TPK" | version: u8 | id_len: u8 | table id (id_len bytes) | body
//! ```
//!
//! Readers detect the magic and fall back to legacy otherwise. Encoded trade
//! JSON starts with `{` or a sentinel byte, never with the magic.

use tracing::debug;

use crate::error::{CodecError, Result};
use crate::table::PatternTable;

pub const MAGIC: &[u8; 3] = b"TPK";
pub const VERSION: u8 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArtifactFormat {
    /// No header; the reader must know the table out of band.
    #[default]
    Legacy,
    Tagged,
}

/// Parsed tagged header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactHeader {
    pub version: u8,
    pub table_id: String,
}

impl ArtifactHeader {
    /// Parse a header from the start of `bytes`, returning it with the header
    /// length. `Ok(None)` means the bytes are a legacy artifact.
    pub fn parse(bytes: &[u8]) -> Result<Option<(Self, usize)>> {
        if !bytes.starts_with(MAGIC) {
            return Ok(None);
        }
        let fixed = MAGIC.len() + 2;
        if bytes.len() < fixed {
            return Err(CodecError::TruncatedHeader { needed: fixed, got: bytes.len() });
        }
        let version = bytes[MAGIC.len()];
        if version != VERSION {
            return Err(CodecError::UnsupportedVersion(version));
        }
        let id_len = bytes[MAGIC.len() + 1] as usize;
        let header_len = fixed + id_len;
        if bytes.len() < header_len {
            return Err(CodecError::TruncatedHeader { needed: header_len, got: bytes.len() });
        }
        let table_id = String::from_utf8_lossy(&bytes[fixed..header_len]).into_owned();
        Ok(Some((Self { version, table_id }, header_len)))
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let id = self.table_id.as_bytes();
        let id_len = u8::try_from(id.len()).map_err(|_| CodecError::TableIdTooLong(id.len()))?;
        let mut out = Vec::with_capacity(MAGIC.len() + 2 + id.len());
        out.extend_from_slice(MAGIC);
        out.push(self.version);
        out.push(id_len);
        out.extend_from_slice(id);
        Ok(out)
    }
}

/// Frame an encoded body for persistence.
pub fn frame(body: Vec<u8>, table: &PatternTable, format: ArtifactFormat) -> Result<Vec<u8>> {
    match format {
        ArtifactFormat::Legacy => Ok(body),
        ArtifactFormat::Tagged => {
            let header = ArtifactHeader { version: VERSION, table_id: table.id().to_string() };
            let mut out = header.to_bytes()?;
            out.extend_from_slice(&body);
            Ok(out)
        }
    }
}

/// Strip framing from a persisted artifact. A tagged artifact must name the
/// active table.
pub fn unframe<'a>(artifact: &'a [u8], table: &PatternTable) -> Result<(ArtifactFormat, &'a [u8])> {
    match ArtifactHeader::parse(artifact)? {
        None => Ok((ArtifactFormat::Legacy, artifact)),
        Some((header, len)) => {
            if header.table_id != table.id() {
                return Err(CodecError::TableMismatch {
                    expected: table.id().to_string(),
                    found: header.table_id,
                });
            }
            debug!(table = %header.table_id, version = header.version, "tagged artifact");
            Ok((ArtifactFormat::Tagged, &artifact[len..]))
        }
    }
}
