//! Codec pipeline — table + framing + report for one artifact.

use tracing::debug;

use crate::container::{self, ArtifactFormat};
use crate::error::Result;
use crate::report::TransformReport;
use crate::table::PatternTable;
use crate::{decoder, encoder};

/// Compression result with statistics.
#[derive(Debug, Clone)]
pub struct CompressionResult {
    /// Bytes to persist, framing included.
    pub output: Vec<u8>,
    /// Sizes of the encoded body, not counting any header.
    pub report: TransformReport,
    pub format: ArtifactFormat,
}

/// Encodes and decodes trade-day artifacts with one table.
#[derive(Debug, Clone, Default)]
pub struct TradeCodec {
    pub table: PatternTable,
    pub format: ArtifactFormat,
}

impl TradeCodec {
    pub fn new(table: PatternTable, format: ArtifactFormat) -> Self {
        Self { table, format }
    }

    pub fn legacy(table: PatternTable) -> Self {
        Self::new(table, ArtifactFormat::Legacy)
    }

    pub fn tagged(table: PatternTable) -> Self {
        Self::new(table, ArtifactFormat::Tagged)
    }

    /// Encode `input` and frame it. The report is logged before returning.
    pub fn compress(&self, input: &[u8]) -> Result<CompressionResult> {
        let body = encoder::encode(input, &self.table);
        let report = TransformReport::new(input.len(), body.len());
        report.log();
        let output = container::frame(body, &self.table, self.format)?;
        Ok(CompressionResult { output, report, format: self.format })
    }

    /// Strip framing (either format is accepted) and decode.
    pub fn decompress(&self, artifact: &[u8]) -> Result<Vec<u8>> {
        let (format, body) = container::unframe(artifact, &self.table)?;
        debug!(?format, len = body.len(), table = self.table.id(), "decompressing");
        Ok(decoder::decode(body, &self.table))
    }
}
