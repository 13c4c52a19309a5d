//! Tickpack codec — dictionary substitution for trade-day JSON.
//!
//! A [`PatternTable`] maps high-frequency fragments of the trades schema to
//! single reserved bytes. [`encode`] swaps each fragment for its byte and
//! [`decode`] swaps it back, so `decode(encode(x)) == x` for any input that
//! never contains one of the table's reserved bytes.
//!
//! Modules:
//! - `table` — ordered pattern → sentinel table, reference table, audit
//! - `encoder` / `decoder` — the forward and reverse transforms
//! - `report` — size and ratio of an encode
//! - `container` — optional tagged artifact header
//! - `pipeline` — [`TradeCodec`], the above wired together

pub mod container;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod table;

pub use container::ArtifactFormat;
pub use decoder::decode;
pub use encoder::encode;
pub use error::{CodecError, Result};
pub use pipeline::{CompressionResult, TradeCodec};
pub use report::TransformReport;
pub use table::{PatternTable, Substitution, TableIssue};
