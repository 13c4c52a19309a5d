use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use tp_codec::{ArtifactFormat, PatternTable, TradeCodec, TransformReport};
use tp_core::{TickpackConfig, TpError};
use tp_fetch::{fetch_day_json, PageSource, PolygonClient};

use crate::args::{CompressArgs, DecompressArgs};

/// Built-in table, or one loaded from a JSON file.
pub async fn load_table(path: Option<&Path>) -> Result<PatternTable> {
    let table = match path {
        None => PatternTable::aapl_nasdaq(),
        Some(path) => {
            let raw = tokio::fs::read(path)
                .await
                .with_context(|| format!("reading pattern table {}", path.display()))?;
            PatternTable::from_json(&raw)
                .with_context(|| format!("parsing pattern table {}", path.display()))?
        }
    };
    for issue in table.audit() {
        warn!(table = table.id(), ?issue, "pattern table issue");
    }
    debug!(table = table.id(), entries = table.len(), "pattern table loaded");
    Ok(table)
}

/// Encode `json` and write it to `output`. Nothing is written when the
/// encoded result is empty.
pub async fn compress_to_file(codec: &TradeCodec, json: &[u8], output: &Path) -> Result<TransformReport> {
    let result = codec.compress(json)?;
    if result.output.is_empty() {
        warn!(path = %output.display(), "nothing to write");
        return Ok(result.report);
    }
    tokio::fs::write(output, &result.output)
        .await
        .with_context(|| format!("writing {}", output.display()))?;
    info!(path = %output.display(), bytes = result.output.len(), "compressed file written");
    Ok(result.report)
}

/// Decode `input` into `output`, returning the decoded size.
pub async fn decompress_file(codec: &TradeCodec, input: &Path, output: &Path) -> Result<usize> {
    let artifact = tokio::fs::read(input)
        .await
        .with_context(|| format!("reading {}", input.display()))?;
    let decoded = codec
        .decompress(&artifact)
        .with_context(|| format!("decoding {}", input.display()))?;
    tokio::fs::write(output, &decoded)
        .await
        .with_context(|| format!("writing {}", output.display()))?;
    info!(path = %output.display(), bytes = decoded.len(), "decompressed file written");
    Ok(decoded.len())
}

/// Fetch a full day from `source`, then compress it to disk.
pub async fn compress_from_source<S>(
    source: &S,
    config: &TickpackConfig,
    args: &CompressArgs,
) -> Result<TransformReport>
where
    S: PageSource + ?Sized,
{
    let table = load_table(args.table.as_deref()).await?;
    let format = if args.tagged { ArtifactFormat::Tagged } else { ArtifactFormat::Legacy };
    let codec = TradeCodec::new(table, format);

    info!(ticker = %config.ticker, day = %args.day, "fetching trades");
    let json = fetch_day_json(source, &config.ticker, args.day, config.api.page_limit)
        .await
        .with_context(|| format!("fetching {} trades for {}", config.ticker, args.day))?;

    compress_to_file(&codec, &json, &args.output).await
}

pub async fn run_compress(config: &TickpackConfig, args: &CompressArgs) -> Result<TransformReport> {
    config.validate()?;
    let api_key = args
        .api_key
        .as_deref()
        .filter(|k| !k.trim().is_empty())
        .ok_or(TpError::MissingApiKey)?;
    let client = PolygonClient::new(&config.api, api_key)?;
    compress_from_source(&client, config, args).await
}

pub async fn run_decompress(args: &DecompressArgs) -> Result<PathBuf> {
    let table = load_table(args.table.as_deref()).await?;
    let codec = TradeCodec::legacy(table);
    decompress_file(&codec, &args.file, &args.output).await?;
    Ok(args.output.clone())
}
