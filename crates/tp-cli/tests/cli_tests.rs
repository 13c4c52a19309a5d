//! End-to-end tests for the tickpack commands, using a scripted page source
//! in place of the network.

use async_trait::async_trait;
use clap::Parser;
use serde_json::json;
use std::path::PathBuf;
use std::sync::Mutex;
use tempfile::TempDir;

use tp_cli::args::{DEFAULT_COMPRESSED, DEFAULT_DECOMPRESSED};
use tp_cli::{commands, Cli, Command, CompressArgs, DecompressArgs};
use tp_codec::{container::MAGIC, PatternTable, TradeCodec};
use tp_core::{TickpackConfig, Trade, TradesResponse};
use tp_fetch::{PageQuery, PageSource};

struct CannedPages {
    pages: Mutex<Vec<TradesResponse>>,
}

impl CannedPages {
    fn new(mut pages: Vec<TradesResponse>) -> Self {
        pages.reverse();
        Self { pages: Mutex::new(pages) }
    }
}

#[async_trait]
impl PageSource for CannedPages {
    async fn fetch_page(&self, _query: &PageQuery) -> tp_fetch::Result<TradesResponse> {
        Ok(self.pages.lock().unwrap().pop().unwrap_or_default())
    }
}

fn page(start: i64, n: usize) -> TradesResponse {
    let results: Vec<Trade> = (0..n as i64)
        .map(|i| Trade {
            exchange_id: 11,
            price: 119.25,
            trade_id: format!("{}", 1000 + start + i),
            timestamp: 1605250800000000000 + start + i,
            exchange_time: 1605250799990000000 + start + i,
            sequence: start + i,
            conditions: (i % 2 == 0).then(|| vec![12, 37]),
            size: 100,
            tape: 3,
            ..Default::default()
        })
        .collect();
    TradesResponse {
        ticker: "AAPL".into(),
        result_count: results.len(),
        results,
        key_map: json!({"z": {"name": "tape", "type": "int"}}),
    }
}

fn config(page_limit: usize) -> TickpackConfig {
    let mut cfg = TickpackConfig::default();
    cfg.api.page_limit = page_limit;
    cfg
}

fn compress_args(dir: &TempDir, tagged: bool) -> CompressArgs {
    CompressArgs {
        day: "2020-11-13".parse().unwrap(),
        api_key: Some("k".into()),
        output: dir.path().join("day.tpk"),
        tagged,
        table: None,
    }
}

// ========== Argument parsing ==========

#[test]
fn test_parse_compress_defaults() {
    let cli = Cli::try_parse_from(["tickpack", "compress", "--api-key", "abc"]).unwrap();
    assert_eq!(cli.log_level, "info");
    match cli.command {
        Command::Compress(args) => {
            assert_eq!(args.day.to_string(), "2020-11-13");
            assert_eq!(args.output, PathBuf::from(DEFAULT_COMPRESSED));
            assert_eq!(args.api_key.as_deref(), Some("abc"));
            assert!(!args.tagged);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_parse_rejects_bad_day() {
    let err = Cli::try_parse_from(["tickpack", "compress", "--day", "13/11/2020", "--api-key", "k"]);
    assert!(err.is_err());
}

#[test]
fn test_parse_decompress_defaults() {
    let cli = Cli::try_parse_from(["tickpack", "decompress"]).unwrap();
    match cli.command {
        Command::Decompress(args) => {
            assert_eq!(args.file, PathBuf::from(DEFAULT_COMPRESSED));
            assert_eq!(args.output, PathBuf::from(DEFAULT_DECOMPRESSED));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_parse_decompress_flags() {
    let cli = Cli::try_parse_from(["tickpack", "--log-level", "debug", "decompress", "-f", "in.tpk", "-o", "out.json"]).unwrap();
    assert_eq!(cli.log_level, "debug");
    let Command::Decompress(args) = cli.command else { panic!("expected decompress") };
    assert_eq!(args.file, PathBuf::from("in.tpk"));
    assert_eq!(args.output, PathBuf::from("out.json"));
}

#[test]
fn test_parse_requires_subcommand() {
    assert!(Cli::try_parse_from(["tickpack"]).is_err());
    assert!(Cli::try_parse_from(["tickpack", "explode"]).is_err());
}

// ========== Commands ==========

#[tokio::test]
async fn test_missing_api_key() {
    let dir = TempDir::new().unwrap();
    let mut args = compress_args(&dir, false);
    args.api_key = Some("  ".into());
    let err = commands::run_compress(&TickpackConfig::default(), &args).await.unwrap_err();
    assert!(err.to_string().contains("API key required"));
    assert!(!args.output.exists());
}

#[tokio::test]
async fn test_compress_then_decompress_files() {
    let dir = TempDir::new().unwrap();
    let source = CannedPages::new(vec![page(0, 4), page(4, 4), page(8, 1)]);
    let args = compress_args(&dir, false);
    let report = commands::compress_from_source(&source, &config(4), &args).await.unwrap();
    assert!(report.ratio_pct < 100);

    let compressed = std::fs::read(&args.output).unwrap();
    assert_eq!(compressed.len(), report.compressed_size);

    let restored = dir.path().join("day.json");
    let out = commands::run_decompress(&DecompressArgs {
        file: args.output.clone(),
        output: restored.clone(),
        table: None,
    })
    .await
    .unwrap();
    assert_eq!(out, restored);

    let json = std::fs::read(&restored).unwrap();
    assert_eq!(json.len(), report.original_size);
    let day: TradesResponse = serde_json::from_slice(&json).unwrap();
    assert_eq!(day.result_count, 9);
    assert_eq!(day.results.len(), 9);
    assert_eq!(day.results[8].sequence, 8);
}

#[tokio::test]
async fn test_tagged_file_roundtrip() {
    let dir = TempDir::new().unwrap();
    let source = CannedPages::new(vec![page(0, 3)]);
    let args = compress_args(&dir, true);
    commands::compress_from_source(&source, &config(10), &args).await.unwrap();
    assert!(std::fs::read(&args.output).unwrap().starts_with(MAGIC));

    let restored = dir.path().join("day.json");
    let codec = TradeCodec::default();
    let size = commands::decompress_file(&codec, &args.output, &restored).await.unwrap();
    assert_eq!(size, std::fs::metadata(&restored).unwrap().len() as usize);
}

#[tokio::test]
async fn test_tagged_file_rejects_other_table() {
    let dir = TempDir::new().unwrap();
    let source = CannedPages::new(vec![page(0, 3)]);
    let args = compress_args(&dir, true);
    commands::compress_from_source(&source, &config(10), &args).await.unwrap();

    let other = TradeCodec::legacy(PatternTable::from_pairs("other", &[("es", 0x80)]));
    let err = commands::decompress_file(&other, &args.output, &dir.path().join("x.json"))
        .await
        .unwrap_err();
    assert!(format!("{err:#}").contains("other"));
}

#[tokio::test]
async fn test_empty_result_not_written() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("empty.tpk");
    let report = commands::compress_to_file(&TradeCodec::default(), b"", &output).await.unwrap();
    assert_eq!(report.original_size, 0);
    assert!(!output.exists());
}

#[tokio::test]
async fn test_custom_table_file() {
    let dir = TempDir::new().unwrap();
    let table_path = dir.path().join("table.json");
    let table = PatternTable::from_pairs("es-only", &[("es", 0x80)]);
    std::fs::write(&table_path, serde_json::to_vec(&table).unwrap()).unwrap();

    let loaded = commands::load_table(Some(&table_path)).await.unwrap();
    assert_eq!(loaded, table);

    let input = dir.path().join("in.tpk");
    std::fs::write(&input, [b't', 0x80, b't']).unwrap();
    let output = dir.path().join("out.txt");
    commands::run_decompress(&DecompressArgs { file: input, output: output.clone(), table: Some(table_path) })
        .await
        .unwrap();
    assert_eq!(std::fs::read(&output).unwrap(), b"test");
}

#[tokio::test]
async fn test_missing_table_file() {
    let err = commands::load_table(Some(std::path::Path::new("/nonexistent/table.json")))
        .await
        .unwrap_err();
    assert!(format!("{err:#}").contains("reading pattern table"));
}

#[tokio::test]
async fn test_missing_input_file() {
    let dir = TempDir::new().unwrap();
    let err = commands::decompress_file(&TradeCodec::default(), &dir.path().join("nope"), &dir.path().join("out"))
        .await
        .unwrap_err();
    assert!(err.to_string().starts_with("reading"));
}
