use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use tp_core::TradeDay;

pub const DEFAULT_DAY: &str = "2020-11-13";
pub const DEFAULT_COMPRESSED: &str = "aapl_full_day.json.tpk";
pub const DEFAULT_DECOMPRESSED: &str = "aapl_full_day.json";

#[derive(Parser, Debug)]
#[command(name = "tickpack")]
#[command(version)]
#[command(about = "Fetch a day of trades and store it dictionary-compressed", long_about = None)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch every trade of a day, compress it and write it to disk
    Compress(CompressArgs),
    /// Restore the original JSON from a compressed file
    Decompress(DecompressArgs),
}

#[derive(Args, Debug)]
pub struct CompressArgs {
    /// Trading day to fetch (YYYY-MM-DD)
    #[arg(long, default_value = DEFAULT_DAY)]
    pub day: TradeDay,

    /// Polygon.io API key with access to the trades endpoint (required)
    #[arg(long = "api-key", env = "POLYGON_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Filename for the compressed file
    #[arg(short, long, default_value = DEFAULT_COMPRESSED)]
    pub output: PathBuf,

    /// Prefix the file with a header naming the pattern table
    #[arg(long)]
    pub tagged: bool,

    /// Pattern table JSON file; defaults to the built-in AAPL table
    #[arg(long)]
    pub table: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct DecompressArgs {
    /// File to decompress
    #[arg(short, long = "file", default_value = DEFAULT_COMPRESSED)]
    pub file: PathBuf,

    /// Filename for the decompressed file
    #[arg(short, long, default_value = DEFAULT_DECOMPRESSED)]
    pub output: PathBuf,

    /// Pattern table JSON file; must match the one used to compress
    #[arg(long)]
    pub table: Option<PathBuf>,
}
