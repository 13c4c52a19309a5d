//! tickpack — fetch a full day of trades and store it dictionary-compressed.
//!
//! ## Usage
//!
//! ```bash
//! # Fetch AAPL trades for a day and write aapl_full_day.json.tpk
//! tickpack compress --day 2020-11-13 --api-key $POLYGON_API_KEY
//!
//! # Same, with a header naming the pattern table
//! tickpack compress --day 2020-11-13 --tagged -o day.tpk
//!
//! # Restore the JSON
//! tickpack decompress -f aapl_full_day.json.tpk -o aapl_full_day.json
//! ```

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tp_cli::{commands, Cli, Command};
use tp_core::TickpackConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cli.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    match cli.command {
        Command::Compress(args) => {
            let config = TickpackConfig::from_env();
            commands::run_compress(&config, &args).await?;
        }
        Command::Decompress(args) => {
            let output = commands::run_decompress(&args).await?;
            println!("{}", output.display());
        }
    }
    Ok(())
}
