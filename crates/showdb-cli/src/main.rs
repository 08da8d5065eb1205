mod ingest;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "showdb-cli")]
#[command(about = "showdb command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch one show from KOPIS, geocode its venue, and print the
    /// normalized record as JSON
    Ingest {
        /// KOPIS performance ID (e.g., PF227440)
        #[arg(long)]
        show_id: String,
        /// Venue name used for the geocode lookup
        #[arg(long)]
        venue: String,
        /// Region tag stored on the record (e.g., 서울)
        #[arg(long)]
        region: String,
        /// Exit with an error when the record is only partially populated
        #[arg(long)]
        strict: bool,
        /// Print single-line JSON instead of pretty-printed output
        #[arg(long)]
        compact: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("showdb-cli ready; run `showdb-cli --help` for commands");
        return Ok(());
    };

    let config = showdb_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(?config, "configuration loaded");

    match command {
        Commands::Ingest {
            show_id,
            venue,
            region,
            strict,
            compact,
        } => {
            let options = ingest::IngestOptions { strict, compact };
            ingest::run_ingest(&config, &show_id, &venue, &region, options).await
        }
    }
}
