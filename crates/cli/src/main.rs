use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use health_gauge_core::{Bucket, LogFormat, LoggingConfig, ServerConfig};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "health-gauge")]
#[command(about = "Personal health gauge tracker", long_about = None)]
struct Cli {
    /// SQLite database file [env: DB_PATH, default: health-monitor.db]
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the web dashboard
    Serve {
        /// Listen port [env: PORT, default: 3000]
        #[arg(short, long)]
        port: Option<u16>,
        /// Listen address [env: HOST, default: 127.0.0.1]
        #[arg(short = 'H', long)]
        host: Option<String>,
    },
    /// List gauges with their current values
    List,
    /// Show one gauge
    Show { id: i64 },
    /// Average values per month or week, newest first
    History {
        id: i64,
        #[arg(short, long, default_value_t = Bucket::Month)]
        bucket: Bucket,
    },
    /// Record a value for a gauge
    Record {
        id: i64,
        #[arg(allow_hyphen_values = true)]
        value: f64,
    },
}

fn init_tracing(logging: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(logging.default_directive()))?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr);
    match logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    // Subscriber first so config parsing can warn about bad values.
    init_tracing(&LoggingConfig::from_env())?;
    let mut config = ServerConfig::from_env();
    if let Some(db) = cli.db {
        config.db_path = db;
    }

    match cli.command {
        Commands::Serve { port, host } => {
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(host) = host {
                config.host = host;
            }
            commands::serve::run(config).await
        },
        Commands::List => commands::gauges::run_list(&config).await,
        Commands::Show { id } => commands::gauges::run_show(&config, id).await,
        Commands::History { id, bucket } => {
            commands::gauges::run_history(&config, id, bucket).await
        },
        Commands::Record { id, value } => commands::gauges::run_record(&config, id, value).await,
    }
}
