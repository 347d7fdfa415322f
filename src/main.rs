//! hivedash - A terminal dashboard for Hive blockchain data.

use hivedash::cli::Cli;
use hivedash::config::Config;
use hivedash::db::resolve_connection;
use hivedash::error::Result;
use hivedash::hive::{HiveRpcClient, HiveRpcConfig};
use hivedash::logging;
use hivedash::query::QueryExecutor;
use hivedash::tui;
use tracing::{info, warn};

#[tokio::main]
async fn main() {
    // Load .env before anything reads the environment
    dotenvy::dotenv().ok();

    let cli = Cli::parse_args();
    let log_to_file = !cli.stderr_log;

    // Log to a file by default so tracing output cannot corrupt the TUI
    if log_to_file {
        logging::init_file_logging();
    } else {
        logging::init_stderr_logging();
    }
    info!("hivedash v{} starting", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(cli).await {
        eprintln!("{}: {}", e.category(), e);
        if log_to_file {
            eprintln!("See {} for details", logging::get_log_path().display());
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    // Configuration precedence:
    // 1. CLI arguments (highest)
    // 2. Config file
    // 3. Environment variables
    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let mut config = Config::load_from_file(&config_path)?;
    config.apply_env_defaults();
    cli.apply_overrides(&mut config);

    if !config.connection.has_credentials() {
        warn!("No database credentials configured; queries will be skipped");
    }

    // Resolve the database driver once per process; every query opens a
    // fresh connection from the resolved URL
    let resolved = resolve_connection(&config.connection.candidates()).await;
    let executor = QueryExecutor::new(resolved);

    let rpc_config =
        HiveRpcConfig::new(config.rpc.url.clone()).with_timeout(config.rpc.timeout_secs);
    let rpc = HiveRpcClient::new(rpc_config)?;

    let connection_info = Some(config.connection.display_string());
    tui::run(executor, rpc, connection_info).await
}
