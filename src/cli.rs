//! Command-line argument parsing for hivedash.
//!
//! Uses clap. Flags override the config file, which overrides built-in
//! defaults; credentials stay in the environment.

use crate::config::Config;
use clap::Parser;
use std::path::PathBuf;

/// A terminal dashboard for Hive blockchain data.
#[derive(Parser, Debug)]
#[command(name = "hivedash")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Mirror database server host
    #[arg(short = 'H', long, value_name = "HOST")]
    pub server: Option<String>,

    /// Mirror database port
    #[arg(short = 'p', long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Mirror database name
    #[arg(short = 'd', long, value_name = "DATABASE")]
    pub database: Option<String>,

    /// Database user
    #[arg(short = 'U', long, value_name = "USER")]
    pub user: Option<String>,

    /// Hive JSON-RPC endpoint
    #[arg(long, value_name = "URL")]
    pub rpc_url: Option<String>,

    /// Config file path
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log to stderr instead of the log file (interleaves with the TUI)
    #[arg(long)]
    pub stderr_log: bool,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Returns the config file path to use.
    ///
    /// Uses the --config argument if provided, otherwise the default path.
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(crate::config::Config::default_path)
    }

    /// Applies CLI overrides on top of a loaded config.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(server) = &self.server {
            config.connection.server = server.clone();
        }
        if let Some(port) = self.port {
            config.connection.port = port;
        }
        if let Some(database) = &self.database {
            config.connection.database = database.clone();
        }
        if let Some(user) = &self.user {
            config.connection.user = Some(user.clone());
        }
        if let Some(rpc_url) = &self.rpc_url {
            config.rpc.url = rpc_url.clone();
        }
    }
}
