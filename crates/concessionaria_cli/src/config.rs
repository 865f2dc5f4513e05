//! Server configuration from command-line flags and environment.

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "concessionaria")]
#[command(about = "Dealership record manager: manufacturers, vehicle models and vehicles")]
#[command(version)]
pub struct ServerConfig {
    /// SQLite database file, created on first start
    #[arg(long, env = "CONCESSIONARIA_DATABASE", default_value = "database.db")]
    pub database: PathBuf,

    /// Address the HTTP server listens on
    #[arg(long, env = "CONCESSIONARIA_BIND", default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,

    /// trace|debug|info|warn|error (defaults by build mode)
    #[arg(long, env = "CONCESSIONARIA_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files; stderr when unset
    #[arg(long, env = "CONCESSIONARIA_LOG_DIR")]
    pub log_dir: Option<String>,
}
