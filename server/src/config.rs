//! Command line / environment configuration

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Daily check-in reward service
#[derive(Debug, Clone, Parser)]
#[command(name = "checkin-server", version, about = "Daily check-in reward service")]
pub struct ServerConfig {
    #[arg(long, env = "CHECKIN_DATABASE", help = "SQLite database path")]
    pub database: Option<PathBuf>,

    #[arg(
        long,
        env = "CHECKIN_BIND",
        default_value = "127.0.0.1:8787",
        help = "Address to listen on"
    )]
    pub bind: SocketAddr,

    #[arg(
        long,
        env = "CHECKIN_CACHE_TTL_SECS",
        default_value_t = 60,
        help = "Seconds cached page data stays fresh"
    )]
    pub cache_ttl_secs: u64,

    #[arg(
        long,
        env = "CHECKIN_CACHE_MAX_ENTRIES",
        default_value_t = 1000,
        help = "Maximum cached page entries"
    )]
    pub cache_max_entries: usize,

    #[arg(
        long,
        env = "CHECKIN_HOUSEKEEPING_SECS",
        default_value_t = 600,
        help = "Interval between expired session/cache sweeps"
    )]
    pub housekeeping_secs: u64,
}

impl ServerConfig {
    /// Database path, defaulting to the platform's local data directory
    pub fn database_path(&self) -> PathBuf {
        self.database.clone().unwrap_or_else(|| {
            dirs_next::data_local_dir()
                .map(|p| p.join("DailyCheckin"))
                .unwrap_or_else(|| PathBuf::from("."))
                .join("checkin.db")
        })
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn housekeeping_interval(&self) -> Duration {
        Duration::from_secs(self.housekeeping_secs.max(1))
    }
}
