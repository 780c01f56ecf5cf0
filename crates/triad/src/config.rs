//! Command-line and environment configuration for the server binary.

use std::time::Duration;

use clap::Parser;
use triad_room::RoomConfig;

/// Triad game server
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "triad-server")]
#[command(about = "Real-time server for the growing-board three-in-a-row game", long_about = None)]
#[command(version)]
pub struct ServerArgs {
    /// Interface to listen on
    #[arg(long, env = "TRIAD_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Rooms older than this many seconds are removed
    #[arg(long, env = "TRIAD_ROOM_MAX_AGE_SECS", default_value_t = 7200)]
    pub room_max_age_secs: u64,

    /// Seconds between two sweeps for expired rooms
    #[arg(long, env = "TRIAD_SWEEP_INTERVAL_SECS", default_value_t = 300)]
    pub sweep_interval_secs: u64,
}

impl ServerArgs {
    /// `host:port`, with IPv6 hosts bracketed.
    pub fn bind_addr(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    pub fn room_config(&self) -> RoomConfig {
        RoomConfig {
            max_age: Duration::from_secs(self.room_max_age_secs),
            sweep_interval: Duration::from_secs(self.sweep_interval_secs),
        }
    }
}
