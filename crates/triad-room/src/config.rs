//! Room retention settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How long rooms live and how often the sweeper looks for old ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomConfig {
    /// Rooms older than this are removed by the sweeper, occupied or not.
    pub max_age: Duration,

    /// Time between two sweeps.
    pub sweep_interval: Duration,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            max_age: Duration::from_secs(2 * 60 * 60),
            sweep_interval: Duration::from_secs(5 * 60),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_config_default() {
        let config = RoomConfig::default();
        assert_eq!(config.max_age, Duration::from_secs(7200));
        assert_eq!(config.sweep_interval, Duration::from_secs(300));
    }

    #[test]
    fn test_room_config_deserializes_from_json() {
        let json = r#"{
            "max_age": {"secs": 60, "nanos": 0},
            "sweep_interval": {"secs": 5, "nanos": 0}
        }"#;
        let config: RoomConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.max_age, Duration::from_secs(60));
        assert_eq!(config.sweep_interval, Duration::from_secs(5));
    }
}
