use shared::DEFAULT_TICK_MS;
use std::time::Duration;

/// Runtime settings for the arena server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Wall-clock period of the simulation tick
    pub tick_period: Duration,
    /// Seed for the arena's random source; entropy when absent
    pub seed: Option<u64>,
    /// Send the current snapshot to an observer as soon as it connects
    pub snapshot_on_connect: bool,
    /// Frames an observer may fall behind before it starts skipping
    pub broadcast_capacity: usize,
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("0.0.0.0"),
            port: 3000,
            tick_period: Duration::from_millis(DEFAULT_TICK_MS),
            seed: None,
            snapshot_on_connect: false,
            broadcast_capacity: 16,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_cadence() {
        let config = ServerConfig::default();
        assert_eq!(config.tick_period, Duration::from_millis(2000));
        assert!(!config.snapshot_on_connect);
        assert_eq!(config.address(), "0.0.0.0:3000");
    }
}
