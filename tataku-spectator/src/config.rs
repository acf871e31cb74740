use std::path::Path;
use thiserror::Error;
use serde::{ Serialize, Deserialize };

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("error reading config: {0}")]
    Io(#[from] std::io::Error),

    #[error("error parsing config: {0}")]
    Json(#[from] serde_json::Error),
}

/// settings for the spectator, missing fields fall back to their defaults
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpectatorConfig {
    /// our own user id, if we're logged in. you can't spectate yourself
    pub local_user_id: Option<u32>,

    /// how often the spectator service ticks the playback clock (ms)
    pub tick_interval_ms: u64,

    /// clock time before any frame has been consumed (ms)
    pub clock_start_time: f64,

    /// panic when the stream source breaks its contract (out of order frames,
    /// frames after a session ended) instead of only reporting it.
    /// defaults to on for debug builds
    pub strict_contract: bool,
}
impl Default for SpectatorConfig {
    fn default() -> Self {
        Self {
            local_user_id: None,
            tick_interval_ms: 16,
            clock_start_time: 0.0,
            strict_contract: cfg!(debug_assertions),
        }
    }
}
impl SpectatorConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_use_defaults() {
        let config = SpectatorConfig::from_json(r#"{ "local_user_id": 2 }"#).unwrap();
        assert_eq!(config.local_user_id, Some(2));
        assert_eq!(config.tick_interval_ms, 16);
        assert_eq!(config.clock_start_time, 0.0);
        assert_eq!(config.strict_contract, cfg!(debug_assertions));
    }

    #[test]
    fn saved_config_loads_back() {
        let config = SpectatorConfig {
            local_user_id: Some(44),
            tick_interval_ms: 8,
            clock_start_time: -500.0,
            strict_contract: false,
        };

        let path = std::env::temp_dir().join(format!("tataku-spectator-config-{}.json", std::process::id()));
        std::fs::write(&path, config.to_json().unwrap()).unwrap();
        let loaded = SpectatorConfig::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, config);
    }

    #[test]
    fn bad_json_is_an_error() {
        assert!(matches!(SpectatorConfig::from_json("{ nope"), Err(ConfigError::Json(_))));
        assert!(matches!(SpectatorConfig::load("/definitely/not/here.json"), Err(ConfigError::Io(_))));
    }
}
