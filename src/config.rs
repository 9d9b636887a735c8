use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::v_info;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    pub game: GameConfig,
    pub storage: StorageConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Star system the mining workflow searches for asteroids
    pub home_system: String,
    /// Waypoint type tag used when querying for extraction sites
    pub asteroid_waypoint_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// File the session token is persisted to when the operator opts in
    pub token_file: String,
    /// Destination for the per-call API log when logging is enabled
    pub api_log_file: String,
    /// Whether every gateway call gets appended to the API log
    pub api_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// 0=summaries only, 1=operational info, 2=per-call debug
    pub verbosity: u8,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            game: GameConfig {
                home_system: "X1-XD16".to_string(),
                asteroid_waypoint_type: "ENGINEERED_ASTEROID".to_string(),
            },
            storage: StorageConfig {
                token_file: crate::TOKEN_FILE.to_string(),
                api_log_file: "api_debug.log".to_string(),
                api_logging: false,
            },
            output: OutputConfig { verbosity: 1 },
        }
    }
}

impl ConsoleConfig {
    /// Load configuration from file, creating the default if it doesn't exist
    pub fn load_or_create(config_path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        if Path::new(config_path).exists() {
            let config_str = fs::read_to_string(config_path)?;
            let config: ConsoleConfig = toml::from_str(&config_str)?;
            config.validate()?;
            Ok(config)
        } else {
            v_info!("📋 Creating default configuration at {}", config_path);
            let config = ConsoleConfig::default();
            config.save(config_path)?;
            Ok(config)
        }
    }

    pub fn save(&self, config_path: &str) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = Path::new(config_path).parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let config_str = toml::to_string_pretty(self)?;
        fs::write(config_path, config_str)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.game.home_system.trim().is_empty() {
            return Err("home_system must not be empty".to_string());
        }
        if self.game.asteroid_waypoint_type.trim().is_empty() {
            return Err("asteroid_waypoint_type must not be empty".to_string());
        }
        if self.storage.token_file.trim().is_empty() {
            return Err("token_file must not be empty".to_string());
        }
        if self.output.verbosity > 2 {
            return Err("verbosity must be 0, 1, or 2".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(ConsoleConfig::default().validate().is_ok());
    }

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = ConsoleConfig::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let reloaded: ConsoleConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(reloaded.game.home_system, "X1-XD16");
        assert_eq!(reloaded.game.asteroid_waypoint_type, "ENGINEERED_ASTEROID");
        assert_eq!(reloaded.output.verbosity, config.output.verbosity);
    }

    #[test]
    fn rejects_empty_home_system() {
        let mut config = ConsoleConfig::default();
        config.game.home_system = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_out_of_range_verbosity() {
        let mut config = ConsoleConfig::default();
        config.output.verbosity = 3;
        assert!(config.validate().is_err());
    }
}
