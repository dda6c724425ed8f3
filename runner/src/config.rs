pub(crate) use snake_common::config::{
    ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer,
};
use serde::{Deserialize, Serialize};
use snake_common::{CycleMode, Heuristic};

pub const DEFAULT_CONFIG_FILE: &str = "snake_autopilot.yaml";

pub fn get_config_manager(
    path: &str,
) -> ConfigManager<FileContentConfigProvider, Config, YamlConfigSerializer> {
    ConfigManager::from_yaml_file(path)
}

#[derive(Debug, Default, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub game: GameConfig,
    pub autopilot: AutopilotConfig,
    pub status: StatusConfig,
    pub run: RunConfig,
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        self.game.validate()?;
        self.autopilot.validate()?;
        self.run.validate()?;
        Ok(())
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct GameConfig {
    pub width: u32,
    pub height: u32,
    /// Pause between steps so a run can be followed in the log.
    pub step_delay_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            step_delay_ms: 0,
        }
    }
}

impl Validate for GameConfig {
    fn validate(&self) -> Result<(), String> {
        if self.width < 3 || self.height < 3 {
            return Err("field dimensions must be at least 3x3".to_string());
        }
        if self.width > 100 || self.height > 100 {
            return Err("field dimensions must not exceed 100x100".to_string());
        }
        if self.step_delay_ms > 5000 {
            return Err("step_delay_ms must not exceed 5000".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct AutopilotConfig {
    pub cycle: CycleMode,
    pub heuristic: Heuristic,
}

impl Default for AutopilotConfig {
    fn default() -> Self {
        Self {
            cycle: CycleMode::Full,
            heuristic: Heuristic::Euclidian,
        }
    }
}

impl Validate for AutopilotConfig {
    fn validate(&self) -> Result<(), String> {
        self.heuristic
            .ensure_implemented()
            .map_err(|e| e.to_string())
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct StatusConfig {
    pub show_cycles: bool,
    pub show_average_decision_time: bool,
    pub show_step_count: bool,
    pub show_head_average_distance_from_apple: bool,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            show_cycles: true,
            show_average_decision_time: true,
            show_step_count: true,
            show_head_average_distance_from_apple: true,
        }
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct RunConfig {
    pub games: u32,
    pub seed: Option<u64>,
    pub max_steps: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            games: 1,
            seed: None,
            max_steps: 100_000,
        }
    }
}

impl Validate for RunConfig {
    fn validate(&self) -> Result<(), String> {
        if self.games == 0 {
            return Err("games must be greater than 0".to_string());
        }
        if self.games > 10_000 {
            return Err("games must not exceed 10000".to_string());
        }
        if self.max_steps == 0 {
            return Err("max_steps must be greater than 0".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snake_common::config::{ConfigSerializer, YamlConfigSerializer};

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let yaml = "game:\n  width: 12\nautopilot:\n  cycle: improved\n  heuristic: bfs\n";
        let config: Config = YamlConfigSerializer::new().deserialize(yaml).unwrap();
        assert_eq!(config.game.width, 12);
        assert_eq!(config.game.height, 10);
        assert_eq!(config.autopilot.cycle, CycleMode::Improved);
        assert_eq!(config.autopilot.heuristic, Heuristic::Bfs);
        assert_eq!(config.run, RunConfig::default());
    }

    #[test]
    fn test_reserved_heuristic_fails_validation() {
        let yaml = "autopilot:\n  heuristic: a-star\n";
        let config: Config = YamlConfigSerializer::new().deserialize(yaml).unwrap();
        let error = config.validate().unwrap_err();
        assert!(error.contains("a-star"));
    }

    #[test]
    fn test_unknown_heuristic_fails_to_parse() {
        let yaml = "autopilot:\n  heuristic: dijkstra\n";
        let result: Result<Config, String> = YamlConfigSerializer::new().deserialize(yaml);
        assert!(result.is_err());
    }

    #[test]
    fn test_small_field_fails_validation() {
        let mut config = Config::default();
        config.game.width = 2;
        assert!(config.validate().is_err());
    }
}
