use serde::{Deserialize, Serialize};
use std::time::Duration;
use tictactoe_common::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use tictactoe_common::logger::LogLevel;
use tictactoe_common::{Difficulty, GameMode};

const CONFIG_FILE_NAME: &str = "tictactoe_console_config.yaml";
const MAX_COMPUTER_MOVE_DELAY_MS: u64 = 10_000;
const MAX_NEW_ROUND_DELAY_MS: u64 = 60_000;

fn get_config_path() -> String {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME).to_string_lossy().into_owned();
    }
    CONFIG_FILE_NAME.to_string()
}

pub fn get_config_manager(
    path_override: Option<&str>,
) -> ConfigManager<FileContentConfigProvider, Config, YamlConfigSerializer> {
    match path_override {
        Some(path) => ConfigManager::from_yaml_file(path),
        None => ConfigManager::from_yaml_file(get_config_path()),
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Config {
    pub mode: GameMode,
    pub difficulty: Difficulty,
    pub computer_move_delay_ms: u64,
    pub score_file: String,
    /// Pause after a result before the board clears on its own; 0 waits
    /// for the player to type `r`.
    #[serde(default = "default_new_round_delay_ms")]
    pub new_round_delay_ms: u64,
    #[serde(default = "default_log_level")]
    pub log_level: LogLevel,
}

fn default_log_level() -> LogLevel {
    LogLevel::Info
}

fn default_new_round_delay_ms() -> u64 {
    3000
}

impl Config {
    pub fn new_round_delay(&self) -> Option<Duration> {
        match self.new_round_delay_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        if self.computer_move_delay_ms > MAX_COMPUTER_MOVE_DELAY_MS {
            return Err(format!(
                "computer_move_delay_ms must not exceed {}",
                MAX_COMPUTER_MOVE_DELAY_MS
            ));
        }
        if self.new_round_delay_ms > MAX_NEW_ROUND_DELAY_MS {
            return Err(format!(
                "new_round_delay_ms must not exceed {}",
                MAX_NEW_ROUND_DELAY_MS
            ));
        }
        if self.score_file.trim().is_empty() {
            return Err("score_file must not be empty".to_string());
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: GameMode::PlayerVsComputer,
            difficulty: Difficulty::Easy,
            computer_move_delay_ms: 500,
            score_file: "tictactoe_scores.yaml".to_string(),
            new_round_delay_ms: default_new_round_delay_ms(),
            log_level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tictactoe_common::config::{ConfigContentProvider, ConfigSerializer};

    fn get_temp_file_path() -> String {
        use std::env;
        let mut path = env::temp_dir();
        let random_number: u32 = rand::random();
        let file_name = format!("temp_tictactoe_console_config_{}.yaml", random_number);
        path.push(file_name);
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_default_config_can_be_serialized_and_deserialized_string() {
        let default_config = Config::default();
        let serializer = YamlConfigSerializer::new();

        let serialized_string = serializer.serialize(&default_config).unwrap();
        let deserialized_config: Config = serializer.deserialize(&serialized_string).unwrap();

        assert_eq!(default_config, deserialized_config);
    }

    #[test]
    fn test_config_can_be_saved_and_loaded_by_manager() {
        let config = Config {
            mode: GameMode::PlayerVsPlayer,
            difficulty: Difficulty::Pro,
            computer_move_delay_ms: 0,
            ..Config::default()
        };
        let file_path = get_temp_file_path();
        let manager = get_config_manager(Some(&file_path));

        manager.set_config(&config).unwrap();

        let reloaded = get_config_manager(Some(&file_path)).get_config().unwrap();
        assert_eq!(config, reloaded);

        let _ = std::fs::remove_file(file_path);
    }

    #[test]
    fn test_config_file_does_not_exist_returns_default_config() {
        let manager = get_config_manager(Some("this_file_does_not_exist.yaml"));
        assert_eq!(manager.get_config().unwrap(), Config::default());
    }

    #[test]
    fn test_log_level_is_optional() {
        let content = "mode: PlayerVsPlayer\ndifficulty: Hard\ncomputer_move_delay_ms: 250\nscore_file: s.yaml\n";
        let file_path = get_temp_file_path();
        FileContentConfigProvider::new(file_path.as_str())
            .set_config_content(content)
            .unwrap();

        let config = get_config_manager(Some(&file_path)).get_config().unwrap();

        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.new_round_delay_ms, 3000);
        assert_eq!(config.difficulty, Difficulty::Hard);
        let _ = std::fs::remove_file(file_path);
    }

    #[test]
    fn test_invalid_config_cant_be_read() {
        let invalid_config_content = r#"
            mode: PlayerVsComputer
            difficulty: Hard
            computer_move_delay_ms: 60000
            score_file: scores.yaml
        "#;

        let file_path = get_temp_file_path();
        FileContentConfigProvider::new(file_path.as_str())
            .set_config_content(invalid_config_content)
            .unwrap();

        let get_result = get_config_manager(Some(&file_path)).get_config();

        assert!(get_result.is_err());
        let _ = std::fs::remove_file(file_path);
    }

    #[test]
    fn test_unknown_difficulty_is_rejected() {
        let serializer = YamlConfigSerializer::new();
        let result: Result<Config, String> = serializer.deserialize(
            "mode: PlayerVsComputer\ndifficulty: Impossible\ncomputer_move_delay_ms: 0\nscore_file: s.yaml\n",
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_new_round_delay_disables_auto_restart() {
        let config = Config {
            new_round_delay_ms: 0,
            ..Config::default()
        };
        assert_eq!(config.new_round_delay(), None);
        assert_eq!(
            Config::default().new_round_delay(),
            Some(Duration::from_millis(3000))
        );
    }

    #[test]
    fn test_new_round_delay_is_capped() {
        let config = Config {
            new_round_delay_ms: 120_000,
            ..Config::default()
        };
        let result = config.validate();
        assert!(result.unwrap_err().contains("new_round_delay_ms"));
    }
}
