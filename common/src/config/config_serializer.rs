use serde::{Deserialize, Serialize};

pub trait ConfigSerializer<TConfig> {
    fn serialize(&self, config: &TConfig) -> Result<String, String>;
    fn deserialize(&self, content: &str) -> Result<TConfig, String>;
}

pub struct YamlConfigSerializer;

impl Default for YamlConfigSerializer {
    fn default() -> Self {
        Self::new()
    }
}

impl YamlConfigSerializer {
    pub fn new() -> Self {
        Self {}
    }
}

impl<TConfig> ConfigSerializer<TConfig> for YamlConfigSerializer
where
    TConfig: for<'de> Deserialize<'de> + Serialize,
{
    fn serialize(&self, config: &TConfig) -> Result<String, String> {
        serde_yaml_ng::to_string(config).map_err(|e| format!("Failed to serialize YAML: {}", e))
    }

    fn deserialize(&self, content: &str) -> Result<TConfig, String> {
        serde_yaml_ng::from_str(content).map_err(|e| format!("Failed to deserialize YAML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::tictactoe::{Difficulty, GameMode};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Table {
        mode: GameMode,
        difficulty: Difficulty,
    }

    #[test]
    fn test_enums_serialize_by_name() {
        let serializer = YamlConfigSerializer::new();
        let table = Table {
            mode: GameMode::PlayerVsComputer,
            difficulty: Difficulty::Pro,
        };

        let yaml = serializer.serialize(&table).unwrap();

        assert!(yaml.contains("mode: PlayerVsComputer"));
        assert!(yaml.contains("difficulty: Pro"));
        let parsed: Table = serializer.deserialize(&yaml).unwrap();
        assert_eq!(parsed, table);
    }

    #[test]
    fn test_error_mentions_yaml() {
        let serializer = YamlConfigSerializer::new();
        let result: Result<Table, String> = serializer.deserialize("mode: Sideways\n");
        assert!(result.unwrap_err().starts_with("Failed to deserialize YAML"));
    }
}
