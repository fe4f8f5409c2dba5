use serde::{Deserialize, Serialize};

use crate::config::Validate;
use crate::engine::tictactoe::Player;

/// Running win tally. Draws are never counted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    #[serde(rename = "scoreX", default)]
    pub wins_x: u32,
    #[serde(rename = "scoreO", default)]
    pub wins_o: u32,
}

impl Score {
    pub fn new(wins_x: u32, wins_o: u32) -> Self {
        Self { wins_x, wins_o }
    }

    pub fn get(&self, player: Player) -> u32 {
        match player {
            Player::X => self.wins_x,
            Player::O => self.wins_o,
        }
    }

    pub fn set(&mut self, player: Player, wins: u32) {
        match player {
            Player::X => self.wins_x = wins,
            Player::O => self.wins_o = wins,
        }
    }

    /// Returns the new tally for `player`.
    pub fn record_win(&mut self, player: Player) -> u32 {
        let wins = self.get(player).saturating_add(1);
        self.set(player, wins);
        wins
    }
}

impl Validate for Score {
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

/// Notified by the session each time a tally changes.
pub trait ScoreListener: Send {
    fn on_score_changed(&mut self, player: Player, new_value: u32);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigSerializer, YamlConfigSerializer};

    #[test]
    fn test_record_win_increments_one_player() {
        let mut score = Score::default();

        assert_eq!(score.record_win(Player::X), 1);
        assert_eq!(score.record_win(Player::X), 2);

        assert_eq!(score.get(Player::X), 2);
        assert_eq!(score.get(Player::O), 0);
    }

    #[test]
    fn test_yaml_uses_player_keys() {
        let serializer = YamlConfigSerializer::new();
        let yaml = serializer.serialize(&Score::new(3, 1)).unwrap();

        assert!(yaml.contains("scoreX: 3"));
        assert!(yaml.contains("scoreO: 1"));
    }

    #[test]
    fn test_missing_key_defaults_to_zero() {
        let serializer = YamlConfigSerializer::new();
        let score: Score = serializer.deserialize("scoreO: 4\n").unwrap();

        assert_eq!(score, Score::new(0, 4));
    }
}
