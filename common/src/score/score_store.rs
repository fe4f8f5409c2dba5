use std::path::Path;

use crate::config::{
    ConfigManager, FileContentConfigProvider, MemoryContentConfigProvider, YamlConfigSerializer,
};
use crate::engine::tictactoe::Player;
use crate::log_warn;
use super::score::{Score, ScoreListener};

/// Durable key-value storage for the win tally, one key per player.
pub trait ScoreStore {
    fn load(&self) -> Result<Score, String>;
    fn store_wins(&self, player: Player, wins: u32) -> Result<(), String>;
    /// Overwrites whatever is stored with a zero tally.
    fn clear(&self) -> Result<(), String>;
}

/// Loads the stored tally. Content that cannot be read back is replaced by
/// a zero tally so later writes land on a readable document.
pub fn load_or_clear(store: &impl ScoreStore) -> Result<Score, String> {
    match store.load() {
        Ok(score) => Ok(score),
        Err(e) => {
            log_warn!("Stored scores are unreadable, starting from zero: {}", e);
            store.clear()?;
            Ok(Score::default())
        }
    }
}

pub struct FileScoreStore {
    manager: ConfigManager<FileContentConfigProvider, Score, YamlConfigSerializer>,
}

impl FileScoreStore {
    pub fn new(file_path: impl AsRef<Path>) -> Self {
        Self {
            manager: ConfigManager::from_yaml_file(file_path),
        }
    }
}

impl ScoreStore for FileScoreStore {
    fn load(&self) -> Result<Score, String> {
        self.manager.get_config()
    }

    fn store_wins(&self, player: Player, wins: u32) -> Result<(), String> {
        self.manager
            .update_config(|score| score.set(player, wins))
            .map(|_| ())
    }

    fn clear(&self) -> Result<(), String> {
        self.manager.set_config(&Score::default())
    }
}

pub struct MemoryScoreStore {
    manager: ConfigManager<MemoryContentConfigProvider, Score, YamlConfigSerializer>,
}

impl Default for MemoryScoreStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self {
            manager: ConfigManager::new(
                MemoryContentConfigProvider::new(),
                YamlConfigSerializer::new(),
            ),
        }
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load(&self) -> Result<Score, String> {
        self.manager.get_config()
    }

    fn store_wins(&self, player: Player, wins: u32) -> Result<(), String> {
        self.manager
            .update_config(|score| score.set(player, wins))
            .map(|_| ())
    }

    fn clear(&self) -> Result<(), String> {
        self.manager.set_config(&Score::default())
    }
}

/// Writes every tally change through to a [`ScoreStore`]. Write failures
/// are logged; the in-session score stays authoritative.
pub struct ScorePersister<S> {
    store: S,
}

impl<S: ScoreStore> ScorePersister<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: ScoreStore + Send> ScoreListener for ScorePersister<S> {
    fn on_score_changed(&mut self, player: Player, new_value: u32) {
        if let Err(e) = self.store.store_wins(player, new_value) {
            log_warn!("Failed to persist score for player {}: {}", player, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_score_path() -> std::path::PathBuf {
        let mut path = std::env::temp_dir();
        let random_number: u32 = rand::random();
        path.push(format!("tictactoe_scores_{}.yaml", random_number));
        path
    }

    #[test]
    fn test_missing_file_loads_zero_score() {
        let store = FileScoreStore::new(temp_score_path());
        assert_eq!(store.load().unwrap(), Score::default());
    }

    #[test]
    fn test_file_store_keeps_other_player_tally() {
        let path = temp_score_path();
        let store = FileScoreStore::new(&path);

        store.store_wins(Player::X, 2).unwrap();
        store.store_wins(Player::O, 5).unwrap();

        let reopened = FileScoreStore::new(&path);
        assert_eq!(reopened.load().unwrap(), Score::new(2, 5));

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("scoreX: 2"));

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_persister_forwards_changes() {
        let mut persister = ScorePersister::new(MemoryScoreStore::new());

        persister.on_score_changed(Player::O, 1);
        persister.on_score_changed(Player::O, 2);

        assert_eq!(persister.store().load().unwrap(), Score::new(0, 2));
    }

    #[test]
    fn test_corrupt_file_is_cleared_and_writable_again() {
        let path = temp_score_path();
        std::fs::write(&path, "scoreX: [not a number").unwrap();
        let store = FileScoreStore::new(&path);
        assert!(store.load().is_err());

        assert_eq!(load_or_clear(&store).unwrap(), Score::default());
        store.store_wins(Player::X, 1).unwrap();

        let reopened = FileScoreStore::new(&path);
        assert_eq!(reopened.load().unwrap(), Score::new(1, 0));

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_load_or_clear_keeps_readable_tally() {
        let store = MemoryScoreStore::new();
        store.store_wins(Player::O, 4).unwrap();

        assert_eq!(load_or_clear(&store).unwrap(), Score::new(0, 4));
    }
}
