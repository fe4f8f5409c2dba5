mod score;
mod score_store;

pub use score::{Score, ScoreListener};
pub use score_store::{FileScoreStore, MemoryScoreStore, ScorePersister, ScoreStore, load_or_clear};
