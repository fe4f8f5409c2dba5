//! Tic-tac-toe engine: board, outcome evaluation, minimax computer player
//! and the session state machine that drives a round, plus the config,
//! score persistence and logging shared with front ends.

pub mod config;
pub mod engine;
pub mod logger;
pub mod score;

pub use engine::SessionRng;
pub use engine::session::{
    AppliedMove, ComputerMovePolicy, ComputerTurn, ComputerTurnScheduler, GameSession,
    RejectReason, RoundRestart, RoundRestartScheduler, SessionPhase, SubmitOutcome, TurnReport,
};
pub use engine::tictactoe::{Board, BoardError, Difficulty, GameMode, Mark, Outcome, Player};
pub use score::{
    FileScoreStore, MemoryScoreStore, Score, ScoreListener, ScorePersister, ScoreStore,
    load_or_clear,
};
