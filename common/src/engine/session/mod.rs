mod game_session;
mod ticket_scheduler;

pub use game_session::{
    AppliedMove, ComputerMovePolicy, ComputerTurn, GameSession, RejectReason, RoundRestart,
    SessionPhase, SubmitOutcome, TurnReport,
};
pub use ticket_scheduler::{ComputerTurnScheduler, RoundRestartScheduler, TicketScheduler};
