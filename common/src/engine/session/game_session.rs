use crate::engine::SessionRng;
use crate::engine::tictactoe::{
    Board, BoardError, CELL_COUNT, COMPUTER_PLAYER, Difficulty, GameMode, Mark, Outcome, Player,
    WinningLine, calculate_move, check_win_with_line, evaluate,
};
use crate::score::{Score, ScoreListener};
use crate::{log, log_debug, log_warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    Setup,
    InProgress,
    Concluded,
}

/// How the computer's reply is delivered under [`GameMode::PlayerVsComputer`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ComputerMovePolicy {
    /// The reply is played inside the same `submit_move` call.
    #[default]
    Immediate,
    /// `submit_move` hands back a [`ComputerTurn`] for the caller to play
    /// later through [`GameSession::play_computer_turn`].
    Deferred,
}

/// Ticket for one pending computer reply. Only valid for the session
/// generation and ply it was issued on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ComputerTurn {
    generation: u64,
    ply: usize,
}

impl ComputerTurn {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn ply(&self) -> usize {
        self.ply
    }
}

/// Ticket for the automatic new round after a result. Only valid while the
/// round it was issued for is still the concluded one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundRestart {
    generation: u64,
}

impl RoundRestart {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Why a submission changed nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectReason {
    NotInProgress,
    IndexOutOfRange,
    CellOccupied,
    NotYourTurn,
    ComputerTurn,
    StaleComputerTurn,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AppliedMove {
    pub index: usize,
    pub player: Player,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnReport {
    pub moves: Vec<AppliedMove>,
    pub outcome: Outcome,
    pub pending_computer_turn: Option<ComputerTurn>,
    /// Set once the round has concluded.
    pub pending_round_restart: Option<RoundRestart>,
}

impl TurnReport {
    fn new() -> Self {
        Self {
            moves: Vec::new(),
            outcome: Outcome::InProgress,
            pending_computer_turn: None,
            pending_round_restart: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted(TurnReport),
    Ignored(RejectReason),
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmitOutcome::Accepted(_))
    }

    pub fn report(&self) -> Option<&TurnReport> {
        match self {
            SubmitOutcome::Accepted(report) => Some(report),
            SubmitOutcome::Ignored(_) => None,
        }
    }
}

/// One table: the board, whose turn it is, the chosen mode and the running
/// score. Every move, human or computer, goes through the same apply path.
pub struct GameSession {
    board: Board,
    current_player: Player,
    phase: SessionPhase,
    mode: GameMode,
    difficulty: Difficulty,
    outcome: Outcome,
    score: Score,
    generation: u64,
    rng: SessionRng,
    computer_move_policy: ComputerMovePolicy,
    score_listener: Option<Box<dyn ScoreListener>>,
}

impl GameSession {
    pub fn new(score: Score) -> Self {
        Self {
            board: Board::new(),
            current_player: Player::X,
            phase: SessionPhase::Setup,
            mode: GameMode::PlayerVsPlayer,
            difficulty: Difficulty::Easy,
            outcome: Outcome::InProgress,
            score,
            generation: 0,
            rng: SessionRng::from_random(),
            computer_move_policy: ComputerMovePolicy::default(),
            score_listener: None,
        }
    }

    pub fn with_rng(mut self, rng: SessionRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn with_computer_move_policy(mut self, policy: ComputerMovePolicy) -> Self {
        self.computer_move_policy = policy;
        self
    }

    pub fn with_score_listener(mut self, listener: impl ScoreListener + 'static) -> Self {
        self.score_listener = Some(Box::new(listener));
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == SessionPhase::InProgress
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn get_score(&self, player: Player) -> u32 {
        self.score.get(player)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn rng_seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn winning_line(&self) -> Option<WinningLine> {
        match self.outcome {
            Outcome::Win(_) => check_win_with_line(&self.board),
            _ => None,
        }
    }

    pub fn status_message(&self) -> String {
        match (self.phase, self.outcome) {
            (SessionPhase::Setup, _) => "Choose a mode to start".to_string(),
            (_, Outcome::Win(player)) => format!("Player {} has won!", player),
            (_, Outcome::Draw) => "It's a draw!".to_string(),
            (_, Outcome::InProgress) => format!("Player {}'s turn", self.current_player),
        }
    }

    /// Starts a fresh round with the given mode and difficulty. Also valid
    /// mid-game or after a conclusion; the score is kept.
    pub fn start_session(&mut self, mode: GameMode, difficulty: Difficulty) {
        self.mode = mode;
        self.difficulty = difficulty;
        self.begin_round();
        log!(
            "Session started: {:?}, {:?} (generation {})",
            mode, difficulty, self.generation
        );
    }

    /// Clears the board for a new round. Ignored before the first
    /// `start_session`.
    pub fn reset(&mut self) -> bool {
        if self.phase == SessionPhase::Setup {
            log_debug!("Reset ignored: no session started");
            return false;
        }
        self.begin_round();
        log_debug!("Round reset (generation {})", self.generation);
        true
    }

    fn begin_round(&mut self) {
        self.board = Board::new();
        self.current_player = Player::X;
        self.phase = SessionPhase::InProgress;
        self.outcome = Outcome::InProgress;
        self.generation += 1;
    }

    fn ply(&self) -> usize {
        CELL_COUNT - self.board.count(Mark::Empty)
    }

    fn is_computer_to_move(&self) -> bool {
        self.mode == GameMode::PlayerVsComputer
            && self.current_player == COMPUTER_PLAYER
            && self.is_active()
    }

    /// Plays `index` for `player`. Submissions that are out of turn, on a
    /// taken cell, outside the board or after the round ended change nothing.
    pub fn submit_move(&mut self, index: usize, player: Player) -> SubmitOutcome {
        if let Err(reason) = self.check_submission(player) {
            log_debug!("Move {} by {} ignored: {:?}", index, player, reason);
            return SubmitOutcome::Ignored(reason);
        }

        let mut report = TurnReport::new();

        if let Err(e) = self.apply_move(index, player, &mut report) {
            let reason = match e {
                BoardError::IndexOutOfRange(_) => RejectReason::IndexOutOfRange,
                _ => RejectReason::CellOccupied,
            };
            log_debug!("Move {} by {} ignored: {}", index, player, e);
            return SubmitOutcome::Ignored(reason);
        }

        if self.is_computer_to_move() {
            match self.computer_move_policy {
                ComputerMovePolicy::Immediate => self.play_computer_move(&mut report),
                ComputerMovePolicy::Deferred => {
                    report.pending_computer_turn = Some(ComputerTurn {
                        generation: self.generation,
                        ply: self.ply(),
                    });
                }
            }
        }

        self.issue_round_restart(&mut report);
        SubmitOutcome::Accepted(report)
    }

    /// Plays a reply issued by an earlier deferred `submit_move`. Tickets
    /// from an older round or an already answered ply are ignored.
    pub fn play_computer_turn(&mut self, turn: ComputerTurn) -> SubmitOutcome {
        if turn.generation != self.generation || turn.ply != self.ply() {
            log_debug!(
                "Stale computer turn ignored (ticket {}/{}, session {}/{})",
                turn.generation, turn.ply, self.generation, self.ply()
            );
            return SubmitOutcome::Ignored(RejectReason::StaleComputerTurn);
        }
        if !self.is_active() {
            return SubmitOutcome::Ignored(RejectReason::NotInProgress);
        }
        if !self.is_computer_to_move() {
            return SubmitOutcome::Ignored(RejectReason::NotYourTurn);
        }

        let mut report = TurnReport::new();
        self.play_computer_move(&mut report);
        self.issue_round_restart(&mut report);
        SubmitOutcome::Accepted(report)
    }

    /// Starts the next round for a ticket issued at the end of the current
    /// one. A ticket outlived by `reset` or `start_session` changes nothing.
    pub fn restart_round(&mut self, restart: RoundRestart) -> bool {
        if restart.generation != self.generation || self.phase != SessionPhase::Concluded {
            log_debug!(
                "Stale round restart ignored (ticket {}, session {})",
                restart.generation, self.generation
            );
            return false;
        }
        self.begin_round();
        log!("New round started (generation {})", self.generation);
        true
    }

    fn issue_round_restart(&self, report: &mut TurnReport) {
        if self.phase == SessionPhase::Concluded {
            report.pending_round_restart = Some(RoundRestart {
                generation: self.generation,
            });
        }
    }

    fn check_submission(&self, player: Player) -> Result<(), RejectReason> {
        if !self.is_active() {
            return Err(RejectReason::NotInProgress);
        }
        if player != self.current_player {
            return Err(RejectReason::NotYourTurn);
        }
        if self.mode == GameMode::PlayerVsComputer && player == COMPUTER_PLAYER {
            return Err(RejectReason::ComputerTurn);
        }
        Ok(())
    }

    fn play_computer_move(&mut self, report: &mut TurnReport) {
        let Some(index) = calculate_move(self.difficulty, &self.board, &mut self.rng) else {
            return;
        };
        if let Err(e) = self.apply_move(index, COMPUTER_PLAYER, report) {
            log_warn!("Computer move {} rejected: {}", index, e);
        }
    }

    fn apply_move(
        &mut self,
        index: usize,
        player: Player,
        report: &mut TurnReport,
    ) -> Result<(), BoardError> {
        self.board.place(index, player)?;
        report.moves.push(AppliedMove { index, player });

        self.outcome = evaluate(&self.board);
        report.outcome = self.outcome;

        match self.outcome {
            Outcome::InProgress => self.current_player = player.opponent(),
            Outcome::Win(winner) => self.conclude_with_winner(winner),
            Outcome::Draw => {
                self.phase = SessionPhase::Concluded;
                log!("Round ended in a draw");
            }
        }
        Ok(())
    }

    fn conclude_with_winner(&mut self, winner: Player) {
        self.phase = SessionPhase::Concluded;
        let wins = self.score.record_win(winner);
        log!("Player {} won the round ({} wins)", winner, wins);
        if let Some(listener) = self.score_listener.as_mut() {
            listener.on_score_changed(winner, wins);
        }
    }
}
