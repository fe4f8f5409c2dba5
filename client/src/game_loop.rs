use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

use tictactoe_common::{
    ComputerTurnScheduler, GameMode, GameSession, Player, RejectReason, RoundRestartScheduler,
    SubmitOutcome, log_debug,
};

use crate::console::{self, ConsoleCommand, HELP_TEXT};

/// Pending computer reply and, when enabled, the automatic new round.
pub struct Timers {
    computer_turn: ComputerTurnScheduler,
    round_restart: RoundRestartScheduler,
    auto_new_round: bool,
}

impl Timers {
    pub fn new(computer_delay: Duration, new_round_delay: Option<Duration>) -> Self {
        Self {
            computer_turn: ComputerTurnScheduler::new(computer_delay),
            round_restart: RoundRestartScheduler::new(new_round_delay.unwrap_or_default()),
            auto_new_round: new_round_delay.is_some(),
        }
    }

    fn cancel_all(&mut self) {
        if self.computer_turn.cancel().is_some() {
            log_debug!("Pending computer move dropped");
        }
        if self.round_restart.cancel().is_some() {
            log_debug!("Automatic new round dropped");
        }
    }
}

fn print_table(session: &GameSession) {
    println!();
    println!("{}", console::render_board(session.board()));
    println!("{}", session.status_message());
}

fn describe_rejection(reason: RejectReason) -> &'static str {
    match reason {
        RejectReason::NotInProgress => "The round is over. Type 'r' to play again.",
        RejectReason::IndexOutOfRange => "There is no such cell.",
        RejectReason::CellOccupied => "That cell is already taken.",
        RejectReason::NotYourTurn | RejectReason::ComputerTurn => "Wait for the computer to move.",
        RejectReason::StaleComputerTurn => "That move belongs to a previous round.",
    }
}

/// Human moves are submitted for whoever's turn it is in a two-player game,
/// and always as X against the computer.
fn human_player(session: &GameSession) -> Player {
    match session.mode() {
        GameMode::PlayerVsPlayer => session.current_player(),
        GameMode::PlayerVsComputer => Player::X,
    }
}

fn handle_submit_result(session: &GameSession, timers: &mut Timers, result: SubmitOutcome) {
    match result {
        SubmitOutcome::Accepted(report) => {
            if let Some(turn) = report.pending_computer_turn {
                timers.computer_turn.schedule(turn);
            }
            print_table(session);
            if report.outcome.is_terminal() {
                println!("{}", console::render_score(&session.score()));
                match report.pending_round_restart {
                    Some(restart) if timers.auto_new_round => {
                        timers.round_restart.schedule(restart);
                        println!(
                            "A new round starts in {} s. Type 'r' to start it now.",
                            timers.round_restart.delay().as_secs_f32()
                        );
                    }
                    _ => println!("Type 'r' to play again."),
                }
            }
        }
        SubmitOutcome::Ignored(reason) => println!("{}", describe_rejection(reason)),
    }
}

/// Returns `false` once the player asks to leave.
fn handle_command(session: &mut GameSession, timers: &mut Timers, command: ConsoleCommand) -> bool {
    match command {
        ConsoleCommand::Place(index) => {
            let player = human_player(session);
            let result = session.submit_move(index, player);
            handle_submit_result(session, timers, result);
        }
        ConsoleCommand::NewGame(mode, difficulty) => {
            timers.cancel_all();
            session.start_session(mode, difficulty);
            println!("New game: {}", console::mode_label(mode, difficulty));
            print_table(session);
        }
        ConsoleCommand::Reset => {
            timers.cancel_all();
            session.reset();
            print_table(session);
        }
        ConsoleCommand::Score => println!("{}", console::render_score(&session.score())),
        ConsoleCommand::Help => println!("{}", HELP_TEXT),
        ConsoleCommand::Quit => return false,
    }
    true
}

/// Reads commands from stdin until EOF or `quit`. The computer's reply and
/// the automatic new round are released by `timers`, and input keeps being
/// read in the meantime.
pub async fn run_console(mut session: GameSession, mut timers: Timers) -> std::io::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!(
        "Tic-tac-toe: {}",
        console::mode_label(session.mode(), session.difficulty())
    );
    println!("{}", console::render_score(&session.score()));
    println!("Type 'help' for commands.");
    print_table(&session);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                match console::parse_command(&line, session.difficulty()) {
                    Some(command) => {
                        if !handle_command(&mut session, &mut timers, command) {
                            break;
                        }
                    }
                    None if line.trim().is_empty() => {}
                    None => println!("Unknown command. Type 'help' for commands."),
                }
            }
            Some(turn) = timers.computer_turn.wait(), if timers.computer_turn.is_pending() => {
                let result = session.play_computer_turn(turn);
                handle_submit_result(&session, &mut timers, result);
            }
            Some(restart) = timers.round_restart.wait(), if timers.round_restart.is_pending() => {
                if session.restart_round(restart) {
                    println!("New round.");
                    print_table(&session);
                }
            }
        }
    }

    println!("{}", console::render_score(&session.score()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tictactoe_common::{ComputerMovePolicy, Difficulty, Mark, Score, SessionPhase, SessionRng};

    fn session(mode: GameMode) -> GameSession {
        let mut session = GameSession::new(Score::default())
            .with_rng(SessionRng::new(3))
            .with_computer_move_policy(ComputerMovePolicy::Deferred);
        session.start_session(mode, Difficulty::Hard);
        session
    }

    fn timers() -> Timers {
        Timers::new(Duration::from_millis(1), Some(Duration::from_millis(5)))
    }

    fn win_for_x(session: &mut GameSession, timers: &mut Timers) {
        for index in [0, 3, 1, 4, 2] {
            handle_command(session, timers, ConsoleCommand::Place(index));
        }
        assert_eq!(session.phase(), SessionPhase::Concluded);
    }

    #[test]
    fn test_pvp_moves_alternate_players() {
        let mut session = session(GameMode::PlayerVsPlayer);

        assert_eq!(human_player(&session), Player::X);
        let result = session.submit_move(0, human_player(&session));
        assert!(result.is_accepted());
        assert_eq!(human_player(&session), Player::O);
    }

    #[tokio::test]
    async fn test_place_schedules_computer_reply() {
        let mut session = session(GameMode::PlayerVsComputer);
        let mut timers = timers();

        assert!(handle_command(&mut session, &mut timers, ConsoleCommand::Place(0)));

        assert!(timers.computer_turn.is_pending());
        let turn = timers.computer_turn.wait().await.unwrap();
        assert!(session.play_computer_turn(turn).is_accepted());
        assert_eq!(session.board().cell(4), Ok(Mark::O));
    }

    #[tokio::test]
    async fn test_reset_cancels_pending_reply() {
        let mut session = session(GameMode::PlayerVsComputer);
        let mut timers = timers();
        handle_command(&mut session, &mut timers, ConsoleCommand::Place(0));

        handle_command(&mut session, &mut timers, ConsoleCommand::Reset);

        assert!(!timers.computer_turn.is_pending());
        assert_eq!(session.board().count(Mark::Empty), 9);
    }

    #[tokio::test]
    async fn test_result_schedules_new_round() {
        let mut session = session(GameMode::PlayerVsPlayer);
        let mut timers = timers();

        win_for_x(&mut session, &mut timers);

        assert!(timers.round_restart.is_pending());
        let restart = timers.round_restart.wait().await.unwrap();
        assert!(session.restart_round(restart));
        assert_eq!(session.phase(), SessionPhase::InProgress);
        assert_eq!(session.get_score(Player::X), 1);
    }

    #[tokio::test]
    async fn test_manual_reset_wins_over_pending_new_round() {
        let mut session = session(GameMode::PlayerVsPlayer);
        let mut timers = timers();
        win_for_x(&mut session, &mut timers);
        assert!(timers.round_restart.is_pending());

        handle_command(&mut session, &mut timers, ConsoleCommand::Reset);
        handle_command(&mut session, &mut timers, ConsoleCommand::Place(8));

        assert!(!timers.round_restart.is_pending());
        assert_eq!(session.board().cell(8), Ok(Mark::X));
    }

    #[tokio::test]
    async fn test_stale_new_round_after_new_game_does_nothing() {
        let mut session = session(GameMode::PlayerVsPlayer);
        let mut timers = timers();
        win_for_x(&mut session, &mut timers);
        let restart = timers.round_restart.cancel().unwrap();
        let mut late = RoundRestartScheduler::new(Duration::from_millis(5));
        late.schedule(restart);

        handle_command(
            &mut session,
            &mut timers,
            ConsoleCommand::NewGame(GameMode::PlayerVsPlayer, Difficulty::Easy),
        );
        handle_command(&mut session, &mut timers, ConsoleCommand::Place(8));
        let fired = late.wait().await.unwrap();

        assert!(!session.restart_round(fired));
        assert_eq!(session.board().cell(8), Ok(Mark::X));
        assert_eq!(session.current_player(), Player::O);
    }

    #[tokio::test]
    async fn test_disabled_auto_new_round_waits_for_player() {
        let mut session = session(GameMode::PlayerVsPlayer);
        let mut timers = Timers::new(Duration::ZERO, None);

        win_for_x(&mut session, &mut timers);

        assert!(!timers.round_restart.is_pending());
        assert_eq!(session.phase(), SessionPhase::Concluded);
    }

    #[test]
    fn test_quit_stops_loop() {
        let mut session = session(GameMode::PlayerVsPlayer);
        let mut timers = Timers::new(Duration::ZERO, None);
        assert!(!handle_command(&mut session, &mut timers, ConsoleCommand::Quit));
    }
}
