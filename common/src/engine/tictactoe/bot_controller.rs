use crate::engine::SessionRng;
use super::board::Board;
use super::types::{Difficulty, Outcome, Player};
use super::win_detector::evaluate;

/// The computer always plays O.
pub const COMPUTER_PLAYER: Player = Player::O;

/// Plies searched past the candidate move at [`Difficulty::Pro`].
pub const PRO_DEPTH_CAP: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BotStrategy {
    Random,
    Minimax { depth_cap: Option<usize> },
}

impl From<Difficulty> for BotStrategy {
    fn from(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => BotStrategy::Random,
            Difficulty::Hard => BotStrategy::Minimax { depth_cap: None },
            Difficulty::Pro => BotStrategy::Minimax {
                depth_cap: Some(PRO_DEPTH_CAP),
            },
        }
    }
}

pub fn calculate_move(difficulty: Difficulty, board: &Board, rng: &mut SessionRng) -> Option<usize> {
    match BotStrategy::from(difficulty) {
        BotStrategy::Random => calculate_random_move(board, rng),
        BotStrategy::Minimax { depth_cap } => get_best_move(board, depth_cap),
    }
}

pub fn calculate_random_move(board: &Board, rng: &mut SessionRng) -> Option<usize> {
    rng.choose(&board.empty_indices())
}

/// Scores `board` for O: +1 win, -1 loss, 0 draw or unknown.
///
/// The terminal check runs before the depth cap, so a result reached on the
/// capped ply still counts. Ties keep the first child in cell order.
pub fn minimax(board: &Board, depth: usize, maximizing: bool, depth_cap: Option<usize>) -> i32 {
    match evaluate(board) {
        Outcome::Win(Player::O) => return 1,
        Outcome::Win(Player::X) => return -1,
        Outcome::Draw => return 0,
        Outcome::InProgress => {}
    }

    if let Some(cap) = depth_cap
        && depth >= cap
    {
        return 0;
    }

    let to_move = if maximizing { Player::O } else { Player::X };
    let scores = board
        .empty_indices()
        .into_iter()
        .map(|index| minimax(&board.with_mark(index, to_move), depth + 1, !maximizing, depth_cap));

    if maximizing {
        scores.max().unwrap_or(0)
    } else {
        scores.min().unwrap_or(0)
    }
}

/// Best cell for the computer, `None` on a full board. Each candidate is
/// scored from X's reply with the depth count restarting at zero.
pub fn get_best_move(board: &Board, depth_cap: Option<usize>) -> Option<usize> {
    let mut best_move = None;
    let mut best_score = i32::MIN;

    for index in board.empty_indices() {
        let score = minimax(&board.with_mark(index, COMPUTER_PLAYER), 0, false, depth_cap);
        if score > best_score {
            best_score = score;
            best_move = Some(index);
        }
    }

    best_move
}
