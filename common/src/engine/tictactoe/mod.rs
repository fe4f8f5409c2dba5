mod board;
mod bot_controller;
mod types;
mod win_detector;

pub use board::{BOARD_SIDE, Board, BoardError, CELL_COUNT};
pub use bot_controller::{
    BotStrategy, COMPUTER_PLAYER, PRO_DEPTH_CAP, calculate_move, calculate_random_move,
    get_best_move, minimax,
};
pub use types::{Difficulty, GameMode, Mark, Outcome, Player, WinningLine};
pub use win_detector::{WIN_LINES, check_win, check_win_with_line, evaluate};
