use super::board::Board;
use super::types::{Mark, Outcome, Player, WinningLine};

/// Rows, then columns, then diagonals.
pub const WIN_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

fn line_owner(board: &Board, line: [usize; 3]) -> Option<Player> {
    let cells = board.cells();
    let [a, b, c] = line;
    if cells[a] != Mark::Empty && cells[a] == cells[b] && cells[a] == cells[c] {
        cells[a].player()
    } else {
        None
    }
}

pub fn check_win_with_line(board: &Board) -> Option<WinningLine> {
    WIN_LINES.iter().find_map(|&line| {
        line_owner(board, line).map(|player| WinningLine::new(player, line))
    })
}

pub fn check_win(board: &Board) -> Option<Player> {
    check_win_with_line(board).map(|line| line.player)
}

pub fn evaluate(board: &Board) -> Outcome {
    if let Some(player) = check_win(board) {
        return Outcome::Win(player);
    }
    if board.is_full() {
        return Outcome::Draw;
    }
    Outcome::InProgress
}
