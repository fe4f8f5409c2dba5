use tictactoe_common::engine::tictactoe::{BOARD_SIDE, CELL_COUNT};
use tictactoe_common::{Board, Difficulty, GameMode, Mark, Score};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// Zero-based cell index.
    Place(usize),
    NewGame(GameMode, Difficulty),
    Reset,
    Score,
    Help,
    Quit,
}

pub const HELP_TEXT: &str = "\
Commands:
  1-9              place your mark (cells numbered left to right, top to bottom)
  r, reset         start the round over
  new pvp          new game, two players
  new pvc [level]  new game against the computer (easy, hard, pro)
  s, score         show the score
  h, help          show this help
  q, quit          leave";

pub fn parse_difficulty(word: &str) -> Option<Difficulty> {
    match word.to_ascii_lowercase().as_str() {
        "easy" => Some(Difficulty::Easy),
        "hard" => Some(Difficulty::Hard),
        "pro" => Some(Difficulty::Pro),
        _ => None,
    }
}

/// `None` for anything unrecognized.
pub fn parse_command(line: &str, current_difficulty: Difficulty) -> Option<ConsoleCommand> {
    let mut words = line.split_whitespace();
    let first = words.next()?.to_ascii_lowercase();

    if let Ok(number) = first.parse::<usize>() {
        return (1..=CELL_COUNT)
            .contains(&number)
            .then(|| ConsoleCommand::Place(number - 1));
    }

    let command = match first.as_str() {
        "r" | "reset" => ConsoleCommand::Reset,
        "s" | "score" => ConsoleCommand::Score,
        "h" | "help" | "?" => ConsoleCommand::Help,
        "q" | "quit" | "exit" => ConsoleCommand::Quit,
        "new" => match words.next().map(|w| w.to_ascii_lowercase()).as_deref() {
            Some("pvp") => ConsoleCommand::NewGame(GameMode::PlayerVsPlayer, current_difficulty),
            Some("pvc") => {
                let difficulty = match words.next() {
                    Some(word) => parse_difficulty(word)?,
                    None => current_difficulty,
                };
                ConsoleCommand::NewGame(GameMode::PlayerVsComputer, difficulty)
            }
            _ => return None,
        },
        _ => return None,
    };

    if words.next().is_some() {
        return None;
    }
    Some(command)
}

/// Grid with cell numbers shown in the empty cells.
pub fn render_board(board: &Board) -> String {
    let rows: Vec<String> = board
        .cells()
        .chunks(BOARD_SIDE)
        .enumerate()
        .map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(|(column, mark)| match mark {
                    Mark::Empty => format!(" {} ", row * BOARD_SIDE + column + 1),
                    mark => format!(" {} ", mark.as_char()),
                })
                .collect::<Vec<_>>()
                .join("|")
        })
        .collect();

    rows.join("\n---+---+---\n")
}

pub fn render_score(score: &Score) -> String {
    format!("Score  X: {}  O: {}", score.wins_x, score.wins_o)
}

pub fn mode_label(mode: GameMode, difficulty: Difficulty) -> String {
    match mode {
        GameMode::PlayerVsPlayer => "Player vs Player".to_string(),
        GameMode::PlayerVsComputer => format!("Player vs Computer ({:?})", difficulty),
    }
}
