use std::fmt;
use std::str::FromStr;

use super::types::{Mark, Player};

pub const BOARD_SIDE: usize = 3;
pub const CELL_COUNT: usize = BOARD_SIDE * BOARD_SIDE;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    IndexOutOfRange(usize),
    InvalidMove { index: usize, occupant: Mark },
    InvalidNotation(String),
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::IndexOutOfRange(index) => {
                write!(f, "Cell index {} is outside 0..{}", index, CELL_COUNT)
            }
            BoardError::InvalidMove { index, occupant } => {
                write!(f, "Cell {} is already taken by {}", index, occupant.as_char())
            }
            BoardError::InvalidNotation(notation) => {
                write!(f, "Invalid board notation: {:?}", notation)
            }
        }
    }
}

impl std::error::Error for BoardError {}

/// A 3x3 board, cells indexed 0..9 row-major.
///
/// Cells only ever go from `Empty` to a mark; the only way back is a whole
/// new board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Mark; CELL_COUNT],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cells(&self) -> &[Mark; CELL_COUNT] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Result<Mark, BoardError> {
        self.cells
            .get(index)
            .copied()
            .ok_or(BoardError::IndexOutOfRange(index))
    }

    pub fn is_empty(&self, index: usize) -> Result<bool, BoardError> {
        Ok(self.cell(index)? == Mark::Empty)
    }

    pub fn place(&mut self, index: usize, player: Player) -> Result<(), BoardError> {
        let occupant = self.cell(index)?;
        if occupant != Mark::Empty {
            return Err(BoardError::InvalidMove { index, occupant });
        }
        self.cells[index] = player.mark();
        Ok(())
    }

    /// Copy of this board with `player` on `index`. The search only calls
    /// this with indices taken from [`Board::empty_indices`].
    pub(crate) fn with_mark(&self, index: usize, player: Player) -> Board {
        debug_assert_eq!(self.cells[index], Mark::Empty);
        let mut next = *self;
        next.cells[index] = player.mark();
        next
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&cell| cell != Mark::Empty)
    }

    /// Empty cells in ascending order.
    pub fn empty_indices(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == Mark::Empty)
            .map(|(index, _)| index)
            .collect()
    }

    pub fn count(&self, mark: Mark) -> usize {
        self.cells.iter().filter(|&&cell| cell == mark).count()
    }
}

impl FromStr for Board {
    type Err = BoardError;

    /// Nine cells, `X`/`O` for marks and `.`, `-` or space for empty.
    /// Newlines and `|` separators are skipped.
    fn from_str(notation: &str) -> Result<Self, Self::Err> {
        let mut cells = [Mark::Empty; CELL_COUNT];
        let mut count = 0;

        for ch in notation.chars().filter(|ch| !matches!(ch, '\n' | '\r' | '|')) {
            let mark = match ch {
                'X' | 'x' => Mark::X,
                'O' | 'o' => Mark::O,
                '.' | '-' | ' ' => Mark::Empty,
                _ => return Err(BoardError::InvalidNotation(notation.to_string())),
            };
            if count == CELL_COUNT {
                return Err(BoardError::InvalidNotation(notation.to_string()));
            }
            cells[count] = mark;
            count += 1;
        }

        if count != CELL_COUNT {
            return Err(BoardError::InvalidNotation(notation.to_string()));
        }

        Ok(Self { cells })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row_index, row) in self.cells.chunks(BOARD_SIDE).enumerate() {
            if row_index > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{}", cell.as_char())?;
            }
        }
        Ok(())
    }
}
