use std::fmt;

use super::board::{Board, CellStatus, Point};
use super::game::{GameSession, Phase};

pub const MINE_CHAR: char = '*';
pub const FLAG_CHAR: char = '!';
pub const HIDDEN_CHAR: char = ' ';

/// Clears the terminal and homes the cursor.
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

fn cell_char(board: &Board, point: &Point, reveal_mines: bool) -> char {
    let cell = board.get(point);
    match (cell.status, cell.is_mine) {
        (CellStatus::Hidden, true) | (CellStatus::Flagged, true) if reveal_mines => MINE_CHAR,
        (CellStatus::Hidden, _) => HIDDEN_CHAR,
        (CellStatus::Flagged, _) => FLAG_CHAR,
        (CellStatus::Revealed, _) => {
            char::from_digit(board.count_adjacent_mines(point) as u32, 10).unwrap_or('?')
        }
    }
}

/// Text view of a field: one-based hex labels on both axes and the flag count
/// beside the column header. Mines are only shown when `reveal_mines` is set.
pub struct FieldView<'a> {
    pub board: &'a Board,
    pub flags_remaining: usize,
    pub reveal_mines: bool
}

impl fmt::Display for FieldView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = self.board.size.side();
        write!(f, "   ")?;
        for x in 1..=side {
            write!(f, "{:X} ", x)?;
        }
        writeln!(f, "   Flags: {}\n", self.flags_remaining)?;

        for y in 0..side {
            write!(f, "{:X}  ", y + 1)?;
            for x in 0..side {
                write!(f, "{} ", cell_char(self.board, &Point(x, y), self.reveal_mines))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

pub fn render(board: &Board, flags_remaining: usize, reveal_mines: bool) -> String {
    FieldView{board, flags_remaining, reveal_mines}.to_string()
}

impl fmt::Display for GameSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reveal_mines = self.phase() == Phase::Lost;
        write!(f, "{}", FieldView{board: self.board(), flags_remaining: self.flags_remaining(), reveal_mines})
    }
}
