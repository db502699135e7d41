//! Board state for a single game of tic-tac-toe. Tracks the cells, whose
//! turn it is and the winner once the game has finished.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Player token placed onto the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// Marks in the order they are assigned to joining players
    pub const ALL: [Mark; 2] = [Mark::X, Mark::O];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Mark::X => "X",
            Mark::O => "O",
        }
    }

    /// The mark that plays after this one
    pub const fn other(&self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

impl Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final outcome of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winner {
    Mark(Mark),
    Tie,
}

impl Winner {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Winner::Mark(mark) => mark.as_str(),
            Winner::Tie => "tie",
        }
    }
}

/// A single cell on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    /// Cell that hasn't been played, holds its own 1-based label
    Empty(u8),
    /// Cell claimed by a player
    Marked(Mark),
}

impl Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty(label) => write!(f, "{label}"),
            Cell::Marked(mark) => f.write_str(mark.as_str()),
        }
    }
}

/// Total number of cells on the board
pub const CELL_COUNT: usize = 9;

pub struct Board {
    cells: [Cell; CELL_COUNT],
    turn: Mark,
    winner: Option<Winner>,
    moves: usize,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Winning lines in evaluation order: rows top to bottom, columns
    /// left to right then both diagonals
    const LINES: [[usize; 3]; 8] = [
        [0, 1, 2],
        [3, 4, 5],
        [6, 7, 8],
        [0, 3, 6],
        [1, 4, 7],
        [2, 5, 8],
        [0, 4, 8],
        [2, 4, 6],
    ];

    /// Creates a fresh board where X plays first
    pub fn new() -> Self {
        let mut cells = [Cell::Empty(0); CELL_COUNT];
        for (index, cell) in cells.iter_mut().enumerate() {
            *cell = Cell::Empty(index as u8 + 1);
        }

        Self {
            cells,
            turn: Mark::X,
            winner: None,
            moves: 0,
        }
    }

    /// Cells rendered the way they appear on the wire
    pub fn labels(&self) -> Vec<String> {
        self.cells.iter().map(Cell::to_string).collect()
    }

    pub fn turn(&self) -> Mark {
        self.turn
    }

    pub fn winner(&self) -> Option<Winner> {
        self.winner
    }

    pub fn moves(&self) -> usize {
        self.moves
    }

    /// Attempts to place the current turn's mark onto the cell with the
    /// provided label ("1" through "9").
    ///
    /// Returns false without changing anything when the game is already
    /// over, the label doesn't name a cell or the cell is taken.
    pub fn apply_move(&mut self, label: &str) -> bool {
        if self.winner.is_some() {
            return false;
        }

        let index = match Self::parse_label(label) {
            Some(value) => value,
            None => return false,
        };

        let cell = &mut self.cells[index];
        if let Cell::Marked(_) = cell {
            return false;
        }

        *cell = Cell::Marked(self.turn);
        self.turn = self.turn.other();
        self.moves += 1;
        self.evaluate_terminal();

        true
    }

    /// Updates the winner if the board has reached a finished state
    fn evaluate_terminal(&mut self) {
        let line_winner = Self::LINES.iter().find_map(|[a, b, c]| {
            match (self.cells[*a], self.cells[*b], self.cells[*c]) {
                (Cell::Marked(first), Cell::Marked(second), Cell::Marked(third))
                    if first == second && second == third =>
                {
                    Some(first)
                }
                _ => None,
            }
        });

        if let Some(mark) = line_winner {
            self.winner = Some(Winner::Mark(mark));
        } else if self.moves >= CELL_COUNT {
            self.winner = Some(Winner::Tie);
        }
    }

    /// Converts a cell label into a board index, only the exact labels
    /// "1" through "9" are accepted
    fn parse_label(label: &str) -> Option<usize> {
        match label.as_bytes() {
            [digit @ b'1'..=b'9'] => Some((digit - b'1') as usize),
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::{Board, Mark, Winner};

    /// Plays all the provided moves asserting each one is accepted
    fn play(moves: &[&str]) -> Board {
        let mut board = Board::new();
        for cell in moves {
            assert!(board.apply_move(cell), "Move {cell} should be accepted");
        }
        board
    }

    #[test]
    fn test_new_board() {
        let board = Board::new();
        assert_eq!(
            board.labels(),
            vec!["1", "2", "3", "4", "5", "6", "7", "8", "9"]
        );
        assert_eq!(board.turn(), Mark::X);
        assert_eq!(board.winner(), None);
        assert_eq!(board.moves(), 0);
    }

    #[test]
    fn test_move_flips_turn() {
        let mut board = Board::new();
        assert!(board.apply_move("5"));
        assert_eq!(board.labels()[4], "X");
        assert_eq!(board.turn(), Mark::O);
        assert_eq!(board.moves(), 1);

        assert!(board.apply_move("1"));
        assert_eq!(board.labels()[0], "O");
        assert_eq!(board.turn(), Mark::X);
    }

    /// Taken cells must never be overwritten or flip the turn
    #[test]
    fn test_occupied_cell() {
        let mut board = play(&["5"]);
        assert!(!board.apply_move("5"));
        assert_eq!(board.labels()[4], "X");
        assert_eq!(board.turn(), Mark::O);
        assert_eq!(board.moves(), 1);
    }

    #[test]
    fn test_invalid_labels() {
        let mut board = Board::new();
        for label in ["0", "10", "", "a", "05", " 5", "-1", "X"] {
            assert!(!board.apply_move(label), "Label {label:?} should be rejected");
        }
        assert_eq!(board.moves(), 0);
        assert_eq!(board.turn(), Mark::X);
    }

    /// Every winning line should produce the mark occupying it and lock the board
    #[test]
    fn test_all_lines() {
        // Moves for X on each line with O filling non-winning cells
        let games: [(&[&str], &str); 8] = [
            (&["1", "4", "2", "5", "3"], "X"),
            (&["4", "1", "5", "2", "6"], "X"),
            (&["7", "1", "8", "2", "9"], "X"),
            (&["1", "2", "4", "3", "7"], "X"),
            (&["2", "1", "5", "3", "8"], "X"),
            (&["3", "1", "6", "2", "9"], "X"),
            (&["1", "2", "5", "3", "9"], "X"),
            (&["3", "1", "5", "2", "7"], "X"),
        ];

        for (moves, expected) in games {
            let mut board = play(moves);
            let winner = board.winner().expect("Game should have a winner");
            assert_eq!(winner.as_str(), expected, "Moves: {moves:?}");

            // Nothing further may be played
            let labels = board.labels();
            let turn = board.turn();
            for cell in 1..=9 {
                assert!(!board.apply_move(&cell.to_string()));
            }
            assert_eq!(board.labels(), labels);
            assert_eq!(board.turn(), turn);
        }
    }

    #[test]
    fn test_o_wins() {
        let board = play(&["1", "3", "2", "5", "9", "7"]);
        assert_eq!(board.winner(), Some(Winner::Mark(Mark::O)));
    }

    #[test]
    fn test_tie() {
        // X O X / X O O / O X X
        let board = play(&["1", "2", "3", "5", "4", "6", "8", "7", "9"]);
        assert_eq!(board.winner(), Some(Winner::Tie));
        assert_eq!(board.moves(), 9);
    }

    /// A line completed on the final move is a win rather than a tie
    #[test]
    fn test_win_on_last_move() {
        // X O X / O O X / O X X
        let board = play(&["1", "2", "3", "4", "6", "5", "8", "7", "9"]);
        assert_eq!(board.winner(), Some(Winner::Mark(Mark::X)));
    }
}
