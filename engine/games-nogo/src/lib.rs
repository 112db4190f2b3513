//! NoGo rules for a 9x9 board.
//!
//! NoGo is a Go variant in which capturing is forbidden: a placement that
//! would remove any group's last liberty — the opponent's or the placing
//! player's own — is illegal. The player whose turn it is with no legal
//! placement loses. There is no scoring phase.
//!
//! This crate is the rules oracle consumed by the search crate: it answers
//! "is this placement legal?" and applies legal placements to a board. It
//! knows nothing about agents or search.
//!
//! # Board Layout
//!
//! The board is stored in row-major order:
//!
//! ```text
//! Row 0: [ 0][ 1][ 2][ 3][ 4][ 5][ 6][ 7][ 8]
//! Row 1: [ 9][10][11][12][13][14][15][16][17]
//!  ...
//! Row 8: [72][73][74][75][76][77][78][79][80]
//!         Col 0   1   2   3   4   5   6   7   8
//! ```

use std::fmt;

use thiserror::Error;

/// Board dimensions.
pub const ROWS: usize = 9;
pub const COLS: usize = 9;
pub const BOARD_SIZE: usize = ROWS * COLS; // 81

/// Contents of a board cell. `Empty` only ever appears as a cell value;
/// it is never a side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Empty,
    Black,
    White,
}

impl Color {
    /// The opposing stone color. `Empty` has no opponent and maps to itself.
    #[inline]
    pub fn opposite(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
            Color::Empty => Color::Empty,
        }
    }

    /// Whether this is an actual stone color (Black or White).
    #[inline]
    pub fn is_stone(self) -> bool {
        !matches!(self, Color::Empty)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Empty => write!(f, "empty"),
            Color::Black => write!(f, "black"),
            Color::White => write!(f, "white"),
        }
    }
}

/// A candidate stone placement: a cell index in `[0, 81)` and the color to
/// place there. Legality depends on both — the same cell can be legal for
/// one side and illegal for the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    index: u8,
    color: Color,
}

impl Placement {
    /// Create a placement at a flat cell index.
    #[inline]
    pub fn new(index: u8, color: Color) -> Self {
        Self { index, color }
    }

    /// Create a placement at (row, col).
    #[inline]
    pub fn at(row: usize, col: usize, color: Color) -> Self {
        Self {
            index: (row * COLS + col) as u8,
            color,
        }
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index as usize
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn row(&self) -> usize {
        self.index as usize / COLS
    }

    #[inline]
    pub fn col(&self) -> usize {
        self.index as usize % COLS
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.color {
            Color::Black => 'B',
            Color::White => 'W',
            Color::Empty => '?',
        };
        write!(f, "{}({},{})", tag, self.row(), self.col())
    }
}

/// Outcome of applying a placement to a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveResult {
    Legal,
    Illegal,
}

/// Errors from parsing a textual board diagram.
#[derive(Debug, Error)]
pub enum BoardParseError {
    #[error("row {row} has {len} cells, expected 9")]
    WrongRowLength { row: usize, len: usize },

    #[error("unexpected cell character {ch:?} at row {row}, col {col}")]
    BadCell { ch: char, row: usize, col: usize },
}

/// A 9x9 NoGo board. Small and `Copy`: search code clones boards freely to
/// test candidate placements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [Color; BOARD_SIZE],
}

impl Board {
    /// An empty board.
    pub fn new() -> Self {
        Self {
            cells: [Color::Empty; BOARD_SIZE],
        }
    }

    /// Parse a board from 9 rows of 9 characters: `.` empty, `x` black,
    /// `o` white. Intended for building test positions.
    pub fn from_rows(rows: [&str; ROWS]) -> Result<Self, BoardParseError> {
        let mut board = Board::new();
        for (row, line) in rows.iter().enumerate() {
            let len = line.chars().count();
            if len != COLS {
                return Err(BoardParseError::WrongRowLength { row, len });
            }
            for (col, ch) in line.chars().enumerate() {
                board.cells[row * COLS + col] = match ch {
                    '.' => Color::Empty,
                    'x' => Color::Black,
                    'o' => Color::White,
                    ch => return Err(BoardParseError::BadCell { ch, row, col }),
                };
            }
        }
        Ok(board)
    }

    /// Cell contents at (row, col).
    #[inline]
    pub fn cell(&self, row: usize, col: usize) -> Color {
        self.cells[row * COLS + col]
    }

    /// Cell contents at a flat index.
    #[inline]
    pub fn cell_at(&self, index: usize) -> Color {
        self.cells[index]
    }

    /// Number of stones on the board (81 minus empties). This is the game
    /// phase used by time management.
    pub fn stones_placed(&self) -> usize {
        self.cells.iter().filter(|c| c.is_stone()).count()
    }

    /// Whether `placement` is legal on this board: the cell is empty, the
    /// placed stone's group keeps at least one liberty (no suicide), and no
    /// adjacent opposing group is left without liberties (no capture).
    pub fn is_legal(&self, placement: Placement) -> bool {
        let index = placement.index();
        let color = placement.color();
        if !color.is_stone() || index >= BOARD_SIZE {
            return false;
        }
        if self.cells[index] != Color::Empty {
            return false;
        }

        let mut after = *self;
        after.cells[index] = color;

        if !after.group_has_liberty(index) {
            return false;
        }
        for neighbor in neighbors(index) {
            if after.cells[neighbor] == color.opposite() && !after.group_has_liberty(neighbor) {
                return false;
            }
        }
        true
    }

    /// Apply a placement. The board is mutated only when the placement is
    /// legal; on `Illegal` it is left untouched.
    pub fn apply(&mut self, placement: Placement) -> MoveResult {
        if self.is_legal(placement) {
            self.cells[placement.index()] = placement.color();
            MoveResult::Legal
        } else {
            MoveResult::Illegal
        }
    }

    /// All legal placements for `color`, in cell-index order.
    pub fn legal_moves(&self, color: Color) -> Vec<Placement> {
        (0..BOARD_SIZE as u8)
            .map(|i| Placement::new(i, color))
            .filter(|p| self.is_legal(*p))
            .collect()
    }

    /// Whether `color` has at least one legal placement.
    pub fn has_legal_move(&self, color: Color) -> bool {
        (0..BOARD_SIZE as u8).any(|i| self.is_legal(Placement::new(i, color)))
    }

    /// Whether the group containing `start` has at least one liberty.
    /// Flood fill over same-colored stones, stopping at the first adjacent
    /// empty cell.
    fn group_has_liberty(&self, start: usize) -> bool {
        let color = self.cells[start];
        debug_assert!(color.is_stone());

        let mut visited = [false; BOARD_SIZE];
        let mut stack = vec![start];
        visited[start] = true;

        while let Some(index) = stack.pop() {
            for neighbor in neighbors(index) {
                match self.cells[neighbor] {
                    Color::Empty => return true,
                    c if c == color && !visited[neighbor] => {
                        visited[neighbor] = true;
                        stack.push(neighbor);
                    }
                    _ => {}
                }
            }
        }
        false
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..ROWS {
            for col in 0..COLS {
                let ch = match self.cell(row, col) {
                    Color::Empty => '.',
                    Color::Black => 'x',
                    Color::White => 'o',
                };
                write!(f, "{}", ch)?;
            }
            if row + 1 < ROWS {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Orthogonal neighbors of a cell index.
fn neighbors(index: usize) -> impl Iterator<Item = usize> {
    let row = index / COLS;
    let col = index % COLS;
    [
        (row > 0).then(|| index - COLS),
        (row + 1 < ROWS).then(|| index + COLS),
        (col > 0).then(|| index - 1),
        (col + 1 < COLS).then(|| index + 1),
    ]
    .into_iter()
    .flatten()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board() {
        let board = Board::new();
        assert_eq!(board.stones_placed(), 0);
        for i in 0..BOARD_SIZE {
            assert_eq!(board.cell_at(i), Color::Empty);
        }
    }

    #[test]
    fn test_every_opening_move_is_legal() {
        let board = Board::new();
        for color in [Color::Black, Color::White] {
            let legal = board.legal_moves(color);
            assert_eq!(legal.len(), BOARD_SIZE, "all 81 cells open for {}", color);
        }
    }

    #[test]
    fn test_apply_places_stone_and_flips_nothing_else() {
        let mut board = Board::new();
        let result = board.apply(Placement::at(4, 4, Color::Black));
        assert_eq!(result, MoveResult::Legal);
        assert_eq!(board.cell(4, 4), Color::Black);
        assert_eq!(board.stones_placed(), 1);
    }

    #[test]
    fn test_occupied_cell_is_illegal() {
        let mut board = Board::new();
        board.apply(Placement::at(4, 4, Color::Black));

        let before = board;
        assert_eq!(board.apply(Placement::at(4, 4, Color::White)), MoveResult::Illegal);
        assert_eq!(board.apply(Placement::at(4, 4, Color::Black)), MoveResult::Illegal);
        assert_eq!(board, before, "illegal apply must not mutate the board");
    }

    #[test]
    fn test_empty_color_is_never_legal() {
        let board = Board::new();
        assert!(!board.is_legal(Placement::at(0, 0, Color::Empty)));
    }

    #[test]
    fn test_suicide_in_corner_is_illegal() {
        // White holds both liberties of the corner; a black stone there
        // would have no liberty of its own.
        let board = Board::from_rows([
            ".oooooooo",
            "ooooooooo",
            "ooooooooo",
            "ooooooooo",
            "ooooooooo",
            "ooooooooo",
            "ooooooooo",
            "ooooooooo",
            "oooooooo.",
        ])
        .unwrap();

        assert!(!board.is_legal(Placement::at(0, 0, Color::Black)));
        // The same cell is fine for white: it joins the surrounding group,
        // which keeps its other liberty.
        assert!(board.is_legal(Placement::at(0, 0, Color::White)));
    }

    #[test]
    fn test_capture_is_illegal_for_both_sides() {
        // A lone white stone at (0,0) with a single liberty at (0,1).
        // Black filling that liberty would capture it; in NoGo that is
        // illegal. White filling it is fine (the joined group keeps
        // liberties).
        let board = Board::from_rows([
            "o........",
            "x........",
            ".........",
            ".........",
            ".........",
            ".........",
            ".........",
            ".........",
            ".........",
        ])
        .unwrap();

        assert!(!board.is_legal(Placement::at(0, 1, Color::Black)));
        assert!(board.is_legal(Placement::at(0, 1, Color::White)));
    }

    #[test]
    fn test_self_capture_of_own_group_is_illegal() {
        // Black group with one liberty at (1,1); black playing there would
        // fill its own group's last liberty.
        let board = Board::from_rows([
            "xxo......",
            "x.o......",
            "xxo......",
            "ooo......",
            ".........",
            ".........",
            ".........",
            ".........",
            ".........",
        ])
        .unwrap();

        assert!(!board.is_legal(Placement::at(1, 1, Color::Black)));
        // White there would capture the black group: also illegal.
        assert!(!board.is_legal(Placement::at(1, 1, Color::White)));
    }

    #[test]
    fn test_legality_depends_on_color_not_just_cell() {
        // (4,5) is the last liberty of the enclosed white stone at (5,5):
        // playing there is a capture for black, while white may fill it
        // (the joined pair keeps a liberty at (4,4)). Black's only legal
        // move on this board is (4,4).
        let board = Board::from_rows([
            "ooooooooo",
            "ooooooooo",
            "ooooooooo",
            "ooooooooo",
            "oooo..ooo",
            "ooooxoxoo",
            "ooooxxxoo",
            "ooooooooo",
            "ooooooooo",
        ])
        .unwrap();

        assert!(!board.is_legal(Placement::at(4, 5, Color::Black)));
        assert!(board.is_legal(Placement::at(4, 4, Color::Black)));
        assert_eq!(board.legal_moves(Color::Black), vec![Placement::at(4, 4, Color::Black)]);
    }

    #[test]
    fn test_no_legal_move_position() {
        // All white except two one-point eyes: black cannot play anywhere.
        let board = Board::from_rows([
            ".oooooooo",
            "ooooooooo",
            "ooooooooo",
            "ooooooooo",
            "ooooooooo",
            "ooooooooo",
            "ooooooooo",
            "ooooooooo",
            "oooooooo.",
        ])
        .unwrap();

        assert!(!board.has_legal_move(Color::Black));
        assert!(board.legal_moves(Color::Black).is_empty());
        assert!(board.has_legal_move(Color::White));
    }

    #[test]
    fn test_group_liberties_through_connections() {
        // A black chain snaking along row 0 stays legal to extend as long
        // as the chain has an outside liberty.
        let mut board = Board::new();
        for col in 0..8 {
            assert_eq!(
                board.apply(Placement::at(0, col, Color::Black)),
                MoveResult::Legal,
                "extension at col {} should be legal",
                col
            );
        }
        assert_eq!(board.stones_placed(), 8);
    }

    #[test]
    fn test_from_rows_rejects_bad_input() {
        let short = Board::from_rows([
            "....", ".........", ".........", ".........", ".........",
            ".........", ".........", ".........", ".........",
        ]);
        assert!(matches!(short, Err(BoardParseError::WrongRowLength { row: 0, len: 4 })));

        let bad = Board::from_rows([
            "....?....", ".........", ".........", ".........", ".........",
            ".........", ".........", ".........", ".........",
        ]);
        assert!(matches!(bad, Err(BoardParseError::BadCell { ch: '?', .. })));
    }

    #[test]
    fn test_display_roundtrip() {
        let rows = [
            "x.o......",
            ".........",
            "....x....",
            ".........",
            ".........",
            ".........",
            "......o..",
            ".........",
            ".........",
        ];
        let board = Board::from_rows(rows).unwrap();
        let printed = board.to_string();
        assert_eq!(printed.lines().collect::<Vec<_>>(), rows);
    }

    #[test]
    fn test_placement_accessors() {
        let p = Placement::at(4, 7, Color::White);
        assert_eq!(p.index(), 43);
        assert_eq!(p.row(), 4);
        assert_eq!(p.col(), 7);
        assert_eq!(p.color(), Color::White);
        assert_eq!(Placement::new(43, Color::White), p);
    }
}
