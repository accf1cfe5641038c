//! Knight's Isolation for the isolation search engine
//!
//! Two players each own one piece on an 11x9 board. On its first turn a player
//! places its piece on any open square; afterwards the piece moves like a
//! chess knight. Every square a piece has stood on stays blocked for the rest
//! of the game. The side to move with no legal move loses.
//!
//! # Board Layout
//!
//! Cells are indexed row-major with row 0 at the top:
//! ```text
//! Row 0: [ 0][ 1][ 2] ... [10]
//! Row 1: [11][12][13] ... [21]
//!  ...
//! Row 8: [88][89][90] ... [98]
//!         Col 0  1  2      10
//! ```
//!
//! # Usage
//!
//! ```rust
//! use engine_core::GameState;
//! use games_isolation::Isolation;
//!
//! let start = Isolation::new();
//! assert_eq!(start.actions().len(), 99); // free placement
//!
//! let placed = start.result(&start.actions()[0]);
//! assert_eq!(placed.ply_count(), 1);
//! ```

use engine_core::{GameState, Mobility, PlayerId};

/// Board dimensions
pub const WIDTH: usize = 11;
pub const HEIGHT: usize = 9;
pub const BOARD_SIZE: usize = WIDTH * HEIGHT; // 99

/// Mask with one bit per on-board cell.
const FULL_BOARD: u128 = (1u128 << BOARD_SIZE) - 1;

/// Knight jumps as (column delta, row delta).
const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// A square on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell(pub u8);

impl Cell {
    /// Cell at `(col, row)`, or `None` when off the board.
    pub fn at(col: i32, row: i32) -> Option<Cell> {
        if (0..WIDTH as i32).contains(&col) && (0..HEIGHT as i32).contains(&row) {
            Some(Cell((row as usize * WIDTH + col as usize) as u8))
        } else {
            None
        }
    }

    #[inline]
    pub fn col(self) -> i32 {
        self.0 as i32 % WIDTH as i32
    }

    #[inline]
    pub fn row(self) -> i32 {
        self.0 as i32 / WIDTH as i32
    }

    #[inline]
    fn bit(self) -> u128 {
        1u128 << self.0
    }

    /// On-board squares one knight jump away, open or not.
    pub fn knight_neighbours(self) -> impl Iterator<Item = Cell> {
        let (col, row) = (self.col(), self.row());
        KNIGHT_OFFSETS
            .iter()
            .filter_map(move |&(dc, dr)| Cell::at(col + dc, row + dr))
    }
}

/// Isolation position
///
/// Holds the open squares, both piece locations and the ply counter. The side
/// to move is derived from the ply counter: the first player moves on even
/// plies.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Isolation {
    /// Bit set = square still open
    open: u128,
    /// Piece locations indexed by player id
    locs: [Option<Cell>; 2],
    /// Plies played so far
    ply_count: u32,
}

impl Isolation {
    /// Empty board, first player to move.
    pub fn new() -> Self {
        Self {
            open: FULL_BOARD,
            locs: [None, None],
            ply_count: 0,
        }
    }

    /// Empty board with the given squares pre-blocked.
    pub fn with_blocked(blocked: &[Cell]) -> Self {
        let mut state = Self::new();
        for cell in blocked {
            state.open &= !cell.bit();
        }
        state
    }

    /// Whether `cell` is still open.
    #[inline]
    pub fn is_open(&self, cell: Cell) -> bool {
        self.open & cell.bit() != 0
    }

    /// Number of open squares left.
    pub fn open_count(&self) -> u32 {
        self.open.count_ones()
    }

    /// Piece locations indexed by player id.
    pub fn locs(&self) -> [Option<Cell>; 2] {
        self.locs
    }

    /// Whether `cell` is a legal destination for the side to move.
    pub fn is_legal(&self, cell: Cell) -> bool {
        self.actions().contains(&cell)
    }

    fn open_cells(&self) -> Vec<Cell> {
        (0..BOARD_SIZE as u8)
            .map(Cell)
            .filter(|&c| self.is_open(c))
            .collect()
    }
}

impl Default for Isolation {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState for Isolation {
    type Action = Cell;

    fn actions(&self) -> Vec<Cell> {
        self.liberties(self.locs[self.player().index()])
    }

    fn result(&self, action: &Cell) -> Self {
        debug_assert!(self.is_legal(*action), "illegal move {:?}", action);

        let mut next = self.clone();
        next.open &= !action.bit();
        next.locs[self.player().index()] = Some(*action);
        next.ply_count += 1;
        next
    }

    fn terminal_test(&self) -> bool {
        self.mobility(self.player()) == 0
    }

    fn utility(&self, player: PlayerId) -> f32 {
        if !self.terminal_test() {
            0.0
        } else if player == self.player() {
            -1.0
        } else {
            1.0
        }
    }

    #[inline]
    fn player(&self) -> PlayerId {
        PlayerId((self.ply_count % 2) as u8)
    }

    #[inline]
    fn ply_count(&self) -> u32 {
        self.ply_count
    }
}

impl Mobility for Isolation {
    type Location = Cell;

    fn location(&self, player: PlayerId) -> Option<Cell> {
        self.locs[player.index()]
    }

    fn liberties(&self, location: Option<Cell>) -> Vec<Cell> {
        match location {
            None => self.open_cells(),
            Some(cell) => {
                let mut moves: Vec<Cell> = cell
                    .knight_neighbours()
                    .filter(|&c| self.is_open(c))
                    .collect();
                moves.sort_unstable();
                moves
            }
        }
    }
}

impl std::fmt::Display for Isolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..HEIGHT as i32 {
            for col in 0..WIDTH as i32 {
                let cell = Cell((row as usize * WIDTH + col as usize) as u8);
                let glyph = if self.locs[0] == Some(cell) {
                    '1'
                } else if self.locs[1] == Some(cell) {
                    '2'
                } else if self.is_open(cell) {
                    '.'
                } else {
                    '#'
                };
                write!(f, "{glyph}")?;
                if col + 1 < WIDTH as i32 {
                    write!(f, " ")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
