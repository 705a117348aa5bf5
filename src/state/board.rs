//! Board state and win detection.
//!
//! The board is a square grid of cells, each empty or owned by a player
//! address. Win detection is a pure scan over the board: any row, column,
//! or either main diagonal fully owned by one player is a win.

/// A single board cell: empty or the owning player's address.
pub type Cell = Option<String>;

/// Grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Check if position is within a grid of the given size.
    pub fn is_within(&self, size: usize) -> bool {
        self.row < size && self.col < size
    }
}

/// Square game board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Vec<Cell>>,
}

impl Board {
    /// Create an empty board of `size` x `size` cells.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![vec![None; size]; size],
        }
    }

    /// Grid size (number of rows/columns).
    pub fn size(&self) -> usize {
        self.size
    }

    /// Get the cell at a position, if in bounds.
    pub fn cell(&self, pos: Position) -> Option<&Cell> {
        if pos.is_within(self.size) {
            Some(&self.cells[pos.row][pos.col])
        } else {
            None
        }
    }

    /// Check if a cell is in bounds and unoccupied.
    pub fn is_vacant(&self, pos: Position) -> bool {
        matches!(self.cell(pos), Some(None))
    }

    /// Write an owner into a cell. Caller must have checked vacancy.
    pub(crate) fn occupy(&mut self, pos: Position, owner: &str) {
        self.cells[pos.row][pos.col] = Some(owner.to_string());
    }

    /// Count occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|c| c.is_some())
            .count()
    }

    /// Scan the board for a winning line.
    ///
    /// Checks, in fixed order: every row, every column, the main diagonal
    /// (top-left to bottom-right), the anti-diagonal (top-right to
    /// bottom-left). A line wins when all `size` cells hold the same
    /// address. Returns the first winner found under that scan order.
    pub fn find_winner(&self) -> Option<&str> {
        let n = self.size;

        for row in 0..n {
            if let Some(owner) = self.line_owner((0..n).map(|col| (row, col))) {
                return Some(owner);
            }
        }

        for col in 0..n {
            if let Some(owner) = self.line_owner((0..n).map(|row| (row, col))) {
                return Some(owner);
            }
        }

        if let Some(owner) = self.line_owner((0..n).map(|i| (i, i))) {
            return Some(owner);
        }

        self.line_owner((0..n).map(|i| (i, n - 1 - i)))
    }

    /// Owner of a line, if every cell on it is occupied by the same address.
    fn line_owner(&self, mut line: impl Iterator<Item = (usize, usize)>) -> Option<&str> {
        let (row, col) = line.next()?;
        let first = self.cells[row][col].as_deref()?;

        if line.all(|(r, c)| self.cells[r][c].as_deref() == Some(first)) {
            Some(first)
        } else {
            None
        }
    }

    /// Convert to JSON: nested arrays, empty cells as null.
    pub fn to_json(&self) -> serde_json::Value {
        let rows: Vec<serde_json::Value> = self
            .cells
            .iter()
            .map(|row| serde_json::json!(row))
            .collect();
        serde_json::Value::Array(rows)
    }
}
