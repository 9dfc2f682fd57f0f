//! Board module - manages the game grid
//!
//! The board is a 12x24 grid that includes its own border: columns 0 and 11
//! are walls and row 23 is the floor. Border cells are sentinels written once at
//! construction and never changed; collision checks treat them like any other
//! non-empty cell, so pieces never need explicit bounds checks.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..11 (left to right), y ranges 0..23 (top to bottom)

use arrayvec::ArrayVec;

use crate::error::GameError;
use crate::types::{
    CellState, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, COMPACTION_BOUNDARY, INTERIOR_WIDTH,
};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// Lowest interior row (just above the floor)
const BOTTOM_ROW: usize = HEIGHT - 2;

/// Result of one compaction pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GroomReport {
    /// Number of full rows removed
    pub rows_cleared: u32,
    /// Points earned: 1 for the first row, 2 for the second, and so on
    pub points: u32,
}

/// The game board - 12 columns x 24 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [CellState; BOARD_SIZE],
}

impl Board {
    /// Create a new board with empty interior and border sentinels in place
    pub fn new() -> Self {
        let mut board = Self {
            cells: [CellState::Empty; BOARD_SIZE],
        };
        board.reset();
        board
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    /// Sentinel (or `Empty`) that belongs at (x, y) on a fresh board
    fn border_state(x: usize, y: usize) -> CellState {
        if y == HEIGHT - 1 {
            CellState::Floor
        } else if x == 0 || x == WIDTH - 1 {
            CellState::Wall
        } else {
            CellState::Empty
        }
    }

    /// Whether (x, y) is a wall or floor position
    pub fn is_border(x: i8, y: i8) -> bool {
        match Self::index(x, y) {
            Some(_) => Self::border_state(x as usize, y as usize).is_sentinel(),
            None => false,
        }
    }

    /// Get width of the board (walls included)
    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    /// Get height of the board (floor included)
    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Number of playable columns
    pub fn interior_width(&self) -> usize {
        INTERIOR_WIDTH as usize
    }

    /// Get the state of cell (x, y)
    pub fn cell(&self, x: i8, y: i8) -> Result<CellState, GameError> {
        Self::index(x, y)
            .map(|idx| self.cells[idx])
            .ok_or(GameError::OutOfBounds { x, y })
    }

    /// Set an interior cell.
    ///
    /// Border cells and sentinel values are rejected; the board is left
    /// untouched in that case.
    pub fn set_cell(&mut self, x: i8, y: i8, state: CellState) -> Result<(), GameError> {
        let idx = Self::index(x, y).ok_or(GameError::OutOfBounds { x, y })?;
        if Self::is_border(x, y) {
            return Err(GameError::BorderCell { x, y });
        }
        if state.is_sentinel() {
            return Err(GameError::SentinelWrite { x, y });
        }
        self.cells[idx] = state;
        Ok(())
    }

    /// Check if (x, y) is empty. Walls, floor, occupied and out-of-bounds
    /// cells all block.
    #[inline]
    pub fn is_free(&self, x: i8, y: i8) -> bool {
        matches!(self.cell(x, y), Ok(CellState::Empty))
    }

    /// Count empty interior cells in row `y` (0 for rows outside the board)
    pub fn count_empty_in_row(&self, y: i8) -> usize {
        if y < 0 || y >= BOARD_HEIGHT as i8 {
            return 0;
        }
        self.interior_row(y as usize)
            .iter()
            .filter(|cell| cell.is_empty())
            .count()
    }

    /// Interior slice of a row (walls excluded)
    fn interior_row(&self, y: usize) -> &[CellState] {
        let start = y * WIDTH + 1;
        &self.cells[start..start + INTERIOR_WIDTH as usize]
    }

    /// Check if a row has no empty interior cell
    pub fn is_row_full(&self, y: usize) -> bool {
        y < HEIGHT - 1 && self.interior_row(y).iter().all(|cell| !cell.is_empty())
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[CellState]> {
        self.cells.chunks_exact(WIDTH)
    }

    /// Clear the interior and re-assert the border. Idempotent.
    pub fn reset(&mut self) {
        for y in 0..HEIGHT {
            for x in 0..WIDTH {
                self.cells[y * WIDTH + x] = Self::border_state(x, y);
            }
        }
    }

    /// Write a committed piece into the board.
    ///
    /// Every target is validated before anything is written, so a rejected
    /// commit leaves the board unchanged.
    pub fn commit(&mut self, cells: &[(i8, i8)], kind: PieceKind) -> Result<(), GameError> {
        let mut targets: ArrayVec<usize, 4> = ArrayVec::new();
        for &(x, y) in cells.iter().take(4) {
            let idx = Self::index(x, y).ok_or(GameError::OutOfBounds { x, y })?;
            if Self::is_border(x, y) {
                return Err(GameError::BorderCell { x, y });
            }
            targets.push(idx);
        }

        for idx in targets {
            self.cells[idx] = CellState::Occupied(kind);
        }
        Ok(())
    }

    /// Row compaction, run once after every commit.
    ///
    /// Scans from the bottom interior row up to just below the compaction
    /// boundary. While the scanned row is full, every row above it (down to
    /// the boundary) moves down by one and the same row is checked again, so
    /// stacked full rows cascade one at a time. The boundary row is copied
    /// down but not cleared. Each clear in the pass is worth one point more
    /// than the previous one.
    ///
    /// Rows holding a copy of the boundary row are never cleared, so a full
    /// boundary row cannot keep the cascade going or score on its own.
    pub fn groom(&mut self) -> GroomReport {
        let boundary = COMPACTION_BOUNDARY as usize;
        let mut report = GroomReport::default();
        let mut bonus = 1;
        // Every shift writes one more copy of the boundary row at the top of
        // the well: rows `boundary + 1..=boundary + copies` are copies.
        let mut copies = 0;

        for y in (boundary + 1..=BOTTOM_ROW).rev() {
            if y <= boundary + copies {
                break;
            }
            while y > boundary + copies && self.is_row_full(y) {
                self.shift_down_into(y, boundary);
                copies += 1;
                report.rows_cleared += 1;
                report.points += bonus;
                bonus += 1;
            }
        }

        report
    }

    /// Move rows `boundary..y` down by one so that row `y` is overwritten.
    fn shift_down_into(&mut self, y: usize, boundary: usize) {
        for row in (boundary + 1..=y).rev() {
            let src_start = (row - 1) * WIDTH + 1;
            let dst_start = row * WIDTH + 1;
            self.cells
                .copy_within(src_start..src_start + INTERIOR_WIDTH as usize, dst_start);
        }
    }

    /// Fill every interior cell of a row (for tests)
    #[cfg(test)]
    pub fn fill_row(&mut self, y: i8, kind: PieceKind) {
        for x in 1..=INTERIOR_WIDTH as i8 {
            self.set_cell(x, y, CellState::Occupied(kind)).unwrap();
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(11, 0), Some(11));
        assert_eq!(Board::index(0, 1), Some(12));
        assert_eq!(Board::index(11, 23), Some(287));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(12, 0), None);
        assert_eq!(Board::index(0, 24), None);
    }

    #[test]
    fn test_border_layout() {
        let board = Board::new();
        assert_eq!(board.cell(0, 5), Ok(CellState::Wall));
        assert_eq!(board.cell(11, 5), Ok(CellState::Wall));
        assert_eq!(board.cell(5, 23), Ok(CellState::Floor));
        // Floor wins over wall in the bottom corners.
        assert_eq!(board.cell(0, 23), Ok(CellState::Floor));
        assert_eq!(board.cell(11, 23), Ok(CellState::Floor));
        assert_eq!(board.cell(5, 5), Ok(CellState::Empty));
    }

    #[test]
    fn test_commit_rejects_border_without_partial_write() {
        let mut board = Board::new();
        let before = board.clone();
        let result = board.commit(&[(1, 5), (2, 5), (0, 5), (3, 5)], PieceKind::T);
        assert_eq!(result, Err(GameError::BorderCell { x: 0, y: 5 }));
        assert_eq!(board, before);
    }

    #[test]
    fn test_single_full_row_scores_one() {
        let mut board = Board::new();
        board.fill_row(22, PieceKind::I);
        board.set_cell(3, 21, CellState::Occupied(PieceKind::O)).unwrap();

        let report = board.groom();
        assert_eq!(report, GroomReport { rows_cleared: 1, points: 1 });

        // Row 21 moved down into row 22.
        assert_eq!(board.cell(3, 22), Ok(CellState::Occupied(PieceKind::O)));
        assert_eq!(board.count_empty_in_row(22), 9);
        assert_eq!(board.count_empty_in_row(21), 10);
    }

    #[test]
    fn test_stacked_rows_cascade_with_growing_bonus() {
        let mut board = Board::new();
        board.fill_row(22, PieceKind::I);
        board.fill_row(21, PieceKind::I);
        board.fill_row(20, PieceKind::I);

        let report = board.groom();
        assert_eq!(report.rows_cleared, 3);
        assert_eq!(report.points, 1 + 2 + 3);
        assert_eq!(board.count_empty_in_row(22), 10);
    }

    #[test]
    fn test_separated_rows_share_one_bonus_sequence() {
        let mut board = Board::new();
        board.fill_row(22, PieceKind::I);
        board.set_cell(1, 21, CellState::Occupied(PieceKind::J)).unwrap();
        board.fill_row(20, PieceKind::I);

        let report = board.groom();
        assert_eq!(report.rows_cleared, 2);
        assert_eq!(report.points, 3);
        assert_eq!(board.cell(1, 22), Ok(CellState::Occupied(PieceKind::J)));
        assert_eq!(board.count_empty_in_row(21), 10);
    }

    #[test]
    fn test_spawn_zone_is_never_compacted() {
        let mut board = Board::new();
        board.fill_row(3, PieceKind::L);
        let report = board.groom();
        assert_eq!(report, GroomReport::default());
        assert_eq!(board.count_empty_in_row(3), 0);
    }

    #[test]
    fn test_boundary_row_is_copied_down_not_cleared() {
        let mut board = Board::new();
        board.set_cell(2, 4, CellState::Occupied(PieceKind::S)).unwrap();
        board.fill_row(22, PieceKind::I);

        board.groom();
        assert_eq!(board.cell(2, 4), Ok(CellState::Occupied(PieceKind::S)));
        assert_eq!(board.cell(2, 5), Ok(CellState::Occupied(PieceKind::S)));
    }

    #[test]
    fn test_full_boundary_row_clears_each_row_once() {
        let mut board = Board::new();
        for y in 4..=22 {
            board.fill_row(y, PieceKind::Z);
        }
        // Rows 5..=22 are cleared once each; the copies of row 4 that replace
        // them are not.
        let report = board.groom();
        assert_eq!(report, GroomReport { rows_cleared: 18, points: 171 });
        assert_eq!(board.count_empty_in_row(22), 0);
    }

    #[test]
    fn test_boundary_copy_does_not_score() {
        let mut board = Board::new();
        board.fill_row(4, PieceKind::T);
        board.fill_row(22, PieceKind::I);

        // Row 22 clears; row 5 then holds a full copy of row 4 and stays.
        let report = board.groom();
        assert_eq!(report, GroomReport { rows_cleared: 1, points: 1 });
        assert_eq!(board.count_empty_in_row(5), 0);
        assert_eq!(board.count_empty_in_row(22), 10);
    }

    #[test]
    fn test_rows_walk_top_to_bottom() {
        let board = Board::new();
        let rows: Vec<&[CellState]> = board.rows().collect();
        assert_eq!(rows.len(), HEIGHT);
        assert!(rows.iter().all(|row| row.len() == WIDTH));
        assert_eq!(rows[0][0], CellState::Wall);
        assert!(rows[HEIGHT - 1].iter().all(|&cell| cell == CellState::Floor));
    }
}
