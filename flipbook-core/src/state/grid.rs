//! # Pixel grids
//!
//! A single frame's square color buffer, addressed by `(col, row)` from the top-left.

use crate::color::Color;

/// A cell coordinate within a grid. Signed, as pointer input and shape corners may fall outside the grid;
/// anything outside `[0, side)` is ignored by the drawing operations.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct Cell {
    pub col: i32,
    pub row: i32,
}
impl Cell {
    #[must_use]
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }
}
impl From<[i32; 2]> for Cell {
    fn from([col, row]: [i32; 2]) -> Self {
        Self { col, row }
    }
}

/// Square matrix of colors with side length `side`.
#[derive(Clone, PartialEq, Eq, Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct PixelGrid {
    side: usize,
    /// Row-major, `side * side` long.
    cells: Box<[Color]>,
}
impl PixelGrid {
    /// Create a grid with every cell set to `fill`.
    #[must_use]
    pub fn new(side: usize, fill: Color) -> Self {
        Self {
            side,
            cells: vec![fill; side * side].into_boxed_slice(),
        }
    }
    /// Create an all-white grid.
    #[must_use]
    pub fn blank(side: usize) -> Self {
        Self::new(side, Color::WHITE)
    }
    #[must_use]
    pub fn side(&self) -> usize {
        self.side
    }
    fn index(&self, cell: Cell) -> Option<usize> {
        let col = usize::try_from(cell.col).ok()?;
        let row = usize::try_from(cell.row).ok()?;
        (col < self.side && row < self.side).then_some(row * self.side + col)
    }
    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        self.index(cell).is_some()
    }
    /// Get the color at `cell`, or None if out of bounds.
    #[must_use]
    pub fn get(&self, cell: Cell) -> Option<Color> {
        self.index(cell).map(|idx| self.cells[idx])
    }
    pub fn get_mut(&mut self, cell: Cell) -> Option<&mut Color> {
        let idx = self.index(cell)?;
        Some(&mut self.cells[idx])
    }
    /// Clamp a cell into the grid's bounds.
    #[must_use]
    pub fn clamp(&self, cell: Cell) -> Cell {
        let max = i32::try_from(self.side.saturating_sub(1)).unwrap_or(i32::MAX);
        Cell::new(cell.col.clamp(0, max), cell.row.clamp(0, max))
    }
    pub fn fill(&mut self, color: Color) {
        self.cells.fill(color);
    }
    /// Reset to all-white.
    pub fn clear(&mut self) {
        self.fill(Color::WHITE);
    }
    /// True if every cell is white.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|&cell| cell == Color::WHITE)
    }
    /// Overwrite this grid with the contents of `other`, reusing the allocation when sizes match.
    pub fn copy_from(&mut self, other: &Self) {
        if self.side == other.side {
            self.cells.copy_from_slice(&other.cells);
        } else {
            *self = other.clone();
        }
    }
    /// Iterate over rows, top to bottom.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[Color]> + '_ {
        // `max(1)` keeps `chunks_exact` happy on a zero-sized grid, which has no cells anyway.
        self.cells.chunks_exact(self.side.max(1))
    }
    pub fn rows_mut(&mut self) -> impl ExactSizeIterator<Item = &mut [Color]> + '_ {
        self.cells.chunks_exact_mut(self.side.max(1))
    }
    /// All cells, row-major.
    #[must_use]
    pub fn as_slice(&self) -> &[Color] {
        &self.cells
    }
}
