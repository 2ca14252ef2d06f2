//! # Frame editing
//!
//! Pixel and shape primitives applied to a single frame. Drawing never fails: cells outside the grid are
//! silently skipped. Every primitive reports how many cells actually changed color, which callers use to decide
//! whether an edit happened at all (and whether to play a feedback cue).

use crate::{
    color::Color,
    state::grid::{Cell, PixelGrid},
};

/// Set a single cell. Returns `true` if the cell changed - out-of-bounds cells and cells that already hold
/// `color` are left alone.
pub fn set_pixel(grid: &mut PixelGrid, cell: Cell, color: Color) -> bool {
    match grid.get_mut(cell) {
        Some(existing) if *existing != color => {
            *existing = color;
            true
        }
        _ => false,
    }
}

/// Draw an inclusive line between two cells. Returns the number of changed cells.
pub fn draw_line(grid: &mut PixelGrid, from: Cell, to: Cell, color: Color) -> usize {
    Line::new(from, to)
        .filter(|&cell| set_pixel(grid, cell, color))
        .count()
}

/// Fill the inclusive rectangle spanned by two opposite corners, given in any order. Clipped to the grid.
/// Returns the number of changed cells.
pub fn fill_rectangle(grid: &mut PixelGrid, a: Cell, b: Cell, color: Color) -> usize {
    let Some((min, max)) = clip_rectangle(grid.side(), a, b) else {
        return 0;
    };
    let mut changed = 0;
    for row in min.row..=max.row {
        for col in min.col..=max.col {
            changed += usize::from(set_pixel(grid, Cell::new(col, row), color));
        }
    }
    changed
}

/// Normalize two corners into `(min, max)`, inclusive.
#[must_use]
pub fn normalize_rectangle(a: Cell, b: Cell) -> (Cell, Cell) {
    (
        Cell::new(a.col.min(b.col), a.row.min(b.row)),
        Cell::new(a.col.max(b.col), a.row.max(b.row)),
    )
}

/// Normalize and clip a rectangle to a grid of the given side, or None if it lies entirely outside.
fn clip_rectangle(side: usize, a: Cell, b: Cell) -> Option<(Cell, Cell)> {
    let last = i32::try_from(side).unwrap_or(i32::MAX) - 1;
    let (min, max) = normalize_rectangle(a, b);
    if last < 0 || max.col < 0 || max.row < 0 || min.col > last || min.row > last {
        return None;
    }
    Some((
        Cell::new(min.col.max(0), min.row.max(0)),
        Cell::new(max.col.min(last), max.row.min(last)),
    ))
}

/// Integer Bresenham traversal from start to end, both inclusive. Works in every octant and yields exactly
/// `max(|dcol|, |drow|) + 1` cells.
#[derive(Clone, Debug)]
pub struct Line {
    cur: Cell,
    end: Cell,
    // Deltas and error term are widened so extreme coordinates can't overflow.
    dx: i64,
    dy: i64,
    step_col: i32,
    step_row: i32,
    err: i64,
    remaining: u64,
}
impl Line {
    #[must_use]
    pub fn new(from: Cell, to: Cell) -> Self {
        let dx = (i64::from(to.col) - i64::from(from.col)).abs();
        let dy = -(i64::from(to.row) - i64::from(from.row)).abs();
        Self {
            cur: from,
            end: to,
            dx,
            dy,
            step_col: if from.col < to.col { 1 } else { -1 },
            step_row: if from.row < to.row { 1 } else { -1 },
            err: dx + dy,
            remaining: dx.max(-dy).unsigned_abs() + 1,
        }
    }
}
impl Iterator for Line {
    type Item = Cell;
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let out = self.cur;
        if out == self.end {
            self.remaining = 0;
            return Some(out);
        }
        self.remaining -= 1;

        let e2 = 2 * self.err;
        if e2 >= self.dy {
            self.err += self.dy;
            self.cur.col += self.step_col;
        }
        if e2 <= self.dx {
            self.err += self.dx;
            self.cur.row += self.step_row;
        }
        Some(out)
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.remaining).unwrap_or(usize::MAX);
        (0, Some(remaining))
    }
}
impl std::iter::FusedIterator for Line {}
