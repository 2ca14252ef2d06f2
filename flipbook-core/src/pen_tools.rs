//! # Pen tools
//!
//! Translate a press/drag/release pointer sequence into frame edits. A stroke is one undoable edit: the
//! pencil paints as the pointer moves, the rectangle only touches the frame on release. Callers take a history
//! snapshot once a stroke finishes, never mid-drag.

use crate::{
    color::Color,
    editor,
    state::grid::{Cell, PixelGrid},
};

#[derive(
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Debug,
    Default,
    strum::EnumString,
    strum::AsRefStr,
    strum::Display,
)]
#[strum(serialize_all = "lowercase")]
pub enum Tool {
    /// Freehand, one cell wide.
    #[default]
    Pencil,
    /// Filled axis-aligned rectangle between press and release.
    Rectangle,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum Stroke {
    Pencil {
        last: Cell,
        /// Cells changed so far by this stroke.
        changed: usize,
    },
    Rectangle {
        start: Cell,
        corner: Cell,
    },
}

/// Outcome of a finished stroke.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct StrokeEnd {
    pub tool: Tool,
    /// Total cells changed by the whole stroke.
    pub changed: usize,
}

#[derive(Clone, Debug, Default)]
#[allow(clippy::module_name_repetitions)]
pub struct ToolState {
    tool: Tool,
    stroke: Option<Stroke>,
}
impl ToolState {
    #[must_use]
    pub fn new(tool: Tool) -> Self {
        Self { tool, stroke: None }
    }
    #[must_use]
    pub fn tool(&self) -> Tool {
        self.tool
    }
    /// Switch tools. A stroke in progress is cancelled first, see [`Self::cancel`].
    pub fn set_tool(&mut self, tool: Tool) -> Option<StrokeEnd> {
        let cancelled = self.cancel();
        self.tool = tool;
        cancelled
    }
    #[must_use]
    pub fn is_drawing(&self) -> bool {
        self.stroke.is_some()
    }
    /// Cells already changed by the stroke in progress. Only the pencil paints before release.
    #[must_use]
    pub fn pending_changes(&self) -> usize {
        match self.stroke {
            Some(Stroke::Pencil { changed, .. }) => changed,
            _ => 0,
        }
    }
    /// Begin a stroke. Presses outside the grid are ignored. Returns the number of changed cells.
    pub fn press(&mut self, grid: &mut PixelGrid, cell: Cell, color: Color) -> usize {
        if !grid.contains(cell) {
            return 0;
        }
        // A press without a release (pointer lost) restarts.
        if self.stroke.is_some() {
            log::debug!("Press during an active stroke, restarting");
        }
        match self.tool {
            Tool::Pencil => {
                let changed = usize::from(editor::set_pixel(grid, cell, color));
                let prior = match self.stroke {
                    Some(Stroke::Pencil { changed, .. }) => changed,
                    _ => 0,
                };
                self.stroke = Some(Stroke::Pencil {
                    last: cell,
                    changed: prior + changed,
                });
                changed
            }
            Tool::Rectangle => {
                self.stroke = Some(Stroke::Rectangle {
                    start: cell,
                    corner: cell,
                });
                0
            }
        }
    }
    /// Continue a stroke. Ignored outside the grid or with no stroke. Returns the number of changed cells.
    pub fn drag(&mut self, grid: &mut PixelGrid, cell: Cell, color: Color) -> usize {
        if !grid.contains(cell) {
            return 0;
        }
        match &mut self.stroke {
            Some(Stroke::Pencil { last, changed }) => {
                if *last == cell {
                    return 0;
                }
                let new = editor::draw_line(grid, *last, cell, color);
                *last = cell;
                *changed += new;
                new
            }
            Some(Stroke::Rectangle { corner, .. }) => {
                *corner = cell;
                0
            }
            None => 0,
        }
    }
    /// Finish a stroke. A release outside the grid is clamped to its edge.
    /// Returns None if no stroke was in progress.
    pub fn release(&mut self, grid: &mut PixelGrid, cell: Cell, color: Color) -> Option<StrokeEnd> {
        let end = match self.stroke.take()? {
            Stroke::Pencil { changed, .. } => StrokeEnd {
                tool: Tool::Pencil,
                changed,
            },
            Stroke::Rectangle { start, .. } => {
                let corner = grid.clamp(cell);
                StrokeEnd {
                    tool: Tool::Rectangle,
                    changed: editor::fill_rectangle(grid, start, corner, color),
                }
            }
        };
        Some(end)
    }
    /// Abandon a stroke without applying anything further. Pencil cells already painted stay painted,
    /// so a cancelled pencil stroke still reports its changes.
    pub fn cancel(&mut self) -> Option<StrokeEnd> {
        match self.stroke.take()? {
            Stroke::Pencil { changed, .. } => Some(StrokeEnd {
                tool: Tool::Pencil,
                changed,
            }),
            Stroke::Rectangle { .. } => Some(StrokeEnd {
                tool: Tool::Rectangle,
                changed: 0,
            }),
        }
    }
    /// The normalized `(min, max)` rectangle being dragged out, for an overlay.
    #[must_use]
    pub fn preview(&self) -> Option<(Cell, Cell)> {
        match self.stroke? {
            Stroke::Rectangle { start, corner } => Some(editor::normalize_rectangle(start, corner)),
            Stroke::Pencil { .. } => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::{StrokeEnd, Tool, ToolState};
    use crate::{
        color::Color,
        state::grid::{Cell, PixelGrid},
    };
    #[test]
    fn pencil_paints_while_dragging() {
        let mut grid = PixelGrid::blank(8);
        let mut tools = ToolState::new(Tool::Pencil);
        assert_eq!(tools.press(&mut grid, Cell::new(0, 0), Color::BLACK), 1);
        assert_eq!(tools.drag(&mut grid, Cell::new(3, 0), Color::BLACK), 3);
        // Same cell - nothing new.
        assert_eq!(tools.drag(&mut grid, Cell::new(3, 0), Color::BLACK), 0);
        assert_eq!(tools.drag(&mut grid, Cell::new(3, 2), Color::BLACK), 2);
        assert!(tools.preview().is_none());
        assert_eq!(tools.pending_changes(), 6);

        let end = tools.release(&mut grid, Cell::new(3, 2), Color::BLACK);
        assert_eq!(
            end,
            Some(StrokeEnd {
                tool: Tool::Pencil,
                changed: 6
            })
        );
        assert!(!tools.is_drawing());
        assert_eq!(tools.release(&mut grid, Cell::new(3, 2), Color::BLACK), None);
    }
    #[test]
    fn rectangle_applies_on_release() {
        let mut grid = PixelGrid::blank(8);
        let mut tools = ToolState::new(Tool::Rectangle);
        tools.press(&mut grid, Cell::new(5, 5), Color::BLACK);
        tools.drag(&mut grid, Cell::new(2, 3), Color::BLACK);
        assert!(grid.is_blank());
        assert_eq!(tools.pending_changes(), 0);
        assert_eq!(tools.preview(), Some((Cell::new(2, 3), Cell::new(5, 5))));

        // Released off the grid - clamped to the far corner.
        let end = tools.release(&mut grid, Cell::new(20, -4), Color::BLACK).unwrap();
        // Cols 5..=7, rows 0..=5
        assert_eq!(end.changed, 18);
        assert_eq!(grid.get(Cell::new(7, 0)), Some(Color::BLACK));
        assert_eq!(grid.get(Cell::new(4, 0)), Some(Color::WHITE));
    }
    #[test]
    fn outside_press_and_drag_ignored() {
        let mut grid = PixelGrid::blank(4);
        let mut tools = ToolState::default();
        assert_eq!(tools.press(&mut grid, Cell::new(-1, 0), Color::BLACK), 0);
        assert!(!tools.is_drawing());

        tools.press(&mut grid, Cell::new(0, 0), Color::BLACK);
        assert_eq!(tools.drag(&mut grid, Cell::new(9, 9), Color::BLACK), 0);
        assert_eq!(tools.drag(&mut grid, Cell::new(0, 3), Color::BLACK), 3);
    }
    #[test]
    fn switching_tools_cancels() {
        let mut grid = PixelGrid::blank(4);
        let mut tools = ToolState::new(Tool::Rectangle);
        tools.press(&mut grid, Cell::new(0, 0), Color::BLACK);
        let cancelled = tools.set_tool(Tool::Pencil);
        assert_eq!(
            cancelled,
            Some(StrokeEnd {
                tool: Tool::Rectangle,
                changed: 0
            })
        );
        assert_eq!(tools.tool(), Tool::Pencil);
        assert!(grid.is_blank());
    }
    #[test]
    fn tool_names() {
        assert_eq!("rectangle".parse::<Tool>(), Ok(Tool::Rectangle));
        assert_eq!(Tool::Pencil.as_ref(), "pencil");
        assert!("brush".parse::<Tool>().is_err());
    }
}
