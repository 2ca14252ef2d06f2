//! # Commands
//!
//! Every user intent that isn't pointer drawing is expressed as a [`Command`] and dispatched through
//! [`crate::session::EditorSession::apply`]. Failed commands never leave the session observably changed.

use crate::{
    color::Color, io::sheet::SheetError, pen_tools::Tool, state::store::InvalidCanvasSize,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Undo,
    Redo,
    NextFrame,
    PreviousFrame,
    /// Select a frame by index, scrolling the film strip to it.
    JumpToFrame(usize),
    NextPage,
    PreviousPage,
    /// Insert a blank frame after the current one.
    InsertFrame,
    DuplicateFrame,
    DeleteFrame,
    /// Grow or shrink the animation. Clamped to `[1, capacity]`.
    SetTotalFrames(usize),
    /// Copy the current frame into the clipboard.
    Copy,
    /// Overwrite the current frame with the clipboard.
    Paste,
    /// Change the canvas resolution. Discards every frame and all history!
    ResizeCanvas(u32),
    SetTool(Tool),
    SetColor(Color),
    SetFps(u32),
}

/// A command that was understood, but has nothing to act upon in the current state.
///
/// These are not failures - they're reported to the user, and state is left exactly as it was.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoOp {
    #[error("nothing to undo")]
    NothingToUndo,
    #[error("nothing to redo")]
    NothingToRedo,
    #[error("clipboard is empty")]
    ClipboardEmpty,
    #[error("all {0} frame slots are in use")]
    CapacityReached(usize),
    #[error("can't delete the only frame")]
    LastFrame,
    #[error("no frame at index {0}")]
    NoSuchFrame(usize),
    #[error("command makes no changes")]
    Unchanged,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub enum CommandError {
    #[error(transparent)]
    NoOp(#[from] NoOp),
    #[error(transparent)]
    InvalidArgument(#[from] InvalidCanvasSize),
    #[error("malformed sprite sheet: {0}")]
    Format(#[from] SheetError),
}
impl CommandError {
    /// Soft errors are status messages, not failures.
    #[must_use]
    pub fn is_soft(&self) -> bool {
        matches!(self, Self::NoOp(_))
    }
}
