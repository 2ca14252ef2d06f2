//! Headless core of a sprite-sheet animation editor: a small stack of fixed-size pixel frames, drawn on with
//! simple pen tools, with snapshot undo and a horizontal sprite-sheet exchange format.

pub mod clipboard;
pub mod color;
pub mod commands;
pub mod editor;
pub mod history;
pub mod io;
pub mod pen_tools;
pub mod playback;
pub mod sequencer;
pub mod session;
pub mod state;

pub use color::Color;
pub use commands::{Command, CommandError, NoOp};
pub use session::{EditorSession, SessionConfig};
