//! User-facing actions, the things a hotkey can be bound to.

pub mod hotkeys;

use flipbook_core::{pen_tools::Tool, Color, Command, EditorSession};

#[derive(
    serde::Serialize,
    serde::Deserialize,
    strum::AsRefStr,
    strum::EnumString,
    PartialEq,
    Eq,
    Hash,
    Clone,
    Copy,
    Debug,
)]
pub enum Action {
    Undo,
    Redo,

    NextFrame,
    PreviousFrame,
    NextPage,
    PreviousPage,

    InsertFrame,
    DuplicateFrame,
    DeleteFrame,

    Copy,
    Paste,

    Pencil,
    Rectangle,
    /// Draw in black.
    Ink,
    /// Draw in white, the blank color.
    Erase,

    FpsUp,
    FpsDown,

    /// Write the sprite sheet. Not a session command, handled by the front end.
    Save,
}
impl Action {
    /// The command this action performs right now. Some depend on the session, e.g. nudging the frame rate.
    /// `None` for actions that aren't session commands.
    #[must_use]
    pub fn command(self, session: &EditorSession) -> Option<Command> {
        let fps = session.playback().fps();
        Some(match self {
            Self::Undo => Command::Undo,
            Self::Redo => Command::Redo,
            Self::NextFrame => Command::NextFrame,
            Self::PreviousFrame => Command::PreviousFrame,
            Self::NextPage => Command::NextPage,
            Self::PreviousPage => Command::PreviousPage,
            Self::InsertFrame => Command::InsertFrame,
            Self::DuplicateFrame => Command::DuplicateFrame,
            Self::DeleteFrame => Command::DeleteFrame,
            Self::Copy => Command::Copy,
            Self::Paste => Command::Paste,
            Self::Pencil => Command::SetTool(Tool::Pencil),
            Self::Rectangle => Command::SetTool(Tool::Rectangle),
            Self::Ink => Command::SetColor(Color::BLACK),
            Self::Erase => Command::SetColor(Color::WHITE),
            Self::FpsUp => Command::SetFps(fps.saturating_add(1)),
            Self::FpsDown => Command::SetFps(fps.saturating_sub(1)),
            Self::Save => return None,
        })
    }
}
