//! # Editor session
//!
//! [`EditorSession`] owns every piece of editor state and is the one place edits enter through, either as
//! pointer events or as a [`Command`]. Each discrete edit that changes frames ends with exactly one history
//! snapshot.

use std::time::Duration;

use crate::{
    clipboard::Clipboard,
    color::Color,
    commands::{Command, CommandError, NoOp},
    history::{HistoryManager, MAX_UNDO_STEPS},
    io::sheet::{self, Raster},
    pen_tools::{StrokeEnd, Tool, ToolState},
    playback::{Playback, DEFAULT_FPS},
    sequencer::{FilmStrip, FrameSequencer},
    state::{
        grid::Cell,
        store::{AnimationStore, CanvasSize, MAX_FRAMES},
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub struct SessionConfig {
    pub canvas_size: CanvasSize,
    /// Number of frame slots.
    pub capacity: usize,
    pub max_undo_steps: usize,
    pub fps: u32,
    pub thumbs_per_page: usize,
}
impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            canvas_size: CanvasSize::DEFAULT,
            capacity: MAX_FRAMES,
            max_undo_steps: MAX_UNDO_STEPS,
            fps: DEFAULT_FPS,
            thumbs_per_page: 8,
        }
    }
}

#[allow(clippy::module_name_repetitions)]
pub struct EditorSession {
    store: AnimationStore,
    history: HistoryManager,
    clipboard: Clipboard,
    strip: FilmStrip,
    playback: Playback,
    tools: ToolState,
    color: Color,
}
impl EditorSession {
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        let store = AnimationStore::new(config.canvas_size, config.capacity);
        let history = HistoryManager::new(&store, config.max_undo_steps);
        log::debug!(
            "New session: {} canvas, {} frame slots, {} undo steps",
            store.canvas_size(),
            store.capacity(),
            history.max_undo_steps()
        );
        Self {
            store,
            history,
            clipboard: Clipboard::default(),
            strip: FilmStrip::new(config.thumbs_per_page),
            playback: Playback::new(config.fps),
            tools: ToolState::default(),
            color: Color::BLACK,
        }
    }
    #[must_use]
    pub fn store(&self) -> &AnimationStore {
        &self.store
    }
    #[must_use]
    pub fn history(&self) -> &HistoryManager {
        &self.history
    }
    #[must_use]
    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }
    #[must_use]
    pub fn film_strip(&self) -> &FilmStrip {
        &self.strip
    }
    #[must_use]
    pub fn playback(&self) -> &Playback {
        &self.playback
    }
    #[must_use]
    pub fn tools(&self) -> &ToolState {
        &self.tools
    }
    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }
    fn sequencer(&mut self) -> FrameSequencer<'_, &mut HistoryManager> {
        FrameSequencer::new(&mut self.history, &mut self.store, &mut self.strip)
    }
    /// Record a finished stroke, if it changed anything.
    fn commit_stroke(&mut self, end: StrokeEnd) {
        if end.changed > 0 {
            log::trace!("{} stroke changed {} cells", end.tool, end.changed);
            self.history.snapshot(&self.store);
        }
    }
    /// End a stroke left open, so a following edit can't interleave with it.
    fn interrupt_stroke(&mut self) {
        if let Some(end) = self.tools.cancel() {
            log::debug!("Interrupted {} stroke", end.tool);
            self.commit_stroke(end);
        }
    }

    /// Pointer went down on `cell` of the current frame. Returns the number of cells changed.
    pub fn press(&mut self, cell: Cell) -> usize {
        self.tools
            .press(self.store.current_frame_mut(), cell, self.color)
    }
    /// Pointer moved while down.
    pub fn drag(&mut self, cell: Cell) -> usize {
        self.tools
            .drag(self.store.current_frame_mut(), cell, self.color)
    }
    /// Pointer released. A stroke that changed anything becomes one undo step.
    pub fn release(&mut self, cell: Cell) -> Option<StrokeEnd> {
        let end = self
            .tools
            .release(self.store.current_frame_mut(), cell, self.color)?;
        self.commit_stroke(end);
        Some(end)
    }
    /// Advance the preview clock. Returns the new preview frame if it stepped.
    pub fn tick(&mut self, elapsed: Duration) -> Option<usize> {
        self.playback.tick(elapsed, self.store.active_count())
    }

    /// Perform a command. A command that fails leaves the session as it was, a stroke in progress included.
    pub fn apply(&mut self, command: Command) -> Result<(), CommandError> {
        let result = self.dispatch(command);
        match &result {
            Ok(()) => log::trace!("{command:?}"),
            Err(CommandError::NoOp(noop)) => log::info!("{command:?}: {noop}"),
            Err(err) => log::warn!("{command:?} failed: {err}"),
        }
        result
    }
    /// Why `command` would fail right now. Checked before an open stroke is closed on its behalf.
    fn refusal(&self, command: Command) -> Option<CommandError> {
        let store = &self.store;
        let pending = self.tools.pending_changes();
        let noop = match command {
            Command::Undo if pending == 0 && !self.history.can_undo() => NoOp::NothingToUndo,
            // Committing painted cells would discard the redo steps.
            Command::Redo if pending > 0 || !self.history.can_redo() => NoOp::NothingToRedo,
            Command::JumpToFrame(index) if index >= store.active_count() => {
                NoOp::NoSuchFrame(index)
            }
            Command::InsertFrame | Command::DuplicateFrame
                if store.active_count() >= store.capacity() =>
            {
                NoOp::CapacityReached(store.capacity())
            }
            Command::DeleteFrame if store.active_count() <= 1 => NoOp::LastFrame,
            Command::SetTotalFrames(count)
                if count.clamp(1, store.capacity()) == store.active_count() =>
            {
                NoOp::Unchanged
            }
            Command::Paste if !self.clipboard.fits(store.current_frame()) => NoOp::ClipboardEmpty,
            Command::ResizeCanvas(side) => return CanvasSize::new(side).err().map(Into::into),
            _ => return None,
        };
        Some(noop.into())
    }
    fn dispatch(&mut self, command: Command) -> Result<(), CommandError> {
        if let Some(err) = self.refusal(command) {
            return Err(err);
        }
        // Commands that don't look at frames may happen mid-stroke.
        if !matches!(
            command,
            Command::SetColor(_) | Command::SetFps(_) | Command::NextPage | Command::PreviousPage
        ) {
            self.interrupt_stroke();
        }
        match command {
            Command::Undo => {
                self.history.undo(&mut self.store)?;
                self.strip.ensure_visible(self.store.current_index());
            }
            Command::Redo => {
                self.history.redo(&mut self.store)?;
                self.strip.ensure_visible(self.store.current_index());
            }
            Command::NextFrame => self.sequencer().next(),
            Command::PreviousFrame => self.sequencer().previous(),
            Command::JumpToFrame(index) => self.sequencer().jump_to(index)?,
            Command::NextPage => self.sequencer().next_page(),
            Command::PreviousPage => self.sequencer().previous_page(),
            Command::InsertFrame => self.sequencer().insert_after_current()?,
            Command::DuplicateFrame => self.sequencer().duplicate_current()?,
            Command::DeleteFrame => self.sequencer().delete_current()?,
            Command::SetTotalFrames(count) => self.sequencer().set_total_frames(count)?,
            Command::Copy => self.clipboard.copy(self.store.current_frame()),
            Command::Paste => {
                self.clipboard.paste_into(self.store.current_frame_mut())?;
                self.history.snapshot(&self.store);
            }
            Command::ResizeCanvas(side) => self.resize_canvas(side)?,
            Command::SetTool(tool) => self.set_tool(tool),
            Command::SetColor(color) => self.color = color,
            Command::SetFps(fps) => {
                let used = self.playback.set_fps(fps);
                if used != fps {
                    log::debug!("Requested {fps} fps, clamped to {used}");
                }
            }
        }
        Ok(())
    }
    fn set_tool(&mut self, tool: Tool) {
        if let Some(end) = self.tools.set_tool(tool) {
            self.commit_stroke(end);
        }
    }
    /// Start over at a new resolution. History and clipboard are dropped, as none of it fits anymore.
    fn resize_canvas(&mut self, side: u32) -> Result<(), CommandError> {
        self.store.resize_canvas(side)?;
        self.history.reset(&self.store);
        self.clipboard.clear();
        self.strip.ensure_visible(0);
        Ok(())
    }

    /// Replace the animation with the frames of a sprite sheet. Returns the number of frames loaded.
    ///
    /// The import is one undoable edit. A sheet that doesn't validate changes nothing.
    pub fn import_sheet(&mut self, raster: &Raster) -> Result<usize, CommandError> {
        self.interrupt_stroke();
        let frames = sheet::decode(raster, self.store.canvas_size(), self.store.capacity())
            .inspect_err(|err| log::warn!("Rejected sprite sheet: {err}"))?;
        let count = frames.len();
        self.store.adopt_frames(frames);
        self.strip.ensure_visible(0);
        self.history.snapshot(&self.store);
        log::info!("Imported {count} frames");
        Ok(count)
    }
    /// Encode every active frame as a sprite sheet.
    #[must_use]
    pub fn export_sheet(&self) -> Raster {
        sheet::encode(&self.store)
    }
}
impl Default for EditorSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

#[cfg(test)]
mod test {
    use super::{EditorSession, SessionConfig};
    use crate::{
        color::Color,
        commands::{Command, CommandError, NoOp},
        io::sheet::{Raster, SheetError},
        pen_tools::Tool,
        state::{grid::Cell, store::CanvasSize},
    };
    use std::time::Duration;

    fn tiny(capacity: usize) -> EditorSession {
        EditorSession::new(SessionConfig {
            canvas_size: CanvasSize::arbitrary(2),
            capacity,
            ..SessionConfig::default()
        })
    }
    fn dot(session: &mut EditorSession, col: i32, row: i32) {
        let cell = Cell::new(col, row);
        session.press(cell);
        session.release(cell);
    }

    #[test]
    fn duplicate_export_undo() {
        let mut session = tiny(3);
        dot(&mut session, 0, 0);
        session.apply(Command::DuplicateFrame).unwrap();

        let store = session.store();
        assert_eq!(store.active_count(), 2);
        assert_eq!(store.current_index(), 1);
        assert_eq!(store.frame(0), store.frame(1));

        let sheet = session.export_sheet();
        assert_eq!((sheet.width(), sheet.height()), (4, 2));
        for y in 0..2 {
            for x in 0..4 {
                let expected = if y == 0 && (x == 0 || x == 2) {
                    Color::BLACK
                } else {
                    Color::WHITE
                };
                assert_eq!(sheet.get(x, y), Some(expected), "pixel {x},{y}");
            }
        }

        session.apply(Command::Undo).unwrap();
        assert_eq!(session.store().active_count(), 1);
        assert_eq!(session.store().current_index(), 0);
        assert_eq!(session.store().frame(0).unwrap().get(Cell::new(0, 0)), Some(Color::BLACK));
        assert!(session.store().dormant_are_blank());
    }
    #[test]
    fn undo_redo_inverse() {
        let mut session = tiny(4);
        let baseline = session.store().clone();
        dot(&mut session, 1, 1);
        session.apply(Command::InsertFrame).unwrap();
        dot(&mut session, 0, 1);
        let edited = session.store().clone();

        for _ in 0..3 {
            session.apply(Command::Undo).unwrap();
        }
        assert_eq!(session.store(), &baseline);
        assert_eq!(
            session.apply(Command::Undo),
            Err(CommandError::NoOp(NoOp::NothingToUndo))
        );
        for _ in 0..3 {
            session.apply(Command::Redo).unwrap();
        }
        assert_eq!(session.store(), &edited);
        assert_eq!(
            session.apply(Command::Redo),
            Err(CommandError::NoOp(NoOp::NothingToRedo))
        );
    }
    #[test]
    fn undo_redo_after_navigating() {
        let mut session = tiny(3);
        session.apply(Command::InsertFrame).unwrap();
        session.apply(Command::JumpToFrame(0)).unwrap();
        dot(&mut session, 0, 0);
        session.apply(Command::JumpToFrame(1)).unwrap();
        let pre_undo = session.store().clone();

        session.apply(Command::Undo).unwrap();
        // Frames go back, the selection stays put.
        assert_eq!(session.store().current_index(), 1);
        assert!(session.store().frame(0).unwrap().is_blank());
        session.apply(Command::Redo).unwrap();
        assert_eq!(session.store(), &pre_undo);
    }
    #[test]
    fn new_edit_discards_redo() {
        let mut session = tiny(4);
        dot(&mut session, 0, 0);
        session.apply(Command::Undo).unwrap();
        assert!(session.history().can_redo());
        dot(&mut session, 1, 0);
        assert!(!session.history().can_redo());
    }
    #[test]
    fn repainting_same_color_is_not_a_step() {
        let mut session = tiny(2);
        dot(&mut session, 0, 0);
        let steps = session.history().undo_steps();
        dot(&mut session, 0, 0);
        assert_eq!(session.history().undo_steps(), steps);
    }
    #[test]
    fn rectangle_stroke_is_one_step() {
        let mut session = EditorSession::default();
        session.apply(Command::SetTool(Tool::Rectangle)).unwrap();
        session.press(Cell::new(2, 2));
        session.drag(Cell::new(5, 3));
        // Color change mid-drag doesn't interrupt.
        session.apply(Command::SetColor(Color::opaque(255, 0, 0))).unwrap();
        assert!(session.tools().is_drawing());
        let end = session.release(Cell::new(4, 4)).unwrap();
        assert_eq!(end.changed, 9);
        assert_eq!(session.history().undo_steps(), 1);
        assert_eq!(
            session.store().current_frame().get(Cell::new(3, 3)),
            Some(Color::opaque(255, 0, 0))
        );
    }
    #[test]
    fn structural_command_ends_stroke() {
        let mut session = tiny(3);
        session.press(Cell::new(0, 0));
        session.drag(Cell::new(1, 0));
        session.apply(Command::InsertFrame).unwrap();
        assert!(!session.tools().is_drawing());
        // Stroke and insert are separate steps.
        assert_eq!(session.history().undo_steps(), 2);
        // Release after the interruption does nothing.
        assert!(session.release(Cell::new(1, 1)).is_none());
        assert!(session.store().current_frame().is_blank());
    }
    #[test]
    fn failed_command_keeps_stroke() {
        let mut session = tiny(2);
        session.press(Cell::new(0, 0));
        session.drag(Cell::new(1, 0));
        assert_eq!(
            session.apply(Command::DeleteFrame),
            Err(CommandError::NoOp(NoOp::LastFrame))
        );
        assert!(session.apply(Command::ResizeCanvas(20)).is_err());
        assert!(session.apply(Command::Paste).is_err());
        assert!(session.tools().is_drawing());
        assert!(!session.history().can_undo());

        let end = session.release(Cell::new(1, 0)).unwrap();
        assert_eq!(end.changed, 2);
        assert_eq!(session.history().undo_steps(), 1);
    }
    #[test]
    fn redo_refused_mid_stroke() {
        let mut session = tiny(2);
        dot(&mut session, 0, 0);
        session.apply(Command::Undo).unwrap();
        session.press(Cell::new(1, 1));
        assert_eq!(
            session.apply(Command::Redo),
            Err(CommandError::NoOp(NoOp::NothingToRedo))
        );
        assert!(session.tools().is_drawing());
        assert!(session.history().can_redo());
    }
    #[test]
    fn copy_paste() {
        let mut session = tiny(3);
        assert_eq!(
            session.apply(Command::Paste),
            Err(CommandError::NoOp(NoOp::ClipboardEmpty))
        );
        dot(&mut session, 1, 0);
        session.apply(Command::Copy).unwrap();
        session.apply(Command::InsertFrame).unwrap();
        session.apply(Command::Paste).unwrap();
        assert_eq!(session.store().frame(0), session.store().frame(1));
        // Copy, insert and paste - copy isn't a step.
        assert_eq!(session.history().undo_steps(), 3);
        session.apply(Command::Undo).unwrap();
        assert!(session.store().current_frame().is_blank());
    }
    #[test]
    fn resize_resets_everything() {
        let mut session = EditorSession::default();
        dot(&mut session, 3, 3);
        session.apply(Command::Copy).unwrap();
        session.apply(Command::InsertFrame).unwrap();

        session.apply(Command::ResizeCanvas(16)).unwrap();
        let store = session.store();
        assert_eq!(store.canvas_size().get(), 16);
        assert_eq!(store.active_count(), 1);
        assert!(store.current_frame().is_blank());
        assert!(!session.history().can_undo());
        assert!(session.clipboard().is_empty());

        assert_eq!(
            session.apply(Command::ResizeCanvas(20)),
            Err(CommandError::InvalidArgument(
                crate::state::store::InvalidCanvasSize(20)
            ))
        );
        assert_eq!(session.store().canvas_size().get(), 16);
    }
    #[test]
    fn import_is_undoable() {
        let mut session = tiny(4);
        dot(&mut session, 0, 0);
        let before = session.store().clone();

        let mut other = tiny(4);
        other.apply(Command::SetTotalFrames(3)).unwrap();
        other.apply(Command::JumpToFrame(2)).unwrap();
        for (col, row) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            dot(&mut other, col, row);
        }
        let sheet = other.export_sheet();

        assert_eq!(session.import_sheet(&sheet), Ok(3));
        assert_eq!(session.store().active_count(), 3);
        assert_eq!(session.store().current_index(), 0);
        assert_eq!(session.store().frame(2), other.store().frame(2));
        assert_eq!(
            session.store().frame(2).unwrap().get(Cell::new(1, 1)),
            Some(Color::BLACK)
        );

        session.apply(Command::Undo).unwrap();
        assert_eq!(session.store(), &before);
    }
    #[test]
    fn bad_import_changes_nothing() {
        let mut session = tiny(2);
        dot(&mut session, 1, 1);
        let before = session.store().clone();
        let steps = session.history().undo_steps();
        assert_eq!(
            session.import_sheet(&Raster::new(6, 2, Color::WHITE)),
            Err(CommandError::Format(SheetError::TooManyFrames {
                capacity: 2,
                found: 3
            }))
        );
        assert_eq!(session.store(), &before);
        assert_eq!(session.history().undo_steps(), steps);
    }
    #[test]
    fn playback_follows_frame_count() {
        let mut session = tiny(4);
        session.apply(Command::SetFps(10)).unwrap();
        session.apply(Command::SetTotalFrames(2)).unwrap();
        let frame = Duration::from_millis(101);
        assert_eq!(session.tick(frame), Some(1));
        assert_eq!(session.tick(frame), Some(0));
        session.apply(Command::SetFps(0)).unwrap();
        assert_eq!(session.playback().fps(), 1);
    }
    #[test]
    fn noop_commands_leave_history() {
        let mut session = tiny(2);
        assert_eq!(
            session.apply(Command::DeleteFrame),
            Err(CommandError::NoOp(NoOp::LastFrame))
        );
        assert_eq!(
            session.apply(Command::SetTotalFrames(1)),
            Err(CommandError::NoOp(NoOp::Unchanged))
        );
        assert!(session.apply(Command::JumpToFrame(1)).unwrap_err().is_soft());
        assert!(!session.history().can_undo());
    }
}
