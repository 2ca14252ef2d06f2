//! # History
//!
//! Snapshot-based undo/redo. A [`Snapshot`] is a full, independent copy of every frame slot plus the frame
//! cursor, taken once at the end of each discrete edit. The undo stack's top is always the present state, so
//! there is always a baseline entry and undoing needs at least two.
//!
//! Navigation takes no snapshot. Undo restores frames but keeps the live selection where it can, and the redo
//! entry is captured at the moment of undoing, so an undo followed by a redo is always the identity.
//!
//! Taking a new snapshot discards the redo stack - history is linear, there are no branches.

use std::collections::VecDeque;

use crate::{
    commands::NoOp,
    state::{grid::PixelGrid, store::AnimationStore},
};

/// Default bound on the undo stack.
pub const MAX_UNDO_STEPS: usize = 64;

/// Any type which can record the state of the store after an edit.
pub trait SnapshotWrite {
    fn snapshot(&mut self, store: &AnimationStore);
}
impl<Write> SnapshotWrite for &mut Write
where
    Write: SnapshotWrite,
{
    fn snapshot(&mut self, store: &AnimationStore) {
        (**self).snapshot(store);
    }
}

/// Deep copy of all frame slots at one point in time.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Snapshot {
    frames: Box<[PixelGrid]>,
    active_count: usize,
    current_index: usize,
}
impl Snapshot {
    #[must_use]
    pub fn capture(store: &AnimationStore) -> Self {
        Self {
            frames: store.slots().into(),
            active_count: store.active_count(),
            current_index: store.current_index(),
        }
    }
    /// Overwrite the whole store, dormant slots included, with this snapshot.
    pub fn restore(&self, store: &mut AnimationStore) {
        let active_count = self.restore_frames(store);
        store.set_current_index(self.current_index.min(active_count - 1));
    }
    /// Overwrite every slot and the frame count, keeping the store's selection if it's still in range.
    /// Returns the restored frame count.
    pub fn restore_frames(&self, store: &mut AnimationStore) -> usize {
        let slots = store.slots_mut();
        // Capacity is fixed for a store's lifetime, so a mismatch means a foreign snapshot.
        if slots.len() != self.frames.len() {
            log::warn!(
                "Restoring snapshot of {} slots into a store of {}",
                self.frames.len(),
                slots.len()
            );
        }
        for (slot, frame) in slots.iter_mut().zip(self.frames.iter()) {
            slot.copy_from(frame);
        }
        let active_count = self.active_count.clamp(1, store.capacity());
        // Shrink the selection first, the store never points past its frames.
        store.set_current_index(store.current_index().min(active_count - 1));
        store.set_active_count(active_count);
        active_count
    }
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active_count
    }
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }
    /// The frames that were active when captured.
    #[must_use]
    pub fn frames(&self) -> &[PixelGrid] {
        &self.frames[..self.active_count.min(self.frames.len())]
    }
}

#[derive(Clone, Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct HistoryManager {
    /// Oldest first. Back is the present.
    undo: VecDeque<Snapshot>,
    /// Most recently undone last.
    redo: Vec<Snapshot>,
    max_undo_steps: usize,
}
impl HistoryManager {
    /// Create a history with a baseline of the store's current state.
    /// `max_undo_steps` is raised to at least one, the baseline.
    #[must_use]
    pub fn new(store: &AnimationStore, max_undo_steps: usize) -> Self {
        let mut new = Self {
            undo: VecDeque::new(),
            redo: Vec::new(),
            max_undo_steps: max_undo_steps.max(1),
        };
        new.reset(store);
        new
    }
    /// Forget everything, making the store's current state the new baseline.
    pub fn reset(&mut self, store: &AnimationStore) {
        self.undo.clear();
        self.redo.clear();
        self.undo.push_back(Snapshot::capture(store));
    }
    /// Record the store's state as a new step. Discards any redo steps, and the oldest undo step if full.
    pub fn snapshot(&mut self, store: &AnimationStore) {
        self.redo.clear();
        self.undo.push_back(Snapshot::capture(store));
        while self.undo.len() > self.max_undo_steps {
            self.undo.pop_front();
            log::trace!("History full, evicted oldest snapshot");
        }
        log::trace!("Snapshot taken, {} undo steps", self.undo.len());
    }
    /// Step back one edit.
    pub fn undo(&mut self, store: &mut AnimationStore) -> Result<(), NoOp> {
        if self.undo.len() < 2 {
            return Err(NoOp::NothingToUndo);
        }
        self.undo.pop_back();
        // The store may have moved on from the recorded present by navigating.
        self.redo.push(Snapshot::capture(store));
        if let Some(previous) = self.undo.back() {
            previous.restore_frames(store);
        }
        Ok(())
    }
    /// Step forward one undone edit.
    pub fn redo(&mut self, store: &mut AnimationStore) -> Result<(), NoOp> {
        let next = self.redo.pop().ok_or(NoOp::NothingToRedo)?;
        next.restore(store);
        self.undo.push_back(next);
        Ok(())
    }
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.undo.len() >= 2
    }
    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }
    /// Number of steps that can be undone.
    #[must_use]
    pub fn undo_steps(&self) -> usize {
        self.undo.len().saturating_sub(1)
    }
    #[must_use]
    pub fn redo_steps(&self) -> usize {
        self.redo.len()
    }
    #[must_use]
    pub fn max_undo_steps(&self) -> usize {
        self.max_undo_steps
    }
    /// The snapshot representing the present, as far as history knows.
    #[must_use]
    pub fn present(&self) -> Option<&Snapshot> {
        self.undo.back()
    }
}
impl SnapshotWrite for HistoryManager {
    fn snapshot(&mut self, store: &AnimationStore) {
        HistoryManager::snapshot(self, store);
    }
}

#[cfg(test)]
mod test {
    use super::{HistoryManager, Snapshot};
    use crate::{
        color::Color,
        commands::NoOp,
        editor::set_pixel,
        state::{
            grid::Cell,
            store::{AnimationStore, CanvasSize},
        },
    };
    fn store() -> AnimationStore {
        AnimationStore::new(CanvasSize::arbitrary(4), 3)
    }
    fn paint(store: &mut AnimationStore, col: i32) {
        set_pixel(store.current_frame_mut(), Cell::new(col, 0), Color::BLACK);
    }
    #[test]
    fn baseline_cant_be_undone() {
        let mut store = store();
        let mut history = HistoryManager::new(&store, 8);
        assert!(!history.can_undo());
        assert_eq!(history.undo(&mut store), Err(NoOp::NothingToUndo));
        assert_eq!(history.redo(&mut store), Err(NoOp::NothingToRedo));
    }
    #[test]
    fn undo_restores_pre_edit() {
        let mut store = store();
        let mut history = HistoryManager::new(&store, 8);
        let before = store.clone();

        paint(&mut store, 0);
        history.snapshot(&store);
        let after = store.clone();

        history.undo(&mut store).unwrap();
        assert_eq!(store, before);
        history.redo(&mut store).unwrap();
        assert_eq!(store, after);
    }
    #[test]
    fn new_snapshot_discards_redo() {
        let mut store = store();
        let mut history = HistoryManager::new(&store, 8);
        paint(&mut store, 0);
        history.snapshot(&store);
        history.undo(&mut store).unwrap();
        assert!(history.can_redo());

        paint(&mut store, 1);
        history.snapshot(&store);
        assert!(!history.can_redo());
        assert_eq!(history.redo(&mut store), Err(NoOp::NothingToRedo));
    }
    #[test]
    fn evicts_oldest() {
        let mut store = store();
        let mut history = HistoryManager::new(&store, 3);
        for col in 0..4 {
            paint(&mut store, col);
            history.snapshot(&store);
        }
        // Baseline and first edit evicted.
        assert_eq!(history.undo_steps(), 2);
        history.undo(&mut store).unwrap();
        history.undo(&mut store).unwrap();
        assert_eq!(history.undo(&mut store), Err(NoOp::NothingToUndo));
        // Oldest surviving state has cols 0 and 1 painted.
        let frame = store.current_frame();
        assert_eq!(frame.get(Cell::new(1, 0)), Some(Color::BLACK));
        assert_eq!(frame.get(Cell::new(2, 0)), Some(Color::WHITE));
    }
    #[test]
    fn undo_keeps_selection() {
        let mut store = store();
        store.set_active_count(2);
        let mut history = HistoryManager::new(&store, 8);
        paint(&mut store, 0);
        history.snapshot(&store);
        store.set_current_index(1);
        let before_undo = store.clone();

        history.undo(&mut store).unwrap();
        assert_eq!(store.current_index(), 1);
        assert!(store.frame(0).unwrap().is_blank());
        history.redo(&mut store).unwrap();
        assert_eq!(store, before_undo);
    }
    #[test]
    fn snapshot_is_independent() {
        let mut store = store();
        let snapshot = Snapshot::capture(&store);
        paint(&mut store, 2);
        assert!(snapshot.frames()[0].is_blank());
        snapshot.restore(&mut store);
        assert!(store.current_frame().is_blank());
    }
}
