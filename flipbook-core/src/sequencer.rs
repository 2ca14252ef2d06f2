//! # Frame sequencing
//!
//! Navigation and structural edits of the frame list, plus the paged film strip that browses it.
//!
//! Structural edits shuffle slots in place inside the store's fixed slot array and end with exactly one
//! history snapshot. Navigation never touches history.

use crate::{commands::NoOp, history::SnapshotWrite, state::store::AnimationStore};

/// Paged window of frame thumbnails. `thumbs_per_page` is decided by whoever lays the strip out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FilmStrip {
    /// Index of the first visible frame.
    frame_offset: usize,
    thumbs_per_page: usize,
}
impl FilmStrip {
    #[must_use]
    pub fn new(thumbs_per_page: usize) -> Self {
        Self {
            frame_offset: 0,
            thumbs_per_page: thumbs_per_page.max(1),
        }
    }
    /// How many thumbnails of `thumb` width, separated and preceded by `padding`, fit in `width`.
    #[must_use]
    pub fn thumbs_for_width(width: u32, thumb: u32, padding: u32) -> usize {
        let stride = thumb.saturating_add(padding).max(1);
        (width.saturating_sub(padding) / stride) as usize
    }
    #[must_use]
    pub fn frame_offset(&self) -> usize {
        self.frame_offset
    }
    #[must_use]
    pub fn thumbs_per_page(&self) -> usize {
        self.thumbs_per_page
    }
    /// Change the page size (e.g. after the layout changed), keeping `current` in view.
    pub fn set_thumbs_per_page(&mut self, thumbs_per_page: usize, current: usize) {
        self.thumbs_per_page = thumbs_per_page.max(1);
        self.ensure_visible(current);
    }
    /// Jump to the page containing `index`, if it isn't already visible.
    pub fn ensure_visible(&mut self, index: usize) {
        if index < self.frame_offset || index >= self.frame_offset + self.thumbs_per_page {
            self.frame_offset = index / self.thumbs_per_page * self.thumbs_per_page;
        }
    }
    /// Scroll forward one page, without scrolling past the last frame.
    pub fn next_page(&mut self, active_count: usize) {
        let last_page = active_count.saturating_sub(self.thumbs_per_page);
        self.frame_offset = (self.frame_offset + self.thumbs_per_page).min(last_page);
    }
    pub fn previous_page(&mut self) {
        self.frame_offset = self.frame_offset.saturating_sub(self.thumbs_per_page);
    }
    /// Indices of the frames currently shown.
    #[must_use]
    pub fn visible(&self, active_count: usize) -> std::ops::Range<usize> {
        let start = self.frame_offset.min(active_count);
        let end = (self.frame_offset + self.thumbs_per_page).min(active_count);
        start..end
    }
}
impl Default for FilmStrip {
    fn default() -> Self {
        Self::new(8)
    }
}

/// Borrowed view over the store and film strip, recording every structural edit into `Write`.
pub struct FrameSequencer<'a, Write> {
    history: Write,
    store: &'a mut AnimationStore,
    strip: &'a mut FilmStrip,
}
impl<Write> std::ops::Deref for FrameSequencer<'_, Write> {
    type Target = AnimationStore;
    fn deref(&self) -> &Self::Target {
        self.store
    }
}
impl<'a, Write: SnapshotWrite> FrameSequencer<'a, Write> {
    pub fn new(history: Write, store: &'a mut AnimationStore, strip: &'a mut FilmStrip) -> Self {
        Self {
            history,
            store,
            strip,
        }
    }
    fn select(&mut self, index: usize) {
        self.store.set_current_index(index);
        self.strip.ensure_visible(index);
    }
    /// Select the next frame, wrapping around.
    pub fn next(&mut self) {
        let count = self.store.active_count();
        if count == 0 {
            return;
        }
        self.select((self.store.current_index() + 1) % count);
    }
    /// Select the previous frame, wrapping around.
    pub fn previous(&mut self) {
        let count = self.store.active_count();
        if count == 0 {
            return;
        }
        self.select((self.store.current_index() + count - 1) % count);
    }
    pub fn jump_to(&mut self, index: usize) -> Result<(), NoOp> {
        if index >= self.store.active_count() {
            return Err(NoOp::NoSuchFrame(index));
        }
        self.select(index);
        Ok(())
    }
    pub fn next_page(&mut self) {
        self.strip.next_page(self.store.active_count());
    }
    pub fn previous_page(&mut self) {
        self.strip.previous_page();
    }
    /// Make room directly after the current frame by rotating the first dormant slot into place.
    /// Returns the index of the new slot, which is now active but not yet selected.
    fn open_slot_after_current(&mut self) -> Result<usize, NoOp> {
        let capacity = self.store.capacity();
        let active = self.store.active_count();
        if active >= capacity {
            return Err(NoOp::CapacityReached(capacity));
        }
        let at = self.store.current_index() + 1;
        // Slot `active` is the first dormant one, and it's blank.
        self.store.slots_mut()[at..=active].rotate_right(1);
        self.store.set_active_count(active + 1);
        Ok(at)
    }
    /// Insert a blank frame after the current one and select it.
    pub fn insert_after_current(&mut self) -> Result<(), NoOp> {
        let at = self.open_slot_after_current()?;
        self.store.slots_mut()[at].clear();
        self.select(at);
        self.history.snapshot(self.store);
        Ok(())
    }
    /// Insert a copy of the current frame after it and select the copy.
    pub fn duplicate_current(&mut self) -> Result<(), NoOp> {
        let at = self.open_slot_after_current()?;
        let (before, after) = self.store.slots_mut().split_at_mut(at);
        // Rotation started at `at`, so the source is still right before it.
        after[0].copy_from(&before[at - 1]);
        self.select(at);
        self.history.snapshot(self.store);
        Ok(())
    }
    /// Remove the current frame. The last remaining frame can't be deleted.
    pub fn delete_current(&mut self) -> Result<(), NoOp> {
        let active = self.store.active_count();
        if active <= 1 {
            return Err(NoOp::LastFrame);
        }
        let current = self.store.current_index();
        let slots = self.store.slots_mut();
        // Shift the tail down over the deleted frame, which lands in the freed slot.
        slots[current..active].rotate_left(1);
        slots[active - 1].clear();
        self.store.set_active_count(active - 1);
        self.select(current.min(active - 2));
        self.history.snapshot(self.store);
        Ok(())
    }
    /// Grow or shrink the animation to `count` frames, clamped to `[1, capacity]`.
    /// Frames that are activated or deactivated are blanked.
    pub fn set_total_frames(&mut self, count: usize) -> Result<(), NoOp> {
        let count = count.clamp(1, self.store.capacity());
        let active = self.store.active_count();
        if count == active {
            return Err(NoOp::Unchanged);
        }
        let changed = active.min(count)..active.max(count);
        for slot in &mut self.store.slots_mut()[changed] {
            slot.clear();
        }
        self.store.set_active_count(count);
        let current = self.store.current_index().min(count - 1);
        self.select(current);
        self.history.snapshot(self.store);
        Ok(())
    }
}
