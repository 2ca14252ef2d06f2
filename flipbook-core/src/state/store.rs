//! # Animation store
//!
//! Fixed-capacity frame storage. All `capacity` slots always exist; only the first `active_count` are part of
//! the animation. Slots past the active prefix are "dormant" and are kept all-white at all times, so growing
//! the animation always reveals clean frames and structural edits can shuffle slots in place without allocating.

use super::grid::PixelGrid;

/// Canvas sides the editor offers.
pub const SUPPORTED_SIZES: [u32; 3] = [16, 32, 64];
/// Default number of frame slots.
pub const MAX_FRAMES: usize = 24;

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("unsupported canvas size {0}, expected 16, 32 or 64")]
pub struct InvalidCanvasSize(pub u32);

/// Side length of every frame, in cells. Always one of [`SUPPORTED_SIZES`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct CanvasSize(u32);
impl CanvasSize {
    pub const DEFAULT: Self = Self(32);
    pub fn new(side: u32) -> Result<Self, InvalidCanvasSize> {
        if SUPPORTED_SIZES.contains(&side) {
            Ok(Self(side))
        } else {
            Err(InvalidCanvasSize(side))
        }
    }
    /// Tiny canvases keep test fixtures readable.
    #[cfg(test)]
    pub(crate) const fn arbitrary(side: u32) -> Self {
        Self(side)
    }
    #[must_use]
    pub fn get(self) -> u32 {
        self.0
    }
    #[must_use]
    pub fn side(self) -> usize {
        self.0 as usize
    }
}
impl Default for CanvasSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}
impl TryFrom<u32> for CanvasSize {
    type Error = InvalidCanvasSize;
    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
impl std::fmt::Display for CanvasSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{0}x{0}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnimationStore {
    canvas_size: CanvasSize,
    /// Exactly `capacity` slots.
    frames: Box<[PixelGrid]>,
    /// `1 <= active_count <= frames.len()`
    active_count: usize,
    /// `current_index < active_count`
    current_index: usize,
}
impl AnimationStore {
    /// Create a store holding a single blank frame. `capacity` is raised to at least one.
    #[must_use]
    pub fn new(canvas_size: CanvasSize, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            canvas_size,
            frames: Self::blank_slots(canvas_size, capacity),
            active_count: 1,
            current_index: 0,
        }
    }
    fn blank_slots(canvas_size: CanvasSize, capacity: usize) -> Box<[PixelGrid]> {
        (0..capacity)
            .map(|_| PixelGrid::blank(canvas_size.side()))
            .collect()
    }
    #[must_use]
    pub fn canvas_size(&self) -> CanvasSize {
        self.canvas_size
    }
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.frames.len()
    }
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active_count
    }
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }
    /// The active frames, in order.
    #[must_use]
    pub fn frames(&self) -> &[PixelGrid] {
        &self.frames[..self.active_count]
    }
    /// Get an active frame. Dormant slots are not reachable.
    #[must_use]
    pub fn frame(&self, index: usize) -> Option<&PixelGrid> {
        self.frames().get(index)
    }
    #[must_use]
    pub fn current_frame(&self) -> &PixelGrid {
        &self.frames[self.current_index]
    }
    pub fn current_frame_mut(&mut self) -> &mut PixelGrid {
        &mut self.frames[self.current_index]
    }
    /// A new all-white grid at the current canvas size.
    #[must_use]
    pub fn blank_frame(&self) -> PixelGrid {
        PixelGrid::blank(self.canvas_size.side())
    }
    /// Deep copy of an active frame.
    #[must_use]
    pub fn clone_frame(&self, index: usize) -> Option<PixelGrid> {
        self.frame(index).cloned()
    }
    /// Hard reset to a single blank frame at a new size. Every slot is reallocated.
    ///
    /// Callers holding copies of frames (history, clipboard) must drop them, they no longer fit.
    pub fn resize_canvas(&mut self, new_size: u32) -> Result<(), InvalidCanvasSize> {
        let canvas_size = CanvasSize::new(new_size)?;
        log::debug!("Resizing canvas {} -> {canvas_size}", self.canvas_size);

        self.frames = Self::blank_slots(canvas_size, self.capacity());
        self.canvas_size = canvas_size;
        self.active_count = 1;
        self.current_index = 0;
        Ok(())
    }
    /// Replace the leading frames with `frames`, making exactly those active and selecting the first.
    /// Every other slot is blanked.
    ///
    /// Frames must already be validated against the canvas size and capacity.
    pub(crate) fn adopt_frames(&mut self, frames: Vec<PixelGrid>) {
        debug_assert!(!frames.is_empty() && frames.len() <= self.capacity());
        let count = frames.len();
        for (slot, frame) in self.frames.iter_mut().zip(frames) {
            *slot = frame;
        }
        for slot in &mut self.frames[count..] {
            slot.clear();
        }
        self.active_count = count;
        self.current_index = 0;
    }
    /// Every slot, dormant included.
    pub(crate) fn slots(&self) -> &[PixelGrid] {
        &self.frames
    }
    pub(crate) fn slots_mut(&mut self) -> &mut [PixelGrid] {
        &mut self.frames
    }
    pub(crate) fn set_active_count(&mut self, active_count: usize) {
        debug_assert!((1..=self.capacity()).contains(&active_count));
        self.active_count = active_count;
    }
    pub(crate) fn set_current_index(&mut self, current_index: usize) {
        debug_assert!(current_index < self.active_count);
        self.current_index = current_index;
    }
    /// Check the dormant-slot invariant.
    #[must_use]
    pub fn dormant_are_blank(&self) -> bool {
        self.frames[self.active_count..]
            .iter()
            .all(PixelGrid::is_blank)
    }
}
impl Default for AnimationStore {
    fn default() -> Self {
        Self::new(CanvasSize::default(), MAX_FRAMES)
    }
}
