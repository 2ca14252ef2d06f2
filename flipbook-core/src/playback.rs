//! Looping animation preview. Only ever reads frame indices, so it can tick freely between edits.

use std::time::Duration;

pub const MIN_FPS: u32 = 1;
pub const MAX_FPS: u32 = 24;
pub const DEFAULT_FPS: u32 = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Playback {
    fps: u32,
    preview_frame: usize,
    since_last: Duration,
}
impl Playback {
    #[must_use]
    pub fn new(fps: u32) -> Self {
        Self {
            fps: fps.clamp(MIN_FPS, MAX_FPS),
            preview_frame: 0,
            since_last: Duration::ZERO,
        }
    }
    #[must_use]
    pub fn fps(&self) -> u32 {
        self.fps
    }
    /// Set the rate, clamped to `[MIN_FPS, MAX_FPS]`. Returns the rate actually used.
    pub fn set_fps(&mut self, fps: u32) -> u32 {
        self.fps = fps.clamp(MIN_FPS, MAX_FPS);
        self.fps
    }
    #[must_use]
    pub fn frame_time(&self) -> Duration {
        Duration::from_secs(1) / self.fps
    }
    /// Which frame the preview is showing.
    #[must_use]
    pub fn preview_frame(&self) -> usize {
        self.preview_frame
    }
    /// Advance the clock by `elapsed`. Steps at most one frame per call, once more than a frame's time
    /// has accumulated, and returns the new preview frame if it stepped.
    pub fn tick(&mut self, elapsed: Duration, active_count: usize) -> Option<usize> {
        self.since_last += elapsed;
        if self.since_last <= self.frame_time() {
            return None;
        }
        self.since_last = Duration::ZERO;
        let next = self.preview_frame + 1;
        // Also wraps a preview left past the end by deleted frames.
        self.preview_frame = if next >= active_count { 0 } else { next };
        Some(self.preview_frame)
    }
    /// The preview frame, wrapped into the current frame count in case frames were removed.
    #[must_use]
    pub fn visible_frame(&self, active_count: usize) -> usize {
        if self.preview_frame < active_count {
            self.preview_frame
        } else {
            0
        }
    }
}
impl Default for Playback {
    fn default() -> Self {
        Self::new(DEFAULT_FPS)
    }
}
