//! Frame storage. [`store::AnimationStore`] owns a fixed set of [`grid::PixelGrid`] slots.

pub mod grid;
pub mod store;

pub use grid::{Cell, PixelGrid};
pub use store::{AnimationStore, CanvasSize};
