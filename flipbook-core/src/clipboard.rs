//! Single-slot frame clipboard. Holds an independent copy, never a reference into the store,
//! and is not part of undo history.

use crate::{commands::NoOp, state::grid::PixelGrid};

#[derive(Clone, Debug, Default)]
pub struct Clipboard {
    frame: Option<PixelGrid>,
}
impl Clipboard {
    /// Store a copy of `frame`, replacing any previous contents.
    pub fn copy(&mut self, frame: &PixelGrid) {
        match &mut self.frame {
            Some(held) => held.copy_from(frame),
            None => self.frame = Some(frame.clone()),
        }
    }
    /// Overwrite `target` with the held frame.
    ///
    /// A held frame of a different size than `target` is unusable and treated as empty.
    pub fn paste_into(&self, target: &mut PixelGrid) -> Result<(), NoOp> {
        match &self.frame {
            Some(held) if held.side() == target.side() => {
                target.copy_from(held);
                Ok(())
            }
            _ => Err(NoOp::ClipboardEmpty),
        }
    }
    /// Whether there's a held frame that can be pasted into `target`.
    #[must_use]
    pub fn fits(&self, target: &PixelGrid) -> bool {
        self.frame
            .as_ref()
            .is_some_and(|held| held.side() == target.side())
    }
    pub fn clear(&mut self) {
        self.frame = None;
    }
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frame.is_none()
    }
    #[must_use]
    pub fn peek(&self) -> Option<&PixelGrid> {
        self.frame.as_ref()
    }
}
