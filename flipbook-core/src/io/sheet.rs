//! # Sprite sheets
//!
//! The exchange format is a single RGBA raster, `canvas_size * frame_count` wide and `canvas_size` tall, with
//! frames laid left to right. There is no header - the decoder must already agree with the encoder on the canvas
//! size, and infers the frame count from the width. A sheet of the wrong resolution whose width happens to divide
//! evenly is accepted as-is, with garbled frames.

use crate::{
    color::Color,
    state::{
        grid::PixelGrid,
        store::{AnimationStore, CanvasSize},
    },
};

/// File name offered when the user didn't choose one.
pub const DEFAULT_FILE_NAME: &str = "sprite-sheet.png";

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetError {
    #[error("sheet is {found}px tall, expected {expected}px")]
    Height { expected: u32, found: u32 },
    #[error("sheet width {found}px is not a multiple of {canvas}px")]
    Width { canvas: u32, found: u32 },
    #[error("sheet holds {found} frames, at most {capacity} are supported")]
    TooManyFrames { capacity: usize, found: usize },
    #[error("pixel buffer holds {found} bytes, expected {expected}")]
    BufferLength { expected: usize, found: usize },
}

/// Row-major RGBA8 image.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}
impl Raster {
    #[must_use]
    pub fn new(width: u32, height: u32, fill: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width as usize * height as usize],
        }
    }
    /// Interpret tightly packed RGBA8 bytes.
    pub fn from_rgba8(width: u32, height: u32, bytes: &[u8]) -> Result<Self, SheetError> {
        let expected = width as usize * height as usize * std::mem::size_of::<Color>();
        if bytes.len() != expected {
            return Err(SheetError::BufferLength {
                expected,
                found: bytes.len(),
            });
        }
        let pixels: &[Color] =
            bytemuck::try_cast_slice(bytes).map_err(|_| SheetError::BufferLength {
                expected,
                found: bytes.len(),
            })?;
        Ok(Self {
            width,
            height,
            pixels: pixels.to_vec(),
        })
    }
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> Option<Color> {
        (x < self.width && y < self.height)
            .then(|| self.pixels[y as usize * self.width as usize + x as usize])
    }
    #[must_use]
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }
    /// Tightly packed RGBA8 bytes.
    #[must_use]
    pub fn as_rgba8(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
    #[must_use]
    pub fn into_rgba8(self) -> Vec<u8> {
        bytemuck::cast_slice(&self.pixels).to_vec()
    }
}

/// Lay every active frame out side by side.
#[must_use]
pub fn encode(store: &AnimationStore) -> Raster {
    let side = store.canvas_size().side();
    let frames = store.frames();
    let width = side * frames.len();
    let mut pixels = Vec::with_capacity(width * side);
    // Output row `y` is row `y` of every frame, concatenated.
    for row in 0..side {
        for frame in frames {
            pixels.extend_from_slice(&frame.as_slice()[row * side..(row + 1) * side]);
        }
    }
    log::debug!("Encoded {} frames into a {width}x{side} sheet", frames.len());
    Raster {
        // Both bounded by canvas size * capacity, far below u32::MAX in practice.
        width: u32::try_from(width).unwrap_or(u32::MAX),
        height: store.canvas_size().get(),
        pixels,
    }
}

/// Split a sheet back into frames. Nothing is returned unless the whole sheet validates.
pub fn decode(
    raster: &Raster,
    canvas_size: CanvasSize,
    capacity: usize,
) -> Result<Vec<PixelGrid>, SheetError> {
    let canvas = canvas_size.get();
    if raster.height != canvas {
        return Err(SheetError::Height {
            expected: canvas,
            found: raster.height,
        });
    }
    if raster.width == 0 || raster.width % canvas != 0 {
        return Err(SheetError::Width {
            canvas,
            found: raster.width,
        });
    }
    let count = (raster.width / canvas) as usize;
    if count > capacity {
        return Err(SheetError::TooManyFrames {
            capacity,
            found: count,
        });
    }
    log::debug!("Decoding {count} frames of {canvas_size}");

    let side = canvas_size.side();
    let width = raster.width as usize;
    let mut frames = vec![PixelGrid::blank(side); count];
    for (index, frame) in frames.iter_mut().enumerate() {
        for (row, target) in frame.rows_mut().enumerate() {
            let start = row * width + index * side;
            target.copy_from_slice(&raster.pixels[start..start + side]);
        }
    }
    Ok(frames)
}

/// Make a user-provided name safe to save as: strips `\ / : * ? " < > |`, turns whitespace runs into a
/// single `-`, and forces a `.png` extension. An empty result falls back to [`DEFAULT_FILE_NAME`].
#[must_use]
pub fn sanitize_file_name(name: &str) -> String {
    let name = name.trim();
    // Whatever extension was given is replaced.
    let stem = match name.rfind('.') {
        Some(dot) => &name[..dot],
        None => name,
    };

    let mut out = String::with_capacity(stem.len() + 4);
    let mut in_whitespace = false;
    for char in stem.chars() {
        if matches!(char, '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|') {
            continue;
        }
        if char.is_whitespace() {
            if !in_whitespace {
                out.push('-');
            }
            in_whitespace = true;
        } else {
            out.push(char);
            in_whitespace = false;
        }
    }

    if out.is_empty() {
        return DEFAULT_FILE_NAME.to_owned();
    }
    out.push_str(".png");
    out
}
