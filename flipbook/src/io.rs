//! Sprite sheets on disk. The core works on in-memory rasters, this is where they become PNG files.

use flipbook_core::{
    io::sheet::{sanitize_file_name, Raster},
    EditorSession,
};

/// Load the sprite sheet at `path` into the session, returning the number of frames read.
///
/// Any format `image` understands is accepted, and converted to RGBA8.
pub fn read_path(
    path: impl AsRef<std::path::Path>,
    session: &mut EditorSession,
) -> anyhow::Result<usize> {
    let path = path.as_ref();
    let image = image::open(path)?.into_rgba8();
    let (width, height) = image.dimensions();
    let raster = Raster::from_rgba8(width, height, image.as_raw())?;
    let frames = session.import_sheet(&raster)?;
    log::info!("Read {frames} frames from {path:?}");
    Ok(frames)
}

/// Save the session's animation as a PNG sprite sheet named `name` in `dir`. The name is sanitized first.
/// Returns the path written.
pub fn write_path(
    dir: impl AsRef<std::path::Path>,
    name: &str,
    session: &EditorSession,
) -> anyhow::Result<std::path::PathBuf> {
    let path = dir.as_ref().join(sanitize_file_name(name));
    let raster = session.export_sheet();
    let (width, height) = (raster.width(), raster.height());
    let image = image::RgbaImage::from_raw(width, height, raster.into_rgba8())
        .ok_or_else(|| anyhow::anyhow!("sheet buffer doesn't fit {width}x{height}"))?;
    image.save_with_format(&path, image::ImageFormat::Png)?;
    log::info!("Wrote {width}x{height} sheet to {path:?}");
    Ok(path)
}
