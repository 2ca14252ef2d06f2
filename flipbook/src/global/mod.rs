//! Global singletons, loaded from and saved to the user's preferences directory.

pub mod hotkeys;
pub mod preferences;

/// `<platform preferences dir>/flipbook`, if the platform has one.
#[must_use]
pub fn preferences_dir() -> Option<std::path::PathBuf> {
    let mut base_dir = dirs::preference_dir()?;
    base_dir.push(env!("CARGO_PKG_NAME"));
    Some(base_dir)
}

/// Write `contents` as `file_name` into the preferences directory, prefixed by a documentation header.
pub(crate) fn save_documented(
    file_name: &str,
    documentation: &str,
    contents: &str,
) -> anyhow::Result<()> {
    let mut preferences =
        preferences_dir().ok_or_else(|| anyhow::anyhow!("No preferences dir found"))?;
    // Explicity do *not* create recursively. If not found, the user probably has a good reason.
    // Ignore errors (could already exist). Any real errors will be emitted by file access below.
    let _ = std::fs::DirBuilder::new().create(&preferences);

    preferences.push(file_name);
    std::fs::write(preferences, documentation.to_owned() + contents)?;
    Ok(())
}
