use flipbook_core::{
    history::MAX_UNDO_STEPS,
    io::sheet::DEFAULT_FILE_NAME,
    playback::DEFAULT_FPS,
    state::store::{CanvasSize, MAX_FRAMES},
    SessionConfig,
};

const DOCUMENTATION: &str = r#"# Flipbook preferences. You may edit this file, but be aware that formatting and comments will not
# be preserved. Missing fields take their default value.

# canvas_size: side length of a frame in pixels. One of 16, 32, 64.
# max_frames: how many frames an animation may hold.
# max_undo_steps: how many edits are remembered for undo.
# fps: preview playback rate, 1 to 24.
# thumbs_per_page: frames shown per film strip page.
# file_name: default name to save sprite sheets as.

"#;

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct Preferences {
    pub canvas_size: u32,
    pub max_frames: usize,
    pub max_undo_steps: usize,
    pub fps: u32,
    pub thumbs_per_page: usize,
    pub file_name: String,
}
impl Default for Preferences {
    fn default() -> Self {
        Self {
            canvas_size: CanvasSize::DEFAULT.get(),
            max_frames: MAX_FRAMES,
            max_undo_steps: MAX_UNDO_STEPS,
            fps: DEFAULT_FPS,
            thumbs_per_page: 8,
            file_name: DEFAULT_FILE_NAME.to_owned(),
        }
    }
}
impl Preferences {
    const FILENAME: &'static str = "preferences.toml";
    /// Shared global preferences, loaded once from the user's preferences directory.
    #[must_use]
    pub fn get() -> &'static Self {
        static GLOBAL_PREFERENCES: std::sync::OnceLock<Preferences> = std::sync::OnceLock::new();

        GLOBAL_PREFERENCES.get_or_init(|| match super::preferences_dir() {
            None => {
                log::warn!("Preferences weren't available, defaulting.");
                Self::default()
            }
            Some(mut path) => {
                path.push(Self::FILENAME);
                Self::load_or_default(&path)
            }
        })
    }
    #[must_use]
    fn load_or_default(path: &std::path::Path) -> Self {
        let preferences: anyhow::Result<Self> = try_block::try_block! {
            let string = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&string)?)
        };
        match preferences {
            Ok(preferences) => preferences,
            Err(e) if !path.exists() => {
                log::debug!("No preferences at {path:?}: {e}");
                Self::default()
            }
            Err(e) => {
                log::warn!("Failed to load preferences from {path:?}, defaulting: {e:#}");
                Self::default()
            }
        }
    }
    pub fn save(&self) -> anyhow::Result<()> {
        let string = toml::ser::to_string_pretty(self)?;
        super::save_documented(Self::FILENAME, DOCUMENTATION, &string)
    }
    /// Configuration for a new editing session. An unsupported canvas size falls back to the default.
    #[must_use]
    pub fn session_config(&self) -> SessionConfig {
        let canvas_size = CanvasSize::new(self.canvas_size).unwrap_or_else(|e| {
            log::warn!("{e}, using {}", CanvasSize::DEFAULT);
            CanvasSize::DEFAULT
        });
        SessionConfig {
            canvas_size,
            capacity: self.max_frames,
            max_undo_steps: self.max_undo_steps,
            fps: self.fps,
            thumbs_per_page: self.thumbs_per_page,
        }
    }
}

#[cfg(test)]
mod test {
    use super::Preferences;
    #[test]
    fn partial_file_fills_defaults() {
        let preferences: Preferences = toml::from_str("canvas_size = 64\nfps = 12\n").unwrap();
        assert_eq!(preferences.canvas_size, 64);
        assert_eq!(preferences.fps, 12);
        assert_eq!(preferences.max_frames, 24);
        assert_eq!(preferences.file_name, "sprite-sheet.png");
    }
    #[test]
    fn bad_canvas_size_falls_back() {
        let preferences = Preferences {
            canvas_size: 48,
            ..Preferences::default()
        };
        let config = preferences.session_config();
        assert_eq!(config.canvas_size.get(), 32);
        assert_eq!(config.capacity, 24);
    }
    #[test]
    fn round_trip() {
        let preferences = Preferences {
            thumbs_per_page: 3,
            file_name: "walk.png".to_owned(),
            ..Preferences::default()
        };
        let string = toml::ser::to_string_pretty(&preferences).unwrap();
        assert_eq!(toml::from_str::<Preferences>(&string).unwrap(), preferences);
    }
}
