use crate::actions;

const DOCUMENTATION: &str = r#"# Flipbook hotkeys. You may edit this file, but be aware that formatting and comments will not
# be preserved, and all keys and values are case sensitive.

# See `actions::Action` for available actions, specified here in [brackets].
# Keyboard hotkeys, specified by the "keyboard" field of an action, are written `[ctrl+][alt+][shift+]<key code>`.
# Key codes are named like `KeyA`, `Digit1`, `ArrowLeft`, `PageDown`, `BracketLeft`.
# Each action may have many hotkeys associated with it, but each hotkey should only be used at most once.

# Examples:
# [Undo]
# keyboard = ["ctrl+KeyZ"]
# [Redo]
# keyboard = ["ctrl+KeyY", "ctrl+shift+KeyZ"]

"#;

pub struct Hotkeys {
    failed_to_load: bool,
    pub actions_to_keys: actions::hotkeys::ActionsToKeys,
    pub keys_to_actions: actions::hotkeys::KeysToActions,
}
impl Hotkeys {
    const FILENAME: &'static str = "hotkeys.toml";
    /// Shared global hotkeys, saved and loaded from user preferences.
    /// (Or defaulted, if unavailable for some reason)
    #[must_use]
    pub fn get() -> &'static Self {
        static GLOBAL_HOTKEYS: std::sync::OnceLock<Hotkeys> = std::sync::OnceLock::new();

        GLOBAL_HOTKEYS.get_or_init(|| {
            let mut dir = super::preferences_dir();
            match dir.as_mut() {
                None => Self::no_path(),
                Some(dir) => {
                    dir.push(Self::FILENAME);
                    Self::load_or_default(dir)
                }
            }
        })
    }
    #[must_use]
    pub fn no_path() -> Self {
        log::warn!("Hotkeys weren't available, defaulting.");
        let mut new = Self::defaults();
        new.failed_to_load = true;
        new
    }
    #[must_use]
    fn defaults() -> Self {
        use actions::hotkeys::{ActionsToKeys, KeysToActions};
        let actions_to_keys = ActionsToKeys::default();
        // Default action map is reversable - this is assured by the default impl when debugging.
        let keys_to_actions = KeysToActions::try_from(&actions_to_keys)
            .unwrap_or_else(|_| unreachable!("default hotkeys bind a key twice"));
        Self {
            failed_to_load: false,
            actions_to_keys,
            keys_to_actions,
        }
    }
    #[must_use]
    fn load_or_default(path: &std::path::Path) -> Self {
        match Self::load(path) {
            Ok(hotkeys) => hotkeys,
            // First run, nothing saved yet.
            Err(e) if !path.exists() => {
                log::debug!("No hotkeys at {path:?}: {e}");
                Self::defaults()
            }
            Err(e) => {
                log::warn!("Failed to load hotkeys from {path:?}: {e:#}");
                Self::no_path()
            }
        }
    }
    fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        use actions::hotkeys::{ActionsToKeys, KeysToActions};
        let hotkeys: anyhow::Result<Self> = try_block::try_block! {
            let string = std::fs::read_to_string(path)?;
            let actions_to_keys : ActionsToKeys = toml::from_str(&string)?;
            let keys_to_actions : KeysToActions = (&actions_to_keys).try_into()?;

            Ok(Self {
                failed_to_load: false,
                actions_to_keys,
                keys_to_actions,
            })
        };
        hotkeys
    }
    /// Return true if loading user's settings failed. This can be useful for
    /// displaying a warning.
    #[must_use]
    pub fn did_fail_to_load(&self) -> bool {
        self.failed_to_load
    }
    pub fn save(&self) -> anyhow::Result<()> {
        let string = toml::ser::to_string_pretty(&self.actions_to_keys)?;
        super::save_documented(Self::FILENAME, DOCUMENTATION, &string)
    }
}

#[cfg(test)]
mod test {
    use super::Hotkeys;
    use crate::actions::Action;
    #[test]
    fn missing_file_defaults_quietly() {
        let path = std::env::temp_dir().join("flipbook-test-no-such-hotkeys.toml");
        let hotkeys = Hotkeys::load_or_default(&path);
        assert!(!hotkeys.did_fail_to_load());
        let save = "ctrl+KeyS".parse().unwrap();
        assert_eq!(hotkeys.keys_to_actions.action_of(&save), Some(Action::Save));
    }
    #[test]
    fn broken_file_defaults_loudly() {
        let path = std::env::temp_dir().join("flipbook-test-broken-hotkeys.toml");
        std::fs::write(&path, "[Undo]\nkeyboard = [\"ctrl+NotAKey\"]\n").unwrap();
        let hotkeys = Hotkeys::load_or_default(&path);
        let _ = std::fs::remove_file(&path);
        assert!(hotkeys.did_fail_to_load());
        assert!(!hotkeys.actions_to_keys.keys_of(Action::Undo).is_empty());
    }
}
