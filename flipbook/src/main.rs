#![warn(clippy::pedantic)]

pub mod actions;
pub mod global;
pub mod io;
pub mod script;

use anyhow::Result as AnyResult;
use flipbook_core::EditorSession;

use global::{hotkeys::Hotkeys, preferences::Preferences};

fn main() -> AnyResult<()> {
    let has_term = std::io::IsTerminal::is_terminal(&std::io::stdin());
    // Log to a terminal, if available. Else, log to "log.out" in the working directory.
    if has_term {
        env_logger::builder()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        let _ = simple_logging::log_to_file("log.out", log::LevelFilter::Debug);
    }

    let preferences = Preferences::get();
    let hotkeys = Hotkeys::get();
    let mut session = EditorSession::new(preferences.session_config());

    {
        // Args are a simple list of sprite sheets to try at startup. The first that loads wins.
        // Paths are OSStrings, let the system handle character encoding restrictions.
        let paths: Vec<std::path::PathBuf> = std::env::args_os().skip(1).map(Into::into).collect();
        let loaded = paths.iter().find(|path| match io::read_path(path, &mut session) {
            Ok(_) => true,
            Err(e) => {
                log::error!("failed to open file {path:?}: {e:#}");
                false
            }
        });
        if loaded.is_none() && !paths.is_empty() {
            log::warn!("Failed to load any provided sprite sheet.");
        }
    }

    // Don't clobber a file the user is midway through editing.
    if hotkeys.did_fail_to_load() {
        log::warn!("Using default hotkeys, hotkeys.toml left untouched.");
    } else if let Err(e) = hotkeys.save() {
        log::warn!("Failed to save hotkey config:\n{e:?}");
    };
    if let Err(e) = preferences.save() {
        log::warn!("Failed to save preferences:\n{e:?}");
    };

    let stdout = std::io::stdout();
    let mut runner = script::Runner::new(
        &mut session,
        &hotkeys.keys_to_actions,
        std::env::current_dir()?,
        preferences.file_name.clone(),
        stdout.lock(),
    );
    runner.run(std::io::stdin().lock())
}
