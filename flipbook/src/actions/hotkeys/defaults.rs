use super::super::Action;
use super::{Key, KeyboardHotkey};

const fn plain(key: Key) -> KeyboardHotkey {
    KeyboardHotkey {
        ctrl: false,
        alt: false,
        shift: false,
        key,
    }
}
const fn ctrl(key: Key) -> KeyboardHotkey {
    KeyboardHotkey {
        ctrl: true,
        alt: false,
        shift: false,
        key,
    }
}

pub const KEYBOARD: &[(Action, &[KeyboardHotkey])] = &[
    (Action::Undo, &[ctrl(Key::KeyZ)]),
    (
        Action::Redo,
        &[
            ctrl(Key::KeyY),
            KeyboardHotkey {
                ctrl: true,
                alt: false,
                shift: true,
                key: Key::KeyZ,
            },
        ],
    ),
    (Action::NextFrame, &[plain(Key::ArrowRight), plain(Key::Period)]),
    (Action::PreviousFrame, &[plain(Key::ArrowLeft), plain(Key::Comma)]),
    (Action::NextPage, &[plain(Key::PageDown)]),
    (Action::PreviousPage, &[plain(Key::PageUp)]),
    (Action::InsertFrame, &[plain(Key::Insert), ctrl(Key::KeyN)]),
    (Action::DuplicateFrame, &[ctrl(Key::KeyD)]),
    (Action::DeleteFrame, &[plain(Key::Delete)]),
    (Action::Copy, &[ctrl(Key::KeyC)]),
    (Action::Paste, &[ctrl(Key::KeyV)]),
    (Action::Pencil, &[plain(Key::KeyP)]),
    (Action::Rectangle, &[plain(Key::KeyR)]),
    (Action::Ink, &[plain(Key::KeyB)]),
    (Action::Erase, &[plain(Key::KeyE)]),
    (Action::FpsUp, &[plain(Key::BracketRight)]),
    (Action::FpsDown, &[plain(Key::BracketLeft)]),
    (Action::Save, &[ctrl(Key::KeyS)]),
];
