//! Key to input event mapping.
//!
//! Front ends translate whatever they receive into a [`Key`], and the
//! [`Keymap`] turns recognised keys into [`InputEvent`]s. Unrecognised keys
//! map to `None` and are dropped.

use serde::Deserialize;

use crate::calculator::Operator;

/// A single editor action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Digit(char),
    DecimalPoint,
    Operator(Operator),
    Evaluate,
    Backspace,
    ClearEntry,
    AllClear,
}

/// A key as seen by the front end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Escape,
    Delete,
}

impl Key {
    /// Look up a bracketed key name such as `Enter` (case insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "enter" | "return" => Some(Self::Enter),
            "backspace" | "bs" => Some(Self::Backspace),
            "escape" | "esc" => Some(Self::Escape),
            "delete" | "del" => Some(Self::Delete),
            _ => None,
        }
    }
}

/// What the Delete key does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeleteAction {
    #[default]
    ClearEntry,
    AllClear,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Keymap {
    pub delete: DeleteAction,
}

impl Keymap {
    pub fn new(delete: DeleteAction) -> Self {
        Self { delete }
    }

    pub fn map(&self, key: Key) -> Option<InputEvent> {
        match key {
            Key::Char(c) => Self::map_char(c),
            Key::Enter => Some(InputEvent::Evaluate),
            Key::Backspace => Some(InputEvent::Backspace),
            Key::Escape => Some(InputEvent::AllClear),
            Key::Delete => Some(match self.delete {
                DeleteAction::ClearEntry => InputEvent::ClearEntry,
                DeleteAction::AllClear => InputEvent::AllClear,
            }),
        }
    }

    fn map_char(c: char) -> Option<InputEvent> {
        match c {
            '0'..='9' => Some(InputEvent::Digit(c)),
            '.' => Some(InputEvent::DecimalPoint),
            '=' => Some(InputEvent::Evaluate),
            _ => Operator::from_char(c).map(InputEvent::Operator),
        }
    }
}

/// Parse a key script into keys.
///
/// Each character is one key, except `<Name>` which names a special key.
/// Unknown names are skipped. A `<` that does not open a run of letters
/// closed by `>` is taken literally.
pub fn parse_key_script(script: &str) -> Vec<Key> {
    let mut keys = Vec::new();
    let mut rest = script;

    while let Some(c) = rest.chars().next() {
        if c == '<'
            && let Some(end) = rest.find('>')
            && end > 1
            && rest[1..end].chars().all(|n| n.is_ascii_alphabetic())
        {
            if let Some(key) = Key::from_name(&rest[1..end]) {
                keys.push(key);
            }
            rest = &rest[end + 1..];
            continue;
        }
        keys.push(Key::Char(c));
        rest = &rest[c.len_utf8()..];
    }

    keys
}
