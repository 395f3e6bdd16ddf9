//! Key bindings with help metadata.
//!
//! A [`Binding`] pairs the key presses it responds to with the help text
//! shown for it, and can be disabled at runtime so actions that are
//! contextually unavailable drop out of both matching and help views.
//!
//! Bindings are usually built with [`new_binding`] and its options:
//!
//! ```rust
//! use repeat_beep::key::{new_binding, with_help, with_keys_str};
//!
//! let start = new_binding(vec![
//!     with_keys_str(&["enter", "space"]),
//!     with_help("enter", "start/stop"),
//! ]);
//! assert!(start.enabled());
//! ```

use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};

/// A single key press: a key code plus the modifiers held with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    /// The key code of the press.
    pub code: KeyCode,
    /// Modifier keys held during the press.
    pub mods: KeyModifiers,
}

impl From<KeyCode> for KeyPress {
    fn from(code: KeyCode) -> Self {
        Self {
            code,
            mods: KeyModifiers::NONE,
        }
    }
}

impl From<(KeyCode, KeyModifiers)> for KeyPress {
    fn from((code, mods): (KeyCode, KeyModifiers)) -> Self {
        Self { code, mods }
    }
}

/// Help text for a binding: a short key label and the action it performs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Help {
    /// Short label for the key, e.g. "↑/↓".
    pub key: String,
    /// Description of the action, e.g. "adjust value".
    pub desc: String,
}

/// A key binding: the presses it matches, its help text, and whether it is
/// currently enabled.
#[derive(Debug, Clone, Default)]
pub struct Binding {
    keys: Vec<KeyPress>,
    help: Help,
    disabled: bool,
}

impl Binding {
    /// Creates a binding from a list of presses. Plain `KeyCode` values and
    /// `(KeyCode, KeyModifiers)` tuples both convert into a press.
    pub fn new<P: Into<KeyPress>>(keys: Vec<P>) -> Self {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            help: Help::default(),
            disabled: false,
        }
    }

    /// Sets the help text shown for this binding.
    pub fn with_help(mut self, key: impl Into<String>, desc: impl Into<String>) -> Self {
        self.help = Help {
            key: key.into(),
            desc: desc.into(),
        };
        self
    }

    /// Returns the presses this binding responds to.
    pub fn keys(&self) -> &[KeyPress] {
        &self.keys
    }

    /// Returns the help text of this binding.
    pub fn help(&self) -> &Help {
        &self.help
    }

    /// Returns whether the binding participates in matching and help views.
    /// A binding with no keys is never enabled.
    pub fn enabled(&self) -> bool {
        !self.disabled && !self.keys.is_empty()
    }

    /// Enables or disables the binding at runtime.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.disabled = !enabled;
    }

    /// Reports whether a key message triggers this binding.
    ///
    /// Shift is ignored when comparing modifiers because it is already
    /// encoded in the key code (`Char('A')`, `BackTab`), and terminals
    /// disagree on whether to report it separately.
    pub fn matches(&self, msg: &KeyMsg) -> bool {
        if !self.enabled() {
            return false;
        }
        let msg_mods = msg.modifiers.difference(KeyModifiers::SHIFT);
        self.keys
            .iter()
            .any(|k| k.code == msg.key && k.mods.difference(KeyModifiers::SHIFT) == msg_mods)
    }
}

/// A construction option consumed by [`new_binding`].
pub struct BindingOpt(Box<dyn FnOnce(&mut Binding)>);

/// Builds a binding from a list of options.
pub fn new_binding(opts: Vec<BindingOpt>) -> Binding {
    let mut binding = Binding::default();
    for opt in opts {
        (opt.0)(&mut binding);
    }
    binding
}

/// Option: the presses the binding responds to.
pub fn with_keys(keys: Vec<KeyPress>) -> BindingOpt {
    BindingOpt(Box::new(move |b| b.keys = keys))
}

/// Option: the presses the binding responds to, parsed from key names such
/// as `"enter"`, `"shift+tab"`, `"ctrl+c"` or `"5"`.
pub fn with_keys_str(keys: &[&str]) -> BindingOpt {
    let presses: Vec<KeyPress> = keys.iter().map(|name| parse_press(name)).collect();
    BindingOpt(Box::new(move |b| b.keys = presses))
}

/// Option: the help text shown for the binding.
pub fn with_help(key: &str, desc: &str) -> BindingOpt {
    let help = Help {
        key: key.to_string(),
        desc: desc.to_string(),
    };
    BindingOpt(Box::new(move |b| b.help = help))
}

/// Option: start the binding disabled.
pub fn with_disabled() -> BindingOpt {
    BindingOpt(Box::new(|b| b.disabled = true))
}

/// Parses a key name into a press. Unknown names become `KeyCode::Null`,
/// which never matches a real press.
fn parse_press(name: &str) -> KeyPress {
    let mut mods = KeyModifiers::NONE;
    let mut key = name;
    while let Some((prefix, rest)) = key.split_once('+') {
        match prefix {
            "ctrl" => mods |= KeyModifiers::CONTROL,
            "alt" => mods |= KeyModifiers::ALT,
            "shift" => mods |= KeyModifiers::SHIFT,
            _ => break,
        }
        key = rest;
    }
    let code = match key {
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "enter" => KeyCode::Enter,
        "space" => KeyCode::Char(' '),
        "tab" if mods.contains(KeyModifiers::SHIFT) => KeyCode::BackTab,
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "backspace" => KeyCode::Backspace,
        "delete" => KeyCode::Delete,
        "esc" => KeyCode::Esc,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pgup" => KeyCode::PageUp,
        "pgdown" => KeyCode::PageDown,
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => KeyCode::Null,
            }
        }
    };
    KeyPress { code, mods }
}

/// The key bindings a component wants shown in help views.
///
/// `short_help` supplies the essentials for a single-line view; `full_help`
/// groups every binding into columns for the expanded view.
pub trait KeyMap {
    /// The essential bindings, rendered as one line.
    fn short_help(&self) -> Vec<&Binding>;
    /// All bindings, grouped into columns.
    fn full_help(&self) -> Vec<Vec<&Binding>>;
}
