//! Focusable numeric input cell with clamping bounds.
//!
//! A field holds one non-negative integer inside a fixed `[min, max]`
//! range. While focused, digit keys append to the value, backspace drops
//! the last digit and the arrow keys step by one; every edit is clamped to
//! the bounds, never rejected. A read-only flag freezes the field without
//! taking its place in the layout away.
//!
//! ```rust
//! use repeat_beep::field;
//!
//! let minutes = field::new("Minutes", 0, 59).with_value(5);
//! assert_eq!(minutes.value(), 5);
//! assert_eq!(minutes.value_string(), "05");
//! ```

use crate::key::{new_binding, with_help, with_keys_str, Binding};
use crate::Component;
use bubbletea_rs::{Cmd, KeyMsg, Msg};
use crossterm::event::{KeyCode, KeyModifiers};
use lipgloss_extras::prelude::*;

/// Key bindings for editing a focused field.
///
/// Digit keys are deliberately not bindings: like plain character input in
/// a text box, they are matched on the key code directly.
#[derive(Debug, Clone)]
pub struct KeyMap {
    /// Step the value up or down by one.
    pub adjust: Binding,
    /// Drop the last digit of the value.
    pub erase: Binding,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            adjust: new_binding(vec![
                with_keys_str(&["up", "down"]),
                with_help("↑/↓", "adjust"),
            ]),
            erase: new_binding(vec![
                with_keys_str(&["backspace"]),
                with_help("⌫", "erase"),
            ]),
        }
    }
}

/// A labeled numeric cell.
///
/// Rendered as the label over a zero-padded value, wide enough for the
/// largest value the bounds allow. The value cell changes style with the
/// field's state: focused, blurred or read-only.
#[derive(Debug, Clone)]
pub struct Model {
    /// Caption rendered above the value cell.
    pub label: String,
    /// Style for the caption line.
    pub label_style: Style,
    /// Style for the value cell while blurred.
    pub value_style: Style,
    /// Style for the value cell while focused.
    pub focused_style: Style,
    /// Style for the caption and value while the field is read-only.
    pub inactive_style: Style,
    /// Key bindings consulted while the field has focus.
    pub key_map: KeyMap,
    value: u64,
    min: u64,
    max: u64,
    width: usize,
    focus: bool,
    read_only: bool,
}

/// Creates a blurred field for values in `min..=max`, starting at `min`.
///
/// The cell width follows the widest value the bounds allow, so a
/// `[0, 59]` field renders two digits and a `[0, 359999]` field six.
pub fn new(label: impl Into<String>, min: u64, max: u64) -> Model {
    let max = max.max(min);
    Model {
        label: label.into(),
        label_style: Style::new().foreground(Color::from("#777777")),
        value_style: Style::new().foreground(Color::from("#dddddd")),
        focused_style: Style::new().foreground(Color::from("#EE6FF8")).bold(true),
        inactive_style: Style::new().foreground(Color::from("#4D4D4D")),
        key_map: KeyMap::default(),
        value: min,
        min,
        max,
        width: max.to_string().len(),
        focus: false,
        read_only: false,
    }
}

impl Model {
    /// Sets the initial value, clamped to the field's bounds.
    pub fn with_value(mut self, value: u64) -> Self {
        self.set_value(value);
        self
    }

    /// Returns the current value.
    pub fn value(&self) -> u64 {
        self.value
    }

    /// Returns the value as the zero-padded string the cell displays.
    pub fn value_string(&self) -> String {
        format!("{:0width$}", self.value, width = self.width)
    }

    /// Replaces the value, clamped to the field's bounds.
    pub fn set_value(&mut self, value: u64) {
        self.value = value.clamp(self.min, self.max);
    }

    /// Reports whether the field currently refuses edits.
    pub fn read_only(&self) -> bool {
        self.read_only
    }

    /// Freezes or thaws the field. A read-only field keeps its focus state
    /// but ignores key input and renders in the inactive style.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// Steps the value up by one, stopping at the upper bound.
    pub fn increment(&mut self) {
        self.set_value(self.value.saturating_add(1));
    }

    /// Steps the value down by one, stopping at the lower bound.
    pub fn decrement(&mut self) {
        self.set_value(self.value.saturating_sub(1));
    }

    /// Appends a decimal digit, clamping the result.
    ///
    /// Typing builds the number left to right: 7 then 5 in a `[0, 59]`
    /// field passes through 7 and lands on 59.
    pub fn append_digit(&mut self, digit: u64) {
        self.set_value(self.value.saturating_mul(10).saturating_add(digit));
    }

    /// Drops the last decimal digit, clamping the result.
    pub fn erase_digit(&mut self) {
        self.set_value(self.value / 10);
    }

    /// Handles key input for the field.
    ///
    /// Blurred and read-only fields ignore everything. Focused fields act
    /// on the adjust and erase bindings and on unmodified digit keys; all
    /// other input falls through untouched.
    pub fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        if !self.focus || self.read_only {
            return None;
        }

        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            if self.key_map.adjust.matches(key_msg) {
                match key_msg.key {
                    KeyCode::Up => self.increment(),
                    KeyCode::Down => self.decrement(),
                    _ => {}
                }
            } else if self.key_map.erase.matches(key_msg) {
                self.erase_digit();
            } else if let KeyCode::Char(ch) = key_msg.key {
                // Plain digits edit the value; modified ones belong to
                // someone else's chord.
                if !key_msg.modifiers.contains(KeyModifiers::CONTROL)
                    && !key_msg.modifiers.contains(KeyModifiers::ALT)
                {
                    if let Some(digit) = ch.to_digit(10) {
                        self.append_digit(u64::from(digit));
                    }
                }
            }
        }

        None
    }

    /// Renders the label over the value cell.
    pub fn view(&self) -> String {
        if self.read_only {
            return format!(
                "{}\n{}",
                self.inactive_style.render(&self.label),
                self.inactive_style.render(&self.value_string())
            );
        }

        let value_style = if self.focus {
            &self.focused_style
        } else {
            &self.value_style
        };

        format!(
            "{}\n{}",
            self.label_style.render(&self.label),
            value_style.render(&self.value_string())
        )
    }
}

impl Component for Model {
    fn focus(&mut self) -> Option<Cmd> {
        self.focus = true;
        None
    }

    fn blur(&mut self) {
        self.focus = false;
    }

    fn focused(&self) -> bool {
        self.focus
    }
}
