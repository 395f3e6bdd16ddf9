//! The assembled repeat-beep widget.
//!
//! Wires a row of numeric [`field`]s, a repeating countdown
//! [`interval::Model`] and a one-line key help into a single component.
//! The user picks an interval, presses start, and a tone sounds at the top
//! of every cycle until stopped. One widget covers both entry styles: an
//! hours/minutes/seconds row or a single all-seconds cell, selected by
//! [`Granularity`].
//!
//! The model implements `bubbletea_rs::Model`, so it can serve directly as
//! the program model, or sit inside a host that forwards messages to it:
//!
//! ```rust
//! use bubbletea_rs::{KeyMsg, Msg};
//! use crossterm::event::{KeyCode, KeyModifiers};
//! use repeat_beep::app::{new, Granularity};
//!
//! let mut widget = new(Granularity::Hms).with_duration(90);
//!
//! // Tab moves focus along the field row without touching the interval.
//! let tab: Msg = Box::new(KeyMsg {
//!     key: KeyCode::Tab,
//!     modifiers: KeyModifiers::NONE,
//! });
//! widget.update(tab);
//! assert_eq!(widget.total_seconds(), 90);
//! ```
//!
//! Quitting is the host's concern; the widget binds no quit key, like
//! every other component in this crate.

use crate::field;
use crate::help;
use crate::interval;
use crate::key::{self, new_binding, with_help, with_keys_str, Binding};
use crate::tone::Tone;
use crate::Component;
use bubbletea_rs::{Cmd, KeyMsg, Model as BubbleTeaModel, Msg};
use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;

/// Largest hours value the hms row accepts.
const MAX_HOURS: u64 = 99;

/// Ceiling for the single-cell seconds form: the same total the hms row
/// can express (99:59:59).
const MAX_TOTAL_SECS: u64 = MAX_HOURS * 3600 + 59 * 60 + 59;

/// How the interval is entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    /// Separate hours, minutes and seconds cells.
    Hms,
    /// One cell holding the whole interval in seconds.
    Seconds,
}

/// Key bindings for moving focus and driving the engine.
///
/// Field-level editing keys (digits, arrows, backspace) live on each
/// [`field::Model`]; the widget aggregates the focused field's bindings
/// into its help line.
#[derive(Debug, Clone)]
pub struct KeyMap {
    /// Move focus to the next field.
    pub next_field: Binding,
    /// Move focus to the previous field.
    pub prev_field: Binding,
    /// Start or stop the interval engine.
    pub start_stop: Binding,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            next_field: new_binding(vec![
                with_keys_str(&["tab", "right"]),
                with_help("tab", "next field"),
            ]),
            prev_field: new_binding(vec![
                with_keys_str(&["shift+tab", "left"]),
                with_help("shift+tab", "prev field"),
            ]),
            start_stop: new_binding(vec![
                with_keys_str(&["enter", "space"]),
                with_help("enter", "start/stop"),
            ]),
        }
    }
}

/// Lipgloss styles for the widget chrome.
#[derive(Debug, Clone)]
pub struct Styles {
    /// Badge-style title line.
    pub title: Style,
    /// Countdown line shown while the engine runs.
    pub countdown: Style,
    /// Footer note under the help line.
    pub footer: Style,
}

impl Default for Styles {
    fn default() -> Self {
        Self {
            title: Style::new()
                .background(Color::from("62"))
                .foreground(Color::from("230"))
                .padding(0, 1, 0, 1),
            countdown: Style::new()
                .foreground(AdaptiveColor {
                    Light: "#1a1a1a",
                    Dark: "#dddddd",
                })
                .bold(true),
            footer: Style::new().foreground(AdaptiveColor {
                Light: "#B2B2B2",
                Dark: "#4A4A4A",
            }),
        }
    }
}

/// The repeat-beep widget model.
#[derive(Debug, Clone)]
pub struct Model {
    /// Key bindings for focus movement and start/stop.
    pub keys: KeyMap,
    /// Styles for the title, countdown and footer lines.
    pub styles: Styles,
    granularity: Granularity,
    fields: Vec<field::Model>,
    focused: usize,
    engine: interval::Model,
    help: help::Model,
}

/// Creates an idle widget with the default ten-second interval.
///
/// `Granularity::Hms` builds an hours/minutes/seconds row with the first
/// cell focused; `Granularity::Seconds` builds one wide seconds cell and
/// disables focus movement, since there is nowhere to move it.
///
/// # Examples
///
/// ```rust
/// use repeat_beep::app::{new, Granularity};
///
/// let widget = new(Granularity::Hms);
/// assert_eq!(widget.total_seconds(), 10);
/// assert!(!widget.engine().running());
/// ```
pub fn new(granularity: Granularity) -> Model {
    let fields = match granularity {
        Granularity::Hms => vec![
            field::new("Hours", 0, MAX_HOURS),
            field::new("Minutes", 0, 59),
            field::new("Seconds", 0, 59).with_value(interval::DEFAULT_DURATION_SECS),
        ],
        Granularity::Seconds => vec![
            field::new("Seconds", 0, MAX_TOTAL_SECS).with_value(interval::DEFAULT_DURATION_SECS)
        ],
    };

    let mut model = Model {
        keys: KeyMap::default(),
        styles: Styles::default(),
        granularity,
        fields,
        focused: 0,
        engine: interval::new(interval::DEFAULT_DURATION_SECS),
        help: help::Model::new(),
    };
    model.fields[0].focus();
    model.sync_controls();
    model
}

impl Model {
    /// Sets the interval, splitting it across the input cells.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use repeat_beep::app::{new, Granularity};
    ///
    /// let widget = new(Granularity::Hms).with_duration(7325);
    /// assert_eq!(widget.total_seconds(), 7325); // 02:02:05
    /// ```
    pub fn with_duration(mut self, secs: u64) -> Self {
        self.set_duration(secs);
        self
    }

    /// Sets the tone sounded at the top of every cycle.
    pub fn with_tone(mut self, tone: Tone) -> Self {
        self.engine.set_tone(tone);
        self
    }

    /// Returns which entry style the widget was built with.
    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// Returns the countdown engine, for inspecting its state.
    pub fn engine(&self) -> &interval::Model {
        &self.engine
    }

    /// The interval currently entered across the field row, in seconds.
    pub fn total_seconds(&self) -> u64 {
        match self.granularity {
            Granularity::Hms => {
                self.fields[0].value() * 3600 + self.fields[1].value() * 60 + self.fields[2].value()
            }
            Granularity::Seconds => self.fields[0].value(),
        }
    }

    /// Replaces the configured interval, in seconds.
    ///
    /// The value is distributed across the cells (clamped to what they can
    /// express) and handed to the engine. Ignored while running.
    pub fn set_duration(&mut self, secs: u64) {
        if self.engine.running() {
            return;
        }
        let secs = secs.min(MAX_TOTAL_SECS);
        match self.granularity {
            Granularity::Hms => {
                self.fields[0].set_value(secs / 3600);
                self.fields[1].set_value((secs % 3600) / 60);
                self.fields[2].set_value(secs % 60);
            }
            Granularity::Seconds => self.fields[0].set_value(secs),
        }
        self.sync_controls();
    }

    /// Moves focus along the field row, wrapping at either end.
    fn move_focus(&mut self, step: isize) -> Option<Cmd> {
        let count = self.fields.len() as isize;
        self.fields[self.focused].blur();
        self.focused = (self.focused as isize + step).rem_euclid(count) as usize;
        self.fields[self.focused].focus()
    }

    /// Re-derives everything that depends on the fields and the engine
    /// state: the engine's duration, the fields' read-only flag, and which
    /// bindings are live. Idempotent, called after every mutation.
    fn sync_controls(&mut self) {
        self.engine.set_duration(self.total_seconds());
        let running = self.engine.running();

        for field in &mut self.fields {
            field.set_read_only(running);
            field.key_map.adjust.set_enabled(!running);
            field.key_map.erase.set_enabled(!running);
        }

        let movable = self.fields.len() > 1 && !running;
        self.keys.next_field.set_enabled(movable);
        self.keys.prev_field.set_enabled(movable);

        // Start needs a non-zero interval; stop is always available.
        self.keys
            .start_stop
            .set_enabled(running || self.engine.can_start());
    }

    /// Routes messages to the fields and the engine.
    ///
    /// Key messages drive focus movement, the start/stop toggle and the
    /// focused field's editing; anything else is forwarded to the engine.
    /// While the engine runs, every editing binding is disabled, so the
    /// only key that still does anything is stop.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            if self.keys.start_stop.matches(key_msg) {
                return Some(self.engine.toggle());
            }
            if self.keys.next_field.matches(key_msg) {
                return self.move_focus(1);
            }
            if self.keys.prev_field.matches(key_msg) {
                return self.move_focus(-1);
            }

            let cmd = self.fields[self.focused].update(&msg);
            self.sync_controls();
            return cmd;
        }

        let cmd = self.engine.update(msg);
        self.sync_controls();
        cmd
    }

    /// Renders the widget: title, field row, countdown line (blank while
    /// idle, so the layout never jumps), key help and footer.
    pub fn view(&self) -> String {
        let title = self.styles.title.render("⏳ Repeat Timer");

        let cells: Vec<String> = self.fields.iter().map(field::Model::view).collect();
        let mut parts: Vec<&str> = Vec::with_capacity(cells.len() * 2);
        for (i, cell) in cells.iter().enumerate() {
            if i > 0 {
                parts.push("  ");
            }
            parts.push(cell.as_str());
        }
        let row = lipgloss::join_horizontal(lipgloss::TOP, &parts);

        let countdown = if self.engine.running() {
            let remaining = match self.granularity {
                Granularity::Hms => self.engine.view(),
                Granularity::Seconds => format!("{}s", self.engine.countdown()),
            };
            self.styles
                .countdown
                .render(&format!("Next beep in {}", remaining))
        } else {
            String::new()
        };

        format!(
            "{}\n\n{}\n\n{}\n\n{}\n{}",
            title,
            row,
            countdown,
            self.help.view(self),
            self.styles.footer.render("Plays a beep every interval.")
        )
    }
}

impl key::KeyMap for Model {
    fn short_help(&self) -> Vec<&Binding> {
        let editing = &self.fields[self.focused].key_map;
        vec![
            &self.keys.next_field,
            &editing.adjust,
            &editing.erase,
            &self.keys.start_stop,
        ]
    }

    fn full_help(&self) -> Vec<Vec<&Binding>> {
        let editing = &self.fields[self.focused].key_map;
        vec![
            vec![&self.keys.next_field, &self.keys.prev_field],
            vec![&editing.adjust, &editing.erase],
            vec![&self.keys.start_stop],
        ]
    }
}

impl BubbleTeaModel for Model {
    /// Creates the hms form of the widget, idle at ten seconds.
    fn init() -> (Self, Option<Cmd>) {
        (new(Granularity::Hms), None)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        self.update(msg)
    }

    fn view(&self) -> String {
        self.view()
    }
}

impl Default for Model {
    fn default() -> Self {
        new(Granularity::Hms)
    }
}
