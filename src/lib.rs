#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/repeat-beep/")]

//! # repeat-beep
//!
//! A repeat-interval beep timer for terminal applications, built as a set of
//! reusable components for [bubbletea-rs](https://github.com/whit3rabbit/bubbletea-rs).
//!
//! ## Overview
//!
//! The user dials in an interval, presses start, and an audible beep sounds
//! each time the interval elapses, over and over until stopped. Each piece of
//! that flow is its own component following the Elm Architecture pattern with
//! `update()` and `view()` methods, so the parts can be embedded individually
//! or used through the assembled [`app::Model`] widget.
//!
//! ## Components
//!
//! - **`app`**: the assembled widget with field row, countdown and key help
//! - **`interval`**: repeating countdown engine driven by a 1-second heartbeat
//! - **`field`**: focusable numeric input cell with clamping bounds
//! - **`tone`**: short sine pulses played through the default audio device
//! - **`key`**: type-safe key bindings with help metadata
//! - **`help`**: renders a key map as a one-line or multi-column help view
//!
//! ## Focus Management
//!
//! Focusable components implement the [`Component`] trait:
//!
//! ```rust
//! use repeat_beep::prelude::*;
//! use bubbletea_rs::Cmd;
//!
//! fn handle_focus<T: Component>(component: &mut T) {
//!     let _cmd: Option<Cmd> = component.focus();
//!     assert!(component.focused());
//!     component.blur();
//!     assert!(!component.focused());
//! }
//!
//! let mut seconds = field_new("Seconds", 0, 59);
//! handle_focus(&mut seconds);
//! ```
//!
//! ## Key Bindings
//!
//! Components declare their keys through the `key` module, which pairs each
//! binding with help text:
//!
//! ```rust
//! use repeat_beep::key::{Binding, KeyMap};
//! use crossterm::event::{KeyCode, KeyModifiers};
//!
//! let start_stop = Binding::new(vec![KeyCode::Enter, KeyCode::Char(' ')])
//!     .with_help("enter", "start/stop");
//!
//! let mute = Binding::new(vec![(KeyCode::Char('m'), KeyModifiers::CONTROL)])
//!     .with_help("ctrl+m", "mute");
//!
//! struct MyKeyMap {
//!     start_stop: Binding,
//!     mute: Binding,
//! }
//!
//! impl KeyMap for MyKeyMap {
//!     fn short_help(&self) -> Vec<&Binding> {
//!         vec![&self.start_stop, &self.mute]
//!     }
//!
//!     fn full_help(&self) -> Vec<Vec<&Binding>> {
//!         vec![vec![&self.start_stop], vec![&self.mute]]
//!     }
//! }
//! ```
//!
//! ## Integration with bubbletea-rs
//!
//! The widget drops straight into a host model:
//!
//! ```rust
//! use repeat_beep::prelude::*;
//! use bubbletea_rs::{Model, Cmd, Msg};
//!
//! struct Host {
//!     widget: App,
//! }
//!
//! impl Model for Host {
//!     fn init() -> (Self, Option<Cmd>) {
//!         (Self { widget: app_new(Granularity::Hms) }, None)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         self.widget.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.widget.view()
//!     }
//! }
//! ```
//!
//! `app::Model` implements `bubbletea_rs::Model` itself, so a host that wants
//! nothing but the timer can run it directly as the program model.
//!
//! ## Quick Start
//!
//! Add repeat-beep to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! repeat-beep = "0.1.0"
//! bubbletea-rs = "0.0.7"
//! crossterm = "0.29"
//! ```
//!
//! For convenience, you can import the prelude:
//!
//! ```rust
//! use repeat_beep::prelude::*;
//! ```

pub mod app;
pub mod field;
pub mod help;
pub mod interval;
pub mod key;
pub mod tone;

use bubbletea_rs::Cmd;

/// Core trait for components that support focus management.
///
/// Only the focused component receives keyboard input, and components render
/// differently when focused, so focus changes go through one interface:
/// `focus()` marks the component active (and may return a command for setup
/// work such as starting an animation), `blur()` deactivates it, and
/// `focused()` reports the current state.
///
/// # Examples
///
/// ```rust
/// use repeat_beep::prelude::*;
///
/// let mut hours = field_new("Hours", 0, 99);
/// assert!(!hours.focused());
///
/// hours.focus();
/// assert!(hours.focused());
///
/// hours.blur();
/// assert!(!hours.focused());
/// ```
pub trait Component {
    /// Sets the component to focused state.
    ///
    /// May return a command for initialization tasks that should run when
    /// the component becomes active.
    fn focus(&mut self) -> Option<Cmd>;

    /// Sets the component to blurred (unfocused) state.
    fn blur(&mut self);

    /// Returns the current focus state of the component.
    fn focused(&self) -> bool;
}

pub use app::{
    new as app_new, Granularity, KeyMap as AppKeyMap, Model as App, Styles as AppStyles,
};
pub use field::{new as field_new, KeyMap as FieldKeyMap, Model as Field};
pub use help::{Model as HelpModel, Styles as HelpStyles};
pub use interval::{
    new as interval_new, BeepMsg, Model as Interval, StartStopMsg, TickMsg, DEFAULT_DURATION_SECS,
    HEARTBEAT,
};
pub use key::{
    new_binding, with_disabled, with_help, with_keys, with_keys_str, Binding, BindingOpt,
    Help as KeyHelp, KeyMap, KeyPress,
};
pub use tone::{dispatch, emit, Tone, ToneError, BEEP, HIGH_BEEP, LOW_BEEP};

/// Prelude module for convenient imports.
///
/// Re-exports the most commonly used types and functions so a host can pull
/// everything in with a single `use`:
///
/// ```rust
/// use repeat_beep::prelude::*;
/// ```
pub mod prelude {
    pub use crate::app::{
        new as app_new, Granularity, KeyMap as AppKeyMap, Model as App, Styles as AppStyles,
    };
    pub use crate::field::{new as field_new, KeyMap as FieldKeyMap, Model as Field};
    pub use crate::help::Model as HelpModel;
    pub use crate::interval::{
        new as interval_new, BeepMsg, Model as Interval, StartStopMsg, TickMsg,
    };
    pub use crate::key::{
        new_binding, with_disabled, with_help, with_keys, with_keys_str, Binding,
        Help as KeyHelp, KeyMap, KeyPress,
    };
    pub use crate::tone::{Tone, ToneError, BEEP, HIGH_BEEP, LOW_BEEP};
    pub use crate::Component;
}
