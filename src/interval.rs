//! Repeating countdown component for Bubble Tea applications.
//!
//! Unlike a one-shot timeout, this component counts down and then starts
//! over, sounding an audible tone at the top of every cycle. A single
//! one-second heartbeat drives both the on-screen countdown and the beep
//! schedule, so the two can never drift apart.
//!
//! # Basic Usage
//!
//! ```rust
//! use repeat_beep::interval;
//!
//! // Count down from 10 seconds, beeping each time it wraps around.
//! let engine = interval::new(10);
//! assert_eq!(engine.countdown(), 10);
//! assert!(!engine.running()); // idle until started
//! ```
//!
//! # bubbletea-rs Integration
//!
//! ```rust
//! use bubbletea_rs::{Model as BubbleTeaModel, Msg, Cmd};
//! use repeat_beep::interval::{self, BeepMsg};
//!
//! struct MyApp {
//!     engine: interval::Model,
//!     beeps: u64,
//! }
//!
//! impl BubbleTeaModel for MyApp {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let engine = interval::new(30);
//!         let cmd = engine.start();
//!         (Self { engine, beeps: 0 }, Some(cmd))
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         // Count completed cycles
//!         if let Some(beep) = msg.downcast_ref::<BeepMsg>() {
//!             if beep.id == self.engine.id() {
//!                 self.beeps += 1;
//!             }
//!         }
//!
//!         // Forward engine messages
//!         self.engine.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         format!("Next beep in {} ({} so far)", self.engine.view(), self.beeps)
//!     }
//! }
//! ```

use crate::tone::{self, Tone};
use bubbletea_rs::{tick as bubbletea_tick, Cmd, Model as BubbleTeaModel, Msg};
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

// Internal ID management for engine instances
static LAST_ID: AtomicI64 = AtomicI64::new(0);

/// Generates unique identifiers for engine instances.
///
/// Each engine gets its own ID so that several of them can coexist in one
/// application without stealing each other's messages. IDs are handed out
/// atomically, starting from 1.
fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Cycle length used when none is configured, in seconds.
pub const DEFAULT_DURATION_SECS: u64 = 10;

/// Time between countdown updates while the engine runs.
pub const HEARTBEAT: Duration = Duration::from_secs(1);

/// Message sent to start or stop the engine.
///
/// Produced by [`Model::start`], [`Model::stop`] and [`Model::toggle`].
/// Carries the target engine's ID so that unrelated engines leave it
/// alone; an ID of 0 addresses every engine.
#[derive(Debug, Clone)]
pub struct StartStopMsg {
    /// ID of the engine this message is addressed to.
    pub id: i64,
    pub(crate) running: bool,
}

/// Heartbeat message that advances the countdown by one second.
///
/// The embedded tag invalidates stale heartbeats: whenever the engine
/// re-arms, it bumps its tag, and ticks carrying an older tag are dropped.
/// Without this, a quick stop/start could leave two heartbeats in flight
/// and make the countdown run at double speed.
#[derive(Debug, Clone)]
pub struct TickMsg {
    /// ID of the engine this message belongs to.
    pub id: i64,
    tag: i64,
}

/// Message sent each time the countdown wraps and the tone has been queued.
///
/// Applications can watch for this to count cycles or flash the UI; the
/// engine itself uses it to re-arm the heartbeat after a beep.
#[derive(Debug, Clone)]
pub struct BeepMsg {
    /// ID of the engine that beeped.
    pub id: i64,
}

/// A repeating countdown that beeps every time it reaches zero.
///
/// The model holds the configured cycle length and the seconds remaining in
/// the current cycle. While running, a one-second heartbeat decrements the
/// countdown; when it wraps, the configured [`Tone`] plays on a background
/// thread and the countdown snaps back to the full length. The first beep
/// sounds immediately on start, so a 10-second cycle beeps at 0s, 10s, 20s
/// and so on.
///
/// State only changes in response to messages, which keeps the engine
/// deterministic and lets it compose with other components in a Bubble Tea
/// update loop.
#[derive(Debug, Clone)]
pub struct Model {
    duration: u64,
    countdown: u64,
    tone: Tone,
    id: i64,
    tag: i64,
    running: bool,
}

/// Creates an idle engine with the given cycle length in seconds.
///
/// The engine starts stopped; send the command returned by
/// [`Model::start`] through the runtime to begin counting down. The
/// countdown is primed to the full cycle length and the audible cue
/// defaults to [`tone::BEEP`].
///
/// # Examples
///
/// ```rust
/// use repeat_beep::interval::new;
///
/// let engine = new(90);
/// assert_eq!(engine.duration(), 90);
/// assert_eq!(engine.countdown(), 90);
/// assert!(!engine.running());
/// assert_eq!(engine.view(), "00:01:30");
/// ```
pub fn new(duration_secs: u64) -> Model {
    Model {
        duration: duration_secs,
        countdown: duration_secs,
        tone: tone::BEEP,
        id: next_id(),
        tag: 0,
        running: false,
    }
}

impl Model {
    /// Sets the tone sounded at the top of each cycle.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use repeat_beep::{interval, tone};
    ///
    /// let engine = interval::new(10).with_tone(tone::HIGH_BEEP);
    /// ```
    pub fn with_tone(mut self, tone: Tone) -> Self {
        self.set_tone(tone);
        self
    }

    /// Replaces the tone sounded at the top of each cycle.
    pub fn set_tone(&mut self, tone: Tone) {
        self.tone = tone;
    }

    /// Returns this engine's unique identifier.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Reports whether the engine is currently counting down.
    pub fn running(&self) -> bool {
        self.running
    }

    /// Returns the configured cycle length in seconds.
    pub fn duration(&self) -> u64 {
        self.duration
    }

    /// Returns the seconds remaining in the current cycle.
    pub fn countdown(&self) -> u64 {
        self.countdown
    }

    /// Reports whether the engine has a cycle length it can run with.
    ///
    /// A zero-length cycle has nothing to count down, so start requests
    /// are refused until the duration is at least one second.
    pub fn can_start(&self) -> bool {
        self.duration >= 1
    }

    /// Replaces the cycle length, in seconds.
    ///
    /// The countdown is re-primed to the new length. Changes are ignored
    /// while the engine is running; stop it first.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use repeat_beep::interval::new;
    ///
    /// let mut engine = new(10);
    /// engine.set_duration(25);
    /// assert_eq!(engine.duration(), 25);
    /// assert_eq!(engine.countdown(), 25);
    /// ```
    pub fn set_duration(&mut self, duration_secs: u64) {
        if self.running {
            return;
        }
        self.duration = duration_secs;
        self.countdown = duration_secs;
    }

    /// Generates a command that starts the engine.
    ///
    /// When the runtime delivers the resulting [`StartStopMsg`], the
    /// countdown resets to the full cycle length and the first beep sounds
    /// immediately. Starting an engine that is already running, or whose
    /// duration is zero, has no effect.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use repeat_beep::interval::new;
    ///
    /// let engine = new(10);
    /// let _cmd = engine.start();
    /// // The engine flips to running once the command's message is processed.
    /// assert!(!engine.running());
    /// ```
    pub fn start(&self) -> Cmd {
        self.start_stop(true)
    }

    /// Generates a command that stops the engine.
    ///
    /// Stopping also re-primes the countdown, so a later start begins a
    /// fresh cycle rather than resuming mid-cycle.
    pub fn stop(&self) -> Cmd {
        self.start_stop(false)
    }

    /// Generates a command that flips the engine between running and
    /// stopped.
    ///
    /// Handy for a single pause/resume key:
    ///
    /// ```rust
    /// use repeat_beep::interval::new;
    ///
    /// let engine = new(120);
    /// let _cmd = engine.toggle(); // starts, since the engine is idle
    /// ```
    pub fn toggle(&self) -> Cmd {
        self.start_stop(!self.running)
    }

    /// Internal start/stop command constructor.
    fn start_stop(&self, running: bool) -> Cmd {
        let id = self.id;
        bubbletea_tick(Duration::from_nanos(1), move |_| {
            Box::new(StartStopMsg { id, running }) as Msg
        })
    }

    /// Schedules the next heartbeat, invalidating any earlier one.
    fn tick(&mut self) -> Cmd {
        self.tag += 1;
        let id = self.id;
        let tag = self.tag;

        bubbletea_tick(HEARTBEAT, move |_| Box::new(TickMsg { id, tag }) as Msg)
    }

    /// Queues the audible cue and reports the wrap back to the update loop.
    ///
    /// The tone plays on a detached thread, so the heartbeat keeps its
    /// one-second cadence no matter how long the audio device takes.
    fn beep(&self) -> Cmd {
        let id = self.id;
        let tone = self.tone;

        bubbletea_tick(Duration::from_nanos(1), move |_| {
            tone::dispatch(tone);
            Box::new(BeepMsg { id }) as Msg
        })
    }

    /// Handles engine messages and advances the countdown.
    ///
    /// Messages addressed to other engines are ignored, as are heartbeats
    /// whose tag no longer matches. Everything else returns the command
    /// that keeps the cycle going:
    ///
    /// - [`StartStopMsg`]: flips `running`; on start, resets the countdown
    ///   and returns the first beep command
    /// - [`TickMsg`]: decrements the countdown, or wraps it and beeps
    /// - [`BeepMsg`]: re-arms the heartbeat after a beep
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_rs::Msg;
    /// use repeat_beep::interval::new;
    ///
    /// let mut engine = new(10);
    /// let unrelated: Msg = Box::new(String::from("not for the engine"));
    /// assert!(engine.update(unrelated).is_none());
    /// ```
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(start_stop) = msg.downcast_ref::<StartStopMsg>() {
            if start_stop.id != 0 && start_stop.id != self.id {
                return None;
            }
            // Redundant transitions would reset the cycle mid-flight.
            if start_stop.running == self.running {
                return None;
            }
            if start_stop.running && !self.can_start() {
                return None;
            }

            self.tag += 1;
            self.running = start_stop.running;
            self.countdown = self.duration;

            if self.running {
                // Every cycle opens with a beep, including the first.
                return Some(self.beep());
            }
            return None;
        }

        if let Some(tick) = msg.downcast_ref::<TickMsg>() {
            if !self.running || (tick.id != 0 && tick.id != self.id) {
                return None;
            }

            // If a tag is set, and it's not the one we expect, reject the
            // message. This prevents the engine from receiving too many
            // messages and thus ticking too fast.
            if tick.tag > 0 && tick.tag != self.tag {
                return None;
            }

            if self.countdown > 1 {
                self.countdown -= 1;
                return Some(self.tick());
            }

            // Wrapped: start the next cycle and sound the cue.
            self.countdown = self.duration;
            return Some(self.beep());
        }

        if let Some(beep) = msg.downcast_ref::<BeepMsg>() {
            if !self.running || beep.id != self.id {
                return None;
            }
            return Some(self.tick());
        }

        None
    }

    /// Renders the countdown as a zero-padded `HH:MM:SS` clock.
    ///
    /// Hours widen past two digits when the countdown calls for it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use repeat_beep::interval::new;
    ///
    /// assert_eq!(new(0).view(), "00:00:00");
    /// assert_eq!(new(75).view(), "00:01:15");
    /// assert_eq!(new(3661).view(), "01:01:01");
    /// ```
    pub fn view(&self) -> String {
        let hours = self.countdown / 3600;
        let minutes = (self.countdown % 3600) / 60;
        let seconds = self.countdown % 60;

        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    }
}

impl BubbleTeaModel for Model {
    /// Creates a ten-second engine and starts it straight away.
    fn init() -> (Self, Option<Cmd>) {
        let model = new(DEFAULT_DURATION_SECS);
        let cmd = model.start();
        (model, Some(cmd))
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        self.update(msg)
    }

    fn view(&self) -> String {
        self.view()
    }
}

impl Default for Model {
    /// Creates an idle engine with the default ten-second cycle.
    fn default() -> Self {
        new(DEFAULT_DURATION_SECS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_engine() {
        let engine = new(30);

        assert_eq!(engine.duration(), 30);
        assert_eq!(engine.countdown(), 30);
        assert!(engine.id() > 0); // Should have unique ID
        assert!(!engine.running()); // Should start idle
        assert!(engine.can_start());
    }

    #[test]
    fn test_unique_ids() {
        let engine1 = new(10);
        let engine2 = new(20);

        assert_ne!(engine1.id(), engine2.id());
    }

    #[test]
    fn test_zero_duration_cannot_start() {
        let mut engine = new(0);
        assert!(!engine.can_start());

        let start_msg = StartStopMsg {
            id: engine.id(),
            running: true,
        };

        let result = engine.update(Box::new(start_msg));
        assert!(result.is_none()); // Should refuse to start
        assert!(!engine.running());
    }

    #[test]
    fn test_start_msg_begins_cycle() {
        let mut engine = new(3);
        engine.countdown = 1; // Left over from an earlier run

        let start_msg = StartStopMsg {
            id: engine.id(),
            running: true,
        };

        let result = engine.update(Box::new(start_msg));
        assert!(result.is_some()); // Should return beep command
        assert!(engine.running());
        assert_eq!(engine.countdown(), 3); // Fresh cycle
    }

    #[test]
    fn test_broadcast_id_accepted() {
        // ID 0 addresses every engine
        let mut engine = new(5);

        let start_msg = StartStopMsg {
            id: 0,
            running: true,
        };

        let result = engine.update(Box::new(start_msg));
        assert!(result.is_some());
        assert!(engine.running());
    }

    #[test]
    fn test_wrong_id_rejected() {
        let mut engine = new(10);

        let wrong_msg = StartStopMsg {
            id: engine.id() + 999, // Wrong ID
            running: true,
        };

        let result = engine.update(Box::new(wrong_msg));
        assert!(result.is_none()); // Should reject
        assert!(!engine.running()); // State unchanged
    }

    #[test]
    fn test_redundant_start_ignored() {
        let mut engine = new(10);
        engine.running = true;
        engine.countdown = 4; // Mid-cycle

        let start_msg = StartStopMsg {
            id: engine.id(),
            running: true,
        };

        let result = engine.update(Box::new(start_msg));
        assert!(result.is_none()); // No spurious beep
        assert_eq!(engine.countdown(), 4); // Cycle not reset
    }

    #[test]
    fn test_stop_resets_countdown() {
        let mut engine = new(10);
        engine.running = true;
        engine.countdown = 4; // Mid-cycle

        let stop_msg = StartStopMsg {
            id: engine.id(),
            running: false,
        };

        let result = engine.update(Box::new(stop_msg));
        assert!(result.is_none()); // Stopping schedules nothing
        assert!(!engine.running());
        assert_eq!(engine.countdown(), 10); // Primed for the next run
    }

    #[test]
    fn test_tick_decrements_countdown() {
        let mut engine = new(5);
        engine.running = true;

        let tick_msg = TickMsg {
            id: engine.id(),
            tag: 0,
        };

        let result = engine.update(Box::new(tick_msg));
        assert!(result.is_some()); // Should return next heartbeat
        assert_eq!(engine.countdown(), 4);
    }

    #[test]
    fn test_tick_wraps_and_resets() {
        let mut engine = new(3);
        engine.running = true;
        engine.countdown = 1; // Last second of the cycle

        let tick_msg = TickMsg {
            id: engine.id(),
            tag: 0,
        };

        let result = engine.update(Box::new(tick_msg));
        assert!(result.is_some()); // Should return beep command
        assert_eq!(engine.countdown(), 3); // Back to the full cycle
        assert!(engine.running()); // Keeps going, unlike a one-shot timer
    }

    #[test]
    fn test_one_second_cycle_wraps_every_tick() {
        let mut engine = new(1);
        engine.running = true;

        let tick_msg = TickMsg {
            id: engine.id(),
            tag: 0,
        };

        let result = engine.update(Box::new(tick_msg));
        assert!(result.is_some());
        assert_eq!(engine.countdown(), 1);
    }

    #[test]
    fn test_stale_tag_rejected() {
        let mut engine = new(10);
        engine.running = true;
        engine.tag = 5; // Set specific tag

        let stale_tick = TickMsg {
            id: engine.id(),
            tag: 999, // Wrong tag
        };

        let result = engine.update(Box::new(stale_tick));
        assert!(result.is_none()); // Should reject
        assert_eq!(engine.countdown(), 10); // State unchanged
    }

    #[test]
    fn test_stopped_engine_rejects_ticks() {
        let mut engine = new(10);

        let tick_msg = TickMsg {
            id: engine.id(),
            tag: 0,
        };

        let result = engine.update(Box::new(tick_msg));
        assert!(result.is_none()); // Should reject when not running
        assert_eq!(engine.countdown(), 10);
    }

    #[test]
    fn test_restart_drops_stale_ticks() {
        let mut engine = new(10);
        engine.running = true;
        engine.tag = 7;

        // Stop and immediately restart; both transitions bump the tag.
        let stop_msg = StartStopMsg {
            id: engine.id(),
            running: false,
        };
        engine.update(Box::new(stop_msg));

        let start_msg = StartStopMsg {
            id: engine.id(),
            running: true,
        };
        engine.update(Box::new(start_msg));

        // A heartbeat armed before the stop carries the old tag.
        let stale_tick = TickMsg {
            id: engine.id(),
            tag: 7,
        };

        let result = engine.update(Box::new(stale_tick));
        assert!(result.is_none()); // Old heartbeat must die
        assert_eq!(engine.countdown(), 10);
    }

    #[test]
    fn test_beep_msg_rearms_heartbeat() {
        let mut engine = new(10);
        engine.running = true;
        let tag_before = engine.tag;

        let beep_msg = BeepMsg { id: engine.id() };

        let result = engine.update(Box::new(beep_msg));
        assert!(result.is_some()); // Should return next heartbeat
        assert_eq!(engine.tag, tag_before + 1); // Re-armed under a new tag
    }

    #[test]
    fn test_beep_msg_ignored_when_stopped() {
        let mut engine = new(10);

        let beep_msg = BeepMsg { id: engine.id() };

        let result = engine.update(Box::new(beep_msg));
        assert!(result.is_none());
    }

    #[test]
    fn test_full_cycle_sequence() {
        // Walk a 3-second cycle the way the runtime would drive it.
        let mut engine = new(3);

        let start_msg = StartStopMsg {
            id: engine.id(),
            running: true,
        };
        assert!(engine.update(Box::new(start_msg)).is_some()); // Beep at t=0

        let beep_msg = BeepMsg { id: engine.id() };
        assert!(engine.update(Box::new(beep_msg)).is_some()); // Heartbeat armed
        assert_eq!(engine.countdown(), 3);

        for expected in [2, 1] {
            let tick = TickMsg {
                id: engine.id(),
                tag: engine.tag,
            };
            assert!(engine.update(Box::new(tick)).is_some());
            assert_eq!(engine.countdown(), expected);
        }

        let wrap = TickMsg {
            id: engine.id(),
            tag: engine.tag,
        };
        assert!(engine.update(Box::new(wrap)).is_some()); // Beep at t=3
        assert_eq!(engine.countdown(), 3); // Next cycle under way
        assert!(engine.running());
    }

    #[test]
    fn test_set_duration_when_idle() {
        let mut engine = new(10);
        engine.set_duration(25);

        assert_eq!(engine.duration(), 25);
        assert_eq!(engine.countdown(), 25);
    }

    #[test]
    fn test_set_duration_ignored_while_running() {
        let mut engine = new(10);
        engine.running = true;
        engine.countdown = 6;

        engine.set_duration(99);

        assert_eq!(engine.duration(), 10);
        assert_eq!(engine.countdown(), 6);
    }

    #[test]
    fn test_start_stop_toggle_commands() {
        let engine = new(10);

        // These should return commands (not panic)
        let _start_cmd = engine.start();
        let _stop_cmd = engine.stop();
        let _toggle_cmd = engine.toggle();
    }

    #[test]
    fn test_with_tone() {
        let engine = new(10).with_tone(tone::HIGH_BEEP);
        assert_eq!(engine.tone, tone::HIGH_BEEP);
    }

    #[test]
    fn test_view_formats_clock() {
        assert_eq!(new(0).view(), "00:00:00");
        assert_eq!(new(9).view(), "00:00:09");
        assert_eq!(new(75).view(), "00:01:15");
        assert_eq!(new(3661).view(), "01:01:01");
        assert_eq!(new(360_000).view(), "100:00:00"); // Hours widen as needed
    }

    #[test]
    fn test_view_tracks_countdown() {
        let mut engine = new(65);
        engine.running = true;

        let tick_msg = TickMsg {
            id: engine.id(),
            tag: 0,
        };
        engine.update(Box::new(tick_msg));

        assert_eq!(engine.view(), "00:01:04");
    }

    #[test]
    fn test_default_engine() {
        let engine = Model::default();

        assert_eq!(engine.duration(), DEFAULT_DURATION_SECS);
        assert!(!engine.running());
    }
}
