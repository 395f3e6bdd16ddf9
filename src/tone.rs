//! Audio tones for the interval timer.
//!
//! A [`Tone`] describes a sine beep (frequency, length, volume). [`emit`]
//! plays one synchronously: it opens the default output device, plays the
//! tone to completion, and releases the device again, so nothing is held
//! between beeps and other applications keep access to the device.
//! [`dispatch`] does the same from a background thread for callers that
//! must not block, swallowing errors so a machine without a sound device
//! runs silently instead of failing.

use rodio::source::SineWave;
use rodio::{OutputStream, PlayError, Sink, Source, StreamError};
use std::time::Duration;

/// Audible frequency range accepted by [`Tone::new`].
const MIN_FREQUENCY_HZ: f32 = 20.0;
const MAX_FREQUENCY_HZ: f32 = 20_000.0;

/// Tone length bounds accepted by [`Tone::new`].
const MIN_DURATION: Duration = Duration::from_millis(10);
const MAX_DURATION: Duration = Duration::from_secs(10);

const DEFAULT_VOLUME: f32 = 0.8;

/// The standard interval beep: a short 440 Hz sine tone.
pub const BEEP: Tone = Tone {
    frequency_hz: 440.0,
    duration: Duration::from_millis(200),
    volume: DEFAULT_VOLUME,
};

/// A brighter variant, one octave above [`BEEP`].
pub const HIGH_BEEP: Tone = Tone {
    frequency_hz: 880.0,
    duration: Duration::from_millis(200),
    volume: DEFAULT_VOLUME,
};

/// A softer variant below [`BEEP`].
pub const LOW_BEEP: Tone = Tone {
    frequency_hz: 330.0,
    duration: Duration::from_millis(200),
    volume: DEFAULT_VOLUME,
};

/// A sine tone: frequency, length and playback volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    frequency_hz: f32,
    duration: Duration,
    volume: f32,
}

impl Default for Tone {
    fn default() -> Self {
        BEEP
    }
}

impl Tone {
    /// Creates a tone, clamping the frequency to the audible range
    /// (20 Hz to 20 kHz) and the length to between 10 ms and 10 s.
    pub fn new(frequency_hz: f32, duration: Duration) -> Self {
        Self {
            frequency_hz: frequency_hz.clamp(MIN_FREQUENCY_HZ, MAX_FREQUENCY_HZ),
            duration: duration.clamp(MIN_DURATION, MAX_DURATION),
            volume: DEFAULT_VOLUME,
        }
    }

    /// Sets how long the tone plays for, clamped like [`Tone::new`].
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration.clamp(MIN_DURATION, MAX_DURATION);
        self
    }

    /// Sets the playback volume, clamped to `0.0..=1.0`.
    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = volume.clamp(0.0, 1.0);
        self
    }

    /// The tone frequency in hertz.
    pub fn frequency_hz(&self) -> f32 {
        self.frequency_hz
    }

    /// How long the tone plays for.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// The playback volume in `0.0..=1.0`.
    pub fn volume(&self) -> f32 {
        self.volume
    }
}

/// Errors from tone playback.
#[derive(Debug, thiserror::Error)]
pub enum ToneError {
    /// No audio output device was available.
    #[error("audio output device not available: {0}")]
    DeviceNotAvailable(#[from] StreamError),
    /// The device was opened but playback could not start.
    #[error("tone playback failed: {0}")]
    PlaybackFailed(#[from] PlayError),
}

/// Plays a tone to completion on the default output device.
///
/// Blocks for the tone's duration. The device is acquired at the start of
/// the call and released before it returns.
pub fn emit(tone: &Tone) -> Result<(), ToneError> {
    let (_stream, handle) = OutputStream::try_default()?;
    let sink = Sink::try_new(&handle)?;
    sink.set_volume(tone.volume);
    sink.append(SineWave::new(tone.frequency_hz).take_duration(tone.duration));
    sink.sleep_until_end();
    Ok(())
}

/// Plays a tone on a background thread without blocking the caller.
///
/// Playback failures are ignored: on a machine with no sound device the
/// timer keeps counting and the beeps are simply silent.
pub fn dispatch(tone: Tone) {
    std::thread::spawn(move || {
        let _ = emit(&tone);
    });
}
