//! Audio system using rodio
//!
//! Procedurally generated sound effects - no external files needed!
//! Each effect owns one sink; retriggering an effect stops the previous
//! instance before playing again, so rapid hits never layer.

use std::collections::HashMap;
use std::time::Duration;

use rodio::source::{SineWave, Source};
use rodio::{OutputStream, OutputStreamHandle, Sink};

use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Ball hits a side or the top wall
    WallHit,
    /// Ball destroys a block
    BlockHit,
    /// Last life lost
    GameOver,
    /// Every block cleared
    Victory,
}

/// One sine tone in an effect
#[derive(Debug, Clone, Copy)]
struct Tone {
    freq: f32,
    millis: u64,
    gain: f32,
}

const fn tone(freq: f32, millis: u64, gain: f32) -> Tone {
    Tone { freq, millis, gain }
}

/// Short high ping
const WALL_HIT_TONES: [Tone; 1] = [tone(440.0, 60, 0.3)];
/// Bright two-step chirp
const BLOCK_HIT_TONES: [Tone; 2] = [tone(660.0, 40, 0.4), tone(880.0, 50, 0.35)];
/// Falling three-note phrase
const GAME_OVER_TONES: [Tone; 3] = [
    tone(392.0, 220, 0.5),
    tone(330.0, 220, 0.5),
    tone(262.0, 420, 0.5),
];
/// Rising arpeggio
const VICTORY_TONES: [Tone; 4] = [
    tone(523.0, 120, 0.45),
    tone(659.0, 120, 0.45),
    tone(784.0, 120, 0.45),
    tone(1047.0, 360, 0.45),
];

impl SoundEffect {
    pub const ALL: [SoundEffect; 4] = [
        SoundEffect::WallHit,
        SoundEffect::BlockHit,
        SoundEffect::GameOver,
        SoundEffect::Victory,
    ];

    /// Tones played back to back
    fn tones(self) -> &'static [Tone] {
        match self {
            SoundEffect::WallHit => &WALL_HIT_TONES,
            SoundEffect::BlockHit => &BLOCK_HIT_TONES,
            SoundEffect::GameOver => &GAME_OVER_TONES,
            SoundEffect::Victory => &VICTORY_TONES,
        }
    }

    /// Total playback length
    pub fn duration(self) -> Duration {
        Duration::from_millis(self.tones().iter().map(|t| t.millis).sum())
    }
}

/// Open output device; the stream must outlive every sink
struct Output {
    _stream: OutputStream,
    handle: OutputStreamHandle,
}

/// Audio manager for the game
pub struct AudioManager {
    output: Option<Output>,
    /// Latest sink per effect, for stop-then-play
    sinks: HashMap<SoundEffect, Sink>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    /// Open the default output device; without one the game runs silent
    pub fn new() -> Self {
        let output = match OutputStream::try_default() {
            Ok((stream, handle)) => Some(Output {
                _stream: stream,
                handle,
            }),
            Err(err) => {
                log::warn!("Audio output unavailable, running silent: {}", err);
                None
            }
        };
        Self {
            output,
            ..Self::silent()
        }
    }

    /// Manager that never opens a device
    pub fn silent() -> Self {
        Self {
            output: None,
            sinks: HashMap::new(),
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_master_volume(settings.master_volume);
        self.set_sfx_volume(settings.sfx_volume);
        self.set_muted(settings.muted);
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect, cutting off its previous instance
    pub fn play(&mut self, effect: SoundEffect) {
        if let Some(previous) = self.sinks.remove(&effect) {
            previous.stop();
        }

        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        let Some(output) = &self.output else { return };

        let sink = match Sink::try_new(&output.handle) {
            Ok(sink) => sink,
            Err(err) => {
                log::debug!("Could not play {:?}: {}", effect, err);
                return;
            }
        };
        sink.set_volume(vol);
        for t in effect.tones() {
            sink.append(
                SineWave::new(t.freq)
                    .take_duration(Duration::from_millis(t.millis))
                    .amplify(t.gain),
            );
        }
        log::debug!("Playing {:?} for {:?}", effect, effect.duration());
        self.sinks.insert(effect, sink);
    }

    /// Stop everything that is playing
    pub fn stop_all(&mut self) {
        for (_, sink) in self.sinks.drain() {
            sink.stop();
        }
    }
}
