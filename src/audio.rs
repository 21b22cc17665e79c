//! Audio trigger boundary
//!
//! The simulation emits named sound triggers; this module maps each to a
//! short synthesized tone and hands it to a backend. Playback itself lives
//! outside the crate.

use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Auto-fire launched an arrow
    ArrowFired,
    /// Arrow killed an enemy
    EnemyHit,
    /// Enemy reached the player
    GameOver,
    /// Final level cleared
    Victory,
}

impl SoundEffect {
    /// Trigger name as used by hosts
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundEffect::ArrowFired => "arrow-fired",
            SoundEffect::EnemyHit => "enemy-hit",
            SoundEffect::GameOver => "game-over",
            SoundEffect::Victory => "victory",
        }
    }

    /// Oscillator recipe for this effect
    pub fn tone(&self) -> Tone {
        match self {
            SoundEffect::ArrowFired => Tone::new(200.0, 0.1, Waveform::Square),
            SoundEffect::EnemyHit => Tone::new(400.0, 0.15, Waveform::Square),
            SoundEffect::GameOver => Tone::new(150.0, 0.5, Waveform::Sawtooth),
            SoundEffect::Victory => Tone::new(500.0, 0.8, Waveform::Sine),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
}

/// A single decaying oscillator note
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tone {
    /// Hz
    pub frequency: f32,
    /// Seconds until the gain ramp bottoms out
    pub duration: f32,
    pub waveform: Waveform,
    /// Starting gain before volume scaling
    pub gain: f32,
}

impl Tone {
    pub const START_GAIN: f32 = 0.3;

    pub fn new(frequency: f32, duration: f32, waveform: Waveform) -> Self {
        Self {
            frequency,
            duration,
            waveform,
            gain: Self::START_GAIN,
        }
    }
}

/// Whatever actually makes noise
pub trait AudioBackend {
    fn play_tone(&mut self, effect: SoundEffect, tone: Tone, volume: f32);
}

/// Backend that only logs; used by the headless host
#[derive(Debug, Default)]
pub struct LogBackend;

impl AudioBackend for LogBackend {
    fn play_tone(&mut self, effect: SoundEffect, tone: Tone, volume: f32) {
        log::debug!(
            "sound {} ({:?} {} Hz, {:.2}s, vol {:.2})",
            effect.as_str(),
            tone.waveform,
            tone.frequency,
            tone.duration,
            volume
        );
    }
}

/// Audio manager for the game
pub struct AudioManager<B: AudioBackend = LogBackend> {
    backend: B,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager<LogBackend> {
    fn default() -> Self {
        Self::new(LogBackend)
    }
}

impl<B: AudioBackend> AudioManager<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Manager configured from the player's settings
    pub fn from_settings(backend: B, settings: &Settings) -> Self {
        let mut manager = Self::new(backend);
        manager.set_master_volume(settings.master_volume);
        manager.set_sfx_volume(settings.sfx_volume);
        manager.set_muted(!settings.sound_enabled);
        manager
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

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.backend.play_tone(effect, effect.tone(), vol);
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}
