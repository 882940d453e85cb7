//! Audio cues driven by simulation events
//!
//! The simulation only reports what happened. This module turns those events
//! into sound cues with the right volumes and hands them to whatever backend
//! the host provides.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Glider jumped
    Jump,
    /// Glider crashed
    Crash,
    /// Background music, started once per session
    Music,
}

impl SoundEffect {
    /// Mix volume relative to the channel (0.0 - 1.0)
    pub fn base_volume(self) -> f32 {
        match self {
            SoundEffect::Jump => 0.3,
            SoundEffect::Crash => 0.6,
            SoundEffect::Music => 0.3,
        }
    }

    /// Whether the cue loops until stopped
    pub fn looping(self) -> bool {
        matches!(self, SoundEffect::Music)
    }

    /// Cue for a simulation event, if it makes a sound
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::JumpOccurred => Some(SoundEffect::Jump),
            GameEvent::CollisionOccurred => Some(SoundEffect::Crash),
            GameEvent::SessionStarted => Some(SoundEffect::Music),
            GameEvent::SpeedUp(_) => None,
        }
    }
}

/// A cue ready to play
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cue {
    pub effect: SoundEffect,
    pub volume: f32,
    pub looping: bool,
}

/// Something that can actually make noise
pub trait AudioBackend {
    fn play(&mut self, cue: Cue);
}

/// Backend that writes cues to the log (headless runs)
#[derive(Debug, Default)]
pub struct LogBackend;

impl AudioBackend for LogBackend {
    fn play(&mut self, cue: Cue) {
        log::debug!("Audio cue {:?} at volume {:.2}", cue.effect, cue.volume);
    }
}

/// Audio manager for the game
pub struct AudioManager<B: AudioBackend> {
    backend: B,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    music_playing: bool,
}

impl<B: AudioBackend> AudioManager<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
            music_playing: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume for an effect
    fn effective_volume(&self, effect: SoundEffect) -> f32 {
        if self.muted {
            return 0.0;
        }
        let channel = if effect == SoundEffect::Music {
            self.music_volume
        } else {
            self.sfx_volume
        };
        self.master_volume * channel * effect.base_volume()
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        // Music loops for the rest of the process once started
        if effect == SoundEffect::Music {
            if self.music_playing {
                return;
            }
            self.music_playing = true;
        }

        let volume = self.effective_volume(effect);
        if volume <= 0.0 {
            return;
        }
        self.backend.play(Cue {
            effect,
            volume,
            looping: effect.looping(),
        });
    }

    /// Play the cues for one frame's events
    pub fn handle_events(&mut self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}
