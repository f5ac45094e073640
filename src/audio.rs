//! Sound effect dispatch
//!
//! The core only decides *when* a sound plays. Hosts plug in an
//! [`AudioSink`] that knows how to play it; playback is fire-and-forget.

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Skater left the ground
    Jump,
    /// Gem collected
    GemPickup,
    /// Run ended
    GameOver,
    /// New high score
    HighScore,
}

impl SoundEffect {
    /// Asset name a sample-based sink would load
    pub fn asset_name(&self) -> &'static str {
        match self {
            SoundEffect::Jump => "jump.wav",
            SoundEffect::GemPickup => "gem.wav",
            SoundEffect::GameOver => "game_over.wav",
            SoundEffect::HighScore => "high_score.wav",
        }
    }
}

/// Playback backend supplied by the host
pub trait AudioSink {
    /// Start playing `effect` at `volume` (0.0 - 1.0); must not block
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Logs sounds instead of playing them (headless hosts)
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::debug!("♪ {} at {:.2}", effect.asset_name(), volume);
    }
}

/// Remembers what was played
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    pub played: Vec<SoundEffect>,
}

impl AudioSink for RecordingSink {
    fn play(&mut self, effect: SoundEffect, _volume: f32) {
        self.played.push(effect);
    }
}

/// Audio manager for the game
pub struct AudioManager<S: AudioSink> {
    sink: S,
    sfx_volume: f32,
    muted: bool,
}

impl<S: AudioSink> AudioManager<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            sfx_volume: 0.8,
            muted: false,
        }
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
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.sink.play(effect, vol);
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_muted_plays_nothing() {
        let mut audio = AudioManager::new(RecordingSink::default());
        audio.set_muted(true);
        audio.play(SoundEffect::Jump);
        assert!(audio.sink().played.is_empty());

        audio.set_muted(false);
        audio.play(SoundEffect::Jump);
        assert_eq!(audio.sink().played, vec![SoundEffect::Jump]);
    }

    #[test]
    fn test_zero_volume_plays_nothing() {
        let mut audio = AudioManager::new(RecordingSink::default());
        audio.set_sfx_volume(-1.0);
        audio.play(SoundEffect::GemPickup);
        assert!(audio.sink().played.is_empty());
    }
}
