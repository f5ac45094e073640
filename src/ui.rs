//! Overlay and label collaborator
//!
//! The core never draws text. It records which menu overlay is up and emits
//! [`GameEvent`]s; [`present`] forwards them to whatever [`Hud`] and
//! [`AudioSink`] the host supplies.

use serde::{Deserialize, Serialize};

use crate::audio::{AudioManager, AudioSink, SoundEffect};
use crate::sim::GameEvent;

/// Menu overlay content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuOverlay {
    pub message: String,
    pub score: Option<u64>,
}

impl MenuOverlay {
    /// Shown at launch
    pub fn tap_to_play() -> Self {
        Self {
            message: "Tap to play".to_string(),
            score: None,
        }
    }

    /// Shown when a run ends
    pub fn game_over(score: u64) -> Self {
        Self {
            message: "Game Over!".to_string(),
            score: Some(score),
        }
    }

    /// Secondary line, if the overlay carries a score
    pub fn score_line(&self) -> Option<String> {
        self.score.map(|s| format!("Score: {}", format_score(s)))
    }
}

/// Scores are shown as at least four zero-padded digits
pub fn format_score(score: u64) -> String {
    format!("{:04}", score)
}

/// Label and overlay sink implemented by the host
pub trait Hud {
    fn show_overlay(&mut self, message: &str, score: Option<u64>);
    fn hide_overlay(&mut self);
    fn set_score_text(&mut self, score: u64);
    fn set_high_score_text(&mut self, high_score: u64);
}

/// Forward core events to the host's collaborators
///
/// Entity spawn/remove events are left for the renderer, which reads them
/// alongside a [`crate::sim::Snapshot`].
pub fn present<S: AudioSink>(events: &[GameEvent], hud: &mut impl Hud, audio: &mut AudioManager<S>) {
    for event in events {
        match event {
            GameEvent::ScoreChanged(score) => hud.set_score_text(*score),
            GameEvent::HighScoreChanged(high) => {
                hud.set_high_score_text(*high);
                if *high > 0 {
                    audio.play(SoundEffect::HighScore);
                }
            }
            GameEvent::ShowOverlay(overlay) => hud.show_overlay(&overlay.message, overlay.score),
            GameEvent::HideOverlay => hud.hide_overlay(),
            GameEvent::Jumped => audio.play(SoundEffect::Jump),
            GameEvent::GemRemoved { collected: true, .. } => audio.play(SoundEffect::GemPickup),
            GameEvent::GameOver { .. } => audio.play(SoundEffect::GameOver),
            _ => {}
        }
    }
}

/// Plain-text HUD, for headless hosts and tests
#[derive(Debug, Clone, Default)]
pub struct TextHud {
    pub score_text: String,
    pub high_score_text: String,
    /// Overlay lines currently showing
    pub overlay: Option<(String, Option<String>)>,
}

impl Hud for TextHud {
    fn show_overlay(&mut self, message: &str, score: Option<u64>) {
        let line = score.map(|s| format!("Score: {}", format_score(s)));
        self.overlay = Some((message.to_string(), line));
    }

    fn hide_overlay(&mut self) {
        self.overlay = None;
    }

    fn set_score_text(&mut self, score: u64) {
        self.score_text = format_score(score);
    }

    fn set_high_score_text(&mut self, high_score: u64) {
        self.high_score_text = format_score(high_score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::RecordingSink;
    use crate::sim::GameOverCause;

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(0), "0000");
        assert_eq!(format_score(42), "0042");
        assert_eq!(format_score(123456), "123456");
    }

    #[test]
    fn test_overlays() {
        assert_eq!(MenuOverlay::tap_to_play().score_line(), None);
        assert_eq!(
            MenuOverlay::game_over(7).score_line().as_deref(),
            Some("Score: 0007")
        );
    }

    #[test]
    fn test_present_routes_events() {
        let mut hud = TextHud::default();
        let mut audio = AudioManager::new(RecordingSink::default());
        let events = vec![
            GameEvent::ScoreChanged(12),
            GameEvent::Jumped,
            GameEvent::GemRemoved { id: 3, collected: false },
            GameEvent::GemRemoved { id: 4, collected: true },
            GameEvent::HighScoreChanged(62),
            GameEvent::GameOver {
                score: 62,
                cause: GameOverCause::OffScreen,
            },
            GameEvent::ShowOverlay(MenuOverlay::game_over(62)),
        ];
        present(&events, &mut hud, &mut audio);

        assert_eq!(hud.score_text, "0012");
        assert_eq!(hud.high_score_text, "0062");
        assert_eq!(
            hud.overlay,
            Some(("Game Over!".to_string(), Some("Score: 0062".to_string())))
        );
        assert_eq!(
            audio.sink().played,
            vec![
                SoundEffect::Jump,
                SoundEffect::GemPickup,
                SoundEffect::HighScore,
                SoundEffect::GameOver
            ]
        );

        present(&[GameEvent::HideOverlay], &mut hud, &mut audio);
        assert!(hud.overlay.is_none());
    }
}
