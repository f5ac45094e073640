//! Skate Run - an endless sidewalk skater
//!
//! Core modules:
//! - `sim`: Deterministic simulation (track generation, physics, scoring, game loop)
//! - `tuning`: Data-driven game balance
//! - `highscores`: In-memory session high score and leaderboard
//! - `audio`: Sound effect collaborator
//! - `ui`: Overlay and label collaborator
//!
//! The core owns no presentation logic. A host feeds it frame timestamps and
//! taps, then reads [`sim::Snapshot`]s and drives its own collaborators.

pub mod audio;
pub mod highscores;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use highscores::HighScores;
pub use tuning::{PhysicsMode, Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Frame time the scroll and kinematic physics are tuned for (60 Hz)
    pub const TARGET_FRAME_TIME: f64 = 1.0 / 60.0;

    /// Points awarded for collecting a gem
    pub const GEM_BONUS: u64 = 50;
    /// Seconds between time-based score awards
    pub const SCORE_INTERVAL_SECS: f64 = 1.0;

    /// Gap/gem spawning unlocks above this score
    pub const GAP_SCORE_THRESHOLD: u64 = 10;
    /// Brick level changes unlock above this score
    pub const LEVEL_SCORE_THRESHOLD: u64 = 20;

    /// Skater tips over past this rotation (either direction)
    pub const MAX_ROTATION_DEGREES: f32 = 85.0;

    /// Layer order hints for renderers
    pub const Z_BRICK: f32 = 8.0;
    pub const Z_GEM: f32 = 9.0;
    pub const Z_SKATER: f32 = 10.0;
}

/// Convert a frame's elapsed seconds to a multiple of the target frame time
#[inline]
pub fn frame_ratio(elapsed_secs: f64) -> f32 {
    (elapsed_secs / consts::TARGET_FRAME_TIME) as f32
}
