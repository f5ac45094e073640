//! Game state and core simulation types
//!
//! Everything a frame tick reads or mutates lives in [`GameState`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::score::ScoreTracker;
use super::track::{Dice, Track};
use crate::highscores::HighScores;
use crate::tuning::Tuning;
use crate::ui::MenuOverlay;

/// Stable identifier for bricks and gems
pub type EntityId = u32;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Idle behind the menu overlay
    NotRunning,
    /// Active run
    Running,
}

/// Y offset applied to newly spawned bricks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BrickLevel {
    /// Ground bricks
    #[default]
    Low,
    /// Raised platform bricks
    High,
}

impl BrickLevel {
    pub fn offset(&self) -> f32 {
        match self {
            BrickLevel::Low => 0.0,
            BrickLevel::High => 100.0,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            BrickLevel::Low => BrickLevel::High,
            BrickLevel::High => BrickLevel::Low,
        }
    }
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverCause {
    /// Fell below the bottom edge or was shoved past the left edge
    OffScreen,
    /// Rotated past the tip-over limit
    TippedOver,
}

/// The player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skater {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Rotation in radians, counter-clockwise positive
    pub rotation: f32,
    pub angular_vel: f32,
    pub is_on_ground: bool,
    /// Resting height of the skater's center on the surface it last landed on
    pub minimum_y: f32,
    pub size: Vec2,
}

impl Skater {
    pub fn new(size: Vec2) -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            rotation: 0.0,
            angular_vel: 0.0,
            is_on_ground: true,
            minimum_y: 0.0,
            size,
        }
    }

    /// Put the skater back at the start pose
    pub fn reset(&mut self, tuning: &Tuning) {
        self.size = tuning.skater_size;
        self.pos = tuning.skater_start();
        self.minimum_y = tuning.skater_start_minimum_y();
        self.vel = Vec2::ZERO;
        self.rotation = 0.0;
        self.angular_vel = 0.0;
        self.is_on_ground = true;
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// A sidewalk brick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub id: EntityId,
    pub pos: Vec2,
    pub size: Vec2,
    /// Level in effect when the brick was spawned
    pub level: BrickLevel,
}

impl Brick {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// A collectible gem
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gem {
    pub id: EntityId,
    pub pos: Vec2,
    pub size: Vec2,
}

impl Gem {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// Notifications for the renderer, audio and overlay collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    BrickSpawned(EntityId),
    BrickRemoved(EntityId),
    GemSpawned(EntityId),
    /// `collected` is false when the gem scrolled away
    GemRemoved { id: EntityId, collected: bool },
    Jumped,
    ScoreChanged(u64),
    HighScoreChanged(u64),
    ShowOverlay(MenuOverlay),
    HideOverlay,
    RunStarted { run: u32 },
    GameOver { score: u64, cause: GameOverCause },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<D = Pcg32> {
    pub tuning: Tuning,
    /// Session seed (0 when an external dice was injected)
    pub seed: u64,
    pub phase: GamePhase,
    pub skater: Skater,
    pub track: Track,
    pub scroll_speed: f32,
    pub score: ScoreTracker,
    pub high_scores: HighScores,
    /// Overlay currently covering the scene
    pub overlay: Option<MenuOverlay>,
    /// Timestamp of the previous running tick
    pub last_update_time: Option<f64>,
    /// Timestamp of the first tick of the current run
    pub run_started_at: Option<f64>,
    /// Number of runs started this session
    pub runs: u32,
    pub dice: D,
    /// Pending collaborator notifications, oldest first
    pub events: Vec<GameEvent>,
}

impl GameState<Pcg32> {
    /// Create a new session seeded for reproducible tracks
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let mut state = Self::with_dice(tuning, Pcg32::seed_from_u64(seed));
        state.seed = seed;
        state
    }
}

impl<D: Dice> GameState<D> {
    /// Create a new session drawing track randomness from `dice`
    pub fn with_dice(tuning: Tuning, dice: D) -> Self {
        let mut skater = Skater::new(tuning.skater_size);
        skater.reset(&tuning);
        let overlay = MenuOverlay::tap_to_play();

        Self {
            seed: 0,
            phase: GamePhase::NotRunning,
            skater,
            track: Track::new(tuning.brick_size, tuning.gem_size),
            scroll_speed: tuning.starting_scroll_speed,
            score: ScoreTracker::default(),
            high_scores: HighScores::new(),
            overlay: Some(overlay.clone()),
            last_update_time: None,
            run_started_at: None,
            runs: 0,
            dice,
            events: vec![
                GameEvent::ScoreChanged(0),
                GameEvent::HighScoreChanged(0),
                GameEvent::ShowOverlay(overlay),
            ],
            tuning,
        }
    }

    /// Take pending events, leaving the queue empty
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn high_score(&self) -> u64 {
        self.high_scores.high_score()
    }
}
