//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame timestamps come from the host
//! - Randomness only through the injected [`Dice`]
//! - Stable iteration order (spawn order, by entity ID)
//! - No rendering or platform dependencies

pub mod aabb;
pub mod collision;
pub mod physics;
pub mod score;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod track;

pub use aabb::Aabb;
pub use collision::{Body, Category, CollisionResult, Contact, ContactKind, box_collision, classify};
pub use physics::StepOutcome;
pub use score::ScoreTracker;
pub use snapshot::{Snapshot, SpriteView};
pub use state::{
    Brick, BrickLevel, EntityId, GameEvent, GameOverCause, GamePhase, GameState, Gem, Skater,
};
pub use tick::{TickInput, game_over, handle_tap, start_new_game, tick};
pub use track::{AdvanceParams, Dice, Track, TrackDelta};
