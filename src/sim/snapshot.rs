//! Read-only view of the world for renderers

use glam::Vec2;
use serde::Serialize;

use super::state::{EntityId, GamePhase, GameState};
use super::track::Dice;
use crate::consts::*;
use crate::ui::MenuOverlay;

/// A placed sprite
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpriteView {
    /// 0 for the skater
    pub id: EntityId,
    pub pos: Vec2,
    pub size: Vec2,
    pub rotation: f32,
    pub z: f32,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub skater: SpriteView,
    pub bricks: Vec<SpriteView>,
    pub gems: Vec<SpriteView>,
    pub score: u64,
    pub high_score: u64,
    pub scroll_speed: f32,
    pub overlay: Option<MenuOverlay>,
}

impl<D: Dice> GameState<D> {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            skater: SpriteView {
                id: 0,
                pos: self.skater.pos,
                size: self.skater.size,
                rotation: self.skater.rotation,
                z: Z_SKATER,
            },
            bricks: self
                .track
                .bricks
                .iter()
                .map(|b| SpriteView {
                    id: b.id,
                    pos: b.pos,
                    size: b.size,
                    rotation: 0.0,
                    z: Z_BRICK,
                })
                .collect(),
            gems: self
                .track
                .gems
                .iter()
                .map(|g| SpriteView {
                    id: g.id,
                    pos: g.pos,
                    size: g.size,
                    rotation: 0.0,
                    z: Z_GEM,
                })
                .collect(),
            score: self.score.value(),
            high_score: self.high_score(),
            scroll_speed: self.scroll_speed,
            overlay: self.overlay.clone(),
        }
    }
}
