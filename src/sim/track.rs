//! Procedural sidewalk generation
//!
//! The track is a rolling row of bricks (plus the gems floating over gaps)
//! that scrolls left every tick. Bricks that leave the screen are dropped and
//! new ones are appended past the frontier until the viewport is covered again.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::state::{Brick, BrickLevel, EntityId, Gem};
use crate::tuning::Tuning;

/// Uniform random source for track decisions
pub trait Dice {
    /// Uniform integer in `0..bound` (0 when `bound` is 0)
    fn roll(&mut self, bound: u32) -> u32;
}

impl Dice for Pcg32 {
    fn roll(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        self.random_range(0..bound)
    }
}

/// Per-tick inputs to [`Track::advance`]
#[derive(Debug, Clone, Copy)]
pub struct AdvanceParams {
    /// World shift for this tick
    pub scroll_delta: f32,
    /// Score as of the previous tick
    pub score: u64,
    pub scroll_speed: f32,
    pub skater_height: f32,
}

/// Entities added and removed by one advance
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrackDelta {
    pub new_bricks: Vec<EntityId>,
    pub removed_bricks: Vec<EntityId>,
    pub new_gems: Vec<EntityId>,
    pub removed_gems: Vec<EntityId>,
}

/// The rolling set of bricks and gems
#[derive(Debug, Clone)]
pub struct Track {
    /// Bricks in spawn order
    pub bricks: Vec<Brick>,
    /// Gems in spawn order
    pub gems: Vec<Gem>,
    pub level: BrickLevel,
    pub brick_size: Vec2,
    pub gem_size: Vec2,
    /// X of the rightmost brick after the last advance
    pub frontier: f32,
    next_id: EntityId,
}

impl Track {
    pub fn new(brick_size: Vec2, gem_size: Vec2) -> Self {
        Self {
            bricks: Vec::new(),
            gems: Vec::new(),
            level: BrickLevel::Low,
            brick_size,
            gem_size,
            frontier: 0.0,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Drop every brick and gem and return to the low level
    pub fn clear(&mut self) -> TrackDelta {
        let delta = TrackDelta {
            removed_bricks: self.bricks.drain(..).map(|b| b.id).collect(),
            removed_gems: self.gems.drain(..).map(|g| g.id).collect(),
            ..Default::default()
        };
        self.level = BrickLevel::Low;
        self.frontier = 0.0;
        delta
    }

    pub fn spawn_brick(&mut self, pos: Vec2, level: BrickLevel) -> EntityId {
        let id = self.next_entity_id();
        self.bricks.push(Brick {
            id,
            pos,
            size: self.brick_size,
            level,
        });
        id
    }

    pub fn spawn_gem(&mut self, pos: Vec2) -> EntityId {
        let id = self.next_entity_id();
        self.gems.push(Gem {
            id,
            pos,
            size: self.gem_size,
        });
        id
    }

    /// Remove a brick by id; absent ids are ignored
    pub fn remove_brick(&mut self, id: EntityId) -> Option<Brick> {
        let idx = self.bricks.iter().position(|b| b.id == id)?;
        Some(self.bricks.remove(idx))
    }

    /// Remove a gem by id; absent ids are ignored
    pub fn remove_gem(&mut self, id: EntityId) -> Option<Gem> {
        let idx = self.gems.iter().position(|g| g.id == id)?;
        Some(self.gems.remove(idx))
    }

    pub fn brick(&self, id: EntityId) -> Option<&Brick> {
        self.bricks.iter().find(|b| b.id == id)
    }

    pub fn gem(&self, id: EntityId) -> Option<&Gem> {
        self.gems.iter().find(|g| g.id == id)
    }

    /// Scroll everything left, recycle off-screen entities, and fill the
    /// viewport with new bricks
    pub fn advance(
        &mut self,
        params: AdvanceParams,
        tuning: &Tuning,
        dice: &mut impl Dice,
    ) -> TrackDelta {
        let mut delta = TrackDelta::default();
        let brick_w = self.brick_size.x;
        let mut frontier: f32 = 0.0;

        self.bricks.retain_mut(|brick| {
            let new_x = brick.pos.x - params.scroll_delta;
            if new_x < -brick_w {
                delta.removed_bricks.push(brick.id);
                false
            } else {
                brick.pos.x = new_x;
                frontier = frontier.max(new_x);
                true
            }
        });

        // Each pass moves the frontier right by at least brick_w + 1
        while frontier < tuning.viewport.x {
            let mut brick_x = frontier + brick_w + 1.0;
            let level = self.level;
            let brick_y = self.brick_size.y / 2.0 + level.offset();

            let roll = dice.roll(tuning.random_bound);

            if roll < tuning.gap_chance_max && params.score > tuning.gap_score_threshold {
                let gap = tuning.gap_width_factor * params.scroll_speed;
                brick_x += gap;

                let lift = dice.roll(tuning.gem_height_jitter) as f32;
                let gem_pos = Vec2::new(
                    brick_x - gap / 2.0,
                    brick_y + params.skater_height + lift,
                );
                let gem_id = self.spawn_gem(gem_pos);
                delta.new_gems.push(gem_id);
                log::debug!(
                    "Gap of {:.1} before x={:.1}, gem {} at {:?}",
                    gap,
                    brick_x,
                    gem_id,
                    gem_pos
                );
            } else if (tuning.gap_chance_max..tuning.level_chance_max).contains(&roll)
                && params.score > tuning.level_score_threshold
            {
                self.level = self.level.toggled();
                log::debug!("Brick level now {:?}", self.level);
            }

            delta.new_bricks.push(self.spawn_brick(Vec2::new(brick_x, brick_y), level));
            frontier = brick_x;
        }
        self.frontier = frontier;

        self.gems.retain_mut(|gem| {
            gem.pos.x -= params.scroll_delta;
            if gem.pos.x < 0.0 {
                delta.removed_gems.push(gem.id);
                false
            } else {
                true
            }
        });

        delta
    }
}
