//! Collision detection and contact classification
//!
//! Boxes are separated along the axis of least penetration. What a contact
//! *means* is decided by a pairwise table over body categories rather than
//! bitmask arithmetic.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::state::EntityId;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Unit axis pointing from the obstacle toward the mover
    pub normal: Vec2,
    /// Penetration depth along `normal` (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }

    /// Offset that moves the mover out of the obstacle
    pub fn correction(&self) -> Vec2 {
        self.normal * self.penetration
    }
}

/// Check a moving box against a static box
///
/// Picks the axis with the smaller overlap; ties resolve vertically so a
/// skater landing exactly on a corner ends up on top.
pub fn box_collision(mover: &Aabb, obstacle: &Aabb) -> CollisionResult {
    let overlap = mover.overlap(obstacle);
    if overlap.x <= 0.0 || overlap.y <= 0.0 {
        return CollisionResult::miss();
    }

    let offset = mover.center - obstacle.center;
    if overlap.y <= overlap.x {
        let dir = if offset.y >= 0.0 { 1.0 } else { -1.0 };
        CollisionResult {
            hit: true,
            normal: Vec2::new(0.0, dir),
            penetration: overlap.y,
        }
    } else {
        let dir = if offset.x >= 0.0 { 1.0 } else { -1.0 };
        CollisionResult {
            hit: true,
            normal: Vec2::new(dir, 0.0),
            penetration: overlap.x,
        }
    }
}

/// Kinds of physical bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Skater,
    Brick,
    Gem,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Skater, Category::Brick, Category::Gem];

    fn index(self) -> usize {
        match self {
            Category::Skater => 0,
            Category::Brick => 1,
            Category::Gem => 2,
        }
    }
}

/// What a contact between two categories means to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactKind {
    /// Skater touched a brick (any side)
    Footing,
    /// Skater touched a gem
    GemPickup,
}

/// Pairwise contact table, indexed by [`Category::index`]. Symmetric.
const CONTACT_TABLE: [[Option<ContactKind>; 3]; 3] = [
    // Skater
    [None, Some(ContactKind::Footing), Some(ContactKind::GemPickup)],
    // Brick
    [Some(ContactKind::Footing), None, None],
    // Gem
    [Some(ContactKind::GemPickup), None, None],
];

/// Classify a contact; unmatched pairs have no meaning
pub fn classify(a: Category, b: Category) -> Option<ContactKind> {
    CONTACT_TABLE[a.index()][b.index()]
}

/// A body taking part in a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Body {
    pub category: Category,
    /// Entity id (0 for the skater)
    pub id: EntityId,
}

impl Body {
    pub const SKATER: Body = Body {
        category: Category::Skater,
        id: 0,
    };

    pub fn brick(id: EntityId) -> Self {
        Self {
            category: Category::Brick,
            id,
        }
    }

    pub fn gem(id: EntityId) -> Self {
        Self {
            category: Category::Gem,
            id,
        }
    }
}

/// A classified contact between two bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub kind: ContactKind,
    pub a: Body,
    pub b: Body,
}

impl Contact {
    /// Build a contact if the pair means anything
    pub fn between(a: Body, b: Body) -> Option<Self> {
        classify(a.category, b.category).map(|kind| Self { kind, a, b })
    }

    /// The body of the given category, whichever side it is on
    pub fn body(&self, category: Category) -> Option<Body> {
        [self.a, self.b].into_iter().find(|b| b.category == category)
    }
}
