//! Skater motion, contact resolution and the game-over check
//!
//! Two strategies share one contact solver:
//! - `Kinematic`: velocity is per target frame, gravity only while airborne,
//!   grounded comes from brick contact and lost when nothing is underfoot.
//! - `RigidBody`: velocity is per second, gravity always acts, and grounded is
//!   re-inferred every step from `|vy| <= threshold`. The threshold heuristic
//!   lets a skater jump again near the apex of a jump; that is the intended
//!   behavior of this mode.

use super::collision::{Body, Contact, box_collision};
use super::state::{Brick, GameOverCause, Skater};
use super::track::Track;
use crate::consts::TARGET_FRAME_TIME;
use crate::tuning::{PhysicsMode, Tuning};

/// A brick top within this distance of the skater's feet counts as underfoot
pub const SUPPORT_EPSILON: f32 = 0.5;
/// Angular velocity (radians per target frame) gained from a side impact
pub const STUMBLE_SPIN: f32 = 0.05;
/// Fraction of rotation removed per target frame while standing on a brick
pub const ROTATION_RELAX: f32 = 0.2;

/// Everything one physics step produced
#[derive(Debug, Clone, Default)]
pub struct StepOutcome {
    /// Classified contacts, bricks first then gems
    pub contacts: Vec<Contact>,
    pub termination: Option<GameOverCause>,
}

/// Launch the skater if standing; returns whether a jump happened
pub fn jump(skater: &mut Skater, tuning: &Tuning) -> bool {
    if !skater.is_on_ground {
        return false;
    }
    match tuning.physics_mode {
        PhysicsMode::Kinematic => skater.vel.y = tuning.jump_speed,
        PhysicsMode::RigidBody => skater.vel.y += tuning.jump_impulse / tuning.skater_mass,
    }
    skater.is_on_ground = false;
    true
}

/// The brick directly under the skater's feet, if any
pub fn support<'a>(skater: &Skater, bricks: &'a [Brick]) -> Option<&'a Brick> {
    let feet = skater.bounds();
    bricks.iter().find(|brick| {
        let b = brick.bounds();
        b.spans_x(&feet) && (b.top() - feet.bottom()).abs() <= SUPPORT_EPSILON
    })
}

/// Advance the skater by `dt_ratio` target frames against the current track
pub fn step(skater: &mut Skater, track: &Track, dt_ratio: f32, tuning: &Tuning) -> StepOutcome {
    let mode = tuning.physics_mode;
    let frame_secs = TARGET_FRAME_TIME as f32;
    let (dt, stumble) = match mode {
        PhysicsMode::Kinematic => (dt_ratio, STUMBLE_SPIN),
        PhysicsMode::RigidBody => (dt_ratio * frame_secs, STUMBLE_SPIN / frame_secs),
    };

    // --- INTEGRATE ---
    match mode {
        PhysicsMode::Kinematic => {
            if skater.is_on_ground && support(skater, &track.bricks).is_none() {
                skater.is_on_ground = false;
            }
            if !skater.is_on_ground {
                skater.vel.y -= tuning.gravity_speed * dt;
            }
        }
        PhysicsMode::RigidBody => {
            skater.vel.y -= tuning.world_gravity * dt;
        }
    }
    skater.pos += skater.vel * dt;
    skater.rotation += skater.angular_vel * dt;

    // --- RESOLVE BRICKS ---
    let mut contacts = Vec::new();
    for brick in &track.bricks {
        let result = box_collision(&skater.bounds(), &brick.bounds());
        if !result.hit {
            continue;
        }
        skater.pos += result.correction();

        if result.normal.y > 0.0 {
            // Landed on top
            if skater.vel.y < 0.0 {
                skater.vel.y = 0.0;
            }
            skater.minimum_y = brick.bounds().top() + skater.size.y / 2.0;
        } else if result.normal.y < 0.0 {
            // Head bump
            skater.vel.y = skater.vel.y.min(0.0);
        } else {
            // Shoved back by the brick face
            skater.vel.x = 0.0;
            skater.angular_vel -= stumble * result.normal.x;
        }

        contacts.extend(Contact::between(Body::SKATER, Body::brick(brick.id)));
    }

    // --- ROTATION ---
    if support(skater, &track.bricks).is_some() {
        skater.angular_vel = 0.0;
        skater.rotation *= (1.0 - ROTATION_RELAX * dt_ratio).max(0.0);
    }

    // --- GROUNDED ---
    match mode {
        PhysicsMode::Kinematic => {
            if skater.is_on_ground {
                skater.pos.y = skater.pos.y.max(skater.minimum_y);
            }
        }
        PhysicsMode::RigidBody => {
            skater.is_on_ground = skater.vel.y.abs() <= tuning.grounded_velocity_threshold;
        }
    }

    // --- GEMS ---
    let bounds = skater.bounds();
    for gem in &track.gems {
        if bounds.intersects(&gem.bounds()) {
            contacts.extend(Contact::between(Body::SKATER, Body::gem(gem.id)));
        }
    }

    StepOutcome {
        contacts,
        termination: check_termination(skater, tuning),
    }
}

/// Off-screen or tipped over ends the run
pub fn check_termination(skater: &Skater, tuning: &Tuning) -> Option<GameOverCause> {
    let max_rotation = tuning.max_rotation_degrees.to_radians();
    if skater.pos.y < 0.0 || skater.pos.x < 0.0 {
        Some(GameOverCause::OffScreen)
    } else if skater.rotation.abs() > max_rotation {
        Some(GameOverCause::TippedOver)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::collision::ContactKind;
    use crate::sim::state::BrickLevel;
    use glam::Vec2;

    fn setup(mode: PhysicsMode) -> (Tuning, Skater, Track) {
        let tuning = Tuning::with_mode(mode);
        let mut skater = Skater::new(tuning.skater_size);
        skater.reset(&tuning);
        let mut track = Track::new(tuning.brick_size, tuning.gem_size);
        // Ground row under the start position (skater spans ~142..190)
        for x in [130.0, 195.0, 260.0] {
            track.spawn_brick(Vec2::new(x, 32.0), BrickLevel::Low);
        }
        (tuning, skater, track)
    }

    #[test]
    fn test_standing_skater_stays_put() {
        let (tuning, mut skater, track) = setup(PhysicsMode::Kinematic);
        let start = skater.pos;
        for _ in 0..30 {
            let outcome = step(&mut skater, &track, 1.0, &tuning);
            assert!(outcome.termination.is_none());
        }
        assert_eq!(skater.pos, start);
        assert!(skater.is_on_ground);
    }

    #[test]
    fn test_kinematic_jump_arc_lands_on_ground() {
        let (tuning, mut skater, track) = setup(PhysicsMode::Kinematic);
        assert!(jump(&mut skater, &tuning));
        assert!(!skater.is_on_ground);
        assert!(!jump(&mut skater, &tuning));

        step(&mut skater, &track, 1.0, &tuning);
        assert!(!skater.is_on_ground);
        assert!(skater.pos.y > skater.minimum_y);

        let mut landed = false;
        for _ in 0..60 {
            let outcome = step(&mut skater, &track, 1.0, &tuning);
            if outcome.contacts.iter().any(|c| c.kind == ContactKind::Footing) {
                landed = true;
                break;
            }
        }
        assert!(landed);
        assert!((skater.pos.y - tuning.skater_start_minimum_y()).abs() < 1e-3);
        assert_eq!(skater.vel.y, 0.0);
    }

    #[test]
    fn test_rigid_body_jump_reads_airborne() {
        let (tuning, mut skater, track) = setup(PhysicsMode::RigidBody);
        step(&mut skater, &track, 1.0, &tuning);
        assert!(skater.is_on_ground);

        assert!(jump(&mut skater, &tuning));
        step(&mut skater, &track, 1.0, &tuning);
        assert!(skater.vel.y > tuning.grounded_velocity_threshold);
        assert!(!skater.is_on_ground);
    }

    #[test]
    fn test_rigid_body_apex_counts_as_grounded() {
        let (tuning, mut skater, track) = setup(PhysicsMode::RigidBody);
        jump(&mut skater, &tuning);
        let mut saw_apex_ground = false;
        for _ in 0..120 {
            step(&mut skater, &track, 1.0, &tuning);
            if skater.is_on_ground && skater.pos.y > tuning.skater_start_minimum_y() + 50.0 {
                saw_apex_ground = true;
                break;
            }
        }
        assert!(saw_apex_ground);
    }

    #[test]
    fn test_falls_into_gap_and_goes_off_screen() {
        let (tuning, mut skater, _) = setup(PhysicsMode::Kinematic);
        let track = Track::new(tuning.brick_size, tuning.gem_size);
        let mut cause = None;
        for _ in 0..200 {
            let outcome = step(&mut skater, &track, 1.0, &tuning);
            if outcome.termination.is_some() {
                cause = outcome.termination;
                break;
            }
        }
        assert_eq!(cause, Some(GameOverCause::OffScreen));
    }

    #[test]
    fn test_raised_brick_shoves_skater_back() {
        let (tuning, mut skater, mut track) = setup(PhysicsMode::Kinematic);
        let x = skater.pos.x;
        // High brick whose left face is 4 units into the skater
        track.spawn_brick(Vec2::new(x + 24.0 + 32.0 - 4.0, 132.0), BrickLevel::High);
        let outcome = step(&mut skater, &track, 1.0, &tuning);
        assert!((skater.pos.x - (x - 4.0)).abs() < 1e-3);
        assert!(outcome.contacts.iter().any(|c| c.kind == ContactKind::Footing));
        assert!(skater.is_on_ground);
    }

    #[test]
    fn test_side_impact_in_air_spins() {
        let (tuning, mut skater, mut track) = setup(PhysicsMode::Kinematic);
        skater.pos.y += 40.0;
        skater.is_on_ground = false;
        let x = skater.pos.x;
        track.spawn_brick(Vec2::new(x + 24.0 + 32.0 - 4.0, 132.0), BrickLevel::High);
        step(&mut skater, &track, 1.0, &tuning);
        assert!(skater.angular_vel > 0.0);
    }

    #[test]
    fn test_gem_overlap_reports_pickup() {
        let (tuning, mut skater, mut track) = setup(PhysicsMode::Kinematic);
        let gem = track.spawn_gem(skater.pos + Vec2::new(10.0, 10.0));
        let outcome = step(&mut skater, &track, 1.0, &tuning);
        let pickup = outcome
            .contacts
            .iter()
            .find(|c| c.kind == ContactKind::GemPickup)
            .unwrap();
        assert_eq!(pickup.b, Body::gem(gem));
    }

    #[test]
    fn test_termination() {
        let tuning = Tuning::default();
        let mut skater = Skater::new(tuning.skater_size);
        skater.reset(&tuning);
        assert_eq!(check_termination(&skater, &tuning), None);

        skater.pos.y = -1.0;
        assert_eq!(check_termination(&skater, &tuning), Some(GameOverCause::OffScreen));

        skater.reset(&tuning);
        skater.pos.x = -0.5;
        assert_eq!(check_termination(&skater, &tuning), Some(GameOverCause::OffScreen));

        skater.reset(&tuning);
        skater.rotation = 84.0_f32.to_radians();
        assert_eq!(check_termination(&skater, &tuning), None);
        skater.rotation = -86.0_f32.to_radians();
        assert_eq!(check_termination(&skater, &tuning), Some(GameOverCause::TippedOver));
    }

    #[test]
    fn test_zero_ratio_moves_nothing() {
        let (tuning, mut skater, track) = setup(PhysicsMode::Kinematic);
        jump(&mut skater, &tuning);
        let pos = skater.pos;
        step(&mut skater, &track, 0.0, &tuning);
        assert_eq!(skater.pos, pos);
    }
}
