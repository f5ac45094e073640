//! Per-frame game loop and state machine
//!
//! The host calls [`tick`] once per rendered frame with the frame timestamp.
//! Taps can be delivered through [`TickInput::tap`] or directly with
//! [`handle_tap`]; both must run on the thread that ticks (wrap the state in
//! a mutex if the host's input arrives elsewhere).

use super::collision::{Category, Contact, ContactKind};
use super::physics;
use super::state::{EntityId, GameEvent, GameOverCause, GamePhase, GameState};
use super::track::{AdvanceParams, Dice, TrackDelta};
use crate::frame_ratio;
use crate::ui::MenuOverlay;

/// Input for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Frame timestamp in seconds (any monotonic clock)
    pub now: f64,
    /// Player tapped since the previous frame
    pub tap: bool,
}

impl TickInput {
    pub fn at(now: f64) -> Self {
        Self { now, tap: false }
    }

    pub fn tap_at(now: f64) -> Self {
        Self { now, tap: true }
    }
}

/// Advance the game by one frame
pub fn tick<D: Dice>(state: &mut GameState<D>, input: &TickInput) {
    if input.tap {
        handle_tap(state);
    }

    if state.phase != GamePhase::Running {
        return;
    }

    // Difficulty ramp, unbounded
    state.scroll_speed += state.tuning.scroll_speed_increment;

    let now = input.now;
    let elapsed = match state.last_update_time {
        Some(last) if now < last => {
            log::warn!("Frame time went backwards ({:.4} -> {:.4})", last, now);
            0.0
        }
        Some(last) => now - last,
        None => 0.0,
    };
    state.last_update_time = Some(now);
    if state.run_started_at.is_none() {
        state.run_started_at = Some(now);
    }

    let ratio = frame_ratio(elapsed);
    let scroll_amount = state.scroll_speed * ratio;
    log::trace!("dt={:.4}s ratio={:.3} scroll={:.2}", elapsed, ratio, scroll_amount);

    // --- TRACK ---
    // Reads the score from the previous frame
    let params = AdvanceParams {
        scroll_delta: scroll_amount,
        score: state.score.value(),
        scroll_speed: state.scroll_speed,
        skater_height: state.skater.size.y,
    };
    let delta = state.track.advance(params, &state.tuning, &mut state.dice);
    push_track_events(&mut state.events, &delta);

    // --- SKATER ---
    let outcome = physics::step(&mut state.skater, &state.track, ratio, &state.tuning);
    for contact in &outcome.contacts {
        resolve_contact(state, contact);
    }
    if let Some(cause) = outcome.termination {
        game_over(state, cause, now);
        return;
    }

    // --- SCORE ---
    let interval = state.tuning.score_interval_secs;
    if state.score.tick(now, state.scroll_speed, interval) {
        state.events.push(GameEvent::ScoreChanged(state.score.value()));
    }
}

/// Player input: jump while running, start a run otherwise
pub fn handle_tap<D: Dice>(state: &mut GameState<D>) {
    match state.phase {
        GamePhase::Running => {
            if physics::jump(&mut state.skater, &state.tuning) {
                log::debug!("Jump at x={:.1} y={:.1}", state.skater.pos.x, state.skater.pos.y);
                state.events.push(GameEvent::Jumped);
            }
        }
        GamePhase::NotRunning => start_new_game(state),
    }
}

/// Reset to starting conditions and begin a run
pub fn start_new_game<D: Dice>(state: &mut GameState<D>) {
    if state.overlay.take().is_some() {
        state.events.push(GameEvent::HideOverlay);
    }

    state.phase = GamePhase::Running;
    state.skater.reset(&state.tuning);
    state.score.reset();
    state.scroll_speed = state.tuning.starting_scroll_speed;
    state.last_update_time = None;
    state.run_started_at = None;

    let cleared = state.track.clear();
    push_track_events(&mut state.events, &cleared);

    state.runs += 1;
    state.events.push(GameEvent::ScoreChanged(0));
    state.events.push(GameEvent::RunStarted { run: state.runs });
    log::info!(
        "Run {} started (seed {}, scroll speed {})",
        state.runs,
        state.seed,
        state.scroll_speed
    );
}

/// End the current run
pub fn game_over<D: Dice>(state: &mut GameState<D>, cause: GameOverCause, now: f64) {
    state.phase = GamePhase::NotRunning;

    let score = state.score.value();
    let survived = state
        .run_started_at
        .map(|start| (now - start).max(0.0))
        .unwrap_or(0.0);
    if let Some(high) = state.high_scores.record_run(score, state.runs, survived) {
        state.events.push(GameEvent::HighScoreChanged(high));
    }
    log::info!(
        "Game over ({:?}) after {:.1}s - score {}, high score {}",
        cause,
        survived,
        score,
        state.high_score()
    );

    let overlay = MenuOverlay::game_over(score);
    state.overlay = Some(overlay.clone());
    state.events.push(GameEvent::GameOver { score, cause });
    state.events.push(GameEvent::ShowOverlay(overlay));
}

fn resolve_contact<D: Dice>(state: &mut GameState<D>, contact: &Contact) {
    match contact.kind {
        ContactKind::Footing => state.skater.is_on_ground = true,
        ContactKind::GemPickup => {
            if let Some(gem) = contact.body(Category::Gem) {
                collect_gem(state, gem.id);
            }
        }
    }
}

/// Remove a touched gem and pay the bonus; gems already gone are ignored
fn collect_gem<D: Dice>(state: &mut GameState<D>, id: EntityId) {
    if state.track.remove_gem(id).is_none() {
        return;
    }
    state.score.add_bonus(state.tuning.gem_bonus);
    log::debug!("Gem {} collected, score {}", id, state.score.value());
    state.events.push(GameEvent::GemRemoved { id, collected: true });
    state.events.push(GameEvent::ScoreChanged(state.score.value()));
}

fn push_track_events(events: &mut Vec<GameEvent>, delta: &TrackDelta) {
    events.extend(delta.removed_bricks.iter().map(|&id| GameEvent::BrickRemoved(id)));
    events.extend(
        delta
            .removed_gems
            .iter()
            .map(|&id| GameEvent::GemRemoved { id, collected: false }),
    );
    events.extend(delta.new_bricks.iter().map(|&id| GameEvent::BrickSpawned(id)));
    events.extend(delta.new_gems.iter().map(|&id| GameEvent::GemSpawned(id)));
}
