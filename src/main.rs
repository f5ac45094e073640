//! Skate Run entry point
//!
//! Headless demo: plays a seeded session with a simple autopilot and prints
//! the leaderboard.
//!
//! Usage: `skate-run [seed] [seconds] [kinematic|rigid-body|tuning.json]`
//!
//! `SKATE_RUN_VOLUME` (0.0 - 1.0) and `SKATE_RUN_MUTE` control the logged
//! sound effects.

use skate_run::{
    PhysicsMode, Tuning,
    audio::{AudioManager, LogSink},
    consts::TARGET_FRAME_TIME,
    sim::{GameState, TickInput, tick},
    ui::{TextHud, format_score, present},
};

/// How many frames ahead the autopilot looks for trouble
const LOOKAHEAD_FRAMES: f32 = 6.0;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(clock_seed);
    let seconds = args
        .next()
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(60.0);
    let tuning = match args.next() {
        Some(arg) => match PhysicsMode::from_str(&arg) {
            Some(mode) => Tuning::with_mode(mode),
            None => match load_tuning(&arg) {
                Ok(tuning) => tuning,
                Err(e) => {
                    log::error!("Failed to load tuning from {}: {}", arg, e);
                    std::process::exit(1);
                }
            },
        },
        None => Tuning::default(),
    };

    log::info!(
        "Skate Run (headless) starting with seed {} for {}s ({} physics)",
        seed,
        seconds,
        tuning.physics_mode.as_str()
    );

    let mut state = GameState::new(tuning, seed);
    let mut hud = TextHud::default();
    let mut audio = AudioManager::new(LogSink);
    if let Some(volume) = std::env::var("SKATE_RUN_VOLUME")
        .ok()
        .and_then(|v| v.parse::<f32>().ok())
    {
        audio.set_sfx_volume(volume);
    }
    audio.set_muted(std::env::var_os("SKATE_RUN_MUTE").is_some());

    let frames = (seconds / TARGET_FRAME_TIME).ceil() as u64;
    for frame in 0..frames {
        let now = frame as f64 * TARGET_FRAME_TIME;
        let tap = !state.is_running() || autopilot_wants_jump(&state);
        tick(&mut state, &TickInput { now, tap });
        let events = state.drain_events();
        present(&events, &mut hud, &mut audio);
    }

    println!(
        "Seed {} - {} runs, high score {}",
        seed,
        state.runs,
        format_score(state.high_score())
    );
    for (i, entry) in state.high_scores.entries.iter().enumerate() {
        println!(
            "{:>2}. {}  run {:<3} {:>6.1}s",
            i + 1,
            format_score(entry.score),
            entry.run,
            entry.survived_secs
        );
    }
}

fn load_tuning(path: &str) -> Result<Tuning, Box<dyn std::error::Error>> {
    let json = std::fs::read_to_string(path)?;
    Ok(Tuning::from_json(&json)?)
}

fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

/// Jump when the sidewalk just ahead drops away or steps up
fn autopilot_wants_jump(state: &GameState) -> bool {
    let skater = &state.skater;
    if !skater.is_on_ground {
        return false;
    }
    let body = skater.bounds();
    let probe_x = body.right() + state.scroll_speed * LOOKAHEAD_FRAMES;
    let brick_at = |x: f32| {
        state.track.bricks.iter().find(|b| {
            let r = b.bounds();
            r.left() <= x && x <= r.right()
        })
    };
    // Seams between neighbouring bricks are one unit wide
    match brick_at(probe_x).or_else(|| brick_at(probe_x + 2.0)) {
        None => true,
        Some(brick) => brick.bounds().top() > body.bottom() + 1.0,
    }
}
