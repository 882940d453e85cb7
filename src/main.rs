//! Glider Run headless entry point
//!
//! Runs the simulation at the configured frame rate with a simple autopilot
//! standing in for the player, logs what happens, and prints the final frame
//! snapshot as JSON.
//!
//! Usage: `glider-run [seconds] [settings.json]`

use glider_run::Settings;
use glider_run::audio::{AudioManager, LogBackend};
use glider_run::sim::{Assets, GameEvent, GameState, TickInput, tick};

/// Jump when the glider sinks below this fraction of the screen height
const AUTOPILOT_FLOOR: f32 = 0.55;
/// Seconds to wait on the game-over menu before restarting
const RESTART_DELAY: f32 = 1.0;

/// Decide this frame's input the way a (mediocre) player would
fn autopilot(state: &GameState, game_over_for: f32) -> TickInput {
    if !state.is_active() {
        return if game_over_for >= RESTART_DELAY {
            TickInput::jump()
        } else {
            TickInput::default()
        };
    }

    let glider = &state.glider;
    let floor = state.settings.window_height * AUTOPILOT_FLOOR;
    if glider.pos.y > floor && glider.velocity > 0.0 {
        TickInput::jump()
    } else {
        TickInput::default()
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let seconds: f32 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(60.0);
    let settings = match args.next() {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };

    let dt = settings.frame_dt();
    let frames = (seconds / dt).ceil() as u64;
    let assets = Assets::placeholder(&settings);
    let mut state = GameState::new(settings, assets);
    let mut audio = AudioManager::new(LogBackend);

    let mut game_over_for = 0.0;
    let mut runs = 1u32;
    let mut best = 0u32;

    log::info!("Simulating {:.1}s ({} frames at {:.4}s)", seconds, frames, dt);
    for _ in 0..frames {
        let input = autopilot(&state, game_over_for);
        let events = tick(&mut state, &input, dt);
        audio.handle_events(&events);

        for event in &events {
            match event {
                GameEvent::CollisionOccurred => best = best.max(state.score),
                GameEvent::SessionStarted if game_over_for > 0.0 => runs += 1,
                GameEvent::SpeedUp(tier) => log::info!("{}", tier.announcement()),
                _ => {}
            }
        }

        game_over_for = if state.is_active() { 0.0 } else { game_over_for + dt };
        if state.quit_requested {
            break;
        }
    }
    best = best.max(state.score);

    log::info!("Finished: {} run(s), best score {}", runs, best);
    match serde_json::to_string_pretty(&state.snapshot()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize snapshot: {}", e),
    }
}
