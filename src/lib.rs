//! Glider Run - A side-scrolling reflex game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, physics, spawning, collisions, difficulty)
//! - `settings`: Game configuration consumed by the simulation
//! - `audio`: Sound cue table driven by simulation events

pub mod audio;
pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Default window dimensions
    pub const WINDOW_WIDTH: f32 = 500.0;
    pub const WINDOW_HEIGHT: f32 = 800.0;
    /// Target frame rate of the presentation loop
    pub const FRAMERATE: u32 = 120;

    /// Obstacle spawn interval at tier 0 (milliseconds)
    pub const OBSTACLE_INTERVAL_MS: f32 = 1300.0;
    pub const OBSTACLE_SPEED: f32 = 250.0;
    pub const GROUND_SPEED: f32 = OBSTACLE_SPEED;
    pub const BACKGROUND_SPEED: f32 = GROUND_SPEED * 0.8;

    /// Downward acceleration (pixels/s²)
    pub const GRAVITY: f32 = 800.0;
    /// Upward velocity set by a jump (pixels/s)
    pub const JUMP_HEIGHT: f32 = 400.0;

    pub const OBSTACLE_SCALE_FACTOR: f32 = 1.0;
    /// Stone art is drawn smaller than pillars
    pub const STONE_SCALE: f32 = 0.8;

    /// Per-tier multipliers for obstacle and ground speed (easy, medium, hard)
    pub const GAME_SPEED_FACTORS: [f32; 3] = [1.0, 1.5, 2.0];
    /// Per-tier divisors for the spawn interval
    pub const TIMER_FACTORS: [f32; 3] = [1.0, 1.2, 1.4];

    /// Glider animation frames and playback rate
    pub const GLIDER_FRAMES: usize = 3;
    pub const GLIDER_ANIMATION_FPS: f32 = 15.0;
    /// Degrees of tilt per unit of vertical velocity
    pub const ROTATION_FACTOR: f32 = 0.07;

    /// Obstacles are removed once their right edge reaches this x
    pub const DESPAWN_EDGE: f32 = -100.0;

    /// Largest frame delta accepted by the simulation (seconds)
    pub const MAX_DT: f32 = 0.25;
}

/// Round a float position to whole pixels, the way sprite rects are placed
#[inline]
pub fn to_pixels(pos: Vec2) -> (i32, i32) {
    (pos.x.round() as i32, pos.y.round() as i32)
}

/// Sanitize a frame delta: non-finite or negative values become zero, huge ones are capped
#[inline]
pub fn sanitize_dt(dt: f32) -> f32 {
    if !dt.is_finite() || dt < 0.0 {
        log::warn!("Discarding malformed frame delta: {}", dt);
        return 0.0;
    }
    dt.min(consts::MAX_DT)
}
