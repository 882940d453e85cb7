//! Obstacle spawning
//!
//! A logical timer advanced by frame time. Each time it fires the session may
//! place a new pillar or stone just past the right edge of the screen.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::assets::{Assets, PILLAR_VARIANTS};
use super::state::{Obstacle, ObstacleKind, Orientation};
use crate::Settings;
use crate::consts::STONE_SCALE;

/// Periodic spawn timer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnTimer {
    /// Seconds between firings
    pub period: f32,
    /// Seconds since the last firing
    pub elapsed: f32,
}

impl SpawnTimer {
    pub fn new(period: f32) -> Self {
        Self {
            period: period.max(f32::EPSILON),
            elapsed: 0.0,
        }
    }

    /// Change the period and restart the countdown
    pub fn set_period(&mut self, period: f32) {
        self.period = period.max(f32::EPSILON);
        self.elapsed = 0.0;
    }

    /// Advance by `dt`; returns true if the timer fired this frame
    pub fn advance(&mut self, dt: f32) -> bool {
        self.elapsed += dt;
        if self.elapsed >= self.period {
            self.elapsed -= self.period;
            true
        } else {
            false
        }
    }
}

/// Roll a new obstacle moving left at `speed`
pub fn spawn_obstacle(
    rng: &mut impl Rng,
    id: u32,
    assets: &Assets,
    settings: &Settings,
    speed: f32,
) -> Obstacle {
    let (w, h) = (settings.window_width, settings.window_height);

    // 4 in 6 pillars, 2 in 6 stones
    if rng.random_range(1..=6) <= 4 {
        let orientation = if rng.random_bool(0.5) {
            Orientation::Up
        } else {
            Orientation::Down
        };
        let variant = rng.random_range(0..PILLAR_VARIANTS);
        let base = assets.pillar(variant).scaled(settings.obstacle_scale_factor);
        let x = w + 70.0;
        let half_w = (base.width() / 2) as f32;

        let (pos, mask) = match orientation {
            // Anchored at its bottom edge, reaching up from below the screen
            Orientation::Up => {
                let y = h + rng.random_range(10..=50) as f32;
                (Vec2::new(x - half_w, y - base.height() as f32), base)
            }
            // Hanging from above the screen
            Orientation::Down => {
                let y = -(rng.random_range(10..=50) as f32);
                (Vec2::new(x - half_w, y), base.flipped_vertical())
            }
        };

        log::debug!("Spawned pillar {} ({:?}, variant {}) at {:?}", id, orientation, variant, pos);
        Obstacle::new(
            id,
            ObstacleKind::Pillar { variant, orientation },
            pos,
            speed,
            mask,
            settings.despawn_edge,
        )
    } else {
        let mask = assets
            .stone
            .scaled(settings.obstacle_scale_factor * STONE_SCALE);
        let center = Vec2::new(w + 90.0, h / 2.0 + rng.random_range(-50..=50) as f32);
        let pos = center - Vec2::new((mask.width() / 2) as f32, (mask.height() / 2) as f32);

        log::debug!("Spawned stone {} at {:?}", id, pos);
        Obstacle::new(id, ObstacleKind::Stone, pos, speed, mask, settings.despawn_edge)
    }
}
