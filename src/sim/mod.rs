//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame time is the only clock
//! - Seeded RNG only
//! - Stable update order (background, ground, glider, obstacles in spawn order)
//! - No rendering, audio or platform dependencies

pub mod assets;
pub mod collision;
pub mod difficulty;
pub mod mask;
pub mod spawner;
pub mod state;
pub mod tick;

pub use assets::{Assets, ImageRef, PILLAR_VARIANTS};
pub use collision::{check_collisions, glider_crashed, hits_ceiling, masks_overlap, sprites_overlap};
pub use difficulty::{Difficulty, Tier, Transition};
pub use mask::Mask;
pub use spawner::{SpawnTimer, spawn_obstacle};
pub use state::{
    EntityKind, GameEvent, GamePhase, GameState, Glider, Obstacle, ObstacleKind, Orientation,
    ScrollingLayer, Sprite,
};
pub use tick::{InputEvent, Snapshot, SpriteDraw, TickInput, tick};
