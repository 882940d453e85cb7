//! Per-frame simulation step
//!
//! One call to `tick` runs a whole frame in a fixed order: input, entity
//! updates, spawning, collisions, score and difficulty. Nothing is deferred
//! to callbacks; timers are plain clock comparisons.

use serde::{Deserialize, Serialize};

use super::assets::ImageRef;
use super::collision::check_collisions;
use super::difficulty::{Tier, Transition};
use super::spawner::spawn_obstacle;
use super::state::{EntityKind, GameEvent, GameState, Sprite};
use crate::sanitize_dt;

/// Input events delivered by the platform layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Click/tap/space: jump while flying, restart after a crash
    JumpRequested,
    /// Window closed; the host decides how to exit
    QuitRequested,
}

/// Input commands for a single tick, in arrival order
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub events: Vec<InputEvent>,
}

impl TickInput {
    /// A frame with a single jump press
    pub fn jump() -> Self {
        Self {
            events: vec![InputEvent::JumpRequested],
        }
    }
}

/// Advance the session by one frame of `dt` seconds.
///
/// Returns the events produced this frame (plus any queued since the last tick).
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let dt = sanitize_dt(dt);
    state.clock += dt as f64;
    state.notice = None;

    for event in &input.events {
        match event {
            InputEvent::JumpRequested => {
                if state.is_active() {
                    state.glider.jump(&mut state.events);
                } else {
                    state.restart();
                }
            }
            InputEvent::QuitRequested => state.quit_requested = true,
        }
    }

    update_entities(state, dt);
    spawn(state, dt);
    check_collisions(state);
    state.update_score();
    update_difficulty(state);

    std::mem::take(&mut state.events)
}

/// Move every live entity and drop obstacles that scrolled away
fn update_entities(state: &mut GameState, dt: f32) {
    state.background.update(dt);
    if let Some(ground) = state.ground.as_mut() {
        ground.update(dt);
    }
    if state.glider.alive {
        state.glider.update(dt);
    }
    for obstacle in &mut state.obstacles {
        obstacle.update(dt);
    }
    state.obstacles.retain(|o| {
        if !o.alive {
            log::debug!("Despawned obstacle {}", o.id);
        }
        o.alive
    });
}

/// Fire the spawn timer and place an obstacle if the run allows it
fn spawn(state: &mut GameState, dt: f32) {
    if !state.spawn_timer.advance(dt) {
        return;
    }
    if !state.is_active() || !state.difficulty.spawn_enabled {
        return;
    }
    let id = state.next_entity_id();
    let speed = state.obstacle_speed();
    let obstacle = spawn_obstacle(&mut state.rng, id, &state.assets, &state.settings, speed);
    state.obstacles.push(obstacle);
}

/// Apply tier changes to ground speed and the spawn timer
fn update_difficulty(state: &mut GameState) {
    let active = state.is_active();
    let Some(transition) = state.difficulty.evaluate(state.score, active, &state.settings) else {
        return;
    };

    let factor = state.difficulty.speed_factor(&state.settings);
    if let Some(ground) = state.ground.as_mut() {
        ground.speed = state.settings.ground_speed * factor;
    }
    state
        .spawn_timer
        .set_period(state.difficulty.spawn_period(&state.settings));

    match transition {
        Transition::TierUp(tier) => {
            log::info!("Difficulty up to {:?} at score {}", tier, state.score);
            state.notice = Some(tier);
            state.events.push(GameEvent::SpeedUp(tier));
        }
        Transition::Reset => log::debug!("Difficulty reset to {:?}", state.difficulty.tier),
    }
}

/// One sprite for the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpriteDraw {
    pub kind: EntityKind,
    pub image: ImageRef,
    /// Top-left in screen pixels
    pub x: i32,
    pub y: i32,
}

impl SpriteDraw {
    pub fn of(sprite: &dyn Sprite) -> Self {
        let (x, y) = sprite.top_left();
        Self {
            kind: sprite.kind(),
            image: sprite.image(),
            x,
            y,
        }
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Live entities in draw order
    pub sprites: Vec<SpriteDraw>,
    pub score: u32,
    pub active: bool,
    /// Draw the game-over menu
    pub show_menu: bool,
    /// Vertical position of the score text's top edge
    pub score_y: f32,
    pub tier: Tier,
    /// Speed-up announcement to flash this frame
    pub notice: Option<String>,
}

impl GameState {
    /// Build the renderer's view of the current frame
    pub fn snapshot(&self) -> Snapshot {
        let mut sprites = Vec::with_capacity(3 + self.obstacles.len());
        sprites.push(SpriteDraw::of(&self.background));
        if let Some(ground) = &self.ground {
            sprites.push(SpriteDraw::of(ground));
        }
        if self.glider.alive {
            sprites.push(SpriteDraw::of(&self.glider));
        }
        sprites.extend(self.obstacles.iter().map(|o| SpriteDraw::of(o)));

        let active = self.is_active();
        let score_y = if active {
            self.settings.window_height / 10.0
        } else {
            self.settings.window_height / 2.0 + self.assets.menu_height
        };

        Snapshot {
            sprites,
            score: self.score,
            active,
            show_menu: !active,
            score_y,
            tier: self.difficulty.tier,
            notice: self.notice.map(|t| t.announcement().to_string()),
        }
    }
}
