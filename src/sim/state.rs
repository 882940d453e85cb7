//! Game state and entity types
//!
//! The session (`GameState`) exclusively owns every entity. The background
//! lives for the whole process; the ground, glider and obstacles are replaced
//! at each game-over/restart boundary.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::assets::{Assets, ImageRef};
use super::difficulty::{Difficulty, Tier, Transition};
use super::mask::Mask;
use super::spawner::SpawnTimer;
use crate::consts::GLIDER_FRAMES;
use crate::{Settings, to_pixels};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Glider is flying and the score is counting
    Active,
    /// Glider crashed; waiting for a restart input
    GameOver,
}

/// Notifications for audio and presentation collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A run started (first launch or restart)
    SessionStarted,
    /// The glider jumped
    JumpOccurred,
    /// The glider hit something; the run is over
    CollisionOccurred,
    /// Difficulty went up a tier
    SpeedUp(Tier),
}

/// Which entity a sprite belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Background,
    Ground,
    Glider,
    Obstacle,
}

/// Shared capabilities of everything the session simulates and draws
pub trait Sprite {
    /// Advance by `dt` seconds
    fn update(&mut self, dt: f32);
    /// Exact top-left position
    fn pos(&self) -> Vec2;
    /// Collision shape, if the entity can be collided with
    fn mask(&self) -> Option<&Mask>;
    /// Art to draw
    fn image(&self) -> ImageRef;
    fn kind(&self) -> EntityKind;

    /// Top-left rounded to whole pixels (where it is drawn and collided)
    fn top_left(&self) -> (i32, i32) {
        to_pixels(self.pos())
    }
}

/// A double-wide tile scrolling left forever (background and ground)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollingLayer {
    pub pos: Vec2,
    /// Leftward speed (pixels/s)
    pub speed: f32,
    /// Full width of the doubled tile
    pub width: f32,
    pub image: ImageRef,
    pub mask: Option<Mask>,
}

impl ScrollingLayer {
    /// Background anchored at the top-left corner
    pub fn background(assets: &Assets, settings: &Settings) -> Self {
        Self {
            pos: Vec2::ZERO,
            speed: settings.background_speed,
            width: assets.background_size.0 as f32,
            image: ImageRef::Background,
            mask: None,
        }
    }

    /// Ground anchored bottom-left at (0, window height)
    pub fn ground(assets: &Assets, settings: &Settings) -> Self {
        let (w, h) = assets.ground_size();
        Self {
            pos: Vec2::new(0.0, settings.window_height - h as f32),
            speed: settings.ground_speed,
            width: w as f32,
            image: ImageRef::Ground,
            mask: Some(assets.ground.clone()),
        }
    }
}

impl Sprite for ScrollingLayer {
    fn update(&mut self, dt: f32) {
        self.pos.x -= self.speed * dt;
        // Once the first copy's centre leaves the screen the second copy looks identical at 0
        if self.pos.x + self.width / 2.0 <= 0.0 {
            self.pos.x = 0.0;
        }
    }

    fn pos(&self) -> Vec2 {
        self.pos
    }

    fn mask(&self) -> Option<&Mask> {
        self.mask.as_ref()
    }

    fn image(&self) -> ImageRef {
        self.image
    }

    fn kind(&self) -> EntityKind {
        match self.image {
            ImageRef::Background => EntityKind::Background,
            _ => EntityKind::Ground,
        }
    }
}

/// The player-controlled glider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Glider {
    pub pos: Vec2,
    /// Vertical velocity (positive is down)
    pub velocity: f32,
    pub gravity: f32,
    pub jump_height: f32,
    /// Fractional animation frame, kept in [0, GLIDER_FRAMES)
    pub frame_index: f32,
    pub animation_fps: f32,
    /// Tilt in degrees (counter-clockwise)
    pub angle: f32,
    pub rotation_factor: f32,
    /// Unrotated animation frames
    frames: [Mask; GLIDER_FRAMES],
    /// Current frame after rotation
    pub mask: Mask,
    /// False once crashed; the last state stays readable until the next run
    pub alive: bool,
}

impl Glider {
    /// Glider placed mid-left: x at 1/20 of the window, vertically centred
    pub fn new(assets: &Assets, settings: &Settings) -> Self {
        let frames = assets.glider_frames.clone();
        let mask = frames[0].clone();
        let pos = Vec2::new(
            settings.window_width / 20.0,
            settings.window_height / 2.0 - (mask.height() / 2) as f32,
        );
        Self {
            pos,
            velocity: 0.0,
            gravity: settings.gravity,
            jump_height: settings.jump_height,
            frame_index: 0.0,
            animation_fps: settings.animation_fps,
            angle: 0.0,
            rotation_factor: settings.rotation_factor,
            frames,
            mask,
            alive: true,
        }
    }

    /// Integrate gravity into velocity, then velocity into position
    pub fn apply_gravity(&mut self, dt: f32) {
        self.velocity += self.gravity * dt;
        self.pos.y += self.velocity * dt;
    }

    /// Advance the flap animation independent of frame rate
    pub fn animate(&mut self, dt: f32) {
        self.frame_index = (self.frame_index + self.animation_fps * dt) % GLIDER_FRAMES as f32;
        self.mask = self.frames[self.frame()].clone();
    }

    /// Tilt the current frame by velocity; the silhouette changes with it
    pub fn rotate(&mut self) {
        self.angle = -self.velocity * self.rotation_factor;
        self.mask = self.frames[self.frame()].rotated(self.angle);
    }

    /// Instant upward impulse, replacing whatever velocity the glider had
    pub fn jump(&mut self, events: &mut Vec<GameEvent>) {
        self.velocity = -self.jump_height;
        events.push(GameEvent::JumpOccurred);
    }

    /// Selected animation frame
    pub fn frame(&self) -> usize {
        (self.frame_index as usize) % GLIDER_FRAMES
    }

    /// Height of the unrotated sprite rect
    pub fn rect_height(&self) -> u32 {
        self.frames[0].height()
    }
}

impl Sprite for Glider {
    fn update(&mut self, dt: f32) {
        // Rotation applies to the frame animate() just picked
        self.apply_gravity(dt);
        self.animate(dt);
        self.rotate();
    }

    fn pos(&self) -> Vec2 {
        self.pos
    }

    fn mask(&self) -> Option<&Mask> {
        Some(&self.mask)
    }

    fn image(&self) -> ImageRef {
        ImageRef::Glider {
            frame: self.frame(),
            angle: self.angle,
        }
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Glider
    }
}

/// Pillar direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    /// Rises from the bottom of the screen
    Up,
    /// Hangs from the top of the screen (art mirrored)
    Down,
}

/// Obstacle shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Pillar { variant: usize, orientation: Orientation },
    Stone,
}

/// A scrolling obstacle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    pub pos: Vec2,
    /// Fixed at spawn time
    pub speed: f32,
    pub mask: Mask,
    /// Removed once the right edge reaches this x
    pub despawn_edge: f32,
    pub alive: bool,
}

impl Obstacle {
    pub fn new(
        id: u32,
        kind: ObstacleKind,
        pos: Vec2,
        speed: f32,
        mask: Mask,
        despawn_edge: f32,
    ) -> Self {
        Self {
            id,
            kind,
            pos,
            speed,
            mask,
            despawn_edge,
            alive: true,
        }
    }

    /// Right edge of the pixel rect
    pub fn right(&self) -> i32 {
        self.top_left().0 + self.mask.width() as i32
    }
}

impl Sprite for Obstacle {
    fn update(&mut self, dt: f32) {
        self.pos.x -= self.speed * dt;
        if self.right() as f32 <= self.despawn_edge {
            self.alive = false;
        }
    }

    fn pos(&self) -> Vec2 {
        self.pos
    }

    fn mask(&self) -> Option<&Mask> {
        Some(&self.mask)
    }

    fn image(&self) -> ImageRef {
        match self.kind {
            ObstacleKind::Pillar { variant, orientation } => ImageRef::Pillar {
                variant,
                flipped: orientation == Orientation::Down,
            },
            ObstacleKind::Stone => ImageRef::Stone,
        }
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Obstacle
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    pub assets: Assets,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Simulated seconds since the session was created
    pub clock: f64,
    /// Clock value the current run started at
    pub start_offset: f64,
    /// Whole seconds survived in the current run (frozen during game over)
    pub score: u32,
    pub difficulty: Difficulty,
    pub spawn_timer: SpawnTimer,
    pub background: ScrollingLayer,
    /// None after a crash until the next run
    pub ground: Option<ScrollingLayer>,
    pub glider: Glider,
    /// Live obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Tier announced this frame, for the presentation layer
    pub notice: Option<Tier>,
    /// Events produced since the last tick returned them
    pub events: Vec<GameEvent>,
    pub quit_requested: bool,
    next_id: u32,
}

impl GameState {
    /// Start a session with its first run already active
    pub fn new(settings: Settings, assets: Assets) -> Self {
        let difficulty = Difficulty::default();
        let spawn_timer = SpawnTimer::new(difficulty.spawn_period(&settings));
        let state = Self {
            rng: Pcg32::seed_from_u64(settings.seed),
            phase: GamePhase::Active,
            clock: 0.0,
            start_offset: 0.0,
            score: 0,
            difficulty,
            spawn_timer,
            background: ScrollingLayer::background(&assets, &settings),
            ground: Some(ScrollingLayer::ground(&assets, &settings)),
            glider: Glider::new(&assets, &settings),
            obstacles: Vec::new(),
            notice: None,
            events: vec![GameEvent::SessionStarted],
            quit_requested: false,
            next_id: 1,
            settings,
            assets,
        };
        log::info!("Session started (seed {})", state.settings.seed);
        state
    }

    pub fn is_active(&self) -> bool {
        self.phase == GamePhase::Active
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// New glider and ground, score counted from now.
    ///
    /// Difficulty drops back to Easy here rather than at the end of the frame,
    /// so a spawn on the restart frame already uses the base speed and period.
    pub fn restart(&mut self) {
        self.glider = Glider::new(&self.assets, &self.settings);
        self.ground = Some(ScrollingLayer::ground(&self.assets, &self.settings));
        self.start_offset = self.clock;
        self.score = 0;
        if let Some(Transition::Reset) = self.difficulty.evaluate(self.score, false, &self.settings) {
            self.spawn_timer
                .set_period(self.difficulty.spawn_period(&self.settings));
            log::debug!("Difficulty reset to {:?}", self.difficulty.tier);
        }
        self.phase = GamePhase::Active;
        self.events.push(GameEvent::SessionStarted);
        log::info!("Run restarted");
    }

    /// Recompute the score from the clock (only while active)
    pub fn update_score(&mut self) {
        if self.is_active() {
            self.score = (self.clock - self.start_offset).max(0.0).floor() as u32;
        }
    }

    /// Speed for an obstacle spawned now
    pub fn obstacle_speed(&self) -> f32 {
        self.settings.obstacle_speed * self.difficulty.speed_factor(&self.settings)
    }

    /// Things the glider can crash into
    pub fn collidables(&self) -> impl Iterator<Item = &dyn Sprite> {
        self.ground
            .iter()
            .map(|g| g as &dyn Sprite)
            .chain(self.obstacles.iter().map(|o| o as &dyn Sprite))
    }
}
