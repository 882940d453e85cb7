//! Collision detection between the glider and the world
//!
//! Masks are compared pixel by pixel at their rounded screen positions, so the
//! transparent corners of a tilted glider never count as a hit. Flying off
//! the top of the screen counts as a crash too.

use super::mask::Mask;
use super::state::{GameEvent, GamePhase, GameState, Glider, Sprite};

/// Whether two sprites' opaque pixels overlap
pub fn sprites_overlap(a: &dyn Sprite, b: &dyn Sprite) -> bool {
    match (a.mask(), b.mask()) {
        (Some(ma), Some(mb)) => masks_overlap(ma, a.top_left(), mb, b.top_left()),
        _ => false,
    }
}

/// Whether mask `a` at `a_pos` overlaps mask `b` at `b_pos` (screen pixels)
pub fn masks_overlap(a: &Mask, a_pos: (i32, i32), b: &Mask, b_pos: (i32, i32)) -> bool {
    a.overlaps(b, (b_pos.0 - a_pos.0, b_pos.1 - a_pos.1))
}

/// Top edge of the glider's rect has reached the top of the screen
pub fn hits_ceiling(glider: &Glider) -> bool {
    glider.top_left().1 <= 0
}

/// Whether the glider has crashed into the ground, an obstacle or the ceiling
pub fn glider_crashed(state: &GameState) -> bool {
    let glider = &state.glider;
    hits_ceiling(glider) || state.collidables().any(|other| sprites_overlap(glider, other))
}

/// Run the crash check and end the run on a hit. Skipped during game over.
///
/// Returns true if the run ended this call.
pub fn check_collisions(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Active || !glider_crashed(state) {
        return false;
    }

    state.obstacles.clear();
    state.ground = None;
    state.phase = GamePhase::GameOver;
    state.glider.alive = false;
    state.events.push(GameEvent::CollisionOccurred);
    log::info!("Crashed with score {}", state.score);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;
    use crate::sim::assets::Assets;
    use crate::sim::state::{Obstacle, ObstacleKind};
    use glam::Vec2;

    fn state() -> GameState {
        let settings = Settings::default();
        let assets = Assets::placeholder(&settings);
        GameState::new(settings, assets)
    }

    #[test]
    fn test_no_collision_keeps_running() {
        let mut s = state();
        assert!(!check_collisions(&mut s));
        assert!(s.is_active());
        assert!(s.ground.is_some());
        assert!(s.glider.alive);
    }

    #[test]
    fn test_ground_collision_ends_run() {
        let mut s = state();
        let ground_top = s.ground.as_ref().unwrap().pos.y;
        s.glider.pos.y = ground_top - 10.0;
        s.obstacles.push(Obstacle::new(
            9,
            ObstacleKind::Stone,
            Vec2::new(300.0, 300.0),
            250.0,
            Mask::filled(20, 20),
            -100.0,
        ));

        assert!(check_collisions(&mut s));
        assert_eq!(s.phase, GamePhase::GameOver);
        assert!(!s.glider.alive);
        assert!(s.ground.is_none());
        assert!(s.obstacles.is_empty());
        assert_eq!(s.events.last(), Some(&GameEvent::CollisionOccurred));
    }

    #[test]
    fn test_obstacle_collision() {
        let mut s = state();
        let (gx, gy) = s.glider.top_left();
        s.obstacles.push(Obstacle::new(
            3,
            ObstacleKind::Stone,
            Vec2::new(gx as f32 + 10.0, gy as f32 + 5.0),
            250.0,
            Mask::filled(20, 20),
            -100.0,
        ));
        assert!(check_collisions(&mut s));
    }

    #[test]
    fn test_bounding_box_touch_without_pixels_is_not_a_hit() {
        let mut s = state();
        let (gx, gy) = s.glider.top_left();
        let (w, h) = s.glider.mask.size();
        // A block tucked into the glider's transparent bottom-right corner
        s.obstacles.push(Obstacle::new(
            4,
            ObstacleKind::Stone,
            Vec2::new((gx + w as i32 - 3) as f32, (gy + h as i32 - 3) as f32),
            250.0,
            Mask::filled(20, 20),
            -100.0,
        ));
        assert!(!check_collisions(&mut s));
        assert!(s.is_active());
    }

    #[test]
    fn test_ceiling_ends_run() {
        let mut s = state();
        s.glider.pos.y = 0.0;
        assert!(check_collisions(&mut s));
        assert!(!s.is_active());
    }

    #[test]
    fn test_skipped_during_game_over() {
        let mut s = state();
        s.glider.pos.y = -50.0;
        s.phase = GamePhase::GameOver;
        assert!(!check_collisions(&mut s));
        assert!(s.ground.is_some());
        assert!(!s.events.contains(&GameEvent::CollisionOccurred));
    }
}
