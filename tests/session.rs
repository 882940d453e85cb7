use glam::Vec2;
use glider_run::Settings;
use glider_run::sim::{
    Assets, EntityKind, GameEvent, GamePhase, GameState, Mask, Obstacle, ObstacleKind, Tier,
    TickInput, tick,
};

const DT: f32 = 1.0 / 120.0;

fn new_session() -> GameState {
    let settings = Settings::default();
    let assets = Assets::placeholder(&settings);
    GameState::new(settings, assets)
}

fn hover(state: &mut GameState) {
    state.glider.pos.y = 500.0;
    state.glider.velocity = 0.0;
}

#[test]
fn obstacle_leaves_at_despawn_edge() {
    let mut state = new_session();
    const ID: u32 = 10_000;
    let width = 60;
    // Right edge starts at 570: 570 - 250 * 2.68 = -100
    state.obstacles.push(Obstacle::new(
        ID,
        ObstacleKind::Stone,
        Vec2::new(570.0 - width as f32, 100.0),
        250.0,
        Mask::filled(width, 40),
        -100.0,
    ));

    let mut removed_at = None;
    for frame in 1..=400 {
        hover(&mut state);
        tick(&mut state, &TickInput::default(), DT);
        state.obstacles.retain(|o| o.id == ID);
        if state.obstacles.is_empty() {
            removed_at = Some(frame as f32 * DT);
            break;
        }
        assert!(state.is_active());
    }

    let t = removed_at.expect("obstacle never despawned");
    assert!(t >= 2.68 - DT / 2.0, "despawned too early at {}", t);
    assert!(t < 2.68 + DT, "despawned too late at {}", t);
}

#[test]
fn falling_glider_crashes_into_ground_and_restarts() {
    let mut state = new_session();
    let mut crashed = false;
    for _ in 0..(120 * 3) {
        let events = tick(&mut state, &TickInput::default(), DT);
        if events.contains(&GameEvent::CollisionOccurred) {
            crashed = true;
            break;
        }
    }
    assert!(crashed);
    assert_eq!(state.phase, GamePhase::GameOver);
    assert!(!state.glider.alive);

    let snap = state.snapshot();
    assert!(snap.show_menu);
    assert!(!snap.active);
    assert_eq!(snap.score_y, 400.0 + state.assets.menu_height);
    // Only the background survives a crash
    assert_eq!(snap.sprites.len(), 1);
    assert_eq!(snap.sprites[0].kind, EntityKind::Background);

    let events = tick(&mut state, &TickInput::jump(), DT);
    assert_eq!(events, vec![GameEvent::SessionStarted]);
    assert!(state.is_active());
    let kinds: Vec<_> = state.snapshot().sprites.iter().map(|d| d.kind).collect();
    assert_eq!(kinds, vec![EntityKind::Background, EntityKind::Ground, EntityKind::Glider]);
}

#[test]
fn survival_escalates_to_hard_then_resets_after_restart() {
    let mut state = new_session();
    let mut speedups = Vec::new();
    for _ in 0..(120 * 40) {
        hover(&mut state);
        let events = tick(&mut state, &TickInput::default(), DT);
        state.obstacles.clear();
        speedups.extend(events.into_iter().filter(|e| matches!(e, GameEvent::SpeedUp(_))));
    }
    assert_eq!(speedups, vec![GameEvent::SpeedUp(Tier::Medium), GameEvent::SpeedUp(Tier::Hard)]);
    assert_eq!(state.score, 40);
    assert_eq!(state.difficulty.tier, Tier::Hard);
    assert_eq!(state.ground.as_ref().unwrap().speed, 500.0);
    assert!((state.spawn_timer.period - 1.3 / 1.4).abs() < 1e-5);
    // Background is never sped up
    assert_eq!(state.background.speed, 200.0);

    state.glider.pos.y = -10.0;
    tick(&mut state, &TickInput::default(), DT);
    assert!(!state.is_active());
    let frozen = state.score;
    for _ in 0..120 {
        tick(&mut state, &TickInput::default(), DT);
    }
    assert_eq!(state.score, frozen);

    tick(&mut state, &TickInput::jump(), DT);
    assert_eq!(state.difficulty.tier, Tier::Easy);
    assert_eq!(state.ground.as_ref().unwrap().speed, 250.0);
    assert!((state.spawn_timer.period - 1.3).abs() < 1e-6);
    assert_eq!(state.snapshot().tier, Tier::Easy);
}

#[test]
fn custom_settings_drive_the_glider() {
    let settings = Settings::from_json(r#"{ "gravity": 1600.0, "jump_height": 250.0 }"#).unwrap();
    let assets = Assets::placeholder(&settings);
    let mut state = GameState::new(settings, assets);

    tick(&mut state, &TickInput::jump(), 0.0);
    assert_eq!(state.glider.velocity, -250.0);
    for _ in 0..60 {
        tick(&mut state, &TickInput::default(), 1.0 / 60.0);
        if !state.is_active() {
            break;
        }
    }
    assert!(state.glider.velocity > 1000.0 || !state.is_active());
}

#[test]
fn snapshot_serializes_for_renderers() {
    let mut state = new_session();
    tick(&mut state, &TickInput::default(), DT);
    let json = serde_json::to_string(&state.snapshot()).unwrap();
    assert!(json.contains("\"score\":0"));
    assert!(json.contains("Glider"));
}
