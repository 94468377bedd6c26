use pumpkin_patch::config::GameConfig;
use pumpkin_patch::entities::*;
use pumpkin_patch::scenery::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn owl() -> Owl {
    Owl {
        x: 60.0,
        y: 420.0,
        eye_direction: EyeDirection::Down,
        time_since_eye_change: 0.0,
        time_to_eye_change: 2.0,
        eyes_open: true,
        poked: false,
        time_since_blink_change: 0.0,
        time_to_blink_change: 4.0,
    }
}

// ── Clouds ────────────────────────────────────────────────────────────────────

#[test]
fn new_cloud_starts_in_the_sky() {
    let mut rng = seeded_rng();
    for _ in 0..200 {
        let c = new_cloud(600.0, 200.0, &mut rng);
        assert!(c.x >= -200.0 && c.x <= 1280.0);
        assert!(c.dx >= -40.0 && c.dx <= -10.0);
        assert_eq!(c.y, 600.0);
    }
}

#[test]
fn cloud_drifts_left() {
    let c = Cloud { x: 500.0, y: 600.0, dx: -20.0, width: 200.0 };
    let c2 = tick_cloud(&c, 0.5, &mut seeded_rng());
    assert!((c2.x - 490.0).abs() < 1e-4);
    assert_eq!(c2.dx, -20.0);
    assert_eq!(c2.y, 600.0);
}

#[test]
fn offscreen_cloud_restarts_past_the_right_edge() {
    let mut rng = seeded_rng();
    for _ in 0..100 {
        let c = Cloud { x: -201.0, y: 600.0, dx: -25.0, width: 200.0 };
        assert!(is_offscreen(&c));
        let c2 = tick_cloud(&c, 1.0 / 30.0, &mut rng);
        assert!(c2.x >= 1280.0, "x = {}", c2.x);
        assert!(c2.dx >= -40.0 && c2.dx <= -10.0);
        // 1–10 seconds of travel before it is visible again
        assert!(c2.x <= 1280.0 - c2.dx * 10.0 + 1e-3);
        assert_eq!(c2.y, 600.0);
    }
}

// ── Moon ──────────────────────────────────────────────────────────────────────

#[test]
fn moon_starts_below_left_horizon_and_turns_clockwise() {
    let m = new_moon();
    assert_eq!(m.angle, 90.0);
    let m2 = tick_moon(&m, 10.0);
    assert!((m2.angle - (90.0 - 10.0 * m.angular_speed)).abs() < 1e-4);
}

#[test]
fn moon_angle_wraps() {
    let mut m = new_moon();
    for _ in 0..10_000 {
        m = tick_moon(&m, 1.0);
        assert!(m.angle.abs() < 360.0);
    }
}

// ── Owls ──────────────────────────────────────────────────────────────────────

#[test]
fn new_owl_looks_down_with_eyes_open() {
    let o = new_owl(10.0, 20.0, &mut seeded_rng());
    assert_eq!(o.eye_direction, EyeDirection::Down);
    assert!(o.eyes_open);
    assert!(!o.poked);
    assert!((0.5..=4.0).contains(&o.time_to_eye_change));
    assert!((3.0..=6.0).contains(&o.time_to_blink_change));
}

#[test]
fn gaze_never_reselects_current_direction() {
    let mut rng = seeded_rng();
    for current in [EyeDirection::Down, EyeDirection::Left, EyeDirection::Right] {
        for _ in 0..100 {
            assert_ne!(next_eye_direction(current, &mut rng), current);
        }
    }
}

#[test]
fn gaze_changes_when_its_timer_passes() {
    let o = owl();
    let o2 = tick_owl(&o, 2.5, &mut seeded_rng());
    assert_ne!(o2.eye_direction, EyeDirection::Down);
    assert_eq!(o2.time_since_eye_change, 0.0);
    assert!((0.5..=4.0).contains(&o2.time_to_eye_change));
}

#[test]
fn blink_closes_briefly_then_reopens() {
    let mut rng = seeded_rng();
    let o = tick_owl(&owl(), 4.0, &mut rng);
    assert!(!o.eyes_open);
    assert!(o.time_to_blink_change <= 0.25);

    let o = tick_owl(&o, 0.3, &mut rng);
    assert!(o.eyes_open);
    assert!((3.0..=6.0).contains(&o.time_to_blink_change));
}

#[test]
fn poke_sets_flag_until_next_blink_change() {
    let mut rng = seeded_rng();
    let o = poke_owl(&owl(), &mut rng);
    assert!(o.poked);
    assert!(o.eyes_open);
    assert_eq!(o.time_to_blink_change, OWL_POKE_BLINK_SECS);
    assert_eq!(owl_eyes_shown(&o), None);

    let o = tick_owl(&o, 0.1, &mut rng);
    assert!(o.poked);

    let o = tick_owl(&o, 0.2, &mut rng);
    assert!(!o.poked);
    assert!(!o.eyes_open);
}

#[test]
fn open_unpoked_owl_shows_its_gaze() {
    let mut o = owl();
    o.eye_direction = EyeDirection::Left;
    assert_eq!(owl_eyes_shown(&o), Some(EyeDirection::Left));
    o.eyes_open = false;
    assert_eq!(owl_eyes_shown(&o), None);
}

// ── Spirits ───────────────────────────────────────────────────────────────────

#[test]
fn spirit_grows_fades_and_disappears() {
    let s = new_spirit(2);
    assert!((spirit_scale(&s) - 0.125).abs() < 1e-6);
    assert_eq!(spirit_alpha(&s), 0.0);

    let mid = tick_spirits(&[s.clone()], 0.75);
    assert_eq!(mid.len(), 1);
    assert!((spirit_alpha(&mid[0]) - 1.0).abs() < 1e-5);

    let late = tick_spirits(&mid, 0.2);
    assert!(spirit_alpha(&late[0]) < 0.25);
    assert!(spirit_scale(&late[0]) > 3.5);

    assert!(tick_spirits(&late, 0.1).is_empty());
}

// ── Whole backdrop ────────────────────────────────────────────────────────────

#[test]
fn scenery_follows_config() {
    let config = GameConfig::default();
    let scenery = new_scenery(&config, &mut seeded_rng());
    assert_eq!(scenery.clouds.len(), config.clouds.len());
    assert_eq!(scenery.owls.len(), config.owl_positions.len());

    let next = tick_scenery(&scenery, 1.0, &mut seeded_rng());
    assert!(next.moon.angle < scenery.moon.angle);
    assert_eq!(next.clouds.len(), scenery.clouds.len());
}
