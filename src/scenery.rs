/// Ambient backdrop: drifting clouds, the moon's arc, blinking owls, and the
/// ghosts that rise out of pumpkins.  None of it affects gameplay.
///
/// Same shape as `compute`: each function takes the current value (and the
/// injected RNG where needed) and returns the next one.

use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{Cloud, EyeDirection, Moon, Owl, Scenery, Spirit};

// ── Clouds ────────────────────────────────────────────────────────────────────

const CLOUD_MIN_SPEED: f32 = 10.0;
const CLOUD_MAX_SPEED: f32 = 40.0;

fn cloud_speed(rng: &mut impl Rng) -> f32 {
    -rng.gen_range(CLOUD_MIN_SPEED..=CLOUD_MAX_SPEED)
}

/// Place a cloud somewhere across the visible sky.
pub fn new_cloud(y: f32, width: f32, rng: &mut impl Rng) -> Cloud {
    Cloud {
        x: rng.gen_range(-width..=GameConfig::VIRTUAL_WIDTH),
        y,
        dx: cloud_speed(rng),
        width,
    }
}

pub fn is_offscreen(cloud: &Cloud) -> bool {
    cloud.x < -cloud.width
}

/// Re-roll the speed and park the cloud past the right edge, 1–10 seconds
/// of travel away from reappearing.
pub fn restart_cloud(cloud: &Cloud, rng: &mut impl Rng) -> Cloud {
    let dx = cloud_speed(rng);
    Cloud {
        x: GameConfig::VIRTUAL_WIDTH + rng.gen_range(-dx..=-dx * 10.0),
        dx,
        ..cloud.clone()
    }
}

pub fn tick_cloud(cloud: &Cloud, delta: f32, rng: &mut impl Rng) -> Cloud {
    let moved = Cloud {
        x: cloud.x + cloud.dx * delta.max(0.0),
        ..cloud.clone()
    };
    if is_offscreen(&moved) {
        restart_cloud(&moved, rng)
    } else {
        moved
    }
}

// ── Moon ──────────────────────────────────────────────────────────────────────

/// Seconds for a full revolution: a horizon-to-horizon crossing takes about
/// three minutes of the ~109° visible arc.
const MOON_PERIOD_SECS: f32 = 197.53 * 3.0;

/// Start below the left horizon so the moon takes a while to appear.
pub fn new_moon() -> Moon {
    Moon {
        angle: 90.0,
        angular_speed: 360.0 / MOON_PERIOD_SECS,
    }
}

pub fn tick_moon(moon: &Moon, delta: f32) -> Moon {
    Moon {
        angle: (moon.angle - delta.max(0.0) * moon.angular_speed) % 360.0,
        ..moon.clone()
    }
}

// ── Owls ──────────────────────────────────────────────────────────────────────

fn eye_change_time(rng: &mut impl Rng) -> f32 {
    rng.gen_range(0.5..=4.0)
}

fn open_time(rng: &mut impl Rng) -> f32 {
    rng.gen_range(3.0..=6.0)
}

fn closed_time(rng: &mut impl Rng) -> f32 {
    rng.gen_range(0.0..=0.25)
}

/// Blink timer set by a poke.
pub const OWL_POKE_BLINK_SECS: f32 = 0.25;

pub fn new_owl(x: f32, y: f32, rng: &mut impl Rng) -> Owl {
    Owl {
        x,
        y,
        eye_direction: EyeDirection::Down,
        time_since_eye_change: 0.0,
        time_to_eye_change: eye_change_time(rng),
        eyes_open: true,
        poked: false,
        time_since_blink_change: 0.0,
        time_to_blink_change: open_time(rng),
    }
}

/// Pick one of the two directions the owl is not currently looking in.
pub fn next_eye_direction(current: EyeDirection, rng: &mut impl Rng) -> EyeDirection {
    let coin = rng.gen_bool(0.5);
    match (current, coin) {
        (EyeDirection::Down, true) => EyeDirection::Left,
        (EyeDirection::Down, false) => EyeDirection::Right,
        (EyeDirection::Left, true) => EyeDirection::Down,
        (EyeDirection::Left, false) => EyeDirection::Right,
        (EyeDirection::Right, true) => EyeDirection::Down,
        (EyeDirection::Right, false) => EyeDirection::Left,
    }
}

pub fn tick_owl(owl: &Owl, delta: f32, rng: &mut impl Rng) -> Owl {
    let delta = delta.max(0.0);
    let mut next = owl.clone();

    next.time_since_eye_change += delta;
    if next.time_since_eye_change > next.time_to_eye_change {
        next.eye_direction = next_eye_direction(next.eye_direction, rng);
        next.time_since_eye_change = 0.0;
        next.time_to_eye_change = eye_change_time(rng);
    }

    next.time_since_blink_change += delta;
    if next.time_since_blink_change >= next.time_to_blink_change {
        next.eyes_open = !next.eyes_open;
        next.time_to_blink_change = if next.eyes_open {
            open_time(rng)
        } else {
            closed_time(rng)
        };
        next.time_since_blink_change = 0.0;
        // Any blink change ends the poked look
        next.poked = false;
    }

    next
}

/// React to a tap: startled look now, a blink shortly after, and a pause
/// before the gaze moves again.
pub fn poke_owl(owl: &Owl, rng: &mut impl Rng) -> Owl {
    Owl {
        poked: true,
        eyes_open: true,
        time_to_blink_change: OWL_POKE_BLINK_SECS,
        time_since_blink_change: 0.0,
        time_to_eye_change: OWL_POKE_BLINK_SECS + eye_change_time(rng),
        time_since_eye_change: 0.0,
        ..owl.clone()
    }
}

/// The gaze to draw, or `None` when the owl shows its closed-eye frame.
pub fn owl_eyes_shown(owl: &Owl) -> Option<EyeDirection> {
    if owl.poked || !owl.eyes_open {
        None
    } else {
        Some(owl.eye_direction)
    }
}

// ── Spirits ───────────────────────────────────────────────────────────────────

pub const SPIRIT_LIFETIME_SECS: f32 = 1.0;
const SPIRIT_FADE_IN_SECS: f32 = 0.75;
const SPIRIT_START_SCALE: f32 = 0.125;
const SPIRIT_END_SCALE: f32 = 4.0;

pub fn new_spirit(slot: usize) -> Spirit {
    Spirit { slot, age: 0.0 }
}

/// Advance every spirit and drop the ones that have finished.
pub fn tick_spirits(spirits: &[Spirit], delta: f32) -> Vec<Spirit> {
    spirits
        .iter()
        .map(|s| Spirit {
            age: s.age + delta.max(0.0),
            ..s.clone()
        })
        .filter(|s| s.age < SPIRIT_LIFETIME_SECS)
        .collect()
}

/// Grows from 1/8 to 4x over its lifetime.
pub fn spirit_scale(spirit: &Spirit) -> f32 {
    let t = (spirit.age / SPIRIT_LIFETIME_SECS).clamp(0.0, 1.0);
    SPIRIT_START_SCALE + (SPIRIT_END_SCALE - SPIRIT_START_SCALE) * t
}

/// Fades in, then fades out quickly over the last quarter second.
pub fn spirit_alpha(spirit: &Spirit) -> f32 {
    if spirit.age < SPIRIT_FADE_IN_SECS {
        spirit.age / SPIRIT_FADE_IN_SECS
    } else {
        let fade_out = SPIRIT_LIFETIME_SECS - SPIRIT_FADE_IN_SECS;
        (1.0 - (spirit.age - SPIRIT_FADE_IN_SECS) / fade_out).clamp(0.0, 1.0)
    }
}

// ── Whole backdrop ────────────────────────────────────────────────────────────

pub fn new_scenery(config: &GameConfig, rng: &mut impl Rng) -> Scenery {
    Scenery {
        clouds: config
            .clouds
            .iter()
            .map(|c| new_cloud(c.y, c.width, rng))
            .collect(),
        moon: new_moon(),
        owls: config
            .owl_positions
            .iter()
            .map(|&(x, y)| new_owl(x, y, rng))
            .collect(),
    }
}

pub fn tick_scenery(scenery: &Scenery, delta: f32, rng: &mut impl Rng) -> Scenery {
    Scenery {
        clouds: scenery
            .clouds
            .iter()
            .map(|c| tick_cloud(c, delta, rng))
            .collect(),
        moon: tick_moon(&scenery.moon, delta),
        owls: scenery
            .owls
            .iter()
            .map(|o| tick_owl(o, delta, rng))
            .collect(),
    }
}
