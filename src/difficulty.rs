/// Round-scaled timing for the possession cycle.
///
/// Every range narrows with an exponential decay, `e^(-0.1 * round)`, so the
/// spread left above each fixed minimum is ~10% of the starting spread by
/// round 23 and ~5% by round 30.

use std::ops::RangeInclusive;

use rand::Rng;

const DECAY_LAMBDA: f64 = 0.1;

/// Multiplier in `(0, 1]` that shrinks as rounds progress.  Bottoms out at
/// the smallest normal `f32` instead of underflowing to zero.
pub fn decay(round: u32) -> f32 {
    (-DECAY_LAMBDA * f64::from(round))
        .exp()
        .max(f64::from(f32::MIN_POSITIVE)) as f32
}

// ── Ranges ────────────────────────────────────────────────────────────────────

pub fn dormant_range(round: u32) -> RangeInclusive<f32> {
    1.0..=1.5 + decay(round) * 2.5
}

pub fn possession_range(round: u32) -> RangeInclusive<f32> {
    1.0..=1.0 + decay(round) * 3.0
}

pub fn possession_delay_range(round: u32) -> RangeInclusive<f32> {
    0.1..=0.5 + decay(round) * 1.5
}

pub fn recovery_range(round: u32) -> RangeInclusive<f32> {
    0.5..=1.0 + decay(round) * 3.0
}

/// How faint the carved face gets before a recovering pumpkin starts
/// fading back in.
pub const RECOVERY_ALPHA_TARGET: RangeInclusive<f32> = 0.0..=0.5;

/// Probability that a pumpkin leaving `PossessionDelay` recovers instead of
/// becoming possessed.
pub fn recovery_chance(round: u32) -> f64 {
    (decay(round) * 0.8) as f64
}

/// Reaction window while possessed.  Not randomised.
pub fn possessed_time(round: u32) -> f32 {
    0.5 + decay(round) * 1.0
}

// ── Draws ─────────────────────────────────────────────────────────────────────

pub fn dormant_time(round: u32, rng: &mut impl Rng) -> f32 {
    rng.gen_range(dormant_range(round))
}

pub fn possession_time(round: u32, rng: &mut impl Rng) -> f32 {
    rng.gen_range(possession_range(round))
}

pub fn possession_delay(round: u32, rng: &mut impl Rng) -> f32 {
    rng.gen_range(possession_delay_range(round))
}

pub fn recovery_time(round: u32, rng: &mut impl Rng) -> f32 {
    rng.gen_range(recovery_range(round))
}

/// Bernoulli draw; `true` sends the pumpkin into `Recovery`.
pub fn roll_recovery(round: u32, rng: &mut impl Rng) -> bool {
    rng.gen_bool(recovery_chance(round))
}

pub fn recovery_alpha_target(rng: &mut impl Rng) -> f32 {
    rng.gen_range(RECOVERY_ALPHA_TARGET)
}
