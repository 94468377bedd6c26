use std::ops::RangeInclusive;

use pumpkin_patch::difficulty::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn decay_is_strictly_decreasing_within_unit_interval() {
    assert_eq!(decay(0), 1.0);
    let mut previous = decay(0);
    for round in 1..=200 {
        let d = decay(round);
        assert!(d > 0.0 && d <= 1.0, "decay({round}) = {d}");
        assert!(d < previous, "decay({round}) did not shrink");
        previous = d;
    }
}

#[test]
fn decay_stays_positive_for_huge_rounds() {
    assert!(decay(1100) > 0.0);
    assert!(decay(u32::MAX) > 0.0);
    assert!(decay(u32::MAX) <= decay(1100));
}

#[test]
fn decay_reaches_ten_percent_near_round_23() {
    assert!((decay(23) - 0.1).abs() < 0.005);
    assert!((decay(30) - 0.05).abs() < 0.005);
}

#[test]
fn ranges_narrow_towards_fixed_minimums() {
    let ranges: [fn(u32) -> RangeInclusive<f32>; 4] = [
        dormant_range,
        possession_range,
        possession_delay_range,
        recovery_range,
    ];
    for range in ranges {
        let early = range(1);
        let late = range(50);
        assert_eq!(early.start(), late.start());
        assert!(early.start() <= early.end());
        assert!(late.end() < early.end());
    }
    assert!((dormant_range(0).end() - 4.0).abs() < 1e-6);
    assert!((possession_range(0).end() - 4.0).abs() < 1e-6);
    assert!((possession_delay_range(0).end() - 2.0).abs() < 1e-6);
    assert!((recovery_range(0).end() - 4.0).abs() < 1e-6);
}

#[test]
fn recovery_chance_falls_as_rounds_progress() {
    assert!((recovery_chance(0) - 0.8).abs() < 1e-6);
    assert!(recovery_chance(10) < recovery_chance(1));
    assert!(recovery_chance(100) > 0.0);
}

#[test]
fn possessed_window_shrinks_towards_half_a_second() {
    assert!((possessed_time(0) - 1.5).abs() < 1e-6);
    assert!(possessed_time(5) < possessed_time(1));
    assert!((possessed_time(100) - 0.5).abs() < 1e-3);
}

#[test]
fn draws_stay_inside_their_ranges() {
    let mut rng = StdRng::seed_from_u64(7);
    for round in [1, 8, 25] {
        for _ in 0..500 {
            assert!(dormant_range(round).contains(&dormant_time(round, &mut rng)));
            assert!(possession_range(round).contains(&possession_time(round, &mut rng)));
            assert!(possession_delay_range(round).contains(&possession_delay(round, &mut rng)));
            assert!(recovery_range(round).contains(&recovery_time(round, &mut rng)));
            assert!(RECOVERY_ALPHA_TARGET.contains(&recovery_alpha_target(&mut rng)));
        }
    }
}

#[test]
fn recovery_roll_tracks_its_probability() {
    let mut rng = StdRng::seed_from_u64(11);
    let trials = 10_000;
    let hits = (0..trials).filter(|_| roll_recovery(1, &mut rng)).count();
    let observed = hits as f64 / trials as f64;
    assert!((observed - recovery_chance(1)).abs() < 0.03, "observed {observed}");
}
