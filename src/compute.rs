/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current state
/// (and, where needed, an RNG handle) and returns a brand-new value.  Side
/// effects are limited to the injected RNG and to the cues pushed for the
/// front-end.

use rand::Rng;

use crate::config::GameConfig;
use crate::difficulty;
use crate::entities::{
    Cue, FaceLayer, GameState, GameStatus, Pumpkin, PumpkinPhase, TapOutcome,
};
use crate::scenery;

/// How long the hole left by an escaped spirit stays on screen.
pub const SPIRIT_RELEASE_SECS: f32 = 2.0;

/// Number of carved-face variants to pick from.
pub const FACE_VARIANTS: u8 = 9;

// ── Pumpkin constructors ─────────────────────────────────────────────────────

/// A quiet pumpkin with a fresh dormant delay and a newly picked face
/// (possibly the same one as before).
pub fn reset_to_dormant(round: u32, rng: &mut impl Rng) -> Pumpkin {
    Pumpkin {
        phase: PumpkinPhase::Dormant,
        timer: difficulty::dormant_time(round, rng),
        face_alpha: 0.0,
        alpha_change_per_second: 0.0,
        face_variant: rng.gen_range(1..=FACE_VARIANTS),
    }
}

// ── Pumpkin state machine ────────────────────────────────────────────────────

/// Move the carved face along its current fade.  Only the two fading phases
/// change alpha; the rate is always `(target - start) / duration`, so a fade
/// picks up from wherever the previous one left off.
fn advance_fade(pumpkin: &mut Pumpkin, dt: f32) {
    if matches!(pumpkin.phase, PumpkinPhase::Possession | PumpkinPhase::Recovery) {
        pumpkin.face_alpha =
            (pumpkin.face_alpha + pumpkin.alpha_change_per_second * dt).clamp(0.0, 1.0);
    }
}

fn enter_possession(pumpkin: &Pumpkin, round: u32, rng: &mut impl Rng) -> Pumpkin {
    let timer = difficulty::possession_time(round, rng);
    Pumpkin {
        phase: PumpkinPhase::Possession,
        timer,
        alpha_change_per_second: (1.0 - pumpkin.face_alpha) / timer,
        ..pumpkin.clone()
    }
}

/// The transition taken when the current phase's timer runs out.
fn expire(
    pumpkin: &Pumpkin,
    slot: usize,
    round: u32,
    rng: &mut impl Rng,
    cues: &mut Vec<Cue>,
) -> Pumpkin {
    match pumpkin.phase {
        PumpkinPhase::Dormant => enter_possession(
            &Pumpkin {
                face_alpha: 0.0,
                ..pumpkin.clone()
            },
            round,
            rng,
        ),
        PumpkinPhase::Possession => Pumpkin {
            phase: PumpkinPhase::PossessionDelay,
            timer: difficulty::possession_delay(round, rng),
            face_alpha: 1.0,
            alpha_change_per_second: 0.0,
            ..pumpkin.clone()
        },
        PumpkinPhase::PossessionDelay => {
            if difficulty::roll_recovery(round, rng) {
                let timer = difficulty::recovery_time(round, rng);
                let target = difficulty::recovery_alpha_target(rng);
                Pumpkin {
                    phase: PumpkinPhase::Recovery,
                    timer,
                    alpha_change_per_second: (target - pumpkin.face_alpha) / timer,
                    ..pumpkin.clone()
                }
            } else {
                cues.push(Cue::HissStart { slot });
                Pumpkin {
                    phase: PumpkinPhase::Possessed,
                    timer: difficulty::possessed_time(round),
                    alpha_change_per_second: 0.0,
                    ..pumpkin.clone()
                }
            }
        }
        PumpkinPhase::Recovery => enter_possession(pumpkin, round, rng),
        PumpkinPhase::Possessed => {
            cues.push(Cue::HissStop { slot });
            cues.push(Cue::SpiritEscaped { slot });
            Pumpkin {
                phase: PumpkinPhase::SpiritRelease,
                timer: SPIRIT_RELEASE_SECS,
                alpha_change_per_second: 0.0,
                ..pumpkin.clone()
            }
        }
        PumpkinPhase::SpiritRelease => reset_to_dormant(round, rng),
    }
}

/// Advance one pumpkin by `delta` seconds.
///
/// At most one transition happens per call.  Time past the expiry is carried
/// into the new phase, so a long frame does not lose fade progress.  The carry
/// never exceeds the new phase's own duration, and Possessed and SpiritRelease
/// always start with their full timer.
pub fn tick_pumpkin(
    pumpkin: &Pumpkin,
    slot: usize,
    round: u32,
    delta: f32,
    rng: &mut impl Rng,
    cues: &mut Vec<Cue>,
) -> Pumpkin {
    let delta = delta.max(0.0);
    let in_phase = delta.min(pumpkin.timer.max(0.0));

    let mut next = pumpkin.clone();
    next.timer -= delta;
    advance_fade(&mut next, in_phase);

    if next.timer > 0.0 {
        return next;
    }

    let overshoot = -next.timer;
    let mut next = expire(&next, slot, round, rng, cues);
    log::debug!(
        "pumpkin {}: {:?} -> {:?} ({:.2}s)",
        slot,
        pumpkin.phase,
        next.phase,
        next.timer
    );
    let carry = match next.phase {
        PumpkinPhase::Possessed | PumpkinPhase::SpiritRelease => 0.0,
        _ => overshoot.min(next.timer),
    };
    advance_fade(&mut next, carry);
    next.timer -= carry;
    next
}

/// Resolve a tap on one pumpkin.
///
/// Possessed is the only correct moment.  Anything earlier is penalised by the
/// caller; a tap after the spirit has left changes nothing.
pub fn tap_pumpkin(
    pumpkin: &Pumpkin,
    slot: usize,
    round: u32,
    rng: &mut impl Rng,
    cues: &mut Vec<Cue>,
) -> (Pumpkin, TapOutcome) {
    let result = match pumpkin.phase {
        PumpkinPhase::Dormant
        | PumpkinPhase::Possession
        | PumpkinPhase::PossessionDelay
        | PumpkinPhase::Recovery => {
            cues.push(Cue::TooEarly { slot });
            (reset_to_dormant(round, rng), TapOutcome::TooEarly)
        }
        PumpkinPhase::Possessed => {
            cues.push(Cue::HissStop { slot });
            cues.push(Cue::Exorcised { slot });
            (reset_to_dormant(round, rng), TapOutcome::Exorcised)
        }
        PumpkinPhase::SpiritRelease => {
            cues.push(Cue::TooLate { slot });
            (pumpkin.clone(), TapOutcome::TooLate)
        }
    };
    cues.push(Cue::Thump);
    log::debug!("pumpkin {} tapped in {:?}: {:?}", slot, pumpkin.phase, result.1);
    result
}

// ── Render queries ───────────────────────────────────────────────────────────

pub fn face_layer(pumpkin: &Pumpkin) -> FaceLayer {
    match pumpkin.phase {
        PumpkinPhase::Dormant => FaceLayer::None,
        PumpkinPhase::Possession | PumpkinPhase::PossessionDelay | PumpkinPhase::Recovery => {
            FaceLayer::Carved {
                variant: pumpkin.face_variant,
                alpha: pumpkin.face_alpha,
            }
        }
        PumpkinPhase::Possessed => FaceLayer::Evil {
            variant: pumpkin.face_variant,
        },
        // The release timer counts down from 2s; the hole is solid for the
        // first second and fades over the last.
        PumpkinPhase::SpiritRelease => FaceLayer::Hole {
            alpha: pumpkin.timer.clamp(0.0, 1.0),
        },
    }
}

/// How hard the pumpkin wobbles.  Grows with the face while a spirit moves in,
/// and is strongest once possessed.
pub fn shake_amplitude(pumpkin: &Pumpkin) -> f32 {
    match pumpkin.phase {
        PumpkinPhase::Dormant | PumpkinPhase::SpiritRelease => 0.0,
        PumpkinPhase::Possession | PumpkinPhase::PossessionDelay | PumpkinPhase::Recovery => {
            pumpkin.face_alpha
        }
        PumpkinPhase::Possessed => 3.0,
    }
}

// ── Session ──────────────────────────────────────────────────────────────────

/// Build the initial session state.
pub fn init_state(config: &GameConfig, high_round: u32, rng: &mut impl Rng) -> GameState {
    let round = config.starting_round;
    GameState {
        pumpkins: (0..config.pumpkin_count)
            .map(|_| reset_to_dormant(round, rng))
            .collect(),
        spirits: Vec::new(),
        scenery: scenery::new_scenery(config, rng),
        lives: config.starting_lives,
        round,
        round_time_left: config.round_duration_secs,
        round_duration: config.round_duration_secs,
        high_round,
        status: GameStatus::Playing,
        cues: Vec::new(),
    }
}

/// Rounds fully survived in this session.
pub fn completed_rounds(state: &GameState) -> u32 {
    state.round.saturating_sub(1)
}

/// Silence every hissing pumpkin and send all of them back to dormant.
fn reset_all_pumpkins(
    pumpkins: &[Pumpkin],
    round: u32,
    rng: &mut impl Rng,
    cues: &mut Vec<Cue>,
) -> Vec<Pumpkin> {
    stop_hissing(pumpkins, cues);
    pumpkins.iter().map(|_| reset_to_dormant(round, rng)).collect()
}

fn stop_hissing(pumpkins: &[Pumpkin], cues: &mut Vec<Cue>) {
    for (slot, p) in pumpkins.iter().enumerate() {
        if p.phase == PumpkinPhase::Possessed {
            cues.push(Cue::HissStop { slot });
        }
    }
}

/// Take one life; returns the new status.
fn lose_life(lives: &mut u32, round: u32, cues: &mut Vec<Cue>) -> GameStatus {
    *lives = lives.saturating_sub(1);
    cues.push(Cue::LifeLost { lives_left: *lives });
    if *lives == 0 {
        log::info!("game over in round {}", round);
        cues.push(Cue::GameOver { round });
        GameStatus::GameOver
    } else {
        GameStatus::Playing
    }
}

/// Advance the whole session by `delta` seconds.  All randomness comes
/// through `rng` so callers control determinism.
///
/// Scenery and fading spirits keep moving after game over; pumpkins and the
/// round clock stop.
pub fn tick(state: &GameState, delta: f32, rng: &mut impl Rng) -> GameState {
    let delta = delta.max(0.0);
    let mut cues = Vec::new();

    let scenery = scenery::tick_scenery(&state.scenery, delta, rng);
    let mut spirits = scenery::tick_spirits(&state.spirits, delta);

    if state.status != GameStatus::Playing {
        return GameState {
            scenery,
            spirits,
            cues,
            ..state.clone()
        };
    }

    // ── 1. Pumpkins ──────────────────────────────────────────────────────────
    let mut lives = state.lives;
    let mut status = GameStatus::Playing;
    let mut pumpkins = Vec::with_capacity(state.pumpkins.len());
    for (slot, p) in state.pumpkins.iter().enumerate() {
        // The rest of the patch freezes with the last life.
        if status == GameStatus::GameOver {
            pumpkins.push(p.clone());
            continue;
        }
        let next = tick_pumpkin(p, slot, state.round, delta, rng, &mut cues);
        let escaped =
            p.phase == PumpkinPhase::Possessed && next.phase == PumpkinPhase::SpiritRelease;
        if escaped {
            spirits.push(scenery::new_spirit(slot));
            status = lose_life(&mut lives, state.round, &mut cues);
        }
        pumpkins.push(next);
    }

    if status == GameStatus::GameOver {
        stop_hissing(&pumpkins, &mut cues);
        return GameState {
            pumpkins,
            spirits,
            scenery,
            lives,
            status,
            cues,
            ..state.clone()
        };
    }

    // ── 2. Round clock ───────────────────────────────────────────────────────
    let mut round = state.round;
    let mut round_time_left = state.round_time_left - delta;
    if round_time_left <= 0.0 {
        round += 1;
        round_time_left += state.round_duration;
        log::info!("round {} begins", round);
        pumpkins = reset_all_pumpkins(&pumpkins, round, rng, &mut cues);
        cues.push(Cue::RoundAdvanced { round });
    }

    GameState {
        pumpkins,
        spirits,
        scenery,
        lives,
        round,
        round_time_left,
        status,
        cues,
        ..state.clone()
    }
}

/// Apply a tap on pumpkin `slot`.  Ignored once the game is over or when the
/// slot does not exist.
pub fn tap(state: &GameState, slot: usize, rng: &mut impl Rng) -> GameState {
    let mut cues = Vec::new();

    let Some(pumpkin) = state.pumpkins.get(slot) else {
        log::warn!("tap on missing pumpkin slot {}", slot);
        return GameState {
            cues,
            ..state.clone()
        };
    };
    if state.status != GameStatus::Playing {
        return GameState {
            cues,
            ..state.clone()
        };
    }

    let (next, outcome) = tap_pumpkin(pumpkin, slot, state.round, rng, &mut cues);
    let mut pumpkins = state.pumpkins.clone();
    pumpkins[slot] = next;

    let mut lives = state.lives;
    let status = if outcome == TapOutcome::TooEarly {
        lose_life(&mut lives, state.round, &mut cues)
    } else {
        GameStatus::Playing
    };
    if status == GameStatus::GameOver {
        stop_hissing(&pumpkins, &mut cues);
    }

    GameState {
        pumpkins,
        lives,
        status,
        cues,
        ..state.clone()
    }
}

/// Poke owl `index`.  Owls respond whether or not a game is in progress.
pub fn poke_owl(state: &GameState, index: usize, rng: &mut impl Rng) -> GameState {
    let mut scenery = state.scenery.clone();
    let mut cues = Vec::new();
    if let Some(owl) = scenery.owls.get_mut(index) {
        *owl = scenery::poke_owl(owl, rng);
        cues.push(Cue::OwlPoked { index });
    }
    GameState {
        scenery,
        cues,
        ..state.clone()
    }
}
