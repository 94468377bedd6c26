use pumpkin_patch::compute::init_state;
use pumpkin_patch::config::GameConfig;
use pumpkin_patch::entities::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn entity_clone_and_eq() {
    assert_eq!(PumpkinPhase::Possessed, PumpkinPhase::Possessed);
    assert_ne!(PumpkinPhase::Possession, PumpkinPhase::PossessionDelay);
    assert_eq!(GameStatus::Playing, GameStatus::Playing);
    assert_ne!(GameStatus::Playing, GameStatus::GameOver);
    assert_ne!(EyeDirection::Left, EyeDirection::Right);
    assert_ne!(Cue::HissStart { slot: 0 }, Cue::HissStart { slot: 1 });

    let phase = PumpkinPhase::Recovery;
    assert_eq!(phase.clone(), PumpkinPhase::Recovery);
}

#[test]
fn game_state_clone_is_independent() {
    let original = init_state(&GameConfig::default(), 0, &mut StdRng::seed_from_u64(1));
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.pumpkins[0].phase = PumpkinPhase::Possessed;
    cloned.lives = 0;
    cloned.spirits.push(Spirit { slot: 0, age: 0.0 });
    cloned.scenery.owls[0].poked = true;

    assert_eq!(original.pumpkins[0].phase, PumpkinPhase::Dormant);
    assert_eq!(original.lives, 3);
    assert!(original.spirits.is_empty());
    assert!(!original.scenery.owls[0].poked);
}
