/// All game entity types: pure data, no logic.

// ── Pumpkins ──────────────────────────────────────────────────────────────────

/// Where a pumpkin is in its possession cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PumpkinPhase {
    /// Quiet; waiting a random delay before a spirit starts to move in.
    Dormant,
    /// Carved face fading in towards full opacity.
    Possession,
    /// Face fully visible; pausing before recovery or full possession.
    PossessionDelay,
    /// Face fading back out towards a partially-visible target.
    Recovery,
    /// Evil face showing; the only window in which a tap exorcises.
    Possessed,
    /// Spirit has escaped; the hole fades out before the pumpkin goes dormant.
    SpiritRelease,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Pumpkin {
    pub phase: PumpkinPhase,
    /// Seconds remaining in the current phase.
    pub timer: f32,
    /// Opacity of the carved face, 0..=1.
    pub face_alpha: f32,
    /// Signed fade rate.  Positive while possessing, negative while recovering.
    pub alpha_change_per_second: f32,
    /// Which of the nine carved faces (and matching evil face) is shown.
    pub face_variant: u8,
}

/// Outcome of tapping a pumpkin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TapOutcome {
    TooEarly,
    Exorcised,
    TooLate,
}

/// Which overlay a renderer should draw on top of the pumpkin body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FaceLayer {
    None,
    Carved { variant: u8, alpha: f32 },
    Evil { variant: u8 },
    Hole { alpha: f32 },
}

/// Short-lived ghost rising out of a pumpkin whose spirit escaped.
#[derive(Clone, Debug, PartialEq)]
pub struct Spirit {
    pub slot: usize,
    /// Seconds since the spirit appeared.
    pub age: f32,
}

// ── Scenery ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Cloud {
    pub x: f32,
    pub y: f32,
    /// Horizontal speed in px/s.  Always negative (clouds drift left).
    pub dx: f32,
    pub width: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Moon {
    /// Degrees from vertical; positive is counter-clockwise.
    pub angle: f32,
    /// Degrees per second.
    pub angular_speed: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EyeDirection {
    Down,
    Left,
    Right,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Owl {
    pub x: f32,
    pub y: f32,
    pub eye_direction: EyeDirection,
    pub time_since_eye_change: f32,
    pub time_to_eye_change: f32,
    pub eyes_open: bool,
    pub poked: bool,
    pub time_since_blink_change: f32,
    pub time_to_blink_change: f32,
}

/// Decorative backdrop shared by every screen of a session.
#[derive(Clone, Debug, PartialEq)]
pub struct Scenery {
    pub clouds: Vec<Cloud>,
    pub moon: Moon,
    pub owls: Vec<Owl>,
}

// ── Cues ──────────────────────────────────────────────────────────────────────

/// Fire-and-forget triggers for audio and effects, produced by the simulation
/// and consumed by whatever front-end is attached.
#[derive(Clone, Debug, PartialEq)]
pub enum Cue {
    /// Any tap on a pumpkin while the game is running.
    Thump,
    HissStart { slot: usize },
    HissStop { slot: usize },
    Exorcised { slot: usize },
    TooEarly { slot: usize },
    TooLate { slot: usize },
    SpiritEscaped { slot: usize },
    LifeLost { lives_left: u32 },
    RoundAdvanced { round: u32 },
    OwlPoked { index: usize },
    GameOver { round: u32 },
}

// ── Master game state ─────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

/// The entire session state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub pumpkins: Vec<Pumpkin>,
    pub spirits: Vec<Spirit>,
    pub scenery: Scenery,
    pub lives: u32,
    pub round: u32,
    /// Seconds of play left before the next round starts.
    pub round_time_left: f32,
    pub round_duration: f32,
    /// Best round reached in earlier sessions, as loaded at session start.
    pub high_round: u32,
    pub status: GameStatus,
    /// Cues produced by the most recent `tick` / `tap` / `poke_owl` call.
    pub cues: Vec<Cue>,
}
