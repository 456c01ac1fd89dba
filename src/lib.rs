//! Disaster Drill - 2D simulation core for preparedness mini-games
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, hazards, game state)
//! - `level`: Static level catalogs for the earthquake and flood drills
//! - `geom`: Axis-aligned rectangle collision and containment
//! - `score`: Running statistics, level scoring, final summary
//! - `results`: Fire-and-forget boundary to the results endpoint
//! - `scenario`: Typed interface to the quiz scenario content service

pub mod engine;
pub mod geom;
pub mod level;
pub mod results;
pub mod scenario;
pub mod score;
pub mod sim;

pub use engine::{Engine, HazardMode};
pub use geom::Rect;
pub use level::{Entity, EntityKind, Level, LevelCatalog, Ruleset};
pub use score::{FinalSummary, GameStatistics};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, matching the host render loop)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions (pixels)
    pub const FIELD_WIDTH: f32 = 900.0;
    pub const FIELD_HEIGHT: f32 = 400.0;

    /// Player bounding square
    pub const PLAYER_SIZE: f32 = 20.0;
    /// Player movement per tick while on foot
    pub const MOVE_SPEED: f32 = 5.0;
    /// Player movement per tick while swimming
    pub const SWIM_SPEED: f32 = 3.0;
    /// Fraction of the current-flow vector applied as assist/resistance
    pub const CURRENT_FACTOR: f32 = 0.5;

    /// Falling debris bounding square
    pub const DEBRIS_SIZE: f32 = 10.0;
    /// Chance of a debris spawn per elapsed second while shaking
    pub const DEBRIS_SPAWN_CHANCE: f32 = 0.3;
    /// Debris fall speed range (pixels/second)
    pub const DEBRIS_MIN_SPEED: f32 = 120.0;
    pub const DEBRIS_MAX_SPEED: f32 = 300.0;

    /// Vertical band below the water surface that counts as swimming
    pub const SWIM_BAND: f32 = 50.0;
    /// Surface must be this far above the player before drowning drain starts
    pub const DROWN_MARGIN: f32 = 50.0;
    /// Stamina drained per water tick while swimming
    pub const SWIM_STAMINA_DRAIN: f32 = 0.5;
    /// Stamina regained per water tick on dry footing
    pub const STAMINA_REGEN: f32 = 1.0;
    /// Health lost per water tick once stamina is exhausted
    pub const EXHAUSTION_DAMAGE: f32 = 2.0;
    /// Health lost per sim tick while deeply submerged outside a safe zone
    pub const DROWN_DAMAGE: f32 = 0.1;
    /// Water-rise interval (10 Hz in the flood drill)
    pub const WATER_TICK: f32 = 0.1;
    /// Pixels of water rise that each point of safe-zone elevation offsets
    pub const ELEVATION_STEP: f32 = 30.0;

    /// Delay before advancing past a completed level (host feedback window)
    pub const ADVANCE_DELAY_TICKS: u32 = 120;

    /// Starting lives per play-through
    pub const STARTING_LIVES: u32 = 3;
}
