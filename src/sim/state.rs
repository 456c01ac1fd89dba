//! Simulation state and core gameplay types
//!
//! One `SimState` exists per active play-through. It is replaced wholesale on
//! level transitions and restarts; the host owns the authoritative copy.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::consts::*;
use crate::geom::Rect;
use crate::level::{Level, Ruleset};

/// Current phase of the engine-level state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    /// Title/instructions screen
    Intro,
    /// Choosing between the earthquake and flood drills
    ModeSelect,
    /// Active gameplay
    Playing,
    /// Pure suspend; resuming mutates nothing
    Paused,
    /// Every level cleared
    Completed,
    /// Attempt ended early
    Failed,
}

/// Why an attempt failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailReason {
    HealthDepleted,
    TimeExpired,
}

/// Terminal outcome of the current attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    None,
    Completed,
    Failed(FailReason),
}

/// A falling-debris hazard. Spawned stochastically from a hazard zone,
/// removed exactly once: on leaving the field or on hitting the player.
#[derive(Debug, Clone, Serialize)]
pub struct Debris {
    pub id: u32,
    pub pos: Vec2,
    /// Fall speed in pixels/second
    pub speed: f32,
    /// Health lost on impact, inherited from the source hazard zone
    pub damage: f32,
}

impl Debris {
    pub fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: Vec2::splat(DEBRIS_SIZE),
        }
    }
}

/// Runtime position of a floatable entity (flood drill)
#[derive(Debug, Clone, Serialize)]
pub struct Floater {
    pub id: String,
    pub pos: Vec2,
    pub size: Vec2,
    /// Bottom edge of the entity's placed bounds. Submersion keys off this,
    /// not the floated position, so drift continues after the water peaks.
    pub base_bottom: f32,
}

/// Delayed level-advancement, tagged with the attempt that scheduled it so a
/// restart during the feedback window can never advance a fresh state.
#[derive(Debug, Clone, Copy)]
pub struct PendingAdvance {
    pub attempt: u64,
    pub ticks_left: u32,
}

/// Complete per-attempt simulation state
#[derive(Debug, Clone)]
pub struct SimState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub outcome: Outcome,
    /// Index into the active level catalog
    pub level_index: usize,
    pub player: Rect,
    /// Clamped to [0, 100]
    pub health: f32,
    /// Clamped to [0, 100]; drained only by the flood drill
    pub stamina: f32,
    /// Shaking (earthquake) or swimming (flood)
    pub in_hazard: bool,
    /// Water surface y; meaningful only under flood rules
    pub water_level: f32,
    /// Whole seconds left; non-increasing absent a level transition
    pub time_remaining: u32,
    pub debris: Vec<Debris>,
    pub floaters: Vec<Floater>,
    pub level_complete: bool,
    pub pending_advance: Option<PendingAdvance>,
    /// Incremented on every reset; voids stale scheduled advances
    pub attempt: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Accumulators for the 1 Hz countdown and 10 Hz water interval
    pub second_acc: f32,
    pub water_acc: f32,
    next_debris_id: u32,
}

impl SimState {
    /// Create a fresh state at the intro screen
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Intro,
            outcome: Outcome::None,
            level_index: 0,
            player: Rect::new(0.0, 0.0, PLAYER_SIZE, PLAYER_SIZE),
            health: 100.0,
            stamina: 100.0,
            in_hazard: false,
            water_level: 0.0,
            time_remaining: 0,
            debris: Vec::new(),
            floaters: Vec::new(),
            level_complete: false,
            pending_advance: None,
            attempt: 0,
            time_ticks: 0,
            second_acc: 0.0,
            water_acc: 0.0,
            next_debris_id: 1,
        }
    }

    /// Full field reset to a level's start parameters. Everything except the
    /// RNG stream and the attempt counter is replaced.
    pub fn reset_for_level(&mut self, level: &Level, index: usize) {
        self.attempt += 1;
        self.level_index = index;
        self.player = Rect {
            pos: level.player_start,
            size: Vec2::splat(PLAYER_SIZE),
        };
        self.health = 100.0;
        self.stamina = 100.0;
        self.time_remaining = level.time_limit;
        self.debris.clear();
        self.level_complete = false;
        self.pending_advance = None;
        self.outcome = Outcome::None;
        self.second_acc = 0.0;
        self.water_acc = 0.0;
        match &level.ruleset {
            Ruleset::Earthquake => {
                self.in_hazard = true;
                self.water_level = 0.0;
                self.floaters.clear();
            }
            Ruleset::Flood(params) => {
                self.in_hazard = false;
                self.water_level = params.initial_water_level;
                self.floaters = level
                    .entities
                    .iter()
                    .filter(|e| e.floats)
                    .map(|e| Floater {
                        id: e.id.clone(),
                        pos: e.bounds.pos,
                        size: e.bounds.size,
                        base_bottom: e.bounds.bottom(),
                    })
                    .collect();
            }
        }
        log::info!(
            "level {} '{}' start: time limit {}s",
            index,
            level.id,
            level.time_limit
        );
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.phase, GamePhase::Completed | GamePhase::Failed)
    }

    /// Allocate a debris id (unique within the attempt)
    pub fn next_debris_id(&mut self) -> u32 {
        let id = self.next_debris_id;
        self.next_debris_id += 1;
        id
    }

    /// Read-only view for the presentation layer
    pub fn snapshot(&self, level: &Level) -> RenderSnapshot {
        RenderSnapshot {
            phase: self.phase,
            outcome: self.outcome,
            level_index: self.level_index,
            level_id: level.id.clone(),
            level_name: level.name.clone(),
            objective: level.objective.clone(),
            player: self.player,
            health: self.health,
            stamina: level.ruleset.is_flood().then_some(self.stamina),
            water_level: level.ruleset.is_flood().then_some(self.water_level),
            in_hazard: self.in_hazard,
            debris: self.debris.clone(),
            floaters: self.floaters.clone(),
            time_remaining: self.time_remaining,
            level_complete: self.level_complete,
        }
    }
}

/// Per-tick renderable snapshot handed to the presentation layer
#[derive(Debug, Clone, Serialize)]
pub struct RenderSnapshot {
    pub phase: GamePhase,
    pub outcome: Outcome,
    pub level_index: usize,
    pub level_id: String,
    pub level_name: String,
    pub objective: String,
    pub player: Rect,
    pub health: f32,
    pub stamina: Option<f32>,
    pub water_level: Option<f32>,
    pub in_hazard: bool,
    pub debris: Vec<Debris>,
    pub floaters: Vec<Floater>,
    pub time_remaining: u32,
    pub level_complete: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::LevelCatalog;

    #[test]
    fn test_reset_replaces_all_fields() {
        let catalog = LevelCatalog::flood();
        let level = catalog.get(0).unwrap();

        let mut state = SimState::new(7);
        state.health = 12.0;
        state.stamina = 3.0;
        state.level_complete = true;
        state.debris.push(Debris {
            id: 1,
            pos: Vec2::ZERO,
            speed: 100.0,
            damage: 10.0,
        });

        state.reset_for_level(level, 0);
        assert_eq!(state.health, 100.0);
        assert_eq!(state.stamina, 100.0);
        assert!(!state.level_complete);
        assert!(state.debris.is_empty());
        assert_eq!(state.time_remaining, level.time_limit);
        assert_eq!(state.player.pos, level.player_start);
        assert_eq!(state.water_level, 350.0);
        // Floatable entities got runtime positions
        assert!(!state.floaters.is_empty());
    }

    #[test]
    fn test_reset_bumps_attempt_and_cancels_advance() {
        let catalog = LevelCatalog::earthquake();
        let level = catalog.get(0).unwrap();

        let mut state = SimState::new(7);
        state.pending_advance = Some(PendingAdvance {
            attempt: 0,
            ticks_left: 30,
        });
        let before = state.attempt;
        state.reset_for_level(level, 0);
        assert_eq!(state.attempt, before + 1);
        assert!(state.pending_advance.is_none());
    }

    #[test]
    fn test_snapshot_hides_flood_fields_for_quake() {
        let catalog = LevelCatalog::earthquake();
        let level = catalog.get(0).unwrap();
        let mut state = SimState::new(7);
        state.reset_for_level(level, 0);

        let snap = state.snapshot(level);
        assert!(snap.stamina.is_none());
        assert!(snap.water_level.is_none());
        assert!(snap.in_hazard, "ground shakes from level start");
    }
}
