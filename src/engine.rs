//! Top-level engine: mode selection, frame pacing, and run lifecycle
//!
//! The engine owns both drill catalogs, the running statistics, and the
//! active simulation state. Hosts drive it with wall-clock frame times via
//! [`Engine::advance`] or with exact fixed steps via [`Engine::step`].

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::level::{Level, LevelCatalog};
use crate::results::{ResultsPayload, ResultsSink, submit_results};
use crate::score::{FinalSummary, GameStatistics};
use crate::sim::state::{GamePhase, RenderSnapshot, SimState};
use crate::sim::tick::{TickInput, tick};

/// Which drill the player chose at mode select
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HazardMode {
    Earthquake,
    Flood,
}

impl HazardMode {
    pub fn label(&self) -> &'static str {
        match self {
            HazardMode::Earthquake => "earthquake",
            HazardMode::Flood => "flood",
        }
    }
}

/// Owns one play-through end to end
pub struct Engine {
    quake: LevelCatalog,
    flood: LevelCatalog,
    mode: HazardMode,
    pub stats: GameStatistics,
    pub state: SimState,
    accumulator: f32,
}

impl Engine {
    /// Engine over the built-in catalogs, starting at the intro screen
    pub fn new(seed: u64) -> Self {
        Self::with_catalogs(LevelCatalog::earthquake(), LevelCatalog::flood(), seed)
    }

    /// Engine over custom catalogs (data-driven level packs)
    pub fn with_catalogs(quake: LevelCatalog, flood: LevelCatalog, seed: u64) -> Self {
        Self {
            quake,
            flood,
            mode: HazardMode::Earthquake,
            stats: GameStatistics::new(),
            state: SimState::new(seed),
            accumulator: 0.0,
        }
    }

    pub fn mode(&self) -> HazardMode {
        self.mode
    }

    pub fn catalog(&self) -> &LevelCatalog {
        match self.mode {
            HazardMode::Earthquake => &self.quake,
            HazardMode::Flood => &self.flood,
        }
    }

    /// The level the state currently points at
    pub fn level(&self) -> Option<&Level> {
        self.catalog().get(self.state.level_index)
    }

    /// Leave the intro screen for mode select
    pub fn begin(&mut self) {
        if self.state.phase == GamePhase::Intro {
            self.state.phase = GamePhase::ModeSelect;
        }
    }

    /// Choose a drill and start its first level. Only valid at mode select;
    /// calls in any other phase are ignored.
    pub fn select_mode(&mut self, mode: HazardMode) {
        if self.state.phase != GamePhase::ModeSelect {
            return;
        }
        self.mode = mode;
        let Some(level) = self.catalog().get(0).cloned() else {
            log::warn!("{} catalog is empty", mode.label());
            return;
        };
        log::info!("starting {} drill", mode.label());
        self.stats = GameStatistics::new();
        self.state.reset_for_level(&level, 0);
        self.state.phase = GamePhase::Playing;
        self.accumulator = 0.0;
    }

    /// Run exactly one fixed simulation step
    pub fn step(&mut self, input: &TickInput) {
        let catalog = match self.mode {
            HazardMode::Earthquake => &self.quake,
            HazardMode::Flood => &self.flood,
        };
        tick(&mut self.state, catalog, &mut self.stats, input, SIM_DT);
    }

    /// Consume a wall-clock frame, running however many fixed steps fit.
    /// One-shot inputs (pause) apply to the first substep only. Substeps are
    /// capped; leftover time beyond the cap is dropped.
    pub fn advance(&mut self, elapsed: f32, input: &TickInput) {
        let elapsed = elapsed.min(0.1);
        self.accumulator += elapsed;

        let mut current = *input;
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.step(&current);
            self.accumulator -= SIM_DT;
            substeps += 1;
            current.pause = false;
        }
        if substeps == MAX_SUBSTEPS && self.accumulator >= SIM_DT {
            log::debug!("dropping {:.3}s of backlog", self.accumulator);
            self.accumulator = 0.0;
        }
    }

    /// Restart the attempt from level 0. There is no checkpoint recovery:
    /// every restart begins the drill over. Valid while playing, paused, or
    /// after a failure with lives remaining; the failure already consumed
    /// its life, the restart itself costs nothing.
    pub fn restart(&mut self) {
        let allowed = matches!(
            self.state.phase,
            GamePhase::Playing | GamePhase::Paused | GamePhase::Failed
        );
        if !allowed {
            return;
        }
        if self.state.phase == GamePhase::Failed && self.stats.lives == 0 {
            log::info!("no lives remaining, run is over");
            return;
        }
        let level = self.catalog().get(0).cloned();
        if let Some(level) = level {
            self.state.reset_for_level(&level, 0);
            self.state.phase = GamePhase::Playing;
            self.accumulator = 0.0;
        }
    }

    /// Back to mode select with fresh statistics (the "play again" path from
    /// a finished run)
    pub fn play_again(&mut self) {
        if !self.state.is_terminal() {
            return;
        }
        let seed = self.state.seed;
        self.state = SimState::new(seed.wrapping_add(self.state.attempt));
        self.state.phase = GamePhase::ModeSelect;
        self.stats = GameStatistics::new();
        self.accumulator = 0.0;
    }

    /// Renderable view of the current state, when a level is active
    pub fn snapshot(&self) -> Option<RenderSnapshot> {
        self.level().map(|level| self.state.snapshot(level))
    }

    pub fn final_summary(&self) -> FinalSummary {
        self.stats.final_summary()
    }

    /// Report the finished run to a results sink. Failures are logged and
    /// swallowed; returns whether the submission went through.
    pub fn submit(&self, sink: &mut dyn ResultsSink, time_spent: u64) -> bool {
        let payload = ResultsPayload::from_summary(
            &self.final_summary(),
            time_spent,
            self.mode.label(),
            self.stats.completed_levels.clone(),
        );
        submit_results(sink, &payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{ADVANCE_DELAY_TICKS, STARTING_LIVES};
    use crate::results::MemorySink;
    use crate::sim::state::Outcome;
    use glam::Vec2;

    fn started_engine(mode: HazardMode) -> Engine {
        let mut engine = Engine::new(99);
        engine.begin();
        engine.select_mode(mode);
        engine
    }

    #[test]
    fn test_lifecycle_intro_to_playing() {
        let mut engine = Engine::new(1);
        assert_eq!(engine.state.phase, GamePhase::Intro);

        // Selecting a mode before mode select is ignored
        engine.select_mode(HazardMode::Flood);
        assert_eq!(engine.state.phase, GamePhase::Intro);

        engine.begin();
        assert_eq!(engine.state.phase, GamePhase::ModeSelect);

        engine.select_mode(HazardMode::Flood);
        assert_eq!(engine.state.phase, GamePhase::Playing);
        assert!(engine.level().unwrap().ruleset.is_flood());
        assert_eq!(engine.stats.lives, STARTING_LIVES);
    }

    #[test]
    fn test_advance_runs_fixed_steps() {
        let mut engine = started_engine(HazardMode::Earthquake);
        let before = engine.state.time_ticks;

        // Three frames' worth of wall time
        engine.advance(3.0 * SIM_DT, &TickInput::default());
        assert_eq!(engine.state.time_ticks, before + 3);
    }

    #[test]
    fn test_advance_caps_substeps() {
        let mut engine = started_engine(HazardMode::Earthquake);

        // A huge stall clamps to 0.1s and then to the substep cap
        engine.advance(5.0, &TickInput::default());
        assert!(engine.state.time_ticks <= MAX_SUBSTEPS as u64);
    }

    #[test]
    fn test_pause_applies_to_first_substep_only() {
        let mut engine = started_engine(HazardMode::Earthquake);
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        // Two substeps with a held pause flag must not toggle twice
        engine.advance(2.0 * SIM_DT, &pause);
        assert_eq!(engine.state.phase, GamePhase::Paused);
    }

    #[test]
    fn test_restart_after_failure_keeps_consumed_life() {
        let mut engine = started_engine(HazardMode::Earthquake);
        engine.state.health = 0.0;
        engine.step(&TickInput::default());
        assert_eq!(engine.state.phase, GamePhase::Failed);
        assert_eq!(engine.stats.lives, STARTING_LIVES - 1);

        engine.restart();
        assert_eq!(engine.state.phase, GamePhase::Playing);
        assert_eq!(engine.state.health, 100.0);
        // The restart itself costs nothing further
        assert_eq!(engine.stats.lives, STARTING_LIVES - 1);
        assert_eq!(engine.state.level_index, 0);
    }

    #[test]
    fn test_no_restart_with_zero_lives() {
        let mut engine = started_engine(HazardMode::Earthquake);
        for _ in 0..STARTING_LIVES {
            engine.state.phase = GamePhase::Playing;
            engine.state.health = 0.0;
            engine.step(&TickInput::default());
            assert_eq!(engine.state.phase, GamePhase::Failed);
            engine.restart();
        }
        // Third failure exhausted the lives; the last restart was refused
        assert_eq!(engine.stats.lives, 0);
        assert_eq!(engine.state.phase, GamePhase::Failed);
    }

    #[test]
    fn test_voluntary_restart_costs_nothing() {
        let mut engine = started_engine(HazardMode::Earthquake);
        engine.state.health = 55.0;
        engine.restart();
        assert_eq!(engine.state.health, 100.0);
        assert_eq!(engine.stats.lives, STARTING_LIVES);
        assert_eq!(engine.stats.total_questions, 0);
    }

    #[test]
    fn test_full_quake_playthrough_and_summary() {
        let mut engine = started_engine(HazardMode::Earthquake);
        // Safe-zone interiors for the three quake levels
        let spots = [
            Vec2::new(340.0, 280.0),
            Vec2::new(220.0, 200.0),
            Vec2::new(700.0, 250.0),
        ];

        for spot in spots {
            engine.state.player.pos = spot;
            for _ in 0..ADVANCE_DELAY_TICKS + 2 {
                engine.step(&TickInput::default());
                if engine.state.is_terminal() {
                    break;
                }
            }
        }

        assert_eq!(engine.state.phase, GamePhase::Completed);
        assert_eq!(engine.state.outcome, Outcome::Completed);

        let summary = engine.final_summary();
        assert_eq!(summary.correct_answers, 3);
        assert_eq!(summary.total_questions, 3);
        assert_eq!(summary.accuracy, 100.0);
        assert!(summary.achievements.contains(&"perfect_game".to_string()));
        // At least the three base awards
        assert!(summary.score >= 300);
    }

    #[test]
    fn test_play_again_returns_to_mode_select() {
        let mut engine = started_engine(HazardMode::Flood);
        // Not valid mid-run
        engine.play_again();
        assert_eq!(engine.state.phase, GamePhase::Playing);

        engine.state.phase = GamePhase::Completed;
        engine.play_again();
        assert_eq!(engine.state.phase, GamePhase::ModeSelect);
        assert_eq!(engine.stats.total_questions, 0);

        // A fresh run can start in the other mode
        engine.select_mode(HazardMode::Earthquake);
        assert_eq!(engine.state.phase, GamePhase::Playing);
        assert!(!engine.level().unwrap().ruleset.is_flood());
    }

    #[test]
    fn test_submit_reports_completed_levels() {
        let mut engine = started_engine(HazardMode::Earthquake);
        engine.state.player.pos = Vec2::new(340.0, 280.0);
        for _ in 0..ADVANCE_DELAY_TICKS + 2 {
            engine.step(&TickInput::default());
        }
        assert_eq!(engine.state.level_index, 1);

        let mut sink = MemorySink::default();
        assert!(engine.submit(&mut sink, 30));
        let payload = &sink.submitted[0];
        assert_eq!(payload.correct_answers, 1);
        assert_eq!(payload.completed_scenarios, vec!["home".to_string()]);
        assert_eq!(payload.difficulty, "earthquake");
    }

    #[test]
    fn test_submit_after_restart_does_not_duplicate_levels() {
        let mut engine = started_engine(HazardMode::Earthquake);
        // Clear the home level
        engine.state.player.pos = Vec2::new(340.0, 280.0);
        for _ in 0..ADVANCE_DELAY_TICKS + 2 {
            engine.step(&TickInput::default());
        }
        assert_eq!(engine.state.level_index, 1);

        // Fail in the classroom, restart from level 0, clear home again
        engine.state.health = 0.0;
        engine.step(&TickInput::default());
        assert_eq!(engine.state.phase, GamePhase::Failed);
        engine.restart();
        engine.state.player.pos = Vec2::new(340.0, 280.0);
        for _ in 0..ADVANCE_DELAY_TICKS + 2 {
            engine.step(&TickInput::default());
        }

        let mut sink = MemorySink::default();
        assert!(engine.submit(&mut sink, 60));
        let payload = &sink.submitted[0];
        // The replayed clear scores again but the id lists once
        assert_eq!(payload.correct_answers, 2);
        assert_eq!(payload.completed_scenarios, vec!["home".to_string()]);
    }
}
