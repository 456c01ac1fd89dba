//! Running play-through statistics and final scoring
//!
//! Statistics persist across level transitions and restarts within one
//! play-through. Each level completion counts as a correct answer and each
//! failed attempt as an incorrect one, so accuracy reads as the share of
//! attempts that ended in survival.

use serde::Serialize;

use crate::consts::STARTING_LIVES;
use crate::level::Level;
use crate::sim::state::SimState;

/// Cumulative statistics for one play-through
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameStatistics {
    pub score: u64,
    pub lives: u32,
    /// Levels completed
    pub correct_answers: u32,
    /// Levels attempted to a terminal result (completed or failed)
    pub total_questions: u32,
    /// Distinct cleared level ids, in first-clear order. Replaying a level
    /// after a restart never duplicates an entry.
    pub completed_levels: Vec<String>,
}

impl Default for GameStatistics {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStatistics {
    pub fn new() -> Self {
        Self {
            score: 0,
            lives: STARTING_LIVES,
            correct_answers: 0,
            total_questions: 0,
            completed_levels: Vec::new(),
        }
    }

    /// Score a completed level and fold it into the running totals. Returns
    /// the points awarded for this level alone.
    ///
    /// Award = base points + remaining seconds, leftover health, and leftover
    /// stamina (each floored) times the ruleset's bonus factors.
    pub fn record_level_complete(&mut self, state: &SimState, level: &Level) -> u64 {
        let factors = level.ruleset.score_factors();
        let points = level.base_points() as u64
            + state.time_remaining as u64 * factors.time_bonus as u64
            + state.health as u64 * factors.health_bonus as u64
            + state.stamina as u64 * factors.stamina_bonus as u64;
        self.score += points;
        self.correct_answers += 1;
        self.total_questions += 1;
        if !self.completed_levels.iter().any(|id| id == &level.id) {
            self.completed_levels.push(level.id.clone());
        }
        points
    }

    /// A failed attempt consumes a life and counts against accuracy
    pub fn record_failure(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        self.total_questions += 1;
    }

    /// Share of attempts that ended in survival, as a percentage rounded to
    /// two decimals. Zero attempts reads as zero, never a division error.
    pub fn accuracy(&self) -> f64 {
        if self.total_questions == 0 {
            return 0.0;
        }
        let raw = self.correct_answers as f64 / self.total_questions as f64 * 100.0;
        (raw * 100.0).round() / 100.0
    }

    /// Earned achievement ids. Checks are independent: a 90%+ run earns both
    /// accuracy tiers.
    pub fn achievements(&self) -> Vec<&'static str> {
        let mut earned = Vec::new();
        if self.total_questions > 0 && self.correct_answers == self.total_questions {
            earned.push("perfect_game");
        }
        if self.score >= 500 {
            earned.push("high_scorer");
        }
        let raw_accuracy = if self.total_questions == 0 {
            0.0
        } else {
            self.correct_answers as f64 / self.total_questions as f64 * 100.0
        };
        if raw_accuracy >= 90.0 {
            earned.push("safety_expert");
        }
        if raw_accuracy >= 75.0 {
            earned.push("safety_conscious");
        }
        if self.total_questions >= 5 {
            earned.push("dedicated_learner");
        }
        earned
    }

    /// Immutable end-of-run report
    pub fn final_summary(&self) -> FinalSummary {
        FinalSummary {
            score: self.score,
            correct_answers: self.correct_answers,
            total_questions: self.total_questions,
            accuracy: self.accuracy(),
            lives_remaining: self.lives,
            achievements: self
                .achievements()
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

/// End-of-run summary handed to the results boundary and the host UI
/// (camelCase on the wire, like the rest of the results contract)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalSummary {
    pub score: u64,
    pub correct_answers: u32,
    pub total_questions: u32,
    pub accuracy: f64,
    pub lives_remaining: u32,
    pub achievements: Vec<String>,
}
