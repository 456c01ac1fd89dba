//! Typed interface to the quiz scenario content service
//!
//! Scenarios are multiple-choice preparedness questions served alongside the
//! drills. The engine only defines the data contract and a source trait; the
//! host supplies the transport.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// One answer option within a scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Choice {
    pub id: String,
    pub text: String,
    pub correct: bool,
    /// Shown after answering, right or wrong
    pub explanation: String,
    pub points: u32,
}

/// A multiple-choice preparedness question
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub id: String,
    pub title: String,
    pub description: String,
    /// The situation text presented before the choices
    pub situation: String,
    pub choices: Vec<Choice>,
    /// Answer window in seconds
    pub time_limit: u32,
    pub difficulty: Difficulty,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Scenario {
    /// The highest-value correct choice, if the scenario has one
    pub fn best_choice(&self) -> Option<&Choice> {
        self.choices
            .iter()
            .filter(|c| c.correct)
            .max_by_key(|c| c.points)
    }
}

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("scenario '{0}' not found")]
    NotFound(String),
    #[error("scenario service unreachable: {0}")]
    Unavailable(String),
    #[error("failed to decode scenario payload")]
    Decode(#[from] serde_json::Error),
}

/// Filters for listing scenarios
#[derive(Debug, Clone, Default)]
pub struct ScenarioFilter {
    pub category: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub limit: Option<usize>,
}

/// Provider of scenario content. The host wires this to its content service;
/// tests use an in-memory implementation.
pub trait ScenarioSource {
    fn scenario(&self, id: &str) -> Result<Scenario, ScenarioError>;
    fn scenarios(&self, filter: &ScenarioFilter) -> Result<Vec<Scenario>, ScenarioError>;
}

/// Static in-memory source for tests and offline play
#[derive(Debug, Default)]
pub struct StaticScenarios {
    pub scenarios: Vec<Scenario>,
}

impl ScenarioSource for StaticScenarios {
    fn scenario(&self, id: &str) -> Result<Scenario, ScenarioError> {
        self.scenarios
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| ScenarioError::NotFound(id.to_string()))
    }

    fn scenarios(&self, filter: &ScenarioFilter) -> Result<Vec<Scenario>, ScenarioError> {
        let mut out: Vec<Scenario> = self
            .scenarios
            .iter()
            .filter(|s| {
                filter
                    .category
                    .as_ref()
                    .is_none_or(|c| &s.category == c)
            })
            .filter(|s| filter.difficulty.is_none_or(|d| s.difficulty == d))
            .cloned()
            .collect();
        if let Some(limit) = filter.limit {
            out.truncate(limit);
        }
        Ok(out)
    }
}
