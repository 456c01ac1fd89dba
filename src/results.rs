//! Fire-and-forget boundary to the results endpoint
//!
//! The engine hands a finished play-through to a [`ResultsSink`] and moves
//! on. Submission failures are logged and swallowed: gameplay and the final
//! summary screen never depend on the reporting backend being reachable.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::score::FinalSummary;

/// Wire payload for a finished play-through (camelCase to match the
/// results endpoint's JSON contract)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsPayload {
    pub score: u64,
    pub correct_answers: u32,
    pub total_questions: u32,
    /// Wall-clock seconds spent in the run
    pub time_spent: u64,
    pub difficulty: String,
    pub completed_scenarios: Vec<String>,
}

impl ResultsPayload {
    pub fn from_summary(
        summary: &FinalSummary,
        time_spent: u64,
        difficulty: &str,
        completed_scenarios: Vec<String>,
    ) -> Self {
        Self {
            score: summary.score,
            correct_answers: summary.correct_answers,
            total_questions: summary.total_questions,
            time_spent,
            difficulty: difficulty.to_string(),
            completed_scenarios,
        }
    }
}

/// Acknowledgment echoed by the results endpoint. Informational only: it
/// never alters the locally computed statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsAck {
    pub game_id: String,
    pub accuracy: f64,
    pub achievements: Vec<String>,
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("results endpoint rejected the payload: {0}")]
    Rejected(String),
    #[error("results endpoint unreachable: {0}")]
    Unavailable(String),
    #[error("failed to encode results payload")]
    Encode(#[from] serde_json::Error),
}

/// Destination for finished play-throughs. Implementations may post over
/// HTTP, write to disk, or buffer in memory.
pub trait ResultsSink {
    fn submit(&mut self, payload: &ResultsPayload) -> Result<ResultsAck, SubmitError>;
}

/// Submit a payload, logging and swallowing any failure. Returns whether the
/// submission succeeded, for callers that surface a "results saved" note.
pub fn submit_results(sink: &mut dyn ResultsSink, payload: &ResultsPayload) -> bool {
    match sink.submit(payload) {
        Ok(ack) => {
            log::info!(
                "results submitted as {}: score {} ({}/{})",
                ack.game_id,
                payload.score,
                payload.correct_answers,
                payload.total_questions
            );
            true
        }
        Err(err) => {
            log::warn!("results submission failed, continuing: {err}");
            false
        }
    }
}

/// Buffering sink for tests and offline play
#[derive(Debug, Default)]
pub struct MemorySink {
    pub submitted: Vec<ResultsPayload>,
}

impl ResultsSink for MemorySink {
    fn submit(&mut self, payload: &ResultsPayload) -> Result<ResultsAck, SubmitError> {
        let accuracy = if payload.total_questions == 0 {
            0.0
        } else {
            let raw = payload.correct_answers as f64 / payload.total_questions as f64 * 100.0;
            (raw * 100.0).round() / 100.0
        };
        self.submitted.push(payload.clone());
        Ok(ResultsAck {
            game_id: format!("game_{}", self.submitted.len()),
            accuracy,
            achievements: Vec::new(),
        })
    }
}
