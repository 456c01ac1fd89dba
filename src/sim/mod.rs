//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod state;
pub mod tick;

pub use state::{
    Debris, FailReason, Floater, GamePhase, Outcome, RenderSnapshot, SimState,
};
pub use tick::{Direction, TickInput, tick};
