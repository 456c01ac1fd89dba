//! Fixed timestep simulation tick
//!
//! Advances one attempt deterministically. Every tick runs the same fixed
//! order: timer, input, hazard evolution, damage, containment, advancement.
//! A completion and a failure arriving in the same tick resolve in favor of
//! completion.

use rand::Rng;

use crate::consts::*;
use crate::geom::Rect;
use crate::level::{FloodParams, Level, LevelCatalog, Ruleset, SafeZone};
use crate::score::GameStatistics;
use crate::sim::state::{Debris, FailReason, GamePhase, Outcome, PendingAdvance, SimState};

/// 4-directional movement input. The core recognizes no other input type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Held movement direction, if any
    pub direction: Option<Direction>,
    /// Pause toggle
    pub pause: bool,
}

/// Advance the simulation by one fixed timestep
pub fn tick(
    state: &mut SimState,
    catalog: &LevelCatalog,
    stats: &mut GameStatistics,
    input: &TickInput,
    dt: f32,
) {
    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
            }
            _ => {}
        }
    }

    // Only the playing phase simulates; terminal outcomes halt ticking
    if state.phase != GamePhase::Playing {
        return;
    }

    // Catalog exhausted counts as completed, never a crash
    let Some(level) = catalog.get(state.level_index) else {
        log::warn!("level index {} past catalog end", state.level_index);
        state.phase = GamePhase::Completed;
        state.outcome = Outcome::Completed;
        return;
    };

    state.time_ticks += 1;

    // 1. Timer advance on whole-second boundaries. Expiry is recorded here
    // and committed after containment so ties favor survival.
    let mut time_expired = false;
    state.second_acc += dt;
    while state.second_acc >= 1.0 {
        state.second_acc -= 1.0;
        spawn_debris(state, level);
        if !state.level_complete && state.time_remaining > 0 {
            state.time_remaining -= 1;
            if state.time_remaining == 0 {
                time_expired = true;
            }
        }
    }

    // 2. Input application
    if !state.level_complete {
        apply_movement(state, level, input);
    }

    // 3. Environmental hazard evolution
    match &level.ruleset {
        Ruleset::Earthquake => advance_debris(state, dt),
        Ruleset::Flood(params) => advance_water(state, level, params, dt),
    }

    // 4/5. Hazard damage (suppressed once the level is complete)
    if !state.level_complete {
        match &level.ruleset {
            Ruleset::Earthquake => resolve_debris_hits(state),
            Ruleset::Flood(_) => apply_submersion_drain(state, level),
        }
    }

    // 6. Containment: full player containment ends the level exactly once
    if !state.level_complete && is_contained(state, level) {
        state.level_complete = true;
        state.in_hazard = false;
        let points = stats.record_level_complete(state, level);
        log::info!("level '{}' complete: +{} points", level.id, points);
        state.pending_advance = Some(PendingAdvance {
            attempt: state.attempt,
            ticks_left: ADVANCE_DELAY_TICKS,
        });
    }

    // Commit failures. A completion this tick suppresses both triggers.
    if !state.level_complete {
        if state.health <= 0.0 {
            fail(state, stats, FailReason::HealthDepleted);
            return;
        }
        if time_expired {
            fail(state, stats, FailReason::TimeExpired);
            return;
        }
    }

    // 7. Advancement after the feedback delay
    if let Some(adv) = state.pending_advance {
        if adv.attempt != state.attempt {
            // Stale timer from a superseded attempt
            state.pending_advance = None;
        } else if adv.ticks_left <= 1 {
            state.pending_advance = None;
            let next = state.level_index + 1;
            match catalog.get(next) {
                Some(next_level) => state.reset_for_level(next_level, next),
                None => {
                    log::info!("all {} levels cleared", catalog.len());
                    state.phase = GamePhase::Completed;
                    state.outcome = Outcome::Completed;
                }
            }
        } else {
            state.pending_advance = Some(PendingAdvance {
                ticks_left: adv.ticks_left - 1,
                ..adv
            });
        }
    }
}

fn fail(state: &mut SimState, stats: &mut GameStatistics, reason: FailReason) {
    log::info!("attempt failed: {:?}", reason);
    state.phase = GamePhase::Failed;
    state.outcome = Outcome::Failed(reason);
    state.in_hazard = false;
    state.pending_advance = None;
    stats.record_failure();
}

/// Roll for a new falling debris once per elapsed second while shaking
fn spawn_debris(state: &mut SimState, level: &Level) {
    if !matches!(level.ruleset, Ruleset::Earthquake) {
        return;
    }
    if !state.in_hazard || level.hazards.is_empty() {
        return;
    }
    if state.rng.random::<f32>() >= DEBRIS_SPAWN_CHANCE {
        return;
    }
    let hazard = &level.hazards[state.rng.random_range(0..level.hazards.len())];
    let x = hazard.bounds.left() + state.rng.random::<f32>() * hazard.bounds.size.x;
    let speed = state.rng.random_range(DEBRIS_MIN_SPEED..DEBRIS_MAX_SPEED);
    let id = state.next_debris_id();
    state.debris.push(Debris {
        id,
        pos: glam::Vec2::new(x, hazard.bounds.top()),
        speed,
        damage: hazard.damage,
    });
    log::debug!("debris {} spawned at x={:.0}", id, x);
}

fn apply_movement(state: &mut SimState, level: &Level, input: &TickInput) {
    let Some(dir) = input.direction else {
        return;
    };

    let swimming = level.ruleset.is_flood() && state.in_hazard;
    let speed = if swimming { SWIM_SPEED } else { MOVE_SPEED };
    let current_x = match &level.ruleset {
        Ruleset::Flood(params) if swimming => params.current.x * CURRENT_FACTOR,
        _ => 0.0,
    };

    let mut pos = state.player.pos;
    match dir {
        Direction::Up => pos.y -= speed,
        Direction::Down => pos.y += speed,
        // Moving against the current is harder, with it easier
        Direction::Left => pos.x -= speed - current_x,
        Direction::Right => pos.x += speed + current_x,
    }

    state.player = Rect {
        pos,
        size: state.player.size,
    }
    .clamped_to(FIELD_WIDTH, FIELD_HEIGHT);
}

/// Advance falling debris; cull pieces that left the field
fn advance_debris(state: &mut SimState, dt: f32) {
    for d in &mut state.debris {
        d.pos.y += d.speed * dt;
    }
    state.debris.retain(|d| d.pos.y < FIELD_HEIGHT);
}

/// Apply debris impacts. Each piece damages the player at most once because
/// it is removed in the same pass that applies its damage.
fn resolve_debris_hits(state: &mut SimState) {
    let player = state.player;
    let hit: Vec<u32> = state
        .debris
        .iter()
        .filter(|d| player.overlaps(&d.bounds()))
        .map(|d| d.id)
        .collect();
    for id in hit {
        let Some(idx) = state.debris.iter().position(|d| d.id == id) else {
            continue;
        };
        let d = state.debris.swap_remove(idx);
        state.health = (state.health - d.damage).max(0.0);
        log::debug!("debris {} hit player: -{} health", d.id, d.damage);
    }
}

/// Water rise, swim/stamina bookkeeping, and floatable drift
fn advance_water(state: &mut SimState, level: &Level, params: &FloodParams, dt: f32) {
    state.water_acc += dt;
    while state.water_acc >= WATER_TICK {
        state.water_acc -= WATER_TICK;

        // Monotonic toward max_water_level, never overshooting
        state.water_level = (state.water_level - params.rise_speed).max(params.max_water_level);

        // Swimming when the player's feet sit in the surface band
        let feet = state.player.bottom();
        let swimming = feet > state.water_level && feet < state.water_level + SWIM_BAND;
        state.in_hazard = swimming;

        if state.level_complete {
            continue;
        }
        if swimming {
            state.stamina = (state.stamina - SWIM_STAMINA_DRAIN).max(0.0);
            if state.stamina <= 0.0 {
                state.health = (state.health - EXHAUSTION_DAMAGE).max(0.0);
            }
        } else {
            state.stamina = (state.stamina + STAMINA_REGEN).min(100.0);
        }
    }

    // Floatables ride the surface once submerged and drift with the current.
    // Submersion is judged against the placed base, so objects riding the
    // surface keep drifting after the water peaks.
    for f in &mut state.floaters {
        let submerged = state.water_level < f.base_bottom;
        if submerged {
            f.pos.x += params.current.x + (state.rng.random::<f32>() - 0.5) * 0.5;
            f.pos.y = f.pos.y.min(state.water_level - f.size.y);
        }
    }
}

/// Slow health drain while deeply submerged outside any qualifying zone
fn apply_submersion_drain(state: &mut SimState, level: &Level) {
    let deep = state.water_level + DROWN_MARGIN < state.player.top();
    if deep && !is_contained(state, level) {
        state.health = (state.health - DROWN_DAMAGE).max(0.0);
    }
}

fn is_contained(state: &SimState, level: &Level) -> bool {
    let player = &state.player;
    let in_safe_zone = level
        .safe_zones
        .iter()
        .any(|z| z.bounds.contains(player) && elevation_satisfied(state, level, z));
    let at_rescue_point = level.rescue_points.iter().any(|r| r.contains(player));
    in_safe_zone || at_rescue_point
}

/// Flood safe zones qualify only while the water surface remains below the
/// zone's elevation height; a submerged zone stops counting. Earthquake
/// zones always qualify.
fn elevation_satisfied(state: &SimState, level: &Level, zone: &SafeZone) -> bool {
    match level.ruleset {
        Ruleset::Earthquake => true,
        Ruleset::Flood(_) => {
            state.water_level > zone.bounds.bottom() - zone.elevation as f32 * ELEVATION_STEP
        }
    }
}
