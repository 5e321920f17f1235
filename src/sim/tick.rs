//! Fixed timestep simulation tick
//!
//! Order within a tick: jump input, gravity, ground clamp, scroll,
//! off-screen handling, spawning, collision.

use rand::Rng;
use rand::seq::IndexedRandom;

use super::state::{ObstacleKind, RunEvent, RunPhase, RunState};
use crate::consts::SIM_DT;
use crate::tuning::{OffscreenPolicy, RunTuning, SpawnPolicy};

/// Autopilot jumps when the next hazard is within this many ticks of travel
pub const AUTOPILOT_LEAD_TICKS: f32 = 10.0;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump key went down this frame
    pub jump: bool,
    /// Demo mode - jump over hazards automatically
    pub autopilot: bool,
}

/// Scroll speed for a given score: a step every `score_step` points
#[inline]
pub fn scroll_speed(score: u32, tuning: &RunTuning) -> f32 {
    tuning.base_speed + (score / tuning.score_step) as f32 * tuning.speed_increment
}

/// Advance the run by one fixed timestep
pub fn tick(state: &mut RunState, input: &TickInput, dt: f32) -> Vec<RunEvent> {
    let mut events = Vec::new();

    if state.phase == RunPhase::Ended {
        return events;
    }

    if (input.jump || (input.autopilot && autopilot_wants_jump(state))) && state.request_jump() {
        events.push(RunEvent::Jumped);
    }

    state.time_ticks += 1;
    let scale = dt / SIM_DT;

    // Explicit Euler: velocity first, then position
    let player = &mut state.player;
    player.vel_y += state.tuning.gravity * scale;
    player.pos.y += player.vel_y;

    if player.pos.y >= state.tuning.ground_level {
        player.pos.y = state.tuning.ground_level;
        player.vel_y = 0.0;
        if player.airborne {
            player.airborne = false;
            events.push(RunEvent::Landed);
        }
    }

    let speed = scroll_speed(state.score, &state.tuning);
    for obstacle in &mut state.obstacles {
        obstacle.pos.x -= speed * scale;
    }

    handle_offscreen(state, &mut events);
    spawn_obstacles(state, &mut events);
    resolve_collisions(state, &mut events);

    events
}

/// Recycle or drop everything that scrolled past the left edge
fn handle_offscreen(state: &mut RunState, events: &mut Vec<RunEvent>) {
    let ground_line = state.tuning.ground_line();
    let screen_width = state.tuning.screen_width;
    let offscreen = state.tuning.offscreen;

    let mut removed = Vec::new();
    for obstacle in &mut state.obstacles {
        if !obstacle.is_offscreen() {
            continue;
        }
        match (offscreen, obstacle.kind) {
            (
                OffscreenPolicy::Recycle {
                    offset_min,
                    offset_max,
                },
                ObstacleKind::Hazard,
            ) => {
                let offset = state.rng.random_range(offset_min..=offset_max);
                if let Some(preset) = state.tuning.hazard_presets.choose(&mut state.rng) {
                    obstacle.apply_preset(preset, ground_line);
                }
                obstacle.pos.x = screen_width + offset;
                // Scoring happens here, not when the hazard passes the player
                state.score += 1;
                log::debug!(
                    "Hazard {} recycled to x={:.1}, score {}",
                    obstacle.id,
                    obstacle.pos.x,
                    state.score
                );
                events.push(RunEvent::Recycled { id: obstacle.id });
            }
            _ => removed.push(obstacle.id),
        }
    }

    if !removed.is_empty() {
        state.obstacles.retain(|o| !removed.contains(&o.id));
        events.extend(removed.into_iter().map(|id| RunEvent::Removed { id }));
    }
}

fn spawn_obstacles(state: &mut RunState, events: &mut Vec<RunEvent>) {
    let Some(spawn) = state.tuning.spawn.clone() else {
        return;
    };
    let screen_width = state.tuning.screen_width;

    // Hazards need the trailing one to be far enough in
    let trailing_x = state.hazards().map(|h| h.pos.x).reduce(f32::max);
    let eligible = match trailing_x {
        None => true,
        Some(x) => x < screen_width - state.rng.random_range(spacing(&spawn)),
    };
    if eligible && state.rng.random_ratio(1, spawn.hazard_chance) {
        if let Some(&preset) = state.tuning.hazard_presets.choose(&mut state.rng) {
            let id = state.push_hazard(screen_width, preset);
            log::debug!("Spawned hazard {}", id);
            events.push(RunEvent::Spawned {
                id,
                kind: ObstacleKind::Hazard,
            });
        }
    }

    if state.rng.random_ratio(1, spawn.collectible_chance) {
        if let Some(&band) = spawn.collectible_bands.choose(&mut state.rng) {
            let id = state.push_collectible(screen_width, band, spawn.collectible_size);
            log::debug!("Spawned collectible {} at y={}", id, band);
            events.push(RunEvent::Spawned {
                id,
                kind: ObstacleKind::Collectible,
            });
        }
    }
}

fn spacing(spawn: &SpawnPolicy) -> std::ops::RangeInclusive<f32> {
    spawn.spacing_min..=spawn.spacing_max
}

/// Hazards end the run, collectibles are picked up
///
/// Hazards are checked first so a crash never also collects a coin.
fn resolve_collisions(state: &mut RunState, events: &mut Vec<RunEvent>) {
    let player_box = state.player.aabb();

    let hit = state
        .hazards()
        .find(|h| player_box.overlaps(&h.aabb()))
        .map(|h| h.id);
    if let Some(id) = hit {
        state.phase = RunPhase::Ended;
        log::info!(
            "Run ended: hit hazard {} at tick {} with score {}",
            id,
            state.time_ticks,
            state.score
        );
        events.push(RunEvent::Crashed { id });
        return;
    }

    let mut collected = 0;
    state.obstacles.retain(|o| {
        if o.is_hazard() || !player_box.overlaps(&o.aabb()) {
            return true;
        }
        collected += 1;
        events.push(RunEvent::Collected { id: o.id });
        false
    });
    if collected > 0 {
        state.score += collected;
        log::debug!("Collected {} coin(s), score {}", collected, state.score);
    }
}

/// Jump when grounded and the nearest hazard ahead is about to arrive
pub fn autopilot_wants_jump(state: &RunState) -> bool {
    if !state.player.is_grounded() {
        return false;
    }
    let front = state.player.pos.x + state.player.size.x;
    let lead = state.scroll_speed() * AUTOPILOT_LEAD_TICKS;

    state
        .hazards()
        .map(|h| h.pos.x - front)
        .filter(|gap| *gap > 0.0)
        .reduce(f32::min)
        .is_some_and(|gap| gap <= lead)
}
