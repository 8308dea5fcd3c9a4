//! Idle/demo mode input
//!
//! Plays the game from the state alone: start a level from the menu, chase
//! the nearest free enemy, vacuum it when it is in range, and empty the
//! inventory once it is full or nobody is left to catch. An enemy that stays
//! in the beam without ever arriving is skipped for a while.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::enemy::Enemy;
use super::state::{GameState, Screen};
use super::tick::TickInput;
use crate::consts::*;

/// Ticks between autopilot throws so captures leave one at a time
const THROW_INTERVAL: u64 = 20;
/// Horizontal slack before the autopilot bothers walking
const STEER_DEAD_ZONE: f32 = 4.0;
/// Frames spent vacuuming one enemy before giving up on it
const VACUUM_PATIENCE: u32 = 120;
/// Ticks a given-up enemy is left alone
const GIVE_UP_TICKS: u64 = 600;

/// What the autopilot carries from one frame to the next
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AutopilotMemory {
    /// Slot being chased
    pub target: Option<usize>,
    /// Consecutive frames spent vacuuming `target`
    pub vacuum_frames: u32,
    /// Slot given up on, and the tick from which it may be chased again
    pub ignored: Option<(usize, u64)>,
}

/// Build the input an idle player would give this frame
pub fn idle_input(state: &mut GameState) -> TickInput {
    let mut input = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    match state.screen {
        Screen::Menu => {
            input.menu_up = true;
            input.confirm = true;
        }
        Screen::Playing => steer(state, &mut input),
    }
    input
}

fn steer(state: &mut GameState, input: &mut TickInput) {
    if state.player.in_victory() {
        state.autopilot.target = None;
        return;
    }

    let now = state.time_ticks;
    if state.autopilot.ignored.is_some_and(|(_, until)| now >= until) {
        state.autopilot.ignored = None;
    }

    let full = state.inventory().is_full();
    let empty = state.inventory().is_empty();
    let ignored = state.autopilot.ignored.map(|(slot, _)| slot);
    let target = if full {
        None
    } else {
        nearest_free_enemy(state, state.player.pos(), ignored).map(|e| (e.slot, e.pos()))
    };

    let player = &state.player;
    let memory = &mut state.autopilot;
    let target_slot = target.map(|(slot, _)| slot);
    if memory.target != target_slot {
        memory.target = target_slot;
        memory.vacuum_frames = 0;
    }

    let Some((slot, enemy_pos)) = target else {
        if !empty && now % THROW_INTERVAL == 0 {
            input.single_throw = true;
        }
        return;
    };

    let offset = enemy_pos - player.pos();
    let (range_x, range_y) = SUCTION_RANGE_SIDEWAYS;
    let facing_target = (offset.x >= 0.0) == player.body.facing_right;

    if offset.x.abs() <= range_x && offset.y.abs() <= range_y && facing_target {
        memory.vacuum_frames += 1;
        if memory.vacuum_frames > VACUUM_PATIENCE {
            // Held in range but never arriving; chase someone else for a while
            log::debug!("Autopilot gave up on enemy {}", slot);
            memory.ignored = Some((slot, now + GIVE_UP_TICKS));
            memory.target = None;
            memory.vacuum_frames = 0;
            return;
        }
        input.vacuum = true;
        return;
    }

    if offset.x > STEER_DEAD_ZONE {
        input.right = true;
    } else if offset.x < -STEER_DEAD_ZONE {
        input.left = true;
    } else if !facing_target {
        input.right = offset.x >= 0.0;
        input.left = offset.x < 0.0;
    }

    if player.body.on_ground {
        if offset.y < -CELL_SIZE {
            input.jump = true;
        } else if offset.y > CELL_SIZE {
            input.jump = true;
            input.down = true;
        }
    }
}

fn nearest_free_enemy(state: &GameState, from: Vec2, ignored: Option<usize>) -> Option<&Enemy> {
    state
        .enemies
        .iter()
        .filter(|e| e.is_active() && e.behavior.is_visible() && !e.behavior.is_attacking())
        .filter(|e| Some(e.slot) != ignored)
        .min_by(|a, b| {
            a.pos()
                .distance_squared(from)
                .partial_cmp(&b.pos().distance_squared(from))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}
