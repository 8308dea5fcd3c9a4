//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. Per frame:
//! screen input, player, enemies and bookkeeping, suction and throws, damage,
//! then the win and game-over checks.

use glam::Vec2;

use super::autopilot::idle_input;
use super::behavior::{AttackEvent, Surroundings};
use super::inventory::{apply_suction, throw_top, throw_velocity, update_thrown};
use super::levels::LevelId;
use super::state::{GameEvent, GameState, Screen};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held: walk left
    pub left: bool,
    /// Held: walk right
    pub right: bool,
    /// Held: jump, or drop through a one-way platform together with `down`
    pub jump: bool,
    /// Held: aim suction and throws upward
    pub up: bool,
    /// Held: aim suction and throws downward
    pub down: bool,
    /// Held: run the vacuum
    pub vacuum: bool,
    /// Held: throw one capture per frame
    pub bulk_throw: bool,
    /// Pressed this frame: throw one capture
    pub single_throw: bool,
    /// Pressed this frame: select level one in the menu
    pub menu_up: bool,
    /// Pressed this frame: select level two in the menu
    pub menu_down: bool,
    /// Pressed this frame: start the selected level
    pub confirm: bool,
    /// Pressed this frame: leave the level, or quit from the menu
    pub escape: bool,
    /// Idle/demo mode - AI plays the game
    pub idle_mode: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();
    state.time_ticks += 1;

    let input = if input.idle_mode {
        idle_input(state)
    } else {
        input.clone()
    };

    match state.screen {
        Screen::Menu => tick_menu(state, &input),
        Screen::Playing => tick_playing(state, &input),
    }
}

fn tick_menu(state: &mut GameState, input: &TickInput) {
    if input.menu_up {
        state.level = LevelId::One;
    }
    if input.menu_down {
        state.level = LevelId::Two;
    }
    if input.escape {
        state.quit_requested = true;
        return;
    }
    if input.confirm {
        state.start_level(state.level);
    }
}

fn tick_playing(state: &mut GameState, input: &TickInput) {
    if input.escape {
        state.return_to_menu();
        return;
    }

    state.player.update(input, &state.grid);
    update_enemies(state);
    update_inventory(state, input);
    apply_damage(state);
    check_victory(state);

    if state.screen == Screen::Playing && state.player.is_dead() {
        log::info!("Game over on level {}", state.level.number());
        for inventory in &mut state.inventories {
            inventory.clear();
        }
        state.return_to_menu();
        state.events.push(GameEvent::GameOver);
    }
}

/// Behaviours in slot order, then the unstick and stall passes
fn update_enemies(state: &mut GameState) {
    let world = Surroundings {
        grid: &state.grid,
        player: state.player.pos(),
    };

    for enemy in &mut state.enemies {
        match enemy.update(&world, &mut state.rng) {
            Some(AttackEvent::FireballLaunched) => {
                log::debug!("Enemy {} launched a fireball", enemy.slot);
                state
                    .events
                    .push(GameEvent::FireballLaunched { slot: enemy.slot });
            }
            Some(AttackEvent::FireballHit) => {
                log::debug!("Fireball from enemy {} hit the player", enemy.slot);
            }
            Some(AttackEvent::FireballDodged) | None => {}
        }
    }

    for enemy in &mut state.enemies {
        let relocated = enemy
            .unstick(&state.grid)
            .or_else(|| enemy.track_stall(&state.grid));
        if let Some(cell) = relocated {
            log::debug!("Enemy {} relocated to {:?}", enemy.slot, cell);
            state.events.push(GameEvent::EnemyRelocated {
                slot: enemy.slot,
                cell,
            });
        }
    }
}

fn update_inventory(state: &mut GameState, input: &TickInput) {
    let player = state.player.body;
    let inventory = &mut state.inventories[state.level.index()];

    if state.player.vacuuming {
        let aim = state.player.aim;
        for slot in apply_suction(&mut state.enemies, &player, aim, inventory) {
            log::debug!("Captured enemy {} ({}/{})", slot, inventory.len(), inventory.capacity());
            state.events.push(GameEvent::EnemyCaptured { slot });
        }
    }

    let throws = [input.single_throw, input.bulk_throw]
        .into_iter()
        .filter(|pressed| *pressed)
        .count();
    for _ in 0..throws {
        let velocity = throw_velocity(player.facing_right, input.up, input.down);
        if let Some(slot) = throw_top(&mut state.enemies, inventory, player.pos, velocity) {
            log::debug!("Threw enemy {} at {:?}", slot, velocity);
            state.events.push(GameEvent::EnemyThrown { slot });
        }
    }

    for slot in update_thrown(&mut state.enemies, &state.grid) {
        log::debug!("Thrown enemy {} destroyed", slot);
        state.events.push(GameEvent::EnemyDestroyed { slot });
    }
}

/// Contact or fireball damage, suppressed while vacuuming or while a thrown
/// enemy is in flight
fn apply_damage(state: &mut GameState) {
    let player = &mut state.player;
    if player.damage_cooldown > 0.0 {
        player.damage_cooldown -= SIM_DT;
    }

    let pos = player.pos();
    let contact = state.enemies.iter().any(|enemy| {
        !enemy.is_disappeared()
            && (enemy.pos() - pos)
                .abs()
                .cmple(Vec2::splat(CONTACT_RANGE))
                .all()
    });
    // Every pending hit is consumed, even when the player is immune
    let fireball = state
        .enemies
        .iter_mut()
        .fold(false, |hit, enemy| enemy.behavior.take_fireball_hit() || hit);
    let thrown_in_flight = state.enemies.iter().any(|enemy| enemy.is_thrown());

    if (contact || fireball) && !player.vacuuming && !thrown_in_flight && player.take_hit() {
        log::debug!("Player hit, {} lives left", player.lives);
        state
            .events
            .push(GameEvent::PlayerDamaged { lives: player.lives });
    }
}

fn check_victory(state: &mut GameState) {
    if state.player.in_victory() {
        if state.player.advance_victory() {
            match state.level.next() {
                Some(next) => state.start_level(next),
                None => state.return_to_menu(),
            }
        }
    } else if state.level_cleared() {
        log::info!("Level {} cleared", state.level.number());
        state.player.start_victory();
        state.events.push(GameEvent::VictoryStarted(state.level));
    }
}
