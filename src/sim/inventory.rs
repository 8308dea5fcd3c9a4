//! Capture and throw: the vacuum inventory
//!
//! Each level has its own capped LIFO stack of captured enemy slots. Suction
//! pulls eligible enemies toward the player and pushes them onto the stack;
//! throwing pops the most recent capture and launches it as a projectile
//! that is destroyed on the first solid tile it meets.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Body, flight_blocked};
use super::enemy::{Enemy, Lifecycle};
use super::grid::TileGrid;
use crate::consts::*;

/// Fixed-capacity LIFO of captured enemy slots
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    capacity: usize,
    slots: Vec<usize>,
}

impl Inventory {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            slots: Vec::with_capacity(capacity),
        }
    }

    /// Push a slot; rejected when full
    pub fn push(&mut self, slot: usize) -> bool {
        if self.is_full() {
            return false;
        }
        self.slots.push(slot);
        true
    }

    pub fn pop(&mut self) -> Option<usize> {
        self.slots.pop()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.slots.len() >= self.capacity
    }

    pub fn contains(&self, slot: usize) -> bool {
        self.slots.contains(&slot)
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Held slots, oldest first
    pub fn slots(&self) -> &[usize] {
        &self.slots
    }
}

/// Axis the vacuum pulls along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Aim {
    #[default]
    Sideways,
    Up,
    Down,
}

impl Aim {
    /// Up wins when both vertical keys are held
    pub fn from_keys(up: bool, down: bool) -> Self {
        if up {
            Aim::Up
        } else if down {
            Aim::Down
        } else {
            Aim::Sideways
        }
    }

    /// Half-extents of the suction box around the player
    fn range(self) -> Vec2 {
        let (x, y) = match self {
            Aim::Sideways => SUCTION_RANGE_SIDEWAYS,
            Aim::Up | Aim::Down => SUCTION_RANGE_VERTICAL,
        };
        Vec2::new(x, y)
    }
}

fn can_be_vacuumed(enemy: &Enemy) -> bool {
    !enemy.is_disappeared() && !enemy.behavior.is_attacking()
}

/// Pull every eligible enemy in range one step toward the player and
/// capture those that arrive. Returns the slots captured this frame.
///
/// Enemies keep being pulled while the inventory is full; they are simply
/// not captured.
pub fn apply_suction(
    enemies: &mut [Enemy],
    player: &Body,
    aim: Aim,
    inventory: &mut Inventory,
) -> Vec<usize> {
    let range = aim.range();
    let mut captured = Vec::new();

    for enemy in enemies.iter_mut().filter(|e| can_be_vacuumed(e)) {
        let offset = (enemy.body.pos - player.pos).abs();
        if offset.x > range.x || offset.y > range.y {
            continue;
        }

        let pos = &mut enemy.body.pos;
        let arrived = match aim {
            Aim::Sideways if player.facing_right && pos.x >= player.pos.x => {
                pos.x -= SUCTION_SPEED;
                (pos.x - player.pos.x).abs() < SUCTION_SPEED
            }
            Aim::Sideways if !player.facing_right && pos.x <= player.pos.x => {
                pos.x += SUCTION_SPEED;
                (pos.x - player.pos.x).abs() < SUCTION_SPEED
            }
            Aim::Up if pos.y <= player.pos.y => {
                pos.y += SUCTION_SPEED;
                (pos.y - player.pos.y).abs() < SUCTION_SPEED
            }
            Aim::Down if pos.y >= player.pos.y => {
                pos.y -= SUCTION_SPEED;
                (pos.y - player.pos.y).abs() < SUCTION_SPEED
            }
            _ => false,
        };

        if arrived && inventory.push(enemy.slot) {
            enemy.lifecycle = Lifecycle::Captured;
            enemy.body.vy = 0.0;
            captured.push(enemy.slot);
        }
    }

    captured
}

/// Launch velocity for a throw: vertical when up or down is held (down wins),
/// otherwise horizontal in the facing direction
pub fn throw_velocity(facing_right: bool, up: bool, down: bool) -> Vec2 {
    if up || down {
        Vec2::new(0.0, if down { THROW_SPEED } else { -THROW_SPEED })
    } else {
        Vec2::new(if facing_right { THROW_SPEED } else { -THROW_SPEED }, 0.0)
    }
}

/// Pop the latest capture and launch it from the player's position.
/// No-op on an empty inventory.
pub fn throw_top(
    enemies: &mut [Enemy],
    inventory: &mut Inventory,
    from: Vec2,
    velocity: Vec2,
) -> Option<usize> {
    let slot = inventory.pop()?;
    let enemy = enemies.iter_mut().find(|e| e.slot == slot)?;
    enemy.lifecycle = Lifecycle::Thrown;
    enemy.throw_velocity = velocity;
    enemy.body.pos = from;
    enemy.body.vy = 0.0;
    enemy.body.facing_right = velocity.x >= 0.0;
    Some(slot)
}

/// Advance thrown enemies; any whose next step hits a solid tile is removed.
/// Returns the removed slots.
pub fn update_thrown(enemies: &mut [Enemy], grid: &TileGrid) -> Vec<usize> {
    let mut destroyed = Vec::new();
    for enemy in enemies.iter_mut().filter(|e| e.is_thrown()) {
        if flight_blocked(&enemy.body, grid, enemy.throw_velocity) {
            enemy.lifecycle = Lifecycle::Removed;
            enemy.throw_velocity = Vec2::ZERO;
            destroyed.push(enemy.slot);
        } else {
            enemy.body.pos += enemy.throw_velocity;
        }
    }
    destroyed
}
