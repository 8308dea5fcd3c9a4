//! Enemy aggregate and per-frame bookkeeping

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::behavior::{AttackEvent, Behavior, Surroundings};
use super::collision::{Body, overlaps_solid};
use super::grid::{CellCoord, TileGrid};
use super::spawn::find_valid_spawn;
use crate::consts::*;
use crate::{cell_of, cell_origin};

/// The four enemy kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Archetype {
    /// Patrols horizontally, ignores gravity
    Flyer,
    /// Walks platforms and hops up to reachable ledges
    Jumper,
    /// Periodically vanishes and shadows the player
    Intermittent,
    /// Patrols and throws fireballs
    Ranged,
}

impl Archetype {
    /// Roster slots cycle through the archetypes
    pub fn from_slot(slot: usize) -> Self {
        match slot % 4 {
            0 => Archetype::Flyer,
            1 => Archetype::Jumper,
            2 => Archetype::Intermittent,
            _ => Archetype::Ranged,
        }
    }

    /// Must spawn standing on solid ground
    pub fn needs_ground(self) -> bool {
        matches!(self, Archetype::Jumper | Archetype::Ranged)
    }
}

/// Where an enemy is in its capture/throw life
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Lifecycle {
    /// Free and running its behaviour
    #[default]
    Active,
    /// Held in the player's inventory
    Captured,
    /// Flying as a projectile
    Thrown,
    /// Destroyed; gone for the rest of the level
    Removed,
}

impl Lifecycle {
    /// Not in the world (held or destroyed)
    #[inline]
    pub fn is_disappeared(self) -> bool {
        matches!(self, Lifecycle::Captured | Lifecycle::Removed)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    /// Roster slot; also the id stored in inventories
    pub slot: usize,
    pub body: Body,
    pub behavior: Behavior,
    pub lifecycle: Lifecycle,
    /// Projectile velocity while thrown
    pub throw_velocity: Vec2,
    /// Position at the previous stall check
    pub prev_pos: Vec2,
    /// Consecutive frames with sub-pixel movement
    pub stuck_frames: u32,
}

impl Enemy {
    pub fn new(slot: usize, archetype: Archetype, pos: Vec2, rng: &mut impl Rng) -> Self {
        Self {
            slot,
            body: Body::new(pos, Vec2::splat(ENEMY_SIZE)),
            behavior: Behavior::new(archetype, rng),
            lifecycle: Lifecycle::Active,
            throw_velocity: Vec2::ZERO,
            prev_pos: pos,
            stuck_frames: 0,
        }
    }

    #[inline]
    pub fn archetype(&self) -> Archetype {
        self.behavior.archetype()
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.body.pos
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.lifecycle == Lifecycle::Active
    }

    #[inline]
    pub fn is_thrown(&self) -> bool {
        self.lifecycle == Lifecycle::Thrown
    }

    #[inline]
    pub fn is_disappeared(&self) -> bool {
        self.lifecycle.is_disappeared()
    }

    /// Run the archetype behaviour for one frame (free enemies only)
    pub fn update(&mut self, world: &Surroundings<'_>, rng: &mut impl Rng) -> Option<AttackEvent> {
        if !self.is_active() {
            return None;
        }
        self.behavior.advance(&mut self.body, world, rng)
    }

    /// Move to the nearest valid spawn cell around the current position
    pub fn relocate(&mut self, grid: &TileGrid) -> CellCoord {
        let here = CellCoord::new(cell_of(self.body.pos.y), cell_of(self.body.pos.x));
        let cell = find_valid_spawn(grid, here, self.archetype());
        self.body.pos = Vec2::new(cell_origin(cell.col), cell_origin(cell.row));
        self.body.vy = 0.0;
        self.prev_pos = self.body.pos;
        cell
    }

    /// Pull a free enemy out of solid tiles. Only applies while not rising,
    /// so jumps through the underside of platforms are left alone.
    pub fn unstick(&mut self, grid: &TileGrid) -> Option<CellCoord> {
        if !self.is_active() || self.body.vy < 0.0 {
            return None;
        }
        if !overlaps_solid(grid, self.body.pos, self.body.size) {
            return None;
        }
        Some(self.relocate(grid))
    }

    /// Count frames of near-zero movement. Flyers stalled for too long are
    /// relocated; other archetypes just have their counter reset.
    pub fn track_stall(&mut self, grid: &TileGrid) -> Option<CellCoord> {
        if !self.is_active() {
            return None;
        }

        let moved = (self.body.pos - self.prev_pos).abs();
        if moved.x < STALL_EPSILON && moved.y < STALL_EPSILON {
            self.stuck_frames += 1;
        } else {
            self.stuck_frames = 0;
        }
        self.prev_pos = self.body.pos;

        if self.stuck_frames <= STALL_FRAMES {
            return None;
        }
        self.stuck_frames = 0;
        if self.archetype() == Archetype::Flyer {
            Some(self.relocate(grid))
        } else {
            None
        }
    }
}
