//! Render-facing snapshot
//!
//! A renderer reads `GameState::sprites()` each frame and draws what it gets;
//! nothing here feeds back into the simulation.

use glam::Vec2;
use serde::Serialize;

use super::behavior::Behavior;
use super::enemy::{Archetype, Enemy};
use super::inventory::Aim;
use super::state::{GameState, Screen};
use crate::consts::*;

/// Which sheet a sprite is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SpriteKind {
    PlayerStanding,
    /// Walk cycle; frames `0..WALK_FRAMES`
    PlayerWalking,
    /// Level-clear dance; frames `0..VICTORY_FRAMES`
    PlayerCelebrating,
    /// Suction beam in front of the player; frames `0..BEAM_FRAMES`
    VacuumBeam(Aim),
    Enemy(Archetype),
    /// Intermittent enemy fading out; frames `0..VANISH_FRAMES`
    EnemyVanishing,
    /// Ranged enemy winding up; left-facing frames first, then right-facing
    EnemyAttacking,
    Fireball,
}

/// One sprite to draw
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpriteView {
    pub kind: SpriteKind,
    /// Top-left corner in pixels
    pub pos: Vec2,
    pub facing_right: bool,
    pub frame: usize,
}

impl SpriteView {
    fn new(kind: SpriteKind, pos: Vec2, facing_right: bool, frame: usize) -> Self {
        Self {
            kind,
            pos,
            facing_right,
            frame,
        }
    }
}

impl GameState {
    /// Everything visible this frame, player first, then enemies in slot
    /// order. Empty on the menu.
    pub fn sprites(&self) -> Vec<SpriteView> {
        if self.screen != Screen::Playing {
            return Vec::new();
        }

        let mut sprites = Vec::with_capacity(self.enemies.len() + 2);
        sprites.push(self.player_sprite());
        if let Some(beam) = self.beam_sprite() {
            sprites.push(beam);
        }

        for enemy in &self.enemies {
            if let Some(sprite) = enemy_sprite(enemy) {
                sprites.push(sprite);
            }
            if !enemy.is_active() {
                continue;
            }
            if let Behavior::Ranged(ranged) = &enemy.behavior {
                if let Some(fireball) = &ranged.fireball {
                    sprites.push(SpriteView::new(
                        SpriteKind::Fireball,
                        fireball.pos,
                        fireball.moving_right,
                        self.beam_frame(),
                    ));
                }
            }
        }
        sprites
    }

    fn player_sprite(&self) -> SpriteView {
        let player = &self.player;
        let body = &player.body;

        let (kind, frame) = if let Some(frame) = player.victory_frame() {
            (SpriteKind::PlayerCelebrating, frame)
        } else if player.walking && body.on_ground {
            let frame = (self.time_ticks / WALK_FRAME_TICKS) as usize % WALK_FRAMES;
            (SpriteKind::PlayerWalking, frame)
        } else {
            (SpriteKind::PlayerStanding, 0)
        };
        SpriteView::new(kind, body.pos, body.facing_right, frame)
    }

    fn beam_sprite(&self) -> Option<SpriteView> {
        let player = &self.player;
        if !player.vacuuming || player.in_victory() {
            return None;
        }

        let facing_right = player.body.facing_right;
        let offset = match player.aim {
            Aim::Up => Vec2::new(-5.0, -53.0),
            Aim::Down => Vec2::new(-2.0, 69.0),
            Aim::Sideways if facing_right => Vec2::new(60.0, 25.0),
            Aim::Sideways => Vec2::new(-50.0, 25.0),
        };
        Some(SpriteView::new(
            SpriteKind::VacuumBeam(player.aim),
            player.pos() + offset,
            facing_right,
            self.beam_frame(),
        ))
    }

    fn beam_frame(&self) -> usize {
        (self.time_ticks / BEAM_FRAME_TICKS) as usize % BEAM_FRAMES
    }
}

fn enemy_sprite(enemy: &Enemy) -> Option<SpriteView> {
    if enemy.is_disappeared() || !enemy.behavior.is_visible() {
        return None;
    }

    let facing_right = enemy.body.facing_right;
    let (kind, frame) = match &enemy.behavior {
        Behavior::Intermittent(intermittent) => match intermittent.vanish_frame() {
            Some(frame) => (SpriteKind::EnemyVanishing, frame),
            None => (SpriteKind::Enemy(Archetype::Intermittent), 0),
        },
        Behavior::Ranged(ranged) => match ranged.attack_frame(facing_right) {
            Some(frame) => (SpriteKind::EnemyAttacking, frame),
            None => (SpriteKind::Enemy(Archetype::Ranged), 0),
        },
        behavior => (SpriteKind::Enemy(behavior.archetype()), 0),
    };
    Some(SpriteView::new(kind, enemy.pos(), facing_right, frame))
}
