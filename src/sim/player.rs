//! Player controller
//!
//! Turns one frame of held keys into movement: horizontal steps first, then
//! gravity and vertical resolution, then the slope slide.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{
    Body, DropThrough, VerticalOutcome, resolve_horizontal, resolve_vertical, tiles_underfoot,
};
use super::grid::{Tile, TileGrid};
use super::inventory::Aim;
use super::tick::TickInput;
use crate::consts::*;

/// Derived movement phase, mostly for rendering and tests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerPhase {
    Airborne,
    Grounded,
    /// Falling through one-way platforms on request
    Dropping,
    /// Frozen while the level-clear animation plays
    VictoryAnimation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    /// Remaining lives; `GAME_OVER_LIVES` means the run is over
    pub lives: i8,
    /// Seconds left on the current drop request
    pub drop_timer: f32,
    pub drop: DropThrough,
    /// Seconds of invulnerability left
    pub damage_cooldown: f32,
    /// Vacuum held this frame
    pub vacuuming: bool,
    /// Direction the vacuum points this frame
    pub aim: Aim,
    /// A walk key was held this frame
    pub walking: bool,
    /// Seconds into the victory animation, if it is playing
    pub victory_timer: Option<f32>,
}

impl Player {
    pub fn new(start: Vec2) -> Self {
        Self {
            body: Body::new(start, Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT)),
            lives: MAX_LIVES,
            drop_timer: 0.0,
            drop: DropThrough::default(),
            damage_cooldown: 0.0,
            vacuuming: false,
            aim: Aim::Sideways,
            walking: false,
            victory_timer: None,
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.body.pos
    }

    pub fn phase(&self) -> PlayerPhase {
        if self.victory_timer.is_some() {
            PlayerPhase::VictoryAnimation
        } else if self.body.on_ground {
            PlayerPhase::Grounded
        } else if self.drop.passes_one_way() {
            PlayerPhase::Dropping
        } else {
            PlayerPhase::Airborne
        }
    }

    #[inline]
    pub fn in_victory(&self) -> bool {
        self.victory_timer.is_some()
    }

    /// Advance one frame of movement
    pub fn update(&mut self, input: &TickInput, grid: &TileGrid) -> Option<VerticalOutcome> {
        self.vacuuming = input.vacuum && !self.in_victory();
        self.aim = Aim::from_keys(input.up, input.down);
        self.walking = (input.left || input.right) && !self.in_victory();
        if self.in_victory() {
            return None;
        }

        if input.left && !input.right {
            self.body.facing_right = false;
        } else if input.right && !input.left {
            self.body.facing_right = true;
        }

        if self.body.on_ground && input.jump {
            if input.down {
                self.drop_timer = DROP_DURATION;
            } else {
                self.body.vy = JUMP_STRENGTH;
            }
        }

        if self.drop_timer > 0.0 {
            self.drop_timer -= SIM_DT;
        }
        self.drop.requested = self.drop_timer > 0.0;
        if self.drop.cooldown > 0.0 {
            self.drop.cooldown -= SIM_DT;
        }

        if input.left {
            resolve_horizontal(&mut self.body, grid, -PLAYER_SPEED);
        }
        if input.right {
            resolve_horizontal(&mut self.body, grid, PLAYER_SPEED);
        }

        let outcome = resolve_vertical(&mut self.body, grid, Some(TERMINAL_VELOCITY), &mut self.drop);
        self.apply_slope_slide(grid);
        Some(outcome)
    }

    /// Constant downhill nudge while standing on a slope
    fn apply_slope_slide(&mut self, grid: &TileGrid) {
        if !self.body.on_ground {
            return;
        }
        let under = tiles_underfoot(&self.body, grid);
        if under.contains(&Tile::SlopeUp) {
            self.body.pos += Vec2::new(SLOPE_NUDGE, SLOPE_NUDGE);
        } else if under.contains(&Tile::SlopeDown) {
            self.body.pos += Vec2::new(-SLOPE_NUDGE, SLOPE_NUDGE);
        }
    }

    /// Lose a life unless still invulnerable. Lives never drop below the
    /// game-over sentinel.
    pub fn take_hit(&mut self) -> bool {
        if self.damage_cooldown > 0.0 {
            return false;
        }
        if self.lives > GAME_OVER_LIVES {
            self.lives -= 1;
        }
        self.damage_cooldown = DAMAGE_COOLDOWN;
        true
    }

    pub fn is_dead(&self) -> bool {
        self.lives < 0
    }

    pub fn start_victory(&mut self) {
        if self.victory_timer.is_none() {
            self.victory_timer = Some(0.0);
            self.vacuuming = false;
            self.walking = false;
        }
    }

    /// Advance the victory animation; true once it has finished
    pub fn advance_victory(&mut self) -> bool {
        match self.victory_timer.as_mut() {
            Some(timer) => {
                *timer += SIM_DT;
                *timer > VICTORY_DURATION
            }
            None => false,
        }
    }

    /// Current frame of the victory animation
    pub fn victory_frame(&self) -> Option<usize> {
        self.victory_timer
            .map(|timer| (timer / VICTORY_FRAME_TIME) as usize % VICTORY_FRAMES)
    }
}
