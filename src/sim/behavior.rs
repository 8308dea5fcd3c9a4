//! Per-archetype enemy state machines
//!
//! Each archetype owns its behaviour data and is advanced once per frame
//! while its enemy is free (not captured, thrown or removed). All movement
//! goes through the collision resolver; randomness comes from the caller's
//! RNG so runs replay exactly from a seed.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{
    Body, DropThrough, VerticalOutcome, ground_ahead, overlaps_solid, probe_horizontal,
    resolve_horizontal, resolve_vertical,
};
use super::enemy::Archetype;
use super::grid::TileGrid;
use crate::cell_of;
use crate::consts::*;

/// What an enemy can see while it updates
#[derive(Debug, Clone, Copy)]
pub struct Surroundings<'a> {
    pub grid: &'a TileGrid,
    /// Player top-left position
    pub player: Vec2,
}

/// Notable outcomes of a ranged attack, surfaced to the frame loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackEvent {
    FireballLaunched,
    FireballHit,
    FireballDodged,
}

/// Archetype tag plus the archetype's own state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Behavior {
    Flyer,
    Jumper(JumperState),
    Intermittent(IntermittentState),
    Ranged(RangedState),
}

impl Behavior {
    pub fn new(archetype: Archetype, rng: &mut impl Rng) -> Self {
        match archetype {
            Archetype::Flyer => Behavior::Flyer,
            Archetype::Jumper => Behavior::Jumper(JumperState::default()),
            Archetype::Intermittent => Behavior::Intermittent(IntermittentState::new(rng)),
            Archetype::Ranged => Behavior::Ranged(RangedState::default()),
        }
    }

    pub fn archetype(&self) -> Archetype {
        match self {
            Behavior::Flyer => Archetype::Flyer,
            Behavior::Jumper(_) => Archetype::Jumper,
            Behavior::Intermittent(_) => Archetype::Intermittent,
            Behavior::Ranged(_) => Archetype::Ranged,
        }
    }

    /// Advance one frame
    pub fn advance(
        &mut self,
        body: &mut Body,
        world: &Surroundings<'_>,
        rng: &mut impl Rng,
    ) -> Option<AttackEvent> {
        match self {
            Behavior::Flyer => {
                advance_flyer(body, world.grid);
                None
            }
            Behavior::Jumper(state) => {
                state.advance(body, world, rng);
                None
            }
            Behavior::Intermittent(state) => {
                state.advance(body, world, rng);
                None
            }
            Behavior::Ranged(state) => state.advance(body, world),
        }
    }

    /// Ranged enemies winding up an attack cannot be vacuumed
    pub fn is_attacking(&self) -> bool {
        matches!(self, Behavior::Ranged(state) if state.windup.is_some())
    }

    /// Whether the enemy should be drawn
    pub fn is_visible(&self) -> bool {
        !matches!(
            self,
            Behavior::Intermittent(IntermittentState {
                phase: Visibility::Invisible { .. },
                ..
            })
        )
    }

    /// Take (and clear) a fireball hit raised since the last call
    pub fn take_fireball_hit(&mut self) -> bool {
        match self {
            Behavior::Ranged(state) => std::mem::take(&mut state.hit),
            _ => false,
        }
    }
}

/// Horizontal patrol with no gravity; turns at solid tiles and at the
/// fallback x bounds.
pub fn advance_flyer(body: &mut Body, grid: &TileGrid) {
    let next = Vec2::new(body.pos.x + body.step_x(FLYER_SPEED), body.pos.y);
    if overlaps_solid(grid, next, body.size) {
        body.turn_around();
    } else {
        body.pos = next;
    }

    if body.pos.x > FLYER_MAX_X {
        body.facing_right = false;
    }
    if body.pos.x < FLYER_MIN_X {
        body.facing_right = true;
    }
}

/// Gravity-bound walker that hops up onto nearby platforms
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JumperState {
    /// Seconds until the next jump is allowed
    pub jump_cooldown: f32,
    /// Seconds walked on the ground since the last jump
    pub walk_timer: f32,
}

impl JumperState {
    pub fn advance(&mut self, body: &mut Body, world: &Surroundings<'_>, rng: &mut impl Rng) {
        let grid = world.grid;
        let landed = resolve_vertical(body, grid, None, &mut DropThrough::default())
            == VerticalOutcome::Landed;

        let mut dx = body.step_x(JUMPER_SPEED);
        if !ground_ahead(body, grid, dx) || probe_horizontal(body, grid, dx).is_blocked() {
            body.turn_around();
            dx = -dx;
        }

        if landed {
            self.walk_timer = (self.walk_timer + SIM_DT).min(JUMPER_MAX_WALK);
            if self.jump_cooldown > 0.0 {
                self.jump_cooldown -= SIM_DT;
            }

            let player_above = world.player.y + JUMPER_CHASE_MARGIN < body.pos.y
                && (world.player.x - body.pos.x).abs() < JUMPER_CHASE_RANGE;
            let consider = player_above || rng.random_range(0..100) < JUMPER_JUMP_CHANCE;

            if consider
                && self.jump_cooldown <= 0.0
                && self.walk_timer >= JUMPER_MIN_WALK
                && !probe_horizontal(body, grid, dx).is_blocked()
                && landing_ahead(body, grid, dx).is_some()
            {
                body.vy = JUMPER_JUMP_STRENGTH;
                body.on_ground = false;
                self.jump_cooldown = JUMPER_JUMP_COOLDOWN;
                self.walk_timer = 0.0;
            }
        }

        resolve_horizontal(body, grid, dx);
    }
}

/// Row of a platform one or two tiles above the feet, in the column ahead,
/// with no solid tile between it and the head.
pub fn landing_ahead(body: &Body, grid: &TileGrid, dx: f32) -> Option<i32> {
    let next_x = body.pos.x + dx;
    let col = if dx >= 0.0 {
        cell_of(next_x + body.size.x)
    } else {
        cell_of(next_x)
    };
    let foot_row = cell_of(body.pos.y + body.size.y);
    let head_row = cell_of(body.pos.y);

    for rise in 1..=2 {
        let landing_row = foot_row - rise;
        if landing_row < 0 {
            break;
        }
        if !grid.tile_at(landing_row, col).is_floor() {
            continue;
        }
        let clear = (landing_row + 1..head_row).all(|row| !grid.tile_at(row, col).is_solid());
        if clear {
            return Some(landing_row);
        }
    }
    None
}

/// Visibility cycle of the intermittent enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    /// Walking; vanishes when the countdown runs out
    Visible { countdown: u32 },
    /// Playing the vanish animation
    Vanishing { frame: u32, ticks: u32 },
    /// Hidden and shadowing the player
    Invisible { ticks: u32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntermittentState {
    pub phase: Visibility,
    /// Visible countdown to use once the current invisibility ends
    pub reappear_countdown: u32,
}

impl IntermittentState {
    pub fn new(rng: &mut impl Rng) -> Self {
        Self {
            phase: Visibility::Visible {
                countdown: rng.random_range(0..FIRST_VANISH_MAX),
            },
            reappear_countdown: 0,
        }
    }

    /// Vanish animation frame, if the animation is playing
    pub fn vanish_frame(&self) -> Option<usize> {
        match self.phase {
            Visibility::Vanishing { frame, .. } => Some(frame as usize),
            _ => None,
        }
    }

    pub fn advance(&mut self, body: &mut Body, world: &Surroundings<'_>, rng: &mut impl Rng) {
        match self.phase {
            Visibility::Visible { countdown: 0 } => {
                self.phase = Visibility::Vanishing { frame: 0, ticks: 0 };
            }
            Visibility::Visible { countdown } => {
                self.phase = Visibility::Visible {
                    countdown: countdown - 1,
                };
                patrol_grounded(body, world.grid, INTERMITTENT_SPEED);
            }
            Visibility::Vanishing { mut frame, mut ticks } => {
                ticks += 1;
                if ticks >= VANISH_TICKS_PER_FRAME {
                    frame += 1;
                    ticks = 0;
                }
                if frame >= VANISH_FRAMES {
                    self.reappear_countdown = rng.random_range(0..REAPPEAR_MAX);
                    self.phase = Visibility::Invisible { ticks: 0 };
                } else {
                    self.phase = Visibility::Vanishing { frame, ticks };
                }
            }
            Visibility::Invisible { ticks } => {
                body.pos = world.player + Vec2::new(INVISIBLE_FOLLOW_OFFSET_X, 0.0);
                body.vy = 0.0;
                self.phase = if ticks > INVISIBLE_TICKS {
                    Visibility::Visible {
                        countdown: self.reappear_countdown,
                    }
                } else {
                    Visibility::Invisible { ticks: ticks + 1 }
                };
            }
        }
    }
}

/// Fall under gravity; while grounded walk forward, turning at walls
fn patrol_grounded(body: &mut Body, grid: &TileGrid, speed: f32) {
    let landed = resolve_vertical(body, grid, None, &mut DropThrough::default())
        == VerticalOutcome::Landed;
    if !landed {
        return;
    }
    let dx = body.step_x(speed);
    if probe_horizontal(body, grid, dx).is_blocked() {
        body.turn_around();
    } else {
        body.pos.x += dx;
    }
}

/// Ranged attacker's projectile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fireball {
    pub pos: Vec2,
    pub moving_right: bool,
}

impl Fireball {
    /// Move one frame, then test against the player. A hit takes precedence;
    /// otherwise passing the player's x counts as a dodge.
    pub fn step(&mut self, player: Vec2) -> Option<AttackEvent> {
        self.pos.x += if self.moving_right {
            FIREBALL_SPEED
        } else {
            -FIREBALL_SPEED
        };

        if (self.pos.x - player.x).abs() < FIREBALL_HIT_X
            && (self.pos.y - player.y).abs() < FIREBALL_HIT_Y
        {
            Some(AttackEvent::FireballHit)
        } else if (self.moving_right && self.pos.x > player.x)
            || (!self.moving_right && self.pos.x < player.x)
        {
            Some(AttackEvent::FireballDodged)
        } else {
            None
        }
    }
}

/// Patrolling attacker that winds up and throws a fireball at the player
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RangedState {
    /// Frames of wind-up left; `Some` while attacking
    pub windup: Option<i32>,
    /// Frames until another fireball may be thrown
    pub cooldown: i32,
    /// A fireball was already thrown during the current attack
    pub spawned: bool,
    pub fireball: Option<Fireball>,
    /// Set when the fireball reached the player; cleared by the damage step
    pub hit: bool,
}

impl RangedState {
    pub fn advance(&mut self, body: &mut Body, world: &Surroundings<'_>) -> Option<AttackEvent> {
        let grid = world.grid;

        if self.windup.is_none() {
            let dx = body.step_x(RANGED_SPEED);
            if !ground_ahead(body, grid, dx) || probe_horizontal(body, grid, dx).is_blocked() {
                body.turn_around();
            } else {
                body.pos.x += dx;
            }
        }

        let player = world.player;
        let detected = (player.y - body.pos.y).abs() < DETECT_RANGE_Y
            && (player.x - body.pos.x).abs() < DETECT_RANGE_X;
        let in_front = (body.facing_right && player.x > body.pos.x)
            || (!body.facing_right && player.x < body.pos.x);

        if detected && in_front && self.cooldown <= 0 {
            if self.windup.is_none_or(|frames| frames <= 0) {
                self.windup = Some(WINDUP_FRAMES);
            }
        } else if self.windup.is_some_and(|frames| frames <= 0) {
            self.windup = None;
        }

        if self.cooldown > 0 {
            self.cooldown -= 1;
        }

        let mut event = None;
        match self.windup {
            Some(frames) if frames > 0 => {
                let frames = frames - 1;
                self.windup = Some(frames);
                if frames <= 0 {
                    if !self.spawned && self.cooldown <= 0 {
                        self.fireball = Some(Fireball {
                            pos: body.pos + Vec2::new(0.0, FIREBALL_SPAWN_OFFSET_Y),
                            moving_right: body.facing_right,
                        });
                        self.cooldown = FIREBALL_COOLDOWN;
                        self.spawned = true;
                        event = Some(AttackEvent::FireballLaunched);
                    }
                    self.windup = None;
                }
            }
            Some(_) => self.windup = None,
            None => self.spawned = false,
        }

        if let Some(fireball) = self.fireball.as_mut() {
            if let Some(outcome) = fireball.step(player) {
                self.fireball = None;
                self.spawned = false;
                if outcome == AttackEvent::FireballHit {
                    self.hit = true;
                }
                event = Some(outcome);
            }
        }

        event
    }

    /// Wind-up animation frame (three per side, right-facing frames after
    /// the left-facing ones)
    pub fn attack_frame(&self, facing_right: bool) -> Option<usize> {
        let frames = self.windup?;
        let progress = (WINDUP_FRAMES - frames).max(0) as usize;
        let index = (progress * ATTACK_ANIM_FRAMES / WINDUP_FRAMES as usize)
            .min(ATTACK_ANIM_FRAMES - 1);
        let offset = if facing_right { ATTACK_ANIM_FRAMES } else { 0 };
        Some(index + offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::grid::Tile;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn body_at(x: f32, y: f32) -> Body {
        Body::new(Vec2::new(x, y), Vec2::splat(ENEMY_SIZE))
    }

    fn floor_y() -> f32 {
        12.0 * CELL_SIZE
    }

    #[test]
    fn test_flyer_turns_at_wall() {
        let grid = TileGrid::bordered(14, 18);
        let mut body = body_at(CELL_SIZE + 1.0, 5.0 * CELL_SIZE);
        body.facing_right = false;
        advance_flyer(&mut body, &grid);
        assert!(body.facing_right);
        assert_eq!(body.pos.x, CELL_SIZE + 1.0);
    }

    #[test]
    fn test_flyer_patrol_bounds() {
        let grid = TileGrid::new(14, 30);
        let mut body = body_at(FLYER_MAX_X - 1.0, 200.0);
        advance_flyer(&mut body, &grid);
        assert!(!body.facing_right);

        let mut body = body_at(FLYER_MIN_X + 1.0, 200.0);
        body.facing_right = false;
        advance_flyer(&mut body, &grid);
        assert!(body.facing_right);
    }

    #[test]
    fn test_flyer_ignores_gravity() {
        let grid = TileGrid::new(14, 30);
        let mut body = body_at(400.0, 200.0);
        for _ in 0..20 {
            advance_flyer(&mut body, &grid);
        }
        assert_eq!(body.pos.y, 200.0);
    }

    #[test]
    fn test_jumper_without_ground_reverses_and_lands_on_floor() {
        // Open room; a jumper placed mid-air at row 6 col 3
        let grid = TileGrid::bordered(14, 18);
        let world = Surroundings {
            grid: &grid,
            player: Vec2::new(800.0, 768.0),
        };
        let mut rng = Pcg32::seed_from_u64(7);
        let mut state = JumperState {
            jump_cooldown: 10.0,
            walk_timer: 0.0,
        };
        let mut body = body_at(3.0 * CELL_SIZE, 6.0 * CELL_SIZE);

        let mut reversals = 0;
        let mut facing = body.facing_right;
        for _ in 0..120 {
            state.advance(&mut body, &world, &mut rng);
            if body.facing_right != facing {
                reversals += 1;
                facing = body.facing_right;
            }
            assert!(body.pos.y + body.size.y <= 13.0 * CELL_SIZE);
        }
        assert!(reversals > 0);
        assert!(body.on_ground);
        assert_eq!(body.pos.y, floor_y());
    }

    #[test]
    fn test_jumper_turns_at_ledge() {
        let grid = TileGrid::from_ascii(&[
            "##########",
            "#........#",
            "#........#",
            "#..---...#",
            "#........#",
            "##########",
        ])
        .unwrap();
        let world = Surroundings {
            grid: &grid,
            player: Vec2::new(0.0, 0.0),
        };
        let mut rng = Pcg32::seed_from_u64(1);
        let mut state = JumperState {
            jump_cooldown: 100.0,
            walk_timer: 0.0,
        };
        // Standing on the shelf (cols 3..6), right edge at the shelf end
        let mut body = body_at(5.0 * CELL_SIZE, 2.0 * CELL_SIZE);
        body.on_ground = true;
        state.advance(&mut body, &world, &mut rng);
        assert!(!body.facing_right);
        assert_eq!(body.pos.y, 2.0 * CELL_SIZE);
    }

    fn ledge_grid() -> TileGrid {
        // One-way ledge at head height, cols 5..9
        let mut grid = TileGrid::bordered(14, 18);
        for col in 5..9 {
            grid.set(12, col, Tile::OneWay);
        }
        grid
    }

    #[test]
    fn test_jumper_jumps_toward_player_above() {
        let grid = ledge_grid();
        let world = Surroundings {
            grid: &grid,
            player: Vec2::new(6.0 * CELL_SIZE, 10.0 * CELL_SIZE),
        };
        let mut rng = Pcg32::seed_from_u64(3);
        let mut state = JumperState {
            jump_cooldown: 0.0,
            walk_timer: JUMPER_MIN_WALK,
        };
        let mut body = body_at(4.0 * CELL_SIZE, floor_y());
        state.advance(&mut body, &world, &mut rng);
        assert_eq!(body.vy, JUMPER_JUMP_STRENGTH);
        assert_eq!(state.jump_cooldown, JUMPER_JUMP_COOLDOWN);
        assert_eq!(state.walk_timer, 0.0);

        // Comes back down onto the ledge or the floor, never through it
        for _ in 0..60 {
            state.advance(&mut body, &world, &mut rng);
            assert!(body.pos.y <= floor_y());
        }
        assert!(body.on_ground);
        assert!(body.pos.y == floor_y() || body.pos.y == 11.0 * CELL_SIZE);
    }

    #[test]
    fn test_jumper_jumps_at_random_with_player_far_away() {
        let grid = ledge_grid();
        // Level with the jumper and far off to the left: never "above"
        let world = Surroundings {
            grid: &grid,
            player: Vec2::new(CELL_SIZE, floor_y()),
        };
        let mut rng = Pcg32::seed_from_u64(17);
        let mut state = JumperState {
            jump_cooldown: 0.0,
            walk_timer: JUMPER_MIN_WALK,
        };
        let mut body = body_at(4.0 * CELL_SIZE, floor_y());

        let mut jumped = false;
        for _ in 0..100 {
            state.advance(&mut body, &world, &mut rng);
            if body.vy == JUMPER_JUMP_STRENGTH {
                jumped = true;
                break;
            }
        }
        assert!(jumped);
        assert_eq!(state.jump_cooldown, JUMPER_JUMP_COOLDOWN);
        assert_eq!(state.walk_timer, 0.0);
    }

    #[test]
    fn test_jumper_needs_walk_time() {
        let grid = ledge_grid();
        let world = Surroundings {
            grid: &grid,
            player: Vec2::new(6.0 * CELL_SIZE, 10.0 * CELL_SIZE),
        };
        let mut rng = Pcg32::seed_from_u64(3);
        let mut state = JumperState::default();
        let mut body = body_at(4.0 * CELL_SIZE, floor_y());
        state.advance(&mut body, &world, &mut rng);
        assert_eq!(body.vy, 0.0);
    }

    #[test]
    fn test_landing_ahead_requires_floor() {
        let grid = TileGrid::bordered(14, 18);
        let body = body_at(5.0 * CELL_SIZE, floor_y());
        assert_eq!(landing_ahead(&body, &grid, 1.5), None);
    }

    #[test]
    fn test_intermittent_cycle() {
        let grid = TileGrid::bordered(14, 18);
        let player = Vec2::new(500.0, 768.0);
        let world = Surroundings {
            grid: &grid,
            player,
        };
        let mut rng = Pcg32::seed_from_u64(11);
        let mut state = IntermittentState {
            phase: Visibility::Visible { countdown: 2 },
            reappear_countdown: 0,
        };
        let mut body = body_at(3.0 * CELL_SIZE, floor_y());

        state.advance(&mut body, &world, &mut rng);
        state.advance(&mut body, &world, &mut rng);
        assert_eq!(state.phase, Visibility::Visible { countdown: 0 });
        state.advance(&mut body, &world, &mut rng);
        assert_eq!(state.phase, Visibility::Vanishing { frame: 0, ticks: 0 });

        // Six frames, ten ticks each
        for _ in 0..(VANISH_FRAMES * VANISH_TICKS_PER_FRAME - 1) {
            state.advance(&mut body, &world, &mut rng);
            assert!(state.vanish_frame().is_some());
        }
        state.advance(&mut body, &world, &mut rng);
        assert_eq!(state.phase, Visibility::Invisible { ticks: 0 });
        assert!(state.reappear_countdown < REAPPEAR_MAX);

        state.advance(&mut body, &world, &mut rng);
        assert_eq!(body.pos, player + Vec2::new(INVISIBLE_FOLLOW_OFFSET_X, 0.0));

        for _ in 0..=INVISIBLE_TICKS {
            state.advance(&mut body, &world, &mut rng);
        }
        assert_eq!(
            state.phase,
            Visibility::Visible {
                countdown: state.reappear_countdown
            }
        );
    }

    #[test]
    fn test_intermittent_walks_when_visible() {
        let grid = TileGrid::bordered(14, 18);
        let world = Surroundings {
            grid: &grid,
            player: Vec2::ZERO,
        };
        let mut rng = Pcg32::seed_from_u64(2);
        let mut state = IntermittentState {
            phase: Visibility::Visible { countdown: 500 },
            reappear_countdown: 0,
        };
        let mut body = body_at(5.0 * CELL_SIZE, floor_y());
        let start = body.pos.x;
        for _ in 0..10 {
            state.advance(&mut body, &world, &mut rng);
        }
        assert_eq!(body.pos.x, start + 10.0 * INTERMITTENT_SPEED);
    }

    fn ranged_world(grid: &TileGrid, player: Vec2) -> Surroundings<'_> {
        Surroundings { grid, player }
    }

    #[test]
    fn test_ranged_winds_up_and_fires() {
        let grid = TileGrid::bordered(14, 18);
        let player = Vec2::new(8.0 * CELL_SIZE, floor_y());
        let world = ranged_world(&grid, player);
        let mut state = RangedState::default();
        let mut body = body_at(6.0 * CELL_SIZE, floor_y());

        assert_eq!(state.advance(&mut body, &world), None);
        assert!(state.windup.is_some());
        let x_at_windup = body.pos.x;

        let mut launched = false;
        for _ in 0..WINDUP_FRAMES {
            if state.advance(&mut body, &world) == Some(AttackEvent::FireballLaunched) {
                launched = true;
                break;
            }
            // No walking during the wind-up
            assert_eq!(body.pos.x, x_at_windup);
        }
        assert!(launched);
        assert!(state.windup.is_none());
        assert_eq!(state.cooldown, FIREBALL_COOLDOWN);
        let fireball = state.fireball.expect("fireball in flight");
        assert!(fireball.moving_right);
        assert_eq!(fireball.pos.y, floor_y() + FIREBALL_SPAWN_OFFSET_Y);
    }

    #[test]
    fn test_ranged_ignores_player_behind() {
        let grid = TileGrid::bordered(14, 18);
        let player = Vec2::new(4.0 * CELL_SIZE, floor_y());
        let world = ranged_world(&grid, player);
        let mut state = RangedState::default();
        let mut body = body_at(6.0 * CELL_SIZE, floor_y());
        state.advance(&mut body, &world);
        assert!(state.windup.is_none());
    }

    #[test]
    fn test_ranged_single_fireball_per_cooldown() {
        let grid = TileGrid::bordered(14, 18);
        let player = Vec2::new(9.0 * CELL_SIZE, floor_y() - 200.0);
        let world = ranged_world(&grid, player);
        let mut state = RangedState {
            cooldown: 0,
            windup: Some(1),
            ..Default::default()
        };
        let mut body = body_at(6.0 * CELL_SIZE, floor_y());
        assert_eq!(
            state.advance(&mut body, &world),
            Some(AttackEvent::FireballLaunched)
        );
        for _ in 0..100 {
            assert_ne!(
                state.advance(&mut body, &world),
                Some(AttackEvent::FireballLaunched)
            );
        }
    }

    #[test]
    fn test_fireball_hits_player_in_line() {
        let player = Vec2::new(200.0, 300.0);
        let mut fireball = Fireball {
            pos: Vec2::new(100.0, 310.0),
            moving_right: true,
        };
        let mut outcome = None;
        for _ in 0..100 {
            outcome = fireball.step(player);
            if outcome.is_some() {
                break;
            }
        }
        assert_eq!(outcome, Some(AttackEvent::FireballHit));
        assert!((fireball.pos.x - player.x).abs() < FIREBALL_HIT_X);
        assert!(fireball.pos.x <= player.x);
    }

    #[test]
    fn test_fireball_dodged_when_out_of_line() {
        let player = Vec2::new(200.0, 250.0);
        let mut fireball = Fireball {
            pos: Vec2::new(100.0, 310.0),
            moving_right: true,
        };
        let mut outcome = None;
        for _ in 0..100 {
            outcome = fireball.step(player);
            if outcome.is_some() {
                break;
            }
        }
        assert_eq!(outcome, Some(AttackEvent::FireballDodged));
        assert!(fireball.pos.x > player.x);
    }

    #[test]
    fn test_fireball_hit_sets_flag_once() {
        let grid = TileGrid::bordered(14, 18);
        let player = Vec2::new(300.0, 500.0);
        let world = ranged_world(&grid, player);
        let mut state = RangedState {
            cooldown: 100,
            fireball: Some(Fireball {
                pos: Vec2::new(player.x - 22.0, player.y),
                moving_right: true,
            }),
            ..Default::default()
        };
        let mut body = body_at(100.0, floor_y());
        assert_eq!(state.advance(&mut body, &world), Some(AttackEvent::FireballHit));
        assert!(state.fireball.is_none());

        let mut behavior = Behavior::Ranged(state);
        assert!(behavior.take_fireball_hit());
        assert!(!behavior.take_fireball_hit());
    }

    #[test]
    fn test_attack_frames_mirror_by_facing() {
        let state = RangedState {
            windup: Some(WINDUP_FRAMES),
            ..Default::default()
        };
        assert_eq!(state.attack_frame(false), Some(0));
        assert_eq!(state.attack_frame(true), Some(3));

        let state = RangedState {
            windup: Some(1),
            ..Default::default()
        };
        assert_eq!(state.attack_frame(false), Some(2));
        assert_eq!(RangedState::default().attack_frame(true), None);
    }
}
