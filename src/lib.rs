//! Tumble Pop - a tile-based vacuum-and-throw platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (tile collision, enemy behaviour, inventory)
//! - `settings`: Runtime configuration for the native runner

pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, every timer counts in these units)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Tile grid dimensions
    pub const CELL_SIZE: f32 = 64.0;
    pub const GRID_ROWS: usize = 14;
    pub const GRID_COLS: usize = 18;

    /// Player body and movement
    pub const PLAYER_WIDTH: f32 = 68.0;
    pub const PLAYER_HEIGHT: f32 = 64.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const JUMP_STRENGTH: f32 = -17.0;
    pub const GRAVITY: f32 = 1.0;
    pub const TERMINAL_VELOCITY: f32 = 20.0;
    pub const MAX_LIVES: i8 = 3;
    /// Lives value that means "game over"; never decremented past this
    pub const GAME_OVER_LIVES: i8 = -1;

    /// One-way drop-through: request window and pass-through cooldown (seconds)
    pub const DROP_DURATION: f32 = 0.15;
    pub const DROP_COOLDOWN: f32 = 0.1;

    /// Seconds of invulnerability after taking damage
    pub const DAMAGE_COOLDOWN: f32 = 2.0;
    /// Enemy contact box half-extent around the player's position
    pub const CONTACT_RANGE: f32 = 32.0;

    /// Constant per-frame slide applied while standing on a slope
    pub const SLOPE_NUDGE: f32 = 2.0;

    /// Victory animation (seconds)
    pub const VICTORY_DURATION: f32 = 4.0;
    pub const VICTORY_FRAME_TIME: f32 = 0.25;
    pub const VICTORY_FRAMES: usize = 4;

    /// Sprite animation clocks (ticks per frame)
    pub const WALK_FRAME_TICKS: u64 = 8;
    pub const WALK_FRAMES: usize = 4;
    pub const BEAM_FRAME_TICKS: u64 = 5;
    pub const BEAM_FRAMES: usize = 4;

    /// Enemy roster
    pub const MAX_ENEMIES: usize = 10;
    pub const ENEMY_SIZE: f32 = 64.0;
    pub const FLYER_SPEED: f32 = 1.8;
    pub const JUMPER_SPEED: f32 = 1.5;
    pub const INTERMITTENT_SPEED: f32 = 2.0;
    pub const RANGED_SPEED: f32 = 1.5;

    /// Flyer fallback patrol bounds (world x)
    pub const FLYER_MIN_X: f32 = 250.0;
    pub const FLYER_MAX_X: f32 = 850.0;

    /// Jumper tuning
    pub const JUMPER_JUMP_STRENGTH: f32 = -15.0;
    pub const JUMPER_JUMP_COOLDOWN: f32 = 0.8;
    pub const JUMPER_MIN_WALK: f32 = 0.3;
    pub const JUMPER_MAX_WALK: f32 = 2.0;
    /// Percent chance per grounded frame to consider a jump
    pub const JUMPER_JUMP_CHANCE: u32 = 12;
    pub const JUMPER_CHASE_RANGE: f32 = 300.0;
    pub const JUMPER_CHASE_MARGIN: f32 = 5.0;

    /// Intermittent (vanishing) enemy tuning, in ticks
    pub const VANISH_FRAMES: u32 = 6;
    pub const VANISH_TICKS_PER_FRAME: u32 = 10;
    pub const INVISIBLE_TICKS: u32 = 60;
    pub const FIRST_VANISH_MAX: u32 = 600;
    pub const REAPPEAR_MAX: u32 = 1000;
    pub const INVISIBLE_FOLLOW_OFFSET_X: f32 = 40.0;

    /// Ranged attacker tuning
    pub const DETECT_RANGE_X: f32 = 200.0;
    pub const DETECT_RANGE_Y: f32 = 50.0;
    pub const WINDUP_FRAMES: i32 = 24;
    pub const ATTACK_ANIM_FRAMES: usize = 3;
    pub const FIREBALL_SPEED: f32 = 4.0;
    pub const FIREBALL_COOLDOWN: i32 = 240;
    pub const FIREBALL_SPAWN_OFFSET_Y: f32 = 10.0;
    pub const FIREBALL_HIT_X: f32 = 20.0;
    pub const FIREBALL_HIT_Y: f32 = 30.0;

    /// Vacuum and throw
    pub const SUCTION_SPEED: f32 = 5.0;
    /// (x, y) half-extents of the suction box when pulling sideways
    pub const SUCTION_RANGE_SIDEWAYS: (f32, f32) = (100.0, 100.0);
    /// (x, y) half-extents of the suction box when pulling up or down
    pub const SUCTION_RANGE_VERTICAL: (f32, f32) = (150.0, 32.0);
    pub const THROW_SPEED: f32 = 15.0;
    pub const LEVEL_ONE_CAPACITY: usize = 3;
    pub const LEVEL_TWO_CAPACITY: usize = 5;

    /// Stall detection: frames below 1px movement before a forced relocation
    pub const STALL_FRAMES: u32 = 30;
    pub const STALL_EPSILON: f32 = 1.0;
}

/// Grid cell containing a pixel coordinate (floors, so negatives map off-grid)
#[inline]
pub fn cell_of(px: f32) -> i32 {
    (px / consts::CELL_SIZE).floor() as i32
}

/// Pixel coordinate of a cell's top/left edge
#[inline]
pub fn cell_origin(cell: i32) -> f32 {
    cell as f32 * consts::CELL_SIZE
}
