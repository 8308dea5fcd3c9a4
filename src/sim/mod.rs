//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by enemy slot)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod behavior;
pub mod collision;
pub mod enemy;
pub mod grid;
pub mod inventory;
pub mod levels;
pub mod player;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod view;

pub use behavior::{AttackEvent, Behavior, Fireball, Surroundings, Visibility};
pub use collision::{Body, DropThrough, HorizontalProbe, VerticalOutcome};
pub use enemy::{Archetype, Enemy, Lifecycle};
pub use grid::{CellCoord, GridError, Tile, TileGrid};
pub use inventory::{Aim, Inventory};
pub use levels::LevelId;
pub use player::{Player, PlayerPhase};
pub use spawn::{find_valid_spawn, is_valid_spawn};
pub use state::{GameEvent, GameState, Screen};
pub use tick::{TickInput, tick};
pub use view::{SpriteKind, SpriteView};
