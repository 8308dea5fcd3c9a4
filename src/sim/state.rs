//! Game state and core simulation types
//!
//! All state that must be persisted for determinism lives here.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::autopilot::AutopilotMemory;
use super::behavior::Behavior;
use super::enemy::{Archetype, Enemy, Lifecycle};
use super::grid::{CellCoord, TileGrid};
use super::inventory::Inventory;
use super::levels::{LevelId, SPAWN_CELLS};
use super::player::Player;
use super::spawn::find_valid_spawn;
use crate::cell_origin;
use crate::consts::*;

/// Top-level screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    /// Level select
    Menu,
    /// A level is running
    Playing,
}

/// Things that happened during a tick, for audio and presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A level began; cue the level music
    LevelStarted(LevelId),
    ReturnedToMenu,
    EnemyCaptured { slot: usize },
    EnemyThrown { slot: usize },
    EnemyDestroyed { slot: usize },
    EnemyRelocated { slot: usize, cell: CellCoord },
    FireballLaunched { slot: usize },
    PlayerDamaged { lives: i8 },
    VictoryStarted(LevelId),
    GameOver,
}

/// Slot 1 is held back from jumping straight away after a level starts
const SLOW_START_SLOT: usize = 1;
const SLOW_START_JUMP_COOLDOWN: f32 = 1.2;

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub screen: Screen,
    /// Level selected in the menu, or the level being played
    pub level: LevelId,
    pub grid: TileGrid,
    pub player: Player,
    /// Enemy roster, indexed by slot
    pub enemies: Vec<Enemy>,
    /// One inventory per level
    pub inventories: [Inventory; 2],
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Escape pressed on the menu
    pub quit_requested: bool,
    /// Idle-mode bookkeeping
    pub autopilot: AutopilotMemory,
    /// Events raised by the latest tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game at the menu with the given seed
    pub fn new(seed: u64) -> Self {
        let level = LevelId::default();
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            screen: Screen::Menu,
            level,
            grid: level.build(),
            player: Player::new(level.player_start()),
            enemies: Vec::new(),
            inventories: [
                Inventory::new(LevelId::One.inventory_capacity()),
                Inventory::new(LevelId::Two.inventory_capacity()),
            ],
            time_ticks: 0,
            quit_requested: false,
            autopilot: AutopilotMemory::default(),
            events: Vec::new(),
        }
    }

    /// Build `level` from scratch and start playing it
    pub fn start_level(&mut self, level: LevelId) {
        self.level = level;
        self.screen = Screen::Playing;
        self.grid = level.build();
        self.player = Player::new(level.player_start());
        self.autopilot = AutopilotMemory::default();
        for inventory in &mut self.inventories {
            inventory.clear();
        }

        let mut enemies = Vec::with_capacity(MAX_ENEMIES);
        for (slot, desired) in SPAWN_CELLS.iter().enumerate() {
            let archetype = Archetype::from_slot(slot);
            let cell = find_valid_spawn(&self.grid, *desired, archetype);
            let pos = Vec2::new(cell_origin(cell.col), cell_origin(cell.row));
            let mut enemy = Enemy::new(slot, archetype, pos, &mut self.rng);

            if slot == SLOW_START_SLOT {
                if let Behavior::Jumper(state) = &mut enemy.behavior {
                    state.jump_cooldown = SLOW_START_JUMP_COOLDOWN;
                    state.walk_timer = JUMPER_MIN_WALK;
                }
            }
            if level.benched_slots().contains(&slot) {
                enemy.lifecycle = Lifecycle::Removed;
            }
            enemies.push(enemy);
        }
        self.enemies = enemies;

        log::info!(
            "Level {} started with {} enemies",
            level.number(),
            self.enemies.iter().filter(|e| e.is_active()).count()
        );
        self.events.push(GameEvent::LevelStarted(level));
    }

    /// Leave the level and go back to level select
    pub fn return_to_menu(&mut self) {
        self.screen = Screen::Menu;
        self.enemies.clear();
        self.player.victory_timer = None;
        log::info!("Returned to menu");
        self.events.push(GameEvent::ReturnedToMenu);
    }

    /// Inventory of the level being played
    pub fn inventory(&self) -> &Inventory {
        &self.inventories[self.level.index()]
    }

    pub fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventories[self.level.index()]
    }

    pub fn enemy(&self, slot: usize) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.slot == slot)
    }

    /// Every enemy is out of the world (captured or removed)
    pub fn all_enemies_gone(&self) -> bool {
        self.enemies.iter().all(|e| e.is_disappeared())
    }

    /// Level cleared: nobody left in the world or in the inventory
    pub fn level_cleared(&self) -> bool {
        self.screen == Screen::Playing && self.all_enemies_gone() && self.inventory().is_empty()
    }
}
