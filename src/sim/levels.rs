//! Level layouts and rosters
//!
//! Both levels are 14x18 rooms built procedurally: a solid border, rows of
//! one-way platforms, and a level-specific centrepiece (a solid pillar in
//! level one, a diagonal slope band in level two).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::grid::{CellCoord, Tile, TileGrid};
use crate::consts::*;

/// Selectable level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LevelId {
    #[default]
    One,
    Two,
}

impl LevelId {
    /// Index into per-level tables (inventories)
    pub fn index(self) -> usize {
        match self {
            LevelId::One => 0,
            LevelId::Two => 1,
        }
    }

    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }

    /// Level that follows a victory; `None` after the last level
    pub fn next(self) -> Option<LevelId> {
        match self {
            LevelId::One => Some(LevelId::Two),
            LevelId::Two => None,
        }
    }

    pub fn inventory_capacity(self) -> usize {
        match self {
            LevelId::One => LEVEL_ONE_CAPACITY,
            LevelId::Two => LEVEL_TWO_CAPACITY,
        }
    }

    pub fn player_start(self) -> Vec2 {
        match self {
            LevelId::One => Vec2::new(200.0, 150.0),
            LevelId::Two => Vec2::new(400.0, 150.0),
        }
    }

    /// Roster slots kept out of play for this level
    pub fn benched_slots(self) -> &'static [usize] {
        match self {
            LevelId::One => &[],
            LevelId::Two => &[0],
        }
    }

    pub fn build(self) -> TileGrid {
        match self {
            LevelId::One => level_one(),
            LevelId::Two => level_two(),
        }
    }
}

/// Preferred spawn cell for each roster slot; the spawn validator adjusts
/// these to fit the level
pub const SPAWN_CELLS: [CellCoord; MAX_ENEMIES] = [
    CellCoord::new(6, 3),
    CellCoord::new(3, 2),
    CellCoord::new(9, 10),
    CellCoord::new(3, 14),
    CellCoord::new(11, 9),
    CellCoord::new(12, 16),
    CellCoord::new(7, 7),
    CellCoord::new(6, 12),
    CellCoord::new(8, 15),
    CellCoord::new(12, 9),
];

fn one_way_row(grid: &mut TileGrid, row: usize, cols: impl Iterator<Item = usize>) {
    for col in cols {
        grid.set(row, col, Tile::OneWay);
    }
}

/// Interior columns only; platforms never replace the side walls
fn interior(keep: impl Fn(usize) -> bool) -> impl Iterator<Item = usize> {
    (1..GRID_COLS - 1).filter(move |&col| keep(col))
}

fn level_one() -> TileGrid {
    let mut grid = TileGrid::bordered(GRID_ROWS, GRID_COLS);

    one_way_row(&mut grid, 3, 3..15);
    one_way_row(&mut grid, 11, 3..15);
    one_way_row(&mut grid, 7, (3..15).filter(|&col| col != 8 && col != 9));
    one_way_row(&mut grid, 5, interior(|col| !(5..=12).contains(&col)));
    one_way_row(&mut grid, 9, interior(|col| !(5..=12).contains(&col)));

    // Central pillar, wider at rows 5 and 9
    for row in 3..=10 {
        for col in [8, 9] {
            grid.set(row, col, Tile::Solid);
        }
    }
    for row in 5..=9 {
        for col in [7, 10] {
            grid.set(row, col, Tile::Solid);
        }
    }

    grid
}

fn level_two() -> TileGrid {
    let mut grid = TileGrid::bordered(GRID_ROWS, GRID_COLS);

    one_way_row(&mut grid, 3, interior(|col| !(3..=5).contains(&col) && col <= 15));
    one_way_row(
        &mut grid,
        11,
        interior(|col| (1..=4).contains(&col) || (11..=12).contains(&col) || col >= 15),
    );
    one_way_row(
        &mut grid,
        7,
        interior(|col| (1..=2).contains(&col) || (10..=13).contains(&col)),
    );
    one_way_row(
        &mut grid,
        5,
        interior(|col| col == 1 || (8..=10).contains(&col) || col >= 13),
    );
    one_way_row(
        &mut grid,
        9,
        interior(|col| (1..=3).contains(&col) || (12..=14).contains(&col) || col == 16),
    );

    // Diagonal band: a rising slope cell with falling-slope fill beneath
    for i in 3..=10 {
        grid.set(i, i, Tile::SlopeUp);
        grid.set(i + 1, i, Tile::SlopeDown);
        if i + 1 < 11 {
            grid.set(i + 2, i, Tile::SlopeDown);
        }
    }

    grid
}
