//! Spawn placement
//!
//! Finds the nearest empty cell an enemy may occupy. Ground-dependent
//! archetypes additionally need a solid or slope tile directly beneath.

use super::enemy::Archetype;
use super::grid::{CellCoord, Tile, TileGrid};

/// Whether `cell` is an acceptable placement for `archetype`
pub fn is_valid_spawn(grid: &TileGrid, cell: CellCoord, archetype: Archetype) -> bool {
    if !grid.contains(cell.row, cell.col) || grid.tile(cell) != Tile::Empty {
        return false;
    }
    !archetype.needs_ground() || grid.tile_at(cell.row + 1, cell.col).is_solid()
}

/// Nearest valid cell to `desired`, searching Manhattan rings of growing radius
///
/// Within a ring, columns are scanned left to right and for each column the
/// cell above is tried before the one below. The rings grow until they cover
/// the whole grid; when nothing qualifies, the desired cell is clamped into
/// bounds even if it is solid.
pub fn find_valid_spawn(grid: &TileGrid, desired: CellCoord, archetype: Archetype) -> CellCoord {
    let clamped = grid.clamp(desired);
    let off_grid = (desired.row - clamped.row).abs() + (desired.col - clamped.col).abs();
    let max_radius = (grid.rows() + grid.cols()) as i32 + off_grid;

    for radius in 0..=max_radius {
        for dc in -radius..=radius {
            let dr = radius - dc.abs();
            for sign in [-1, 1] {
                let cell = CellCoord::new(desired.row + dr * sign, desired.col + dc);
                if is_valid_spawn(grid, cell, archetype) {
                    return cell;
                }
            }
        }
    }

    log::warn!(
        "No valid {:?} spawn near ({}, {}), clamping to ({}, {})",
        archetype,
        desired.row,
        desired.col,
        clamped.row,
        clamped.col
    );
    clamped
}
