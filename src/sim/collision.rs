//! Collision detection and response against the tile grid
//!
//! Everything here is axis-aligned and grid-snapped. An actor is a `Body`
//! (top-left position, box size, vertical velocity). Horizontal motion is
//! stepped, vertical motion is integrated; each axis is resolved by sampling
//! three points along the leading edge and snapping to the tile boundary.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::grid::{Tile, TileGrid};
use crate::consts::*;
use crate::{cell_of, cell_origin};

/// Moving axis-aligned box shared by the player and enemies
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner in pixels
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity in pixels per frame (positive is down)
    pub vy: f32,
    pub facing_right: bool,
    pub on_ground: bool,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            size,
            vy: 0.0,
            facing_right: true,
            on_ground: false,
        }
    }

    /// Signed horizontal step for the current facing
    #[inline]
    pub fn step_x(&self, speed: f32) -> f32 {
        if self.facing_right { speed } else { -speed }
    }

    #[inline]
    pub fn turn_around(&mut self) {
        self.facing_right = !self.facing_right;
    }

    /// Three sample columns along the box width (left, middle, right edge)
    fn columns(&self, x: f32) -> [i32; 3] {
        [
            cell_of(x),
            cell_of(x + self.size.x / 2.0),
            cell_of(x + self.size.x - 1.0),
        ]
    }

    /// Three sample rows along the box height (top, middle, bottom edge)
    fn rows(&self, y: f32) -> [i32; 3] {
        [
            cell_of(y),
            cell_of(y + self.size.y / 2.0),
            cell_of(y + self.size.y - 1.0),
        ]
    }
}

/// Does any cell under the box hold a solid tile?
pub fn overlaps_solid(grid: &TileGrid, pos: Vec2, size: Vec2) -> bool {
    let left = cell_of(pos.x.floor());
    let right = cell_of((pos.x + size.x - 1.0).floor());
    let top = cell_of(pos.y.floor());
    let bottom = cell_of((pos.y + size.y - 1.0).floor());

    (top..=bottom).any(|row| (left..=right).any(|col| grid.tile_at(row, col).is_solid()))
}

/// One-way platform pass-through state (only the player ever requests it)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DropThrough {
    /// Drop requested this frame
    pub requested: bool,
    /// Seconds left during which one-way tiles are ignored
    pub cooldown: f32,
}

impl DropThrough {
    /// Whether one-way tiles currently let the actor through
    #[inline]
    pub fn passes_one_way(&self) -> bool {
        self.requested || self.cooldown > 0.0
    }
}

/// Result of one vertical step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalOutcome {
    /// Came to rest on top of a floor tile
    Landed,
    /// Hit a ceiling while rising
    HeadBump,
    /// Fell through a one-way platform
    DroppedThrough,
    /// Moved freely
    Airborne,
}

/// Apply gravity and resolve the vertical axis
///
/// Rising into a solid or slope stops the body under that tile. Falling onto
/// a solid, slope or one-way tile lands it on top, except that one-way tiles
/// are skipped while `drop` is active. A fresh drop request arms the
/// pass-through cooldown.
pub fn resolve_vertical(
    body: &mut Body,
    grid: &TileGrid,
    terminal_velocity: Option<f32>,
    drop: &mut DropThrough,
) -> VerticalOutcome {
    body.vy += GRAVITY;
    if let Some(max) = terminal_velocity {
        body.vy = body.vy.min(max);
    }

    let next_y = body.pos.y + body.vy;
    let cols = body.columns(body.pos.x);

    if body.vy < 0.0 {
        let row = cell_of(next_y);
        if cols.iter().any(|&col| grid.tile_at(row, col).is_solid()) {
            body.vy = 0.0;
            body.pos.y = cell_origin(row + 1);
            body.on_ground = false;
            return VerticalOutcome::HeadBump;
        }
    } else if body.vy > 0.0 {
        let row = cell_of(next_y + body.size.y);
        let tiles = cols.map(|col| grid.tile_at(row, col));
        let hit_solid = tiles.iter().any(|t| t.is_solid());
        let hit_one_way = tiles.contains(&Tile::OneWay);

        if hit_solid || (hit_one_way && !drop.passes_one_way()) {
            body.vy = 0.0;
            body.pos.y = cell_origin(row) - body.size.y;
            body.on_ground = true;
            if hit_solid {
                drop.cooldown = 0.0;
            }
            return VerticalOutcome::Landed;
        }

        if hit_one_way {
            if drop.requested {
                drop.cooldown = DROP_COOLDOWN;
            }
            body.pos.y = next_y;
            body.on_ground = false;
            return VerticalOutcome::DroppedThrough;
        }
    }

    body.pos.y = next_y;
    body.on_ground = false;
    VerticalOutcome::Airborne
}

/// Result of probing one horizontal step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HorizontalProbe {
    /// The step is free; carries the destination x
    Clear(f32),
    /// A solid tile is ahead; carries x flush against it
    Blocked(f32),
}

impl HorizontalProbe {
    #[inline]
    pub fn is_blocked(self) -> bool {
        matches!(self, HorizontalProbe::Blocked(_))
    }

    /// x the body ends up at if the probe is applied
    #[inline]
    pub fn x(self) -> f32 {
        match self {
            HorizontalProbe::Clear(x) | HorizontalProbe::Blocked(x) => x,
        }
    }
}

/// Check a horizontal step of `dx` pixels against the leading edge
pub fn probe_horizontal(body: &Body, grid: &TileGrid, dx: f32) -> HorizontalProbe {
    let next_x = body.pos.x + dx;
    let rows = body.rows(body.pos.y);

    if dx > 0.0 {
        let col = cell_of(next_x + body.size.x - 1.0);
        if rows.iter().any(|&row| grid.tile_at(row, col).is_solid()) {
            return HorizontalProbe::Blocked(cell_origin(col) - body.size.x);
        }
    } else if dx < 0.0 {
        let col = cell_of(next_x);
        if rows.iter().any(|&row| grid.tile_at(row, col).is_solid()) {
            return HorizontalProbe::Blocked(cell_origin(col + 1));
        }
    }

    HorizontalProbe::Clear(next_x)
}

/// Step horizontally, clamping to the wall when blocked. Returns true if blocked.
pub fn resolve_horizontal(body: &mut Body, grid: &TileGrid, dx: f32) -> bool {
    let probe = probe_horizontal(body, grid, dx);
    body.pos.x = probe.x();
    probe.is_blocked()
}

/// Is there floor under the column the body is about to step into?
pub fn ground_ahead(body: &Body, grid: &TileGrid, dx: f32) -> bool {
    let next_x = body.pos.x + dx;
    let foot_row = cell_of(body.pos.y + body.size.y);
    let col = if dx >= 0.0 {
        cell_of(next_x + body.size.x)
    } else {
        cell_of(next_x)
    };
    grid.tile_at(foot_row, col).is_floor()
}

/// Would a projectile step of `velocity` drive the leading edge into a solid
/// tile? Samples three points across the edge, perpendicular to the flight.
pub fn flight_blocked(body: &Body, grid: &TileGrid, velocity: Vec2) -> bool {
    let next = body.pos + velocity;

    if velocity.x != 0.0 {
        let col = if velocity.x > 0.0 {
            cell_of(next.x + body.size.x)
        } else {
            cell_of(next.x)
        };
        body.rows(body.pos.y)
            .iter()
            .any(|&row| grid.tile_at(row, col).is_solid())
    } else if velocity.y != 0.0 {
        let row = if velocity.y > 0.0 {
            cell_of(next.y + body.size.y)
        } else {
            cell_of(next.y)
        };
        body.columns(body.pos.x)
            .iter()
            .any(|&col| grid.tile_at(row, col).is_solid())
    } else {
        false
    }
}

/// Tiles sampled directly under the body's feet (left, middle, right)
pub fn tiles_underfoot(body: &Body, grid: &TileGrid) -> [Tile; 3] {
    let row = cell_of(body.pos.y + body.size.y);
    body.columns(body.pos.x).map(|col| grid.tile_at(row, col))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enemy_body(x: f32, y: f32) -> Body {
        Body::new(Vec2::new(x, y), Vec2::splat(ENEMY_SIZE))
    }

    fn shelf_grid() -> TileGrid {
        // One-way shelf on row 7 over a solid floor on row 13
        let mut grid = TileGrid::bordered(14, 18);
        for col in 3..15 {
            grid.set(7, col, Tile::OneWay);
        }
        grid
    }

    #[test]
    fn test_overlaps_solid() {
        let grid = TileGrid::bordered(14, 18);
        assert!(!overlaps_solid(&grid, Vec2::new(64.0, 64.0), Vec2::splat(64.0)));
        assert!(overlaps_solid(&grid, Vec2::new(63.0, 64.0), Vec2::splat(64.0)));
        assert!(overlaps_solid(&grid, Vec2::new(64.0, 769.0), Vec2::splat(64.0)));
    }

    #[test]
    fn test_one_way_does_not_overlap() {
        let grid = shelf_grid();
        assert!(!overlaps_solid(&grid, Vec2::new(192.0, 448.0), Vec2::splat(64.0)));
    }

    #[test]
    fn test_fall_lands_on_floor() {
        let grid = TileGrid::bordered(14, 18);
        let mut body = enemy_body(128.0, 600.0);
        let mut drop = DropThrough::default();

        let mut landed = false;
        for _ in 0..60 {
            if resolve_vertical(&mut body, &grid, None, &mut drop) == VerticalOutcome::Landed {
                landed = true;
                break;
            }
        }
        assert!(landed);
        assert_eq!(body.pos.y, 12.0 * CELL_SIZE);
        assert_eq!(body.vy, 0.0);
        assert!(body.on_ground);
    }

    #[test]
    fn test_grounded_body_stays_put() {
        // Resting bodies re-land every frame and satisfy the rest invariant
        let grid = shelf_grid();
        let mut body = enemy_body(256.0, 6.0 * CELL_SIZE);
        let mut drop = DropThrough::default();
        for _ in 0..10 {
            let outcome = resolve_vertical(&mut body, &grid, None, &mut drop);
            assert_eq!(outcome, VerticalOutcome::Landed);
            assert_eq!(body.vy, 0.0);
            assert_eq!(body.pos.y, 6.0 * CELL_SIZE);
            assert!(tiles_underfoot(&body, &grid).iter().any(|t| t.is_floor()));
        }
    }

    #[test]
    fn test_head_bump_snaps_below_ceiling() {
        let grid = TileGrid::bordered(14, 18);
        let mut body = enemy_body(128.0, 70.0);
        body.vy = -10.0;
        let mut drop = DropThrough::default();
        let outcome = resolve_vertical(&mut body, &grid, None, &mut drop);
        assert_eq!(outcome, VerticalOutcome::HeadBump);
        assert_eq!(body.pos.y, CELL_SIZE);
        assert_eq!(body.vy, 0.0);
    }

    #[test]
    fn test_rising_passes_one_way() {
        let grid = shelf_grid();
        let mut body = enemy_body(256.0, 8.0 * CELL_SIZE + 4.0);
        body.vy = -12.0;
        let mut drop = DropThrough::default();
        let outcome = resolve_vertical(&mut body, &grid, None, &mut drop);
        assert_eq!(outcome, VerticalOutcome::Airborne);
        assert!(body.pos.y < 8.0 * CELL_SIZE);
    }

    #[test]
    fn test_terminal_velocity_clamp() {
        let grid = TileGrid::new(40, 4);
        let mut body = enemy_body(64.0, 0.0);
        body.vy = 19.5;
        let mut drop = DropThrough::default();
        resolve_vertical(&mut body, &grid, Some(TERMINAL_VELOCITY), &mut drop);
        assert_eq!(body.vy, TERMINAL_VELOCITY);
    }

    #[test]
    fn test_drop_request_passes_one_way() {
        let grid = shelf_grid();
        let mut body = enemy_body(256.0, 6.0 * CELL_SIZE);
        let mut drop = DropThrough {
            requested: true,
            cooldown: 0.0,
        };
        let outcome = resolve_vertical(&mut body, &grid, None, &mut drop);
        assert_eq!(outcome, VerticalOutcome::DroppedThrough);
        assert_eq!(drop.cooldown, DROP_COOLDOWN);
        assert!(body.pos.y > 6.0 * CELL_SIZE);
        assert!(!body.on_ground);
    }

    #[test]
    fn test_drop_request_does_not_pass_solid() {
        let grid = TileGrid::bordered(14, 18);
        let mut body = enemy_body(256.0, 12.0 * CELL_SIZE);
        let mut drop = DropThrough {
            requested: true,
            cooldown: 0.0,
        };
        assert_eq!(
            resolve_vertical(&mut body, &grid, None, &mut drop),
            VerticalOutcome::Landed
        );
        assert_eq!(body.pos.y, 12.0 * CELL_SIZE);
    }

    #[test]
    fn test_probe_blocks_at_walls() {
        let grid = TileGrid::bordered(14, 18);

        let body = enemy_body(66.0, 128.0);
        assert_eq!(probe_horizontal(&body, &grid, -5.0), HorizontalProbe::Blocked(64.0));

        let body = enemy_body(17.0 * CELL_SIZE - 66.0, 128.0);
        assert_eq!(
            probe_horizontal(&body, &grid, 5.0),
            HorizontalProbe::Blocked(16.0 * CELL_SIZE)
        );

        let body = enemy_body(400.0, 128.0);
        assert_eq!(probe_horizontal(&body, &grid, 5.0), HorizontalProbe::Clear(405.0));
    }

    #[test]
    fn test_flush_body_stays_flush() {
        let grid = TileGrid::bordered(14, 18);
        let mut body = enemy_body(CELL_SIZE, 128.0);
        assert!(resolve_horizontal(&mut body, &grid, -5.0));
        assert_eq!(body.pos.x, CELL_SIZE);
    }

    #[test]
    fn test_flight_blocked_by_walls_not_platforms() {
        let grid = shelf_grid();
        let body = enemy_body(16.0 * CELL_SIZE - 10.0, 5.0 * CELL_SIZE);
        assert!(flight_blocked(&body, &grid, Vec2::new(THROW_SPEED, 0.0)));
        assert!(!flight_blocked(&body, &grid, Vec2::new(-THROW_SPEED, 0.0)));

        // Falling through the one-way shelf is fine, the floor is not
        let body = enemy_body(6.0 * CELL_SIZE, 6.0 * CELL_SIZE);
        assert!(!flight_blocked(&body, &grid, Vec2::new(0.0, THROW_SPEED)));
        let body = enemy_body(6.0 * CELL_SIZE, 12.0 * CELL_SIZE - 10.0);
        assert!(flight_blocked(&body, &grid, Vec2::new(0.0, THROW_SPEED)));
        assert!(!flight_blocked(&body, &grid, Vec2::ZERO));
    }

    #[test]
    fn test_ground_ahead() {
        let grid = shelf_grid();
        // Standing on the shelf (cols 3..15), well inside
        let body = enemy_body(6.0 * CELL_SIZE, 6.0 * CELL_SIZE);
        assert!(ground_ahead(&body, &grid, 1.5));
        assert!(ground_ahead(&body, &grid, -1.5));

        // Right edge flush with the end of the shelf
        let body = enemy_body(14.0 * CELL_SIZE, 6.0 * CELL_SIZE);
        assert!(!ground_ahead(&body, &grid, 1.5));
    }
}
