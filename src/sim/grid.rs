//! Tile grid for a single level
//!
//! Row-major, fixed dimensions, immutable while a level is running. Every
//! lookup is bounds-checked: anything off the map reads as `Tile::Empty`, so
//! actors fall off edges instead of indexing out of range.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Kind of a single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tile {
    #[default]
    Empty,
    Solid,
    /// Platform that only blocks downward entry
    OneWay,
    /// Rising slope (`/`)
    SlopeUp,
    /// Falling slope (`\`)
    SlopeDown,
}

impl Tile {
    /// Blocks movement on every axis (slopes block like solid blocks)
    #[inline]
    pub fn is_solid(self) -> bool {
        matches!(self, Tile::Solid | Tile::SlopeUp | Tile::SlopeDown)
    }

    /// Something an actor can stand on: solid, slope or one-way platform
    #[inline]
    pub fn is_floor(self) -> bool {
        self.is_solid() || self == Tile::OneWay
    }

    #[inline]
    pub fn is_slope(self) -> bool {
        matches!(self, Tile::SlopeUp | Tile::SlopeDown)
    }

    pub fn from_glyph(c: char) -> Option<Self> {
        match c {
            ' ' | '.' => Some(Tile::Empty),
            '#' => Some(Tile::Solid),
            '-' => Some(Tile::OneWay),
            '/' => Some(Tile::SlopeUp),
            '\\' => Some(Tile::SlopeDown),
            _ => None,
        }
    }

    pub fn glyph(self) -> char {
        match self {
            Tile::Empty => '.',
            Tile::Solid => '#',
            Tile::OneWay => '-',
            Tile::SlopeUp => '/',
            Tile::SlopeDown => '\\',
        }
    }
}

/// A (row, col) grid address. Signed so callers can probe off-grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellCoord {
    pub row: i32,
    pub col: i32,
}

impl CellCoord {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

/// Errors from parsing a text layout
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("layout has no rows")]
    Empty,
    #[error("row {row} has {actual} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("unknown tile glyph {glyph:?} at row {row}, col {col}")]
    UnknownGlyph { glyph: char, row: usize, col: usize },
}

/// Owned fixed-size tile map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileGrid {
    rows: usize,
    cols: usize,
    cells: Vec<Tile>,
}

impl TileGrid {
    /// All-empty grid
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Tile::Empty; rows * cols],
        }
    }

    /// Grid with a solid border and an empty interior
    pub fn bordered(rows: usize, cols: usize) -> Self {
        let mut grid = Self::new(rows, cols);
        for row in 0..rows {
            for col in 0..cols {
                if row == 0 || row + 1 == rows || col == 0 || col + 1 == cols {
                    grid.set(row, col, Tile::Solid);
                }
            }
        }
        grid
    }

    /// Parse a text layout, one string per row (see `Tile::from_glyph`)
    pub fn from_ascii(lines: &[&str]) -> Result<Self, GridError> {
        let rows = lines.len();
        let cols = lines.first().ok_or(GridError::Empty)?.chars().count();
        let mut cells = Vec::with_capacity(rows * cols);

        for (row, line) in lines.iter().enumerate() {
            let actual = line.chars().count();
            if actual != cols {
                return Err(GridError::RaggedRow {
                    row,
                    expected: cols,
                    actual,
                });
            }
            for (col, glyph) in line.chars().enumerate() {
                let tile =
                    Tile::from_glyph(glyph).ok_or(GridError::UnknownGlyph { glyph, row, col })?;
                cells.push(tile);
            }
        }

        Ok(Self { rows, cols, cells })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn contains(&self, row: i32, col: i32) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.rows && (col as usize) < self.cols
    }

    /// Bounds-checked lookup; off-grid cells are `Empty`
    #[inline]
    pub fn tile_at(&self, row: i32, col: i32) -> Tile {
        if self.contains(row, col) {
            self.cells[row as usize * self.cols + col as usize]
        } else {
            Tile::Empty
        }
    }

    #[inline]
    pub fn tile(&self, cell: CellCoord) -> Tile {
        self.tile_at(cell.row, cell.col)
    }

    /// Write a cell. Out-of-range writes are ignored so layout code can
    /// over-draw freely.
    pub fn set(&mut self, row: usize, col: usize, tile: Tile) {
        if row < self.rows && col < self.cols {
            self.cells[row * self.cols + col] = tile;
        }
    }

    /// Clamp a coordinate into the grid
    pub fn clamp(&self, cell: CellCoord) -> CellCoord {
        CellCoord {
            row: cell.row.clamp(0, self.rows.saturating_sub(1) as i32),
            col: cell.col.clamp(0, self.cols.saturating_sub(1) as i32),
        }
    }

    /// Iterate every cell with its coordinate (row-major), for renderers
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, Tile)> + '_ {
        let cols = self.cols;
        self.cells.iter().enumerate().map(move |(i, &tile)| {
            (CellCoord::new((i / cols) as i32, (i % cols) as i32), tile)
        })
    }

    /// Text dump in the same glyphs `from_ascii` accepts
    pub fn to_ascii(&self) -> Vec<String> {
        self.cells
            .chunks(self.cols.max(1))
            .map(|row| row.iter().map(|t| t.glyph()).collect())
            .collect()
    }
}
