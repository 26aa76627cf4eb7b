//! Grid geometry: the square playfield partition and the mapping between
//! pixel space (cell centres) and grid cells.

use crate::error::GridError;

/// Playfield dimensions. The cell size is always derived from the canvas width
/// and the number of cells per side, so the two can never drift apart.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridConfig {
    size: u32,
    canvas_width: f32,
    canvas_height: f32,
}

impl GridConfig {
    pub const DEFAULT_SIZE: u32 = 25;
    pub const DEFAULT_CANVAS: f32 = 500.0;

    pub fn new(size: u32, canvas_width: f32, canvas_height: f32) -> Result<Self, GridError> {
        if size == 0 {
            return Err(GridError::ZeroSize);
        }
        if !(canvas_width > 0.0 && canvas_height > 0.0) {
            return Err(GridError::CanvasTooSmall {
                width: canvas_width,
                height: canvas_height,
            });
        }
        Ok(GridConfig {
            size,
            canvas_width,
            canvas_height,
        })
    }

    /// A grid of `size` cells per side on the default 500x500 canvas.
    pub fn with_size(size: u32) -> Result<Self, GridError> {
        Self::new(size, Self::DEFAULT_CANVAS, Self::DEFAULT_CANVAS)
    }

    /// Same canvas, different number of cells.
    pub fn resized(&self, size: u32) -> Result<Self, GridError> {
        Self::new(size, self.canvas_width, self.canvas_height)
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn cell_size(&self) -> f32 {
        self.canvas_width / self.size as f32
    }

    pub fn canvas_width(&self) -> f32 {
        self.canvas_width
    }

    pub fn canvas_height(&self) -> f32 {
        self.canvas_height
    }

    pub fn center_cell(&self) -> Cell {
        let mid = (self.size / 2) as i32;
        Cell { x: mid, y: mid }
    }

    pub fn contains(&self, cell: Cell) -> bool {
        let size = self.size as i32;
        (0..size).contains(&cell.x) && (0..size).contains(&cell.y)
    }

    pub fn to_grid(&self, pos: Position) -> Cell {
        to_grid(pos, self.cell_size())
    }

    pub fn to_pixel(&self, cell: Cell) -> Position {
        to_pixel(cell, self.cell_size())
    }

    pub fn wrap(&self, cell: Cell) -> Cell {
        Cell {
            x: wrap(cell.x, self.size),
            y: wrap(cell.y, self.size),
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            size: Self::DEFAULT_SIZE,
            canvas_width: Self::DEFAULT_CANVAS,
            canvas_height: Self::DEFAULT_CANVAS,
        }
    }
}

/// A point in pixel space. Gameplay positions are always cell centres.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Position { x, y }
    }

    pub fn distance(&self, other: Position) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Integer grid coordinates. May lie outside the grid transiently, before wrapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Cell { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Cell {
        Cell {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Maps a pixel position to the cell whose centre is nearest.
///
/// Uses `round` on `(p - cell/2) / cell`, so anything strictly within half a
/// cell of a centre maps to that cell.
pub fn to_grid(pos: Position, cell_size: f32) -> Cell {
    let half = cell_size / 2.0;
    Cell {
        x: ((pos.x - half) / cell_size).round() as i32,
        y: ((pos.y - half) / cell_size).round() as i32,
    }
}

/// Centre of `cell` in pixel space.
pub fn to_pixel(cell: Cell, cell_size: f32) -> Position {
    let half = cell_size / 2.0;
    Position {
        x: cell.x as f32 * cell_size + half,
        y: cell.y as f32 * cell_size + half,
    }
}

/// Toroidal wrap for a single step: below zero re-enters at the far edge,
/// past the far edge re-enters at zero.
pub fn wrap(coord: i32, size: u32) -> i32 {
    let size = size as i32;
    if coord < 0 {
        size - 1
    } else if coord >= size {
        0
    } else {
        coord
    }
}
