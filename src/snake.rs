use crate::direction::Direction;
use crate::grid::{Cell, GridConfig, Position};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

pub const START_LENGTH: usize = 4;

/// What happens when the head leaves the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Boundary {
    /// Re-enter from the opposite edge.
    #[default]
    Wrap,
    /// Keep going off the grid; the wall check ends the game.
    Solid,
}

/// The snake body as pixel-space cell centres, head first.
#[derive(Debug, Clone)]
pub struct Snake {
    positions: VecDeque<Position>,
    direction: Direction,
    growing: bool,
}

impl Snake {
    /// A four segment snake on the centre cell, heading right with its tail
    /// trailing to the left.
    pub fn new(grid: &GridConfig) -> Self {
        let head = grid.center_cell();
        let cells: Vec<Cell> = (0..START_LENGTH as i32)
            .map(|i| head.offset(-i, 0))
            .collect();
        Self::from_cells(grid, &cells, Direction::Right)
    }

    /// Builds a snake from grid cells, head first.
    ///
    /// # Panics
    ///
    /// Panics if `cells` is empty.
    pub fn from_cells(grid: &GridConfig, cells: &[Cell], direction: Direction) -> Self {
        assert!(!cells.is_empty(), "a snake needs at least one segment");
        Snake {
            positions: cells.iter().map(|&cell| grid.to_pixel(cell)).collect(),
            direction,
            growing: false,
        }
    }

    /// Moves one cell in the current heading.
    ///
    /// The new head is prepended. The tail is dropped unless a growth was
    /// pending, in which case the flag is cleared and the body gets one longer.
    pub fn step(&mut self, grid: &GridConfig, boundary: Boundary) {
        let (dx, dy) = self.direction.delta();
        let next = grid.to_grid(self.head()).offset(dx, dy);
        let next = match boundary {
            Boundary::Wrap => grid.wrap(next),
            Boundary::Solid => next,
        };

        self.positions.push_front(grid.to_pixel(next));

        if self.growing {
            self.growing = false;
        } else {
            self.positions.pop_back();
        }
    }

    /// Defers one extra segment to the next step. Calling this again before
    /// that step still yields a single segment.
    pub fn mark_growing(&mut self) {
        self.growing = true;
    }

    pub fn is_growing(&self) -> bool {
        self.growing
    }

    pub fn head(&self) -> Position {
        self.positions[0]
    }

    /// Everything behind the head.
    pub fn body(&self) -> impl Iterator<Item = &Position> {
        self.positions.iter().skip(1)
    }

    pub fn positions(&self) -> &VecDeque<Position> {
        &self.positions
    }

    pub fn cells<'a>(&'a self, grid: &'a GridConfig) -> impl Iterator<Item = Cell> + 'a {
        self.positions.iter().map(move |&pos| grid.to_grid(pos))
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }
}
