use crate::catalog::{FoodCatalog, FoodDescriptor};
use crate::grid::{Cell, GridConfig, Position};
use crate::snake::Snake;
use log::{debug, warn};
use rand::{Rng, RngCore};

/// Number of food items kept on the field at once.
pub const TARGET_COUNT: usize = 5;
/// Random placements tried before `spawn` gives up.
pub const MAX_ATTEMPTS: usize = 100;

pub const POINTS_SHORT: u32 = 10;
pub const POINTS_LONG: u32 = 15;

/// A food item anchored at its leftmost cell. Long food also covers the cell
/// to its right.
#[derive(Clone, Debug, PartialEq)]
pub struct FoodItem {
    pub grid_x: i32,
    pub grid_y: i32,
    pub width: u32,
    pub height: u32,
    /// Drawn size in pixels.
    pub size: f32,
    pub look: Option<FoodDescriptor>,
}

impl FoodItem {
    pub fn new(cell: Cell, is_long: bool, grid: &GridConfig) -> Self {
        FoodItem {
            grid_x: cell.x,
            grid_y: cell.y,
            width: if is_long { 2 } else { 1 },
            height: 1,
            size: (grid.cell_size() - 2.0).max(4.0),
            look: None,
        }
    }

    pub fn with_look(mut self, look: Option<FoodDescriptor>) -> Self {
        self.look = look;
        self
    }

    pub fn is_long(&self) -> bool {
        self.width > 1
    }

    pub fn origin(&self) -> Cell {
        Cell::new(self.grid_x, self.grid_y)
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let origin = self.origin();
        (0..self.width as i32).map(move |dx| origin.offset(dx, 0))
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.cells().any(|c| c == cell)
    }

    /// Centre of the anchor cell.
    pub fn position(&self, grid: &GridConfig) -> Position {
        grid.to_pixel(self.origin())
    }

    pub fn points(&self) -> u32 {
        if self.is_long() {
            POINTS_LONG
        } else {
            POINTS_SHORT
        }
    }
}

/// The food currently on the playfield, in placement order.
#[derive(Clone, Debug)]
pub struct FoodField {
    items: Vec<FoodItem>,
    target: usize,
}

impl Default for FoodField {
    fn default() -> Self {
        Self::with_target(TARGET_COUNT)
    }
}

impl FoodField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_target(target: usize) -> Self {
        FoodField {
            items: Vec::with_capacity(target),
            target,
        }
    }

    pub fn items(&self) -> &[FoodItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn target(&self) -> usize {
        self.target
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.target
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Adds an item as is, without any placement checks.
    pub fn place(&mut self, item: FoodItem) {
        self.items.push(item);
    }

    /// Removes the item at `index`, keeping the order of the rest.
    pub fn remove(&mut self, index: usize) -> FoodItem {
        self.items.remove(index)
    }

    /// Whether `cell` is too close to the snake or already covered by food.
    ///
    /// The snake and one-cell food count as present within a quarter cell of
    /// their centre; long food blocks exactly the cells it covers.
    pub fn is_occupied(&self, grid: &GridConfig, snake: &Snake, cell: Cell) -> bool {
        let pos = grid.to_pixel(cell);
        let tolerance = grid.cell_size() / 4.0;

        if snake.positions().iter().any(|seg| seg.distance(pos) < tolerance) {
            return true;
        }

        self.items.iter().any(|food| {
            if food.is_long() {
                food.occupies(cell)
            } else {
                food.position(grid).distance(pos) < tolerance
            }
        })
    }

    /// A long food anchored at `cell` needs its right cell inside the
    /// one-cell margin and free.
    fn can_place_long(&self, grid: &GridConfig, snake: &Snake, cell: Cell) -> bool {
        let second = cell.offset(1, 0);
        if second.x >= grid.size() as i32 - 1 {
            return false;
        }
        !self.is_occupied(grid, snake, second)
    }

    /// Tries up to [`MAX_ATTEMPTS`] random cells away from the outer ring and
    /// returns the first valid item, or `None` if every attempt collided.
    pub fn spawn(
        &self,
        grid: &GridConfig,
        snake: &Snake,
        catalog: &dyn FoodCatalog,
        rng: &mut dyn RngCore,
    ) -> Option<FoodItem> {
        let size = grid.size() as i32;
        if size < 3 {
            return None;
        }

        for _ in 0..MAX_ATTEMPTS {
            let cell = Cell::new(rng.gen_range(1..size - 1), rng.gen_range(1..size - 1));
            if self.is_occupied(grid, snake, cell) {
                continue;
            }

            let look = catalog.pick(rng);
            let is_long = look.as_ref().is_some_and(|look| look.is_long);
            if is_long && !self.can_place_long(grid, snake, cell) {
                continue;
            }

            return Some(FoodItem::new(cell, is_long, grid).with_look(look));
        }

        None
    }

    /// Spawns until the field holds its target count or a spawn fails.
    /// Returns how many items were added.
    pub fn refill(
        &mut self,
        grid: &GridConfig,
        snake: &Snake,
        catalog: &dyn FoodCatalog,
        rng: &mut dyn RngCore,
    ) -> usize {
        let mut added = 0;
        while !self.is_full() {
            match self.spawn(grid, snake, catalog, rng) {
                Some(item) => {
                    debug!(
                        "Placed {} food at ({}, {})",
                        if item.is_long() { "long" } else { "short" },
                        item.grid_x,
                        item.grid_y
                    );
                    self.items.push(item);
                    added += 1;
                }
                None => {
                    warn!(
                        "No free cell found after {} attempts, field at {}/{}",
                        MAX_ATTEMPTS,
                        self.items.len(),
                        self.target
                    );
                    break;
                }
            }
        }
        added
    }
}
