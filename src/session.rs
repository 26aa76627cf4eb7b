//! One game of snake, start to finish.
//!
//! `GameSession` owns the snake, the food and the score. Every mutation goes
//! through it; renderers only get shared references.

use crate::catalog::{FoodCatalog, SpriteCatalog};
use crate::collision;
use crate::direction::{Direction, DirectionQueue};
use crate::error::GridError;
use crate::food::{FoodField, FoodItem};
use crate::grid::{Cell, GridConfig};
use crate::score::{self, NullScoreStore, ScoreStore, Scoreboard};
use crate::snake::{Boundary, Snake};
use log::{debug, error, info};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// Which game-over rules are in force.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rules {
    /// `Wrap` moves through the edges; `Solid` ends the game at them.
    pub boundary: Boundary,
    pub self_collision: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Menu,
    Running,
    Paused,
    GameOver,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Moved { head: Cell },
    Ate { points: u32, long: bool },
    GameOver { score: u32, new_high_score: bool },
}

pub struct GameSession {
    grid: GridConfig,
    rules: Rules,
    snake: Snake,
    food: FoodField,
    queue: DirectionQueue,
    scores: Scoreboard,
    status: Status,
    catalog: Box<dyn FoodCatalog>,
    store: Box<dyn ScoreStore>,
    rng: Box<dyn RngCore>,
}

impl GameSession {
    pub fn new(
        grid: GridConfig,
        rules: Rules,
        catalog: Box<dyn FoodCatalog>,
        store: Box<dyn ScoreStore>,
        rng: Box<dyn RngCore>,
    ) -> Self {
        let high_score = score::load_high_score(store.as_ref());
        GameSession {
            grid,
            rules,
            snake: Snake::new(&grid),
            food: FoodField::new(),
            queue: DirectionQueue::new(),
            scores: Scoreboard::new(high_score),
            status: Status::Menu,
            catalog,
            store,
            rng,
        }
    }

    /// Plain coloured food, no high score persistence.
    pub fn with_defaults(grid: GridConfig) -> Self {
        Self::new(
            grid,
            Rules::default(),
            Box::new(SpriteCatalog::default_foods()),
            Box::new(NullScoreStore),
            Box::new(StdRng::from_entropy()),
        )
    }

    /// Puts a fresh snake in the middle and clears food, queue and score.
    pub fn reset(&mut self) {
        self.snake = Snake::new(&self.grid);
        self.food.clear();
        self.queue.clear();
        self.scores.reset();
    }

    pub fn start(&mut self) {
        self.reset();
        self.status = Status::Running;
        self.refill_food();
        info!(
            "Started game on a {0}x{0} grid, {1} food placed",
            self.grid.size(),
            self.food.len()
        );
    }

    /// Queues a turn for the next step. Ignored unless the game is running.
    pub fn enqueue_direction(&mut self, direction: Direction) -> bool {
        if self.status != Status::Running {
            return false;
        }
        self.queue.enqueue(direction)
    }

    /// Advances the game by one movement step.
    pub fn tick(&mut self) -> Vec<GameEvent> {
        if self.status != Status::Running {
            return Vec::new();
        }

        let mut events = Vec::with_capacity(2);

        let heading = self.queue.dequeue_and_apply(self.snake.direction());
        self.snake.set_direction(heading);
        self.snake.step(&self.grid, self.rules.boundary);
        events.push(GameEvent::Moved {
            head: self.grid.to_grid(self.snake.head()),
        });

        if let Some(over) = self.check_wall().or_else(|| self.check_self()) {
            events.push(over);
            return events;
        }

        if let Some(ate) = self.check_food() {
            events.push(ate);
        }

        if !self.food.is_full() {
            self.refill_food();
        }

        events
    }

    /// Eats the food under the head, if any, and places a replacement.
    pub fn check_food(&mut self) -> Option<GameEvent> {
        let index = collision::check_food(self.snake.head(), &self.food, &self.grid)?;
        let item = self.food.remove(index);
        let points = item.points();

        self.scores.add(points);
        self.snake.mark_growing();
        debug!(
            "Ate {} food at ({}, {}) for {} points",
            if item.is_long() { "long" } else { "short" },
            item.grid_x,
            item.grid_y,
            points
        );
        self.refill_food();

        Some(GameEvent::Ate {
            points,
            long: item.is_long(),
        })
    }

    /// Ends the game if walls are solid and the head is at one. A no-op when
    /// the snake wraps.
    pub fn check_wall(&mut self) -> Option<GameEvent> {
        if self.rules.boundary != Boundary::Solid {
            return None;
        }
        let margin = self.snake_size() / 2.0;
        let hit = collision::check_wall(
            self.snake.head(),
            self.grid.canvas_width(),
            self.grid.canvas_height(),
            margin,
        );
        hit.then(|| self.game_over())
    }

    /// Ends the game if self collision is on and the head ran into the body.
    pub fn check_self(&mut self) -> Option<GameEvent> {
        if !self.rules.self_collision {
            return None;
        }
        let hit = collision::check_self(self.snake.head(), self.snake.body(), self.snake_size());
        hit.then(|| self.game_over())
    }

    pub fn game_over(&mut self) -> GameEvent {
        self.status = Status::GameOver;
        self.queue.clear();

        let score = self.scores.score();
        let new_high_score = self.scores.finish();
        info!("Game over with {} points", score);
        if new_high_score {
            info!("New high score {}", score);
            if let Err(e) = self.store.save(score) {
                error!("Error saving high score: {}", e);
            }
        }

        GameEvent::GameOver {
            score,
            new_high_score,
        }
    }

    /// Pauses a running game or resumes a paused one.
    pub fn toggle_pause(&mut self) -> Status {
        self.status = match self.status {
            Status::Running => Status::Paused,
            Status::Paused => Status::Running,
            other => other,
        };
        self.status
    }

    pub fn open_menu(&mut self) {
        self.status = Status::Menu;
        self.queue.clear();
    }

    /// Switches to a grid with `size` cells per side. The snake and food are
    /// rebuilt for the new cell size; a failed resize changes nothing.
    pub fn set_grid_size(&mut self, size: u32) -> Result<(), GridError> {
        let grid = self.grid.resized(size)?;
        info!("Grid resized from {} to {}", self.grid.size(), size);
        self.grid = grid;
        self.snake = Snake::new(&self.grid);
        self.food.clear();
        self.queue.clear();
        if self.status == Status::Running {
            self.refill_food();
        }
        Ok(())
    }

    pub fn set_rules(&mut self, rules: Rules) {
        self.rules = rules;
    }

    /// Keeps `target` food items on the field instead of the usual five. Zero
    /// turns automatic spawning off.
    pub fn with_food_target(mut self, target: usize) -> Self {
        self.food = FoodField::with_target(target);
        self
    }

    /// Puts a food item on the field without placement checks.
    pub fn place_food(&mut self, item: FoodItem) {
        self.food.place(item);
    }

    fn refill_food(&mut self) {
        self.food.refill(
            &self.grid,
            &self.snake,
            self.catalog.as_ref(),
            self.rng.as_mut(),
        );
    }

    /// Snake thickness in pixels, used for the wall margin and self hits.
    pub fn snake_size(&self) -> f32 {
        self.grid.cell_size()
    }

    pub fn grid(&self) -> &GridConfig {
        &self.grid
    }

    pub fn rules(&self) -> Rules {
        self.rules
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &FoodField {
        &self.food
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn direction(&self) -> Direction {
        self.snake.direction()
    }

    pub fn score(&self) -> u32 {
        self.scores.score()
    }

    pub fn high_score(&self) -> u32 {
        self.scores.high_score()
    }

    #[cfg(test)]
    pub(crate) fn snake_mut(&mut self) -> &mut Snake {
        &mut self.snake
    }

    #[cfg(test)]
    pub(crate) fn food_mut(&mut self) -> &mut FoodField {
        &mut self.food
    }
}
