//! Grid snake: movement, food and collision rules on a square grid, with a
//! terminal front end.

pub mod catalog;
pub mod clock;
pub mod collision;
pub mod direction;
pub mod error;
pub mod food;
pub mod frontend;
pub mod game;
pub mod grid;
pub mod score;
pub mod session;
pub mod settings;
pub mod snake;
pub mod terminal;

pub use catalog::{FoodCatalog, FoodDescriptor, SpriteCatalog};
pub use direction::{Direction, DirectionQueue};
pub use food::{FoodField, FoodItem};
pub use grid::{Cell, GridConfig, Position};
pub use score::{FileScoreStore, NullScoreStore, ScoreStore, Scoreboard};
pub use session::{GameEvent, GameSession, Rules, Status};
pub use settings::Settings;
pub use snake::{Boundary, Snake};
