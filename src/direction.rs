use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// One-cell step in grid coordinates; y grows downwards.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// A turn is legal unless it is a 180 degree reversal or no change at all.
    pub fn can_turn_to(&self, new_direction: Direction) -> bool {
        new_direction != *self && new_direction != self.opposite()
    }
}

/// Holds at most one pending turn between movement steps.
///
/// Stacking two turns inside one step could turn Right into Up into Left and
/// reverse the snake onto itself, so a second request is dropped until the
/// pending one has been consumed.
#[derive(Debug, Default, Clone)]
pub struct DirectionQueue {
    pending: Option<Direction>,
}

impl DirectionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `direction` if nothing is pending. Returns whether it was accepted.
    pub fn enqueue(&mut self, direction: Direction) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.pending = Some(direction);
        true
    }

    /// Pops the pending turn and returns the heading to move in.
    pub fn dequeue_and_apply(&mut self, current: Direction) -> Direction {
        match self.pending.take() {
            Some(next) if current.can_turn_to(next) => next,
            _ => current,
        }
    }

    pub fn pending(&self) -> Option<Direction> {
        self.pending
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }
}
