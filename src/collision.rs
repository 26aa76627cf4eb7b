//! Per-tick hit tests against the snake's head. All checks are read-only;
//! the session decides what a hit means.

use crate::food::FoodField;
use crate::grid::{GridConfig, Position};

/// Body segments right behind the head that never count as a self hit.
const SELF_SKIP: usize = 3;
const SELF_RADIUS_FACTOR: f32 = 0.8;

/// Index of the food item the head is on, if any.
///
/// An item is hit when any of its cell centres is strictly closer than half a
/// cell to the head. Items are tested in placement order and the first hit
/// wins, so if two items ever share a pickup radius the older one is eaten.
pub fn check_food(head: Position, field: &FoodField, grid: &GridConfig) -> Option<usize> {
    let radius = grid.cell_size() / 2.0;
    field.items().iter().position(|item| {
        item.cells()
            .any(|cell| grid.to_pixel(cell).distance(head) < radius)
    })
}

/// Whether the head is within `margin` of any canvas edge.
pub fn check_wall(head: Position, canvas_width: f32, canvas_height: f32, margin: f32) -> bool {
    head.x < margin
        || head.x > canvas_width - margin
        || head.y < margin
        || head.y > canvas_height - margin
}

/// Whether the head overlaps the body, ignoring the three segments right
/// behind it. `body` excludes the head.
pub fn check_self<'a>(
    head: Position,
    body: impl IntoIterator<Item = &'a Position>,
    snake_size: f32,
) -> bool {
    let radius = snake_size * SELF_RADIUS_FACTOR;
    body.into_iter()
        .skip(SELF_SKIP)
        .any(|segment| segment.distance(head) < radius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::food::FoodItem;
    use crate::grid::Cell;

    fn grid() -> GridConfig {
        GridConfig::with_size(25).unwrap()
    }

    fn field_with(grid: &GridConfig, items: &[(i32, i32, bool)]) -> FoodField {
        let mut field = FoodField::new();
        for &(x, y, long) in items {
            field.place(FoodItem::new(Cell::new(x, y), long, grid));
        }
        field
    }

    #[test]
    fn test_food_hit_on_same_cell() {
        let grid = grid();
        let field = field_with(&grid, &[(3, 3, false), (13, 12, false)]);
        assert_eq!(check_food(Position::new(270.0, 250.0), &field, &grid), Some(1));
    }

    #[test]
    fn test_food_miss_on_neighbour_cell() {
        let grid = grid();
        let field = field_with(&grid, &[(13, 12, false)]);
        assert_eq!(check_food(Position::new(250.0, 250.0), &field, &grid), None);
        assert_eq!(check_food(Position::new(270.0, 270.0), &field, &grid), None);
    }

    #[test]
    fn test_pickup_radius_is_strict() {
        let grid = grid();
        let field = field_with(&grid, &[(13, 12, false)]);
        // Centre is (270, 250), radius 10.
        assert_eq!(check_food(Position::new(279.9, 250.0), &field, &grid), Some(0));
        assert_eq!(check_food(Position::new(280.0, 250.0), &field, &grid), None);
    }

    #[test]
    fn test_long_food_hit_on_either_cell() {
        let grid = grid();
        let field = field_with(&grid, &[(5, 5, true)]);
        let left = grid.to_pixel(Cell::new(5, 5));
        let right = grid.to_pixel(Cell::new(6, 5));
        assert_eq!(check_food(left, &field, &grid), Some(0));
        assert_eq!(check_food(right, &field, &grid), Some(0));
        assert_eq!(check_food(grid.to_pixel(Cell::new(7, 5)), &field, &grid), None);
    }

    #[test]
    fn test_first_item_wins_a_tie() {
        let grid = GridConfig::with_size(5).unwrap();
        let field = field_with(&grid, &[(1, 1, false), (0, 1, true)]);
        let head = grid.to_pixel(Cell::new(1, 1));
        assert_eq!(check_food(head, &field, &grid), Some(0));

        let field = field_with(&grid, &[(0, 1, true), (1, 1, false)]);
        assert_eq!(check_food(head, &field, &grid), Some(0));
    }

    #[test]
    fn test_wall_margin() {
        let margin = 10.0;
        assert!(!check_wall(Position::new(10.0, 10.0), 500.0, 500.0, margin));
        assert!(!check_wall(Position::new(490.0, 490.0), 500.0, 500.0, margin));
        assert!(check_wall(Position::new(-10.0, 250.0), 500.0, 500.0, margin));
        assert!(check_wall(Position::new(510.0, 250.0), 500.0, 500.0, margin));
        assert!(check_wall(Position::new(250.0, -10.0), 500.0, 500.0, margin));
        assert!(check_wall(Position::new(250.0, 510.0), 500.0, 500.0, margin));
    }

    #[test]
    fn test_self_ignores_first_three_segments() {
        let grid = grid();
        let head = grid.to_pixel(Cell::new(5, 5));
        let close: Vec<Position> = [(5, 5), (5, 5), (5, 5)]
            .iter()
            .map(|&(x, y)| grid.to_pixel(Cell::new(x, y)))
            .collect();
        assert!(!check_self(head, &close, 20.0));
    }

    #[test]
    fn test_self_hit_from_fourth_segment() {
        let grid = grid();
        // A loop: head moved back into the tail's cell.
        let cells = [(6, 5), (6, 6), (5, 6), (5, 5)];
        let body: Vec<Position> = cells
            .iter()
            .map(|&(x, y)| grid.to_pixel(Cell::new(x, y)))
            .collect();
        let head = grid.to_pixel(Cell::new(5, 5));
        assert!(check_self(head, &body, 20.0));

        let head = grid.to_pixel(Cell::new(4, 5));
        assert!(!check_self(head, &body, 20.0));
    }
}
