use std::collections::HashSet;
use std::fmt;

use rand::Rng;

use crate::config::GridSize;
use crate::error::GameError;
use crate::input::Direction;

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true when the cell lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns this cell wrapped into bounds on both axes.
    #[must_use]
    pub fn wrapped(self, bounds: GridSize) -> Self {
        Self {
            x: self.x.rem_euclid(i32::from(bounds.width)),
            y: self.y.rem_euclid(i32::from(bounds.height)),
        }
    }

    /// Returns the neighbouring cell in `direction`, re-entering from the
    /// opposite edge when the step leaves the grid.
    #[must_use]
    pub fn step(self, direction: Direction, bounds: GridSize) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
        .wrapped(bounds)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Fixed-size board tracking which cells hold a goal.
#[derive(Debug, Clone)]
pub struct GridWorld {
    size: GridSize,
    goals: HashSet<Cell>,
}

impl GridWorld {
    #[must_use]
    pub fn new(size: GridSize) -> Self {
        Self {
            size,
            goals: HashSet::new(),
        }
    }

    #[must_use]
    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Adds a goal at `cell`.
    pub fn place_food(&mut self, cell: Cell) -> Result<(), GameError> {
        if !cell.is_within_bounds(self.size) {
            return Err(GameError::OutOfBounds { cell });
        }

        if !self.goals.insert(cell) {
            return Err(GameError::AlreadyOccupied { cell });
        }

        Ok(())
    }

    #[must_use]
    pub fn has_food_at(&self, cell: Cell) -> bool {
        self.goals.contains(&cell)
    }

    /// Removes the goal at `cell`.
    pub fn remove_food_at(&mut self, cell: Cell) -> Result<(), GameError> {
        if self.goals.remove(&cell) {
            Ok(())
        } else {
            Err(GameError::NotFound { cell })
        }
    }

    /// Drops every goal on the board.
    pub fn clear(&mut self) {
        self.goals.clear();
    }

    /// Goal cells in row-major order.
    #[must_use]
    pub fn goal_cells(&self) -> Vec<Cell> {
        let mut cells: Vec<Cell> = self.goals.iter().copied().collect();
        cells.sort_by_key(|cell| (cell.y, cell.x));
        cells
    }

    #[must_use]
    pub fn goal_count(&self) -> usize {
        self.goals.len()
    }
}

/// Picks a uniformly random cell for which `is_taken` returns false.
///
/// Candidates are enumerated up front, so a crowded board costs one scan
/// rather than an unbounded number of retries.
pub fn random_free_cell<R, F>(
    rng: &mut R,
    bounds: GridSize,
    is_taken: F,
) -> Result<Cell, GameError>
where
    R: Rng + ?Sized,
    F: Fn(Cell) -> bool,
{
    let mut candidates = Vec::with_capacity(bounds.total_cells());

    for y in 0..i32::from(bounds.height) {
        for x in 0..i32::from(bounds.width) {
            let cell = Cell { x, y };
            if !is_taken(cell) {
                candidates.push(cell);
            }
        }
    }

    if candidates.is_empty() {
        return Err(GameError::NoFreeCell {
            width: bounds.width,
            height: bounds.height,
        });
    }

    let index = rng.gen_range(0..candidates.len());
    Ok(candidates[index])
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::{Cell, GridWorld, random_free_cell};
    use crate::config::GridSize;
    use crate::error::GameError;
    use crate::input::Direction;

    const BOUNDS: GridSize = GridSize {
        width: 24,
        height: 16,
    };

    #[test]
    fn stepping_off_an_edge_wraps_to_the_opposite_edge() {
        assert_eq!(Cell::new(0, 5).step(Direction::Left, BOUNDS), Cell::new(23, 5));
        assert_eq!(Cell::new(23, 5).step(Direction::Right, BOUNDS), Cell::new(0, 5));
        assert_eq!(Cell::new(4, 0).step(Direction::Up, BOUNDS), Cell::new(4, 15));
        assert_eq!(Cell::new(4, 15).step(Direction::Down, BOUNDS), Cell::new(4, 0));
    }

    #[test]
    fn interior_steps_do_not_wrap() {
        assert_eq!(Cell::new(12, 7).step(Direction::Right, BOUNDS), Cell::new(13, 7));
        assert_eq!(Cell::new(12, 7).step(Direction::Up, BOUNDS), Cell::new(12, 6));
    }

    #[test]
    fn placing_food_outside_the_grid_fails() {
        let mut world = GridWorld::new(BOUNDS);

        for cell in [Cell::new(-1, 0), Cell::new(24, 0), Cell::new(0, 16)] {
            assert_eq!(world.place_food(cell), Err(GameError::OutOfBounds { cell }));
        }
        assert_eq!(world.goal_count(), 0);
    }

    #[test]
    fn placing_food_twice_on_one_cell_fails() {
        let mut world = GridWorld::new(BOUNDS);
        let cell = Cell::new(3, 4);

        world.place_food(cell).expect("first placement should succeed");

        assert_eq!(world.place_food(cell), Err(GameError::AlreadyOccupied { cell }));
        assert_eq!(world.goal_count(), 1);
    }

    #[test]
    fn removing_missing_food_fails() {
        let mut world = GridWorld::new(BOUNDS);
        let cell = Cell::new(3, 4);

        assert_eq!(world.remove_food_at(cell), Err(GameError::NotFound { cell }));

        world.place_food(cell).expect("placement should succeed");
        assert!(world.has_food_at(cell));
        assert_eq!(world.remove_food_at(cell), Ok(()));
        assert!(!world.has_food_at(cell));
    }

    #[test]
    fn goal_cells_are_row_major_and_clear_empties_them() {
        let mut world = GridWorld::new(BOUNDS);
        world.place_food(Cell::new(5, 2)).expect("placement should succeed");
        world.place_food(Cell::new(1, 2)).expect("placement should succeed");
        world.place_food(Cell::new(9, 0)).expect("placement should succeed");

        assert_eq!(
            world.goal_cells(),
            vec![Cell::new(9, 0), Cell::new(1, 2), Cell::new(5, 2)]
        );

        world.clear();
        assert!(world.goal_cells().is_empty());
    }

    #[test]
    fn random_free_cell_never_returns_a_taken_cell() {
        let mut rng = StdRng::seed_from_u64(7);
        let bounds = GridSize {
            width: 8,
            height: 6,
        };
        let taken = |cell: Cell| cell.y == 0 || cell.x == 3;

        for _ in 0..100 {
            let cell = random_free_cell(&mut rng, bounds, taken).expect("board has free cells");
            assert!(!taken(cell));
            assert!(cell.is_within_bounds(bounds));
        }
    }

    #[test]
    fn random_free_cell_finds_the_last_free_cell() {
        let mut rng = StdRng::seed_from_u64(11);
        let bounds = GridSize {
            width: 4,
            height: 4,
        };
        let free = Cell::new(2, 3);

        let cell = random_free_cell(&mut rng, bounds, |cell| cell != free)
            .expect("one free cell remains");

        assert_eq!(cell, free);
    }

    #[test]
    fn full_board_reports_no_free_cell() {
        let mut rng = StdRng::seed_from_u64(1);
        let bounds = GridSize {
            width: 3,
            height: 2,
        };

        assert_eq!(
            random_free_cell(&mut rng, bounds, |_| true),
            Err(GameError::NoFreeCell {
                width: 3,
                height: 2
            })
        );
    }
}
