use std::collections::VecDeque;
use std::time::{Duration, Instant};

use log::debug;

use crate::config::{DEFAULT_GOAL_TIMER_SECS, DEFAULT_GOAL_WORTH, GameRules, GridSize};
use crate::grid::{Cell, GridWorld};
use crate::input::Direction;

/// Direction the snake faces after a reset.
pub const START_DIRECTION: Direction = Direction::Right;

/// Outcome of the most recent tick.
///
/// `Normal` and `Scored` describe a single tick only. `JustDied` lasts exactly
/// one tick before turning into `GameOver`, which holds until a reset.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SnakeStatus {
    Normal,
    Scored,
    JustDied,
    GameOver,
}

impl SnakeStatus {
    #[must_use]
    pub fn is_dead(self) -> bool {
        matches!(self, Self::JustDied | Self::GameOver)
    }
}

/// Time-decayed value of a goal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreRules {
    goal_worth: f64,
    goal_timer: Duration,
}

impl Default for ScoreRules {
    fn default() -> Self {
        Self::new(
            DEFAULT_GOAL_WORTH,
            Duration::from_secs_f64(DEFAULT_GOAL_TIMER_SECS),
        )
    }
}

impl ScoreRules {
    /// Negative or NaN worth is treated as zero so scores never shrink.
    #[must_use]
    pub fn new(goal_worth: f64, goal_timer: Duration) -> Self {
        Self {
            goal_worth: goal_worth.max(0.0),
            goal_timer,
        }
    }

    #[must_use]
    pub fn from_rules(rules: &GameRules) -> Self {
        Self::new(rules.goal_worth, rules.goal_timer())
    }

    /// Bonus for a goal reached `elapsed` after the previous one.
    ///
    /// Falls linearly from the full worth at zero to nothing once the goal
    /// timer has run out.
    #[must_use]
    pub fn bonus(&self, elapsed: Duration) -> f64 {
        let window = self.goal_timer.as_secs_f64();
        if window <= 0.0 {
            return 0.0;
        }

        let elapsed = elapsed.as_secs_f64().min(window);
        self.goal_worth * (window - elapsed) / window
    }
}

/// Snake body, steering queue and score.
#[derive(Debug, Clone)]
pub struct Snake {
    /// Tail at the front, head at the back.
    body: VecDeque<Cell>,
    /// Never empty; the front entry steers the next move.
    pending: VecDeque<Direction>,
    score: f64,
    status: SnakeStatus,
    last_score_at: Instant,
    score_rules: ScoreRules,
}

impl Snake {
    /// Creates a snake in its starting pose for a grid of `size`.
    #[must_use]
    pub fn new(size: GridSize, score_rules: ScoreRules, now: Instant) -> Self {
        let mut snake = Self {
            body: VecDeque::with_capacity(2),
            pending: VecDeque::new(),
            score: 0.0,
            status: SnakeStatus::Normal,
            last_score_at: now,
            score_rules,
        };
        snake.reset(size, now);
        snake
    }

    /// Creates a snake from explicit segments ordered tail to head.
    ///
    /// # Panics
    ///
    /// Panics when `segments` is empty.
    #[must_use]
    pub fn from_segments(
        segments: Vec<Cell>,
        direction: Direction,
        score_rules: ScoreRules,
        now: Instant,
    ) -> Self {
        assert!(!segments.is_empty(), "snake needs at least one segment");

        Self {
            body: VecDeque::from(segments),
            pending: VecDeque::from([direction]),
            score: 0.0,
            status: SnakeStatus::Normal,
            last_score_at: now,
            score_rules,
        }
    }

    /// Restores the two-cell starting body centred on the grid.
    pub fn reset(&mut self, size: GridSize, now: Instant) {
        let mid_x = i32::from(size.width / 2);
        let mid_y = i32::from(size.height / 2);

        self.body.clear();
        self.body.push_back(Cell::new(mid_x, mid_y));
        self.body.push_back(Cell::new(mid_x, mid_y - 1));

        self.pending.clear();
        self.pending.push_back(START_DIRECTION);

        self.score = 0.0;
        self.status = SnakeStatus::Normal;
        self.last_score_at = now;
    }

    /// Appends `direction` to the steering queue.
    ///
    /// No reversal check happens here; see [`crate::input::ReversalPolicy`].
    pub fn queue_direction(&mut self, direction: Direction) {
        self.pending.push_back(direction);
    }

    /// Applies one movement step and returns the resulting status.
    pub fn advance(&mut self, world: &mut GridWorld, now: Instant) -> SnakeStatus {
        match self.status {
            SnakeStatus::GameOver => return self.status,
            SnakeStatus::JustDied => {
                self.status = SnakeStatus::GameOver;
                return self.status;
            }
            SnakeStatus::Normal | SnakeStatus::Scored => {}
        }

        let direction = self.current_direction();
        if self.pending.len() > 1 {
            let _ = self.pending.pop_front();
        }

        let next_head = self.head().step(direction, world.size());
        self.body.push_back(next_head);

        if world.has_food_at(next_head) && world.remove_food_at(next_head).is_ok() {
            let elapsed = now.saturating_duration_since(self.last_score_at);
            let bonus = self.score_rules.bonus(elapsed);
            self.score += bonus;
            self.last_score_at = now;
            self.status = SnakeStatus::Scored;
            debug!("goal at {next_head} eaten after {elapsed:?}, +{bonus:.1}");
        } else {
            let _ = self.body.pop_front();
            self.status = SnakeStatus::Normal;
        }

        if self.head_overlaps_body() {
            self.status = SnakeStatus::JustDied;
        }

        self.status
    }

    /// Ends the run immediately, skipping the `JustDied` tick.
    pub fn mark_game_over(&mut self) {
        self.status = SnakeStatus::GameOver;
    }

    /// Returns the current head cell.
    #[must_use]
    pub fn head(&self) -> Cell {
        *self
            .body
            .back()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns true if the head overlaps any non-head segment.
    #[must_use]
    pub fn head_overlaps_body(&self) -> bool {
        let head = self.head();
        self.body.iter().rev().skip(1).any(|segment| *segment == head)
    }

    /// Returns true if any segment occupies `cell`.
    #[must_use]
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Direction applied on the next move.
    #[must_use]
    pub fn current_direction(&self) -> Direction {
        self.pending.front().copied().unwrap_or(START_DIRECTION)
    }

    /// Most recently queued direction.
    #[must_use]
    pub fn last_queued_direction(&self) -> Direction {
        self.pending.back().copied().unwrap_or(START_DIRECTION)
    }

    pub fn pending_directions(&self) -> impl Iterator<Item = &Direction> {
        self.pending.iter()
    }

    /// Iterates over body segments from tail to head.
    pub fn segments(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    #[must_use]
    pub fn score(&self) -> f64 {
        self.score
    }

    #[must_use]
    pub fn status(&self) -> SnakeStatus {
        self.status
    }
}
