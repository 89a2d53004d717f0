use std::time::{Duration, Instant};

use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::{GameRules, GridSize};
use crate::error::GameError;
use crate::grid::{Cell, GridWorld, random_free_cell};
use crate::input::Direction;
use crate::snake::{ScoreRules, Snake, SnakeStatus};

/// One play-through: the board, the snake and the pacing that goes with them.
#[derive(Debug, Clone)]
pub struct GameSession {
    world: GridWorld,
    snake: Snake,
    rules: GameRules,
    speed: f64,
    is_over: bool,
    just_died: bool,
    rng: StdRng,
}

impl GameSession {
    /// Creates a session and performs the initial reset.
    pub fn new(rules: GameRules, rng: StdRng) -> Result<Self, GameError> {
        rules.validate()?;

        let now = Instant::now();
        let size = rules.grid_size();
        let mut session = Self {
            world: GridWorld::new(size),
            snake: Snake::new(size, ScoreRules::from_rules(&rules), now),
            rules,
            speed: rules.speed_start,
            is_over: false,
            just_died: false,
            rng,
        };
        session.request_reset_at(now)?;
        Ok(session)
    }

    /// Creates a deterministic session for tests and reproducible runs.
    pub fn with_seed(rules: GameRules, seed: u64) -> Result<Self, GameError> {
        Self::new(rules, StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy(rules: GameRules) -> Result<Self, GameError> {
        Self::new(rules, StdRng::from_entropy())
    }

    /// Queues `direction` unless the reversal policy forbids it.
    ///
    /// Returns whether the direction was queued.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        let last = self.snake.last_queued_direction();
        if !self.rules.reversal.permits(last, direction) {
            return false;
        }

        self.snake.queue_direction(direction);
        true
    }

    pub fn request_reset(&mut self) -> Result<(), GameError> {
        self.request_reset_at(Instant::now())
    }

    /// Starts a fresh run: empty board, starting snake, one goal, base speed.
    pub fn request_reset_at(&mut self, now: Instant) -> Result<(), GameError> {
        self.world.clear();
        self.snake.reset(self.world.size(), now);
        self.speed = self.rules.speed_start;
        self.is_over = false;
        self.just_died = false;

        self.place_random_food()?;
        debug!("session reset on a {}x{} grid", self.rules.width, self.rules.height);
        Ok(())
    }

    /// Ends the run on request; the driver sees it as a death.
    pub fn force_game_over(&mut self) {
        if self.is_over {
            return;
        }

        self.snake.mark_game_over();
        self.is_over = true;
        self.just_died = true;
        info!("game over forced with score {:.0}", self.snake.score());
    }

    pub fn tick(&mut self) -> SnakeStatus {
        self.tick_at(Instant::now())
    }

    /// Advances the game by one step; frozen once the run is over.
    pub fn tick_at(&mut self, now: Instant) -> SnakeStatus {
        if self.is_over {
            return self.snake.status();
        }

        let status = self.snake.advance(&mut self.world, now);
        match status {
            SnakeStatus::Scored => {
                self.speed += self.rules.speed_step;
                if let Err(error) = self.place_random_food() {
                    warn!("{error}; continuing without a goal");
                }
            }
            SnakeStatus::JustDied => {
                self.just_died = true;
                info!(
                    "snake hit itself at {} with score {:.0}",
                    self.snake.head(),
                    self.snake.score()
                );
            }
            SnakeStatus::GameOver => {
                self.is_over = true;
            }
            SnakeStatus::Normal => {}
        }

        status
    }

    /// Returns true once per death, then false until the next one.
    pub fn take_just_died(&mut self) -> bool {
        std::mem::take(&mut self.just_died)
    }

    fn place_random_food(&mut self) -> Result<Cell, GameError> {
        let snake = &self.snake;
        let world = &self.world;
        let cell = random_free_cell(&mut self.rng, world.size(), |cell| {
            snake.occupies(cell) || world.has_food_at(cell)
        })?;

        self.world.place_food(cell)?;
        Ok(cell)
    }

    /// Time between ticks at the current speed.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.speed)
    }

    /// Ticks per second.
    #[must_use]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    #[must_use]
    pub fn status(&self) -> SnakeStatus {
        self.snake.status()
    }

    #[must_use]
    pub fn score(&self) -> f64 {
        self.snake.score()
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.is_over
    }

    #[must_use]
    pub fn size(&self) -> GridSize {
        self.world.size()
    }

    #[must_use]
    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    /// Body cells from tail to head.
    #[must_use]
    pub fn body_segments(&self) -> Vec<Cell> {
        self.snake.segments().copied().collect()
    }

    #[must_use]
    pub fn goal_cells(&self) -> Vec<Cell> {
        self.world.goal_cells()
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    /// Mutable board access for scripted scenarios.
    pub fn world_mut(&mut self) -> &mut GridWorld {
        &mut self.world
    }

    /// Swaps in a prepared snake, e.g. a mid-game body for a scenario.
    pub fn replace_snake(&mut self, snake: Snake) {
        self.snake = snake;
    }
}
