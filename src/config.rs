use std::time::Duration;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::input::ReversalPolicy;

/// Default grid width in cells.
pub const DEFAULT_GRID_WIDTH: u16 = 24;

/// Default grid height in cells.
pub const DEFAULT_GRID_HEIGHT: u16 = 16;

/// Starting game speed in ticks per second.
pub const DEFAULT_SPEED_START: f64 = 6.0;

/// Speed added each time a goal is eaten, in ticks per second.
pub const DEFAULT_SPEED_STEP: f64 = 0.5;

/// Score granted for a goal eaten the instant it appears.
pub const DEFAULT_GOAL_WORTH: f64 = 100.0;

/// Seconds after which a goal is worth nothing.
pub const DEFAULT_GOAL_TIMER_SECS: f64 = 7.5;

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

/// Tunable rules for one play-through.
///
/// Missing fields in a rules file fall back to the defaults above.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameRules {
    pub width: u16,
    pub height: u16,
    pub speed_start: f64,
    pub speed_step: f64,
    pub goal_worth: f64,
    pub goal_timer_secs: f64,
    pub reversal: ReversalPolicy,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
            speed_start: DEFAULT_SPEED_START,
            speed_step: DEFAULT_SPEED_STEP,
            goal_worth: DEFAULT_GOAL_WORTH,
            goal_timer_secs: DEFAULT_GOAL_TIMER_SECS,
            reversal: ReversalPolicy::Reject,
        }
    }
}

impl GameRules {
    #[must_use]
    pub fn grid_size(&self) -> GridSize {
        GridSize {
            width: self.width,
            height: self.height,
        }
    }

    /// Decay window of the goal bonus; negative or non-finite values collapse to zero.
    #[must_use]
    pub fn goal_timer(&self) -> Duration {
        Duration::try_from_secs_f64(self.goal_timer_secs).unwrap_or(Duration::ZERO)
    }

    /// Checks that the rules describe a playable session.
    ///
    /// The grid must fit the two-cell vertical starting body plus one goal.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.width < 1 || self.height < 2 || self.grid_size().total_cells() < 3 {
            return Err(GameError::InvalidGrid {
                width: self.width,
                height: self.height,
            });
        }

        if !self.speed_start.is_finite() || self.speed_start <= 0.0 {
            return Err(GameError::InvalidSpeed(self.speed_start));
        }

        if !self.speed_step.is_finite() || self.speed_step < 0.0 {
            return Err(GameError::InvalidSpeed(self.speed_step));
        }

        Ok(())
    }
}

/// Width of one logical cell in terminal columns.
pub const CELL_COLUMNS: u16 = 2;

/// Glyph drawn for every occupied cell.
pub const GLYPH_CELL: &str = "██";

/// Glyph drawn for goal cells.
pub const GLYPH_GOAL: &str = "▐▌";

pub const COLOR_BG_PRIMARY: Color = Color::Rgb(100, 100, 100);
pub const COLOR_BG_SECONDARY: Color = Color::Rgb(80, 80, 80);
pub const COLOR_GOAL: Color = Color::Rgb(255, 255, 255);
pub const COLOR_SNAKE_HEAD: Color = Color::Rgb(200, 100, 100);
pub const COLOR_TEXT: Color = Color::Rgb(140, 140, 140);
pub const COLOR_TEXT_BAD: Color = Color::Rgb(255, 80, 80);

/// Body colour before the per-segment tail fade is applied.
pub const SNAKE_BODY_RGB: (u8, u8, u8) = (100, 200, 100);

/// Per-segment darkening applied from head toward tail.
pub const SNAKE_BODY_FADE_STEP: u8 = 6;

/// Frame pacing of the driver loop.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);
