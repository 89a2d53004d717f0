//! Grid-based Snake with wraparound edges and a time-decaying score bonus.
//!
//! The game core lives in [`grid`], [`snake`] and [`game`]; everything else is
//! the terminal front end that drives it.

pub mod config;
pub mod error;
pub mod game;
pub mod grid;
pub mod input;
pub mod logging;
pub mod renderer;
pub mod settings;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
