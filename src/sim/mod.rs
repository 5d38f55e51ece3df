//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick, velocities in pixels per tick
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{goal_crossed, in_paddle_band, touches_wall};
pub use state::{Ball, GameEvent, GamePhase, GameState, Paddle, Score, Side};
pub use tick::{TickInput, tick};
