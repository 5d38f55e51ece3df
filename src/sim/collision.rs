//! Goal, paddle and wall tests
//!
//! Pure predicates over the ball position; the tick decides what to do with
//! the result.

use glam::Vec2;

use super::state::{Paddle, Side};
use crate::tuning::Tuning;

/// Side whose goal line the ball has crossed, if any
pub fn goal_crossed(pos: Vec2, tuning: &Tuning) -> Option<Side> {
    if pos.x < tuning.edge_threshold {
        Some(Side::Left)
    } else if pos.x > tuning.canvas_width - tuning.edge_threshold {
        Some(Side::Right)
    } else {
        None
    }
}

/// Ball is level with the paddle and inside the narrow band in front of it
///
/// Both band edges are exclusive, so a ball exactly on the paddle face or
/// exactly on the far edge does not bounce.
pub fn in_paddle_band(pos: Vec2, paddle: &Paddle, side: Side, tuning: &Tuning) -> bool {
    if !paddle.covers(pos.y, tuning.paddle_height) {
        return false;
    }
    let outer = tuning.band_outer_x();
    let inner = tuning.band_inner_x();
    match side {
        Side::Left => pos.x > outer && pos.x < inner,
        Side::Right => {
            pos.x < tuning.canvas_width - outer && pos.x > tuning.canvas_width - inner
        }
    }
}

/// Ball touches the top or bottom wall
pub fn touches_wall(pos: Vec2, tuning: &Tuning) -> bool {
    let half = tuning.ball_radius();
    pos.y < half || pos.y >= tuning.canvas_height - half
}
