//! Fixed timestep simulation tick
//!
//! Core game loop that advances the match deterministically, one display
//! frame per call.

use super::collision::{goal_crossed, in_paddle_band, touches_wall};
use super::state::{GameEvent, GamePhase, GameState, Side};

/// Input for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// New vertical center of the left paddle (None keeps it)
    pub left_y: Option<f32>,
    /// New vertical center of the right paddle (None keeps it)
    pub right_y: Option<f32>,
}

impl TickInput {
    /// Both paddles follow the same coordinate
    pub fn mirrored(y: f32) -> Self {
        Self {
            left_y: Some(y),
            right_y: Some(y),
        }
    }
}

/// Advance the game state by one tick
///
/// While running, checks are applied in this priority order and a rally
/// that ends stops the tick:
/// 1. left goal (right scores)
/// 2. right goal (left scores)
/// 3. paddle bounce (reverse `vx`)
/// 4. wall bounce (reverse `vy`)
/// 5. integrate position
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    // Paddles follow the input in every phase
    if let Some(y) = input.left_y {
        state.left_paddle.y = y;
    }
    if let Some(y) = input.right_y {
        state.right_paddle.y = y;
    }

    match state.phase {
        GamePhase::Paused { frames_left } => {
            let frames_left = frames_left.saturating_sub(1);
            if frames_left == 0 {
                state.phase = GamePhase::Running;
                state.events.push(GameEvent::Resumed);
            } else {
                state.phase = GamePhase::Paused { frames_left };
            }
        }
        GamePhase::Running => run_step(state),
        GamePhase::GameOver { .. } => return,
    }

    state.time_ticks += 1;
}

fn run_step(state: &mut GameState) {
    if let Some(goal) = goal_crossed(state.ball.pos, &state.tuning) {
        award_point(state, goal);
        return;
    }

    for side in [Side::Left, Side::Right] {
        if in_paddle_band(state.ball.pos, state.paddle(side), side, &state.tuning) {
            state.ball.vel.x = -state.ball.vel.x;
            state.events.push(GameEvent::PaddleHit { side });
        }
    }

    if touches_wall(state.ball.pos, &state.tuning) {
        state.ball.vel.y = -state.ball.vel.y;
        state.events.push(GameEvent::WallBounce);
    }

    state.ball.pos += state.ball.vel;
}

/// The ball crossed `goal`: the other side scores
fn award_point(state: &mut GameState, goal: Side) {
    let scorer = goal.opponent();
    let total = state.score.award(scorer);
    state.events.push(GameEvent::Scored { scorer });
    state.reset_ball(goal);

    if total >= state.tuning.max_score {
        state.phase = GamePhase::GameOver { winner: scorer };
        state.events.push(GameEvent::MatchOver { winner: scorer });
    } else {
        state.phase = GamePhase::Paused {
            frames_left: state.tuning.pause_frames,
        };
    }
}
