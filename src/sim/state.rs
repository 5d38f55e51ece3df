//! Game state and core simulation types
//!
//! Everything the frame loop needs to render or resume a match lives here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Which half of the court
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Sign of x motion heading toward this side's goal
    pub fn direction(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball waits at center; counts down one per tick
    Paused { frames_left: u32 },
    /// Active gameplay
    Running,
    /// Match decided (terminal until restart)
    GameOver { winner: Side },
}

/// Things that happened during a tick, for logging and HUD effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Scored { scorer: Side },
    PaddleHit { side: Side },
    WallBounce,
    Resumed,
    MatchOver { winner: Side },
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
}

/// A paddle; only its vertical center moves
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub y: f32,
}

impl Paddle {
    /// Top edge given the paddle height
    pub fn top(&self, height: f32) -> f32 {
        self.y - height / 2.0
    }

    /// Half-open vertical extent `[top, top + height)`
    pub fn covers(&self, y: f32, height: f32) -> bool {
        let top = self.top(height);
        y >= top && y < top + height
    }
}

/// Points per side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub left: u8,
    pub right: u8,
}

impl Score {
    pub fn get(&self, side: Side) -> u8 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// Add a point, returning the new total
    pub fn award(&mut self, side: Side) -> u8 {
        let slot = match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        };
        *slot = slot.saturating_add(1);
        *slot
    }
}

/// Complete match state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub tuning: Tuning,
    pub ball: Ball,
    pub left_paddle: Paddle,
    pub right_paddle: Paddle,
    pub score: Score,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events raised by the latest tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Tuning::default())
    }
}

impl GameState {
    /// Fresh match: ball centered heading right, play starts on the first tick
    pub fn new(tuning: Tuning) -> Self {
        let center = Vec2::new(tuning.center_x(), tuning.center_y());
        let mut state = Self {
            ball: Ball {
                pos: center,
                vel: Vec2::new(tuning.serve_speed, tuning.serve_vy),
            },
            left_paddle: Paddle { y: center.y },
            right_paddle: Paddle { y: center.y },
            score: Score::default(),
            phase: GamePhase::Paused { frames_left: 0 },
            time_ticks: 0,
            events: Vec::new(),
            tuning,
        };
        state.reset_ball(Side::Right);
        state
    }

    /// Start a new match with the same tuning
    pub fn restart(&mut self) {
        *self = Self::new(self.tuning.clone());
    }

    /// Re-center the ball and send it toward `losing_side`
    ///
    /// Only the sign of `vx` depends on the argument; `vy` is kept.
    pub fn reset_ball(&mut self, losing_side: Side) {
        self.ball.pos = Vec2::new(self.tuning.center_x(), self.tuning.center_y());
        self.ball.vel.x = losing_side.direction() * self.tuning.serve_speed.abs();
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Left => &self.left_paddle,
            Side::Right => &self.right_paddle,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn winner(&self) -> Option<Side> {
        match self.phase {
            GamePhase::GameOver { winner } => Some(winner),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_match() {
        let state = GameState::default();
        assert_eq!(state.ball.pos, Vec2::new(240.0, 180.0));
        assert_eq!(state.ball.vel, Vec2::new(3.0, 1.2));
        assert_eq!(state.score, Score::default());
        assert_eq!(state.phase, GamePhase::Paused { frames_left: 0 });
    }

    #[test]
    fn test_reset_ball_toward_loser() {
        let mut state = GameState::default();
        state.ball.pos = Vec2::new(2.0, 40.0);
        state.reset_ball(Side::Left);
        assert_eq!(state.ball.pos, Vec2::new(240.0, 180.0));
        assert_eq!(state.ball.vel.x, -3.0);

        state.reset_ball(Side::Right);
        assert_eq!(state.ball.vel.x, 3.0);
    }

    #[test]
    fn test_reset_ball_ignores_serve_sign() {
        let tuning = Tuning {
            serve_speed: -3.0,
            ..Default::default()
        };
        let mut state = GameState::new(tuning);
        state.reset_ball(Side::Left);
        assert_eq!(state.ball.vel.x, -3.0);
        state.reset_ball(Side::Right);
        assert_eq!(state.ball.vel.x, 3.0);
    }

    #[test]
    fn test_reset_ball_idempotent() {
        let mut once = GameState::default();
        once.ball.pos = Vec2::new(470.0, 12.0);
        once.ball.vel = Vec2::new(3.0, -1.2);
        let mut twice = once.clone();

        once.reset_ball(Side::Right);
        twice.reset_ball(Side::Right);
        twice.reset_ball(Side::Right);
        assert_eq!(once.ball, twice.ball);
    }

    #[test]
    fn test_paddle_covers_half_open() {
        let paddle = Paddle { y: 100.0 };
        assert!(paddle.covers(75.0, 50.0));
        assert!(paddle.covers(124.9, 50.0));
        assert!(!paddle.covers(125.0, 50.0));
        assert!(!paddle.covers(74.9, 50.0));
    }

    #[test]
    fn test_score_award() {
        let mut score = Score::default();
        assert_eq!(score.award(Side::Right), 1);
        assert_eq!(score.award(Side::Right), 2);
        assert_eq!(score.get(Side::Left), 0);
        assert_eq!(score.get(Side::Right), 2);
    }

    #[test]
    fn test_state_serializes_without_events() {
        let mut state = GameState::default();
        state.events.push(GameEvent::WallBounce);
        let json = serde_json::to_string(&state).expect("serialize");
        let back: GameState = serde_json::from_str(&json).expect("deserialize");
        assert!(back.events.is_empty());
        assert_eq!(back.ball, state.ball);
        assert_eq!(back.phase, state.phase);
    }
}
