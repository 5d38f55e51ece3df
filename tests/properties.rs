//! Invariants of the match simulation under arbitrary paddle input

use glam::Vec2;
use pose_pong::Tuning;
use pose_pong::sim::{GameEvent, GamePhase, GameState, Side, TickInput, tick};
use proptest::prelude::*;

/// Paddle input for one tick: either untouched or somewhere on (or just off) the canvas
fn tick_input() -> impl Strategy<Value = TickInput> {
    (
        prop::option::of(-20.0f32..380.0),
        prop::option::of(-20.0f32..380.0),
    )
        .prop_map(|(left_y, right_y)| TickInput { left_y, right_y })
}

/// A ball anywhere on the canvas with legal serve-magnitude velocity
fn ball_state() -> impl Strategy<Value = (Vec2, Vec2)> {
    (
        0.0f32..480.0,
        0.0f32..360.0,
        prop::bool::ANY,
        prop::bool::ANY,
    )
        .prop_map(|(x, y, right, down)| {
            let vx = if right { 3.0 } else { -3.0 };
            let vy = if down { 1.2 } else { -1.2 };
            (Vec2::new(x, y), Vec2::new(vx, vy))
        })
}

proptest! {
    #[test]
    fn velocity_never_exceeds_max(
        inputs in prop::collection::vec(tick_input(), 1..600),
    ) {
        let mut state = GameState::default();
        let max = state.tuning.max_speed;
        for input in &inputs {
            tick(&mut state, input);
            if state.is_running() {
                prop_assert!(state.ball.vel.x.abs() <= max);
                prop_assert!(state.ball.vel.y.abs() <= max);
            }
        }
    }

    #[test]
    fn serve_heads_toward_side_that_lost(
        (pos, vel) in ball_state(),
        inputs in prop::collection::vec(tick_input(), 1..400),
    ) {
        let mut state = GameState::default();
        state.phase = GamePhase::Running;
        state.ball.pos = pos;
        state.ball.vel = vel;

        for input in &inputs {
            tick(&mut state, input);
            for event in &state.events {
                if let GameEvent::Scored { scorer } = event {
                    let loser = scorer.opponent();
                    prop_assert_eq!(state.ball.vel.x.signum(), loser.direction());
                    prop_assert_eq!(state.ball.pos, Vec2::new(240.0, 180.0));
                }
            }
        }
    }

    #[test]
    fn scores_monotonic_and_game_over_at_max(
        inputs in prop::collection::vec(tick_input(), 1..3000),
    ) {
        let mut state = GameState::default();
        let max_score = state.tuning.max_score;
        let mut game_overs = 0;

        for input in &inputs {
            let before = state.score;
            let was_over = state.winner().is_some();
            tick(&mut state, input);

            prop_assert!(state.score.left >= before.left);
            prop_assert!(state.score.right >= before.right);
            prop_assert!(state.score.left <= max_score && state.score.right <= max_score);

            let reached = state.score.left >= max_score || state.score.right >= max_score;
            prop_assert_eq!(state.winner().is_some(), reached);

            if !was_over && state.winner().is_some() {
                game_overs += 1;
                let winner = state.winner();
                let expected = if state.score.left >= max_score { Side::Left } else { Side::Right };
                prop_assert_eq!(winner, Some(expected));
            }
        }
        prop_assert!(game_overs <= 1);
    }

    #[test]
    fn reset_ball_is_idempotent(
        (pos, vel) in ball_state(),
        left in prop::bool::ANY,
    ) {
        let side = if left { Side::Left } else { Side::Right };
        let mut once = GameState::new(Tuning::default());
        once.ball.pos = pos;
        once.ball.vel = vel;
        let mut twice = once.clone();

        once.reset_ball(side);
        twice.reset_ball(side);
        twice.reset_ball(side);

        prop_assert_eq!(once.ball, twice.ball);
        prop_assert_eq!(once.ball.vel.x, side.direction() * 3.0);
    }
}
