//! Per-frame scene assembly
//!
//! Turns the game state and current poses into a triangle list for the GPU
//! plus the two score labels that the page HUD shows as text.

use glam::Vec2;

use super::shapes::{CIRCLE_SEGMENTS, circle, line, rect};
use super::vertex::{Vertex, colors};
use crate::consts::KEYPOINT_MARKER_SIZE;
use crate::pose::{Pose, markers, skeleton_segments};
use crate::settings::Settings;
use crate::sim::{GameState, Side};

/// Width of skeleton lines
const SKELETON_WIDTH: f32 = 2.0;
/// Score label offset from the top corners
const LABEL_INSET: f32 = 20.0;

/// A text label anchored at its center
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub center: Vec2,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub vertices: Vec<Vertex>,
    pub labels: Vec<Label>,
}

/// Build the frame for `state`, overlaying `poses` when enabled
pub fn build(state: &GameState, poses: &[Pose], settings: &Settings) -> Scene {
    let tuning = &state.tuning;
    let mut vertices = Vec::new();

    // Pose overlay sits under the court
    if settings.pose_overlay {
        let threshold = settings.effective_threshold();
        if settings.effective_skeleton() {
            for (a, b) in skeleton_segments(poses, threshold) {
                vertices.extend(line(a, b, SKELETON_WIDTH, colors::SKELETON));
            }
        }
        for marker in markers(poses, threshold) {
            // Fade markers by detection confidence
            let mut color = colors::KEYPOINT;
            color[3] *= marker.score.clamp(0.0, 1.0);
            vertices.extend(circle(
                marker.center,
                KEYPOINT_MARKER_SIZE / 2.0,
                color,
                CIRCLE_SEGMENTS,
            ));
        }
    }

    // Paddles
    let size = Vec2::new(tuning.paddle_width, tuning.paddle_height);
    for side in [Side::Left, Side::Right] {
        let x = match side {
            Side::Left => tuning.paddle_margin,
            Side::Right => tuning.canvas_width - tuning.paddle_margin - tuning.paddle_width,
        };
        let top = state.paddle(side).top(tuning.paddle_height);
        vertices.extend(rect(Vec2::new(x, top), size, colors::PADDLE));
    }

    // Ball is hidden between points and after the match
    if state.is_running() {
        vertices.extend(circle(
            state.ball.pos,
            tuning.ball_radius(),
            colors::BALL,
            CIRCLE_SEGMENTS,
        ));
    }

    let labels = vec![
        Label {
            text: state.score.left.to_string(),
            center: Vec2::new(LABEL_INSET, LABEL_INSET),
        },
        Label {
            text: state.score.right.to_string(),
            center: Vec2::new(tuning.canvas_width - LABEL_INSET, LABEL_INSET),
        },
    ];

    Scene { vertices, labels }
}
