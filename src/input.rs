//! Paddle input mapping
//!
//! The page reports the pointer position; the pose feed may add a nose
//! position. Each frame they are folded into one [`TickInput`].

use crate::pose::{Pose, find_nose};
use crate::settings::ControlMode;
use crate::sim::TickInput;

/// Latest pointer position in canvas pixels
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    pub y: Option<f32>,
}

impl PointerState {
    /// Record a pointer move given its client y and the canvas' top offset
    pub fn move_to(&mut self, client_y: f32, canvas_top: f32) {
        self.y = Some(client_y - canvas_top);
    }
}

/// Build this frame's paddle input
///
/// Without any pointer event yet, paddles stay where they are.
pub fn sample(mode: ControlMode, pointer: &PointerState, poses: &[Pose]) -> TickInput {
    match mode {
        ControlMode::Mirror => TickInput {
            left_y: pointer.y,
            right_y: pointer.y,
        },
        ControlMode::NoseRight => TickInput {
            left_y: pointer.y,
            right_y: find_nose(poses).map(|nose| nose.y).or(pointer.y),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::{Keypoint, Position};

    fn nose_at(y: f32) -> Vec<Pose> {
        vec![Pose {
            keypoints: vec![Keypoint {
                part: "nose".to_string(),
                score: 0.9,
                position: Position { x: 100.0, y },
            }],
        }]
    }

    #[test]
    fn test_mirror_drives_both_paddles() {
        let mut pointer = PointerState::default();
        pointer.move_to(150.0, 20.0);
        let input = sample(ControlMode::Mirror, &pointer, &nose_at(300.0));
        assert_eq!(input, TickInput::mirrored(130.0));
    }

    #[test]
    fn test_no_pointer_yet() {
        let input = sample(ControlMode::Mirror, &PointerState::default(), &[]);
        assert_eq!(input, TickInput::default());
    }

    #[test]
    fn test_nose_drives_right_paddle() {
        let pointer = PointerState { y: Some(50.0) };
        let input = sample(ControlMode::NoseRight, &pointer, &nose_at(300.0));
        assert_eq!(input.left_y, Some(50.0));
        assert_eq!(input.right_y, Some(300.0));
    }

    #[test]
    fn test_nose_mode_falls_back_to_pointer() {
        let pointer = PointerState { y: Some(50.0) };
        let input = sample(ControlMode::NoseRight, &pointer, &[]);
        assert_eq!(input, TickInput::mirrored(50.0));
    }
}
