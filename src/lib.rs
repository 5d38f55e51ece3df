//! Pose Pong - two-paddle Pong with an optional pose-keypoint overlay
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball, paddles, scoring, game phase)
//! - `pose`: Latest-snapshot pose feed, keypoint markers, nose lookup
//! - `input`: Pointer/pose to paddle position mapping
//! - `renderer`: WebGPU rendering pipeline
//! - `tuning`: Data-driven game geometry and speeds
//! - `settings`: Player preferences

pub mod input;
pub mod pose;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::{ControlMode, Settings};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Canvas dimensions (pixels, origin top-left, y down)
    pub const CANVAS_WIDTH: f32 = 480.0;
    pub const CANVAS_HEIGHT: f32 = 360.0;

    /// Ball diameter
    pub const BALL_SIZE: f32 = 12.0;
    /// Ball speed on serve (pixels per tick)
    pub const SERVE_VX: f32 = 3.0;
    pub const SERVE_VY: f32 = 1.2;
    /// Velocity components never exceed this
    pub const MAX_SPEED: f32 = 5.0;

    /// Paddle geometry
    pub const PADDLE_WIDTH: f32 = 10.0;
    pub const PADDLE_HEIGHT: f32 = 50.0;
    /// Gap between the canvas edge and the paddle's outer side
    pub const PADDLE_MARGIN: f32 = 15.0;
    /// Depth of the band in front of a paddle where the ball bounces
    pub const BOUNCE_BAND: f32 = 5.0;

    /// Ball x closer than this to a side edge is a goal
    pub const EDGE_THRESHOLD: f32 = 5.0;

    /// Points needed to win the match
    pub const MAX_SCORE: u8 = 3;
    /// Frames the ball waits after a point
    pub const PAUSE_FRAMES: u32 = 30;

    /// Keypoints at or below this confidence are not drawn
    pub const KEYPOINT_THRESHOLD: f32 = 0.2;
    /// Diameter of a pose keypoint marker
    pub const KEYPOINT_MARKER_SIZE: f32 = 10.0;
}
