//! Data-driven game balance
//!
//! Everything the simulation measures against lives here so a page can
//! override it with a JSON blob. Defaults come from [`crate::consts`].

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::consts::*;

/// Geometry and speed parameters for one match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub ball_size: f32,
    /// Horizontal serve speed (sign is chosen on reset)
    pub serve_speed: f32,
    /// Vertical speed at match start
    pub serve_vy: f32,
    pub max_speed: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_margin: f32,
    pub bounce_band: f32,
    pub edge_threshold: f32,
    pub max_score: u8,
    pub pause_frames: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            ball_size: BALL_SIZE,
            serve_speed: SERVE_VX,
            serve_vy: SERVE_VY,
            max_speed: MAX_SPEED,
            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_margin: PADDLE_MARGIN,
            bounce_band: BOUNCE_BAND,
            edge_threshold: EDGE_THRESHOLD,
            max_score: MAX_SCORE,
            pause_frames: PAUSE_FRAMES,
        }
    }
}

/// Reasons a tuning override is rejected
#[derive(Debug, Clone, PartialEq)]
pub enum TuningError {
    /// Canvas width or height is not positive
    EmptyCanvas,
    /// A size or speed that must be strictly positive is not
    NotPositive { field: &'static str, value: f32 },
    /// A serve velocity component is above `max_speed`
    ServeTooFast { component: f32, max_speed: f32 },
    /// `max_score` of zero would end the match before it starts
    ZeroMaxScore,
    /// Paddle band would sit outside the canvas
    PaddleOutOfBounds,
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::EmptyCanvas => write!(f, "canvas must have a positive size"),
            TuningError::NotPositive { field, value } => {
                write!(f, "{field} must be positive, got {value}")
            }
            TuningError::ServeTooFast {
                component,
                max_speed,
            } => write!(
                f,
                "serve velocity {component} exceeds max speed {max_speed}"
            ),
            TuningError::ZeroMaxScore => write!(f, "max_score must be at least 1"),
            TuningError::PaddleOutOfBounds => {
                write!(f, "paddles and bounce bands must fit inside the canvas")
            }
        }
    }
}

impl std::error::Error for TuningError {}

impl Tuning {
    /// Parse a (possibly partial) JSON override; missing fields keep defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Check the relations the simulation relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.canvas_width <= 0.0 || self.canvas_height <= 0.0 {
            return Err(TuningError::EmptyCanvas);
        }
        for (field, value) in [
            ("serve_speed", self.serve_speed),
            ("ball_size", self.ball_size),
            ("paddle_height", self.paddle_height),
            ("bounce_band", self.bounce_band),
        ] {
            if value <= 0.0 {
                return Err(TuningError::NotPositive { field, value });
            }
        }
        for component in [self.serve_speed, self.serve_vy] {
            if component.abs() > self.max_speed {
                return Err(TuningError::ServeTooFast {
                    component,
                    max_speed: self.max_speed,
                });
            }
        }
        if self.max_score == 0 {
            return Err(TuningError::ZeroMaxScore);
        }
        if 2.0 * self.band_inner_x() >= self.canvas_width {
            return Err(TuningError::PaddleOutOfBounds);
        }
        Ok(())
    }

    /// Load an override, falling back to defaults when it is malformed
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => match tuning.validate() {
                Ok(()) => tuning,
                Err(e) => {
                    log::warn!("Rejected tuning override: {e}");
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not parse tuning override: {e}");
                Self::default()
            }
        }
    }

    pub fn center_x(&self) -> f32 {
        self.canvas_width / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.canvas_height / 2.0
    }

    pub fn ball_radius(&self) -> f32 {
        self.ball_size / 2.0
    }

    /// Distance from a side edge to the paddle's inner face
    pub fn band_outer_x(&self) -> f32 {
        self.paddle_margin + self.paddle_width
    }

    /// Distance from a side edge to the far side of the bounce band
    pub fn band_inner_x(&self) -> f32 {
        self.band_outer_x() + self.bounce_band
    }
}
