//! Player settings and preferences
//!
//! Persisted in LocalStorage on the web; native builds use defaults.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::consts::KEYPOINT_THRESHOLD;

/// How paddle positions are derived from the available inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ControlMode {
    /// Both paddles follow the pointer
    #[default]
    Mirror,
    /// Left paddle follows the pointer, right paddle follows the detected nose
    NoseRight,
}

impl ControlMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlMode::Mirror => "Mirror",
            ControlMode::NoseRight => "NoseRight",
        }
    }
}

impl FromStr for ControlMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mirror" => Ok(ControlMode::Mirror),
            "noseright" | "nose" => Ok(ControlMode::NoseRight),
            _ => Err(format!("unknown control mode '{s}'")),
        }
    }
}

/// Parse a query-string flag (`1`, `true`, `on` / `0`, `false`, `off`)
fn parse_flag(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Draw pose keypoint markers over the court
    pub pose_overlay: bool,
    /// Also draw skeleton lines between keypoints
    pub draw_skeleton: bool,
    /// Keypoints must score above this to be drawn
    pub keypoint_threshold: f32,
    /// Paddle control scheme
    pub control: ControlMode,
    /// Show FPS counter
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pose_overlay: false,
            draw_skeleton: false,
            keypoint_threshold: KEYPOINT_THRESHOLD,
            control: ControlMode::Mirror,
            show_fps: false,
        }
    }
}

impl Settings {
    /// Threshold clamped to the valid confidence range
    pub fn effective_threshold(&self) -> f32 {
        self.keypoint_threshold.clamp(0.0, 1.0)
    }

    /// Skeleton lines are only drawn with the overlay on
    pub fn effective_skeleton(&self) -> bool {
        self.pose_overlay && self.draw_skeleton
    }

    /// Apply overrides from a page query string such as `?control=nose&overlay=1`
    ///
    /// Recognized keys: `control`, `overlay`, `skeleton`, `threshold`, `fps`.
    /// Unknown keys and unparsable values are logged and skipped. Returns
    /// whether any setting changed.
    pub fn apply_query(&mut self, query: &str) -> bool {
        let before = self.clone();
        let query = query.strip_prefix('?').unwrap_or(query);

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, "1"));
            let applied = match key {
                "control" => value.parse::<ControlMode>().map(|mode| self.control = mode).ok(),
                "overlay" => parse_flag(value).map(|on| self.pose_overlay = on),
                "skeleton" => parse_flag(value).map(|on| self.draw_skeleton = on),
                "fps" => parse_flag(value).map(|on| self.show_fps = on),
                "threshold" => value
                    .parse::<f32>()
                    .ok()
                    .filter(|t| (0.0..=1.0).contains(t))
                    .map(|t| self.keypoint_threshold = t),
                _ => None,
            };
            if applied.is_none() {
                log::warn!("Ignoring query setting '{pair}'");
            }
        }

        *self != before
    }

    /// Pose estimation is only needed when something consumes keypoints
    pub fn wants_poses(&self) -> bool {
        self.pose_overlay || self.control == ControlMode::NoseRight
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "pose_pong_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {e}"),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_classic_game() {
        let settings = Settings::default();
        assert!(!settings.pose_overlay);
        assert_eq!(settings.control, ControlMode::Mirror);
        assert_eq!(settings.keypoint_threshold, 0.2);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"pose_overlay": true, "control": "NoseRight"}"#)
                .expect("valid settings");
        assert!(settings.pose_overlay);
        assert_eq!(settings.control, ControlMode::NoseRight);
        assert!(!settings.draw_skeleton);
    }

    #[test]
    fn test_skeleton_needs_overlay() {
        let settings = Settings {
            draw_skeleton: true,
            ..Default::default()
        };
        assert!(!settings.effective_skeleton());
    }

    #[test]
    fn test_control_mode_from_str() {
        assert_eq!("MIRROR".parse::<ControlMode>(), Ok(ControlMode::Mirror));
        assert_eq!("nose".parse::<ControlMode>(), Ok(ControlMode::NoseRight));
        assert!("ai".parse::<ControlMode>().is_err());
        assert_eq!(ControlMode::NoseRight.as_str(), "NoseRight");
    }

    #[test]
    fn test_query_overrides() {
        let mut settings = Settings::default();
        assert!(settings.apply_query("?control=nose&overlay=1&skeleton=on&threshold=0.5"));
        assert_eq!(settings.control, ControlMode::NoseRight);
        assert!(settings.pose_overlay);
        assert!(settings.effective_skeleton());
        assert_eq!(settings.keypoint_threshold, 0.5);
        assert!(!settings.show_fps);
        assert!(settings.wants_poses());
    }

    #[test]
    fn test_query_without_changes() {
        let mut settings = Settings::default();
        assert!(!settings.apply_query(""));
        assert!(!settings.apply_query("?control=mirror&overlay=0"));
        assert!(!settings.apply_query("?control=ai&threshold=7&volume=3"));
        assert_eq!(settings, Settings::default());
        assert!(!settings.wants_poses());
    }

    #[test]
    fn test_query_bare_key_enables_flag() {
        let mut settings = Settings::default();
        assert!(settings.apply_query("fps"));
        assert!(settings.show_fps);
    }

    #[test]
    fn test_query_settings_persist_as_json() {
        let mut settings = Settings::default();
        settings.apply_query("?control=nose");
        let json = serde_json::to_string(&settings).expect("serialize");
        let back: Settings = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, settings);
    }
}
