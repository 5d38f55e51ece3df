//! Pose keypoint overlay
//!
//! Poses come from an external estimator (ml5 PoseNet in the page) whenever
//! it has a result. The latest batch is kept in a [`PoseFeed`]; the frame
//! loop reads it once per frame to draw markers and, on click, to report
//! the nose position.

pub mod skeleton;

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use serde::{Deserialize, Serialize};

pub use skeleton::SKELETON_CONNECTIONS;

/// Part label of the keypoint reported on click
pub const NOSE: &str = "nose";

/// A labeled body-part position with detection confidence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    pub part: String,
    /// Confidence in 0.0..=1.0
    pub score: f32,
    pub position: Position,
}

/// Keypoint position in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl From<Position> for Vec2 {
    fn from(p: Position) -> Vec2 {
        Vec2::new(p.x, p.y)
    }
}

/// One detected person
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    #[serde(default)]
    pub keypoints: Vec<Keypoint>,
}

impl Pose {
    pub fn keypoint(&self, part: &str) -> Option<&Keypoint> {
        self.keypoints.iter().find(|k| k.part == part)
    }
}

/// A pose as delivered by the page: bare, or wrapped the way ml5 does
#[derive(Deserialize)]
#[serde(untagged)]
enum PoseRecord {
    Wrapped { pose: Pose },
    Bare(Pose),
}

/// Decode a JSON array of pose records
pub fn parse_poses(json: &str) -> Result<Vec<Pose>, serde_json::Error> {
    let records: Vec<PoseRecord> = serde_json::from_str(json)?;
    Ok(records
        .into_iter()
        .map(|record| match record {
            PoseRecord::Wrapped { pose } => pose,
            PoseRecord::Bare(pose) => pose,
        })
        .collect())
}

/// Latest-snapshot cell for pose batches
///
/// Writers replace the whole batch; readers get a shared handle to whatever
/// batch was current when they asked. Clones share the same cell.
#[derive(Debug, Clone, Default)]
pub struct PoseFeed {
    latest: Rc<RefCell<Rc<Vec<Pose>>>>,
}

impl PoseFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current batch (last write wins)
    pub fn publish(&self, poses: Vec<Pose>) {
        *self.latest.borrow_mut() = Rc::new(poses);
    }

    /// Decode and publish a JSON batch; the previous batch is kept on error
    pub fn publish_json(&self, json: &str) -> Result<usize, serde_json::Error> {
        let poses = parse_poses(json)?;
        let count = poses.len();
        self.publish(poses);
        Ok(count)
    }

    /// Current batch
    pub fn latest(&self) -> Rc<Vec<Pose>> {
        Rc::clone(&self.latest.borrow())
    }
}

/// A keypoint marker to draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub center: Vec2,
    pub score: f32,
}

/// Keypoints from every pose whose confidence is above `threshold`
pub fn markers(poses: &[Pose], threshold: f32) -> Vec<Marker> {
    poses
        .iter()
        .flat_map(|pose| pose.keypoints.iter())
        .filter(|k| k.score > threshold)
        .map(|k| Marker {
            center: k.position.into(),
            score: k.score,
        })
        .collect()
}

/// Skeleton line segments with both ends above `threshold`
pub fn skeleton_segments(poses: &[Pose], threshold: f32) -> Vec<(Vec2, Vec2)> {
    let mut segments = Vec::new();
    for pose in poses {
        for (a, b) in SKELETON_CONNECTIONS {
            let (Some(a), Some(b)) = (pose.keypoint(a), pose.keypoint(b)) else {
                continue;
            };
            if a.score > threshold && b.score > threshold {
                segments.push((a.position.into(), b.position.into()));
            }
        }
    }
    segments
}

/// Nose position of the first detected pose
pub fn find_nose(poses: &[Pose]) -> Option<Vec2> {
    poses
        .first()
        .and_then(|pose| pose.keypoint(NOSE))
        .map(|k| k.position.into())
}

/// Click handler: report the nose position, if any pose is visible
pub fn on_activate(poses: &[Pose]) -> Option<Vec2> {
    let nose = find_nose(poses);
    if let Some(pos) = nose {
        log::info!("nose position: ({:.1}, {:.1})", pos.x, pos.y);
    }
    nose
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kp(part: &str, score: f32, x: f32, y: f32) -> Keypoint {
        Keypoint {
            part: part.to_string(),
            score,
            position: Position { x, y },
        }
    }

    #[test]
    fn test_markers_above_threshold_only() {
        let poses = vec![
            Pose {
                keypoints: vec![kp("nose", 0.9, 10.0, 20.0), kp("leftEye", 0.2, 5.0, 5.0)],
            },
            Pose {
                keypoints: vec![kp("rightWrist", 0.21, 100.0, 200.0)],
            },
        ];
        let found = markers(&poses, 0.2);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].center, Vec2::new(10.0, 20.0));
        assert_eq!(found[1].center, Vec2::new(100.0, 200.0));
    }

    #[test]
    fn test_find_nose_uses_first_pose() {
        let poses = vec![
            Pose {
                keypoints: vec![kp("leftEye", 0.9, 1.0, 1.0), kp("nose", 0.1, 219.4, 172.9)],
            },
            Pose {
                keypoints: vec![kp("nose", 0.99, 50.0, 50.0)],
            },
        ];
        assert_eq!(find_nose(&poses), Some(Vec2::new(219.4, 172.9)));
    }

    #[test]
    fn test_find_nose_missing() {
        assert_eq!(find_nose(&[]), None);
        assert_eq!(on_activate(&[]), None);
        let no_nose = vec![Pose {
            keypoints: vec![kp("leftEye", 0.9, 1.0, 1.0)],
        }];
        assert_eq!(find_nose(&no_nose), None);
        assert_eq!(find_nose(&[Pose::default()]), None);
    }

    #[test]
    fn test_parse_wrapped_and_bare_records() {
        let json = r#"[
            {"pose": {"score": 0.8, "keypoints": [
                {"part": "nose", "score": 0.99, "position": {"x": 219.4, "y": 172.9}}
            ]}, "skeleton": []},
            {"keypoints": [
                {"part": "leftEye", "score": 0.5, "position": {"x": 1.0, "y": 2.0}}
            ]}
        ]"#;
        let poses = parse_poses(json).expect("valid poses");
        assert_eq!(poses.len(), 2);
        assert_eq!(poses[0].keypoints[0].part, "nose");
        assert_eq!(poses[1].keypoints[0].position, Position { x: 1.0, y: 2.0 });
    }

    #[test]
    fn test_feed_last_write_wins() {
        let feed = PoseFeed::new();
        assert!(feed.latest().is_empty());

        let writer = feed.clone();
        writer.publish(vec![Pose::default(), Pose::default()]);
        let held = feed.latest();
        writer.publish(vec![Pose::default()]);

        // Earlier readers keep their snapshot, new reads see the replacement
        assert_eq!(held.len(), 2);
        assert_eq!(feed.latest().len(), 1);
    }

    #[test]
    fn test_feed_keeps_snapshot_on_bad_json() {
        let feed = PoseFeed::new();
        feed.publish(vec![Pose::default()]);
        assert!(feed.publish_json("{not json").is_err());
        assert_eq!(feed.latest().len(), 1);
        assert_eq!(feed.publish_json("[]").expect("empty batch"), 0);
        assert!(feed.latest().is_empty());
    }

    #[test]
    fn test_skeleton_segments() {
        let poses = vec![Pose {
            keypoints: vec![
                kp("leftShoulder", 0.9, 0.0, 0.0),
                kp("leftElbow", 0.9, 10.0, 0.0),
                kp("leftWrist", 0.1, 20.0, 0.0),
            ],
        }];
        let segments = skeleton_segments(&poses, 0.2);
        assert_eq!(segments, vec![(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0))]);
    }
}
