//! PoseNet body connections

/// Pairs of keypoint part names joined by a skeleton line
pub const SKELETON_CONNECTIONS: [(&str, &str); 16] = [
    // Face
    ("leftEar", "leftEye"),
    ("leftEye", "nose"),
    ("nose", "rightEye"),
    ("rightEye", "rightEar"),
    // Upper body
    ("leftShoulder", "rightShoulder"),
    ("leftShoulder", "leftElbow"),
    ("leftElbow", "leftWrist"),
    ("rightShoulder", "rightElbow"),
    ("rightElbow", "rightWrist"),
    // Torso
    ("leftShoulder", "leftHip"),
    ("rightShoulder", "rightHip"),
    ("leftHip", "rightHip"),
    // Lower body
    ("leftHip", "leftKnee"),
    ("leftKnee", "leftAnkle"),
    ("rightHip", "rightKnee"),
    ("rightKnee", "rightAnkle"),
];
