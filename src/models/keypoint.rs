/// Keypoint and skeleton models
///
/// This module provides the canonical body-landmark representation used by the
/// shot analysis pipeline. Coordinates are percentages (0-100) of the image
/// width and height, so every derived angle is independent of the source
/// resolution.

use serde::{Deserialize, Serialize};

/// Confidence below which a keypoint is treated as absent for angle purposes
pub const MIN_CONFIDENCE: f64 = 0.3;

/// Coordinate used for joints the detector did not report
pub const PLACEHOLDER_COORDINATE: f64 = 50.0;

/// A named 2D body landmark with its detector confidence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    /// X coordinate (percent of image width)
    pub x: f64,
    /// Y coordinate (percent of image height, grows downward)
    pub y: f64,
    /// Detection confidence (0-1)
    #[serde(default)]
    pub confidence: f64,
    /// Keypoint name as reported by the detector (e.g., "left_shoulder")
    pub name: String,
}

impl Keypoint {
    /// Create a new keypoint, clamping confidence into [0, 1]
    pub fn new(x: f64, y: f64, confidence: f64, name: impl Into<String>) -> Self {
        Self {
            x,
            y,
            confidence: confidence.clamp(0.0, 1.0),
            name: name.into(),
        }
    }

    /// Zero-confidence stand-in for a joint the detector missed
    pub fn placeholder(name: impl Into<String>) -> Self {
        Self::new(PLACEHOLDER_COORDINATE, PLACEHOLDER_COORDINATE, 0.0, name)
    }

    /// Check if the keypoint is trustworthy enough for geometry
    pub fn is_confident(&self, min_confidence: f64) -> bool {
        self.confidence >= min_confidence
    }

    /// Calculate Euclidean distance to another keypoint
    pub fn distance_to(&self, other: &Keypoint) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Convert this keypoint into percentage coordinates
    pub fn to_percent(&self, space: CoordinateSpace) -> Keypoint {
        let (x, y) = match space {
            CoordinateSpace::Percent => (self.x, self.y),
            CoordinateSpace::Normalized => (self.x * 100.0, self.y * 100.0),
            CoordinateSpace::Pixels { width, height } => {
                if width <= 0.0 || height <= 0.0 {
                    (self.x, self.y)
                } else {
                    (self.x / width * 100.0, self.y / height * 100.0)
                }
            }
        };

        Keypoint {
            x,
            y,
            confidence: self.confidence,
            name: self.name.clone(),
        }
    }
}

/// Coordinate system a detector reports keypoints in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum CoordinateSpace {
    /// Already 0-100 percentages
    Percent,
    /// 0-1 fractions of the image
    Normalized,
    /// Raw pixels of an image with the given dimensions
    Pixels { width: f64, height: f64 },
}

impl Default for CoordinateSpace {
    fn default() -> Self {
        Self::Percent
    }
}

/// Canonical skeleton joints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Joint {
    Head = 0,
    LeftShoulder = 1,
    RightShoulder = 2,
    LeftElbow = 3,
    RightElbow = 4,
    LeftWrist = 5,
    RightWrist = 6,
    LeftHip = 7,
    RightHip = 8,
    LeftKnee = 9,
    RightKnee = 10,
    LeftAnkle = 11,
    RightAnkle = 12,
}

impl Joint {
    /// Every canonical joint in skeleton order
    pub const ALL: [Joint; 13] = [
        Joint::Head,
        Joint::LeftShoulder,
        Joint::RightShoulder,
        Joint::LeftElbow,
        Joint::RightElbow,
        Joint::LeftWrist,
        Joint::RightWrist,
        Joint::LeftHip,
        Joint::RightHip,
        Joint::LeftKnee,
        Joint::RightKnee,
        Joint::LeftAnkle,
        Joint::RightAnkle,
    ];

    /// Get canonical keypoint name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Head => "head",
            Self::LeftShoulder => "left_shoulder",
            Self::RightShoulder => "right_shoulder",
            Self::LeftElbow => "left_elbow",
            Self::RightElbow => "right_elbow",
            Self::LeftWrist => "left_wrist",
            Self::RightWrist => "right_wrist",
            Self::LeftHip => "left_hip",
            Self::RightHip => "right_hip",
            Self::LeftKnee => "left_knee",
            Self::RightKnee => "right_knee",
            Self::LeftAnkle => "left_ankle",
            Self::RightAnkle => "right_ankle",
        }
    }

    /// Alternative names used by other detector backends, tried in order
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Head => &["nose", "headTop", "head_top", "top_head", "Nose"],
            Self::LeftShoulder => &["leftShoulder", "l_shoulder", "shoulder_left", "LShoulder"],
            Self::RightShoulder => &["rightShoulder", "r_shoulder", "shoulder_right", "RShoulder"],
            Self::LeftElbow => &["leftElbow", "l_elbow", "elbow_left", "LElbow"],
            Self::RightElbow => &["rightElbow", "r_elbow", "elbow_right", "RElbow"],
            Self::LeftWrist => &["leftWrist", "l_wrist", "wrist_left", "LWrist"],
            Self::RightWrist => &["rightWrist", "r_wrist", "wrist_right", "RWrist"],
            Self::LeftHip => &["leftHip", "l_hip", "hip_left", "LHip"],
            Self::RightHip => &["rightHip", "r_hip", "hip_right", "RHip"],
            Self::LeftKnee => &["leftKnee", "l_knee", "knee_left", "LKnee"],
            Self::RightKnee => &["rightKnee", "r_knee", "knee_right", "RKnee"],
            Self::LeftAnkle => &["leftAnkle", "l_ankle", "ankle_left", "LAnkle"],
            Self::RightAnkle => &["rightAnkle", "r_ankle", "ankle_right", "RAnkle"],
        }
    }
}

/// Body half used for angle computation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

/// The joints making up one half of the skeleton
#[derive(Debug, Clone, Copy)]
pub struct SideJoints {
    pub shoulder: Joint,
    pub elbow: Joint,
    pub wrist: Joint,
    pub hip: Joint,
    pub knee: Joint,
    pub ankle: Joint,
}

impl Side {
    pub fn joints(self) -> SideJoints {
        match self {
            Side::Left => SideJoints {
                shoulder: Joint::LeftShoulder,
                elbow: Joint::LeftElbow,
                wrist: Joint::LeftWrist,
                hip: Joint::LeftHip,
                knee: Joint::LeftKnee,
                ankle: Joint::LeftAnkle,
            },
            Side::Right => SideJoints {
                shoulder: Joint::RightShoulder,
                elbow: Joint::RightElbow,
                wrist: Joint::RightWrist,
                hip: Joint::RightHip,
                knee: Joint::RightKnee,
                ankle: Joint::RightAnkle,
            },
        }
    }
}

/// One analyzed frame's canonical keypoints, indexed by [`Joint`]
///
/// Every joint is always present; joints the detector missed hold a
/// zero-confidence placeholder at (50, 50).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skeleton {
    keypoints: Vec<Keypoint>,
}

impl Skeleton {
    /// Skeleton with every joint set to its placeholder
    pub fn empty() -> Self {
        Self {
            keypoints: Joint::ALL
                .iter()
                .map(|joint| Keypoint::placeholder(joint.name()))
                .collect(),
        }
    }

    /// Replace a joint, renaming the keypoint to its canonical name
    pub fn set(&mut self, joint: Joint, keypoint: Keypoint) {
        self.keypoints[joint as usize] = Keypoint {
            name: joint.name().to_string(),
            ..keypoint
        };
    }

    /// Get keypoint for a joint
    pub fn get(&self, joint: Joint) -> &Keypoint {
        &self.keypoints[joint as usize]
    }

    /// All keypoints in skeleton order
    pub fn keypoints(&self) -> &[Keypoint] {
        &self.keypoints
    }

    /// Number of joints above the confidence threshold
    pub fn confident_count(&self, min_confidence: f64) -> usize {
        self.keypoints
            .iter()
            .filter(|kp| kp.is_confident(min_confidence))
            .count()
    }

    /// Summed shooting-arm confidence (shoulder + elbow + wrist) for one side
    pub fn arm_confidence(&self, side: Side) -> f64 {
        let joints = side.joints();
        self.get(joints.shoulder).confidence
            + self.get(joints.elbow).confidence
            + self.get(joints.wrist).confidence
    }

    /// Side whose shooting arm was detected with more confidence.
    ///
    /// Ties go to the right side.
    pub fn dominant_side(&self) -> Side {
        if self.arm_confidence(Side::Left) > self.arm_confidence(Side::Right) {
            Side::Left
        } else {
            Side::Right
        }
    }
}

impl Default for Skeleton {
    fn default() -> Self {
        Self::empty()
    }
}
