/// Keypoint Processing Service
///
/// This service turns raw detector output into an analyzed frame:
/// - Name normalization onto the canonical skeleton (primary name, then aliases)
/// - Coordinate conversion into image percentages
/// - Dominant-side selection, made once per frame
/// - Joint angle calculations (elbow, knee, wrist, shoulder, hip, release, tilts)
/// - Shooting phase classification

use std::collections::HashMap;

use tracing::debug;

use crate::models::keypoint::{CoordinateSpace, Joint, Keypoint, Skeleton, MIN_CONFIDENCE};
use crate::models::shot_frame::{AngleMeasurement, FrameAnalysis, ShootingAngles};
use crate::services::geometry::{
    angle_between, forearm_from_vertical, line_tilt, release_trajectory,
};
use crate::services::phase_classifier::PhaseClassifier;

/// Keypoint processor service
#[derive(Debug, Clone)]
pub struct KeypointProcessor {
    /// Minimum confidence threshold for trusted keypoints
    min_confidence: f64,
    /// Coordinate system the detector reports in
    coordinate_space: CoordinateSpace,
    classifier: PhaseClassifier,
}

impl KeypointProcessor {
    /// Create a new keypoint processor with default configuration
    pub fn new() -> Self {
        Self {
            min_confidence: MIN_CONFIDENCE,
            coordinate_space: CoordinateSpace::Percent,
            classifier: PhaseClassifier::new(),
        }
    }

    /// Set minimum confidence threshold
    pub fn with_min_confidence(mut self, min_confidence: f64) -> Self {
        self.min_confidence = min_confidence.clamp(0.0, 1.0);
        self
    }

    /// Set the coordinate system of incoming keypoints
    pub fn with_coordinate_space(mut self, coordinate_space: CoordinateSpace) -> Self {
        self.coordinate_space = coordinate_space;
        self
    }

    pub fn with_classifier(mut self, classifier: PhaseClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn min_confidence(&self) -> f64 {
        self.min_confidence
    }

    /// Map detector keypoints onto the canonical skeleton
    ///
    /// For each joint the canonical name is tried first, then its aliases in
    /// order; the first hit wins. Joints with no hit keep the placeholder.
    /// When a detector repeats a name, the first occurrence is used.
    pub fn normalize_keypoints(&self, keypoints: &[Keypoint]) -> Skeleton {
        let mut by_name: HashMap<&str, &Keypoint> = HashMap::with_capacity(keypoints.len());
        for kp in keypoints {
            by_name.entry(kp.name.as_str()).or_insert(kp);
        }

        let mut skeleton = Skeleton::empty();
        for joint in Joint::ALL {
            let found = std::iter::once(joint.name())
                .chain(joint.aliases().iter().copied())
                .find_map(|name| by_name.get(name));

            if let Some(kp) = found {
                skeleton.set(joint, kp.to_percent(self.coordinate_space));
            }
        }

        debug!(
            "Normalized {} detector keypoints, {} joints above confidence {}",
            keypoints.len(),
            skeleton.confident_count(self.min_confidence),
            self.min_confidence
        );

        skeleton
    }

    /// Calculate all shooting angles for a skeleton
    ///
    /// The dominant side is chosen once and used for every angle so a partial
    /// detection cannot mix left and right joints.
    pub fn calculate_angles(&self, skeleton: &Skeleton) -> ShootingAngles {
        let side = skeleton.dominant_side();
        let joints = side.joints();

        let shoulder = skeleton.get(joints.shoulder);
        let elbow = skeleton.get(joints.elbow);
        let wrist = skeleton.get(joints.wrist);
        let hip = skeleton.get(joints.hip);
        let knee = skeleton.get(joints.knee);
        let ankle = skeleton.get(joints.ankle);

        let left_shoulder = skeleton.get(Joint::LeftShoulder);
        let right_shoulder = skeleton.get(Joint::RightShoulder);
        let left_hip = skeleton.get(Joint::LeftHip);
        let right_hip = skeleton.get(Joint::RightHip);

        ShootingAngles {
            side,
            elbow: AngleMeasurement::new(
                angle_between(shoulder, elbow, wrist),
                min_confidence(&[shoulder, elbow, wrist]),
            ),
            knee: AngleMeasurement::new(
                angle_between(hip, knee, ankle),
                min_confidence(&[hip, knee, ankle]),
            ),
            wrist: AngleMeasurement::new(
                forearm_from_vertical(elbow, wrist),
                min_confidence(&[elbow, wrist]),
            ),
            shoulder: AngleMeasurement::new(
                angle_between(hip, shoulder, elbow),
                min_confidence(&[hip, shoulder, elbow]),
            ),
            hip: AngleMeasurement::new(
                angle_between(shoulder, hip, knee),
                min_confidence(&[shoulder, hip, knee]),
            ),
            release: AngleMeasurement::new(
                release_trajectory(elbow, wrist),
                min_confidence(&[elbow, wrist]),
            ),
            shoulder_tilt: AngleMeasurement::new(
                line_tilt(left_shoulder, right_shoulder),
                min_confidence(&[left_shoulder, right_shoulder]),
            ),
            hip_tilt: AngleMeasurement::new(
                line_tilt(left_hip, right_hip),
                min_confidence(&[left_hip, right_hip]),
            ),
        }
    }

    /// Process a complete frame: normalize, calculate angles, classify phase
    pub fn process_frame(&self, keypoints: &[Keypoint]) -> FrameAnalysis {
        let skeleton = self.normalize_keypoints(keypoints);
        let angles = self.calculate_angles(&skeleton);
        let phase = self.classifier.classify(&skeleton, &angles);

        FrameAnalysis {
            skeleton,
            angles,
            phase,
        }
    }
}

impl Default for KeypointProcessor {
    fn default() -> Self {
        Self::new()
    }
}

fn min_confidence(points: &[&Keypoint]) -> f64 {
    points
        .iter()
        .map(|kp| kp.confidence)
        .fold(f64::INFINITY, f64::min)
        .min(1.0)
}
