/// Shooting phase classifier
///
/// A priority-ordered ladder of geometric rules evaluated on a single frame;
/// the first rule that matches wins. There is no temporal state: smoothing
/// across frames is left to whoever supplies the frames.

use crate::models::keypoint::Skeleton;
use crate::models::shot_frame::{PhaseClassification, ShootingAngles, ShootingPhase};

pub const RELEASE_CONFIDENCE: f64 = 0.9;
pub const FOLLOW_THROUGH_CONFIDENCE: f64 = 0.85;
pub const RISE_CONFIDENCE: f64 = 0.8;
pub const DIP_CONFIDENCE: f64 = 0.75;
pub const STANCE_CONFIDENCE: f64 = 0.7;

/// Phase classifier over one frame's skeleton and angles
#[derive(Debug, Clone)]
pub struct PhaseClassifier {
    /// How far (percent of image height) the wrist must clear the shoulder for a release
    release_margin: f64,
    /// Band around shoulder height in which a rising wrist counts as the set point
    rise_margin: f64,
}

impl PhaseClassifier {
    pub fn new() -> Self {
        Self {
            release_margin: 5.0,
            rise_margin: 10.0,
        }
    }

    pub fn with_release_margin(mut self, margin: f64) -> Self {
        self.release_margin = margin.max(0.0);
        self
    }

    pub fn with_rise_margin(mut self, margin: f64) -> Self {
        self.rise_margin = margin.max(0.0);
        self
    }

    /// Classify the frame's shooting phase
    pub fn classify(&self, skeleton: &Skeleton, angles: &ShootingAngles) -> PhaseClassification {
        let joints = angles.side.joints();
        let wrist = skeleton.get(joints.wrist);
        let shoulder = skeleton.get(joints.shoulder);
        let knee = skeleton.get(joints.knee);

        let elbow_angle = angles.elbow.degrees;
        let knee_angle = angles.knee.degrees;
        let wrist_angle = angles.wrist.degrees;

        // y grows downward: positive clearance means the wrist is higher
        let wrist_clearance = shoulder.y - wrist.y;

        if wrist_clearance > self.release_margin && elbow_angle > 150.0 {
            return PhaseClassification {
                phase: ShootingPhase::Release,
                confidence: RELEASE_CONFIDENCE,
            };
        }

        if wrist_clearance > 0.0 && elbow_angle > 160.0 && wrist_angle < 30.0 {
            return PhaseClassification {
                phase: ShootingPhase::FollowThrough,
                confidence: FOLLOW_THROUGH_CONFIDENCE,
            };
        }

        if wrist_clearance.abs() <= self.rise_margin && elbow_angle > 90.0 && elbow_angle < 150.0 {
            return PhaseClassification {
                phase: ShootingPhase::Rise,
                confidence: RISE_CONFIDENCE,
            };
        }

        if wrist.y > shoulder.y && wrist.y < knee.y && knee_angle < 160.0 {
            return PhaseClassification {
                phase: ShootingPhase::Dip,
                confidence: DIP_CONFIDENCE,
            };
        }

        PhaseClassification {
            phase: ShootingPhase::Stance,
            confidence: STANCE_CONFIDENCE,
        }
    }
}

impl Default for PhaseClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::keypoint::{Joint, Keypoint, Side};
    use crate::models::shot_frame::AngleMeasurement;

    fn skeleton(wrist_y: f64, shoulder_y: f64, knee_y: f64) -> Skeleton {
        let mut skeleton = Skeleton::empty();
        skeleton.set(Joint::RightWrist, Keypoint::new(55.0, wrist_y, 0.9, "w"));
        skeleton.set(Joint::RightShoulder, Keypoint::new(50.0, shoulder_y, 0.9, "s"));
        skeleton.set(Joint::RightKnee, Keypoint::new(50.0, knee_y, 0.9, "k"));
        skeleton
    }

    fn angles(elbow: f64, knee: f64, wrist: f64) -> ShootingAngles {
        let m = |deg| AngleMeasurement::new(deg, 0.9);
        ShootingAngles {
            side: Side::Right,
            elbow: m(elbow),
            knee: m(knee),
            wrist: m(wrist),
            shoulder: m(90.0),
            hip: m(170.0),
            release: m(45.0),
            shoulder_tilt: m(0.0),
            hip_tilt: m(0.0),
        }
    }

    #[test]
    fn test_release() {
        let result = PhaseClassifier::new().classify(&skeleton(15.0, 30.0, 75.0), &angles(165.0, 175.0, 10.0));
        assert_eq!(result.phase, ShootingPhase::Release);
        assert_eq!(result.confidence, 0.9);
    }

    #[test]
    fn test_follow_through_when_wrist_just_above_shoulder() {
        let result = PhaseClassifier::new().classify(&skeleton(27.0, 30.0, 75.0), &angles(170.0, 175.0, 20.0));
        assert_eq!(result.phase, ShootingPhase::FollowThrough);
        assert_eq!(result.confidence, 0.85);
    }

    #[test]
    fn test_rise() {
        let result = PhaseClassifier::new().classify(&skeleton(33.0, 30.0, 75.0), &angles(100.0, 150.0, 40.0));
        assert_eq!(result.phase, ShootingPhase::Rise);
        assert_eq!(result.confidence, 0.8);
    }

    #[test]
    fn test_dip() {
        let result = PhaseClassifier::new().classify(&skeleton(55.0, 30.0, 75.0), &angles(80.0, 120.0, 90.0));
        assert_eq!(result.phase, ShootingPhase::Dip);
        assert_eq!(result.confidence, 0.75);
    }

    #[test]
    fn test_stance_fallback() {
        let result = PhaseClassifier::new().classify(&skeleton(55.0, 30.0, 75.0), &angles(80.0, 175.0, 90.0));
        assert_eq!(result.phase, ShootingPhase::Stance);
        assert_eq!(result.confidence, 0.7);
    }

    #[test]
    fn test_release_takes_priority_over_follow_through() {
        // satisfies both the release and follow-through rules
        let result = PhaseClassifier::new().classify(&skeleton(10.0, 30.0, 75.0), &angles(172.0, 175.0, 5.0));
        assert_eq!(result.phase, ShootingPhase::Release);
    }

    #[test]
    fn test_placeholder_skeleton_is_stance() {
        let skeleton = Skeleton::empty();
        let result = PhaseClassifier::new().classify(&skeleton, &angles(90.0, 90.0, 90.0));
        assert_eq!(result.phase, ShootingPhase::Stance);
    }
}
