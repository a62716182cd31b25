/// Per-frame shot analysis models
///
/// A frame is analyzed into a canonical skeleton, one set of joint angles
/// computed from a single dominant side, and a shooting-phase classification.

use serde::{Deserialize, Serialize};

use crate::models::keypoint::{Side, Skeleton};
use crate::models::shooting_metrics::UserShootingMetrics;

/// Angle calculation result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleMeasurement {
    /// Angle in degrees
    pub degrees: f64,
    /// Confidence (minimum of the keypoints used)
    pub confidence: f64,
}

impl AngleMeasurement {
    pub fn new(degrees: f64, confidence: f64) -> Self {
        Self {
            degrees,
            confidence,
        }
    }

    /// Angle value if the measurement clears the confidence threshold
    pub fn trusted(&self, min_confidence: f64) -> Option<f64> {
        (self.confidence >= min_confidence).then_some(self.degrees)
    }
}

/// Joint angles for one frame, all taken from the same body side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShootingAngles {
    /// Side every angle below was computed from
    pub side: Side,
    /// Shoulder-elbow-wrist
    pub elbow: AngleMeasurement,
    /// Hip-knee-ankle
    pub knee: AngleMeasurement,
    /// Forearm deviation from vertical (0 = forearm pointing straight up)
    pub wrist: AngleMeasurement,
    /// Hip-shoulder-elbow (upper arm elevation)
    pub shoulder: AngleMeasurement,
    /// Shoulder-hip-knee
    pub hip: AngleMeasurement,
    /// Forearm elevation above horizontal, -90 to 90
    pub release: AngleMeasurement,
    /// Shoulder line deviation from horizontal
    pub shoulder_tilt: AngleMeasurement,
    /// Hip line deviation from horizontal
    pub hip_tilt: AngleMeasurement,
}

/// Discrete stage of a shot motion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShootingPhase {
    Stance,
    Dip,
    Rise,
    Release,
    FollowThrough,
}

impl std::fmt::Display for ShootingPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShootingPhase::Stance => write!(f, "stance"),
            ShootingPhase::Dip => write!(f, "dip"),
            ShootingPhase::Rise => write!(f, "rise"),
            ShootingPhase::Release => write!(f, "release"),
            ShootingPhase::FollowThrough => write!(f, "follow_through"),
        }
    }
}

/// Phase with the classifier's confidence in it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseClassification {
    pub phase: ShootingPhase,
    pub confidence: f64,
}

/// Everything derived from one frame of keypoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameAnalysis {
    pub skeleton: Skeleton,
    pub angles: ShootingAngles,
    pub phase: PhaseClassification,
}

impl FrameAnalysis {
    /// Metrics readable from this single frame.
    ///
    /// Only confident angles are reported. The release angle only exists once
    /// the ball is out (release or follow-through), and the follow-through
    /// angle only during the follow-through itself.
    pub fn current_metrics(&self, min_confidence: f64) -> UserShootingMetrics {
        let release_angle = match self.phase.phase {
            ShootingPhase::Release | ShootingPhase::FollowThrough => {
                self.angles.release.trusted(min_confidence)
            }
            _ => None,
        };
        let follow_through_angle = match self.phase.phase {
            ShootingPhase::FollowThrough => self.angles.elbow.trusted(min_confidence),
            _ => None,
        };

        UserShootingMetrics {
            elbow_angle: self.angles.elbow.trusted(min_confidence),
            knee_angle: self.angles.knee.trusted(min_confidence),
            release_angle,
            shoulder_tilt: self.angles.shoulder_tilt.trusted(min_confidence),
            hip_tilt: self.angles.hip_tilt.trusted(min_confidence),
            follow_through_angle,
        }
    }
}

/// A run of consecutive frames sharing one phase
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseSegment {
    pub phase: ShootingPhase,
    pub start_frame: usize,
    pub end_frame: usize,
}

impl PhaseSegment {
    pub fn frame_count(&self) -> usize {
        self.end_frame - self.start_frame + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analysis(phase: ShootingPhase) -> FrameAnalysis {
        let m = |deg| AngleMeasurement::new(deg, 0.9);
        FrameAnalysis {
            skeleton: Skeleton::empty(),
            angles: ShootingAngles {
                side: Side::Right,
                elbow: m(172.0),
                knee: m(168.0),
                wrist: m(10.0),
                shoulder: m(150.0),
                hip: m(175.0),
                release: m(-90.0),
                shoulder_tilt: m(1.0),
                hip_tilt: m(2.0),
            },
            phase: PhaseClassification {
                phase,
                confidence: 0.8,
            },
        }
    }

    #[test]
    fn test_release_angle_only_after_release() {
        for phase in [ShootingPhase::Stance, ShootingPhase::Dip, ShootingPhase::Rise] {
            let metrics = analysis(phase).current_metrics(0.3);
            assert_eq!(metrics.release_angle, None, "{phase}");
            assert_eq!(metrics.elbow_angle, Some(172.0));
        }

        assert_eq!(analysis(ShootingPhase::Release).current_metrics(0.3).release_angle, Some(-90.0));
        assert_eq!(
            analysis(ShootingPhase::FollowThrough).current_metrics(0.3).release_angle,
            Some(-90.0)
        );
    }

    #[test]
    fn test_follow_through_angle_only_in_follow_through() {
        assert_eq!(analysis(ShootingPhase::Release).current_metrics(0.3).follow_through_angle, None);
        assert_eq!(
            analysis(ShootingPhase::FollowThrough)
                .current_metrics(0.3)
                .follow_through_angle,
            Some(172.0)
        );
    }

    #[test]
    fn test_trusted_measurement() {
        let angle = AngleMeasurement::new(92.0, 0.25);
        assert_eq!(angle.trusted(0.3), None);
        assert_eq!(angle.trusted(0.2), Some(92.0));
    }

    #[test]
    fn test_phase_serialization() {
        let json = serde_json::to_string(&ShootingPhase::FollowThrough).unwrap();
        assert_eq!(json, "\"follow_through\"");
        assert_eq!(ShootingPhase::FollowThrough.to_string(), "follow_through");
    }

    #[test]
    fn test_segment_frame_count() {
        let segment = PhaseSegment {
            phase: ShootingPhase::Dip,
            start_frame: 3,
            end_frame: 7,
        };
        assert_eq!(segment.frame_count(), 5);
    }
}
