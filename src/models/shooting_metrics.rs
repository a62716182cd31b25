use serde::{Deserialize, Serialize};

/// Tracked shooting mechanics, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShootingMetric {
    ElbowAngle,
    KneeAngle,
    ReleaseAngle,
    ShoulderTilt,
    HipTilt,
    FollowThroughAngle,
}

impl ShootingMetric {
    /// Every metric, elbow through follow-through
    pub const ALL: [ShootingMetric; 6] = [
        ShootingMetric::ElbowAngle,
        ShootingMetric::KneeAngle,
        ShootingMetric::ReleaseAngle,
        ShootingMetric::ShoulderTilt,
        ShootingMetric::HipTilt,
        ShootingMetric::FollowThroughAngle,
    ];

    /// Metrics the similarity engine compares against the catalog
    pub const MATCHING: [ShootingMetric; 4] = [
        ShootingMetric::ElbowAngle,
        ShootingMetric::KneeAngle,
        ShootingMetric::ReleaseAngle,
        ShootingMetric::ShoulderTilt,
    ];

    /// Human readable name; always contains the body-part keyword
    pub fn label(&self) -> &'static str {
        match self {
            Self::ElbowAngle => "Elbow angle",
            Self::KneeAngle => "Knee bend",
            Self::ReleaseAngle => "Release angle",
            Self::ShoulderTilt => "Shoulder tilt",
            Self::HipTilt => "Hip tilt",
            Self::FollowThroughAngle => "Follow-through",
        }
    }
}

impl std::fmt::Display for ShootingMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A user's measured mechanics; any metric may be missing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserShootingMetrics {
    #[serde(default, alias = "elbow", skip_serializing_if = "Option::is_none")]
    pub elbow_angle: Option<f64>,
    #[serde(default, alias = "knee", skip_serializing_if = "Option::is_none")]
    pub knee_angle: Option<f64>,
    /// Forearm elevation above horizontal at the release point
    #[serde(default, alias = "release", skip_serializing_if = "Option::is_none")]
    pub release_angle: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shoulder_tilt: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hip_tilt: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_through_angle: Option<f64>,
}

impl UserShootingMetrics {
    pub fn get(&self, metric: ShootingMetric) -> Option<f64> {
        match metric {
            ShootingMetric::ElbowAngle => self.elbow_angle,
            ShootingMetric::KneeAngle => self.knee_angle,
            ShootingMetric::ReleaseAngle => self.release_angle,
            ShootingMetric::ShoulderTilt => self.shoulder_tilt,
            ShootingMetric::HipTilt => self.hip_tilt,
            ShootingMetric::FollowThroughAngle => self.follow_through_angle,
        }
    }

    pub fn set(&mut self, metric: ShootingMetric, value: Option<f64>) {
        let slot = match metric {
            ShootingMetric::ElbowAngle => &mut self.elbow_angle,
            ShootingMetric::KneeAngle => &mut self.knee_angle,
            ShootingMetric::ReleaseAngle => &mut self.release_angle,
            ShootingMetric::ShoulderTilt => &mut self.shoulder_tilt,
            ShootingMetric::HipTilt => &mut self.hip_tilt,
            ShootingMetric::FollowThroughAngle => &mut self.follow_through_angle,
        };
        *slot = value;
    }

    /// True when no metric was supplied at all
    pub fn is_empty(&self) -> bool {
        ShootingMetric::ALL.iter().all(|m| self.get(*m).is_none())
    }

    /// Fill metrics missing here from `fallback`; values already present win
    pub fn or(self, fallback: &UserShootingMetrics) -> UserShootingMetrics {
        let mut merged = self;
        for metric in ShootingMetric::ALL {
            if merged.get(metric).is_none() {
                merged.set(metric, fallback.get(metric));
            }
        }
        merged
    }
}

/// Reference shooter's stored mechanics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShooterMetrics {
    #[serde(alias = "elbow")]
    pub elbow_angle: f64,
    #[serde(alias = "knee")]
    pub knee_angle: f64,
    /// Forearm elevation above horizontal at the release point
    #[serde(alias = "release")]
    pub release_angle: f64,
    pub shoulder_tilt: f64,
    pub hip_tilt: f64,
    pub follow_through_angle: f64,
}

impl ShooterMetrics {
    pub fn get(&self, metric: ShootingMetric) -> f64 {
        match metric {
            ShootingMetric::ElbowAngle => self.elbow_angle,
            ShootingMetric::KneeAngle => self.knee_angle,
            ShootingMetric::ReleaseAngle => self.release_angle,
            ShootingMetric::ShoulderTilt => self.shoulder_tilt,
            ShootingMetric::HipTilt => self.hip_tilt,
            ShootingMetric::FollowThroughAngle => self.follow_through_angle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_order() {
        assert_eq!(ShootingMetric::ALL[0], ShootingMetric::ElbowAngle);
        assert_eq!(ShootingMetric::ALL[5], ShootingMetric::FollowThroughAngle);
    }

    #[test]
    fn test_merge_prefers_supplied_values() {
        let supplied = UserShootingMetrics {
            elbow_angle: Some(88.0),
            ..Default::default()
        };
        let derived = UserShootingMetrics {
            elbow_angle: Some(95.0),
            knee_angle: Some(120.0),
            ..Default::default()
        };

        let merged = supplied.or(&derived);
        assert_eq!(merged.elbow_angle, Some(88.0));
        assert_eq!(merged.knee_angle, Some(120.0));
        assert_eq!(merged.release_angle, None);
    }

    #[test]
    fn test_deserialize_short_names() {
        let metrics: UserShootingMetrics =
            serde_json::from_str(r#"{"elbow": 90, "shoulderTilt": 3.5}"#).unwrap();
        assert_eq!(metrics.elbow_angle, Some(90.0));
        assert_eq!(metrics.shoulder_tilt, Some(3.5));
        assert!(!metrics.is_empty());
        assert!(UserShootingMetrics::default().is_empty());
    }
}
