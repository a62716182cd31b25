use serde::{Deserialize, Serialize};

use crate::models::coaching_feedback::CoachingFeedback;
use crate::models::shooter_profile::ShooterProfile;
use crate::models::shooting_metrics::{ShootingMetric, UserShootingMetrics};
use crate::models::shot_frame::FrameAnalysis;

/// Similarity sub-scores, each 0-100
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarityScore {
    pub physical: f64,
    pub skill: f64,
    pub mechanics: f64,
    pub overall: f64,
}

/// A reference shooter ranked against the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedShooter {
    pub shooter: ShooterProfile,
    pub similarity_score: SimilarityScore,
    pub match_reasons: Vec<String>,
    /// 1-indexed position after sorting by overall score
    pub rank: usize,
}

/// Outcome of a similarity search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSearch {
    pub matches: Vec<MatchedShooter>,
    /// The hard filters left too few candidates and the whole catalog was scored
    pub widened: bool,
}

/// Target value for one metric with its spread across the top matches
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricTarget {
    pub metric: ShootingMetric,
    /// Mean, rounded to the nearest integer
    pub value: f64,
    /// Population standard deviation, rounded to one decimal
    pub std_dev: f64,
}

/// Optimal mechanics derived from the user's closest reference shooters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimalMechanics {
    /// Number of matches the targets were computed from
    pub sample_size: usize,
    pub targets: Vec<MetricTarget>,
}

impl OptimalMechanics {
    pub fn get(&self, metric: ShootingMetric) -> Option<&MetricTarget> {
        self.targets.iter().find(|target| target.metric == metric)
    }
}

/// Classification of a single metric against its target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComparisonStatus {
    Good,
    NeedsWork,
    Critical,
}

impl std::fmt::Display for ComparisonStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComparisonStatus::Good => write!(f, "GOOD"),
            ComparisonStatus::NeedsWork => write!(f, "NEEDS_WORK"),
            ComparisonStatus::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// User metric compared to its optimal target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MechanicComparison {
    pub metric: ShootingMetric,
    pub user_value: f64,
    pub optimal_value: f64,
    /// Signed, user minus optimal
    pub difference: f64,
    pub status: ComparisonStatus,
    pub recommendation: String,
}

impl MechanicComparison {
    /// Which side of the target the user is on; `None` when exactly on it
    pub fn direction(&self) -> Option<DeviationDirection> {
        if self.difference > 0.0 {
            Some(DeviationDirection::TooHigh)
        } else if self.difference < 0.0 {
            Some(DeviationDirection::TooLow)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviationDirection {
    TooHigh,
    TooLow,
}

impl std::fmt::Display for DeviationDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeviationDirection::TooHigh => write!(f, "too high"),
            DeviationDirection::TooLow => write!(f, "too low"),
        }
    }
}

/// Complete output of one comparison run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame: Option<FrameAnalysis>,
    /// Metrics actually compared (supplied values over frame-derived ones)
    pub user_metrics: UserShootingMetrics,
    pub matches: Vec<MatchedShooter>,
    pub optimal_mechanics: OptimalMechanics,
    pub comparisons: Vec<MechanicComparison>,
    pub feedback: CoachingFeedback,
    /// Critical items first, at most five
    pub recommendations: Vec<String>,
    pub search_widened: bool,
}
