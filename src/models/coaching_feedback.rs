use serde::{Deserialize, Serialize};

use crate::models::comparison::ComparisonStatus;
use crate::models::drill::{Drill, DrillId};
use crate::models::shooting_metrics::ShootingMetric;

/// Age-derived coaching register, youngest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AgeGroup {
    Elementary,
    MiddleSchool,
    HighSchool,
    College,
    Professional,
}

impl AgeGroup {
    /// Map an age onto its tier; each band's upper bound is inclusive
    pub fn from_age(age: u32) -> Self {
        match age {
            0..=11 => AgeGroup::Elementary,
            12..=14 => AgeGroup::MiddleSchool,
            15..=18 => AgeGroup::HighSchool,
            19..=22 => AgeGroup::College,
            _ => AgeGroup::Professional,
        }
    }

    /// Tier for an optional age; unknown ages coach at high-school level
    pub fn from_optional_age(age: Option<u32>) -> Self {
        age.map(Self::from_age).unwrap_or(AgeGroup::HighSchool)
    }

    /// Whether feedback for this tier includes a peer comparison
    pub fn includes_peer_comparison(&self) -> bool {
        *self >= AgeGroup::HighSchool
    }

    pub fn config(&self) -> TierConfig {
        match self {
            AgeGroup::Elementary => TierConfig {
                tone: "encouraging",
                vocabulary: "simple",
                focus_areas: &["having fun", "balance", "using your legs"],
                max_items: 3,
                base_drills: [
                    DrillId::FormShooting,
                    DrillId::AroundTheWorld,
                    DrillId::FollowThroughHold,
                ],
            },
            AgeGroup::MiddleSchool => TierConfig {
                tone: "supportive",
                vocabulary: "basic",
                focus_areas: &[
                    "consistent form",
                    "balance",
                    "elbow alignment",
                    "follow-through",
                ],
                max_items: 4,
                base_drills: [
                    DrillId::FormShooting,
                    DrillId::OneHandForm,
                    DrillId::CatchAndShoot,
                ],
            },
            AgeGroup::HighSchool => TierConfig {
                tone: "constructive",
                vocabulary: "intermediate",
                focus_areas: &[
                    "shot mechanics",
                    "release consistency",
                    "game-speed shooting",
                    "footwork",
                ],
                max_items: 5,
                base_drills: [
                    DrillId::CatchAndShoot,
                    DrillId::GameSpeed,
                    DrillId::OneHandForm,
                ],
            },
            AgeGroup::College => TierConfig {
                tone: "analytical",
                vocabulary: "advanced",
                focus_areas: &[
                    "mechanical efficiency",
                    "release timing",
                    "shot versatility",
                    "range extension",
                    "fatigue resistance",
                ],
                max_items: 6,
                base_drills: [
                    DrillId::GameSpeed,
                    DrillId::FatigueShooting,
                    DrillId::QuickRelease,
                ],
            },
            AgeGroup::Professional => TierConfig {
                tone: "technical",
                vocabulary: "technical",
                focus_areas: &[
                    "micro-adjustments",
                    "release speed",
                    "biomechanical efficiency",
                    "consistency under pressure",
                    "shot selection",
                    "recovery mechanics",
                ],
                max_items: 7,
                base_drills: [
                    DrillId::QuickRelease,
                    DrillId::FatigueShooting,
                    DrillId::GameSpeed,
                ],
            },
        }
    }
}

impl std::fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgeGroup::Elementary => write!(f, "ELEMENTARY"),
            AgeGroup::MiddleSchool => write!(f, "MIDDLE_SCHOOL"),
            AgeGroup::HighSchool => write!(f, "HIGH_SCHOOL"),
            AgeGroup::College => write!(f, "COLLEGE"),
            AgeGroup::Professional => write!(f, "PROFESSIONAL"),
        }
    }
}

/// Static per-tier feedback configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierConfig {
    pub tone: &'static str,
    pub vocabulary: &'static str,
    pub focus_areas: &'static [&'static str],
    /// Cap on strengths and on improvements surfaced
    pub max_items: usize,
    pub base_drills: [DrillId; 3],
}

/// One strength or improvement entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackItem {
    pub metric: ShootingMetric,
    pub status: ComparisonStatus,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cue: Option<String>,
}

/// Tiered coaching output handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachingFeedback {
    pub age_group: AgeGroup,
    pub tone: String,
    pub vocabulary: String,
    pub focus_areas: Vec<String>,
    pub overall_message: String,
    pub strengths: Vec<FeedbackItem>,
    pub improvements: Vec<FeedbackItem>,
    pub drills: Vec<Drill>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peer_comparison: Option<String>,
}
