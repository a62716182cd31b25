use serde::{Deserialize, Serialize};

use crate::models::coaching_feedback::AgeGroup;

/// Every drill the coaching engine can prescribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DrillId {
    FormShooting,
    AroundTheWorld,
    OneHandForm,
    WallElbow,
    ChairSquat,
    SquareUp,
    BalanceHold,
    FollowThroughHold,
    ArcTarget,
    CatchAndShoot,
    GameSpeed,
    FatigueShooting,
    QuickRelease,
}

impl DrillId {
    pub const ALL: [DrillId; 13] = [
        DrillId::FormShooting,
        DrillId::AroundTheWorld,
        DrillId::OneHandForm,
        DrillId::WallElbow,
        DrillId::ChairSquat,
        DrillId::SquareUp,
        DrillId::BalanceHold,
        DrillId::FollowThroughHold,
        DrillId::ArcTarget,
        DrillId::CatchAndShoot,
        DrillId::GameSpeed,
        DrillId::FatigueShooting,
        DrillId::QuickRelease,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DrillId::FormShooting => "form-shooting",
            DrillId::AroundTheWorld => "around-the-world",
            DrillId::OneHandForm => "one-hand-form",
            DrillId::WallElbow => "wall-elbow",
            DrillId::ChairSquat => "chair-squat",
            DrillId::SquareUp => "square-up",
            DrillId::BalanceHold => "balance-hold",
            DrillId::FollowThroughHold => "follow-through-hold",
            DrillId::ArcTarget => "arc-target",
            DrillId::CatchAndShoot => "catch-and-shoot",
            DrillId::GameSpeed => "game-speed",
            DrillId::FatigueShooting => "fatigue-shooting",
            DrillId::QuickRelease => "quick-release",
        }
    }

    /// Look up a drill id, falling back to form shooting for unknown ids
    pub fn from_id(id: &str) -> Self {
        let id = id.trim().to_lowercase();
        DrillId::ALL
            .into_iter()
            .find(|drill| drill.as_str() == id)
            .unwrap_or(DrillId::FormShooting)
    }

    /// Harder drill to move on to once this one is mastered
    pub fn progression(&self) -> Option<DrillId> {
        match self {
            DrillId::FormShooting => Some(DrillId::OneHandForm),
            DrillId::AroundTheWorld => Some(DrillId::CatchAndShoot),
            DrillId::OneHandForm => Some(DrillId::CatchAndShoot),
            DrillId::WallElbow => Some(DrillId::OneHandForm),
            DrillId::ChairSquat => Some(DrillId::CatchAndShoot),
            DrillId::SquareUp => Some(DrillId::CatchAndShoot),
            DrillId::BalanceHold => Some(DrillId::FollowThroughHold),
            DrillId::FollowThroughHold => Some(DrillId::ArcTarget),
            DrillId::ArcTarget => Some(DrillId::GameSpeed),
            DrillId::CatchAndShoot => Some(DrillId::GameSpeed),
            DrillId::GameSpeed => Some(DrillId::FatigueShooting),
            DrillId::FatigueShooting => Some(DrillId::QuickRelease),
            DrillId::QuickRelease => None,
        }
    }
}

/// A prescribed practice drill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Drill {
    pub id: DrillId,
    pub name: String,
    pub description: String,
    pub focus: String,
    pub reps: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_drill: Option<DrillId>,
}

impl Drill {
    /// Build the drill library entry for an id
    pub fn from_library(id: DrillId) -> Self {
        let (name, description, focus, reps) = match id {
            DrillId::FormShooting => (
                "Form Shooting",
                "Shoot from one step in front of the rim, focusing on a smooth, repeatable motion.",
                "overall form",
                "3 sets of 10 makes",
            ),
            DrillId::AroundTheWorld => (
                "Around the World",
                "Make a shot from each of five spots around the paint before moving to the next.",
                "consistency",
                "2 rounds",
            ),
            DrillId::OneHandForm => (
                "One-Hand Form Shooting",
                "Shoot with only your shooting hand so the guide hand cannot push the ball.",
                "release",
                "3 sets of 10 makes",
            ),
            DrillId::WallElbow => (
                "Wall Elbow Alignment",
                "Stand beside a wall and practice the shooting motion so your elbow tracks straight up the wall.",
                "elbow",
                "3 sets of 15 reps",
            ),
            DrillId::ChairSquat => (
                "Chair Squat Shooting",
                "Touch a chair with your hips, then rise straight into your shot to build leg drive.",
                "knee",
                "3 sets of 10 reps",
            ),
            DrillId::SquareUp => (
                "Square-Up Footwork",
                "Catch, hop into a square stance with level shoulders, then shoot.",
                "shoulder",
                "3 sets of 8 makes per side",
            ),
            DrillId::BalanceHold => (
                "Balance Hold Finish",
                "Land in the same spot you jumped from and hold the landing for two seconds.",
                "hip",
                "2 sets of 10 shots",
            ),
            DrillId::FollowThroughHold => (
                "Follow-Through Hold",
                "Hold your shooting arm extended with a relaxed wrist until the ball hits the rim.",
                "follow-through",
                "2 sets of 15 shots",
            ),
            DrillId::ArcTarget => (
                "High-Arc Target Shooting",
                "Shoot over a raised target or a partner's hand to build a higher release angle.",
                "release",
                "3 sets of 10 shots",
            ),
            DrillId::CatchAndShoot => (
                "Catch-and-Shoot",
                "Receive passes from different angles and shoot in one fluid motion.",
                "rhythm",
                "4 sets of 10 shots",
            ),
            DrillId::GameSpeed => (
                "Game-Speed Shooting",
                "Sprint to a spot, catch and shoot at full game speed.",
                "game transfer",
                "5 spots x 5 shots",
            ),
            DrillId::FatigueShooting => (
                "Fatigue Shooting",
                "Shoot free throws and threes immediately after conditioning sprints.",
                "consistency under fatigue",
                "5 rounds",
            ),
            DrillId::QuickRelease => (
                "Quick-Release Ladder",
                "Shorten the time from catch to release while keeping mechanics identical.",
                "release speed",
                "4 sets of 8 shots",
            ),
        };

        Self {
            id,
            name: name.to_string(),
            description: description.to_string(),
            focus: focus.to_string(),
            reps: reps.to_string(),
            next_drill: id.progression(),
        }
    }
}

/// Keywords in improvement titles that trigger a corrective drill, in priority order
pub const DRILL_KEYWORDS: [&str; 6] = ["elbow", "knee", "release", "shoulder", "hip", "follow"];

/// Library drill for an id string; unknown ids get form shooting
pub fn drill_by_id(id: &str) -> Drill {
    Drill::from_library(DrillId::from_id(id))
}

/// The fixed three-drill base set for a tier
pub fn base_drills(age_group: AgeGroup) -> [DrillId; 3] {
    age_group.config().base_drills
}

/// Corrective drill for one of [`DRILL_KEYWORDS`]
pub fn conditional_drill(keyword: &str) -> Option<DrillId> {
    match keyword {
        "elbow" => Some(DrillId::WallElbow),
        "knee" => Some(DrillId::ChairSquat),
        "release" => Some(DrillId::ArcTarget),
        "shoulder" => Some(DrillId::SquareUp),
        "hip" => Some(DrillId::BalanceHold),
        "follow" => Some(DrillId::FollowThroughHold),
        _ => None,
    }
}
