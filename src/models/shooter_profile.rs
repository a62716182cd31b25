use serde::{Deserialize, Serialize};

use crate::models::shooting_metrics::ShooterMetrics;

/// Wingspan added to height when the user does not supply one
pub const DEFAULT_WINGSPAN_OFFSET_INCHES: f64 = 2.0;

/// Coarse height-derived build category, ordered guard to center
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BodyBuild {
    Guard,
    Wing,
    Forward,
    Center,
}

impl BodyBuild {
    pub fn index(&self) -> usize {
        match self {
            BodyBuild::Guard => 0,
            BodyBuild::Wing => 1,
            BodyBuild::Forward => 2,
            BodyBuild::Center => 3,
        }
    }

    /// Categorize by height alone
    pub fn from_height(height_inches: f64) -> Self {
        if height_inches <= 75.0 {
            BodyBuild::Guard
        } else if height_inches <= 78.0 {
            BodyBuild::Wing
        } else if height_inches <= 81.0 {
            BodyBuild::Forward
        } else {
            BodyBuild::Center
        }
    }

    /// Distance on the guard..center scale
    pub fn distance(&self, other: BodyBuild) -> usize {
        self.index().abs_diff(other.index())
    }

    /// Same build or one step away
    pub fn is_compatible(&self, other: BodyBuild) -> bool {
        self.distance(other) <= 1
    }

    pub fn label(&self) -> &'static str {
        match self {
            BodyBuild::Guard => "guard",
            BodyBuild::Wing => "wing",
            BodyBuild::Forward => "forward",
            BodyBuild::Center => "center",
        }
    }
}

/// Eight-level ordinal skill scale used by the reference catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SkillLevel {
    Poor,
    NeedsWork,
    Developing,
    Average,
    Intermediate,
    Advanced,
    Pro,
    Elite,
}

impl SkillLevel {
    pub fn index(&self) -> u8 {
        match self {
            SkillLevel::Poor => 0,
            SkillLevel::NeedsWork => 1,
            SkillLevel::Developing => 2,
            SkillLevel::Average => 3,
            SkillLevel::Intermediate => 4,
            SkillLevel::Advanced => 5,
            SkillLevel::Pro => 6,
            SkillLevel::Elite => 7,
        }
    }

    /// Parse a label, falling back to `Intermediate` for anything unknown
    pub fn from_label(label: &str) -> Self {
        match normalize_label(label).as_str() {
            "poor" => SkillLevel::Poor,
            "needs_work" => SkillLevel::NeedsWork,
            "developing" => SkillLevel::Developing,
            "average" => SkillLevel::Average,
            "intermediate" => SkillLevel::Intermediate,
            "advanced" => SkillLevel::Advanced,
            "pro" | "professional" => SkillLevel::Pro,
            "elite" => SkillLevel::Elite,
            _ => SkillLevel::Intermediate,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SkillLevel::Poor => "poor",
            SkillLevel::NeedsWork => "needs-work",
            SkillLevel::Developing => "developing",
            SkillLevel::Average => "average",
            SkillLevel::Intermediate => "intermediate",
            SkillLevel::Advanced => "advanced",
            SkillLevel::Pro => "pro",
            SkillLevel::Elite => "elite",
        }
    }
}

/// Coarse self-reported skill label on a user profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", from = "String")]
pub enum UserSkillLevel {
    Beginner,
    Intermediate,
    Advanced,
    Elite,
}

impl UserSkillLevel {
    /// Position on the catalog's eight-level scale
    pub fn index(&self) -> u8 {
        match self {
            UserSkillLevel::Beginner => 2,
            UserSkillLevel::Intermediate => 4,
            UserSkillLevel::Advanced => 6,
            UserSkillLevel::Elite => 7,
        }
    }

    /// Catalog skill levels considered comparable during filtering
    pub fn acceptable_levels(&self) -> &'static [SkillLevel] {
        match self {
            UserSkillLevel::Beginner => &[SkillLevel::NeedsWork, SkillLevel::Developing],
            UserSkillLevel::Intermediate => &[
                SkillLevel::Developing,
                SkillLevel::Intermediate,
                SkillLevel::Advanced,
            ],
            UserSkillLevel::Advanced => &[SkillLevel::Advanced, SkillLevel::Pro],
            UserSkillLevel::Elite => &[SkillLevel::Pro, SkillLevel::Elite],
        }
    }

    /// Parse a label, falling back to `Intermediate` for anything unknown
    pub fn from_label(label: &str) -> Self {
        match normalize_label(label).as_str() {
            "beginner" | "novice" => UserSkillLevel::Beginner,
            "intermediate" => UserSkillLevel::Intermediate,
            "advanced" => UserSkillLevel::Advanced,
            "elite" | "pro" | "professional" => UserSkillLevel::Elite,
            _ => UserSkillLevel::Intermediate,
        }
    }
}

impl From<String> for UserSkillLevel {
    fn from(label: String) -> Self {
        Self::from_label(&label)
    }
}

impl Default for UserSkillLevel {
    fn default() -> Self {
        UserSkillLevel::Intermediate
    }
}

fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase().replace(&['-', ' '][..], "_")
}

/// Shooting hand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DominantHand {
    Left,
    Right,
}

/// Physical description of the user being coached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPhysicalProfile {
    pub height_inches: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_lbs: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wingspan_inches: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill_level: Option<UserSkillLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_type: Option<BodyBuild>,
    /// Self-rated athleticism, 1-10
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub athletic_ability: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dominant_hand: Option<DominantHand>,
}

impl UserPhysicalProfile {
    /// Create a profile with only the required height
    pub fn new(height_inches: f64) -> Self {
        Self {
            height_inches,
            weight_lbs: None,
            wingspan_inches: None,
            age: None,
            skill_level: None,
            body_type: None,
            athletic_ability: None,
            dominant_hand: None,
        }
    }

    pub fn with_age(mut self, age: u32) -> Self {
        self.age = Some(age);
        self
    }

    pub fn with_skill_level(mut self, skill_level: UserSkillLevel) -> Self {
        self.skill_level = Some(skill_level);
        self
    }

    pub fn with_weight(mut self, weight_lbs: f64) -> Self {
        self.weight_lbs = Some(weight_lbs);
        self
    }

    pub fn with_wingspan(mut self, wingspan_inches: f64) -> Self {
        self.wingspan_inches = Some(wingspan_inches);
        self
    }

    pub fn with_body_type(mut self, body_type: BodyBuild) -> Self {
        self.body_type = Some(body_type);
        self
    }

    /// Supplied wingspan, or height + 2 inches
    pub fn effective_wingspan(&self) -> f64 {
        self.wingspan_inches
            .unwrap_or(self.height_inches + DEFAULT_WINGSPAN_OFFSET_INCHES)
    }

    /// Supplied body type, or the height-derived build
    pub fn effective_build(&self) -> BodyBuild {
        self.body_type
            .unwrap_or_else(|| BodyBuild::from_height(self.height_inches))
    }

    pub fn effective_skill(&self) -> UserSkillLevel {
        self.skill_level.unwrap_or_default()
    }
}

/// Immutable record from the reference shooter catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShooterProfile {
    pub id: String,
    pub name: String,
    pub height_inches: f64,
    pub wingspan_inches: f64,
    pub weight_lbs: f64,
    pub body_build: BodyBuild,
    pub skill_level: SkillLevel,
    pub shooting_metrics: ShooterMetrics,
}

/// Format inches as feet and inches, e.g. 6'3"
pub fn format_height(inches: f64) -> String {
    let total = inches.round() as i64;
    format!("{}'{}\"", total / 12, total % 12)
}
