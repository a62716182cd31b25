/// Tiered Feedback Generator
///
/// Turns metric comparisons and similarity matches into coaching output whose
/// tone, vocabulary and item counts follow the user's age tier.

use rand::Rng;
use tracing::debug;

use crate::models::coaching_feedback::{AgeGroup, CoachingFeedback, FeedbackItem};
use crate::models::comparison::{ComparisonStatus, MatchedShooter, MechanicComparison};
use crate::models::drill::{base_drills, conditional_drill, Drill, DrillId, DRILL_KEYWORDS};
use crate::models::shooter_profile::UserPhysicalProfile;
use crate::services::coaching_cue_service::CueSelector;

pub const MAX_DRILLS: usize = 3;

/// Build tier-appropriate feedback for one comparison run
///
/// Strengths and improvements keep metric order and are truncated to the
/// tier's cap. Cues are drawn from `cues` for improvements only, in order.
pub fn generate_feedback<R: Rng>(
    profile: &UserPhysicalProfile,
    comparisons: &[MechanicComparison],
    matches: &[MatchedShooter],
    cues: &mut CueSelector<R>,
) -> CoachingFeedback {
    let age_group = AgeGroup::from_optional_age(profile.age);
    let tier = age_group.config();

    let strengths: Vec<FeedbackItem> = comparisons
        .iter()
        .filter(|c| c.status == ComparisonStatus::Good)
        .take(tier.max_items)
        .map(|c| FeedbackItem {
            metric: c.metric,
            status: c.status,
            title: c.metric.label().to_string(),
            description: describe(age_group, c),
            cue: None,
        })
        .collect();

    let improvements: Vec<FeedbackItem> = comparisons
        .iter()
        .filter(|c| c.status != ComparisonStatus::Good)
        .take(tier.max_items)
        .map(|c| FeedbackItem {
            metric: c.metric,
            status: c.status,
            title: c.metric.label().to_string(),
            description: describe(age_group, c),
            cue: Some(cues.cue(c.metric, c.direction())),
        })
        .collect();

    let good = comparisons
        .iter()
        .filter(|c| c.status == ComparisonStatus::Good)
        .count();

    let drills = candidate_drills(age_group, &improvements)
        .into_iter()
        .take(MAX_DRILLS)
        .map(Drill::from_library)
        .collect();

    let peer_comparison = if age_group.includes_peer_comparison() {
        matches.first().map(|top| peer_message(age_group, top))
    } else {
        None
    };

    debug!(
        "Generated {} feedback: {} strengths, {} improvements",
        age_group,
        strengths.len(),
        improvements.len()
    );

    CoachingFeedback {
        age_group,
        tone: tier.tone.to_string(),
        vocabulary: tier.vocabulary.to_string(),
        focus_areas: tier.focus_areas.iter().map(|area| area.to_string()).collect(),
        overall_message: overall_message(age_group, good, comparisons.len()),
        strengths,
        improvements,
        drills,
        peer_comparison,
    }
}

/// Tier base drills followed by corrective drills keyed on improvement titles
///
/// Deduplicated, in insertion order and not yet truncated.
pub fn candidate_drills(age_group: AgeGroup, improvements: &[FeedbackItem]) -> Vec<DrillId> {
    let mut drills: Vec<DrillId> = base_drills(age_group).to_vec();

    for item in improvements {
        let title = item.title.to_lowercase();
        for keyword in DRILL_KEYWORDS {
            if !title.contains(keyword) {
                continue;
            }
            if let Some(drill) = conditional_drill(keyword) {
                if !drills.contains(&drill) {
                    drills.push(drill);
                }
            }
        }
    }

    drills
}

fn describe(age_group: AgeGroup, comparison: &MechanicComparison) -> String {
    let part = comparison.metric.label().to_lowercase();
    let good = comparison.status == ComparisonStatus::Good;

    match age_group {
        AgeGroup::Elementary if good => format!("Awesome {part}! Keep doing exactly that."),
        AgeGroup::Elementary => format!("Let's practice your {part} together. You've got this!"),
        AgeGroup::MiddleSchool if good => format!("Your {part} is right where it should be."),
        AgeGroup::MiddleSchool => match comparison.direction() {
            Some(direction) => format!("Your {part} is a little {direction}. Small changes add up!"),
            None => format!("Keep working on your {part}."),
        },
        AgeGroup::HighSchool | AgeGroup::College => comparison.recommendation.clone(),
        AgeGroup::Professional => format!(
            "{} Measured {:.1}° against a {:.1}° target ({:+.1}°).",
            comparison.recommendation, comparison.user_value, comparison.optimal_value, comparison.difference
        ),
    }
}

fn overall_message(age_group: AgeGroup, good: usize, total: usize) -> String {
    if total == 0 {
        return match age_group {
            AgeGroup::Elementary | AgeGroup::MiddleSchool => {
                "We couldn't see your whole shot this time. Try another video!".to_string()
            }
            _ => "No mechanics could be measured from this attempt; record from the side with your full body in frame."
                .to_string(),
        };
    }

    let pct = (good as f64 / total as f64 * 100.0).round() as u32;

    match age_group {
        AgeGroup::Elementary => {
            if pct >= 80 {
                "You're shooting like a star! Keep having fun and practicing.".to_string()
            } else if pct >= 50 {
                format!("Nice work! You're doing {good} out of {total} things really well.")
            } else {
                "Every great shooter started somewhere. Let's practice a few things together!".to_string()
            }
        }
        AgeGroup::MiddleSchool => {
            if pct >= 70 {
                format!("Solid form: {pct}% of your mechanics are on target. Keep building good habits.")
            } else {
                format!("{pct}% of your mechanics are on target. Focus on one fix at a time and your shot will get more consistent.")
            }
        }
        AgeGroup::HighSchool => format!(
            "{pct}% of your measured mechanics ({good}/{total}) match your closest reference shooters. Work on the flagged areas to build consistency."
        ),
        AgeGroup::College => format!(
            "Mechanics efficiency {pct}% ({good}/{total} metrics within tolerance). Prioritize critical deviations before adding volume."
        ),
        AgeGroup::Professional => format!(
            "Mechanical alignment {pct}% across {total} tracked metrics. Fine-tune the remaining deviations under game-speed conditions."
        ),
    }
}

fn peer_message(age_group: AgeGroup, top: &MatchedShooter) -> String {
    let name = &top.shooter.name;
    let score = &top.similarity_score;

    match age_group {
        AgeGroup::College => format!(
            "Closest reference: {name} at {:.1}% similarity. Use their mechanics as your benchmark.",
            score.overall
        ),
        AgeGroup::Professional => format!(
            "Top comparable: {name} ({:.1}% overall; physical {:.0}, skill {:.0}, mechanics {:.0}).",
            score.overall, score.physical, score.skill, score.mechanics
        ),
        _ => format!(
            "Your shot is most similar to {name} ({:.0}% match). Study how they shoot and borrow what works.",
            score.overall
        ),
    }
}
