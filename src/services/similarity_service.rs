/// Similarity Engine
///
/// Two stages over the reference catalog:
/// - filter: hard physical/skill constraints, widened to the whole catalog
///   when too few shooters survive
/// - score: physical, skill and mechanics sub-scores (0-100 each) blended
///   into an overall score, then ranked

use statrs::statistics::Statistics;
use tracing::{debug, info};

use crate::models::comparison::{MatchSearch, MatchedShooter, SimilarityScore};
use crate::models::shooter_profile::{format_height, ShooterProfile, UserPhysicalProfile};
use crate::models::shooting_metrics::{ShootingMetric, UserShootingMetrics};

pub const DEFAULT_MATCH_LIMIT: usize = 5;

pub const HEIGHT_TOLERANCE_INCHES: f64 = 2.0;
pub const WINGSPAN_TOLERANCE_INCHES: f64 = 2.0;
pub const WEIGHT_TOLERANCE_LBS: f64 = 30.0;

const PHYSICAL_WEIGHT: f64 = 0.5;
const SKILL_WEIGHT: f64 = 0.25;
const MECHANICS_WEIGHT: f64 = 0.25;

/// Mechanics score when the user supplied no comparable metric
pub const NEUTRAL_MECHANICS_SCORE: f64 = 50.0;

// (max absolute difference, points), checked in order
const HEIGHT_CURVE: [(f64, f64); 5] = [(0.0, 40.0), (1.0, 35.0), (2.0, 28.0), (3.0, 20.0), (4.0, 10.0)];
const WINGSPAN_CURVE: [(f64, f64); 5] = [(0.0, 30.0), (1.0, 26.0), (2.0, 21.0), (3.0, 15.0), (4.0, 8.0)];
const WEIGHT_CURVE: [(f64, f64); 4] = [(5.0, 15.0), (10.0, 12.0), (20.0, 8.0), (30.0, 4.0)];
const MECHANICS_CURVE: [(f64, f64); 5] = [(2.0, 100.0), (5.0, 85.0), (10.0, 65.0), (15.0, 40.0), (20.0, 20.0)];

const HEIGHT_POINTS: f64 = 40.0;
const WINGSPAN_POINTS: f64 = 30.0;
const WEIGHT_POINTS: f64 = 15.0;
const BUILD_POINTS: f64 = 15.0;
const ADJACENT_BUILD_POINTS: f64 = 8.0;

const CURVE_EPSILON: f64 = 1e-9;

/// Shooters left after the filter stage
#[derive(Debug, Clone)]
pub struct CandidateSet<'a> {
    pub shooters: Vec<&'a ShooterProfile>,
    /// The filters were dropped and every catalog shooter is a candidate
    pub widened: bool,
}

/// Narrow the catalog by height, wingspan, build, skill and (if known) weight
///
/// When fewer than `limit` shooters pass, the whole catalog is returned and
/// `widened` is set, so callers still get a full result list.
pub fn filter_candidates<'a>(
    profile: &UserPhysicalProfile,
    catalog: &'a [ShooterProfile],
    limit: usize,
) -> CandidateSet<'a> {
    let wingspan = profile.effective_wingspan();
    let build = profile.effective_build();
    let acceptable = profile.effective_skill().acceptable_levels();

    let filtered: Vec<&ShooterProfile> = catalog
        .iter()
        .filter(|shooter| {
            (shooter.height_inches - profile.height_inches).abs() <= HEIGHT_TOLERANCE_INCHES
                && (shooter.wingspan_inches - wingspan).abs() <= WINGSPAN_TOLERANCE_INCHES
                && build.is_compatible(shooter.body_build)
                && acceptable.contains(&shooter.skill_level)
                && profile
                    .weight_lbs
                    .map_or(true, |weight| (shooter.weight_lbs - weight).abs() <= WEIGHT_TOLERANCE_LBS)
        })
        .collect();

    if filtered.len() < limit {
        info!(
            "Only {} of {} reference shooters passed the filters (limit {}), widening to the full catalog",
            filtered.len(),
            catalog.len(),
            limit
        );
        return CandidateSet {
            shooters: catalog.iter().collect(),
            widened: true,
        };
    }

    debug!("{} of {} reference shooters passed the filters", filtered.len(), catalog.len());
    CandidateSet {
        shooters: filtered,
        widened: false,
    }
}

/// Score one reference shooter against the user
pub fn score_candidate(
    profile: &UserPhysicalProfile,
    metrics: &UserShootingMetrics,
    shooter: &ShooterProfile,
) -> SimilarityScore {
    let physical = physical_score(profile, shooter);
    let skill = skill_score(profile, shooter);
    let mechanics = mechanics_score(metrics, shooter);

    SimilarityScore {
        physical,
        skill,
        mechanics,
        overall: physical * PHYSICAL_WEIGHT + skill * SKILL_WEIGHT + mechanics * MECHANICS_WEIGHT,
    }
}

/// Filter, score and rank the catalog, keeping the best `limit` shooters
pub fn find_top_matches(
    profile: &UserPhysicalProfile,
    metrics: &UserShootingMetrics,
    catalog: &[ShooterProfile],
    limit: usize,
) -> MatchSearch {
    let candidates = filter_candidates(profile, catalog, limit);

    let mut matches: Vec<MatchedShooter> = candidates
        .shooters
        .iter()
        .map(|shooter| {
            let similarity_score = score_candidate(profile, metrics, shooter);
            MatchedShooter {
                match_reasons: match_reasons(profile, metrics, shooter, &similarity_score),
                shooter: (*shooter).clone(),
                similarity_score,
                rank: 0,
            }
        })
        .collect();

    // sort_by is stable: equal scores keep catalog order
    matches.sort_by(|a, b| {
        b.similarity_score
            .overall
            .total_cmp(&a.similarity_score.overall)
    });
    matches.truncate(limit);

    for (index, matched) in matches.iter_mut().enumerate() {
        matched.rank = index + 1;
    }

    if let Some(top) = matches.first() {
        info!(
            "Matched {} reference shooters, top: {} ({:.1})",
            matches.len(),
            top.shooter.name,
            top.similarity_score.overall
        );
    }

    MatchSearch {
        matches,
        widened: candidates.widened,
    }
}

fn physical_score(profile: &UserPhysicalProfile, shooter: &ShooterProfile) -> f64 {
    let height_diff = (profile.height_inches - shooter.height_inches).abs();
    let wingspan_diff = (profile.effective_wingspan() - shooter.wingspan_inches).abs();

    let build_points = match profile.effective_build().distance(shooter.body_build) {
        0 => BUILD_POINTS,
        1 => ADJACENT_BUILD_POINTS,
        _ => 0.0,
    };

    let mut earned = stepped(height_diff, &HEIGHT_CURVE)
        + stepped(wingspan_diff, &WINGSPAN_CURVE)
        + build_points;
    let mut available = HEIGHT_POINTS + WINGSPAN_POINTS + BUILD_POINTS;

    if let Some(weight) = profile.weight_lbs {
        earned += stepped((weight - shooter.weight_lbs).abs(), &WEIGHT_CURVE);
        available += WEIGHT_POINTS;
    }

    earned / available * 100.0
}

fn skill_score(profile: &UserPhysicalProfile, shooter: &ShooterProfile) -> f64 {
    match profile
        .effective_skill()
        .index()
        .abs_diff(shooter.skill_level.index())
    {
        0 => 100.0,
        1 => 85.0,
        2 => 65.0,
        3 => 40.0,
        _ => 20.0,
    }
}

/// Averaged only over the metrics the user supplied
fn mechanics_score(metrics: &UserShootingMetrics, shooter: &ShooterProfile) -> f64 {
    let scores: Vec<f64> = ShootingMetric::MATCHING
        .iter()
        .filter_map(|metric| {
            metrics.get(*metric).map(|value| {
                let diff = (value - shooter.shooting_metrics.get(*metric)).abs();
                stepped(diff, &MECHANICS_CURVE)
            })
        })
        .collect();

    if scores.is_empty() {
        NEUTRAL_MECHANICS_SCORE
    } else {
        scores.mean()
    }
}

fn stepped(diff: f64, curve: &[(f64, f64)]) -> f64 {
    curve
        .iter()
        .find(|(max_diff, _)| diff <= max_diff + CURVE_EPSILON)
        .map(|(_, points)| *points)
        .unwrap_or(0.0)
}

fn match_reasons(
    profile: &UserPhysicalProfile,
    metrics: &UserShootingMetrics,
    shooter: &ShooterProfile,
    score: &SimilarityScore,
) -> Vec<String> {
    let mut reasons = Vec::new();

    if (profile.height_inches - shooter.height_inches).abs() <= 1.0 {
        reasons.push(format!("Similar height ({})", format_height(shooter.height_inches)));
    }

    if (profile.effective_wingspan() - shooter.wingspan_inches).abs() <= WINGSPAN_TOLERANCE_INCHES {
        reasons.push(format!("Comparable wingspan ({:.0}\")", shooter.wingspan_inches));
    }

    if profile.effective_build() == shooter.body_build {
        reasons.push(format!("Same body build ({})", shooter.body_build.label()));
    }

    if score.skill >= 85.0 {
        reasons.push(format!("Similar skill level ({})", shooter.skill_level.label()));
    }

    let has_mechanics = ShootingMetric::MATCHING
        .iter()
        .any(|metric| metrics.get(*metric).is_some());
    if has_mechanics && score.mechanics >= 80.0 {
        reasons.push("Similar shooting mechanics".to_string());
    }

    if reasons.is_empty() {
        reasons.push(format!("{} skill-level shooter", capitalize(shooter.skill_level.label())));
    }

    reasons
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::shooter_profile::{BodyBuild, SkillLevel, UserSkillLevel};
    use crate::models::shooting_metrics::ShooterMetrics;

    fn shooter(id: &str, height: f64, wingspan: f64, weight: f64, skill: SkillLevel, elbow: f64) -> ShooterProfile {
        ShooterProfile {
            id: id.to_string(),
            name: format!("Shooter {id}"),
            height_inches: height,
            wingspan_inches: wingspan,
            weight_lbs: weight,
            body_build: BodyBuild::from_height(height),
            skill_level: skill,
            shooting_metrics: ShooterMetrics {
                elbow_angle: elbow,
                knee_angle: 125.0,
                release_angle: 50.0,
                shoulder_tilt: 3.0,
                hip_tilt: 3.0,
                follow_through_angle: 170.0,
            },
        }
    }

    fn advanced_profile(height: f64) -> UserPhysicalProfile {
        UserPhysicalProfile::new(height)
            .with_age(16)
            .with_skill_level(UserSkillLevel::Advanced)
    }

    #[test]
    fn test_filter_keeps_close_shooters() {
        let catalog = vec![
            shooter("a", 75.0, 77.0, 190.0, SkillLevel::Pro, 90.0),
            shooter("b", 76.0, 78.0, 190.0, SkillLevel::Advanced, 92.0),
            shooter("c", 84.0, 88.0, 250.0, SkillLevel::Pro, 90.0),
            shooter("d", 75.0, 77.0, 190.0, SkillLevel::Developing, 90.0),
        ];

        let candidates = filter_candidates(&advanced_profile(75.0), &catalog, 2);
        assert!(!candidates.widened);
        let ids: Vec<&str> = candidates.shooters.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_filter_applies_weight_only_when_supplied() {
        let catalog = vec![
            shooter("a", 75.0, 77.0, 190.0, SkillLevel::Pro, 90.0),
            shooter("b", 75.0, 77.0, 260.0, SkillLevel::Pro, 90.0),
        ];

        let without_weight = filter_candidates(&advanced_profile(75.0), &catalog, 1);
        assert_eq!(without_weight.shooters.len(), 2);

        let with_weight = filter_candidates(&advanced_profile(75.0).with_weight(185.0), &catalog, 1);
        assert_eq!(with_weight.shooters.len(), 1);
        assert_eq!(with_weight.shooters[0].id, "a");
    }

    #[test]
    fn test_filter_widens_when_too_few_pass() {
        let catalog = vec![
            shooter("a", 75.0, 77.0, 190.0, SkillLevel::Pro, 90.0),
            shooter("b", 84.0, 88.0, 250.0, SkillLevel::Pro, 90.0),
            shooter("c", 70.0, 71.0, 160.0, SkillLevel::Poor, 110.0),
        ];

        let candidates = filter_candidates(&advanced_profile(75.0), &catalog, 3);
        assert!(candidates.widened);
        assert_eq!(candidates.shooters.len(), 3);
    }

    #[test]
    fn test_identical_shooter_scores_perfectly() {
        let profile = advanced_profile(75.0).with_weight(190.0);
        let metrics = UserShootingMetrics {
            elbow_angle: Some(90.0),
            ..Default::default()
        };
        let score = score_candidate(&profile, &metrics, &shooter("a", 75.0, 77.0, 190.0, SkillLevel::Pro, 90.0));

        assert_eq!(score.physical, 100.0);
        assert_eq!(score.skill, 100.0);
        assert_eq!(score.mechanics, 100.0);
        assert_eq!(score.overall, 100.0);
    }

    #[test]
    fn test_physical_curve_without_weight() {
        // height diff 1 (35) + wingspan diff 1 (26) + same build (15) out of 85
        let score = score_candidate(
            &advanced_profile(75.0),
            &UserShootingMetrics::default(),
            &shooter("a", 74.0, 76.0, 190.0, SkillLevel::Pro, 90.0),
        );
        assert!((score.physical - 76.0 / 85.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_adjacent_build_points() {
        let mut other = shooter("a", 77.0, 79.0, 200.0, SkillLevel::Pro, 90.0);
        other.body_build = BodyBuild::Wing;
        // height diff 2 (28) + wingspan diff 2 (21) + adjacent build (8) out of 85
        let score = score_candidate(&advanced_profile(75.0), &UserShootingMetrics::default(), &other);
        assert!((score.physical - 57.0 / 85.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_skill_distance_curve() {
        let profile = advanced_profile(75.0);
        let metrics = UserShootingMetrics::default();
        let expected = [
            (SkillLevel::Pro, 100.0),
            (SkillLevel::Elite, 85.0),
            (SkillLevel::Intermediate, 65.0),
            (SkillLevel::Average, 40.0),
            (SkillLevel::Poor, 20.0),
        ];
        for (level, points) in expected {
            let score = score_candidate(&profile, &metrics, &shooter("a", 75.0, 77.0, 190.0, level, 90.0));
            assert_eq!(score.skill, points, "{level:?}");
        }
    }

    #[test]
    fn test_mechanics_neutral_without_metrics() {
        let score = score_candidate(
            &advanced_profile(75.0),
            &UserShootingMetrics::default(),
            &shooter("a", 75.0, 77.0, 190.0, SkillLevel::Pro, 90.0),
        );
        assert_eq!(score.mechanics, 50.0);
    }

    #[test]
    fn test_mechanics_averages_supplied_metrics_only() {
        let metrics = UserShootingMetrics {
            elbow_angle: Some(94.0),  // diff 4 -> 85
            knee_angle: Some(137.0),  // diff 12 -> 40
            hip_tilt: Some(40.0),     // not a matching metric
            ..Default::default()
        };
        let score = score_candidate(
            &advanced_profile(75.0),
            &metrics,
            &shooter("a", 75.0, 77.0, 190.0, SkillLevel::Pro, 90.0),
        );
        assert!((score.mechanics - 62.5).abs() < 1e-9);
    }

    #[test]
    fn test_top_matches_are_ranked() {
        let catalog = vec![
            shooter("far", 79.0, 81.0, 220.0, SkillLevel::Developing, 110.0),
            shooter("close", 75.0, 77.0, 190.0, SkillLevel::Pro, 90.0),
            shooter("near", 76.0, 78.0, 195.0, SkillLevel::Advanced, 95.0),
        ];
        let metrics = UserShootingMetrics {
            elbow_angle: Some(90.0),
            ..Default::default()
        };

        let search = find_top_matches(&advanced_profile(75.0), &metrics, &catalog, 5);
        assert!(search.widened);
        assert_eq!(search.matches.len(), 3);
        assert_eq!(search.matches[0].shooter.id, "close");
        assert_eq!(search.matches[0].rank, 1);
        assert_eq!(search.matches[2].rank, 3);
        assert!(search
            .matches
            .windows(2)
            .all(|pair| pair[0].similarity_score.overall >= pair[1].similarity_score.overall));
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let catalog = vec![
            shooter("first", 75.0, 77.0, 190.0, SkillLevel::Pro, 90.0),
            shooter("second", 75.0, 77.0, 190.0, SkillLevel::Pro, 90.0),
        ];
        let search = find_top_matches(&advanced_profile(75.0), &UserShootingMetrics::default(), &catalog, 2);
        assert_eq!(search.matches[0].shooter.id, "first");
        assert_eq!(search.matches[1].shooter.id, "second");
    }

    #[test]
    fn test_limit_truncates() {
        let catalog: Vec<ShooterProfile> = (0..8)
            .map(|i| shooter(&format!("s{i}"), 75.0, 77.0, 190.0, SkillLevel::Pro, 90.0 + i as f64))
            .collect();
        let search = find_top_matches(&advanced_profile(75.0), &UserShootingMetrics::default(), &catalog, 5);
        assert!(!search.widened);
        assert_eq!(search.matches.len(), 5);
    }

    #[test]
    fn test_every_match_has_a_reason() {
        let catalog = vec![shooter("x", 84.0, 90.0, 260.0, SkillLevel::Poor, 130.0)];
        let search = find_top_matches(&advanced_profile(70.0), &UserShootingMetrics::default(), &catalog, 1);
        assert_eq!(search.matches[0].match_reasons, vec!["Poor skill-level shooter".to_string()]);
    }

    #[test]
    fn test_match_reasons_for_close_shooter() {
        let catalog = vec![shooter("a", 75.0, 77.0, 190.0, SkillLevel::Pro, 90.0)];
        let metrics = UserShootingMetrics {
            elbow_angle: Some(91.0),
            ..Default::default()
        };
        let search = find_top_matches(&advanced_profile(75.0), &metrics, &catalog, 1);
        let reasons = &search.matches[0].match_reasons;
        assert_eq!(reasons[0], "Similar height (6'3\")");
        assert!(reasons.contains(&"Same body build (guard)".to_string()));
        assert!(reasons.contains(&"Similar shooting mechanics".to_string()));
    }
}
