use assert_matches::assert_matches;
use pretty_assertions::assert_eq;

use shot_coach::config::{AnalysisConfig, ReferenceCatalog};
use shot_coach::models::{
    AgeGroup, BodyBuild, ComparisonStatus, Keypoint, ShooterMetrics, ShooterProfile, ShootingMetric,
    ShootingPhase, SkillLevel, UserPhysicalProfile, UserShootingMetrics, UserSkillLevel,
};
use shot_coach::services::{phase_timeline, ComparisonService, CueSelector, ShotAnalysisService};

fn right_arm_frame(elbow: (f64, f64), wrist: (f64, f64), knee: (f64, f64)) -> Vec<Keypoint> {
    vec![
        Keypoint::new(50.0, 10.0, 0.9, "nose"),
        Keypoint::new(42.0, 25.0, 0.7, "leftShoulder"),
        Keypoint::new(58.0, 25.0, 0.9, "rightShoulder"),
        Keypoint::new(elbow.0, elbow.1, 0.9, "rightElbow"),
        Keypoint::new(wrist.0, wrist.1, 0.9, "rightWrist"),
        Keypoint::new(45.0, 55.0, 0.8, "leftHip"),
        Keypoint::new(55.0, 55.0, 0.8, "rightHip"),
        Keypoint::new(knee.0, knee.1, 0.8, "rightKnee"),
        Keypoint::new(55.0, 90.0, 0.8, "rightAnkle"),
    ]
}

/// Dip, set point, release: a compressed shot attempt
fn shot_attempt() -> Vec<Vec<Keypoint>> {
    vec![
        // dip: ball at the waist, knees bent
        right_arm_frame((62.0, 40.0), (60.0, 50.0), (62.0, 72.0)),
        // rise: elbow opening with the wrist by the shoulder
        right_arm_frame((68.0, 25.0), (72.0, 18.0), (55.0, 72.0)),
        // release: arm extended well above the shoulder
        right_arm_frame((62.0, 14.0), (64.0, 3.0), (55.0, 72.0)),
    ]
}

fn shooter(id: &str, height: f64, elbow: f64, skill: SkillLevel) -> ShooterProfile {
    ShooterProfile {
        id: id.to_string(),
        name: format!("Reference {id}"),
        height_inches: height,
        wingspan_inches: height + 2.0,
        weight_lbs: 190.0,
        body_build: BodyBuild::from_height(height),
        skill_level: skill,
        shooting_metrics: ShooterMetrics {
            elbow_angle: elbow,
            knee_angle: 124.0,
            release_angle: 50.0,
            shoulder_tilt: 3.0,
            hip_tilt: 2.0,
            follow_through_angle: 170.0,
        },
    }
}

/// Integration test for the complete single-frame comparison flow
#[test]
fn test_full_comparison_flow() {
    let catalog = ReferenceCatalog::builtin();
    let service = ComparisonService::new(catalog, AnalysisConfig::default());
    let profile = UserPhysicalProfile::new(75.0)
        .with_age(16)
        .with_skill_level(UserSkillLevel::Advanced);

    let frame = &shot_attempt()[1];
    let result = service.run_full_comparison_with(frame, &profile, None, &mut CueSelector::seeded(21));

    assert_eq!(result.frame.as_ref().map(|f| f.phase.phase), Some(ShootingPhase::Rise));
    assert_eq!(result.matches.len(), 5);
    for (index, matched) in result.matches.iter().enumerate() {
        assert_eq!(matched.rank, index + 1);
        assert!(!matched.match_reasons.is_empty());
    }

    assert_eq!(result.feedback.age_group, AgeGroup::HighSchool);
    assert!(result.feedback.peer_comparison.is_some());
    assert_eq!(result.feedback.drills.len(), 3);
    assert!(result.recommendations.len() <= 5);

    // comparisons are emitted in metric order
    let order: Vec<usize> = result
        .comparisons
        .iter()
        .map(|c| ShootingMetric::ALL.iter().position(|m| *m == c.metric).unwrap())
        .collect();
    let mut sorted = order.clone();
    sorted.sort();
    assert_eq!(order, sorted);
}

/// Same inputs and seed must serialize to identical bytes
#[test]
fn test_seeded_comparison_is_deterministic() {
    let catalog = ReferenceCatalog::builtin();
    let service = ComparisonService::new(catalog, AnalysisConfig::default().with_cue_seed(99));
    let profile = UserPhysicalProfile::new(79.0).with_age(20).with_weight(225.0);
    let metrics = UserShootingMetrics {
        elbow_angle: Some(101.0),
        knee_angle: Some(140.0),
        ..Default::default()
    };

    let first = service.run_full_comparison(&shot_attempt()[2], &profile, Some(&metrics));
    let second = service.run_full_comparison(&shot_attempt()[2], &profile, Some(&metrics));

    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_session_comparison_aggregates_frames() {
    let analysis = ShotAnalysisService::default();
    let (frames, measured) = analysis.analyze_attempt(&shot_attempt());

    let phases: Vec<ShootingPhase> = frames.iter().map(|f| f.phase.phase).collect();
    assert_eq!(phases, vec![ShootingPhase::Dip, ShootingPhase::Rise, ShootingPhase::Release]);
    assert_eq!(phase_timeline(&frames).len(), 3);
    assert!(measured.elbow_angle.is_some());
    assert!(measured.knee_angle.is_some());
    assert!(measured.release_angle.is_some());

    let catalog = ReferenceCatalog::builtin();
    let service = ComparisonService::new(catalog, AnalysisConfig::default());
    let profile = UserPhysicalProfile::new(74.0).with_age(30);
    let result = service.run_session_comparison_with(&shot_attempt(), &profile, None, &mut CueSelector::seeded(3));

    assert!(result.frame.is_none());
    assert_eq!(result.user_metrics, measured);
    assert_eq!(result.feedback.age_group, AgeGroup::Professional);
}

#[test]
fn test_exact_match_scores_high() {
    let catalog = ReferenceCatalog::new(
        "test",
        vec![
            shooter("exact", 75.0, 90.0, SkillLevel::Pro),
            shooter("tall", 84.0, 110.0, SkillLevel::Poor),
        ],
    )
    .unwrap();
    let service = ComparisonService::new(&catalog, AnalysisConfig::default());
    let profile = UserPhysicalProfile::new(75.0)
        .with_age(16)
        .with_skill_level(UserSkillLevel::Advanced);
    let metrics = UserShootingMetrics {
        elbow_angle: Some(90.0),
        ..Default::default()
    };

    let search = service.find_matches(&profile, &metrics);
    assert!(search.widened);
    assert_eq!(search.matches.len(), 2);

    let top = &search.matches[0];
    assert_eq!(top.shooter.id, "exact");
    assert_eq!(top.similarity_score.physical, 100.0);
    assert_eq!(top.similarity_score.mechanics, 100.0);
    assert!(top.similarity_score.overall >= 90.0);
}

#[test]
fn test_comparison_against_custom_catalog() {
    let catalog = ReferenceCatalog::new(
        "test",
        vec![
            shooter("a", 75.0, 88.0, SkillLevel::Pro),
            shooter("b", 75.0, 90.0, SkillLevel::Pro),
            shooter("c", 75.0, 92.0, SkillLevel::Pro),
        ],
    )
    .unwrap();
    let config = AnalysisConfig::default().with_match_limit(3);
    let service = ComparisonService::new(&catalog, config);
    let profile = UserPhysicalProfile::new(75.0).with_skill_level(UserSkillLevel::Advanced);

    let good = UserShootingMetrics {
        elbow_angle: Some(92.0),
        ..Default::default()
    };
    let result = service.run_full_comparison_with(&[], &profile, Some(&good), &mut CueSelector::seeded(1));
    assert!(!result.search_widened);
    let elbow = result.optimal_mechanics.get(ShootingMetric::ElbowAngle).unwrap();
    assert_eq!(elbow.value, 90.0);
    assert_eq!(elbow.std_dev, 1.6);
    assert_eq!(result.comparisons[0].status, ComparisonStatus::Good);

    let off = UserShootingMetrics {
        elbow_angle: Some(100.0),
        ..Default::default()
    };
    let result = service.run_full_comparison_with(&[], &profile, Some(&off), &mut CueSelector::seeded(1));
    assert_matches!(result.comparisons[0].status, ComparisonStatus::Critical);
    assert!(result.recommendations[0].contains("10° too high"));
    assert_eq!(result.feedback.improvements.len(), 1);
}

/// An extended arm at release sits inside the built-in release targets
#[test]
fn test_release_frame_agrees_with_builtin_release_targets() {
    let catalog = ReferenceCatalog::builtin();
    let service = ComparisonService::new(catalog, AnalysisConfig::default());
    let profile = UserPhysicalProfile::new(75.0)
        .with_age(16)
        .with_skill_level(UserSkillLevel::Advanced);

    let frame = right_arm_frame((60.0, 14.0), (63.0, 3.0), (55.0, 72.0));
    let result = service.run_full_comparison_with(&frame, &profile, None, &mut CueSelector::seeded(5));

    assert_eq!(result.frame.as_ref().map(|f| f.phase.phase), Some(ShootingPhase::Release));
    let release = result
        .comparisons
        .iter()
        .find(|c| c.metric == ShootingMetric::ReleaseAngle)
        .unwrap();
    assert!((release.user_value - 74.7).abs() < 0.1);
    assert_eq!(release.status, ComparisonStatus::Good);
    assert!(!result
        .recommendations
        .iter()
        .any(|r| r.starts_with("Release angle")));
}

#[test]
fn test_release_frame_against_matching_entry() {
    let mut reference = shooter("match", 75.0, 175.0, SkillLevel::Pro);
    reference.shooting_metrics.release_angle = 75.0;
    let catalog = ReferenceCatalog::new("test", vec![reference]).unwrap();
    let service = ComparisonService::new(&catalog, AnalysisConfig::default().with_match_limit(1));
    let profile = UserPhysicalProfile::new(75.0).with_skill_level(UserSkillLevel::Advanced);

    let frame = right_arm_frame((60.0, 14.0), (63.0, 3.0), (55.0, 72.0));
    let result = service.run_full_comparison_with(&frame, &profile, None, &mut CueSelector::seeded(2));

    let release = result
        .comparisons
        .iter()
        .find(|c| c.metric == ShootingMetric::ReleaseAngle)
        .unwrap();
    assert_eq!(release.optimal_value, 75.0);
    assert_eq!(release.status, ComparisonStatus::Good);
}

#[test]
fn test_stance_frame_has_no_release_comparison() {
    let catalog = ReferenceCatalog::builtin();
    let service = ComparisonService::new(catalog, AnalysisConfig::default());
    let profile = UserPhysicalProfile::new(75.0).with_age(16);

    // arm hanging by the side, legs straight
    let frame = right_arm_frame((58.0, 40.0), (58.0, 55.0), (55.0, 72.0));
    let result = service.run_full_comparison_with(&frame, &profile, None, &mut CueSelector::seeded(9));

    assert_eq!(result.frame.as_ref().map(|f| f.phase.phase), Some(ShootingPhase::Stance));
    assert_eq!(result.user_metrics.release_angle, None);
    assert!(result
        .comparisons
        .iter()
        .all(|c| c.metric != ShootingMetric::ReleaseAngle));
}
