/// Deviation Analyzer
///
/// Compares each measured user metric to its optimal target. The tolerance
/// band is twice the target's spread (never under five degrees), widened for
/// knee and follow-through angles which vary more between body types.

use tracing::debug;

use crate::models::comparison::{
    ComparisonStatus, DeviationDirection, MechanicComparison, OptimalMechanics,
};
use crate::models::shooting_metrics::{ShootingMetric, UserShootingMetrics};

pub const MIN_TOLERANCE_DEGREES: f64 = 5.0;
pub const MAX_RECOMMENDATIONS: usize = 5;

pub fn tolerance_multiplier(metric: ShootingMetric) -> f64 {
    match metric {
        ShootingMetric::KneeAngle | ShootingMetric::FollowThroughAngle => 1.5,
        _ => 1.0,
    }
}

/// Tolerance band for a metric given its target's standard deviation
pub fn tolerance(metric: ShootingMetric, std_dev: f64) -> f64 {
    (std_dev * 2.0).max(MIN_TOLERANCE_DEGREES) * tolerance_multiplier(metric)
}

/// GOOD inside half the band, NEEDS_WORK inside the band, CRITICAL beyond it
pub fn classify_deviation(difference: f64, tolerance: f64) -> ComparisonStatus {
    let magnitude = difference.abs();
    if magnitude <= tolerance / 2.0 {
        ComparisonStatus::Good
    } else if magnitude <= tolerance {
        ComparisonStatus::NeedsWork
    } else {
        ComparisonStatus::Critical
    }
}

/// Compare every metric that has both a user value and a target
///
/// Output follows metric order (elbow through follow-through); metrics the
/// user did not supply are skipped.
pub fn compare_user_to_optimal(
    metrics: &UserShootingMetrics,
    optimal: &OptimalMechanics,
) -> Vec<MechanicComparison> {
    let comparisons: Vec<MechanicComparison> = ShootingMetric::ALL
        .iter()
        .filter_map(|metric| {
            let user_value = metrics.get(*metric)?;
            let target = optimal.get(*metric)?;

            let difference = user_value - target.value;
            let status = classify_deviation(difference, tolerance(*metric, target.std_dev));

            Some(MechanicComparison {
                metric: *metric,
                user_value,
                optimal_value: target.value,
                difference,
                status,
                recommendation: recommendation(*metric, user_value, target.value, difference, status),
            })
        })
        .collect();

    debug!(
        "Compared {} metrics: {} good",
        comparisons.len(),
        comparisons
            .iter()
            .filter(|c| c.status == ComparisonStatus::Good)
            .count()
    );

    comparisons
}

/// Recommendations for the metrics that need attention, critical ones first
///
/// When every compared metric is on target a single maintenance message is
/// returned instead.
pub fn prioritized_recommendations(comparisons: &[MechanicComparison]) -> Vec<String> {
    let mut flagged: Vec<&MechanicComparison> = comparisons
        .iter()
        .filter(|c| c.status != ComparisonStatus::Good)
        .collect();

    if flagged.is_empty() {
        if comparisons.is_empty() {
            return Vec::new();
        }
        return vec![
            "Your mechanics are in line with your closest matches. Keep repeating this form.".to_string(),
        ];
    }

    // stable: metric order is kept within each severity
    flagged.sort_by_key(|c| match c.status {
        ComparisonStatus::Critical => 0,
        _ => 1,
    });

    flagged
        .into_iter()
        .take(MAX_RECOMMENDATIONS)
        .map(|c| c.recommendation.clone())
        .collect()
}

fn recommendation(
    metric: ShootingMetric,
    user_value: f64,
    optimal_value: f64,
    difference: f64,
    status: ComparisonStatus,
) -> String {
    if status == ComparisonStatus::Good {
        return format!(
            "{} is on target ({:.0}° vs optimal {:.0}°). Keep it consistent.",
            metric.label(),
            user_value,
            optimal_value
        );
    }

    let direction = if difference > 0.0 {
        DeviationDirection::TooHigh
    } else {
        DeviationDirection::TooLow
    };

    format!(
        "{} is {:.0}° {} ({:.0}° vs optimal {:.0}°). {}",
        metric.label(),
        difference.abs(),
        direction,
        user_value,
        optimal_value,
        correction(metric, direction)
    )
}

fn correction(metric: ShootingMetric, direction: DeviationDirection) -> &'static str {
    use DeviationDirection::*;
    use ShootingMetric::*;

    match (metric, direction) {
        (ElbowAngle, TooHigh) => "Bend your elbow more at the set point so it sits under the ball.",
        (ElbowAngle, TooLow) => "Open up your elbow slightly at the set point.",
        (KneeAngle, TooHigh) => "Sink deeper into your knees to get more lift from your legs.",
        (KneeAngle, TooLow) => "Bend your knees a little less so you can rise quickly.",
        (ReleaseAngle, TooHigh) => "Flatten your release slightly and push the ball toward the rim.",
        (ReleaseAngle, TooLow) => "Release the ball higher for more arc.",
        (ShoulderTilt, TooHigh) => "Keep your shoulders level and square to the basket.",
        (ShoulderTilt, TooLow) => "Let your shooting shoulder turn naturally toward the basket.",
        (HipTilt, TooHigh) => "Stay balanced over both feet and keep your hips level.",
        (HipTilt, TooLow) => "Relax your hips and let your stance settle naturally.",
        (FollowThroughAngle, TooHigh) => "Relax your arm at the finish instead of locking it out.",
        (FollowThroughAngle, TooLow) => "Extend your arm fully and hold your follow-through.",
    }
}
