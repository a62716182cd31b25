use statrs::statistics::Statistics;
use tracing::debug;

use crate::models::comparison::{MatchedShooter, MetricTarget, OptimalMechanics};
use crate::models::shooting_metrics::ShootingMetric;

/// Matches averaged into the optimal mechanics target
pub const DEFAULT_TOP_N: usize = 3;

/// Per-metric mean and spread across the first `top_n` matches
///
/// Means are rounded to whole degrees, population standard deviations to one
/// decimal. No matches means no targets.
pub fn extract_optimal_mechanics(matches: &[MatchedShooter], top_n: usize) -> OptimalMechanics {
    let sample: Vec<_> = matches
        .iter()
        .take(top_n)
        .map(|matched| matched.shooter.shooting_metrics)
        .collect();

    if sample.is_empty() {
        return OptimalMechanics::default();
    }

    let targets = ShootingMetric::ALL
        .iter()
        .map(|metric| {
            let values: Vec<f64> = sample.iter().map(|metrics| metrics.get(*metric)).collect();
            MetricTarget {
                metric: *metric,
                value: values.iter().mean().round(),
                std_dev: round_to_tenth(values.iter().population_std_dev()),
            }
        })
        .collect();

    debug!("Optimal mechanics computed from {} matches", sample.len());

    OptimalMechanics {
        sample_size: sample.len(),
        targets,
    }
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
