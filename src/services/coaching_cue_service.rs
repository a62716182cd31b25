use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::models::comparison::DeviationDirection;
use crate::models::shooting_metrics::ShootingMetric;

/// Short verbal cues, one bank per metric and direction of error
pub struct CueBank;

impl CueBank {
    /// Used when there is no direction to correct
    pub const GENERIC: &'static [&'static str] = &[
        "Same shot, every time.",
        "Smooth and balanced.",
        "Eyes on the rim, hold the finish.",
    ];

    pub fn cues(
        metric: ShootingMetric,
        direction: Option<DeviationDirection>,
    ) -> &'static [&'static str] {
        use DeviationDirection::*;
        use ShootingMetric::*;

        let Some(direction) = direction else {
            return Self::GENERIC;
        };

        match (metric, direction) {
            (ElbowAngle, TooHigh) => &["Elbow under the ball.", "Make an L with your arm.", "Tuck it in."],
            (ElbowAngle, TooLow) => &["Open the window.", "Ball above your eye.", "Room under the elbow."],
            (KneeAngle, TooHigh) => &["Sit into it.", "Load the legs.", "Bend and explode."],
            (KneeAngle, TooLow) => &["Quick dip.", "Shallow bend, fast rise.", "Don't sit too long."],
            (ReleaseAngle, TooHigh) => &["Shoot through the rim.", "Push out, not just up."],
            (ReleaseAngle, TooLow) => &["Up and over.", "Shoot over the tall defender.", "Higher arc."],
            (ShoulderTilt, TooHigh) => &["Level shoulders.", "Square up.", "Chest to the rim."],
            (ShoulderTilt, TooLow) => &["Slight turn.", "Shooting shoulder to the rim."],
            (HipTilt, TooHigh) => &["Land where you jumped.", "Balanced base.", "Even feet."],
            (HipTilt, TooLow) => &["Relax the hips.", "Natural stance."],
            (FollowThroughAngle, TooHigh) => &["Soft finish.", "Relax the arm."],
            (FollowThroughAngle, TooLow) => &["Reach into the cookie jar.", "Hold the goose neck.", "Full extension."],
        }
    }
}

/// Picks a cue from a bank with an injectable random source
#[derive(Debug, Clone)]
pub struct CueSelector<R: Rng = StdRng> {
    rng: R,
}

impl CueSelector<StdRng> {
    /// Deterministic selector; equal seeds yield equal cue sequences
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> CueSelector<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn cue(&mut self, metric: ShootingMetric, direction: Option<DeviationDirection>) -> String {
        CueBank::cues(metric, direction)
            .choose(&mut self.rng)
            .or_else(|| CueBank::GENERIC.first())
            .map(|cue| cue.to_string())
            .unwrap_or_default()
    }
}
