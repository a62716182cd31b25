use statrs::statistics::Statistics;
use tracing::{debug, info};

use crate::models::keypoint::Keypoint;
use crate::models::shooting_metrics::UserShootingMetrics;
use crate::models::shot_frame::{FrameAnalysis, PhaseSegment, ShootingPhase};
use crate::services::keypoint_processor::KeypointProcessor;

/// Multi-frame shot analysis: per-frame processing plus aggregation into one
/// set of shooting metrics for the attempt.
#[derive(Debug, Clone, Default)]
pub struct ShotAnalysisService {
    processor: KeypointProcessor,
}

impl ShotAnalysisService {
    pub fn new(processor: KeypointProcessor) -> Self {
        Self { processor }
    }

    pub fn processor(&self) -> &KeypointProcessor {
        &self.processor
    }

    /// Analyze every frame of a shot attempt in order
    pub fn analyze_frames(&self, frames: &[Vec<Keypoint>]) -> Vec<FrameAnalysis> {
        frames
            .iter()
            .map(|keypoints| self.processor.process_frame(keypoints))
            .collect()
    }

    /// Aggregate analyzed frames into the attempt's shooting metrics
    ///
    /// - elbow: mean elbow angle over rise frames
    /// - knee: deepest (minimum) knee angle over dip frames
    /// - release: release trajectory at the first release frame
    /// - shoulder/hip tilt: mean over all frames
    /// - follow-through: mean elbow angle over follow-through frames, falling
    ///   back to the last release frame
    ///
    /// Only measurements above the processor's confidence threshold count; a
    /// metric with no contributing frame is left absent.
    pub fn aggregate_metrics(&self, frames: &[FrameAnalysis]) -> UserShootingMetrics {
        let min_confidence = self.processor.min_confidence();

        let in_phase = |phase: ShootingPhase| {
            frames
                .iter()
                .filter(move |frame| frame.phase.phase == phase)
        };

        let elbow_angle = mean_of(
            in_phase(ShootingPhase::Rise)
                .filter_map(|frame| frame.angles.elbow.trusted(min_confidence)),
        );

        let knee_angle = in_phase(ShootingPhase::Dip)
            .filter_map(|frame| frame.angles.knee.trusted(min_confidence))
            .reduce(f64::min);

        let release_angle = in_phase(ShootingPhase::Release)
            .find_map(|frame| frame.angles.release.trusted(min_confidence));

        let shoulder_tilt = mean_of(
            frames
                .iter()
                .filter_map(|frame| frame.angles.shoulder_tilt.trusted(min_confidence)),
        );

        let hip_tilt = mean_of(
            frames
                .iter()
                .filter_map(|frame| frame.angles.hip_tilt.trusted(min_confidence)),
        );

        let follow_through_angle = mean_of(
            in_phase(ShootingPhase::FollowThrough)
                .filter_map(|frame| frame.angles.elbow.trusted(min_confidence)),
        )
        .or_else(|| {
            in_phase(ShootingPhase::Release)
                .filter_map(|frame| frame.angles.elbow.trusted(min_confidence))
                .last()
        });

        let metrics = UserShootingMetrics {
            elbow_angle,
            knee_angle,
            release_angle,
            shoulder_tilt,
            hip_tilt,
            follow_through_angle,
        };

        debug!("Aggregated {} frames into {:?}", frames.len(), metrics);
        metrics
    }

    /// Analyze raw frames and aggregate them in one step
    pub fn analyze_attempt(&self, frames: &[Vec<Keypoint>]) -> (Vec<FrameAnalysis>, UserShootingMetrics) {
        let analyzed = self.analyze_frames(frames);
        let metrics = self.aggregate_metrics(&analyzed);

        info!(
            "Analyzed shot attempt: {} frames, {} phase segments",
            analyzed.len(),
            phase_timeline(&analyzed).len()
        );

        (analyzed, metrics)
    }
}

/// Collapse consecutive frames with the same phase into segments
pub fn phase_timeline(frames: &[FrameAnalysis]) -> Vec<PhaseSegment> {
    let mut segments: Vec<PhaseSegment> = Vec::new();

    for (index, frame) in frames.iter().enumerate() {
        match segments.last_mut() {
            Some(segment) if segment.phase == frame.phase.phase => segment.end_frame = index,
            _ => segments.push(PhaseSegment {
                phase: frame.phase.phase,
                start_frame: index,
                end_frame: index,
            }),
        }
    }

    segments
}

fn mean_of(values: impl Iterator<Item = f64>) -> Option<f64> {
    let values: Vec<f64> = values.collect();
    if values.is_empty() {
        None
    } else {
        Some(values.mean())
    }
}
