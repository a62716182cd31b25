/// Full comparison pipeline
///
/// normalize -> angles -> phase -> similarity -> optimal -> deviation -> feedback
///
/// One linear, synchronous pass per call over a borrowed read-only catalog.

use rand::Rng;
use tracing::info;

use crate::config::app::AnalysisConfig;
use crate::config::catalog::ReferenceCatalog;
use crate::models::comparison::{ComparisonResult, MatchSearch};
use crate::models::keypoint::Keypoint;
use crate::models::shooter_profile::UserPhysicalProfile;
use crate::models::shooting_metrics::UserShootingMetrics;
use crate::models::shot_frame::FrameAnalysis;
use crate::services::coaching_cue_service::CueSelector;
use crate::services::coaching_feedback_service::generate_feedback;
use crate::services::deviation_analysis_service::{compare_user_to_optimal, prioritized_recommendations};
use crate::services::keypoint_processor::KeypointProcessor;
use crate::services::optimal_mechanics_service::extract_optimal_mechanics;
use crate::services::shot_analysis_service::ShotAnalysisService;
use crate::services::similarity_service::find_top_matches;

#[derive(Debug, Clone)]
pub struct ComparisonService<'a> {
    catalog: &'a ReferenceCatalog,
    config: AnalysisConfig,
    analysis: ShotAnalysisService,
}

impl<'a> ComparisonService<'a> {
    pub fn new(catalog: &'a ReferenceCatalog, config: AnalysisConfig) -> Self {
        let processor = KeypointProcessor::new().with_min_confidence(config.min_confidence);

        Self {
            catalog,
            config,
            analysis: ShotAnalysisService::new(processor),
        }
    }

    pub fn catalog(&self) -> &ReferenceCatalog {
        self.catalog
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Similarity search only, using the configured match limit
    pub fn find_matches(&self, profile: &UserPhysicalProfile, metrics: &UserShootingMetrics) -> MatchSearch {
        find_top_matches(profile, metrics, self.catalog.shooters(), self.config.match_limit)
    }

    /// Compare one frame of keypoints against the catalog
    ///
    /// Supplied metrics take precedence over values measured from the frame.
    /// Cues use the configured seed, or entropy when none is set.
    pub fn run_full_comparison(
        &self,
        keypoints: &[Keypoint],
        profile: &UserPhysicalProfile,
        metrics: Option<&UserShootingMetrics>,
    ) -> ComparisonResult {
        match self.config.cue_seed {
            Some(seed) => self.run_full_comparison_with(keypoints, profile, metrics, &mut CueSelector::seeded(seed)),
            None => self.run_full_comparison_with(keypoints, profile, metrics, &mut CueSelector::from_entropy()),
        }
    }

    pub fn run_full_comparison_with<R: Rng>(
        &self,
        keypoints: &[Keypoint],
        profile: &UserPhysicalProfile,
        metrics: Option<&UserShootingMetrics>,
        cues: &mut CueSelector<R>,
    ) -> ComparisonResult {
        let frame = self.analysis.processor().process_frame(keypoints);
        let measured = frame.current_metrics(self.config.min_confidence);
        let user_metrics = metrics.cloned().unwrap_or_default().or(&measured);

        self.compare(Some(frame), user_metrics, profile, cues)
    }

    /// Compare a multi-frame shot attempt, aggregating metrics across frames
    pub fn run_session_comparison(
        &self,
        frames: &[Vec<Keypoint>],
        profile: &UserPhysicalProfile,
        metrics: Option<&UserShootingMetrics>,
    ) -> ComparisonResult {
        match self.config.cue_seed {
            Some(seed) => self.run_session_comparison_with(frames, profile, metrics, &mut CueSelector::seeded(seed)),
            None => self.run_session_comparison_with(frames, profile, metrics, &mut CueSelector::from_entropy()),
        }
    }

    pub fn run_session_comparison_with<R: Rng>(
        &self,
        frames: &[Vec<Keypoint>],
        profile: &UserPhysicalProfile,
        metrics: Option<&UserShootingMetrics>,
        cues: &mut CueSelector<R>,
    ) -> ComparisonResult {
        let (_, measured) = self.analysis.analyze_attempt(frames);
        let user_metrics = metrics.cloned().unwrap_or_default().or(&measured);

        self.compare(None, user_metrics, profile, cues)
    }

    fn compare<R: Rng>(
        &self,
        frame: Option<FrameAnalysis>,
        user_metrics: UserShootingMetrics,
        profile: &UserPhysicalProfile,
        cues: &mut CueSelector<R>,
    ) -> ComparisonResult {
        let search = self.find_matches(profile, &user_metrics);
        let optimal_mechanics = extract_optimal_mechanics(&search.matches, self.config.top_n);
        let comparisons = compare_user_to_optimal(&user_metrics, &optimal_mechanics);
        let feedback = generate_feedback(profile, &comparisons, &search.matches, cues);
        let recommendations = prioritized_recommendations(&comparisons);

        info!(
            "Comparison complete: {} matches{}, {} metrics compared, {} recommendations",
            search.matches.len(),
            if search.widened { " (widened)" } else { "" },
            comparisons.len(),
            recommendations.len()
        );

        ComparisonResult {
            frame,
            user_metrics,
            matches: search.matches,
            optimal_mechanics,
            comparisons,
            feedback,
            recommendations,
            search_widened: search.widened,
        }
    }
}
