// Analysis pipeline services

pub mod coaching_cue_service;
pub mod coaching_feedback_service;
pub mod comparison_service;
pub mod deviation_analysis_service;
pub mod geometry;
pub mod keypoint_processor;
pub mod optimal_mechanics_service;
pub mod phase_classifier;
pub mod shot_analysis_service;
pub mod similarity_service;

pub use coaching_cue_service::{CueBank, CueSelector};
pub use coaching_feedback_service::generate_feedback;
pub use comparison_service::ComparisonService;
pub use deviation_analysis_service::{compare_user_to_optimal, prioritized_recommendations};
pub use keypoint_processor::KeypointProcessor;
pub use optimal_mechanics_service::extract_optimal_mechanics;
pub use phase_classifier::PhaseClassifier;
pub use shot_analysis_service::{phase_timeline, ShotAnalysisService};
pub use similarity_service::{filter_candidates, find_top_matches, score_candidate, CandidateSet};
