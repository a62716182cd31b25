//! Basketball shooting-form analysis.
//!
//! Keypoints from a pose detector are normalized onto a canonical skeleton,
//! turned into joint angles and a shooting phase, then compared against a
//! reference catalog of shooters to produce optimal-mechanics targets and
//! age-tiered coaching feedback.

pub mod config;
pub mod errors;
pub mod models;
pub mod services;

pub use config::{AnalysisConfig, ReferenceCatalog};
pub use errors::{CoachError, Result};
pub use services::ComparisonService;
