// Data models for shot analysis, matching and coaching

pub mod keypoint;
pub mod shot_frame;
pub mod shooting_metrics;
pub mod shooter_profile;
pub mod comparison;
pub mod coaching_feedback;
pub mod drill;
pub mod validation;

pub use keypoint::*;
pub use shot_frame::*;
pub use shooting_metrics::*;
pub use shooter_profile::*;
pub use comparison::*;
pub use coaching_feedback::*;
pub use drill::*;
pub use validation::*;
