use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use shot_coach::models::{validate_metrics, validate_profile, Keypoint, UserPhysicalProfile, UserShootingMetrics};

/// A keypoints file holds either one frame or a sequence of frames
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum KeypointInput {
    Frames(Vec<Vec<Keypoint>>),
    Frame(Vec<Keypoint>),
}

fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {} file {}", what, path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("Failed to parse {} file {}", what, path.display()))
}

pub fn read_keypoints(path: &Path) -> Result<KeypointInput> {
    read_json(path, "keypoints")
}

pub fn read_profile(path: &Path) -> Result<UserPhysicalProfile> {
    let profile: UserPhysicalProfile = read_json(path, "profile")?;
    validate_profile(&profile).with_context(|| format!("Invalid profile in {}", path.display()))?;
    Ok(profile)
}

pub fn read_metrics(path: &Path) -> Result<UserShootingMetrics> {
    let metrics: UserShootingMetrics = read_json(path, "metrics")?;
    validate_metrics(&metrics).with_context(|| format!("Invalid metrics in {}", path.display()))?;
    Ok(metrics)
}
