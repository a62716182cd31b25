use crate::errors::{CoachError, Result};
use crate::models::shooter_profile::UserPhysicalProfile;
use crate::models::shooting_metrics::{ShootingMetric, UserShootingMetrics};

/// Height validation (inches)
pub fn validate_height(height: f64) -> Result<()> {
    if !(48.0..=96.0).contains(&height) {
        return Err(CoachError::InvalidProfile(
            "Height must be between 48 and 96 inches".to_string(),
        ));
    }
    Ok(())
}

/// Wingspan validation (inches)
pub fn validate_wingspan(wingspan: f64) -> Result<()> {
    if !(48.0..=110.0).contains(&wingspan) {
        return Err(CoachError::InvalidProfile(
            "Wingspan must be between 48 and 110 inches".to_string(),
        ));
    }
    Ok(())
}

/// Weight validation (pounds)
pub fn validate_weight(weight: f64) -> Result<()> {
    if !(50.0..=400.0).contains(&weight) {
        return Err(CoachError::InvalidProfile(
            "Weight must be between 50 and 400 lbs".to_string(),
        ));
    }
    Ok(())
}

/// Age validation (years)
pub fn validate_age(age: u32) -> Result<()> {
    if !(5..=80).contains(&age) {
        return Err(CoachError::InvalidProfile(
            "Age must be between 5 and 80".to_string(),
        ));
    }
    Ok(())
}

/// Validate a user profile read from an untrusted source
pub fn validate_profile(profile: &UserPhysicalProfile) -> Result<()> {
    validate_height(profile.height_inches)?;

    if let Some(wingspan) = profile.wingspan_inches {
        validate_wingspan(wingspan)?;
    }
    if let Some(weight) = profile.weight_lbs {
        validate_weight(weight)?;
    }
    if let Some(age) = profile.age {
        validate_age(age)?;
    }
    if let Some(ability) = profile.athletic_ability {
        if !(1..=10).contains(&ability) {
            return Err(CoachError::InvalidProfile(
                "Athletic ability must be between 1 and 10".to_string(),
            ));
        }
    }

    Ok(())
}

/// Supplied angles must be finite and within a half turn
pub fn validate_metrics(metrics: &UserShootingMetrics) -> Result<()> {
    for metric in ShootingMetric::ALL {
        if let Some(value) = metrics.get(metric) {
            if !value.is_finite() || !(-180.0..=180.0).contains(&value) {
                return Err(CoachError::InvalidProfile(format!(
                    "{} must be between -180 and 180 degrees",
                    metric.label()
                )));
            }
        }
    }
    Ok(())
}
