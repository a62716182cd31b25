use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{CoachError, Result};
use crate::models::shooter_profile::{BodyBuild, ShooterProfile, SkillLevel};
use crate::models::shooting_metrics::ShooterMetrics;

pub const BUILTIN_CATALOG_VERSION: &str = "2024.1";

static BUILTIN_CATALOG: Lazy<ReferenceCatalog> = Lazy::new(|| ReferenceCatalog {
    version: BUILTIN_CATALOG_VERSION.to_string(),
    shooters: builtin_shooters(),
});

/// Versioned, read-only catalog of reference shooters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceCatalog {
    version: String,
    shooters: Vec<ShooterProfile>,
}

impl ReferenceCatalog {
    /// Build a catalog; at least one shooter is required
    pub fn new(version: impl Into<String>, shooters: Vec<ShooterProfile>) -> Result<Self> {
        if shooters.is_empty() {
            return Err(CoachError::EmptyCatalog);
        }

        Ok(Self {
            version: version.into(),
            shooters,
        })
    }

    /// The catalog compiled into the library, constructed once per process
    pub fn builtin() -> &'static ReferenceCatalog {
        &BUILTIN_CATALOG
    }

    /// Parse a catalog from JSON (`{"version": .., "shooters": [..]}`)
    pub fn from_json_str(json: &str) -> Result<Self> {
        let catalog: ReferenceCatalog = serde_json::from_str(json)?;
        Self::new(catalog.version, catalog.shooters)
    }

    /// Load a catalog file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| CoachError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let catalog = Self::from_json_str(&contents)?;
        tracing::info!(
            "Loaded reference catalog {} ({} shooters) from {}",
            catalog.version,
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn shooters(&self) -> &[ShooterProfile] {
        &self.shooters
    }

    pub fn get(&self, id: &str) -> Option<&ShooterProfile> {
        self.shooters.iter().find(|shooter| shooter.id == id)
    }

    pub fn len(&self) -> usize {
        self.shooters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shooters.is_empty()
    }
}

#[allow(clippy::too_many_arguments)]
fn shooter(
    id: &str,
    name: &str,
    height_inches: f64,
    wingspan_inches: f64,
    weight_lbs: f64,
    body_build: BodyBuild,
    skill_level: SkillLevel,
    metrics: [f64; 6],
) -> ShooterProfile {
    let [elbow_angle, knee_angle, release_angle, shoulder_tilt, hip_tilt, follow_through_angle] =
        metrics;

    ShooterProfile {
        id: id.to_string(),
        name: name.to_string(),
        height_inches,
        wingspan_inches,
        weight_lbs,
        body_build,
        skill_level,
        shooting_metrics: ShooterMetrics {
            elbow_angle,
            knee_angle,
            release_angle,
            shoulder_tilt,
            hip_tilt,
            follow_through_angle,
        },
    }
}

// metrics: [elbow, knee, release, shoulder tilt, hip tilt, follow-through]
// release is forearm elevation at the release point, not the ball launch angle
fn builtin_shooters() -> Vec<ShooterProfile> {
    use BodyBuild::*;
    use SkillLevel::*;

    vec![
        shooter("g01", "Marcus Reed", 74.0, 77.0, 185.0, Guard, Elite, [90.0, 122.0, 78.0, 2.0, 3.0, 172.0]),
        shooter("g02", "Devin Hale", 75.0, 78.0, 195.0, Guard, Pro, [88.0, 118.0, 76.0, 3.0, 2.0, 170.0]),
        shooter("g03", "Tyrese Walker", 72.0, 75.0, 175.0, Guard, Advanced, [92.0, 125.0, 74.0, 4.0, 4.0, 168.0]),
        shooter("g04", "Jalen Brooks", 73.0, 74.0, 170.0, Guard, Intermediate, [95.0, 130.0, 71.0, 5.0, 5.0, 165.0]),
        shooter("g05", "Chris Novak", 71.0, 72.0, 165.0, Guard, Developing, [100.0, 138.0, 66.0, 7.0, 6.0, 160.0]),
        shooter("g06", "Eli Ramirez", 70.0, 71.0, 155.0, Guard, NeedsWork, [105.0, 145.0, 62.0, 9.0, 8.0, 155.0]),
        shooter("g07", "Sam Okafor", 75.0, 79.0, 190.0, Guard, Average, [96.0, 132.0, 70.0, 6.0, 5.0, 163.0]),
        shooter("g08", "Noah Fischer", 74.0, 75.0, 180.0, Guard, Poor, [110.0, 150.0, 58.0, 11.0, 9.0, 150.0]),
        shooter("w01", "Andre Coleman", 78.0, 83.0, 215.0, Wing, Elite, [89.0, 120.0, 80.0, 2.0, 2.0, 174.0]),
        shooter("w02", "Kevin Duarte", 77.0, 81.0, 205.0, Wing, Pro, [91.0, 121.0, 77.0, 3.0, 3.0, 171.0]),
        shooter("w03", "Miles Carter", 76.0, 80.0, 200.0, Wing, Advanced, [93.0, 126.0, 75.0, 4.0, 3.0, 169.0]),
        shooter("w04", "Isaiah Grant", 77.0, 79.0, 195.0, Wing, Intermediate, [96.0, 131.0, 72.0, 5.0, 4.0, 166.0]),
        shooter("w05", "Tommy Lindqvist", 76.0, 77.0, 190.0, Wing, Developing, [101.0, 137.0, 68.0, 7.0, 6.0, 161.0]),
        shooter("w06", "Ray Mensah", 78.0, 80.0, 210.0, Wing, NeedsWork, [104.0, 142.0, 64.0, 8.0, 7.0, 157.0]),
        shooter("w07", "Luca Bianchi", 77.0, 78.0, 200.0, Wing, Average, [98.0, 134.0, 70.0, 6.0, 5.0, 164.0]),
        shooter("f01", "Darius King", 80.0, 85.0, 235.0, Forward, Elite, [90.0, 124.0, 79.0, 3.0, 2.0, 173.0]),
        shooter("f02", "Owen Pryce", 81.0, 84.0, 240.0, Forward, Pro, [92.0, 127.0, 76.0, 3.0, 3.0, 170.0]),
        shooter("f03", "Jordan Ellis", 79.0, 82.0, 225.0, Forward, Advanced, [94.0, 128.0, 74.0, 4.0, 4.0, 167.0]),
        shooter("f04", "Mateo Silva", 80.0, 82.0, 230.0, Forward, Intermediate, [97.0, 133.0, 71.0, 6.0, 5.0, 164.0]),
        shooter("f05", "Ben Adeyemi", 79.0, 80.0, 220.0, Forward, Developing, [102.0, 139.0, 67.0, 8.0, 6.0, 159.0]),
        shooter("f06", "Caleb Moore", 81.0, 82.0, 245.0, Forward, NeedsWork, [106.0, 144.0, 63.0, 9.0, 8.0, 154.0]),
        shooter("c01", "Victor Lang", 84.0, 90.0, 250.0, Center, Elite, [91.0, 126.0, 81.0, 3.0, 3.0, 172.0]),
        shooter("c02", "Hassan Diallo", 83.0, 88.0, 255.0, Center, Pro, [93.0, 128.0, 77.0, 4.0, 3.0, 169.0]),
        shooter("c03", "Peter Kowalski", 84.0, 87.0, 260.0, Center, Advanced, [95.0, 130.0, 75.0, 4.0, 4.0, 166.0]),
        shooter("c04", "Greg Whitfield", 83.0, 86.0, 265.0, Center, Intermediate, [98.0, 135.0, 72.0, 6.0, 5.0, 163.0]),
        shooter("c05", "Omar Farouk", 82.0, 85.0, 245.0, Center, Developing, [103.0, 140.0, 68.0, 8.0, 7.0, 158.0]),
        shooter("c06", "Liam O'Connor", 85.0, 88.0, 270.0, Center, NeedsWork, [107.0, 146.0, 64.0, 10.0, 8.0, 153.0]),
        shooter("c07", "Sean Murphy", 82.0, 84.0, 240.0, Center, Average, [99.0, 136.0, 69.0, 7.0, 6.0, 161.0]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::collections::HashSet;
    use std::io::Write;

    #[test]
    fn test_builtin_catalog() {
        let catalog = ReferenceCatalog::builtin();
        assert_eq!(catalog.version(), BUILTIN_CATALOG_VERSION);
        assert!(catalog.len() >= 20);
        assert_eq!(catalog.get("g01").unwrap().name, "Marcus Reed");
        assert!(catalog.get("zz99").is_none());
    }

    #[test]
    fn test_builtin_ids_unique() {
        let catalog = ReferenceCatalog::builtin();
        let ids: HashSet<&str> = catalog.shooters().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn test_builtin_covers_every_build_and_user_skill_band() {
        let catalog = ReferenceCatalog::builtin();
        for build in [BodyBuild::Guard, BodyBuild::Wing, BodyBuild::Forward, BodyBuild::Center] {
            assert!(catalog.shooters().iter().any(|s| s.body_build == build));
        }
        for level in [
            SkillLevel::NeedsWork,
            SkillLevel::Developing,
            SkillLevel::Intermediate,
            SkillLevel::Advanced,
            SkillLevel::Pro,
            SkillLevel::Elite,
        ] {
            assert!(catalog.shooters().iter().any(|s| s.skill_level == level));
        }
    }

    #[test]
    fn test_from_json_str() {
        let json = r#"{
            "version": "test-1",
            "shooters": [{
                "id": "t1",
                "name": "Test Shooter",
                "heightInches": 75,
                "wingspanInches": 77,
                "weightLbs": 190,
                "bodyBuild": "GUARD",
                "skillLevel": "PRO",
                "shootingMetrics": {
                    "elbow": 90, "knee": 120, "release": 50,
                    "shoulderTilt": 2, "hipTilt": 3, "followThroughAngle": 170
                }
            }]
        }"#;

        let catalog = ReferenceCatalog::from_json_str(json).unwrap();
        assert_eq!(catalog.version(), "test-1");
        assert_eq!(catalog.shooters()[0].skill_level, SkillLevel::Pro);
        assert_eq!(catalog.shooters()[0].shooting_metrics.elbow_angle, 90.0);
    }

    #[test]
    fn test_empty_catalog_rejected() {
        let result = ReferenceCatalog::from_json_str(r#"{"version": "x", "shooters": []}"#);
        assert_matches!(result, Err(CoachError::EmptyCatalog));
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let json = serde_json::to_string(ReferenceCatalog::builtin()).unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let catalog = ReferenceCatalog::from_json_file(file.path()).unwrap();
        assert_eq!(&catalog, ReferenceCatalog::builtin());
    }

    #[test]
    fn test_missing_file() {
        let result = ReferenceCatalog::from_json_file("/nonexistent/catalog.json");
        assert_matches!(result, Err(CoachError::Io { .. }));
    }
}
