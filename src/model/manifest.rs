// JSON part manifest: rest poses plus explicit or derived exploded poses

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::{debug, info};
use nalgebra_glm as glm;
use serde::{Deserialize, Serialize};

use super::part::{Part, PartRegistry};
use crate::animation::Pose;
use crate::animation::interpolation::quat_from_euler_deg;
use crate::error::{Result, ViewerError};

/// Manifest shipped with the viewer
pub const BUILTIN_F1_MANIFEST: &str = include_str!("../../assets/f1_parts.json");

const DEFAULT_EXPLODE_DISTANCE: f32 = 1.5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoseSpec {
    pub position: [f32; 3],
    /// XYZ Euler angles, degrees
    #[serde(default)]
    pub rotation: [f32; 3],
    #[serde(default = "unit_scale")]
    pub scale: [f32; 3],
}

fn unit_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

fn default_explode_distance() -> f32 {
    DEFAULT_EXPLODE_DISTANCE
}

impl PoseSpec {
    pub fn to_pose(&self) -> Pose {
        Pose::new(
            glm::make_vec3(&self.position),
            quat_from_euler_deg(&glm::make_vec3(&self.rotation)),
            glm::make_vec3(&self.scale),
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartSpec {
    pub id: String,
    pub rest: PoseSpec,
    #[serde(default)]
    pub exploded: Option<PoseSpec>,
    /// Explode direction used when `exploded` is omitted
    #[serde(default)]
    pub direction: Option<[f32; 3]>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartManifest {
    #[serde(default = "default_explode_distance")]
    pub explode_distance: f32,
    pub parts: Vec<PartSpec>,
}

impl PartManifest {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading part manifest from {}", path.display());
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_F1_MANIFEST)
    }

    /// Resolve every entry into a part and validate the result
    pub fn into_registry(self) -> Result<PartRegistry> {
        if !self.explode_distance.is_finite() || self.explode_distance < 0.0 {
            return Err(ViewerError::config(format!(
                "explode_distance must be finite and non-negative, got {}",
                self.explode_distance
            )));
        }

        let centroid = self.rest_centroid();
        let mut parts = Vec::with_capacity(self.parts.len());
        for entry in &self.parts {
            let rest = entry.rest.to_pose();
            let exploded = match &entry.exploded {
                Some(exploded) => exploded.to_pose(),
                None => {
                    let direction = explode_direction(entry, &rest, &centroid)?;
                    rest.translated(&(direction * self.explode_distance))
                }
            };
            debug!(
                "part {}: rest {:?} -> exploded {:?}",
                entry.id,
                rest.position.as_slice(),
                exploded.position.as_slice()
            );
            parts.push(Part::new(entry.id.clone(), rest, exploded));
        }

        let registry = PartRegistry::new(parts)?;
        info!("Part registry ready: {} parts", registry.len());
        Ok(registry)
    }

    fn rest_centroid(&self) -> glm::Vec3 {
        if self.parts.is_empty() {
            return glm::Vec3::zeros();
        }
        let sum = self
            .parts
            .iter()
            .fold(glm::Vec3::zeros(), |acc, p| acc + glm::make_vec3(&p.rest.position));
        sum / self.parts.len() as f32
    }
}

fn explode_direction(entry: &PartSpec, rest: &Pose, centroid: &glm::Vec3) -> Result<glm::Vec3> {
    let raw = match entry.direction {
        Some(d) => {
            let d = glm::make_vec3(&d);
            if !d.iter().all(|c| c.is_finite()) {
                return Err(ViewerError::config(format!(
                    "part `{}` has a non-finite explode direction",
                    entry.id
                )));
            }
            d
        }
        None => rest.position - centroid,
    };

    if raw.iter().all(|c| c.is_finite()) && glm::length(&raw) > 1e-6 {
        Ok(glm::normalize(&raw))
    } else {
        // Part sits on the centroid: lift it straight up
        Ok(glm::vec3(0.0, 1.0, 0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn builtin_manifest_builds() {
        let registry = PartManifest::builtin().unwrap().into_registry().unwrap();
        assert!(registry.len() >= 10);
        for id in ["chassis", "wheel_fl", "wheel_fr", "wheel_rl", "wheel_rr", "front_wing", "rear_wing"] {
            assert!(registry.contains(id), "missing {id}");
        }
    }

    #[test]
    fn explicit_exploded_pose_wins() {
        let manifest = PartManifest::from_json(
            r#"{ "parts": [
                { "id": "wheel_fl",
                  "rest": { "position": [0, 0, 0] },
                  "exploded": { "position": [2, 0, 0] } }
            ] }"#,
        )
        .unwrap();
        let registry = manifest.into_registry().unwrap();
        let part = registry.get("wheel_fl").unwrap();
        assert_eq!(part.exploded.position, glm::vec3(2.0, 0.0, 0.0));
        assert_eq!(part.rest.scale, glm::vec3(1.0, 1.0, 1.0));
    }

    #[test]
    fn derived_pose_moves_away_from_centroid() {
        let manifest = PartManifest::from_json(
            r#"{ "explode_distance": 2.0, "parts": [
                { "id": "left",  "rest": { "position": [-1, 0, 0] } },
                { "id": "right", "rest": { "position": [1, 0, 0] } },
                { "id": "core",  "rest": { "position": [0, 0, 0] } }
            ] }"#,
        )
        .unwrap();
        let registry = manifest.into_registry().unwrap();
        assert_eq!(registry.get("left").unwrap().exploded.position, glm::vec3(-3.0, 0.0, 0.0));
        assert_eq!(registry.get("right").unwrap().exploded.position, glm::vec3(3.0, 0.0, 0.0));
        // centroid part goes up
        assert_eq!(registry.get("core").unwrap().exploded.position, glm::vec3(0.0, 2.0, 0.0));
    }

    #[test]
    fn explicit_direction_is_normalized() {
        let manifest = PartManifest::from_json(
            r#"{ "explode_distance": 1.0, "parts": [
                { "id": "halo", "rest": { "position": [0, 1, 0] }, "direction": [0, 0, 5] }
            ] }"#,
        )
        .unwrap();
        let part = manifest.into_registry().unwrap().get("halo").unwrap().clone();
        assert_abs_diff_eq!(part.exploded.position.z, 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(part.exploded.position.y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn rotation_is_read_in_degrees() {
        let manifest = PartManifest::from_json(
            r#"{ "parts": [
                { "id": "wing", "rest": { "position": [0, 0, 0], "rotation": [0, 180, 0] } }
            ] }"#,
        )
        .unwrap();
        let part = manifest.into_registry().unwrap().get("wing").unwrap().clone();
        assert_abs_diff_eq!(part.rest.rotation.j.abs(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn negative_distance_is_rejected() {
        let manifest = PartManifest::from_json(
            r#"{ "explode_distance": -1, "parts": [ { "id": "a", "rest": { "position": [0, 0, 0] } } ] }"#,
        )
        .unwrap();
        assert!(manifest.into_registry().unwrap_err().is_configuration());
    }

    #[test]
    fn missing_rest_pose_fails_to_parse() {
        let err = PartManifest::from_json(r#"{ "parts": [ { "id": "a" } ] }"#).unwrap_err();
        assert!(matches!(err, ViewerError::Manifest(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = PartManifest::load("/nonexistent/f1vis/parts.json").unwrap_err();
        assert!(matches!(err, ViewerError::Io(_)));
    }
}
