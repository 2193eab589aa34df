use std::collections::HashMap;

use nalgebra_glm as glm;

use crate::animation::Pose;
use crate::error::{Result, ViewerError};

/// One rigid sub-assembly of the car
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    pub id: String,
    pub rest: Pose,
    pub exploded: Pose,
}

impl Part {
    pub fn new(id: impl Into<String>, rest: Pose, exploded: Pose) -> Self {
        Self {
            id: id.into(),
            rest,
            exploded,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(ViewerError::config("part id must not be empty"));
        }
        for (label, pose) in [("rest", &self.rest), ("exploded", &self.exploded)] {
            if !pose.is_finite() {
                return Err(ViewerError::config(format!(
                    "part `{}` has a non-finite {label} pose",
                    self.id
                )));
            }
            if glm::quat_length(&pose.rotation) < 1e-6 {
                return Err(ViewerError::config(format!(
                    "part `{}` has a zero-length {label} rotation",
                    self.id
                )));
            }
            if pose.scale.iter().any(|s| *s == 0.0) {
                return Err(ViewerError::config(format!(
                    "part `{}` has a zero {label} scale component",
                    self.id
                )));
            }
        }
        Ok(())
    }
}

/// Read-only, ordered set of parts. Rotations are stored normalized.
#[derive(Debug, Clone)]
pub struct PartRegistry {
    parts: Vec<Part>,
    index: HashMap<String, usize>,
}

impl PartRegistry {
    pub fn new(parts: Vec<Part>) -> Result<Self> {
        if parts.is_empty() {
            return Err(ViewerError::config("part manifest contains no parts"));
        }

        let mut index = HashMap::with_capacity(parts.len());
        let mut normalized = Vec::with_capacity(parts.len());
        for (i, mut part) in parts.into_iter().enumerate() {
            part.validate()?;
            if index.insert(part.id.clone(), i).is_some() {
                return Err(ViewerError::config(format!("duplicate part id `{}`", part.id)));
            }
            part.rest.rotation = glm::quat_normalize(&part.rest.rotation);
            part.exploded.rotation = glm::quat_normalize(&part.exploded.rotation);
            normalized.push(part);
        }

        Ok(Self {
            parts: normalized,
            index,
        })
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn get(&self, id: &str) -> Result<&Part> {
        self.index_of(id).map(|i| &self.parts[i])
    }

    pub fn index_of(&self, id: &str) -> Result<usize> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| ViewerError::unknown_part(id))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wheel(id: &str, x: f32) -> Part {
        Part::new(
            id,
            Pose::from_position(glm::vec3(x, 0.0, 0.0)),
            Pose::from_position(glm::vec3(x * 2.0, 0.0, 0.0)),
        )
    }

    #[test]
    fn keeps_manifest_order() {
        let registry = PartRegistry::new(vec![wheel("b", 1.0), wheel("a", 2.0)]).unwrap();
        let ids: Vec<_> = registry.parts().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
        assert_eq!(registry.index_of("a").unwrap(), 1);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn rejects_duplicates() {
        let err = PartRegistry::new(vec![wheel("wheel_fl", 1.0), wheel("wheel_fl", 2.0)]).unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn rejects_empty_manifest_and_ids() {
        assert!(PartRegistry::new(Vec::new()).unwrap_err().is_configuration());
        assert!(PartRegistry::new(vec![wheel("  ", 1.0)]).unwrap_err().is_configuration());
    }

    #[test]
    fn rejects_non_finite_components() {
        let mut part = wheel("wing", 1.0);
        part.exploded.position.y = f32::INFINITY;
        assert!(PartRegistry::new(vec![part]).unwrap_err().is_configuration());
    }

    #[test]
    fn rejects_degenerate_rotation_and_scale() {
        let mut part = wheel("halo", 1.0);
        part.rest.rotation = glm::quat(0.0, 0.0, 0.0, 0.0);
        assert!(PartRegistry::new(vec![part]).unwrap_err().is_configuration());

        let mut part = wheel("halo", 1.0);
        part.rest.scale.x = 0.0;
        assert!(PartRegistry::new(vec![part]).unwrap_err().is_configuration());
    }

    #[test]
    fn unknown_lookup_is_invariant_violation() {
        let registry = PartRegistry::new(vec![wheel("wheel_fl", 1.0)]).unwrap();
        assert!(registry.get("wheel_fl").is_ok());
        assert!(!registry.contains("nose"));
        assert!(registry.get("nose").unwrap_err().is_invariant_violation());
    }
}
