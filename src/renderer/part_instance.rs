use crate::animation::Pose;

/// Per-part model matrix in the layout the instance buffer expects
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PartInstance {
    /// Column-major
    pub model: [[f32; 4]; 4],
}

impl PartInstance {
    pub fn from_pose(pose: &Pose) -> Self {
        Self {
            model: pose.matrix().into(),
        }
    }

    pub fn translation(&self) -> [f32; 3] {
        let [x, y, z, _] = self.model[3];
        [x, y, z]
    }

    pub fn as_bytes(instances: &[PartInstance]) -> &[u8] {
        bytemuck::cast_slice(instances)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra_glm as glm;

    #[test]
    fn translation_lives_in_fourth_column() {
        let pose = Pose::from_position(glm::vec3(2.0, 0.5, -1.0));
        let instance = PartInstance::from_pose(&pose);
        assert_eq!(instance.translation(), [2.0, 0.5, -1.0]);
        assert_eq!(instance.model[0], [1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn byte_view_is_sixty_four_bytes_per_part() {
        let instances = [PartInstance::from_pose(&Pose::default()); 3];
        assert_eq!(PartInstance::as_bytes(&instances).len(), 3 * 64);
    }
}
