// Pose and per-part animation state

use super::interpolation::{compose_trs, lerp_vec3, quat_slerp};
use nalgebra_glm as glm;

/// Rigid transform of one part: position, rotation and scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: glm::Vec3,
    pub rotation: glm::Quat,
    pub scale: glm::Vec3,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: glm::vec3(0.0, 0.0, 0.0),
            rotation: glm::quat_identity(),
            scale: glm::vec3(1.0, 1.0, 1.0),
        }
    }
}

impl Pose {
    pub fn new(position: glm::Vec3, rotation: glm::Quat, scale: glm::Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    pub fn from_position(position: glm::Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Same pose moved by `offset`
    pub fn translated(&self, offset: &glm::Vec3) -> Self {
        Self {
            position: self.position + offset,
            ..*self
        }
    }

    /// Blend two poses. Position and scale are linear, rotation is slerped.
    pub fn lerp(from: &Pose, to: &Pose, t: f32) -> Pose {
        if t <= 0.0 {
            return *from;
        }
        if t >= 1.0 {
            return *to;
        }
        Pose {
            position: lerp_vec3(&from.position, &to.position, t),
            rotation: quat_slerp(&from.rotation, &to.rotation, t),
            scale: lerp_vec3(&from.scale, &to.scale, t),
        }
    }

    pub fn matrix(&self) -> glm::Mat4 {
        compose_trs(&self.position, &self.rotation, &self.scale)
    }

    pub fn is_finite(&self) -> bool {
        self.position.iter().all(|c| c.is_finite())
            && self.scale.iter().all(|c| c.is_finite())
            && self.rotation.coords.iter().all(|c| c.is_finite())
    }
}

/// Live animation data for a single part
#[derive(Debug, Clone)]
pub struct AnimationState {
    pub current: Pose,
    /// 0 = assembled, 1 = exploded
    pub progress: f32,
    pub target_progress: f32,
}

impl AnimationState {
    pub fn at_rest(rest: Pose) -> Self {
        Self {
            current: rest,
            progress: 0.0,
            target_progress: 0.0,
        }
    }

    pub fn is_settled(&self) -> bool {
        self.progress == self.target_progress
    }

    /// Move progress toward the target by at most `step`, landing on it exactly
    pub fn advance(&mut self, step: f32) {
        let remaining = self.target_progress - self.progress;
        if remaining.abs() <= step {
            self.progress = self.target_progress;
        } else {
            self.progress = (self.progress + step * remaining.signum()).clamp(0.0, 1.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::interpolation::quat_from_euler_deg;
    use approx::assert_abs_diff_eq;

    #[test]
    fn lerp_midpoint_blends_every_channel() {
        let a = Pose::default();
        let b = Pose::new(
            glm::vec3(2.0, 4.0, -2.0),
            quat_from_euler_deg(&glm::vec3(0.0, 90.0, 0.0)),
            glm::vec3(3.0, 3.0, 3.0),
        );
        let mid = Pose::lerp(&a, &b, 0.5);
        assert_abs_diff_eq!(mid.position.x, 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(mid.position.y, 2.0, epsilon = 1e-6);
        assert_abs_diff_eq!(mid.scale.z, 2.0, epsilon = 1e-6);
        let expected = quat_from_euler_deg(&glm::vec3(0.0, 45.0, 0.0));
        assert_abs_diff_eq!(glm::quat_dot(&mid.rotation, &expected).abs(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn lerp_is_exact_at_the_ends() {
        let a = Pose::from_position(glm::vec3(0.1, 0.2, 0.3));
        let b = a.translated(&glm::vec3(1.0, 0.0, 0.0));
        assert_eq!(Pose::lerp(&a, &b, 0.0), a);
        assert_eq!(Pose::lerp(&a, &b, 1.0), b);
    }

    #[test]
    fn matrix_carries_translation_in_last_column() {
        let m = Pose::from_position(glm::vec3(2.0, 0.0, -1.0)).matrix();
        assert_eq!(m[(0, 3)], 2.0);
        assert_eq!(m[(2, 3)], -1.0);
        assert_eq!(m[(3, 3)], 1.0);
    }

    #[test]
    fn advance_never_overshoots() {
        let mut state = AnimationState::at_rest(Pose::default());
        state.target_progress = 1.0;
        state.advance(0.4);
        assert_abs_diff_eq!(state.progress, 0.4, epsilon = 1e-6);
        state.advance(100.0);
        assert_eq!(state.progress, 1.0);
        assert!(state.is_settled());
        state.target_progress = 0.0;
        state.advance(0.25);
        assert_abs_diff_eq!(state.progress, 0.75, epsilon = 1e-6);
    }

    #[test]
    fn non_finite_pose_detected() {
        let mut pose = Pose::default();
        assert!(pose.is_finite());
        pose.scale.y = f32::NAN;
        assert!(!pose.is_finite());
    }
}
