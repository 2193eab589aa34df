use nalgebra_glm as glm;

/// Orbit camera: spherical coordinates around a target, Y up.
///
/// `polar` is measured from +Y, `azimuth` around Y starting at +Z.
#[derive(Debug, Clone)]
pub struct CameraState {
    pub azimuth: f32,
    pub polar: f32,
    pub distance: f32,
    pub target: [f32; 3],
    pub default_azimuth: f32,
    pub default_polar: f32,
    pub default_distance: f32,
    pub default_target: [f32; 3],
}

impl CameraState {
    pub fn new(azimuth: f32, polar: f32, distance: f32, target: [f32; 3]) -> Self {
        Self {
            azimuth,
            polar,
            distance,
            target,
            default_azimuth: azimuth,
            default_polar: polar,
            default_distance: distance,
            default_target: target,
        }
    }

    /// Orbit that places the eye at `eye` looking at `target`
    pub fn from_position(eye: [f32; 3], target: [f32; 3]) -> Self {
        let offset = glm::make_vec3(&eye) - glm::make_vec3(&target);
        let distance = glm::length(&offset);
        if distance <= f32::EPSILON {
            return Self::new(0.0, std::f32::consts::FRAC_PI_2, 1.0, target);
        }
        let azimuth = offset.x.atan2(offset.z);
        let polar = (offset.y / distance).clamp(-1.0, 1.0).acos();
        Self::new(azimuth, polar, distance, target)
    }

    pub fn reset(&mut self) {
        self.azimuth = self.default_azimuth;
        self.polar = self.default_polar;
        self.distance = self.default_distance;
        self.target = self.default_target;
    }

    pub fn eye(&self) -> glm::Vec3 {
        let sin_polar = self.polar.sin();
        glm::make_vec3(&self.target)
            + glm::vec3(
                self.distance * sin_polar * self.azimuth.sin(),
                self.distance * self.polar.cos(),
                self.distance * sin_polar * self.azimuth.cos(),
            )
    }

    pub fn view_matrix(&self) -> glm::Mat4 {
        glm::look_at(
            &self.eye(),
            &glm::make_vec3(&self.target),
            &glm::vec3(0.0, 1.0, 0.0),
        )
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self::from_position([5.0, 4.0, 6.0], [0.0, 0.0, 0.0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn from_position_round_trips_eye() {
        let state = CameraState::from_position([5.0, 4.0, 6.0], [0.0, 0.5, 0.0]);
        let eye = state.eye();
        assert_abs_diff_eq!(eye.x, 5.0, epsilon = 1e-4);
        assert_abs_diff_eq!(eye.y, 4.0, epsilon = 1e-4);
        assert_abs_diff_eq!(eye.z, 6.0, epsilon = 1e-4);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut state = CameraState::default();
        let distance = state.distance;
        state.azimuth += 1.0;
        state.distance = 3.0;
        state.reset();
        assert_eq!(state.distance, distance);
        assert_eq!(state.azimuth, state.default_azimuth);
    }
}
