use std::f32::consts::TAU;

use super::CameraState;
use crate::settings::CameraSettings;

// Keeps the eye off the pole where the look-at basis degenerates
const MIN_POLAR: f32 = 0.01;

/// Orbit controls: auto-rotation while assembled, pointer orbit and zoom
pub struct CameraController {
    state: CameraState,
    auto_rotate_speed: f32,
    min_distance: f32,
    max_distance: f32,
    max_polar_angle: f32,
}

impl CameraController {
    pub fn new(settings: &CameraSettings) -> Self {
        let mut controller = Self {
            state: CameraState::from_position(settings.position, settings.target),
            auto_rotate_speed: settings.auto_rotate_speed,
            min_distance: settings.min_distance,
            max_distance: settings.max_distance,
            max_polar_angle: settings.max_polar_angle,
        };
        controller.clamp();
        let (azimuth, polar, distance) = (
            controller.state.azimuth,
            controller.state.polar,
            controller.state.distance,
        );
        controller.state = CameraState::new(azimuth, polar, distance, settings.target);
        controller
    }

    pub fn state(&self) -> &CameraState {
        &self.state
    }

    /// Advance auto-rotation. Spins only while the car is assembled.
    /// Returns true if the camera moved.
    pub fn tick(&mut self, dt: f32, exploded: bool) -> bool {
        if exploded || !dt.is_finite() || dt <= 0.0 || self.auto_rotate_speed == 0.0 {
            return false;
        }
        self.state.azimuth -= self.auto_rotate_angle(dt);
        self.state.azimuth = self.state.azimuth.rem_euclid(TAU);
        true
    }

    /// Radians turned in `dt` seconds; speed 1.0 is one orbit per minute
    pub fn auto_rotate_angle(&self, dt: f32) -> f32 {
        TAU / 60.0 * self.auto_rotate_speed * dt
    }

    /// Orbit around the target from pointer deltas in pixels
    pub fn rotate(&mut self, delta_x: f32, delta_y: f32) {
        self.state.azimuth -= delta_x * 0.01;
        self.state.polar -= delta_y * 0.01;
        self.clamp();
    }

    pub fn zoom(&mut self, delta: f32) {
        let zoom_factor = 1.0 - delta * 0.1;
        if zoom_factor.is_finite() && zoom_factor > 0.0 {
            self.state.distance *= zoom_factor;
        }
        self.clamp();
    }

    pub fn reset(&mut self) {
        self.state.reset();
    }

    fn clamp(&mut self) {
        self.state.distance = self.state.distance.clamp(self.min_distance, self.max_distance);
        self.state.polar = self.state.polar.clamp(MIN_POLAR, self.max_polar_angle.max(MIN_POLAR));
    }
}
