use crate::CONFY_APP_NAME;
use crate::animation::{DEFAULT_EXPLODE_RATE, Easing};
use crate::error::{Result, ViewerError};

use log::warn;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

fn load_or_default<T: Default + Serialize + DeserializeOwned>(name: &str) -> T {
    match confy::load(CONFY_APP_NAME, name) {
        Ok(value) => value,
        Err(e) => {
            warn!("Failed to load {name} settings, using defaults: {e}");
            T::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
    /// Progress per second for the explode transition
    pub explode_rate: f32,
    pub easing: Easing,
    /// Grid units scrolled per second while assembled
    pub grid_scroll_rate: f32,
    /// Loop period of the grid offset; `None` for an unbounded time uniform
    pub grid_wrap_period: Option<f32>,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            explode_rate: DEFAULT_EXPLODE_RATE,
            easing: Easing::SmoothStep,
            grid_scroll_rate: 0.5,
            grid_wrap_period: Some(1.0),
        }
    }
}

impl AnimationSettings {
    pub fn load() -> Self {
        load_or_default("animation")
    }

    pub fn save(&self) -> Result<()> {
        Ok(confy::store(CONFY_APP_NAME, "animation", self)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub position: [f32; 3],
    pub target: [f32; 3],
    /// 1.0 = one full orbit per minute
    pub auto_rotate_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Radians from straight up; keeps the camera above the ground
    pub max_polar_angle: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            position: [5.0, 4.0, 6.0],
            target: [0.0, 0.0, 0.0],
            auto_rotate_speed: 1.0,
            min_distance: 2.0,
            max_distance: 12.0,
            max_polar_angle: std::f32::consts::FRAC_PI_2 - 0.05,
        }
    }
}

impl CameraSettings {
    pub fn load() -> Self {
        load_or_default("camera")
    }

    pub fn save(&self) -> Result<()> {
        Ok(confy::store(CONFY_APP_NAME, "camera", self)?)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    pub show_stats_panel: bool,
}

impl UiSettings {
    pub fn load() -> Self {
        load_or_default("ui")
    }

    pub fn save(&self) -> Result<()> {
        Ok(confy::store(CONFY_APP_NAME, "ui", self)?)
    }
}

// Aggregate struct for convenience
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    pub animation: AnimationSettings,
    pub camera: CameraSettings,
    pub ui: UiSettings,
}

impl Settings {
    pub fn load() -> Self {
        Self {
            animation: AnimationSettings::load(),
            camera: CameraSettings::load(),
            ui: UiSettings::load(),
        }
    }

    pub fn save(&self) -> Result<()> {
        self.animation.save()?;
        self.camera.save()?;
        self.ui.save()
    }

    pub fn validate(&self) -> Result<()> {
        let a = &self.animation;
        if !a.explode_rate.is_finite() || a.explode_rate <= 0.0 {
            return Err(ViewerError::config("animation.explode_rate must be positive"));
        }
        if !a.grid_scroll_rate.is_finite() || a.grid_scroll_rate < 0.0 {
            return Err(ViewerError::config("animation.grid_scroll_rate must be non-negative"));
        }
        if let Some(period) = a.grid_wrap_period {
            if !period.is_finite() || period <= 0.0 {
                return Err(ViewerError::config("animation.grid_wrap_period must be positive"));
            }
        }

        let c = &self.camera;
        let finite = c.position.iter().chain(&c.target).all(|v| v.is_finite())
            && c.auto_rotate_speed.is_finite()
            && c.max_polar_angle.is_finite();
        if !finite {
            return Err(ViewerError::config("camera settings contain non-finite values"));
        }
        if !(c.min_distance > 0.0 && c.min_distance <= c.max_distance && c.max_distance.is_finite()) {
            return Err(ViewerError::config(format!(
                "camera distance range [{}, {}] is invalid",
                c.min_distance, c.max_distance
            )));
        }
        if c.max_polar_angle <= 0.0 || c.max_polar_angle > std::f32::consts::PI {
            return Err(ViewerError::config("camera.max_polar_angle must be in (0, pi]"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        Settings::default().validate().unwrap();
    }

    #[test]
    fn rejects_zero_rate() {
        let mut settings = Settings::default();
        settings.animation.explode_rate = 0.0;
        assert!(settings.validate().unwrap_err().is_configuration());
    }

    #[test]
    fn rejects_inverted_distance_range() {
        let mut settings = Settings::default();
        settings.camera.min_distance = 20.0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn partial_config_falls_back_per_field() {
        let parsed: AnimationSettings = serde_json::from_str(r#"{ "easing": "linear" }"#).unwrap();
        assert_eq!(parsed.easing, Easing::Linear);
        assert_eq!(parsed.explode_rate, DEFAULT_EXPLODE_RATE);
    }
}
