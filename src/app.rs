use std::rc::Rc;

use log::{debug, info};
use nalgebra_glm as glm;
use serde::Serialize;

use crate::animation::{ExplodeAnimator, GridScroller};
use crate::error::Result;
use crate::intent::IntentHandle;
use crate::model::PartRegistry;
use crate::renderer::{CameraController, PartInstance};
use crate::settings::Settings;

/// UI actions the host understands
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    ToggleExplode,
    SetExploded(bool),
    ToggleStats,
    ResetCamera,
    Orbit { dx: f32, dy: f32 },
    Zoom(f32),
}

pub struct CommandResponse {
    pub redraw: bool,
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone)]
pub struct FrameOutput {
    /// One entry per part, in registry order
    pub instances: Vec<PartInstance>,
    pub grid_offset: f32,
    pub camera_eye: glm::Vec3,
    pub view: glm::Mat4,
    pub exploded: bool,
    pub settled: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PoseSnapshot {
    pub id: String,
    pub position: [f32; 3],
    /// x, y, z, w
    pub rotation: [f32; 4],
    pub scale: [f32; 3],
    pub progress: f32,
}

/// Owns the intent and every time-driven component; the render loop calls
/// `frame` once per iteration.
pub struct Viewer {
    intent: IntentHandle,
    animator: ExplodeAnimator,
    grid: GridScroller,
    camera: CameraController,
    stats_visible: bool,
}

impl Viewer {
    pub fn new(settings: &Settings, registry: PartRegistry) -> Result<Self> {
        settings.validate()?;

        let anim = &settings.animation;
        let animator = ExplodeAnimator::new(Rc::new(registry), anim.explode_rate, anim.easing)?;
        let grid = GridScroller::new(anim.grid_scroll_rate, anim.grid_wrap_period);
        let camera = CameraController::new(&settings.camera);

        info!(
            "Viewer ready: {} parts, explode rate {}/s, easing {:?}",
            animator.registry().len(),
            anim.explode_rate,
            anim.easing
        );

        Ok(Self {
            intent: IntentHandle::default(),
            animator,
            grid,
            camera,
            stats_visible: settings.ui.show_stats_panel,
        })
    }

    /// Handle for UI code that wants to flip the intent directly
    pub fn intent(&self) -> IntentHandle {
        self.intent.clone()
    }

    pub fn apply(&mut self, command: Command) -> CommandResponse {
        debug!("command {command:?}");
        let redraw = match command {
            Command::ToggleExplode => {
                let exploded = self.intent.toggle();
                info!("{}", if exploded { "Disassembling" } else { "Assembling" });
                true
            }
            Command::SetExploded(exploded) => self.intent.set(exploded),
            Command::ToggleStats => {
                self.stats_visible = !self.stats_visible;
                true
            }
            Command::ResetCamera => {
                self.camera.reset();
                true
            }
            Command::Orbit { dx, dy } => {
                self.camera.rotate(dx, dy);
                true
            }
            Command::Zoom(delta) => {
                self.camera.zoom(delta);
                true
            }
        };
        CommandResponse { redraw }
    }

    pub fn frame(&mut self, dt: f32) -> FrameOutput {
        // Intent is sampled once so every component sees the same value
        let exploded = self.intent.get();

        self.animator.set_intent(exploded);
        let instances = self
            .animator
            .tick(dt)
            .iter()
            .map(|(_, pose)| PartInstance::from_pose(pose))
            .collect();
        let grid_offset = self.grid.tick(dt, !exploded);
        self.camera.tick(dt, exploded);

        FrameOutput {
            instances,
            grid_offset,
            camera_eye: self.camera.state().eye(),
            view: self.camera.state().view_matrix(),
            exploded,
            settled: self.animator.is_settled(),
        }
    }

    pub fn button_label(&self) -> &'static str {
        self.intent.button_label()
    }

    pub fn stats_visible(&self) -> bool {
        self.stats_visible
    }

    pub fn animator(&self) -> &ExplodeAnimator {
        &self.animator
    }

    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    pub fn snapshot(&self) -> Vec<PoseSnapshot> {
        let frame = self.animator.frame();
        frame
            .iter()
            .map(|(id, pose)| PoseSnapshot {
                id: id.to_string(),
                position: pose.position.into(),
                rotation: [pose.rotation.i, pose.rotation.j, pose.rotation.k, pose.rotation.w],
                scale: pose.scale.into(),
                progress: frame.progress(id).unwrap_or_default(),
            })
            .collect()
    }
}
