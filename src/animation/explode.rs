// Explode / assemble animation controller

use std::rc::Rc;

use log::{debug, trace};

use super::interpolation::Easing;
use super::types::{AnimationState, Pose};
use crate::error::{Result, ViewerError};
use crate::model::PartRegistry;

/// Progress units per second. 2.5 finishes a full transition in 0.4 s.
pub const DEFAULT_EXPLODE_RATE: f32 = 2.5;

/// Drives every part between its rest and exploded pose.
///
/// Intent is binary, progress is continuous and per part, so flipping the
/// intent mid-flight simply reverses each part from where it currently is.
/// Progress advances linearly with elapsed time; the easing curve only
/// shapes the blend between the two poses.
pub struct ExplodeAnimator {
    registry: Rc<PartRegistry>,
    states: Vec<AnimationState>,
    rate: f32,
    easing: Easing,
    exploded: bool,
}

impl ExplodeAnimator {
    pub fn new(registry: Rc<PartRegistry>, rate: f32, easing: Easing) -> Result<Self> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(ViewerError::config(format!(
                "explode rate must be finite and positive, got {rate}"
            )));
        }

        let states = registry
            .parts()
            .iter()
            .map(|part| AnimationState::at_rest(part.rest))
            .collect();

        Ok(Self {
            registry,
            states,
            rate,
            easing,
            exploded: false,
        })
    }

    pub fn registry(&self) -> &PartRegistry {
        &self.registry
    }

    pub fn exploded(&self) -> bool {
        self.exploded
    }

    pub fn rate(&self) -> f32 {
        self.rate
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// Point every part at the exploded (true) or assembled (false) pose.
    /// Repeating the current intent leaves in-flight motion untouched.
    pub fn set_intent(&mut self, exploded: bool) {
        if self.exploded != exploded {
            debug!(
                "Explode intent -> {} ({} parts)",
                if exploded { "exploded" } else { "assembled" },
                self.states.len()
            );
        }
        self.exploded = exploded;

        let target = if exploded { 1.0 } else { 0.0 };
        for state in &mut self.states {
            state.target_progress = target;
        }
    }

    /// Advance all parts by `dt` seconds and return the resulting poses.
    /// Non-positive or non-finite `dt` leaves everything as it was.
    pub fn tick(&mut self, dt: f32) -> PoseFrame<'_> {
        if dt.is_finite() && dt > 0.0 {
            let was_settled = self.is_settled();
            let step = self.rate * dt;

            for (state, part) in self.states.iter_mut().zip(self.registry.parts()) {
                if state.is_settled() {
                    continue;
                }
                state.advance(step);
                let blend = self.easing.apply(state.progress);
                state.current = Pose::lerp(&part.rest, &part.exploded, blend);
            }

            trace!("explode tick dt={dt:.4}");
            if !was_settled && self.is_settled() {
                debug!(
                    "Explode animation settled ({})",
                    if self.exploded { "exploded" } else { "assembled" }
                );
            }
        }

        self.frame()
    }

    /// Poses from the last tick without advancing time
    pub fn frame(&self) -> PoseFrame<'_> {
        PoseFrame {
            registry: &self.registry,
            states: &self.states,
        }
    }

    pub fn is_settled(&self) -> bool {
        self.states.iter().all(AnimationState::is_settled)
    }

    pub fn progress(&self, id: &str) -> Result<f32> {
        Ok(self.state(id)?.progress)
    }

    pub fn target_progress(&self, id: &str) -> Result<f32> {
        Ok(self.state(id)?.target_progress)
    }

    pub fn pose(&self, id: &str) -> Result<&Pose> {
        Ok(&self.state(id)?.current)
    }

    fn state(&self, id: &str) -> Result<&AnimationState> {
        let idx = self.registry.index_of(id)?;
        Ok(&self.states[idx])
    }
}

/// Borrowed view of the per-part poses produced by a tick
pub struct PoseFrame<'a> {
    registry: &'a PartRegistry,
    states: &'a [AnimationState],
}

impl<'a> PoseFrame<'a> {
    pub fn pose(&self, id: &str) -> Result<&'a Pose> {
        let idx = self.registry.index_of(id)?;
        Ok(&self.states[idx].current)
    }

    pub fn progress(&self, id: &str) -> Result<f32> {
        let idx = self.registry.index_of(id)?;
        Ok(self.states[idx].progress)
    }

    /// `(id, pose)` pairs in registry order
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a Pose)> + 'a {
        let states = self.states;
        self.registry
            .parts()
            .iter()
            .zip(states)
            .map(|(part, state)| (part.id.as_str(), &state.current))
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
