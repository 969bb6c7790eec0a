//! Animation engine
//!
//! Each group breathes along its own sine wave. The lights of a group are
//! spread evenly around the cycle, so they chase each other instead of
//! blinking in lockstep.

use alloc::vec::Vec;
use core::f64::consts::TAU;

use log::debug;

use crate::config::{GroupDefaults, SkyConfig};
use crate::error::Error;
use crate::group::GroupState;
use crate::membership::LightGroups;
use crate::render::RenderCommand;
use crate::store::StateStore;

/// Render commands of one tick, plus the groups that could not be rendered
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub commands: Vec<RenderCommand>,
    pub errors: Vec<Error>,
}

/// Computes light brightness from group parameters and the step counter
#[derive(Debug, Clone, Copy)]
pub struct AnimationEngine {
    defaults: GroupDefaults,
    active_transition: f64,
    off_transition: f64,
}

impl AnimationEngine {
    pub fn new(config: &SkyConfig) -> Self {
        Self {
            defaults: config.defaults,
            active_transition: config.active_transition,
            off_transition: config.off_transition,
        }
    }

    /// Brightness fraction of light `index` out of `count` at `step`
    #[allow(clippy::cast_precision_loss)]
    pub fn light_brightness(
        &self,
        state: &GroupState,
        index: usize,
        count: usize,
        step: u64,
    ) -> f64 {
        if !state.is_on() {
            return 0.0;
        }
        let offset = TAU * index as f64 / count as f64;
        let amplitude = state.amplitude_or(self.defaults.amplitude).clamp(0.0, 1.0);
        let frequency = state.frequency_or(self.defaults.frequency);
        if frequency == 0.0 {
            return amplitude;
        }

        (libm::sin(step as f64 * frequency + offset) + 1.0) / 2.0 * amplitude
    }

    /// Render commands for every known light
    ///
    /// Returns nothing while the store is still empty. Groups without lights
    /// are skipped. A group whose state cannot be read is left out of the
    /// frame and reported in [`Frame::errors`], the other groups still render.
    pub fn frame(&self, store: &StateStore, groups: &LightGroups, step: u64) -> Frame {
        let mut frame = Frame::default();
        if store.is_empty() {
            return frame;
        }

        for (group, lights) in groups.iter() {
            let state = match store.group(group) {
                Ok(state) => state,
                Err(err) => {
                    frame.errors.push(err);
                    continue;
                }
            };
            for (index, light) in lights.iter().enumerate() {
                let brightness = self.light_brightness(&state, index, lights.len(), step);
                debug!("Brightness for {light}={brightness}");
                let (transition, force_on) = if state.is_on() {
                    (self.active_transition, true)
                } else {
                    (self.off_transition, false)
                };
                frame.commands.push(RenderCommand {
                    light: light.clone(),
                    brightness,
                    transition,
                    force_on,
                });
            }
        }

        frame
    }
}
