//! Per-light render commands
//!
//! Brightness is computed as a fraction in `[0, 1]` and converted to device
//! units only when the command is encoded. A fraction outside that range is a
//! clamping defect upstream and is rejected instead of being corrected.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use serde_json::json;

use crate::error::Error;
use crate::group::round2;

/// Brightness a light should reach
#[derive(Debug, Clone, PartialEq)]
pub struct RenderCommand {
    pub light: String,
    /// Fraction of full brightness
    pub brightness: f64,
    /// Transition time in seconds
    pub transition: f64,
    /// Keep the light lit even when the computed brightness rounds to zero
    pub force_on: bool,
}

impl RenderCommand {
    /// Brightness in device units, with two decimals of precision
    pub fn device_brightness(&self, max_brightness: f64) -> Result<f64, Error> {
        if !(0.0..=1.0).contains(&self.brightness) {
            return Err(Error::InvalidBrightness(self.brightness));
        }
        let brightness = round2(self.brightness * max_brightness);
        if self.force_on && brightness < 1.0 {
            return Ok(1.0);
        }
        Ok(brightness)
    }

    /// Payload of the light's `set` topic
    pub fn encode(&self, max_brightness: f64) -> Result<Vec<u8>, Error> {
        let brightness = self.device_brightness(max_brightness)?;
        let payload = json!({
            "state": "ON",
            "brightness": brightness,
            "transition": self.transition,
        });
        Ok(payload.to_string().into_bytes())
    }
}
