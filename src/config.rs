//! Controller configuration
//!
//! Every tunable of the sky lives here. [`SkyConfig::default`] gives one
//! animation step per second, `sternenhimmel/#` for group state and
//! `zigbee2mqtt` as the device bridge.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use embassy_time::Duration;

/// Default peak brightness of a group
pub const DEFAULT_AMPLITUDE: f64 = 0.4;
/// Default oscillation speed of a group, radians per step
pub const DEFAULT_FREQUENCY: f64 = 0.5;
/// Amplitude change of a single brightness tap
pub const AMPLITUDE_STEP: f64 = 0.3;
/// Frequency change of a single frequency tap
pub const FREQUENCY_STEP: f64 = 0.2;
/// Frequency set by a long press up on the frequency switch
pub const PARTY_FREQUENCY: f64 = 2.4;
/// Device brightness at full scale
pub const MAX_BRIGHTNESS: f64 = 255.0;
/// Period of the animation timer
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_secs(1);

/// Topic layout on the message bus
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topics {
    /// Prefix of the controller's own state topics
    pub namespace: String,
    /// Base topic of the device bridge
    pub bridge: String,
    /// Name prefix that marks a device as an animated light
    pub light_prefix: String,
}

impl Default for Topics {
    fn default() -> Self {
        Self {
            namespace: "sternenhimmel".into(),
            bridge: "zigbee2mqtt".into(),
            light_prefix: "light/".into(),
        }
    }
}

impl Topics {
    /// Topic filters the transport has to subscribe to
    pub fn subscriptions(&self) -> Vec<String> {
        alloc::vec![
            format!("{}/switch/#", self.bridge),
            self.devices(),
            format!("{}/#", self.namespace),
        ]
    }

    /// Device list published by the bridge
    pub fn devices(&self) -> String {
        format!("{}/bridge/devices", self.bridge)
    }

    /// Prefix of all switch action topics, including the trailing slash
    pub fn switch_prefix(&self) -> String {
        format!("{}/switch/", self.bridge)
    }

    /// Retained full state of a group
    pub fn group_state(&self, group: char) -> String {
        format!("{}/group/{}", self.namespace, group)
    }

    /// Command topic of a single light
    pub fn light_set(&self, light: &str) -> String {
        format!("{}/{}{}/set", self.bridge, self.light_prefix, light)
    }

    /// Diagnostics for malformed input
    pub fn error(&self) -> String {
        format!("{}/error", self.namespace)
    }
}

/// Step sizes of the switch interpreter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepSizes {
    pub amplitude: f64,
    pub frequency: f64,
}

/// Values used when a group has never been configured
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupDefaults {
    pub amplitude: f64,
    pub frequency: f64,
}

/// Configuration for the sky controller
#[derive(Debug, Clone)]
pub struct SkyConfig {
    pub topics: Topics,
    pub tick_period: Duration,
    pub defaults: GroupDefaults,
    pub steps: StepSizes,
    pub party_frequency: f64,
    pub max_brightness: f64,
    /// Transition of a light that is animating
    pub active_transition: f64,
    /// Transition of a light whose group is off
    pub off_transition: f64,
}

impl Default for SkyConfig {
    fn default() -> Self {
        Self {
            topics: Topics::default(),
            tick_period: DEFAULT_TICK_PERIOD,
            defaults: GroupDefaults {
                amplitude: DEFAULT_AMPLITUDE,
                frequency: DEFAULT_FREQUENCY,
            },
            steps: StepSizes {
                amplitude: AMPLITUDE_STEP,
                frequency: FREQUENCY_STEP,
            },
            party_frequency: PARTY_FREQUENCY,
            max_brightness: MAX_BRIGHTNESS,
            active_transition: 1.0,
            off_transition: 0.0,
        }
    }
}
