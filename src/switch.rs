//! Switch action interpreter
//!
//! A physical switch reports taps (`on`/`off`) and long presses
//! (`brightness_move_up`/`brightness_move_down`). Depending on the channel the
//! switch is wired to, the same action toggles a group, changes its amplitude
//! or changes its frequency. Each handler reads the current group state and
//! returns the delta to merge, it never touches the store itself.

use crate::config::{GroupDefaults, SkyConfig, StepSizes};
use crate::group::{GroupState, round1};

const ACTION_NAME_ON: &str = "on";
const ACTION_NAME_OFF: &str = "off";
const ACTION_NAME_MOVE_UP: &str = "brightness_move_up";
const ACTION_NAME_MOVE_DOWN: &str = "brightness_move_down";

const CHANNEL_NAME_BRIGHTNESS: &str = "brightness";
const CHANNEL_NAME_FREQUENCY: &str = "frequency";

/// Action reported by a switch
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwitchAction {
    /// Short press on the upper button
    On,
    /// Short press on the lower button
    Off,
    /// Long press on the upper button
    MoveUp,
    /// Long press on the lower button
    MoveDown,
    /// Anything else, including releases and missing actions
    Other,
}

impl SwitchAction {
    pub fn parse_from_str(s: &str) -> Self {
        match s {
            ACTION_NAME_ON => Self::On,
            ACTION_NAME_OFF => Self::Off,
            ACTION_NAME_MOVE_UP => Self::MoveUp,
            ACTION_NAME_MOVE_DOWN => Self::MoveDown,
            _ => Self::Other,
        }
    }

    pub fn from_payload(action: Option<&str>) -> Self {
        action.map_or(Self::Other, Self::parse_from_str)
    }

    pub const fn as_str(self) -> Option<&'static str> {
        match self {
            Self::On => Some(ACTION_NAME_ON),
            Self::Off => Some(ACTION_NAME_OFF),
            Self::MoveUp => Some(ACTION_NAME_MOVE_UP),
            Self::MoveDown => Some(ACTION_NAME_MOVE_DOWN),
            Self::Other => None,
        }
    }
}

/// What a switch is wired to control
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwitchChannel {
    /// Plain on/off
    Action,
    /// Amplitude of the groups
    Brightness,
    /// Oscillation speed of the groups
    Frequency,
}

impl SwitchChannel {
    /// Channel of a switch topic, given the segments between the switch
    /// prefix and the switch id
    pub fn from_segments(segments: &[&str]) -> Self {
        if segments.contains(&CHANNEL_NAME_BRIGHTNESS) {
            Self::Brightness
        } else if segments.contains(&CHANNEL_NAME_FREQUENCY) {
            Self::Frequency
        } else {
            Self::Action
        }
    }
}

/// Turns switch actions into group state deltas
#[derive(Debug, Clone, Copy)]
pub struct SwitchInterpreter {
    defaults: GroupDefaults,
    steps: StepSizes,
    party_frequency: f64,
}

impl SwitchInterpreter {
    pub fn new(config: &SkyConfig) -> Self {
        Self {
            defaults: config.defaults,
            steps: config.steps,
            party_frequency: config.party_frequency,
        }
    }

    /// Delta for `action` on `channel`, or `None` when the action is
    /// suppressed for this group
    pub fn interpret(
        &self,
        channel: SwitchChannel,
        current: &GroupState,
        action: SwitchAction,
    ) -> Option<GroupState> {
        match channel {
            SwitchChannel::Action => Some(Self::toggle(action)),
            SwitchChannel::Brightness => Some(self.brightness(current, action)),
            SwitchChannel::Frequency => self.frequency(current, action),
        }
    }

    /// Power a group on or off
    ///
    /// The long press flags are recorded for every action.
    pub fn toggle(action: SwitchAction) -> GroupState {
        let on = match action {
            SwitchAction::On => Some(true),
            SwitchAction::Off => Some(false),
            _ => None,
        };
        GroupState {
            on,
            increase_brightness: Some(action == SwitchAction::MoveUp),
            decrease_brightness: Some(action == SwitchAction::MoveDown),
            ..GroupState::default()
        }
    }

    /// Adjust the amplitude of a group, always turning it on
    pub fn brightness(&self, current: &GroupState, action: SwitchAction) -> GroupState {
        let mut amplitude = current.amplitude_or(self.defaults.amplitude);
        let mut frequency = None;

        match action {
            SwitchAction::On => amplitude += self.steps.amplitude,
            SwitchAction::Off => amplitude -= self.steps.amplitude,
            SwitchAction::MoveUp => {
                frequency = Some(0.0);
                amplitude = 1.0;
            }
            SwitchAction::MoveDown => {
                frequency = Some(self.defaults.frequency);
                amplitude = amplitude.min(self.defaults.amplitude);
            }
            SwitchAction::Other => {}
        }

        GroupState {
            on: Some(true),
            amplitude: Some(round1(amplitude).clamp(0.0, 1.0)),
            frequency,
            ..GroupState::default()
        }
    }

    /// Adjust the oscillation speed of a group
    ///
    /// Groups that are off keep their settings.
    pub fn frequency(&self, current: &GroupState, action: SwitchAction) -> Option<GroupState> {
        if !current.is_on() {
            return None;
        }

        let mut frequency = current.frequency_or(self.defaults.frequency);
        match action {
            SwitchAction::On => frequency += self.steps.frequency,
            SwitchAction::Off => frequency -= self.steps.frequency,
            SwitchAction::MoveUp => frequency = self.party_frequency,
            SwitchAction::MoveDown => frequency = 0.0,
            SwitchAction::Other => {}
        }

        Some(GroupState {
            frequency: Some(round1(frequency)),
            ..GroupState::default()
        })
    }
}
