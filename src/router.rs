//! Topic routing and payload decoding
//!
//! Converts raw bus messages into typed events for the controller.

use alloc::string::String;
use alloc::vec::Vec;

use serde_json::Value;

use crate::config::Topics;
use crate::error::Error;
use crate::membership::Device;
use crate::switch::{SwitchAction, SwitchChannel};

/// Decoded inbound message
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Full device list from the bridge
    Devices(Vec<Device>),
    /// Action reported by a switch
    Switch {
        switch: String,
        channel: SwitchChannel,
        action: SwitchAction,
    },
    /// Externally supplied value for a store path
    Patch { path: String, value: Value },
}

/// Maps bus topics to [`Event`]s
#[derive(Debug, Clone)]
pub struct Router {
    devices: String,
    switch_prefix: String,
    namespace_prefix: String,
}

impl Router {
    pub fn new(topics: &Topics) -> Self {
        Self {
            devices: topics.devices(),
            switch_prefix: topics.switch_prefix(),
            namespace_prefix: alloc::format!("{}/", topics.namespace),
        }
    }

    /// Decode a message
    ///
    /// Returns `Ok(None)` for topics the controller does not handle.
    pub fn route(&self, topic: &str, payload: &[u8]) -> Result<Option<Event>, Error> {
        if topic == self.devices {
            let devices: Vec<Device> =
                serde_json::from_slice(payload).map_err(|e| Error::malformed(topic, e))?;
            return Ok(Some(Event::Devices(devices)));
        }

        if let Some(rest) = topic.strip_prefix(self.switch_prefix.as_str()) {
            let value = parse(topic, payload)?;
            let Some(fields) = value.as_object() else {
                return Err(Error::malformed(topic, "expected an object"));
            };
            let action = SwitchAction::from_payload(fields.get("action").and_then(Value::as_str));

            let segments: Vec<&str> = rest.split('/').collect();
            let (switch, channel_segments) = segments
                .split_last()
                .map_or(("", &[][..]), |(last, middle)| (*last, middle));

            return Ok(Some(Event::Switch {
                switch: switch.into(),
                channel: SwitchChannel::from_segments(channel_segments),
                action,
            }));
        }

        if let Some(path) = topic.strip_prefix(self.namespace_prefix.as_str()) {
            let value = parse(topic, payload)?;
            return Ok(Some(Event::Patch {
                path: path.into(),
                value,
            }));
        }

        Ok(None)
    }
}

fn parse(topic: &str, payload: &[u8]) -> Result<Value, Error> {
    serde_json::from_slice(payload).map_err(|e| Error::malformed(topic, e))
}
