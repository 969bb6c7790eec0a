//! Group membership of lights and switches
//!
//! Groups are single characters. A light belongs to the group named by the
//! first character of its name, a switch controls every group whose name
//! appears somewhere in its own name.

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::string::String;
use alloc::vec::Vec;

use log::warn;
use serde::Deserialize;

/// Entry of the bridge's device list
///
/// Only the name matters here, all other descriptor fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Device {
    #[serde(alias = "name")]
    pub friendly_name: String,
}

impl Device {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            friendly_name: name.into(),
        }
    }
}

/// Lights grouped by the first character of their name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LightGroups {
    groups: BTreeMap<char, Vec<String>>,
}

impl LightGroups {
    /// Build membership from a full device list
    ///
    /// Devices without `light_prefix` are not lights. Inside a group, lights
    /// keep the order of the device list, which fixes their phase offsets.
    pub fn from_devices(devices: &[Device], light_prefix: &str) -> Self {
        let mut groups: BTreeMap<char, Vec<String>> = BTreeMap::new();
        for device in devices {
            let Some(light) = device.friendly_name.strip_prefix(light_prefix) else {
                continue;
            };
            let Some(group) = light.chars().next() else {
                warn!("Skipping light device {} without a name", device.friendly_name);
                continue;
            };
            groups.entry(group).or_default().push(light.into());
        }
        Self { groups }
    }

    /// Lights of a group, in phase order
    pub fn lights(&self, group: char) -> Option<&[String]> {
        self.groups.get(&group).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, &[String])> {
        self.groups
            .iter()
            .map(|(group, lights)| (*group, lights.as_slice()))
    }

    /// Number of groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Groups addressed by a switch
///
/// Every distinct character of the switch name is a group, so a switch named
/// `ab` drives groups `a` and `b` at once.
pub fn switch_groups(switch: &str) -> BTreeSet<char> {
    switch.chars().collect()
}
