//! Recursive state store
//!
//! The controller keeps everything it knows in one tree of string-keyed
//! mappings. Switch deltas and external patches are written through the same
//! [`StateStore::merge`] operation, so both paths share identical semantics.

use alloc::format;
use alloc::string::String;

use log::warn;
use serde_json::{Map, Value};

use crate::error::Error;
use crate::group::GroupState;

/// Top-level key under which group entries live
pub const GROUP_ROOT: &str = "group";

/// Tree of string-keyed mappings with JSON leaves
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateStore {
    root: Map<String, Value>,
}

impl StateStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` until the first successful write
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Root mapping of the tree
    pub fn root(&self) -> &Map<String, Value> {
        &self.root
    }

    /// Assign `value` at a `/`-delimited `path`
    ///
    /// Intermediate mappings are created on demand, the last segment is
    /// overwritten as a whole. Empty segments are skipped, so `"/group//a/"`
    /// addresses the same leaf as `"group/a"`. A path without any segment
    /// leaves the tree untouched.
    pub fn merge(&mut self, path: &str, value: Value) {
        let mut segments = path.split('/').filter(|s| !s.is_empty()).peekable();
        let mut node = &mut self.root;

        while let Some(segment) = segments.next() {
            if segments.peek().is_none() {
                node.insert(segment.into(), value);
                return;
            }

            let entry = node
                .entry(segment)
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                warn!("State at segment {segment} of {path} is a leaf, replacing it with a mapping");
                *entry = Value::Object(Map::new());
            }
            let Value::Object(child) = entry else {
                return;
            };
            node = child;
        }
    }

    /// Value stored at `path`, if any
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('/').filter(|s| !s.is_empty());
        let mut current = self.root.get(segments.next()?)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    /// Current state of a group
    ///
    /// A group that was never written reads as the default (off) state.
    pub fn group(&self, group: char) -> Result<GroupState, Error> {
        let path = group_path(group);
        let Some(value) = self.get(&path) else {
            return Ok(GroupState::default());
        };
        if !value.is_object() {
            return Err(Error::CorruptedState { path });
        }
        GroupState::from_value(value).map_err(|_| Error::CorruptedState { path })
    }

    /// Merge every field set in `delta` into the group
    pub fn merge_group(&mut self, group: char, delta: &GroupState) {
        let path = group_path(group);
        for (field, value) in delta.fields() {
            self.merge(&format!("{path}/{field}"), value);
        }
    }
}

/// Store path of a group entry
pub fn group_path(group: char) -> String {
    format!("{GROUP_ROOT}/{group}")
}
