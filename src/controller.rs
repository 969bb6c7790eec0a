//! Sky controller
//!
//! Owns the state store, the light membership and the step counter. Every
//! mutation and every render goes through this type, which keeps updates
//! serialized without any shared global state.

use alloc::string::ToString;

use log::{debug, error, info, warn};
use serde_json::{Value, json};

use crate::Publisher;
use crate::animation::{AnimationEngine, Frame};
use crate::config::SkyConfig;
use crate::error::Error;
use crate::membership::{Device, LightGroups, switch_groups};
use crate::router::{Event, Router};
use crate::store::{StateStore, group_path};
use crate::switch::{SwitchAction, SwitchChannel, SwitchInterpreter};

/// The starry sky: group state, membership and animation in one place
pub struct Sternenhimmel<P: Publisher> {
    // External dependencies and configuration
    publisher: P,
    config: SkyConfig,
    router: Router,

    // Internal state
    store: StateStore,
    groups: LightGroups,
    step: u64,

    // Internal dependencies
    interpreter: SwitchInterpreter,
    engine: AnimationEngine,
}

impl<P: Publisher> Sternenhimmel<P> {
    pub fn new(publisher: P, config: SkyConfig) -> Self {
        Self {
            publisher,
            router: Router::new(&config.topics),
            store: StateStore::new(),
            groups: LightGroups::default(),
            step: 0,
            interpreter: SwitchInterpreter::new(&config),
            engine: AnimationEngine::new(&config),
            config,
        }
    }

    /// Handle a raw bus message
    ///
    /// Malformed payloads are reported on the error topic and dropped. Other
    /// failures are logged, the controller keeps running either way.
    pub fn handle_message(&mut self, topic: &str, payload: &[u8]) {
        let result = self
            .router
            .route(topic, payload)
            .and_then(|event| match event {
                Some(event) => self.handle_event(event),
                None => {
                    debug!("Ignoring message on {topic}");
                    Ok(())
                }
            });

        match result {
            Ok(()) => {}
            Err(err @ Error::MalformedPayload { .. }) => {
                warn!("{err}");
                self.report_malformed(topic);
            }
            Err(err) => error!("Failed to handle message on {topic}: {err}"),
        }
    }

    /// Apply a decoded event
    pub fn handle_event(&mut self, event: Event) -> Result<(), Error> {
        match event {
            Event::Devices(devices) => {
                self.apply_devices(&devices);
                Ok(())
            }
            Event::Switch {
                switch,
                channel,
                action,
            } => self.apply_switch(&switch, channel, action),
            Event::Patch { path, value } => self.apply_patch(&path, value),
        }
    }

    /// Replace light membership with the one derived from `devices`
    pub fn apply_devices(&mut self, devices: &[Device]) {
        self.groups = LightGroups::from_devices(devices, &self.config.topics.light_prefix);
        info!("Light membership rebuilt, {} groups", self.groups.len());
    }

    /// Apply a switch action to every group the switch controls
    ///
    /// Each group is updated, published and rendered on its own. A group that
    /// fails does not stop the others; the first failure is returned once
    /// every group was handled.
    pub fn apply_switch(
        &mut self,
        switch: &str,
        channel: SwitchChannel,
        action: SwitchAction,
    ) -> Result<(), Error> {
        let mut failure = None;
        for group in switch_groups(switch) {
            let current = match self.store.group(group) {
                Ok(current) => current,
                Err(err) => {
                    error!("Switch {switch} skipped group {group}: {err}");
                    failure.get_or_insert(err);
                    continue;
                }
            };
            let Some(delta) = self.interpreter.interpret(channel, &current, action) else {
                debug!("Switch {switch} ignored for group {group}, group is off");
                continue;
            };

            self.store.merge_group(group, &delta);
            self.publish_group(group);
            if let Err(err) = self.update() {
                failure.get_or_insert(err);
            }
        }
        failure.map_or(Ok(()), Err)
    }

    /// Merge an externally supplied value and re-render
    pub fn apply_patch(&mut self, path: &str, value: Value) -> Result<(), Error> {
        self.store.merge(path, value);
        info!("Applied state patch at {path}");
        debug!("State: {:?}", self.store.root());
        self.update()
    }

    /// Render every light at the current step
    ///
    /// Lights that cannot be rendered are logged and skipped, all others are
    /// still published. Returns the first failure, if any.
    pub fn update(&mut self) -> Result<(), Error> {
        let Frame {
            commands,
            mut errors,
        } = self.engine.frame(&self.store, &self.groups, self.step);
        for err in &errors {
            error!("Group not rendered: {err}");
        }

        for command in commands {
            match command.encode(self.config.max_brightness) {
                Ok(payload) => {
                    let topic = self.config.topics.light_set(&command.light);
                    self.publisher.publish(&topic, &payload, false);
                }
                Err(err) => {
                    error!("Light {} not rendered: {err}", command.light);
                    errors.push(err);
                }
            }
        }

        errors.into_iter().next().map_or(Ok(()), Err)
    }

    /// Periodic timer step: render, then advance the animation
    pub fn tick(&mut self) -> Result<(), Error> {
        let result = self.update();
        self.step += 1;
        result
    }

    pub fn store(&self) -> &StateStore {
        &self.store
    }

    pub fn groups(&self) -> &LightGroups {
        &self.groups
    }

    pub fn step(&self) -> u64 {
        self.step
    }

    pub fn config(&self) -> &SkyConfig {
        &self.config
    }

    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    pub fn publisher_mut(&mut self) -> &mut P {
        &mut self.publisher
    }

    /// Publish the full, retained state of a group
    fn publish_group(&mut self, group: char) {
        let Some(state) = self.store.get(&group_path(group)) else {
            return;
        };
        let payload = state.to_string();
        let topic = self.config.topics.group_state(group);
        self.publisher.publish(&topic, payload.as_bytes(), true);
    }

    fn report_malformed(&mut self, topic: &str) {
        let payload = json!({
            "error": alloc::format!("received invalid json on topic {topic}"),
        });
        let error_topic = self.config.topics.error();
        self.publisher
            .publish(&error_topic, payload.to_string().as_bytes(), false);
    }
}
