#![allow(dead_code)]

use serde_json::Value;
use sternenhimmel::Publisher;

/// Message captured by [`RecordingPublisher`]
#[derive(Debug, Clone, PartialEq)]
pub struct Published {
    pub topic: String,
    pub payload: Value,
    pub retain: bool,
}

/// Publisher that keeps every message in memory
#[derive(Debug, Default)]
pub struct RecordingPublisher {
    pub messages: Vec<Published>,
}

impl RecordingPublisher {
    pub fn topics(&self) -> Vec<&str> {
        self.messages.iter().map(|m| m.topic.as_str()).collect()
    }

    pub fn on_topic(&self, topic: &str) -> Vec<&Published> {
        self.messages.iter().filter(|m| m.topic == topic).collect()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

impl Publisher for RecordingPublisher {
    fn publish(&mut self, topic: &str, payload: &[u8], retain: bool) {
        let payload = serde_json::from_slice(payload).expect("published payload is json");
        self.messages.push(Published {
            topic: topic.to_string(),
            payload,
            retain,
        });
    }
}
