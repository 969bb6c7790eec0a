use alloc::string::String;

use thiserror::Error;

/// Errors raised while handling bus messages or rendering
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Payload could not be decoded into the shape the topic expects.
    ///
    /// Recovered locally: reported on the error topic and dropped.
    #[error("received invalid json on topic {topic}: {reason}")]
    MalformedPayload { topic: String, reason: String },

    /// Render brightness outside of `[0, 1]`.
    ///
    /// Indicates a clamping defect upstream, never clamped here.
    #[error("brightness must be between 0 and 1, was {0}")]
    InvalidBrightness(f64),

    /// A group entry in the state store does not have the group shape
    #[error("state at {path} is not a valid group object")]
    CorruptedState { path: String },
}

impl Error {
    pub(crate) fn malformed(topic: &str, reason: impl core::fmt::Display) -> Self {
        Self::MalformedPayload {
            topic: topic.into(),
            reason: alloc::format!("{reason}"),
        }
    }
}
