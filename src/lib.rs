#![no_std]

extern crate alloc;

pub mod animation;
pub mod config;
pub mod controller;
pub mod error;
pub mod group;
pub mod inbox;
pub mod membership;
pub mod render;
pub mod router;
pub mod scheduler;
pub mod store;
pub mod switch;

pub use animation::{AnimationEngine, Frame};
pub use config::{SkyConfig, Topics};
pub use controller::Sternenhimmel;
pub use error::Error;
pub use group::GroupState;
pub use inbox::{Inbound, Inbox, InboxFull, InboxReceiver, InboxSender};
pub use membership::{Device, LightGroups, switch_groups};
pub use render::RenderCommand;
pub use router::{Event, Router};
pub use scheduler::{PollResult, TickScheduler};
pub use store::StateStore;
pub use switch::{SwitchAction, SwitchChannel, SwitchInterpreter};

pub use embassy_time::{Duration, Instant};

/// Outbound side of the message bus
///
/// Implement this trait on top of the transport. Publishing is fire-and-forget:
/// the controller neither waits for nor checks delivery.
pub trait Publisher {
    /// Publish `payload` on `topic`, keeping it as the last known value when
    /// `retain` is set
    fn publish(&mut self, topic: &str, payload: &[u8], retain: bool);
}
