//! Bounded queue between the bus transport and the controller.
//!
//! The transport callback pushes raw messages from whatever context it runs
//! in, the scheduler drains them on its own. Access is serialized with
//! `critical-section`, so the queue works from threads and interrupts alike.

use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;
use log::warn;

/// Raw message received from the bus
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inbound {
    pub topic: String,
    pub payload: Vec<u8>,
}

impl Inbound {
    pub fn new(topic: impl Into<String>, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            topic: topic.into(),
            payload: payload.into(),
        }
    }
}

/// Returned when the inbox is full, carrying the rejected message back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboxFull(pub Inbound);

/// Bounded multi-producer queue of inbound messages
pub struct Inbox<const SIZE: usize> {
    queue: Mutex<RefCell<Deque<Inbound, SIZE>>>,
}

impl<const SIZE: usize> Inbox<SIZE> {
    pub const fn new() -> Self {
        Self {
            queue: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Handle for the transport side
    pub const fn sender(&self) -> InboxSender<'_, SIZE> {
        InboxSender { inbox: self }
    }

    /// Handle for the scheduler side
    pub const fn receiver(&self) -> InboxReceiver<'_, SIZE> {
        InboxReceiver { inbox: self }
    }

    /// Queue a message, handing it back if there is no room
    pub fn push(&self, message: Inbound) -> Result<(), InboxFull> {
        critical_section::with(|cs| self.queue.borrow(cs).borrow_mut().push_back(message))
            .map_err(|rejected| {
                warn!("Inbox full, dropping message on {}", rejected.topic);
                InboxFull(rejected)
            })
    }

    /// Oldest queued message, if any
    pub fn pop(&self) -> Option<Inbound> {
        critical_section::with(|cs| self.queue.borrow(cs).borrow_mut().pop_front())
    }

    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.queue.borrow(cs).borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<const SIZE: usize> Default for Inbox<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Producer handle of an [`Inbox`]
#[derive(Clone, Copy)]
pub struct InboxSender<'a, const SIZE: usize> {
    inbox: &'a Inbox<SIZE>,
}

impl<const SIZE: usize> InboxSender<'_, SIZE> {
    /// Queue a message received on `topic`
    pub fn send(&self, topic: &str, payload: &[u8]) -> Result<(), InboxFull> {
        self.inbox.push(Inbound::new(topic, payload))
    }
}

/// Consumer handle of an [`Inbox`]
#[derive(Clone, Copy)]
pub struct InboxReceiver<'a, const SIZE: usize> {
    inbox: &'a Inbox<SIZE>,
}

impl<const SIZE: usize> InboxReceiver<'_, SIZE> {
    pub fn try_receive(&self) -> Option<Inbound> {
        self.inbox.pop()
    }
}
