//! Tick scheduling.
//!
//! Merges the two triggers of the controller, inbound messages and the
//! periodic animation timer, into one serialized loop step. Like the rest of
//! the crate it needs no async runtime: the caller passes the current time
//! and sleeps for the returned duration (or until the transport signals a new
//! message).

use embassy_time::{Duration, Instant};
use log::{error, warn};

use crate::Publisher;
use crate::controller::Sternenhimmel;
use crate::inbox::InboxReceiver;

/// Result of a scheduler poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollResult {
    /// Deadline of the next periodic tick.
    pub next_deadline: Instant,
    /// How long the caller may sleep before polling again.
    pub sleep_duration: Duration,
    /// Inbound messages handled during this poll.
    pub handled: usize,
    /// Whether the periodic tick ran.
    pub ticked: bool,
    /// Whether missed ticks were skipped after a stall.
    pub resynced: bool,
}

/// Drives a [`Sternenhimmel`] from an inbox and a fixed-period timer.
///
/// # Usage
///
/// ```ignore
/// static INBOX: Inbox<16> = Inbox::new();
///
/// let sky = Sternenhimmel::new(publisher, SkyConfig::default());
/// let mut scheduler = TickScheduler::new(sky, INBOX.receiver());
///
/// loop {
///     let result = scheduler.poll(Instant::from_millis(now_ms()));
///     wait_for_message_or(result.sleep_duration);
/// }
/// ```
pub struct TickScheduler<'a, P: Publisher, const INBOX_SIZE: usize> {
    sky: Sternenhimmel<P>,
    inbox: InboxReceiver<'a, INBOX_SIZE>,
    /// Unset until the first poll, which anchors the schedule
    next_tick: Option<Instant>,
    period: Duration,
}

impl<'a, P: Publisher, const INBOX_SIZE: usize> TickScheduler<'a, P, INBOX_SIZE> {
    /// Create a scheduler using the controller's configured tick period.
    ///
    /// The first poll runs the periodic tick right away.
    pub fn new(sky: Sternenhimmel<P>, inbox: InboxReceiver<'a, INBOX_SIZE>) -> Self {
        let period = sky.config().tick_period;
        Self {
            sky,
            inbox,
            next_tick: None,
            period,
        }
    }

    /// Handle queued messages, then run the periodic tick if it is due.
    pub fn poll(&mut self, now: Instant) -> PollResult {
        let mut handled = 0;
        while let Some(message) = self.inbox.try_receive() {
            self.sky.handle_message(&message.topic, &message.payload);
            handled += 1;
        }

        let mut next_tick = *self.next_tick.get_or_insert(now);
        let ticked = now >= next_tick;
        let mut resynced = false;
        if ticked {
            // Skip the backlog after a stall instead of bursting through it
            if now > next_tick + self.period + self.period {
                warn!("Animation fell behind, skipping missed ticks");
                next_tick = now;
                resynced = true;
            }
            if let Err(err) = self.sky.tick() {
                error!("Animation tick failed: {err}");
            }
            next_tick += self.period;
            self.next_tick = Some(next_tick);
        }

        let sleep_duration = if next_tick > now {
            next_tick - now
        } else {
            Duration::from_millis(0)
        };

        PollResult {
            next_deadline: next_tick,
            sleep_duration,
            handled,
            ticked,
            resynced,
        }
    }

    pub fn sky(&self) -> &Sternenhimmel<P> {
        &self.sky
    }

    pub fn sky_mut(&mut self) -> &mut Sternenhimmel<P> {
        &mut self.sky
    }
}
