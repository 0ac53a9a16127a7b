//! Simulated minute clock.
//!
//! [`SimClock`] is the tick source handed to the core; [`TickPoller`] is the
//! event loop's side of the same subscription and turns simulated time into
//! minute ticks while subscribed.

use std::cell::Cell;
use std::hash::{BuildHasher, RandomState};
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use altimeter_common::clock::ClockTime;
use altimeter_common::sampler::TickSource;

pub struct SimClock {
    subscribed: Rc<Cell<bool>>,
}

impl SimClock {
    pub fn pair() -> (Self, TickPoller) {
        let subscribed = Rc::new(Cell::new(false));
        let poller = TickPoller {
            subscribed: Rc::clone(&subscribed),
            last_minute: None,
        };
        (Self { subscribed }, poller)
    }
}

impl TickSource for SimClock {
    fn subscribe(&mut self) { self.subscribed.set(true); }

    fn unsubscribe(&mut self) { self.subscribed.set(false); }
}

pub struct TickPoller {
    subscribed: Rc<Cell<bool>>,
    last_minute: Option<i64>,
}

impl TickPoller {
    #[inline]
    pub fn is_subscribed(&self) -> bool { self.subscribed.get() }

    /// Tick for `epoch_s` if a new minute started since the last tick. The
    /// first poll after subscribing always ticks so the face gets its clock.
    pub fn poll(
        &mut self,
        epoch_s: i64,
    ) -> Option<ClockTime> {
        if !self.is_subscribed() {
            return None;
        }
        let minute = epoch_s.div_euclid(60);
        if self.last_minute == Some(minute) {
            return None;
        }
        self.last_minute = Some(minute);
        Some(ClockTime::from_epoch(epoch_s))
    }
}

/// Wall-clock seconds since the Unix epoch.
pub fn wall_clock_s() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_secs() as i64)
}

/// Random sign for jitter nudges. Every `RandomState` gets fresh hash keys,
/// so the low bit of a hash is a coin flip.
pub fn jitter_sign() -> bool { RandomState::new().hash_one(0u8) & 1 == 1 }
