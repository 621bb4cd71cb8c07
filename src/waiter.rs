//! Event Waiter
//!
//! Bounded polling is the only way the engine waits for the game. A predicate
//! is sampled at a fixed interval until it holds or the deadline passes.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Source of time for polling loops.
pub trait Clock {
    /// Time elapsed since the clock's origin
    fn now(&self) -> Duration;
    fn sleep(&self, duration: Duration);
}

/// Wall clock backed by `std::thread::sleep`.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Virtual clock: `sleep` advances time instantly. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, duration: Duration) {
        self.now.set(self.now.get() + duration);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }

    fn sleep(&self, duration: Duration) {
        self.advance(duration);
    }
}

/// Polls predicates at a fixed interval against a [`Clock`].
#[derive(Debug, Clone)]
pub struct EventWaiter<C: Clock> {
    clock: C,
    poll_interval: Duration,
}

impl<C: Clock> EventWaiter<C> {
    pub fn new(clock: C, poll_interval: Duration) -> Self {
        Self {
            clock,
            // A zero interval would spin forever on a virtual clock
            poll_interval: poll_interval.max(Duration::from_millis(1)),
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Sample `predicate` until it returns true or `max_duration` elapses.
    ///
    /// Returns true only if a sample taken strictly before the deadline held.
    /// The predicate is not evaluated again after the first true sample.
    pub fn await_event<F>(&self, mut predicate: F, max_duration: Duration) -> bool
    where
        F: FnMut() -> bool,
    {
        let start = self.clock.now();
        loop {
            if predicate() {
                return true;
            }

            let elapsed = self.clock.now().saturating_sub(start);
            if elapsed >= max_duration {
                return false;
            }
            self.clock
                .sleep(self.poll_interval.min(max_duration - elapsed));

            if self.clock.now().saturating_sub(start) >= max_duration {
                return false;
            }
        }
    }
}
