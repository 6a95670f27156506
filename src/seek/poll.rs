use std::time::{Duration, Instant};

/// Cancellable periodic task run cooperatively by the event loop.
///
/// The owner starts it together with a player handle and cancels it when the
/// handle goes away. Each firing schedules the next one `interval` later.
#[derive(Debug, Clone)]
pub struct PositionPoll {
    interval: Duration,
    next_due: Option<Instant>,
}

impl PositionPoll {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    /// (Re)start with the first tick due right away.
    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now);
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Returns true when a tick is due at `now`, and schedules the next one.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                self.next_due = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }

    /// Time left until the next tick, if running.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }
}
