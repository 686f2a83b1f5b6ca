//! Interval timers polled by the runtime thread.

use std::time::{Duration, Instant};

const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Best-effort periodic timer.
///
/// The timer never runs on its own: the owner polls it with the current time and gets
/// the number of whole periods that elapsed since the last firing. Dropping the timer
/// is the cancellation.
#[derive(Debug, Clone)]
pub struct Interval {
    period: Duration,
    next_due: Instant,
}

impl Interval {
    /// First firing is one period after `start`.
    pub fn new(period: Duration, start: Instant) -> Self {
        let period = period.max(MIN_PERIOD);
        Self {
            period,
            next_due: start + period,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn next_due(&self) -> Instant {
        self.next_due
    }

    /// Number of periods elapsed at `now` since the last poll that fired.
    pub fn poll(&mut self, now: Instant) -> u64 {
        if now < self.next_due {
            return 0;
        }
        let late = now.duration_since(self.next_due).as_nanos();
        let fired = 1 + late / self.period.as_nanos();
        let fired = u64::try_from(fired).unwrap_or(u64::MAX);
        let advance = u32::try_from(fired).unwrap_or(u32::MAX);
        self.next_due += self.period * advance;
        fired
    }
}
