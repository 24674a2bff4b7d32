use std::time::{Duration, Instant};

/// How often the event loop wakes up to read input and poll the clock
pub const DEFAULT_POLL_MS: u64 = 250;

/// Countdown cadence
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Get the event loop poll interval
pub fn poll_duration() -> Duration {
    Duration::from_millis(DEFAULT_POLL_MS)
}

/// A 1 Hz tick source.
///
/// The host loop calls `due_ticks` and applies one countdown step per tick
/// reported. A stopped clock never reports ticks, so stopping is immediate.
pub trait Clock {
    /// Begin ticking. No-op if already running.
    fn start(&mut self);
    /// Stop ticking and drop anything pending. No-op if already stopped.
    fn stop(&mut self);
    fn is_running(&self) -> bool;
    /// Ticks that became due since the previous call
    fn due_ticks(&mut self) -> u32;
}

/// Wall-clock backed tick source
#[derive(Debug, Clone)]
pub struct IntervalClock {
    period: Duration,
    next_due: Option<Instant>,
}

impl IntervalClock {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_due: None,
        }
    }

    /// Count ticks due at `now`, advancing the schedule past them
    fn due_at(&mut self, now: Instant) -> u32 {
        let Some(next) = self.next_due else {
            return 0;
        };
        if now < next {
            return 0;
        }

        let behind = now.duration_since(next);
        let extra = (behind.as_nanos() / self.period.as_nanos().max(1)) as u32;
        let due = extra + 1;
        self.next_due = Some(next + self.period * due);
        due
    }
}

impl Default for IntervalClock {
    fn default() -> Self {
        Self::new(TICK_PERIOD)
    }
}

impl Clock for IntervalClock {
    fn start(&mut self) {
        if self.next_due.is_none() {
            self.next_due = Some(Instant::now() + self.period);
        }
    }

    fn stop(&mut self) {
        self.next_due = None;
    }

    fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    fn due_ticks(&mut self) -> u32 {
        self.due_at(Instant::now())
    }
}

/// Deterministic tick source driven by `advance`
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    running: bool,
    pending: u32,
}

#[cfg(test)]
impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `ticks` ticks due. Ignored while stopped.
    pub fn advance(&mut self, ticks: u32) {
        if self.running {
            self.pending += ticks;
        }
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn start(&mut self) {
        self.running = true;
    }

    fn stop(&mut self) {
        self.running = false;
        self.pending = 0;
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn due_ticks(&mut self) -> u32 {
        std::mem::take(&mut self.pending)
    }
}
