use crate::clock::Clock;
use crate::domain::{Mode, ModeId, ModeRegistry, TimerStatus};
use crate::error::CoreError;
use tracing::{debug, info, warn};

/// Something observable that happened to the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// One second elapsed; carries the new remaining time
    Tick(u32),
    ModeChanged(ModeId),
    RunStateChanged(bool),
    /// The countdown reached zero. Emitted once per countdown.
    Completed(ModeId),
}

/// Point-in-time view of the timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerState {
    pub mode: ModeId,
    pub remaining_secs: u32,
    pub status: TimerStatus,
}

/// Format seconds as MM:SS
pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Owns the current mode, remaining time and run status, and drives a clock
pub struct TimerController<C: Clock> {
    registry: ModeRegistry,
    clock: C,
    mode: ModeId,
    remaining_secs: u32,
    status: TimerStatus,
    events: Vec<TimerEvent>,
}

impl<C: Clock> TimerController<C> {
    pub fn new(registry: ModeRegistry, mut clock: C, mode: ModeId) -> Self {
        clock.stop();
        let remaining_secs = registry.duration(mode);

        Self {
            registry,
            clock,
            mode,
            remaining_secs,
            status: TimerStatus::Idle,
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> TimerState {
        TimerState {
            mode: self.mode,
            remaining_secs: self.remaining_secs,
            status: self.status,
        }
    }

    pub fn mode(&self) -> &Mode {
        self.registry.get(self.mode)
    }

    pub fn registry(&self) -> &ModeRegistry {
        &self.registry
    }

    #[cfg(test)]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    #[cfg(test)]
    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// Fraction of the current countdown already elapsed (0.0 to 1.0)
    pub fn progress(&self) -> f64 {
        let total = self.registry.duration(self.mode) as f64;
        1.0 - self.remaining_secs as f64 / total
    }

    /// Take the events emitted since the last call
    pub fn drain_events(&mut self) -> Vec<TimerEvent> {
        std::mem::take(&mut self.events)
    }

    /// Switch to the mode named by `token`. Unknown tokens leave state untouched.
    pub fn select_mode(&mut self, token: &str) -> Result<(), CoreError> {
        let mode = self.registry.resolve(token).map_err(|err| {
            warn!(token, "rejected unknown mode");
            err
        })?;
        self.switch_to(mode);
        Ok(())
    }

    /// Switch mode, pausing first if running. Re-selecting the current mode
    /// re-arms it unless the timer is already idle.
    pub fn switch_to(&mut self, mode: ModeId) {
        if mode == self.mode && self.status == TimerStatus::Idle {
            return;
        }

        if self.status.is_running() {
            self.pause();
        }

        self.mode = mode;
        self.remaining_secs = self.registry.duration(mode);
        self.status = TimerStatus::Idle;
        debug!(mode = %mode, remaining = self.remaining_secs, "mode selected");
        self.events.push(TimerEvent::ModeChanged(mode));
    }

    /// Start when idle or paused, pause when running
    pub fn toggle(&mut self) {
        if self.status.is_running() {
            self.pause();
        } else {
            self.start();
        }
    }

    /// Pause only if currently running
    pub fn pause_if_running(&mut self) -> bool {
        if self.status.is_running() {
            self.pause();
            true
        } else {
            false
        }
    }

    fn start(&mut self) {
        if self.remaining_secs == 0 {
            self.remaining_secs = self.registry.duration(self.mode);
        }
        self.clock.start();
        self.status = TimerStatus::Running;
        debug!(mode = %self.mode, remaining = self.remaining_secs, "timer started");
        self.events.push(TimerEvent::RunStateChanged(true));
    }

    fn pause(&mut self) {
        self.clock.stop();
        self.status = TimerStatus::Paused;
        debug!(mode = %self.mode, remaining = self.remaining_secs, "timer paused");
        self.events.push(TimerEvent::RunStateChanged(false));
    }

    /// Advance the countdown by one second. Ignored unless running.
    pub fn tick(&mut self) {
        if !self.status.is_running() {
            return;
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        self.events.push(TimerEvent::Tick(self.remaining_secs));

        if self.remaining_secs == 0 {
            self.complete();
        }
    }

    fn complete(&mut self) {
        self.clock.stop();
        self.status = TimerStatus::Idle;
        self.events.push(TimerEvent::RunStateChanged(false));
        info!(mode = %self.mode, "countdown completed");
        self.events.push(TimerEvent::Completed(self.mode));

        self.remaining_secs = self.registry.duration(self.mode);
    }

    /// Apply every tick the clock has due. Stops early once the countdown
    /// is no longer running. Returns the number of ticks applied.
    pub fn pump(&mut self) -> u32 {
        let due = self.clock.due_ticks();
        let mut applied = 0;
        for _ in 0..due {
            if !self.status.is_running() {
                break;
            }
            self.tick();
            applied += 1;
        }
        applied
    }
}
