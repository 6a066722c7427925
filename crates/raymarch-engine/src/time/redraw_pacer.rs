use std::time::{Duration, Instant};

/// When the next redraw callback should run.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RedrawSchedule {
    /// Request a redraw right away.
    Now,
    /// Sleep until the deadline, then ask again.
    At(Instant),
}

/// Paces redraw callbacks.
///
/// While the app draws, every callback is followed by the next one and the
/// present call (vsync) sets the rate. While the app is idle nothing blocks on
/// the GPU, so callbacks are spaced `idle_interval` apart instead.
#[derive(Debug, Clone)]
pub struct RedrawPacer {
    idle_interval: Duration,
    next_idle: Option<Instant>,
}

impl RedrawPacer {
    pub fn new(idle_interval: Duration) -> Self {
        Self {
            idle_interval,
            next_idle: None,
        }
    }

    pub fn schedule(&mut self, busy: bool, now: Instant) -> RedrawSchedule {
        if busy {
            self.next_idle = None;
            return RedrawSchedule::Now;
        }

        match self.next_idle {
            Some(at) if now < at => RedrawSchedule::At(at),
            _ => {
                self.next_idle = Some(now + self.idle_interval);
                RedrawSchedule::Now
            }
        }
    }
}
