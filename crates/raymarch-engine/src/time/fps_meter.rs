use std::collections::VecDeque;
use std::fmt;
use std::time::Instant;

/// Number of frame timestamps kept by [`FpsMeter`].
pub const FPS_WINDOW: usize = 60;

/// Sliding-window frames-per-second meter.
///
/// Keeps up to [`FPS_WINDOW`] recent frame timestamps. The rate is the number
/// of intervals in the window divided by the time they span:
/// `(count - 1) / (newest - oldest)`.
#[derive(Debug, Clone)]
pub struct FpsMeter {
    samples: VecDeque<Instant>,
    capacity: usize,
}

impl FpsMeter {
    pub fn new() -> Self {
        Self::with_capacity(FPS_WINDOW)
    }

    /// A meter averaging over `capacity` timestamps (at least 2).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(2);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Records a frame at `now` and returns the updated reading.
    pub fn tick(&mut self, now: Instant) -> FpsReading {
        self.samples.push_back(now);
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
        self.reading()
    }

    /// Current reading without recording a frame.
    pub fn reading(&self) -> FpsReading {
        let (Some(oldest), Some(newest)) = (self.samples.front(), self.samples.back()) else {
            return FpsReading(None);
        };

        let span = newest.saturating_duration_since(*oldest).as_secs_f64();
        if self.samples.len() < 2 || span <= 0.0 {
            return FpsReading(None);
        }

        FpsReading(Some((self.samples.len() - 1) as f64 / span))
    }

    /// Number of timestamps currently in the window.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Drops all samples; the next reading starts a fresh window.
    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

impl Default for FpsMeter {
    fn default() -> Self {
        Self::new()
    }
}

/// Frames per second, or `None` until two distinct timestamps are known.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FpsReading(pub Option<f64>);

impl fmt::Display for FpsReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(fps) => write!(f, "{fps:.2} fps"),
            None => f.write_str("-- fps"),
        }
    }
}
