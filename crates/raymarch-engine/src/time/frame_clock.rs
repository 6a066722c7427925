use std::time::Instant;

/// Frame timing snapshot handed to the app on every redraw callback.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Number of redraw callbacks before this one.
    pub frame_index: u64,
}

/// Redraw-callback clock.
///
/// Ticks once per redraw callback whether or not the app draws anything, so
/// `frame_index` counts callbacks, not presented frames.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    frame_index: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    /// Stamps a callback at `now`.
    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let ft = FrameTime {
            now,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }
}
