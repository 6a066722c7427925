/// Tick increment per drawn animation frame.
pub const TICK_STEP: f64 = 0.5;

/// What the viewer should do on a redraw callback.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum FrameAction {
    /// Nothing to draw; wait for the next callback.
    Idle,
    /// Draw the scene at `tick`. `active` frames count towards the FPS meter.
    Draw { tick: f64, active: bool },
}

/// Loop flag + animation clock.
///
/// While running, every callback advances the clock by [`TICK_STEP`] and
/// draws. While paused, callbacks do nothing, except:
/// - the very first callback draws once (and advances the clock), so the
///   window shows the scene before the loop is started
/// - after a resize or a skipped presentation, one frame is repainted at the
///   current tick without advancing the clock
#[derive(Debug, Clone)]
pub struct RenderLoop {
    running: bool,
    tick: f64,
    initial_pending: bool,
    repaint_pending: bool,
}

impl RenderLoop {
    pub fn new(running: bool) -> Self {
        Self {
            running,
            tick: 0.0,
            initial_pending: true,
            repaint_pending: false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn tick(&self) -> f64 {
        self.tick
    }

    /// Flips the loop flag; returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.running = !self.running;
        self.running
    }

    /// True when the next callback will draw.
    pub fn wants_frame(&self) -> bool {
        self.running || self.initial_pending || self.repaint_pending
    }

    /// Ask for one repaint at the current tick.
    pub fn request_repaint(&mut self) {
        self.repaint_pending = true;
    }

    pub fn next_frame(&mut self) -> FrameAction {
        if self.running {
            self.initial_pending = false;
            self.repaint_pending = false;
            self.tick += TICK_STEP;
            return FrameAction::Draw { tick: self.tick, active: true };
        }

        if self.initial_pending {
            self.initial_pending = false;
            self.repaint_pending = false;
            self.tick += TICK_STEP;
            return FrameAction::Draw { tick: self.tick, active: false };
        }

        if self.repaint_pending {
            self.repaint_pending = false;
            return FrameAction::Draw { tick: self.tick, active: false };
        }

        FrameAction::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain_initial(l: &mut RenderLoop) {
        assert!(matches!(l.next_frame(), FrameAction::Draw { .. }));
    }

    // ── clock ─────────────────────────────────────────────────────────────

    #[test]
    fn running_frames_advance_by_half() {
        let mut l = RenderLoop::new(true);
        for i in 1..=10 {
            assert_eq!(
                l.next_frame(),
                FrameAction::Draw { tick: i as f64 * 0.5, active: true }
            );
        }
        assert_eq!(l.tick(), 5.0);
    }

    #[test]
    fn paused_frames_do_not_advance() {
        let mut l = RenderLoop::new(false);
        drain_initial(&mut l);
        let before = l.tick();
        for _ in 0..100 {
            assert_eq!(l.next_frame(), FrameAction::Idle);
        }
        assert_eq!(l.tick(), before);
    }

    #[test]
    fn first_frame_is_drawn_even_when_paused() {
        let mut l = RenderLoop::new(false);
        assert_eq!(l.next_frame(), FrameAction::Draw { tick: 0.5, active: false });
        assert_eq!(l.next_frame(), FrameAction::Idle);
    }

    #[test]
    fn clock_is_monotonic_across_toggles() {
        let mut l = RenderLoop::new(false);
        let mut last = l.tick();
        for i in 0..50 {
            if i % 7 == 0 {
                l.toggle();
            }
            l.next_frame();
            assert!(l.tick() >= last);
            last = l.tick();
        }
    }

    // ── toggle ────────────────────────────────────────────────────────────

    #[test]
    fn toggle_flips_exactly_once() {
        let mut l = RenderLoop::new(false);
        assert!(l.toggle());
        assert!(l.is_running());
        assert!(!l.toggle());
        assert!(!l.is_running());
    }

    #[test]
    fn pausing_stops_the_clock_immediately() {
        let mut l = RenderLoop::new(true);
        l.next_frame();
        l.next_frame();
        l.toggle();
        assert_eq!(l.next_frame(), FrameAction::Idle);
        assert_eq!(l.tick(), 1.0);
    }

    // ── repaint ───────────────────────────────────────────────────────────

    #[test]
    fn repaint_while_paused_keeps_tick() {
        let mut l = RenderLoop::new(false);
        drain_initial(&mut l);
        l.request_repaint();
        assert_eq!(l.next_frame(), FrameAction::Draw { tick: 0.5, active: false });
        assert_eq!(l.next_frame(), FrameAction::Idle);
    }

    #[test]
    fn wants_frame_only_when_something_will_be_drawn() {
        let mut l = RenderLoop::new(false);
        assert!(l.wants_frame());
        drain_initial(&mut l);
        assert!(!l.wants_frame());
        l.request_repaint();
        assert!(l.wants_frame());
        l.next_frame();
        assert!(!l.wants_frame());
        l.toggle();
        assert!(l.wants_frame());
    }

    #[test]
    fn repaint_while_running_is_just_a_normal_frame() {
        let mut l = RenderLoop::new(true);
        l.request_repaint();
        assert_eq!(l.next_frame(), FrameAction::Draw { tick: 0.5, active: true });
        l.toggle();
        assert_eq!(l.next_frame(), FrameAction::Idle);
    }
}
