use anyhow::Result;
use winit::event::WindowEvent;

use crate::device::Gpu;

use super::ctx::{FrameCtx, WindowCtx};

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by the viewer.
pub trait App {
    /// Called once, right after the window and its GPU context exist and
    /// before the first frame. GPU resources are created here.
    ///
    /// An error aborts the runtime.
    fn on_gpu_ready(&mut self, window: &WindowCtx<'_>, gpu: &Gpu<'_>) -> Result<()> {
        let _ = (window, gpu);
        Ok(())
    }

    /// Called for every window event, after input state has been updated.
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Whether the next redraw callback will draw.
    ///
    /// While this is false the runtime spaces callbacks by
    /// `RuntimeConfig::idle_interval` instead of running them back to back.
    fn wants_redraw(&self) -> bool {
        true
    }

    /// Called on every redraw callback.
    ///
    /// The runtime keeps scheduling redraws whether or not the app draws, so
    /// an app may return early without rendering.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
