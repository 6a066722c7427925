use winit::window::{Window, WindowId};

use crate::coords::Viewport;
use crate::device::{Gpu, SurfaceErrorAction};
use crate::input::InputFrame;
use crate::paint::Color;
use crate::render::{RenderCtx, RenderTarget};
use crate::time::FrameTime;

use super::app::AppControl;

/// Window handle passed to app callbacks.
pub struct WindowCtx<'a> {
    pub id: WindowId,
    pub window: &'a Window,
}

impl<'a> WindowCtx<'a> {
    pub fn set_title(&self, title: &str) {
        self.window.set_title(title);
    }
}

/// Result of [`FrameCtx::render`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RenderOutcome {
    /// The frame was drawn and presented.
    Presented,
    /// No frame was presented (surface lost/outdated/timed out, or the window
    /// is minimized). The caller should try again next frame.
    Skipped,
    /// The surface cannot be used anymore.
    Fatal,
}

impl RenderOutcome {
    pub fn control(self) -> AppControl {
        match self {
            RenderOutcome::Fatal => AppControl::Exit,
            RenderOutcome::Presented | RenderOutcome::Skipped => AppControl::Continue,
        }
    }

    pub(crate) fn from_surface_action(action: SurfaceErrorAction) -> Self {
        match action {
            SurfaceErrorAction::Fatal => RenderOutcome::Fatal,
            SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => RenderOutcome::Skipped,
        }
    }

    pub(crate) fn failure(self) -> Option<anyhow::Error> {
        match self {
            RenderOutcome::Fatal => Some(anyhow::anyhow!("surface can no longer be presented to")),
            RenderOutcome::Presented | RenderOutcome::Skipped => None,
        }
    }
}

/// Per-frame context passed to `core::App::on_frame`.
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window-borrow lifetime carried by `Gpu<'w>`
pub struct FrameCtx<'a, 'w> {
    pub window: WindowCtx<'a>,
    pub gpu: &'a mut Gpu<'w>,
    pub input_frame: &'a InputFrame,
    pub time: FrameTime,
    /// Set by [`render`](Self::render) when the surface fails for good; the
    /// runtime turns it into the error returned from `Runtime::run`.
    pub(crate) failure: Option<anyhow::Error>,
}

impl<'a, 'w> FrameCtx<'a, 'w> {
    /// Current drawable area in physical pixels.
    pub fn viewport(&self) -> Viewport {
        Viewport::from_physical(self.gpu.size())
    }

    /// Clears the surface with `clear`, calls `draw` with a ready [`RenderCtx`]
    /// and [`RenderTarget`], then presents the frame.
    pub fn render<F>(&mut self, clear: Color, draw: F) -> RenderOutcome
    where
        F: FnOnce(&RenderCtx<'_>, &mut RenderTarget<'_>),
    {
        let viewport = self.viewport();
        if !viewport.is_valid() {
            return RenderOutcome::Skipped;
        }

        let mut frame = match self.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                let outcome = RenderOutcome::from_surface_action(self.gpu.handle_surface_error(err));
                self.failure = outcome.failure();
                return outcome;
            }
        };

        // Clear pass; dropped before the encoder is borrowed again.
        {
            let _rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("raymarch clear"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear.into()),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
        }

        let rctx = RenderCtx::new(
            self.gpu.device(),
            self.gpu.queue(),
            self.gpu.surface_format(),
            viewport,
        );

        // RenderTarget borrows frame.encoder; dropped before submit() takes frame.
        {
            let mut target = RenderTarget::new(&mut frame.encoder, &frame.view);
            draw(&rctx, &mut target);
        }

        self.window.window.pre_present_notify();
        self.gpu.submit(frame);

        RenderOutcome::Presented
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_fatal_outcome_exits() {
        assert_eq!(RenderOutcome::Presented.control(), AppControl::Continue);
        assert_eq!(RenderOutcome::Skipped.control(), AppControl::Continue);
        assert_eq!(RenderOutcome::Fatal.control(), AppControl::Exit);
    }

    #[test]
    fn fatal_surface_error_carries_a_failure() {
        let outcome = RenderOutcome::from_surface_action(SurfaceErrorAction::Fatal);
        assert_eq!(outcome, RenderOutcome::Fatal);
        let err = outcome.failure().unwrap();
        assert!(err.to_string().contains("surface"), "{err}");
    }

    #[test]
    fn recoverable_surface_errors_skip_without_failure() {
        for action in [SurfaceErrorAction::Reconfigured, SurfaceErrorAction::SkipFrame] {
            let outcome = RenderOutcome::from_surface_action(action);
            assert_eq!(outcome, RenderOutcome::Skipped);
            assert!(outcome.failure().is_none());
        }
        assert!(RenderOutcome::Presented.failure().is_none());
    }
}
