use std::time::Instant;

use anyhow::{Context, Result};
use winit::event::WindowEvent;

use raymarch_engine::core::{App, AppControl, FrameCtx, RenderOutcome, WindowCtx};
use raymarch_engine::coords::Viewport;
use raymarch_engine::device::Gpu;
use raymarch_engine::input::{InputFrame, Key};
use raymarch_engine::paint::Color;
use raymarch_engine::render::{CoverGeometry, FullscreenRenderer, RenderCtx, SceneUniform};
use raymarch_engine::shader::ShaderSource;
use raymarch_engine::time::{FpsMeter, FpsReading};

use crate::camera::OrbitCamera;
use crate::render_loop::{FrameAction, RenderLoop};

/// What a frame callback should do once input and the loop are accounted for.
#[derive(Debug, Copy, Clone, PartialEq)]
enum FrameStep {
    Exit,
    Idle,
    /// Draw at `tick`; `fps` is set on frames that count towards the meter.
    Draw { tick: f64, fps: Option<FpsReading> },
}

/// The viewer's render context.
///
/// Constructed once at startup with the loaded shader text; the GPU half is
/// filled in by `on_gpu_ready`. Afterwards only `on_frame` (drawing and the
/// spacebar toggle) and `on_window_event` (repaint requests) mutate it.
pub struct Viewer {
    title: String,
    geometry: CoverGeometry,
    pending_shaders: Option<(ShaderSource, ShaderSource)>,
    renderer: Option<FullscreenRenderer>,
    camera: OrbitCamera,
    render_loop: RenderLoop,
    fps: FpsMeter,
}

impl Viewer {
    pub fn new(
        title: impl Into<String>,
        vertex: ShaderSource,
        fragment: ShaderSource,
        geometry: CoverGeometry,
        running: bool,
    ) -> Self {
        Self {
            title: title.into(),
            geometry,
            pending_shaders: Some((vertex, fragment)),
            renderer: None,
            camera: OrbitCamera::default(),
            render_loop: RenderLoop::new(running),
            fps: FpsMeter::new(),
        }
    }

    fn toggle_loop(&mut self) {
        if self.render_loop.toggle() {
            // Forget samples taken before the pause.
            self.fps.clear();
            log::info!("render loop resumed");
        } else {
            log::info!("render loop paused at tick {}", self.render_loop.tick());
        }
    }

    /// Applies this frame's key presses, advances the loop and ticks the FPS
    /// meter on active frames. No GPU work.
    fn step(&mut self, input: &InputFrame, now: Instant) -> FrameStep {
        if input.key_pressed(Key::Escape) {
            return FrameStep::Exit;
        }

        for _ in 0..input.press_count(Key::Space) {
            self.toggle_loop();
        }

        match self.render_loop.next_frame() {
            FrameAction::Idle => FrameStep::Idle,
            FrameAction::Draw { tick, active } => FrameStep::Draw {
                tick,
                fps: active.then(|| self.fps.tick(now)),
            },
        }
    }

    fn draw(&mut self, ctx: &mut FrameCtx<'_, '_>, tick: f64) -> AppControl {
        let Some(renderer) = self.renderer.as_ref() else {
            return AppControl::Continue;
        };

        let uniforms = SceneUniform::new(
            ctx.viewport(),
            self.camera.position(tick).to_array(),
            self.camera.look_at().to_array(),
        );

        let outcome = ctx.render(Color::TRANSPARENT, |rctx, target| {
            renderer.render(rctx, target, &uniforms);
        });

        if outcome == RenderOutcome::Skipped {
            self.render_loop.request_repaint();
        }

        outcome.control()
    }
}

impl App for Viewer {
    fn on_gpu_ready(&mut self, window: &WindowCtx<'_>, gpu: &Gpu<'_>) -> Result<()> {
        let (vertex, fragment) = self
            .pending_shaders
            .take()
            .context("GPU resources already created")?;

        let rctx = RenderCtx::new(
            gpu.device(),
            gpu.queue(),
            gpu.surface_format(),
            Viewport::from_physical(gpu.size()),
        );

        let renderer = FullscreenRenderer::new(&rctx, &vertex, &fragment, self.geometry);
        if !renderer.has_program() {
            log::warn!("shader program unavailable; frames will only be cleared");
        }
        log::info!(
            "ready: {:?} cover, press space to {} the render loop",
            renderer.geometry(),
            if self.render_loop.is_running() { "pause" } else { "start" }
        );

        self.renderer = Some(renderer);
        window.set_title(&self.title);
        Ok(())
    }

    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        if let WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } = event {
            self.render_loop.request_repaint();
        }
        AppControl::Continue
    }

    fn wants_redraw(&self) -> bool {
        self.render_loop.wants_frame()
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        match self.step(ctx.input_frame, ctx.time.now) {
            FrameStep::Exit => AppControl::Exit,
            FrameStep::Idle => AppControl::Continue,
            FrameStep::Draw { tick, fps } => {
                if let Some(reading) = fps {
                    ctx.window.set_title(&format!("{} | {reading}", self.title));
                    log::trace!("frame {} tick {tick} {reading}", ctx.time.frame_index);
                }
                self.draw(ctx, tick)
            }
        }
    }
}
