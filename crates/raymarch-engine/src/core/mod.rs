//! Core engine-facing contracts.
//!
//! The stable interface between the runtime (platform loop) and the app:
//! a startup hook for GPU resources and a per-frame context.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, RenderOutcome, WindowCtx};
