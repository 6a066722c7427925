//! Time subsystem.
//!
//! Frame timing utilities decoupled from the runtime:
//! - `FrameClock` ticks once per redraw callback and yields `FrameTime`
//! - `FpsMeter` turns frame timestamps into a frames-per-second reading
//! - `RedrawPacer` spaces redraw callbacks while the app is idle

mod fps_meter;
mod frame_clock;
mod redraw_pacer;

pub use fps_meter::{FpsMeter, FpsReading, FPS_WINDOW};
pub use frame_clock::{FrameClock, FrameTime};
pub use redraw_pacer::{RedrawPacer, RedrawSchedule};
