//! Raymarch engine crate.
//!
//! Owns the platform + GPU runtime pieces used by the viewer: window loop,
//! device/surface, input translation, frame timing, shader compilation and the
//! full-screen pass that feeds a raymarching fragment shader.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod paint;
pub mod shader;
