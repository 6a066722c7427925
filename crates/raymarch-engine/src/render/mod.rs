//! GPU rendering subsystem.
//!
//! One renderer: a full-screen pass that covers the viewport with static
//! geometry and hands every pixel to the loaded fragment shader, together with
//! a small scene uniform (resolution + camera).

mod ctx;
mod fullscreen;
mod geometry;
mod uniforms;

pub use ctx::{RenderCtx, RenderTarget};
pub use fullscreen::FullscreenRenderer;
pub use geometry::{CoverGeometry, CoverVertex};
pub use uniforms::SceneUniform;
