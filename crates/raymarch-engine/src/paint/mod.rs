//! Colors used by render passes.

pub mod color;

pub use color::Color;
