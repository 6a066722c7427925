//! Shader loading, compilation and linking.
//!
//! Shader text is read verbatim from disk, parsed and validated with naga on
//! the CPU, then linked: the vertex and fragment stages are checked against
//! each other and against the resources the renderer provides. Only a linked
//! program is handed to wgpu, so a broken shader produces a logged diagnostic
//! instead of a device validation error.

mod compile;
mod error;
mod link;
mod program;
mod source;

pub use compile::{compile, CompiledStage};
pub use error::ShaderError;
pub use link::{compile_and_link, link, LinkedProgram, ProgramInterface};
pub use program::ShaderProgram;
pub use source::{ShaderLanguage, ShaderSource, ShaderStage};
