use super::ShaderStage;

/// Failures while turning shader files into a program.
///
/// `Load` and `UnknownLanguage` happen while reading files and abort startup.
/// `Compile` and `Link` carry a rendered diagnostic, the equivalent of a
/// compiler info log, and are reported without aborting.
#[derive(Debug, thiserror::Error)]
pub enum ShaderError {
    #[error("cannot load {name}")]
    Load {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot tell the shader language of {name}; expected .vert, .frag, .glsl or .wgsl")]
    UnknownLanguage { name: String },

    #[error("error compiling {stage} shader `{name}`:\n{log}")]
    Compile {
        stage: ShaderStage,
        name: String,
        log: String,
    },

    #[error("error linking program: {0}")]
    Link(String),
}
