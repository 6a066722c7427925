use naga::valid::{Capabilities, ValidationFlags, Validator};

use super::{ShaderError, ShaderLanguage, ShaderSource, ShaderStage};

/// A parsed and validated shader stage.
#[derive(Debug)]
pub struct CompiledStage {
    pub name: String,
    pub stage: ShaderStage,
    pub module: naga::Module,
}

impl CompiledStage {
    /// The entry point for this stage, if the module declares one.
    ///
    /// WGSL files may hold both stages; the first matching entry point wins.
    pub fn entry_point(&self) -> Option<&naga::EntryPoint> {
        let stage = self.stage.to_naga();
        self.module.entry_points.iter().find(|ep| ep.stage == stage)
    }
}

/// Parses and validates one shader stage.
///
/// Errors are returned as [`ShaderError::Compile`] with a rendered diagnostic
/// that points into `source.text`.
pub fn compile(source: &ShaderSource) -> Result<CompiledStage, ShaderError> {
    let fail = |log: String| ShaderError::Compile {
        stage: source.stage,
        name: source.name.clone(),
        log,
    };

    let module = match source.language {
        ShaderLanguage::Glsl => {
            let mut frontend = naga::front::glsl::Frontend::default();
            let options = naga::front::glsl::Options::from(source.stage.to_naga());
            frontend
                .parse(&options, &source.text)
                .map_err(|e| fail(e.emit_to_string(&source.text)))?
        }
        ShaderLanguage::Wgsl => naga::front::wgsl::parse_str(&source.text)
            .map_err(|e| fail(e.emit_to_string(&source.text)))?,
    };

    Validator::new(ValidationFlags::all(), Capabilities::default())
        .validate(&module)
        .map_err(|e| fail(e.emit_to_string(&source.text)))?;

    log::debug!(
        "compiled {} shader {} ({} entry points)",
        source.stage,
        source.name,
        module.entry_points.len()
    );

    Ok(CompiledStage {
        name: source.name.clone(),
        stage: source.stage,
        module,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const GLSL_VERT: &str = "#version 450
layout(location = 0) in vec2 vertPosition;
void main() {
    gl_Position = vec4(vertPosition, 0.0, 1.0);
}
";

    const WGSL_BOTH: &str = "
@vertex
fn vs_main(@location(0) pos: vec2<f32>) -> @builtin(position) vec4<f32> {
    return vec4<f32>(pos, 0.0, 1.0);
}

@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return vec4<f32>(1.0, 0.0, 1.0, 1.0);
}
";

    fn glsl(stage: ShaderStage, text: &str) -> ShaderSource {
        ShaderSource::new("test.glsl", stage, ShaderLanguage::Glsl, text)
    }

    #[test]
    fn glsl_vertex_compiles() {
        let stage = compile(&glsl(ShaderStage::Vertex, GLSL_VERT)).unwrap();
        let ep = stage.entry_point().unwrap();
        assert_eq!(ep.name, "main");
        assert_eq!(ep.stage, naga::ShaderStage::Vertex);
    }

    #[test]
    fn wgsl_entry_point_is_selected_by_stage() {
        let src = ShaderSource::new("both.wgsl", ShaderStage::Fragment, ShaderLanguage::Wgsl, WGSL_BOTH);
        let stage = compile(&src).unwrap();
        assert_eq!(stage.entry_point().unwrap().name, "fs_main");
    }

    #[test]
    fn syntax_error_is_a_compile_error() {
        let err = compile(&glsl(ShaderStage::Fragment, "#version 450\nvoid main( {\n")).unwrap_err();
        match err {
            ShaderError::Compile { stage, log, .. } => {
                assert_eq!(stage, ShaderStage::Fragment);
                assert!(!log.is_empty());
            }
            other => panic!("expected compile error, got {other:?}"),
        }
    }

    #[test]
    fn type_error_is_a_compile_error() {
        let src = ShaderSource::new(
            "bad.wgsl",
            ShaderStage::Fragment,
            ShaderLanguage::Wgsl,
            "@fragment fn fs_main() -> @location(0) vec4<f32> { return 1.0; }",
        );
        assert!(matches!(compile(&src), Err(ShaderError::Compile { .. })));
    }
}
