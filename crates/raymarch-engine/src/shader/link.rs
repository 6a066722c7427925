use std::collections::BTreeMap;

use naga::{AddressSpace, Binding, Handle, Module, Scalar, ScalarKind, Type, TypeInner, VectorSize};

use super::{compile, CompiledStage, ShaderError, ShaderSource, ShaderStage};

/// Resources the renderer provides to a program.
///
/// Linking fails if the shaders need anything outside of this.
#[derive(Debug, Copy, Clone)]
pub struct ProgramInterface {
    /// Vertex attributes fed from the vertex buffer.
    pub vertex_attributes: &'static [wgpu::VertexAttribute],
    /// Number of color targets; each is a float RGBA surface.
    pub color_targets: u32,
    /// `(group, binding)` of the single uniform buffer.
    pub uniform_binding: (u32, u32),
    /// Size of that uniform buffer in bytes.
    pub uniform_size: u64,
}

/// A vertex/fragment pair that is known to fit together.
#[derive(Debug)]
pub struct LinkedProgram {
    pub vertex: CompiledStage,
    pub fragment: CompiledStage,
    pub vertex_entry: String,
    pub fragment_entry: String,
}

/// Compiles both stages and links them.
///
/// Both stages are always compiled, so a pair with two broken shaders yields
/// two diagnostics. Linking is only attempted when both compile.
pub fn compile_and_link(
    vertex: &ShaderSource,
    fragment: &ShaderSource,
    interface: &ProgramInterface,
) -> Result<LinkedProgram, Vec<ShaderError>> {
    match (compile(vertex), compile(fragment)) {
        (Ok(vs), Ok(fs)) => link(vs, fs, interface).map_err(|e| vec![e]),
        (vs, fs) => Err([vs.err(), fs.err()].into_iter().flatten().collect()),
    }
}

/// Checks that two compiled stages form a usable program.
///
/// - each stage declares an entry point of its kind
/// - every vertex input is a provided attribute of the same scalar kind
/// - every fragment input location is written by the vertex stage
/// - the fragment stage writes a float `vec4` to each color target and nothing
///   past them
/// - uniform buffers sit at the provided binding and fit in the provided buffer
pub fn link(
    vertex: CompiledStage,
    fragment: CompiledStage,
    interface: &ProgramInterface,
) -> Result<LinkedProgram, ShaderError> {
    if vertex.stage != ShaderStage::Vertex || fragment.stage != ShaderStage::Fragment {
        return Err(ShaderError::Link(format!(
            "expected a vertex and a fragment shader, got {} and {}",
            vertex.stage, fragment.stage
        )));
    }

    let vs = vertex.entry_point().ok_or_else(|| {
        ShaderError::Link(format!("{} has no vertex entry point", vertex.name))
    })?;
    let fs = fragment.entry_point().ok_or_else(|| {
        ShaderError::Link(format!("{} has no fragment entry point", fragment.name))
    })?;

    check_vertex_inputs(&vertex.module, &vs.function, interface)?;

    let vs_outputs = result_locations(&vertex.module, &vs.function);
    let fs_inputs = argument_locations(&fragment.module, &fs.function);
    if let Some(missing) = fs_inputs.keys().find(|l| !vs_outputs.contains_key(l)) {
        return Err(ShaderError::Link(format!(
            "fragment input at location {missing} is not written by the vertex shader"
        )));
    }

    check_fragment_outputs(&fragment.module, &fs.function, interface)?;

    check_uniforms(&vertex, interface)?;
    check_uniforms(&fragment, interface)?;

    let vertex_entry = vs.name.clone();
    let fragment_entry = fs.name.clone();

    Ok(LinkedProgram {
        vertex,
        fragment,
        vertex_entry,
        fragment_entry,
    })
}

fn check_vertex_inputs(
    module: &Module,
    function: &naga::Function,
    interface: &ProgramInterface,
) -> Result<(), ShaderError> {
    for (location, ty) in argument_locations(module, function) {
        let Some(attr) = interface
            .vertex_attributes
            .iter()
            .find(|a| a.shader_location == location)
        else {
            return Err(ShaderError::Link(format!(
                "vertex input at location {location} is not provided by the vertex buffer"
            )));
        };

        let expected = attribute_kind(attr.format);
        let actual = scalar_of(module, ty).map(|s| s.kind);
        if actual != Some(expected) {
            return Err(ShaderError::Link(format!(
                "vertex input at location {location} is {}, the vertex buffer provides {:?}",
                describe(module, ty),
                attr.format
            )));
        }
    }
    Ok(())
}

fn check_fragment_outputs(
    module: &Module,
    function: &naga::Function,
    interface: &ProgramInterface,
) -> Result<(), ShaderError> {
    let outputs = result_locations(module, function);

    if let Some(extra) = outputs.keys().find(|l| **l >= interface.color_targets) {
        return Err(ShaderError::Link(format!(
            "fragment output at location {extra} has no color target"
        )));
    }

    for location in 0..interface.color_targets {
        let Some(&ty) = outputs.get(&location) else {
            return Err(ShaderError::Link(format!(
                "fragment shader does not write color location {location}"
            )));
        };

        let is_float_vec4 = matches!(
            module.types[ty].inner,
            TypeInner::Vector { size: VectorSize::Quad, scalar } if scalar == Scalar::F32
        );
        if !is_float_vec4 {
            return Err(ShaderError::Link(format!(
                "fragment output at location {location} is {}, expected a float vec4",
                describe(module, ty)
            )));
        }
    }
    Ok(())
}

fn check_uniforms(stage: &CompiledStage, interface: &ProgramInterface) -> Result<(), ShaderError> {
    let module = &stage.module;
    let (group, binding) = interface.uniform_binding;

    for (_, var) in module.global_variables.iter() {
        let Some(rb) = &var.binding else { continue };

        if var.space != AddressSpace::Uniform {
            return Err(ShaderError::Link(format!(
                "{}: only a uniform buffer can be bound, found {:?} at group {} binding {}",
                stage.name, var.space, rb.group, rb.binding
            )));
        }

        if (rb.group, rb.binding) != (group, binding) {
            return Err(ShaderError::Link(format!(
                "{}: uniform buffer at group {} binding {}, expected group {group} binding {binding}",
                stage.name, rb.group, rb.binding
            )));
        }

        let size = module.types[var.ty].inner.size(module.to_ctx()) as u64;
        if size > interface.uniform_size {
            return Err(ShaderError::Link(format!(
                "{}: uniform block is {size} bytes, only {} are provided",
                stage.name, interface.uniform_size
            )));
        }
    }

    Ok(())
}

/// Scalar kind a shader sees when reading an attribute of `format`.
fn attribute_kind(format: wgpu::VertexFormat) -> ScalarKind {
    use wgpu::VertexFormat as F;
    match format {
        F::Uint8 | F::Uint8x2 | F::Uint8x4 | F::Uint16 | F::Uint16x2 | F::Uint16x4
        | F::Uint32 | F::Uint32x2 | F::Uint32x3 | F::Uint32x4 => ScalarKind::Uint,
        F::Sint8 | F::Sint8x2 | F::Sint8x4 | F::Sint16 | F::Sint16x2 | F::Sint16x4
        | F::Sint32 | F::Sint32x2 | F::Sint32x3 | F::Sint32x4 => ScalarKind::Sint,
        _ => ScalarKind::Float,
    }
}

fn scalar_of(module: &Module, ty: Handle<Type>) -> Option<Scalar> {
    match module.types[ty].inner {
        TypeInner::Scalar(scalar) | TypeInner::Vector { scalar, .. } => Some(scalar),
        _ => None,
    }
}

fn describe(module: &Module, ty: Handle<Type>) -> String {
    match module.types[ty].inner {
        TypeInner::Scalar(s) => format!("{:?}{}", s.kind, s.width * 8),
        TypeInner::Vector { size, scalar } => {
            format!("vec{} of {:?}{}", size as u8, scalar.kind, scalar.width * 8)
        }
        ref other => format!("{other:?}"),
    }
}

fn argument_locations(module: &Module, function: &naga::Function) -> BTreeMap<u32, Handle<Type>> {
    let mut out = BTreeMap::new();
    for arg in &function.arguments {
        collect_locations(module, arg.ty, arg.binding.as_ref(), &mut out);
    }
    out
}

fn result_locations(module: &Module, function: &naga::Function) -> BTreeMap<u32, Handle<Type>> {
    let mut out = BTreeMap::new();
    if let Some(result) = &function.result {
        collect_locations(module, result.ty, result.binding.as_ref(), &mut out);
    }
    out
}

/// Builtins are skipped; structs contribute their members' locations.
fn collect_locations(
    module: &Module,
    ty: Handle<Type>,
    binding: Option<&Binding>,
    out: &mut BTreeMap<u32, Handle<Type>>,
) {
    match binding {
        Some(Binding::Location { location, .. }) => {
            out.insert(*location, ty);
        }
        Some(_) => {}
        None => {
            if let TypeInner::Struct { members, .. } = &module.types[ty].inner {
                for member in members {
                    collect_locations(module, member.ty, member.binding.as_ref(), out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::ShaderLanguage;

    const INTERFACE: ProgramInterface = ProgramInterface {
        vertex_attributes: &wgpu::vertex_attr_array![0 => Float32x2],
        color_targets: 1,
        uniform_binding: (0, 0),
        uniform_size: 48,
    };

    fn source(stage: ShaderStage, text: &str) -> ShaderSource {
        let name = match stage {
            ShaderStage::Vertex => "main.vert",
            ShaderStage::Fragment => "main.frag",
        };
        ShaderSource::new(name, stage, ShaderLanguage::Glsl, text)
    }

    fn stage(stage: ShaderStage, text: &str) -> CompiledStage {
        compile(&source(stage, text)).unwrap()
    }

    const VERT_UV: &str = "#version 450
layout(location = 0) in vec2 vertPosition;
layout(location = 0) out vec2 uv;
void main() {
    uv = vertPosition * 0.5 + 0.5;
    gl_Position = vec4(vertPosition, 0.0, 1.0);
}
";

    const FRAG_UV: &str = "#version 450
layout(location = 0) in vec2 uv;
layout(location = 0) out vec4 outColor;
void main() {
    outColor = vec4(uv, 0.0, 1.0);
}
";

    const FRAG_UNIFORM: &str = "#version 450
layout(set = 0, binding = 0) uniform Scene {
    vec2 resolution;
    vec3 cameraPos;
    vec3 cameraLookAt;
};
layout(location = 0) out vec4 outColor;
void main() {
    outColor = vec4(gl_FragCoord.xy / resolution, cameraPos.x + cameraLookAt.x, 1.0);
}
";

    // ── success ───────────────────────────────────────────────────────────

    #[test]
    fn matching_varyings_link() {
        let p = link(stage(ShaderStage::Vertex, VERT_UV), stage(ShaderStage::Fragment, FRAG_UV), &INTERFACE)
            .unwrap();
        assert_eq!(p.vertex_entry, "main");
        assert_eq!(p.fragment_entry, "main");
    }

    #[test]
    fn scene_uniform_block_links() {
        link(
            stage(ShaderStage::Vertex, VERT_UV),
            stage(ShaderStage::Fragment, FRAG_UNIFORM),
            &INTERFACE,
        )
        .unwrap();
    }

    // ── failures ──────────────────────────────────────────────────────────

    #[test]
    fn unwritten_fragment_input_fails() {
        let frag = "#version 450
layout(location = 3) in vec3 normal;
layout(location = 0) out vec4 outColor;
void main() { outColor = vec4(normal, 1.0); }
";
        let err = link(stage(ShaderStage::Vertex, VERT_UV), stage(ShaderStage::Fragment, frag), &INTERFACE)
            .unwrap_err();
        assert!(err.to_string().contains("location 3"), "{err}");
    }

    #[test]
    fn unprovided_vertex_attribute_fails() {
        let vert = "#version 450
layout(location = 0) in vec2 vertPosition;
layout(location = 1) in vec4 color;
void main() { gl_Position = vec4(vertPosition, color.x, 1.0); }
";
        let err = link(stage(ShaderStage::Vertex, vert), stage(ShaderStage::Fragment, FRAG_UNIFORM), &INTERFACE)
            .unwrap_err();
        assert!(matches!(err, ShaderError::Link(_)));
    }

    #[test]
    fn uniform_at_wrong_binding_fails() {
        let frag = "#version 450
layout(set = 1, binding = 2) uniform Scene { vec2 resolution; };
layout(location = 0) out vec4 outColor;
void main() { outColor = vec4(resolution, 0.0, 1.0); }
";
        let err = link(stage(ShaderStage::Vertex, VERT_UV), stage(ShaderStage::Fragment, frag), &INTERFACE)
            .unwrap_err();
        assert!(err.to_string().contains("group 1 binding 2"), "{err}");
    }

    #[test]
    fn oversized_uniform_block_fails() {
        let frag = "#version 450
layout(set = 0, binding = 0) uniform Scene { mat4 view; mat4 proj; };
layout(location = 0) out vec4 outColor;
void main() { outColor = view[0] + proj[0]; }
";
        let err = link(stage(ShaderStage::Vertex, VERT_UV), stage(ShaderStage::Fragment, frag), &INTERFACE)
            .unwrap_err();
        assert!(err.to_string().contains("128 bytes"), "{err}");
    }

    #[test]
    fn swapped_stages_fail() {
        let err = link(stage(ShaderStage::Fragment, FRAG_UV), stage(ShaderStage::Fragment, FRAG_UV), &INTERFACE)
            .unwrap_err();
        assert!(matches!(err, ShaderError::Link(_)));
    }

    // ── types and targets ─────────────────────────────────────────────────

    #[test]
    fn integer_color_output_fails() {
        let frag = "#version 450
layout(location = 0) out ivec4 outColor;
void main() { outColor = ivec4(1, 0, 0, 1); }
";
        let err = link(stage(ShaderStage::Vertex, VERT_UV), stage(ShaderStage::Fragment, frag), &INTERFACE)
            .unwrap_err();
        assert!(err.to_string().contains("expected a float vec4"), "{err}");
    }

    #[test]
    fn output_past_the_color_targets_fails() {
        let frag = "#version 450
layout(location = 1) out vec4 outColor;
void main() { outColor = vec4(1.0); }
";
        let err = link(stage(ShaderStage::Vertex, VERT_UV), stage(ShaderStage::Fragment, frag), &INTERFACE)
            .unwrap_err();
        assert!(err.to_string().contains("location 1 has no color target"), "{err}");
    }

    #[test]
    fn narrow_color_output_fails() {
        let frag = "#version 450
layout(location = 0) out vec3 outColor;
void main() { outColor = vec3(1.0); }
";
        let err = link(stage(ShaderStage::Vertex, VERT_UV), stage(ShaderStage::Fragment, frag), &INTERFACE)
            .unwrap_err();
        assert!(matches!(err, ShaderError::Link(_)));
    }

    #[test]
    fn integer_vertex_input_against_float_buffer_fails() {
        let vert = "#version 450
layout(location = 0) in ivec2 vertPosition;
void main() { gl_Position = vec4(vec2(vertPosition), 0.0, 1.0); }
";
        let err = link(stage(ShaderStage::Vertex, vert), stage(ShaderStage::Fragment, FRAG_UNIFORM), &INTERFACE)
            .unwrap_err();
        assert!(err.to_string().contains("Float32x2"), "{err}");
    }

    #[test]
    fn attribute_kinds_follow_the_format() {
        assert_eq!(attribute_kind(wgpu::VertexFormat::Float32x2), ScalarKind::Float);
        assert_eq!(attribute_kind(wgpu::VertexFormat::Unorm8x4), ScalarKind::Float);
        assert_eq!(attribute_kind(wgpu::VertexFormat::Sint32x2), ScalarKind::Sint);
        assert_eq!(attribute_kind(wgpu::VertexFormat::Uint16x4), ScalarKind::Uint);
    }

    // ── compile_and_link ──────────────────────────────────────────────────

    #[test]
    fn good_pair_compiles_and_links() {
        let p = compile_and_link(
            &source(ShaderStage::Vertex, VERT_UV),
            &source(ShaderStage::Fragment, FRAG_UV),
            &INTERFACE,
        )
        .unwrap();
        assert_eq!(p.fragment.name, "main.frag");
    }

    #[test]
    fn both_broken_stages_are_reported() {
        let errors = compile_and_link(
            &source(ShaderStage::Vertex, "#version 450\nvoid main( {\n"),
            &source(ShaderStage::Fragment, "#version 450\nvoid main() { x = ; }\n"),
            &INTERFACE,
        )
        .unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(matches!(&errors[0], ShaderError::Compile { stage: ShaderStage::Vertex, .. }));
        assert!(matches!(&errors[1], ShaderError::Compile { stage: ShaderStage::Fragment, .. }));
    }

    #[test]
    fn compile_error_wins_over_link_error() {
        let errors = compile_and_link(
            &source(ShaderStage::Vertex, VERT_UV),
            &source(ShaderStage::Fragment, "#version 450\nvoid main( {\n"),
            &INTERFACE,
        )
        .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(&errors[0], ShaderError::Compile { .. }));
    }

    #[test]
    fn link_error_is_reported_alone() {
        let frag = "#version 450
layout(location = 0) out ivec4 outColor;
void main() { outColor = ivec4(0); }
";
        let errors = compile_and_link(
            &source(ShaderStage::Vertex, VERT_UV),
            &source(ShaderStage::Fragment, frag),
            &INTERFACE,
        )
        .unwrap_err();
        assert!(matches!(errors.as_slice(), [ShaderError::Link(_)]));
    }
}
