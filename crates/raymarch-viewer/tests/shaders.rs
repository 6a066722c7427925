use std::fs;
use std::path::{Path, PathBuf};

use raymarch_engine::render::FullscreenRenderer;
use raymarch_engine::shader::{compile_and_link, ShaderSource, ShaderStage};

fn shader_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../shaders").join(name)
}

// Parse + validate straight through naga, independent of the engine.
fn validate_glsl(name: &str, stage: naga::ShaderStage) -> naga::Module {
    let path = shader_path(name);
    let source = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read shader file {path:?}: {e}"));

    let module = naga::front::glsl::Frontend::default()
        .parse(&naga::front::glsl::Options::from(stage), &source)
        .unwrap_or_else(|e| panic!("GLSL parsing error in {path:?}:\n{}", e.emit_to_string(&source)));

    naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::default(),
    )
    .validate(&module)
    .unwrap_or_else(|e| panic!("GLSL validation error in {path:?}:\n{}", e.emit_to_string(&source)));

    module
}

#[test]
fn bundled_vertex_shader_validates() {
    let module = validate_glsl("main.vert", naga::ShaderStage::Vertex);
    assert!(module.entry_points.iter().any(|ep| ep.stage == naga::ShaderStage::Vertex));
}

#[test]
fn bundled_fragment_shader_validates() {
    let module = validate_glsl("main.frag", naga::ShaderStage::Fragment);
    assert!(module.entry_points.iter().any(|ep| ep.stage == naga::ShaderStage::Fragment));
}

#[test]
fn bundled_shaders_link_against_the_fullscreen_pass() {
    let vertex = ShaderSource::load(&shader_path("main.vert"), ShaderStage::Vertex).unwrap();
    let fragment = ShaderSource::load(&shader_path("main.frag"), ShaderStage::Fragment).unwrap();

    let program = compile_and_link(&vertex, &fragment, &FullscreenRenderer::INTERFACE)
        .unwrap_or_else(|errors| panic!("bundled shaders do not link: {errors:?}"));
    assert_eq!(program.vertex_entry, "main");
    assert_eq!(program.fragment_entry, "main");
}
