use std::time::Instant;

use wgpu::util::DeviceExt;

use crate::render::{RenderCtx, RenderTarget};
use crate::shader::{self, ProgramInterface, ShaderProgram, ShaderSource};

use super::{CoverGeometry, CoverVertex, SceneUniform};

/// Full-screen shader pass.
///
/// All GPU resources are created once in [`FullscreenRenderer::new`]; nothing
/// is rebuilt per frame. If the shaders fail to compile or link, the failure
/// is logged and the renderer has no pipeline: [`render`](Self::render) then
/// leaves the cleared target untouched.
pub struct FullscreenRenderer {
    geometry: CoverGeometry,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group: wgpu::BindGroup,
    uniform_buffer: wgpu::Buffer,
    vertex_buffer: wgpu::Buffer,
}

impl FullscreenRenderer {
    /// What the pass feeds a program: one `vec2` attribute, one color target
    /// and the scene uniform block.
    pub const INTERFACE: ProgramInterface = ProgramInterface {
        vertex_attributes: &CoverVertex::ATTRS,
        color_targets: 1,
        uniform_binding: SceneUniform::BINDING,
        uniform_size: SceneUniform::SIZE,
    };

    pub fn new(
        ctx: &RenderCtx<'_>,
        vertex: &ShaderSource,
        fragment: &ShaderSource,
        geometry: CoverGeometry,
    ) -> Self {
        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("raymarch scene bgl"),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: SceneUniform::BINDING.1,
                        visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: wgpu::BufferSize::new(SceneUniform::SIZE),
                        },
                        count: None,
                    }],
                });

        let uniform_buffer = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("raymarch scene ubo"),
            size: SceneUniform::SIZE,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("raymarch scene bind group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: SceneUniform::BINDING.1,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let vertex_buffer = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("raymarch cover vbo"),
            contents: bytemuck::cast_slice(geometry.vertices()),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let stopwatch = Instant::now();
        let pipeline = match shader::compile_and_link(vertex, fragment, &Self::INTERFACE) {
            Ok(linked) => {
                log::debug!("linked program {} -> {}", linked.vertex_entry, linked.fragment_entry);
                let program = ShaderProgram::build(ctx.device, linked);
                Some(create_pipeline(ctx, &bind_group_layout, &program))
            }
            Err(errors) => {
                for err in &errors {
                    log::error!("{err}");
                }
                None
            }
        };
        log::info!("time to compile: {} ms", stopwatch.elapsed().as_millis());

        Self {
            geometry,
            pipeline,
            bind_group,
            uniform_buffer,
            vertex_buffer,
        }
    }

    /// True when the shaders compiled and linked.
    pub fn has_program(&self) -> bool {
        self.pipeline.is_some()
    }

    pub fn geometry(&self) -> CoverGeometry {
        self.geometry
    }

    /// Uploads `uniforms` and draws the cover geometry over the whole viewport.
    pub fn render(
        &self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        uniforms: &SceneUniform,
    ) {
        let Some(pipeline) = self.pipeline.as_ref() else { return };
        if !ctx.viewport.is_valid() {
            return;
        }

        ctx.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniforms));

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("raymarch fullscreen pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_viewport(0.0, 0.0, ctx.viewport.width, ctx.viewport.height, 0.0, 1.0);
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        rpass.draw(0..self.geometry.vertex_count(), 0..1);
    }
}

fn create_pipeline(
    ctx: &RenderCtx<'_>,
    bind_group_layout: &wgpu::BindGroupLayout,
    program: &ShaderProgram,
) -> wgpu::RenderPipeline {
    let pipeline_layout = ctx
        .device
        .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("raymarch pipeline layout"),
            bind_group_layouts: &[bind_group_layout],
            immediate_size: 0,
        });

    ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("raymarch pipeline"),
        layout: Some(&pipeline_layout),

        vertex: wgpu::VertexState {
            module: &program.vertex,
            entry_point: Some(&program.vertex_entry),
            compilation_options: Default::default(),
            buffers: &[CoverVertex::layout()],
        },

        fragment: Some(wgpu::FragmentState {
            module: &program.fragment,
            entry_point: Some(&program.fragment_entry),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: ctx.surface_format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),

        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },

        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}
