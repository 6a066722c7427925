use std::borrow::Cow;

use super::LinkedProgram;

/// GPU shader modules for a linked program.
pub struct ShaderProgram {
    pub vertex: wgpu::ShaderModule,
    pub fragment: wgpu::ShaderModule,
    pub vertex_entry: String,
    pub fragment_entry: String,
}

impl ShaderProgram {
    /// Uploads the validated naga modules to the device.
    pub fn build(device: &wgpu::Device, linked: LinkedProgram) -> Self {
        let LinkedProgram {
            vertex,
            fragment,
            vertex_entry,
            fragment_entry,
        } = linked;

        let vertex_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&vertex.name),
            source: wgpu::ShaderSource::Naga(Cow::Owned(vertex.module)),
        });

        let fragment_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&fragment.name),
            source: wgpu::ShaderSource::Naga(Cow::Owned(fragment.module)),
        });

        Self {
            vertex: vertex_module,
            fragment: fragment_module,
            vertex_entry,
            fragment_entry,
        }
    }
}
