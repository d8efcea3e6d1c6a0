//! Scene render passes: the layered dish quads and the steam particles.

pub mod pipeline_util;
pub mod quad;
pub mod steam;

pub use quad::QuadRenderer;
pub use steam::SteamRenderer;

use wgpu::util::DeviceExt;

use crate::camera::{Camera, CameraUniform};
use crate::gpu::RenderContext;

/// Shared camera uniform: one buffer and bind group reused by the quad
/// pass.
pub struct CameraBinding {
    /// Layout handed to pipelines that read the camera.
    pub layout: wgpu::BindGroupLayout,
    /// Bind group set at group index 0.
    pub bind_group: wgpu::BindGroup,
    buffer: wgpu::Buffer,
    uniform: CameraUniform,
}

impl CameraBinding {
    /// Create the camera buffer, layout, and bind group.
    #[must_use]
    pub fn new(device: &wgpu::Device) -> Self {
        let uniform = CameraUniform::new();
        let buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Buffer"),
                contents: bytemuck::bytes_of(&uniform),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });

        let layout = device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            },
        );

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });

        Self {
            layout,
            bind_group,
            buffer,
            uniform,
        }
    }

    /// Upload the camera's current view-projection.
    pub fn update(&mut self, context: &RenderContext, camera: &Camera) {
        self.uniform.update_view_proj(camera);
        context.queue.write_buffer(
            &self.buffer,
            0,
            bytemuck::bytes_of(&self.uniform),
        );
    }
}
