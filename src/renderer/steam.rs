//! The steam particle pass.
//!
//! Particles are seeded once into a storage buffer and never touched again;
//! each frame only the time uniform changes and the vertex shader derives
//! every particle's position, wiggle, and sprite size from its seed. Each
//! particle is a camera-facing billboard quad sized in screen pixels, so a
//! distant particle shrinks the way a perspective point sprite would.

use wgpu::util::DeviceExt;

use super::pipeline_util::additive_fragment_targets;
use crate::camera::Camera;
use crate::gpu::{GpuTexture, RenderContext};
use crate::scene::SteamField;

/// Frame uniform for the steam shader. Must match the WGSL `SteamUniform`
/// struct.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct SteamUniform {
    view: [[f32; 4]; 4],
    proj: [[f32; 4]; 4],
    resolution: [f32; 2],
    time: f32,
    _pad0: f32,
    origin: [f32; 3],
    _pad1: f32,
}

/// Renders the additive steam particle field.
pub struct SteamRenderer {
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    uniform_buffer: wgpu::Buffer,
    particle_count: u32,
}

impl SteamRenderer {
    /// Upload the seeded field and build the additive pipeline.
    #[must_use]
    pub fn new(
        context: &RenderContext,
        field: &SteamField,
        texture: &GpuTexture,
    ) -> Self {
        let particle_buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Steam Particle Buffer"),
                contents: bytemuck::cast_slice(&field.particles),
                usage: wgpu::BufferUsages::STORAGE,
            },
        );

        let uniform = SteamUniform {
            view: glam::Mat4::IDENTITY.to_cols_array_2d(),
            proj: glam::Mat4::IDENTITY.to_cols_array_2d(),
            resolution: [
                context.config.width as f32,
                context.config.height as f32,
            ],
            time: 0.0,
            _pad0: 0.0,
            origin: field.origin.to_array(),
            _pad1: 0.0,
        };
        let uniform_buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Steam Uniform Buffer"),
                contents: bytemuck::bytes_of(&uniform),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            },
        );

        let layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Steam Layout"),
                entries: &[
                    // binding 0: particle storage
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Storage {
                                read_only: true,
                            },
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    },
                    // binding 1: frame uniform
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::VERTEX,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    },
                    // binding 2: sprite texture
                    wgpu::BindGroupLayoutEntry {
                        binding: 2,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            sample_type: wgpu::TextureSampleType::Float {
                                filterable: true,
                            },
                            view_dimension: wgpu::TextureViewDimension::D2,
                            multisampled: false,
                        },
                        count: None,
                    },
                    // binding 3: sampler
                    wgpu::BindGroupLayoutEntry {
                        binding: 3,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(
                            wgpu::SamplerBindingType::Filtering,
                        ),
                        count: None,
                    },
                ],
            },
        );

        let bind_group = context.device.create_bind_group(
            &wgpu::BindGroupDescriptor {
                label: Some("Steam Bind Group"),
                layout: &layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: particle_buffer.as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: uniform_buffer.as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: wgpu::BindingResource::TextureView(
                            &texture.view,
                        ),
                    },
                    wgpu::BindGroupEntry {
                        binding: 3,
                        resource: wgpu::BindingResource::Sampler(
                            &texture.sampler,
                        ),
                    },
                ],
            },
        );

        let shader = context.device.create_shader_module(wgpu::include_wgsl!(
            "../../assets/shaders/steam.wgsl"
        ));

        let pipeline_layout = context.device.create_pipeline_layout(
            &wgpu::PipelineLayoutDescriptor {
                label: Some("Steam Pipeline Layout"),
                bind_group_layouts: &[&layout],
                push_constant_ranges: &[],
            },
        );

        let pipeline = context.device.create_render_pipeline(
            &wgpu::RenderPipelineDescriptor {
                label: Some("Steam Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &additive_fragment_targets(context.format()),
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState::default(),
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            },
        );

        Self {
            pipeline,
            bind_group,
            uniform_buffer,
            particle_count: field.particles.len() as u32,
        }
    }

    /// Upload this frame's camera matrices, viewport size, and time.
    pub fn update(
        &self,
        context: &RenderContext,
        camera: &Camera,
        field: &SteamField,
        time: f32,
    ) {
        let uniform = SteamUniform {
            view: camera.view().to_cols_array_2d(),
            proj: camera.projection().to_cols_array_2d(),
            resolution: [
                context.config.width as f32,
                context.config.height as f32,
            ],
            time,
            _pad0: 0.0,
            origin: field.origin.to_array(),
            _pad1: 0.0,
        };
        context.queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&uniform),
        );
    }

    /// Record the instanced particle draw, six vertices per billboard.
    pub fn draw<'pass>(&'pass self, pass: &mut wgpu::RenderPass<'pass>) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.draw(0..6, 0..self.particle_count);
    }
}
