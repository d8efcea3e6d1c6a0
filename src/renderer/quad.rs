//! The layered dish pass: shadow quad then plate quad.
//!
//! One alpha-blended pipeline, two draws. Each quad has its own uniform
//! (model matrix plus opacity) and texture bind group; the shadow draws
//! first so the plate always composites over it.

use wgpu::util::DeviceExt;

use super::pipeline_util::alpha_fragment_targets;
use super::CameraBinding;
use crate::gpu::{GpuTexture, RenderContext};
use crate::scene::{DishGroup, QuadSpec, PLATE_QUAD, SHADOW_QUAD};

/// Per-quad shader uniform. Must match the WGSL `QuadUniform` struct.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct QuadUniform {
    model: [[f32; 4]; 4],
    opacity: f32,
    _pad: [f32; 3],
}

struct QuadDraw {
    spec: QuadSpec,
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// Renders the two textured quads of the dish group.
pub struct QuadRenderer {
    pipeline: wgpu::RenderPipeline,
    draws: [QuadDraw; 2],
}

impl QuadRenderer {
    /// Build the pipeline and the shadow/plate draws.
    #[must_use]
    pub fn new(
        context: &RenderContext,
        camera: &CameraBinding,
        shadow_texture: &GpuTexture,
        plate_texture: &GpuTexture,
    ) -> Self {
        let layout = Self::create_bind_group_layout(context);
        let pipeline = Self::create_pipeline(context, camera, &layout);

        let draws = [
            Self::create_draw(context, &layout, SHADOW_QUAD, shadow_texture),
            Self::create_draw(context, &layout, PLATE_QUAD, plate_texture),
        ];

        Self { pipeline, draws }
    }

    fn create_bind_group_layout(
        context: &RenderContext,
    ) -> wgpu::BindGroupLayout {
        context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Quad Layout"),
                entries: &[
                    // binding 0: quad texture
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
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
                    // binding 1: sampler
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(
                            wgpu::SamplerBindingType::Filtering,
                        ),
                        count: None,
                    },
                    // binding 2: model/opacity uniform
                    wgpu::BindGroupLayoutEntry {
                        binding: 2,
                        visibility: wgpu::ShaderStages::VERTEX
                            | wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    },
                ],
            },
        )
    }

    fn create_pipeline(
        context: &RenderContext,
        camera: &CameraBinding,
        quad_layout: &wgpu::BindGroupLayout,
    ) -> wgpu::RenderPipeline {
        let shader = context.device.create_shader_module(wgpu::include_wgsl!(
            "../../assets/shaders/quad.wgsl"
        ));

        let pipeline_layout = context.device.create_pipeline_layout(
            &wgpu::PipelineLayoutDescriptor {
                label: Some("Quad Pipeline Layout"),
                bind_group_layouts: &[&camera.layout, quad_layout],
                push_constant_ranges: &[],
            },
        );

        context.device.create_render_pipeline(
            &wgpu::RenderPipelineDescriptor {
                label: Some("Quad Pipeline"),
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
                    targets: &alpha_fragment_targets(context.format()),
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState::default(),
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            },
        )
    }

    fn create_draw(
        context: &RenderContext,
        layout: &wgpu::BindGroupLayout,
        spec: QuadSpec,
        texture: &GpuTexture,
    ) -> QuadDraw {
        let uniform = QuadUniform {
            model: glam::Mat4::IDENTITY.to_cols_array_2d(),
            opacity: spec.opacity,
            _pad: [0.0; 3],
        };
        let buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some(if spec.is_shadow {
                    "Shadow Quad Buffer"
                } else {
                    "Plate Quad Buffer"
                }),
                contents: bytemuck::bytes_of(&uniform),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            },
        );

        let bind_group = context.device.create_bind_group(
            &wgpu::BindGroupDescriptor {
                label: Some("Quad Bind Group"),
                layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(
                            &texture.view,
                        ),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(
                            &texture.sampler,
                        ),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: buffer.as_entire_binding(),
                    },
                ],
            },
        );

        QuadDraw {
            spec,
            buffer,
            bind_group,
        }
    }

    /// Upload both quads' model matrices from the dish's current transform.
    pub fn update(&self, context: &RenderContext, dish: &DishGroup) {
        for draw in &self.draws {
            let uniform = QuadUniform {
                model: dish.quad_model(&draw.spec).to_cols_array_2d(),
                opacity: draw.spec.opacity,
                _pad: [0.0; 3],
            };
            context.queue.write_buffer(
                &draw.buffer,
                0,
                bytemuck::bytes_of(&uniform),
            );
        }
    }

    /// Record both quad draws, shadow first.
    pub fn draw<'pass>(
        &'pass self,
        pass: &mut wgpu::RenderPass<'pass>,
        camera: &'pass CameraBinding,
    ) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &camera.bind_group, &[]);
        for draw in &self.draws {
            pass.set_bind_group(1, &draw.bind_group, &[]);
            pass.draw(0..6, 0..1);
        }
    }
}
