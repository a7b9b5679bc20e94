use super::helpers;
use super::scene::{vertex_layouts, DEPTH_FORMAT};
use crate::constants::{SHADOW_BIAS_CONSTANT, SHADOW_BIAS_SLOPE, SHADOW_MAP_SIZE};

/// Key light depth map, the depth-only pipeline that fills it and the bind
/// group the scene pass samples it through.
pub(crate) struct ShadowMap {
    _texture: wgpu::Texture,
    pub(crate) view: wgpu::TextureView,
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) sample_bgl: wgpu::BindGroupLayout,
    pub(crate) sample_bg: wgpu::BindGroup,
}

impl ShadowMap {
    pub(crate) fn new(
        device: &wgpu::Device,
        shader: &wgpu::ShaderModule,
        bgl_scene: &wgpu::BindGroupLayout,
    ) -> Self {
        let (texture, view) =
            helpers::sampled_depth_target(device, "shadow_map", SHADOW_MAP_SIZE, DEPTH_FORMAT);
        // hardware 2x2 compare on top of the shader's 3x3 taps
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("shadow_sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            compare: Some(wgpu::CompareFunction::LessEqual),
            ..Default::default()
        });
        let sample_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("shadow_bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Depth,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Comparison),
                    count: None,
                },
            ],
        });
        let sample_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("shadow_bg"),
            layout: &sample_bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("shadow_pl"),
            bind_group_layouts: &[bgl_scene],
            push_constant_ranges: &[],
        });
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("shadow_pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_shadow"),
                buffers: &vertex_layouts(),
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState {
                    constant: SHADOW_BIAS_CONSTANT,
                    slope_scale: SHADOW_BIAS_SLOPE,
                    clamp: 0.0,
                },
            }),
            multisample: wgpu::MultisampleState::default(),
            fragment: None,
            cache: None,
            multiview: None,
        });
        log::info!("[gpu] shadow map {}x{}", SHADOW_MAP_SIZE, SHADOW_MAP_SIZE);

        Self {
            _texture: texture,
            view,
            pipeline,
            sample_bgl,
            sample_bg,
        }
    }
}
