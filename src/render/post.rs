use super::helpers;
use crate::constants::{
    BLOOM_RADIUS, BLOOM_STRENGTH, BLOOM_THRESHOLD, GRAIN_OPACITY, TONE_EXPOSURE,
    VIGNETTE_DARKNESS, VIGNETTE_OFFSET,
};

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct PostUniforms {
    resolution: [f32; 2],
    time: f32,
    exposure: f32,
    blur_dir: [f32; 2],
    bloom_strength: f32,
    threshold: f32,
    bloom_radius: f32,
    vignette_offset: f32,
    vignette_darkness: f32,
    grain: f32,
}

impl PostUniforms {
    pub(crate) fn new(resolution: [f32; 2], time: f32, blur_dir: [f32; 2]) -> Self {
        Self {
            resolution,
            time,
            exposure: TONE_EXPOSURE,
            blur_dir,
            bloom_strength: BLOOM_STRENGTH,
            threshold: BLOOM_THRESHOLD,
            bloom_radius: BLOOM_RADIUS,
            vignette_offset: VIGNETTE_OFFSET,
            vignette_darkness: VIGNETTE_DARKNESS,
            grain: GRAIN_OPACITY,
        }
    }
}

/// Which uniform block a pass reads. Each pass gets its own buffer because
/// queue writes all land before the encoder's passes execute.
#[derive(Clone, Copy)]
pub(crate) enum PostPass {
    Main,
    BlurH,
    BlurV,
}

pub(crate) struct PostResources {
    pub(crate) bgl0: wgpu::BindGroupLayout, // tex+sampler+uniform
    pub(crate) bgl1: wgpu::BindGroupLayout, // tex+sampler
    uniforms: [wgpu::Buffer; 3],
    pub(crate) bright_pipeline: wgpu::RenderPipeline,
    pub(crate) blur_pipeline: wgpu::RenderPipeline,
    pub(crate) composite_pipeline: wgpu::RenderPipeline,
}

/// Bind groups over the current render targets; rebuilt on resize.
pub(crate) struct PostBindGroups {
    pub(crate) hdr: wgpu::BindGroup,
    pub(crate) from_bloom_a: wgpu::BindGroup,
    pub(crate) from_bloom_b: wgpu::BindGroup,
    pub(crate) bloom_a_only: wgpu::BindGroup,
}

fn texture_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
            multisampled: false,
            view_dimension: wgpu::TextureViewDimension::D2,
            sample_type: wgpu::TextureSampleType::Float { filterable: true },
        },
        count: None,
    }
}

fn sampler_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
        count: None,
    }
}

impl PostResources {
    pub(crate) fn new(
        device: &wgpu::Device,
        post_shader: &wgpu::ShaderModule,
        bloom_format: wgpu::TextureFormat,
        swap_format: wgpu::TextureFormat,
    ) -> Self {
        let bgl0 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("post_bgl0"),
            entries: &[
                texture_entry(0),
                sampler_entry(1),
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });
        let bgl1 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("post_bgl1"),
            entries: &[texture_entry(0), sampler_entry(1)],
        });
        let uniforms = ["post_uniforms_main", "post_uniforms_blur_h", "post_uniforms_blur_v"]
            .map(|label| {
                device.create_buffer(&wgpu::BufferDescriptor {
                    label: Some(label),
                    size: std::mem::size_of::<PostUniforms>() as u64,
                    usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                    mapped_at_creation: false,
                })
            });
        let pl_bright_blur = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl_post_0"),
            bind_group_layouts: &[&bgl0],
            push_constant_ranges: &[],
        });
        let pl_composite = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl_post_comp"),
            bind_group_layouts: &[&bgl0, &bgl1],
            push_constant_ranges: &[],
        });
        let bright_pipeline = helpers::fullscreen_pipeline(
            device,
            &pl_bright_blur,
            post_shader,
            "fs_bright",
            bloom_format,
        );
        let blur_pipeline = helpers::fullscreen_pipeline(
            device,
            &pl_bright_blur,
            post_shader,
            "fs_blur",
            bloom_format,
        );
        let composite_pipeline = helpers::fullscreen_pipeline(
            device,
            &pl_composite,
            post_shader,
            "fs_composite",
            swap_format,
        );

        Self {
            bgl0,
            bgl1,
            uniforms,
            bright_pipeline,
            blur_pipeline,
            composite_pipeline,
        }
    }

    #[inline]
    fn uniform(&self, pass: PostPass) -> &wgpu::Buffer {
        &self.uniforms[pass as usize]
    }

    pub(crate) fn write_uniforms(&self, queue: &wgpu::Queue, pass: PostPass, u: &PostUniforms) {
        queue.write_buffer(self.uniform(pass), 0, bytemuck::bytes_of(u));
    }

    fn source_group(
        &self,
        device: &wgpu::Device,
        label: &str,
        view: &wgpu::TextureView,
        sampler: &wgpu::Sampler,
        pass: PostPass,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &self.bgl0,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: self.uniform(pass).as_entire_binding(),
                },
            ],
        })
    }

    pub(crate) fn bind_groups(
        &self,
        device: &wgpu::Device,
        sampler: &wgpu::Sampler,
        hdr_view: &wgpu::TextureView,
        bloom_a_view: &wgpu::TextureView,
        bloom_b_view: &wgpu::TextureView,
    ) -> PostBindGroups {
        let bloom_a_only = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("bg_bloom_a_only"),
            layout: &self.bgl1,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(bloom_a_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });
        PostBindGroups {
            hdr: self.source_group(device, "bg_hdr", hdr_view, sampler, PostPass::Main),
            from_bloom_a: self.source_group(
                device,
                "bg_from_bloom_a",
                bloom_a_view,
                sampler,
                PostPass::BlurH,
            ),
            from_bloom_b: self.source_group(
                device,
                "bg_from_bloom_b",
                bloom_b_view,
                sampler,
                PostPass::BlurV,
            ),
            bloom_a_only,
        }
    }
}

pub(crate) fn blit(
    encoder: &mut wgpu::CommandEncoder,
    label: &str,
    target: &wgpu::TextureView,
    clear: wgpu::Color,
    pipeline: &wgpu::RenderPipeline,
    bg0: &wgpu::BindGroup,
    bg1: Option<&wgpu::BindGroup>,
) {
    let mut r = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some(label),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: target,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(clear),
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
    });
    r.set_pipeline(pipeline);
    r.set_bind_group(0, bg0, &[]);
    if let Some(g1) = bg1 {
        r.set_bind_group(1, g1, &[]);
    }
    r.draw(0..3, 0..1);
}
