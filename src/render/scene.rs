use super::meshes::{self, MeshData, Vertex};
use super::shadow::ShadowMap;
use crate::constants::*;
use crate::core::constants::{BRIGHT_RED, GOLD, SILVER};
use crate::core::palette::hex_to_linear;
use crate::core::{Camera, DecorLayer, InstanceBuffer, InstanceRaw, ParticleClass};
use glam::{Mat4, Vec3};
use wgpu::util::DeviceExt;

pub(crate) const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

#[repr(C)]
#[derive(Copy, Clone, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct LightRaw {
    position: [f32; 4],  // w: range, 0 = unbounded
    color: [f32; 4],     // rgb premultiplied by intensity
    direction: [f32; 4], // xyz: spot axis, w: 1 = spot, 0 = point
    cone: [f32; 4],      // x: cos outer, y: cos inner
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SceneUniforms {
    view_proj: [[f32; 4]; 4],
    group: [[f32; 4]; 4],
    key_light_view_proj: [[f32; 4]; 4],
    eye: [f32; 4],
    ambient: [f32; 4],
    hemi_sky: [f32; 4],
    hemi_ground: [f32; 4],
    lights: [LightRaw; 3],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct MaterialRaw {
    base_color: [f32; 4],
    emissive: [f32; 4], // rgb, w: intensity
    params: [f32; 4],   // metalness, roughness, emissive-from-instance
    flags: [f32; 4],    // unlit, world space, receives key shadow
}

/// Surface response of one class; the instance color multiplies `base_color`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Material {
    pub base_color: Vec3,
    pub emissive: Vec3,
    pub emissive_intensity: f32,
    pub emissive_from_instance: bool,
    pub metalness: f32,
    pub roughness: f32,
    /// Emissive only, no lighting.
    pub unlit: bool,
    /// Placed in world space instead of the tree group.
    pub world_space: bool,
    /// Casts into and receives from the key light's shadow map.
    pub shadows: bool,
}

impl Material {
    const fn plain(metalness: f32, roughness: f32) -> Self {
        Self {
            base_color: Vec3::ONE,
            emissive: Vec3::ZERO,
            emissive_intensity: 0.0,
            emissive_from_instance: false,
            metalness,
            roughness,
            unlit: false,
            world_space: false,
            shadows: false,
        }
    }

    const fn shadowed(metalness: f32, roughness: f32) -> Self {
        Self {
            shadows: true,
            ..Self::plain(metalness, roughness)
        }
    }

    const fn glow(intensity: f32) -> Self {
        Self {
            emissive: Vec3::ONE,
            emissive_intensity: intensity,
            unlit: true,
            ..Self::plain(0.0, 1.0)
        }
    }

    fn raw(&self) -> MaterialRaw {
        MaterialRaw {
            base_color: self.base_color.extend(1.0).to_array(),
            emissive: self.emissive.extend(self.emissive_intensity).to_array(),
            params: [
                self.metalness,
                self.roughness,
                flag(self.emissive_from_instance),
                0.0,
            ],
            flags: [
                flag(self.unlit),
                flag(self.world_space),
                flag(self.shadows),
                0.0,
            ],
        }
    }
}

#[inline]
fn flag(on: bool) -> f32 {
    if on {
        1.0
    } else {
        0.0
    }
}

/// Everything the scene pass draws, in draw order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum DrawKind {
    Class(ParticleClass),
    Decor(DecorLayer),
}

impl DrawKind {
    pub(crate) const DECOR: [DecorLayer; 2] = [DecorLayer::Sparkles, DecorLayer::StarField];

    pub(crate) fn all() -> impl Iterator<Item = DrawKind> {
        ParticleClass::ALL
            .into_iter()
            .map(DrawKind::Class)
            .chain(Self::DECOR.into_iter().map(DrawKind::Decor))
    }

    fn label(self) -> &'static str {
        match self {
            DrawKind::Class(class) => class.label(),
            DrawKind::Decor(layer) => layer.label(),
        }
    }

    fn count(self) -> usize {
        match self {
            DrawKind::Class(class) => class.count(),
            DrawKind::Decor(layer) => layer.count(),
        }
    }

    fn material(self) -> Material {
        match self {
            DrawKind::Class(class) => material_for(class),
            DrawKind::Decor(DecorLayer::Sparkles) => Material::glow(SPARKLE_GLOW),
            DrawKind::Decor(DecorLayer::StarField) => Material {
                world_space: true,
                ..Material::glow(STAR_FIELD_GLOW)
            },
        }
    }

    fn mesh(self) -> MeshData {
        match self {
            DrawKind::Class(class) => mesh_for(class),
            DrawKind::Decor(DecorLayer::Sparkles) => meshes::octahedron(1.0),
            DrawKind::Decor(DecorLayer::StarField) => meshes::uv_sphere(1.0, 6, 4),
        }
    }
}

pub(crate) fn material_for(class: ParticleClass) -> Material {
    match class {
        ParticleClass::Needles => Material::shadowed(0.1, 0.8),
        ParticleClass::SphereOrnaments => Material::shadowed(0.7, 0.15),
        ParticleClass::BellOrnaments => Material {
            base_color: hex_to_linear(GOLD),
            ..Material::shadowed(0.9, 0.2)
        },
        ParticleClass::DiamondOrnaments => Material {
            emissive: hex_to_linear(SILVER),
            emissive_intensity: 0.2,
            ..Material::shadowed(0.8, 0.1)
        },
        ParticleClass::FairyLights => Material {
            emissive: Vec3::ONE,
            emissive_intensity: 2.0,
            emissive_from_instance: true,
            ..Material::plain(0.0, 1.0)
        },
        ParticleClass::RibbonSegments => Material {
            base_color: hex_to_linear(BRIGHT_RED),
            ..Material::shadowed(0.3, 0.4)
        },
        ParticleClass::Gifts => Material::shadowed(0.1, 0.2),
        ParticleClass::Star => Material {
            base_color: hex_to_linear(GOLD),
            emissive: hex_to_linear(GOLD),
            emissive_intensity: 3.0,
            ..Material::plain(0.5, 0.2)
        },
    }
}

pub(crate) fn mesh_for(class: ParticleClass) -> MeshData {
    match class {
        ParticleClass::Needles => meshes::cone(0.08, 0.45, 5),
        ParticleClass::SphereOrnaments => meshes::uv_sphere(0.18, 20, 20),
        ParticleClass::BellOrnaments => meshes::cone(0.12, 0.25, 12),
        ParticleClass::DiamondOrnaments => meshes::octahedron(0.15),
        ParticleClass::FairyLights => meshes::uv_sphere(0.06, 8, 8),
        ParticleClass::RibbonSegments => meshes::cuboid(Vec3::ONE),
        ParticleClass::Gifts => meshes::cuboid(Vec3::splat(0.5)),
        ParticleClass::Star => meshes::star_prism(5, 1.0, 0.4, 0.3),
    }
}

/// Frustum the key light renders its shadow map from.
pub(crate) fn key_light_camera() -> Camera {
    Camera::spot_light(
        Vec3::from_array(KEY_LIGHT_POSITION),
        Vec3::ZERO,
        KEY_LIGHT_ANGLE,
        KEY_SHADOW_NEAR,
        KEY_SHADOW_FAR,
    )
}

fn spot(position: [f32; 3], hex: u32, intensity: f32, angle: f32, penumbra: f32) -> LightRaw {
    let p = Vec3::from_array(position);
    // spots aim at the world origin
    let axis = (-p).normalize();
    LightRaw {
        position: p.extend(0.0).to_array(),
        color: (hex_to_linear(hex) * intensity).extend(1.0).to_array(),
        direction: axis.extend(1.0).to_array(),
        cone: [angle.cos(), (angle * (1.0 - penumbra)).cos(), 0.0, 0.0],
    }
}

fn point(position: [f32; 3], hex: u32, intensity: f32, range: f32) -> LightRaw {
    LightRaw {
        position: Vec3::from_array(position).extend(range).to_array(),
        color: (hex_to_linear(hex) * intensity).extend(1.0).to_array(),
        direction: [0.0; 4],
        cone: [0.0; 4],
    }
}

pub(crate) fn scene_uniforms(view_proj: Mat4, group: Mat4, eye: Vec3) -> SceneUniforms {
    SceneUniforms {
        view_proj: view_proj.to_cols_array_2d(),
        group: group.to_cols_array_2d(),
        key_light_view_proj: key_light_camera().view_projection().to_cols_array_2d(),
        eye: eye.extend(1.0).to_array(),
        ambient: (hex_to_linear(AMBIENT_COLOR) * AMBIENT_INTENSITY)
            .extend(1.0)
            .to_array(),
        hemi_sky: (hex_to_linear(HEMI_SKY_COLOR) * HEMI_INTENSITY)
            .extend(1.0)
            .to_array(),
        hemi_ground: (hex_to_linear(HEMI_GROUND_COLOR) * HEMI_INTENSITY)
            .extend(1.0)
            .to_array(),
        lights: [
            spot(
                KEY_LIGHT_POSITION,
                KEY_LIGHT_COLOR,
                KEY_LIGHT_INTENSITY,
                KEY_LIGHT_ANGLE,
                KEY_LIGHT_PENUMBRA,
            ),
            spot(
                RIM_LIGHT_POSITION,
                RIM_LIGHT_COLOR,
                RIM_LIGHT_INTENSITY,
                RIM_LIGHT_ANGLE,
                RIM_LIGHT_PENUMBRA,
            ),
            point(
                FILL_LIGHT_POSITION,
                FILL_LIGHT_COLOR,
                FILL_LIGHT_INTENSITY,
                FILL_LIGHT_RANGE,
            ),
        ],
    }
}

/// Group transform: offset below the origin, then the accumulated yaw.
#[inline]
pub(crate) fn group_matrix(yaw: f32) -> Mat4 {
    Mat4::from_translation(Vec3::new(0.0, TREE_GROUP_OFFSET_Y, 0.0)) * Mat4::from_rotation_y(yaw)
}


const VERTEX_ATTRIBUTES: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];
const INSTANCE_ATTRIBUTES: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
    2 => Float32x4, 3 => Float32x4, 4 => Float32x4, 5 => Float32x4,
    6 => Float32x4
];

/// Mesh vertices in slot 0, per-instance matrix and color in slot 1.
pub(crate) fn vertex_layouts() -> [wgpu::VertexBufferLayout<'static>; 2] {
    [
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &VERTEX_ATTRIBUTES,
        },
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<InstanceRaw>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &INSTANCE_ATTRIBUTES,
        },
    ]
}

/// CPU instance storage for every draw, in draw order.
pub(crate) struct SceneBuffers {
    pub(crate) classes: Vec<InstanceBuffer>,
    pub(crate) sparkles: InstanceBuffer,
    pub(crate) stars: InstanceBuffer,
}

impl SceneBuffers {
    pub(crate) fn new() -> Self {
        Self {
            classes: InstanceBuffer::for_all_classes(),
            sparkles: InstanceBuffer::for_layer(DecorLayer::Sparkles),
            stars: InstanceBuffer::for_layer(DecorLayer::StarField),
        }
    }

    fn iter_mut(&mut self) -> impl Iterator<Item = &mut InstanceBuffer> {
        self.classes
            .iter_mut()
            .chain([&mut self.sparkles, &mut self.stars])
    }
}

/// GPU side of one instanced draw.
pub(crate) struct InstancedDraw {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    instance_buffer: wgpu::Buffer,
    instance_count: u32,
    material_bg: wgpu::BindGroup,
    casts_shadow: bool,
}

impl InstancedDraw {
    fn bind_geometry(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        rpass.set_vertex_buffer(1, self.instance_buffer.slice(..));
        rpass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
    }
}

pub(crate) struct SceneResources {
    pipeline: wgpu::RenderPipeline,
    pub(crate) uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    pub(crate) shadow: ShadowMap,
    draws: Vec<InstancedDraw>,
}

impl SceneResources {
    pub(crate) fn new(
        device: &wgpu::Device,
        shader: &wgpu::ShaderModule,
        color_format: wgpu::TextureFormat,
    ) -> Self {
        let uniform_entry = wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };
        let bgl_scene = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl"),
            entries: &[uniform_entry],
        });
        // the vertex stage reads the world-space flag
        let bgl_material = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("material_bgl"),
            entries: &[uniform_entry],
        });
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bg"),
            layout: &bgl_scene,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        let shadow = ShadowMap::new(device, shader, &bgl_scene);

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&bgl_scene, &bgl_material, &shadow.sample_bgl],
            push_constant_ranges: &[],
        });
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("scene_pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_main"),
                buffers: &vertex_layouts(),
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            // ribbon strips are seen from both sides; the shader flips back-face normals
            primitive: wgpu::PrimitiveState {
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: color_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        let draws = DrawKind::all()
            .map(|kind| create_instanced_draw(device, &bgl_material, kind))
            .collect();

        Self {
            pipeline,
            uniform_buffer,
            bind_group,
            shadow,
            draws,
        }
    }

    /// Push every buffer whose CPU copy changed since the last upload.
    pub(crate) fn upload_instances(&self, queue: &wgpu::Queue, buffers: &mut SceneBuffers) {
        for (draw, buffer) in self.draws.iter().zip(buffers.iter_mut()) {
            if buffer.take_dirty() {
                queue.write_buffer(&draw.instance_buffer, 0, buffer.bytes());
            }
        }
    }

    /// Depth of every shadow caster as seen from the key light.
    pub(crate) fn draw_shadows(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_pipeline(&self.shadow.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        for draw in self.draws.iter().filter(|d| d.casts_shadow) {
            draw.bind_geometry(rpass);
            rpass.draw_indexed(0..draw.index_count, 0, 0..draw.instance_count);
        }
    }

    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.set_bind_group(2, &self.shadow.sample_bg, &[]);
        for draw in &self.draws {
            if draw.instance_count == 0 {
                continue;
            }
            rpass.set_bind_group(1, &draw.material_bg, &[]);
            draw.bind_geometry(rpass);
            rpass.draw_indexed(0..draw.index_count, 0, 0..draw.instance_count);
        }
    }
}

fn create_instanced_draw(
    device: &wgpu::Device,
    bgl_material: &wgpu::BindGroupLayout,
    kind: DrawKind,
) -> InstancedDraw {
    let mesh = kind.mesh();
    let material = kind.material();
    let label = kind.label();
    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::cast_slice(&mesh.vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });
    // index buffers must be a multiple of 4 bytes
    let mut indices = mesh.indices.clone();
    if indices.len() % 2 == 1 {
        indices.push(0);
    }
    let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::cast_slice(&indices),
        usage: wgpu::BufferUsages::INDEX,
    });
    let initial = InstanceBuffer::new(kind.count());
    let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: initial.bytes(),
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
    });
    let material_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::bytes_of(&material.raw()),
        usage: wgpu::BufferUsages::UNIFORM,
    });
    let material_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout: bgl_material,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: material_buffer.as_entire_binding(),
        }],
    });
    InstancedDraw {
        vertex_buffer,
        index_buffer,
        index_count: mesh.index_count(),
        instance_buffer,
        instance_count: kind.count() as u32,
        material_bg,
        casts_shadow: material.shadows,
    }
}
