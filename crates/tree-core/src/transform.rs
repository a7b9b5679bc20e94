//! Per-frame transform pass: blend, swirl, float, then the class policy.
//!
//! The engine never allocates while updating. Every intermediate is a stack
//! `Vec3`/`Quat`/`Mat4`; the only heap storage is the instance buffers the
//! caller hands in.

use crate::constants::*;
use crate::decor::DecorLayer;
use crate::error::{CoreError, Result};
use crate::layout::{Particle, ParticleClass, TreeLayout, UpdatePolicy};
use bytemuck::{Pod, Zeroable};
use glam::{EulerRot, Mat4, Quat, Vec3};
use std::f32::consts::{FRAC_PI_2, PI};

/// Destination for one class's per-instance data.
///
/// Writes land in CPU memory; `mark_*_dirty` requests an upload before the
/// next draw.
pub trait InstanceSink {
    fn capacity(&self) -> usize;
    fn set_matrix_at(&mut self, index: usize, matrix: &Mat4);
    fn set_color_at(&mut self, index: usize, color: Vec3);
    fn mark_matrices_dirty(&mut self);
    fn mark_colors_dirty(&mut self);
}

/// GPU layout of one instance: column-major model matrix and linear color.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct InstanceRaw {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

impl Default for InstanceRaw {
    fn default() -> Self {
        Self {
            model: Mat4::IDENTITY.to_cols_array_2d(),
            color: [1.0; 4],
        }
    }
}

/// CPU-side instance storage for one class, sized once.
#[derive(Clone, Debug)]
pub struct InstanceBuffer {
    instances: Vec<InstanceRaw>,
    matrices_dirty: bool,
    colors_dirty: bool,
}

impl InstanceBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            instances: vec![InstanceRaw::default(); capacity],
            matrices_dirty: false,
            colors_dirty: false,
        }
    }

    pub fn for_class(class: ParticleClass) -> Self {
        Self::new(class.count())
    }

    pub fn for_layer(layer: DecorLayer) -> Self {
        Self::new(layer.count())
    }

    /// One buffer per class, in `ParticleClass::ALL` order.
    pub fn for_all_classes() -> Vec<Self> {
        ParticleClass::ALL.into_iter().map(Self::for_class).collect()
    }

    pub fn bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }

    pub fn is_dirty(&self) -> bool {
        self.matrices_dirty || self.colors_dirty
    }

    /// Clear both flags, returning whether an upload is due.
    pub fn take_dirty(&mut self) -> bool {
        let dirty = self.is_dirty();
        self.matrices_dirty = false;
        self.colors_dirty = false;
        dirty
    }
}

impl InstanceSink for InstanceBuffer {
    fn capacity(&self) -> usize {
        self.instances.len()
    }

    fn set_matrix_at(&mut self, index: usize, matrix: &Mat4) {
        if let Some(slot) = self.instances.get_mut(index) {
            slot.model = matrix.to_cols_array_2d();
        }
    }

    fn set_color_at(&mut self, index: usize, color: Vec3) {
        if let Some(slot) = self.instances.get_mut(index) {
            slot.color = color.extend(1.0).to_array();
        }
    }

    fn mark_matrices_dirty(&mut self) {
        self.matrices_dirty = true;
    }

    fn mark_colors_dirty(&mut self) {
        self.colors_dirty = true;
    }
}

// ---------------- Step functions ----------------

/// Linear blend between the two rest positions; exact at `t = 0` and `t = 1`.
#[inline]
pub fn blend_position(scatter: Vec3, tree: Vec3, t: f32) -> Vec3 {
    scatter * (1.0 - t) + tree * t
}

/// Azimuthal twist about +Y during the transition, strongest near scattered.
/// Outside the open window the position passes through unchanged.
pub fn swirl(position: Vec3, t: f32) -> Vec3 {
    if t <= SWIRL_WINDOW_MIN || t >= SWIRL_WINDOW_MAX {
        return position;
    }
    let angle = position.z.atan2(position.x) + (1.0 - t) * SWIRL_HALF_TURNS * PI;
    let radius = (position.x * position.x + position.z * position.z).sqrt();
    Vec3::new(radius * angle.cos(), position.y, radius * angle.sin())
}

/// Idle drift, large while scattered and a faint breath when assembled.
pub fn float_offset(id: u32, speed: f32, t: f32, time: f32) -> Vec3 {
    let amp = (1.0 - t) * FLOAT_AMPLITUDE + FLOAT_FLOOR;
    let phase = id as f32;
    Vec3::new(
        (time * speed + phase).sin() * amp,
        (time * speed * 0.9 + phase).cos() * amp * 0.5,
        (time * speed * 0.5 + phase).sin() * amp,
    )
}

/// Brightness pulse in [0, 1]; each light gets one of five rates.
#[inline]
pub fn flicker(id: u32, time: f32) -> f32 {
    0.5 + 0.5 * (time * (10.0 + (id % 5) as f32) + id as f32).sin()
}

/// Rotation and non-uniform scale for one particle under its class policy.
pub fn pose(policy: UpdatePolicy, p: &Particle, t: f32, time: f32) -> (Quat, Vec3) {
    let id = p.id as f32;
    match policy {
        UpdatePolicy::Light => (
            Quat::IDENTITY,
            Vec3::splat(p.scale * t * (0.8 + 0.4 * flicker(p.id, time))),
        ),
        UpdatePolicy::Ribbon => {
            let rotation = if t > RIBBON_SNAP_THRESHOLD {
                // lay the strip flat against the spiral
                p.rest_rotation * Quat::from_rotation_x(FRAC_PI_2)
            } else {
                Quat::from_euler(EulerRot::XYZ, time + id, time * 0.5, id)
            };
            (rotation, Vec3::from_array(RIBBON_THICKNESS) * t)
        }
        UpdatePolicy::Star => (
            Quat::from_euler(EulerRot::XYZ, 0.0, time * STAR_SPIN_RATE, 0.0),
            Vec3::splat(p.scale * t),
        ),
        UpdatePolicy::Gift => (p.rest_rotation, Vec3::splat(p.scale * t)),
        UpdatePolicy::Needle => (
            p.rest_rotation,
            Vec3::splat(p.scale * (NEEDLE_MIN_SCALE + (1.0 - NEEDLE_MIN_SCALE) * t)),
        ),
        UpdatePolicy::Ornament => (
            p.rest_rotation * Quat::from_rotation_z((time + id).sin() * ORNAMENT_SWAY),
            Vec3::splat(p.scale * (ORNAMENT_MIN_SCALE + (1.0 - ORNAMENT_MIN_SCALE) * t)),
        ),
    }
}

/// Full world matrix for one particle: scale, then rotation, then translation.
pub fn instance_transform(policy: UpdatePolicy, p: &Particle, t: f32, time: f32) -> Mat4 {
    let position = swirl(blend_position(p.scatter_position, p.tree_position, t), t)
        + float_offset(p.id, p.speed, t, time);
    let (rotation, scale) = pose(policy, p, t, time);
    Mat4::from_scale_rotation_translation(scale, rotation, position)
}

// ---------------- Engine ----------------

/// Owns the immutable layout and writes every class into its sink each frame.
#[derive(Clone, Debug)]
pub struct TransformEngine {
    layout: TreeLayout,
}

impl TransformEngine {
    pub fn new(layout: TreeLayout) -> Result<Self> {
        layout.validate()?;
        Ok(Self { layout })
    }

    #[inline]
    pub fn layout(&self) -> &TreeLayout {
        &self.layout
    }

    /// Verify there is one sink per class, each large enough for its class.
    /// Run once before the first `update`.
    pub fn check_sinks<S: InstanceSink>(&self, sinks: &[S]) -> Result<()> {
        if sinks.len() != ParticleClass::COUNT {
            return Err(CoreError::SinkCountMismatch {
                expected: ParticleClass::COUNT,
                actual: sinks.len(),
            });
        }
        for (class, particles) in self.layout.iter() {
            let capacity = sinks[class.index()].capacity();
            if capacity < particles.len() {
                return Err(CoreError::SinkCapacityMismatch {
                    class,
                    capacity,
                    required: particles.len(),
                });
            }
        }
        Ok(())
    }

    /// Write every particle of every class, flagging each sink once.
    ///
    /// `t` is the assembly factor and `time` the elapsed seconds. Sinks must
    /// have passed `check_sinks`; classes without a sink are skipped.
    pub fn update<S: InstanceSink>(&self, t: f32, time: f32, sinks: &mut [S]) {
        for (class, sink) in ParticleClass::ALL.into_iter().zip(sinks.iter_mut()) {
            self.update_class(class, t, time, sink);
        }
    }

    pub fn update_class<S: InstanceSink + ?Sized>(
        &self,
        class: ParticleClass,
        t: f32,
        time: f32,
        sink: &mut S,
    ) {
        let policy = class.policy();
        for (i, p) in self.layout.particles(class).iter().enumerate() {
            sink.set_matrix_at(i, &instance_transform(policy, p, t, time));
        }
        sink.mark_matrices_dirty();
    }
}
