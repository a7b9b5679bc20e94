//! Decorative layers that ignore the assembly factor: gold sparkles drifting
//! inside the tree group and the static star shell behind everything.

use crate::constants::*;
use crate::error::{CoreError, Result};
use crate::palette::{hex_to_linear, hsl_to_linear};
use crate::sampler::{sample_cube, sample_unit_direction};
use crate::transform::InstanceSink;
use glam::{Mat4, Quat, Vec3};
use rand::prelude::*;
use std::f32::consts::TAU;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DecorLayer {
    Sparkles,
    StarField,
}

impl DecorLayer {
    pub fn count(self) -> usize {
        match self {
            DecorLayer::Sparkles => SPARKLE_COUNT,
            DecorLayer::StarField => STAR_FIELD_COUNT,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DecorLayer::Sparkles => "sparkles",
            DecorLayer::StarField => "stars",
        }
    }
}

fn check_capacity<S: InstanceSink + ?Sized>(
    layer: DecorLayer,
    required: usize,
    sink: &S,
) -> Result<()> {
    let capacity = sink.capacity();
    if capacity < required {
        return Err(CoreError::LayerCapacityMismatch {
            layer,
            capacity,
            required,
        });
    }
    Ok(())
}

// ---------------- Sparkles ----------------

#[derive(Clone, Debug, PartialEq)]
pub struct Sparkle {
    pub id: u32,
    /// Centre of the drift orbit, in group space.
    pub origin: Vec3,
    pub phase: f32,
}

/// Offset of a sparkle from its origin; each axis stays within `SPARKLE_DRIFT`.
#[inline]
pub fn sparkle_drift(phase: f32, time: f32) -> Vec3 {
    let a = time * SPARKLE_SPEED + phase;
    let b = time * SPARKLE_SPEED * 0.7 + phase * 2.0;
    Vec3::new(a.cos(), a.sin(), b.cos()) * SPARKLE_DRIFT
}

/// Brightness pulse in `[0, 1]`.
///
/// The rate varies with `id` so neighbouring sparkles never pulse together.
#[inline]
pub fn twinkle(id: u32, phase: f32, time: f32) -> f32 {
    let rate = SPARKLE_TWINKLE_RATE + (id % 5) as f32 * 0.35;
    0.5 + 0.5 * (time * rate + phase).sin()
}

pub fn sparkle_transform(sparkle: &Sparkle, time: f32) -> Mat4 {
    let pulse = twinkle(sparkle.id, sparkle.phase, time);
    let scale = SPARKLE_SIZE * (SPARKLE_MIN_SCALE + (1.0 - SPARKLE_MIN_SCALE) * pulse);
    Mat4::from_scale_rotation_translation(
        Vec3::splat(scale),
        Quat::IDENTITY,
        sparkle.origin + sparkle_drift(sparkle.phase, time),
    )
}

#[derive(Clone, Debug)]
pub struct SparkleField {
    sparkles: Vec<Sparkle>,
}

impl SparkleField {
    pub fn generate(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::generate_with(&mut rng)
    }

    pub fn generate_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let sparkles = (0..SPARKLE_COUNT as u32)
            .map(|id| Sparkle {
                id,
                origin: sample_cube(rng, SPARKLE_VOLUME),
                phase: rng.gen::<f32>() * TAU,
            })
            .collect();
        Self { sparkles }
    }

    pub fn sparkles(&self) -> &[Sparkle] {
        &self.sparkles
    }

    pub fn len(&self) -> usize {
        self.sparkles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sparkles.is_empty()
    }

    pub fn check_sink<S: InstanceSink + ?Sized>(&self, sink: &S) -> Result<()> {
        check_capacity(DecorLayer::Sparkles, self.len(), sink)
    }

    /// Dim gold for every sparkle; the shader scales it by the glow strength.
    pub fn seed_colors<S: InstanceSink + ?Sized>(&self, sink: &mut S) {
        let gold = hex_to_linear(GOLD) * SPARKLE_OPACITY;
        for i in 0..self.len() {
            sink.set_color_at(i, gold);
        }
        sink.mark_colors_dirty();
    }

    pub fn update<S: InstanceSink + ?Sized>(&self, time: f32, sink: &mut S) {
        for (i, sparkle) in self.sparkles.iter().enumerate() {
            sink.set_matrix_at(i, &sparkle_transform(sparkle, time));
        }
        sink.mark_matrices_dirty();
    }
}

// ---------------- Star shell ----------------

#[derive(Clone, Debug, PartialEq)]
pub struct FieldStar {
    /// World-space position; the shell does not rotate with the tree.
    pub position: Vec3,
    pub size: f32,
    /// Linear color with the depth fade already applied.
    pub color: Vec3,
}

/// Brightness left after fading a star `radius` units from the centre.
#[inline]
pub fn depth_fade(radius: f32) -> f32 {
    let depth = ((radius - STAR_FIELD_RADIUS) / STAR_FIELD_DEPTH).clamp(0.0, 1.0);
    1.0 - depth * STAR_FIELD_DEPTH_FADE
}

#[derive(Clone, Debug)]
pub struct StarField {
    stars: Vec<FieldStar>,
}

impl StarField {
    pub fn generate(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::generate_with(&mut rng)
    }

    /// Stars walk inward from the outer edge of the shell, each a random
    /// fraction of an even step closer than the last. The walk never passes
    /// the inner radius.
    pub fn generate_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let step = STAR_FIELD_DEPTH / STAR_FIELD_COUNT as f32;
        let mut radius = STAR_FIELD_RADIUS + STAR_FIELD_DEPTH;
        let mut stars = Vec::with_capacity(STAR_FIELD_COUNT);
        for i in 0..STAR_FIELD_COUNT {
            radius = (radius - step * rng.gen::<f32>()).max(STAR_FIELD_RADIUS);
            let position = sample_unit_direction(rng) * radius;
            let hue = i as f32 / STAR_FIELD_COUNT as f32;
            let color = hsl_to_linear(hue, STAR_FIELD_SATURATION, STAR_FIELD_LIGHTNESS)
                * depth_fade(radius);
            let size = STAR_FIELD_SIZE * (0.5 + 0.5 * rng.gen::<f32>());
            stars.push(FieldStar {
                position,
                size,
                color,
            });
        }
        Self { stars }
    }

    pub fn stars(&self) -> &[FieldStar] {
        &self.stars
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    pub fn check_sink<S: InstanceSink + ?Sized>(&self, sink: &S) -> Result<()> {
        check_capacity(DecorLayer::StarField, self.len(), sink)
    }

    /// Write the whole shell once; it never moves afterwards.
    pub fn write<S: InstanceSink + ?Sized>(&self, sink: &mut S) {
        for (i, star) in self.stars.iter().enumerate() {
            let matrix = Mat4::from_scale_rotation_translation(
                Vec3::splat(star.size),
                Quat::IDENTITY,
                star.position,
            );
            sink.set_matrix_at(i, &matrix);
            sink.set_color_at(i, star.color);
        }
        sink.mark_matrices_dirty();
        sink.mark_colors_dirty();
    }
}
