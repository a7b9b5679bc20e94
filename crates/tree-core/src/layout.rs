//! One-shot procedural layout of every particle class.
//!
//! Each particle carries two rest positions: one on the assembled tree and one
//! inside the scattered cloud. Both are computed once here and never change;
//! the transform engine only reads them.

use crate::constants::*;
use crate::error::{CoreError, Result};
use crate::sampler::{sample_ring, sample_sphere_volume};
use glam::{EulerRot, Quat, Vec3};
use rand::prelude::*;
use std::f32::consts::PI;

/// Static per-particle data.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    /// Index within the class; also the animation phase offset.
    pub id: u32,
    pub scatter_position: Vec3,
    pub tree_position: Vec3,
    pub rest_rotation: Quat,
    pub scale: f32,
    pub speed: f32,
    /// sRGB hex tint; `None` leaves the material base color in charge.
    pub color: Option<u32>,
}

/// How the transform engine poses a class each frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdatePolicy {
    Needle,
    Ornament,
    Light,
    Ribbon,
    Star,
    Gift,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParticleClass {
    Needles,
    SphereOrnaments,
    BellOrnaments,
    DiamondOrnaments,
    FairyLights,
    RibbonSegments,
    Gifts,
    Star,
}

impl ParticleClass {
    pub const COUNT: usize = 8;

    /// Draw order; also the index of each class's buffer.
    pub const ALL: [ParticleClass; Self::COUNT] = [
        ParticleClass::Needles,
        ParticleClass::SphereOrnaments,
        ParticleClass::BellOrnaments,
        ParticleClass::DiamondOrnaments,
        ParticleClass::FairyLights,
        ParticleClass::RibbonSegments,
        ParticleClass::Gifts,
        ParticleClass::Star,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Compile-time particle count for this class.
    pub fn count(self) -> usize {
        match self {
            ParticleClass::Needles => NEEDLE_COUNT,
            ParticleClass::SphereOrnaments => SPHERE_ORNAMENT_COUNT,
            ParticleClass::BellOrnaments => BELL_ORNAMENT_COUNT,
            ParticleClass::DiamondOrnaments => DIAMOND_ORNAMENT_COUNT,
            ParticleClass::FairyLights => FAIRY_LIGHT_COUNT,
            ParticleClass::RibbonSegments => RIBBON_SEGMENT_COUNT,
            ParticleClass::Gifts => GIFT_COUNT,
            ParticleClass::Star => STAR_COUNT,
        }
    }

    pub fn policy(self) -> UpdatePolicy {
        match self {
            ParticleClass::Needles => UpdatePolicy::Needle,
            ParticleClass::SphereOrnaments
            | ParticleClass::BellOrnaments
            | ParticleClass::DiamondOrnaments => UpdatePolicy::Ornament,
            ParticleClass::FairyLights => UpdatePolicy::Light,
            ParticleClass::RibbonSegments => UpdatePolicy::Ribbon,
            ParticleClass::Gifts => UpdatePolicy::Gift,
            ParticleClass::Star => UpdatePolicy::Star,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ParticleClass::Needles => "needles",
            ParticleClass::SphereOrnaments => "sphere-ornaments",
            ParticleClass::BellOrnaments => "bell-ornaments",
            ParticleClass::DiamondOrnaments => "diamond-ornaments",
            ParticleClass::FairyLights => "fairy-lights",
            ParticleClass::RibbonSegments => "ribbon-segments",
            ParticleClass::Gifts => "gifts",
            ParticleClass::Star => "star",
        }
    }
}

/// The complete, immutable particle dataset.
#[derive(Clone, Debug)]
pub struct TreeLayout {
    classes: [Vec<Particle>; ParticleClass::COUNT],
}

impl TreeLayout {
    /// Generate a layout from a seed. Same seed, same layout.
    pub fn generate(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::generate_with(&mut rng)
    }

    pub fn generate_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let classes = [
            needles(rng),
            ornaments(
                rng,
                SPHERE_ORNAMENT_COUNT,
                &SPHERE_ORNAMENT_COLORS,
                SPHERE_ORNAMENT_SCALE,
            ),
            ornaments(
                rng,
                BELL_ORNAMENT_COUNT,
                &BELL_ORNAMENT_COLORS,
                BELL_ORNAMENT_SCALE,
            ),
            ornaments(
                rng,
                DIAMOND_ORNAMENT_COUNT,
                &DIAMOND_ORNAMENT_COLORS,
                DIAMOND_ORNAMENT_SCALE,
            ),
            fairy_lights(rng),
            ribbon(rng),
            gifts(rng),
            star(rng),
        ];
        let layout = Self { classes };
        log::debug!(
            "[layout] generated {} particles across {} classes",
            layout.total(),
            ParticleClass::COUNT
        );
        layout
    }

    #[inline]
    pub fn particles(&self, class: ParticleClass) -> &[Particle] {
        &self.classes[class.index()]
    }

    #[inline]
    pub fn len(&self, class: ParticleClass) -> usize {
        self.classes[class.index()].len()
    }

    pub fn total(&self) -> usize {
        self.classes.iter().map(Vec::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ParticleClass, &[Particle])> + '_ {
        ParticleClass::ALL
            .into_iter()
            .map(move |class| (class, self.particles(class)))
    }

    /// Check every class against its compile-time count.
    pub fn validate(&self) -> Result<()> {
        for (class, particles) in self.iter() {
            if particles.len() != class.count() {
                return Err(CoreError::ClassSizeMismatch {
                    class,
                    expected: class.count(),
                    actual: particles.len(),
                });
            }
        }
        Ok(())
    }
}

// ---------------- Placement formulas ----------------

/// Cone radius at a height fraction (0 = base, 1 = apex).
#[inline]
pub fn cone_radius(y_ratio: f32) -> f32 {
    TREE_RADIUS * (1.0 - y_ratio)
}

#[inline]
fn height_at(y_ratio: f32) -> f32 {
    -(TREE_HEIGHT / 2.0) + y_ratio * TREE_HEIGHT
}

/// Outer bound of a needle's horizontal radius at a height fraction.
#[inline]
pub fn needle_max_radius(y_ratio: f32) -> f32 {
    cone_radius(y_ratio) * NEEDLE_RADIAL_FILL + NEEDLE_CORE_OFFSET
}

/// Needle `index` of `count` on the golden-angle spiral.
///
/// `jitter` in [0, 1) picks the radial slot; the square root keeps the
/// density uniform over the cross-section area.
pub fn needle_tree_position(index: usize, count: usize, jitter: f32) -> Vec3 {
    let y_ratio = index as f32 / count as f32;
    let theta = index as f32 * GOLDEN_ANGLE;
    let r = cone_radius(y_ratio) * jitter.sqrt() * NEEDLE_RADIAL_FILL + NEEDLE_CORE_OFFSET;
    Vec3::new(r * theta.cos(), height_at(y_ratio), r * theta.sin())
}

/// Point on the cone surface, pushed slightly outward.
pub fn ornament_tree_position(y_ratio: f32, theta: f32) -> Vec3 {
    let r = cone_radius(y_ratio);
    Vec3::new(r * theta.cos(), height_at(y_ratio), r * theta.sin()) * ORNAMENT_SURFACE_PUSH
}

#[inline]
fn helix_angle(t: f32, turns: f32, phase: f32) -> f32 {
    t * PI * 2.0 * turns + phase
}

/// Point at fraction `t` along a helix wound `turns` times around the cone.
pub fn helix_point(t: f32, turns: f32, radius_offset: f32, phase: f32) -> Vec3 {
    let theta = helix_angle(t, turns, phase);
    let r = cone_radius(t) + radius_offset;
    Vec3::new(r * theta.cos(), height_at(t), r * theta.sin())
}

/// Unit direction of travel along the helix at fraction `t`.
///
/// Uses the unit-radius helix derivative `(-sin θ, H / (2π·turns), cos θ)`;
/// the slow radius taper is ignored.
pub fn helix_tangent(t: f32, turns: f32, phase: f32) -> Vec3 {
    let theta = helix_angle(t, turns, phase);
    Vec3::new(-theta.sin(), TREE_HEIGHT / (turns * 2.0 * PI), theta.cos()).normalize()
}

/// Star rest position on the apex; fixed, no randomness.
#[inline]
pub fn star_tree_position() -> Vec3 {
    Vec3::new(0.0, TREE_HEIGHT / 2.0 + STAR_LIFT, 0.0)
}

#[inline]
fn scatter<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    sample_sphere_volume(rng, SCATTER_RADIUS)
}

#[inline]
fn pick<R: Rng + ?Sized>(rng: &mut R, palette: &[u32]) -> Option<u32> {
    palette.choose(rng).copied()
}

// ---------------- Class generators ----------------

fn needles<R: Rng + ?Sized>(rng: &mut R) -> Vec<Particle> {
    (0..NEEDLE_COUNT)
        .map(|i| {
            let tree_position = needle_tree_position(i, NEEDLE_COUNT, rng.gen());
            let rest_rotation = Quat::from_euler(
                EulerRot::XYZ,
                rng.gen::<f32>() * PI,
                rng.gen::<f32>() * PI,
                rng.gen::<f32>() * PI,
            );
            Particle {
                id: i as u32,
                scatter_position: scatter(rng),
                tree_position,
                rest_rotation,
                scale: 0.5 + rng.gen::<f32>() * 0.6,
                speed: 0.02 + rng.gen::<f32>() * 0.03,
                color: None,
            }
        })
        .collect()
}

fn ornaments<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    palette: &[u32],
    scale_base: f32,
) -> Vec<Particle> {
    (0..count)
        .map(|i| {
            let y_ratio: f32 = rng.gen();
            let theta = rng.gen::<f32>() * PI * 2.0;
            let rest_rotation = Quat::from_euler(
                EulerRot::XYZ,
                rng.gen::<f32>() * PI,
                rng.gen::<f32>() * PI,
                0.0,
            );
            Particle {
                id: i as u32,
                scatter_position: scatter(rng),
                tree_position: ornament_tree_position(y_ratio, theta),
                rest_rotation,
                scale: scale_base + rng.gen::<f32>() * 0.5,
                speed: 0.01 + rng.gen::<f32>() * 0.02,
                color: pick(rng, palette),
            }
        })
        .collect()
}

fn fairy_lights<R: Rng + ?Sized>(rng: &mut R) -> Vec<Particle> {
    (0..FAIRY_LIGHT_COUNT)
        .map(|i| {
            let t = i as f32 / FAIRY_LIGHT_COUNT as f32;
            Particle {
                id: i as u32,
                scatter_position: scatter(rng),
                tree_position: helix_point(t, LIGHT_TURNS, LIGHT_RADIUS_OFFSET, 0.0),
                rest_rotation: Quat::IDENTITY,
                scale: 0.6 + rng.gen::<f32>() * 0.4,
                speed: 0.05,
                color: pick(rng, &FAIRY_LIGHT_COLORS),
            }
        })
        .collect()
}

fn ribbon<R: Rng + ?Sized>(rng: &mut R) -> Vec<Particle> {
    (0..RIBBON_SEGMENT_COUNT)
        .map(|i| {
            let t = i as f32 / RIBBON_SEGMENT_COUNT as f32;
            let tangent = helix_tangent(t, RIBBON_TURNS, RIBBON_PHASE);
            Particle {
                id: i as u32,
                scatter_position: scatter(rng),
                tree_position: helix_point(t, RIBBON_TURNS, RIBBON_RADIUS_OFFSET, RIBBON_PHASE),
                // long axis (+Y) follows the spiral
                rest_rotation: Quat::from_rotation_arc(Vec3::Y, tangent),
                scale: 1.0,
                speed: 0.03,
                color: Some(RIBBON_RED),
            }
        })
        .collect()
}

fn gifts<R: Rng + ?Sized>(rng: &mut R) -> Vec<Particle> {
    let floor = -(TREE_HEIGHT / 2.0) - GIFT_FLOOR_DROP;
    (0..GIFT_COUNT)
        .map(|i| {
            let tree_position = sample_ring(rng, GIFT_RING_INNER, GIFT_RING_SPAN, floor);
            Particle {
                id: i as u32,
                scatter_position: scatter(rng),
                tree_position,
                rest_rotation: Quat::from_rotation_y(rng.gen::<f32>() * PI),
                scale: 1.2 + rng.gen::<f32>() * 1.5,
                speed: 0.02,
                color: pick(rng, &GIFT_COLORS),
            }
        })
        .collect()
}

fn star<R: Rng + ?Sized>(rng: &mut R) -> Vec<Particle> {
    vec![Particle {
        id: 0,
        scatter_position: scatter(rng),
        tree_position: star_tree_position(),
        rest_rotation: Quat::IDENTITY,
        scale: STAR_SCALE,
        speed: 0.01,
        color: None,
    }]
}
