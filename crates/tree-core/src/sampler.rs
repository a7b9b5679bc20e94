//! Random points inside geometric volumes.

use glam::Vec3;
use rand::Rng;
use std::f32::consts::PI;

/// Uniform point inside a solid sphere of `radius` centred on the origin.
///
/// The polar angle is drawn through the inverse CDF `acos(2v - 1)` so that
/// directions are uniform over the sphere, and the radial distance is the cube
/// root of a uniform variate so that density is uniform by volume.
pub fn sample_sphere_volume<R: Rng + ?Sized>(rng: &mut R, radius: f32) -> Vec3 {
    let direction = sample_unit_direction(rng);
    direction * (rng.gen::<f32>().cbrt() * radius)
}

/// Uniform direction on the unit sphere.
pub fn sample_unit_direction<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let u: f32 = rng.gen();
    let v: f32 = rng.gen();
    let theta = 2.0 * PI * u;
    let phi = (2.0 * v - 1.0).clamp(-1.0, 1.0).acos();
    let sin_phi = phi.sin();
    Vec3::new(sin_phi * theta.cos(), sin_phi * theta.sin(), phi.cos())
}

/// Uniform point inside the axis-aligned cube of edge `edge` centred on the origin.
pub fn sample_cube<R: Rng + ?Sized>(rng: &mut R, edge: f32) -> Vec3 {
    let half = edge * 0.5;
    Vec3::new(
        rng.gen_range(-half..=half),
        rng.gen_range(-half..=half),
        rng.gen_range(-half..=half),
    )
}

/// Uniform point on a disc annulus in the XZ plane at height `y`.
///
/// Radius is uniform in `[inner, inner + span)`, not area-corrected; gifts
/// cluster slightly toward the inner edge which reads as "under the tree".
pub fn sample_ring<R: Rng + ?Sized>(rng: &mut R, inner: f32, span: f32, y: f32) -> Vec3 {
    let angle = rng.gen::<f32>() * 2.0 * PI;
    let r = rng.gen::<f32>() * span + inner;
    Vec3::new(r * angle.cos(), y, r * angle.sin())
}
