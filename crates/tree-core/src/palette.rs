//! Per-instance colors, seeded once at start-up.

use crate::constants::*;
use crate::layout::{ParticleClass, TreeLayout};
use crate::transform::InstanceSink;
use glam::Vec3;
use rand::Rng;

#[inline]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// `0xRRGGBB` in sRGB to linear RGB.
pub fn hex_to_linear(hex: u32) -> Vec3 {
    let channel = |shift: u32| srgb_to_linear(((hex >> shift) & 0xFF) as f32 / 255.0);
    Vec3::new(channel(16), channel(8), channel(0))
}

/// HSL in sRGB space (all components in `[0, 1]`) to linear RGB.
pub fn hsl_to_linear(hue: f32, saturation: f32, lightness: f32) -> Vec3 {
    let h = hue.rem_euclid(1.0) * 6.0;
    let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = lightness - chroma * 0.5;
    Vec3::new(
        srgb_to_linear(r + m),
        srgb_to_linear(g + m),
        srgb_to_linear(b + m),
    )
}

/// Random foliage shade: mostly deep green, some emerald, varied brightness.
pub fn foliage_tint<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let base = if rng.gen::<f32>() < FOLIAGE_EMERALD_CHANCE {
        EMERALD
    } else {
        DEEP_GREEN
    };
    hex_to_linear(base) * (FOLIAGE_SHADE_MIN + rng.gen::<f32>() * FOLIAGE_SHADE_SPAN)
}

/// Write the initial color of every instance and flag each color buffer once.
///
/// Needles get a foliage tint; classes with a particle color use it; the rest
/// stay white so their material base color shows through unchanged.
pub fn seed_instance_colors<S, R>(layout: &TreeLayout, sinks: &mut [S], rng: &mut R)
where
    S: InstanceSink,
    R: Rng + ?Sized,
{
    for (class, particles) in layout.iter() {
        let sink = &mut sinks[class.index()];
        for (i, p) in particles.iter().enumerate() {
            let color = match (class, p.color) {
                (ParticleClass::Needles, _) => foliage_tint(rng),
                (_, Some(hex)) => hex_to_linear(hex),
                (_, None) => Vec3::ONE,
            };
            sink.set_color_at(i, color);
        }
        sink.mark_colors_dirty();
    }
}
