// Host-side tests for volume sampling and instance color seeding.

use glam::{Mat4, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tree_core::constants::*;
use tree_core::palette::{foliage_tint, hex_to_linear, hsl_to_linear, srgb_to_linear};
use tree_core::sampler::{sample_cube, sample_ring, sample_sphere_volume, sample_unit_direction};
use tree_core::{
    seed_instance_colors, InstanceBuffer, InstanceRaw, InstanceSink, ParticleClass, TreeLayout,
};

#[test]
fn sphere_samples_fill_the_volume() {
    let mut rng = StdRng::seed_from_u64(1);
    let n = 20_000;
    let mut inner = 0;
    let mut centroid = Vec3::ZERO;
    for _ in 0..n {
        let p = sample_sphere_volume(&mut rng, 25.0);
        assert!(p.length() <= 25.0 + 1e-3);
        if p.length() < 12.5 {
            inner += 1;
        }
        centroid += p;
    }
    // the inner half-radius ball holds 1/8 of the volume
    let share = inner as f32 / n as f32;
    assert!((share - 0.125).abs() < 0.02, "{}", share);
    assert!((centroid / n as f32).length() < 0.5);
}

#[test]
fn ring_samples_stay_on_the_annulus() {
    let mut rng = StdRng::seed_from_u64(2);
    for _ in 0..1_000 {
        let p = sample_ring(&mut rng, 1.5, 2.5, -5.6);
        let r = (p.x * p.x + p.z * p.z).sqrt();
        assert!((1.5 - 1e-4..4.0 + 1e-4).contains(&r));
        assert_eq!(p.y, -5.6);
    }
}

#[test]
fn unit_directions_and_cube_samples_stay_in_bounds() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut mean = Vec3::ZERO;
    for _ in 0..5_000 {
        let d = sample_unit_direction(&mut rng);
        assert!((d.length() - 1.0).abs() < 1e-4);
        mean += d;
        let p = sample_cube(&mut rng, 12.0);
        assert!(p.abs().max_element() <= 6.0);
    }
    assert!((mean / 5_000.0).length() < 0.05);
}

#[test]
fn hsl_matches_known_colors() {
    let red = hsl_to_linear(0.0, 1.0, 0.5);
    assert!((red - Vec3::X).length() < 1e-5, "{:?}", red);
    let blue = hsl_to_linear(2.0 / 3.0, 1.0, 0.5);
    assert!((blue - Vec3::Z).length() < 1e-4, "{:?}", blue);
    // no saturation leaves a grey at the lightness
    let grey = hsl_to_linear(0.3, 0.0, 0.5);
    assert_eq!(grey.x, grey.y);
    assert_eq!(grey.y, grey.z);
    assert!((grey.x - srgb_to_linear(0.5)).abs() < 1e-6);
    // hue wraps
    assert!((hsl_to_linear(1.0, 1.0, 0.5) - red).length() < 1e-5);
}

#[test]
fn srgb_conversion_endpoints() {
    assert_eq!(srgb_to_linear(0.0), 0.0);
    assert!((srgb_to_linear(1.0) - 1.0).abs() < 1e-6);
    assert!((hex_to_linear(0xFFFFFF) - Vec3::ONE).length() < 1e-5);
    assert_eq!(hex_to_linear(0x000000), Vec3::ZERO);
    let red = hex_to_linear(0xFF0000);
    assert!((red.x - 1.0).abs() < 1e-6 && red.y == 0.0 && red.z == 0.0);
}

#[test]
fn foliage_tints_are_green() {
    let mut rng = StdRng::seed_from_u64(3);
    let brightest = hex_to_linear(EMERALD) * (FOLIAGE_SHADE_MIN + FOLIAGE_SHADE_SPAN);
    for _ in 0..500 {
        let c = foliage_tint(&mut rng);
        assert!(c.y > c.x && c.y > c.z);
        assert!(c.y <= brightest.y + 1e-6);
    }
}

#[derive(Default)]
struct ColorLog {
    capacity: usize,
    colors: Vec<Vec3>,
    color_marks: usize,
}

impl InstanceSink for ColorLog {
    fn capacity(&self) -> usize {
        self.capacity
    }
    fn set_matrix_at(&mut self, _index: usize, _matrix: &Mat4) {}
    fn set_color_at(&mut self, index: usize, color: Vec3) {
        assert_eq!(index, self.colors.len());
        self.colors.push(color);
    }
    fn mark_matrices_dirty(&mut self) {}
    fn mark_colors_dirty(&mut self) {
        self.color_marks += 1;
    }
}

#[test]
fn seeding_colors_every_instance_once() {
    let layout = TreeLayout::generate(4);
    let mut sinks: Vec<ColorLog> = ParticleClass::ALL
        .iter()
        .map(|c| ColorLog {
            capacity: c.count(),
            ..Default::default()
        })
        .collect();
    let mut rng = StdRng::seed_from_u64(5);
    seed_instance_colors(&layout, &mut sinks, &mut rng);

    for (class, particles) in layout.iter() {
        let sink = &sinks[class.index()];
        assert_eq!(sink.colors.len(), particles.len());
        assert_eq!(sink.color_marks, 1);
        for (p, c) in particles.iter().zip(&sink.colors) {
            match (class, p.color) {
                (ParticleClass::Needles, _) => assert!(c.y > c.x),
                (_, Some(hex)) => assert_eq!(*c, hex_to_linear(hex)),
                (_, None) => assert_eq!(*c, Vec3::ONE),
            }
        }
    }
}

#[test]
fn seeding_marks_instance_buffers_dirty() {
    let layout = TreeLayout::generate(6);
    let mut buffers = InstanceBuffer::for_all_classes();
    let mut rng = StdRng::seed_from_u64(7);
    seed_instance_colors(&layout, &mut buffers, &mut rng);
    let star: &[InstanceRaw] = bytemuck::cast_slice(buffers[ParticleClass::Star.index()].bytes());
    assert_eq!(star[0].color, [1.0; 4]);
    assert!(buffers.iter().all(InstanceBuffer::is_dirty));
}
