// Host-side tests for the per-frame transform pass.

use glam::{Mat4, Quat, Vec3};
use std::f32::consts::{FRAC_PI_2, PI, TAU};
use tree_core::layout::Particle;
use tree_core::transform::{
    blend_position, float_offset, flicker, instance_transform, pose, swirl,
};
use tree_core::{
    CoreError, InstanceBuffer, InstanceRaw, InstanceSink, ParticleClass, TransformEngine,
    TreeLayout, UpdatePolicy,
};

fn engine(seed: u64) -> TransformEngine {
    TransformEngine::new(TreeLayout::generate(seed)).expect("generated layout is valid")
}

fn first(layout: &TreeLayout, class: ParticleClass) -> Particle {
    layout.particles(class)[0].clone()
}

fn quat_close(a: Quat, b: Quat) -> bool {
    // q and -q are the same rotation
    a.dot(b).abs() > 1.0 - 1e-5
}

/// Records how the engine drives a sink.
#[derive(Default)]
struct RecordingSink {
    capacity: usize,
    matrix_writes: usize,
    matrix_marks: usize,
    color_marks: usize,
}

impl InstanceSink for RecordingSink {
    fn capacity(&self) -> usize {
        self.capacity
    }
    fn set_matrix_at(&mut self, _index: usize, _matrix: &Mat4) {
        self.matrix_writes += 1;
    }
    fn set_color_at(&mut self, _index: usize, _color: Vec3) {}
    fn mark_matrices_dirty(&mut self) {
        self.matrix_marks += 1;
    }
    fn mark_colors_dirty(&mut self) {
        self.color_marks += 1;
    }
}

#[test]
fn blend_is_exact_at_both_ends() {
    let layout = TreeLayout::generate(1);
    for (_, particles) in layout.iter() {
        for p in particles {
            assert_eq!(blend_position(p.scatter_position, p.tree_position, 0.0), p.scatter_position);
            assert_eq!(blend_position(p.scatter_position, p.tree_position, 1.0), p.tree_position);
        }
    }
}

#[test]
fn swirl_passes_through_outside_window() {
    let p = Vec3::new(3.0, -2.0, 1.5);
    for t in [0.0, 0.005, 0.01, 0.99, 0.995, 1.0] {
        assert_eq!(swirl(p, t), p, "t={}", t);
    }
}

#[test]
fn swirl_rotates_about_vertical_axis() {
    let p = Vec3::new(3.0, -2.0, 1.5);
    let t = 0.5;
    let out = swirl(p, t);
    assert!((out.y - p.y).abs() < 1e-6);
    let r_in = (p.x * p.x + p.z * p.z).sqrt();
    let r_out = (out.x * out.x + out.z * out.z).sqrt();
    assert!((r_in - r_out).abs() < 1e-4);

    let turned = out.z.atan2(out.x) - p.z.atan2(p.x);
    let expected = (1.0 - t) * 3.0 * PI;
    let diff = (turned - expected).rem_euclid(TAU);
    assert!(diff < 1e-4 || TAU - diff < 1e-4, "{}", diff);
}

#[test]
fn float_noise_shrinks_as_tree_assembles() {
    for id in 0..50 {
        for time in [0.0, 1.3, 7.7, 42.0] {
            let loose = float_offset(id, 0.03, 0.0, time);
            let tight = float_offset(id, 0.03, 1.0, time);
            assert!(loose.x.abs() <= 1.55 + 1e-5 && loose.z.abs() <= 1.55 + 1e-5);
            assert!(loose.y.abs() <= 0.775 + 1e-5);
            assert!(tight.x.abs() <= 0.05 + 1e-6 && tight.z.abs() <= 0.05 + 1e-6);
            assert!(tight.y.abs() <= 0.025 + 1e-6);
        }
    }
}

#[test]
fn flicker_stays_in_unit_range() {
    for id in 0..20 {
        for step in 0..200 {
            let v = flicker(id, step as f32 * 0.037);
            assert!((0.0..=1.0).contains(&v));
        }
    }
}

#[test]
fn ribbon_snaps_flat_once_nearly_assembled() {
    let layout = TreeLayout::generate(2);
    let p = first(&layout, ParticleClass::RibbonSegments);

    let (a, scale) = pose(UpdatePolicy::Ribbon, &p, 0.9, 0.0);
    let (b, _) = pose(UpdatePolicy::Ribbon, &p, 0.9, 5.0);
    assert!(quat_close(a, b));
    assert!(quat_close(a, p.rest_rotation * Quat::from_rotation_x(FRAC_PI_2)));
    assert!((scale - Vec3::new(0.15, 1.0, 0.02) * 0.9).length() < 1e-6);

    // still tumbling below the threshold
    let (c, _) = pose(UpdatePolicy::Ribbon, &p, 0.5, 0.0);
    let (d, _) = pose(UpdatePolicy::Ribbon, &p, 0.5, 1.0);
    assert!(!quat_close(c, d));
}

#[test]
fn lights_and_star_and_gifts_vanish_when_scattered() {
    let layout = TreeLayout::generate(3);
    for class in [ParticleClass::FairyLights, ParticleClass::Star, ParticleClass::Gifts] {
        let p = first(&layout, class);
        let (_, scale) = pose(class.policy(), &p, 0.0, 2.0);
        assert_eq!(scale, Vec3::ZERO, "{}", class.label());
    }
}

#[test]
fn needles_and_ornaments_keep_a_minimum_size() {
    let layout = TreeLayout::generate(3);
    let needle = first(&layout, ParticleClass::Needles);
    let (rot, scale) = pose(UpdatePolicy::Needle, &needle, 0.0, 4.0);
    assert!((scale.x - needle.scale * 0.6).abs() < 1e-6);
    assert!(quat_close(rot, needle.rest_rotation));

    let ornament = first(&layout, ParticleClass::SphereOrnaments);
    let (_, scale) = pose(UpdatePolicy::Ornament, &ornament, 0.0, 4.0);
    assert!((scale.x - ornament.scale * 0.2).abs() < 1e-6);
    let (_, scale) = pose(UpdatePolicy::Ornament, &ornament, 1.0, 4.0);
    assert!((scale.x - ornament.scale).abs() < 1e-6);
}

#[test]
fn ornaments_sway_a_little_around_rest() {
    let layout = TreeLayout::generate(4);
    let p = first(&layout, ParticleClass::BellOrnaments);
    for step in 0..100 {
        let (rot, _) = pose(UpdatePolicy::Ornament, &p, 1.0, step as f32 * 0.1);
        assert!(rot.angle_between(p.rest_rotation) <= 0.1 + 1e-4);
    }
}

#[test]
fn star_spins_about_vertical_axis() {
    let layout = TreeLayout::generate(5);
    let p = first(&layout, ParticleClass::Star);
    let (rot, _) = pose(UpdatePolicy::Star, &p, 1.0, 3.0);
    assert!((rot * Vec3::Y - Vec3::Y).length() < 1e-5);
    assert!(quat_close(rot, Quat::from_rotation_y(1.5)));
}

#[test]
fn assembled_matrix_sits_on_tree_position() {
    let layout = TreeLayout::generate(6);
    for class in ParticleClass::ALL {
        let p = first(&layout, class);
        let m = instance_transform(class.policy(), &p, 1.0, 2.5);
        let (_, _, translation) = m.to_scale_rotation_translation();
        let expected = p.tree_position + float_offset(p.id, p.speed, 1.0, 2.5);
        assert!((translation - expected).length() < 1e-4, "{}", class.label());
    }
}

#[test]
fn update_writes_every_instance_and_marks_each_sink_once() {
    let engine = engine(7);
    let mut sinks: Vec<RecordingSink> = ParticleClass::ALL
        .iter()
        .map(|c| RecordingSink {
            capacity: c.count(),
            ..Default::default()
        })
        .collect();
    engine.check_sinks(&sinks).expect("sinks sized per class");
    engine.update(0.4, 1.0, &mut sinks);
    for (class, sink) in ParticleClass::ALL.iter().zip(&sinks) {
        assert_eq!(sink.matrix_writes, class.count());
        assert_eq!(sink.matrix_marks, 1);
        assert_eq!(sink.color_marks, 0);
    }
}

#[test]
fn each_update_marks_each_sink_exactly_once() {
    let engine = engine(8);
    let mut sinks: Vec<RecordingSink> = ParticleClass::ALL
        .iter()
        .map(|c| RecordingSink {
            capacity: c.count(),
            ..Default::default()
        })
        .collect();
    engine.update(0.5, 0.0, &mut sinks);
    engine.update(0.6, 0.016, &mut sinks);
    for (class, sink) in ParticleClass::ALL.iter().zip(&sinks) {
        assert_eq!(sink.matrix_marks, 2);
        assert_eq!(sink.matrix_writes, 2 * class.count());
    }
}

#[test]
fn instance_buffer_dirty_flag_clears_on_take() {
    let engine = engine(8);
    let mut buffers = InstanceBuffer::for_all_classes();
    assert!(buffers.iter().all(|b| !b.is_dirty()));
    engine.update(0.5, 0.0, &mut buffers);
    assert!(buffers.iter().all(InstanceBuffer::is_dirty));
    assert!(buffers[0].take_dirty());
    assert!(!buffers[0].take_dirty());
}

#[test]
fn check_sinks_rejects_wrong_count_and_short_buffers() {
    let engine = engine(9);
    let mut buffers = InstanceBuffer::for_all_classes();
    assert!(engine.check_sinks(&buffers).is_ok());

    assert_eq!(
        engine.check_sinks(&buffers[..3]),
        Err(CoreError::SinkCountMismatch {
            expected: ParticleClass::COUNT,
            actual: 3
        })
    );

    buffers[ParticleClass::Gifts.index()] = InstanceBuffer::new(2);
    assert_eq!(
        engine.check_sinks(&buffers),
        Err(CoreError::SinkCapacityMismatch {
            class: ParticleClass::Gifts,
            capacity: 2,
            required: ParticleClass::Gifts.count(),
        })
    );
}

fn instances(buffer: &InstanceBuffer) -> &[InstanceRaw] {
    bytemuck::cast_slice(buffer.bytes())
}

#[test]
fn instance_buffer_layout_and_bounds() {
    assert_eq!(std::mem::size_of::<InstanceRaw>(), 80);
    let mut buffer = InstanceBuffer::for_class(ParticleClass::Gifts);
    assert_eq!(buffer.bytes().len(), ParticleClass::Gifts.count() * 80);
    assert_eq!(instances(&buffer)[0], InstanceRaw::default());

    // out of range writes are dropped
    buffer.set_matrix_at(10_000, &Mat4::from_translation(Vec3::X));
    buffer.set_color_at(10_000, Vec3::ZERO);
    assert!(instances(&buffer).iter().all(|i| *i == InstanceRaw::default()));

    buffer.set_color_at(0, Vec3::new(0.5, 0.25, 0.0));
    assert_eq!(instances(&buffer)[0].color, [0.5, 0.25, 0.0, 1.0]);
}
