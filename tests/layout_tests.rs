// Host-side tests for the procedural particle layout.

use glam::{Vec2, Vec3};
use tree_core::constants::*;
use tree_core::layout::{
    cone_radius, helix_point, helix_tangent, needle_max_radius, star_tree_position,
};
use tree_core::{ParticleClass, TreeLayout, UpdatePolicy};

fn horizontal_radius(p: Vec3) -> f32 {
    Vec2::new(p.x, p.z).length()
}

#[test]
fn every_class_has_its_fixed_size() {
    let layout = TreeLayout::generate(7);
    for class in ParticleClass::ALL {
        assert_eq!(layout.len(class), class.count(), "{}", class.label());
    }
    assert!(layout.validate().is_ok());
    let expected: usize = ParticleClass::ALL.iter().map(|c| c.count()).sum();
    assert_eq!(layout.total(), expected);
}

#[test]
fn ids_are_indices_within_each_class() {
    let layout = TreeLayout::generate(11);
    for (_, particles) in layout.iter() {
        for (i, p) in particles.iter().enumerate() {
            assert_eq!(p.id as usize, i);
        }
    }
}

#[test]
fn scatter_positions_stay_inside_scatter_sphere() {
    for seed in [1, 2, 3] {
        let layout = TreeLayout::generate(seed);
        for (_, particles) in layout.iter() {
            for p in particles {
                assert!(
                    p.scatter_position.length() <= SCATTER_RADIUS + 1e-3,
                    "{:?}",
                    p.scatter_position
                );
            }
        }
    }
}

#[test]
fn needles_fill_the_cone() {
    let layout = TreeLayout::generate(5);
    let needles = layout.particles(ParticleClass::Needles);
    for (i, p) in needles.iter().enumerate() {
        let y_ratio = i as f32 / needles.len() as f32;
        let pos = p.tree_position;
        assert!(pos.y >= -TREE_HEIGHT / 2.0 - 1e-4 && pos.y <= TREE_HEIGHT / 2.0 + 1e-4);
        assert!(horizontal_radius(pos) <= needle_max_radius(y_ratio) + 1e-4);
        assert!(horizontal_radius(pos) >= NEEDLE_CORE_OFFSET - 1e-4);
        assert!(p.color.is_none());
    }
    // base first, rising to the apex
    assert!(needles[0].tree_position.y < needles[needles.len() - 1].tree_position.y);
}

#[test]
fn star_sits_exactly_on_apex() {
    let layout = TreeLayout::generate(3);
    let star = layout.particles(ParticleClass::Star);
    assert_eq!(star.len(), 1);
    let expected = Vec3::new(0.0, TREE_HEIGHT / 2.0 + 0.2, 0.0);
    assert_eq!(star[0].tree_position, expected);
    assert_eq!(star_tree_position(), expected);
    assert!(star[0].color.is_none());
    assert_eq!(star[0].scale, STAR_SCALE);
}

#[test]
fn same_seed_same_layout_different_seed_differs() {
    let a = TreeLayout::generate(42);
    let b = TreeLayout::generate(42);
    let c = TreeLayout::generate(43);
    for class in ParticleClass::ALL {
        assert_eq!(a.particles(class), b.particles(class));
    }
    assert_ne!(
        a.particles(ParticleClass::Needles),
        c.particles(ParticleClass::Needles)
    );
}

#[test]
fn ornaments_sit_just_outside_cone_with_palette_colors() {
    let layout = TreeLayout::generate(9);
    let cases: [(ParticleClass, &[u32]); 3] = [
        (ParticleClass::SphereOrnaments, &SPHERE_ORNAMENT_COLORS),
        (ParticleClass::BellOrnaments, &BELL_ORNAMENT_COLORS),
        (ParticleClass::DiamondOrnaments, &DIAMOND_ORNAMENT_COLORS),
    ];
    for (class, palette) in cases {
        for p in layout.particles(class) {
            let pos = p.tree_position;
            let y_ratio = (pos.y / ORNAMENT_SURFACE_PUSH + TREE_HEIGHT / 2.0) / TREE_HEIGHT;
            let expected = cone_radius(y_ratio) * ORNAMENT_SURFACE_PUSH;
            assert!((horizontal_radius(pos) - expected).abs() < 1e-3);
            let color = p.color.expect("ornaments carry a color");
            assert!(palette.contains(&color));
            assert_eq!(class.policy(), UpdatePolicy::Ornament);
        }
    }
}

#[test]
fn fairy_lights_follow_their_helix() {
    let layout = TreeLayout::generate(4);
    let lights = layout.particles(ParticleClass::FairyLights);
    for (i, p) in lights.iter().enumerate() {
        let t = i as f32 / lights.len() as f32;
        let expected = helix_point(t, LIGHT_TURNS, LIGHT_RADIUS_OFFSET, 0.0);
        assert!((p.tree_position - expected).length() < 1e-5);
        assert!((horizontal_radius(p.tree_position) - (cone_radius(t) + 0.15)).abs() < 1e-4);
        assert!(FAIRY_LIGHT_COLORS.contains(&p.color.unwrap_or(0)));
        assert_eq!(p.speed, 0.05);
    }
}

#[test]
fn ribbon_rest_rotation_aligns_long_axis_with_tangent() {
    let layout = TreeLayout::generate(8);
    let ribbon = layout.particles(ParticleClass::RibbonSegments);
    for (i, p) in ribbon.iter().enumerate() {
        let t = i as f32 / ribbon.len() as f32;
        let tangent = helix_tangent(t, RIBBON_TURNS, RIBBON_PHASE);
        assert!((tangent.length() - 1.0).abs() < 1e-5);
        assert!((p.rest_rotation * Vec3::Y - tangent).length() < 1e-4);
        assert_eq!(p.color, Some(RIBBON_RED));
    }
}

#[test]
fn gifts_ring_the_floor() {
    let layout = TreeLayout::generate(12);
    for p in layout.particles(ParticleClass::Gifts) {
        let r = horizontal_radius(p.tree_position);
        assert!(r >= GIFT_RING_INNER - 1e-4 && r < GIFT_RING_INNER + GIFT_RING_SPAN + 1e-4);
        assert!((p.tree_position.y - (-TREE_HEIGHT / 2.0 - 0.6)).abs() < 1e-5);
        // yaw only
        assert!((p.rest_rotation * Vec3::Y - Vec3::Y).length() < 1e-5);
        assert!(GIFT_COLORS.contains(&p.color.unwrap_or(0)));
    }
}

#[test]
fn rest_data_is_well_formed() {
    let layout = TreeLayout::generate(13);
    for (_, particles) in layout.iter() {
        for p in particles {
            assert!(p.scale > 0.0 && p.speed > 0.0);
            assert!(p.rest_rotation.is_normalized());
            assert!(p.tree_position.is_finite() && p.scatter_position.is_finite());
        }
    }
}
