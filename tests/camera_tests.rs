// Host-side tests for the orbiting camera rig.

use glam::{Vec3, Vec4};
use std::f32::consts::TAU;
use tree_core::camera::*;
use tree_core::{Camera, CameraRig};

#[test]
fn starts_in_front_of_the_tree() {
    let rig = CameraRig::new();
    let eye = rig.eye();
    assert!(eye.x.abs() < 1e-4);
    assert!((eye.y - 1.0).abs() < 1e-4);
    assert!((eye.z - 20.0).abs() < 1e-3);
}

#[test]
fn zoom_is_clamped_both_ways() {
    let mut rig = CameraRig::new();
    for _ in 0..100 {
        rig.zoom(-1.0);
    }
    assert_eq!(rig.distance, CAMERA_MIN_DISTANCE);
    for _ in 0..100 {
        rig.zoom(1.0);
    }
    assert_eq!(rig.distance, CAMERA_MAX_DISTANCE);

    let before = rig.distance;
    rig.zoom(0.0);
    assert_eq!(rig.distance, before);
}

#[test]
fn one_zoom_step_scales_distance() {
    let mut rig = CameraRig::new();
    let start = rig.distance;
    rig.zoom(-3.0);
    assert!((rig.distance - start * ZOOM_STEP).abs() < 1e-5);
}

#[test]
fn auto_rotation_advances_azimuth() {
    let mut rig = CameraRig::new();
    rig.update(2.0, 0.0);
    assert!((rig.azimuth - AUTO_ROTATE_RAD_PER_SEC * 2.0).abs() < 1e-6);
    // half speed: one turn every two minutes
    assert!((AUTO_ROTATE_RAD_PER_SEC * 120.0 - TAU).abs() < 1e-4);
}

#[test]
fn drag_is_applied_gradually_then_fully() {
    let mut rig = CameraRig::new();
    rig.drag(100.0, 0.0, 800.0);
    rig.update(0.0, 0.0);
    let target = -TAU * 100.0 / 800.0;
    assert!((rig.azimuth - target * ORBIT_DAMPING).abs() < 1e-5);

    for _ in 0..500 {
        rig.update(0.0, 0.0);
    }
    assert!((rig.azimuth - target).abs() < 1e-4);
}

#[test]
fn polar_angle_stays_in_limits() {
    let mut rig = CameraRig::new();
    for dy in [5_000.0, -5_000.0] {
        rig.drag(0.0, dy, 600.0);
        for i in 0..200 {
            rig.update(1.0 / 60.0, i as f32 / 60.0);
            assert!(rig.polar >= CAMERA_MIN_POLAR - 1e-6);
            assert!(rig.polar <= CAMERA_MAX_POLAR + 1e-6);
        }
    }
}

#[test]
fn eye_height_drifts_toward_target() {
    let mut rig = CameraRig::new();
    for _ in 0..600 {
        rig.update(0.0, 0.0);
    }
    // sin(0) = 0 so the height settles on its centre
    assert!((rig.eye().y - HEIGHT_CENTER).abs() < 1e-2);
}

#[test]
fn origin_projects_in_front_of_camera() {
    let rig = CameraRig::new();
    let camera = rig.camera(16.0 / 9.0);
    let clip = camera.view_projection() * Vec4::new(0.0, 0.0, 0.0, 1.0);
    assert!(clip.w > 0.0);
    let ndc = clip.truncate() / clip.w;
    assert!(ndc.x.abs() < 1e-3 && ndc.y.abs() < 1e-3);
    assert!(ndc.z > 0.0 && ndc.z < 1.0);
    assert_eq!(camera.fovy_radians, CAMERA_FOV_DEG.to_radians());
}

fn project(camera: &Camera, p: Vec3) -> Vec3 {
    let clip = camera.view_projection() * p.extend(1.0);
    assert!(clip.w > 0.0);
    clip.truncate() / clip.w
}

#[test]
fn spot_light_frustum_covers_its_cone() {
    let position = Vec3::new(15.0, 12.0, 15.0);
    let angle = 0.4;
    let camera = Camera::spot_light(position, Vec3::ZERO, angle, 5.0, 50.0);
    assert_eq!(camera.aspect, 1.0);

    let centre = project(&camera, Vec3::ZERO);
    assert!(centre.x.abs() < 1e-3 && centre.y.abs() < 1e-3);
    assert!(centre.z > 0.0 && centre.z < 1.0);

    // a point just inside the cone edge lands inside the map, one outside does not
    let axis = (-position).normalize();
    let side = axis.cross(Vec3::Y).normalize();
    let dist = position.length();
    let inside = position + (axis + side * (angle * 0.9).tan()) * dist;
    let ndc = project(&camera, inside);
    assert!(ndc.x.abs() <= 1.0 && ndc.y.abs() <= 1.0, "{:?}", ndc);
    let outside = position + (axis + side * (angle * 1.5).tan()) * dist;
    assert!(project(&camera, outside).x.abs() > 1.0);
}

#[test]
fn spot_light_straight_down_still_has_a_valid_frustum() {
    let camera = Camera::spot_light(Vec3::new(0.0, 20.0, 0.0), Vec3::ZERO, 0.5, 1.0, 40.0);
    let ndc = project(&camera, Vec3::ZERO);
    assert!(ndc.is_finite());
    assert!(ndc.x.abs() < 1e-3 && ndc.y.abs() < 1e-3);
}
