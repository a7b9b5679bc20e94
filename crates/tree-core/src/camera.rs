//! Camera description and the orbiting rig that drives it.
//!
//! These types avoid platform-specific APIs; the web frontend feeds pointer
//! and wheel deltas in and reads matrices out.

use glam::{Mat4, Vec3};
use std::f32::consts::{PI, TAU};

pub const CAMERA_FOV_DEG: f32 = 30.0;
pub const CAMERA_START_DISTANCE: f32 = 20.0;
pub const CAMERA_START_HEIGHT: f32 = 1.0;
pub const CAMERA_MIN_DISTANCE: f32 = 12.0;
pub const CAMERA_MAX_DISTANCE: f32 = 30.0;
pub const CAMERA_MIN_POLAR: f32 = PI / 2.5;
pub const CAMERA_MAX_POLAR: f32 = PI / 1.8;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 200.0;

// One orbit per minute at speed 1.0 (three.js convention), here at 0.5.
pub const AUTO_ROTATE_SPEED: f32 = 0.5;
pub const AUTO_ROTATE_RAD_PER_SEC: f32 = TAU / 60.0 * AUTO_ROTATE_SPEED;

pub const ORBIT_DAMPING: f32 = 0.05; // share of pending rotation applied per frame
pub const ZOOM_STEP: f32 = 0.95;

// Vertical drift: eye height eases toward 2 + sin(0.1 t)
pub const HEIGHT_CENTER: f32 = 2.0;
pub const HEIGHT_SWING: f32 = 1.0;
pub const HEIGHT_FREQ: f32 = 0.1;
pub const HEIGHT_EASE: f32 = 0.02;

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Square frustum looking down a spot light's axis, wide enough for its
    /// whole cone. Used to render the light's shadow map.
    pub fn spot_light(
        position: Vec3,
        target: Vec3,
        cone_angle: f32,
        znear: f32,
        zfar: f32,
    ) -> Self {
        let axis = (target - position).normalize_or_zero();
        let up = if axis.dot(Vec3::Y).abs() > 0.99 {
            Vec3::Z
        } else {
            Vec3::Y
        };
        Self {
            eye: position,
            target,
            up,
            aspect: 1.0,
            fovy_radians: 2.0 * cone_angle,
            znear,
            zfar,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Damped orbit around the origin with auto-rotation, zoom limits and a slow
/// vertical drift.
#[derive(Clone, Debug)]
pub struct CameraRig {
    pub azimuth: f32,
    pub polar: f32,
    pub distance: f32,
    pending_azimuth: f32,
    pending_polar: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraRig {
    pub fn new() -> Self {
        let distance = (CAMERA_START_DISTANCE * CAMERA_START_DISTANCE
            + CAMERA_START_HEIGHT * CAMERA_START_HEIGHT)
            .sqrt();
        Self {
            azimuth: 0.0,
            polar: (CAMERA_START_HEIGHT / distance).acos(),
            distance,
            pending_azimuth: 0.0,
            pending_polar: 0.0,
        }
    }

    /// Queue a drag of `dx`, `dy` pixels on a viewport `viewport_height` tall.
    /// A full-height drag rotates by one turn.
    pub fn drag(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        let h = viewport_height.max(1.0);
        self.pending_azimuth -= TAU * dx / h;
        self.pending_polar -= TAU * dy / h;
    }

    /// Wheel zoom; positive `delta` moves away.
    pub fn zoom(&mut self, delta: f32) {
        let factor = if delta > 0.0 {
            1.0 / ZOOM_STEP
        } else if delta < 0.0 {
            ZOOM_STEP
        } else {
            1.0
        };
        self.distance = (self.distance * factor).clamp(CAMERA_MIN_DISTANCE, CAMERA_MAX_DISTANCE);
    }

    /// Advance one frame and return the eye position.
    ///
    /// `time_sec` is the wall-clock elapsed time shared with the transform
    /// engine; it drives the vertical drift.
    pub fn update(&mut self, dt_sec: f32, time_sec: f32) -> Vec3 {
        let dt = dt_sec.max(0.0);
        self.azimuth += AUTO_ROTATE_RAD_PER_SEC * dt;

        self.azimuth += self.pending_azimuth * ORBIT_DAMPING;
        self.polar += self.pending_polar * ORBIT_DAMPING;
        self.pending_azimuth *= 1.0 - ORBIT_DAMPING;
        self.pending_polar *= 1.0 - ORBIT_DAMPING;

        // ease the eye height, then re-derive the polar angle from it
        let height = self.distance * self.polar.cos();
        let desired = HEIGHT_CENTER + (time_sec * HEIGHT_FREQ).sin() * HEIGHT_SWING;
        let eased = height + (desired - height) * HEIGHT_EASE;
        self.polar = (eased / self.distance)
            .clamp(-1.0, 1.0)
            .acos()
            .clamp(CAMERA_MIN_POLAR, CAMERA_MAX_POLAR);

        self.eye()
    }

    pub fn eye(&self) -> Vec3 {
        let sin_polar = self.polar.sin();
        Vec3::new(
            self.distance * sin_polar * self.azimuth.sin(),
            self.distance * self.polar.cos(),
            self.distance * sin_polar * self.azimuth.cos(),
        )
    }

    pub fn camera(&self, aspect: f32) -> Camera {
        Camera {
            eye: self.eye(),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: aspect.max(1e-3),
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }
}
