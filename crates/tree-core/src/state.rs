//! Assembly factor and the two-state toggle driving it.
//!
//! The factor is the single source of truth for how far the particles have
//! travelled from the scattered cloud (0) to the tree (1). It is only ever
//! eased toward the requested target, never assigned.

use crate::constants::{
    ASSEMBLY_DAMPING, GROUP_YAW_BASE, GROUP_YAW_SCATTER_BOOST, INITIAL_ASSEMBLY,
};

/// Requested configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TreeMode {
    #[default]
    Assembled,
    Scattered,
}

impl TreeMode {
    /// Assembly factor this mode pulls toward.
    #[inline]
    pub fn target(self) -> f32 {
        match self {
            TreeMode::Assembled => 1.0,
            TreeMode::Scattered => 0.0,
        }
    }

    #[inline]
    pub fn toggled(self) -> Self {
        match self {
            TreeMode::Assembled => TreeMode::Scattered,
            TreeMode::Scattered => TreeMode::Assembled,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TreeMode::Assembled => "ASSEMBLED",
            TreeMode::Scattered => "SCATTERED",
        }
    }
}

/// Frame-rate independent exponential approach of `current` toward `target`.
///
/// `lambda` is the responsiveness in 1/s; after `dt` seconds the remaining
/// distance shrinks by `exp(-lambda * dt)`.
#[inline]
pub fn damp(current: f32, target: f32, lambda: f32, dt: f32) -> f32 {
    let alpha = 1.0 - (-lambda * dt).exp();
    current + (target - current) * alpha
}

#[derive(Clone, Debug)]
pub struct AnimationState {
    factor: f32,
    mode: TreeMode,
    group_yaw: f32,
}

impl Default for AnimationState {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationState {
    /// Starts scattered and heading for the tree, so the tree assembles on load.
    pub fn new() -> Self {
        Self {
            factor: INITIAL_ASSEMBLY,
            mode: TreeMode::Assembled,
            group_yaw: 0.0,
        }
    }

    #[inline]
    pub fn factor(&self) -> f32 {
        self.factor
    }

    #[inline]
    pub fn mode(&self) -> TreeMode {
        self.mode
    }

    /// Accumulated yaw of the whole tree group, in radians.
    #[inline]
    pub fn group_yaw(&self) -> f32 {
        self.group_yaw
    }

    /// Select the target mode. Returns whether anything changed; setting the
    /// active mode again is a no-op.
    pub fn set_target(&mut self, mode: TreeMode) -> bool {
        if self.mode == mode {
            return false;
        }
        self.mode = mode;
        log::info!("[state] target={:?} factor={:.3}", mode, self.factor);
        true
    }

    pub fn toggle(&mut self) -> TreeMode {
        self.set_target(self.mode.toggled());
        self.mode
    }

    /// Advance by one frame of `dt_sec` seconds.
    pub fn update(&mut self, dt_sec: f32) {
        let dt = if dt_sec.is_finite() { dt_sec.max(0.0) } else { 0.0 };
        self.factor = damp(self.factor, self.mode.target(), ASSEMBLY_DAMPING, dt).clamp(0.0, 1.0);
        // spin faster while the particles are loose
        self.group_yaw += (GROUP_YAW_BASE + (1.0 - self.factor) * GROUP_YAW_SCATTER_BOOST) * dt;
    }
}
