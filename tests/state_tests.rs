// Host-side tests for the assembly factor and mode toggle.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tree_core::state::damp;
use tree_core::{AnimationState, TreeMode};

fn run(state: &mut AnimationState, seconds: f32, dt: f32) {
    let steps = (seconds / dt).round() as usize;
    for _ in 0..steps {
        state.update(dt);
    }
}

#[test]
fn starts_scattered_and_heading_for_the_tree() {
    let state = AnimationState::new();
    assert_eq!(state.factor(), 0.0);
    assert_eq!(state.mode(), TreeMode::Assembled);
    assert_eq!(state.group_yaw(), 0.0);
}

#[test]
fn converges_to_each_target() {
    let mut state = AnimationState::new();
    run(&mut state, 10.0, 1.0 / 60.0);
    assert!((state.factor() - 1.0).abs() < 0.01, "{}", state.factor());

    assert!(state.set_target(TreeMode::Scattered));
    run(&mut state, 10.0, 1.0 / 60.0);
    assert!(state.factor().abs() < 0.01, "{}", state.factor());
}

#[test]
fn approach_is_frame_rate_independent() {
    let mut fast = AnimationState::new();
    let mut slow = AnimationState::new();
    run(&mut fast, 1.0, 1.0 / 120.0);
    run(&mut slow, 1.0, 1.0 / 30.0);
    assert!((fast.factor() - slow.factor()).abs() < 1e-3);
}

#[test]
fn factor_stays_in_unit_range_under_any_toggling() {
    let mut rng = StdRng::seed_from_u64(99);
    let mut state = AnimationState::new();
    for _ in 0..5_000 {
        if rng.gen::<f32>() < 0.1 {
            state.toggle();
        }
        state.update(rng.gen::<f32>() * 0.5);
        let f = state.factor();
        assert!((0.0..=1.0).contains(&f), "{}", f);
    }
}

#[test]
fn setting_the_active_mode_again_changes_nothing() {
    let mut once = AnimationState::new();
    let mut twice = AnimationState::new();
    run(&mut once, 0.5, 1.0 / 60.0);
    run(&mut twice, 0.5, 1.0 / 60.0);

    assert!(once.set_target(TreeMode::Scattered));
    assert!(twice.set_target(TreeMode::Scattered));
    assert!(!twice.set_target(TreeMode::Scattered));

    run(&mut once, 0.5, 1.0 / 60.0);
    run(&mut twice, 0.5, 1.0 / 60.0);
    assert_eq!(once.factor(), twice.factor());
    assert_eq!(once.mode(), twice.mode());
}

#[test]
fn toggle_flips_mode_and_label() {
    let mut state = AnimationState::new();
    assert_eq!(state.mode().label(), "ASSEMBLED");
    assert_eq!(state.toggle(), TreeMode::Scattered);
    assert_eq!(state.mode().label(), "SCATTERED");
    assert_eq!(state.toggle(), TreeMode::Assembled);
}

#[test]
fn bad_frame_times_leave_factor_alone() {
    let mut state = AnimationState::new();
    run(&mut state, 0.3, 1.0 / 60.0);
    let before = state.factor();
    state.update(f32::NAN);
    state.update(-1.0);
    state.update(f32::INFINITY);
    assert_eq!(state.factor(), before);
}

#[test]
fn damp_endpoints() {
    assert_eq!(damp(0.25, 1.0, 2.5, 0.0), 0.25);
    assert!((damp(0.25, 1.0, 2.5, 100.0) - 1.0).abs() < 1e-6);
    // one second closes all but exp(-2.5) of the gap
    let expected = 1.0 - (-2.5f32).exp();
    assert!((damp(0.0, 1.0, 2.5, 1.0) - expected).abs() < 1e-6);
}

#[test]
fn group_spins_faster_while_scattered() {
    let mut state = AnimationState::new();
    state.update(0.1);
    let f = state.factor();
    let expected = (0.05 + (1.0 - f) * 0.1) * 0.1;
    assert!((state.group_yaw() - expected).abs() < 1e-6);

    // near-assembled spin is close to the base rate
    run(&mut state, 10.0, 1.0 / 60.0);
    let before = state.group_yaw();
    state.update(0.1);
    assert!((state.group_yaw() - before - 0.005).abs() < 1e-4);
}
