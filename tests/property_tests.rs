//! Property-based tests for the closed-form model and the views built from it.
//!
//! - Initial conditions hold at t = 0
//! - The ball is on the ground exactly at the computed impact time
//! - The vertical velocity vanishes at the apex of an upward throw
//! - Rebuilding a view from the same parameters yields the same surface
//! - Scrubbing never leaves [0, time_to_impact]

use proptest::prelude::*;
use vertical_throw::core::graph::{GraphKind, GraphView, SAMPLE_STEPS, sample_index};
use vertical_throw::core::kinematics::{
    DerivedMilestones, SimulationParameters, display_height, position, velocity,
};
use vertical_throw::core::playback::Playback;
use vertical_throw::core::scene::SceneView;

fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "actual={actual}, expected={expected}, tolerance={tolerance}"
    );
}

fn params_strategy() -> impl Strategy<Value = SimulationParameters> {
    (-50.0f64..50.0, 0.1f64..200.0, 1.0f64..30.0).prop_map(|(v0, y0, g)| SimulationParameters {
        initial_velocity_mps: v0,
        initial_height_m: y0,
        gravity_mps2: g,
    })
}

fn upward_strategy() -> impl Strategy<Value = SimulationParameters> {
    (1.0f64..50.0, 0.1f64..200.0, 1.0f64..30.0).prop_map(|(v0, y0, g)| SimulationParameters {
        initial_velocity_mps: v0,
        initial_height_m: y0,
        gravity_mps2: g,
    })
}

proptest! {
    #[test]
    fn initial_conditions_hold(params in params_strategy()) {
        assert_close(position(params, 0.0), params.initial_height_m, 1e-12);
        assert_close(velocity(params, 0.0), params.initial_velocity_mps, 1e-12);
    }

    #[test]
    fn ball_reaches_ground_at_impact(params in params_strategy()) {
        let m = DerivedMilestones::from_parameters(params);
        prop_assert!(m.time_to_impact_s > 0.0);
        assert_close(position(params, m.time_to_impact_s), 0.0, 1e-6);
        assert_close(
            m.impact_velocity_mps,
            params.initial_velocity_mps - params.gravity_mps2 * m.time_to_impact_s,
            1e-9,
        );
        prop_assert!(m.impact_velocity_mps < 0.0);
    }

    #[test]
    fn velocity_vanishes_at_apex(params in params_strategy()) {
        prop_assume!(params.initial_velocity_mps > 0.0);
        let m = DerivedMilestones::from_parameters(params);
        assert_close(velocity(params, m.time_to_apex_s), 0.0, 1e-9);
        prop_assert!(m.apex_height_m >= params.initial_height_m);
        prop_assert!(m.time_to_apex_s < m.time_to_impact_s);
    }

    #[test]
    fn displayed_height_is_never_negative(params in params_strategy(), k in 0.0f64..1.5) {
        let m = DerivedMilestones::from_parameters(params);
        prop_assert!(display_height(params, k * m.time_to_impact_s) >= 0.0);
    }

    #[test]
    fn velocity_strictly_decreases_over_time(params in params_strategy(), a in 0.0f64..10.0, b in 0.0f64..10.0) {
        let (early, late) = if a <= b { (a, b) } else { (b, a) };
        prop_assume!(late - early > 1e-6);
        prop_assert!(velocity(params, late) < velocity(params, early));
    }

    #[test]
    fn height_strictly_rises_before_apex(
        params in upward_strategy(),
        a in 0.0f64..1.0,
        b in 0.0f64..1.0,
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assume!(hi - lo > 0.01);
        let apex = DerivedMilestones::from_parameters(params).time_to_apex_s;
        prop_assert!(position(params, lo * apex) < position(params, hi * apex));
    }

    #[test]
    fn height_strictly_falls_after_apex(
        params in params_strategy(),
        a in 0.0f64..1.0,
        b in 0.0f64..1.0,
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assume!(hi - lo > 0.01);
        let m = DerivedMilestones::from_parameters(params);
        let start = m.time_to_apex_s.max(0.0);
        let span = m.time_to_impact_s - start;
        prop_assert!(position(params, start + lo * span) > position(params, start + hi * span));
    }

    #[test]
    fn rebuilding_views_is_idempotent(params in params_strategy()) {
        let m = DerivedMilestones::from_parameters(params);
        prop_assert_eq!(SceneView::build(params, &m), SceneView::build(params, &m));
        prop_assert_eq!(
            GraphView::build(GraphKind::Height, params, &m),
            GraphView::build(GraphKind::Height, params, &m)
        );
    }

    #[test]
    fn sample_index_is_monotonic(t_end in 0.01f64..100.0, a in -10.0f64..200.0, b in -10.0f64..200.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let i = sample_index(lo, t_end);
        let j = sample_index(hi, t_end);
        prop_assert!(i <= j);
        prop_assert!(j <= SAMPLE_STEPS);
    }

    #[test]
    fn scrub_stays_inside_the_flight(params in params_strategy(), target in -1.0e4f64..1.0e4) {
        let mut playback = Playback::new(params);
        playback.scrub(target);
        let t = playback.time_s();
        prop_assert!(t >= 0.0);
        prop_assert!(t <= playback.milestones().time_to_impact_s);
        prop_assert!(!playback.readouts().height.starts_with('-'));
    }
}
