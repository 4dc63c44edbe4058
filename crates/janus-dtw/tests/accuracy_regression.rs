//! Accuracy regression tests for janus-dtw.
//!
//! These tests verify that algorithmic changes do not degrade alignment
//! accuracy. Reference costs are hand-computed L1 DTW values.

use janus_dtw::{ApproxDtw, ExactDtw, PathStep, Signal};

fn sig(values: Vec<f64>) -> Signal {
    Signal::new(values).expect("valid test signal")
}

/// Verify exact DTW costs for synthetic signal pairs match hand-computed values.
#[test]
fn exact_costs_match_known_values() {
    let pairs: Vec<(Signal, Signal)> = vec![
        (sig(vec![0.0, 0.0, 0.0]), sig(vec![1.0, 1.0, 1.0])), // constant offset
        (sig(vec![0.0, 1.0, 0.0]), sig(vec![0.0, 0.0, 0.0])), // single peak
        (sig(vec![1.0, 2.0, 3.0, 4.0]), sig(vec![1.0, 2.0, 3.0, 4.0])), // identical
        (sig(vec![1.0, 2.0, 3.0]), sig(vec![3.0, 2.0, 1.0])), // reversed
        (sig(vec![1.0]), sig(vec![5.0])),                     // single point
        (sig(vec![0.0, 0.0, 1.0]), sig(vec![1.0, 0.0, 0.0])), // shifted peak
        (sig(vec![0.0, 1.0, 2.0, 3.0, 4.0]), sig(vec![0.0, 0.0, 0.0, 0.0, 4.0])), // late ramp
        (sig(vec![10.0, 10.0, 10.0]), sig(vec![10.1, 9.9, 10.0])), // tiny perturbation
    ];

    let expected: Vec<f64> = vec![
        3.0, // [0,0,0] vs [1,1,1]
        1.0, // [0,1,0] vs [0,0,0]
        0.0, // identical
        4.0, // [1,2,3] vs [3,2,1] — DTW warps to minimize cost
        4.0, // [1] vs [5]
        2.0, // shifted peak
        4.0, // late ramp
        0.2, // tiny perturbation
    ];

    let dtw = ExactDtw::new();
    for (i, ((a, b), &exp)) in pairs.iter().zip(expected.iter()).enumerate() {
        let (cost, _) = dtw.align(a.as_view(), b.as_view());
        assert!(
            (cost.value() - exp).abs() < 1e-9,
            "pair {i}: got {:.15}, expected {exp:.15}",
            cost.value()
        );
    }
}

/// Approximate DTW must never report a cost below the exact optimum, and must
/// reach the optimum when the corridor covers the whole matrix.
#[test]
fn approx_cost_bounds() {
    let pairs: Vec<(Signal, Signal)> = vec![
        (
            sig((0..40).map(|i| (i as f64 * 0.3).sin()).collect()),
            sig((0..40).map(|i| (i as f64 * 0.3 + 0.7).sin()).collect()),
        ),
        (
            sig((0..55).map(|i| (i as f64 * 0.15).cos()).collect()),
            sig((0..48).map(|i| (i as f64 * 0.15).cos() + 0.1).collect()),
        ),
    ];

    let exact = ExactDtw::new();
    for (a, b) in &pairs {
        let (exact_cost, _) = exact.align(a.as_view(), b.as_view());

        let (narrow, _) = ApproxDtw::new().align(a.as_view(), b.as_view());
        assert!(narrow.value() >= exact_cost.value() - 1e-9);

        let wide_radius = a.len().max(b.len());
        let (wide, _) = ApproxDtw::with_radius(wide_radius).align(a.as_view(), b.as_view());
        assert!((wide.value() - exact_cost.value()).abs() < 1e-9);
    }
}

/// Both matchers obey the path invariants regardless of length mismatch.
#[test]
fn path_invariants_hold_for_both_matchers() {
    let a = sig((0..31).map(|i| (i as f64 * 0.4).sin() * 2.0).collect());
    let b = sig((0..77).map(|i| (i as f64 * 0.16).sin() * 2.0).collect());

    let paths = [
        ExactDtw::new().align(a.as_view(), b.as_view()).1,
        ApproxDtw::new().align(a.as_view(), b.as_view()).1,
        ApproxDtw::with_radius(4).align(a.as_view(), b.as_view()).1,
    ];

    for path in &paths {
        let steps = path.steps();
        assert_eq!(steps.first().unwrap(), &PathStep { cmd: 0, resp: 0 });
        assert_eq!(steps.last().unwrap(), &PathStep { cmd: 30, resp: 76 });
        for pair in steps.windows(2) {
            let dc = pair[1].cmd - pair[0].cmd;
            let dr = pair[1].resp - pair[0].resp;
            assert!(dc <= 1 && dr <= 1 && dc + dr >= 1);
        }
    }
}

/// Trimming is stable under repetition for real matcher output.
#[test]
fn trim_is_idempotent_on_matcher_paths() {
    let a = sig((0..25).map(|i| (i as f64 * 0.5).sin()).collect());
    let b = sig((0..60).map(|i| ((i as f64 - 8.0) * 0.21).sin()).collect());

    let (_, path) = ExactDtw::new().align(a.as_view(), b.as_view());
    let once = path.trim_boundary_runs();
    let twice = once.trim_boundary_runs();
    assert_eq!(once, twice);
}
