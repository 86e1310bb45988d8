use std::f64::consts::{FRAC_PI_2, PI};

use parabolic_aim::core::{
    BallisticsError, Displacement, LaunchSolution, STANDARD_GRAVITY_MPS2, SolutionSet, Verifier,
    simulate, solve,
};
use proptest::prelude::*;

fn recovers(solution: &LaunchSolution, theta: f64, time: f64) -> bool {
    (solution.theta_rad - theta).abs() <= 1e-6 && (solution.time_s - time).abs() <= 1e-6
}

fn describe(set: &SolutionSet) -> String {
    set.iter()
        .map(|s| format!("({:.9}, {:.9})", s.theta_rad, s.time_s))
        .collect::<Vec<_>>()
        .join(", ")
}

// =============================================================================
// Forward model -> solver round trip
// =============================================================================

proptest! {
    #[test]
    fn forward_shot_is_recovered(
        theta in 0.02f64..(FRAC_PI_2 - 0.02),
        time in 0.05f64..30.0,
        speed in 5.0f64..200.0,
        gravity in 1.0f64..25.0,
    ) {
        let target = simulate(speed, theta, time, gravity).unwrap();
        let set = solve(target, speed, gravity).unwrap();

        prop_assert_eq!(set.len(), 2);
        prop_assert!(
            set.iter().any(|s| recovers(s, theta, time)),
            "({}, {}) not in [{}]", theta, time, describe(&set)
        );
    }

    #[test]
    fn backward_shot_is_recovered(
        theta in (FRAC_PI_2 + 0.02)..(PI - 0.02),
        time in 0.05f64..30.0,
        speed in 5.0f64..200.0,
    ) {
        let target = simulate(speed, theta, time, STANDARD_GRAVITY_MPS2).unwrap();
        prop_assume!(target.dx < 0.0);
        let set = solve(target, speed, STANDARD_GRAVITY_MPS2).unwrap();

        prop_assert!(
            set.iter().any(|s| recovers(s, theta, time)),
            "({}, {}) not in [{}]", theta, time, describe(&set)
        );
    }
}

// =============================================================================
// Verification over the default sweep ranges
// =============================================================================

proptest! {
    #[test]
    fn every_solution_in_sweep_range_verifies(
        dx in 10.0f64..=90.0,
        dy in -5.0f64..=5.0,
        speed in 76.0f64..=99.0,
    ) {
        let target = Displacement::new(dx, dy);
        let set = solve(target, speed, STANDARD_GRAVITY_MPS2).unwrap();
        prop_assert_eq!(set.len(), 2);

        let verifier = Verifier::new(1e-3).unwrap();
        for solution in &set {
            prop_assert!(solution.time_s > 0.0);
            let result = verifier.verify(target, speed, STANDARD_GRAVITY_MPS2, solution).unwrap();
            prop_assert!(result.within_tolerance, "{:?}", result);
        }
    }

    #[test]
    fn level_arcs_are_distinct_inside_range(
        speed in 20.0f64..150.0,
        fraction in 0.01f64..0.99,
    ) {
        let dx = fraction * speed * speed / STANDARD_GRAVITY_MPS2;
        let [low, high] = solve(Displacement::new(dx, 0.0), speed, STANDARD_GRAVITY_MPS2)
            .unwrap()
            .into_arcs()
            .unwrap();

        prop_assert!(low.theta_rad < high.theta_rad);
        prop_assert!(low.time_s < high.time_s);
    }
}

// =============================================================================
// Range boundary and input rejection
// =============================================================================

proptest! {
    #[test]
    fn reachability_flips_once_at_max_range(speed in 20.0f64..150.0) {
        let max_range = speed * speed / STANDARD_GRAVITY_MPS2;
        let mut seen_empty = false;

        for i in 1..=400 {
            let dx = max_range * i as f64 / 200.0;
            if (dx - max_range).abs() < 1e-6 * max_range {
                continue;
            }
            let set = solve(Displacement::new(dx, 0.0), speed, STANDARD_GRAVITY_MPS2).unwrap();
            prop_assert_eq!(set.is_empty(), dx > max_range, "dx={}", dx);
            prop_assert!(!(seen_empty && !set.is_empty()), "reachable again at dx={}", dx);
            seen_empty |= set.is_empty();
        }
        prop_assert!(seen_empty);
    }

    #[test]
    fn non_positive_speed_or_gravity_is_rejected(
        dx in -100.0f64..100.0,
        dy in -100.0f64..100.0,
        bad in -50.0f64..=0.0,
    ) {
        let target = Displacement::new(dx, dy);
        for result in [
            solve(target, bad, STANDARD_GRAVITY_MPS2),
            solve(target, 90.0, bad),
        ] {
            prop_assert!(matches!(result, Err(BallisticsError::DegenerateInput(_))));
        }
    }
}
