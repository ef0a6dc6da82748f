//////////////////////////////////////////////////////////////////////////////////////////////////////////////////
//                         TESTS
///////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests1 {
    use crate::numerical::Simpson::Simpson_main::{SimpsonQuad, integrate};
    use crate::numerical::Simpson::Simpson_problems::KnownIntegral;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;
    use strum::IntoEnumIterator;

    #[test]
    fn test_default_demo_task_converges_to_half_pi() {
        // sin(x)^2 over the symmetric interval is integrated exactly by the
        // composite rule from n = 4 on, so the second iteration already
        // passes the tolerance
        let mut solver = SimpsonQuad::new();
        solver.set_solver_params(Some("none".to_string()), None, None);
        let result = solver.solve().unwrap();
        assert_relative_eq!(result.value, PI / 2.0, epsilon = 1e-12);
        assert_eq!(result.n, 8);
        assert_eq!(result.trace.len(), 2);
        assert!(result.error_estimate < 1e-12);
    }

    #[test]
    fn test_random_cubics_are_integrated_exactly() {
        use rand::Rng;
        for _ in 0..5 {
            let c3: f64 = rand::rng().random_range(-5.0..5.0);
            let c2: f64 = rand::rng().random_range(-5.0..5.0);
            let c1: f64 = rand::rng().random_range(-5.0..5.0);
            let c0: f64 = rand::rng().random_range(-5.0..5.0);
            let (a, b) = (-2.0, 3.0);
            let exact = c3 / 4.0 * (b * b * b * b - a * a * a * a)
                + c2 / 3.0 * (b * b * b - a * a * a)
                + c1 / 2.0 * (b * b - a * a)
                + c0 * (b - a);
            let result = integrate(
                move |x| c3 * x * x * x + c2 * x * x + c1 * x + c0,
                a,
                b,
                1e-9,
                4,
            )
            .unwrap();
            assert_relative_eq!(result.value, exact, epsilon = 1e-9);
            // cubics need no refinement beyond the mandatory first doubling
            assert_eq!(result.trace.len(), 2);
        }
    }

    #[test]
    fn test_odd_initial_partitions_are_bumped_to_even() {
        let mut solver = SimpsonQuad::new();
        solver.set_initial_partitions(5);
        solver.set_solver_params(Some("none".to_string()), None, None);
        let result = solver.solve().unwrap();
        let ns: Vec<usize> = result.trace.iter().map(|r| r.n).collect();
        assert_eq!(ns[0], 6);
        for (i, &n) in ns.iter().enumerate().skip(1) {
            assert_eq!(n, 6 * (1 << i));
        }
    }

    #[test]
    fn test_degenerate_interval() {
        let mut solver = SimpsonQuad::new();
        solver.set_known_problem(KnownIntegral::SinSquared, Some(1.0), Some(1.0));
        solver.set_solver_params(Some("none".to_string()), None, None);
        let result = solver.solve().unwrap();
        assert_eq!(result.value, 0.0);
        assert_eq!(result.error_estimate, 0.0);
        assert_eq!(result.trace.len(), 2);
        for xi in result.x_grid.iter() {
            assert_eq!(*xi, 1.0);
        }
    }

    #[test]
    fn test_runge_errors_decrease_for_smooth_integrand() {
        use itertools::Itertools;
        let mut solver = SimpsonQuad::new();
        solver.set_known_problem(KnownIntegral::ExpDecay, None, None);
        solver.set_tolerance(1e-10);
        solver.set_solver_params(Some("none".to_string()), None, None);
        let result = solver.solve().unwrap();
        let errors: Vec<f64> = result
            .trace
            .iter()
            .filter_map(|r| r.runge_error)
            .collect();
        assert!(errors.len() >= 3);
        for (prev, next) in errors.iter().tuple_windows() {
            assert!(next <= prev, "estimate grew from {} to {}", prev, next);
        }
    }

    #[test]
    fn test_runge_errors_decrease_for_sin_squared() {
        use itertools::Itertools;
        // over a non-symmetric span the rule is not exact for sin(x)^2 and
        // the loop has to work through several doublings
        let mut solver = SimpsonQuad::new();
        solver.set_known_problem(KnownIntegral::SinSquared, Some(0.0), Some(1.0));
        solver.set_tolerance(1e-10);
        solver.set_solver_params(Some("none".to_string()), None, None);
        let result = solver.solve().unwrap();
        let errors: Vec<f64> = result
            .trace
            .iter()
            .filter_map(|r| r.runge_error)
            .collect();
        assert!(errors.len() >= 3);
        for (prev, next) in errors.iter().tuple_windows() {
            assert!(next <= prev, "estimate grew from {} to {}", prev, next);
        }
    }

    #[test]
    fn test_peaked_integrand_needs_tight_tolerance() {
        // 1/(1 + 25 x^2) fools the Runge estimate on coarse grids, a tight
        // tolerance drives the loop into the asymptotic regime
        let mut solver = SimpsonQuad::new();
        solver.set_known_problem(KnownIntegral::RungeWitch, None, None);
        solver.set_tolerance(1e-6);
        solver.set_solver_params(Some("none".to_string()), None, None);
        let result = solver.solve().unwrap();
        let exact = KnownIntegral::RungeWitch.exact_integral(-1.0, 1.0);
        assert!((result.value - exact).abs() < 1e-4);
    }

    #[test]
    fn test_catalogue_sweep() {
        for problem in KnownIntegral::iter() {
            let (a, b) = problem.span(None, None);
            let exact = problem.exact_integral(a, b);
            let mut solver = SimpsonQuad::new();
            solver.set_known_problem(problem.clone(), None, None);
            solver.set_tolerance(1e-6);
            solver.set_solver_params(Some("none".to_string()), None, None);
            let result = solver.solve().unwrap();
            assert!(
                (result.value - exact).abs() < 1e-4,
                "{:?}: got {}, closed form {}",
                problem,
                result.value,
                exact
            );
        }
    }
}

#[cfg(test)]
mod tests2 {
    use crate::Utils::logger::{save_grid_to_csv, save_grid_to_file, save_trace_to_csv};
    use crate::numerical::Simpson::Simpson_main::{SimpsonQuad, integrate};
    use std::f64::consts::PI;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_trace_indices_and_flags() {
        let mut solver = SimpsonQuad::new();
        solver.set_solver_params(Some("none".to_string()), None, None);
        let result = solver.solve().unwrap();
        for (i, record) in result.trace.iter().enumerate() {
            assert_eq!(record.iteration, i + 1);
            if i == 0 {
                assert!(record.runge_error.is_none());
            } else {
                assert!(record.runge_error.is_some());
            }
            if i + 1 == result.trace.len() {
                assert!(record.converged);
            } else {
                assert!(!record.converged);
            }
        }
        assert_eq!(result.n, result.trace.last().unwrap().n);
    }

    #[test]
    fn test_free_integrate_matches_facade() {
        let free = integrate(|x: f64| x.sin().powi(2), -PI / 2.0, PI / 2.0, 1e-3, 4).unwrap();
        let mut solver = SimpsonQuad::new();
        solver.set_solver_params(Some("none".to_string()), None, None);
        let facade = solver.solve().unwrap();
        assert_eq!(free.value, facade.value);
        assert_eq!(free.n, facade.n);
        assert_eq!(free.trace.len(), facade.trace.len());
    }

    #[test]
    fn test_rerun_resets_the_trace() {
        let mut solver = SimpsonQuad::new();
        solver.set_solver_params(Some("none".to_string()), None, None);
        let first = solver.solve().unwrap();
        let second = solver.solve().unwrap();
        assert_eq!(first.trace.len(), second.trace.len());
        assert_eq!(solver.get_trace().len(), second.trace.len());
        assert_eq!(first.value, second.value);
    }

    #[test]
    fn test_save_grid_and_trace() {
        let result = integrate(|x: f64| x * x, 0.0, 1.0, 1e-6, 4).unwrap();
        let dir = tempdir().unwrap();

        let txt_path = dir.path().join("grid.txt");
        save_grid_to_file(
            &result.y_grid,
            &"x^2".to_string(),
            txt_path.to_str().unwrap(),
            &result.x_grid,
            &"x".to_string(),
        )
        .unwrap();
        let content = fs::read_to_string(&txt_path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "x\tx^2");
        assert_eq!(lines.len(), result.x_grid.len() + 1);

        let csv_path = dir.path().join("grid.csv");
        save_grid_to_csv(
            &result.y_grid,
            &"x^2".to_string(),
            csv_path.to_str().unwrap(),
            &result.x_grid,
            &"x".to_string(),
        )
        .unwrap();
        let content = fs::read_to_string(&csv_path).unwrap();
        assert!(content.starts_with("x,x^2"));

        let trace_path = dir.path().join("trace.csv");
        save_trace_to_csv(&result.trace, trace_path.to_str().unwrap()).unwrap();
        let content = fs::read_to_string(&trace_path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), result.trace.len() + 1);
        // the first data row has an empty error cell
        assert!(lines[1].contains(",,") || lines[1].ends_with(","));
    }
}
