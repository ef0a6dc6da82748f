#![allow(non_snake_case)]
use crate::numerical::Simpson::Simpson_main::{QuadConfig, SimpsonQuad, integrate};
use crate::numerical::Simpson::Simpson_problems::KnownIntegral;
use crate::numerical::Simpson::Simpson_rule::ClosureIntegrand;
use strum::IntoEnumIterator;

pub fn quad_examples(example: usize) {
    match example {
        0 => {
            // CLASSIC DEMO TASK
            // sin(x)^2 over [-pi/2, pi/2], closed form is pi/2
            let mut solver = SimpsonQuad::new();
            // tolerance 1e-3, start from 4 sub-intervals
            solver.set_tolerance(1e-3);
            solver.set_initial_partitions(4);
            let result = solver.solve().unwrap();
            println!("I = {}, n = {} \n", result.value, result.n);
            // refinement history with the Runge error of every doubling
            println!("{}", solver.trace_table());
            println!("{}", solver.report());
        }
        1 => {
            // the shortest way to integrate a function
            let result = integrate(|x| x * x, 0.0, 1.0, 1e-6, 2).unwrap();
            println!("integral of x^2 over [0, 1] = {} \n", result.value);
            // Simpson is exact on cubics, so one refinement is enough
            let result = integrate(|x| x * x * x - 2.0 * x, -1.0, 2.0, 1e-6, 4).unwrap();
            println!(
                "integral of x^3 - 2x over [-1, 2] = {}, iterations = {} \n",
                result.value,
                result.trace.len()
            );
        }
        2 => {
            // CATALOGUE SWEEP
            // integrate every problem with a known closed form and compare
            for problem in KnownIntegral::iter() {
                let (a, b) = problem.span(None, None);
                let exact = problem.exact_integral(a, b);
                let mut solver = SimpsonQuad::new();
                solver.set_known_problem(problem.clone(), None, None);
                solver.set_tolerance(1e-6);
                solver.set_solver_params(Some("none".to_string()), None, None);
                let result = solver.solve().unwrap();
                println!(
                    "{}: I = {:.10}, closed form = {:.10}, deviation = {:.3e}, n = {}",
                    problem.description(),
                    result.value,
                    exact,
                    (result.value - exact).abs(),
                    result.n
                );
            }
        }
        3 => {
            // CUSTOM INTEGRAND
            // any closure can be wrapped into an integrand, logging goes both
            // to the terminal and into a timestamped file
            let integrand = ClosureIntegrand::new(|x: f64| (-x * x).exp(), "exp(-x^2)".to_string());
            let mut solver = SimpsonQuad::new();
            solver.set_problem(Box::new(integrand), 0.0, 2.0);
            solver.set_tolerance(1e-8);
            solver.set_log_file(None);
            let result = solver.solve().unwrap();
            println!("I = {}, runge error = {:.3e} \n", result.value, result.error_estimate);
            solver.print_trace();
        }
        4 => {
            // PLOTTING
            // the peaked witch of Agnesi makes the refinement visible, the
            // plot shows the curve and the final Simpson nodes
            let mut solver = SimpsonQuad::new();
            solver.set_known_problem(KnownIntegral::RungeWitch, None, None);
            solver.set_tolerance(1e-6);
            solver.solve().unwrap();
            solver.plot_result();
            solver.plot_result_gnuplot();
            println!("{}", solver.report());
        }
        5 => {
            // SAVING RESULTS
            // grid as tab-separated text and csv, trace as csv
            let mut solver = SimpsonQuad::new();
            solver.set_known_problem(KnownIntegral::ExpDecay, None, None);
            solver.set_tolerance(1e-8);
            solver.solve().unwrap();
            solver.save_result().unwrap();
            println!("{}", solver.report());
        }
        6 => {
            // DIVERGENCE
            // an unreachable tolerance with a low partition ceiling, the
            // solver reports the last attempted grid instead of hanging
            let config = QuadConfig {
                eps: 1e-16,
                n0: 4,
                max_partitions: 64,
                trap_nonfinite: true,
            };
            let mut solver = SimpsonQuad::with_config(config);
            solver.set_known_problem(KnownIntegral::RungeWitch, None, None);
            match solver.solve() {
                Ok(result) => println!("unexpectedly converged: I = {}", result.value),
                Err(e) => println!("solver failed as expected: {}", e),
            }
            println!("{}", solver.trace_table());
        }
        _ => {
            println!("example not found");
        }
    }
}
