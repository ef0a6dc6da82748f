///  Example#1
/// ```
/// //use the shortest way to integrate a function
/// use RustedQuad::numerical::Simpson::Simpson_main::integrate;
/// // integrand, bounds, tolerance and initial number of sub-intervals
/// let result = integrate(|x| x * x, 0.0, 1.0, 1e-6, 2).unwrap();
/// assert!((result.value - 1.0 / 3.0).abs() < 1e-12);
/// println!("result = {:?} \n", result.value);
/// ```
/// Example#2
/// ```
/// // or more verbose way...
/// use RustedQuad::numerical::Simpson::Simpson_main::SimpsonQuad;
/// use RustedQuad::numerical::Simpson::Simpson_problems::KnownIntegral;
/// // take a problem with a known closed form from the catalogue
/// let mut solver = SimpsonQuad::new();
/// solver.set_known_problem(KnownIntegral::SinSquared, None, None);
/// solver.set_tolerance(1e-3);
/// solver.set_initial_partitions(4);
/// solver.set_solver_params(Some("none".to_string()), None, None);
/// let result = solver.solve().unwrap();
/// println!("I = {}, n = {} \n", result.value, result.n);
/// // refinement history and final report
/// println!("{}", solver.trace_table());
/// println!("{}", solver.report());
/// ```
pub mod Simpson;
