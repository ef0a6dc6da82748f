use nalgebra::DVector;

/// Runge divisor for Simpson's rule: 2^p - 1 with order of accuracy p = 4.
/// Valid only for the n -> 2n doubling refinement of this very rule, a method
/// of another order needs its own constant.
pub const SIMPSON_RUNGE_DIVISOR: f64 = 15.0;

/// Trait for representing an integrand f(x)
pub trait Integrand {
    /// Evaluate the integrand at point x
    fn evaluate(&self, x: f64) -> f64;

    /// Get integrand name for debugging/logging
    fn name(&self) -> &str {
        "unnamed_integrand"
    }
}

/// Simple integrand wrapper for closures
pub struct ClosureIntegrand<F>
where
    F: Fn(f64) -> f64,
{
    func: F,
    name: String,
}

impl<F> ClosureIntegrand<F>
where
    F: Fn(f64) -> f64,
{
    pub fn new(func: F, name: String) -> Self {
        Self { func, name }
    }
}

impl<F> Integrand for ClosureIntegrand<F>
where
    F: Fn(f64) -> f64,
{
    fn evaluate(&self, x: f64) -> f64 {
        (self.func)(x)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

////////////////////////////////COMPOSITE SIMPSON EVALUATOR////////////////////////////////

/// Composite Simpson (1/3) approximation of the integral of f over [a, b]
/// with n sub-intervals. An odd n is silently bumped to n + 1, the formula
/// pairs sub-intervals so it is undefined for odd n. Returns the approximation
/// together with the full sample grid (x and f(x), both of length n + 1) -
/// the grid is part of the contract, callers plot and save it.
///
/// Weights: endpoints 1, odd-indexed interior points 4, even-indexed interior
/// points 2, the whole sum times h/3. Never fails on finite input; a NaN or
/// infinity produced by f propagates into the returned value arithmetically.
pub fn simpson_rule<F>(f: &F, a: f64, b: f64, n: usize) -> (f64, DVector<f64>, DVector<f64>)
where
    F: Fn(f64) -> f64,
{
    assert!(n > 0, "number of sub-intervals must be positive");
    let n = if n % 2 != 0 { n + 1 } else { n };

    let h = (b - a) / (n as f64);
    let x: DVector<f64> = DVector::from_fn(n + 1, |i, _| a + (i as f64) * h);
    let y: DVector<f64> = x.map(|xi| f(xi));

    let mut sum = y[0] + y[n];
    for i in 1..n {
        if i % 2 == 0 {
            sum += 2.0 * y[i];
        } else {
            sum += 4.0 * y[i];
        }
    }

    (sum * h / 3.0, x, y)
}

/// Runge (Richardson) error estimate of the finer of two successive Simpson
/// approximations: |I_2n - I_n| / 15.
pub fn runge_estimate(I_n: f64, I_2n: f64) -> f64 {
    (I_2n - I_n).abs() / SIMPSON_RUNGE_DIVISOR
}
