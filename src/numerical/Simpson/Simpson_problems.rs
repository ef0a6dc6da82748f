/// a collection of test integrands with known closed-form integrals for testing purposes
use crate::numerical::Simpson::Simpson_rule::{ClosureIntegrand, Integrand};
use std::f64::consts::PI;
use strum_macros::EnumIter;

//INTEGRANDS WITH ELEMENTARY ANTIDERIVATIVES
/*
 sin^2(x) = (1 - cos(2x))/2            F = x/2 - sin(2x)/4
 x^2                                   F = x^3/3
 x^3 - 2x^2 + 3x - 5                   F = x^4/4 - 2x^3/3 + 3x^2/2 - 5x
 exp(-x)                               F = -exp(-x)
 1/(1 + 25x^2)  (Runge's witch)        F = arctan(5x)/5
 the default spans below are the ones the closed forms are usually quoted on,
 e.g. sin^2 over [-pi/2, pi/2] integrates to exactly pi/2
*/
#[derive(Debug, Clone, PartialEq, Eq, EnumIter)]
pub enum KnownIntegral {
    SinSquared,
    Parabola,
    Cubic,
    ExpDecay,
    RungeWitch,
}

impl KnownIntegral {
    pub fn integrand(&self) -> Box<dyn Integrand> {
        match self {
            KnownIntegral::SinSquared => Box::new(ClosureIntegrand::new(
                |x: f64| x.sin().powi(2),
                "sin(x)^2".to_string(),
            )),
            KnownIntegral::Parabola => {
                Box::new(ClosureIntegrand::new(|x: f64| x * x, "x^2".to_string()))
            }
            KnownIntegral::Cubic => Box::new(ClosureIntegrand::new(
                |x: f64| x * x * x - 2.0 * x * x + 3.0 * x - 5.0,
                "x^3 - 2*x^2 + 3*x - 5".to_string(),
            )),
            KnownIntegral::ExpDecay => Box::new(ClosureIntegrand::new(
                |x: f64| (-x).exp(),
                "exp(-x)".to_string(),
            )),
            KnownIntegral::RungeWitch => Box::new(ClosureIntegrand::new(
                |x: f64| 1.0 / (1.0 + 25.0 * x * x),
                "1/(1 + 25*x^2)".to_string(),
            )),
        }
    }

    /// Antiderivative evaluated at x
    pub fn antiderivative(&self, x: f64) -> f64 {
        match self {
            KnownIntegral::SinSquared => x / 2.0 - (2.0 * x).sin() / 4.0,
            KnownIntegral::Parabola => x * x * x / 3.0,
            KnownIntegral::Cubic => {
                x.powi(4) / 4.0 - 2.0 * x.powi(3) / 3.0 + 3.0 * x * x / 2.0 - 5.0 * x
            }
            KnownIntegral::ExpDecay => -(-x).exp(),
            KnownIntegral::RungeWitch => (5.0 * x).atan() / 5.0,
        }
    }

    /// Exact value of the integral over [a, b] by the fundamental theorem of calculus
    pub fn exact_integral(&self, a: f64, b: f64) -> f64 {
        self.antiderivative(b) - self.antiderivative(a)
    }

    pub fn span(&self, start: Option<f64>, end: Option<f64>) -> (f64, f64) {
        match self {
            KnownIntegral::SinSquared => {
                let start = if let Some(start) = start {
                    start
                } else {
                    -PI / 2.0
                };
                let end = if let Some(end) = end { end } else { PI / 2.0 };
                (start, end)
            }
            KnownIntegral::Parabola => {
                let start = if let Some(start) = start { start } else { 0.0 };
                let end = if let Some(end) = end { end } else { 1.0 };
                (start, end)
            }
            KnownIntegral::Cubic => {
                let start = if let Some(start) = start { start } else { 0.0 };
                let end = if let Some(end) = end { end } else { 2.0 };
                (start, end)
            }
            KnownIntegral::ExpDecay => {
                let start = if let Some(start) = start { start } else { 0.0 };
                let end = if let Some(end) = end { end } else { 1.0 };
                (start, end)
            }
            KnownIntegral::RungeWitch => {
                let start = if let Some(start) = start { start } else { -1.0 };
                let end = if let Some(end) = end { end } else { 1.0 };
                (start, end)
            }
        }
    }

    /// Get a description of the test integrand
    pub fn description(&self) -> &'static str {
        match self {
            KnownIntegral::SinSquared => "sin(x)^2, smooth trigonometric integrand",
            KnownIntegral::Parabola => "x^2, Simpson integrates it exactly",
            KnownIntegral::Cubic => "cubic polynomial, Simpson integrates it exactly",
            KnownIntegral::ExpDecay => "exp(-x), smooth non-polynomial integrand",
            KnownIntegral::RungeWitch => "1/(1 + 25*x^2), needs a fine grid near x = 0",
        }
    }
}
