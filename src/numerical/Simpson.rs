/// Main adaptive Simpson solver
pub mod Simpson_main;
/// Catalogue of integrands with known closed-form integrals
pub mod Simpson_problems;
/// Composite Simpson rule evaluator and Runge error estimate
pub mod Simpson_rule;

mod Simpson_test;
