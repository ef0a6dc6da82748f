//! examples of usage of RustedQuad
/// Adaptive Simpson quadrature examples
pub mod quad_examples;
