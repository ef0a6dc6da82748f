//! different utility modules used throughout the project
/// tiny module to save quadrature results into file
pub mod logger;
/// tiny module to plot the integrand together with the Simpson grid
pub mod plots;
