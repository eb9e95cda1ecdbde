//! Shared vector aliases.
use ndarray::Array1;

/// A point in parameter space, one entry per parameter.
pub type Parameters = Array1<f64>;

pub use crate::covariance::packed::PackedCovariance;
