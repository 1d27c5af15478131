//! Linear propagation fit.
//!
//! Far from the waist a Gaussian beam's radius grows linearly with axial
//! position, so a degree-1 least-squares fit over `(position, radius)` pairs
//! recovers the propagation parameters: divergence is the arctangent of the
//! slope, the waist sits where the fitted line crosses zero radius.

mod fitter;

pub use fitter::{FitError, PropagationFit, SLOPE_EPS, fit_propagation};
