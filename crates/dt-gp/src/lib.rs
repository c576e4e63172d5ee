//! dt-gp - Gaussian process regression for sensor series
//!
//! Fits a constant-mean Gaussian process with a squared-exponential times
//! periodic kernel and reports the posterior mean with a confidence band.
//! Used to smooth temperature histories, where the periodic term picks up the
//! daily cycle.

pub mod error;
pub mod kernel;
pub mod process;

pub use error::{GpError, Result};
pub use kernel::HyperParameters;
pub use process::{GaussianProcess, Posterior, CONFIDENCE_Z};
