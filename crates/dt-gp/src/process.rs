//! Gaussian process fitting and posterior prediction

use nalgebra::{Cholesky, DMatrix, DVector, Dyn};
use serde::Serialize;

use crate::kernel::{HyperParameters, Kernel};

/// Width of the reported band in standard deviations
pub const CONFIDENCE_Z: f64 = 1.95;

/// Posterior mean and confidence band at the requested inputs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Posterior {
    pub mean: Vec<f64>,
    pub ci_low: Vec<f64>,
    pub ci_high: Vec<f64>,
}

/// A Gaussian process conditioned on training data.
///
/// The prior mean is the constant mean of the training targets.
#[derive(Debug, Clone)]
pub struct GaussianProcess {
    mean: f64,
    kernel: Kernel,
    cholesky: Cholesky<f64, Dyn>,
    train_x: DVector<f64>,
    alpha: DVector<f64>,
}

/// Cholesky factor of `k`, rejecting matrices whose factor has a zero or
/// non-finite pivot
fn factor(k: DMatrix<f64>) -> crate::Result<Cholesky<f64, Dyn>> {
    let cholesky = Cholesky::new(k).ok_or(crate::GpError::NotPositiveDefinite)?;
    let pivots_ok = cholesky
        .l_dirty()
        .diagonal()
        .iter()
        .all(|d| d.is_finite() && *d > 0.0);
    if !pivots_ok {
        return Err(crate::GpError::NotPositiveDefinite);
    }
    Ok(cholesky)
}

impl GaussianProcess {
    /// Condition the process on `(x, y)` with observation noise variance `noise`
    pub fn fit(x: &[f64], y: &[f64], params: HyperParameters, noise: f64) -> crate::Result<Self> {
        if x.len() != y.len() {
            return Err(crate::GpError::LengthMismatch {
                x: x.len(),
                y: y.len(),
            });
        }
        if x.is_empty() {
            return Err(crate::GpError::Empty);
        }
        if !noise.is_finite() || noise < 0.0 {
            return Err(crate::GpError::InvalidParameter(format!(
                "noise must be non-negative and finite, got {}",
                noise
            )));
        }
        params.validate()?;

        let kernel = Kernel::new(params);
        let train_x = DVector::from_column_slice(x);
        let train_y = DVector::from_column_slice(y);
        let mean = train_y.mean();

        let n = train_x.len();
        let k = kernel.matrix(&train_x, &train_x) + DMatrix::<f64>::identity(n, n) * noise;
        let cholesky = factor(k)?;
        let mut alpha = train_y.map(|v| v - mean);
        cholesky.solve_mut(&mut alpha);

        tracing::debug!("Fitted Gaussian process on {} points, mean {:.3}", n, mean);

        Ok(Self {
            mean,
            kernel,
            cholesky,
            train_x,
            alpha,
        })
    }

    /// Prior mean used by the fitted process
    pub fn prior_mean(&self) -> f64 {
        self.mean
    }

    pub fn posterior(&self, xs: &[f64]) -> Posterior {
        let xs = DVector::from_column_slice(xs);
        let cross = self.kernel.matrix(&xs, &self.train_x);
        let mean = (&cross * &self.alpha).add_scalar(self.mean);

        // v = L⁻¹ K*ᵀ, so diag(K** - vᵀv) is the posterior variance.
        // The pivots were checked in `fit`, so the triangular solve cannot fail.
        let mut v = cross.transpose();
        let solved = self.cholesky.l_dirty().solve_lower_triangular_mut(&mut v);
        debug_assert!(solved);

        let mut ci_low = Vec::with_capacity(xs.len());
        let mut ci_high = Vec::with_capacity(xs.len());
        for (j, (&x, m)) in xs.iter().zip(mean.iter()).enumerate() {
            let variance = (self.kernel.eval(x, x) - v.column(j).norm_squared()).max(0.0);
            let half_width = CONFIDENCE_Z * variance.sqrt();
            ci_low.push(m - half_width);
            ci_high.push(m + half_width);
        }

        Posterior {
            mean: mean.iter().copied().collect(),
            ci_low,
            ci_high,
        }
    }
}
