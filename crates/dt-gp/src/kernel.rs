//! Squared-exponential times periodic covariance kernel

use std::f64::consts::PI;

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

/// Kernel hyper-parameters.
///
/// `period` is in the same unit as the inputs; the CLI feeds hours, so the
/// default of 24 models a daily cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HyperParameters {
    pub amplitude: f64,
    pub length_scale: f64,
    pub length_scale_periodic: f64,
    pub period: f64,
}

impl Default for HyperParameters {
    fn default() -> Self {
        Self {
            amplitude: 1.0,
            length_scale: 1.0,
            length_scale_periodic: 1.0,
            period: 24.0,
        }
    }
}

impl HyperParameters {
    pub fn validate(&self) -> crate::Result<()> {
        let checks = [
            ("amplitude", self.amplitude),
            ("length_scale", self.length_scale),
            ("length_scale_periodic", self.length_scale_periodic),
            ("period", self.period),
        ];
        for (name, value) in checks {
            if !value.is_finite() || value <= 0.0 {
                return Err(crate::GpError::InvalidParameter(format!(
                    "{} must be positive and finite, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Kernel {
    params: HyperParameters,
}

impl Kernel {
    pub fn new(params: HyperParameters) -> Self {
        Self { params }
    }

    fn periodic_exp_inner(&self, diff: f64) -> f64 {
        let p = &self.params;
        let s = (PI * diff.abs() / p.period).sin();
        -2.0 / (p.length_scale_periodic * p.length_scale_periodic) * s * s
    }

    fn squared_exp_inner(&self, diff: f64) -> f64 {
        let l = self.params.length_scale;
        -diff * diff / (2.0 * l * l)
    }

    pub fn eval(&self, x1: f64, x2: f64) -> f64 {
        let diff = x2 - x1;
        self.params.amplitude * (self.periodic_exp_inner(diff) + self.squared_exp_inner(diff)).exp()
    }

    /// Covariance matrix with `rows[i]` against `cols[j]`
    pub fn matrix(&self, rows: &DVector<f64>, cols: &DVector<f64>) -> DMatrix<f64> {
        DMatrix::from_fn(rows.len(), cols.len(), |i, j| self.eval(rows[i], cols[j]))
    }
}
