//! Gaussian process smoothing of a device's temperature history

use chrono::{DateTime, Duration, Utc};
use dt_api::query::format_timestamp;
use dt_api::TemperatureSample;
use dt_gp::GaussianProcess;
use serde::Serialize;

use crate::config::ForecastConfig;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Upper bound on evaluated points; the cross-covariance matrix grows with it
pub const MAX_FORECAST_POINTS: usize = 10_000;

/// One evaluated point of the posterior
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastPoint {
    pub time: String,
    /// Hours since the first sample
    pub hours: f64,
    pub mean: f64,
    pub ci_low: f64,
    pub ci_high: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Forecast {
    pub device: String,
    pub samples: usize,
    pub prior_mean: f64,
    pub points: Vec<ForecastPoint>,
}

/// `points` evenly spaced values covering `[0, span]`
fn grid(span: f64, points: usize) -> Vec<f64> {
    match points {
        0 => Vec::new(),
        1 => vec![span / 2.0],
        n => (0..n)
            .map(|i| span * i as f64 / (n - 1) as f64)
            .collect(),
    }
}

/// Reject grid sizes above [`MAX_FORECAST_POINTS`]
pub fn validate_points(points: usize) -> crate::Result<usize> {
    if points > MAX_FORECAST_POINTS {
        return Err(crate::CliError::Config(format!(
            "forecast points must be at most {}, got {}",
            MAX_FORECAST_POINTS, points
        )));
    }
    Ok(points)
}

fn hours_between(origin: DateTime<Utc>, time: DateTime<Utc>) -> f64 {
    (time - origin).num_milliseconds() as f64 / MILLIS_PER_HOUR
}

/// Fit a GP over the samples and evaluate it on an evenly spaced grid spanning them
pub fn build_forecast(
    device: &str,
    samples: &[TemperatureSample],
    config: &ForecastConfig,
    points: usize,
) -> crate::Result<Forecast> {
    let points = validate_points(points)?;
    let mut samples = samples.to_vec();
    samples.sort_by_key(|s| s.time);
    let origin = samples
        .first()
        .map(|s| s.time)
        .ok_or_else(|| crate::CliError::NoTemperatureData(device.to_string()))?;

    let x: Vec<f64> = samples
        .iter()
        .map(|s| hours_between(origin, s.time))
        .collect();
    let y: Vec<f64> = samples.iter().map(|s| s.value).collect();

    let gp = GaussianProcess::fit(&x, &y, config.hyper_parameters, config.noise)?;

    let span = x.last().copied().unwrap_or(0.0);
    let grid = grid(span, points);
    let posterior = gp.posterior(&grid);
    tracing::debug!(
        "Evaluated posterior for {} at {} points over {:.1} hours",
        device,
        grid.len(),
        span
    );

    let points = grid
        .iter()
        .enumerate()
        .map(|(i, &hours)| ForecastPoint {
            time: format_timestamp(
                origin + Duration::milliseconds((hours * MILLIS_PER_HOUR).round() as i64),
            ),
            hours,
            mean: posterior.mean[i],
            ci_low: posterior.ci_low[i],
            ci_high: posterior.ci_high[i],
        })
        .collect();

    Ok(Forecast {
        device: device.to_string(),
        samples: samples.len(),
        prior_mean: gp.prior_mean(),
        points,
    })
}
