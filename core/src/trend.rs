//! Trend estimator: ordinary least squares over an equally spaced index.
//!
//! The fit always carries an intercept. Sums are taken around the means
//! so large x or y offsets do not cancel catastrophically.

use crate::error::{DashboardError, DashboardResult};
use serde::Serialize;

/// y = slope * x + intercept
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// Closed-form least-squares fit.
    /// Requires equal-length inputs with at least two distinct x values.
    pub fn fit(xs: &[f64], ys: &[f64]) -> DashboardResult<Self> {
        if xs.len() != ys.len() {
            return Err(DashboardError::LengthMismatch {
                xs: xs.len(),
                ys: ys.len(),
            });
        }
        let n = xs.len();
        if n < 2 {
            return Err(DashboardError::DegenerateFit { points: n });
        }

        let x_mean = mean(xs);
        let y_mean = mean(ys);

        let (sxy, sxx) = xs
            .iter()
            .zip(ys)
            .fold((0.0, 0.0), |(sxy, sxx), (&x, &y)| {
                let dx = x - x_mean;
                (sxy + dx * (y - y_mean), sxx + dx * dx)
            });

        if sxx == 0.0 {
            return Err(DashboardError::DegenerateFit { points: n });
        }

        let slope = sxy / sxx;
        Ok(Self {
            slope,
            intercept: y_mean - slope * x_mean,
        })
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Coefficient of determination of this fit over the given points.
    /// A perfectly flat `ys` has no variance to explain and reports 1.0.
    pub fn r_squared(&self, xs: &[f64], ys: &[f64]) -> f64 {
        let y_mean = mean(ys);
        let ss_tot: f64 = ys.iter().map(|y| (y - y_mean).powi(2)).sum();
        let ss_res: f64 = xs
            .iter()
            .zip(ys)
            .map(|(&x, &y)| (y - self.predict(x)).powi(2))
            .sum();
        if ss_tot == 0.0 {
            1.0
        } else {
            1.0 - ss_res / ss_tot
        }
    }
}

/// A fit over x = 0..n-1 together with its predictions at those indices.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendLine {
    pub fit: LinearFit,
    pub r_squared: f64,
    pub predicted: Vec<f64>,
}

impl TrendLine {
    pub fn over_index(ys: &[f64]) -> DashboardResult<Self> {
        let xs: Vec<f64> = (0..ys.len()).map(|i| i as f64).collect();
        let fit = LinearFit::fit(&xs, ys)?;
        let predicted = xs.iter().map(|&x| fit.predict(x)).collect();
        Ok(Self {
            fit,
            r_squared: fit.r_squared(&xs, ys),
            predicted,
        })
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}
