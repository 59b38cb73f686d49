//! Goodness-of-fit statistics for a modeled series against observations.
//!
//! Every function takes `(observed, modeled)` of equal, non-zero length
//! with finite values, and fails with [`EvalError::Metric`] when the
//! statistic is undefined rather than returning a sentinel.

use crate::error::{EvalError, Result};

/// Kling-Gupta Efficiency and its three components.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KgeComponents {
    pub kge: f64,
    /// Pearson correlation between observed and modeled
    pub r: f64,
    /// Variability ratio, σ_modeled / σ_observed
    pub alpha: f64,
    /// Bias ratio, Σ modeled / Σ observed
    pub beta: f64,
}

/// Rounded skill scores for one evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricsResult {
    /// Coefficient of determination, 2 decimals
    pub r2: f64,
    /// Root-mean-squared error in cfs, whole number
    pub rmse: f64,
    /// Largest absolute error in cfs, whole number
    pub max_error: f64,
    /// Mean absolute percentage error in percent, whole number
    pub mape: f64,
    /// KGE rounded to 2 decimals; components unrounded
    pub kge: KgeComponents,
}

impl MetricsResult {
    pub fn compute(observed: &[f64], modeled: &[f64]) -> Result<MetricsResult> {
        let kge = kge(observed, modeled)?;
        Ok(MetricsResult {
            r2: round_to(r2_score(observed, modeled)?, 2),
            rmse: round_to(rmse(observed, modeled)?, 0),
            max_error: round_to(max_error(observed, modeled)?, 0),
            mape: round_to(mape(observed, modeled)? * 100.0, 0),
            kge: KgeComponents {
                kge: round_to(kge.kge, 2),
                ..kge
            },
        })
    }
}

/// Round half to even at `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    let rounded = (value * scale).round_ties_even() / scale;
    // normalize -0.0 so it prints as 0
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

fn check(observed: &[f64], modeled: &[f64]) -> Result<()> {
    if observed.len() != modeled.len() {
        return Err(EvalError::Metric(format!(
            "length mismatch: {} observed vs {} modeled",
            observed.len(),
            modeled.len()
        )));
    }
    if observed.is_empty() {
        return Err(EvalError::Metric("no data points".to_string()));
    }
    if observed.iter().chain(modeled).any(|v| !v.is_finite()) {
        return Err(EvalError::Metric("input contains missing or infinite values".to_string()));
    }
    Ok(())
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation.
fn std_dev(values: &[f64]) -> f64 {
    let m = mean(values);
    (values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64).sqrt()
}

/// Coefficient of determination, `1 - SS_res / SS_tot`.
pub fn r2_score(observed: &[f64], modeled: &[f64]) -> Result<f64> {
    check(observed, modeled)?;
    let m = mean(observed);
    let ss_res: f64 = observed
        .iter()
        .zip(modeled)
        .map(|(o, p)| (o - p).powi(2))
        .sum();
    let ss_tot: f64 = observed.iter().map(|o| (o - m).powi(2)).sum();
    if ss_tot == 0.0 {
        return Err(EvalError::Metric("R² undefined for constant observations".to_string()));
    }
    Ok(1.0 - ss_res / ss_tot)
}

pub fn rmse(observed: &[f64], modeled: &[f64]) -> Result<f64> {
    check(observed, modeled)?;
    let mse = observed
        .iter()
        .zip(modeled)
        .map(|(o, p)| (o - p).powi(2))
        .sum::<f64>()
        / observed.len() as f64;
    Ok(mse.sqrt())
}

pub fn max_error(observed: &[f64], modeled: &[f64]) -> Result<f64> {
    check(observed, modeled)?;
    Ok(observed
        .iter()
        .zip(modeled)
        .map(|(o, p)| (o - p).abs())
        .fold(0.0, f64::max))
}

/// Mean absolute percentage error as a fraction (0.25 is 25%).
///
/// Undefined when any observation is zero.
pub fn mape(observed: &[f64], modeled: &[f64]) -> Result<f64> {
    check(observed, modeled)?;
    if observed.iter().any(|&o| o == 0.0) {
        return Err(EvalError::Metric("MAPE undefined: observed flow of zero".to_string()));
    }
    Ok(observed
        .iter()
        .zip(modeled)
        .map(|(o, p)| ((o - p) / o).abs())
        .sum::<f64>()
        / observed.len() as f64)
}

/// Kling-Gupta Efficiency, `1 - sqrt((r-1)² + (α-1)² + (β-1)²)`.
pub fn kge(observed: &[f64], modeled: &[f64]) -> Result<KgeComponents> {
    check(observed, modeled)?;
    let (mean_obs, mean_mod) = (mean(observed), mean(modeled));
    let (std_obs, std_mod) = (std_dev(observed), std_dev(modeled));
    if std_obs == 0.0 || std_mod == 0.0 {
        return Err(EvalError::Metric("KGE undefined for a constant series".to_string()));
    }
    let sum_obs: f64 = observed.iter().sum();
    if sum_obs == 0.0 {
        return Err(EvalError::Metric("KGE undefined: observed flows sum to zero".to_string()));
    }
    let covariance = observed
        .iter()
        .zip(modeled)
        .map(|(o, p)| (o - mean_obs) * (p - mean_mod))
        .sum::<f64>()
        / observed.len() as f64;
    let r = covariance / (std_obs * std_mod);
    let alpha = std_mod / std_obs;
    let beta = modeled.iter().sum::<f64>() / sum_obs;
    let kge = 1.0 - ((r - 1.0).powi(2) + (alpha - 1.0).powi(2) + (beta - 1.0).powi(2)).sqrt();
    Ok(KgeComponents { kge, r, alpha, beta })
}
