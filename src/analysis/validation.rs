use itertools::Itertools;
use statrs::statistics::Statistics;

use crate::config::{Confidence, DF};
use crate::models::ValidationMetrics;

pub struct StatisticalValidator;

impl StatisticalValidator {
    /// Scores the head of a projection against the trailing `lookback` history.
    ///
    /// The projected side is cut to `min(lookback, len)` and padded with its last
    /// value back up to `lookback`. Too little data gives `ValidationMetrics::insufficient()`.
    pub fn validate(history: &[f64], projected: &[f64], lookback: usize) -> ValidationMetrics {
        if lookback == 0 || projected.is_empty() || history.len() < lookback {
            if DF.log_validation {
                log::info!(
                    "Validation skipped: {} history, {} projected, lookback {}",
                    history.len(),
                    projected.len(),
                    lookback
                );
            }
            return ValidationMetrics::insufficient();
        }

        let actual = &history[history.len() - lookback..];
        let predicted = Self::padded_head(projected, lookback);

        let abs_errors: Vec<f64> = actual.iter().zip(&predicted).map(|(a, p)| (a - p).abs()).collect();
        let mae = abs_errors.iter().mean();
        let rmse = abs_errors.iter().map(|e| e * e).mean().sqrt();

        let pct_errors: Vec<f64> = actual
            .iter()
            .zip(&predicted)
            .filter(|(a, _)| **a != 0.0)
            .map(|(a, p)| (a - p).abs() / a.abs())
            .collect();
        let mape = (!pct_errors.is_empty()).then(|| pct_errors.iter().mean() * 100.0);

        let directional_accuracy = Self::directional_accuracy(actual, &predicted);

        let mean_actual = actual.iter().mean();
        let error_ratio = if rmse == 0.0 {
            0.0
        } else {
            let r = rmse / mean_actual.abs();
            if r.is_finite() { r } else { 1.0 }
        };
        let mut confidence = 1.0 - error_ratio.min(1.0);
        if let Some(da) = directional_accuracy {
            confidence = 0.5 * confidence + 0.5 * (da / 100.0);
        }

        let metrics = ValidationMetrics {
            mae: Some(mae),
            rmse: Some(rmse),
            mape,
            directional_accuracy,
            confidence: Confidence::new(confidence),
        };

        if DF.log_validation {
            log::info!("Validation over {} points: {:?}", lookback, metrics);
        }
        metrics
    }

    fn padded_head(projected: &[f64], lookback: usize) -> Vec<f64> {
        let mut head: Vec<f64> = projected.iter().take(lookback).copied().collect();
        if let Some(&last) = head.last() {
            head.resize(lookback, last);
        }
        head
    }

    /// Percentage of step pairs where both series move the same way.
    /// Pairs where either side is flat are not counted.
    fn directional_accuracy(actual: &[f64], predicted: &[f64]) -> Option<f64> {
        let (agree, counted) = actual
            .iter()
            .tuple_windows()
            .zip(predicted.iter().tuple_windows())
            .map(|((a0, a1), (p0, p1))| (a1 - a0, p1 - p0))
            .filter(|(da, dp)| *da != 0.0 && *dp != 0.0)
            .fold((0usize, 0usize), |(agree, counted), (da, dp)| {
                let same = da.signum() == dp.signum();
                (agree + usize::from(same), counted + 1)
            });

        (counted > 0).then(|| agree as f64 / counted as f64 * 100.0)
    }
}
