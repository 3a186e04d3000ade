use crate::config::DF;
use crate::config::constants::ensemble::{
    LINE_CONFIDENCE_MAX, LINE_CONFIDENCE_MIN, NEUTRAL_CONFIDENCE, RANGE_PENALTY_CAP, WEIGHT_MAX,
    WEIGHT_MIN,
};
use crate::config::{Confidence, Steps};
use crate::models::ProjectionLine;
use crate::utils::maths_utils::value_range;
use crate::utils::vec_utils::fill_forward_mut;

pub struct EnsembleCombiner;

impl EnsembleCombiner {
    /// Confidence-weighted mean per step across all lines with a usable value there.
    ///
    /// Steps with no usable value repeat the previous ensemble point (0.0 at step 0).
    pub fn combine(lines: &[ProjectionLine], steps: Steps) -> Vec<f64> {
        let steps = steps.value();
        let mut combined: Vec<Option<f64>> = (0..steps).map(|i| Self::combine_step(lines, i)).collect();

        let filled = fill_forward_mut(&mut combined, 0.0);
        if filled > 0 && DF.log_ensemble {
            log::info!("Ensemble filled {} of {} steps forward", filled, steps);
        }

        combined.into_iter().flatten().collect()
    }

    fn combine_step(lines: &[ProjectionLine], i: usize) -> Option<f64> {
        let valid: Vec<(f64, f64)> = lines
            .iter()
            .filter_map(|line| {
                let v = *line.points.get(i)?;
                (v.is_finite() && v > 0.0).then(|| {
                    (v, line.confidence.value().clamp(WEIGHT_MIN, WEIGHT_MAX))
                })
            })
            .collect();

        if valid.is_empty() {
            return None;
        }

        let total_weight: f64 = valid.iter().map(|(_, w)| w).sum();
        if total_weight > 0.0 {
            Some(valid.iter().map(|(v, w)| v * w).sum::<f64>() / total_weight)
        } else {
            Some(valid.iter().map(|(v, _)| v).sum::<f64>() / valid.len() as f64)
        }
    }

    /// Range-ratio heuristic: paths that swing much wider than the history score lower.
    /// `clamp(1 - min(ratio / 2, 0.7), 0.3, 0.95)`; neutral for a flat history.
    pub fn line_confidence(points: &[f64], history: &[f64]) -> Confidence {
        let history_range = value_range(history);
        if !(history_range.is_finite() && history_range > 0.0) {
            return Confidence::new(NEUTRAL_CONFIDENCE);
        }

        let finite: Vec<f64> = points.iter().copied().filter(|v| v.is_finite()).collect();
        let ratio = value_range(&finite) / history_range;
        let raw = 1.0 - (ratio / 2.0).min(RANGE_PENALTY_CAP);
        Confidence::new(raw.clamp(LINE_CONFIDENCE_MIN, LINE_CONFIDENCE_MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Triad;

    fn line(points: Vec<f64>, confidence: f64) -> ProjectionLine {
        ProjectionLine {
            triad: Triad::new(2, 3, 5),
            points,
            confidence: Confidence::new(confidence),
            fallback: false,
        }
    }

    #[test]
    fn single_line_is_identity() {
        let points = vec![109.8609, 110.1753, 109.7767, 110.1562, 109.9015];
        let out = EnsembleCombiner::combine(&[line(points.clone(), 0.95)], Steps::new(5));
        assert_eq!(out.len(), 5);
        for (a, b) in out.iter().zip(&points) {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn weights_are_clamped() {
        // 0.0 confidence still weighs 0.1 against 1.0.
        let lines = [line(vec![10.0], 0.0), line(vec![20.0], 1.0)];
        let out = EnsembleCombiner::combine(&lines, Steps::new(1));
        assert!((out[0] - (10.0 * 0.1 + 20.0) / 1.1).abs() < 1e-12);
    }

    #[test]
    fn invalid_points_are_skipped_and_gaps_fill_forward() {
        let lines = [
            line(vec![10.0, f64::NAN, -1.0], 0.5),
            line(vec![20.0, 30.0], 0.5),
        ];
        let out = EnsembleCombiner::combine(&lines, Steps::new(4));
        assert_eq!(out, vec![15.0, 30.0, 30.0, 30.0]);
    }

    #[test]
    fn nothing_valid_starts_at_zero() {
        let out = EnsembleCombiner::combine(&[line(vec![0.0, 0.0], 0.9)], Steps::new(2));
        assert_eq!(out, vec![0.0, 0.0]);
        assert_eq!(EnsembleCombiner::combine(&[], Steps::new(3)), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn line_confidence_heuristic() {
        let history = [100.0, 110.0];
        // Range 0.1 of history -> 1 - 0.05 = 0.95
        assert!((EnsembleCombiner::line_confidence(&[100.0, 101.0], &history).value() - 0.95).abs() < 1e-12);
        // Ratio 1 -> 0.5
        assert!((EnsembleCombiner::line_confidence(&[100.0, 110.0], &history).value() - 0.5).abs() < 1e-12);
        // Ratio 10 -> penalty capped at 0.7 -> 0.3
        assert!((EnsembleCombiner::line_confidence(&[0.0, 100.0], &history).value() - 0.3).abs() < 1e-12);
        // Flat path -> capped at 0.95
        assert!((EnsembleCombiner::line_confidence(&[105.0; 4], &history).value() - 0.95).abs() < 1e-12);
        // Flat history -> neutral
        assert_eq!(EnsembleCombiner::line_confidence(&[1.0, 2.0], &[5.0]), Confidence::NEUTRAL);
    }
}
