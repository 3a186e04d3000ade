use serde::{Deserialize, Serialize};

use crate::error::ProjectionError;

/// Chronological closing prices, index 0 = oldest.
/// Never mutated once built; working buffers take copies.
/// Serialises as a bare array and deserialises through `new`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct PriceSeries {
    prices: Vec<f64>,
}

impl PriceSeries {
    /// Validates and wraps a price vector.
    /// Rejects empty input, any non-finite value, and a non-positive last price.
    pub fn new(prices: Vec<f64>) -> Result<Self, ProjectionError> {
        if prices.is_empty() {
            return Err(ProjectionError::EmptySeries);
        }
        if let Some((index, &value)) = prices.iter().enumerate().find(|(_, p)| !p.is_finite()) {
            return Err(ProjectionError::NonFinitePrice { index, value });
        }
        let last = prices[prices.len() - 1];
        if last <= 0.0 {
            return Err(ProjectionError::NonPositiveLastPrice(last));
        }
        Ok(Self { prices })
    }

    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.prices
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Most recent price. Always present and positive.
    #[inline]
    pub fn last(&self) -> f64 {
        self.prices[self.prices.len() - 1]
    }

    /// Per-step trend of the last two prices (0.0 for a single price).
    pub fn last_trend(&self) -> f64 {
        match self.prices.as_slice() {
            [.., prev, last] => last - prev,
            _ => 0.0,
        }
    }

    /// The most recent `n` prices (fewer if the series is shorter).
    pub fn tail(&self, n: usize) -> &[f64] {
        let start = self.prices.len().saturating_sub(n);
        &self.prices[start..]
    }
}

impl TryFrom<Vec<f64>> for PriceSeries {
    type Error = ProjectionError;

    fn try_from(prices: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(prices)
    }
}

impl TryFrom<&[f64]> for PriceSeries {
    type Error = ProjectionError;

    fn try_from(prices: &[f64]) -> Result<Self, Self::Error> {
        Self::new(prices.to_vec())
    }
}

impl From<PriceSeries> for Vec<f64> {
    fn from(series: PriceSeries) -> Self {
        series.prices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_input() {
        assert_eq!(PriceSeries::new(vec![]), Err(ProjectionError::EmptySeries));
        assert!(matches!(
            PriceSeries::new(vec![1.0, f64::NAN, 2.0]),
            Err(ProjectionError::NonFinitePrice { index: 1, .. })
        ));
        assert_eq!(
            PriceSeries::new(vec![5.0, 0.0]),
            Err(ProjectionError::NonPositiveLastPrice(0.0))
        );
    }

    #[test]
    fn trend_and_tail() {
        let s = PriceSeries::new(vec![100.0, 101.0, 99.0, 104.0]).unwrap();
        assert_eq!(s.last(), 104.0);
        assert_eq!(s.last_trend(), 5.0);
        assert_eq!(s.tail(2), &[99.0, 104.0]);
        assert_eq!(s.tail(10).len(), 4);

        let single = PriceSeries::new(vec![42.0]).unwrap();
        assert_eq!(single.last_trend(), 0.0);
    }

    #[test]
    fn deserialisation_validates() {
        assert!(serde_json::from_str::<PriceSeries>("[]").is_err());
        assert!(serde_json::from_str::<PriceSeries>(r#"{"prices":[]}"#).is_err());
        assert!(serde_json::from_str::<PriceSeries>("[1.0, -2.0]").is_err());

        let s: PriceSeries = serde_json::from_str("[100.0, 101.5]").unwrap();
        assert_eq!(s.last(), 101.5);
        assert_eq!(serde_json::to_string(&s).unwrap(), "[100.0,101.5]");
    }
}
