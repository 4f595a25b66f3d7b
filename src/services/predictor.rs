use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::{Prediction, MOVING_AVERAGE_METHOD};

/// Window used by the standard prediction method.
pub const PREDICTION_WINDOW: usize = 3;

const BASE_CONFIDENCE: f64 = 75.0;
const MIN_CONFIDENCE: f64 = 60.0;
const MAX_CONFIDENCE: f64 = 95.0;
const TREND_FLOOR: f64 = 0.8;

#[derive(Debug, Error, PartialEq)]
pub enum PredictionError {
    #[error("cannot predict from an empty price series")]
    EmptySeries,

    #[error("moving average window must be at least 1")]
    ZeroWindow,

    #[error("current price is zero, change percent is undefined")]
    ZeroCurrentPrice,

    #[error("prediction is not a finite number")]
    NonFinite,
}

/// Mean of the last `window` prices, or of every price when fewer are available.
pub fn moving_average(prices: &[f64], window: usize) -> Result<f64, PredictionError> {
    if window == 0 {
        return Err(PredictionError::ZeroWindow);
    }
    if prices.is_empty() {
        return Err(PredictionError::EmptySeries);
    }

    let tail = &prices[prices.len().saturating_sub(window)..];
    Ok(mean(tail))
}

/// Heuristic reliability score in `[60, 95]`.
///
/// Falls as volatility (relative population standard deviation) or the
/// magnitude of the last three-point trend grows. Series shorter than three
/// points score the floor.
pub fn confidence(prices: &[f64]) -> u8 {
    if prices.len() < 3 {
        return MIN_CONFIDENCE as u8;
    }

    let raw = BASE_CONFIDENCE * volatility_factor(prices) * trend_factor(prices);
    raw.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE).round() as u8
}

/// `max(0, 1 - 2 * stddev / mean)`; a zero mean counts as maximally volatile.
fn volatility_factor(prices: &[f64]) -> f64 {
    let mean_price = mean(prices);
    if mean_price == 0.0 {
        return 0.0;
    }
    (1.0 - (volatility(prices) / mean_price) * 2.0).max(0.0)
}

/// `max(0.8, 1 - |trend| / 2)`; an undefined trend takes the floor.
fn trend_factor(prices: &[f64]) -> f64 {
    match recent_trend(prices) {
        Some(trend) => (1.0 - trend.abs() * 0.5).max(TREND_FLOOR),
        None => TREND_FLOOR,
    }
}

/// Relative change from the third-last to the last price.
fn recent_trend(prices: &[f64]) -> Option<f64> {
    let n = prices.len();
    if n < 3 {
        return None;
    }
    let base = prices[n - 3];
    if base == 0.0 {
        return None;
    }
    Some((prices[n - 1] - base) / base)
}

/// Population standard deviation.
pub fn volatility(prices: &[f64]) -> f64 {
    if prices.is_empty() {
        return 0.0;
    }
    let m = mean(prices);
    let variance = prices.iter().map(|p| (p - m).powi(2)).sum::<f64>() / prices.len() as f64;
    variance.sqrt()
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

pub fn change_percent(predicted: f64, current: f64) -> Result<f64, PredictionError> {
    if current == 0.0 {
        return Err(PredictionError::ZeroCurrentPrice);
    }
    Ok((predicted - current) / current * 100.0)
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Build the moving-average prediction for an already-canonical symbol.
pub fn predict(
    symbol: &str,
    prices: Vec<f64>,
    now: DateTime<Utc>,
) -> Result<Prediction, PredictionError> {
    let current_price = *prices.last().ok_or(PredictionError::EmptySeries)?;
    let predicted = moving_average(&prices, PREDICTION_WINDOW)?;
    let change = change_percent(predicted, current_price)?;
    if !predicted.is_finite() || !change.is_finite() {
        return Err(PredictionError::NonFinite);
    }

    Ok(Prediction {
        symbol: symbol.to_string(),
        current_price,
        predicted_price: round2(predicted),
        change_percent: round2(change),
        confidence: confidence(&prices),
        historical_prices: prices,
        prediction_method: MOVING_AVERAGE_METHOD.to_string(),
        timestamp: now,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const AAPL: [f64; 5] = [150.0, 152.5, 151.8, 153.2, 154.1];

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_moving_average_uses_last_window() {
        let avg = moving_average(&[100.0, 102.0, 104.0, 103.0, 105.0], 3).unwrap();
        assert_close(avg, (104.0 + 103.0 + 105.0) / 3.0);
    }

    #[test]
    fn test_moving_average_short_series_uses_all() {
        assert_close(moving_average(&[10.0, 20.0], 3).unwrap(), 15.0);
        assert_close(moving_average(&[42.0], 3).unwrap(), 42.0);
    }

    #[test]
    fn test_moving_average_exact_window() {
        assert_close(moving_average(&[1.0, 2.0, 6.0], 3).unwrap(), 3.0);
    }

    #[test]
    fn test_moving_average_rejects_degenerate_input() {
        assert_eq!(moving_average(&[], 3), Err(PredictionError::EmptySeries));
        assert_eq!(moving_average(&[1.0], 0), Err(PredictionError::ZeroWindow));
    }

    #[test]
    fn test_moving_average_window_one_is_last_price() {
        assert_close(moving_average(&AAPL, 1).unwrap(), 154.1);
    }

    #[test]
    fn test_confidence_floor_for_short_series() {
        assert_eq!(confidence(&[100.0]), 60);
        assert_eq!(confidence(&[100.0, 250.0]), 60);
    }

    #[test]
    fn test_confidence_aapl() {
        assert_eq!(confidence(&AAPL), 73);
    }

    #[test]
    fn test_confidence_flat_series_is_base() {
        assert_eq!(confidence(&[50.0; 10]), 75);
    }

    #[test]
    fn test_confidence_always_in_bounds() {
        let series: Vec<Vec<f64>> = vec![
            vec![0.0, 0.0, 0.0],
            vec![0.0, 0.0, 5.0],
            vec![1.0, 1000.0, 1.0, 1000.0],
            vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
            vec![3218.9, 3212.3, 3208.7],
            vec![0.01, 0.02, 0.01],
        ];
        for prices in series {
            let c = confidence(&prices);
            assert!((60..=95).contains(&c), "{:?} scored {}", prices, c);
        }
    }

    #[test]
    fn test_confidence_zero_mean_does_not_panic() {
        assert_eq!(confidence(&[0.0, 0.0, 0.0, 0.0]), 60);
    }

    #[test]
    fn test_zero_third_last_price_takes_trend_floor() {
        assert_eq!(recent_trend(&[0.0, 1.0, 1.0]), None);
        assert_close(trend_factor(&[0.0, 1.0, 1.0]), TREND_FLOOR);
    }

    #[test]
    fn test_confidence_non_increasing_in_volatility() {
        // Same mean (100), same third-last and last price, so same trend.
        let calm = [98.0, 102.0, 100.0, 100.0, 100.0];
        let wild = [90.0, 110.0, 100.0, 100.0, 100.0];
        assert_close(mean(&calm), mean(&wild));
        assert!(volatility(&wild) > volatility(&calm));
        assert!(confidence(&wild) <= confidence(&calm));
        assert!(volatility_factor(&wild) < volatility_factor(&calm));
    }

    #[test]
    fn test_confidence_non_increasing_in_trend() {
        let flat = [100.0, 100.0, 100.0];
        let rising = [100.0, 100.0, 160.0];
        assert!(trend_factor(&rising) < trend_factor(&flat));
        assert!(confidence(&rising) <= confidence(&flat));
    }

    #[test]
    fn test_change_percent() {
        assert_close(change_percent(110.0, 100.0).unwrap(), 10.0);
        assert_eq!(change_percent(1.0, 0.0), Err(PredictionError::ZeroCurrentPrice));
    }

    #[test]
    fn test_predict_aapl() {
        let now = Utc::now();
        let prediction = predict("AAPL", AAPL.to_vec(), now).unwrap();

        assert_eq!(prediction.symbol, "AAPL");
        assert_eq!(prediction.current_price, 154.1);
        assert_eq!(prediction.predicted_price, 153.03);
        assert_eq!(prediction.change_percent, -0.69);
        assert_eq!(prediction.confidence, 73);
        assert_eq!(prediction.historical_prices, AAPL.to_vec());
        assert_eq!(prediction.prediction_method, "3-day moving average");
        assert_eq!(prediction.timestamp, now);
    }

    #[test]
    fn test_predict_rejects_zero_current_price() {
        let result = predict("ZERO", vec![1.0, 2.0, 0.0], Utc::now());
        assert_eq!(result.unwrap_err(), PredictionError::ZeroCurrentPrice);
    }

    #[test]
    fn test_predict_rejects_overflowing_prices() {
        let result = predict("HUGE", vec![1e308; 3], Utc::now());
        assert_eq!(result.unwrap_err(), PredictionError::NonFinite);
    }

    #[test]
    fn test_predict_rejects_empty_series() {
        let result = predict("NONE", vec![], Utc::now());
        assert_eq!(result.unwrap_err(), PredictionError::EmptySeries);
    }
}
