use crate::models::PricePoint;

/// Ordinary least squares fit of `values` against x = 0..n-1.
/// Returns (slope m, intercept b) for y = m*x + b.
///
/// Uses iterator folds rather than mutable loops.
pub fn regression_trend(values: &[f64]) -> (f64, f64) {
    let n = values.len();
    if n == 0 {
        return (0.0, 0.0);
    }
    if n == 1 {
        return (0.0, values[0]);
    }

    let n_f = n as f64;

    // Fold over enumerated points to get sums.
    let (sum_x, sum_y, sum_xy, sum_x2) = values
        .iter()
        .enumerate()
        .fold((0.0, 0.0, 0.0, 0.0), |(sx, sy, sxy, sx2), (i, &y)| {
            let x = i as f64;
            (sx + x, sy + y, sxy + x * y, sx2 + x * x)
        });

    let denom = n_f * sum_x2 - sum_x * sum_x;
    if denom == 0.0 {
        // fallback: horizontal line at mean
        return (0.0, sum_y / n_f);
    }

    let m = (n_f * sum_xy - sum_x * sum_y) / denom;
    let b = (sum_y - m * sum_x) / n_f;

    (m, b)
}

/// Recomputes the walk-forward prediction for every point in the series.
///
/// For index `i`, the prediction is an OLS line fitted to the prices at
/// indices `0..i-1` (never `i` itself or later), evaluated at position `i`.
/// Indices 0 and 1 have too little history and stay `None`.
///
/// Every prediction is refitted from scratch on every call, including ones
/// whose inputs did not change, so the output is a pure function of the
/// price sequence. That makes a full pass O(n^2), which is fine for a
/// single symbol's daily series.
pub fn recompute_predictions(points: &mut [PricePoint]) {
    let prices: Vec<f64> = points.iter().map(|p| p.price).collect();

    for (i, point) in points.iter_mut().enumerate() {
        point.prediction = if i > 1 {
            let (m, b) = regression_trend(&prices[..i]);
            Some(m * i as f64 + b)
        } else {
            None
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn series(prices: &[f64]) -> Vec<PricePoint> {
        prices
            .iter()
            .enumerate()
            .map(|(i, &price)| {
                PricePoint::from_observation(
                    NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
                        + chrono::Duration::days(i as i64),
                    price,
                )
            })
            .collect()
    }

    #[test]
    fn regression_trend_fits_exact_line() {
        let (m, b) = regression_trend(&[100.0, 102.0]);
        assert!((m - 2.0).abs() < 1e-9);
        assert!((b - 100.0).abs() < 1e-9);
    }

    #[test]
    fn regression_trend_handles_short_inputs() {
        assert_eq!(regression_trend(&[]), (0.0, 0.0));
        assert_eq!(regression_trend(&[42.0]), (0.0, 42.0));
    }

    #[test]
    fn first_two_predictions_are_absent() {
        let mut points = series(&[100.0, 102.0, 101.0, 105.0]);
        recompute_predictions(&mut points);

        assert!(points[0].prediction.is_none());
        assert!(points[1].prediction.is_none());
        assert!(points[2].prediction.is_some());
        assert!(points[3].prediction.is_some());
    }

    #[test]
    fn predictions_match_hand_computed_ols() {
        let mut points = series(&[100.0, 102.0, 101.0, 105.0]);
        recompute_predictions(&mut points);

        // Fit on {100, 102} at x = {0, 1}, evaluated at 2: 100 + 2*2 = 104.
        assert!((points[2].prediction.unwrap() - 104.0).abs() < 1e-9);

        // Fit on {100, 102, 101}: slope 0.5, intercept 100.5, at 3: 102.
        assert!((points[3].prediction.unwrap() - 102.0).abs() < 1e-9);
    }

    #[test]
    fn prediction_ignores_current_and_later_prices() {
        let mut a = series(&[100.0, 102.0, 101.0, 105.0]);
        let mut b = series(&[100.0, 102.0, 999.0, -5.0]);
        recompute_predictions(&mut a);
        recompute_predictions(&mut b);

        // prediction[2] depends only on prices at 0 and 1.
        assert_eq!(a[2].prediction, b[2].prediction);
    }

    #[test]
    fn recompute_is_deterministic_and_discards_stale_values() {
        let mut points = series(&[100.0, 102.0, 101.0, 105.0]);
        points[2].prediction = Some(12345.0);

        recompute_predictions(&mut points);
        let first: Vec<Option<f64>> = points.iter().map(|p| p.prediction).collect();

        recompute_predictions(&mut points);
        let second: Vec<Option<f64>> = points.iter().map(|p| p.prediction).collect();

        assert_eq!(first, second);
        assert!((points[2].prediction.unwrap() - 104.0).abs() < 1e-9);
    }
}
