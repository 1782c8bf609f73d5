//! Dataset profiling: one pass over a `PredictionData` producing the
//! `DataCharacteristics` consumed by candidate filtering and fit evaluation.
//!
//! All detectors degrade gracefully: a series too short for a statistic
//! yields a neutral/absent field, never an error. Detection thresholds are
//! deliberately permissive screens, not hypothesis tests; downstream scoring
//! tolerates false positives better than missing structure.

use crate::domain::{
    DataCharacteristics, PredictionData, Seasonality, Trend, TrendDirection,
};
use crate::math::{index_line_fit, mean, pearson_correlation, population_variance, std_dev, value_range};

/// Seasonality detection needs at least two weekly cycles.
const MIN_SEASONALITY_POINTS: usize = 14;

/// Candidate seasonal periods, in points (daily data: week..quarter).
const SEASONALITY_PERIODS: [usize; 4] = [7, 14, 30, 90];

/// Minimum average lagged autocorrelation to declare seasonality.
const SEASONALITY_MIN_CORRELATION: f64 = 0.3;

/// Trend detection needs a minimally identified regression.
const MIN_TREND_POINTS: usize = 10;

/// Minimum r² of the index regression to declare a trend.
const TREND_MIN_R2: f64 = 0.3;

/// Deviation threshold for outlier counting, in standard deviations.
const OUTLIER_SIGMA: f64 = 2.0;

/// Profile a dataset. Pure and deterministic for identical input.
pub fn analyze(data: &PredictionData) -> DataCharacteristics {
    let values = data.primary_values();
    let is_time_series = data.is_time_series();

    // Seasonality/trend only make sense on ordered series.
    let seasonality = if is_time_series {
        detect_seasonality(&values)
    } else {
        None
    };
    let trend = if is_time_series {
        detect_trend(&values)
    } else {
        None
    };

    DataCharacteristics {
        data_type: data.data_type,
        data_size: data.points.len(),
        feature_count: data.feature_names.len(),
        target_variance: population_variance(&values),
        target_range: value_range(&values),
        missing_value_rate: missing_value_rate(data),
        is_time_series,
        seasonality,
        trend,
        noise_level: noise_level(&values),
        linearity: linearity(data, &values),
        outlier_rate: outlier_rate(&values),
        frequency: data.frequency.clone(),
        time_horizon: data.points.len(),
    }
}

/// Fraction of missing feature slots.
///
/// The denominator counts one slot per point plus one per feature value, so
/// a dataset without features reports 0 rather than dividing by nothing.
fn missing_value_rate(data: &PredictionData) -> f64 {
    let mut total = 0usize;
    let mut missing = 0usize;

    for point in &data.points {
        total += 1;
        total += point.features.len();
        missing += point
            .features
            .values()
            .filter(|slot| match slot {
                None => true,
                Some(v) => v.is_nan(),
            })
            .count();
    }

    if total > 0 {
        missing as f64 / total as f64
    } else {
        0.0
    }
}

/// Detect a repeating period by averaged lagged autocorrelation.
///
/// Tries each candidate period the series is at least twice as long as,
/// keeps the one with the highest average correlation, and declares
/// seasonality only when that average clears the threshold.
pub fn detect_seasonality(values: &[f64]) -> Option<Seasonality> {
    if values.len() < MIN_SEASONALITY_POINTS {
        return None;
    }

    let mut best_period = 0usize;
    let mut best_correlation = 0.0f64;

    for &period in &SEASONALITY_PERIODS {
        if values.len() >= period * 2 {
            let correlation = seasonal_correlation(values, period);
            if correlation > best_correlation {
                best_correlation = correlation;
                best_period = period;
            }
        }
    }

    if best_correlation > SEASONALITY_MIN_CORRELATION {
        Some(Seasonality {
            period: best_period,
            strength: best_correlation,
        })
    } else {
        None
    }
}

/// Average autocorrelation at multiples of `period`.
///
/// Samples lags `period, 2·period, ...` strictly below
/// `min(3·period, n − period)`, so at most two lag multiples contribute.
fn seasonal_correlation(values: &[f64], period: usize) -> f64 {
    let n = values.len();
    if n < period * 2 {
        return 0.0;
    }

    let limit = (period * 3).min(n - period);
    let mut correlations = Vec::new();
    let mut lag = period;
    while lag < limit {
        correlations.push(pearson_correlation(&values[..n - lag], &values[lag..]));
        lag += period;
    }

    if correlations.is_empty() {
        0.0
    } else {
        correlations.iter().sum::<f64>() / correlations.len() as f64
    }
}

/// Detect monotone drift via an OLS line of value against index.
///
/// Declares a trend only when r² clears the threshold; direction follows the
/// slope sign.
pub fn detect_trend(values: &[f64]) -> Option<Trend> {
    if values.len() < MIN_TREND_POINTS {
        return None;
    }

    let (slope, r2) = index_line_fit(values)?;
    if r2 > TREND_MIN_R2 {
        Some(Trend {
            direction: if slope > 0.0 {
                TrendDirection::Increasing
            } else {
                TrendDirection::Decreasing
            },
            strength: r2,
        })
    } else {
        None
    }
}

/// Variance of first differences relative to variance of raw values.
///
/// Approximates an inverse signal-to-noise ratio: higher means noisier
/// relative to signal. Neutral 1.0 below two points, 0 on a constant series.
pub fn noise_level(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 1.0;
    }

    let differences: Vec<f64> = values.windows(2).map(|w| w[1] - w[0]).collect();
    let noise_variance = population_variance(&differences);
    let signal_variance = population_variance(values);

    if signal_variance > 0.0 {
        noise_variance / signal_variance
    } else {
        0.0
    }
}

/// |Pearson correlation| between the first declared feature and the target.
///
/// Missing feature slots contribute 0.0, matching the neutral treatment of
/// absent values elsewhere.
fn linearity(data: &PredictionData, values: &[f64]) -> f64 {
    let Some(feature_name) = data.feature_names.first() else {
        return 0.0;
    };
    if data.points.is_empty() {
        return 0.0;
    }

    let feature_values: Vec<f64> = data
        .points
        .iter()
        .map(|p| p.features.get(feature_name).copied().flatten().unwrap_or(0.0))
        .collect();

    pearson_correlation(&feature_values, values).abs()
}

/// Fraction of values deviating more than `OUTLIER_SIGMA` standard
/// deviations from the mean.
pub fn outlier_rate(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let m = mean(values);
    let threshold = std_dev(values) * OUTLIER_SIGMA;
    let outliers = values.iter().filter(|v| (**v - m).abs() > threshold).count();
    outliers as f64 / values.len() as f64
}
