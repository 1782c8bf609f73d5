//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during a selection call
//! - exported to JSON for downstream tooling
//! - rendered in terminal reports

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Shape of the input dataset, as declared by the producer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    Timeseries,
    CrossSectional,
    Stream,
}

/// Prediction task family requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    Timeseries,
    AnomalyDetection,
    Classification,
    Regression,
}

impl TaskType {
    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            TaskType::Timeseries => "time-series",
            TaskType::AnomalyDetection => "anomaly-detection",
            TaskType::Classification => "classification",
            TaskType::Regression => "regression",
        }
    }
}

/// Model family a catalog entry serves.
///
/// Forecasting entries answer `TaskType::Timeseries` requests; the remaining
/// families map one-to-one onto task types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelTask {
    Forecasting,
    AnomalyDetection,
    Classification,
    Regression,
}

/// Data-shape specialization of a forecasting entry.
///
/// `Seasonal` and `Trending` entries are only admissible when the analyzed
/// dataset actually exhibits that structure; `General` entries always are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesSpecialization {
    General,
    Seasonal,
    Trending,
}

/// A single observation: a scalar or fixed-length vector value.
///
/// Serialized untagged so exports read as plain JSON numbers/arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PointValue {
    Scalar(f64),
    Vector(Vec<f64>),
}

impl PointValue {
    /// The primary scalar used by all univariate statistics: the value itself,
    /// or the first element of a vector value.
    pub fn primary(&self) -> f64 {
        match self {
            PointValue::Scalar(v) => *v,
            PointValue::Vector(v) => v.first().copied().unwrap_or(f64::NAN),
        }
    }
}

/// One timestamped data point with optional named feature values.
///
/// A feature slot holding `None` or NaN counts as missing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPoint {
    pub timestamp: DateTime<Utc>,
    pub value: PointValue,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub features: BTreeMap<String, Option<f64>>,
}

/// An identified collection of data points handed to the engine.
///
/// Invariant: all points share one value shape (scalar vs fixed-length vector).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionData {
    pub id: String,
    pub data_type: Option<DataType>,
    /// Sampling frequency label (e.g. "daily"), informational only.
    pub frequency: Option<String>,
    /// Declared feature names, in declaration order.
    pub feature_names: Vec<String>,
    pub points: Vec<DataPoint>,
}

impl PredictionData {
    /// Primary scalar series, in point order.
    pub fn primary_values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value.primary()).collect()
    }

    pub fn is_time_series(&self) -> bool {
        self.data_type == Some(DataType::Timeseries)
    }
}

/// The prediction task a selection call serves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionTask {
    pub id: String,
    pub task_type: TaskType,
}

/// Caller-supplied resource/accuracy bounds. Absent bounds impose nothing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelConstraints {
    /// Upper bound on average training time (ms).
    pub max_training_time_ms: Option<f64>,
    /// Upper bound on memory requirement (MB).
    pub memory_limit_mb: Option<f64>,
    /// Lower bound on expected accuracy.
    pub accuracy_threshold: Option<f64>,
    /// Require streaming/real-time capable models.
    pub real_time_required: bool,
    /// If set, only these model ids are admissible.
    pub allowed_models: Option<Vec<String>>,
}

/// Detected seasonal structure. Presence means detection fired.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Seasonality {
    /// Winning candidate period, in points.
    pub period: usize,
    /// Average lagged autocorrelation at that period.
    pub strength: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
}

/// Detected monotone drift. Presence means the fit cleared the r² threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    pub direction: TrendDirection,
    /// r² of the index-vs-value regression.
    pub strength: f64,
}

/// Statistical profile of one dataset, computed once per selection call.
///
/// Call-scoped and never persisted; short series degrade to neutral fields
/// rather than erroring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataCharacteristics {
    pub data_type: Option<DataType>,
    pub data_size: usize,
    pub feature_count: usize,
    pub target_variance: f64,
    pub target_range: f64,
    pub missing_value_rate: f64,
    pub is_time_series: bool,
    pub seasonality: Option<Seasonality>,
    pub trend: Option<Trend>,
    /// Variance of first differences over variance of raw values (inverse SNR).
    pub noise_level: f64,
    /// |Pearson correlation| between the first declared feature and the target.
    pub linearity: f64,
    /// Fraction of values beyond two standard deviations from the mean.
    pub outlier_rate: f64,
    pub frequency: Option<String>,
    pub time_horizon: usize,
}

/// Catalog entry describing one selectable model.
///
/// Populated once at engine construction, read-only afterwards. All entries
/// are opaque metadata for selection purposes; none is an executable model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    pub name: String,
    pub algorithm: String,
    pub task: ModelTask,
    /// Relative model complexity, 0–1.
    pub complexity: f64,
    /// Expected accuracy on suitable data, 0–1.
    pub expected_accuracy: f64,
    pub avg_training_time_ms: f64,
    pub memory_requirement_mb: f64,
    /// Minimum dataset size the model needs to train sensibly.
    pub min_data_points: usize,
    pub supports_real_time: bool,
    /// Parameter stability under resampling, 0–1.
    pub stability: f64,
    pub specialization: SeriesSpecialization,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverfittingRisk {
    Low,
    Medium,
    High,
}

impl OverfittingRisk {
    pub fn display_name(self) -> &'static str {
        match self {
            OverfittingRisk::Low => "low",
            OverfittingRisk::Medium => "medium",
            OverfittingRisk::High => "high",
        }
    }
}

/// Residual-spread summary.
///
/// Only `std_error` is computed from the data at selection time; the
/// remaining moments are conservative placeholders until a trained model
/// exists to produce genuine residuals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResidualSummary {
    pub mean_error: f64,
    pub std_error: f64,
    pub skewness: f64,
    pub kurtosis: f64,
    pub autocorrelation: f64,
    pub heteroscedastic: bool,
}

/// Stability estimates for one candidate.
///
/// `parameter_stability` comes from the catalog; the rest are conservative
/// constants pending an empirical backtesting estimator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StabilityMetrics {
    pub parameter_stability: f64,
    pub prediction_stability: f64,
    pub temporal_stability: f64,
    pub noise_sensitivity: f64,
    pub complexity_sensitivity: f64,
}

/// Coarse analytic bias/variance decomposition (not a fitted curve).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BiasVariance {
    pub bias: f64,
    pub variance: f64,
    pub irreducible_error: f64,
    pub total_error: f64,
}

/// Per-candidate evaluation result. Created fresh per call, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelFitAssessment {
    pub model_id: String,
    /// Engine-estimated suitability, 0–1 (not a trained-model accuracy).
    pub goodness_of_fit: f64,
    pub complexity: f64,
    pub training_time_ms: f64,
    pub memory_usage_mb: f64,
    pub overfitting_risk: OverfittingRisk,
    pub residuals: ResidualSummary,
    pub stability: StabilityMetrics,
    pub bias_variance: BiasVariance,
    pub recommendations: Vec<String>,
}

/// A runner-up candidate carried alongside the winner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlternativeModel {
    pub id: String,
    pub name: String,
    pub algorithm: String,
    /// The candidate's goodness-of-fit at evaluation time.
    pub score: f64,
}

/// The engine's output: the chosen model plus up to three alternatives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSelection {
    pub model_id: String,
    pub model_name: String,
    pub algorithm: String,
    pub confidence: f64,
    pub estimated_latency_ms: f64,
    pub estimated_accuracy: f64,
    pub alternatives: Vec<AlternativeModel>,
}

/// A saved selection file (JSON): one run's task, profile, and result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionFile {
    pub tool: String,
    pub generated_at: DateTime<Utc>,
    pub task: PredictionTask,
    pub profile: DataCharacteristics,
    pub selection: ModelSelection,
}
