//! Model catalog: a validated, insertion-ordered registry of model metadata.
//!
//! The catalog is populated once when the engine is constructed and is
//! read-only afterwards. Iteration order is registration order, which the
//! candidate filter relies on for deterministic rosters.

use std::collections::HashMap;

use crate::domain::{ModelInfo, ModelTask, SeriesSpecialization};
use crate::error::SelectError;

#[derive(Debug, Clone, Default)]
pub struct ModelCatalog {
    entries: Vec<ModelInfo>,
    index: HashMap<String, usize>,
}

impl ModelCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a model, validating its metadata.
    ///
    /// Rejects duplicate ids, out-of-range unit-interval scores, and
    /// non-finite resource figures.
    pub fn register(&mut self, entry: ModelInfo) -> Result<(), SelectError> {
        if entry.id.is_empty() {
            return Err(SelectError::invalid("Model id must not be empty."));
        }
        if self.index.contains_key(&entry.id) {
            return Err(SelectError::invalid(format!(
                "Duplicate model id: {}",
                entry.id
            )));
        }
        for (label, value) in [
            ("complexity", entry.complexity),
            ("expected_accuracy", entry.expected_accuracy),
            ("stability", entry.stability),
        ] {
            if !(value.is_finite() && (0.0..=1.0).contains(&value)) {
                return Err(SelectError::invalid(format!(
                    "Model {}: {label} must be in [0, 1], got {value}.",
                    entry.id
                )));
            }
        }
        for (label, value) in [
            ("avg_training_time_ms", entry.avg_training_time_ms),
            ("memory_requirement_mb", entry.memory_requirement_mb),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(SelectError::invalid(format!(
                    "Model {}: {label} must be finite and non-negative, got {value}.",
                    entry.id
                )));
            }
        }

        self.index.insert(entry.id.clone(), self.entries.len());
        self.entries.push(entry);
        Ok(())
    }

    pub fn lookup(&self, id: &str) -> Option<&ModelInfo> {
        self.index.get(id).map(|&i| &self.entries[i])
    }

    /// Entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ModelInfo> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The built-in reference roster, spanning forecasting, anomaly
    /// detection, classification, and regression families.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for entry in builtin_entries() {
            // The roster is static; registration cannot fail.
            catalog
                .register(entry)
                .expect("built-in catalog entries are valid");
        }
        catalog
    }
}

struct EntrySpec {
    id: &'static str,
    name: &'static str,
    algorithm: &'static str,
    task: ModelTask,
    specialization: SeriesSpecialization,
    complexity: f64,
    expected_accuracy: f64,
    avg_training_time_ms: f64,
    memory_requirement_mb: f64,
    min_data_points: usize,
    supports_real_time: bool,
    stability: f64,
}

impl EntrySpec {
    fn build(self) -> ModelInfo {
        ModelInfo {
            id: self.id.to_string(),
            name: self.name.to_string(),
            algorithm: self.algorithm.to_string(),
            task: self.task,
            complexity: self.complexity,
            expected_accuracy: self.expected_accuracy,
            avg_training_time_ms: self.avg_training_time_ms,
            memory_requirement_mb: self.memory_requirement_mb,
            min_data_points: self.min_data_points,
            supports_real_time: self.supports_real_time,
            stability: self.stability,
            specialization: self.specialization,
        }
    }
}

fn builtin_entries() -> Vec<ModelInfo> {
    use ModelTask::*;
    use SeriesSpecialization::*;

    let specs = [
        // Forecasting. The seasonal/trending specialists are only admitted
        // when the dataset profile exhibits the matching structure.
        EntrySpec {
            id: "time_series_exponential_smoothing",
            name: "Exponential smoothing",
            algorithm: "exponential_smoothing",
            task: Forecasting,
            specialization: General,
            complexity: 0.3,
            expected_accuracy: 0.8,
            avg_training_time_ms: 100.0,
            memory_requirement_mb: 50.0,
            min_data_points: 10,
            supports_real_time: true,
            stability: 0.9,
        },
        EntrySpec {
            id: "time_series_arima",
            name: "ARIMA",
            algorithm: "arima",
            task: Forecasting,
            specialization: General,
            complexity: 0.7,
            expected_accuracy: 0.85,
            avg_training_time_ms: 500.0,
            memory_requirement_mb: 200.0,
            min_data_points: 50,
            supports_real_time: false,
            stability: 0.7,
        },
        EntrySpec {
            id: "time_series_seasonal_decomposition",
            name: "Seasonal decomposition",
            algorithm: "seasonal_decomposition",
            task: Forecasting,
            specialization: Seasonal,
            complexity: 0.5,
            expected_accuracy: 0.82,
            avg_training_time_ms: 300.0,
            memory_requirement_mb: 150.0,
            min_data_points: 28,
            supports_real_time: false,
            stability: 0.8,
        },
        EntrySpec {
            id: "time_series_trend_model",
            name: "Trend projection",
            algorithm: "trend_projection",
            task: Forecasting,
            specialization: Trending,
            complexity: 0.2,
            expected_accuracy: 0.75,
            avg_training_time_ms: 80.0,
            memory_requirement_mb: 40.0,
            min_data_points: 10,
            supports_real_time: true,
            stability: 0.85,
        },
        // Anomaly detection.
        EntrySpec {
            id: "statistical_anomaly_detection",
            name: "Statistical anomaly detection",
            algorithm: "statistical",
            task: AnomalyDetection,
            specialization: General,
            complexity: 0.4,
            expected_accuracy: 0.9,
            avg_training_time_ms: 200.0,
            memory_requirement_mb: 100.0,
            min_data_points: 20,
            supports_real_time: true,
            stability: 0.8,
        },
        EntrySpec {
            id: "isolation_forest",
            name: "Isolation forest",
            algorithm: "isolation_forest",
            task: AnomalyDetection,
            specialization: General,
            complexity: 0.6,
            expected_accuracy: 0.85,
            avg_training_time_ms: 800.0,
            memory_requirement_mb: 250.0,
            min_data_points: 100,
            supports_real_time: false,
            stability: 0.75,
        },
        // Classification.
        EntrySpec {
            id: "random_forest_classifier",
            name: "Random forest classifier",
            algorithm: "random_forest",
            task: Classification,
            specialization: General,
            complexity: 0.6,
            expected_accuracy: 0.85,
            avg_training_time_ms: 1000.0,
            memory_requirement_mb: 300.0,
            min_data_points: 50,
            supports_real_time: false,
            stability: 0.9,
        },
        EntrySpec {
            id: "gradient_boosting_classifier",
            name: "Gradient boosting classifier",
            algorithm: "gradient_boosting",
            task: Classification,
            specialization: General,
            complexity: 0.8,
            expected_accuracy: 0.9,
            avg_training_time_ms: 1500.0,
            memory_requirement_mb: 400.0,
            min_data_points: 50,
            supports_real_time: false,
            stability: 0.7,
        },
        EntrySpec {
            id: "logistic_regression",
            name: "Logistic regression",
            algorithm: "logistic_regression",
            task: Classification,
            specialization: General,
            complexity: 0.3,
            expected_accuracy: 0.8,
            avg_training_time_ms: 100.0,
            memory_requirement_mb: 60.0,
            min_data_points: 30,
            supports_real_time: true,
            stability: 0.9,
        },
        // Regression.
        EntrySpec {
            id: "linear_regression",
            name: "Linear regression",
            algorithm: "linear_regression",
            task: Regression,
            specialization: General,
            complexity: 0.2,
            expected_accuracy: 0.75,
            avg_training_time_ms: 50.0,
            memory_requirement_mb: 30.0,
            min_data_points: 10,
            supports_real_time: true,
            stability: 0.95,
        },
        EntrySpec {
            id: "random_forest_regressor",
            name: "Random forest regressor",
            algorithm: "random_forest",
            task: Regression,
            specialization: General,
            complexity: 0.6,
            expected_accuracy: 0.85,
            avg_training_time_ms: 1000.0,
            memory_requirement_mb: 300.0,
            min_data_points: 50,
            supports_real_time: false,
            stability: 0.9,
        },
        EntrySpec {
            id: "gradient_boosting_regressor",
            name: "Gradient boosting regressor",
            algorithm: "gradient_boosting",
            task: Regression,
            specialization: General,
            complexity: 0.8,
            expected_accuracy: 0.9,
            avg_training_time_ms: 1500.0,
            memory_requirement_mb: 400.0,
            min_data_points: 50,
            supports_real_time: false,
            stability: 0.7,
        },
    ];

    specs.into_iter().map(EntrySpec::build).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_roster_passes_registration() {
        let mut catalog = ModelCatalog::new();
        for entry in builtin_entries() {
            catalog.register(entry).unwrap();
        }
        assert_eq!(catalog.len(), ModelCatalog::builtin().len());
    }

    #[test]
    fn lookup_finds_registered_entry() {
        let catalog = ModelCatalog::builtin();
        let arima = catalog.lookup("time_series_arima").unwrap();
        assert_eq!(arima.min_data_points, 50);
        assert!((arima.complexity - 0.7).abs() < 1e-12);
        assert!(catalog.lookup("nonexistent").is_none());
    }

    #[test]
    fn iteration_preserves_registration_order() {
        let catalog = ModelCatalog::builtin();
        let ids: Vec<&str> = catalog.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids[0], "time_series_exponential_smoothing");
        assert_eq!(ids[1], "time_series_arima");
        // Specialists come after the general forecasting entries.
        assert_eq!(ids[2], "time_series_seasonal_decomposition");
        assert_eq!(ids[3], "time_series_trend_model");
    }

    #[test]
    fn register_rejects_duplicate_id() {
        let mut catalog = ModelCatalog::new();
        let entry = ModelCatalog::builtin()
            .lookup("time_series_arima")
            .unwrap()
            .clone();
        catalog.register(entry.clone()).unwrap();
        let err = catalog.register(entry).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn register_rejects_out_of_range_scores() {
        let mut catalog = ModelCatalog::new();
        let mut entry = ModelCatalog::builtin()
            .lookup("time_series_arima")
            .unwrap()
            .clone();
        entry.id = "bad".to_string();
        entry.complexity = 1.5;
        assert!(catalog.register(entry).is_err());
    }
}
