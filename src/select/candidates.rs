//! Candidate roster construction and constraint filtering.
//!
//! The roster is a scan of the catalog in registration order, restricted to
//! the task's model family. Forecasting specialists (seasonal/trending) join
//! the roster only when the dataset profile exhibits the matching structure,
//! and time-series rosters require the data to actually be a series.

use crate::catalog::ModelCatalog;
use crate::domain::{
    DataCharacteristics, ModelConstraints, ModelInfo, ModelTask, SeriesSpecialization, TaskType,
};

/// Ordered list of admissible catalog ids for one selection call.
pub fn candidate_models(
    task: TaskType,
    profile: &DataCharacteristics,
    constraints: &ModelConstraints,
    catalog: &ModelCatalog,
) -> Vec<String> {
    catalog
        .iter()
        .filter(|info| serves_task(info, task, profile))
        .filter(|info| admissible(info, profile, constraints))
        .map(|info| info.id.clone())
        .collect()
}

fn serves_task(info: &ModelInfo, task: TaskType, profile: &DataCharacteristics) -> bool {
    match task {
        TaskType::Timeseries => {
            if info.task != ModelTask::Forecasting || !profile.is_time_series {
                return false;
            }
            match info.specialization {
                SeriesSpecialization::General => true,
                SeriesSpecialization::Seasonal => profile.seasonality.is_some(),
                SeriesSpecialization::Trending => profile.trend.is_some(),
            }
        }
        TaskType::AnomalyDetection => info.task == ModelTask::AnomalyDetection,
        TaskType::Classification => info.task == ModelTask::Classification,
        TaskType::Regression => info.task == ModelTask::Regression,
    }
}

/// A candidate is dropped if any bound is violated. Absent bounds pass.
fn admissible(
    info: &ModelInfo,
    profile: &DataCharacteristics,
    constraints: &ModelConstraints,
) -> bool {
    if let Some(max_time) = constraints.max_training_time_ms {
        if info.avg_training_time_ms > max_time {
            return false;
        }
    }
    if let Some(limit) = constraints.memory_limit_mb {
        if info.memory_requirement_mb > limit {
            return false;
        }
    }
    if let Some(threshold) = constraints.accuracy_threshold {
        if info.expected_accuracy < threshold {
            return false;
        }
    }
    if profile.data_size < info.min_data_points {
        return false;
    }
    if constraints.real_time_required && !info.supports_real_time {
        return false;
    }
    if let Some(allowed) = &constraints.allowed_models {
        if !allowed.iter().any(|id| id == &info.id) {
            return false;
        }
    }
    true
}
