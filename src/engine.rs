//! The selection engine: catalog + analysis + filtering + ranking behind a
//! small call/return API.
//!
//! The catalog is injected at construction and never mutated afterwards.
//! Candidate evaluation is independent per candidate, so it fans out over
//! rayon and merges results back in candidate order; ranking therefore sees
//! the same order regardless of worker scheduling. The only shared mutable
//! state is the append-only selection history.

use std::sync::{Mutex, PoisonError};

use rayon::prelude::*;

use crate::analysis::analyze;
use crate::catalog::ModelCatalog;
use crate::domain::{
    DataCharacteristics, ModelConstraints, ModelFitAssessment, ModelSelection, PredictionData,
    PredictionTask,
};
use crate::error::SelectError;
use crate::select::{candidate_models, assess_fit, select_best, SelectionOutcome, SkippedCandidate};

/// All computed outputs of a single selection call, for reporting.
#[derive(Debug, Clone)]
pub struct SelectionRun {
    pub profile: DataCharacteristics,
    pub outcome: SelectionOutcome,
}

pub struct SelectionEngine {
    catalog: ModelCatalog,
    /// Append-only log of past selections, in call order. Unbounded; callers
    /// needing bounded memory impose their own retention.
    history: Mutex<Vec<ModelSelection>>,
}

impl SelectionEngine {
    pub fn new(catalog: ModelCatalog) -> Self {
        Self {
            catalog,
            history: Mutex::new(Vec::new()),
        }
    }

    pub fn with_builtin_catalog() -> Self {
        Self::new(ModelCatalog::builtin())
    }

    pub fn catalog(&self) -> &ModelCatalog {
        &self.catalog
    }

    /// Pick the best-suited model for the given data, task, and constraints.
    ///
    /// Fails with `NoEligibleModel` when constraint filtering (or skipped
    /// evaluations) leave no candidate; never returns a partial selection.
    pub fn select_optimal_model(
        &self,
        data: &PredictionData,
        task: &PredictionTask,
        constraints: &ModelConstraints,
    ) -> Result<ModelSelection, SelectError> {
        Ok(self.select_with_diagnostics(data, task, constraints)?.outcome.selection)
    }

    /// Like `select_optimal_model`, but returns the dataset profile, every
    /// candidate assessment, and the skipped-candidate log alongside the
    /// selection.
    pub fn select_with_diagnostics(
        &self,
        data: &PredictionData,
        task: &PredictionTask,
        constraints: &ModelConstraints,
    ) -> Result<SelectionRun, SelectError> {
        let profile = analyze(data);
        let candidates = candidate_models(task.task_type, &profile, constraints, &self.catalog);
        if candidates.is_empty() {
            return Err(SelectError::NoEligibleModel {
                task: task.task_type,
            });
        }

        // Fan out per candidate; collect() preserves candidate order, which
        // tie-breaking and alternative truncation depend on.
        let results: Vec<(String, Result<ModelFitAssessment, SelectError>)> = candidates
            .par_iter()
            .map(|id| (id.clone(), self.assess_candidate(id, data, &profile)))
            .collect();

        let mut assessments = Vec::with_capacity(results.len());
        let mut skipped = Vec::new();
        for (model_id, result) in results {
            match result {
                Ok(assessment) => assessments.push(assessment),
                Err(err) => skipped.push(SkippedCandidate {
                    model_id,
                    reason: err.to_string(),
                }),
            }
        }

        let outcome = select_best(assessments, skipped, task.task_type, &self.catalog)?;

        self.append_history(outcome.selection.clone());
        Ok(SelectionRun { profile, outcome })
    }

    /// Assess a single model against a dataset.
    ///
    /// Fails with `UnknownModel` for an uncataloged id.
    pub fn evaluate_model_fit(
        &self,
        model_id: &str,
        data: &PredictionData,
    ) -> Result<ModelFitAssessment, SelectError> {
        let profile = analyze(data);
        self.assess_candidate(model_id, data, &profile)
    }

    fn assess_candidate(
        &self,
        model_id: &str,
        data: &PredictionData,
        profile: &DataCharacteristics,
    ) -> Result<ModelFitAssessment, SelectError> {
        let info = self
            .catalog
            .lookup(model_id)
            .ok_or_else(|| SelectError::UnknownModel {
                model_id: model_id.to_string(),
            })?;
        Ok(assess_fit(info, data, profile))
    }

    /// Snapshot of the selection history, oldest first.
    pub fn history(&self) -> Vec<ModelSelection> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn append_history(&self, selection: ModelSelection) {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(selection);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DataPoint, DataType, PointValue, TaskType};
    use chrono::{TimeZone, Utc};
    use std::collections::BTreeMap;

    fn make_series(values: Vec<f64>) -> PredictionData {
        let start = Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap();
        PredictionData {
            id: "series".to_string(),
            data_type: Some(DataType::Timeseries),
            frequency: Some("daily".to_string()),
            feature_names: Vec::new(),
            points: values
                .into_iter()
                .enumerate()
                .map(|(i, v)| DataPoint {
                    timestamp: start + chrono::Duration::days(i as i64),
                    value: PointValue::Scalar(v),
                    features: BTreeMap::new(),
                })
                .collect(),
        }
    }

    fn task(task_type: TaskType) -> PredictionTask {
        PredictionTask {
            id: "task-1".to_string(),
            task_type,
        }
    }

    #[test]
    fn tiny_series_has_no_eligible_timeseries_model() {
        let engine = SelectionEngine::with_builtin_catalog();
        let data = make_series(vec![1.0, 2.0, 3.0, 4.0, 5.0]);

        let err = engine
            .select_optimal_model(
                &data,
                &task(TaskType::Timeseries),
                &ModelConstraints::default(),
            )
            .unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn selection_is_deterministic_for_identical_inputs() {
        let engine = SelectionEngine::with_builtin_catalog();
        let values: Vec<f64> = (0..120)
            .map(|i| 100.0 + 10.0 * ((i % 7) as f64) + 0.01 * i as f64)
            .collect();
        let data = make_series(values);
        let constraints = ModelConstraints::default();

        let first = engine
            .select_optimal_model(&data, &task(TaskType::Timeseries), &constraints)
            .unwrap();
        let second = engine
            .select_optimal_model(&data, &task(TaskType::Timeseries), &constraints)
            .unwrap();

        assert_eq!(first.model_id, second.model_id);
        assert_eq!(first.confidence, second.confidence);
        let alt_ids =
            |s: &ModelSelection| s.alternatives.iter().map(|a| a.id.clone()).collect::<Vec<_>>();
        assert_eq!(alt_ids(&first), alt_ids(&second));
    }

    #[test]
    fn seasonal_series_admits_the_seasonal_specialist() {
        let engine = SelectionEngine::with_builtin_catalog();
        let values: Vec<f64> = (0..120).map(|i| 50.0 + 8.0 * ((i % 7) as f64)).collect();
        let data = make_series(values);

        let run = engine
            .select_with_diagnostics(
                &data,
                &task(TaskType::Timeseries),
                &ModelConstraints::default(),
            )
            .unwrap();

        assert!(run.profile.seasonality.is_some());
        assert!(run
            .outcome
            .assessments
            .iter()
            .any(|a| a.model_id == "time_series_seasonal_decomposition"));
        assert!(run.outcome.skipped.is_empty());
    }

    #[test]
    fn history_appends_in_call_order() {
        let engine = SelectionEngine::with_builtin_catalog();
        let data = make_series((0..60).map(|i| 10.0 + i as f64).collect());

        assert!(engine.history().is_empty());
        let first = engine
            .select_optimal_model(
                &data,
                &task(TaskType::Timeseries),
                &ModelConstraints::default(),
            )
            .unwrap();
        let second = engine
            .select_optimal_model(
                &data,
                &task(TaskType::Regression),
                &ModelConstraints::default(),
            )
            .unwrap();

        let history = engine.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].model_id, first.model_id);
        assert_eq!(history[1].model_id, second.model_id);
    }

    #[test]
    fn evaluate_model_fit_rejects_unknown_id() {
        let engine = SelectionEngine::with_builtin_catalog();
        let data = make_series(vec![1.0; 30]);

        let err = engine.evaluate_model_fit("no_such_model", &data).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn evaluate_model_fit_returns_assessment_for_known_id() {
        let engine = SelectionEngine::with_builtin_catalog();
        let data = make_series((0..40).map(|i| (i % 5) as f64).collect());

        let assessment = engine
            .evaluate_model_fit("time_series_exponential_smoothing", &data)
            .unwrap();
        assert_eq!(assessment.model_id, "time_series_exponential_smoothing");
        assert!(assessment.goodness_of_fit.is_finite());
    }

    #[test]
    fn alternatives_never_exceed_three() {
        let engine = SelectionEngine::with_builtin_catalog();
        // Seasonal + trending series admits all four forecasting entries.
        let values: Vec<f64> = (0..120)
            .map(|i| 20.0 + 2.0 * i as f64 + 6.0 * ((i % 7) as f64))
            .collect();
        let data = make_series(values);

        let selection = engine
            .select_optimal_model(
                &data,
                &task(TaskType::Timeseries),
                &ModelConstraints::default(),
            )
            .unwrap();
        assert!(selection.alternatives.len() <= 3);
    }
}
