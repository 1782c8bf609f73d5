//! Scoring and final selection over ordered candidate assessments.
//!
//! Ranking is deterministic: the score weights are fixed, the winner must be
//! strictly better, and ties keep the earlier candidate in evaluation order.
//! Alternatives preserve evaluation order as well (no re-sort), truncated to
//! three entries.

use crate::catalog::ModelCatalog;
use crate::domain::{AlternativeModel, ModelFitAssessment, ModelSelection, TaskType};
use crate::error::SelectError;

/// Score weights. The residual 0.1 of mass is intentionally unassigned;
/// changing these shifts every ranking, so they stay fixed.
const GOODNESS_WEIGHT: f64 = 0.4;
const PARAMETER_STABILITY_WEIGHT: f64 = 0.3;
const PREDICTION_STABILITY_WEIGHT: f64 = 0.2;

/// Maximum number of runner-up candidates carried in a selection.
const MAX_ALTERNATIVES: usize = 3;

/// A candidate that failed evaluation and was skipped (for diagnostics).
#[derive(Debug, Clone)]
pub struct SkippedCandidate {
    pub model_id: String,
    pub reason: String,
}

/// Output of evaluating and ranking one candidate list.
#[derive(Debug, Clone)]
pub struct SelectionOutcome {
    pub selection: ModelSelection,
    /// All successful assessments, in evaluation order.
    pub assessments: Vec<ModelFitAssessment>,
    /// Candidates whose evaluation failed, with reasons.
    pub skipped: Vec<SkippedCandidate>,
}

/// Composite ranking score for one assessment.
pub fn score(assessment: &ModelFitAssessment) -> f64 {
    GOODNESS_WEIGHT * assessment.goodness_of_fit
        + PARAMETER_STABILITY_WEIGHT * assessment.stability.parameter_stability
        + PREDICTION_STABILITY_WEIGHT * assessment.stability.prediction_stability
}

/// Mean of the fit and stability factors plus the error complement.
///
/// Not clamped: a large total error legitimately drags confidence down.
pub fn selection_confidence(assessment: &ModelFitAssessment) -> f64 {
    let factors = [
        assessment.goodness_of_fit,
        assessment.stability.parameter_stability,
        assessment.stability.prediction_stability,
        1.0 - assessment.bias_variance.total_error,
    ];
    factors.iter().sum::<f64>() / factors.len() as f64
}

/// Index of the winning assessment: strictly greatest score, earliest on ties.
fn best_index(assessments: &[ModelFitAssessment]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, assessment) in assessments.iter().enumerate() {
        let s = score(assessment);
        match best {
            Some((_, best_score)) if s <= best_score => {}
            _ => best = Some((i, s)),
        }
    }
    best.map(|(i, _)| i)
}

/// Rank assessments and build the final `ModelSelection`.
///
/// Fails with `NoEligibleModel` on an empty list, propagating the filter's
/// condition when every candidate was filtered or skipped.
pub fn select_best(
    assessments: Vec<ModelFitAssessment>,
    skipped: Vec<SkippedCandidate>,
    task: TaskType,
    catalog: &ModelCatalog,
) -> Result<SelectionOutcome, SelectError> {
    let Some(winner_index) = best_index(&assessments) else {
        return Err(SelectError::NoEligibleModel { task });
    };
    let winner = &assessments[winner_index];

    let info = catalog.lookup(&winner.model_id);
    let selection = ModelSelection {
        model_id: winner.model_id.clone(),
        model_name: info.map_or_else(|| winner.model_id.clone(), |i| i.name.clone()),
        algorithm: info.map_or_else(|| "unknown".to_string(), |i| i.algorithm.clone()),
        confidence: selection_confidence(winner),
        estimated_latency_ms: info.map_or(0.0, |i| i.avg_training_time_ms),
        estimated_accuracy: winner.goodness_of_fit,
        alternatives: alternatives(&assessments, winner_index, catalog),
    };

    Ok(SelectionOutcome {
        selection,
        assessments,
        skipped,
    })
}

/// The first three non-winning assessments, in evaluation order.
fn alternatives(
    assessments: &[ModelFitAssessment],
    winner_index: usize,
    catalog: &ModelCatalog,
) -> Vec<AlternativeModel> {
    assessments
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != winner_index)
        .take(MAX_ALTERNATIVES)
        .map(|(_, a)| {
            let info = catalog.lookup(&a.model_id);
            AlternativeModel {
                id: a.model_id.clone(),
                name: info.map_or_else(|| a.model_id.clone(), |i| i.name.clone()),
                algorithm: info.map_or_else(|| "unknown".to_string(), |i| i.algorithm.clone()),
                score: a.goodness_of_fit,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        BiasVariance, OverfittingRisk, ResidualSummary, StabilityMetrics,
    };

    fn assessment(model_id: &str, goodness: f64, stability: f64) -> ModelFitAssessment {
        ModelFitAssessment {
            model_id: model_id.to_string(),
            goodness_of_fit: goodness,
            complexity: 0.5,
            training_time_ms: 100.0,
            memory_usage_mb: 50.0,
            overfitting_risk: OverfittingRisk::Medium,
            residuals: ResidualSummary {
                mean_error: 0.0,
                std_error: 1.0,
                skewness: 0.0,
                kurtosis: 0.0,
                autocorrelation: 0.1,
                heteroscedastic: false,
            },
            stability: StabilityMetrics {
                parameter_stability: stability,
                prediction_stability: stability,
                temporal_stability: 0.7,
                noise_sensitivity: 0.3,
                complexity_sensitivity: 0.5,
            },
            bias_variance: BiasVariance {
                bias: 0.5,
                variance: 0.2,
                irreducible_error: 0.1,
                total_error: 0.8,
            },
            recommendations: Vec::new(),
        }
    }

    #[test]
    fn stronger_candidate_wins_with_strictly_greater_score() {
        let strong = assessment("strong", 0.9, 0.9);
        let weak = assessment("weak", 0.5, 0.5);
        assert!((score(&strong) - 0.81).abs() < 1e-12);
        assert!((score(&weak) - 0.45).abs() < 1e-12);

        let catalog = ModelCatalog::builtin();
        let outcome = select_best(
            vec![strong, weak],
            Vec::new(),
            TaskType::Regression,
            &catalog,
        )
        .unwrap();
        assert_eq!(outcome.selection.model_id, "strong");
    }

    #[test]
    fn ties_keep_the_earlier_candidate() {
        let first = assessment("first", 0.7, 0.7);
        let second = assessment("second", 0.7, 0.7);
        let catalog = ModelCatalog::builtin();

        let outcome = select_best(
            vec![first, second],
            Vec::new(),
            TaskType::Regression,
            &catalog,
        )
        .unwrap();
        assert_eq!(outcome.selection.model_id, "first");
    }

    #[test]
    fn empty_assessments_fail_as_no_eligible_model() {
        let catalog = ModelCatalog::builtin();
        let err = select_best(Vec::new(), Vec::new(), TaskType::Timeseries, &catalog).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn alternatives_preserve_evaluation_order_and_cap_at_three() {
        let catalog = ModelCatalog::builtin();
        let assessments = vec![
            assessment("a", 0.5, 0.5),
            assessment("winner", 0.95, 0.95),
            assessment("b", 0.6, 0.6),
            assessment("c", 0.4, 0.4),
            assessment("d", 0.3, 0.3),
        ];

        let outcome = select_best(assessments, Vec::new(), TaskType::Regression, &catalog).unwrap();
        assert_eq!(outcome.selection.model_id, "winner");
        let ids: Vec<&str> = outcome
            .selection
            .alternatives
            .iter()
            .map(|a| a.id.as_str())
            .collect();
        // Evaluation order, not score order; "d" is truncated.
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn confidence_is_the_factor_mean() {
        let a = assessment("m", 0.8, 0.6);
        // (0.8 + 0.6 + 0.6 + (1 - 0.8)) / 4
        assert!((selection_confidence(&a) - 0.55).abs() < 1e-12);
    }
}
