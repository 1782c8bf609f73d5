//! Formatted terminal output for selection runs and the catalog.
//!
//! We keep formatting code in one place so:
//! - the analysis/selection code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::catalog::ModelCatalog;
use crate::domain::{PredictionData, PredictionTask};
use crate::engine::SelectionRun;
use crate::select::score;

/// Format the full run summary (dataset profile + assessments + selection).
pub fn format_run_summary(
    data: &PredictionData,
    task: &PredictionTask,
    run: &SelectionRun,
) -> String {
    let mut out = String::new();
    let profile = &run.profile;
    let selection = &run.outcome.selection;

    out.push_str("=== mselect - Dynamic Model Selection ===\n");
    out.push_str(&format!("Dataset: {}\n", data.id));
    out.push_str(&format!("Task: {}\n", task.task_type.display_name()));
    out.push_str(&format!(
        "Points: n={} | features={} | missing={:.1}%\n",
        profile.data_size,
        profile.feature_count,
        profile.missing_value_rate * 100.0
    ));
    out.push_str(&format!(
        "Target: variance={:.3} | range={:.3} | noise={:.3} | outliers={:.1}%\n",
        profile.target_variance,
        profile.target_range,
        profile.noise_level,
        profile.outlier_rate * 100.0
    ));

    match &profile.seasonality {
        Some(s) => out.push_str(&format!(
            "Seasonality: period={} strength={:.3}\n",
            s.period, s.strength
        )),
        None => out.push_str("Seasonality: none detected\n"),
    }
    match &profile.trend {
        Some(t) => out.push_str(&format!(
            "Trend: {:?} (r²={:.3})\n",
            t.direction, t.strength
        )),
        None => out.push_str("Trend: none detected\n"),
    }

    out.push_str("\nCandidate assessments:\n");
    for assessment in &run.outcome.assessments {
        let chosen = if assessment.model_id == selection.model_id {
            "*"
        } else {
            " "
        };
        out.push_str(&format!(
            "{chosen} {:<38} fit={:.3} score={:.3} risk={:<6} time={:.0}ms\n",
            assessment.model_id,
            assessment.goodness_of_fit,
            score(assessment),
            assessment.overfitting_risk.display_name(),
            assessment.training_time_ms
        ));
    }
    for skipped in &run.outcome.skipped {
        out.push_str(&format!(
            "  (skipped {}) {}\n",
            skipped.model_id, skipped.reason
        ));
    }

    out.push_str("\nChosen model:\n");
    out.push_str(&format!(
        "- {} ({})\n",
        selection.model_name, selection.algorithm
    ));
    out.push_str(&format!("- confidence: {:.3}\n", selection.confidence));
    out.push_str(&format!(
        "- estimated latency: {:.0}ms | estimated accuracy: {:.3}\n",
        selection.estimated_latency_ms, selection.estimated_accuracy
    ));

    if selection.alternatives.is_empty() {
        out.push_str("- no alternatives\n");
    } else {
        out.push_str("\nAlternatives:\n");
        for alt in &selection.alternatives {
            out.push_str(&format!(
                "- {:<38} score={:.3} ({})\n",
                alt.id, alt.score, alt.algorithm
            ));
        }
    }

    for assessment in &run.outcome.assessments {
        if assessment.model_id == selection.model_id && !assessment.recommendations.is_empty() {
            out.push_str("\nRecommendations:\n");
            for hint in &assessment.recommendations {
                out.push_str(&format!("- {hint}\n"));
            }
        }
    }

    out
}

/// Format the catalog as a fixed-width table.
pub fn format_catalog(catalog: &ModelCatalog) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<38} {:<22} {:>5} {:>5} {:>8} {:>7} {:>7} {:>3}\n",
        "id", "algorithm", "cmplx", "acc", "time", "mem", "min_pts", "rt"
    ));
    for info in catalog.iter() {
        out.push_str(&format!(
            "{:<38} {:<22} {:>5.2} {:>5.2} {:>6.0}ms {:>5.0}MB {:>7} {:>3}\n",
            info.id,
            info.algorithm,
            info.complexity,
            info.expected_accuracy,
            info.avg_training_time_ms,
            info.memory_requirement_mb,
            info.min_data_points,
            if info.supports_real_time { "yes" } else { "no" }
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{generate_sample, SampleConfig, Scenario};
    use crate::domain::{ModelConstraints, TaskType};
    use crate::engine::SelectionEngine;

    #[test]
    fn summary_marks_the_chosen_model() {
        let engine = SelectionEngine::with_builtin_catalog();
        let data = generate_sample(&SampleConfig {
            scenario: Scenario::Seasonal,
            point_count: 120,
            seed: 7,
            feature_count: 2,
        })
        .unwrap();
        let task = PredictionTask {
            id: "demo".to_string(),
            task_type: TaskType::Timeseries,
        };

        let run = engine
            .select_with_diagnostics(&data, &task, &ModelConstraints::default())
            .unwrap();
        let summary = format_run_summary(&data, &task, &run);

        assert!(summary.contains("Chosen model:"));
        assert!(summary.contains(&format!("* {:<38}", run.outcome.selection.model_id)));
    }

    #[test]
    fn catalog_table_lists_every_entry() {
        let catalog = ModelCatalog::builtin();
        let table = format_catalog(&catalog);
        for info in catalog.iter() {
            assert!(table.contains(&info.id));
        }
    }
}
