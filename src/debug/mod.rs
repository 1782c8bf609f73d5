//! Debug bundle writer for inspecting a selection run offline.
//!
//! The bundle is a timestamped markdown file under `debug/` holding the
//! dataset profile, every candidate assessment, and the final selection,
//! so a surprising pick can be diagnosed without re-running anything.

use std::fs::create_dir_all;
use std::path::PathBuf;

use chrono::Local;

use crate::domain::{PredictionData, PredictionTask};
use crate::engine::SelectionRun;
use crate::error::SelectError;
use crate::select::{score, selection_confidence};

pub fn write_debug_bundle(
    data: &PredictionData,
    task: &PredictionTask,
    run: &SelectionRun,
) -> Result<PathBuf, SelectError> {
    let dir = PathBuf::from("debug");
    create_dir_all(&dir)
        .map_err(|e| SelectError::invalid(format!("Failed to create debug dir: {e}")))?;

    let ts = Local::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!("mselect_debug_{}_{ts}.md", task.task_type.display_name()));

    let mut out = String::new();
    out.push_str("# mselect debug bundle\n");
    out.push_str(&format!("- generated: {}\n", Local::now().to_rfc3339()));
    out.push_str(&format!("- dataset: {}\n", data.id));
    out.push_str(&format!("- task: {}\n", task.task_type.display_name()));

    let profile = &run.profile;
    out.push_str("\n## Dataset profile\n");
    out.push_str("| statistic | value |\n| - | - |\n");
    out.push_str(&format!("| points | {} |\n", profile.data_size));
    out.push_str(&format!("| features | {} |\n", profile.feature_count));
    out.push_str(&format!("| variance | {:.6} |\n", profile.target_variance));
    out.push_str(&format!("| range | {:.6} |\n", profile.target_range));
    out.push_str(&format!("| missing rate | {:.4} |\n", profile.missing_value_rate));
    out.push_str(&format!("| noise level | {:.4} |\n", profile.noise_level));
    out.push_str(&format!("| linearity | {:.4} |\n", profile.linearity));
    out.push_str(&format!("| outlier rate | {:.4} |\n", profile.outlier_rate));
    match &profile.seasonality {
        Some(s) => out.push_str(&format!(
            "| seasonality | period={} strength={:.4} |\n",
            s.period, s.strength
        )),
        None => out.push_str("| seasonality | none |\n"),
    }
    match &profile.trend {
        Some(t) => out.push_str(&format!(
            "| trend | {:?} r²={:.4} |\n",
            t.direction, t.strength
        )),
        None => out.push_str("| trend | none |\n"),
    }

    out.push_str("\n## Assessments\n");
    out.push_str("| model | fit | score | confidence | risk | bias | variance |\n");
    out.push_str("| - | - | - | - | - | - | - |\n");
    for a in &run.outcome.assessments {
        out.push_str(&format!(
            "| {} | {:.4} | {:.4} | {:.4} | {} | {:.4} | {:.4} |\n",
            a.model_id,
            a.goodness_of_fit,
            score(a),
            selection_confidence(a),
            a.overfitting_risk.display_name(),
            a.bias_variance.bias,
            a.bias_variance.variance
        ));
    }
    for skipped in &run.outcome.skipped {
        out.push_str(&format!("- skipped {}: {}\n", skipped.model_id, skipped.reason));
    }

    let selection = &run.outcome.selection;
    out.push_str("\n## Selection\n");
    out.push_str(&format!(
        "- chosen: {} ({})\n- confidence: {:.4}\n",
        selection.model_id, selection.algorithm, selection.confidence
    ));
    for alt in &selection.alternatives {
        out.push_str(&format!("- alternative: {} score={:.4}\n", alt.id, alt.score));
    }

    std::fs::write(&path, out)
        .map_err(|e| SelectError::invalid(format!("Failed to write debug bundle: {e}")))?;

    Ok(path)
}
