//! Write selection JSON files.
//!
//! Selection JSON is the "portable" representation of one run:
//! - the task that was served
//! - the dataset profile the decision was based on
//! - the chosen model with confidence and alternatives
//!
//! The schema is defined by `domain::SelectionFile`.

use std::fs::File;
use std::path::Path;

use chrono::Utc;

use crate::domain::{PredictionTask, SelectionFile};
use crate::engine::SelectionRun;
use crate::error::SelectError;

/// Write a selection JSON file.
pub fn write_selection_json(
    path: &Path,
    task: &PredictionTask,
    run: &SelectionRun,
) -> Result<(), SelectError> {
    let file = File::create(path).map_err(|e| {
        SelectError::invalid(format!(
            "Failed to create selection JSON '{}': {e}",
            path.display()
        ))
    })?;

    let export = SelectionFile {
        tool: "mselect".to_string(),
        generated_at: Utc::now(),
        task: task.clone(),
        profile: run.profile.clone(),
        selection: run.outcome.selection.clone(),
    };

    serde_json::to_writer_pretty(file, &export)
        .map_err(|e| SelectError::invalid(format!("Failed to write selection JSON: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{generate_sample, SampleConfig, Scenario};
    use crate::domain::{ModelConstraints, TaskType};
    use crate::engine::SelectionEngine;

    #[test]
    fn selection_round_trips_through_json() {
        let engine = SelectionEngine::with_builtin_catalog();
        let data = generate_sample(&SampleConfig {
            scenario: Scenario::Trending,
            point_count: 90,
            seed: 11,
            feature_count: 1,
        })
        .unwrap();
        let task = PredictionTask {
            id: "export-test".to_string(),
            task_type: TaskType::Timeseries,
        };
        let run = engine
            .select_with_diagnostics(&data, &task, &ModelConstraints::default())
            .unwrap();

        let dir = std::env::temp_dir();
        let path = dir.join("mselect_export_test.json");
        write_selection_json(&path, &task, &run).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let parsed: SelectionFile = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed.selection.model_id, run.outcome.selection.model_id);
        assert_eq!(parsed.profile.data_size, 90);

        let _ = std::fs::remove_file(&path);
    }
}
