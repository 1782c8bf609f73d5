//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - generates a synthetic sample dataset
//! - runs model selection
//! - prints the report
//! - writes optional exports

use clap::Parser;

use crate::cli::{Cli, Command, RunArgs};
use crate::data::{generate_sample, SampleConfig};
use crate::domain::{ModelConstraints, PredictionTask};
use crate::engine::SelectionEngine;
use crate::error::SelectError;

/// Entry point for the `mselect` binary.
pub fn run() -> Result<(), SelectError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Run(args) => handle_run(args),
        Command::Catalog => handle_catalog(),
    }
}

fn handle_run(args: RunArgs) -> Result<(), SelectError> {
    let data = generate_sample(&SampleConfig {
        scenario: args.scenario,
        point_count: args.points,
        seed: args.seed,
        feature_count: args.features,
    })?;

    let task = PredictionTask {
        id: format!("{}-{}", args.task.display_name(), args.seed),
        task_type: args.task,
    };
    let constraints = constraints_from_args(&args);

    let engine = SelectionEngine::with_builtin_catalog();
    let run = engine.select_with_diagnostics(&data, &task, &constraints)?;

    println!("{}", crate::report::format_run_summary(&data, &task, &run));

    if let Some(path) = &args.export {
        crate::io::write_selection_json(path, &task, &run)?;
        println!("Wrote selection JSON to {}", path.display());
    }
    if args.debug_bundle {
        let path = crate::debug::write_debug_bundle(&data, &task, &run)?;
        println!("Wrote debug bundle to {}", path.display());
    }

    Ok(())
}

fn handle_catalog() -> Result<(), SelectError> {
    let engine = SelectionEngine::with_builtin_catalog();
    print!("{}", crate::report::format_catalog(engine.catalog()));
    Ok(())
}

fn constraints_from_args(args: &RunArgs) -> ModelConstraints {
    ModelConstraints {
        max_training_time_ms: args.max_training_time,
        memory_limit_mb: args.memory_limit,
        accuracy_threshold: args.min_accuracy,
        real_time_required: args.real_time,
        allowed_models: if args.allowed.is_empty() {
            None
        } else {
            Some(args.allowed.clone())
        },
    }
}
