//! Command-line parsing for the model selection demo binary.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the analysis/selection code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::data::Scenario;
use crate::domain::TaskType;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "mselect", version, about = "Dynamic model selection engine")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a synthetic dataset, run selection, and print the report.
    Run(RunArgs),
    /// Print the built-in model catalog.
    Catalog,
}

/// Options for a selection run.
#[derive(Debug, Parser, Clone)]
pub struct RunArgs {
    /// Prediction task to serve.
    #[arg(long, value_enum, default_value_t = TaskType::Timeseries)]
    pub task: TaskType,

    /// Structure of the generated sample series.
    #[arg(long, value_enum, default_value_t = Scenario::Seasonal)]
    pub scenario: Scenario,

    /// Number of synthetic points to generate.
    #[arg(short = 'n', long, default_value_t = 120)]
    pub points: usize,

    /// Random seed for sample generation.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Number of declared features in the sample.
    #[arg(long, default_value_t = 3)]
    pub features: usize,

    /// Upper bound on average training time (ms).
    #[arg(long)]
    pub max_training_time: Option<f64>,

    /// Upper bound on model memory requirement (MB).
    #[arg(long)]
    pub memory_limit: Option<f64>,

    /// Lower bound on expected accuracy.
    #[arg(long)]
    pub min_accuracy: Option<f64>,

    /// Require real-time capable models.
    #[arg(long)]
    pub real_time: bool,

    /// Restrict candidates to these model ids (repeatable).
    #[arg(long = "allow")]
    pub allowed: Vec<String>,

    /// Export the selection (task + profile + result) to JSON.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Write a markdown debug bundle under debug/.
    #[arg(long)]
    pub debug_bundle: bool,
}
