use crate::domain::TaskType;

/// Typed failures surfaced by the selection engine and its CLI front-end.
///
/// Each variant maps to a stable process exit code so scripted callers can
/// distinguish "bad invocation" from "no model fits this data".
#[derive(Clone)]
pub enum SelectError {
    /// Malformed configuration or sample parameters.
    InvalidInput(String),
    /// Constraint filtering left no admissible candidate for the task.
    NoEligibleModel { task: TaskType },
    /// A model id has no catalog entry.
    UnknownModel { model_id: String },
}

impl SelectError {
    pub fn invalid(message: impl Into<String>) -> Self {
        SelectError::InvalidInput(message.into())
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            SelectError::InvalidInput(_) => 2,
            SelectError::NoEligibleModel { .. } => 3,
            SelectError::UnknownModel { .. } => 4,
        }
    }
}

impl std::fmt::Display for SelectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectError::InvalidInput(message) => write!(f, "{message}"),
            SelectError::NoEligibleModel { task } => write!(
                f,
                "No eligible model for {} task after constraint filtering.",
                task.display_name()
            ),
            SelectError::UnknownModel { model_id } => {
                write!(f, "Unknown model id: {model_id}")
            }
        }
    }
}

impl std::fmt::Debug for SelectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SelectError(exit_code={}, {self})", self.exit_code())
    }
}

impl std::error::Error for SelectError {}
