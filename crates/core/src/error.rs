//! Centralized error types for the sizing workspace.

use crate::types::LineId;
use thiserror::Error;

/// Top-level error enum. Variants map to the stage that failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SizingError {
    /// No controller combination within the search bounds covers the demand.
    #[error("No controller combination covers {readers_required} readers")]
    Infeasible { readers_required: u32 },

    #[error("DC line {line}: no controller combination covers {readers_required} readers")]
    LineInfeasible { line: LineId, readers_required: u32 },

    #[error("DC line {0} not found")]
    LineNotFound(LineId),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl SizingError {
    /// Attach the failing line to a selector-level error.
    pub fn for_line(self, line: LineId) -> Self {
        match self {
            SizingError::Infeasible { readers_required } => SizingError::LineInfeasible {
                line,
                readers_required,
            },
            other => other,
        }
    }
}

pub type SizingResult<T> = Result<T, SizingError>;
