//! Typed failures surfaced by the engine.

use crate::{engine::Operation, sanitize::SanitizeStage};
use thiserror::Error;

/// Malformed SVG path data. Positions are byte offsets into the path data string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathParseError {
    #[error("unexpected character '{character}' at position {position}")]
    UnexpectedCharacter { character: char, position: usize },
    #[error("missing arguments for command '{command}' at position {position}")]
    MissingArguments { command: char, position: usize },
    #[error("invalid number at position {position}")]
    InvalidNumber { position: usize },
}

/// Path data that cannot be brought into the output format.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SanitizeError {
    #[error("path data does not begin with a move command")]
    MissingMoveCommand,
    #[error("path data is {size} bytes, the limit is {limit} bytes")]
    PathTooComplex { size: usize, limit: usize },
    #[error("path data contains unsupported content: {found}")]
    UnsupportedCommand { found: String },
    #[error("no usable subpath could be extracted from path data")]
    NoUsableSubpath,
}

/// Failure of a whole combine invocation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BooleanError {
    #[error("invalid input: {reason}")]
    InputError { reason: String },
    #[error("shape '{shape_id}' has no usable geometry")]
    NoGeometry { shape_id: String },
    #[error("{operation} failed: {reason}")]
    OperationFailed { operation: Operation, reason: String },
    #[error("{operation} result could not be sanitized ({stage} stage): {source}")]
    Sanitize {
        operation: Operation,
        stage: SanitizeStage,
        #[source]
        source: SanitizeError,
    },
}

impl BooleanError {
    pub(crate) fn input(reason: impl Into<String>) -> Self {
        BooleanError::InputError {
            reason: reason.into(),
        }
    }

    pub(crate) fn operation_failed(operation: Operation, reason: impl Into<String>) -> Self {
        BooleanError::OperationFailed {
            operation,
            reason: reason.into(),
        }
    }
}
