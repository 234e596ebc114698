// src/engine/mod.rs

use thiserror::Error;

pub mod dispatch;
pub mod housekeeping;
pub mod insights;
pub mod metrics;
pub mod scheduler;
pub mod tasks;

/// Rejection values the engine hands back to callers. None of these is
/// fatal: the caller re-issues a corrected operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("unknown {entity} id {id}")]
    UnknownId { entity: &'static str, id: i64 },

    #[error("invalid transition: {detail}")]
    InvalidTransition { detail: String },

    #[error("assignment rejected: {detail}")]
    AssignmentRejected { detail: String },
}

impl EngineError {
    pub fn unknown(entity: &'static str, id: i64) -> Self {
        EngineError::UnknownId { entity, id }
    }

    pub fn transition(detail: impl Into<String>) -> Self {
        EngineError::InvalidTransition {
            detail: detail.into(),
        }
    }

    pub fn rejected(detail: impl Into<String>) -> Self {
        EngineError::AssignmentRejected {
            detail: detail.into(),
        }
    }

    /// Unknown-id failures are soft no-ops at the HTTP surface; the
    /// rest map to 409.
    pub fn is_soft(&self) -> bool {
        matches!(self, EngineError::UnknownId { .. })
    }
}
