use thiserror::Error;

/// Errors produced by the cost engine.
///
/// The engine is pure and deterministic, so every error here is a caller
/// contract violation rather than a transient fault. Retrying with the same
/// input will always fail the same way.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A usage parameter was negative or non-finite.
    #[error("invalid parameter '{field}': {value} (must be a finite, non-negative number)")]
    InvalidParameter { field: &'static str, value: f64 },

    /// An aggregate was requested for an environment with no breakdown.
    #[error("unknown environment '{0}': no parameters supplied")]
    UnknownEnvironment(String),

    /// A comparison was requested over an empty environment selection.
    #[error("no environments selected for comparison")]
    NoEnvironmentsSelected,
}
