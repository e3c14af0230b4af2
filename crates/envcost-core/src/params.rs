use crate::error::EngineError;
use serde::{Deserialize, Serialize};

/// Monthly usage parameters for a single environment.
///
/// All fields are monthly figures unless the name says otherwise, and every
/// field must be finite and non-negative. Counts are modeled as `f64` so
/// fractional usage (e.g. 2.5 GB of transfer) is accepted everywhere.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentParameters {
    /// Active pipelines in the orchestration service.
    pub pipelines: f64,
    /// Executions per day, per pipeline.
    pub executions_per_day: f64,
    /// Average duration of one execution, in minutes.
    pub minutes_per_execution: f64,
    /// Stage transitions per execution (source through deploy).
    pub transitions_per_execution: f64,
    /// Builds started per month.
    pub builds_per_month: f64,
    /// Average build duration, in minutes.
    pub build_duration_minutes: f64,
    /// Artifact repository storage, in GB.
    pub artifact_storage_gb: f64,
    /// Artifact repository requests per month.
    pub artifact_requests: f64,
    /// Intra-region artifact transfer, in GB.
    pub artifact_intra_gb: f64,
    /// Outbound (internet) artifact transfer, in GB.
    pub artifact_outbound_gb: f64,
}

impl EnvironmentParameters {
    /// Check that every field is finite and non-negative.
    ///
    /// Fails fast on the first offending field so the error names exactly
    /// one parameter.
    pub fn validate(&self) -> Result<(), EngineError> {
        for (field, value) in self.fields() {
            if !value.is_finite() || value < 0.0 {
                return Err(EngineError::InvalidParameter { field, value });
            }
        }
        Ok(())
    }

    fn fields(&self) -> [(&'static str, f64); 10] {
        [
            ("pipelines", self.pipelines),
            ("executions_per_day", self.executions_per_day),
            ("minutes_per_execution", self.minutes_per_execution),
            ("transitions_per_execution", self.transitions_per_execution),
            ("builds_per_month", self.builds_per_month),
            ("build_duration_minutes", self.build_duration_minutes),
            ("artifact_storage_gb", self.artifact_storage_gb),
            ("artifact_requests", self.artifact_requests),
            ("artifact_intra_gb", self.artifact_intra_gb),
            ("artifact_outbound_gb", self.artifact_outbound_gb),
        ]
    }
}
