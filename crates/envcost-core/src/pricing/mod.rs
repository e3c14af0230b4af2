pub mod artifact;
pub mod build;
pub mod pipeline;

use crate::breakdown::CostBreakdown;
use crate::error::EngineError;
use crate::params::EnvironmentParameters;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Unit rates and free-tier thresholds, in USD.
///
/// Defaults match the published US East (N. Virginia) rates the estimator
/// was built against. Any rate can be overridden from the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingRates {
    /// Per pipeline stage transition.
    pub transition_rate: f64,
    /// Per metered execution minute past the free allowance.
    pub minute_rate: f64,
    /// Free execution minutes per month.
    pub free_minutes: f64,
    /// Per build-second.
    pub build_second_rate: f64,
    /// Per GB-month of artifact storage past the free tier.
    pub storage_rate: f64,
    /// Free artifact storage, in GB.
    pub free_storage_gb: f64,
    /// Per artifact request past the free tier.
    pub request_rate: f64,
    /// Free artifact requests per month.
    pub free_requests: f64,
    /// Per GB of intra-region transfer.
    pub intra_transfer_rate: f64,
    /// Per GB of outbound transfer.
    pub outbound_transfer_rate: f64,
    /// Flat monthly base fee charged whenever artifact usage is modeled.
    pub artifact_base_fee: f64,
}

impl Default for PricingRates {
    fn default() -> Self {
        Self {
            transition_rate: 0.002,
            minute_rate: 0.002,
            free_minutes: 100.0,
            build_second_rate: 0.00002,
            storage_rate: 0.05,
            free_storage_gb: 2.0,
            request_rate: 0.000005,
            free_requests: 100_000.0,
            intra_transfer_rate: 0.02,
            outbound_transfer_rate: 0.09,
            artifact_base_fee: 0.60,
        }
    }
}

/// The cost model: pricing rates plus the fixed annual items injected for
/// the distinguished environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostModel {
    pub rates: PricingRates,
    /// Label -> annual USD. Injected verbatim into the distinguished
    /// environment's breakdown, never scaled by usage.
    pub fixed_annual: BTreeMap<String, f64>,
}

impl CostModel {
    pub fn new(rates: PricingRates, fixed_annual: BTreeMap<String, f64>) -> Self {
        Self {
            rates,
            fixed_annual,
        }
    }

    /// Compute the full line-item breakdown for one environment.
    ///
    /// Pure: the result depends only on `params` and the model itself.
    /// Parameters are validated up front, so a returned breakdown always
    /// holds non-negative amounts.
    pub fn compute_breakdown(
        &self,
        params: &EnvironmentParameters,
        is_distinguished_env: bool,
    ) -> Result<CostBreakdown, EngineError> {
        params.validate()?;

        let mut breakdown = CostBreakdown::new();
        pipeline::price(params, &self.rates, &mut breakdown);
        build::price(params, &self.rates, &mut breakdown);
        artifact::price(params, &self.rates, &mut breakdown);

        if is_distinguished_env {
            for (label, amount) in &self.fixed_annual {
                breakdown.insert(label.clone(), *amount);
            }
        }

        Ok(breakdown)
    }

    /// Labels the aggregation step classifies as fixed-annual.
    pub fn fixed_annual_labels(&self) -> BTreeSet<String> {
        self.fixed_annual.keys().cloned().collect()
    }
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            rates: PricingRates::default(),
            fixed_annual: default_fixed_annual(),
        }
    }
}

/// The fixed annual tooling licenses carried by the distinguished
/// environment, per the current procurement figures.
pub fn default_fixed_annual() -> BTreeMap<String, f64> {
    let mut items = BTreeMap::new();
    items.insert("GitLab".to_string(), 73_350.0);
    items.insert("CheckMarx".to_string(), 26_265.5);
    items.insert("Sonarqube".to_string(), 32_643.78);
    items
}

/// Usage past a free allowance, clamped at zero.
pub(crate) fn over_free_tier(usage: f64, free: f64) -> f64 {
    (usage - free).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_params() -> EnvironmentParameters {
        EnvironmentParameters {
            pipelines: 300.0,
            executions_per_day: 10.0,
            minutes_per_execution: 5.0,
            transitions_per_execution: 2.0,
            builds_per_month: 25_000.0,
            build_duration_minutes: 5.0,
            artifact_storage_gb: 100.0,
            artifact_requests: 25_000.0,
            artifact_intra_gb: 0.0,
            artifact_outbound_gb: 100.0,
        }
    }

    #[test]
    fn test_over_free_tier_clamps_at_zero() {
        assert_eq!(over_free_tier(50.0, 100.0), 0.0);
        assert_eq!(over_free_tier(100.0, 100.0), 0.0);
        assert_eq!(over_free_tier(150.0, 100.0), 50.0);
    }

    #[test]
    fn test_breakdown_is_non_negative_and_pure() {
        let model = CostModel::default();
        let params = sample_params();

        let first = model.compute_breakdown(&params, true).unwrap();
        let second = model.compute_breakdown(&params, true).unwrap();

        assert_eq!(first, second);
        for (label, amount) in first.iter() {
            assert!(amount >= 0.0, "negative amount for '{label}'");
        }
    }

    #[test]
    fn test_fixed_annual_items_only_for_distinguished_env() {
        let model = CostModel::default();
        let params = sample_params();

        let distinguished = model.compute_breakdown(&params, true).unwrap();
        let ordinary = model.compute_breakdown(&params, false).unwrap();

        assert_eq!(distinguished.get("GitLab"), 73_350.0);
        assert_eq!(distinguished.get("CheckMarx"), 26_265.5);
        assert_eq!(distinguished.get("Sonarqube"), 32_643.78);

        assert!(!ordinary.contains("GitLab"));
        assert!(!ordinary.contains("CheckMarx"));
        assert!(!ordinary.contains("Sonarqube"));
    }

    #[test]
    fn test_fixed_annual_items_ignore_usage() {
        let model = CostModel::default();

        let idle = model
            .compute_breakdown(&EnvironmentParameters::default(), true)
            .unwrap();
        let busy = model.compute_breakdown(&sample_params(), true).unwrap();

        assert_eq!(idle.get("GitLab"), busy.get("GitLab"));
        assert_eq!(idle.get("Sonarqube"), busy.get("Sonarqube"));
    }

    #[test]
    fn test_zero_usage_costs_only_the_base_fee() {
        let model = CostModel::default();
        let breakdown = model
            .compute_breakdown(&EnvironmentParameters::default(), false)
            .unwrap();

        for (label, amount) in breakdown.iter() {
            if label == artifact::BASE_FEE_LABEL {
                assert_eq!(amount, 0.60);
            } else {
                assert_eq!(amount, 0.0, "expected zero cost for '{label}'");
            }
        }
    }

    #[test]
    fn test_invalid_params_fail_before_computing() {
        let model = CostModel::default();
        let params = EnvironmentParameters {
            artifact_requests: -5.0,
            ..sample_params()
        };
        assert!(matches!(
            model.compute_breakdown(&params, false),
            Err(EngineError::InvalidParameter {
                field: "artifact_requests",
                ..
            })
        ));
    }
}
