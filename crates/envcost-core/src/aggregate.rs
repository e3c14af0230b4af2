//! Rollup of per-environment breakdowns into monthly, annual, and grand
//! totals.
//!
//! Line items are classified as fixed-annual (a closed, configurable label
//! set) or usage-monthly (everything else). Annual totals follow
//! `fixed_annual + monthly * 12` for every environment, the distinguished
//! one included.

use crate::breakdown::CostBreakdown;
use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// What to do when a selected environment has no breakdown.
///
/// The choice belongs to the caller, but it is always explicit: an
/// environment is never silently skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissingEnvironment {
    /// Fail the aggregation with [`EngineError::UnknownEnvironment`].
    Reject,
    /// Count the environment as zero cost on every line item.
    TreatAsZero,
}

/// Totals for a single environment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentTotals {
    /// Sum of usage-based line items (monthly USD).
    pub monthly_total: f64,
    /// Sum of fixed-annual line items (annual USD).
    pub fixed_annual_total: f64,
    /// `fixed_annual_total + monthly_total * 12`.
    pub annual_total: f64,
}

impl EnvironmentTotals {
    const ZERO: Self = Self {
        monthly_total: 0.0,
        fixed_annual_total: 0.0,
        annual_total: 0.0,
    };
}

/// Totals across the selected environments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateTotals {
    pub per_env: BTreeMap<String, EnvironmentTotals>,
    /// Sum of annual totals over the selected environments only.
    pub grand_annual_total: f64,
}

/// Classify and sum one environment's line items.
pub fn environment_totals(
    breakdown: &CostBreakdown,
    fixed_annual_labels: &BTreeSet<String>,
) -> EnvironmentTotals {
    let mut monthly_total = 0.0;
    let mut fixed_annual_total = 0.0;

    for (label, amount) in breakdown.iter() {
        if fixed_annual_labels.contains(label) {
            fixed_annual_total += amount;
        } else {
            monthly_total += amount;
        }
    }

    EnvironmentTotals {
        monthly_total,
        fixed_annual_total,
        annual_total: fixed_annual_total + monthly_total * 12.0,
    }
}

/// Roll the selected environments up into per-environment and grand totals.
///
/// An environment listed twice counts once. Environments outside `selected`
/// are excluded entirely.
pub fn aggregate(
    breakdowns: &BTreeMap<String, CostBreakdown>,
    selected: &[String],
    fixed_annual_labels: &BTreeSet<String>,
    missing: MissingEnvironment,
) -> Result<AggregateTotals, EngineError> {
    if selected.is_empty() {
        return Err(EngineError::NoEnvironmentsSelected);
    }

    let mut per_env = BTreeMap::new();
    let mut grand_annual_total = 0.0;

    for name in selected {
        if per_env.contains_key(name) {
            continue;
        }
        let totals = match breakdowns.get(name) {
            Some(breakdown) => environment_totals(breakdown, fixed_annual_labels),
            None => match missing {
                MissingEnvironment::Reject => {
                    return Err(EngineError::UnknownEnvironment(name.clone()));
                }
                MissingEnvironment::TreatAsZero => EnvironmentTotals::ZERO,
            },
        };
        grand_annual_total += totals.annual_total;
        per_env.insert(name.clone(), totals);
    }

    Ok(AggregateTotals {
        per_env,
        grand_annual_total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_labels() -> BTreeSet<String> {
        ["GitLab", "Sonarqube"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    fn sample_breakdowns() -> BTreeMap<String, CostBreakdown> {
        let mut production = CostBreakdown::new();
        production.insert("CodeBuild", 150.0);
        production.insert("CodeArtifact - Transfer", 9.0);
        production.insert("GitLab", 73_350.0);
        production.insert("Sonarqube", 32_643.78);

        let mut development = CostBreakdown::new();
        development.insert("CodeBuild", 600.0);
        development.insert("CodeArtifact - Transfer", 9.0);

        let mut map = BTreeMap::new();
        map.insert("Production".to_string(), production);
        map.insert("Development".to_string(), development);
        map
    }

    #[test]
    fn test_classification_and_annualization() {
        let breakdowns = sample_breakdowns();
        let totals = environment_totals(&breakdowns["Production"], &fixed_labels());

        assert!((totals.monthly_total - 159.0).abs() < 1e-9);
        assert!((totals.fixed_annual_total - 105_993.78).abs() < 1e-9);
        // Fixed items are already annual; only usage is scaled by 12.
        assert!((totals.annual_total - (105_993.78 + 159.0 * 12.0)).abs() < 1e-9);
    }

    #[test]
    fn test_grand_total_is_additive() {
        let breakdowns = sample_breakdowns();
        let selected = vec!["Production".to_string(), "Development".to_string()];
        let totals = aggregate(
            &breakdowns,
            &selected,
            &fixed_labels(),
            MissingEnvironment::Reject,
        )
        .unwrap();

        let summed: f64 = totals.per_env.values().map(|t| t.annual_total).sum();
        assert!((totals.grand_annual_total - summed).abs() < 1e-9);
    }

    #[test]
    fn test_unselected_environments_are_excluded() {
        let breakdowns = sample_breakdowns();
        let selected = vec!["Development".to_string()];
        let totals = aggregate(
            &breakdowns,
            &selected,
            &fixed_labels(),
            MissingEnvironment::Reject,
        )
        .unwrap();

        assert_eq!(totals.per_env.len(), 1);
        assert!((totals.grand_annual_total - 609.0 * 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_duplicate_selection_counts_once() {
        let breakdowns = sample_breakdowns();
        let selected = vec!["Development".to_string(), "Development".to_string()];
        let totals = aggregate(
            &breakdowns,
            &selected,
            &fixed_labels(),
            MissingEnvironment::Reject,
        )
        .unwrap();

        assert!((totals.grand_annual_total - 609.0 * 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_environment_rejected() {
        let breakdowns = sample_breakdowns();
        let selected = vec!["QA".to_string()];
        let err = aggregate(
            &breakdowns,
            &selected,
            &fixed_labels(),
            MissingEnvironment::Reject,
        )
        .unwrap_err();

        assert!(matches!(err, EngineError::UnknownEnvironment(name) if name == "QA"));
    }

    #[test]
    fn test_missing_environment_as_zero() {
        let breakdowns = sample_breakdowns();
        let selected = vec!["QA".to_string(), "Development".to_string()];
        let totals = aggregate(
            &breakdowns,
            &selected,
            &fixed_labels(),
            MissingEnvironment::TreatAsZero,
        )
        .unwrap();

        assert_eq!(totals.per_env["QA"], EnvironmentTotals::ZERO);
        assert!((totals.grand_annual_total - 609.0 * 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_selection_is_an_error() {
        let breakdowns = sample_breakdowns();
        let err = aggregate(
            &breakdowns,
            &[],
            &fixed_labels(),
            MissingEnvironment::Reject,
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::NoEnvironmentsSelected));
    }
}
