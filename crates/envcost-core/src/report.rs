//! Comparison report assembly: the serializable artifact handed to
//! renderers.

use crate::aggregate::{aggregate, AggregateTotals, MissingEnvironment};
use crate::breakdown::CostBreakdown;
use crate::config::CostConfig;
use crate::error::EngineError;
use crate::insights::{build_insights, CostInsights};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// The complete comparison across the selected environments.
///
/// All amounts are raw `f64` values; rendering with currency formatting is
/// the consumer's job (see [`format_usd`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    /// RFC3339 timestamp of when the report was computed.
    pub generated_at: String,
    pub distinguished_environment: String,
    /// Selected environments, in roster order, deduplicated.
    pub environments: Vec<String>,
    pub breakdowns: BTreeMap<String, CostBreakdown>,
    pub totals: AggregateTotals,
    pub insights: CostInsights,
}

impl ComparisonReport {
    pub fn environment_count(&self) -> usize {
        self.environments.len()
    }

    pub fn grand_annual_total(&self) -> f64 {
        self.totals.grand_annual_total
    }

    /// Union of line-item labels across all environments, sorted.
    pub fn line_item_labels(&self) -> Vec<String> {
        let labels: BTreeSet<&str> = self
            .breakdowns
            .values()
            .flat_map(|b| b.labels())
            .collect();
        labels.into_iter().map(String::from).collect()
    }
}

/// Compute breakdowns, totals, and insights for the selected environments
/// of a configuration.
///
/// Selection names must exist in the roster; an unknown name is rejected
/// rather than skipped. Duplicates count once, and the result preserves the
/// caller's selection order.
pub fn build_report(
    config: &CostConfig,
    selected: &[String],
) -> Result<ComparisonReport, EngineError> {
    if selected.is_empty() {
        return Err(EngineError::NoEnvironmentsSelected);
    }

    let model = config.cost_model();
    let mut breakdowns = BTreeMap::new();
    let mut ordered = Vec::new();

    for name in selected {
        let env = config
            .environment(name)
            .ok_or_else(|| EngineError::UnknownEnvironment(name.clone()))?;
        if breakdowns.contains_key(&env.name) {
            continue;
        }
        let breakdown =
            model.compute_breakdown(&env.parameters, config.is_distinguished(&env.name))?;
        breakdowns.insert(env.name.clone(), breakdown);
        ordered.push(env.name.clone());
    }

    let fixed_labels = model.fixed_annual_labels();
    let totals = aggregate(
        &breakdowns,
        &ordered,
        &fixed_labels,
        MissingEnvironment::Reject,
    )?;
    let insights = build_insights(&breakdowns, &ordered, &totals);

    Ok(ComparisonReport {
        generated_at: chrono::Utc::now().to_rfc3339(),
        distinguished_environment: config.distinguished_environment.clone(),
        environments: ordered,
        breakdowns,
        totals,
        insights,
    })
}

/// Render a USD amount with two decimals and thousands separators.
pub fn format_usd(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let dollars = cents / 100;
    let fraction = cents % 100;

    let digits = dollars.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${grouped}.{fraction:02}")
}
