//! Cross-environment insights: the costliest environment, the dominant
//! line item, and ranking support for table highlighting.

use crate::aggregate::AggregateTotals;
use crate::breakdown::CostBreakdown;
use crate::report::format_usd;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// The line item with the largest summed cost across the selected
/// environments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopContributor {
    pub label: String,
    /// Sum of the label's amounts across the selected environments.
    pub total: f64,
}

/// The environment with the largest annual total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostliestEnvironment {
    pub name: String,
    pub annual_total: f64,
}

/// Derived comparison insights, ready for a renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostInsights {
    pub costliest_environment: Option<CostliestEnvironment>,
    pub top_contributor: Option<TopContributor>,
    pub recommendations: Vec<String>,
}

/// Sum each line-item label across the selected environments and return the
/// strictly largest. Ties resolve to the lexicographically first label, and
/// the result does not depend on the order of `selected`. Selected
/// environments without a breakdown contribute nothing.
pub fn top_contributor(
    breakdowns: &BTreeMap<String, CostBreakdown>,
    selected: &[String],
) -> Option<TopContributor> {
    let selected: BTreeSet<&str> = selected.iter().map(String::as_str).collect();

    let mut sums: BTreeMap<&str, f64> = BTreeMap::new();
    for name in &selected {
        if let Some(breakdown) = breakdowns.get(*name) {
            for (label, amount) in breakdown.iter() {
                *sums.entry(label).or_insert(0.0) += amount;
            }
        }
    }

    // Lexicographic iteration plus a strict comparison keeps the first
    // label on ties.
    let mut best: Option<(&str, f64)> = None;
    for (label, sum) in sums {
        if best.is_none_or(|(_, top)| sum > top) {
            best = Some((label, sum));
        }
    }

    best.map(|(label, total)| TopContributor {
        label: label.to_string(),
        total,
    })
}

/// The environment with the largest annual total; ties resolve to the
/// lexicographically first name.
pub fn costliest_environment(totals: &AggregateTotals) -> Option<CostliestEnvironment> {
    let mut best: Option<(&str, f64)> = None;
    for (name, env_totals) in &totals.per_env {
        if best.is_none_or(|(_, top)| env_totals.annual_total > top) {
            best = Some((name, env_totals.annual_total));
        }
    }

    best.map(|(name, annual_total)| CostliestEnvironment {
        name: name.to_string(),
        annual_total,
    })
}

/// Rank each value descending: 0 is the largest. Equal values share a rank.
///
/// Renderers query this to highlight maxima (rank 0) or runners-up (rank 1)
/// within a table column or row.
pub fn rank_descending(values: &[f64]) -> Vec<usize> {
    values
        .iter()
        .map(|v| values.iter().filter(|other| **other > *v).count())
        .collect()
}

/// Assemble the insight block for a comparison.
pub fn build_insights(
    breakdowns: &BTreeMap<String, CostBreakdown>,
    selected: &[String],
    totals: &AggregateTotals,
) -> CostInsights {
    let costliest = costliest_environment(totals);
    let top = top_contributor(breakdowns, selected);

    let mut recommendations = Vec::new();
    if let Some(env) = &costliest {
        recommendations.push(format!(
            "{} has the highest annual cost at {}.",
            env.name,
            format_usd(env.annual_total)
        ));
    }
    if let Some(contributor) = &top {
        recommendations.push(format!(
            "'{}' drives the most total cost ({}). Consider optimizing its usage first.",
            contributor.label,
            format_usd(contributor.total)
        ));
    }

    CostInsights {
        costliest_environment: costliest,
        top_contributor: top,
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{aggregate, MissingEnvironment};

    fn sample_breakdowns() -> BTreeMap<String, CostBreakdown> {
        let mut production = CostBreakdown::new();
        production.insert("CodeBuild", 150.0);
        production.insert("CodePipeline - Minutes", 899.8);
        production.insert("GitLab", 73_350.0);

        let mut development = CostBreakdown::new();
        development.insert("CodeBuild", 600.0);
        development.insert("CodePipeline - Minutes", 899.8);

        let mut map = BTreeMap::new();
        map.insert("Production".to_string(), production);
        map.insert("Development".to_string(), development);
        map
    }

    #[test]
    fn test_top_contributor_sums_across_selected() {
        let breakdowns = sample_breakdowns();
        let selected = vec!["Production".to_string(), "Development".to_string()];

        let top = top_contributor(&breakdowns, &selected).unwrap();
        assert_eq!(top.label, "GitLab");
        assert_eq!(top.total, 73_350.0);
    }

    #[test]
    fn test_top_contributor_excludes_unselected() {
        let breakdowns = sample_breakdowns();
        let selected = vec!["Development".to_string()];

        let top = top_contributor(&breakdowns, &selected).unwrap();
        // Without Production there is no license cost in play.
        assert_eq!(top.label, "CodePipeline - Minutes");
        assert!((top.total - 899.8).abs() < 1e-9);
    }

    #[test]
    fn test_top_contributor_is_stable_under_reordering() {
        let breakdowns = sample_breakdowns();
        let forward = vec!["Production".to_string(), "Development".to_string()];
        let reverse = vec!["Development".to_string(), "Production".to_string()];

        assert_eq!(
            top_contributor(&breakdowns, &forward),
            top_contributor(&breakdowns, &reverse)
        );
    }

    #[test]
    fn test_top_contributor_tie_breaks_lexicographically() {
        let mut breakdown = CostBreakdown::new();
        breakdown.insert("Beta", 10.0);
        breakdown.insert("Alpha", 10.0);
        let mut map = BTreeMap::new();
        map.insert("Production".to_string(), breakdown);

        let top = top_contributor(&map, &["Production".to_string()]).unwrap();
        assert_eq!(top.label, "Alpha");
    }

    #[test]
    fn test_top_contributor_empty_selection() {
        let breakdowns = sample_breakdowns();
        assert_eq!(top_contributor(&breakdowns, &[]), None);
    }

    #[test]
    fn test_costliest_environment() {
        let breakdowns = sample_breakdowns();
        let selected = vec!["Production".to_string(), "Development".to_string()];
        let totals = aggregate(
            &breakdowns,
            &selected,
            &["GitLab".to_string()].into_iter().collect(),
            MissingEnvironment::Reject,
        )
        .unwrap();

        let costliest = costliest_environment(&totals).unwrap();
        assert_eq!(costliest.name, "Production");
    }

    #[test]
    fn test_rank_descending() {
        assert_eq!(rank_descending(&[10.0, 30.0, 20.0]), vec![2, 0, 1]);
        // Equal values share a rank.
        assert_eq!(rank_descending(&[5.0, 5.0, 1.0]), vec![0, 0, 2]);
        assert_eq!(rank_descending(&[]), Vec::<usize>::new());
    }

    #[test]
    fn test_build_insights_mentions_both_findings() {
        let breakdowns = sample_breakdowns();
        let selected = vec!["Production".to_string(), "Development".to_string()];
        let totals = aggregate(
            &breakdowns,
            &selected,
            &["GitLab".to_string()].into_iter().collect(),
            MissingEnvironment::Reject,
        )
        .unwrap();

        let insights = build_insights(&breakdowns, &selected, &totals);
        assert_eq!(insights.recommendations.len(), 2);
        assert!(insights.recommendations[0].contains("Production"));
        assert!(insights.recommendations[1].contains("GitLab"));
    }
}
