use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-environment mapping of line-item label to a USD amount.
///
/// Amounts are monthly unless the label belongs to the configured
/// fixed-annual set (see [`crate::aggregate`]). Backed by a `BTreeMap` so
/// iteration is lexicographic and every derived result is reproducible.
/// A label that was never inserted reads as zero cost, never as "unknown".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CostBreakdown {
    items: BTreeMap<String, f64>,
}

impl CostBreakdown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, label: impl Into<String>, amount: f64) {
        self.items.insert(label.into(), amount);
    }

    /// Amount for a label; absent labels are zero cost.
    pub fn get(&self, label: &str) -> f64 {
        self.items.get(label).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.items.contains_key(label)
    }

    /// Line items in lexicographic label order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.items.iter().map(|(label, amount)| (label.as_str(), *amount))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of every line item, fixed-annual and usage-based alike.
    pub fn total(&self) -> f64 {
        self.items.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_label_reads_as_zero() {
        let breakdown = CostBreakdown::new();
        assert_eq!(breakdown.get("CodeBuild"), 0.0);
        assert!(!breakdown.contains("CodeBuild"));
    }

    #[test]
    fn test_iteration_is_lexicographic() {
        let mut breakdown = CostBreakdown::new();
        breakdown.insert("Zeta", 1.0);
        breakdown.insert("Alpha", 2.0);
        breakdown.insert("Mid", 3.0);

        let labels: Vec<&str> = breakdown.labels().collect();
        assert_eq!(labels, vec!["Alpha", "Mid", "Zeta"]);
    }

    #[test]
    fn test_total_sums_all_items() {
        let mut breakdown = CostBreakdown::new();
        breakdown.insert("A", 1.5);
        breakdown.insert("B", 2.5);
        assert_eq!(breakdown.total(), 4.0);
    }
}
