//! Aggregate statistics over roll history

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::entities::RollResult;

/// How often a particular total was rolled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalFrequency {
    pub total: i64,
    pub count: usize,
}

/// Summary of roll totals across a history
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RollStatistics {
    pub total_rolls: usize,
    pub average: f64,
    pub min: i64,
    pub max: i64,
    /// Totals in ascending order with their counts
    pub distribution: Vec<TotalFrequency>,
    /// Highest count in `distribution`, for histogram scaling
    pub max_count: usize,
}

impl RollStatistics {
    /// Compute statistics, or `None` for an empty history
    pub fn from_history(history: &[RollResult]) -> Option<Self> {
        let first = history.first()?.total;

        let mut sum: i128 = 0;
        let mut min = first;
        let mut max = first;
        let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
        for roll in history {
            sum += i128::from(roll.total);
            min = min.min(roll.total);
            max = max.max(roll.total);
            *counts.entry(roll.total).or_insert(0) += 1;
        }

        let distribution: Vec<TotalFrequency> = counts
            .into_iter()
            .map(|(total, count)| TotalFrequency { total, count })
            .collect();
        let max_count = distribution.iter().map(|f| f.count).max().unwrap_or(0);

        Some(Self {
            total_rolls: history.len(),
            average: sum as f64 / history.len() as f64,
            min,
            max,
            distribution,
            max_count,
        })
    }

    /// Fraction of the tallest histogram bar reached by `count`
    pub fn relative_frequency(&self, count: usize) -> f64 {
        if self.max_count == 0 {
            0.0
        } else {
            count as f64 / self.max_count as f64
        }
    }
}
