//! Aggregate game statistics.
//!
//! Process-wide counters keyed by category label, e.g. `total_games` or
//! `games_3x3`. Counters are created lazily on first increment and only
//! ever go up.

use std::collections::BTreeMap;

/// Category-keyed monotonic counters.
#[derive(Debug, Clone, Default)]
pub struct StatsAggregator {
    /// Ordered map so snapshots iterate deterministically
    counters: BTreeMap<String, u64>,
}

impl StatsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment a category, creating it at zero first if unseen.
    pub fn increment(&mut self, category: &str) {
        *self.counters.entry(category.to_string()).or_insert(0) += 1;
    }

    /// Current count for a category; 0 if never incremented.
    pub fn get(&self, category: &str) -> u64 {
        self.counters.get(category).copied().unwrap_or(0)
    }

    /// All counters in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counters.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of distinct categories.
    pub fn len(&self) -> usize {
        self.counters.len()
    }

    /// Check if no category has been incremented yet.
    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }

    /// Read-only JSON snapshot of every counter.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!(self.counters)
    }
}
