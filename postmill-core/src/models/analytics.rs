//! Analytics time series and the reshaper that builds them.
//!
//! Platforms report metrics per day (`day → {metric → value}`); callers
//! want one ordered series per metric. [`reshape_daily_metrics`] transposes
//! the former into the latter.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// Series Types
// ============================================================================

/// One data point of a series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsPoint {
    /// Day the value belongs to.
    pub date: NaiveDate,
    /// Metric value for that day.
    pub total: f64,
}

/// One metric over time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSeries {
    /// Human-readable metric label.
    pub label: String,
    /// Points in platform report order.
    pub data: Vec<AnalyticsPoint>,
}

impl AnalyticsSeries {
    /// Creates an empty series.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            data: Vec::new(),
        }
    }
}

// ============================================================================
// Reshaper
// ============================================================================

/// One day of a platform report.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DailyMetrics {
    /// Report day.
    pub date: NaiveDate,
    /// Metric values by platform metric key.
    #[serde(default)]
    pub metrics: HashMap<String, f64>,
}

/// Maps a platform metric key to an output series label.
#[derive(Debug, Clone, Copy)]
pub struct MetricSpec {
    /// Output label.
    pub label: &'static str,
    /// Platform metric key.
    pub key: &'static str,
}

/// Transposes per-day metrics into one series per metric.
///
/// The first entry of `specs` is the primary metric: days without it are
/// skipped for every series (the platform has not collected that day yet).
/// Secondary metrics missing on a kept day contribute `0.0`, so all series
/// share the same date axis.
pub fn reshape_daily_metrics(days: &[DailyMetrics], specs: &[MetricSpec]) -> Vec<AnalyticsSeries> {
    let mut series: Vec<AnalyticsSeries> =
        specs.iter().map(|s| AnalyticsSeries::new(s.label)).collect();

    let Some(primary) = specs.first() else {
        return series;
    };

    for day in days {
        if !day.metrics.contains_key(primary.key) {
            continue;
        }
        for (spec, out) in specs.iter().zip(series.iter_mut()) {
            out.data.push(AnalyticsPoint {
                date: day.date,
                total: day.metrics.get(spec.key).copied().unwrap_or(0.0),
            });
        }
    }

    series
}
