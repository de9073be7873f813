//! Stock summary: headline counts and the doughnut chart.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::Medicine;

/// Counts over the full list. Expired and low stock are independent
/// predicates, so one medicine can count in both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SummaryCounts {
    pub total: usize,
    pub expired: usize,
    pub low_stock: usize,
}

impl SummaryCounts {
    /// `total - expired - low_stock`; negative when the two overlap enough.
    pub fn healthy(&self) -> i64 {
        self.total as i64 - self.expired as i64 - self.low_stock as i64
    }
}

pub fn summarize(medicines: &[Medicine], today: NaiveDate) -> SummaryCounts {
    SummaryCounts {
        total: medicines.len(),
        expired: medicines.iter().filter(|m| m.is_expired(today)).count(),
        low_stock: medicines.iter().filter(|m| m.is_low_stock()).count(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Doughnut,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSegment {
    pub label: &'static str,
    pub value: i64,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartModel {
    pub kind: ChartKind,
    pub segments: Vec<ChartSegment>,
}

impl ChartModel {
    /// Sum of the segments that can be drawn (negative values draw nothing).
    pub fn drawable_total(&self) -> i64 {
        self.segments.iter().map(|s| s.value.max(0)).sum()
    }
}

pub fn build_chart(counts: &SummaryCounts) -> ChartModel {
    ChartModel {
        kind: ChartKind::Doughnut,
        segments: vec![
            ChartSegment {
                label: "Expired",
                value: counts.expired as i64,
                color: "#e74c3c",
            },
            ChartSegment {
                label: "Low Stock",
                value: counts.low_stock as i64,
                color: "#f1c40f",
            },
            ChartSegment {
                label: "Healthy",
                value: counts.healthy(),
                color: "#2ecc71",
            },
        ],
    }
}
