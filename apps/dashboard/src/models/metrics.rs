use serde::{Deserialize, Serialize};

/// Where a set of numbers came from, so views can label demo data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    Backend,
    Demo,
}

/// Aggregate counts shown on the recruiter dashboard and reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardMetrics {
    pub total_applications: u64,
    pub open_positions: u64,
    pub high_fit_candidates: u64,
    pub avg_score: u32,
    pub source: DataSource,
}
