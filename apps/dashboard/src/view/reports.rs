//! Recruiter reports: verdict distribution and per-job performance.

use serde::Serialize;

use crate::models::{Candidate, DashboardMetrics, JobBoard, Verdict};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerdictShare {
    pub verdict: Verdict,
    pub count: usize,
    /// Share of all applications the backend reports, 0.0 – 1.0.
    pub ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobScore {
    pub title: String,
    pub avg_score: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobPerformance {
    pub title: String,
    pub applicants: usize,
    pub avg_score: u32,
    pub high_fit: usize,
    pub medium_fit: usize,
    pub low_fit: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportView {
    pub summary: DashboardMetrics,
    pub verdict_distribution: Vec<VerdictShare>,
    pub avg_score_by_job: Vec<JobScore>,
    pub performance_by_job: Vec<JobPerformance>,
}

pub fn build_report(
    metrics: &DashboardMetrics,
    candidates: &[Candidate],
    jobs: &JobBoard,
) -> ReportView {
    let total = metrics.total_applications;
    let verdict_distribution = Verdict::ALL
        .iter()
        .map(|verdict| {
            let count = candidates.iter().filter(|c| c.verdict == *verdict).count();
            let ratio = if total > 0 {
                (count as f64 / total as f64).min(1.0)
            } else {
                0.0
            };
            VerdictShare {
                verdict: *verdict,
                count,
                ratio,
            }
        })
        .collect();

    let performance_by_job: Vec<JobPerformance> = jobs
        .titles()
        .map(|title| job_performance(title, candidates))
        .collect();

    let avg_score_by_job = performance_by_job
        .iter()
        .filter(|p| p.applicants > 0)
        .map(|p| JobScore {
            title: p.title.clone(),
            avg_score: p.avg_score,
        })
        .collect();

    ReportView {
        summary: metrics.clone(),
        verdict_distribution,
        avg_score_by_job,
        performance_by_job,
    }
}

fn job_performance(title: &str, candidates: &[Candidate]) -> JobPerformance {
    let for_job: Vec<&Candidate> = candidates.iter().filter(|c| c.job_role == title).collect();
    let count_of = |verdict: Verdict| for_job.iter().filter(|c| c.verdict == verdict).count();

    JobPerformance {
        title: title.to_string(),
        applicants: for_job.len(),
        avg_score: average_score(&for_job),
        high_fit: count_of(Verdict::High),
        medium_fit: count_of(Verdict::Medium),
        low_fit: count_of(Verdict::Low),
    }
}

fn average_score(candidates: &[&Candidate]) -> u32 {
    if candidates.is_empty() {
        return 0;
    }
    let sum: u32 = candidates.iter().map(|c| c.score).sum();
    (f64::from(sum) / candidates.len() as f64).round() as u32
}
