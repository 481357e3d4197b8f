use serde::Serialize;

use crate::models::{Candidate, DashboardMetrics, Job, JobBoard, PendingApplication};
use crate::session::{CandidateFilter, Role};
use crate::view::reports::ReportView;

/// Characters of description shown on candidate-facing job cards.
const DESCRIPTION_PREVIEW_CHARS: usize = 120;
const RECENT_CANDIDATES: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleChoice {
    pub role: Role,
    pub label: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobCard {
    pub title: String,
    pub department: String,
    pub description: Option<String>,
    pub applicants: u32,
    pub avg_score: f64,
    /// Local counters moved since the last fetch.
    pub stale: bool,
    /// False when the job has no backend id yet.
    pub can_apply: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActiveJob {
    pub title: String,
    pub applicants: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum PageBody {
    Landing {
        heading: &'static str,
        choices: Vec<RoleChoice>,
    },
    RecruiterDashboard {
        metrics: DashboardMetrics,
        recent_candidates: Vec<Candidate>,
        active_jobs: Vec<ActiveJob>,
    },
    CandidateDashboard {
        greeting: &'static str,
        applications: Vec<PendingApplication>,
    },
    JobPostings {
        jobs: Vec<JobCard>,
        can_create: bool,
    },
    JobApplicants {
        job_title: String,
        applicants: Vec<Candidate>,
    },
    Candidates {
        candidates: Vec<Candidate>,
        total: usize,
        filter: CandidateFilter,
        active_filters: Vec<String>,
        job_roles: Vec<String>,
    },
    Reports(ReportView),
    HelpSupport {
        faqs: Vec<&'static str>,
        support_email: &'static str,
    },
    /// Shown when the data a page depends on could not be loaded.
    Unavailable {
        message: String,
    },
}

pub fn landing() -> PageBody {
    PageBody::Landing {
        heading: "Welcome to the AI Resume Analyzer",
        choices: vec![
            RoleChoice {
                role: Role::Recruiter,
                label: "I am a Recruiter",
                description: "Analyze resumes, manage candidates, and streamline your hiring process.",
            },
            RoleChoice {
                role: Role::Candidate,
                label: "I am a Student",
                description: "Get instant feedback on your resume and improve your job applications.",
            },
        ],
    }
}

pub fn recruiter_dashboard(
    metrics: DashboardMetrics,
    candidates: &[Candidate],
    jobs: &JobBoard,
) -> PageBody {
    let active_jobs = jobs
        .iter()
        .filter(|job| job.is_active)
        .map(|job| ActiveJob {
            title: job.title.clone(),
            applicants: match &job.id {
                Some(id) => candidates
                    .iter()
                    .filter(|c| c.job_id.as_ref() == Some(id))
                    .count(),
                None => job.applicants as usize,
            },
        })
        .collect();

    PageBody::RecruiterDashboard {
        metrics,
        recent_candidates: candidates.iter().take(RECENT_CANDIDATES).cloned().collect(),
        active_jobs,
    }
}

pub fn candidate_dashboard(applications: &[PendingApplication]) -> PageBody {
    PageBody::CandidateDashboard {
        greeting: "Ready to land your dream job? Browse open positions and get instant AI \
                   feedback on your resume to improve your chances.",
        applications: applications.to_vec(),
    }
}

pub fn job_postings(jobs: &JobBoard, role: Role) -> PageBody {
    PageBody::JobPostings {
        jobs: jobs.iter().map(|job| job_card(job, role)).collect(),
        can_create: role == Role::Recruiter,
    }
}

fn job_card(job: &Job, role: Role) -> JobCard {
    JobCard {
        title: job.title.clone(),
        department: job.department.clone(),
        description: (role == Role::Candidate)
            .then(|| job.description_preview(DESCRIPTION_PREVIEW_CHARS)),
        applicants: job.applicants,
        avg_score: job.avg_score,
        stale: job.stale,
        can_apply: job.id.is_some(),
    }
}

pub fn job_applicants(job_title: &str, candidates: &[Candidate]) -> PageBody {
    PageBody::JobApplicants {
        job_title: job_title.to_string(),
        applicants: candidates
            .iter()
            .filter(|c| c.job_role == job_title)
            .cloned()
            .collect(),
    }
}

pub fn candidates_table(candidates: &[Candidate], filter: &CandidateFilter) -> PageBody {
    let filtered = filter_candidates(candidates, filter);
    PageBody::Candidates {
        total: filtered.len(),
        candidates: filtered,
        filter: filter.clone(),
        active_filters: active_filters(filter),
        job_roles: job_role_options(candidates),
    }
}

pub fn help_support() -> PageBody {
    PageBody::HelpSupport {
        faqs: vec![
            "How does the AI analysis work?",
            "What file types are supported for upload?",
            "How accurate is the AI feedback?",
            "Can I analyze multiple resumes at once?",
            "Who can see my analysis results?",
        ],
        support_email: "support@innomatics.in",
    }
}

fn search_term(filter: &CandidateFilter) -> Option<&str> {
    filter
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

pub fn filter_candidates(candidates: &[Candidate], filter: &CandidateFilter) -> Vec<Candidate> {
    let search = search_term(filter).map(str::to_lowercase);
    candidates
        .iter()
        .filter(|c| match &search {
            Some(term) => c.name.to_lowercase().contains(term.as_str()),
            None => true,
        })
        .filter(|c| match &filter.job_role {
            Some(role) => &c.job_role == role,
            None => true,
        })
        .filter(|c| match filter.verdict {
            Some(verdict) => c.verdict == verdict,
            None => true,
        })
        .cloned()
        .collect()
}

pub fn active_filters(filter: &CandidateFilter) -> Vec<String> {
    let mut active = Vec::new();
    if let Some(term) = search_term(filter) {
        active.push(format!("Name: '{term}'"));
    }
    if let Some(role) = &filter.job_role {
        active.push(format!("Role: {role}"));
    }
    if let Some(verdict) = filter.verdict {
        active.push(format!("Verdict: {}", verdict.label()));
    }
    active
}

pub fn job_role_options(candidates: &[Candidate]) -> Vec<String> {
    let mut roles: Vec<String> = candidates.iter().map(|c| c.job_role.clone()).collect();
    roles.sort();
    roles.dedup();
    roles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DataSource, Verdict};
    use crate::normalize::{normalize_candidates, normalize_jobs};
    use serde_json::json;

    fn candidates() -> Vec<Candidate> {
        normalize_candidates(&json!([
            {"id": 1, "job_id": 10, "relevance_score": 88, "verdict": "High Fit",
             "resume_filename": "john_doe_resume.pdf", "job": {"job_title": "Frontend Developer"}},
            {"id": 2, "job_id": 10, "relevance_score": 66, "verdict": "Medium",
             "resume_filename": "jane_smith_resume.pdf", "job": {"job_title": "Frontend Developer"}},
            {"id": 3, "job_id": 11, "relevance_score": 41, "verdict": "Low",
             "resume_filename": "johnny_cash_resume.pdf", "job": {"job_title": "Data Analyst"}}
        ]))
    }

    #[test]
    fn test_search_is_case_insensitive_and_trimmed() {
        let filter = CandidateFilter {
            search: Some("  JOHN ".to_string()),
            ..CandidateFilter::default()
        };
        let names: Vec<_> = filter_candidates(&candidates(), &filter)
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["John Doe", "Johnny Cash"]);
    }

    #[test]
    fn test_filters_combine() {
        let filter = CandidateFilter {
            search: Some("john".to_string()),
            job_role: Some("Frontend Developer".to_string()),
            verdict: Some(Verdict::High),
        };
        let result = filter_candidates(&candidates(), &filter);
        assert_eq!(result.len(), 1);
        assert_eq!(
            active_filters(&filter),
            vec!["Name: 'john'", "Role: Frontend Developer", "Verdict: High Fit"]
        );
    }

    #[test]
    fn test_blank_search_is_not_an_active_filter() {
        let filter = CandidateFilter {
            search: Some("   ".to_string()),
            ..CandidateFilter::default()
        };
        assert!(active_filters(&filter).is_empty());
        assert_eq!(filter_candidates(&candidates(), &filter).len(), 3);
    }

    #[test]
    fn test_job_role_options_are_unique() {
        assert_eq!(
            job_role_options(&candidates()),
            vec!["Data Analyst", "Frontend Developer"]
        );
    }

    #[test]
    fn test_dashboard_counts_applicants_by_job_id() {
        let jobs = normalize_jobs(&json!([
            {"id": 10, "job_title": "Frontend Developer"},
            {"id": 12, "job_title": "SRE", "is_active": false}
        ]));
        let metrics = DashboardMetrics {
            total_applications: 3,
            open_positions: 1,
            high_fit_candidates: 1,
            avg_score: 65,
            source: DataSource::Backend,
        };
        match recruiter_dashboard(metrics, &candidates(), &jobs) {
            PageBody::RecruiterDashboard { active_jobs, recent_candidates, .. } => {
                assert_eq!(recent_candidates.len(), 3);
                assert_eq!(
                    active_jobs,
                    vec![ActiveJob {
                        title: "Frontend Developer".to_string(),
                        applicants: 2
                    }]
                );
            }
            other => panic!("unexpected body {other:?}"),
        }
    }

    #[test]
    fn test_candidate_job_cards_carry_preview() {
        let jobs = normalize_jobs(&json!([{"job_title": "Writer", "description": "Words"}]));
        match job_postings(&jobs, Role::Candidate) {
            PageBody::JobPostings { jobs, can_create } => {
                assert!(!can_create);
                assert_eq!(jobs[0].description.as_deref(), Some("Words"));
                assert!(!jobs[0].can_apply);
            }
            other => panic!("unexpected body {other:?}"),
        }
    }
}
