//! Pure projection from session state plus fetched page data to the JSON
//! view model a client draws.

pub mod pages;
pub mod reports;

use serde::Serialize;

use crate::models::{ApplicationFeedback, Candidate, DashboardMetrics, Job};
use crate::session::{JobForm, Modal, Notice, Page, Role, SessionState};

pub use pages::PageBody;
pub use reports::build_report;

/// Data fetched by the render pass for the current page. Absent fields mean
/// the page did not need them or they could not be loaded.
#[derive(Debug, Clone, Default)]
pub struct PageData {
    pub metrics: Option<DashboardMetrics>,
    pub candidates: Option<Vec<Candidate>>,
    pub notices: Vec<Notice>,
    pub feedback: Option<ApplicationFeedback>,
    pub backend_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Header {
    pub title: String,
    pub subtitle: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavItem {
    pub label: &'static str,
    pub page: Page,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BackendStatus {
    pub url: String,
    pub enabled: bool,
    pub synced: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModalView {
    CreateJob { form: JobForm },
    JobDetails { title: String, job: Option<Job> },
    CandidateDetails { candidate: Option<Candidate> },
    Analyze,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct View {
    pub role: Option<Role>,
    pub page: Page,
    pub header: Header,
    pub nav: Vec<NavItem>,
    pub notices: Vec<Notice>,
    pub modals: Vec<ModalView>,
    pub feedback: Option<ApplicationFeedback>,
    pub backend: BackendStatus,
    pub body: PageBody,
}

fn nav_entries(role: Role) -> &'static [(&'static str, Page)] {
    match role {
        Role::Recruiter => &[
            ("Dashboard", Page::Dashboard),
            ("Job Postings", Page::JobPostings),
            ("Candidates", Page::Candidates),
            ("Reports", Page::Reports),
            ("Help & Support", Page::HelpSupport),
        ],
        Role::Candidate => &[
            ("Dashboard", Page::Dashboard),
            ("Job Postings", Page::JobPostings),
            ("Help & Support", Page::HelpSupport),
        ],
    }
}

fn nav(role: Role, current: Page) -> Vec<NavItem> {
    // The applicants list lives under job postings
    let highlighted = match current {
        Page::JobApplicants => Page::JobPostings,
        page => page,
    };
    nav_entries(role)
        .iter()
        .map(|&(label, page)| NavItem {
            label,
            page,
            active: page == highlighted,
        })
        .collect()
}

fn header(state: &SessionState) -> Header {
    let Some(role) = state.role else {
        return Header {
            title: "AI Resume Analyzer".to_string(),
            subtitle: None,
        };
    };
    let title = match state.page {
        Page::Home | Page::Dashboard => "Dashboard".to_string(),
        Page::JobPostings => "Job Postings".to_string(),
        Page::JobApplicants => match &state.selected_job {
            Some(title) => format!("Applicants for {title}"),
            None => "Job Postings".to_string(),
        },
        Page::Candidates => "Candidates".to_string(),
        Page::Reports => "Reports".to_string(),
        Page::HelpSupport => "Help & Support".to_string(),
    };
    let subtitle = match role {
        Role::Recruiter => "Recruiter View",
        Role::Candidate => "Student View",
    };
    Header {
        title,
        subtitle: Some(subtitle),
    }
}

fn modal_view(modal: &Modal, state: &SessionState, data: &PageData) -> ModalView {
    match modal {
        Modal::CreateJob => ModalView::CreateJob {
            form: state.job_form.clone(),
        },
        Modal::JobDetails { title } => ModalView::JobDetails {
            title: title.clone(),
            job: state.jobs.get(title).cloned(),
        },
        Modal::CandidateDetails { id } => ModalView::CandidateDetails {
            candidate: data
                .candidates
                .as_deref()
                .and_then(|all| all.iter().find(|c| c.id.as_ref() == Some(id)))
                .cloned(),
        },
        Modal::Analyze => ModalView::Analyze,
    }
}

fn unavailable(what: &str) -> PageBody {
    PageBody::Unavailable {
        message: format!("Could not load {what}. Check the backend connection and try again."),
    }
}

fn body(state: &SessionState, data: &PageData) -> PageBody {
    let Some(role) = state.role else {
        return pages::landing();
    };
    if !role.allows(state.page) {
        return pages::landing();
    }
    let candidates = data.candidates.as_deref();

    match (role, state.page) {
        (Role::Recruiter, Page::Dashboard) => match (&data.metrics, candidates) {
            (Some(metrics), Some(candidates)) => {
                pages::recruiter_dashboard(metrics.clone(), candidates, &state.jobs)
            }
            (Some(metrics), None) => pages::recruiter_dashboard(metrics.clone(), &[], &state.jobs),
            (None, _) => unavailable("dashboard metrics"),
        },
        (Role::Candidate, Page::Dashboard) => {
            pages::candidate_dashboard(&state.pending_applications)
        }
        (_, Page::JobPostings) => pages::job_postings(&state.jobs, role),
        (_, Page::JobApplicants) => match (&state.selected_job, candidates) {
            (Some(title), Some(candidates)) => pages::job_applicants(title, candidates),
            (Some(title), None) => pages::job_applicants(title, &[]),
            (None, _) => PageBody::Unavailable {
                message: "No job selected.".to_string(),
            },
        },
        (_, Page::Candidates) => match candidates {
            Some(candidates) => pages::candidates_table(candidates, &state.candidate_filter),
            None => unavailable("candidates"),
        },
        (_, Page::Reports) => match &data.metrics {
            Some(metrics) => PageBody::Reports(build_report(
                metrics,
                candidates.unwrap_or_default(),
                &state.jobs,
            )),
            None => unavailable("report metrics"),
        },
        (_, Page::HelpSupport) => pages::help_support(),
        (_, Page::Home) => pages::landing(),
    }
}

/// Projects `state` and this pass's data into a view. Never touches the
/// network or mutates the session.
pub fn render(state: &SessionState, data: PageData) -> View {
    let nav = state
        .role
        .map(|role| nav(role, state.page))
        .unwrap_or_default();
    let modals = state
        .modals
        .iter()
        .map(|modal| modal_view(modal, state, &data))
        .collect();
    let body = body(state, &data);

    View {
        role: state.role,
        page: state.page,
        header: header(state),
        nav,
        notices: data.notices,
        modals,
        feedback: data.feedback,
        backend: BackendStatus {
            url: data.backend_url,
            enabled: state.use_backend,
            synced: state.backend_synced,
        },
        body,
    }
}
