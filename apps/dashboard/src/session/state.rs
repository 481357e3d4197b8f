use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::fallback::demo_jobs;
use crate::models::{
    ApplicationFeedback, JobBoard, ParsedJobDocument, PendingApplication, RecordId, Verdict,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Recruiter,
    Candidate,
}

impl Role {
    /// Pages reachable from this role's navigation.
    pub fn allows(&self, page: Page) -> bool {
        match self {
            Role::Recruiter => page != Page::Home,
            Role::Candidate => matches!(
                page,
                Page::Dashboard | Page::JobPostings | Page::HelpSupport
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    #[default]
    Home,
    Dashboard,
    JobPostings,
    JobApplicants,
    Candidates,
    Reports,
    HelpSupport,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Modal {
    CreateJob,
    JobDetails { title: String },
    CandidateDetails { id: RecordId },
    Analyze,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Inline, dismissible message shown on the next render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, message: message.into() }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Success, message: message.into() }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Warning, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Title,
    Department,
    Description,
    Requirements,
}

/// Typed values of the create-job form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobFormFields {
    pub title: String,
    pub department: String,
    pub description: String,
    pub requirements: String,
}

impl JobFormFields {
    pub fn set(&mut self, field: FormField, text: String) {
        match field {
            FormField::Title => self.title = text,
            FormField::Department => self.department = text,
            FormField::Description => self.description = text,
            FormField::Requirements => self.requirements = text,
        }
    }
}

impl From<&ParsedJobDocument> for JobFormFields {
    fn from(doc: &ParsedJobDocument) -> Self {
        Self {
            title: doc.job_title.clone(),
            department: doc.department.clone(),
            description: doc.description.clone(),
            requirements: doc.requirements.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentSource {
    Backend,
    Demo,
}

/// Create-job form. Parsed document values are cached apart from what the
/// user typed, so re-rendering never overwrites edits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobForm {
    pub parsed: ParsedJobDocument,
    pub parsing_completed: bool,
    pub parsed_from: Option<String>,
    pub parse_source: Option<DocumentSource>,
    pub fields: JobFormFields,
}

/// Filters on the recruiter candidates table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateFilter {
    pub search: Option<String>,
    pub job_role: Option<String>,
    pub verdict: Option<Verdict>,
}

/// Everything needed to reproduce the current screen for one visitor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub role: Option<Role>,
    pub page: Page,
    pub selected_job: Option<String>,
    pub modals: Vec<Modal>,
    pub jobs: JobBoard,
    pub backend_synced: bool,
    pub use_backend: bool,
    pub backend_url: Option<String>,
    pub job_form: JobForm,
    pub candidate_filter: CandidateFilter,
    pub pending_applications: Vec<PendingApplication>,
    pub feedback_queue: VecDeque<ApplicationFeedback>,
    pub notices: VecDeque<Notice>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(true)
    }
}

impl SessionState {
    /// A first visit: no role, demo jobs until the backend answers.
    pub fn new(use_backend: bool) -> Self {
        Self {
            role: None,
            page: Page::Home,
            selected_job: None,
            modals: Vec::new(),
            jobs: demo_jobs(),
            backend_synced: false,
            use_backend,
            backend_url: None,
            job_form: JobForm::default(),
            candidate_filter: CandidateFilter::default(),
            pending_applications: Vec::new(),
            feedback_queue: VecDeque::new(),
            notices: VecDeque::new(),
        }
    }

    pub fn is_open(&self, modal: &Modal) -> bool {
        self.modals.contains(modal)
    }

    /// Dequeues the feedback to show on this render, if any.
    pub fn next_feedback(&mut self) -> Option<ApplicationFeedback> {
        self.feedback_queue.pop_front()
    }

    /// Drains the notices to show on this render.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }

    pub fn push_notice(&mut self, notice: Notice) {
        self.notices.push_back(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_role_is_limited_to_three_pages() {
        assert!(Role::Candidate.allows(Page::JobPostings));
        assert!(Role::Candidate.allows(Page::HelpSupport));
        assert!(!Role::Candidate.allows(Page::Reports));
        assert!(!Role::Candidate.allows(Page::JobApplicants));
        assert!(Role::Recruiter.allows(Page::Reports));
        assert!(!Role::Recruiter.allows(Page::Home));
    }

    #[test]
    fn test_new_session_starts_on_landing_with_demo_jobs() {
        let state = SessionState::new(true);
        assert_eq!(state.role, None);
        assert_eq!(state.page, Page::Home);
        assert!(!state.backend_synced);
        assert_eq!(state.jobs.len(), 3);
    }

    #[test]
    fn test_notices_drain_once() {
        let mut state = SessionState::default();
        state.push_notice(Notice::error("Backend down"));
        assert_eq!(state.take_notices().len(), 1);
        assert!(state.take_notices().is_empty());
    }

    #[test]
    fn test_modal_serde_shape() {
        let modal: Modal =
            serde_json::from_str(r#"{"kind":"job_details","title":"Data Analyst"}"#).unwrap();
        assert_eq!(
            modal,
            Modal::JobDetails {
                title: "Data Analyst".to_string()
            }
        );
    }
}
