//! Session transitions. `SessionState::apply` is pure: every side effect
//! (backend calls, uploads) happens in the dashboard controller, which then
//! reports what happened as one of these events.

use serde::Deserialize;
use tracing::debug;

use crate::models::{ApplicationFeedback, Job, JobBoard, ParsedJobDocument, PendingApplication};
use crate::session::state::{
    CandidateFilter, DocumentSource, FormField, JobForm, Modal, Notice, Page, Role,
    SessionState,
};

/// Events a browser may send directly.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiEvent {
    SelectRole { role: Role },
    Navigate { page: Page },
    ViewApplicants { title: String },
    BackToJobs,
    OpenModal { modal: Modal },
    CloseModal { modal: Modal },
    EditForm { field: FormField, text: String },
    ClearParsedForm,
    SetCandidateFilter { filter: CandidateFilter },
    SetBackendUrl { url: String },
    SetUseBackend { enabled: bool },
    DismissNotices,
    Logout,
}

/// Every transition, including those produced by the controller after a
/// backend call.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Ui(UiEvent),
    JobsSynced(JobBoard),
    /// Jobs folded into the board without counting as a backend sync.
    JobsMerged(JobBoard),
    SyncFailed(String),
    ApplicationSubmitted {
        job_title: String,
        feedback: ApplicationFeedback,
    },
    DocumentParsed {
        document: ParsedJobDocument,
        file_name: String,
        source: DocumentSource,
    },
    JobCreated(Job),
    Notify(Notice),
}

impl From<UiEvent> for Event {
    fn from(event: UiEvent) -> Self {
        Event::Ui(event)
    }
}

impl SessionState {
    pub fn apply(mut self, event: Event) -> Self {
        debug!("Applying {event:?}");
        match event {
            Event::Ui(ui) => return self.apply_ui(ui),
            Event::JobsSynced(board) => {
                if self.backend_synced {
                    self.jobs.merge(board);
                } else {
                    // First success: the demo board goes away entirely
                    self.jobs = board;
                    self.backend_synced = true;
                }
            }
            Event::JobsMerged(board) => self.jobs.merge(board),
            Event::SyncFailed(message) => {
                self.push_notice(Notice::error(format!(
                    "Failed to fetch jobs from backend: {message}"
                )));
            }
            Event::ApplicationSubmitted { job_title, feedback } => {
                if let Some(job) = self.jobs.get_mut(&job_title) {
                    job.record_application(feedback.score);
                }
                self.pending_applications.push(PendingApplication {
                    job_title: job_title.clone(),
                    resume_file: feedback.resume_filename.clone(),
                    score: feedback.score,
                    verdict: feedback.verdict,
                });
                self.push_notice(Notice::success(format!(
                    "Application submitted! Score: {}",
                    feedback.score
                )));
                self.close(&Modal::JobDetails { title: job_title });
                self.feedback_queue.push_back(feedback);
            }
            Event::DocumentParsed {
                document,
                file_name,
                source,
            } => {
                self.job_form.fields = (&document).into();
                self.job_form.parsed = document;
                self.job_form.parsing_completed = true;
                self.job_form.parsed_from = Some(file_name);
                self.job_form.parse_source = Some(source);
            }
            Event::JobCreated(job) => {
                self.push_notice(Notice::success(format!(
                    "Job posting '{}' created successfully!",
                    job.title
                )));
                self.jobs.upsert(job);
                self.job_form = JobForm::default();
                self.close(&Modal::CreateJob);
            }
            Event::Notify(notice) => self.push_notice(notice),
        }
        self
    }

    fn apply_ui(mut self, event: UiEvent) -> Self {
        match event {
            UiEvent::SelectRole { role } => {
                self.role = Some(role);
                self.page = Page::Dashboard;
                self.selected_job = None;
                self.modals.clear();
            }
            UiEvent::Navigate { page } => match self.role {
                Some(role) if role.allows(page) => {
                    self.page = page;
                    self.modals.clear();
                    if page != Page::JobApplicants {
                        self.selected_job = None;
                    }
                }
                _ => self.push_notice(Notice::error("That page is not available for your role.")),
            },
            UiEvent::ViewApplicants { title } => {
                if self.role == Some(Role::Recruiter) {
                    self.selected_job = Some(title);
                    self.page = Page::JobApplicants;
                    self.modals.clear();
                } else {
                    self.push_notice(Notice::error("Only recruiters can view applicants."));
                }
            }
            UiEvent::BackToJobs => {
                if self.role.is_some() {
                    self.page = Page::JobPostings;
                }
                self.selected_job = None;
            }
            UiEvent::OpenModal { modal } => {
                if !self.is_open(&modal) {
                    self.modals.push(modal);
                }
            }
            UiEvent::CloseModal { modal } => self.close(&modal),
            UiEvent::EditForm { field, text } => self.job_form.fields.set(field, text),
            UiEvent::ClearParsedForm => {
                self.job_form.parsed = ParsedJobDocument::default();
                self.job_form.parsing_completed = false;
                self.job_form.parsed_from = None;
                self.job_form.parse_source = None;
                self.push_notice(Notice::success(
                    "Form cleared! You can now fill manually or upload a new document.",
                ));
            }
            UiEvent::SetCandidateFilter { filter } => self.candidate_filter = filter,
            UiEvent::SetBackendUrl { url } => {
                let url = url.trim().trim_end_matches('/').to_string();
                if url.is_empty() {
                    self.backend_url = None;
                } else {
                    self.push_notice(Notice::success("Backend URL updated!"));
                    self.backend_url = Some(url);
                }
            }
            UiEvent::SetUseBackend { enabled } => self.use_backend = enabled,
            UiEvent::DismissNotices => self.notices.clear(),
            UiEvent::Logout => {
                let mut fresh = SessionState::new(self.use_backend);
                fresh.backend_url = self.backend_url;
                fresh.jobs = self.jobs;
                fresh.backend_synced = self.backend_synced;
                return fresh;
            }
        }
        self
    }

    fn close(&mut self, modal: &Modal) {
        self.modals.retain(|m| m != modal);
    }
}

/// Applies `event` to the state behind a lock guard.
pub fn transition(slot: &mut SessionState, event: impl Into<Event>) {
    let current = std::mem::take(slot);
    *slot = current.apply(event.into());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{JobDraft, RecordId, Verdict};
    use crate::normalize::normalize_jobs;
    use serde_json::json;

    fn recruiter() -> SessionState {
        SessionState::new(true).apply(UiEvent::SelectRole { role: Role::Recruiter }.into())
    }

    fn feedback(job_title: &str, score: u32) -> ApplicationFeedback {
        ApplicationFeedback {
            job_title: job_title.to_string(),
            score,
            verdict: Verdict::from_score(score),
            missing_skills: vec![],
            feedback: "ok".to_string(),
            recommendations: String::new(),
            application_id: Some(RecordId::Int(1)),
            resume_filename: "a_resume.pdf".to_string(),
            application_date: None,
            application_date_display: None,
        }
    }

    #[test]
    fn test_select_role_lands_on_dashboard() {
        let state = recruiter();
        assert_eq!(state.role, Some(Role::Recruiter));
        assert_eq!(state.page, Page::Dashboard);
    }

    #[test]
    fn test_ui_event_json_shape() {
        let event: UiEvent =
            serde_json::from_str(r#"{"type":"select_role","role":"candidate"}"#).unwrap();
        assert_eq!(event, UiEvent::SelectRole { role: Role::Candidate });

        let event: UiEvent = serde_json::from_str(
            r#"{"type":"edit_form","field":"title","text":"Rust Engineer"}"#,
        )
        .unwrap();
        assert!(matches!(event, UiEvent::EditForm { field: FormField::Title, .. }));
    }

    #[test]
    fn test_candidate_cannot_open_reports() {
        let state = SessionState::new(true)
            .apply(UiEvent::SelectRole { role: Role::Candidate }.into())
            .apply(UiEvent::Navigate { page: Page::Reports }.into());
        assert_eq!(state.page, Page::Dashboard);
        assert_eq!(state.notices.len(), 1);
    }

    #[test]
    fn test_view_applicants_and_back() {
        let state = recruiter().apply(
            UiEvent::ViewApplicants {
                title: "Data Analyst".to_string(),
            }
            .into(),
        );
        assert_eq!(state.page, Page::JobApplicants);
        assert_eq!(state.selected_job.as_deref(), Some("Data Analyst"));

        let state = state.apply(UiEvent::BackToJobs.into());
        assert_eq!(state.page, Page::JobPostings);
        assert_eq!(state.selected_job, None);
    }

    #[test]
    fn test_first_sync_replaces_demo_then_merges() {
        let state = recruiter();
        assert!(state.jobs.get("Frontend Developer").is_some());

        let first = normalize_jobs(&json!([{"id": 1, "job_title": "Platform Engineer"}]));
        let state = state.apply(Event::JobsSynced(first));
        assert!(state.backend_synced);
        assert_eq!(state.jobs.len(), 1);
        assert!(state.jobs.get("Frontend Developer").is_none());

        let second = normalize_jobs(&json!([{"id": 2, "job_title": "SRE"}]));
        let state = state.apply(Event::JobsSynced(second));
        assert_eq!(state.jobs.len(), 2);
    }

    #[test]
    fn test_backend_settings_do_not_reset_sync() {
        let synced = recruiter().apply(Event::JobsSynced(normalize_jobs(&json!([
            {"id": 1, "job_title": "Data Analyst"}
        ]))));
        let draft = JobDraft {
            title: "QA Engineer".to_string(),
            department: "Quality".to_string(),
            description: "Tests".to_string(),
            requirements: vec!["Playwright".to_string()],
        };
        let state = synced
            .apply(Event::JobCreated(Job::local(&draft)))
            .apply(UiEvent::SetUseBackend { enabled: true }.into())
            .apply(
                UiEvent::SetBackendUrl {
                    url: "http://other:8000".to_string(),
                }
                .into(),
            );
        assert!(state.backend_synced);

        let state = state.apply(Event::JobsSynced(normalize_jobs(&json!([
            {"id": 1, "job_title": "Data Analyst"}
        ]))));
        assert_eq!(
            state.jobs.titles().collect::<Vec<_>>(),
            vec!["Data Analyst", "QA Engineer"]
        );
    }

    #[test]
    fn test_jobs_merged_keeps_demo_board_unsynced() {
        let state = recruiter().apply(Event::JobsMerged(JobBoard::new()));
        assert!(!state.backend_synced);
        assert_eq!(state.jobs.len(), 3);
    }

    #[test]
    fn test_sync_failure_keeps_board() {
        let before = recruiter();
        let after = before.clone().apply(Event::SyncFailed("timeout".to_string()));
        assert_eq!(after.jobs, before.jobs);
        assert_eq!(after.notices.len(), 1);
    }

    #[test]
    fn test_submission_bumps_counter_and_queues_feedback_once() {
        let mut state = recruiter().apply(
            UiEvent::OpenModal {
                modal: Modal::JobDetails {
                    title: "Data Analyst".to_string(),
                },
            }
            .into(),
        );
        state = state.apply(Event::ApplicationSubmitted {
            job_title: "Data Analyst".to_string(),
            feedback: feedback("Data Analyst", 90),
        });

        let job = state.jobs.get("Data Analyst").unwrap();
        assert_eq!(job.applicants, 1);
        assert!(job.stale);
        assert_eq!(state.pending_applications.len(), 1);
        assert!(state.modals.is_empty());

        assert!(state.next_feedback().is_some());
        assert!(state.next_feedback().is_none());
    }

    #[test]
    fn test_clear_parsed_form_keeps_typed_text() {
        let doc = ParsedJobDocument {
            job_title: "Data Analyst".to_string(),
            department: "Analytics".to_string(),
            description: "SQL".to_string(),
            requirements: "SQL\nPython".to_string(),
        };
        let state = recruiter()
            .apply(Event::DocumentParsed {
                document: doc,
                file_name: "jd.pdf".to_string(),
                source: DocumentSource::Backend,
            })
            .apply(
                UiEvent::EditForm {
                    field: FormField::Title,
                    text: "Senior Data Analyst".to_string(),
                }
                .into(),
            );
        assert_eq!(state.job_form.parsed.job_title, "Data Analyst");
        assert_eq!(state.job_form.fields.title, "Senior Data Analyst");

        let state = state.apply(UiEvent::ClearParsedForm.into());
        assert!(!state.job_form.parsing_completed);
        assert_eq!(state.job_form.parsed, ParsedJobDocument::default());
        assert_eq!(state.job_form.fields.title, "Senior Data Analyst");
        assert_eq!(state.job_form.fields.department, "Analytics");
    }

    #[test]
    fn test_job_created_resets_form_and_closes_modal() {
        let draft = JobDraft {
            title: "QA Engineer".to_string(),
            department: "Quality".to_string(),
            description: "Tests".to_string(),
            requirements: vec!["Playwright".to_string()],
        };
        let state = recruiter()
            .apply(UiEvent::OpenModal { modal: Modal::CreateJob }.into())
            .apply(
                UiEvent::EditForm {
                    field: FormField::Title,
                    text: "QA Engineer".to_string(),
                }
                .into(),
            )
            .apply(Event::JobCreated(Job::local(&draft)));
        assert!(state.jobs.get("QA Engineer").is_some());
        assert_eq!(state.job_form, JobForm::default());
        assert!(!state.is_open(&Modal::CreateJob));
    }

    #[test]
    fn test_logout_keeps_backend_settings_and_cache() {
        let state = recruiter()
            .apply(
                UiEvent::SetBackendUrl {
                    url: "http://localhost:8000/".to_string(),
                }
                .into(),
            )
            .apply(UiEvent::Navigate { page: Page::Reports }.into())
            .apply(UiEvent::Logout.into());
        assert_eq!(state.role, None);
        assert_eq!(state.page, Page::Home);
        assert_eq!(state.backend_url.as_deref(), Some("http://localhost:8000"));
        assert_eq!(state.jobs.len(), 3);
        assert!(state.notices.is_empty());
    }

    #[test]
    fn test_transition_through_mutable_slot() {
        let mut slot = SessionState::default();
        transition(&mut slot, UiEvent::SelectRole { role: Role::Candidate });
        assert_eq!(slot.page, Page::Dashboard);
    }
}
