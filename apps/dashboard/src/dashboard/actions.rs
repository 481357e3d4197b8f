use serde_json::Value;
use tracing::{info, warn};

use crate::dashboard::{Dashboard, DashboardError};
use crate::fallback::demo_parsed_document;
use crate::gateway::{UploadKind, UploadedFile};
use crate::models::{ApplicationFeedback, Job, JobDraft, ParsedJobDocument};
use crate::normalize::{
    normalize_application_result, normalize_job, normalize_parsed_document, split_lines,
};
use crate::session::{transition, DocumentSource, Event, Notice, SessionState};

impl Dashboard {
    /// Applies `resume` to the job titled `job_title`. On any failure the
    /// board is left alone and an error notice is queued.
    pub async fn submit_application(
        &self,
        state: &mut SessionState,
        job_title: &str,
        resume: UploadedFile,
    ) -> bool {
        match self.try_submit(state, job_title, &resume).await {
            Ok(feedback) => {
                info!(
                    "Application for '{job_title}' scored {} ({})",
                    feedback.score,
                    feedback.verdict.as_str()
                );
                transition(
                    state,
                    Event::ApplicationSubmitted {
                        job_title: job_title.to_string(),
                        feedback,
                    },
                );
                true
            }
            Err(e) => {
                warn!("Application for '{job_title}' failed: {e}");
                transition(state, Event::Notify(Notice::error(e.to_string())));
                false
            }
        }
    }

    async fn try_submit(
        &self,
        state: &SessionState,
        job_title: &str,
        resume: &UploadedFile,
    ) -> Result<ApplicationFeedback, DashboardError> {
        UploadKind::Resume.validate(resume)?;
        let job_id = match state.jobs.get(job_title).map(|job| job.id.as_ref()) {
            Some(Some(id)) => id.to_string(),
            // Offline answers never reference a backend record
            Some(None) if !state.use_backend => job_title.to_string(),
            _ => return Err(DashboardError::MissingJobId(job_title.to_string())),
        };

        let payload = self.gateway.apply_to_job(&job_id, resume).await?;
        Ok(normalize_application_result(
            job_title,
            &resume.file_name,
            &payload,
        ))
    }

    /// Fills the create-job form from an uploaded job description. The file
    /// type is checked before anything goes over the wire; backend trouble
    /// falls back to values guessed from the file name.
    pub async fn parse_document(&self, state: &mut SessionState, document: UploadedFile) {
        if let Err(e) = UploadKind::JobDocument.validate(&document) {
            transition(state, Event::Notify(Notice::error(e.to_string())));
            return;
        }

        let (parsed, source) = if state.use_backend {
            match self.parse_on_backend(&document).await {
                Ok(parsed) => {
                    transition(
                        state,
                        Event::Notify(Notice::success("Job description parsed successfully!")),
                    );
                    (parsed, DocumentSource::Backend)
                }
                Err(e) => {
                    warn!("Parsing '{}' failed: {e}", document.file_name);
                    transition(state, Event::Notify(Notice::error(e.to_string())));
                    transition(
                        state,
                        Event::Notify(Notice::info(
                            "Backend parsing failed. Using demo data extracted from the file name.",
                        )),
                    );
                    (demo_parsed_document(&document.file_name), DocumentSource::Demo)
                }
            }
        } else {
            transition(
                state,
                Event::Notify(Notice::info(
                    "Backend is disabled. Using demo data extracted from the file name.",
                )),
            );
            let parsed = match self.gateway.parse_job_document(&document).await {
                Ok(payload) => normalize_parsed_document(&payload),
                Err(e) => {
                    warn!("Offline parsing of '{}' failed: {e}", document.file_name);
                    demo_parsed_document(&document.file_name)
                }
            };
            (parsed, DocumentSource::Demo)
        };

        transition(
            state,
            Event::DocumentParsed {
                document: parsed,
                file_name: document.file_name,
                source,
            },
        );
    }

    async fn parse_on_backend(
        &self,
        document: &UploadedFile,
    ) -> Result<ParsedJobDocument, DashboardError> {
        self.gateway
            .health_check()
            .await
            .map_err(DashboardError::Unreachable)?;
        let payload = self.gateway.parse_job_document(document).await?;
        Ok(normalize_parsed_document(&payload))
    }

    /// Creates a job from the session's form. The job is kept locally even
    /// when the backend rejects it.
    pub async fn create_job(&self, state: &mut SessionState) -> bool {
        let draft = match draft_from_form(state) {
            Ok(draft) => draft,
            Err(e) => {
                transition(state, Event::Notify(Notice::error(e.to_string())));
                return false;
            }
        };

        transition(state, Event::JobCreated(Job::local(&draft)));

        match self.gateway.create_job(&draft).await {
            Ok(_) if !state.use_backend => {
                info!("Job '{}' kept locally, backend disabled", draft.title);
            }
            Ok(payload) => {
                info!("Job '{}' created on backend", draft.title);
                adopt_backend_id(state, &draft.title, &payload);
                transition(
                    state,
                    Event::Notify(Notice::success("Job created successfully on backend!")),
                );
            }
            Err(e) => {
                warn!("Creating '{}' on backend failed: {e}", draft.title);
                transition(
                    state,
                    Event::Notify(Notice::warning(format!(
                        "Failed to create job on backend: {e}. The job was saved locally."
                    ))),
                );
            }
        }
        true
    }

    /// Probes the backend and reports the outcome as a notice.
    pub async fn test_connection(&self, state: &mut SessionState) -> bool {
        match self.gateway.health_check().await {
            Ok(payload) => {
                let endpoint = payload
                    .get("endpoint")
                    .and_then(Value::as_str)
                    .unwrap_or("/");
                transition(
                    state,
                    Event::Notify(Notice::success(format!(
                        "Backend connection successful! ({} responded)",
                        endpoint
                    ))),
                );
                true
            }
            Err(e) => {
                warn!("Connection test against {} failed: {e}", self.backend_url());
                transition(
                    state,
                    Event::Notify(Notice::error(format!("Backend connection failed: {e}"))),
                );
                false
            }
        }
    }
}

fn draft_from_form(state: &SessionState) -> Result<JobDraft, DashboardError> {
    let fields = &state.job_form.fields;
    let required = [
        &fields.title,
        &fields.department,
        &fields.description,
        &fields.requirements,
    ];
    if required.iter().any(|value| value.trim().is_empty()) {
        return Err(DashboardError::Validation(
            "Please fill in all required fields.".to_string(),
        ));
    }
    Ok(JobDraft {
        title: fields.title.trim().to_string(),
        department: fields.department.trim().to_string(),
        description: fields.description.trim().to_string(),
        requirements: split_lines(&fields.requirements),
    })
}

/// Copies the id the backend assigned onto the locally stored job.
fn adopt_backend_id(state: &mut SessionState, title: &str, payload: &Value) {
    let Some(id) = normalize_job(payload).and_then(|job| job.id) else {
        return;
    };
    if let Some(job) = state.jobs.get_mut(title) {
        job.id = Some(id);
    }
}
