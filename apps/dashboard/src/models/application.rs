use serde::{Deserialize, Serialize};

use crate::models::{RecordId, Verdict};

/// Result of one resume submission, shown once in the feedback modal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationFeedback {
    pub job_title: String,
    pub score: u32,
    pub verdict: Verdict,
    pub missing_skills: Vec<String>,
    pub feedback: String,
    pub recommendations: String,
    pub application_id: Option<RecordId>,
    pub resume_filename: String,
    pub application_date: Option<String>,
    pub application_date_display: Option<String>,
}

impl ApplicationFeedback {
    pub fn recommendations_for(missing_skills: &[String]) -> String {
        if missing_skills.is_empty() {
            return "Great job! Your skills align well with the job requirements. \
                    Continue to strengthen your existing expertise."
                .to_string();
        }
        let top: Vec<&str> = missing_skills.iter().take(3).map(String::as_str).collect();
        format!(
            "Consider developing skills in: {}. These areas would significantly improve your match for this role.",
            top.join(", ")
        )
    }
}

/// Session-only record of a submission, listed until the next fetch brings
/// the backend's own copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingApplication {
    pub job_title: String,
    pub resume_file: String,
    pub score: u32,
    pub verdict: Verdict,
}
