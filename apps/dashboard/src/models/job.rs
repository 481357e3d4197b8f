use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::models::RecordId;

/// A job posting in the shape every page consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub title: String,
    pub department: String,
    pub description: String,
    pub requirements: Vec<String>,
    /// Locally tracked; not authoritative against the backend.
    pub applicants: u32,
    /// Locally tracked; not authoritative against the backend.
    pub avg_score: f64,
    pub id: Option<RecordId>,
    pub posted_date: Option<String>,
    pub is_active: bool,
    /// Set once a local counter was bumped and the record has not been
    /// replaced by a fetch since.
    pub stale: bool,
}

impl Job {
    /// A job that exists only in this session until the backend returns it.
    pub fn local(draft: &JobDraft) -> Self {
        Self {
            title: draft.title.clone(),
            department: draft.department.clone(),
            description: draft.description.clone(),
            requirements: draft.requirements.clone(),
            applicants: 0,
            avg_score: 0.0,
            id: None,
            posted_date: None,
            is_active: true,
            stale: false,
        }
    }

    /// Records one more local application and folds its score into the
    /// running average.
    pub fn record_application(&mut self, score: u32) {
        let total = self.avg_score * f64::from(self.applicants) + f64::from(score);
        self.applicants += 1;
        self.avg_score = (total / f64::from(self.applicants) * 10.0).round() / 10.0;
        self.stale = true;
    }

    pub fn description_preview(&self, max_chars: usize) -> String {
        if self.description.chars().count() <= max_chars {
            return self.description.clone();
        }
        let cut: String = self.description.chars().take(max_chars).collect();
        format!("{cut}...")
    }
}

/// Job collection keyed by title, in first-seen order.
///
/// Two jobs with the same title collide: the later one replaces the earlier
/// in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobBoard {
    jobs: Vec<Job>,
}

impl JobBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upsert(&mut self, job: Job) {
        match self.jobs.iter_mut().find(|j| j.title == job.title) {
            Some(slot) => *slot = job,
            None => self.jobs.push(job),
        }
    }

    /// Upserts every job from `other`, keeping local-only titles.
    pub fn merge(&mut self, other: JobBoard) {
        for job in other.jobs {
            self.upsert(job);
        }
    }

    pub fn get(&self, title: &str) -> Option<&Job> {
        self.jobs.iter().find(|j| j.title == title)
    }

    pub fn get_mut(&mut self, title: &str) -> Option<&mut Job> {
        self.jobs.iter_mut().find(|j| j.title == title)
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.jobs.iter().map(|j| j.title.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Job> {
        self.jobs.iter()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

impl FromIterator<Job> for JobBoard {
    fn from_iter<I: IntoIterator<Item = Job>>(iter: I) -> Self {
        let mut board = JobBoard::new();
        for job in iter {
            board.upsert(job);
        }
        board
    }
}

/// Fields a recruiter submits to create a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDraft {
    pub title: String,
    pub department: String,
    pub description: String,
    pub requirements: Vec<String>,
}

impl JobDraft {
    /// Request body for `POST /jobs/`. The backend takes requirements as one
    /// newline-joined string.
    pub fn to_backend_body(&self) -> Value {
        json!({
            "job_title": self.title,
            "department": self.department,
            "description": self.description,
            "requirements": self.requirements.join("\n"),
        })
    }
}

/// Job fields extracted from an uploaded job description document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedJobDocument {
    pub job_title: String,
    pub department: String,
    pub description: String,
    /// Newline-delimited, as the form edits it.
    pub requirements: String,
}
