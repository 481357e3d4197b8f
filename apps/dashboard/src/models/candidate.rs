use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Backend-assigned identifier. The backend uses integers today but the
/// dashboard never does arithmetic on it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl RecordId {
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().map(RecordId::Int),
            Value::String(s) if !s.trim().is_empty() => Some(RecordId::Text(s.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(n) => write!(f, "{n}"),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

/// Coarse fit rating.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    High,
    #[default]
    Medium,
    Low,
}

impl Verdict {
    /// Maps the backend's free-text verdict ("High Fit", "Medium", ...).
    /// Checked in High, Medium, Low order; anything else is Medium.
    pub fn from_backend(raw: &str) -> Self {
        if raw.contains("High") || raw.trim() == "high" {
            Verdict::High
        } else if raw.contains("Medium") || raw.trim() == "medium" {
            Verdict::Medium
        } else if raw.contains("Low") || raw.trim() == "low" {
            Verdict::Low
        } else {
            Verdict::Medium
        }
    }

    /// Thresholds used when a record carries a score but no verdict.
    pub fn from_score(score: u32) -> Self {
        match score {
            80.. => Verdict::High,
            60..=79 => Verdict::Medium,
            _ => Verdict::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::High => "High",
            Verdict::Medium => "Medium",
            Verdict::Low => "Low",
        }
    }

    pub fn label(&self) -> String {
        format!("{} Fit", self.as_str())
    }

    pub const ALL: [Verdict; 3] = [Verdict::High, Verdict::Medium, Verdict::Low];
}

/// An application as shown on candidate tables and detail modals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: Option<RecordId>,
    pub application_id: Option<RecordId>,
    pub name: String,
    pub job_role: String,
    pub job_id: Option<RecordId>,
    pub score: u32,
    pub verdict: Verdict,
    pub missing_skills: Vec<String>,
    pub feedback: String,
    pub resume_file: String,
    pub application_date: Option<String>,
    pub application_date_display: Option<String>,
}
