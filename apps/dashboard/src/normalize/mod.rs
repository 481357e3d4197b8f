//! View-model normalizer: turns whatever the backend returned into the
//! canonical `Job`, `Candidate` and `DashboardMetrics` shapes.
//!
//! Payload shape detection lives in [`unwrap_records`] only. Everything
//! downstream works on one record at a time and never sees wrappers.

pub mod names;

use chrono::{DateTime, NaiveDateTime};
use serde_json::Value;

use crate::models::{
    ApplicationFeedback, Candidate, DashboardMetrics, DataSource, Job, JobBoard,
    ParsedJobDocument, RecordId, Verdict,
};

pub use names::synthesize_name;

/// Wrapper keys the backend has used around job lists.
pub const JOB_WRAPPER_KEYS: &[&str] = &["jobs", "data", "items"];
/// Wrapper keys the backend has used around application lists.
pub const CANDIDATE_WRAPPER_KEYS: &[&str] = &["candidates", "applications", "data", "items"];

const UNKNOWN_JOB: &str = "Unknown Job";
const UNKNOWN_POSITION: &str = "Unknown Position";
const DEFAULT_DEPARTMENT: &str = "Engineering";
const DEFAULT_RESUME_FILE: &str = "resume.pdf";
const DEFAULT_FEEDBACK: &str = "Application processed successfully.";
/// Score assumed for a submission the backend accepted without scoring.
const UNSCORED_SUBMISSION: u32 = 75;

/// Returns the record list inside `payload`: a bare array, or the array under
/// the first matching wrapper key. Any other shape, error objects included,
/// yields an empty slice.
pub fn unwrap_records<'a>(payload: &'a Value, wrapper_keys: &[&str]) -> &'a [Value] {
    match payload {
        Value::Array(records) => records.as_slice(),
        Value::Object(map) => wrapper_keys
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_array))
            .map(Vec::as_slice)
            .unwrap_or(&[]),
        _ => &[],
    }
}

pub fn normalize_jobs(payload: &Value) -> JobBoard {
    unwrap_records(payload, JOB_WRAPPER_KEYS)
        .iter()
        .filter_map(normalize_job)
        .collect()
}

pub fn normalize_job(record: &Value) -> Option<Job> {
    if !record.is_object() {
        return None;
    }
    Some(Job {
        title: str_field(record, &["job_title", "title"])
            .unwrap_or(UNKNOWN_JOB)
            .to_string(),
        department: str_field(record, &["department"])
            .unwrap_or(DEFAULT_DEPARTMENT)
            .to_string(),
        description: str_field(record, &["description"])
            .unwrap_or_default()
            .to_string(),
        requirements: parse_requirements(record.get("requirements")),
        applicants: 0,
        avg_score: 0.0,
        id: record.get("id").and_then(RecordId::from_value),
        posted_date: str_field(record, &["posted_date"]).map(String::from),
        is_active: record
            .get("is_active")
            .and_then(Value::as_bool)
            .unwrap_or(true),
        stale: false,
    })
}

/// A newline-delimited string becomes its trimmed, non-empty lines; a list
/// passes through as-is.
pub fn parse_requirements(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::String(text)) => split_lines(text),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_str().map(String::from))
            .collect(),
        _ => Vec::new(),
    }
}

pub fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

pub fn normalize_candidates(payload: &Value) -> Vec<Candidate> {
    unwrap_records(payload, CANDIDATE_WRAPPER_KEYS)
        .iter()
        .filter(|record| record.is_object())
        .map(normalize_candidate)
        .collect()
}

pub fn normalize_candidate(record: &Value) -> Candidate {
    let id = record.get("id").and_then(RecordId::from_value);
    let resume_filename = str_field(record, &["resume_filename", "resume_file"]);

    let name = match str_field(record, &["candidate_name", "name"]) {
        Some(explicit) if !explicit.trim().is_empty() => explicit.to_string(),
        _ => synthesize_name(resume_filename, id.as_ref()),
    };

    let score = score_field(record, &["relevance_score", "score"]).unwrap_or(0);
    let application_date = str_field(record, &["application_date"]).map(String::from);

    Candidate {
        application_id: id.clone(),
        id,
        name,
        job_role: job_role(record).to_string(),
        job_id: record
            .get("job_id")
            .or_else(|| record.get("job").and_then(|job| job.get("id")))
            .and_then(RecordId::from_value),
        score,
        verdict: str_field(record, &["verdict"])
            .map(Verdict::from_backend)
            .unwrap_or_default(),
        missing_skills: string_list(record.get("missing_skills")),
        feedback: str_field(record, &["feedback"]).unwrap_or_default().to_string(),
        resume_file: resume_filename.unwrap_or(DEFAULT_RESUME_FILE).to_string(),
        application_date_display: application_date.as_deref().map(format_application_date),
        application_date,
    }
}

fn job_role(record: &Value) -> &str {
    record
        .get("job")
        .and_then(|job| str_field(job, &["job_title", "title"]))
        .or_else(|| str_field(record, &["job_role", "job_title"]))
        .unwrap_or(UNKNOWN_POSITION)
}

/// Builds the one-shot feedback payload for a completed submission.
pub fn normalize_application_result(
    job_title: &str,
    resume_name: &str,
    payload: &Value,
) -> ApplicationFeedback {
    let score =
        score_field(payload, &["relevance_score", "score"]).unwrap_or(UNSCORED_SUBMISSION);
    let verdict = str_field(payload, &["verdict"])
        .map(Verdict::from_backend)
        .unwrap_or_else(|| Verdict::from_score(score));
    let missing_skills = string_list(payload.get("missing_skills"));
    let application_date = str_field(payload, &["application_date"]).map(String::from);

    ApplicationFeedback {
        job_title: job_title.to_string(),
        score,
        verdict,
        recommendations: ApplicationFeedback::recommendations_for(&missing_skills),
        missing_skills,
        feedback: str_field(payload, &["feedback"])
            .unwrap_or(DEFAULT_FEEDBACK)
            .to_string(),
        application_id: payload.get("id").and_then(RecordId::from_value),
        resume_filename: str_field(payload, &["resume_filename"])
            .unwrap_or(resume_name)
            .to_string(),
        application_date_display: application_date.as_deref().map(format_application_date),
        application_date,
    }
}

pub fn normalize_metrics(payload: &Value) -> DashboardMetrics {
    DashboardMetrics {
        total_applications: count_field(payload, "total_applications"),
        open_positions: count_field(payload, "open_positions"),
        high_fit_candidates: count_field(payload, "high_fit_candidates"),
        avg_score: payload
            .get("avg_score")
            .and_then(Value::as_f64)
            .map(|avg| avg.round().clamp(0.0, 100.0) as u32)
            .unwrap_or(0),
        source: DataSource::Backend,
    }
}

pub fn normalize_parsed_document(payload: &Value) -> ParsedJobDocument {
    let requirements = match payload.get("requirements") {
        Some(Value::Array(_)) => parse_requirements(payload.get("requirements")).join("\n"),
        Some(Value::String(text)) => text.clone(),
        _ => String::new(),
    };
    ParsedJobDocument {
        job_title: str_field(payload, &["job_title", "title"])
            .unwrap_or_default()
            .to_string(),
        department: str_field(payload, &["department"])
            .unwrap_or_default()
            .to_string(),
        description: str_field(payload, &["description"])
            .unwrap_or_default()
            .to_string(),
        requirements,
    }
}

/// Renders an ISO-8601 timestamp as `September 21, 2025 at 04:45 AM`.
/// Unparseable input is returned unchanged.
pub fn format_application_date(raw: &str) -> String {
    const DISPLAY: &str = "%B %d, %Y at %I:%M %p";
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format(DISPLAY).to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format(DISPLAY).to_string();
    }
    raw.to_string()
}

fn str_field<'a>(record: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .find_map(|key| record.get(*key).and_then(Value::as_str))
}

fn score_field(record: &Value, keys: &[&str]) -> Option<u32> {
    keys.iter().find_map(|key| {
        record
            .get(*key)
            .and_then(Value::as_f64)
            .map(|score| score.round().clamp(0.0, 100.0) as u32)
    })
}

fn count_field(record: &Value, key: &str) -> u64 {
    record
        .get(key)
        .and_then(|v| v.as_u64().or_else(|| v.as_f64().map(|f| f.max(0.0).round() as u64)))
        .unwrap_or(0)
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unwrap_records_accepts_list_and_wrappers() {
        let bare = json!([{"job_title": "A"}, {"job_title": "B"}]);
        assert_eq!(unwrap_records(&bare, JOB_WRAPPER_KEYS).len(), 2);

        let wrapped = json!({"jobs": [{"job_title": "A"}], "total": 1});
        assert_eq!(unwrap_records(&wrapped, JOB_WRAPPER_KEYS).len(), 1);

        let candidates = json!({"candidates": [{"id": 1}, {"id": 2}, {"id": 3}]});
        assert_eq!(unwrap_records(&candidates, CANDIDATE_WRAPPER_KEYS).len(), 3);
    }

    #[test]
    fn test_unwrap_records_unknown_shapes_are_empty() {
        assert!(unwrap_records(&json!({"error": "down"}), JOB_WRAPPER_KEYS).is_empty());
        assert!(unwrap_records(&json!({"jobs": "nope"}), JOB_WRAPPER_KEYS).is_empty());
        assert!(unwrap_records(&json!("text"), JOB_WRAPPER_KEYS).is_empty());
        assert!(unwrap_records(&Value::Null, CANDIDATE_WRAPPER_KEYS).is_empty());
    }

    #[test]
    fn test_bare_job_list_yields_one_record_per_title() {
        let payload = json!([
            {"id": 1, "job_title": "Frontend Developer", "department": "Engineering",
             "description": "UI work", "requirements": "React\n\n  CSS  \n"},
            {"id": 2, "job_title": "Data Analyst", "department": "Analytics"},
            {"id": 3, "job_title": "Backend Developer"}
        ]);
        let board = normalize_jobs(&payload);
        assert_eq!(board.len(), 3);

        let frontend = board.get("Frontend Developer").unwrap();
        assert_eq!(frontend.requirements, vec!["React", "CSS"]);
        assert_eq!(frontend.id, Some(RecordId::Int(1)));
        assert!(frontend.is_active);

        let backend = board.get("Backend Developer").unwrap();
        assert_eq!(backend.department, "Engineering");
        assert!(backend.requirements.is_empty());
    }

    #[test]
    fn test_duplicate_titles_collide_last_wins() {
        let payload = json!([
            {"id": 1, "job_title": "Frontend Developer", "description": "first"},
            {"id": 2, "job_title": "Frontend Developer", "description": "second"}
        ]);
        let board = normalize_jobs(&payload);
        assert_eq!(board.len(), 1);
        let job = board.get("Frontend Developer").unwrap();
        assert_eq!(job.id, Some(RecordId::Int(2)));
        assert_eq!(job.description, "second");
    }

    #[test]
    fn test_requirements_list_passes_through() {
        let reqs = parse_requirements(Some(&json!(["  Rust ", "Tokio"])));
        assert_eq!(reqs, vec!["  Rust ", "Tokio"]);
        assert!(parse_requirements(Some(&json!(7))).is_empty());
        assert!(parse_requirements(None).is_empty());
    }

    #[test]
    fn test_backend_application_normalizes_to_candidate() {
        let payload = json!([{
            "id": 123,
            "relevance_score": 85,
            "verdict": "High Fit",
            "resume_filename": "john_doe_resume.pdf",
            "job": {"job_title": "Frontend Developer"}
        }]);
        let candidates = normalize_candidates(&payload);
        assert_eq!(candidates.len(), 1);

        let c = &candidates[0];
        assert_eq!(c.id, Some(RecordId::Int(123)));
        assert_eq!(c.application_id, Some(RecordId::Int(123)));
        assert_eq!(c.name, "John Doe");
        assert_eq!(c.job_role, "Frontend Developer");
        assert_eq!(c.score, 85);
        assert_eq!(c.verdict, Verdict::High);
        assert_eq!(c.resume_file, "john_doe_resume.pdf");
    }

    #[test]
    fn test_missing_verdict_match_defaults_to_medium() {
        let payload = json!([
            {"id": 1, "verdict": "Excellent"},
            {"id": 2},
            {"id": 3, "verdict": 9}
        ]);
        let candidates = normalize_candidates(&payload);
        assert!(candidates.iter().all(|c| c.verdict == Verdict::Medium));
    }

    #[test]
    fn test_candidate_defaults_when_fields_missing() {
        let c = normalize_candidate(&json!({"id": 9}));
        assert_eq!(c.name, "Candidate 9");
        assert_eq!(c.job_role, "Unknown Position");
        assert_eq!(c.score, 0);
        assert_eq!(c.resume_file, "resume.pdf");
        assert!(c.missing_skills.is_empty());
        assert_eq!(c.application_date, None);
    }

    #[test]
    fn test_explicit_name_and_flat_fields_are_used() {
        let c = normalize_candidate(&json!({
            "id": 5,
            "name": "Priya Raman",
            "job_role": "Data Analyst",
            "job_id": 4,
            "score": 71.6,
            "resume_file": "priya.pdf"
        }));
        assert_eq!(c.name, "Priya Raman");
        assert_eq!(c.job_role, "Data Analyst");
        assert_eq!(c.job_id, Some(RecordId::Int(4)));
        assert_eq!(c.score, 72);
    }

    #[test]
    fn test_application_date_display() {
        assert_eq!(
            format_application_date("2025-09-21T04:45:29.920Z"),
            "September 21, 2025 at 04:45 AM"
        );
        assert_eq!(
            format_application_date("2025-09-21T15:15:10.540"),
            "September 21, 2025 at 03:15 PM"
        );
        assert_eq!(format_application_date("yesterday"), "yesterday");
    }

    #[test]
    fn test_metrics_round_average() {
        let m = normalize_metrics(&json!({
            "total_applications": 12,
            "avg_score": 76.6,
            "open_positions": 3,
            "high_fit_candidates": 5
        }));
        assert_eq!(m.total_applications, 12);
        assert_eq!(m.avg_score, 77);
        assert_eq!(m.open_positions, 3);
        assert_eq!(m.high_fit_candidates, 5);
        assert_eq!(m.source, DataSource::Backend);
    }

    #[test]
    fn test_parsed_document_accepts_list_requirements() {
        let doc = normalize_parsed_document(&json!({
            "job_title": "Platform Engineer",
            "department": "Infrastructure",
            "description": "Own the build farm",
            "requirements": ["Linux", "Nix"]
        }));
        assert_eq!(doc.job_title, "Platform Engineer");
        assert_eq!(doc.requirements, "Linux\nNix");
    }

    #[test]
    fn test_application_result_without_verdict_uses_score() {
        let feedback = normalize_application_result(
            "Backend Developer",
            "ana_resume.pdf",
            &json!({"id": 77, "relevance_score": 58, "missing_skills": ["Go"]}),
        );
        assert_eq!(feedback.verdict, Verdict::Low);
        assert_eq!(feedback.score, 58);
        assert_eq!(feedback.resume_filename, "ana_resume.pdf");
        assert_eq!(feedback.application_id, Some(RecordId::Int(77)));
        assert!(feedback.recommendations.contains("Go"));
    }
}
