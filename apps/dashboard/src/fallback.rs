//! Demo values shown whenever the backend cannot supply real ones.

use crate::models::{DashboardMetrics, DataSource, Job, JobBoard, ParsedJobDocument};
use crate::normalize::split_lines;

/// Metrics tiles shown while `/metrics/` is unavailable.
pub fn demo_metrics() -> DashboardMetrics {
    DashboardMetrics {
        total_applications: 24,
        open_positions: 3,
        high_fit_candidates: 8,
        avg_score: 76,
        source: DataSource::Demo,
    }
}

/// Job description guessed from an uploaded document's filename, used when
/// the backend cannot parse it.
pub fn demo_parsed_document(file_name: &str) -> ParsedJobDocument {
    let name = file_name.to_lowercase();
    let has_any = |words: &[&str]| words.iter().any(|w| name.contains(w));

    let (job_title, department, description, requirements) =
        if has_any(&["frontend", "ui", "react"]) {
            (
                "Frontend Developer",
                "Engineering",
                "We are looking for a skilled Frontend Developer to join our dynamic team. \
                 You will be responsible for creating engaging user interfaces using modern web technologies.",
                "• 3+ years of experience in React.js\n• Proficiency in HTML, CSS, JavaScript\n\
                 • Experience with modern frontend tools\n• Strong problem-solving skills",
            )
        } else if has_any(&["backend", "api", "server"]) {
            (
                "Backend Developer",
                "Engineering",
                "Join our backend team to build scalable APIs and server-side applications. \
                 You will work on high-performance systems that power our platform.",
                "• 3+ years of backend development experience\n• Proficiency in Python/Node.js\n\
                 • Database design and optimization\n• API development and microservices",
            )
        } else if has_any(&["data", "analyst"]) {
            (
                "Data Analyst",
                "Analytics",
                "We are seeking a Data Analyst to help drive business decisions through data insights and reporting.",
                "• Strong SQL skills\n• Experience with Python/R\n• Data visualization tools\n\
                 • Statistical analysis background",
            )
        } else {
            (
                "Software Engineer",
                "Engineering",
                "We are looking for a talented Software Engineer to help build innovative solutions \
                 and contribute to our growing platform.",
                "• Bachelor's degree in Computer Science or related field\n\
                 • 2+ years of software development experience\n\
                 • Strong programming fundamentals\n• Collaborative team player",
            )
        };

    ParsedJobDocument {
        job_title: job_title.to_string(),
        department: department.to_string(),
        description: description.to_string(),
        requirements: requirements.to_string(),
    }
}

/// Board shown before the first successful backend sync. Entries carry no
/// backend id, so applying to them asks the user to refresh.
pub fn demo_jobs() -> JobBoard {
    ["frontend", "backend", "data"]
        .iter()
        .map(|seed| {
            let doc = demo_parsed_document(seed);
            Job {
                title: doc.job_title,
                department: doc.department,
                description: doc.description,
                requirements: split_lines(&doc.requirements),
                applicants: 0,
                avg_score: 0.0,
                id: None,
                posted_date: None,
                is_active: true,
                stale: false,
            }
        })
        .collect()
}
