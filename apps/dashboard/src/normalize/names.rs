//! Display-name synthesis for applications the backend left unnamed.

use crate::models::RecordId;

/// Value `title_case` produces when the base name collapses to a bare
/// extension.
const DEGENERATE_NAME: &str = ".Pdf";

/// Builds a candidate name from a resume filename such as
/// `john_doe_resume.pdf` -> `John Doe`. Falls back to `Candidate {id}` when
/// there is no filename or it carries no usable name.
pub fn synthesize_name(resume_filename: Option<&str>, id: Option<&RecordId>) -> String {
    let fallback = || match id {
        Some(id) => format!("Candidate {id}"),
        None => "Candidate Unknown".to_string(),
    };

    let Some(filename) = resume_filename.filter(|f| !f.trim().is_empty()) else {
        return fallback();
    };

    let base = filename
        .replace("_resume.pdf", "")
        .replace('_', " ")
        .replace(".pdf", "");
    let name = title_case(&base);

    if name.trim().is_empty() || name == DEGENERATE_NAME {
        fallback()
    } else {
        name
    }
}

/// Uppercases the first letter of every alphabetic run and lowercases the
/// rest. Any non-letter starts a new run, so `o'neil` becomes `O'Neil`.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}
