//! Best-effort section bucketing for resume text.
//!
//! This is NOT a resume parser. Paragraphs are split on blank lines and filed
//! under the most recent heading-like paragraph. The result is lossy and
//! depends on paragraph order.

use crate::models::resume::Sections;

/// A paragraph containing any of these (case-insensitive) starts a section.
pub const SECTION_KEYWORDS: &[&str] = &[
    "experience",
    "education",
    "skills",
    "projects",
    "certifications",
];

/// Buckets blank-line-separated paragraphs under heading-like labels.
///
/// - A paragraph whose lowercase form contains a keyword becomes a heading:
///   its first line is the label and that label's bucket is reset.
/// - Any other paragraph is appended to the current label's bucket.
/// - Paragraphs before the first heading are left out, so every label is a
///   line of the input.
pub fn bucket_sections(text: &str) -> Sections {
    let normalized = text.replace("\r\n", "\n");
    let mut sections = Sections::new();
    let mut current: Option<String> = None;

    for chunk in normalized.split("\n\n") {
        let chunk = chunk.trim();
        if chunk.is_empty() {
            continue;
        }

        if is_heading(chunk) {
            let label = heading_label(chunk);
            sections.reset(&label);
            current = Some(label);
        } else if let Some(label) = &current {
            sections.push(label, chunk.to_string());
        }
    }

    sections
}

fn is_heading(paragraph: &str) -> bool {
    let lower = paragraph.to_lowercase();
    SECTION_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// First line, without markdown heading or emphasis markers.
fn heading_label(paragraph: &str) -> String {
    let first_line = paragraph.lines().next().unwrap_or(paragraph).trim();
    let stripped = first_line
        .trim_start_matches('#')
        .trim()
        .trim_matches('*')
        .trim();
    if stripped.is_empty() {
        first_line.to_string()
    } else {
        stripped.to_string()
    }
}
