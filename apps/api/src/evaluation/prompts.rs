// All LLM prompt constants for the Evaluation module.

use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;

/// System prompt for resume evaluation.
pub fn evaluation_system() -> String {
    format!(
        "You are an expert resume reviewer providing constructive feedback. {JSON_ONLY_INSTRUCTION}"
    )
}

/// Evaluation prompt template. Fill with `render_evaluation_prompt`.
pub const EVALUATION_PROMPT_TEMPLATE: &str = r#"You are an expert resume reviewer. Analyze the following resume against the job description.
Provide a match percentage and detailed feedback.

Job Description:
{job_description}

Resume:
{resume_text}

Return a JSON object with this EXACT schema (no extra fields):
{
  "match_score": 75,
  "summary": "Two or three sentences on overall fit.",
  "qualifications_match": ["Key strength that aligns with the job"],
  "gaps": ["Requirement the resume does not show"],
  "recommendations": ["Specific change to better match the job requirements"],
  "email_draft": "A short email to the recruiter introducing the candidate for this role."
}

Rules:
- match_score is an integer from 0 to 100
- Every list item is one plain sentence
- Use ONLY facts present in the resume; do not invent experience
- email_draft must not be empty"#;

/// Fills the template in one pass, so placeholder-like text inside the
/// resume or job description is never expanded.
pub fn render_evaluation_prompt(resume_text: &str, job_description: &str) -> String {
    let mut out = String::with_capacity(
        EVALUATION_PROMPT_TEMPLATE.len() + resume_text.len() + job_description.len(),
    );
    let mut rest = EVALUATION_PROMPT_TEMPLATE;

    while let Some(start) = rest.find('{') {
        let tail = &rest[start..];
        let (value, consumed) = if tail.starts_with("{job_description}") {
            (job_description, "{job_description}".len())
        } else if tail.starts_with("{resume_text}") {
            (resume_text, "{resume_text}".len())
        } else {
            ("{", 1)
        };
        out.push_str(&rest[..start]);
        out.push_str(value);
        rest = &tail[consumed..];
    }
    out.push_str(rest);
    out
}
