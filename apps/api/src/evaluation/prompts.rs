// LLM prompt constants for criterion evaluation.

/// System instruction for every criterion call.
pub const EVALUATION_SYSTEM: &str = "Evaluate the candidate ONLY using the provided <CONTEXT>. \
    Return compact JSON with exactly these fields: \
    {\"criterion\", \"score_percent\" (0-100), \"rationale\", \"alternate_considerations\" (array of strings)}. \
    Use conservative scoring. \
    If evidence is missing, score low and suggest alternates.";

/// Criterion prompt template. Replace `{context}` and `{requirement}` before sending.
pub const EVALUATION_PROMPT_TEMPLATE: &str = r#"<CONTEXT>
{context}
</CONTEXT>

<REQUIREMENT>
{requirement}
</REQUIREMENT>

Respond with JSON only.
"#;

/// Generic queries used to rebuild an approximate resume for audit and display.
pub const RESUME_CONTEXT_QUERIES: [&str; 5] = [
    "work experience and roles",
    "education and degrees",
    "programming languages and frameworks",
    "cloud and databases",
    "projects and achievements",
];

pub fn build_evaluation_prompt(context: &str, requirement: &str) -> String {
    EVALUATION_PROMPT_TEMPLATE
        .replace("{requirement}", requirement)
        .replace("{context}", context)
}
