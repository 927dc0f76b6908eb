//! Prompt construction for form generation.
//!
//! The prompt pins the model to a single JSON object in the standard
//! schema shape and spells out the formatting mistakes the extractor would
//! otherwise have to repair.

/// Instruction forbidding markdown fences. Always present in the prompt.
pub const NO_MARKDOWN_RULE: &str = "DO NOT include markdown (no ```json code fences)";

const PROMPT_HEADER: &str = "Generate a valid JSON object in the exact format below, \
with NO extra text, NO explanations, and NO markdown:";

const PROMPT_EXAMPLE: &str = r#"{
  "title": "Form Title",
  "button": { "label": "Submit" },
  "fields": [
    { "label": "Name", "type": "text", "required": true, "placeholder": "Your name" },
    { "label": "Department", "type": "select", "required": false, "options": ["Sales", "Support"] }
  ],
  "form_name": "unique_form_id"
}"#;

const PROMPT_RULES: &[&str] = &[
    NO_MARKDOWN_RULE,
    "DO NOT add explanations or any text before or after the JSON object",
    "Use only standard double quotes (\"), NOT curly quotes (“ ” or ‘ ’)",
    "DO NOT leave trailing commas before a closing } or ]",
    "DO NOT write comments inside the JSON",
    "\"fields\" must be an array; use more than one field whenever the description implies several pieces of data",
    "\"form_name\" should be a lowercase, URL-safe string (e.g., \"leave_application\")",
];

/// Build the generation prompt for a trimmed, non-empty description.
///
/// The description is embedded verbatim inside double quotes at the end.
/// Pure and deterministic.
pub fn build_form_prompt(description: &str) -> String {
    let mut prompt = String::with_capacity(
        PROMPT_HEADER.len() + PROMPT_EXAMPLE.len() + description.len() + 512,
    );
    prompt.push_str(PROMPT_HEADER);
    prompt.push_str("\n\n");
    prompt.push_str(PROMPT_EXAMPLE);
    prompt.push_str("\n\n### Rules:\n");
    for rule in PROMPT_RULES {
        prompt.push_str("- **");
        prompt.push_str(rule);
        prompt.push_str("**\n");
    }
    prompt.push_str("\n**User's Form Description:** \"");
    prompt.push_str(description);
    prompt.push('"');
    prompt
}
