//! Recovery of a single JSON object from raw model output.
//!
//! Models wrap their answer in markdown fences, surround it with prose, use
//! curly quotes, leave trailing commas, and sometimes forget the comma
//! between array elements. [`extract_json`] undoes those mistakes:
//!
//! 1. Prefer the body of the first ```` ``` ```` fence (optionally tagged),
//!    else the whole text; take the span from the first `{` to the last `}`.
//! 2. Run [`clean_json_text`], a single scan that tracks string literals so
//!    that none of its repairs touch string contents.
//! 3. Parse with serde_json.

use serde_json::{Map, Value};
use tracing::debug;

use formcraft_types::generation::{ErrorKind, GenerationError, PipelineStage};

/// A parsed top-level JSON object whose shape is not yet validated.
pub type JsonObject = Map<String, Value>;

const FENCE: &str = "```";

/// Extract one JSON object from `raw`.
///
/// Fails with `NO_JSON_FOUND` when no `{ ... }` span exists and with
/// `JSON_SYNTAX_ERROR` when the cleaned span does not parse. Both failures
/// carry `raw` unchanged in `raw_text`.
pub fn extract_json(raw: &str) -> Result<JsonObject, GenerationError> {
    let span = fenced_block(raw)
        .and_then(brace_span)
        .or_else(|| brace_span(raw))
        .ok_or_else(|| {
            GenerationError::new(
                ErrorKind::NoJsonFound,
                PipelineStage::Extracting,
                "no JSON object found in model output",
            )
            .with_raw_text(raw)
        })?;

    let cleaned = clean_json_text(span);
    debug!(cleaned = %cleaned, "cleaned model output");

    match serde_json::from_str::<Value>(&cleaned) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(GenerationError::new(
            ErrorKind::JsonSyntaxError,
            PipelineStage::Extracting,
            format!("expected a JSON object, found {}", json_kind(&other)),
        )
        .with_raw_text(raw)),
        Err(e) => Err(GenerationError::new(
            ErrorKind::JsonSyntaxError,
            PipelineStage::Extracting,
            format!("model output is not valid JSON: {e}"),
        )
        .with_raw_text(raw)),
    }
}

/// Body of the first closed markdown fence, without its language tag.
fn fenced_block(text: &str) -> Option<&str> {
    let open = text.find(FENCE)?;
    let mut body = &text[open + FENCE.len()..];

    // A bare word on the opening line is a language tag ("json", "JSON").
    let line_end = body.find('\n').unwrap_or(body.len());
    if body[..line_end].trim().chars().all(|c| c.is_ascii_alphanumeric()) {
        body = &body[line_end..];
    }

    let close = body.find(FENCE)?;
    Some(&body[..close])
}

/// Inclusive span from the first `{` to the last `}`.
fn brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[derive(Clone, Copy)]
enum Quote {
    /// Opened with `"`; only `"` closes it.
    Straight,
    /// Opened with a curly double quote; any double quote closes it.
    Curly,
}

impl Quote {
    fn closes(self, c: char) -> bool {
        match self {
            Quote::Straight => c == '"',
            Quote::Curly => matches!(c, '"' | '“' | '”'),
        }
    }
}

/// Repair common model formatting mistakes outside string literals.
///
/// - curly double quotes delimiting a string become `"`
/// - curly single quotes become `'` (inside strings too)
/// - `//` and `#` line comments are dropped
/// - a comma directly before `}` or `]` is dropped
/// - `}` followed by `{` gains the missing comma
///
/// Valid JSON passes through unchanged.
pub fn clean_json_text(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut string: Option<Quote> = None;
    let mut escaped = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if let Some(quote) = string {
            if escaped {
                escaped = false;
                out.push(c);
            } else if c == '\\' {
                escaped = true;
                out.push(c);
            } else if quote.closes(c) {
                string = None;
                out.push('"');
            } else {
                out.push(normalize_single_quote(c));
            }
            i += 1;
            continue;
        }

        match c {
            '"' => {
                string = Some(Quote::Straight);
                out.push('"');
            }
            '“' | '”' => {
                string = Some(Quote::Curly);
                out.push('"');
            }
            '‘' | '’' => out.push('\''),
            '/' if chars.get(i + 1) == Some(&'/') => {
                i = skip_line(&chars, i);
                continue;
            }
            '#' => {
                i = skip_line(&chars, i);
                continue;
            }
            ',' if matches!(next_significant(&chars, i + 1), Some('}' | ']')) => {}
            '}' if next_significant(&chars, i + 1) == Some('{') => out.push_str("},"),
            _ => out.push(c),
        }
        i += 1;
    }

    out
}

fn normalize_single_quote(c: char) -> char {
    match c {
        '‘' | '’' => '\'',
        other => other,
    }
}

/// Index of the newline ending the line that contains `from` (or end of input).
fn skip_line(chars: &[char], from: usize) -> usize {
    chars[from..]
        .iter()
        .position(|&c| c == '\n')
        .map_or(chars.len(), |offset| from + offset)
}

/// Next character at or after `from` that is neither whitespace nor part of
/// a line comment.
fn next_significant(chars: &[char], mut from: usize) -> Option<char> {
    while from < chars.len() {
        let c = chars[from];
        if c.is_whitespace() {
            from += 1;
        } else if c == '#' || (c == '/' && chars.get(from + 1) == Some(&'/')) {
            from = skip_line(chars, from);
        } else {
            return Some(c);
        }
    }
    None
}
