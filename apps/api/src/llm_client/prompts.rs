// Shared prompt constants and prompt-building utilities.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt fragment for replies that must be a single bare value.
pub const BARE_VALUE_SYSTEM: &str = "You are a precise assistant. \
    Respond with only the requested value. \
    Do not include any extra text, quotes, or explanation.";

/// Replaces every `{key}` placeholder in `template` with its value.
pub fn fill_template(template: &str, vars: &[(&str, &str)]) -> String {
    vars.iter().fold(template.to_string(), |acc, (key, value)| {
        acc.replace(&format!("{{{key}}}"), value)
    })
}
