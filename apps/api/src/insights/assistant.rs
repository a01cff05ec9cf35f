//! Writing assistance built on top of the insight bundle and the language model.
//!
//! LLM-backed helpers degrade silently: a failed correction returns the user's text,
//! a failed score is 0.

use serde::Serialize;
use tracing::warn;

use crate::insights::prompts::{ATS_SCORE_PROMPT_TEMPLATE, FIELD_SUGGESTION_PROMPT_TEMPLATE};
use crate::llm_client::prompts::{fill_template, BARE_VALUE_SYSTEM};
use crate::llm_client::LanguageModel;
use crate::models::insight::ProfessionInsightBundle;
use crate::models::record::{ResumeRecord, Skill, SkillLevel};

/// Presence of one ATS keyword among the record's skills.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordCoverage {
    pub keyword: String,
    pub present: bool,
}

/// Returns a corrected / tightened version of `value`, or `value` itself on any failure.
pub async fn suggest_field(model: &dyn LanguageModel, field: &str, value: &str) -> String {
    if value.trim().is_empty() {
        return value.to_string();
    }
    let prompt = fill_template(
        FIELD_SUGGESTION_PROMPT_TEMPLATE,
        &[("field", field), ("value", value)],
    );
    match model.complete(&prompt, BARE_VALUE_SYSTEM).await {
        Ok(text) => {
            let cleaned = strip_wrapping_quotes(text.trim());
            if cleaned.is_empty() {
                value.to_string()
            } else {
                cleaned.to_string()
            }
        }
        Err(e) => {
            warn!(field, "Field suggestion failed: {e}");
            value.to_string()
        }
    }
}

/// Scores the record for ATS screening (0–100). Returns 0 on any failure.
pub async fn ats_score(model: &dyn LanguageModel, record: &ResumeRecord) -> u8 {
    let record_json = match serde_json::to_string(record) {
        Ok(json) => json,
        Err(e) => {
            warn!("Could not serialize record for ATS scoring: {e}");
            return 0;
        }
    };
    let prompt = fill_template(ATS_SCORE_PROMPT_TEMPLATE, &[("record_json", &record_json)]);
    match model.complete(&prompt, BARE_VALUE_SYSTEM).await {
        Ok(text) => parse_score(&text),
        Err(e) => {
            warn!("ATS scoring failed: {e}");
            0
        }
    }
}

/// Appends every ATS keyword not already listed as a skill (case-insensitive).
/// Returns how many skills were added.
pub fn merge_ats_keywords(record: &mut ResumeRecord, bundle: &ProfessionInsightBundle) -> usize {
    let mut added = 0;
    for keyword in &bundle.ats_keywords {
        let keyword = keyword.trim();
        if keyword.is_empty() || has_skill(record, keyword) {
            continue;
        }
        record.skills.push(Skill {
            name: keyword.to_string(),
            level: SkillLevel::Intermediate,
            years_of_experience: 1,
            certifications: Vec::new(),
        });
        added += 1;
    }
    added
}

/// Reports which ATS keywords the record already covers.
pub fn keyword_coverage(
    record: &ResumeRecord,
    bundle: &ProfessionInsightBundle,
) -> Vec<KeywordCoverage> {
    bundle
        .ats_keywords
        .iter()
        .map(|keyword| KeywordCoverage {
            keyword: keyword.clone(),
            present: has_skill(record, keyword.trim()),
        })
        .collect()
}

fn has_skill(record: &ResumeRecord, name: &str) -> bool {
    let lower = name.to_lowercase();
    record
        .skills
        .iter()
        .any(|s| s.name.trim().to_lowercase() == lower)
}

/// First run of ASCII digits in `text`, clamped to 0–100.
fn parse_score(text: &str) -> u8 {
    let digits: String = text
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        return 0;
    }
    let significant = digits.trim_start_matches('0');
    if significant.len() > 3 {
        return 100;
    }
    significant.parse::<u16>().map(|n| n.min(100) as u8).unwrap_or(0)
}

fn strip_wrapping_quotes(text: &str) -> &str {
    let text = text.strip_prefix('"').unwrap_or(text);
    text.strip_suffix('"').unwrap_or(text)
}
