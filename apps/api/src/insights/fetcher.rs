//! Insight fetcher: one-shot profession insight request with an empty fallback.

use tracing::{info, warn};

use crate::insights::prompts::{INSIGHTS_PROMPT_TEMPLATE, INSIGHTS_SYSTEM};
use crate::llm_client::prompts::fill_template;
use crate::llm_client::{complete_json, LanguageModel};
use crate::models::insight::ProfessionInsightBundle;

/// Fetches the insight bundle for `profession`.
///
/// Never fails: transport, API and parse errors are logged and resolve to
/// `ProfessionInsightBundle::empty()`, so callers need no separate "fetch failed" state.
pub async fn fetch_insights(model: &dyn LanguageModel, profession: &str) -> ProfessionInsightBundle {
    let profession = profession.trim();
    if profession.is_empty() {
        return ProfessionInsightBundle::empty();
    }

    let prompt = fill_template(INSIGHTS_PROMPT_TEMPLATE, &[("profession", profession)]);
    match complete_json::<ProfessionInsightBundle>(model, &prompt, INSIGHTS_SYSTEM).await {
        Ok(bundle) => {
            info!(
                profession,
                keywords = bundle.ats_keywords.len(),
                "Fetched profession insights"
            );
            bundle
        }
        Err(e) => {
            warn!(profession, "Insight fetch failed, using empty bundle: {e}");
            ProfessionInsightBundle::empty()
        }
    }
}
