// Profession insights and writing assistance.
// All LLM calls go through llm_client; nothing here talks to Gemini directly.
// Insight fetches never fail past this module: failures resolve to an empty bundle.

pub mod assistant;
pub mod fetcher;
pub mod handlers;
pub mod prompts;
pub mod slot;

pub use fetcher::fetch_insights;
pub use slot::{InsightSlot, InsightTicket};
