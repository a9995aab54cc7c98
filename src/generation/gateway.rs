//! Generation gateway
//!
//! Wraps a provider with the cache and the fallback templates. Both
//! operations are infallible by contract: an upstream failure is absorbed
//! into the deterministic fallback and only visible in the logs, never in
//! the shape of the return value.

use std::sync::Arc;

use super::cache::GenerationCache;
use super::fallback;
use super::provider::GenerationProvider;

const AGENDA_SYSTEM_PROMPT: &str = "You are an expert meeting facilitator. Create a structured \
     meeting agenda with time estimates based on the provided topics.";

const SUMMARY_SYSTEM_PROMPT: &str = "You are an expert meeting summarizer. Extract key decisions \
     and action items from meeting notes.";

pub struct GenerationGateway {
    provider: Arc<dyn GenerationProvider>,
    cache: Arc<GenerationCache>,
}

impl GenerationGateway {
    pub fn new(provider: Arc<dyn GenerationProvider>, cache: Arc<GenerationCache>) -> Self {
        Self { provider, cache }
    }

    /// Generate an agenda for a newline-delimited topic list.
    pub async fn generate_agenda(&self, topics: &str) -> String {
        let cache_key = GenerationCache::agenda_key(topics);
        if let Some(content) = self.cache.get(&cache_key) {
            log::debug!("using cached agenda");
            return content;
        }

        let user_prompt = format!(
            "Create a meeting agenda with time estimates for the following topics: {topics}"
        );
        match self.provider.complete(AGENDA_SYSTEM_PROMPT, &user_prompt).await {
            Ok(content) => {
                self.cache.insert(cache_key, content.clone());
                content
            }
            Err(e) => {
                log::warn!("agenda generation failed, using fallback template: {e}");
                fallback::fallback_agenda(topics)
            }
        }
    }

    /// Generate a summary for meeting notes.
    pub async fn generate_summary(&self, notes: &str) -> String {
        let cache_key = GenerationCache::summary_key(notes);
        if let Some(content) = self.cache.get(&cache_key) {
            log::debug!("using cached summary");
            return content;
        }

        let user_prompt =
            format!("Summarize the key decisions and action items from these meeting notes: {notes}");
        match self.provider.complete(SUMMARY_SYSTEM_PROMPT, &user_prompt).await {
            Ok(content) => {
                self.cache.insert(cache_key, content.clone());
                content
            }
            Err(e) => {
                log::warn!("summary generation failed, using fallback template: {e}");
                fallback::fallback_summary()
            }
        }
    }
}
