// Generation module
//
// Text generation behind a provider trait, with a TTL cache and a
// deterministic local fallback so upstream failures never reach callers.

pub mod cache;
pub mod fallback;
pub mod gateway;
pub mod openai_provider;
pub mod provider;

pub use cache::GenerationCache;
pub use gateway::GenerationGateway;
pub use openai_provider::{OpenAiConfig, OpenAiProvider};
pub use provider::{GenerationError, GenerationProvider};

use regex::Regex;

/// Extract the "Action Items" section from generated summary prose.
///
/// Best-effort heuristic: it depends on the generator phrasing the section
/// with this exact marker, so an empty result is normal, never an error.
pub fn extract_action_items(summary: &str) -> String {
    let pattern =
        Regex::new(r"(?s)Action Items:(.*?)(?:\n\n|\z)").expect("action items pattern is valid");

    pattern
        .captures(summary)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_section_up_to_blank_line() {
        let summary = "## Decisions:\n- ship it\n\nAction Items:\n- Alice: draft RFC\n- Bob: review\n\n## Notes:\n- misc";
        assert_eq!(
            extract_action_items(summary),
            "- Alice: draft RFC\n- Bob: review"
        );
    }

    #[test]
    fn extracts_section_at_end_of_text() {
        let summary = "Summary text.\n\nAction Items:\n- follow up with the team";
        assert_eq!(extract_action_items(summary), "- follow up with the team");
    }

    #[test]
    fn missing_marker_yields_empty_string() {
        assert_eq!(extract_action_items("No actionable content here."), "");
    }
}
