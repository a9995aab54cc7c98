//! Deterministic fallback documents
//!
//! Built purely from the input with fixed time allocations, so generation
//! stays available when the upstream provider is down.

/// Templated agenda: one 15-minute line per topic line plus three fixed
/// additional items (5 + 10 + 5 minutes).
pub fn fallback_agenda(topics: &str) -> String {
    let lines: Vec<&str> = topics.split('\n').collect();
    let topic_items = lines
        .iter()
        .map(|topic| format!("- {} (15 minutes)", topic.trim()))
        .collect::<Vec<_>>()
        .join("\n");
    let total_minutes = lines.len() * 15 + 20;

    format!(
        "# Meeting Agenda\n\n\
         ## Topics:\n{topic_items}\n\n\
         ## Additional Items:\n\
         - Welcome and Introduction (5 minutes)\n\
         - Open Discussion (10 minutes)\n\
         - Action Items and Next Steps (5 minutes)\n\n\
         Total Estimated Time: {total_minutes} minutes"
    )
}

/// Templated summary used when the upstream generator fails.
pub fn fallback_summary() -> String {
    "# Meeting Summary\n\n\
     ## Key Points:\n\
     - Meeting notes processed\n\
     - Summary generation failed due to technical issues\n\n\
     ## Action Items:\n\
     - Review the original notes manually\n\
     - Try summarizing again later"
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_topics_produce_fifty_minute_agenda() {
        let agenda = fallback_agenda("A\nB");

        let fifteen_minute_items = agenda
            .lines()
            .filter(|line| line.ends_with("(15 minutes)"))
            .count();
        assert_eq!(fifteen_minute_items, 2);
        assert!(agenda.contains("- A (15 minutes)"));
        assert!(agenda.contains("- B (15 minutes)"));
        assert!(agenda.contains("Total Estimated Time: 50 minutes"));
    }

    #[test]
    fn agenda_is_never_empty() {
        assert!(!fallback_agenda("Quarterly review").is_empty());
        assert!(!fallback_agenda("").is_empty());
    }

    #[test]
    fn topic_lines_are_trimmed() {
        let agenda = fallback_agenda("  Budget  \nHiring");
        assert!(agenda.contains("- Budget (15 minutes)"));
        assert!(agenda.contains("- Hiring (15 minutes)"));
    }

    #[test]
    fn fallback_summary_carries_action_items_section() {
        let summary = fallback_summary();
        assert!(summary.contains("## Action Items:"));
    }
}
