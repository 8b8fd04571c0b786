//! Terminal rendering for confcal types.
//!
//! Extension traits that add colored output to confcal-core types using
//! owo_colors.

use confcal_core::EventRecord;
use owo_colors::OwoColorize;

const RULE_WIDTH: usize = 50;
const DESCRIPTION_PREVIEW_CHARS: usize = 100;

pub trait Render {
    fn render(&self) -> String;
}

impl Render for EventRecord {
    fn render(&self) -> String {
        let mut lines = vec![
            rule(),
            format!("📅 Event: {}", self.title.bold()),
            format!("📍 Location: {}", self.location),
            format!("🗓️  Dates: {}", render_date_range(self)),
        ];

        if !self.url.is_empty() {
            lines.push(format!("🌐 Website: {}", self.url.underline()));
        }

        if !self.description.is_empty() {
            lines.push(format!(
                "📝 Description: {}",
                truncate(&self.description, DESCRIPTION_PREVIEW_CHARS)
            ));
        }

        lines.push(rule());
        lines.join("\n")
    }
}

pub fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// "November 19 - November 22, 2025", or a single date for same-day events.
fn render_date_range(event: &EventRecord) -> String {
    if event.start.date_naive() == event.end.date_naive() {
        event.start.format("%B %d, %Y").to_string()
    } else {
        format!(
            "{} - {}",
            event.start.format("%B %d"),
            event.end.format("%B %d, %Y")
        )
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    let flat = text.replace('\n', " ");
    if flat.chars().count() <= max_chars {
        flat
    } else {
        format!("{}...", flat.chars().take(max_chars).collect::<String>())
    }
}

/// Numbered preview of the first `limit` lines of an .ics document.
pub fn render_preview(content: &str, limit: usize) -> Vec<String> {
    let lines: Vec<&str> = content.split("\r\n").collect();

    let mut out: Vec<String> = lines
        .iter()
        .take(limit)
        .enumerate()
        .map(|(i, line)| format!("{:2}: {}", i + 1, line))
        .collect();

    if lines.len() > limit {
        out.push(format!("... ({} more lines)", lines.len() - limit).dimmed().to_string());
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn event(start_day: u32, end_day: u32) -> EventRecord {
        EventRecord::new(
            "Summit",
            Utc.with_ymd_and_hms(2025, 11, start_day, 9, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 11, end_day, 17, 0, 0).unwrap(),
            "NYC",
        )
        .unwrap()
    }

    #[test]
    fn test_date_range() {
        assert_eq!(render_date_range(&event(19, 22)), "November 19 - November 22, 2025");
        assert_eq!(render_date_range(&event(19, 19)), "November 19, 2025");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a\nb", 10), "a b");
        assert_eq!(truncate("abcdefghij", 4), "abcd...");
    }

    #[test]
    fn test_render_preview_counts_remaining_lines() {
        let content = (1..=20).map(|i| format!("L{}", i)).collect::<Vec<_>>().join("\r\n");
        let preview = render_preview(&content, 15);

        assert_eq!(preview.len(), 16);
        assert_eq!(preview[0], " 1: L1");
        assert_eq!(preview[14], "15: L15");
        assert!(preview[15].contains("(5 more lines)"));
    }

    #[test]
    fn test_render_preview_short_document() {
        let preview = render_preview("A\r\nB", 15);
        assert_eq!(preview, vec![" 1: A".to_string(), " 2: B".to_string()]);
    }
}
