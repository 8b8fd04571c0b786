//! The calendar generator: resolves event inputs, formats them as .ics
//! documents and writes them to disk.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;

use crate::config::GeneratorConfig;
use crate::error::{ConfCalError, ConfCalResult};
use crate::event::{EventInput, EventRecord};
use crate::ics::{build_calendar, generate_uid, serialize};
use crate::timestamp::{is_date_only, parse_timestamp};
use crate::utils::slugify;

pub struct IcsGenerator {
    config: GeneratorConfig,
    tz: Tz,
    default_start: DateTime<Utc>,
    default_end: DateTime<Utc>,
    default_duration: Duration,
    /// Unix timestamp used in the most recent UID
    last_uid_timestamp: AtomicI64,
}

impl IcsGenerator {
    /// Validates the time zone and default dates up front so that resolving
    /// individual events never has to.
    pub fn new(config: GeneratorConfig) -> ConfCalResult<Self> {
        let tz = config.tz()?;

        let default_start = parse_timestamp(&config.defaults.start, tz).ok_or_else(|| {
            ConfCalError::Config(format!(
                "Invalid default start date '{}'",
                config.defaults.start
            ))
        })?;
        let default_end = parse_timestamp(&config.defaults.end, tz).ok_or_else(|| {
            ConfCalError::Config(format!("Invalid default end date '{}'", config.defaults.end))
        })?;

        if default_end < default_start {
            return Err(ConfCalError::Config(
                "Default end date is before default start date".into(),
            ));
        }

        let default_duration = humantime::parse_duration(&config.defaults.duration)
            .ok()
            .and_then(|d| Duration::from_std(d).ok())
            .ok_or_else(|| {
                ConfCalError::Config(format!(
                    "Invalid default duration '{}'",
                    config.defaults.duration
                ))
            })?;

        Ok(IcsGenerator {
            config,
            tz,
            default_start,
            default_end,
            default_duration,
            last_uid_timestamp: AtomicI64::new(0),
        })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// The configured featured event, resolved.
    pub fn featured_event(&self) -> ConfCalResult<EventRecord> {
        self.resolve(&self.config.event)
    }

    /// Apply defaults to an event input.
    ///
    /// Blank text fields take the configured defaults. A missing or
    /// unparseable start falls back to the default dates. A missing or
    /// unparseable end is derived from a supplied start. Fails only when an
    /// explicitly supplied end is before the start.
    pub fn resolve(&self, input: &EventInput) -> ConfCalResult<EventRecord> {
        let defaults = &self.config.defaults;

        let start_input = non_blank(input.start.as_deref());
        let parsed_start = start_input.and_then(|v| self.parse_time("start", v));
        let parsed_end = non_blank(input.end.as_deref()).and_then(|v| self.parse_time("end", v));

        let start = parsed_start.unwrap_or(self.default_start);
        let end = match (parsed_end, parsed_start) {
            (Some(end), _) => end,
            (None, Some(start)) if start_input.is_some_and(is_date_only) => {
                start + Duration::days(1)
            }
            (None, Some(start)) => start + self.default_duration,
            (None, None) => self.default_end,
        };

        let mut event = EventRecord::new(
            text_or(&input.title, &defaults.title),
            start,
            end,
            text_or(&input.location, &defaults.location),
        )?;
        event.description = text_or(&input.description, &defaults.description);
        event.url = text_or(&input.url, &defaults.url);
        event.organizer = text_or(&input.organizer, &defaults.organizer);
        event.categories = text_or(&input.categories, &defaults.categories);

        Ok(event)
    }

    fn parse_time(&self, field: &str, value: &str) -> Option<DateTime<Utc>> {
        let parsed = parse_timestamp(value, self.tz);
        if parsed.is_none() {
            tracing::warn!(field, value, "Unparseable date, ignoring it");
        }
        parsed
    }

    /// Format an event as .ics text, stamped with the current time.
    pub fn format(&self, event: &EventRecord) -> String {
        self.format_at(event, Utc::now())
    }

    pub fn format_at(&self, event: &EventRecord, now: DateTime<Utc>) -> String {
        let timestamp = self.next_uid_timestamp(now.timestamp());
        let uid = generate_uid(&event.title, timestamp, &self.config.uid_domain);

        tracing::debug!(uid = %uid, title = %event.title, "Generating calendar document");

        serialize(&build_calendar(event, &uid, now, &self.config.product_id))
    }

    /// Returns `now`, or one past the last issued timestamp if the clock has
    /// not moved on, so UIDs from this generator never repeat.
    fn next_uid_timestamp(&self, now: i64) -> i64 {
        let previous = self
            .last_uid_timestamp
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last + 1))
            })
            .unwrap_or_else(|last| last);

        now.max(previous + 1)
    }

    /// Write an event to `dir`, creating the directory if needed.
    ///
    /// The filename defaults to the slugified title. Existing files are
    /// overwritten. Errors are logged and reported as `None`.
    pub fn save(&self, event: &EventRecord, dir: &Path, filename: Option<&str>) -> Option<PathBuf> {
        match self.try_save(event, dir, filename) {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::error!(title = %event.title, dir = %dir.display(), "Could not save calendar file: {e}");
                None
            }
        }
    }

    fn try_save(
        &self,
        event: &EventRecord,
        dir: &Path,
        filename: Option<&str>,
    ) -> ConfCalResult<PathBuf> {
        std::fs::create_dir_all(dir)?;

        let path = match filename {
            Some(name) => dir.join(name),
            None => dir.join(default_filename(&event.title)),
        };

        std::fs::write(&path, self.format(event))?;

        tracing::info!(path = %path.display(), "Wrote calendar file");

        Ok(path)
    }

    /// Resolve and save each input in order. Inputs that fail to resolve or
    /// to write are skipped; only the written paths are returned.
    pub fn save_many(&self, inputs: &[EventInput], dir: &Path) -> Vec<PathBuf> {
        let mut paths = Vec::with_capacity(inputs.len());

        for (index, input) in inputs.iter().enumerate() {
            let event = match self.resolve(input) {
                Ok(event) => event,
                Err(e) => {
                    tracing::warn!(index, "Skipping event: {e}");
                    continue;
                }
            };

            if let Some(path) = self.save(&event, dir, None) {
                paths.push(path);
            }
        }

        paths
    }
}

/// `<slug>.ics`, or `event.ics` when the title has no usable characters.
pub fn default_filename(title: &str) -> String {
    let slug = slugify(title);
    if slug.is_empty() {
        "event.ics".to_string()
    } else {
        format!("{}.ics", slug)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// The supplied value unchanged, or `default` when it is missing or blank.
fn text_or(value: &Option<String>, default: &str) -> String {
    non_blank(value.as_deref()).unwrap_or(default).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn generator() -> IcsGenerator {
        IcsGenerator::new(GeneratorConfig::default()).unwrap()
    }

    fn input(title: &str, start: &str, end: &str) -> EventInput {
        EventInput {
            title: Some(title.into()),
            start: Some(start.into()),
            end: Some(end.into()),
            ..EventInput::default()
        }
    }

    fn demo_launch() -> EventRecord {
        EventRecord::new(
            "Demo, Inc; Launch",
            Utc.with_ymd_and_hms(2025, 11, 19, 9, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 11, 19, 17, 0, 0).unwrap(),
            "NYC",
        )
        .unwrap()
    }

    fn line<'a>(ics: &'a str, prefix: &str) -> Option<&'a str> {
        ics.split("\r\n").find(|l| l.starts_with(prefix))
    }

    #[test]
    fn test_summary_is_escaped() {
        let ics = generator().format(&demo_launch());
        assert_eq!(line(&ics, "SUMMARY:"), Some("SUMMARY:Demo\\, Inc\\; Launch"));
        assert_eq!(line(&ics, "LOCATION:"), Some("LOCATION:NYC"));
    }

    #[test]
    fn test_single_vevent_with_utc_times() {
        let ics = generator().format(&demo_launch());

        assert_eq!(ics.matches("BEGIN:VEVENT").count(), 1);
        assert_eq!(ics.matches("END:VEVENT").count(), 1);
        assert_eq!(ics.matches("BEGIN:VALARM").count(), 2);
        assert_eq!(line(&ics, "DTSTART:"), Some("DTSTART:20251119T090000Z"));
        assert_eq!(line(&ics, "DTEND:"), Some("DTEND:20251119T170000Z"));
        assert!(ics.starts_with("BEGIN:VCALENDAR\r\n"));
        assert!(ics.ends_with("END:VCALENDAR"));
    }

    #[test]
    fn test_newlines_never_reach_output_raw() {
        let mut event = demo_launch();
        event.title = "Day one,\nday two;\r\nday three".into();
        event.description = "line\nline".into();

        let ics = generator().format(&event);

        assert_eq!(
            line(&ics, "SUMMARY:"),
            Some("SUMMARY:Day one\\,\\nday two\\;\\nday three")
        );
        assert!(
            ics.split("\r\n")
                .all(|l| !l.contains('\n') && !l.contains('\r')),
            "Raw line break in output:\n{}",
            ics
        );
    }

    #[test]
    fn test_repeat_format_differs_only_in_uid_and_dtstamp() {
        let generator = generator();
        let event = demo_launch();

        let first = generator.format_at(&event, Utc.with_ymd_and_hms(2025, 9, 1, 8, 0, 0).unwrap());
        let second = generator.format_at(&event, Utc.with_ymd_and_hms(2025, 9, 2, 8, 0, 0).unwrap());

        let stable = |ics: &str| -> Vec<String> {
            ics.split("\r\n")
                .filter(|l| !l.starts_with("UID:") && !l.starts_with("DTSTAMP:"))
                .map(str::to_string)
                .collect()
        };

        assert_ne!(first, second);
        assert_eq!(stable(&first), stable(&second));
    }

    #[test]
    fn test_uids_unique_within_same_second() {
        let generator = generator();
        let event = demo_launch();
        let now = Utc.with_ymd_and_hms(2025, 9, 1, 8, 0, 0).unwrap();

        let uids: Vec<String> = (0..3)
            .map(|_| {
                line(&generator.format_at(&event, now), "UID:")
                    .unwrap()
                    .to_string()
            })
            .collect();

        assert_eq!(uids[0], format!("UID:demo-inc-launch-{}@ai.engineer", now.timestamp()));
        assert_ne!(uids[0], uids[1]);
        assert_ne!(uids[1], uids[2]);
        assert_ne!(uids[0], uids[2]);
    }

    #[test]
    fn test_resolve_applies_defaults() {
        let event = generator().resolve(&EventInput::default()).unwrap();

        assert_eq!(event.title, "Untitled Event");
        assert_eq!(event.location, "Location TBD");
        assert_eq!(event.start, Utc.with_ymd_and_hms(2025, 11, 19, 9, 0, 0).unwrap());
        assert_eq!(event.end, Utc.with_ymd_and_hms(2025, 11, 22, 17, 0, 0).unwrap());
        assert_eq!(event.url, "");
    }

    #[test]
    fn test_resolve_treats_blank_as_missing_and_keeps_text_as_given() {
        let event = generator()
            .resolve(&EventInput {
                title: Some("Keynote".into()),
                location: Some("   ".into()),
                description: Some("Doors open at 8.\n".into()),
                ..EventInput::default()
            })
            .unwrap();

        assert_eq!(event.title, "Keynote");
        assert_eq!(event.location, "Location TBD");
        assert_eq!(event.description, "Doors open at 8.\n");
    }

    #[test]
    fn test_resolve_malformed_dates_fall_back() {
        let event = generator()
            .resolve(&input("Mixer", "%%%", "Nov ??, 20xx"))
            .unwrap();

        assert_eq!(event.start, Utc.with_ymd_and_hms(2025, 11, 19, 9, 0, 0).unwrap());
        assert_eq!(event.end, Utc.with_ymd_and_hms(2025, 11, 22, 17, 0, 0).unwrap());
    }

    #[test]
    fn test_resolve_rejects_explicit_end_before_start() {
        let err = generator()
            .resolve(&input("Afterparty", "2025-12-01T20:00", "2025-12-01T18:00"))
            .unwrap_err();

        assert!(matches!(err, ConfCalError::InvalidRange { .. }));
    }

    #[test]
    fn test_resolve_date_only_start_after_default_end() {
        let inputs: Vec<EventInput> = serde_json::from_str(
            r#"[{"title": "AI Engineer Summit 2026", "date": "2026-11-18", "location": "New York, New York"}]"#,
        )
        .unwrap();

        let event = generator().resolve(&inputs[0]).unwrap();

        assert_eq!(event.start, Utc.with_ymd_and_hms(2026, 11, 18, 0, 0, 0).unwrap());
        assert_eq!(event.end, Utc.with_ymd_and_hms(2026, 11, 19, 0, 0, 0).unwrap());

        let tmp = tempfile::tempdir().unwrap();
        let paths = generator().save_many(&inputs, tmp.path());
        assert_eq!(paths, vec![tmp.path().join("ai-engineer-summit-2026.ics")]);
    }

    #[test]
    fn test_resolve_timed_start_without_end_uses_default_duration() {
        let event = generator()
            .resolve(&EventInput {
                title: Some("Afterparty".into()),
                start: Some("2025-12-01T20:00".into()),
                ..EventInput::default()
            })
            .unwrap();

        assert_eq!(event.start, Utc.with_ymd_and_hms(2025, 12, 1, 20, 0, 0).unwrap());
        assert_eq!(event.end, Utc.with_ymd_and_hms(2025, 12, 1, 21, 0, 0).unwrap());
    }

    #[test]
    fn test_resolve_unparseable_end_is_derived_from_start() {
        let mut config = GeneratorConfig::default();
        config.defaults.duration = "90m".into();
        let generator = IcsGenerator::new(config).unwrap();

        let event = generator
            .resolve(&input("Workshop", "2026-03-02T14:00", "%%%"))
            .unwrap();

        assert_eq!(event.end, Utc.with_ymd_and_hms(2026, 3, 2, 15, 30, 0).unwrap());
    }

    #[test]
    fn test_featured_event_is_summit() {
        let event = generator().featured_event().unwrap();

        assert_eq!(event.title, "AI Engineer Summit 2025");
        assert_eq!(event.location, "New York, New York");
        assert_eq!(event.categories, "CONFERENCE,TECHNOLOGY,AI");

        let ics = generator().format(&event);
        assert_eq!(line(&ics, "ORGANIZER:"), Some("ORGANIZER:CN=AI Engineer Summit"));
        assert!(line(&ics, "UID:").unwrap().starts_with("UID:ai-engineer-summit-2025-"));
    }

    #[test]
    fn test_new_rejects_bad_config() {
        let bad_tz = GeneratorConfig {
            timezone: "Nowhere/Special".into(),
            ..GeneratorConfig::default()
        };
        assert!(matches!(IcsGenerator::new(bad_tz), Err(ConfCalError::Config(_))));

        let mut bad_default = GeneratorConfig::default();
        bad_default.defaults.start = "%%%".into();
        assert!(matches!(
            IcsGenerator::new(bad_default),
            Err(ConfCalError::Config(_))
        ));

        let mut bad_duration = GeneratorConfig::default();
        bad_duration.defaults.duration = "a while".into();
        assert!(matches!(
            IcsGenerator::new(bad_duration),
            Err(ConfCalError::Config(_))
        ));
    }

    #[test]
    fn test_save_many_keeps_long_titles_apart() {
        let tmp = tempfile::tempdir().unwrap();
        let inputs = vec![
            input(
                "AI Engineer Summit 2025 Workshop Building Reliable Agents Part One",
                "2025-11-20T09:00",
                "2025-11-20T12:00",
            ),
            input(
                "AI Engineer Summit 2025 Workshop Building Reliable Agents Part Two",
                "2025-11-20T13:00",
                "2025-11-20T16:00",
            ),
        ];

        let paths = generator().save_many(&inputs, tmp.path());

        assert_eq!(paths.len(), 2);
        assert_ne!(paths[0], paths[1]);
        assert!(paths.iter().all(|p| p.exists()));
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 2);
    }

    #[test]
    fn test_save_creates_nested_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("a").join("b").join("c");

        let path = generator().save(&demo_launch(), &dir, None).unwrap();

        assert_eq!(path, dir.join("demo-inc-launch.ics"));
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("SUMMARY:Demo\\, Inc\\; Launch"));
    }

    #[test]
    fn test_save_with_explicit_filename_overwrites() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("summit.ics");
        std::fs::write(&target, "old").unwrap();

        let path = generator()
            .save(&demo_launch(), tmp.path(), Some("summit.ics"))
            .unwrap();

        assert_eq!(path, target);
        assert!(std::fs::read_to_string(&target).unwrap().starts_with("BEGIN:VCALENDAR"));
    }

    #[test]
    fn test_save_failure_returns_none() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();

        assert_eq!(generator().save(&demo_launch(), &blocker.join("sub"), None), None);
    }

    #[test]
    fn test_save_many_skips_invalid_records() {
        let tmp = tempfile::tempdir().unwrap();
        let inputs = vec![
            input("Opening Keynote", "2025-11-19T09:00", "2025-11-19T10:00"),
            input("Broken", "2025-12-31T09:00", "2025-12-30T09:00"),
            input("Expo Hall", "2025-11-20T10:00", "2025-11-20T18:00"),
        ];

        let paths = generator().save_many(&inputs, tmp.path());

        assert_eq!(
            paths,
            vec![
                tmp.path().join("opening-keynote.ics"),
                tmp.path().join("expo-hall.ics"),
            ]
        );
        assert!(!tmp.path().join("broken.ics").exists());
    }

    #[test]
    fn test_default_filename() {
        assert_eq!(default_filename("AI Engineer Summit 2025"), "ai-engineer-summit-2025.ics");
        assert_eq!(default_filename("***"), "event.ics");
    }
}
