//! Calendar document construction for a single event.

use chrono::{DateTime, Utc};

use super::document::{Component, Property};
use crate::event::EventRecord;
use crate::timestamp::format_utc;
use crate::utils::slugify;

/// `<slug>-<unix-timestamp>@<domain>`
pub fn generate_uid(title: &str, timestamp: i64, domain: &str) -> String {
    let slug = slugify(title);
    let slug = if slug.is_empty() { "event" } else { slug.as_str() };
    format!("{}-{}@{}", slug, timestamp, domain)
}

/// Build the VCALENDAR tree for one event, with a reminder one day and one
/// hour before the start.
///
/// URL, ORGANIZER and CATEGORIES are written verbatim; only the free-text
/// fields are escaped.
pub fn build_calendar(
    event: &EventRecord,
    uid: &str,
    dtstamp: DateTime<Utc>,
    product_id: &str,
) -> Component {
    let vevent = Component::new("VEVENT")
        .property(Property::raw("UID", uid))
        .property(Property::raw("DTSTART", format_utc(&event.start)))
        .property(Property::raw("DTEND", format_utc(&event.end)))
        .property(Property::raw("DTSTAMP", format_utc(&dtstamp)))
        .property(Property::text("SUMMARY", &event.title))
        .property(Property::text("LOCATION", &event.location))
        .property(Property::text("DESCRIPTION", &event.description))
        .property(Property::raw("ORGANIZER", format!("CN={}", event.organizer)))
        .property(Property::raw("URL", &event.url))
        .property(Property::raw("STATUS", "CONFIRMED"))
        .property(Property::raw("TRANSP", "OPAQUE"))
        .property(Property::raw("CATEGORIES", &event.categories))
        .component(display_alarm("-P1D", format!("{} starts tomorrow!", event.title)))
        .component(display_alarm("-PT1H", format!("{} starts in 1 hour!", event.title)));

    Component::new("VCALENDAR")
        .property(Property::raw("VERSION", "2.0"))
        .property(Property::raw("PRODID", product_id))
        .property(Property::raw("CALSCALE", "GREGORIAN"))
        .property(Property::raw("METHOD", "PUBLISH"))
        .component(vevent)
}

fn display_alarm(trigger: &str, description: String) -> Component {
    Component::new("VALARM")
        .property(Property::raw("TRIGGER", trigger))
        .property(Property::raw("ACTION", "DISPLAY"))
        .property(Property::text("DESCRIPTION", description))
}
