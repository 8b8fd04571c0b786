//! iCalendar document model and generation.
//!
//! Documents are built as an ordered tree of components and properties and
//! rendered by a single serializer, which is the only place escaping happens.

mod document;
mod generate;

pub use document::{Component, Property, Value, escape_text, serialize};
pub use generate::{build_calendar, generate_uid};
