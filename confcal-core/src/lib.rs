//! Core of the confcal conference calendar generator.
//!
//! - `event` holds the resolved `EventRecord` and the loose `EventInput` hand-off shape
//! - `ics` builds and serializes the iCalendar document
//! - `generator` ties config, formatting and file output together

pub mod config;
pub mod error;
pub mod event;
pub mod generator;
pub mod ics;
pub mod timestamp;
pub mod utils;

pub use crate::config::GeneratorConfig;
pub use crate::error::{ConfCalError, ConfCalResult};
pub use crate::event::{EventDefaults, EventInput, EventRecord};
pub use crate::generator::IcsGenerator;
