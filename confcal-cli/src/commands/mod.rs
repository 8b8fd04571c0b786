pub mod batch;
pub mod config;
pub mod demo;
pub mod generate;
pub mod show;

use std::path::Path;

use anyhow::Result;
use confcal_core::{EventRecord, IcsGenerator};
use owo_colors::OwoColorize;

/// Save the event to the configured output directory.
///
/// The generator logs the underlying error; here it only becomes a failure.
fn save_featured(generator: &IcsGenerator, event: &EventRecord) -> Result<std::path::PathBuf> {
    let dir = generator.config().output_path();

    generator
        .save(event, &dir, None)
        .ok_or_else(|| anyhow::anyhow!("Could not save calendar file to {}", dir.display()))
}

fn print_saved(path: &Path, event: &EventRecord) {
    let display_path = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let filename = path
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_default();

    println!("{}", "✅ Calendar event saved successfully!".green());
    println!("📁 File location: {}", display_path.display());
    println!("📅 Event: {}", event.title);
    println!("📍 Location: {}", event.location);
    println!();
    println!("💡 To add to your calendar:");
    println!("   1. Open your calendar app (Google Calendar, Outlook, Apple Calendar, etc.)");
    println!("   2. Import the .ics file: {}", filename);
    println!("   3. The event will be added with reminders set!");
}
