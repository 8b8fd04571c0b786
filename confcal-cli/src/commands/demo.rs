use anyhow::{Context, Result};
use confcal_core::IcsGenerator;
use owo_colors::OwoColorize;

use crate::render::{Render, render_preview};

/// Number of .ics lines shown after generating
const PREVIEW_LINES: usize = 15;

pub fn run(generator: &IcsGenerator) -> Result<()> {
    let event = generator
        .featured_event()
        .context("The featured event in config is invalid")?;

    println!("{}", format!("🎯 {} - Auto Demo", event.title).bold());
    println!("{}", event.render());

    println!();
    println!("📅 Generating calendar file automatically...");
    let path = super::save_featured(generator, &event)?;
    super::print_saved(&path, &event);

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read back {}", path.display()))?;

    println!();
    println!("{}", "🎉 Demo complete! Calendar file created successfully.".green());
    println!();
    println!("📄 Preview of generated .ics content:");
    println!("{}", "-".repeat(40));
    for line in render_preview(&content, PREVIEW_LINES) {
        println!("{}", line);
    }
    println!("{}", "-".repeat(40));

    Ok(())
}
