use anyhow::{Context, Result};
use confcal_core::IcsGenerator;
use dialoguer::Confirm;
use owo_colors::OwoColorize;

use crate::render::{Render, rule};

pub fn run(generator: &IcsGenerator) -> Result<()> {
    let event = generator
        .featured_event()
        .context("The featured event in config is invalid")?;

    println!("{}", format!("🤖 {} Calendar Generator", event.title).bold());
    println!("{}", event.render());

    let proceed = Confirm::new()
        .with_prompt("Generate calendar file?")
        .default(true)
        .interact()?;

    if !proceed {
        println!("Calendar generation cancelled.");
        return Ok(());
    }

    let path = super::save_featured(generator, &event)?;
    super::print_saved(&path, &event);

    println!();
    println!("{}", "🎉 Success! Your calendar file is ready.".green());
    println!("{}", rule().dimmed());

    let open_folder = Confirm::new()
        .with_prompt("Open file location?")
        .default(false)
        .interact()?;

    if open_folder {
        let folder = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| std::path::Path::new("."));

        if let Err(e) = open::that(folder) {
            eprintln!("  {}", format!("Could not open {}: {}", folder.display(), e).red());
        }
    }

    Ok(())
}
