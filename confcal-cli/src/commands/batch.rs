use std::path::Path;

use anyhow::{Context, Result};
use confcal_core::IcsGenerator;
use confcal_core::event::load_inputs;
use owo_colors::OwoColorize;

pub fn run(generator: &IcsGenerator, file: &Path) -> Result<()> {
    let inputs = load_inputs(file)
        .with_context(|| format!("Failed to read events from {}", file.display()))?;

    if inputs.is_empty() {
        println!("No events found in {}", file.display());
        return Ok(());
    }

    let dir = generator.config().output_path();
    let paths = generator.save_many(&inputs, &dir);

    for path in &paths {
        println!("  {} {}", "+".green(), path.display());
    }

    println!();
    println!(
        "{} of {} events written to {}",
        paths.len(),
        inputs.len(),
        dir.display()
    );

    let skipped = inputs.len() - paths.len();
    if skipped > 0 {
        println!(
            "{}",
            format!("{} skipped, see the log output above", skipped).yellow()
        );
    }

    Ok(())
}
